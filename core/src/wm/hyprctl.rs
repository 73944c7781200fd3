//! Hyprland backend — shells out to `hyprctl` and parses its JSON output.

use std::collections::HashMap;
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::window::{Monitor, WindowRecord, WorkspaceId};
use crate::wm::{Dispatch, GroupDirection, WmClient};


#[derive(Debug, Deserialize)]
struct RawWorkspace {
    id: WorkspaceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMonitor {
    id: i64,
    name: String,
    #[serde(default)]
    focused: bool,
    active_workspace: RawWorkspace,
}

#[derive(Debug, Deserialize)]
struct RawClient {
    address: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    title: String,
    at: [i32; 2],
    size: [i32; 2],
    workspace: RawWorkspace,
    #[serde(default)]
    floating: bool,
    #[serde(default)]
    monitor: i64,
}


/// Live window-manager client backed by the `hyprctl` binary.
#[derive(Debug, Clone)]
pub struct Hyprctl {
    program: String,
}


impl Default for Hyprctl {
    fn default() -> Self {
        Hyprctl::new("hyprctl")
    }
}


impl Hyprctl {
    pub fn new(program: impl Into<String>) -> Self {
        Hyprctl {
            program: program.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                command: args.join(" "),
                source,
            })?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn query(&self, what: &str) -> Result<String> {
        self.run(&[what.to_string(), "-j".to_string()])
    }
}


impl WmClient for Hyprctl {
    fn monitors(&self) -> Result<Vec<Monitor>> {
        parse_monitors(&self.query("monitors")?)
    }

    fn clients(&self) -> Result<Vec<WindowRecord>> {
        let monitors = self.monitors()?;
        parse_clients(&self.query("clients")?, &monitors)
    }

    fn dispatch(&mut self, cmd: &Dispatch) -> Result<()> {
        let args = dispatch_args(cmd);
        debug!(command = %args.join(" "), "hyprctl");
        let reply = self.run(&args)?;
        if reply != "ok" {
            warn!(command = %args.join(" "), reply = %reply, "dispatch not acknowledged");
        }
        Ok(())
    }
}


/// Parse `hyprctl monitors -j`.
pub fn parse_monitors(json: &str) -> Result<Vec<Monitor>> {
    let raw: Vec<RawMonitor> = serde_json::from_str(json).map_err(|source| Error::Query {
        command: "monitors".into(),
        source,
    })?;
    Ok(raw
        .into_iter()
        .map(|m| Monitor {
            id: m.id,
            name: m.name,
            focused: m.focused,
            active_workspace: m.active_workspace.id,
        })
        .collect())
}


/// Parse `hyprctl clients -j`, resolving numeric monitor ids to names.
pub fn parse_clients(json: &str, monitors: &[Monitor]) -> Result<Vec<WindowRecord>> {
    let raw: Vec<RawClient> = serde_json::from_str(json).map_err(|source| Error::Query {
        command: "clients".into(),
        source,
    })?;
    let names: HashMap<i64, &str> = monitors.iter().map(|m| (m.id, m.name.as_str())).collect();
    Ok(raw
        .into_iter()
        .map(|c| WindowRecord {
            monitor: names.get(&c.monitor).map(|n| n.to_string()).unwrap_or_default(),
            address: c.address,
            class: c.class,
            title: c.title,
            at: c.at,
            size: c.size,
            workspace: c.workspace.id,
            floating: c.floating,
        })
        .collect())
}


/// The `hyprctl` argument vector for one dispatch.
pub fn dispatch_args(cmd: &Dispatch) -> Vec<String> {
    let mut args = vec!["dispatch".to_string()];
    match cmd {
        Dispatch::Focus { address } => {
            args.push("focuswindow".into());
            args.push(format!("address:{}", address));
        }
        Dispatch::WrapGroup { direction } => {
            args.push("hy3:makegroup".into());
            args.push(
                match direction {
                    GroupDirection::Vertical => "v",
                    GroupDirection::Horizontal => "h",
                    GroupDirection::Tab => "tab",
                }
                .into(),
            );
        }
        Dispatch::InsertWindow {
            address,
            workspace,
            silent,
        } => {
            args.push(if *silent { "movetoworkspacesilent" } else { "movetoworkspace" }.into());
            args.push(format!("{},address:{}", workspace, address));
        }
        Dispatch::Resize { address, w, h } => {
            args.push("resizewindowpixel".into());
            args.push(format!("exact {} {},address:{}", w, h, address));
        }
        Dispatch::SwitchWorkspace { id } => {
            args.push("workspace".into());
            args.push(id.to_string());
        }
        Dispatch::FocusMonitor { name } => {
            args.push("focusmonitor".into());
            args.push(name.clone());
        }
    }
    args
}


#[cfg(test)]
mod tests {
    use super::*;

    const MONITORS: &str = r#"[
        {"id": 0, "name": "DP-1", "focused": false, "activeWorkspace": {"id": 1, "name": "1"}, "dpmsStatus": true},
        {"id": 1, "name": "HDMI-A-1", "focused": true, "activeWorkspace": {"id": 5, "name": "5"}, "dpmsStatus": true}
    ]"#;

    const CLIENTS: &str = r#"[
        {"address": "0x55d1", "class": "kitty", "title": "~", "at": [10, 40], "size": [940, 1030],
         "workspace": {"id": 1, "name": "1"}, "floating": false, "monitor": 0, "pid": 1234},
        {"address": "0x55d2", "class": "firefox", "title": "Mozilla", "at": [2000, 40], "size": [1800, 1030],
         "workspace": {"id": 5, "name": "5"}, "floating": true, "monitor": 1}
    ]"#;

    #[test]
    fn parses_monitors() {
        let monitors = parse_monitors(MONITORS).unwrap();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[1].name, "HDMI-A-1");
        assert!(monitors[1].focused);
        assert_eq!(monitors[1].active_workspace, 5);
    }

    #[test]
    fn parses_clients_with_monitor_names() {
        let monitors = parse_monitors(MONITORS).unwrap();
        let clients = parse_clients(CLIENTS, &monitors).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].address, "0x55d1");
        assert_eq!(clients[0].monitor, "DP-1");
        assert_eq!(clients[0].at, [10, 40]);
        assert!(!clients[0].floating);
        assert_eq!(clients[1].monitor, "HDMI-A-1");
        assert!(clients[1].floating);
    }

    #[test]
    fn malformed_json_is_query_error() {
        let err = parse_monitors("not json").unwrap_err();
        assert!(matches!(err, Error::Query { .. }));
    }

    #[test]
    fn dispatch_encodings() {
        let cases = [
            (
                Dispatch::Focus { address: "0xa".into() },
                "dispatch focuswindow address:0xa",
            ),
            (
                Dispatch::WrapGroup { direction: GroupDirection::Vertical },
                "dispatch hy3:makegroup v",
            ),
            (
                Dispatch::WrapGroup { direction: GroupDirection::Tab },
                "dispatch hy3:makegroup tab",
            ),
            (
                Dispatch::InsertWindow { address: "0xa".into(), workspace: 99, silent: true },
                "dispatch movetoworkspacesilent 99,address:0xa",
            ),
            (
                Dispatch::InsertWindow { address: "0xa".into(), workspace: 2, silent: false },
                "dispatch movetoworkspace 2,address:0xa",
            ),
            (
                Dispatch::Resize { address: "0xa".into(), w: 800, h: 600 },
                "dispatch resizewindowpixel exact 800 600,address:0xa",
            ),
            (Dispatch::SwitchWorkspace { id: 3 }, "dispatch workspace 3"),
            (
                Dispatch::FocusMonitor { name: "DP-1".into() },
                "dispatch focusmonitor DP-1",
            ),
        ];
        for (cmd, expected) in cases {
            assert_eq!(dispatch_args(&cmd).join(" "), expected);
        }
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let client = Hyprctl::new("/nonexistent/hyprctl-binary");
        let err = client.monitors().unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
