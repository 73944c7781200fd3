use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::window::WorkspaceId;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the saved layout document lives.
    #[serde(default = "default_layout_path")]
    pub layout_path: PathBuf,
    /// Windows whose Y coordinates differ by less than this share a row.
    #[serde(default = "default_y_threshold")]
    pub y_threshold: i32,
    /// Pause after every dispatch so hy3 can apply the mutation. Default: 150.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Extra pause after arriving on a workspace and before resizing. Default: 200.
    #[serde(default = "default_arrive_delay_ms")]
    pub arrive_delay_ms: u64,
    /// Workspace used to detach windows before a rebuild. Default: 99.
    #[serde(default = "default_scratch_workspace")]
    pub scratch_workspace: WorkspaceId,
    /// Send a desktop notification after a save or restore. Default: true.
    #[serde(default = "default_notify")]
    pub notify: bool,
    /// Window class -> command recorded as the window's launch command.
    #[serde(default)]
    pub launch_commands: BTreeMap<String, String>,
}

fn default_layout_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("hypr")
        .join("saved_layout.json")
}

fn default_y_threshold() -> i32 {
    100
}

fn default_settle_delay_ms() -> u64 {
    150
}

fn default_arrive_delay_ms() -> u64 {
    200
}

fn default_scratch_workspace() -> WorkspaceId {
    99
}

fn default_notify() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            layout_path: default_layout_path(),
            y_threshold: default_y_threshold(),
            settle_delay_ms: default_settle_delay_ms(),
            arrive_delay_ms: default_arrive_delay_ms(),
            scratch_workspace: default_scratch_workspace(),
            notify: default_notify(),
            launch_commands: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Default config location: `$XDG_CONFIG_HOME/relayout/config.yaml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("relayout")
            .join("config.yaml")
    }

    /// Load settings from a YAML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Settings> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn arrive_delay(&self) -> Duration {
        Duration::from_millis(self.arrive_delay_ms)
    }

    pub fn launch_command(&self, class: &str) -> Option<String> {
        self.launch_commands.get(class).cloned()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.y_threshold, 100);
        assert_eq!(settings.scratch_workspace, 99);
        assert_eq!(settings.settle_delay(), Duration::from_millis(150));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "settle_delay_ms: 0\nlaunch_commands:\n  kitty: kitty --single-instance\n",
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.settle_delay_ms, 0);
        assert_eq!(settings.arrive_delay_ms, 200);
        assert_eq!(
            settings.launch_command("kitty").as_deref(),
            Some("kitty --single-instance")
        );
        assert_eq!(settings.launch_command("firefox"), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "y_threshold: [not, a, number]\n").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
