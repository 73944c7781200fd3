//! Layout capture pipeline — query the WM, build the snapshot, diff.
//!
//! Wires the window-manager queries and the snapshot builder together to
//! produce a `CaptureResult` that says whether the layout has changed since
//! the last saved one.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::layout::snapshot;
use crate::types::config::Settings;
use crate::types::layout::{SavedLayout, SavedWorkspace};
use crate::types::window::{Monitor, WindowRecord, WorkspaceId};
use crate::wm::WmClient;


/// Result of a layout capture.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub layout: SavedLayout,
    pub changed: bool,
}


/// Capture every regular workspace that holds tiled windows.
///
/// Special workspaces (ids below 1) and the scratch workspace are skipped.
pub fn capture_layout(
    client: &dyn WmClient,
    settings: &Settings,
    previous: Option<&SavedLayout>,
) -> Result<CaptureResult> {
    let monitors = client.monitors()?;
    let windows = client.clients()?;
    let layout = build_layout(&monitors, &windows, settings);
    let changed = match previous {
        Some(prev) => snapshot::diff(prev, &layout),
        None => true,
    };
    Ok(CaptureResult { layout, changed })
}


/// Assemble a `SavedLayout` from already-queried state.
pub fn build_layout(monitors: &[Monitor], windows: &[WindowRecord], settings: &Settings) -> SavedLayout {
    let keep = |ws: WorkspaceId| ws >= 1 && ws != settings.scratch_workspace;

    let mut workspaces = BTreeMap::new();
    for w in windows.iter().filter(|w| !w.floating && keep(w.workspace)) {
        if workspaces.contains_key(&w.workspace) {
            continue;
        }
        let saved = snapshot::saved_windows(windows, w.workspace, settings);
        debug!(workspace = w.workspace, windows = saved.len(), "captured workspace");
        workspaces.insert(
            w.workspace,
            SavedWorkspace {
                monitor: w.monitor.clone(),
                windows: saved,
            },
        );
    }

    let active_workspaces = monitors
        .iter()
        .filter(|m| keep(m.active_workspace))
        .map(|m| (m.name.clone(), m.active_workspace))
        .collect();

    SavedLayout {
        workspaces,
        active_workspaces,
    }
}
