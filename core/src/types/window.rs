//! Live window-manager state as returned by queries.

use serde::{Deserialize, Serialize};


/// Workspace identifier as used by the window manager.
pub type WorkspaceId = i32;


/// One window as reported by the window manager. Produced fresh on every
/// query and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub address: String,
    pub class: String,
    #[serde(default)]
    pub title: String,
    pub at: [i32; 2],
    pub size: [i32; 2],
    pub workspace: WorkspaceId,
    #[serde(default)]
    pub monitor: String,
    #[serde(default)]
    pub floating: bool,
}


impl WindowRecord {
    /// Whether this window takes part in the tiling tree of `workspace`.
    pub fn is_tiled_on(&self, workspace: WorkspaceId) -> bool {
        self.workspace == workspace && !self.floating
    }
}


/// One output as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    pub focused: bool,
    pub active_workspace: WorkspaceId,
}


/// Tiled windows on `workspace`, in query order.
pub fn tiled_on(windows: &[WindowRecord], workspace: WorkspaceId) -> Vec<WindowRecord> {
    windows
        .iter()
        .filter(|w| w.is_tiled_on(workspace))
        .cloned()
        .collect()
}


/// The workspace shown on the focused monitor, or workspace 1 if no
/// monitor reports focus.
pub fn focused_workspace(monitors: &[Monitor]) -> WorkspaceId {
    monitors
        .iter()
        .find(|m| m.focused)
        .map(|m| m.active_workspace)
        .unwrap_or(1)
}
