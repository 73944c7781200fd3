//! Saved and restore-time layout structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::window::{WindowRecord, WorkspaceId};


/// Persisted form of one tiled window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWindow {
    pub class: String,
    #[serde(default)]
    pub title: String,
    pub at: [i32; 2],
    pub size: [i32; 2],
    /// Tab group index, only meaningful within the save that wrote it.
    #[serde(rename = "_tab_group", default, skip_serializing_if = "Option::is_none")]
    pub tab_group: Option<usize>,
    /// Command that relaunches this window's application.
    #[serde(rename = "_cmd", default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}


impl SavedWindow {
    pub fn from_record(record: &WindowRecord, cmd: Option<String>) -> Self {
        SavedWindow {
            class: record.class.clone(),
            title: record.title.clone(),
            at: record.at,
            size: record.size,
            tab_group: None,
            cmd,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWorkspace {
    pub monitor: String,
    pub windows: Vec<SavedWindow>,
}


/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLayout {
    #[serde(default)]
    pub workspaces: BTreeMap<WorkspaceId, SavedWorkspace>,
    /// Monitor name -> workspace that was active on it at save time.
    #[serde(default)]
    pub active_workspaces: BTreeMap<String, WorkspaceId>,
}


impl SavedLayout {
    /// The saved workspace, if it holds enough windows to describe a layout.
    pub fn usable_workspace(&self, id: WorkspaceId) -> Option<&SavedWorkspace> {
        self.workspaces.get(&id).filter(|ws| ws.windows.len() >= 2)
    }

    pub fn window_count(&self) -> usize {
        self.workspaces.values().map(|ws| ws.windows.len()).sum()
    }
}


/// Unit of placement: one window, or a tab group collapsed to one pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub classes: Vec<String>,
    pub is_tab: bool,
    pub at: [i32; 2],
    pub size: [i32; 2],
    /// Launch commands of the members that have one, in member order.
    pub commands: Vec<String>,
}


/// Slots sharing roughly the same Y, ordered left to right.
pub type Row = Vec<Slot>;


/// A saved slot re-associated with live windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSlot {
    pub addresses: Vec<String>,
    /// Saved `(w, h)`; `None` for windows that had no saved slot.
    pub size: Option<[i32; 2]>,
    pub is_tab: bool,
}


impl MatchedSlot {
    pub fn window(address: impl Into<String>) -> Self {
        MatchedSlot {
            addresses: vec![address.into()],
            size: None,
            is_tab: false,
        }
    }

    /// The address placed in the spatial tree; tab peers join it later.
    /// Callers must not ask for it on a slot with no addresses.
    pub fn representative(&self) -> &str {
        &self.addresses[0]
    }
}
