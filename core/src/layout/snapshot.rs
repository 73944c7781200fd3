//! Layout snapshot — turn window geometry into rows of slots.
//!
//! Windows are first grouped into tab groups (identical geometry), each
//! group is collapsed into one slot, and the slots are clustered into rows
//! by Y. The same reconstruction runs on live windows at save time and on
//! the persisted windows at restore time, so both sides agree on what a
//! slot is.

use crate::layout::{rows, tabs};
use crate::types::config::Settings;
use crate::types::layout::{Row, SavedLayout, SavedWindow, SavedWorkspace};
use crate::types::window::{WindowRecord, WorkspaceId};


/// Persistable records for the tiled windows of one workspace, annotated
/// with their launch command and tagged with tab groups.
pub fn saved_windows(
    live: &[WindowRecord],
    workspace: WorkspaceId,
    settings: &Settings,
) -> Vec<SavedWindow> {
    let mut windows: Vec<SavedWindow> = live
        .iter()
        .filter(|w| w.is_tiled_on(workspace))
        .map(|w| SavedWindow::from_record(w, settings.launch_command(&w.class)))
        .collect();
    tabs::detect_tab_groups(&mut windows);
    windows
}


/// Rows of slots for the tiled windows of a live workspace.
pub fn live_rows(live: &[WindowRecord], workspace: WorkspaceId, settings: &Settings) -> Vec<Row> {
    let windows = saved_windows(live, workspace, settings);
    rows::cluster_rows(tabs::collapse_slots(&windows), settings.y_threshold)
}


/// Rows of slots for a persisted workspace. Tab tags are taken from the
/// document as written.
pub fn saved_rows(saved: &SavedWorkspace, y_threshold: i32) -> Vec<Row> {
    rows::cluster_rows(tabs::collapse_slots(&saved.windows), y_threshold)
}


/// Compare two layouts. Returns `true` if they differ.
pub fn diff(a: &SavedLayout, b: &SavedLayout) -> bool {
    a != b
}
