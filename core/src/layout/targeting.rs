//! Target resolver — decides which workspaces a restore rebuilds.
//!
//! Three forms:
//!
//! - an explicit workspace id (`-w 3`);
//! - nothing, meaning the workspace shown on the focused monitor;
//! - `--all`, meaning every workspace in the saved layout, or every
//!   workspace that currently holds tiled windows when nothing is saved.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::types::layout::SavedLayout;
use crate::types::window::{focused_workspace, Monitor, WindowRecord, WorkspaceId};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Workspace(WorkspaceId),
    Focused,
    All,
}


impl Target {
    /// Build a target from CLI-style options. `all` wins over an id.
    pub fn from_options(workspace: Option<WorkspaceId>, all: bool) -> Target {
        match (all, workspace) {
            (true, _) => Target::All,
            (false, Some(id)) => Target::Workspace(id),
            (false, None) => Target::Focused,
        }
    }
}


/// Resolve a target to the workspaces to rebuild, in ascending id order.
pub fn resolve(
    target: Target,
    monitors: &[Monitor],
    live: &[WindowRecord],
    saved: Option<&SavedLayout>,
    scratch: WorkspaceId,
) -> Result<Vec<WorkspaceId>> {
    match target {
        Target::Workspace(id) => {
            validate(id, scratch)?;
            Ok(vec![id])
        }
        Target::Focused => Ok(vec![focused_workspace(monitors)]),
        Target::All => {
            let ids: BTreeSet<WorkspaceId> = match saved {
                Some(layout) if !layout.workspaces.is_empty() => {
                    layout.workspaces.keys().copied().collect()
                }
                _ => live.iter().filter(|w| !w.floating).map(|w| w.workspace).collect(),
            };
            Ok(ids.into_iter().filter(|id| validate(*id, scratch).is_ok()).collect())
        }
    }
}


/// Reject special workspaces (ids below 1) and the scratch workspace.
pub fn validate(id: WorkspaceId, scratch: WorkspaceId) -> Result<()> {
    if id < 1 {
        return Err(Error::InvalidWorkspace {
            id,
            reason: "special workspaces are not tiled",
        });
    }
    if id == scratch {
        return Err(Error::InvalidWorkspace {
            id,
            reason: "it is the scratch workspace",
        });
    }
    Ok(())
}
