//! Restore planning — choose rows for a workspace and plan the rebuild.
//!
//! Row selection, in order of precedence:
//!
//! 1. an explicit top-row count splits the live windows heuristically;
//! 2. a usable saved workspace (two or more windows) is matched against
//!    the live windows;
//! 3. otherwise the live windows are split heuristically.
//!
//! Nothing here talks to the window manager; the caller executes the plan.

use serde::Serialize;
use tracing::{debug, info};

use crate::layout::matcher::{self, match_slots};
use crate::layout::planner::{self, plan_rebuild, Plan};
use crate::layout::rows::reading_order;
use crate::layout::snapshot::saved_rows;
use crate::types::config::Settings;
use crate::types::layout::{MatchedSlot, SavedWorkspace};
use crate::types::window::{tiled_on, WindowRecord, WorkspaceId};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSource {
    Saved,
    Heuristic,
    Forced,
}


#[derive(Debug, Clone, Copy)]
pub struct RestoreOptions {
    pub top: Option<usize>,
    pub y_threshold: i32,
    pub scratch: WorkspaceId,
}


impl RestoreOptions {
    pub fn from_settings(settings: &Settings, top: Option<usize>) -> Self {
        RestoreOptions {
            top,
            y_threshold: settings.y_threshold,
            scratch: settings.scratch_workspace,
        }
    }
}


#[derive(Debug, Clone)]
pub enum Outcome {
    Rebuilt {
        workspace: WorkspaceId,
        source: RowSource,
        rows: Vec<Vec<MatchedSlot>>,
        plan: Plan,
    },
    NothingToDo {
        workspace: WorkspaceId,
        windows: usize,
    },
}


impl Outcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Outcome::Rebuilt { plan, .. } => Some(plan),
            Outcome::NothingToDo { .. } => None,
        }
    }

    /// One line for the user.
    pub fn summary(&self) -> String {
        match self {
            Outcome::NothingToDo { workspace, windows } => format!(
                "Only {} window(s) on workspace {}, nothing to rearrange.",
                windows, workspace
            ),
            Outcome::Rebuilt { workspace, source, rows, .. } => {
                let n = matcher::window_count(rows);
                let shape = match rows.as_slice() {
                    [single] => format!("in a single row of {}", single.len()),
                    [top, bottom] => format!("{} top, {} bottom", top.len(), bottom.len()),
                    _ => format!(
                        "in {} rows ({})",
                        rows.len(),
                        rows.iter().map(|r| r.len().to_string()).collect::<Vec<_>>().join("/")
                    ),
                };
                let from = match source {
                    RowSource::Saved => "saved layout",
                    RowSource::Heuristic => "default split",
                    RowSource::Forced => "forced split",
                };
                format!("Workspace {}: arranged {} windows {} ({})", workspace, n, shape, from)
            }
        }
    }
}


/// Plan the rebuild of one workspace from the current live windows.
pub fn plan_workspace(
    live: &[WindowRecord],
    workspace: WorkspaceId,
    saved: Option<&SavedWorkspace>,
    opts: &RestoreOptions,
) -> Outcome {
    let pool = tiled_on(live, workspace);
    if pool.len() < 2 {
        debug!(workspace, windows = pool.len(), "too few tiled windows");
        return Outcome::NothingToDo {
            workspace,
            windows: pool.len(),
        };
    }

    let usable = saved.filter(|s| s.windows.len() >= 2);
    let (source, rows) = match (opts.top, usable) {
        (Some(top), _) => (RowSource::Forced, split_live(&pool, Some(top))),
        (None, Some(saved)) => {
            let ordered = reading_order(pool, opts.y_threshold);
            let slots = saved_rows(saved, opts.y_threshold);
            (RowSource::Saved, match_slots(&slots, &ordered))
        }
        (None, None) => (RowSource::Heuristic, split_live(&pool, None)),
    };

    let (plan, _) = plan_rebuild(workspace, opts.scratch, &rows);
    let outcome = Outcome::Rebuilt {
        workspace,
        source,
        rows,
        plan,
    };
    info!("{}", outcome.summary());
    outcome
}


fn split_live(pool: &[WindowRecord], top: Option<usize>) -> Vec<Vec<MatchedSlot>> {
    let addresses: Vec<String> = pool.iter().map(|w| w.address.clone()).collect();
    planner::split_rows(&addresses, top)
}
