//! Command — the typed interface for all relayout operations.

use serde::{Deserialize, Serialize};

use crate::types::window::WorkspaceId;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    /// Capture every workspace and write the layout document.
    #[serde(rename = "save")]
    Save {
        #[serde(default)]
        dry_run: bool,
    },

    /// Rebuild one workspace, or all of them.
    #[serde(rename = "restore")]
    Restore {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workspace: Option<WorkspaceId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top: Option<usize>,
        #[serde(default)]
        all: bool,
        #[serde(default)]
        dry_run: bool,
    },

    #[serde(rename = "show")]
    Show,

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}
