//! Window-manager seam.
//!
//! Everything the engine needs from the window manager goes through the
//! [`WmClient`] trait: two queries and one-way [`Dispatch`] commands. The
//! `hyprctl` module is the live backend; `fake` simulates hy3's tree for
//! tests and is only built with the `fake-wm` feature.

#[cfg(any(test, feature = "fake-wm"))]
pub mod fake;
pub mod hyprctl;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::window::{Monitor, WindowRecord, WorkspaceId};


/// Orientation of a new hy3 group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDirection {
    /// Children stacked top to bottom.
    Vertical,
    /// Children side by side.
    Horizontal,
    Tab,
}


/// The closed set of tree-mutation primitives the window manager offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Dispatch {
    /// Move the WM's cursor to a window.
    Focus { address: String },
    /// Wrap the node under the cursor in a new group.
    WrapGroup { direction: GroupDirection },
    /// Move a window to a workspace. When the cursor sits inside a group on
    /// that workspace the window becomes the cursor's next sibling.
    InsertWindow {
        address: String,
        workspace: WorkspaceId,
        silent: bool,
    },
    Resize { address: String, w: i32, h: i32 },
    SwitchWorkspace { id: WorkspaceId },
    FocusMonitor { name: String },
}


impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Focus { address } => write!(f, "focus {}", address),
            Dispatch::WrapGroup { direction } => write!(f, "wrap {:?}", direction),
            Dispatch::InsertWindow { address, workspace, silent: true } => {
                write!(f, "insert {} -> {} (silent)", address, workspace)
            }
            Dispatch::InsertWindow { address, workspace, silent: false } => {
                write!(f, "insert {} -> {}", address, workspace)
            }
            Dispatch::Resize { address, w, h } => write!(f, "resize {} {}x{}", address, w, h),
            Dispatch::SwitchWorkspace { id } => write!(f, "workspace {}", id),
            Dispatch::FocusMonitor { name } => write!(f, "focus monitor {}", name),
        }
    }
}


/// Request/response access to the window manager.
pub trait WmClient {
    fn monitors(&self) -> Result<Vec<Monitor>>;

    /// Every mapped window, across all workspaces.
    fn clients(&self) -> Result<Vec<WindowRecord>>;

    /// Fire a command. Success only means the command was delivered; the
    /// window manager applies it asynchronously.
    fn dispatch(&mut self, cmd: &Dispatch) -> Result<()>;
}
