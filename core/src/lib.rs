//! relayout core — capture, persist and rebuild hy3 tiling layouts.
//!
//! The save path clusters live windows into rows, collapses tab groups and
//! writes a `SavedLayout`. The restore path matches saved slots against the
//! live window set, plans an ordered command log for hy3's cursor-based
//! tree mutations, and replays it against the window manager.

pub mod command;
pub mod error;
pub mod help;
pub mod layout;
pub mod notify;
pub mod response;
pub mod sys;
pub mod types;
pub mod wm;

pub use error::{Error, Result};
