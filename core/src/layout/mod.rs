//! Layout engine — capture, persistence, matching, and rebuild planning.
//!
//! The save path runs `rows` and `tabs` through `snapshot` and `capture`
//! into the `store`. The restore path reads the `store`, re-associates live
//! windows with saved slots in `matcher`, picks the rows in `restore`, turns
//! them into a command log in `planner`, and replays it with an `executor`.
//! `targeting` decides which workspaces a restore touches.

pub mod capture;
pub mod executor;
pub mod matcher;
pub mod planner;
pub mod restore;
pub mod rows;
pub mod snapshot;
pub mod store;
pub mod tabs;
pub mod targeting;
