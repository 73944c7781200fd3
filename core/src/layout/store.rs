//! Layout store — the saved layout document on disk.
//!
//! Reads never fail: a missing or malformed document is reported as "no
//! saved layout", which every caller handles by falling back to the
//! heuristic arrangement.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::layout::SavedLayout;


#[derive(Debug, Clone)]
pub struct LayoutStore {
    path: PathBuf,
}


impl LayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LayoutStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved layout, or `None` if there is no usable document.
    pub fn load(&self) -> Option<SavedLayout> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no saved layout");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed saved layout");
                None
            }
        }
    }

    /// Replace the stored document.
    pub fn save(&self, layout: &SavedLayout) -> Result<()> {
        let json = serde_json::to_string_pretty(layout)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::StoreWrite {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, json + "\n").map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })
    }
}
