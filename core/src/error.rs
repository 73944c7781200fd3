use std::io;
use std::path::PathBuf;


pub type Result<T> = std::result::Result<T, Error>;


#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to run hyprctl {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("hyprctl {command} returned unparseable output: {source}")]
    Query {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write layout to {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode layout: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no saved layout at {}", .0.display())]
    NoSavedLayout(PathBuf),

    #[error("workspace {id} cannot be restored: {reason}")]
    InvalidWorkspace { id: i32, reason: &'static str },
}
