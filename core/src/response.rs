//! Response — the result of executing one `Command`.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    /// The command ran but found nothing to do (e.g. fewer than two tiled
    /// windows on the workspace).
    Noop { output: String },
    Error { message: String },
}


impl Response {
    pub fn ok(output: impl Into<String>) -> Self {
        Response::Ok { output: output.into() }
    }

    pub fn noop(output: impl Into<String>) -> Self {
        Response::Noop { output: output.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error { message: message.into() }
    }

    /// Process exit code for the CLI: success, error, nothing-to-do.
    pub fn exit_code(&self) -> i32 {
        match self {
            Response::Ok { .. } => 0,
            Response::Error { .. } => 1,
            Response::Noop { .. } => 3,
        }
    }
}
