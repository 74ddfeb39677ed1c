//! Error types for polyshell.

use std::io;

/// Errors produced by the polyshell framework.
#[derive(Debug, thiserror::Error)]
pub enum PolyError {
    #[error("client error: {0}")]
    Client(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PolyError>;
