//! Error types for painel operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PainelError>;

#[derive(Error, Debug)]
pub enum PainelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed loading '{resource}': {reason}")]
    Transport { resource: String, reason: String },

    #[error("Snapshot not found: {name}")]
    SnapshotNotFound { name: String },

    #[error("Invalid label: {message}")]
    InvalidLabel { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl PainelError {
    pub fn transport(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    pub fn snapshot_not_found(name: impl Into<String>) -> Self {
        Self::SnapshotNotFound { name: name.into() }
    }

    pub fn invalid_label(msg: impl Into<String>) -> Self {
        Self::InvalidLabel {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
