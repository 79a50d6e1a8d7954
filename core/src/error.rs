use crate::types::{GroupId, WarningId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarnError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Warning group {id} is not registered")]
    GroupNotFound { id: GroupId },

    #[error("Warning {id} is not a member of this group")]
    WarningNotFound { id: WarningId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type WarnResult<T> = Result<T, WarnError>;
