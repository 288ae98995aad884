//! Errors of the standings service

use bracket_core::{EditError, ValidationError};
use thiserror::Error;

use crate::store::TournamentId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no standings stored for tournament {0}")]
    NotFound(TournamentId),

    #[error("failed to access standings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode standings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Anything that can go wrong in an edit session
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Edit(#[from] EditError),
}
