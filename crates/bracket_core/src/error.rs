//! Error types of the bracket core

use thiserror::Error;

use crate::node::{BranchPath, BranchPosition};
use crate::participant::ParticipantId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field size {0} is not a power of two of at least 2")]
pub struct FieldSizeError(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character '{0}' in branch path (use U, L or 'root')")]
pub struct PathParseError(pub char);

/// A change could not be merged into the tree. The tree is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    #[error("cannot replace the {position:?} branch of a leaf")]
    NoBranches { position: BranchPosition },

    #[error("path {0} leads outside the bracket")]
    PathOutsideTree(BranchPath),
}

/// An edit was refused. Nothing in the bracket changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node at {0}")]
    NoSuchNode(BranchPath),

    #[error("node {0} is locked by a decided match")]
    Locked(BranchPath),

    #[error("participant {0} is not part of this field")]
    UnknownParticipant(ParticipantId),

    #[error("participant {participant} is not a candidate at {path}")]
    NotACandidate {
        path: BranchPath,
        participant: ParticipantId,
    },

    #[error("participant {participant} already occupies slot {seed}")]
    AlreadySeeded { participant: ParticipantId, seed: u32 },

    #[error(transparent)]
    Propagation(#[from] PropagationError),
}

/// Every violation found while checking standings, collected before failing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {}", .errors.join("; "))]
pub struct ValidationError {
    pub message: String,
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(message: &str, errors: Vec<String>) -> Self {
        Self {
            message: message.to_string(),
            errors,
        }
    }

    /// `Ok` when nothing was collected
    pub fn check(message: &str, errors: Vec<String>) -> Result<(), ValidationError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::new(message, errors))
        }
    }
}
