//! Participants of a bracket and their persisted standing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round number of a match. The final is the highest round.
pub type Round = u32;

/// Stable identity of a participant across saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub i64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant together with its standing in one tournament.
///
/// `seed` is the 0-based slot in the field, `furthest_round` the highest
/// round in which this participant was recorded as the winner of a match.
/// Both are unset until determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub furthest_round: Option<Round>,
}

impl Participant {
    pub fn new(id: i64, name: &str, date_of_birth: NaiveDate) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.to_string(),
            date_of_birth,
            seed: None,
            furthest_round: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_furthest_round(mut self, round: Round) -> Self {
        self.furthest_round = Some(round);
        self
    }

    /// Same participant with the standing cleared
    pub fn unplaced(&self) -> Self {
        Self {
            seed: None,
            furthest_round: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date_of_birth.format("%Y-%m-%d"))
    }
}
