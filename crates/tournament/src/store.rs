//! Where standings come from and go to

use bracket_core::Participant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub i64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fetches and persists the flat standings of a tournament
pub trait StandingsStore {
    /// Every participant of the tournament with its last saved seed and round
    fn tournament_participants(&self, id: TournamentId) -> Result<Vec<Participant>, StoreError>;

    /// Replace the stored standings of the tournament
    fn save_tournament_standings(
        &mut self,
        id: TournamentId,
        participants: &[Participant],
    ) -> Result<(), StoreError>;
}

/// Keeps standings in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tournaments: HashMap<TournamentId, Vec<Participant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tournament(mut self, id: TournamentId, participants: Vec<Participant>) -> Self {
        self.tournaments.insert(id, participants);
        self
    }
}

impl StandingsStore for MemoryStore {
    fn tournament_participants(&self, id: TournamentId) -> Result<Vec<Participant>, StoreError> {
        self.tournaments
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn save_tournament_standings(
        &mut self,
        id: TournamentId,
        participants: &[Participant],
    ) -> Result<(), StoreError> {
        self.tournaments.insert(id, participants.to_vec());
        Ok(())
    }
}

/// On-disk layout of one tournament's standings
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StandingsFile {
    tournament: TournamentId,
    participants: Vec<Participant>,
}

/// One pretty-printed JSON file per tournament in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("tournament_{}.json", id))
    }
}

impl StandingsStore for JsonFileStore {
    fn tournament_participants(&self, id: TournamentId) -> Result<Vec<Participant>, StoreError> {
        let path = self.path_for(id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };
        let file: StandingsFile = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), participants = file.participants.len(), "loaded standings");
        Ok(file.participants)
    }

    fn save_tournament_standings(
        &mut self,
        id: TournamentId,
        participants: &[Participant],
    ) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let file = StandingsFile {
            tournament: id,
            participants: participants.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let path = self.path_for(id);
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "saved standings");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
