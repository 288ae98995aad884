//! One edit session over a tournament's standings.
//!
//! Opening a session fetches the stored standings, checks them and builds
//! the bracket. Edits go through the bracket editor. Saving flattens the
//! bracket again, checks the result and hands it back to the store.

use bracket_core::{
    build, check_compatibility, validate_standings, validate_tree, BracketEditor, BranchPath,
    FieldSize, Participant, ParticipantId,
};
use tracing::{info, warn};

use crate::error::TournamentError;
use crate::store::{StandingsStore, TournamentId};

pub struct StandingsSession<S: StandingsStore> {
    store: S,
    tournament: TournamentId,
    editor: BracketEditor,
}

impl<S: StandingsStore> StandingsSession<S> {
    pub fn open(store: S, tournament: TournamentId, field: FieldSize) -> Result<Self, TournamentError> {
        let participants = store.tournament_participants(tournament)?;
        validate_standings(&participants, field)?;

        let editor = BracketEditor::from_standings(&participants, field);
        info!(
            %tournament,
            participants = participants.len(),
            field = field.get(),
            "opened standings"
        );
        Ok(Self {
            store,
            tournament,
            editor,
        })
    }

    pub fn tournament(&self) -> TournamentId {
        self.tournament
    }

    pub fn editor(&self) -> &BracketEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut BracketEditor {
        &mut self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Record a pick at `path`, see [`BracketEditor::select`]
    pub fn select(&mut self, path: &BranchPath, participant: ParticipantId) -> Result<(), TournamentError> {
        self.editor.select(path, participant)?;
        Ok(())
    }

    /// The standings the bracket currently describes.
    ///
    /// Entrants without a slot are listed too, unseeded, so that saving
    /// never drops anyone from the tournament.
    pub fn standings(&self) -> Vec<Participant> {
        let mut standings = self.editor.flatten();
        let unplaced: Vec<Participant> = self
            .editor
            .entrants()
            .iter()
            .filter(|entrant| !standings.iter().any(|p| p.id == entrant.id))
            .cloned()
            .collect();
        standings.extend(unplaced);
        standings
    }

    /// Save the standings. Refused if it would change a match that is
    /// already settled in the stored standings.
    pub fn save(&mut self) -> Result<Vec<Participant>, TournamentError> {
        let field = self.editor.bracket().field();
        let stored = self.store.tournament_participants(self.tournament)?;
        let current = build(&stored, field);
        check_compatibility(&current, self.editor.bracket().root())?;
        self.persist()
    }

    /// Save the standings even if settled matches were reset
    pub fn overwrite(&mut self) -> Result<Vec<Participant>, TournamentError> {
        warn!(tournament = %self.tournament, "overwriting settled standings");
        self.persist()
    }

    fn persist(&mut self) -> Result<Vec<Participant>, TournamentError> {
        let field = self.editor.bracket().field();
        validate_tree(self.editor.bracket().root(), field)?;
        let standings = self.standings();
        validate_standings(&standings, field)?;
        self.store
            .save_tournament_standings(self.tournament, &standings)?;
        info!(
            tournament = %self.tournament,
            participants = standings.len(),
            decided = self.editor.bracket().decisions().len(),
            "saved standings"
        );
        Ok(standings)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
