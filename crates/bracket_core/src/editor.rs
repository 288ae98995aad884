//! The editing surface over one bracket.
//!
//! Each node offers a restricted set of candidates: any entrant for a seed
//! slot, the two sub-match winners for a match. Picking one records it on the
//! node and propagates the change to the root. A decided match locks its
//! subtree until it is reset.

use tracing::{debug, info};

use crate::bracket::Bracket;
use crate::coordinator::propagate;
use crate::error::EditError;
use crate::node::{BracketNode, BranchPath, FieldSize};
use crate::participant::{Participant, ParticipantId};

/// Owns the bracket of a single edit session
#[derive(Debug, Clone)]
pub struct BracketEditor {
    bracket: Bracket,
    entrants: Vec<Participant>,
}

impl BracketEditor {
    /// `entrants` is the whole field, whether seeded or not
    pub fn new(bracket: Bracket, entrants: &[Participant]) -> Self {
        Self {
            bracket,
            entrants: entrants.iter().map(Participant::unplaced).collect(),
        }
    }

    /// Build the bracket from standings and edit it
    pub fn from_standings(participants: &[Participant], field: FieldSize) -> Self {
        Self::new(Bracket::build(participants, field), participants)
    }

    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub fn entrants(&self) -> &[Participant] {
        &self.entrants
    }

    pub fn node(&self, path: &BranchPath) -> Option<&BracketNode> {
        self.bracket.root().node_at(path)
    }

    pub fn flatten(&self) -> Vec<Participant> {
        self.bracket.flatten()
    }

    /// Whether some match above `path` is already decided
    pub fn has_locked_ancestor(&self, path: &BranchPath) -> bool {
        let mut node = self.bracket.root();
        for &position in path.positions() {
            if node.is_locked() {
                return true;
            }
            match node.branch(position) {
                Some(next) => node = next,
                None => return false,
            }
        }
        false
    }

    /// A node can be edited unless it, or a match above it, is decided
    pub fn is_editable(&self, path: &BranchPath) -> bool {
        match self.node(path) {
            Some(node) => !node.is_locked() && !self.has_locked_ancestor(path),
            None => false,
        }
    }

    /// Who may be picked at `path`.
    ///
    /// A seed slot offers every entrant not seated in another slot. A match
    /// only offers its two sub-match winners, and only once both are known.
    /// Nodes that cannot be edited offer nobody.
    pub fn candidates(&self, path: &BranchPath) -> Vec<&Participant> {
        if !self.is_editable(path) {
            return Vec::new();
        }
        let Some(node) = self.node(path) else {
            return Vec::new();
        };
        match node.branches() {
            None => {
                let here = path.slot_index();
                self.entrants
                    .iter()
                    .filter(|entrant| self.slot_of(entrant.id).map_or(true, |seed| seed == here))
                    .collect()
            }
            Some((upper, lower)) => match (upper.winner(), lower.winner()) {
                (Some(a), Some(b)) => vec![a, b],
                _ => Vec::new(),
            },
        }
    }

    /// Record `participant` at `path` and propagate to the root.
    ///
    /// On a seed slot this places the participant; on a match it records the
    /// winner, which locks everything below. Returns the new root.
    pub fn select(
        &mut self,
        path: &BranchPath,
        participant: ParticipantId,
    ) -> Result<&BracketNode, EditError> {
        let node = self
            .node(path)
            .ok_or_else(|| EditError::NoSuchNode(path.clone()))?;
        if !self.is_editable(path) {
            return Err(EditError::Locked(path.clone()));
        }

        let chosen = if node.is_leaf() {
            let entrant = self
                .entrants
                .iter()
                .find(|p| p.id == participant)
                .ok_or(EditError::UnknownParticipant(participant))?;
            if let Some(seed) = self.slot_of(participant) {
                if seed != path.slot_index() {
                    return Err(EditError::AlreadySeeded { participant, seed });
                }
            }
            entrant.clone()
        } else {
            self.candidates(path)
                .into_iter()
                .find(|p| p.id == participant)
                .cloned()
                .ok_or_else(|| EditError::NotACandidate {
                    path: path.clone(),
                    participant,
                })?
        };

        let name = chosen.name.clone();
        let updated = node.with_winner(chosen);
        self.commit(path, updated)?;
        info!(%path, participant = %participant, %name, "recorded selection");
        Ok(self.bracket.root())
    }

    /// Empty a seed slot. The match above it must still be open.
    pub fn vacate(&mut self, path: &BranchPath) -> Result<&BracketNode, EditError> {
        let node = self
            .node(path)
            .ok_or_else(|| EditError::NoSuchNode(path.clone()))?;
        if !node.is_leaf() || self.has_locked_ancestor(path) {
            return Err(EditError::Locked(path.clone()));
        }
        self.commit(path, BracketNode::empty_leaf())?;
        debug!(%path, "vacated slot");
        Ok(self.bracket.root())
    }

    /// Clear every decision in the subtree at `path`, unlocking it.
    ///
    /// Seeding is kept. Refused while a match above is decided, since that
    /// result depends on this subtree.
    pub fn reset(&mut self, path: &BranchPath) -> Result<&BracketNode, EditError> {
        let node = self
            .node(path)
            .ok_or_else(|| EditError::NoSuchNode(path.clone()))?;
        if self.has_locked_ancestor(path) {
            return Err(EditError::Locked(path.clone()));
        }
        let cleared = node.cleared();
        self.commit(path, cleared)?;
        info!(%path, "reset subtree");
        Ok(self.bracket.root())
    }

    fn slot_of(&self, participant: ParticipantId) -> Option<u32> {
        self.bracket
            .root()
            .slots()
            .iter()
            .position(|slot| slot.is_some_and(|p| p.id == participant))
            .map(|index| index as u32)
    }

    /// Swap the new root in only after the whole chain merged
    fn commit(&mut self, path: &BranchPath, updated: BracketNode) -> Result<(), EditError> {
        let root = propagate(self.bracket.root(), path, updated)?;
        self.bracket.set_root(root);
        Ok(())
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;
