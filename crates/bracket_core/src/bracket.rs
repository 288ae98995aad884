//! A whole bracket: a root node paired with its field size

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::builder::build;
use crate::flatten::flatten;
use crate::node::{BracketNode, FieldSize, MatchKey};
use crate::participant::{Participant, ParticipantId, Round};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    field: FieldSize,
    root: BracketNode,
}

impl Bracket {
    /// Build from persisted standings, see [`build`]
    pub fn build(participants: &[Participant], field: FieldSize) -> Self {
        Self {
            field,
            root: build(participants, field),
        }
    }

    /// Wrap an existing tree. Its shape is not checked, see
    /// [`crate::validate_tree`].
    pub fn from_root(root: BracketNode, field: FieldSize) -> Self {
        Self { field, root }
    }

    pub fn field(&self) -> FieldSize {
        self.field
    }

    pub fn root(&self) -> &BracketNode {
        &self.root
    }

    /// Round number of the final
    pub fn root_round(&self) -> Round {
        self.field.rounds()
    }

    pub(crate) fn set_root(&mut self, root: BracketNode) {
        self.root = root;
    }

    /// The overall winner, once the final is decided
    pub fn champion(&self) -> Option<&Participant> {
        self.root.decided()
    }

    pub fn flatten(&self) -> Vec<Participant> {
        flatten(&self.root)
    }

    /// Every decided match keyed by its identity
    pub fn decisions(&self) -> BTreeMap<MatchKey, ParticipantId> {
        let mut out = BTreeMap::new();
        collect_decisions(
            &self.root,
            self.root_round(),
            0,
            self.field.get() - 1,
            &mut out,
        );
        out
    }
}

fn collect_decisions(
    node: &BracketNode,
    round: Round,
    first_seed: u32,
    last_seed: u32,
    out: &mut BTreeMap<MatchKey, ParticipantId>,
) {
    let BracketNode::Match {
        decided,
        upper,
        lower,
    } = node
    else {
        return;
    };
    if let Some(winner) = decided {
        let key = MatchKey {
            round,
            first_seed,
            last_seed,
        };
        out.insert(key, winner.id);
    }
    let split = first_seed + (last_seed - first_seed) / 2;
    let below = round.saturating_sub(1);
    collect_decisions(upper, below, first_seed, split, out);
    collect_decisions(lower, below, split + 1, last_seed, out);
}
