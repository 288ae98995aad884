//! Flattening a bracket tree back into standings for persistence

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::node::BracketNode;
use crate::participant::{Participant, ParticipantId, Round};

/// Turn a (possibly partially decided) tree into a flat list of standings.
///
/// Every occupied leaf yields one participant whose `seed` is the leaf's
/// position, counting empty leaves too. `furthest_round` is the highest round
/// of a match the participant is recorded as winning, or `None`.
/// The output is in seed order.
pub fn flatten(root: &BracketNode) -> Vec<Participant> {
    let mut walk = FlattenWalk::default();
    walk.visit(root, root.height());

    let FlattenWalk {
        seeded, furthest, ..
    } = walk;

    for id in furthest.keys() {
        if !seeded.iter().any(|p| p.id == *id) {
            warn!(participant = %id, "match winner without a seed slot, dropped");
        }
    }

    let participants: Vec<Participant> = seeded
        .into_iter()
        .map(|mut participant| {
            participant.furthest_round = furthest.get(&participant.id).copied();
            participant
        })
        .collect();

    debug!(participants = participants.len(), "flattened bracket");
    participants
}

#[derive(Default)]
struct FlattenWalk {
    next_seed: u32,
    seeded: Vec<Participant>,
    furthest: HashMap<ParticipantId, Round>,
}

impl FlattenWalk {
    /// Preorder, upper branch first
    fn visit(&mut self, node: &BracketNode, round: Round) {
        match node {
            BracketNode::Leaf { occupant } => {
                if let Some(participant) = occupant {
                    let mut standing = participant.clone();
                    standing.seed = Some(self.next_seed);
                    self.seeded.push(standing);
                }
                self.next_seed += 1;
            }
            BracketNode::Match {
                decided,
                upper,
                lower,
            } => {
                if let Some(winner) = decided {
                    let best = self.furthest.entry(winner.id).or_insert(round);
                    *best = (*best).max(round);
                }
                self.visit(upper, round.saturating_sub(1));
                self.visit(lower, round.saturating_sub(1));
            }
        }
    }
}

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod flatten_tests;
