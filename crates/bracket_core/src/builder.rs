//! Building a bracket tree from a flat list of standings

use tracing::{debug, warn};

use crate::node::{BracketNode, FieldSize};
use crate::participant::{Participant, Round};

/// Build the bracket tree for `field` from persisted standings.
///
/// Participants are placed by `seed`; unseeded participants are left out and
/// slots nobody claims become empty leaves. A match is decided when exactly
/// one of the two participants reaching it has a `furthest_round` of at
/// least the match's round. When both qualify the data contradicts itself
/// and the match is left undecided.
///
/// Input is not validated here, see [`crate::validate_standings`].
pub fn build(participants: &[Participant], field: FieldSize) -> BracketNode {
    let mut seeded: Vec<(u32, &Participant)> = Vec::with_capacity(participants.len());
    for participant in participants {
        match participant.seed {
            Some(seed) if seed < field.get() => seeded.push((seed, participant)),
            Some(seed) => warn!(
                participant = %participant.id,
                seed,
                field = field.get(),
                "seed outside the field, participant left out of the bracket"
            ),
            None => {}
        }
    }
    // Stable: duplicates keep their input order
    seeded.sort_by_key(|(seed, _)| *seed);

    debug!(
        seeded = seeded.len(),
        field = field.get(),
        "building bracket"
    );
    build_range(field.rounds(), 0, field.get() - 1, &seeded)
}

fn build_range(
    round: Round,
    lower_bound: u32,
    upper_bound: u32,
    partition: &[(u32, &Participant)],
) -> BracketNode {
    if round == 0 || lower_bound >= upper_bound {
        if partition.len() > 1 {
            warn!(
                seed = lower_bound,
                claimants = partition.len(),
                "several participants claim one slot, keeping the last"
            );
        }
        return match partition.last() {
            Some((_, participant)) => BracketNode::leaf((*participant).clone()),
            None => BracketNode::empty_leaf(),
        };
    }

    let split = lower_bound + (upper_bound - lower_bound) / 2;
    let at = partition.partition_point(|(seed, _)| *seed <= split);

    let upper = build_range(round - 1, lower_bound, split, &partition[..at]);
    let lower = build_range(round - 1, split + 1, upper_bound, &partition[at..]);
    let decided = recorded_winner(round, lower_bound, upper_bound, &upper, &lower);

    BracketNode::new_match(decided, upper, lower)
}

fn recorded_winner(
    round: Round,
    lower_bound: u32,
    upper_bound: u32,
    upper: &BracketNode,
    lower: &BracketNode,
) -> Option<Participant> {
    let reached = |node: &BracketNode| {
        node.winner()
            .filter(|p| p.furthest_round.is_some_and(|r| r >= round))
            .cloned()
    };

    match (reached(upper), reached(lower)) {
        (Some(winner), None) | (None, Some(winner)) => Some(winner),
        (None, None) => None,
        (Some(a), Some(b)) => {
            warn!(
                round,
                first_seed = lower_bound,
                last_seed = upper_bound,
                upper = %a.id,
                lower = %b.id,
                "both sides of a match claim the win, leaving it undecided"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod builder_tests;
