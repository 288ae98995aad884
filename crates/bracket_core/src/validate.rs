//! Consistency checks for standings and bracket trees.
//!
//! The builder trusts its input; these checks are what callers run before
//! building from, or saving, a set of standings. Every violation is
//! collected so the caller sees all of them at once.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::ValidationError;
use crate::node::{BracketNode, BranchPath, BranchPosition, FieldSize, MatchKey};
use crate::participant::{Participant, ParticipantId, Round};

/// Check flat standings against the rules of a `field` bracket
pub fn validate_standings(
    participants: &[Participant],
    field: FieldSize,
) -> Result<(), ValidationError> {
    let size = field.get();
    let rounds = field.rounds();
    let mut errors = Vec::new();

    if participants.len() > size as usize {
        errors.push(format!(
            "a bracket of {} slots cannot hold {} participants",
            size,
            participants.len()
        ));
    }

    let mut ids = HashSet::new();
    let mut seeds: HashMap<u32, ParticipantId> = HashMap::new();
    for participant in participants {
        if !ids.insert(participant.id) {
            errors.push(format!(
                "participant {} ({}) appears more than once",
                participant.name, participant.id
            ));
        }
        if let Some(seed) = participant.seed {
            if seed >= size {
                errors.push(format!(
                    "seed {} of {} is outside 0..{}",
                    seed, participant.name, size
                ));
            } else if let Some(other) = seeds.insert(seed, participant.id) {
                errors.push(format!(
                    "seed {} is claimed by both {} and {}",
                    seed, other, participant.id
                ));
            }
        }
        if let Some(round) = participant.furthest_round {
            if round < 1 || round > rounds {
                errors.push(format!(
                    "round {} of {} is outside 1..={}",
                    round, participant.name, rounds
                ));
            }
            if participant.seed.is_none() {
                errors.push(format!(
                    "{} has a recorded win but no seed",
                    participant.name
                ));
            }
        }
    }

    for round in 1..=rounds {
        let reached = participants
            .iter()
            .filter(|p| p.furthest_round.is_some_and(|r| r >= round))
            .count();
        let allowed = field.winners_of_round(round) as usize;
        if reached > allowed {
            errors.push(format!(
                "{} participants won round {}, at most {} can",
                reached, round, allowed
            ));
        }
    }

    errors.extend(match_results(participants, field));

    debug!(
        participants = participants.len(),
        violations = errors.len(),
        "validated standings"
    );
    ValidationError::check("standings are inconsistent", errors)
}

/// Each recorded win must be the only claim on its match and must have
/// had someone to beat
fn match_results(participants: &[Participant], field: FieldSize) -> Vec<String> {
    let mut errors = Vec::new();
    let mut ambiguous: HashSet<MatchKey> = HashSet::new();

    let seed_in = |p: &Participant, first: u32, last: u32| {
        p.seed.is_some_and(|s| (first..=last).contains(&s))
    };

    for participant in participants {
        let (Some(seed), Some(furthest)) = (participant.seed, participant.furthest_round) else {
            continue;
        };
        if seed >= field.get() {
            continue;
        }
        for round in 1..=furthest.min(field.rounds()) {
            let key = match_containing(seed, round);

            let rivals: Vec<&Participant> = participants
                .iter()
                .filter(|q| q.id != participant.id)
                .filter(|q| seed_in(*q, key.first_seed, key.last_seed))
                .filter(|q| q.furthest_round.is_some_and(|r| r >= round))
                .collect();
            if !rivals.is_empty() && ambiguous.insert(key) {
                let mut names = vec![participant.name.as_str()];
                names.extend(rivals.iter().map(|q| q.name.as_str()));
                errors.push(format!(
                    "{} is claimed by {}",
                    key,
                    names.join(" and ")
                ));
            }

            let half = 1u32 << (round - 1);
            let (first, last) = if seed < key.first_seed + half {
                (key.first_seed + half, key.last_seed)
            } else {
                (key.first_seed, key.first_seed + half - 1)
            };
            let had_opponent = participants.iter().any(|q| {
                q.id != participant.id
                    && seed_in(q, first, last)
                    && (round == 1 || q.furthest_round.is_some_and(|r| r + 1 >= round))
            });
            if !had_opponent {
                errors.push(format!(
                    "{} won {} without an opponent",
                    participant.name, key
                ));
            }
        }
    }
    errors
}

/// The match of `round` that the slot `seed` feeds into
fn match_containing(seed: u32, round: Round) -> MatchKey {
    let width = 1u32 << round;
    let first_seed = seed - seed % width;
    MatchKey {
        round,
        first_seed,
        last_seed: first_seed + width - 1,
    }
}

/// Check that a tree has the shape of a `field` bracket and that every
/// decided match was won by one of the two participants who reached it
pub fn validate_tree(root: &BracketNode, field: FieldSize) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    if root.leaf_count() != field.get() as usize {
        errors.push(format!(
            "bracket has {} slots, expected {}",
            root.leaf_count(),
            field.get()
        ));
    }
    check_node(root, &BranchPath::root(), field.rounds(), &mut errors);
    ValidationError::check("bracket tree is inconsistent", errors)
}

fn check_node(node: &BracketNode, path: &BranchPath, round: Round, errors: &mut Vec<String>) {
    match node {
        BracketNode::Leaf { .. } => {
            if round != 0 {
                errors.push(format!("slot at {} sits above the first round", path));
            }
        }
        BracketNode::Match {
            decided,
            upper,
            lower,
        } => {
            if round == 0 {
                errors.push(format!("match at {} sits below the first round", path));
                return;
            }
            if let Some(winner) = decided {
                match (upper.winner(), lower.winner()) {
                    (Some(a), Some(b)) => {
                        if winner.id != a.id && winner.id != b.id {
                            errors.push(format!(
                                "{} won the match at {} but neither reached it ({} vs {})",
                                winner.name, path, a.name, b.name
                            ));
                        }
                    }
                    _ => errors.push(format!(
                        "{} won the match at {} without an opponent",
                        winner.name, path
                    )),
                }
            }
            check_node(upper, &path.child(BranchPosition::Upper), round - 1, errors);
            check_node(lower, &path.child(BranchPosition::Lower), round - 1, errors);
        }
    }
}

/// Check that `proposed` keeps every match already settled in `current`:
/// same winner, and the same two participants having reached it
pub fn check_compatibility(
    current: &BracketNode,
    proposed: &BracketNode,
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    compare(current, proposed, &BranchPath::root(), &mut errors);
    ValidationError::check("new standings rewrite settled matches", errors)
}

fn compare(current: &BracketNode, proposed: &BracketNode, path: &BranchPath, errors: &mut Vec<String>) {
    let (Some((cur_upper, cur_lower)), Some(winner)) = (current.branches(), current.decided()) else {
        if let (Some((cur_upper, cur_lower)), Some((new_upper, new_lower))) =
            (current.branches(), proposed.branches())
        {
            compare(cur_upper, new_upper, &path.child(BranchPosition::Upper), errors);
            compare(cur_lower, new_lower, &path.child(BranchPosition::Lower), errors);
        }
        return;
    };

    let Some((new_upper, new_lower)) = proposed.branches() else {
        errors.push(format!("match at {} is missing", path));
        return;
    };

    let same = |a: Option<&Participant>, b: Option<&Participant>| match (a, b) {
        (Some(a), Some(b)) => a.id == b.id,
        (None, None) => true,
        _ => false,
    };
    if !same(Some(winner), proposed.decided()) {
        errors.push(format!("the winner of the match at {} changed", path));
    }
    if !same(cur_upper.winner(), new_upper.winner()) || !same(cur_lower.winner(), new_lower.winner()) {
        errors.push(format!(
            "the participants of the settled match at {} changed",
            path
        ));
    }

    compare(cur_upper, new_upper, &path.child(BranchPosition::Upper), errors);
    compare(cur_lower, new_lower, &path.child(BranchPosition::Lower), errors);
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
