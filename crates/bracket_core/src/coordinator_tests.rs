use super::*;
use crate::participant::{Participant, ParticipantId};
use chrono::NaiveDate;

fn horse(id: i64) -> Participant {
    let born = NaiveDate::from_ymd_opt(2016, 9, 30).unwrap();
    Participant::new(id, &format!("H{}", id), born)
}

fn first_round(a: i64, b: i64) -> BracketNode {
    BracketNode::new_match(None, BracketNode::leaf(horse(a)), BracketNode::leaf(horse(b)))
}

fn four_field() -> BracketNode {
    BracketNode::new_match(None, first_round(1, 2), first_round(3, 4))
}

#[test]
fn test_replace_upper_keeps_lower() {
    let node = four_field();
    let (_, lower_before) = node.branches().unwrap();
    let lower_before = lower_before.clone();

    let changed = first_round(1, 2).with_winner(horse(1));
    let merged = replace_branch(&node, BranchPosition::Upper, changed.clone()).unwrap();

    let (upper, lower) = merged.branches().unwrap();
    assert_eq!(upper, &changed);
    assert_eq!(lower, &lower_before);
}

#[test]
fn test_replace_lower_keeps_upper_and_decision() {
    let node = four_field().with_winner(horse(1));
    let changed = first_round(3, 4).with_winner(horse(4));

    let merged = replace_branch(&node, BranchPosition::Lower, changed).unwrap();

    assert_eq!(merged.decided().map(|p| p.id), Some(ParticipantId(1)));
    let (upper, lower) = merged.branches().unwrap();
    assert_eq!(upper, &first_round(1, 2));
    assert_eq!(lower.decided().map(|p| p.id), Some(ParticipantId(4)));
}

#[test]
fn test_replace_branch_of_leaf_is_rejected() {
    let leaf = BracketNode::leaf(horse(1));
    let result = replace_branch(&leaf, BranchPosition::Upper, BracketNode::empty_leaf());
    assert_eq!(
        result,
        Err(PropagationError::NoBranches {
            position: BranchPosition::Upper
        })
    );
}

#[test]
fn test_merge_applies_event_position() {
    let node = four_field();
    let event = ChangeEvent::new(BracketNode::empty_leaf(), BranchPosition::Lower);
    let merged = merge(&node, event).unwrap();
    assert!(merged.branch(BranchPosition::Lower).unwrap().is_leaf());
    assert!(!merged.branch(BranchPosition::Upper).unwrap().is_leaf());
}

#[test]
fn test_propagate_reaches_root_without_touching_input() {
    let root = four_field();
    let path: BranchPath = "LU".parse().unwrap();

    let new_root = propagate(&root, &path, BracketNode::leaf(horse(9))).unwrap();

    assert_eq!(root, four_field());
    let names: Vec<&str> = new_root.occupants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["H1", "H2", "H9", "H4"]);
}

#[test]
fn test_propagate_at_root_replaces_everything() {
    let root = four_field();
    let replacement = four_field().with_winner(horse(2));
    let new_root = propagate(&root, &BranchPath::root(), replacement.clone()).unwrap();
    assert_eq!(new_root, replacement);
}

#[test]
fn test_propagate_outside_tree_is_rejected() {
    let root = four_field();
    let path: BranchPath = "UUU".parse().unwrap();
    let result = propagate(&root, &path, BracketNode::empty_leaf());
    assert_eq!(result, Err(PropagationError::PathOutsideTree(path)));
}
