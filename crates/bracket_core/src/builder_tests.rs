use super::*;
use crate::participant::ParticipantId;
use chrono::NaiveDate;

fn horse(id: i64, seed: u32) -> Participant {
    let born = NaiveDate::from_ymd_opt(2019, 3, 14).unwrap();
    Participant::new(id, &format!("H{}", id), born).with_seed(seed)
}

fn field(size: u32) -> FieldSize {
    FieldSize::new(size).unwrap()
}

#[test]
fn test_build_places_participants_in_seed_order() {
    // Input order must not matter, only seeds
    let participants = vec![horse(3, 2), horse(1, 0), horse(4, 3), horse(2, 1)];
    let root = build(&participants, field(4));

    let names: Vec<&str> = root.occupants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["H1", "H2", "H3", "H4"]);
}

#[test]
fn test_build_splits_seed_range_in_halves() {
    let participants: Vec<Participant> = (0..8).map(|i| horse(i as i64 + 1, i)).collect();
    let root = build(&participants, field(8));

    let (upper, lower) = root.branches().unwrap();
    let upper_seeds: Vec<u32> = upper.occupants().iter().filter_map(|p| p.seed).collect();
    let lower_seeds: Vec<u32> = lower.occupants().iter().filter_map(|p| p.seed).collect();
    assert_eq!(upper_seeds, vec![0, 1, 2, 3]);
    assert_eq!(lower_seeds, vec![4, 5, 6, 7]);
}

#[test]
fn test_build_short_field_has_empty_leaves() {
    let participants = vec![horse(1, 0), horse(2, 5)];
    let root = build(&participants, field(8));

    assert_eq!(root.leaf_count(), 8);
    assert_eq!(root.height(), 3);
    let slots = root.slots();
    assert!(slots[0].is_some());
    assert!(slots[1].is_none());
    assert!(slots[5].is_some());
}

#[test]
fn test_build_ignores_unseeded_and_out_of_range() {
    let born = NaiveDate::from_ymd_opt(2019, 3, 14).unwrap();
    let participants = vec![
        horse(1, 0),
        Participant::new(2, "Unseeded", born),
        horse(3, 9),
    ];
    let root = build(&participants, field(4));

    assert_eq!(root.occupants().len(), 1);
    assert!(!root.contains(ParticipantId(2)));
    assert!(!root.contains(ParticipantId(3)));
}

#[test]
fn test_build_records_winners_from_furthest_round() {
    let participants = vec![
        horse(1, 0).with_furthest_round(2),
        horse(2, 1),
        horse(3, 2).with_furthest_round(1),
        horse(4, 3),
    ];
    let root = build(&participants, field(4));

    assert_eq!(root.decided().map(|p| p.id), Some(ParticipantId(1)));
    let (upper, lower) = root.branches().unwrap();
    assert_eq!(upper.decided().map(|p| p.id), Some(ParticipantId(1)));
    assert_eq!(lower.decided().map(|p| p.id), Some(ParticipantId(3)));
}

#[test]
fn test_build_leaves_contradictory_match_undecided() {
    // Both sides of the first match claim to have won it
    let participants = vec![
        horse(1, 0).with_furthest_round(1),
        horse(2, 1).with_furthest_round(1),
        horse(3, 2),
        horse(4, 3),
    ];
    let root = build(&participants, field(4));

    let (upper, _) = root.branches().unwrap();
    assert!(upper.decided().is_none());
    assert!(root.decided().is_none());
}

#[test]
fn test_build_without_results_is_undecided() {
    let participants: Vec<Participant> = (0..4).map(|i| horse(i as i64 + 1, i)).collect();
    let root = build(&participants, field(4));

    assert!(!root.is_locked());
    let (upper, lower) = root.branches().unwrap();
    assert!(!upper.is_locked());
    assert!(!lower.is_locked());
}
