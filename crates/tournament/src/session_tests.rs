use super::*;
use crate::store::MemoryStore;
use bracket_core::{Bracket, BracketNode, EditError};
use chrono::NaiveDate;

fn horse(id: i64, seed: Option<u32>) -> Participant {
    let born = NaiveDate::from_ymd_opt(2018, 8, 8).unwrap();
    let mut participant = Participant::new(id, &format!("H{}", id), born);
    participant.seed = seed;
    participant
}

fn path(s: &str) -> BranchPath {
    s.parse().unwrap()
}

fn four() -> FieldSize {
    FieldSize::new(4).unwrap()
}

fn store_with(participants: Vec<Participant>) -> MemoryStore {
    MemoryStore::new().with_tournament(TournamentId(1), participants)
}

fn seeded_four() -> Vec<Participant> {
    (0..4).map(|i| horse(i as i64 + 1, Some(i))).collect()
}

#[test]
fn test_open_unknown_tournament_fails() {
    let result = StandingsSession::open(MemoryStore::new(), TournamentId(9), four());
    assert!(matches!(result, Err(TournamentError::Store(_))));
}

#[test]
fn test_open_rejects_inconsistent_standings() {
    let mut participants = seeded_four();
    participants[0].furthest_round = Some(1);
    participants[1].furthest_round = Some(1);

    let result = StandingsSession::open(store_with(participants), TournamentId(1), four());
    assert!(matches!(result, Err(TournamentError::Validation(_))));
}

#[test]
fn test_decisions_are_saved_to_store() {
    let mut session = StandingsSession::open(store_with(seeded_four()), TournamentId(1), four()).unwrap();
    session.select(&path("U"), ParticipantId(2)).unwrap();
    session.select(&path("L"), ParticipantId(3)).unwrap();
    session.select(&BranchPath::root(), ParticipantId(3)).unwrap();

    let saved = session.save().unwrap();
    assert_eq!(saved.len(), 4);

    let stored = session.into_store().tournament_participants(TournamentId(1)).unwrap();
    let rounds: Vec<(i64, Option<u32>)> = stored.iter().map(|p| (p.id.0, p.furthest_round)).collect();
    assert_eq!(rounds, vec![(1, None), (2, Some(1)), (3, Some(2)), (4, None)]);
}

#[test]
fn test_reopened_session_continues_where_it_left_off() {
    let mut session = StandingsSession::open(store_with(seeded_four()), TournamentId(1), four()).unwrap();
    session.select(&path("U"), ParticipantId(1)).unwrap();
    session.save().unwrap();

    let session = StandingsSession::open(session.into_store(), TournamentId(1), four()).unwrap();
    let editor = session.editor();
    assert!(!editor.is_editable(&path("U")));
    assert_eq!(
        editor.node(&path("U")).and_then(|n| n.decided()).map(|p| p.id),
        Some(ParticipantId(1))
    );
}

#[test]
fn test_unseeded_entrants_are_kept_on_save() {
    let participants = vec![horse(1, Some(0)), horse(2, Some(1)), horse(3, None)];
    let mut session = StandingsSession::open(store_with(participants), TournamentId(1), four()).unwrap();

    let saved = session.save().unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[2].id, ParticipantId(3));
    assert_eq!(saved[2].seed, None);
}

#[test]
fn test_save_refuses_to_rewrite_settled_match() {
    let mut session = StandingsSession::open(store_with(seeded_four()), TournamentId(1), four()).unwrap();
    session.select(&path("U"), ParticipantId(1)).unwrap();
    session.save().unwrap();

    let mut session = StandingsSession::open(session.into_store(), TournamentId(1), four()).unwrap();
    session.editor_mut().reset(&path("U")).unwrap();
    session.select(&path("U"), ParticipantId(2)).unwrap();

    assert!(matches!(session.save(), Err(TournamentError::Validation(_))));
    let stored = session.store().tournament_participants(TournamentId(1)).unwrap();
    assert_eq!(stored[0].furthest_round, Some(1));

    // An explicit overwrite goes through
    session.overwrite().unwrap();
    let stored = session.store().tournament_participants(TournamentId(1)).unwrap();
    assert_eq!(stored[0].furthest_round, None);
    assert_eq!(stored[1].furthest_round, Some(1));
}

#[test]
fn test_locked_edit_surfaces_as_edit_error() {
    let mut session = StandingsSession::open(store_with(seeded_four()), TournamentId(1), four()).unwrap();
    session.select(&path("U"), ParticipantId(1)).unwrap();

    let result = session.select(&path("UU"), ParticipantId(2));
    assert!(matches!(
        result,
        Err(TournamentError::Edit(EditError::Locked(_)))
    ));
}

#[test]
fn test_save_rejects_winner_who_never_reached_the_match() {
    let participants = seeded_four();
    let mut session = StandingsSession::open(store_with(participants.clone()), TournamentId(1), four()).unwrap();

    let leaves: Vec<BracketNode> = participants.iter().cloned().map(BracketNode::leaf).collect();
    let root = BracketNode::new_match(
        None,
        BracketNode::new_match(Some(participants[2].clone()), leaves[0].clone(), leaves[1].clone()),
        BracketNode::new_match(None, leaves[2].clone(), leaves[3].clone()),
    );
    session.editor = BracketEditor::new(Bracket::from_root(root, four()), &participants);

    assert!(matches!(session.save(), Err(TournamentError::Validation(_))));
    assert!(matches!(session.overwrite(), Err(TournamentError::Validation(_))));
    let stored = session.store().tournament_participants(TournamentId(1)).unwrap();
    assert!(stored.iter().all(|p| p.furthest_round.is_none()));
}
