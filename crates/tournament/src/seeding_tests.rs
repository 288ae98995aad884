use super::*;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn horse(id: i64) -> Participant {
    let born = NaiveDate::from_ymd_opt(2014, 2, 28).unwrap();
    Participant::new(id, &format!("H{}", id), born)
}

fn eight() -> FieldSize {
    FieldSize::new(8).unwrap()
}

#[test]
fn test_draw_fills_every_slot_once() {
    let mut participants: Vec<Participant> = (1..=8).map(horse).collect();
    let mut rng = StdRng::seed_from_u64(42);

    assert_eq!(draw_seeds(&mut participants, eight(), &mut rng), 8);

    let mut seeds: Vec<u32> = participants.iter().filter_map(|p| p.seed).collect();
    seeds.sort();
    assert_eq!(seeds, (0..8).collect::<Vec<u32>>());
}

#[test]
fn test_draw_keeps_existing_seeds() {
    let mut participants: Vec<Participant> = (1..=4).map(horse).collect();
    participants[0].seed = Some(5);
    participants[1].seed = Some(0);
    let mut rng = StdRng::seed_from_u64(7);

    assert_eq!(draw_seeds(&mut participants, eight(), &mut rng), 2);

    assert_eq!(participants[0].seed, Some(5));
    assert_eq!(participants[1].seed, Some(0));
    for participant in &participants[2..] {
        let seed = participant.seed.unwrap();
        assert!(seed != 5 && seed != 0 && seed < 8);
    }
    assert_ne!(participants[2].seed, participants[3].seed);
}

#[test]
fn test_draw_leaves_surplus_unseeded() {
    let mut participants: Vec<Participant> = (1..=10).map(horse).collect();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(draw_seeds(&mut participants, eight(), &mut rng), 8);
    assert_eq!(participants.iter().filter(|p| p.seed.is_none()).count(), 2);
}
