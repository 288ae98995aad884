//! Drawing seeds for participants who have none yet

use bracket_core::{FieldSize, Participant};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

/// Give unseeded participants the free slots of the field, in random order.
///
/// Participants who already hold a slot keep it. When there are more
/// unseeded participants than free slots the surplus stays unseeded.
/// Returns how many seeds were drawn.
pub fn draw_seeds<R: Rng + ?Sized>(
    participants: &mut [Participant],
    field: FieldSize,
    rng: &mut R,
) -> usize {
    let taken: HashSet<u32> = participants
        .iter()
        .filter_map(|p| p.seed)
        .filter(|seed| *seed < field.get())
        .collect();
    let mut free: Vec<u32> = (0..field.get()).filter(|s| !taken.contains(s)).collect();
    free.shuffle(rng);

    let mut drawn = 0;
    for participant in participants.iter_mut().filter(|p| p.seed.is_none()) {
        let Some(seed) = free.pop() else {
            break;
        };
        participant.seed = Some(seed);
        drawn += 1;
    }

    info!(drawn, free = free.len(), "drew seeds");
    drawn
}

#[cfg(test)]
#[path = "seeding_tests.rs"]
mod seeding_tests;
