//! Win condition: claim either 3 flags in a row or 5 flags total.

use bl_types::{GameState, Side, NUM_FLAGS};

/// The winner, if the current flag claims already decide the game.
///
/// Walks flags left to right, tracking each side's running total and its
/// current unbroken streak. An unresolved flag breaks both streaks (a gap
/// in the line can never count as "in a row"), but never resets the totals.
pub fn winner(state: &GameState) -> Option<Side> {
    let mut total = [0u32; 2];
    let mut streak = [0u32; 2];

    for flag in state.flags.iter() {
        match flag.claimed_by() {
            None => streak = [0, 0],
            Some(side) => {
                let idx = side_index(side);
                streak[idx] += 1;
                total[idx] += 1;
            }
        }
        for (idx, side) in [Side::A, Side::B].into_iter().enumerate() {
            if streak[idx] >= 3 || total[idx] >= 5 {
                return Some(side);
            }
        }
    }
    None
}

fn side_index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}
