//! The automated opponent: a uniformly random choice from the legal moves
//! the rules engine reports. No lookahead, no evaluation.

use rand::seq::SliceRandom;
use rand::Rng;

use rules::types::Move;

/// Picks a random move. `None` when the list is empty; never panics.
pub fn pick(moves: &[Move]) -> Option<Move> {
    pick_with(&mut rand::thread_rng(), moves)
}

/// Same as [`pick`] with a caller-supplied generator, so tests can seed it.
pub fn pick_with<R: Rng + ?Sized>(rng: &mut R, moves: &[Move]) -> Option<Move> {
    moves.choose(rng).copied()
}
