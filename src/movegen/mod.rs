//! Legal move generation.
//!
//! Derives jump legality from the board's adjacency relation, enumerates
//! every legal jump from a position, and provides the pluggable move
//! sources a game driver picks from.

pub mod jumps;

use rand::Rng;

use crate::board::Move;

pub use jumps::{has_legal_move, is_legal_move, jumped_position, legal_move, legal_moves};

/// Picks one move from a list of legal moves.
///
/// Implementations must return a member of `legal`, or `None` when the
/// list is empty.
pub trait MoveSource {
    fn choose(&mut self, legal: &[Move]) -> Option<Move>;
}

/// Uniform random choice among the legal moves.
pub struct RandomMoves<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomMoves<R> {
    pub fn new(rng: R) -> Self {
        RandomMoves { rng }
    }
}

impl<R: Rng> MoveSource for RandomMoves<R> {
    fn choose(&mut self, legal: &[Move]) -> Option<Move> {
        random_move(legal, &mut self.rng)
    }
}

/// Always plays the first listed move. Deterministic, used for replays
/// and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMove;

impl MoveSource for FirstMove {
    fn choose(&mut self, legal: &[Move]) -> Option<Move> {
        legal.first().copied()
    }
}

/// Picks one move uniformly at random.
pub fn random_move(legal: &[Move], rng: &mut impl Rng) -> Option<Move> {
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
