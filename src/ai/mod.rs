//! Move selection strategies and the anti-repetition memory they share.

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

use rand::Rng;

use crate::board::{CheckersBoard, Move, Player};

pub mod linear;
pub mod random;

pub use linear::{LinearSelector, Weights};
pub use random::RandomSelector;

/// Per-game record of (position, move) pairs a selector has already played.
///
/// A selector may not play the same move on the same position twice within one
/// game, which is what keeps evaluation-driven play from cycling forever. The
/// memory is owned by exactly one selector and reset at the start of a game.
#[derive(Debug, Default, Clone)]
pub struct MoveMemory {
    seen: HashSet<u64>,
}

impl MoveMemory {
    pub fn new() -> MoveMemory {
        MoveMemory::default()
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn contains(&self, board: &CheckersBoard, mv: Move) -> bool {
        self.seen.contains(&board.hash().combine(mv.fingerprint()))
    }

    pub fn register(&mut self, board: &CheckersBoard, mv: Move) {
        self.seen.insert(board.hash().combine(mv.fingerprint()));
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// The closed set of move selection strategies.
///
/// A sum type instead of a trait object keeps the game loop exhaustive and
/// allocation-free; new strategies are added as variants.
pub enum Selector<R: Rng> {
    Random(RandomSelector<R>),
    Linear(LinearSelector<R>),
}

impl<R: Rng> Debug for Selector<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Random(selector) => selector.fmt(f),
            Selector::Linear(selector) => selector.fmt(f),
        }
    }
}

impl<R: Rng> Selector<R> {
    /// Pick one of `moves` for `player`, or `None` when every candidate has
    /// already been played on this position. `moves` must all be legal on
    /// `board`.
    pub fn select(&mut self, moves: &[Move], board: &CheckersBoard, player: Player) -> Option<Move> {
        match self {
            Selector::Random(selector) => selector.select(moves, board, player),
            Selector::Linear(selector) => selector.select(moves, board, player),
        }
    }

    /// Forget all registered moves; called at the start of every game.
    pub fn reset_memory(&mut self) {
        match self {
            Selector::Random(selector) => selector.memory.reset(),
            Selector::Linear(selector) => selector.memory.reset(),
        }
    }
}

impl<R: Rng> From<RandomSelector<R>> for Selector<R> {
    fn from(selector: RandomSelector<R>) -> Self {
        Selector::Random(selector)
    }
}

impl<R: Rng> From<LinearSelector<R>> for Selector<R> {
    fn from(selector: LinearSelector<R>) -> Self {
        Selector::Linear(selector)
    }
}
