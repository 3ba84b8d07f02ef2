use std::fmt::{Debug, Formatter};

use rand::Rng;

use crate::ai::MoveMemory;
use crate::board::{CheckersBoard, Move, Player};

/// Selector that picks uniformly among the legal moves it has not played on
/// this position before.
pub struct RandomSelector<R: Rng> {
    pub(super) memory: MoveMemory,
    rng: R,
}

impl<R: Rng> Debug for RandomSelector<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomSelector")
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        RandomSelector { memory: MoveMemory::new(), rng }
    }

    pub fn select(&mut self, moves: &[Move], board: &CheckersBoard, _player: Player) -> Option<Move> {
        let candidates: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| !self.memory.contains(board, mv))
            .collect();

        if candidates.is_empty() {
            return None;
        }
        let mv = candidates[self.rng.gen_range(0..candidates.len())];
        self.memory.register(board, mv);
        Some(mv)
    }
}
