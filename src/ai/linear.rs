use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

use rand::Rng;

use crate::ai::MoveMemory;
use crate::board::{CheckersBoard, Coord, Move, Player};

/// The coefficient vector of a [`LinearSelector`].
///
/// `rows[0]` weighs the player's normal pieces on their own home row, `rows[1]`
/// the next row out, and so on; indices are relative to the player's advance
/// direction, not absolute board rows. The promotion row has no entry since a
/// normal piece can never stand on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub basis: f64,
    pub own_pieces: f64,
    pub other_pieces: f64,
    pub own_kings: f64,
    pub other_kings: f64,
    pub own_threatened: f64,
    pub other_threatened: f64,
    pub own_stuck: f64,
    pub other_stuck: f64,
    pub rows: [f64; CheckersBoard::SIZE - 1],
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            basis: 0.0,
            own_pieces: 0.0,
            other_pieces: 0.0,
            own_kings: 0.0,
            other_kings: 0.0,
            own_threatened: 0.0,
            other_threatened: 0.0,
            own_stuck: 0.0,
            other_stuck: 0.0,
            rows: [0.0; CheckersBoard::SIZE - 1],
        }
    }
}

/// Score a terminal board gets from the point of view of the winner/loser.
const TERMINAL_SCORE: f64 = 100.0;

/// Selector that scores each candidate's resulting board with a fixed linear
/// combination of positional features and plays the best not-yet-played one.
pub struct LinearSelector<R: Rng> {
    weights: Weights,
    pub(super) memory: MoveMemory,
    rng: R,
}

impl<R: Rng> Debug for LinearSelector<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinearSelector {{ weights: {:?} }}", self.weights)
    }
}

/// The number of `player`'s pieces currently capturable by the opponent.
pub fn pieces_threatened(board: &CheckersBoard, player: Player) -> u32 {
    Coord::all().filter(|&coord| board.is_threatened(player, coord)).count() as u32
}

/// The number of `player`'s pieces without any legal move.
pub fn pieces_stuck(board: &CheckersBoard, player: Player) -> u32 {
    Coord::all().filter(|&coord| board.is_stuck(player, coord)).count() as u32
}

impl<R: Rng> LinearSelector<R> {
    pub fn new(weights: Weights, rng: R) -> Self {
        LinearSelector { weights, memory: MoveMemory::new(), rng }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// The linear evaluation of `board` from the point of view of `player`.
    /// A finished board scores +-100 depending on who ran out of pieces.
    pub fn evaluate(&self, board: &CheckersBoard, player: Player) -> f64 {
        if board.is_done() {
            return if board.piece_count(player) > 0 {
                TERMINAL_SCORE
            } else {
                -TERMINAL_SCORE
            };
        }

        let other = player.other();
        let weights = &self.weights;

        let mut row_score = 0.0;
        for (i, &weight) in weights.rows.iter().enumerate() {
            // row 0 is the player's own home row regardless of orientation
            let row = match player {
                Player::A => i as u8,
                Player::B => CheckersBoard::SIZE as u8 - 1 - i as u8,
            };
            row_score += board.normal_pieces_in_row(row, player) as f64 * weight;
        }

        row_score
            + weights.basis
            + weights.own_pieces * board.piece_count(player) as f64
            + weights.other_pieces * board.piece_count(other) as f64
            + weights.own_kings * board.king_count(player) as f64
            + weights.other_kings * board.king_count(other) as f64
            + weights.own_threatened * pieces_threatened(board, player) as f64
            + weights.other_threatened * pieces_threatened(board, other) as f64
            + weights.own_stuck * pieces_stuck(board, player) as f64
            + weights.other_stuck * pieces_stuck(board, other) as f64
    }

    /// Score every candidate, break exact ties (captures get a deterministic
    /// upward nudge, everything else a minute jitter), then walk the candidates
    /// from best to worst and return the first one not yet in memory.
    pub fn select(&mut self, moves: &[Move], board: &CheckersBoard, player: Player) -> Option<Move> {
        let mut scored: Vec<(f64, Move)> = Vec::with_capacity(moves.len());
        let mut used_scores: HashSet<u64> = HashSet::with_capacity(moves.len());

        for &mv in moves {
            let child = match board.apply(mv) {
                Ok(child) => child,
                // select is only ever handed legal moves
                Err(_) => continue,
            };
            let mut score = self.evaluate(&child, player);

            // perturb colliding scores until unique so that equal evaluations
            // still get a defined preference order
            while !used_scores.insert(score.to_bits()) {
                let captures = child.piece_count(player.other()) < board.piece_count(player.other());
                if captures {
                    score += 1e-6 + score / 100.0;
                } else {
                    score += score / 100.0 * (self.rng.gen::<f64>() - 0.5)
                        + (self.rng.gen::<f64>() - 0.5) * 1e-13;
                }
            }
            scored.push((score, mv));
        }

        // stable sort: ties cannot survive the loop above, but insertion order
        // still decides between -0.0 and 0.0
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        for &(_, mv) in &scored {
            if !self.memory.contains(board, mv) {
                self.memory.register(board, mv);
                return Some(mv);
            }
        }
        None
    }
}
