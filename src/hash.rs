//! Incrementally maintained position fingerprint.
//!
//! Every (piece, square) pair maps to a product of three small primes, and the
//! board hash is the sum of the contributions of all occupied squares, reduced
//! modulo [`MODULUS`]. A single square write only touches its own contribution,
//! so the hash can be kept up to date in O(1) per write instead of rescanning
//! the whole grid. This is a fingerprint for repetition detection, not an
//! injective or cryptographic hash.

use std::fmt::{Debug, Formatter};

use crate::board::{Coord, Piece, Player};

/// One less than `2^31`, large enough that no single square contribution can
/// wrap more than once.
pub const MODULUS: u64 = 2147483647;

/// Primes #1..#8, one per column.
const COLUMN_UIDS: [u64; 8] = [2, 3, 5, 7, 11, 13, 17, 19];
/// Primes #9..#16, one per row.
const LINE_UIDS: [u64; 8] = [23, 29, 31, 37, 41, 43, 47, 53];
/// Primes #17..#20, one per piece kind. Empty squares contribute nothing.
const PIECE_UIDS: [u64; 4] = [59, 61, 67, 71];

/// The unique coordinate factor for a square, shared between the board hash
/// and move fingerprints.
pub fn coord_uid(coord: Coord) -> u64 {
    LINE_UIDS[coord.y() as usize] * COLUMN_UIDS[coord.x() as usize]
}

fn piece_uid(piece: Option<Piece>) -> u64 {
    match piece {
        None => 0,
        Some(Piece { player: Player::A, king: false }) => PIECE_UIDS[0],
        Some(Piece { player: Player::B, king: false }) => PIECE_UIDS[1],
        Some(Piece { player: Player::A, king: true }) => PIECE_UIDS[2],
        Some(Piece { player: Player::B, king: true }) => PIECE_UIDS[3],
    }
}

/// The contribution of a single square to the board hash.
pub fn square_contribution(coord: Coord, piece: Option<Piece>) -> u64 {
    piece_uid(piece) * coord_uid(coord) % MODULUS
}

/// The running board hash, always in `[0, MODULUS)`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PositionHash(u64);

impl PositionHash {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Replace the contribution of one square. Both contributions are below
    /// `MODULUS`, so a single conditional wrap in each direction suffices.
    pub fn update(&mut self, coord: Coord, old: Option<Piece>, new: Option<Piece>) {
        let old_contribution = square_contribution(coord, old);
        let new_contribution = square_contribution(coord, new);

        if self.0 < old_contribution {
            self.0 += MODULUS;
        }
        self.0 -= old_contribution;
        self.0 += new_contribution;
        if self.0 >= MODULUS {
            self.0 -= MODULUS;
        }
    }

    /// The key used by selector move memories, combining a board position with
    /// a move fingerprint.
    pub fn combine(self, move_fingerprint: u64) -> u64 {
        self.0.wrapping_mul(move_fingerprint)
    }
}

impl Debug for PositionHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PositionHash({:#010x})", self.0)
    }
}
