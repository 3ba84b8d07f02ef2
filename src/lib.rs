#![warn(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

//! An 8x8 checkers (draughts) engine: board rules, incremental position
//! hashing and heuristic move selection, able to play out full games
//! autonomously.
//!
//! # Overview
//!
//! * [CheckersBoard](crate::board::CheckersBoard) holds a position and hands
//!   out new boards through [apply](crate::board::CheckersBoard::apply);
//!   existing boards are never mutated, so they can be aliased freely.
//! * [Selector](crate::ai::Selector) picks among legal moves, either uniformly
//!   at random ([RandomSelector](crate::ai::RandomSelector)) or by a weighted
//!   linear evaluation ([LinearSelector](crate::ai::LinearSelector)). Every
//!   selector remembers the (position, move) pairs it has played and never
//!   repeats one within a game.
//! * [Game](crate::game::Game) alternates two selectors over a board, records
//!   every snapshot and stops on attrition, blocked players, an exhausted
//!   selector or the round cap.
//! * [bot_game](crate::util::bot_game) plays many independent games in
//!   parallel to compare selectors.
//!
//! # Example
//!
//! ```
//! use checkers::ai::{LinearSelector, RandomSelector, Weights};
//! use checkers::game::Game;
//! use checkers::util::tiny::consistent_rng;
//!
//! let weights = Weights {
//!     own_pieces: 1.0,
//!     other_pieces: -1.0,
//!     ..Weights::default()
//! };
//!
//! let mut game = Game::new(
//!     LinearSelector::new(weights, consistent_rng(0)),
//!     RandomSelector::new(consistent_rng(1)),
//! );
//! println!("{}", game.run());
//! ```

pub mod board;
pub mod hash;

pub mod ai;
pub mod game;

pub mod display;

pub mod util;
