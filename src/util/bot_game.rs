//! Utility to run selectors against each other and report the results.
//!
//! Games are fully independent, so a match is played on all cores.

use std::fmt::{Debug, Formatter};

use itertools::Itertools;
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::ai::Selector;
use crate::board::Player;
use crate::game::Game;

/// Run selectors built by `selector_l` and `selector_r` against each other
/// from the standard starting position.
///
/// `games_per_side` games are played, or twice that when `both_sides` is set,
/// in which case the selectors swap colors halfway through each pair. The
/// factories get a distinct seed per constructed selector so that every game
/// sees fresh randomness while the whole match stays reproducible.
#[must_use]
pub fn run<G: Rng>(
    selector_l: impl Fn(u64) -> Selector<G> + Sync,
    selector_r: impl Fn(u64) -> Selector<G> + Sync,
    games_per_side: u32,
    both_sides: bool,
) -> MatchResult {
    let game_count = if both_sides { 2 * games_per_side } else { games_per_side };

    let records: Vec<(Option<bool>, usize)> = (0..game_count)
        .into_par_iter()
        .panic_fuse()
        .map(|game_i| {
            let flip = both_sides && game_i % 2 == 1;
            let (seed_l, seed_r) = (2 * game_i as u64, 2 * game_i as u64 + 1);

            let mut game = if flip {
                Game::new(selector_r(seed_r), selector_l(seed_l))
            } else {
                Game::new(selector_l(seed_l), selector_r(seed_r))
            };
            let outcome = game.run();

            let player_l = if flip { Player::B } else { Player::A };
            let won_l = outcome.winner().map(|winner| winner == player_l);
            (won_l, game.history().len())
        })
        .collect();

    let counts = records.iter().counts_by(|&(won_l, _)| won_l);
    let total_length: usize = records.iter().map(|&(_, length)| length).sum();

    MatchResult {
        game_count,
        wins_l: counts.get(&Some(true)).copied().unwrap_or(0) as u32,
        wins_r: counts.get(&Some(false)).copied().unwrap_or(0) as u32,
        draws: counts.get(&None).copied().unwrap_or(0) as u32,
        average_game_length: total_length as f32 / game_count as f32,
    }
}

/// Structure returned by [`run`].
#[derive(Clone, PartialEq)]
pub struct MatchResult {
    pub game_count: u32,
    pub wins_l: u32,
    pub wins_r: u32,
    pub draws: u32,
    pub average_game_length: f32,
}

impl Debug for MatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MatchResult {{")?;
        writeln!(
            f,
            "  {} games, average length {:.1}",
            self.game_count, self.average_game_length
        )?;
        writeln!(
            f,
            "  left {} / draw {} / right {}",
            self.wins_l, self.draws, self.wins_r
        )?;
        writeln!(f, "}}")?;
        Ok(())
    }
}
