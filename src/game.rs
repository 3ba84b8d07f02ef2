//! Game orchestration: alternating two selectors over a board until a
//! terminal state is reached.

use std::fmt::{Display, Formatter};

use rand::Rng;

use crate::ai::Selector;
use crate::board::{CheckersBoard, Player};
use crate::display::{render, BoardView, InputSource};

/// Hard cap on the number of half-moves in a game.
pub const MAX_ROUNDS: u32 = 200;

/// Why a game ended without a winner.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawReason {
    /// Neither player had a legal move.
    Stalemate,
    /// The active selector had moves available but had already played all of
    /// them on this position.
    SelectorExhausted,
    /// The game hit [`MAX_ROUNDS`] half-moves.
    RoundCapReached,
}

/// The result of a finished game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameOutcome {
    WonBy(Player),
    Drawn(DrawReason),
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::WonBy(player) => Some(player),
            GameOutcome::Drawn(_) => None,
        }
    }
}

impl Display for GameOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::WonBy(player) => write!(f, "won by {}", player.to_char()),
            GameOutcome::Drawn(reason) => write!(f, "drawn ({:?})", reason),
        }
    }
}

/// A single game between two selectors. The first selector plays
/// [`Player::A`], the second [`Player::B`].
///
/// The full sequence of board snapshots is retained, one per half-move, so a
/// finished game can be inspected afterwards.
pub struct Game<R: Rng> {
    selectors: [Selector<R>; 2],
    trace: Vec<CheckersBoard>,
}

impl<R: Rng> std::fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game {{ a: {:?}, b: {:?}, half_moves: {} }}",
            self.selectors[0],
            self.selectors[1],
            self.trace.len() - 1
        )
    }
}

impl<R: Rng> Game<R> {
    /// A game from the standard starting position.
    pub fn new(selector_a: impl Into<Selector<R>>, selector_b: impl Into<Selector<R>>) -> Self {
        Game::from_board(CheckersBoard::new(), selector_a, selector_b)
    }

    /// A game from an arbitrary position, for tests and resumed games.
    pub fn from_board(
        board: CheckersBoard,
        selector_a: impl Into<Selector<R>>,
        selector_b: impl Into<Selector<R>>,
    ) -> Self {
        Game {
            selectors: [selector_a.into(), selector_b.into()],
            trace: vec![board],
        }
    }

    /// Play the game out without any display.
    pub fn run(&mut self) -> GameOutcome {
        self.run_impl(None, None)
    }

    /// Play the game out, rendering every position onto `view`. With an
    /// `input` source the game blocks on a keystroke after every half-move.
    pub fn run_with_view(
        &mut self,
        view: &mut dyn BoardView,
        input: Option<&mut dyn InputSource>,
    ) -> GameOutcome {
        self.run_impl(Some(view), input)
    }

    fn run_impl(
        &mut self,
        mut view: Option<&mut dyn BoardView>,
        mut input: Option<&mut dyn InputSource>,
    ) -> GameOutcome {
        for selector in &mut self.selectors {
            selector.reset_memory();
        }

        // the trace always holds at least the start board
        let mut board = self.trace.last().unwrap().clone();
        if let Some(view) = view.as_deref_mut() {
            render(&board, view);
        }

        let mut rounds: u32 = 1;

        while !board.is_done() {
            let player = board.next_player();
            let moves = board.legal_moves(player);
            if moves.is_empty() {
                // the mover is blocked; if the opponent is blocked too the
                // game is a stalemate rather than a loss
                return if board.legal_moves(player.other()).is_empty() {
                    GameOutcome::Drawn(DrawReason::Stalemate)
                } else {
                    GameOutcome::WonBy(player.other())
                };
            }

            let selector = &mut self.selectors[player.index() as usize];
            let mv = match selector.select(&moves, &board, player) {
                Some(mv) => mv,
                None => return GameOutcome::Drawn(DrawReason::SelectorExhausted),
            };
            // the selector only sees legal moves, so apply cannot fail
            let next = board.apply(mv).expect("selector returned an illegal move");

            rounds += 1;
            if rounds >= MAX_ROUNDS {
                return GameOutcome::Drawn(DrawReason::RoundCapReached);
            }

            if let Some(view) = view.as_deref_mut() {
                render(&next, view);
                if let Some(input) = input.as_deref_mut() {
                    while !input.has_pending_char() {}
                    input.next_char();
                }
            }

            self.trace.push(next.clone());
            board = next;
        }

        // done by attrition, exactly one side still has pieces
        GameOutcome::WonBy(board.winner().expect("finished board has a winner"))
    }

    /// The boards seen so far, one per half-move, starting position included.
    pub fn history(&self) -> &[CheckersBoard] {
        &self.trace
    }
}
