//! Abstract rendering and input collaborators.
//!
//! The engine never draws anything itself: it hands squares and pieces to a
//! [`BoardView`] and optionally polls an [`InputSource`] for single-stepping.
//! Window or pixel-buffer backends live entirely outside this crate; the only
//! provided implementation renders text.

use std::io::Write;

use crate::board::{CheckersBoard, Coord, Piece, Player};

/// A surface that can display a board, square by square.
pub trait BoardView {
    /// Fill the square background; `dark` squares are the playable ones.
    fn draw_square(&mut self, coord: Coord, dark: bool);

    /// Put a piece marker on a square, keyed by owner and king status.
    fn draw_piece(&mut self, coord: Coord, piece: Piece);

    /// Flush the finished frame to wherever it is shown.
    fn present(&mut self);
}

/// A source of typed characters, polled when a game single-steps.
pub trait InputSource {
    fn has_pending_char(&mut self) -> bool;

    fn next_char(&mut self) -> Option<char>;
}

/// Draw a full board onto `view`.
pub fn render(board: &CheckersBoard, view: &mut dyn BoardView) {
    for coord in Coord::all() {
        view.draw_square(coord, coord.playable());
        if let Some(piece) = board.square(coord) {
            view.draw_piece(coord, piece);
        }
    }
    view.present();
}

/// Text renderer over any writer. Rendering is best effort: write errors are
/// swallowed rather than interrupting the game.
pub struct TextView<W: Write> {
    writer: W,
    cells: [[char; CheckersBoard::SIZE]; CheckersBoard::SIZE],
}

impl<W: Write> std::fmt::Debug for TextView<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TextView")
    }
}

impl<W: Write> TextView<W> {
    pub fn new(writer: W) -> Self {
        TextView {
            writer,
            cells: [[' '; CheckersBoard::SIZE]; CheckersBoard::SIZE],
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BoardView for TextView<W> {
    fn draw_square(&mut self, coord: Coord, dark: bool) {
        self.cells[coord.x() as usize][coord.y() as usize] = if dark { '.' } else { ' ' };
    }

    fn draw_piece(&mut self, coord: Coord, piece: Piece) {
        let marker = match (piece.player, piece.king) {
            (Player::A, false) => 'a',
            (Player::A, true) => 'A',
            (Player::B, false) => 'b',
            (Player::B, true) => 'B',
        };
        self.cells[coord.x() as usize][coord.y() as usize] = marker;
    }

    fn present(&mut self) {
        for y in (0..CheckersBoard::SIZE).rev() {
            for x in 0..CheckersBoard::SIZE {
                let _ = write!(self.writer, "{} ", self.cells[x][y]);
            }
            let _ = writeln!(self.writer);
        }
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }
}

/// Input source that never produces a character.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn has_pending_char(&mut self) -> bool {
        false
    }

    fn next_char(&mut self) -> Option<char> {
        None
    }
}
