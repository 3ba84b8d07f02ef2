use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::hash;
use crate::hash::PositionHash;

/// One of the two players.
///
/// `A` opens the game, advances toward increasing `y` and promotes on row 7.
/// `B` advances toward decreasing `y` and promotes on row 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    A,
    B,
}

/// A piece on the board. Illegal cell states are unrepresentable: a square is
/// either empty (`None`) or one of the four `(player, king)` combinations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub player: Player,
    pub king: bool,
}

/// A square coordinate, always within the 8x8 board.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord {
    x: u8,
    y: u8,
}

/// A move from one square to another. Plain value, carries no legality
/// information by itself.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

/// Returned by [`CheckersBoard::apply`] when the moved piece does not belong
/// to the player whose turn it is. `apply` trusts its caller on everything
/// else, but this condition would silently corrupt the position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IllegalMove {
    pub mv: Move,
    pub next_player: Player,
}

/// The four diagonal directions as `(dx, dy)` steps.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The state of a checkers game: piece placement, the player to move, cached
/// per-player counts and the running position hash.
///
/// A board is only ever mutated during its own construction: [`CheckersBoard::apply`]
/// returns a fresh board and leaves the receiver untouched, so boards can be
/// freely aliased by selectors and game traces.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CheckersBoard {
    grid: [[Option<Piece>; CheckersBoard::SIZE]; CheckersBoard::SIZE],
    next_player: Player,
    hash: PositionHash,
    pieces: [u8; 2],
    kings: [u8; 2],
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::A, Player::B];

    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// The `y` direction this player's normal pieces advance toward.
    pub fn forward_dir(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// The row on which this player's normal pieces promote.
    pub fn far_row(self) -> u8 {
        match self {
            Player::A => CheckersBoard::SIZE as u8 - 1,
            Player::B => 0,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::A => 'a',
            Player::B => 'b',
        }
    }
}

impl Piece {
    pub fn normal(player: Player) -> Piece {
        Piece { player, king: false }
    }

    pub fn king(player: Player) -> Piece {
        Piece { player, king: true }
    }
}

impl Coord {
    pub fn new(x: u8, y: u8) -> Coord {
        assert!(x < CheckersBoard::SIZE as u8);
        assert!(y < CheckersBoard::SIZE as u8);
        Coord { x, y }
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CheckersBoard::SIZE as u8)
            .flat_map(|x| (0..CheckersBoard::SIZE as u8).map(move |y| Coord { x, y }))
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    /// Whether this square is one of the dark squares pieces live on.
    pub fn playable(self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// The square `steps` diagonal steps away, or `None` past the board edge.
    pub fn offset(self, dx: i8, dy: i8, steps: u8) -> Option<Coord> {
        let x = self.x as i16 + dx as i16 * steps as i16;
        let y = self.y as i16 + dy as i16 * steps as i16;
        if (0..CheckersBoard::SIZE as i16).contains(&x) && (0..CheckersBoard::SIZE as i16).contains(&y)
        {
            Some(Coord { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }

    /// Deterministic numeric fingerprint, combined with the board hash for
    /// selector move memories.
    pub fn fingerprint(self) -> u64 {
        hash::coord_uid(self.from) * hash::coord_uid(self.to)
    }

    /// The diagonal step direction of this move, assuming it is diagonal.
    fn direction(self) -> (i8, i8) {
        let dx = if self.from.x > self.to.x { -1 } else { 1 };
        let dy = if self.from.y > self.to.y { -1 } else { 1 };
        (dx, dy)
    }

    /// The squares strictly between `from` and `to` along the diagonal.
    fn between(self) -> impl Iterator<Item = Coord> {
        let (dx, dy) = self.direction();
        let length = (self.to.x as i16 - self.from.x as i16).unsigned_abs() as u8;
        let from = self.from;
        (1..length.max(1)).map(move |steps| {
            // cannot leave the board, both endpoints are on it
            from.offset(dx, dy, steps).unwrap()
        })
    }
}

impl Default for CheckersBoard {
    fn default() -> Self {
        CheckersBoard::new()
    }
}

impl CheckersBoard {
    pub const SIZE: usize = 8;

    /// The standard starting position: each player's first three ranks of
    /// playable squares filled with normal pieces, `A` to move.
    pub fn new() -> CheckersBoard {
        let mut board = CheckersBoard::empty(Player::A);

        for coord in Coord::all() {
            if !coord.playable() {
                continue;
            }
            if coord.y < 3 {
                board.place(coord, Piece::normal(Player::A));
            } else if coord.y >= Self::SIZE as u8 - 3 {
                board.place(coord, Piece::normal(Player::B));
            }
        }

        board
    }

    /// An empty board with `next_player` to move, for setting up positions.
    pub fn empty(next_player: Player) -> CheckersBoard {
        CheckersBoard {
            grid: [[None; Self::SIZE]; Self::SIZE],
            next_player,
            hash: PositionHash::default(),
            pieces: [0; 2],
            kings: [0; 2],
        }
    }

    /// Put a piece on a playable square, keeping counts and hash in sync.
    /// Panics if the square is occupied or not playable.
    pub fn place(&mut self, coord: Coord, piece: Piece) {
        assert!(coord.playable(), "cannot place a piece on {:?}", coord);
        assert!(self.square(coord).is_none(), "{:?} is already occupied", coord);

        self.set_square(coord, Some(piece));
        self.pieces[piece.player.index() as usize] += 1;
        if piece.king {
            self.kings[piece.player.index() as usize] += 1;
        }
    }

    fn set_square(&mut self, coord: Coord, piece: Option<Piece>) {
        let old = self.grid[coord.x as usize][coord.y as usize];
        self.hash.update(coord, old, piece);
        self.grid[coord.x as usize][coord.y as usize] = piece;
    }

    pub fn square(&self, coord: Coord) -> Option<Piece> {
        self.grid[coord.x as usize][coord.y as usize]
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn hash(&self) -> PositionHash {
        self.hash
    }

    pub fn piece_count(&self, player: Player) -> u8 {
        self.pieces[player.index() as usize]
    }

    pub fn king_count(&self, player: Player) -> u8 {
        self.kings[player.index() as usize]
    }

    /// Whether the game is over by attrition.
    pub fn is_done(&self) -> bool {
        self.pieces[0] == 0 || self.pieces[1] == 0
    }

    /// The winner by attrition, `None` while both players have pieces.
    pub fn winner(&self) -> Option<Player> {
        match (self.pieces[0], self.pieces[1]) {
            (0, _) => Some(Player::B),
            (_, 0) => Some(Player::A),
            _ => None,
        }
    }

    fn is_piece_of(&self, coord: Coord, player: Player) -> bool {
        matches!(self.square(coord), Some(piece) if piece.player == player)
    }

    /// Full legality check for a candidate move of `player`.
    pub fn is_legal_move(&self, mv: Move, player: Player) -> bool {
        // both endpoints on playable squares, destination empty, own source
        if !mv.from.playable() || !mv.to.playable() {
            return false;
        }
        if self.square(mv.to).is_some() {
            return false;
        }
        let piece = match self.square(mv.from) {
            Some(piece) if piece.player == player => piece,
            _ => return false,
        };

        let dist_x = mv.to.x as i16 - mv.from.x as i16;
        let dist_y = mv.to.y as i16 - mv.from.y as i16;
        if dist_x.abs() != dist_y.abs() {
            return false;
        }

        if !piece.king {
            let forward = dist_y.signum() == player.forward_dir() as i16;
            match dist_x.abs() {
                1 => forward,
                2 => {
                    // single jump over an adjacent enemy piece
                    let middle = Coord::new(
                        (mv.from.x as i16 + dist_x / 2) as u8,
                        (mv.from.y as i16 + dist_y / 2) as u8,
                    );
                    forward && self.is_piece_of(middle, player.other())
                }
                _ => false,
            }
        } else {
            // any diagonal run with no own piece and at most one enemy on it
            let mut enemies = 0;
            for coord in mv.between() {
                match self.square(coord) {
                    Some(blocker) if blocker.player == player => return false,
                    Some(_) => enemies += 1,
                    None => {}
                }
            }
            dist_x != 0 && enemies <= 1
        }
    }

    /// All legal moves of the piece at `coord`, empty if it is not `player`'s.
    pub fn moves_from(&self, coord: Coord, player: Player) -> Vec<Move> {
        let mut moves = vec![];
        let piece = match self.square(coord) {
            Some(piece) if piece.player == player => piece,
            _ => return moves,
        };

        let max_steps = if piece.king { Self::SIZE as u8 - 1 } else { 2 };
        for &(dx, dy) in &DIRECTIONS {
            for steps in 1..=max_steps {
                let to = match coord.offset(dx, dy, steps) {
                    Some(to) => to,
                    None => break,
                };
                let mv = Move::new(coord, to);
                if self.is_legal_move(mv, player) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// All legal moves for `player`, in square-scan order.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = vec![];
        for coord in Coord::all() {
            moves.extend(self.moves_from(coord, player));
        }
        moves
    }

    /// Apply a pre-validated move, returning the resulting board and leaving
    /// `self` unchanged. Promotion and the (single) capture along the diagonal
    /// are resolved here; the turn passes to the opponent.
    pub fn apply(&self, mv: Move) -> Result<CheckersBoard, IllegalMove> {
        let mut piece = match self.square(mv.from) {
            Some(piece) if piece.player == self.next_player => piece,
            _ => return Err(IllegalMove { mv, next_player: self.next_player }),
        };
        let player = piece.player;

        let mut next = self.clone();
        next.set_square(mv.from, None);

        if mv.to.y == player.far_row() && !piece.king {
            piece = Piece::king(player);
            next.kings[player.index() as usize] += 1;
        }
        next.set_square(mv.to, Some(piece));

        // remove the first piece encountered between from and to, if enemy
        for coord in mv.between() {
            if let Some(captured) = next.square(coord) {
                if captured.player == player.other() {
                    next.pieces[captured.player.index() as usize] -= 1;
                    if captured.king {
                        next.kings[captured.player.index() as usize] -= 1;
                    }
                    next.set_square(coord, None);
                }
                break;
            }
        }

        next.next_player = player.other();
        Ok(next)
    }

    /// Whether the piece of `player` at `coord` can be captured right now.
    pub fn is_threatened(&self, player: Player, coord: Coord) -> bool {
        self.threat_count(player, coord) > 0
    }

    /// The number of directions from which the piece of `player` at `coord`
    /// can currently be captured. Zero if the square does not hold a piece of
    /// `player`.
    pub fn threat_count(&self, player: Player, coord: Coord) -> u32 {
        if !self.is_piece_of(coord, player) {
            return 0;
        }

        let mut count = 0;
        for &(dx, dy) in &DIRECTIONS {
            // a capture needs an open landing square directly behind the target
            match coord.offset(-dx, -dy, 1) {
                Some(landing) if self.square(landing).is_none() => {}
                _ => continue,
            }

            for steps in 1..Self::SIZE as u8 {
                let attacker = match coord.offset(dx, dy, steps) {
                    Some(attacker) => attacker,
                    None => break,
                };
                match self.square(attacker) {
                    None => continue,
                    Some(piece) if piece.player == player => break,
                    Some(piece) => {
                        // a normal attacker must be adjacent and jump forward
                        if piece.king || (steps == 1 && piece.player.forward_dir() == -dy) {
                            count += 1;
                        }
                        break;
                    }
                }
            }
        }
        count
    }

    /// Whether the piece of `player` at `coord` has no legal move at all.
    /// `false` if the square does not hold a piece of `player`.
    pub fn is_stuck(&self, player: Player, coord: Coord) -> bool {
        let piece = match self.square(coord) {
            Some(piece) if piece.player == player => piece,
            _ => return false,
        };

        if piece.king {
            for &(dx, dy) in &DIRECTIONS {
                let neighbor = match coord.offset(dx, dy, 1) {
                    Some(neighbor) => neighbor,
                    None => continue,
                };
                match self.square(neighbor) {
                    // an open square next to a king is always a legal move
                    None => return false,
                    Some(blocker) if blocker.player == player => continue,
                    Some(_) => {
                        // adjacent enemy: movable iff the landing square behind
                        // it is open
                        if let Some(landing) = coord.offset(dx, dy, 2) {
                            if self.square(landing).is_none() {
                                return false;
                            }
                        }
                    }
                }
            }
            true
        } else {
            let dy = player.forward_dir();
            for &dx in &[-1i8, 1] {
                if let Some(step) = coord.offset(dx, dy, 1) {
                    match self.square(step) {
                        None => return false,
                        Some(blocker) if blocker.player == player.other() => {
                            if let Some(landing) = coord.offset(dx, dy, 2) {
                                if self.square(landing).is_none() {
                                    return false;
                                }
                            }
                        }
                        Some(_) => {}
                    }
                }
            }
            true
        }
    }

    /// The number of `player`'s normal pieces on absolute row `row`.
    pub fn normal_pieces_in_row(&self, row: u8, player: Player) -> u32 {
        (0..Self::SIZE as u8)
            .filter(|&x| self.square(Coord::new(x, row)) == Some(Piece::normal(player)))
            .count() as u32
    }
}

impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "move {} is not applicable, it is the turn of player {}",
            self.mv,
            self.next_player.to_char()
        )
    }
}

impl Error for IllegalMove {}

impl Debug for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coord({}, {})", self.x, self.y)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({} -> {})", self.from, self.to)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

fn piece_to_char(piece: Option<Piece>) -> char {
    match piece {
        None => '.',
        Some(Piece { player: Player::A, king: false }) => 'a',
        Some(Piece { player: Player::A, king: true }) => 'A',
        Some(Piece { player: Player::B, king: false }) => 'b',
        Some(Piece { player: Player::B, king: true }) => 'B',
    }
}

impl Display for CheckersBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in (0..Self::SIZE as u8).rev() {
            write!(f, "{}| ", y)?;
            for x in 0..Self::SIZE as u8 {
                write!(f, "{} ", piece_to_char(self.square(Coord::new(x, y))))?;
            }
            writeln!(f)?;
        }
        writeln!(f, " +----------------")?;
        writeln!(f, "   0 1 2 3 4 5 6 7")?;
        writeln!(f, "next player: {}", self.next_player.to_char())?;
        Ok(())
    }
}
