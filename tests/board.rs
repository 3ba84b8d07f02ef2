use checkers::board::{CheckersBoard, Coord, Move, Piece, Player};
use checkers::hash::{square_contribution, MODULUS};

fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
    Move::new(Coord::new(from.0, from.1), Coord::new(to.0, to.1))
}

/// Recompute piece/king tallies and the position hash directly from the grid.
fn recount(board: &CheckersBoard) -> ([u8; 2], [u8; 2], u64) {
    let mut pieces = [0; 2];
    let mut kings = [0; 2];
    let mut hash = 0u64;

    for coord in Coord::all() {
        if let Some(piece) = board.square(coord) {
            pieces[piece.player.index() as usize] += 1;
            if piece.king {
                kings[piece.player.index() as usize] += 1;
            }
        }
        hash = (hash + square_contribution(coord, board.square(coord))) % MODULUS;
    }
    (pieces, kings, hash)
}

fn assert_consistent(board: &CheckersBoard) {
    let (pieces, kings, hash) = recount(board);
    for player in Player::BOTH {
        assert_eq!(board.piece_count(player), pieces[player.index() as usize]);
        assert_eq!(board.king_count(player), kings[player.index() as usize]);
    }
    assert_eq!(board.hash().value(), hash);

    for coord in Coord::all() {
        if board.square(coord).is_some() {
            assert!(coord.playable(), "piece on unplayable square {:?}", coord);
        }
    }
}

#[test]
fn start_position() {
    let board = CheckersBoard::new();

    assert_eq!(board.next_player(), Player::A);
    assert_eq!(board.piece_count(Player::A), 12);
    assert_eq!(board.piece_count(Player::B), 12);
    assert_eq!(board.king_count(Player::A), 0);
    assert_eq!(board.king_count(Player::B), 0);
    assert!(!board.is_done());
    assert_eq!(board.winner(), None);
    assert_consistent(&board);

    // the two start rows closest to each player are full
    assert_eq!(board.normal_pieces_in_row(0, Player::A), 4);
    assert_eq!(board.normal_pieces_in_row(7, Player::B), 4);
    assert_eq!(board.normal_pieces_in_row(3, Player::A), 0);
    assert_eq!(board.normal_pieces_in_row(4, Player::B), 0);
}

#[test]
fn opening_step() {
    let board = CheckersBoard::new();

    // only the front rank can move at the start
    let opening = mv((2, 2), (3, 3));
    assert!(board.is_legal_move(opening, Player::A));

    let next = board.apply(opening).unwrap();
    assert_eq!(next.square(Coord::new(2, 2)), None);
    assert_eq!(next.square(Coord::new(3, 3)), Some(Piece::normal(Player::A)));
    assert_eq!(next.next_player(), Player::B);
    assert_consistent(&next);
}

#[test]
fn forward_step_on_open_board() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(2, 0), Piece::normal(Player::A));
    board.place(Coord::new(1, 7), Piece::normal(Player::B));

    let step = mv((2, 0), (3, 1));
    assert!(board.is_legal_move(step, Player::A));

    let next = board.apply(step).unwrap();
    assert_eq!(next.square(Coord::new(2, 0)), None);
    assert_eq!(next.square(Coord::new(3, 1)), Some(Piece::normal(Player::A)));
    assert_eq!(next.next_player(), Player::B);
    assert_consistent(&next);
}

#[test]
fn apply_does_not_mutate_receiver() {
    let board = CheckersBoard::new();
    let copy = board.clone();

    let _ = board.apply(mv((2, 0), (3, 1))).unwrap();

    assert_eq!(board, copy);
    assert_eq!(board.hash(), copy.hash());
}

#[test]
fn apply_rejects_wrong_player() {
    let board = CheckersBoard::new();

    // it is A's turn
    let err = board.apply(mv((1, 7), (2, 6))).unwrap_err();
    assert_eq!(err.next_player, Player::A);

    // empty source square
    assert!(board.apply(mv((4, 4), (5, 5))).is_err());
}

#[test]
fn basic_illegal_moves() {
    let board = CheckersBoard::new();

    // zero length
    assert!(!board.is_legal_move(mv((2, 0), (2, 0)), Player::A));
    // not diagonal
    assert!(!board.is_legal_move(mv((2, 2), (2, 4)), Player::A));
    // backward for a normal piece
    let mut setup = CheckersBoard::empty(Player::A);
    setup.place(Coord::new(4, 4), Piece::normal(Player::A));
    assert!(!setup.is_legal_move(mv((4, 4), (3, 3)), Player::A));
    assert!(setup.is_legal_move(mv((4, 4), (3, 5)), Player::A));
    // occupied destination
    assert!(!board.is_legal_move(mv((0, 0), (1, 1)), Player::A));
    // too far for a normal piece without a jump
    assert!(!board.is_legal_move(mv((2, 2), (5, 5)), Player::A));
}

#[test]
fn normal_capture() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(3, 1), Piece::normal(Player::A));
    board.place(Coord::new(4, 2), Piece::normal(Player::B));
    board.place(Coord::new(1, 7), Piece::normal(Player::B));

    let jump = mv((3, 1), (5, 3));
    assert!(board.is_legal_move(jump, Player::A));
    // a jump without an enemy in the middle is illegal
    assert!(!board.is_legal_move(mv((3, 1), (1, 3)), Player::A));

    let next = board.apply(jump).unwrap();
    assert_eq!(next.square(Coord::new(4, 2)), None);
    assert_eq!(next.square(Coord::new(5, 3)), Some(Piece::normal(Player::A)));
    assert_eq!(next.piece_count(Player::B), board.piece_count(Player::B) - 1);
    assert_consistent(&next);
}

#[test]
fn king_moves_and_captures() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(2, 2), Piece::king(Player::A));
    board.place(Coord::new(4, 4), Piece::normal(Player::B));
    board.place(Coord::new(6, 6), Piece::normal(Player::B));

    // backward long move over empty squares
    assert!(board.is_legal_move(mv((2, 2), (0, 0)), Player::A));
    // capture by landing beyond the single enemy
    assert!(board.is_legal_move(mv((2, 2), (5, 5)), Player::A));
    // two enemies on the path
    assert!(!board.is_legal_move(mv((2, 2), (7, 7)), Player::A));

    let next = board.apply(mv((2, 2), (5, 5))).unwrap();
    assert_eq!(next.square(Coord::new(4, 4)), None);
    assert_eq!(next.piece_count(Player::B), 1);
    assert_eq!(next.square(Coord::new(5, 5)), Some(Piece::king(Player::A)));
    assert_consistent(&next);
}

#[test]
fn king_cannot_jump_own_piece() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(2, 2), Piece::king(Player::A));
    board.place(Coord::new(3, 3), Piece::normal(Player::A));
    board.place(Coord::new(1, 7), Piece::normal(Player::B));

    assert!(!board.is_legal_move(mv((2, 2), (4, 4)), Player::A));
    assert!(!board.is_legal_move(mv((2, 2), (5, 5)), Player::A));
}

#[test]
fn promotion_on_far_row() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(4, 6), Piece::normal(Player::A));
    board.place(Coord::new(0, 2), Piece::normal(Player::B));

    let next = board.apply(mv((4, 6), (5, 7))).unwrap();
    assert_eq!(next.square(Coord::new(5, 7)), Some(Piece::king(Player::A)));
    assert_eq!(next.king_count(Player::A), 1);
    assert_consistent(&next);

    // a king crossing the far row again does not promote twice
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(4, 6), Piece::king(Player::A));
    board.place(Coord::new(0, 2), Piece::normal(Player::B));

    let next = board.apply(mv((4, 6), (5, 7))).unwrap();
    assert_eq!(next.square(Coord::new(5, 7)), Some(Piece::king(Player::A)));
    assert_eq!(next.king_count(Player::A), 1);
    assert_consistent(&next);
}

#[test]
fn threat_detection() {
    let mut board = CheckersBoard::empty(Player::B);
    board.place(Coord::new(3, 3), Piece::normal(Player::A));
    board.place(Coord::new(4, 4), Piece::normal(Player::B));

    // B at (4,4) can jump to (2,2)
    assert!(board.is_threatened(Player::A, Coord::new(3, 3)));
    assert_eq!(board.threat_count(Player::A, Coord::new(3, 3)), 1);
    // the attacker itself is not threatened: A cannot jump backward... but A
    // moving forward can capture (4,4) by landing on (5,5)
    assert!(board.is_threatened(Player::B, Coord::new(4, 4)));

    // blocked landing square removes the threat
    board.place(Coord::new(2, 2), Piece::normal(Player::A));
    assert!(!board.is_threatened(Player::A, Coord::new(3, 3)));
}

#[test]
fn normal_piece_cannot_threaten_backward() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(3, 3), Piece::normal(Player::B));
    board.place(Coord::new(4, 4), Piece::normal(Player::A));

    // A at (4,4) only advances toward increasing y, so it cannot capture
    // toward (2,2)
    assert!(!board.is_threatened(Player::B, Coord::new(3, 3)));
}

#[test]
fn king_threatens_from_distance() {
    let mut board = CheckersBoard::empty(Player::B);
    board.place(Coord::new(3, 3), Piece::normal(Player::A));
    board.place(Coord::new(6, 6), Piece::king(Player::B));

    assert!(board.is_threatened(Player::A, Coord::new(3, 3)));

    // a piece between attacker and target blocks the threat; a normal piece
    // at distance two doesn't threaten either
    board.place(Coord::new(5, 5), Piece::normal(Player::B));
    assert!(!board.is_threatened(Player::A, Coord::new(3, 3)));
}

#[test]
fn stuck_normal_piece_at_edge() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(0, 6), Piece::normal(Player::A));
    board.place(Coord::new(1, 7), Piece::normal(Player::A));

    // the only forward step is occupied and no jump landing exists
    assert!(board.is_stuck(Player::A, Coord::new(0, 6)));
    // empty squares and enemy pieces are never "stuck"
    assert!(!board.is_stuck(Player::A, Coord::new(4, 4)));
    assert!(!board.is_stuck(Player::B, Coord::new(0, 6)));
}

#[test]
fn stuck_normal_piece_frees_up_with_capture() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(2, 2), Piece::normal(Player::A));
    board.place(Coord::new(1, 3), Piece::normal(Player::B));
    board.place(Coord::new(3, 3), Piece::normal(Player::B));

    // both forward steps blocked by enemies, but both jumps are open
    assert!(!board.is_stuck(Player::A, Coord::new(2, 2)));

    board.place(Coord::new(0, 4), Piece::normal(Player::B));
    board.place(Coord::new(4, 4), Piece::normal(Player::B));
    // now both landing squares are occupied too
    assert!(board.is_stuck(Player::A, Coord::new(2, 2)));
}

#[test]
fn stuck_king_all_directions_blocked() {
    // corner king behind an enemy with an occupied landing square
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(0, 0), Piece::king(Player::A));
    board.place(Coord::new(1, 1), Piece::normal(Player::B));
    board.place(Coord::new(2, 2), Piece::normal(Player::B));
    assert!(board.is_stuck(Player::A, Coord::new(0, 0)));

    // center king: two directions blocked by own pieces, two by enemies with
    // occupied landings
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(4, 4), Piece::king(Player::A));
    board.place(Coord::new(3, 5), Piece::normal(Player::A));
    board.place(Coord::new(5, 3), Piece::normal(Player::A));
    board.place(Coord::new(5, 5), Piece::normal(Player::B));
    board.place(Coord::new(6, 6), Piece::normal(Player::B));
    board.place(Coord::new(3, 3), Piece::normal(Player::B));
    board.place(Coord::new(2, 2), Piece::normal(Player::B));
    assert!(board.is_stuck(Player::A, Coord::new(4, 4)));

    // opening one landing square frees the king
    let mut open = CheckersBoard::empty(Player::A);
    open.place(Coord::new(4, 4), Piece::king(Player::A));
    open.place(Coord::new(3, 5), Piece::normal(Player::A));
    open.place(Coord::new(5, 3), Piece::normal(Player::A));
    open.place(Coord::new(5, 5), Piece::normal(Player::B));
    open.place(Coord::new(6, 6), Piece::normal(Player::B));
    open.place(Coord::new(3, 3), Piece::normal(Player::B));
    assert!(!open.is_stuck(Player::A, Coord::new(4, 4)));
}

#[test]
fn move_enumeration_matches_legality() {
    let board = CheckersBoard::new();

    let moves = board.legal_moves(Player::A);
    // 4 movable pieces on row 2, the edge piece has one move, the others two
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|&mv| board.is_legal_move(mv, Player::A)));

    // enumerated moves are exactly the legal ones among all square pairs
    let mut exhaustive = vec![];
    for from in Coord::all() {
        for to in Coord::all() {
            let candidate = Move::new(from, to);
            if board.is_legal_move(candidate, Player::A) {
                exhaustive.push(candidate);
            }
        }
    }
    let mut moves_sorted = moves;
    moves_sorted.sort();
    exhaustive.sort();
    assert_eq!(moves_sorted, exhaustive);
}

#[test]
fn attrition_terminal() {
    let mut board = CheckersBoard::empty(Player::A);
    board.place(Coord::new(2, 2), Piece::king(Player::A));
    board.place(Coord::new(3, 3), Piece::normal(Player::B));

    let next = board.apply(mv((2, 2), (4, 4))).unwrap();
    assert!(next.is_done());
    assert_eq!(next.winner(), Some(Player::A));
    assert_eq!(next.piece_count(Player::B), 0);
    assert_consistent(&next);
}

#[test]
fn move_fingerprints_nonzero_and_distinct() {
    let board = CheckersBoard::new();
    let moves = board.legal_moves(Player::A);

    let mut fingerprints: Vec<u64> = moves.iter().map(|m| m.fingerprint()).collect();
    fingerprints.sort_unstable();
    fingerprints.dedup();
    assert_eq!(fingerprints.len(), moves.len());
    assert!(fingerprints.iter().all(|&f| f != 0));
}
