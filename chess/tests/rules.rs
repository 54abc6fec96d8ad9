//! Tests the rules of the game as seen through `Board`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use chess::*;

fn play(board: &mut Board, line: &str) {
    board.play_line(line).expect("legal line");
}

#[test]
fn initial_position_has_twenty_moves() {
    let board = Board::new();
    assert_eq!(board.legal_moves().len(), 20);
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.castling_rights(), CastlingRights::ALL);
    assert_eq!(board.en_passant_target(), None);
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);
    assert_eq!(board.to_fen(), START_FEN);
    assert_eq!(board.outcome(), None);
}

#[test]
fn scholars_mate() {
    let mut board = Board::new();
    play(&mut board, "1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7#");

    assert!(board.is_check());
    assert!(board.is_checkmate());
    assert!(!board.is_stalemate());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.outcome(), Some(GameResult::Win(Color::White, WinReason::Checkmate)));
    assert_eq!(board.move_text(), "1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7#");
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut board = Board::new();
    play(&mut board, "e4 Nf6 e5 d5");
    assert_eq!(board.en_passant_target(), Some(Square::D6));

    let mv = board.find_move(Square::E5, Square::D6, None).expect("en passant is legal");
    assert_eq!(mv.kind(), MoveKind::EnPassantCapture);

    board.apply_move(mv).expect("legal move");
    assert_eq!(board.piece_at(Square::D5), None);
    assert_eq!(board.piece_at(Square::D6), Some(Piece::new(Color::White, PieceType::Pawn)));
    assert_eq!(board.history()[4].captured(), Some(Piece::new(Color::Black, PieceType::Pawn)));

    board.undo_move().expect("move to undo");
    assert_eq!(board.piece_at(Square::D5), Some(Piece::new(Color::Black, PieceType::Pawn)));
    assert_eq!(board.piece_at(Square::E5), Some(Piece::new(Color::White, PieceType::Pawn)));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut board = Board::new();
    play(&mut board, "e4 Nf6 e5 d5 Nc3 Nc6");
    assert_eq!(board.en_passant_target(), None);
    assert_eq!(board.find_move(Square::E5, Square::D6, None), None);
}

#[test]
fn castling_rights_never_return() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    play(&mut board, "Ke2 Ke7 Ke1 Ke8");

    assert!(board.castling_rights().is_empty());
    assert!(board.legal_moves().iter().all(|mv| !mv.is_castle()));

    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    play(&mut board, "Rb1 Rb8 Ra1 Ra8");
    assert_eq!(board.castling_rights(),
        CastlingRights::WHITE_KING_SIDE | CastlingRights::BLACK_KING_SIDE);
    assert_eq!(board.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Kk - 4 3");
}

#[test]
fn threefold_repetition_on_third_occurrence() {
    let mut board = Board::new();
    play(&mut board, "Nf3 Nf6 Ng1 Ng8");
    assert_eq!(board.repetition_count(), 2);
    assert!(!board.is_draw_by_repetition());

    play(&mut board, "Nf3 Nf6 Ng1");
    assert!(!board.is_draw_by_repetition());

    play(&mut board, "Ng8");
    assert!(board.is_draw_by_repetition());

    board.undo_move().expect("move to undo");
    assert!(!board.is_draw_by_repetition());
}

#[test]
fn repetition_needs_the_same_rights() {
    // the first occurrence still had castling rights
    let mut board = Board::new();
    play(&mut board, "e4 e5 Ke2 Ke7 Ke1 Ke8 Ke2 Ke7 Ke1 Ke8");
    assert_eq!(board.repetition_count(), 2);
    assert!(!board.is_draw_by_repetition());
}

#[test]
fn halfmove_clock() {
    let mut board = Board::new();
    play(&mut board, "Nf3 Nf6");
    assert_eq!(board.halfmove_clock(), 2);
    play(&mut board, "e4");
    assert_eq!(board.halfmove_clock(), 0);
    play(&mut board, "Nxe4");
    assert_eq!(board.halfmove_clock(), 0);

    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("valid fen");
    assert!(!board.is_draw_by_fifty_moves());
    play(&mut board, "Ra2");
    assert!(board.is_draw_by_fifty_moves());
    assert_eq!(board.outcome(), Some(GameResult::Draw(DrawReason::FiftyMoves)));
}

#[test]
fn bare_kings_are_insufficient_material() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
    assert!(board.is_insufficient_material());
    assert_eq!(board.outcome(), Some(GameResult::Draw(DrawReason::Material)));

    let mut board = Board::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").expect("valid fen");
    assert!(!board.is_insufficient_material());
    play(&mut board, "Kxd2");
    assert!(board.is_insufficient_material());
}

#[test]
fn stalemate() {
    let board = Board::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").expect("valid fen");
    assert!(board.is_stalemate());
    assert!(!board.is_checkmate());
    assert!(!board.is_check());
}

#[test]
fn illegal_moves_leave_the_board_unchanged() {
    let mut board = Board::new();
    play(&mut board, "e4 e5");
    let before = board.clone();

    assert_eq!(board.parse_move("Ke3"), Err(Error::IllegalMove));
    let bogus = Move::new(Square::D1, Square::D5, None, MoveKind::Normal);
    assert_eq!(board.apply_move(bogus), Err(Error::IllegalMove));
    assert_eq!(board, before);
}

#[test]
fn undo_on_a_new_board() {
    let mut board = Board::new();
    assert_eq!(board.undo_move(), Err(Error::NoMoveToUndo));
}

#[test]
fn invalid_encodings_are_rejected() {
    assert_eq!(Board::from_fen("not a position"),
        Err(Error::InvalidPositionEncoding(EncodingError::Syntax)));
    assert_eq!("8/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>(),
        Err(Error::InvalidPositionEncoding(EncodingError::InvalidKingCount)));
}

/// Plays random games, checking the invariants that must hold after every move and that taking
/// every move back restores the starting board exactly.
#[test]
fn random_games_undo_exactly() {
    let mut rng = StdRng::seed_from_u64(2020);

    for _ in 0..20 {
        let mut board = Board::new();
        let mut positions = vec![*board.position()];

        for _ in 0..200 {
            assert!(!(board.is_checkmate() && board.is_stalemate()));

            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }

            let mv = moves[rng.gen_range(0, moves.len())];
            board.apply_move(mv).expect("legal move");
            positions.push(*board.position());

            let reparsed = Board::from_fen(&board.to_fen()).expect("valid fen");
            assert_eq!(reparsed.position(), board.position());
        }

        while let Some(expected) = positions.pop() {
            assert_eq!(board.position(), &expected);
            if board.undo_move().is_err() {
                break;
            }
        }
        assert!(positions.is_empty());
        assert_eq!(board, Board::new());
    }
}
