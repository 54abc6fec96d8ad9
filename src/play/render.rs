//! Text diagrams of the board
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use chess::{Board, Color, File, Piece, PieceType, Rank, Square};

/// How a board diagram is drawn
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// Use Unicode chess symbols instead of FEN letters
    pub unicode: bool,
    /// Draw the board from Black's side
    pub flip: bool,
}

const BORDER: &str = "  +-----------------+";

/// Returns the character used to draw `piece`
pub fn piece_char(piece: Piece, unicode: bool) -> char {
    if !unicode {
        return piece.fen_char();
    }

    match (piece.color, piece.piece_type) {
        (Color::White, PieceType::King) => '♔',
        (Color::White, PieceType::Queen) => '♕',
        (Color::White, PieceType::Rook) => '♖',
        (Color::White, PieceType::Bishop) => '♗',
        (Color::White, PieceType::Knight) => '♘',
        (Color::White, PieceType::Pawn) => '♙',
        (Color::Black, PieceType::King) => '♚',
        (Color::Black, PieceType::Queen) => '♛',
        (Color::Black, PieceType::Rook) => '♜',
        (Color::Black, PieceType::Bishop) => '♝',
        (Color::Black, PieceType::Knight) => '♞',
        (Color::Black, PieceType::Pawn) => '♟',
    }
}

/// Draws the board as an 8x8 diagram with rank and file labels, followed by the last move played
/// (if any) and the side to move.
pub fn render(board: &Board, style: Style) -> String {
    let mut ranks = Rank::ALL;
    let mut files = File::ALL;
    if style.flip {
        files.reverse();
    } else {
        ranks.reverse();
    }

    let mut s = String::new();
    s += BORDER;
    s.push('\n');

    for &rank in ranks.iter() {
        s += &format!("{} |", rank);
        for &file in files.iter() {
            s.push(' ');
            s.push(match board.piece_at(Square::from_coord(file, rank)) {
                Some(piece) => piece_char(piece, style.unicode),
                None => '.',
            });
        }
        s += " |\n";
    }

    s += BORDER;
    s += "\n   ";
    for &file in files.iter() {
        s.push(' ');
        s += &file.to_string();
    }
    s.push('\n');

    if let Some(record) = board.history().last() {
        let pos = record.previous();
        let dots = if pos.turn() == Color::White { "." } else { "..." };
        s += &format!("Last move: {}{} {}\n",
            pos.fullmove_number(), dots, record.mv().to_san(pos));
    }

    let turn = match board.side_to_move() {
        Color::White => "White",
        Color::Black => "Black",
    };
    s += &format!("{} to move\n", turn);

    s
}
