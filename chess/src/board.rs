//! Contains the `Board`, a position together with the moves that led to it
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::str::FromStr;
use log::{debug, trace};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move that was played on a `Board`, with what is needed to take it back
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Record {
    mv: Move,
    captured: Option<Piece>,
    previous: Position,
}

impl Record {
    /// Returns the move that was played
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Returns the piece captured by the move, if any
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Returns the position the move was played from
    pub fn previous(&self) -> &Position {
        &self.previous
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A game board: the current position plus the history of moves played on it.
///
/// The board is the single source of truth for the game. It only accepts legal moves, can take
/// back any number of moves, and answers every question about the state of the game, such as
/// check, checkmate and the various draws.
///
/// Each `Board` is independent; any number may exist at once.
///
/// ```rust
/// use chess::Board;
///
/// let mut board = Board::new();
/// for text in &["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7"] {
///     let mv = board.parse_move(text)?;
///     board.apply_move(mv)?;
/// }
///
/// assert!(board.is_checkmate());
/// assert!(board.legal_moves().is_empty());
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    position: Position,
    history: Vec<Record>,
}

impl Board {
    /// Creates a board set up in the standard starting position
    pub fn new() -> Board {
        Board::default()
    }

    /// Creates a board from a position given in Forsyth-Edwards Notation
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPositionEncoding` if the string is malformed or describes an
    /// impossible position.
    pub fn from_fen(fen: &str) -> Result<Board> {
        Ok(Board::from(Position::from_fen_str(fen)?))
    }

    /// Returns the current position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the moves played on this board, oldest first
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    /// Returns the last move played, if any
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Returns the color whose turn it is
    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    /// Returns the remaining castling rights
    pub fn castling_rights(&self) -> CastlingRights {
        self.position.castling_rights()
    }

    /// Returns the square skipped by a pawn on the previous move, if any
    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant_square()
    }

    /// Returns the number of plies since the last pawn move or capture
    pub fn halfmove_clock(&self) -> usize {
        self.position.halfmove_clock()
    }

    /// Returns the move number
    pub fn fullmove_number(&self) -> usize {
        self.position.fullmove_number()
    }

    /// Returns the current position in Forsyth-Edwards Notation
    pub fn to_fen(&self) -> String {
        self.position.to_fen_str()
    }

    /// Returns the piece on `sq`, if any
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.piece_at(sq)
    }

    /// Returns all legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    /// Returns the legal move from `from` to `to`, if there is one.
    ///
    /// `promotion` selects the piece for a pawn reaching the last rank and must be `None` for any
    /// other move.
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PieceType>)
        -> Option<Move> {
        self.legal_moves().into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
    }

    /// Parses a move in coordinate notation or SAN and resolves it against the legal moves
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseError` if the text is not a move, `Error::IllegalMove` if no legal move
    /// matches, or `Error::AmbiguousMove` if several do.
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        MoveBuilder::from_str(text)?.resolve(&self.position)
    }

    /// Formats `mv` in Standard Algebraic Notation for the current position
    pub fn san(&self, mv: Move) -> String {
        mv.to_san(&self.position)
    }

    /// Plays `mv`, which must be one of the moves returned by
    /// [`legal_moves`](#method.legal_moves).
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` if `mv` is not legal, in which case the board is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        if !self.legal_moves().contains(&mv) {
            debug!("rejected move {} in {}", mv, self.position);
            return Err(Error::IllegalMove);
        }

        let captured = match mv.kind() {
            MoveKind::EnPassantCapture => Some(Piece::new(!self.side_to_move(), PieceType::Pawn)),
            _ => self.position.piece_at(mv.to()),
        };
        let next = self.position.make_move(mv)?;

        trace!("{} {}", self.history.len() + 1, mv);
        self.history.push(Record { mv, captured, previous: self.position });
        self.position = next;

        Ok(())
    }

    /// Takes back the last move, restoring the exact prior position, and returns the move.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoMoveToUndo` if no moves have been played.
    pub fn undo_move(&mut self) -> Result<Move> {
        let record = self.history.pop().ok_or(Error::NoMoveToUndo)?;

        trace!("undo {}", record.mv);
        self.position = record.previous;

        Ok(record.mv)
    }

    /// Returns `true` if `sq` is attacked by any piece of color `by`
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.position.square_attacked_by(sq, by)
    }

    /// Returns `true` if the side to move is in check
    pub fn is_check(&self) -> bool {
        self.position.in_check()
    }

    /// Returns `true` if the side to move is in check and has no legal moves
    pub fn is_checkmate(&self) -> bool {
        self.position.in_check() && !self.position.has_legal_moves()
    }

    /// Returns `true` if the side to move is not in check but has no legal moves
    pub fn is_stalemate(&self) -> bool {
        !self.position.in_check() && !self.position.has_legal_moves()
    }

    /// Returns `true` if a draw may be claimed under the fifty-move rule (100 plies without a pawn
    /// move or capture)
    pub fn is_draw_by_fifty_moves(&self) -> bool {
        self.position.halfmove_clock() >= 100
    }

    /// Returns `true` if 150 plies have passed without a pawn move or capture, which ends the game
    /// without a claim
    pub fn is_seventy_five_moves(&self) -> bool {
        self.position.halfmove_clock() >= 150
    }

    /// Returns the number of times the current position has occurred on this board, counting the
    /// current occurrence
    pub fn repetition_count(&self) -> usize {
        let current = &self.position;

        1 + self.history.iter()
            .filter(|record| record.previous.is_repetition_of(current))
            .count()
    }

    /// Returns `true` if the current position has occurred at least three times
    pub fn is_draw_by_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Returns `true` if the current position has occurred at least five times
    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// Returns `true` if neither side has enough material left to checkmate
    pub fn is_insufficient_material(&self) -> bool {
        self.position.insufficient_material()
    }
}

impl From<Position> for Board {
    /// Creates a board starting at `pos` with an empty history
    fn from(position: Position) -> Self {
        Board { position, history: Vec::new() }
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Creates a board from a position given in Forsyth-Edwards Notation
    fn from_str(s: &str) -> Result<Self> {
        Board::from_fen(s)
    }
}
