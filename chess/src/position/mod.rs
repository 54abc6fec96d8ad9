//! Contains structures related to the `Position`.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::ops;
use std::str::FromStr;
use super::*;

use crate::bitboard::*;
use self::zobrist::Zobrist;
use self::builder::PositionBuilder;

use Color::*;
use PieceType::*;

/// The standard starting position in Forsyth-Edwards Notation
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The set of castling moves still permitted to each side
///
/// A right is lost for good once the king or the corresponding rook leaves its original square,
/// or the rook is captured there.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    pub const NONE: CastlingRights = CastlingRights(0);
    /// White may castle king-side
    pub const WHITE_KING_SIDE: CastlingRights = CastlingRights(0x1);
    /// White may castle queen-side
    pub const WHITE_QUEEN_SIDE: CastlingRights = CastlingRights(0x2);
    /// Black may castle king-side
    pub const BLACK_KING_SIDE: CastlingRights = CastlingRights(0x4);
    /// Black may castle queen-side
    pub const BLACK_QUEEN_SIDE: CastlingRights = CastlingRights(0x8);
    /// All four castling rights
    pub const ALL: CastlingRights = CastlingRights(0xf);

    /// The king-side right for `c`
    pub fn king_side(c: Color) -> CastlingRights {
        match c {
            White => CastlingRights::WHITE_KING_SIDE,
            Black => CastlingRights::BLACK_KING_SIDE,
        }
    }

    /// The queen-side right for `c`
    pub fn queen_side(c: Color) -> CastlingRights {
        match c {
            White => CastlingRights::WHITE_QUEEN_SIDE,
            Black => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Both rights for `c`
    pub fn both_sides(c: Color) -> CastlingRights {
        CastlingRights::king_side(c) | CastlingRights::queen_side(c)
    }

    /// The rights lost when a piece moves to or from `sq`
    pub fn revoked_by(sq: Square) -> CastlingRights {
        match sq {
            Square::A1 => CastlingRights::WHITE_QUEEN_SIDE,
            Square::E1 => CastlingRights::both_sides(White),
            Square::H1 => CastlingRights::WHITE_KING_SIDE,
            Square::A8 => CastlingRights::BLACK_QUEEN_SIDE,
            Square::E8 => CastlingRights::both_sides(Black),
            Square::H8 => CastlingRights::BLACK_KING_SIDE,
            _ => CastlingRights::NONE,
        }
    }

    /// Returns `true` if every right in `other` is also in `self`
    pub fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if there are no rights
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the rights in `other`
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    /// Removes the rights in `other`
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// Returns the raw flags: bit 0 `K`, bit 1 `Q`, bit 2 `k`, bit 3 `q`
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl ops::BitOr for CastlingRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        CastlingRights(self.0 | rhs.0)
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the rights as in Forsyth-Edwards Notation, eg. "KQkq", "Kq" or "-"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return "-".fmt(f);
        }

        let mut s = String::new();
        for (right, c) in &[
            (CastlingRights::WHITE_KING_SIDE, 'K'),
            (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
            (CastlingRights::BLACK_KING_SIDE, 'k'),
            (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
        ] {
            if self.contains(*right) {
                s.push(*c);
            }
        }
        s.fmt(f)
    }
}

impl FromStr for CastlingRights {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        } else if s.is_empty() {
            return Err(Error::ParseError);
        }

        let mut rights = CastlingRights::NONE;
        for c in s.chars() {
            let right = match c {
                'K' => CastlingRights::WHITE_KING_SIDE,
                'Q' => CastlingRights::WHITE_QUEEN_SIDE,
                'k' => CastlingRights::BLACK_KING_SIDE,
                'q' => CastlingRights::BLACK_QUEEN_SIDE,
                _ => return Err(Error::ParseError),
            };
            if rights.contains(right) {
                // repeated flag
                return Err(Error::ParseError);
            }
            rights.insert(right);
        }

        Ok(rights)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as well
/// as the side to move, castling availability, en passant legality and the move counters.
///
/// # Instantiation
/// There are three typical ways of creating a new `Position` structure.
///  -  The [`new`](#method.new) method creates a `Position` containing the standard starting
///     position.
///  -  The [`from_fen_str`](#method.from_fen_str) method (along with its synonyms `from_str` and
///     `str::parse`) creates a new `Position` from a string containing [Forsyth-Edwards Notation
///     (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///  -  Using a [`PositionBuilder`](struct.PositionBuilder.html).
///
/// # Making Moves
/// `Position` is a small `Copy` value. [`make_move`](#method.make_move) never modifies the
/// position it is called on; it returns the position after the move. This makes taking a move back
/// as simple as keeping the previous position around, which is what
/// [`Board`](struct.Board.html) does.
///
/// ```rust
/// use chess::Position;
///
/// let pos = Position::new();
///
/// for mv in pos.legal_moves() {
///     let new_pos = pos.make_move(mv)?;
///     assert_eq!(new_pos.turn(), !pos.turn());
/// }
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Position {
    zobrist: Zobrist,
    occ_squares: Bitboard,
    occ_by_color: [Bitboard; Color::COUNT],
    occ_by_piece: [[Bitboard; PieceType::COUNT]; Color::COUNT],
    turn: Color,

    in_check: bool,
    ep_square: Option<Square>,
    castling_rights: CastlingRights,

    halfmove_clock: usize,
    fullmove_number: usize,
}

impl Position {

    /// Returns the standard starting Position.
    pub fn new() -> Position {
        Position::from_fen_str(START_FEN).expect("INFALLIBLE")
    }

    /// Returns a position with an empty board, for use by `PositionBuilder`
    pub(crate) fn empty_board() -> Position {
        Position {
            zobrist: Zobrist::new(),
            occ_squares: Bitboard::new(),
            occ_by_color: [Bitboard::new(); Color::COUNT],
            occ_by_piece: [[Bitboard::new(); PieceType::COUNT]; Color::COUNT],
            turn: White,
            in_check: false,
            ep_square: None,
            castling_rights: CastlingRights::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse a position from a FEN string.
    ///
    /// The halfmove clock and fullmove number fields are optional, defaulting to 0 and 1. Any
    /// syntax error is reported as `EncodingError::Syntax`; a well-formed string describing an
    /// impossible position is rejected with the reason found by
    /// [`PositionBuilder::build`](struct.PositionBuilder.html#method.build).
    pub fn from_fen_str(s: &str) -> Result<Position> {
        let syntax = Error::InvalidPositionEncoding(EncodingError::Syntax);

        let mut builder = PositionBuilder::new();
        let mut fields = s.split_whitespace();

        // parse the board
        let board = fields.next().ok_or(syntax)?;
        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(syntax);
        }
        for (rank, row) in Rank::ALL.iter().rev().zip(ranks) {
            let mut f = 0;
            for c in row.chars() {
                match c {
                    '1' ..= '8' => f += c.to_digit(10).expect("INFALLIBLE") as usize,
                    _ => {
                        let file = File::ALL.get(f).ok_or(syntax)?;
                        let piece = Piece::from_fen_char(c).map_err(|_| syntax)?;
                        builder.piece(piece, Square::from_coord(*file, *rank));
                        f += 1;
                    }
                }
                if f > File::COUNT {
                    return Err(syntax);
                }
            }
            if f != File::COUNT {
                return Err(syntax);
            }
        }

        // parse the turn
        builder.turn(fields.next().ok_or(syntax)?.parse().map_err(|_| syntax)?);

        // parse the castling flags
        builder.castling_rights(fields.next().ok_or(syntax)?.parse().map_err(|_| syntax)?);

        // parse en passant square
        match fields.next() {
            Some("-") => {},
            Some(ep_square) => { builder.en_passant_square(Some(ep_square.parse().map_err(|_| syntax)?)); },
            None => return Err(syntax),
        }

        // parse half move clock, if present; counters are limited to 32 bits so they can always
        // be incremented
        if let Some(plies) = fields.next() {
            builder.halfmove_clock(plies.parse::<u32>().map_err(|_| syntax)? as usize);
        }

        // parse move number, if present
        if let Some(move_num) = fields.next() {
            let move_num = move_num.parse::<u32>().map_err(|_| syntax)?;
            if move_num == 0 {
                return Err(syntax);
            }
            builder.fullmove_number(move_num as usize);
        }

        if fields.next().is_some() {
            // extra fields
            return Err(syntax);
        }

        builder.build()
    }

    /// Converts the position to a FEN string.
    pub fn to_fen_str(&self) -> String {
        let mut board = String::new();

        for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                board.push('/');
            }

            let mut count = 0;
            for &file in &File::ALL {
                match self.piece_at(Square::from_coord(file, rank)) {
                    Some(piece) => {
                        if count > 0 {
                            board += &count.to_string();
                            count = 0;
                        }
                        board.push(piece.fen_char());
                    },
                    None => count += 1,
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
        }

        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, self.castling_rights, ep_square,
                                     self.halfmove_clock, self.fullmove_number)
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the en-passant target square, if any.
    ///
    /// This is the square skipped by a pawn which advanced two squares on the previous move,
    /// whether or not an enemy pawn is actually in position to capture it.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns `true` if the color to move is in check.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Returns the remaining castling rights for both sides.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the number of plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> usize {
        self.halfmove_clock
    }

    /// Returns the move number, which starts at 1 and increments after each move by Black.
    pub fn fullmove_number(&self) -> usize {
        self.fullmove_number
    }

    /// Returns a `Bitboard` of all occupied `Square`s.
    pub fn occupied(&self) -> Bitboard {
        self.occ_squares
    }

    /// Returns a `Bitboard` of `Square`s occupied by player `c`.
    pub fn occupied_by(&self, c: Color) -> Bitboard {
        self.occ_by_color[c as usize]
    }

    /// Returns a `Bitboard` of `Square`s occupied by pieces of type `p` and color `c`.
    pub fn occupied_by_piece(&self, c: Color, p: PieceType) -> Bitboard {
        self.occ_by_piece[c as usize][p as usize]
    }

    /// Returns a `Bitboard` of `Square`s occupied by pieces of type `p` of either color.
    fn occupied_by_type(&self, p: PieceType) -> Bitboard {
        self.occupied_by_piece(White, p) | self.occupied_by_piece(Black, p)
    }

    /// Returns the square where the king of the given color is located.
    pub fn king_location(&self, c: Color) -> Square {
        self.occupied_by_piece(c, King).first().expect("INFALLIBLE")
    }

    /// Returns the piece, if any, at the given location.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !self.occ_squares.contains(sq) {
            return None;
        }

        let color = if self.occupied_by(White).contains(sq) { White } else { Black };
        for &p in &PieceType::ALL {
            if self.occupied_by_piece(color, p).contains(sq) {
                return Some(Piece::new(color, p));
            }
        }

        unreachable!()
    }

    /// Return the position's Zobrist key.
    pub fn zobrist_key(&self) -> Zobrist {
        self.zobrist
    }

    /// Returns `true` if `other` is the same position for the purpose of repetition: the same
    /// pieces on the same squares, the same side to move, the same castling rights and the same
    /// en-passant target. The move counters are ignored.
    pub fn is_repetition_of(&self, other: &Position) -> bool {
        self.zobrist == other.zobrist
            && self.occ_by_piece == other.occ_by_piece
            && self.turn == other.turn
            && self.castling_rights == other.castling_rights
            && self.ep_square == other.ep_square
    }

    /// Returns `true` if neither side has enough material to deliver checkmate.
    ///
    /// A side lacks mating material when it has no pawns, rooks or queens and either has a bare
    /// king, a single knight against an opponent with only a king and queens, or only bishops all
    /// standing on squares of one color (with no knights or pawns on the board).
    pub fn insufficient_material(&self) -> bool {
        self.has_insufficient_material(White) && self.has_insufficient_material(Black)
    }

    /// Returns `true` if `c` cannot possibly deliver checkmate with its remaining pieces.
    pub fn has_insufficient_material(&self, c: Color) -> bool {
        let ours = self.occupied_by(c);
        let heavy = self.occupied_by_type(Pawn) | self.occupied_by_type(Rook)
            | self.occupied_by_type(Queen);

        if ours.intersects(heavy) {
            return false;
        }

        if ours.intersects(self.occupied_by_type(Knight)) {
            let theirs = self.occupied_by(!c);
            let harmless = self.occupied_by_piece(!c, King) | self.occupied_by_piece(!c, Queen);
            return ours.len() <= 2 && (theirs & !harmless).is_empty();
        }

        if ours.intersects(self.occupied_by_type(Bishop)) {
            let bishops = self.occupied_by_type(Bishop);
            let same_color = !bishops.intersects(DARK_SQUARES) || !bishops.intersects(LIGHT_SQUARES);
            return same_color
                && self.occupied_by_type(Pawn).is_empty()
                && self.occupied_by_type(Knight).is_empty();
        }

        true
    }

    /// Make the move, returning the resulting position.
    ///
    /// The move must be pseudo-legal in this position, as produced by
    /// [`pseudo_legal_moves`](#method.pseudo_legal_moves). Castling moves are not checked for
    /// castling out of or through check here; move generation takes care of that.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` if there is no piece of the side to move on the origin square,
    /// if the destination holds a piece of the side to move, or if the move would leave the
    /// mover's king in check.
    pub fn make_move(&self, mv: Move) -> Result<Position> {
        let us = self.turn;
        let them = !us;
        let mut pos = *self;

        let piece = match self.piece_at(mv.from()) {
            Some(piece) if piece.color == us => piece,
            _ => return Err(Error::IllegalMove),
        };

        // clear captured piece (including en passant)
        let capture_sq = if mv.kind() == MoveKind::EnPassantCapture {
            Square::from_coord(mv.to().file(), mv.from().rank())
        } else {
            mv.to()
        };
        let captured = self.piece_at(capture_sq);
        if let Some(captured) = captured {
            if captured.color == us {
                return Err(Error::IllegalMove);
            }
            pos.toggle_piece(captured, capture_sq);
        }

        // move piece to new location (update piece type if promotion)
        pos.toggle_piece(piece, mv.from());
        let placed = mv.promotion().map_or(piece, |pt| Piece::new(us, pt));
        pos.toggle_piece(placed, mv.to());

        // move rook for castling moves
        let rook_move = match mv.kind() {
            MoveKind::CastleKingSide => Some((File::H, File::F)),
            MoveKind::CastleQueenSide => Some((File::A, File::D)),
            _ => None,
        };
        if let Some((orig, dest)) = rook_move {
            let rank = us.back_rank();
            let rook = Piece::new(us, Rook);
            pos.toggle_piece(rook, Square::from_coord(orig, rank));
            pos.toggle_piece(rook, Square::from_coord(dest, rank));
        }

        // verify mover is not in check
        if pos.square_attacked_by(pos.king_location(us), them) {
            return Err(Error::IllegalMove);
        }

        // update en passant square
        if let Some(ep_sq) = pos.ep_square {
            pos.zobrist.toggle_ep_square(ep_sq);
        }
        pos.ep_square = if mv.kind() == MoveKind::DoublePawnPush {
            mv.from().offset(0, us.forward())
        } else {
            None
        };
        if let Some(ep_sq) = pos.ep_square {
            pos.zobrist.toggle_ep_square(ep_sq);
        }

        // update castling rights if applicable
        let mut rights = pos.castling_rights;
        rights.remove(CastlingRights::revoked_by(mv.from()));
        rights.remove(CastlingRights::revoked_by(mv.to()));
        if rights != pos.castling_rights {
            pos.zobrist.toggle_castling_rights(pos.castling_rights);
            pos.zobrist.toggle_castling_rights(rights);
            pos.castling_rights = rights;
        }

        // update move counters
        if captured.is_some() || piece.piece_type == Pawn {
            pos.halfmove_clock = 0;
        } else {
            pos.halfmove_clock = pos.halfmove_clock.saturating_add(1);
        }
        if us == Black {
            pos.fullmove_number = pos.fullmove_number.saturating_add(1);
        }

        // switch turns
        pos.turn = them;
        pos.zobrist.toggle_turn();
        pos.in_check = pos.square_attacked_by(pos.king_location(them), us);

        Ok(pos)
    }

    /// Adds or removes `piece` on `sq`, keeping the Zobrist key in step.
    pub(crate) fn toggle_piece(&mut self, piece: Piece, sq: Square) {
        self.occ_squares.toggle(sq);
        self.occ_by_color[piece.color as usize].toggle(sq);
        self.occ_by_piece[piece.color as usize][piece.piece_type as usize].toggle(sq);
        self.zobrist.toggle_piece_placement(piece, sq);
    }

    /// Recompute the derived state (check flag and Zobrist key) from scratch.
    pub(crate) fn finish_setup(&mut self) {
        self.zobrist = Zobrist::new();

        if self.turn == Black {
            self.zobrist.toggle_turn();
        }
        if let Some(ep_square) = self.ep_square {
            self.zobrist.toggle_ep_square(ep_square);
        }
        self.zobrist.toggle_castling_rights(self.castling_rights);

        for &c in &Color::ALL {
            for &p in &PieceType::ALL {
                for sq in self.occupied_by_piece(c, p) {
                    self.zobrist.toggle_piece_placement(Piece::new(c, p), sq);
                }
            }
        }

        self.in_check = self.square_attacked_by(self.king_location(self.turn), !self.turn);
    }

    /// Returns `true` if `sq` is attacked by a piece of color `c`.
    ///
    /// Attacks are pseudo-legal: a piece pinned to its own king still attacks.
    pub fn square_attacked_by(&self, sq: Square, c: Color) -> bool {
        let bishops = self.occupied_by_piece(c, Bishop);
        let rooks = self.occupied_by_piece(c, Rook);
        let queens = self.occupied_by_piece(c, Queen);

        bishop_attacks(sq, self.occ_squares).intersects(bishops | queens)
            || rook_attacks(sq, self.occ_squares).intersects(rooks | queens)
            || knight_attacks(sq).intersects(self.occupied_by_piece(c, Knight))
            || king_attacks(sq).intersects(self.occupied_by_piece(c, King))
            || pawn_attacks(!c, sq).intersects(self.occupied_by_piece(c, Pawn))
    }
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod zobrist;
pub mod builder;
mod movegen;
