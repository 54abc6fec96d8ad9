//! The `chess` crate implements the rules of chess: board representation, legal move generation,
//! making and taking back moves, and detecting the end of the game.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! # Getting Started
//! Most users only need a [`Board`](struct.Board.html). A `Board` starts at the standard starting
//! position (or any position given in Forsyth-Edwards Notation), generates the legal moves for the
//! side to move, and keeps the history needed to undo moves and detect repetition.
//!
//! ```rust
//! use chess::{Board, Square};
//!
//! let mut board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let mv = board.find_move(Square::E2, Square::E4, None).expect("e4 is legal");
//! board.apply_move(mv)?;
//! assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//!
//! board.undo_move()?;
//! assert_eq!(board.position(), &chess::Position::new());
//! # Ok::<(), chess::Error>(())
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Both colors, in discriminant order
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// The direction pawns of this color advance along the y axis
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank on which this color's king and rooks start the game
    pub fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Color::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece, independent of its color
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// The number of piece types
    pub const COUNT: usize = PieceType::King as usize + 1;

    /// All piece types, in discriminant order
    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::Pawn, PieceType::Knight, PieceType::Bishop,
        PieceType::Rook, PieceType::Queen, PieceType::King,
    ];

    /// The piece types a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight,
    ];
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => "P",
            PieceType::Knight => "N",
            PieceType::Bishop => "B",
            PieceType::Rook => "R",
            PieceType::Queen => "Q",
            PieceType::King => "K",
        }.fmt(f)
    }
}

impl FromStr for PieceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P"|"p" => Ok(PieceType::Pawn),
            "N"|"n" => Ok(PieceType::Knight),
            "B"|"b" => Ok(PieceType::Bishop),
            "R"|"r" => Ok(PieceType::Rook),
            "Q"|"q" => Ok(PieceType::Queen),
            "K"|"k" => Ok(PieceType::King),
            _       => Err(Error::ParseError),
        }
    }
}

impl Default for PieceType {
    fn default() -> Self {
        PieceType::Pawn
    }
}

impl TryFrom<usize> for PieceType {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        PieceType::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<PieceType> for usize {
    fn from(value: PieceType) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece on the board: a [`PieceType`](enum.PieceType.html) together with its
/// [`Color`](enum.Color.html).
///
/// `Piece` is formatted and parsed using the letters of Forsyth-Edwards Notation: upper case for
/// white, lower case for black.
///
/// ```rust
/// use chess::{Color, Piece, PieceType};
///
/// let knight = Piece::new(Color::Black, PieceType::Knight);
/// assert_eq!(knight.to_string(), "n");
/// assert_eq!("Q".parse::<Piece>()?, Piece::new(Color::White, PieceType::Queen));
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    /// The side the piece belongs to
    pub color: Color,
    /// What kind of piece it is
    pub piece_type: PieceType,
}

impl Piece {
    /// Creates a new piece
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }

    /// Returns the piece's letter in Forsyth-Edwards Notation
    pub fn fen_char(self) -> char {
        let c = match self.piece_type {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };

        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a piece from its letter in Forsyth-Edwards Notation
    pub fn from_fen_char(c: char) -> Result<Piece> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let piece_type = c.to_string().parse()?;

        Ok(Piece::new(color, piece_type))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fen_char().fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_fen_char(c),
            _ => Err(Error::ParseError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// All files, from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::from(b'a' + *self as u8).fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [c @ b'a'..=b'h'] => File::try_from((c - b'a') as usize),
            [c @ b'A'..=b'H'] => File::try_from((c - b'A') as usize),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, numbered from bottom to top from `White`'s perspective as
/// `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// All ranks, from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::from(b'1' + *self as u8).fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [c @ b'1'..=b'8'] => Rank::try_from((c - b'1') as usize),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A square on the chess board
///
/// Squares are numbered rank by rank from White's side of the board, so `A1` is 0, `H1` is 7,
/// `A2` is 8 and `H8` is 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = 64;

    /// All squares, in discriminant order
    pub const ALL: [Square; Square::COUNT] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Returns the square at the given coordinates
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::ALL[((rank as usize) << 3) + file as usize]
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::ALL[(self as usize) & 7]
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::ALL[(self as usize) >> 3]
    }

    /// Returns the square `x` files and `y` ranks away, or `None` if that is off the board
    ///
    /// ```rust
    /// use chess::Square;
    ///
    /// assert_eq!(Square::E2.offset(0, 2), Some(Square::E4));
    /// assert_eq!(Square::H1.offset(1, 0), None);
    /// ```
    pub fn offset(self, x: i8, y: i8) -> Option<Square> {
        let file = self.file() as i8 + x;
        let rank = self.rank() as i8 + y;

        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::ALL[(rank * 8 + file) as usize])
        } else {
            None
        }
    }

    /// Returns `true` for light squares such as h1 and a8
    pub fn is_light(self) -> bool {
        (self.file() as usize + self.rank() as usize) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}{}", self.file(), self.rank()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() == 2 && s.is_char_boundary(1) {
            Ok(Square::from_coord(s[..1].parse()?, s[1..].parse()?))
        } else {
            Err(Error::ParseError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Square::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
pub mod error;
mod position;
mod moves;
mod board;
pub mod game;
pub mod variations;

pub use error::{Error, EncodingError, Result};
pub use position::{Position, CastlingRights, START_FEN};
pub use position::zobrist::Zobrist;
pub use position::builder::PositionBuilder;
pub use moves::{Move, MoveKind, MoveBuilder};
pub use board::{Board, Record};
pub use game::{GameResult, WinReason, DrawReason};


#[cfg(test)]
mod piece_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn piece_type_fromstr_accepts_either_case() {
        for (s, pt) in &[("p", PieceType::Pawn), ("N", PieceType::Knight), ("b", PieceType::Bishop),
                         ("R", PieceType::Rook), ("q", PieceType::Queen), ("K", PieceType::King)] {
            assert_eq!(s.parse::<PieceType>().unwrap(), *pt);
        }
        assert!("x".parse::<PieceType>().is_err());
        assert!(PieceType::try_from(6).is_err());
    }

    #[test]
    fn fen_letters_encode_color() {
        for &color in &Color::ALL {
            for &pt in &PieceType::ALL {
                let piece = Piece::new(color, pt);
                assert_eq!(Piece::from_fen_char(piece.fen_char()).unwrap(), piece);
            }
        }
        assert_eq!(Piece::new(Color::White, PieceType::King).to_string(), "K");
        assert_eq!(Piece::new(Color::Black, PieceType::Pawn).to_string(), "p");
        assert!(Piece::from_fen_char('x').is_err());
        assert!("Kk".parse::<Piece>().is_err());
    }
}
