//! Defines the error types used by the `chess` crate
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used throughout the `chess` crate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Failed to convert an integer to another type
    TryFromIntError,
    /// More than one legal move matches the description
    AmbiguousMove,
    /// The move is not legal in the current position
    IllegalMove,
    /// There is no move to take back
    NoMoveToUndo,
    /// The position encoding is malformed or describes an impossible position
    InvalidPositionEncoding(EncodingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string".fmt(f),
            TryFromIntError => "integer out of range".fmt(f),
            AmbiguousMove => "ambiguous move".fmt(f),
            IllegalMove => "illegal move".fmt(f),
            NoMoveToUndo => "no move to undo".fmt(f),
            InvalidPositionEncoding(reason) => write!(f, "invalid position: {}", reason),
        }
    }
}

impl std::error::Error for Error { }

impl From<EncodingError> for Error {
    fn from(reason: EncodingError) -> Self {
        Error::InvalidPositionEncoding(reason)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The reason a position encoding was rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The text does not follow Forsyth-Edwards Notation
    Syntax,
    /// Missing king or multiple kings of the same color
    InvalidKingCount,
    /// More than 16 pieces or more than 8 pawns for one side
    TooManyPieces,
    /// Pawn on first or last rank
    InvalidPawnRank,
    /// The side to move could capture the opponent's king
    KingCapturable,
    /// En-passant square is occupied
    EnPassantSquareOccupied,
    /// En-passant square without capturable pawn
    MissingEnPassantPawn,
    /// Castling rights aren't valid for this position
    InvalidCastlingRights,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EncodingError::*;

        match self {
            Syntax => "malformed FEN string",
            InvalidKingCount => "missing king or multiple kings of the same color",
            TooManyPieces => "too many pieces for one side",
            InvalidPawnRank => "pawn on first or last rank",
            KingCapturable => "king is under attack on opponent's move",
            EnPassantSquareOccupied => "en-passant square is occupied",
            MissingEnPassantPawn => "en-passant square without capturable pawn",
            InvalidCastlingRights => "castling rights aren't valid for this position",
        }.fmt(f)
    }
}

impl std::error::Error for EncodingError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` crate
pub type Result<T> = std::result::Result<T, Error>;
