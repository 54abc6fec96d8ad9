//! Provides a set-of-squares representation of the pieces on the board
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! # Moves and Attacks
//! In addition to the [`Bitboard`](struct.Bitboard.html) type, the `bitboard` module provides
//! functions to compute the squares attacked by each kind of piece. For every piece except the
//! pawn, those are exactly the squares it may move to (ignoring squares held by its own side).
//!
//! ## Direct attacks (Knights and Kings)
//! Knights and kings jump straight to their destinations, so their attacks depend only on the
//! square they stand on:
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::knight_attacks;
//!
//! let corner = knight_attacks(Square::A8);
//! assert_eq!(corner.len(), 2);
//! assert!(corner.contains(Square::B6) && corner.contains(Square::C7));
//! ```
//!
//! ## Sliding Attacks (Bishops, Rooks and Queens)
//! Sliding pieces stop at the first occupied square along each line, so these functions take an
//! additional `Bitboard` of occupied squares. The blocking square itself is included, since it may
//! hold a piece that can be captured.
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::{Bitboard, rook_attacks};
//!
//! let blockers: Bitboard = [Square::H6, Square::F8].iter().copied().collect();
//! let squares: Vec<Square> = rook_attacks(Square::H8, blockers).into_iter().collect();
//! assert_eq!(squares, [Square::H6, Square::H7, Square::F8, Square::G8]);
//! ```
//!
//! ## Pawns
//! Pawn captures are looked up with [`pawn_attacks`](fn.pawn_attacks.html). Pawn advances for
//! many pawns at once can be computed with [`Bitboard::shift_xy`](struct.Bitboard.html#method.shift_xy),
//! which never wraps from one edge of the board to the other.
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::Bitboard;
//!
//! let pawns = Bitboard::from(Square::A7) | Square::H2.into();
//! let mut captures_toward_h = pawns.shift_xy(1, -1);
//! assert_eq!(captures_toward_h.pop(), Some(Square::B6));
//! assert_eq!(captures_toward_h.pop(), None);
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::iter::FusedIterator;
use std::iter::{FromIterator, Extend};
use std::ops;
use std::fmt;
use super::*;

mod attacks;
pub use attacks::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of squares with each bit representing one square
///
/// A `Bitboard` is a set of [`Square`](../enum.Square.html)s stored in a 64-bit integer, one bit
/// per square. Bit 0 is a1, bit 7 is h1 and bit 63 is h8:
///
/// ```text
///     a    b    c    d    e    f    g    h
///    ---------------------------------------
/// 8 | 56 | 57 | 58 | 59 | 60 | 61 | 62 | 63 | 8
///    ---------------------------------------
/// 7 | 48 | 49 | 50 | 51 | 52 | 53 | 54 | 55 | 7
///    ---------------------------------------
///   |                  ...                  |
///    ---------------------------------------
/// 2 | 08 | 09 | 10 | 11 | 12 | 13 | 14 | 15 | 2
///    ---------------------------------------
/// 1 | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 | 1
///    ---------------------------------------
///     a    b    c    d    e    f    g    h
/// ```
///
/// `Bitboard` implements the bit-wise operators `|`, `&`, `^`, `!`, `|=`, `&=` and `^=`, along
/// with the usual set methods (`insert`, `remove`, `contains`, `len`). It is `Copy`, and iterating
/// over it yields its squares in ascending order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

/// All dark squares (a1, c1, ..., h8)
pub const DARK_SQUARES: Bitboard = Bitboard(0xaa55_aa55_aa55_aa55);

/// All light squares (b1, d1, ..., g8)
pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55aa_55aa_55aa_55aa);

impl Bitboard {
    /// Creates a new, empty bitboard
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the number of squares in the bitboard
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the bitboard is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the bitboard contains `sq`
    pub fn contains(self, sq: Square) -> bool {
        self.intersects(sq.into())
    }

    /// Returns `true` if `self` intersects `other`
    pub fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Adds a square to the bitboard if it is not already present
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Removes a square from the bitboard if it is present
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Toggles a square in the bitboard
    pub fn toggle(&mut self, sq: Square) {
        *self ^= sq.into();
    }

    /// Returns the lowest-numbered square, if any
    pub fn first(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::ALL[self.0.trailing_zeros() as usize])
        }
    }

    /// Returns the highest-numbered square, if any
    pub fn last(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::ALL[63 - self.0.leading_zeros() as usize])
        }
    }

    /// Removes the lowest-numbered square from the bitboard and returns it
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.first();
        // clear the least significant bit
        self.0 &= self.0.wrapping_sub(1);
        sq
    }

    /// Returns a bitboard with all squares moved `x` files and `y` ranks
    ///
    /// Squares shifted off any edge of the board are dropped rather than wrapped.
    pub fn shift_xy(self, x: i8, y: i8) -> Bitboard {
        let mut keep = Bitboard::new();
        for &file in File::ALL.iter() {
            if (0..8).contains(&(file as i8 + x)) {
                keep |= file.into();
            }
        }

        let bits = (self & keep).0;
        let shift = x + 8 * y;
        if shift >= 0 {
            Bitboard(bits.checked_shl(shift as u32).unwrap_or(0))
        } else {
            Bitboard(bits.checked_shr(-shift as u32).unwrap_or(0))
        }
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Bitboard> for u64 {
    fn from(bb: Bitboard) -> u64 {
        bb.0
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(0x0101_0101_0101_0101 << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(0x0000_0000_0000_00ff << (8 * r as u64))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item=Square>>(iter: I) -> Self {
        let mut bd = Bitboard::new();
        bd.extend(iter);
        bd
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item=Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

/// Iterator over the squares of a `Bitboard`
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter { }

impl FusedIterator for IntoIter { }
