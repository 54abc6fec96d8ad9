//! Provides data and functions used to compute attacks
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use super::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

// Directions are indexed in the same order as `KING_OFFSETS`. North, north-east, east and
// north-west run toward higher numbered squares.
const NORTH: usize = 0;
const NORTH_EAST: usize = 1;
const EAST: usize = 2;
const SOUTH_EAST: usize = 3;
const SOUTH: usize = 4;
const SOUTH_WEST: usize = 5;
const WEST: usize = 6;
const NORTH_WEST: usize = 7;

lazy_static! {
    static ref KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = jump_table(&KNIGHT_OFFSETS);
    static ref KING_ATTACKS: [Bitboard; Square::COUNT] = jump_table(&KING_OFFSETS);

    static ref PAWN_ATTACKS: [[Bitboard; Square::COUNT]; Color::COUNT] = {
        let mut table = [[Bitboard::new(); Square::COUNT]; Color::COUNT];
        for &color in &Color::ALL {
            for &sq in &Square::ALL {
                for &x in &[-1, 1] {
                    if let Some(dest) = sq.offset(x, color.forward()) {
                        table[color as usize][sq as usize].insert(dest);
                    }
                }
            }
        }
        table
    };

    /// Every square reachable from a square in one direction on an empty board, not including the
    /// square itself
    static ref RAYS: [[Bitboard; Square::COUNT]; 8] = {
        let mut table = [[Bitboard::new(); Square::COUNT]; 8];
        for (dir, &(x, y)) in KING_OFFSETS.iter().enumerate() {
            for &sq in &Square::ALL {
                let mut next = sq.offset(x, y);
                while let Some(dest) = next {
                    table[dir][sq as usize].insert(dest);
                    next = dest.offset(x, y);
                }
            }
        }
        table
    };
}

fn jump_table(offsets: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::new(); Square::COUNT];
    for &sq in &Square::ALL {
        for &(x, y) in offsets {
            if let Some(dest) = sq.offset(x, y) {
                table[sq as usize].insert(dest);
            }
        }
    }
    table
}

/// Attacks along one ray, stopping at (and including) the first occupied square
fn ray_attacks(sq: Square, dir: usize, occ: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occ;

    let blocker = if dir < SOUTH_EAST || dir == NORTH_WEST {
        blockers.first()
    } else {
        blockers.last()
    };

    match blocker {
        Some(blocker) => ray ^ RAYS[dir][blocker as usize],
        None => ray,
    }
}

/// Computes knight-like attacks to or from `sq`
///
/// See the module-level documentation for more information about
/// [this function](index.html#direct-attacks-knights-and-kings).
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Computes king-like attacks to or from `sq`
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Computes the squares attacked by a pawn of color `c` standing on `sq`
///
/// Looking the table up with the opposite color answers the reverse question: which squares a
/// pawn of color `c` would have to stand on to attack `sq`.
///
/// ```rust
/// use chess::{Color, Square};
/// use chess::bitboard::pawn_attacks;
///
/// let mut attacks = pawn_attacks(Color::Black, Square::E5);
/// assert_eq!(attacks.pop(), Some(Square::D4));
/// assert_eq!(attacks.pop(), Some(Square::F4));
/// assert_eq!(attacks.pop(), None);
/// ```
#[inline]
pub fn pawn_attacks(c: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[c as usize][sq as usize]
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares given by `occ`
///
/// See the module-level documentation for more information about
/// [this function](index.html#sliding-attacks-bishops-rooks-and-queens).
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, NORTH_EAST, occ)
        | ray_attacks(sq, SOUTH_EAST, occ)
        | ray_attacks(sq, SOUTH_WEST, occ)
        | ray_attacks(sq, NORTH_WEST, occ)
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares given by `occ`
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, NORTH, occ)
        | ray_attacks(sq, EAST, occ)
        | ray_attacks(sq, SOUTH, occ)
        | ray_attacks(sq, WEST, occ)
}

/// Computes queen-like attacks to or from `sq` based on the occupied squares given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}
