//! Contains structure and data for Zobrist hash keys
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit hash key generated from a position
///
/// The key covers piece placement, the side to move, castling rights and the en-passant file, so
/// two positions which are the same for the purpose of repetition have the same key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Zobrist(u64);

impl Zobrist {
    /// Creates a new zobrist key
    pub fn new() -> Zobrist {
        Zobrist(0)
    }

    /// Toggles the placement of `piece` on `sq`
    pub fn toggle_piece_placement(&mut self, piece: Piece, sq: Square) {
        self.0 ^= KEYS.pieces[piece.color as usize][piece.piece_type as usize][sq as usize];
    }

    /// Toggles an en passant square
    pub fn toggle_ep_square(&mut self, sq: Square) {
        self.0 ^= KEYS.ep_files[sq.file() as usize];
    }

    /// Toggles castling rights
    pub fn toggle_castling_rights(&mut self, rights: CastlingRights) {
        self.0 ^= KEYS.castling[rights.bits() as usize];
    }

    /// Toggles whose turn it is
    pub fn toggle_turn(&mut self) {
        self.0 ^= KEYS.black_to_move;
    }
}

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

const SEED: u64 = 0x7469_6e62_6f61_7264;

struct Keys {
    pieces: [[[u64; Square::COUNT]; PieceType::COUNT]; Color::COUNT],
    ep_files: [u64; File::COUNT],
    castling: [u64; 16],
    black_to_move: u64,
}

lazy_static! {
    static ref KEYS: Keys = {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut keys = Keys {
            pieces: [[[0; Square::COUNT]; PieceType::COUNT]; Color::COUNT],
            ep_files: [0; File::COUNT],
            castling: [0; 16],
            black_to_move: rng.gen(),
        };

        for color in keys.pieces.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        for key in keys.ep_files.iter_mut() {
            *key = rng.gen();
        }

        // one key per right; a set of rights hashes to the XOR of its members
        let singles: [u64; 4] = rng.gen();
        for (flags, key) in keys.castling.iter_mut().enumerate() {
            for (bit, single) in singles.iter().enumerate() {
                if flags & (1 << bit) != 0 {
                    *key ^= single;
                }
            }
        }

        keys
    };
}
