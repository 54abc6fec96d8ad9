//! Move generation for `Position`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

impl Position {
    /// Returns all pseudo-legal moves for the side to move.
    ///
    /// Pseudo-legal moves obey the movement rules of each piece but may leave the mover's own king
    /// in check. Castling is the exception: castling out of, through or into check is never
    /// generated. Use [`legal_moves`](#method.legal_moves) for fully legal moves.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        self.pawn_moves(&mut moves);
        self.castling_moves(&mut moves);
        for &piece in &[Knight, Bishop, Rook, Queen, King] {
            self.piece_moves(piece, &mut moves);
        }

        moves
    }

    /// Returns all legal moves for the side to move.
    ///
    /// ```rust
    /// use chess::Position;
    ///
    /// assert_eq!(Position::new().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_legal_moves().into_iter()
            .filter(|&mv| self.make_move(mv).is_ok())
            .collect()
    }

    /// Returns `true` if the side to move has at least one legal move.
    pub fn has_legal_moves(&self) -> bool {
        self.pseudo_legal_moves().into_iter().any(|mv| self.make_move(mv).is_ok())
    }

    fn pawn_moves(&self, moves: &mut Vec<Move>) {
        let us = self.turn;
        let forward = us.forward();
        let empty = !self.occupied();
        let enemies = self.occupied_by(!us);
        let last_rank = Bitboard::from((!us).back_rank());
        let start_rank = if us == White { Rank::R2 } else { Rank::R7 };

        for orig in self.occupied_by_piece(us, Pawn) {
            // captures, including en passant
            for dest in pawn_attacks(us, orig) {
                if enemies.contains(dest) {
                    push_pawn_move(moves, orig, dest, MoveKind::Capture, last_rank);
                } else if self.ep_square == Some(dest) {
                    moves.push(Move::new(orig, dest, None, MoveKind::EnPassantCapture));
                }
            }

            // advances
            if let Some(dest) = orig.offset(0, forward) {
                if empty.contains(dest) {
                    push_pawn_move(moves, orig, dest, MoveKind::Normal, last_rank);

                    if orig.rank() == start_rank {
                        if let Some(dest2) = dest.offset(0, forward) {
                            if empty.contains(dest2) {
                                moves.push(Move::new(orig, dest2, None, MoveKind::DoublePawnPush));
                            }
                        }
                    }
                }
            }
        }
    }

    fn castling_moves(&self, moves: &mut Vec<Move>) {
        let us = self.turn;
        if self.in_check {
            return;
        }

        let r = us.back_rank();
        let king = Square::from_coord(File::E, r);
        let sides = [
            (CastlingRights::king_side(us), File::H, &[File::F, File::G][..], File::G,
                MoveKind::CastleKingSide),
            (CastlingRights::queen_side(us), File::A, &[File::D, File::C, File::B][..], File::C,
                MoveKind::CastleQueenSide),
        ];

        for &(right, rook_file, between, king_dest, kind) in &sides {
            if !self.castling_rights.contains(right)
                || !self.occupied_by_piece(us, Rook).contains(Square::from_coord(rook_file, r)) {
                continue;
            }
            if between.iter().any(|&f| self.occupied().contains(Square::from_coord(f, r))) {
                continue;
            }
            // the king may not pass through or land on an attacked square (b1/b8 may be attacked)
            let path = [between[0], between[1]];
            if path.iter().any(|&f| self.square_attacked_by(Square::from_coord(f, r), !us)) {
                continue;
            }
            moves.push(Move::new(king, Square::from_coord(king_dest, r), None, kind));
        }
    }

    fn piece_moves(&self, piece: PieceType, moves: &mut Vec<Move>) {
        let us = self.turn;
        let occ = self.occupied();

        for orig in self.occupied_by_piece(us, piece) {
            let targets = match piece {
                Knight => knight_attacks(orig),
                Bishop => bishop_attacks(orig, occ),
                Rook => rook_attacks(orig, occ),
                Queen => queen_attacks(orig, occ),
                King => king_attacks(orig),
                Pawn => unreachable!(),
            } & !self.occupied_by(us);

            for dest in targets {
                let kind = if occ.contains(dest) { MoveKind::Capture } else { MoveKind::Normal };
                moves.push(Move::new(orig, dest, None, kind));
            }
        }
    }
}

/// Adds a pawn move, expanding it into all four promotions when it reaches the last rank
fn push_pawn_move(moves: &mut Vec<Move>, orig: Square, dest: Square, kind: MoveKind,
                  last_rank: Bitboard) {
    if last_rank.contains(dest) {
        for &promotion in &PieceType::PROMOTIONS {
            moves.push(Move::new(orig, dest, Some(promotion), kind));
        }
    } else {
        moves.push(Move::new(orig, dest, None, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(fen: &str) -> Vec<Move> {
        Position::from_fen_str(fen).expect("valid fen").legal_moves()
    }

    #[test]
    fn promotions_generate_four_moves() {
        let moves = legal("3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let e8: Vec<_> = moves.iter().filter(|mv| mv.to() == Square::E8).collect();
        let d8: Vec<_> = moves.iter().filter(|mv| mv.to() == Square::D8).collect();
        assert_eq!(e8.len(), 4);
        assert_eq!(d8.len(), 4);
        assert!(d8.iter().all(|mv| mv.is_capture()));
    }

    #[test]
    fn castling_through_check_is_not_generated() {
        // f8 rook covers f1
        let moves = legal("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.iter().any(|mv| mv.kind() == MoveKind::CastleKingSide));
        assert!(moves.iter().any(|mv| mv.kind() == MoveKind::CastleQueenSide));
    }

    #[test]
    fn queen_side_castling_allowed_with_b_file_attacked() {
        let moves = legal("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.iter().any(|mv| mv.kind() == MoveKind::CastleQueenSide));
    }

    #[test]
    fn castling_out_of_check_is_not_generated() {
        let moves = legal("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.iter().any(|mv| mv.is_castle()));
    }

    #[test]
    fn en_passant_is_generated() {
        let moves = legal("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        assert!(moves.iter().any(|mv| mv.kind() == MoveKind::EnPassantCapture
            && mv.from() == Square::E5 && mv.to() == Square::D6));
    }

    #[test]
    fn pinned_pieces_may_not_leave_the_pin() {
        let moves = legal("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|mv| mv.from() == Square::E2));
    }

    #[test]
    fn double_push_requires_both_squares_empty() {
        let moves = legal("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|mv| mv.from() == Square::E2));
    }
}
