//! Contains a builder for `Position`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Position`
///
/// Pieces and state can be set in any order; nothing is checked until
/// [`build`](#method.build) is called.
///
/// ```rust
/// use chess::{Color, Piece, PieceType, PositionBuilder, Square};
///
/// let pos = PositionBuilder::new()
///     .piece(Piece::new(Color::White, PieceType::King), Square::E1)
///     .piece(Piece::new(Color::Black, PieceType::King), Square::E8)
///     .piece(Piece::new(Color::White, PieceType::Rook), Square::A1)
///     .turn(Color::Black)
///     .build()?;
///
/// assert_eq!(pos.to_fen_str(), "4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    board: [Option<Piece>; Square::COUNT],
    turn: Color,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: usize,
    fullmove_number: usize,
}

impl PositionBuilder {
    /// Creates a new, empty `PositionBuilder`
    pub fn new() -> Self {
        PositionBuilder {
            board: [None; Square::COUNT],
            turn: White,
            castling_rights: CastlingRights::NONE,
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, piece: Piece, square: Square) -> &mut Self {
        self.board[square as usize] = Some(piece);
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.board[square as usize] = None;
        self
    }

    /// Sets the turn to `color`
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.turn = color;
        self
    }

    /// Sets the castling rights for both sides
    pub fn castling_rights(&mut self, rights: CastlingRights) -> &mut Self {
        self.castling_rights = rights;
        self
    }

    /// Sets or clears the en-passant square
    pub fn en_passant_square(&mut self, square: Option<Square>) -> &mut Self {
        self.ep_square = square;
        self
    }

    /// Sets the number of plies that count toward the 50-move rule. A ply is a move by one player,
    /// so two plies would be one move by each player.
    pub fn halfmove_clock(&mut self, plies: usize) -> &mut Self {
        self.halfmove_clock = plies;
        self
    }

    /// Sets the move number
    pub fn fullmove_number(&mut self, number: usize) -> &mut Self {
        self.fullmove_number = number;
        self
    }

    /// Validates legality and returns a `Position`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPositionEncoding` with the first problem found, checked in this
    /// order: king counts, piece counts, pawns on the first or last rank, a capturable king, an
    /// inconsistent en-passant square, then castling rights without the king and rook at home.
    pub fn build(&self) -> Result<Position> {
        use EncodingError::*;

        let mut pos = Position::empty_board();

        for (piece, &sq) in self.board.iter().zip(Square::ALL.iter()) {
            if let Some(piece) = piece {
                pos.occ_squares.insert(sq);
                pos.occ_by_color[piece.color as usize].insert(sq);
                pos.occ_by_piece[piece.color as usize][piece.piece_type as usize].insert(sq);
            }
        }

        pos.turn = self.turn;
        pos.castling_rights = self.castling_rights;
        pos.ep_square = self.ep_square;
        pos.halfmove_clock = self.halfmove_clock;
        pos.fullmove_number = self.fullmove_number;

        // Step 1: verify exactly one king per side
        for &c in &Color::ALL {
            if pos.occupied_by_piece(c, King).len() != 1 {
                return Err(InvalidKingCount.into());
            }
        }
        // Step 2: at most 16 pieces and 8 pawns per side
        for &c in &Color::ALL {
            if pos.occupied_by(c).len() > 16 || pos.occupied_by_piece(c, Pawn).len() > 8 {
                return Err(TooManyPieces.into());
            }
        }
        // Step 3: no pawns on ranks 1 and 8
        let edges = Bitboard::from(Rank::R1) | Rank::R8.into();
        if (pos.occupied_by_piece(White, Pawn) | pos.occupied_by_piece(Black, Pawn)).intersects(edges) {
            return Err(InvalidPawnRank.into());
        }
        // Step 4: opponent's king is not attacked
        if pos.square_attacked_by(pos.king_location(!pos.turn), pos.turn) {
            return Err(KingCapturable.into());
        }
        // Step 5: if there is an EP square, it must be empty and there must be a pawn to capture
        if let Some(ep_square) = pos.ep_square {
            if pos.occupied().contains(ep_square) {
                return Err(EnPassantSquareOccupied.into());
            }
            let ep_rank = if pos.turn == White { Rank::R6 } else { Rank::R3 };
            let passed_pawn = ep_square.offset(0, -pos.turn.forward());
            let has_pawn = passed_pawn
                .map_or(false, |sq| pos.occupied_by_piece(!pos.turn, Pawn).contains(sq));
            if ep_square.rank() != ep_rank || !has_pawn {
                return Err(MissingEnPassantPawn.into());
            }
        }
        // Step 6: if castling rights exist, king and rook must be in the correct squares
        for &c in &Color::ALL {
            let r = c.back_rank();
            let king_home = pos.occupied_by_piece(c, King).contains(Square::from_coord(File::E, r));
            let rooks = pos.occupied_by_piece(c, Rook);

            let king_side = CastlingRights::king_side(c);
            if pos.castling_rights.contains(king_side)
                && !(king_home && rooks.contains(Square::from_coord(File::H, r))) {
                return Err(InvalidCastlingRights.into());
            }
            let queen_side = CastlingRights::queen_side(c);
            if pos.castling_rights.contains(queen_side)
                && !(king_home && rooks.contains(Square::from_coord(File::A, r))) {
                return Err(InvalidCastlingRights.into());
            }
        }

        pos.finish_setup();
        Ok(pos)
    }
}

impl Default for PositionBuilder {
    fn default() -> Self {
        PositionBuilder::new()
    }
}

impl From<&Position> for PositionBuilder {
    /// Creates a builder holding everything in `pos`, so it can be modified and rebuilt
    fn from(pos: &Position) -> Self {
        let mut builder = PositionBuilder::new();
        for &sq in &Square::ALL {
            if let Some(piece) = pos.piece_at(sq) {
                builder.piece(piece, sq);
            }
        }
        builder.turn(pos.turn())
            .castling_rights(pos.castling_rights())
            .en_passant_square(pos.en_passant_square())
            .halfmove_clock(pos.halfmove_clock())
            .fullmove_number(pos.fullmove_number());
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_has_no_kings() {
        assert_eq!(PositionBuilder::new().build(),
            Err(Error::InvalidPositionEncoding(EncodingError::InvalidKingCount)));
    }

    #[test]
    fn rebuilding_a_position_gives_the_same_position() {
        let pos = Position::from_fen_str(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("valid fen");
        assert_eq!(PositionBuilder::from(&pos).build(), Ok(pos));
    }

    #[test]
    fn removing_a_rook_invalidates_its_castling_right() {
        let pos = Position::new();
        let mut builder = PositionBuilder::from(&pos);
        builder.clear(Square::H8);
        assert_eq!(builder.build(),
            Err(Error::InvalidPositionEncoding(EncodingError::InvalidCastlingRights)));

        let rights = CastlingRights::both_sides(White) | CastlingRights::BLACK_QUEEN_SIDE;
        let rebuilt = builder.castling_rights(rights).build().expect("valid position");
        assert_eq!(rebuilt.to_fen_str(), "rnbqkbn1/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQq - 0 1");
    }

    #[test]
    fn check_flag_is_computed() {
        let mut builder = PositionBuilder::new();
        builder.piece(Piece::new(White, King), Square::E1)
            .piece(Piece::new(Black, King), Square::E8)
            .piece(Piece::new(Black, Rook), Square::E4);
        assert!(builder.build().expect("valid position").in_check());
        assert_eq!(builder.turn(Black).build(),
            Err(Error::InvalidPositionEncoding(EncodingError::KingCapturable)));
    }
}
