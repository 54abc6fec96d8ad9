//! Contains structures to represent and parse moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;
use crate::bitboard::Bitboard;
use PieceType::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Any move to an empty square which is not castling or a two-square pawn advancement
    Normal,
    /// A move which captures a piece on the destination square
    Capture,
    /// An en passant capture
    EnPassantCapture,
    /// King-side castling (the king moves to the g-file)
    CastleKingSide,
    /// Queen-side castling (the king moves to the c-file)
    CastleQueenSide,
    /// A two-square pawn advancement
    DoublePawnPush,
}

impl Default for MoveKind {
    fn default() -> Self {
        MoveKind::Normal
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from one square to another.
///
/// A `Move` is a plain value; it is not tied to a position. Moves produced by
/// [`Board::legal_moves`](struct.Board.html#method.legal_moves) carry the correct `MoveKind`
/// and are the only ones `Board::apply_move` accepts.
///
/// Moves display in coordinate notation (eg. "g1f3", "e7e8q" or "e1g1"). Use
/// [`to_san`](#method.to_san) for Standard Algebraic Notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
    kind: MoveKind,
}

impl Move {
    /// Creates a new move
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>, kind: MoveKind) -> Move {
        Move { from, to, promotion, kind }
    }

    /// Returns the origin square
    pub fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square
    pub fn to(self) -> Square {
        self.to
    }

    /// Returns the piece type a pawn is promoted to, if this is a promotion
    pub fn promotion(self) -> Option<PieceType> {
        self.promotion
    }

    /// Returns the kind of move
    pub fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if the move captures a piece, including en passant
    pub fn is_capture(self) -> bool {
        match self.kind {
            MoveKind::Capture | MoveKind::EnPassantCapture => true,
            _ => false,
        }
    }

    /// Returns `true` for castling moves
    pub fn is_castle(self) -> bool {
        match self.kind {
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide => true,
            _ => false,
        }
    }

    /// Returns `true` for promotions
    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Formats the move in Standard Algebraic Notation (eg. "Nf3", "exd6", "e8=Q+" or "O-O").
    ///
    /// `pos` must be the position the move is made from. The origin is disambiguated by file, then
    /// rank, then full square, only when another piece of the same type could legally make the
    /// same move. A `+` or `#` suffix marks check or checkmate.
    ///
    /// ```rust
    /// use chess::{Position, MoveBuilder};
    ///
    /// let pos = Position::new();
    /// let mv = "g1f3".parse::<MoveBuilder>()?.resolve(&pos)?;
    /// assert_eq!(mv.to_san(&pos), "Nf3");
    /// # Ok::<(), chess::Error>(())
    /// ```
    pub fn to_san(self, pos: &Position) -> String {
        let mut s = match self.kind {
            MoveKind::CastleKingSide => "O-O".to_string(),
            MoveKind::CastleQueenSide => "O-O-O".to_string(),
            _ => self.san_body(pos),
        };

        if let Ok(next) = pos.make_move(self) {
            if next.in_check() {
                s.push(if next.has_legal_moves() { '+' } else { '#' });
            }
        }

        s
    }

    fn san_body(self, pos: &Position) -> String {
        let piece = pos.piece_at(self.from).map_or(Pawn, |pc| pc.piece_type);
        let mut s = String::new();

        if piece == Pawn {
            if self.is_capture() {
                s += &self.from.file().to_string();
            }
        } else {
            s += &piece.to_string();

            let eligible: Bitboard = pos.legal_moves().into_iter()
                .filter(|mv| mv.to == self.to && mv.from != self.from)
                .filter(|mv| pos.piece_at(mv.from).map(|pc| pc.piece_type) == Some(piece))
                .map(|mv| mv.from)
                .collect();

            if !eligible.is_empty() {
                if !eligible.intersects(self.from.file().into()) {
                    s += &self.from.file().to_string();
                } else if !eligible.intersects(self.from.rank().into()) {
                    s += &self.from.rank().to_string();
                } else {
                    s += &self.from.to_string();
                }
            }
        }

        if self.is_capture() {
            s.push('x');
        }

        s += &self.to.to_string();

        if let Some(promotion) = self.promotion {
            s.push('=');
            s += &promotion.to_string();
        }

        s
    }
}

impl fmt::Display for Move {
    /// Writes the move in coordinate notation (eg. "g1f3", "e7e8q", or "e1g1")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{}{}", self.from, self.to);

        if let Some(promotion) = self.promotion {
            s += &promotion.to_string().to_lowercase();
        }

        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A partial description of a move, to be resolved against a position
///
/// Each field left unset matches anything, with one exception: when neither a piece nor a full
/// origin square is given the piece is taken to be a pawn, as in Standard Algebraic Notation.
///
/// `MoveBuilder` can be used to parse a `Move` from a string in coordinate notation or SAN.
///
/// ```rust
/// use chess::{Position, MoveBuilder, Square};
///
/// let pos = Position::new();
/// let move_str = "Nf3"; // string would usually come from a user
///
/// let mv = move_str.parse::<MoveBuilder>()?.resolve(&pos)?;
/// assert_eq!(mv.from(), Square::G1);
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveBuilder {
    piece: Option<PieceType>,
    orig_file: Option<File>,
    orig_rank: Option<Rank>,
    dest: Option<Square>,
    promotion: Option<PieceType>,
    castle: Option<MoveKind>,
}

impl MoveBuilder {
    /// Creates a new MoveBuilder
    pub fn new() -> Self {
        MoveBuilder {
            piece: None,
            orig_file: None,
            orig_rank: None,
            dest: None,
            promotion: None,
            castle: None,
        }
    }

    /// Sets the piece
    pub fn piece(&mut self, piece: PieceType) -> &mut Self {
        self.piece = Some(piece);
        self
    }

    /// Sets the origin
    pub fn origin(&mut self, orig: Square) -> &mut Self {
        self.orig_file = Some(orig.file());
        self.orig_rank = Some(orig.rank());
        self
    }

    /// Sets the origin file
    pub fn origin_file(&mut self, file: File) -> &mut Self {
        self.orig_file = Some(file);
        self
    }

    /// Sets the origin rank
    pub fn origin_rank(&mut self, rank: Rank) -> &mut Self {
        self.orig_rank = Some(rank);
        self
    }

    /// Sets the destination
    pub fn destination(&mut self, dest: Square) -> &mut Self {
        self.dest = Some(dest);
        self
    }

    /// Sets or clears the promotion piece
    pub fn promotion(&mut self, promotion: Option<PieceType>) -> &mut Self {
        self.promotion = promotion;
        self
    }

    /// Sets this as a king-side castling move
    pub fn castle_king_side(&mut self) -> &mut Self {
        *self = MoveBuilder::new();
        self.castle = Some(MoveKind::CastleKingSide);
        self
    }

    /// Sets this as a queen-side castling move
    pub fn castle_queen_side(&mut self) -> &mut Self {
        *self = MoveBuilder::new();
        self.castle = Some(MoveKind::CastleQueenSide);
        self
    }

    /// Returns every legal move in `pos` matching the description
    pub fn candidates(&self, pos: &Position) -> Vec<Move> {
        pos.legal_moves().into_iter().filter(|&mv| self.matches(pos, mv)).collect()
    }

    /// Returns the single legal move in `pos` matching the description
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` if no legal move matches, or `Error::AmbiguousMove` if more
    /// than one does (such as a pawn reaching the last rank without a promotion piece).
    pub fn resolve(&self, pos: &Position) -> Result<Move> {
        let candidates = self.candidates(pos);

        match candidates.as_slice() {
            [] => Err(Error::IllegalMove),
            [mv] => Ok(*mv),
            _ => Err(Error::AmbiguousMove),
        }
    }

    fn matches(&self, pos: &Position, mv: Move) -> bool {
        if let Some(kind) = self.castle {
            return mv.kind == kind;
        }

        if self.dest != Some(mv.to)
            || self.orig_file.map_or(false, |file| file != mv.from.file())
            || self.orig_rank.map_or(false, |rank| rank != mv.from.rank()) {
            return false;
        }

        if let Some(promotion) = self.promotion {
            if mv.promotion != Some(promotion) {
                return false;
            }
        }

        let moved = pos.piece_at(mv.from).map(|pc| pc.piece_type);
        match (self.piece, self.orig_file, self.orig_rank) {
            (Some(piece), _, _) => moved == Some(piece),
            (None, Some(_), Some(_)) => true,
            _ => moved == Some(Pawn),
        }
    }
}

lazy_static! {
    static ref CASTLE_REGEX: Regex = Regex::new(r"^(O-O-O|0-0-0|O-O|0-0)[+#]*[!?]*$")
        .expect("INFALLIBLE");
    static ref MOVE_REGEX: Regex = Regex::new(
        r"^([NBRQK])?([a-h])?([1-8])?[-x]?([a-h][1-8])(?:=?([NBRQnbrq]))?[+#]*[!?]*$")
        .expect("INFALLIBLE");
}

impl FromStr for MoveBuilder {
    type Err = Error;

    /// Parses coordinate notation ("e2e4", "e7e8q") or Standard Algebraic Notation ("Nf3", "exd6",
    /// "e8=Q", "O-O"). Check and checkmate marks and annotations ("!", "?!") are accepted and
    /// ignored.
    fn from_str(s: &str) -> Result<MoveBuilder> {
        let mut builder = MoveBuilder::new();
        let s = s.trim();

        // handle PGN/SAN-style castling notation
        if let Some(caps) = CASTLE_REGEX.captures(s) {
            match &caps[1] {
                "O-O" | "0-0" => builder.castle_king_side(),
                _ => builder.castle_queen_side(),
            };
            return Ok(builder);
        }

        let caps = MOVE_REGEX.captures(s).ok_or(Error::ParseError)?;

        if let Some(piece) = caps.get(1) {
            builder.piece(piece.as_str().parse()?);
        }
        if let Some(file) = caps.get(2) {
            builder.origin_file(file.as_str().parse()?);
        }
        if let Some(rank) = caps.get(3) {
            builder.origin_rank(rank.as_str().parse()?);
        }
        builder.destination(caps[4].parse()?);
        if let Some(promotion) = caps.get(5) {
            builder.promotion(Some(promotion.as_str().parse()?));
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(fen: &str, text: &str) -> Result<Move> {
        let pos: Position = fen.parse()?;
        text.parse::<MoveBuilder>()?.resolve(&pos)
    }

    #[test]
    fn bishop_to_c3() -> Result<()> {
        let pos = "r3k2r/p1ppqp2/Bn2pbp1/3PN3/4P3/2p4p/PPPB1PPP/R3K2R w KQkq - 0 3".parse()?;
        let mv = "Bc3".parse::<MoveBuilder>()?.resolve(&pos)?;

        assert_eq!(mv.from(), Square::D2);
        assert_eq!(mv.kind(), MoveKind::Capture);
        assert_eq!(mv.to_san(&pos), "Bxc3");

        Ok(())
    }

    #[test]
    fn resolve_e4() -> Result<()> {
        let pos = Position::default();
        let mv = "e4".parse::<MoveBuilder>()?.resolve(&pos)?;

        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.kind(), MoveKind::DoublePawnPush);

        let pos = "r1bqkbnr/pppp1ppp/2n5/8/8/4PN2/PPP1PPPP/RNBQKB1R w KQkq - 1 5".parse()?;
        let mv = "e4".parse::<MoveBuilder>()?.resolve(&pos)?;

        assert_eq!(mv.from(), Square::E3);

        Ok(())
    }

    #[test]
    fn resolve_from_squares() -> Result<()> {
        let pos = Position::default();
        let mv = MoveBuilder::new().origin(Square::G1).destination(Square::F3).resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "Nf3");

        let pos = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse()?;
        let mv = MoveBuilder::new()
            .origin(Square::A7)
            .destination(Square::A8)
            .promotion(Some(Rook))
            .resolve(&pos)?;
        assert_eq!(mv.promotion(), Some(Rook));

        assert_eq!(MoveBuilder::new().origin(Square::E1).destination(Square::E3).resolve(&pos),
            Err(Error::IllegalMove));

        Ok(())
    }

    #[test]
    fn annotations_are_ignored() -> Result<()> {
        let pos = Position::default();
        for text in &["e4!", "e4?", "e4!!", "e4?!", "e4!?", "e2e4??"] {
            assert_eq!(resolve(START_FEN, text)?.to_san(&pos), "e4", "{:?}", text);
        }

        let pos = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(resolve(pos, "O-O!")?.kind(), MoveKind::CastleKingSide);
        assert_eq!(resolve(pos, "O-O-O+?!")?.kind(), MoveKind::CastleQueenSide);

        Ok(())
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        for text in &["", "e9", "Xe4", "e2e4e6", "O-O-O-O", "i1"] {
            assert_eq!(text.parse::<MoveBuilder>(), Err(Error::ParseError), "{:?}", text);
        }
    }

    #[test]
    fn illegal_and_ambiguous_moves() {
        assert_eq!(resolve(START_FEN, "e5"), Err(Error::IllegalMove));
        assert_eq!(resolve(START_FEN, "O-O"), Err(Error::IllegalMove));
        assert_eq!(resolve("4k3/8/8/8/8/8/8/2N1K1N1 w - - 0 1", "Ne2"), Err(Error::AmbiguousMove));
        assert_eq!(resolve("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a8"), Err(Error::AmbiguousMove));
    }

    #[test]
    fn coordinate_notation() -> Result<()> {
        let mv = resolve("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8n")?;
        assert_eq!(mv.promotion(), Some(Knight));
        assert_eq!(mv.to_string(), "a7a8n");

        let mv = resolve("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1")?;
        assert_eq!(mv.kind(), MoveKind::CastleKingSide);
        Ok(())
    }

    #[test]
    fn castling_text() -> Result<()> {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
        assert_eq!(resolve(fen, "O-O")?.to(), Square::G8);
        assert_eq!(resolve(fen, "0-0-0")?.to(), Square::C8);
        Ok(())
    }

    #[test]
    fn san_disambiguation() -> Result<()> {
        // knights on c1 and g1 can both reach e2
        let pos: Position = "4k3/8/8/8/8/8/8/2N1K1N1 w - - 0 1".parse()?;
        let mv = "Nce2".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.from(), Square::C1);
        assert_eq!(mv.to_san(&pos), "Nce2");

        // rooks on the same file
        let pos: Position = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1".parse()?;
        let mv = "R1a3".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "R1a3");

        // queens needing the full square
        let pos: Position = "7k/8/8/8/Q1Q5/8/Q7/4K3 w - - 0 1".parse()?;
        let mv = "Qa4b3".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "Qa4b3");
        Ok(())
    }

    #[test]
    fn san_check_and_mate_suffixes() -> Result<()> {
        let pos: Position = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse()?;
        let mv = "Qxf7".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "Qxf7#");

        let pos: Position = "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1".parse()?;
        let mv = "Ra8".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "Ra8+");
        Ok(())
    }

    #[test]
    fn san_pawn_moves() -> Result<()> {
        let pos: Position = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3".parse()?;
        let mv = "exd6".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.kind(), MoveKind::EnPassantCapture);
        assert_eq!(mv.to_san(&pos), "exd6");

        let pos: Position = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse()?;
        let mv = "axb8=Q".parse::<MoveBuilder>()?.resolve(&pos)?;
        assert_eq!(mv.to_san(&pos), "axb8=Q+");
        Ok(())
    }
}
