//! Game results and move text for a `Board`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The result of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// The given color has won.
    Win(Color, WinReason),
    /// The game has ended in a draw.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the PGN result token: "1-0", "0-1" or "1/2-1/2"
    pub fn score(self) -> &'static str {
        match self {
            GameResult::Win(Color::White, _) => "1-0",
            GameResult::Win(Color::Black, _) => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(_, reason) => format!("{} {{{}}}", self.score(), reason).fmt(f),
            GameResult::Draw(reason) => format!("{} {{{}}}", self.score(), reason).fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Win reason
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WinReason {
    /// The game was won by checkmate.
    Checkmate,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinReason::Checkmate => "checkmate".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Draw reason
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate
    Stalemate,
    /// Draw claimable by the fifty-move rule
    FiftyMoves,
    /// Draw claimable by three-fold repetition
    Repetition,
    /// Insufficient material
    Material,
    /// Automatic draw after 75 moves without a pawn move or capture
    SeventyFiveMoves,
    /// Automatic draw by five-fold repetition
    FivefoldRepetition,
}

impl DrawReason {
    /// Returns `true` for draws which only end the game when a player claims them
    pub fn is_claimable(self) -> bool {
        match self {
            DrawReason::FiftyMoves | DrawReason::Repetition => true,
            _ => false,
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Stalemate => "stalemate".fmt(f),
            DrawReason::FiftyMoves => "fifty-move rule".fmt(f),
            DrawReason::Repetition => "repetition".fmt(f),
            DrawReason::Material => "insufficient material".fmt(f),
            DrawReason::SeventyFiveMoves => "seventy-five-move rule".fmt(f),
            DrawReason::FivefoldRepetition => "five-fold repetition".fmt(f),
        }
    }
}

lazy_static! {
    static ref MOVE_NUMBER: Regex = Regex::new(r"\s+|\s*\d+\s*\.+\s*").expect("INFALLIBLE");
}

impl Board {
    /// Returns the result of the game if it is over, including draws which could be claimed.
    ///
    /// Conditions are checked in this order: checkmate, stalemate, fifty-move rule, three-fold
    /// repetition, insufficient material.
    pub fn outcome(&self) -> Option<GameResult> {
        if self.is_checkmate() {
            Some(GameResult::Win(!self.side_to_move(), WinReason::Checkmate))
        } else if self.is_stalemate() {
            Some(GameResult::Draw(DrawReason::Stalemate))
        } else if self.is_draw_by_fifty_moves() {
            Some(GameResult::Draw(DrawReason::FiftyMoves))
        } else if self.is_draw_by_repetition() {
            Some(GameResult::Draw(DrawReason::Repetition))
        } else if self.is_insufficient_material() {
            Some(GameResult::Draw(DrawReason::Material))
        } else {
            None
        }
    }

    /// Returns the result of the game if it is over without any claim being made.
    ///
    /// Conditions are checked in this order: checkmate, stalemate, seventy-five-move rule,
    /// five-fold repetition, insufficient material.
    pub fn forced_outcome(&self) -> Option<GameResult> {
        if self.is_checkmate() {
            Some(GameResult::Win(!self.side_to_move(), WinReason::Checkmate))
        } else if self.is_stalemate() {
            Some(GameResult::Draw(DrawReason::Stalemate))
        } else if self.is_seventy_five_moves() {
            Some(GameResult::Draw(DrawReason::SeventyFiveMoves))
        } else if self.is_fivefold_repetition() {
            Some(GameResult::Draw(DrawReason::FivefoldRepetition))
        } else if self.is_insufficient_material() {
            Some(GameResult::Draw(DrawReason::Material))
        } else {
            None
        }
    }

    /// Returns the moves played as numbered SAN, as in PGN (eg. "1. e4 e5 2. Nf3").
    ///
    /// If the first move was played by Black, it is numbered with an ellipsis ("5... Nf6").
    pub fn move_text(&self) -> String {
        let mut s = String::new();

        for (i, record) in self.history().iter().enumerate() {
            let pos = record.previous();
            if pos.turn() == Color::White {
                s += &format!("{}. ", pos.fullmove_number());
            } else if i == 0 {
                s += &format!("{}... ", pos.fullmove_number());
            }
            s += &record.mv().to_san(pos);
            s.push(' ');
        }
        s.pop(); // remove space from end of string

        s
    }

    /// Plays a line of moves given as text, such as "1. e4 e5 2. Nf3" or "e2e4 e7e5 g1f3".
    ///
    /// Move numbers and result tokens ("1-0", "0-1", "1/2-1/2", "*") are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first move which cannot be parsed or played and returns its error. Moves
    /// before it remain on the board.
    pub fn play_line(&mut self, text: &str) -> Result<()> {
        for mv in MOVE_NUMBER.split(text.trim()) {
            if mv.is_empty()
                || mv.starts_with('*')
                || mv.starts_with("1-0")
                || mv.starts_with("0-1")
                || mv.starts_with("1/2-1/2") {
                continue;
            }

            let mv = self.parse_move(mv)?;
            self.apply_move(mv)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_display() {
        assert_eq!(GameResult::Win(Color::White, WinReason::Checkmate).to_string(),
            "1-0 {checkmate}");
        assert_eq!(GameResult::Win(Color::Black, WinReason::Checkmate).to_string(),
            "0-1 {checkmate}");
        assert_eq!(GameResult::Draw(DrawReason::Material).to_string(),
            "1/2-1/2 {insufficient material}");
    }

    #[test]
    fn fools_mate() -> Result<()> {
        let mut board = Board::new();
        board.play_line("1. f3 e5 2. g4 Qh4#")?;

        assert_eq!(board.outcome(), Some(GameResult::Win(Color::Black, WinReason::Checkmate)));
        assert_eq!(board.forced_outcome(), board.outcome());
        assert_eq!(board.move_text(), "1. f3 e5 2. g4 Qh4#");
        Ok(())
    }

    #[test]
    fn move_text_starting_with_black() -> Result<()> {
        let mut board = Board::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")?;
        board.play_line("c5 Nf3 Nc6")?;
        assert_eq!(board.move_text(), "1... c5 2. Nf3 Nc6");
        Ok(())
    }

    #[test]
    fn stalemate_outcome() -> Result<()> {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")?;
        assert_eq!(board.outcome(), Some(GameResult::Draw(DrawReason::Stalemate)));
        Ok(())
    }

    #[test]
    fn claimable_draws_are_not_forced() -> Result<()> {
        let mut board = Board::new();
        board.play_line("Nf3 Nf6 Ng1 Ng8 Nf3 Nf6 Ng1 Ng8")?;

        assert_eq!(board.outcome(), Some(GameResult::Draw(DrawReason::Repetition)));
        assert!(DrawReason::Repetition.is_claimable());
        assert_eq!(board.forced_outcome(), None);
        Ok(())
    }

    #[test]
    fn fifty_moves_comes_before_material() -> Result<()> {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 80")?;
        assert_eq!(board.outcome(), Some(GameResult::Draw(DrawReason::FiftyMoves)));
        assert_eq!(board.forced_outcome(), Some(GameResult::Draw(DrawReason::Material)));
        Ok(())
    }

    #[test]
    fn play_line_stops_at_bad_move() {
        let mut board = Board::new();
        assert_eq!(board.play_line("1. e4 e5 2. Ke3"), Err(Error::IllegalMove));
        assert_eq!(board.history().len(), 2);
        assert_eq!(board.play_line("1-0"), Ok(()));
    }
}
