//! A line-oriented text session for playing a game on a single board
//!
//! Each line of input is either a command (`undo`, `new`, `board`...) or a move in coordinate
//! notation or Standard Algebraic Notation. The session contains no rules of its own: every
//! question about the game is answered by the `chess` crate.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::{BufRead, Write};
use std::str::FromStr;
use log::{debug, info, trace};
use lazy_static::lazy_static;
use regex::{Regex, RegexSet};
use chess::{Board, DrawReason, GameResult, Move, MoveBuilder, PieceType, WinReason};
use crate::config::Settings;
use crate::Error;

pub mod render;

pub use self::render::Style;

const HELP: &str = "\
Commands:
  <move>      play a move, such as e2e4, e7e8q, Nf3, exd5, e8=Q or O-O
  undo        take back the last move
  new [FEN]   start a new game, from the standard position or the given FEN
  moves       list the legal moves
  board       show the board
  fen         show the position in Forsyth-Edwards Notation
  history     show the moves played so far
  help        show this message
  quit        end the session";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Commands accepted by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ends the session.
    Quit,
    /// Takes back the last move.
    Undo,
    /// Starts a new game from the standard position, or from the given FEN.
    New(Option<String>),
    /// Lists the legal moves.
    Moves,
    /// Shows the board.
    Board,
    /// Shows the FEN of the current position.
    Fen,
    /// Shows the moves played so far.
    History,
    /// Shows the list of commands.
    Help,
    /// Plays the given move.
    Move(String),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(ind) = COMMAND_SET.matches(s).iter().next() {
            let args = COMMAND_VEC[ind].captures(s).expect("INFALLIBLE");

            match ind {
                0 => Ok(Command::Quit),
                1 => Ok(Command::Undo),
                2 => Ok(Command::New(args.get(1).map(|fen| fen.as_str().to_string()))),
                3 => Ok(Command::Moves),
                4 => Ok(Command::Board),
                5 => Ok(Command::Fen),
                6 => Ok(Command::History),
                7 => Ok(Command::Help),
                8 => Ok(Command::Move(args.get(1).expect("INFALLIBLE").as_str().to_string())),
                _ => unreachable!(),
            }
        } else {
            Err(Error(format!("Error (unknown command): {}", s)))
        }
    }
}

const COMMANDS: [&str; 9] = [
    r"^(?:quit|exit)$",
    r"^undo$",
    r"^new(?:\s+(.+))?$",
    r"^moves$",
    r"^board$",
    r"^fen$",
    r"^history$",
    r"^(?:help|\?)$",
    r"^(\S+)$",
];

lazy_static! {
    static ref COMMAND_SET: RegexSet = RegexSet::new(&COMMANDS).expect("INFALLIBLE");
    static ref COMMAND_VEC: Vec<Regex> = {
        let mut cmd_vec = Vec::new();
        for cmd in &COMMANDS {
            cmd_vec.push(Regex::new(cmd).expect("INFALLIBLE"));
        }
        cmd_vec
    };
}

/// The message announcing the end of a game
pub fn result_message(result: GameResult) -> &'static str {
    match result {
        GameResult::Win(_, WinReason::Checkmate) => "Checkmate!",
        GameResult::Draw(DrawReason::Stalemate) => "Stalemate!",
        GameResult::Draw(DrawReason::FiftyMoves) => "50-move rule draw!",
        GameResult::Draw(DrawReason::Repetition) => "Threefold repetition draw!",
        GameResult::Draw(DrawReason::Material) => "Draw by insufficient material!",
        GameResult::Draw(DrawReason::SeventyFiveMoves) => "75-move rule draw!",
        GameResult::Draw(DrawReason::FivefoldRepetition) => "Fivefold repetition draw!",
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A game played through text commands read from `input`, with responses written to `output`
#[derive(Debug)]
pub struct Session<R, W> {
    input: R,
    output: W,
    board: Board,
    settings: Settings,
    result: Option<GameResult>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session starting from the standard position
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Session::with_board(input, output, settings, Board::new())
    }

    /// Creates a session starting from the given board
    pub fn with_board(input: R, output: W, settings: Settings, board: Board) -> Self {
        let mut session = Session { input, output, board, settings, result: None };
        session.result = session.status();
        session
    }

    /// The board being played on
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The result of the game, if it is over
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Everything written so far
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Shows the board, then executes commands until `quit` or the end of the input.
    pub fn run(&mut self) -> Result<(), Error> {
        self.show_board()?;
        if let Some(result) = self.result {
            self.announce(result)?;
        }

        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                continue;
            }

            match line.parse() {
                Ok(cmd) => {
                    if !self.execute(cmd)? {
                        break;
                    }
                },
                Err(err) => {
                    debug!("{}", err);
                    self.say(&err.to_string())?;
                },
            }
        }

        info!("session ended");
        Ok(())
    }

    /// Executes a single command. Returns `false` if the session should end.
    pub fn execute(&mut self, cmd: Command) -> Result<bool, Error> {
        match cmd {
            Command::Quit => return Ok(false),
            Command::Undo => self.undo()?,
            Command::New(fen) => self.new_game(fen.as_ref().map(String::as_str))?,
            Command::Moves => {
                let moves: Vec<String> = self.board.legal_moves().into_iter()
                    .map(|mv| self.board.san(mv))
                    .collect();
                self.say(&moves.join(" "))?;
            },
            Command::Board => self.show_board()?,
            Command::Fen => {
                let fen = self.board.to_fen();
                self.say(&fen)?;
            },
            Command::History => {
                let text = self.board.move_text();
                if text.is_empty() {
                    self.say("No moves played")?;
                } else {
                    self.say(&text)?;
                }
            },
            Command::Help => self.say(HELP)?,
            Command::Move(text) => self.play(&text)?,
        }

        Ok(true)
    }

    fn play(&mut self, text: &str) -> Result<(), Error> {
        if let Some(result) = self.result {
            debug!("move {} after game over", text);
            return self.say(&format!("Error (game is over, {}): {}", result, text));
        }

        let mv = match self.board.parse_move(text) {
            Ok(mv) => mv,
            Err(chess::Error::AmbiguousMove) => {
                match self.choose_promotion(text)? {
                    Some(mv) => mv,
                    None => return Ok(()),
                }
            },
            Err(chess::Error::IllegalMove) => {
                debug!("illegal move {} from {}", text, self.board.position());
                return self.say(&format!("Illegal move: {}", text));
            },
            Err(err) => {
                debug!("{}: {}", text, err);
                return self.say(&format!("Error (unknown command): {}", text));
            },
        };

        let san = self.board.san(mv);
        self.board.apply_move(mv)?;
        info!("played {}", san);

        self.show_board()?;
        self.result = self.status();
        if let Some(result) = self.result {
            self.announce(result)?;
        }

        Ok(())
    }

    /// Asks which piece to promote to when `text` describes a pawn reaching the last rank without
    /// naming one. Returns `None` if no move should be played.
    fn choose_promotion(&mut self, text: &str) -> Result<Option<Move>, Error> {
        let candidates = text.parse::<MoveBuilder>()?.candidates(self.board.position());
        let promotion_only = match candidates.first() {
            Some(first) => candidates.iter().all(|mv| {
                mv.is_promotion() && mv.from() == first.from() && mv.to() == first.to()
            }),
            None => false,
        };

        if !promotion_only {
            debug!("ambiguous move {} from {}", text, self.board.position());
            return self.say(&format!("Ambiguous move: {}", text)).map(|_| None);
        }

        write!(self.output, "Promote to (q/r/b/n): ")?;
        self.output.flush()?;

        let choice = match self.read_line()? {
            Some(choice) => choice,
            None => return Ok(None),
        };
        let piece = choice.parse::<PieceType>().ok();

        match candidates.into_iter().find(|mv| piece.is_some() && mv.promotion() == piece) {
            Some(mv) => Ok(Some(mv)),
            None => {
                debug!("invalid promotion {} for {}", choice, text);
                self.say(&format!("Illegal move: {}={}", text, choice)).map(|_| None)
            },
        }
    }

    fn undo(&mut self) -> Result<(), Error> {
        let san = match self.board.history().last() {
            Some(record) => record.mv().to_san(record.previous()),
            None => return self.say("Nothing to undo"),
        };

        self.board.undo_move()?;
        self.result = self.status();
        info!("took back {}", san);

        self.say(&format!("Took back {}", san))?;
        self.show_board()
    }

    fn new_game(&mut self, fen: Option<&str>) -> Result<(), Error> {
        let board = match fen {
            Some(fen) => match Board::from_fen(fen) {
                Ok(board) => board,
                Err(err) => {
                    debug!("rejected position {}: {}", fen, err);
                    return self.say(&format!("Error ({}): {}", err, fen));
                },
            },
            None => Board::new(),
        };

        info!("new game from {}", board.to_fen());
        self.board = board;
        self.show_board()?;
        self.result = self.status();
        if let Some(result) = self.result {
            self.announce(result)?;
        }

        Ok(())
    }

    /// The result of the game under the session's draw policy
    fn status(&self) -> Option<GameResult> {
        if self.settings.claim_draws {
            self.board.outcome()
        } else {
            self.board.forced_outcome()
        }
    }

    fn announce(&mut self, result: GameResult) -> Result<(), Error> {
        info!("game over: {}", result);
        self.say(result_message(result))?;
        self.say(&result.to_string())
    }

    fn show_board(&mut self) -> Result<(), Error> {
        let style = Style { unicode: self.settings.unicode, flip: self.settings.flip };
        let diagram = render::render(&self.board, style);
        write!(self.output, "{}", diagram)?;
        self.output.flush()?;
        Ok(())
    }

    fn say(&mut self, s: &str) -> Result<(), Error> {
        trace!("<tinboard>: {}", s);
        writeln!(self.output, "{}", s)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        // invalid UTF-8 is kept as replacement characters and rejected like any other bad input
        let line = String::from_utf8_lossy(&bytes).trim().to_string();
        info!("<user>: {}", line);
        Ok(Some(line))
    }
}
