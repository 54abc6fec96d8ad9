//! The tinboard text chess board.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use clap::{App, Arg, ArgMatches, SubCommand, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use chess::{Board, START_FEN, variations};
use tinboard::Error;
use tinboard::config::Settings;
use tinboard::play::Session;

fn main() -> Result<(), Error> {
    let matches =
        App::new("Tinboard")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Plays chess at the terminal, one command or move per line")
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.tinboard/settings.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on [default: tinboard.log]"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on [default: info]"))
            .subcommand(SubCommand::with_name("play")
                .about("Plays a game on a text board (the default)")
                .arg(Arg::with_name("fen")
                    .long("fen")
                    .value_name("FEN_STRING")
                    .takes_value(true)
                    .help("Starts from the given position in Forsyth-Edwards Notation (FEN)"))
                .arg(Arg::with_name("unicode")
                    .long("unicode")
                    .short("u")
                    .help("Draws the pieces with Unicode chess symbols"))
                .arg(Arg::with_name("flip")
                    .long("flip")
                    .short("f")
                    .help("Draws the board from Black's side")))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("config")
                .about("Prints the effective settings as YAML"))
            .get_matches();

    let mut settings = Settings::load_or_default(matches.value_of_os("config").map(Path::new))?;
    if let Some(log_file) = matches.value_of_os("log-file") {
        settings.log_file = PathBuf::from(log_file);
    }
    if let Some(log_level) = matches.value_of("log-level") {
        settings.log_level = log_level.to_owned();
    }
    let log_level = settings.level_filter()?;

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&settings.log_file).map_err(|err| {
                Error(format!("{}: {}", settings.log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), io::sink())
    };

    match matches.subcommand() {
        (_, None) => play(settings, &ArgMatches::default())?,
        ("play", Some(matches)) => play(settings, matches)?,
        ("counts", Some(matches)) => {
            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let mut board = Board::from_fen(fen)
                    .map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                println!("{}", fen);

                let mut total = 0;
                for (mv, count) in variations::divide(&mut board, depth) {
                    println!("{}\t{:12}", board.san(mv), count);
                    total += count;
                }
                if depth == 0 {
                    total = variations::count(&mut board, depth);
                }
                println!("Depth {} total:\t{:12}\n", depth, total);
            }
        },
        ("config", Some(_)) => {
            print!("{}", settings.to_yaml()?);
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn play(mut settings: Settings, matches: &ArgMatches<'_>) -> Result<(), Error> {
    if matches.is_present("unicode") {
        settings.unicode = true;
    }
    if matches.is_present("flip") {
        settings.flip = true;
    }

    let board = match matches.value_of("fen") {
        Some(fen) => Board::from_fen(fen).map_err(|err| Error(format!("{}: {}", fen, err)))?,
        None => Board::new(),
    };

    info!("starting session from {}", board.to_fen());
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::with_board(stdin.lock(), stdout.lock(), settings, board).run()
}
