//! User settings, read from a YAML file in the `.tinboard` directory
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use crate::Error;

/// Name of the settings file within the application directory
pub const SETTINGS_FILE: &str = "settings.yaml";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings for a session. Any field missing from the settings file takes its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the board with Unicode chess symbols instead of letters
    pub unicode: bool,
    /// Draw the board from Black's side
    pub flip: bool,
    /// End the game as soon as a draw by the fifty-move rule or three-fold repetition can be
    /// claimed
    pub claim_draws: bool,
    /// Log level used when logging is turned on
    pub log_level: String,
    /// Log file used when logging is turned on
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            unicode: false,
            flip: false,
            claim_draws: true,
            log_level: "info".to_owned(),
            log_file: PathBuf::from("tinboard.log"),
        }
    }
}

impl Settings {
    /// Reads settings from the YAML file at `path`
    pub fn load(path: &Path) -> Result<Settings, Error> {
        let s = read_to_string(path).map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
        Settings::from_yaml(&s).map_err(|err| Error(format!("{}: {}", path.display(), err)))
    }

    /// Reads settings from `path` if given, otherwise from the default settings file.
    ///
    /// A missing default settings file is not an error; the default settings are returned.
    pub fn load_or_default(path: Option<&Path>) -> Result<Settings, Error> {
        match path {
            Some(path) => Settings::load(path),
            None => {
                let path = default_path();
                if path.exists() {
                    Settings::load(&path)
                } else {
                    Ok(Settings::default())
                }
            },
        }
    }

    /// Parses settings from a YAML string
    pub fn from_yaml(s: &str) -> Result<Settings, Error> {
        if s.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Writes the settings as YAML
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the log level as a `LevelFilter`
    pub fn level_filter(&self) -> Result<LevelFilter, Error> {
        parse_level(&self.log_level)
    }
}

/// The application directory, `~/.tinboard`, or the current directory if there is no home
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| { home.join(".tinboard") })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The default location of the settings file
pub fn default_path() -> PathBuf {
    app_dir().join(SETTINGS_FILE)
}

/// Parses a log level name
pub fn parse_level(level: &str) -> Result<LevelFilter, Error> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        level => Err(Error(format!("{}: invalid log level", level))),
    }
}
