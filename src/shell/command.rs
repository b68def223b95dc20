//! Shell Commands
//!
//! Parses one line of shell input into a [`Command`].

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{CommandError, Result};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `put <key> <value...>`
    Put { key: String, value: String },
    /// `puttill <key> <rfc3339> <value...>`
    PutTill {
        key: String,
        deadline: DateTime<Utc>,
        value: String,
    },
    /// `putfor <key> <seconds> <value...>`
    PutFor {
        key: String,
        ttl: Duration,
        value: String,
    },
    /// `get <key>`
    Get { key: String },
    Keys,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Parses a line of input.
    ///
    /// Returns `Ok(None)` for a blank line. The value is the remainder of the
    /// line after the preceding arguments, so it may contain spaces or be
    /// empty.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let (name, rest) = match next_word(line) {
            Some(split) => split,
            None => return Ok(None),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "put" => {
                let (key, value) = require(next_word(rest), "put", "key")?;
                Command::Put {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "puttill" => {
                let (key, rest) = require(next_word(rest), "puttill", "key")?;
                let (deadline, value) = require(next_word(rest), "puttill", "deadline")?;
                let deadline = DateTime::parse_from_rfc3339(deadline)
                    .map_err(|source| CommandError::InvalidDeadline {
                        input: deadline.to_string(),
                        source,
                    })?
                    .with_timezone(&Utc);
                Command::PutTill {
                    key: key.to_string(),
                    deadline,
                    value: value.to_string(),
                }
            }
            "putfor" => {
                let (key, rest) = require(next_word(rest), "putfor", "key")?;
                let (seconds, value) = require(next_word(rest), "putfor", "seconds")?;
                let seconds: u64 = seconds.parse().map_err(|source| CommandError::InvalidTtl {
                    input: seconds.to_string(),
                    source,
                })?;
                Command::PutFor {
                    key: key.to_string(),
                    ttl: Duration::from_secs(seconds),
                    value: value.to_string(),
                }
            }
            "get" => {
                let (key, rest) = require(next_word(rest), "get", "key")?;
                reject_extra(rest, "get")?;
                Command::Get {
                    key: key.to_string(),
                }
            }
            "keys" => {
                reject_extra(rest, "keys")?;
                Command::Keys
            }
            "stats" => {
                reject_extra(rest, "stats")?;
                Command::Stats
            }
            "help" => {
                reject_extra(rest, "help")?;
                Command::Help
            }
            "quit" | "exit" => {
                reject_extra(rest, "quit")?;
                Command::Quit
            }
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        Ok(Some(command))
    }
}

/// Splits off the first whitespace-delimited word.
///
/// Returns the word and the remainder with leading whitespace removed.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((input, "")),
    }
}

fn require<'a>(
    split: Option<(&'a str, &'a str)>,
    command: &'static str,
    argument: &'static str,
) -> Result<(&'a str, &'a str)> {
    split.ok_or(CommandError::MissingArgument { command, argument })
}

/// Fails if anything but whitespace follows the last expected argument.
fn reject_extra(rest: &str, command: &'static str) -> Result<()> {
    match next_word(rest) {
        Some((argument, _)) => Err(CommandError::UnexpectedArgument {
            command,
            argument: argument.to_string(),
        }),
        None => Ok(()),
    }
}
