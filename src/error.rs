//! Error types for the cache shell
//!
//! Cache operations are total and never fail. Errors only arise when the shell
//! turns a line of input into a command.

use std::num::ParseIntError;
use std::string::FromUtf8Error;

use thiserror::Error;

// == Command Error Enum ==
/// Errors produced while parsing a shell command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// First word is not a known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A required argument was not supplied
    #[error("Missing argument <{argument}> for '{command}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// More arguments than the command takes
    #[error("Unexpected argument '{argument}' for '{command}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    /// Input line is not valid UTF-8
    #[error("Input line is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),

    /// Deadline is not an RFC 3339 timestamp
    #[error("Invalid deadline '{input}': {source}")]
    InvalidDeadline {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// TTL is not a whole number of seconds
    #[error("Invalid TTL '{input}': {source}")]
    InvalidTtl {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

// == Result Type Alias ==
/// Convenience Result type for command parsing.
pub type Result<T> = std::result::Result<T, CommandError>;
