//! Shell Module
//!
//! A line-oriented command interface over a shared cache.
//!
//! # Commands
//! - `put <key> <value...>` - Store a value that never expires
//! - `puttill <key> <rfc3339> <value...>` - Store a value until a deadline
//! - `putfor <key> <seconds> <value...>` - Store a value for a duration
//! - `get <key>` - Read a value
//! - `keys` - List live keys
//! - `stats` - Show lookup statistics

pub mod command;
pub mod reply;
pub mod session;

pub use command::Command;
pub use reply::Reply;
pub use session::{Session, Step, USAGE};
