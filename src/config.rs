//! Configuration Module
//!
//! Handles loading shell configuration from environment variables.

use std::env;

const DEFAULT_PROMPT: &str = "cache> ";

/// Shell configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prompt printed before each line of input
    pub prompt: String,
    /// Print a statistics line when the session ends
    pub stats_on_exit: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PROMPT` - Prompt string (default: "cache> ")
    /// - `CACHE_STATS_ON_EXIT` - `true` or `false` (default: false)
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("CACHE_PROMPT").ok(),
            env::var("CACHE_STATS_ON_EXIT").ok(),
        )
    }

    fn from_vars(prompt: Option<String>, stats_on_exit: Option<String>) -> Self {
        Self {
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            stats_on_exit: stats_on_exit
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            stats_on_exit: false,
        }
    }
}
