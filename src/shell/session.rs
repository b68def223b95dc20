//! Shell Session
//!
//! Reads commands line by line, runs them against a [`SharedCache`] and writes
//! one reply per line.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::CommandError;
use crate::shell::command::Command;
use crate::shell::reply::{KeysReply, Reply, StatsReply, StoredReply, ValueReply};

/// Usage text printed by `help`.
pub const USAGE: &str = "\
commands:
  put <key> <value...>               store a value that never expires
  puttill <key> <rfc3339> <value...> store a value until an absolute deadline
  putfor <key> <seconds> <value...>  store a value for a number of seconds
  get <key>                          read a value
  keys                               list live keys
  stats                              show lookup statistics
  help                               show this text
  quit | exit                        end the session";

/// Result of handling a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Keep reading; write the output if there is any
    Continue(Option<String>),
    Quit,
}

/// An interactive session bound to one cache.
#[derive(Debug, Clone)]
pub struct Session {
    cache: SharedCache,
    config: Config,
}

impl Session {
    // == Constructor ==
    /// Creates a session over `cache` using `config` for prompt and exit behavior.
    pub fn new(cache: SharedCache, config: Config) -> Self {
        Self { cache, config }
    }

    // == Cache ==
    /// Returns the cache this session operates on.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Execute ==
    /// Runs a parsed command against the cache.
    ///
    /// `help` and `quit` are handled by [`Session::handle_line`] and yield
    /// `None` here.
    pub async fn execute(&self, command: Command) -> Option<Reply> {
        debug!(?command, "executing command");

        let reply = match command {
            Command::Put { key, value } => {
                self.cache.put(key.clone(), value).await;
                Reply::Stored(StoredReply {
                    stored: key,
                    expires_at: None,
                })
            }
            Command::PutTill {
                key,
                deadline,
                value,
            } => {
                self.cache.put_till(key.clone(), value, deadline).await;
                Reply::Stored(StoredReply {
                    stored: key,
                    expires_at: Some(deadline),
                })
            }
            Command::PutFor { key, ttl, value } => {
                let deadline = self.cache.put_for(key.clone(), value, ttl).await;
                Reply::Stored(StoredReply {
                    stored: key,
                    expires_at: deadline,
                })
            }
            Command::Get { key } => {
                let value = self.cache.get(&key).await;
                Reply::Value(ValueReply { key, value })
            }
            Command::Keys => Reply::Keys(KeysReply::new(self.cache.keys().await)),
            Command::Stats => Reply::Stats(StatsReply::from(self.cache.stats().await)),
            Command::Help | Command::Quit => return None,
        };

        Some(reply)
    }

    // == Handle Line ==
    /// Parses and executes one line of input.
    pub async fn handle_line(&self, line: &str) -> serde_json::Result<Step> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Step::Continue(None)),
            Err(err) => {
                debug!(error = %err, "rejected input line");
                let output = serde_json::to_string(&Reply::error(err))?;
                return Ok(Step::Continue(Some(output)));
            }
        };

        match command {
            Command::Quit => Ok(Step::Quit),
            Command::Help => Ok(Step::Continue(Some(USAGE.to_string()))),
            command => {
                let output = match self.execute(command).await {
                    Some(reply) => Some(serde_json::to_string(&reply)?),
                    None => None,
                };
                Ok(Step::Continue(output))
            }
        }
    }

    // == Run ==
    /// Drives the session until `quit` or end of input.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.run_until(reader, writer, std::future::pending()).await
    }

    // == Run Until ==
    /// Drives the session until `quit`, end of input or `shutdown` completes.
    ///
    /// Every way out goes through the same exit path, so the stats line is
    /// written on shutdown as well. A line that is not valid UTF-8 gets an
    /// error reply and the session carries on.
    pub async fn run_until<R, W, F>(
        &self,
        mut reader: R,
        mut writer: W,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut buf = Vec::new();

        loop {
            writer.write_all(self.config.prompt.as_bytes()).await?;
            writer.flush().await?;

            buf.clear();
            let read = tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => read?,
                _ = &mut shutdown => {
                    info!("Shutdown requested, closing session");
                    break;
                }
            };
            if read == 0 {
                info!("End of input, closing session");
                break;
            }

            let step = match decode_line(&buf) {
                Ok(line) => self.handle_line(&line).await?,
                Err(err) => {
                    debug!(error = %err, "rejected input line");
                    Step::Continue(Some(serde_json::to_string(&Reply::error(err))?))
                }
            };

            match step {
                Step::Continue(Some(output)) => {
                    writer.write_all(output.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                }
                Step::Continue(None) => {}
                Step::Quit => {
                    info!("Quit requested, closing session");
                    break;
                }
            }
        }

        if self.config.stats_on_exit {
            let stats = serde_json::to_string(&Reply::Stats(self.cache.stats().await.into()))?;
            writer.write_all(stats.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;

        Ok(())
    }
}

/// Turns one raw input line into text, dropping the line terminator.
fn decode_line(raw: &[u8]) -> Result<String, CommandError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    Ok(String::from_utf8(raw.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn session() -> Session {
        Session::new(
            SharedCache::new(),
            Config {
                prompt: String::new(),
                stats_on_exit: false,
            },
        )
    }

    async fn reply(session: &Session, line: &str) -> Value {
        match session.handle_line(line).await.unwrap() {
            Step::Continue(Some(output)) => serde_json::from_str(&output).unwrap(),
            other => panic!("expected output for {:?}, got {:?}", line, other),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let session = session();

        let stored = reply(&session, "put key1 value one").await;
        assert_eq!(stored, json!({"stored": "key1", "expires_at": null}));

        let got = reply(&session, "get key1").await;
        assert_eq!(got, json!({"key": "key1", "value": "value one"}));
    }

    #[tokio::test]
    async fn test_get_missing_is_null() {
        let session = session();

        let got = reply(&session, "get nothing").await;
        assert_eq!(got, json!({"key": "nothing", "value": null}));
    }

    #[tokio::test]
    async fn test_put_till_past_deadline_reads_absent() {
        let session = session();

        reply(&session, "puttill key2 2000-01-01T00:00:00Z value2").await;
        let got = reply(&session, "get key2").await;

        assert_eq!(got["value"], Value::Null);
        assert!(session.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_put_for_reports_deadline() {
        let session = session();

        let stored = reply(&session, "putfor key3 120 value3").await;
        assert!(stored["expires_at"].is_string());

        let keys = reply(&session, "keys").await;
        assert_eq!(keys, json!({"keys": ["key3"]}));
    }

    #[tokio::test]
    async fn test_keys_sorted_and_stats() {
        let session = session();

        reply(&session, "put b 2").await;
        reply(&session, "put a 1").await;
        reply(&session, "get a").await;

        assert_eq!(reply(&session, "keys").await, json!({"keys": ["a", "b"]}));

        let stats = reply(&session, "stats").await;
        assert_eq!(stats["hits"], 1);
        assert_eq!(stats["total_entries"], 2);
    }

    #[tokio::test]
    async fn test_parse_error_reply() {
        let session = session();

        let err = reply(&session, "frobnicate").await;
        assert_eq!(err, json!({"error": "Unknown command: frobnicate"}));
    }

    #[tokio::test]
    async fn test_help_blank_and_quit() {
        let session = session();

        assert_eq!(
            session.handle_line("help").await.unwrap(),
            Step::Continue(Some(USAGE.to_string()))
        );
        assert_eq!(session.handle_line("  ").await.unwrap(), Step::Continue(None));
        assert_eq!(session.handle_line("quit").await.unwrap(), Step::Quit);
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let session = session();
        let input: &[u8] = b"put key1 value1\nquit\nput key2 value2\n";
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert_eq!(session.cache().keys().await, vec!["key1".to_string()]);
    }

    #[tokio::test]
    async fn test_run_prints_prompt_and_stats_on_exit() {
        let session = Session::new(
            SharedCache::new(),
            Config {
                prompt: "> ".to_string(),
                stats_on_exit: true,
            },
        );
        let input: &[u8] = b"get key1\n";
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("> {"));
        let last = output.lines().last().unwrap().trim_start_matches("> ");
        let stats: Value = serde_json::from_str(last).unwrap();
        assert_eq!(stats["misses"], 1);
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8_line() {
        let session = session();
        let input: &[u8] = b"put a \xff\nput b ok\nget b\n";
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let replies: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies.len(), 3);
        assert!(replies[0]["error"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(replies[2], json!({"key": "b", "value": "ok"}));
        assert_eq!(session.cache().keys().await, vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_run_accepts_crlf_lines() {
        let session = session();
        let input: &[u8] = b"put key1 value1\r\nget key1\r\n";
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();

        let last = String::from_utf8(output).unwrap();
        let last: Value = serde_json::from_str(last.lines().last().unwrap()).unwrap();
        assert_eq!(last, json!({"key": "key1", "value": "value1"}));
    }

    #[tokio::test]
    async fn test_shutdown_while_waiting_for_input() {
        let session = Session::new(
            SharedCache::new(),
            Config {
                prompt: String::new(),
                stats_on_exit: true,
            },
        );
        // Keep the write half alive so the reader never sees end of input
        let (_input_tx, input_rx) = tokio::io::duplex(64);
        let mut output = Vec::new();

        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            session.run_until(tokio::io::BufReader::new(input_rx), &mut output, async {}),
        )
        .await
        .expect("session did not stop on shutdown")
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        let stats: Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(stats["hits"], 0);
        assert_eq!(stats["total_entries"], 0);
    }
}
