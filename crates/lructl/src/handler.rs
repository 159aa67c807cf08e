//! Command handler for the interactive loop

use std::fmt;

use lrucache::LruCache;
use serde::Serialize;
use tracing::debug;

use crate::command::Command;

/// One resident entry as rendered by `show --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Value(Option<String>),
    Integer(usize),
    Entries(Vec<Entry>),
    Quit,
}

impl Reply {
    /// Render for the terminal. `Entries` become a JSON array when `json` is set.
    pub fn render(&self, json: bool) -> serde_json::Result<String> {
        match self {
            Reply::Entries(entries) if json => serde_json::to_string(entries),
            other => Ok(other.to_string()),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(Some(value)) => write!(f, "{}", value),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Entries(entries) if entries.is_empty() => write!(f, "(empty)"),
            Reply::Entries(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {} => {}", i + 1, entry.key, entry.value)?;
                }
                Ok(())
            }
            Reply::Quit => write!(f, "bye"),
        }
    }
}

pub struct CommandHandler {
    cache: LruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &LruCache<String, String> {
        &self.cache
    }

    pub fn handle(&mut self, cmd: Command) -> Reply {
        debug!(?cmd, "handling command");

        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get(key) => Reply::Value(self.cache.get(&key).cloned()),
            Command::Peek(key) => Reply::Value(self.cache.peek(&key).cloned()),
            Command::Del(key) => {
                Reply::Integer(usize::from(self.cache.remove(&key).is_some()))
            }
            Command::Show => Reply::Entries(
                self.cache
                    .iter()
                    .map(|(key, value)| Entry {
                        key: key.clone(),
                        value: value.clone(),
                    })
                    .collect(),
            ),
            Command::Len => Reply::Integer(self.cache.len()),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Quit => Reply::Quit,
        }
    }
}
