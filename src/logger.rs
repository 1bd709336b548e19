//! Append-only session log of diagnostic events.
//!
//! Every user action in the debug flow leaves a trail here, the way a
//! browser console would during a real integration debugging session.
//! The logger owns its id counter, so concurrent sessions in one process
//! never share state.

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Success,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Success => write!(f, "success"),
        }
    }
}

/// One timestamped diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    /// Time of day with millisecond precision (HH:MM:SS.mmm).
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Collects [`LogEntry`] values in call order.
#[derive(Debug, Default)]
pub struct SessionLogger {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl SessionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Ids are strictly increasing and survive
    /// [`clear`](Self::clear), so an id is never reused within a session.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>, detail: Option<String>) {
        self.next_id += 1;
        self.entries.push(LogEntry {
            id: self.next_id,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            level,
            message: message.into(),
            detail,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_call_order() {
        let mut logger = SessionLogger::new();
        logger.log(LogLevel::Info, "first", None);
        logger.log(LogLevel::Warn, "second", Some("detail".into()));
        logger.log(LogLevel::Error, "third", None);

        let messages: Vec<_> = logger.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut logger = SessionLogger::new();
        for i in 0..10 {
            logger.log(LogLevel::Info, format!("entry {i}"), None);
        }
        let ids: Vec<_> = logger.entries().iter().map(|e| e.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn clear_empties_but_keeps_counter() {
        let mut logger = SessionLogger::new();
        logger.log(LogLevel::Info, "before", None);
        let last_id = logger.entries()[0].id;

        logger.clear();
        assert!(logger.entries().is_empty());

        logger.log(LogLevel::Info, "after", None);
        assert!(logger.entries()[0].id > last_id);
    }

    #[test]
    fn timestamp_is_time_of_day_with_millis() {
        let mut logger = SessionLogger::new();
        logger.log(LogLevel::Success, "tick", None);
        let ts = &logger.entries()[0].timestamp;
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[5..6], ":");
        assert_eq!(&ts[8..9], ".");
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
        assert_eq!(
            serde_json::to_string(&LogLevel::Success).unwrap(),
            "\"success\""
        );
    }
}
