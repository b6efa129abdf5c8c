// In-memory activity log - what the UI shows in its log panel and banners
// Entries are also forwarded to tracing so they land in the log file

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

const MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Signed-in user at the time of the entry, if any.
    pub user: Option<(String, String)>, // (id, email)
    pub context: Vec<(String, String)>,
}

/// Ring buffer of recent application events, newest first.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    user: Option<(String, String)>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the signed-in user so subsequent entries carry it.
    pub fn set_user(&mut self, user: Option<(String, String)>) {
        self.user = user;
    }

    pub fn info(&mut self, message: impl Into<String>, context: &[(&str, &str)]) {
        let message = message.into();
        info!(target: "tunestall::activity", "{}", message);
        self.push(LogLevel::Info, message, context);
    }

    pub fn warn(&mut self, message: impl Into<String>, context: &[(&str, &str)]) {
        let message = message.into();
        warn!(target: "tunestall::activity", "{}", message);
        self.push(LogLevel::Warn, message, context);
    }

    pub fn error(&mut self, message: impl Into<String>, context: &[(&str, &str)]) {
        let message = message.into();
        error!(target: "tunestall::activity", "{}", message);
        self.push(LogLevel::Error, message, context);
    }

    fn push(&mut self, level: LogLevel, message: String, context: &[(&str, &str)]) {
        self.entries.push_front(LogEntry {
            level,
            message,
            timestamp: Utc::now(),
            user: self.user.clone(),
            context: context
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_back();
        }
    }

    /// Newest-first view of the buffer.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_newest_first() {
        let mut log = ActivityLog::new();
        log.info("first", &[]);
        log.info("second", &[]);

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_buffer_is_capped() {
        let mut log = ActivityLog::new();
        for i in 0..(MAX_ENTRIES + 50) {
            log.info(format!("entry {}", i), &[]);
        }

        assert_eq!(log.len(), MAX_ENTRIES);
        // Oldest entries fell off the back
        assert_eq!(log.latest().map(|e| e.message.as_str()), Some("entry 1049"));
    }

    #[test]
    fn test_user_is_attached_to_new_entries() {
        let mut log = ActivityLog::new();
        log.info("anonymous", &[]);
        log.set_user(Some(("user-1".into(), "john@example.com".into())));
        log.error("signed in", &[("song_id", "song-1")]);

        assert_eq!(log.latest().and_then(|e| e.user.clone()),
            Some(("user-1".into(), "john@example.com".into())));
        assert!(log.entries().nth(1).map(|e| e.user.is_none()).unwrap_or(false));
    }
}
