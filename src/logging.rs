//! Timestamped migration log.
//!
//! Every pipeline stage appends to a shared in-memory audit log in addition
//! to emitting on the operator-visible stream. The log is owned by the
//! orchestrator and passed by reference; the sink is append-only.

use chrono::{SecondsFormat, Utc};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Append-only audit sink. Entries are formatted as
/// `[<ISO-8601 timestamp>] [<LEVEL>] <message>`.
#[derive(Debug, Default)]
pub struct MigrationLog {
    entries: Mutex<Vec<String>>,
    /// Suppress the operator stream (used by tests).
    quiet: bool,
}

impl MigrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        MigrationLog {
            entries: Mutex::new(Vec::new()),
            quiet: true,
        }
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let entry = format!("[{}] [{}] {}", timestamp, level.as_str(), message.as_ref());
        if !self.quiet {
            match level {
                LogLevel::Error => eprintln!("{entry}"),
                LogLevel::Warn => eprintln!("{entry}"),
                LogLevel::Info => println!("{entry}"),
            }
        }
        self.entries
            .lock()
            .expect("migration log poisoned")
            .push(entry);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Snapshot of the audit log, in append order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("migration log poisoned").clone()
    }

    /// Audit entries with the timestamp prefix stripped, for decision
    /// comparison across runs (dry-run equivalence).
    pub fn decisions(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|e| match e.find("] [") {
                Some(idx) => e[idx + 2..].to_string(),
                None => e.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_format() {
        let log = MigrationLog::quiet();
        log.info("hello");
        log.warn("careful");
        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("] [INFO] hello"));
        assert!(entries[1].contains("] [WARN] careful"));
        // RFC3339 timestamp up front
        assert!(entries[0].starts_with('['));
        assert!(entries[0].contains('T'));
    }

    #[test]
    fn test_decisions_strip_timestamps() {
        let log = MigrationLog::quiet();
        log.error("boom");
        assert_eq!(log.decisions(), vec!["[ERROR] boom".to_string()]);
    }
}
