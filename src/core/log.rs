//! The match log.
//!
//! Every observable consequence of an operation appends a line here.
//! The log is append-only for the lifetime of a match and doubles as the
//! outbound narration surface: operations flush newly appended entries to
//! the caller's sink before returning, and every append also emits a
//! `log::debug!` trace for host-side diagnostics.

use serde::{Deserialize, Serialize};

/// Append-only match log.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchLog {
    entries: Vec<String>,
    flushed: usize,
}

impl MatchLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!(target: "statecraft", "{message}");
        self.entries.push(message);
    }

    /// All entries since the start of the match, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Send every entry appended since the last flush to `sink`.
    pub(crate) fn flush_to(&mut self, sink: &mut dyn FnMut(&str)) {
        for entry in &self.entries[self.flushed..] {
            sink(entry);
        }
        self.flushed = self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut log = MatchLog::new();
        assert!(log.is_empty());

        log.push("first");
        log.push(String::from("second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries(), &["first", "second"]);
    }

    #[test]
    fn test_flush_only_new_entries() {
        let mut log = MatchLog::new();
        log.push("a");

        let mut seen = Vec::new();
        log.flush_to(&mut |m| seen.push(m.to_string()));
        assert_eq!(seen, vec!["a"]);

        log.push("b");
        log.push("c");
        log.flush_to(&mut |m| seen.push(m.to_string()));
        assert_eq!(seen, vec!["a", "b", "c"]);

        // Nothing new: sink is not called again.
        log.flush_to(&mut |_| panic!("flushed an already-flushed entry"));
    }
}
