//! Scoped diagnostic sink for parse attempts.
//!
//! Each candidate attempt opens a sub-scope; a successful attempt commits
//! its collected entries upward while a failed one discards them, so the
//! caller only ever sees diagnostics from the attempt that won (plus
//! whatever the driver chose to surface). Entries reaching the root scope
//! are also emitted through the `log` crate.

use log::Level;

/// One collected diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity, reusing the `log` crate's levels.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}

/// Scoped collector for warnings and errors produced during a parse.
///
/// The host hands one `ParseLog` to a top-level parse call and inspects
/// [`entries`](Self::entries) afterwards.
#[derive(Debug, Default)]
pub struct ParseLog {
    root: Vec<LogEntry>,
    subs: Vec<Vec<LogEntry>>,
}

impl ParseLog {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested scope; entries recorded until the matching
    /// [`print_log`](Self::print_log) or [`stop_sub`](Self::stop_sub) stay
    /// local to it.
    pub fn start_sub(&mut self) {
        self.subs.push(Vec::new());
    }

    /// Close the current scope, discarding everything it collected.
    pub fn stop_sub(&mut self) {
        self.subs.pop();
    }

    /// Close the current scope and commit its entries to the parent.
    pub fn print_log(&mut self) {
        if let Some(entries) = self.subs.pop() {
            for entry in entries {
                self.push(entry);
            }
        }
    }

    /// Close the current scope, keeping only its last error; when the scope
    /// recorded none, `default` is used instead.
    pub fn print_errors(&mut self, default: &str) {
        let last = self.subs.pop().and_then(|entries| {
            entries
                .into_iter()
                .rev()
                .find(|entry| entry.level == Level::Error)
        });
        match last {
            Some(entry) => self.push(entry),
            None => self.error(default),
        }
    }

    /// Record a warning in the current scope.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogEntry {
            level: Level::Warn,
            message: message.into(),
        });
    }

    /// Record an error in the current scope.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogEntry {
            level: Level::Error,
            message: message.into(),
        });
    }

    /// The last error recorded in the current scope, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.current()
            .iter()
            .rev()
            .find(|entry| entry.level == Level::Error)
            .map(|entry| entry.message.as_str())
    }

    /// Whether the current scope recorded any error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.current()
            .iter()
            .any(|entry| entry.level == Level::Error)
    }

    /// All entries committed to the root scope.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.root
    }

    fn current(&self) -> &[LogEntry] {
        self.subs.last().map_or(&self.root, Vec::as_slice)
    }

    fn push(&mut self, entry: LogEntry) {
        match self.subs.last_mut() {
            Some(scope) => scope.push(entry),
            None => {
                log::log!(entry.level, "{}", entry.message);
                self.root.push(entry);
            }
        }
    }
}
