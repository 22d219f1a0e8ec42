//! Input session: transcript, bounded history and recall navigation.
//!
//! A [`Session`] is the caller of the dispatcher. It intercepts the `clear`
//! and `cls` keywords before dispatch, records submitted lines in a
//! [`HistoryLog`], appends results to a [`Transcript`], and drives the recall
//! cursor used by the Up/Down keys.
//!
//! ```text
//!            recall_up (log non-empty)
//!   Idle  ───────────────────────────▶  Recalling(len-1)
//!    ▲        recall_down at newest            │  recall_up: i -> max(i-1, 0)
//!    └─────────────────────────────────────────┘  recall_down: i -> i+1
//!        submit / escape / typing / reset
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::completion::{Autocomplete, DEFAULT_MAX_SUGGESTIONS};
use crate::dispatcher::Dispatcher;
use crate::output::Output;
use crate::registry::CommandRegistry;

/// Default history capacity.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Words that reset the transcript instead of being dispatched.
pub const CLEAR_KEYWORDS: [&str; 2] = ["clear", "cls"];

/// Whether `line` is exactly one of the clear keywords (case-insensitive).
pub fn is_clear_keyword(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    CLEAR_KEYWORDS.contains(&line.as_str())
}

/// Bounded log of submitted lines, oldest first.
///
/// A line equal to the newest entry is not appended again. Once the
/// capacity is exceeded the oldest entries are evicted.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<String>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Push a line, trimming it. Returns `true` if it was appended.
    pub fn push(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        // Skip duplicate consecutive entries
        if self.entries.last().map(String::as_str) == Some(trimmed) {
            return false;
        }
        self.entries.push(trimmed.to_string());
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Position of the recall cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecallState {
    /// Not recalling; the buffer holds whatever the user typed.
    #[default]
    Idle,
    /// Showing the history entry at this index.
    Recalling(usize),
}

impl RecallState {
    /// The cursor as the conventional `-1`-means-idle integer.
    pub fn as_index(&self) -> isize {
        match self {
            RecallState::Idle => -1,
            RecallState::Recalling(i) => *i as isize,
        }
    }
}

/// One executed command and its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// `cmd-<unix millis>-<sequence>`, unique for the session lifetime.
    pub id: String,
    pub command: String,
    pub output: Output,
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of executed commands, fully clearable.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    // Never reset by `clear`, so ids stay unique after a reset.
    sequence: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: &str, output: Output) -> &TranscriptEntry {
        self.sequence += 1;
        let timestamp = Utc::now();
        let id = format!("cmd-{}-{}", timestamp.timestamp_millis(), self.sequence);
        self.entries.push(TranscriptEntry {
            id,
            command: command.to_string(),
            output,
            timestamp,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of submitting a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission<'a> {
    /// Blank input; nothing happened.
    Ignored,
    /// The transcript was reset.
    Cleared,
    /// The line ran and this entry was appended.
    Executed(&'a TranscriptEntry),
}

/// Outcome of a Tab completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched.
    None,
    /// Exactly one match; the buffer now holds it.
    Filled(String),
    /// Several matches; they are kept in [`Session::suggestions`].
    Candidates(Vec<String>),
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub history_capacity: usize,
    pub max_suggestions: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// One interactive session over a shared registry.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    dispatcher: Dispatcher,
    autocomplete: Autocomplete,
    history: HistoryLog,
    recall: RecallState,
    transcript: Transcript,
    input: String,
    suggestions: Vec<String>,
}

impl Session {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_options(registry, SessionOptions::default())
    }

    pub fn with_options(registry: Arc<CommandRegistry>, options: SessionOptions) -> Self {
        let id = Uuid::new_v4();
        info!(
            session = %id,
            history_capacity = options.history_capacity,
            max_suggestions = options.max_suggestions,
            "Session started"
        );
        Self {
            id,
            dispatcher: Dispatcher::new(Arc::clone(&registry)),
            autocomplete: Autocomplete::with_limit(registry, options.max_suggestions),
            history: HistoryLog::new(options.history_capacity),
            recall: RecallState::Idle,
            transcript: Transcript::new(),
            input: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &CommandRegistry {
        self.dispatcher.registry()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn recall_state(&self) -> RecallState {
        self.recall
    }

    /// Current visible input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Suggestions for the current buffer.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Replace the buffer as if the user typed it. Leaves recall mode.
    pub fn set_input(&mut self, text: &str) {
        self.recall = RecallState::Idle;
        self.load_input(text.to_string());
    }

    /// Submit the current buffer.
    pub fn submit(&mut self) -> Submission<'_> {
        let line = std::mem::take(&mut self.input);
        self.submit_line(&line)
    }

    /// Submit a line: record it, run it, and append the result.
    pub fn submit_line(&mut self, raw: &str) -> Submission<'_> {
        let line = raw.trim();
        if line.is_empty() {
            return Submission::Ignored;
        }

        self.history.push(line);
        self.recall = RecallState::Idle;
        self.input.clear();
        self.suggestions.clear();

        if is_clear_keyword(line) {
            self.reset();
            return Submission::Cleared;
        }

        let Some(output) = self
            .dispatcher
            .execute_with_history(line, self.history.entries())
        else {
            return Submission::Ignored;
        };

        if output == Output::Clear {
            self.reset();
            return Submission::Cleared;
        }

        debug!(
            session = %self.id,
            command = %line,
            failed = output.is_failure(),
            "Command executed"
        );
        Submission::Executed(self.transcript.push(line, output))
    }

    /// Move to an older history entry. Clamps at the oldest.
    pub fn recall_up(&mut self) -> &str {
        if self.history.is_empty() {
            return &self.input;
        }
        let index = match self.recall {
            RecallState::Idle => self.history.len() - 1,
            RecallState::Recalling(i) => i.saturating_sub(1),
        };
        self.recall_to(index)
    }

    /// Move to a newer history entry; past the newest, return to idle with
    /// an empty buffer.
    pub fn recall_down(&mut self) -> &str {
        let RecallState::Recalling(i) = self.recall else {
            return &self.input;
        };
        if self.history.is_empty() {
            return &self.input;
        }
        if i + 1 < self.history.len() {
            self.recall_to(i + 1)
        } else {
            self.recall = RecallState::Idle;
            self.load_input(String::new());
            &self.input
        }
    }

    /// Tab completion over the current buffer.
    pub fn complete(&mut self) -> Completion {
        let matches = self.autocomplete.suggest(&self.input);
        match matches.len() {
            0 => Completion::None,
            1 => {
                let name = matches.into_iter().next().unwrap_or_default();
                self.recall = RecallState::Idle;
                self.input = name.clone();
                self.suggestions.clear();
                Completion::Filled(name)
            }
            _ => {
                self.suggestions = matches.clone();
                Completion::Candidates(matches)
            }
        }
    }

    /// Clear the buffer and suggestions (Esc).
    pub fn escape(&mut self) {
        self.recall = RecallState::Idle;
        self.input.clear();
        self.suggestions.clear();
    }

    /// Clear the transcript and return to idle. History is kept.
    pub fn reset(&mut self) {
        info!(session = %self.id, entries = self.transcript.len(), "Transcript cleared");
        self.transcript.clear();
        self.recall = RecallState::Idle;
    }

    fn recall_to(&mut self, index: usize) -> &str {
        self.recall = RecallState::Recalling(index);
        let entry = self.history.get(index).unwrap_or_default().to_string();
        self.load_input(entry);
        &self.input
    }

    fn load_input(&mut self, text: String) {
        self.suggestions = self.autocomplete.suggest(&text);
        self.input = text;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(
            session = %self.id,
            commands = self.history.len(),
            "Session ended"
        );
    }
}
