//! Type-ahead search over option labels.

use crate::option::SelectOption;
use event_loop::TimerId;

/// Accumulated search term and the timer that will clear it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeAhead {
    buffer: String,
    pending_reset: Option<TimerId>,
}

impl TypeAhead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search term, case preserved as typed.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The reset timer waiting to fire, if any.
    pub fn pending_reset(&self) -> Option<TimerId> {
        self.pending_reset
    }

    /// Append a typed key. Named keys (`Shift`, `Tab`, ...) are ignored and
    /// return false.
    pub fn push_key(&mut self, key: &str) -> bool {
        if !is_printable_key(key) {
            return false;
        }
        self.buffer.push_str(key);
        true
    }

    /// Record the timer that will clear this buffer, returning the one it
    /// replaces so the caller can cancel it.
    pub fn arm_reset(&mut self, timer: TimerId) -> Option<TimerId> {
        self.pending_reset.replace(timer)
    }

    /// Handle a fired timer. Only the latest armed timer clears the buffer.
    pub fn expire(&mut self, timer: TimerId) -> bool {
        if self.pending_reset != Some(timer) {
            return false;
        }
        self.pending_reset = None;
        self.buffer.clear();
        true
    }

    /// Clear the buffer, returning the pending timer for cancellation.
    pub fn reset(&mut self) -> Option<TimerId> {
        self.buffer.clear();
        self.pending_reset.take()
    }

    /// Index of the first option whose label starts with the buffer,
    /// compared case-insensitively.
    pub fn find_match(&self, options: &[SelectOption]) -> Option<usize> {
        find_prefix_match(options, &self.buffer)
    }
}

/// A key value that produces text: exactly one character.
pub fn is_printable_key(key: &str) -> bool {
    key.chars().count() == 1
}

/// Index of the first option whose lowercased label starts with the
/// lowercased `term`.
pub fn find_prefix_match(options: &[SelectOption], term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    let term = term.to_lowercase();
    options
        .iter()
        .position(|o| o.label.to_lowercase().starts_with(&term))
}
