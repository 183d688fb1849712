//! Trailing-edge debouncer for spelling suggestions.
//!
//! Lifecycle per burst of keystrokes:
//! `Idle -> Waiting -> Pending -> Resolved | Superseded`.
//! Any input change restarts at `Waiting` and invalidates an in-flight
//! request.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use synapse_core::types::SpellingSuggestion;

pub const SPELLING_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellState {
    Idle,
    Waiting { due: Instant },
    Pending { ticket: u64, for_input: String },
    Resolved(SpellingSuggestion),
    Superseded,
}

#[derive(Debug, Clone)]
pub struct SpellCheckDebouncer {
    delay: Duration,
    state: SpellState,
    generation: u64,
}

impl Default for SpellCheckDebouncer {
    fn default() -> Self {
        Self::new(SPELLING_DEBOUNCE)
    }
}

impl SpellCheckDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, state: SpellState::Idle, generation: 0 }
    }

    pub fn state(&self) -> &SpellState {
        &self.state
    }

    pub fn suggestion(&self) -> Option<&SpellingSuggestion> {
        match &self.state {
            SpellState::Resolved(s) => Some(s),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SpellState::Waiting { due } => Some(due),
            _ => None,
        }
    }

    /// Restart the timer. Whatever was waiting, in flight or shown is dropped.
    pub fn on_input(&mut self, now: Instant) {
        self.generation += 1;
        self.state = SpellState::Waiting { due: now + self.delay };
    }

    /// Fire the timer if it is due. Returns the ticket and text to request.
    pub fn fire(&mut self, now: Instant, raw_input: &str) -> Option<(u64, String)> {
        match self.state {
            SpellState::Waiting { due } if due <= now => {}
            _ => return None,
        }
        if raw_input.trim().is_empty() {
            self.state = SpellState::Idle;
            return None;
        }
        self.generation += 1;
        self.state = SpellState::Pending { ticket: self.generation, for_input: raw_input.to_string() };
        Some((self.generation, raw_input.to_string()))
    }

    /// Apply a response. Returns true when a suggestion is now shown.
    pub fn on_response(&mut self, ticket: u64, suggestion: Option<String>, current_input: &str) -> bool {
        let for_input = match &self.state {
            SpellState::Pending { ticket: pending, for_input } if *pending == ticket => for_input.clone(),
            _ => {
                debug!(ticket, "discarding stale spelling response");
                return false;
            }
        };

        match suggestion {
            Some(text) if text != for_input && for_input == current_input && !text.trim().is_empty() => {
                self.state = SpellState::Resolved(SpellingSuggestion { text, for_input });
                true
            }
            _ => {
                self.state = SpellState::Superseded;
                false
            }
        }
    }

    /// Drop any suggestion and cancel the timer or in-flight request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = SpellState::Idle;
    }

    /// Remove and return the shown suggestion.
    pub fn take(&mut self) -> Option<SpellingSuggestion> {
        let taken = match std::mem::replace(&mut self.state, SpellState::Idle) {
            SpellState::Resolved(s) => Some(s),
            other => {
                self.state = other;
                None
            }
        };
        if taken.is_some() {
            self.generation += 1;
        }
        taken
    }
}
