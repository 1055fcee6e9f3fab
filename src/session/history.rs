//! Session transition history.
//!
//! Immutable record of the phase changes of one cooking session.

use super::phase::SessionPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single engine transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Phase before the command
    pub from: SessionPhase,
    /// Phase after the command
    pub to: SessionPhase,
    /// Step the session was on after the command
    pub step_index: usize,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use cookwise::session::{PhaseTransition, SessionHistory, SessionPhase};
/// use chrono::Utc;
///
/// let history = SessionHistory::new().record(PhaseTransition {
///     from: SessionPhase::Idle,
///     to: SessionPhase::Running,
///     step_index: 0,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![SessionPhase::Idle, SessionPhase::Running]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    transitions: Vec<PhaseTransition>,
}

impl SessionHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Phases traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<SessionPhase> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Wall-clock span from the first to the last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Recorded transitions, oldest first.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
