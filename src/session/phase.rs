//! Phases of the cooking session state machine.

use serde::{Deserialize, Serialize};

/// Where the engine's session slot currently is.
///
/// `Idle` is both the initial phase and the phase the engine returns to when
/// a session finishes or is abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
}

impl SessionPhase {
    /// Display name of the phase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Paused => "Paused",
        }
    }

    /// Whether a session exists in this phase.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names() {
        assert_eq!(SessionPhase::Idle.name(), "Idle");
        assert_eq!(SessionPhase::Running.name(), "Running");
        assert_eq!(SessionPhase::Paused.name(), "Paused");
    }

    #[test]
    fn only_idle_is_inactive() {
        assert!(!SessionPhase::Idle.is_active());
        assert!(SessionPhase::Running.is_active());
        assert!(SessionPhase::Paused.is_active());
    }
}
