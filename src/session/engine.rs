//! Cooking session engine.

use super::history::{PhaseTransition, SessionHistory};
use super::phase::SessionPhase;
use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Live state of one in-progress guided cook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingSession {
    pub recipe_id: String,
    pub current_step_index: usize,
    pub is_running: bool,
    pub step_remaining_sec: u64,
    pub overall_remaining_sec: u64,
    /// Time of the last successful tick; cleared while paused.
    pub last_tick: Option<DateTime<Utc>>,
}

impl CookingSession {
    /// Running or paused; a session that exists is never idle.
    pub fn phase(&self) -> SessionPhase {
        if self.is_running {
            SessionPhase::Running
        } else {
            SessionPhase::Paused
        }
    }
}

/// Owns the (at most one) active cooking session.
///
/// Commands that make no sense in the current state (pausing with no
/// session, ticking while paused, starting a second recipe) are silent
/// no-ops: timer commands arriving after a session ended are an expected
/// race. Each command reports whether it changed anything.
///
/// The engine only counts down. Advancing to the next step when the step
/// countdown reaches zero is the caller's job, see
/// [`CookController`](super::CookController).
pub struct CookingEngine<C: Clock = SystemClock> {
    session: Option<CookingSession>,
    history: SessionHistory,
    clock: C,
}

impl CookingEngine<SystemClock> {
    /// Engine on the system clock with no session.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CookingEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CookingEngine<C> {
    /// Engine reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            session: None,
            history: SessionHistory::new(),
            clock,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&CookingSession> {
        self.session.as_ref()
    }

    /// Id of the recipe being cooked.
    pub fn active_recipe_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.recipe_id.as_str())
    }

    /// Session state for `recipe_id`, if that recipe is the one cooking.
    pub fn session_for(&self, recipe_id: &str) -> Option<&CookingSession> {
        self.session.as_ref().filter(|s| s.recipe_id == recipe_id)
    }

    /// Current phase, `Idle` when no session is active.
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::Idle, CookingSession::phase)
    }

    /// Transitions of the current session, or of the last one once it ended.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Clock the engine reads on every command.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn record(&mut self, from: SessionPhase, now: DateTime<Utc>) {
        let to = self.phase();
        let step_index = self.session.as_ref().map_or(0, |s| s.current_step_index);
        self.history = self.history.record(PhaseTransition {
            from,
            to,
            step_index,
            timestamp: now,
        });
    }

    /// Start cooking `recipe_id` at its first step.
    ///
    /// Rejected (returns `false`, nothing changes) while another recipe is
    /// cooking. Starting the recipe that is already cooking restarts it.
    pub fn start(
        &mut self,
        recipe_id: &str,
        step_duration_sec: u64,
        overall_remaining_sec: u64,
    ) -> bool {
        if let Some(active) = self.active_recipe_id() {
            if active != recipe_id {
                debug!(active, requested = recipe_id, "Session already active, ignoring start");
                return false;
            }
        }

        let now = self.clock.now();
        let from = self.phase();
        self.session = Some(CookingSession {
            recipe_id: recipe_id.to_string(),
            current_step_index: 0,
            is_running: true,
            step_remaining_sec: step_duration_sec,
            overall_remaining_sec,
            last_tick: Some(now),
        });
        self.history = SessionHistory::new();
        self.record(from, now);
        info!(recipe_id, step_duration_sec, overall_remaining_sec, "Started cooking session");
        true
    }

    /// Stop the countdown. No time accrues until [`resume`](Self::resume).
    pub fn pause(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let from = session.phase();
        session.is_running = false;
        session.last_tick = None;
        if from != SessionPhase::Paused {
            self.record(from, now);
            debug!("Paused session");
        }
        true
    }

    /// Restart the countdown from now.
    pub fn resume(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let from = session.phase();
        session.is_running = true;
        session.last_tick = Some(now);
        if from != SessionPhase::Running {
            self.record(from, now);
            debug!("Resumed session");
        }
        true
    }

    /// Finish the current step.
    ///
    /// On the last step the session ends. Otherwise the next step starts
    /// running with `next_step_duration_sec` (0 if not given) on its clock.
    pub fn stop_current_step(&mut self, is_last_step: bool, next_step_duration_sec: Option<u64>) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let from = session.phase();

        if is_last_step {
            let recipe_id = session.recipe_id.clone();
            self.session = None;
            self.record(from, now);
            info!(recipe_id = %recipe_id, "Finished cooking session");
            return true;
        }

        session.current_step_index += 1;
        session.step_remaining_sec = next_step_duration_sec.unwrap_or(0);
        session.is_running = true;
        session.last_tick = Some(now);
        let step_index = session.current_step_index;
        self.record(from, now);
        debug!(step_index, "Advanced to next step");
        true
    }

    /// Count down by the whole seconds of wall-clock time since the last tick.
    ///
    /// Returns the seconds applied (0 when nothing was counted). Late or
    /// skipped ticks are absorbed: the next tick applies the full gap. A
    /// clock that did not move, or moved backwards, only refreshes the
    /// last-tick marker. Both countdowns stop at zero.
    pub fn tick(&mut self) -> u64 {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut().filter(|s| s.is_running) else {
            return 0;
        };

        let elapsed = match session.last_tick {
            Some(last) => (now - last).num_milliseconds().div_euclid(1000),
            None => 1,
        };
        session.last_tick = Some(now);
        if elapsed <= 0 {
            return 0;
        }

        let elapsed = elapsed.unsigned_abs();
        session.step_remaining_sec = session.step_remaining_sec.saturating_sub(elapsed);
        session.overall_remaining_sec = session.overall_remaining_sec.saturating_sub(elapsed);
        elapsed
    }

    /// Abort the session, whatever its state.
    pub fn end(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.take() else {
            return false;
        };
        self.record(session.phase(), now);
        info!(recipe_id = %session.recipe_id, "Ended cooking session");
        true
    }
}
