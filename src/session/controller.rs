//! Controller loop around the session engine.
//!
//! The engine only counts down. The controller resolves the active recipe,
//! feeds step durations into the engine, and after every tick checks whether
//! the current step's countdown hit zero, in which case it advances to the
//! next step (or finishes the session) before returning.

use super::engine::{CookingEngine, CookingSession};
use crate::clock::{Clock, SystemClock};
use crate::progress::{
    format_duration, overall_progress_percent, step_progress_percent, total_duration_seconds,
};
use crate::recipe::Recipe;
use crate::store::RecipeSource;
use serde::Serialize;
use tracing::{debug, warn};

/// What one controller step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session is active.
    Idle,
    /// The session is paused; nothing counted.
    Paused,
    /// Time was counted; the current step is still going.
    Counting {
        elapsed: u64,
        step_remaining_sec: u64,
        overall_remaining_sec: u64,
    },
    /// Moved on to `step_index`.
    Advanced { step_index: usize },
    /// The last step completed and the session ended.
    Finished,
    /// The recipe disappeared or no longer has the current step; the session
    /// was ended.
    Abandoned,
}

impl TickOutcome {
    /// Whether the session is over after this outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Idle | Self::Finished | Self::Abandoned)
    }
}

/// Display-ready snapshot of the active session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub recipe_id: String,
    pub title: String,
    pub step_index: usize,
    pub step_count: usize,
    pub step_description: String,
    pub is_running: bool,
    pub step_remaining_sec: u64,
    pub step_duration_sec: u64,
    pub overall_remaining_sec: u64,
    pub total_duration_sec: u64,
    /// `MM:SS`
    pub step_clock: String,
    /// `MM:SS`
    pub overall_clock: String,
    pub step_percent: u8,
    pub overall_percent: u8,
}

/// Drives a [`CookingEngine`] against recipes from a [`RecipeSource`].
pub struct CookController<C: Clock = SystemClock> {
    engine: CookingEngine<C>,
}

impl CookController<SystemClock> {
    /// Controller on the system clock.
    pub fn new() -> Self {
        Self::with_engine(CookingEngine::new())
    }
}

impl Default for CookController<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CookController<C> {
    /// Controller around an existing engine.
    pub fn with_engine(engine: CookingEngine<C>) -> Self {
        Self { engine }
    }

    /// Read access to the underlying engine.
    pub fn engine(&self) -> &CookingEngine<C> {
        &self.engine
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&CookingSession> {
        self.engine.session()
    }

    /// Start cooking `recipe_id` from its first step.
    ///
    /// Returns `false` when the recipe is unknown, has no steps, or another
    /// recipe is already cooking.
    pub fn start<S: RecipeSource + ?Sized>(&mut self, source: &S, recipe_id: &str) -> bool {
        let Some(recipe) = source.recipe(recipe_id) else {
            debug!(recipe_id, "Cannot start unknown recipe");
            return false;
        };
        let Some(first) = recipe.steps.first() else {
            return false;
        };
        self.engine
            .start(recipe_id, first.duration_seconds(), total_duration_seconds(recipe))
    }

    /// See [`CookingEngine::pause`].
    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    /// See [`CookingEngine::resume`].
    pub fn resume(&mut self) -> bool {
        self.engine.resume()
    }

    /// Pause a running session or resume a paused one.
    pub fn toggle(&mut self) -> bool {
        match self.engine.session().map(|s| s.is_running) {
            Some(true) => self.engine.pause(),
            Some(false) => self.engine.resume(),
            None => false,
        }
    }

    /// Abort the session without finishing it.
    pub fn end(&mut self) -> bool {
        self.engine.end()
    }

    /// Finish the current step now, without waiting for its countdown.
    pub fn next_step<S: RecipeSource + ?Sized>(&mut self, source: &S) -> TickOutcome {
        match self.resolve(source) {
            Resolved::Idle => TickOutcome::Idle,
            Resolved::Missing => self.abandon(),
            Resolved::Found(index) => self.advance_from(source, index),
        }
    }

    /// Count down, then advance if the current step just ran out.
    pub fn on_tick<S: RecipeSource + ?Sized>(&mut self, source: &S) -> TickOutcome {
        let index = match self.resolve(source) {
            Resolved::Idle => return TickOutcome::Idle,
            Resolved::Missing => return self.abandon(),
            Resolved::Found(index) => index,
        };

        let elapsed = self.engine.tick();
        let Some(session) = self.engine.session() else {
            return TickOutcome::Idle;
        };
        if !session.is_running {
            return TickOutcome::Paused;
        }
        if session.step_remaining_sec == 0 {
            return self.advance_from(source, index);
        }
        TickOutcome::Counting {
            elapsed,
            step_remaining_sec: session.step_remaining_sec,
            overall_remaining_sec: session.overall_remaining_sec,
        }
    }

    /// Snapshot of the active session for display.
    pub fn view<S: RecipeSource + ?Sized>(&self, source: &S) -> Option<SessionView> {
        let session = self.engine.session()?;
        let recipe = source.recipe(&session.recipe_id)?;
        let step = recipe.step(session.current_step_index)?;
        let step_duration_sec = step.duration_seconds();
        let total_duration_sec = total_duration_seconds(recipe);

        Some(SessionView {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            step_index: session.current_step_index,
            step_count: recipe.steps.len(),
            step_description: step.description.clone(),
            is_running: session.is_running,
            step_remaining_sec: session.step_remaining_sec,
            step_duration_sec,
            overall_remaining_sec: session.overall_remaining_sec,
            total_duration_sec,
            step_clock: format_duration(session.step_remaining_sec),
            overall_clock: format_duration(session.overall_remaining_sec),
            step_percent: step_progress_percent(session.step_remaining_sec, step_duration_sec),
            overall_percent: overall_progress_percent(
                session.overall_remaining_sec,
                total_duration_sec,
            ),
        })
    }

    fn resolve<S: RecipeSource + ?Sized>(&self, source: &S) -> Resolved {
        let Some(session) = self.engine.session() else {
            return Resolved::Idle;
        };
        match source.recipe(&session.recipe_id) {
            Some(recipe) if session.current_step_index < recipe.steps.len() => {
                Resolved::Found(session.current_step_index)
            }
            _ => Resolved::Missing,
        }
    }

    fn advance_from<S: RecipeSource + ?Sized>(&mut self, source: &S, index: usize) -> TickOutcome {
        let next = self
            .engine
            .active_recipe_id()
            .and_then(|id| source.recipe(id))
            .and_then(|recipe: &Recipe| recipe.step(index + 1))
            .map(|step| step.duration_seconds());

        match next {
            Some(duration) => {
                self.engine.stop_current_step(false, Some(duration));
                TickOutcome::Advanced {
                    step_index: index + 1,
                }
            }
            None => {
                self.engine.stop_current_step(true, None);
                TickOutcome::Finished
            }
        }
    }

    fn abandon(&mut self) -> TickOutcome {
        warn!(
            recipe_id = self.engine.active_recipe_id().unwrap_or_default(),
            "Active recipe or step no longer exists, ending session"
        );
        self.engine.end();
        TickOutcome::Abandoned
    }
}

enum Resolved {
    Idle,
    Missing,
    Found(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::recipe::{Difficulty, RecipeBuilder};
    use chrono::Utc;

    fn recipe(id: &str, minutes: &[u32]) -> Recipe {
        let mut builder = RecipeBuilder::new()
            .title("Test recipe")
            .difficulty(Difficulty::Easy)
            .ingredient("x", "X", 1.0, "g");
        for (n, m) in minutes.iter().enumerate() {
            builder = builder.instruction_step(format!("s{n}"), format!("Step {n}"), *m, ["x"]);
        }
        Recipe::from_draft(builder.build().unwrap(), id, Utc::now())
    }

    fn controller() -> (CookController<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        (
            CookController::with_engine(CookingEngine::with_clock(clock.clone())),
            clock,
        )
    }

    #[test]
    fn start_uses_first_step_and_total() {
        let recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, _) = controller();

        assert!(controller.start(&recipes, "r"));

        let s = controller.session().unwrap();
        assert_eq!(s.step_remaining_sec, 60);
        assert_eq!(s.overall_remaining_sec, 180);
    }

    #[test]
    fn start_unknown_recipe_fails() {
        let recipes: Vec<Recipe> = Vec::new();
        let (mut controller, _) = controller();
        assert!(!controller.start(&recipes, "nope"));
        assert!(controller.session().is_none());
    }

    #[test]
    fn tick_counts_then_auto_advances() {
        let recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, clock) = controller();
        controller.start(&recipes, "r");

        clock.advance_secs(30);
        assert_eq!(
            controller.on_tick(&recipes),
            TickOutcome::Counting {
                elapsed: 30,
                step_remaining_sec: 30,
                overall_remaining_sec: 150,
            }
        );

        clock.advance_secs(45);
        assert_eq!(
            controller.on_tick(&recipes),
            TickOutcome::Advanced { step_index: 1 }
        );
        let s = controller.session().unwrap();
        assert_eq!(s.current_step_index, 1);
        assert_eq!(s.step_remaining_sec, 120);
        assert_eq!(s.overall_remaining_sec, 105);

        clock.advance_secs(120);
        assert_eq!(controller.on_tick(&recipes), TickOutcome::Finished);
        assert!(controller.session().is_none());
        assert_eq!(controller.on_tick(&recipes), TickOutcome::Idle);
    }

    #[test]
    fn paused_session_does_not_advance() {
        let recipes = vec![recipe("r", &[1])];
        let (mut controller, clock) = controller();
        controller.start(&recipes, "r");

        assert!(controller.toggle());
        clock.advance_secs(600);
        assert_eq!(controller.on_tick(&recipes), TickOutcome::Paused);
        assert_eq!(controller.session().unwrap().step_remaining_sec, 60);

        assert!(controller.toggle());
        assert!(controller.session().unwrap().is_running);
    }

    #[test]
    fn next_step_skips_ahead() {
        let recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, _) = controller();
        controller.start(&recipes, "r");

        assert_eq!(
            controller.next_step(&recipes),
            TickOutcome::Advanced { step_index: 1 }
        );
        assert_eq!(controller.next_step(&recipes), TickOutcome::Finished);
        assert_eq!(controller.next_step(&recipes), TickOutcome::Idle);
    }

    #[test]
    fn deleted_recipe_abandons_session() {
        let mut recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, _) = controller();
        controller.start(&recipes, "r");

        recipes.clear();

        assert_eq!(controller.on_tick(&recipes), TickOutcome::Abandoned);
        assert!(controller.session().is_none());
    }

    #[test]
    fn shortened_recipe_abandons_session() {
        let mut recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, _) = controller();
        controller.start(&recipes, "r");
        controller.next_step(&recipes);

        recipes[0].steps.truncate(1);

        assert_eq!(controller.next_step(&recipes), TickOutcome::Abandoned);
    }

    #[test]
    fn view_reports_progress() {
        let recipes = vec![recipe("r", &[1, 2])];
        let (mut controller, clock) = controller();
        assert!(controller.view(&recipes).is_none());
        controller.start(&recipes, "r");

        clock.advance_secs(15);
        controller.on_tick(&recipes);

        let view = controller.view(&recipes).unwrap();
        assert_eq!(view.step_index, 0);
        assert_eq!(view.step_count, 2);
        assert_eq!(view.step_description, "Step 0");
        assert_eq!(view.step_clock, "00:45");
        assert_eq!(view.overall_clock, "02:45");
        assert_eq!(view.step_percent, 25);
        assert_eq!(view.overall_percent, 8);
    }
}
