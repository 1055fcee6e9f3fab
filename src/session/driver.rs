//! Periodic tick driver for async hosts.
//!
//! In a multi-threaded host the controller and the recipe source are shared
//! state; each sits behind its own lock and the driver takes them in a fixed
//! order (source, then controller) for the duration of one tick.

use super::controller::{CookController, TickOutcome};
use crate::clock::Clock;
use crate::store::RecipeSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Call [`CookController::on_tick`] every `period` until the session ends.
///
/// Late ticks are not replayed in a burst; the engine's wall-clock delta
/// accounts for the gap on the next tick. Returns the terminal outcome.
pub async fn drive<C, S>(
    controller: Arc<Mutex<CookController<C>>>,
    source: Arc<RwLock<S>>,
    period: Duration,
) -> TickOutcome
where
    C: Clock,
    S: RecipeSource + Send + Sync,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let source = source.read().await;
        let mut controller = controller.lock().await;
        let outcome = controller.on_tick(&*source);
        if outcome.is_terminal() {
            debug!(?outcome, "Tick driver stopping");
            return outcome;
        }
    }
}
