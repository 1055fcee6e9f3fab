//! Guided-cooking session state machine.
//!
//! - [`CookingEngine`] owns zero or one [`CookingSession`] and applies the
//!   start / pause / resume / stop-step / tick / end commands.
//! - [`CookController`] resolves recipes, auto-advances steps whose countdown
//!   reached zero and produces display snapshots.
//! - [`SessionHistory`] records every phase change of the current session.
//!
//! # Example
//!
//! ```rust
//! use cookwise::clock::ManualClock;
//! use cookwise::session::CookingEngine;
//!
//! let clock = ManualClock::default();
//! let mut engine = CookingEngine::with_clock(clock.clone());
//!
//! engine.start("soup", 10, 100);
//! clock.advance_secs(3);
//! engine.tick();
//!
//! let session = engine.session().unwrap();
//! assert_eq!(session.step_remaining_sec, 7);
//! assert_eq!(session.overall_remaining_sec, 97);
//! ```

mod controller;
#[cfg(feature = "runtime")]
mod driver;
mod engine;
mod history;
mod phase;

pub use controller::{CookController, SessionView, TickOutcome};
#[cfg(feature = "runtime")]
pub use driver::drive;
pub use engine::{CookingEngine, CookingSession};
pub use history::{PhaseTransition, SessionHistory};
pub use phase::SessionPhase;
