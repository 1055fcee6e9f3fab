//! Cookwise: recipe storage and guided-cooking sessions
//!
//! Two pure state-transition engines over serializable state:
//!
//! - **Recipe store**: owns the recipe set, validates every candidate record
//!   as a whole before committing it, and persists the set best-effort after
//!   each mutation.
//! - **Cooking session engine**: owns at most one active session and counts
//!   its step and overall timers down by real wall-clock time, so late or
//!   skipped ticks correct themselves on the next tick.
//!
//! # Example
//!
//! ```rust
//! use cookwise::clock::ManualClock;
//! use cookwise::recipe::{Difficulty, RecipeBuilder};
//! use cookwise::session::{CookController, CookingEngine, TickOutcome};
//! use cookwise::storage::{MemoryStore, DEFAULT_RECIPES_KEY};
//! use cookwise::store::RecipeStore;
//!
//! let mut store = RecipeStore::open(MemoryStore::new(), DEFAULT_RECIPES_KEY);
//! let draft = RecipeBuilder::new()
//!     .title("Soft-boiled egg")
//!     .difficulty(Difficulty::Easy)
//!     .ingredient("egg", "Egg", 1.0, "pcs")
//!     .instruction_step("drop", "Lower the egg into boiling water", 1, ["egg"])
//!     .cooking_step("boil", "Boil", 6, 100, 1)
//!     .build()
//!     .unwrap();
//! let id = store.create(draft).unwrap().id.clone();
//!
//! let clock = ManualClock::default();
//! let mut controller = CookController::with_engine(CookingEngine::with_clock(clock.clone()));
//! assert!(controller.start(&store, &id));
//!
//! clock.advance_secs(60);
//! assert_eq!(controller.on_tick(&store), TickOutcome::Advanced { step_index: 1 });
//! ```

pub mod clock;
pub mod config;
pub mod progress;
pub mod recipe;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CookbookConfig;
pub use recipe::{Recipe, RecipeBuilder, RecipeDraft, Step};
pub use session::{CookController, CookingEngine, CookingSession, TickOutcome};
pub use store::{RecipeSource, RecipeStore};
pub use validation::{ValidationError, Violation};
