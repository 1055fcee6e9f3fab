//! Recipe validation.
//!
//! Every mutation that introduces or changes recipe content runs the full
//! rule set against the complete candidate record before anything is
//! committed. Rules use Stillwater's `Validation` type so a rejected record
//! reports ALL of its violations, not just the first one.
//!
//! # Example
//!
//! ```rust
//! use cookwise::recipe::{Difficulty, Recipe, RecipeBuilder};
//! use cookwise::validation::{validate, Violation};
//! use chrono::Utc;
//!
//! let draft = RecipeBuilder::new()
//!     .title("Ok")
//!     .difficulty(Difficulty::Easy)
//!     .ingredient("w", "Water", 1.0, "l")
//!     .cooking_step("boil", "Boil", 5, 100, 1)
//!     .build()
//!     .unwrap();
//! let recipe = Recipe::from_draft(draft, "r1", Utc::now());
//!
//! let err = validate(&recipe).unwrap_err();
//! assert!(err.contains(|v| matches!(v, Violation::TitleTooShort { .. })));
//! ```

pub mod rules;
pub mod shape;
pub mod violations;

pub use rules::{check_recipe, validate};
pub use shape::{parse_record, PayloadField, StepRecord};
pub use violations::{ValidationError, Violation};
