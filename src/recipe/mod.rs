//! Recipe data model.
//!
//! A recipe is an ordered sequence of steps plus the ingredients those steps
//! use. Steps are a sum type: a cooking step carries machine settings, an
//! instruction step carries ingredient references, and no step can carry
//! both or neither.

pub mod builder;
pub mod error;
pub mod model;
pub mod query;

pub use builder::RecipeBuilder;
pub use error::BuildError;
pub use model::{
    CookSettings, Difficulty, Direction, Ingredient, Recipe, RecipeDraft, Step, StepAction,
    StepType,
};
pub use query::{browse, complexity_score, total_ingredients, total_time_minutes, SortKey};
