//! Build errors for the recipe builder.

use thiserror::Error;

/// Errors that can occur when building a recipe draft.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Recipe title not specified. Call .title(text) before .build()")]
    MissingTitle,

    #[error("Recipe difficulty not specified. Call .difficulty(level) before .build()")]
    MissingDifficulty,
}
