//! Violations of recipe invariants.

use thiserror::Error;

/// A single broken invariant of a candidate recipe record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("Record is malformed: {0}")]
    Malformed(String),

    #[error("Title must be at least {min} characters (got {len})")]
    TitleTooShort { min: usize, len: usize },

    #[error("Recipe needs at least one ingredient")]
    NoIngredients,

    #[error("Recipe needs at least one step")]
    NoSteps,

    #[error("Ingredient id '{id}' is used more than once")]
    DuplicateIngredientId { id: String },

    #[error("Ingredient '{id}' has an empty name")]
    EmptyIngredientName { id: String },

    #[error("Ingredient '{id}' quantity must be positive (got {quantity})")]
    NonPositiveQuantity { id: String, quantity: f64 },

    #[error("Ingredient '{id}' has an empty unit")]
    EmptyUnit { id: String },

    #[error("Step id '{id}' is used more than once")]
    DuplicateStepId { id: String },

    #[error("Step '{id}' has an empty description")]
    EmptyStepDescription { id: String },

    #[error("Step '{id}' duration must be a positive number of minutes")]
    ZeroDuration { id: String },

    #[error("Step '{id}' temperature {temperature} is outside {min}..={max}")]
    TemperatureOutOfRange {
        id: String,
        temperature: i32,
        min: i32,
        max: i32,
    },

    #[error("Step '{id}' speed {speed} is outside {min}..={max}")]
    SpeedOutOfRange {
        id: String,
        speed: i32,
        min: i32,
        max: i32,
    },

    #[error("Instruction step '{id}' must reference at least one ingredient")]
    NoIngredientReferences { id: String },

    #[error("Step '{step_id}' references unknown ingredient '{ingredient_id}'")]
    UnknownIngredient {
        step_id: String,
        ingredient_id: String,
    },

    #[error("Step '{id}' of type {kind} is missing its {field}")]
    MissingPayload {
        id: String,
        kind: &'static str,
        field: &'static str,
    },

    #[error("Step '{id}' of type {kind} must not carry {field}")]
    ConflictingPayload {
        id: String,
        kind: &'static str,
        field: &'static str,
    },
}

/// A candidate recipe was rejected. Carries every violation found, in the
/// order the checks ran; never empty.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Recipe failed validation: {}", render(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Every violation found, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation matches `predicate`.
    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::new(vec![violation])
    }
}
