//! Recipe data types.

use crate::validation::shape::StepRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How demanding a recipe is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Weight used when scoring recipe complexity.
    pub fn weight(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Wire name of the level.
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ingredient of a recipe, referenced by id from instruction steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    /// Free-form unit such as `g`, `ml` or `pcs`.
    pub unit: String,
}

impl Ingredient {
    /// Ingredient with the given id, display name and amount.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Machine settings for a cooking step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookSettings {
    /// Degrees, valid in `40..=200`.
    pub temperature: i32,
    /// Valid in `1..=5`.
    pub speed: i32,
}

/// Payload of a step. A step is either a timed machine action or a timed
/// instruction that uses some of the recipe's ingredients, never both.
#[derive(Clone, Debug, PartialEq)]
pub enum StepAction {
    Cooking(CookSettings),
    Instruction(Vec<String>),
}

impl StepAction {
    /// Discriminant written as the step's `type`.
    pub fn kind(&self) -> StepType {
        match self {
            Self::Cooking(_) => StepType::Cooking,
            Self::Instruction(_) => StepType::Instruction,
        }
    }
}

/// Discriminant of [`StepAction`] as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Cooking,
    Instruction,
}

/// One ordered unit of a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepRecord", into = "StepRecord")]
pub struct Step {
    pub id: String,
    pub description: String,
    pub duration_minutes: u32,
    pub action: StepAction,
}

impl Step {
    /// Appliance step run at `settings`.
    pub fn cooking(
        id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        settings: CookSettings,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            duration_minutes,
            action: StepAction::Cooking(settings),
        }
    }

    /// Manual step using the listed ingredients.
    pub fn instruction<I, S>(
        id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        ingredient_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            description: description.into(),
            duration_minutes,
            action: StepAction::Instruction(ingredient_ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Step length in seconds, as the session timer counts it.
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

/// A recipe before the store has assigned its id and timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// A persisted recipe record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Complete a draft with an id and equal created/updated timestamps.
    pub fn from_draft(draft: RecipeDraft, id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            cuisine: draft.cuisine,
            difficulty: draft.difficulty,
            ingredients: draft.ingredients,
            steps: draft.steps,
            is_favorite: draft.is_favorite,
            created_at: now,
            updated_at: now,
        }
    }

    /// Step at `index` in cooking order.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Index of the step with `step_id`.
    pub fn step_position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    /// Ingredient with `id`.
    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

/// Direction for moving a step within its recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward index 0.
    Up,
    /// Toward the end.
    Down,
}
