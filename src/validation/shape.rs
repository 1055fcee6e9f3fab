//! Wire shape of recipe records.
//!
//! On the wire a step is one flat object whose `type` decides which payload
//! field must be present. In memory the payload is a [`StepAction`], so the
//! "both" and "neither" shapes only exist here, at the parsing boundary.

use crate::recipe::{CookSettings, Difficulty, Ingredient, Recipe, Step, StepAction, StepType};
use crate::validation::rules::{self, check, conclude};
use crate::validation::violations::{ValidationError, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Payload field that tells an absent key (`None`) apart from an explicit
/// `null` (`Some(None)`).
pub type PayloadField<T> = Option<Option<T>>;

/// Flat step record as persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StepType,
    pub duration_minutes: u32,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_settings: PayloadField<CookSettings>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredient_ids: PayloadField<Vec<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<PayloadField<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl StepRecord {
    /// Convert into a [`Step`], reporting every shape problem at once.
    ///
    /// The forbidden payload field must be absent; an explicit `null`
    /// counts as present.
    pub fn into_step(self) -> Result<Step, ValidationError> {
        let action = match (self.kind, self.cooking_settings, self.ingredient_ids) {
            (StepType::Cooking, Some(Some(settings)), None) => StepAction::Cooking(settings),
            (StepType::Instruction, None, Some(Some(ids))) => StepAction::Instruction(ids),
            (kind, settings, ids) => return Err(shape_violations(&self.id, kind, &settings, &ids)),
        };

        Ok(Step {
            id: self.id,
            description: self.description,
            duration_minutes: self.duration_minutes,
            action,
        })
    }
}

fn shape_violations(
    id: &str,
    kind: StepType,
    settings: &PayloadField<CookSettings>,
    ids: &PayloadField<Vec<String>>,
) -> ValidationError {
    let (kind_name, required, required_present, forbidden, forbidden_present) = match kind {
        StepType::Cooking => (
            "cooking",
            "cookingSettings",
            matches!(settings, Some(Some(_))),
            "ingredientIds",
            ids.is_some(),
        ),
        StepType::Instruction => (
            "instruction",
            "ingredientIds",
            matches!(ids, Some(Some(_))),
            "cookingSettings",
            settings.is_some(),
        ),
    };

    let checks = vec![
        check(required_present, || Violation::MissingPayload {
            id: id.to_string(),
            kind: kind_name,
            field: required,
        }),
        check(!forbidden_present, || Violation::ConflictingPayload {
            id: id.to_string(),
            kind: kind_name,
            field: forbidden,
        }),
    ];

    match conclude(checks) {
        Err(err) => err,
        // Only reached for the two well-formed shapes, which into_step handles.
        Ok(()) => ValidationError::from(Violation::Malformed(format!("step '{id}'"))),
    }
}

impl TryFrom<StepRecord> for Step {
    type Error = ValidationError;

    fn try_from(record: StepRecord) -> Result<Self, Self::Error> {
        record.into_step()
    }
}

impl From<Step> for StepRecord {
    fn from(step: Step) -> Self {
        let (kind, cooking_settings, ingredient_ids) = match step.action {
            StepAction::Cooking(settings) => (StepType::Cooking, Some(Some(settings)), None),
            StepAction::Instruction(ids) => (StepType::Instruction, None, Some(Some(ids))),
        };
        Self {
            id: step.id,
            description: step.description,
            kind,
            duration_minutes: step.duration_minutes,
            cooking_settings,
            ingredient_ids,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRecord {
    id: String,
    title: String,
    #[serde(default)]
    cuisine: Option<String>,
    difficulty: Difficulty,
    ingredients: Vec<Ingredient>,
    steps: Vec<StepRecord>,
    #[serde(default)]
    is_favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parse and validate one raw persisted record.
///
/// Step shape problems from every step are reported together; cross-field
/// rules only run once every step has a well-formed shape.
pub fn parse_record(value: serde_json::Value) -> Result<Recipe, ValidationError> {
    let record: RecipeRecord = serde_json::from_value(value)
        .map_err(|e| ValidationError::from(Violation::Malformed(e.to_string())))?;

    let mut steps = Vec::with_capacity(record.steps.len());
    let mut violations = Vec::new();
    for raw in record.steps {
        match raw.into_step() {
            Ok(step) => steps.push(step),
            Err(err) => violations.extend_from_slice(err.violations()),
        }
    }
    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    let recipe = Recipe {
        id: record.id,
        title: record.title,
        cuisine: record.cuisine,
        difficulty: record.difficulty,
        ingredients: record.ingredients,
        steps,
        is_favorite: record.is_favorite,
        created_at: record.created_at,
        updated_at: record.updated_at,
    };
    rules::validate(&recipe)?;
    Ok(recipe)
}
