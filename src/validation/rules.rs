//! Structural rules for complete recipe records.

use crate::recipe::{Ingredient, Recipe, Step, StepAction};
use crate::validation::violations::{ValidationError, Violation};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_TEMPERATURE: i32 = 40;
pub const MAX_TEMPERATURE: i32 = 200;
pub const MIN_SPEED: i32 = 1;
pub const MAX_SPEED: i32 = 5;

/// Outcome of a single check.
pub type Check = Validation<(), NonEmptyVec<Violation>>;

pub(crate) fn check(ok: bool, violation: impl FnOnce() -> Violation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Collapse a batch of checks into a result carrying ALL violations.
pub(crate) fn conclude(checks: Vec<Check>) -> Result<(), ValidationError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ValidationError::new(errors.iter().cloned().collect())),
    }
}

fn ingredient_checks(ingredient: &Ingredient, seen: &mut HashSet<String>, checks: &mut Vec<Check>) {
    let id = &ingredient.id;
    checks.push(check(seen.insert(id.clone()), || {
        Violation::DuplicateIngredientId { id: id.clone() }
    }));
    checks.push(check(!ingredient.name.is_empty(), || {
        Violation::EmptyIngredientName { id: id.clone() }
    }));
    checks.push(check(
        ingredient.quantity.is_finite() && ingredient.quantity > 0.0,
        || Violation::NonPositiveQuantity {
            id: id.clone(),
            quantity: ingredient.quantity,
        },
    ));
    checks.push(check(!ingredient.unit.is_empty(), || Violation::EmptyUnit {
        id: id.clone(),
    }));
}

fn step_checks(
    step: &Step,
    ingredient_ids: &HashSet<String>,
    seen: &mut HashSet<String>,
    checks: &mut Vec<Check>,
) {
    let id = &step.id;
    checks.push(check(seen.insert(id.clone()), || Violation::DuplicateStepId {
        id: id.clone(),
    }));
    checks.push(check(!step.description.is_empty(), || {
        Violation::EmptyStepDescription { id: id.clone() }
    }));
    checks.push(check(step.duration_minutes > 0, || Violation::ZeroDuration {
        id: id.clone(),
    }));

    match &step.action {
        StepAction::Cooking(settings) => {
            checks.push(check(
                (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&settings.temperature),
                || Violation::TemperatureOutOfRange {
                    id: id.clone(),
                    temperature: settings.temperature,
                    min: MIN_TEMPERATURE,
                    max: MAX_TEMPERATURE,
                },
            ));
            checks.push(check(
                (MIN_SPEED..=MAX_SPEED).contains(&settings.speed),
                || Violation::SpeedOutOfRange {
                    id: id.clone(),
                    speed: settings.speed,
                    min: MIN_SPEED,
                    max: MAX_SPEED,
                },
            ));
        }
        StepAction::Instruction(refs) => {
            checks.push(check(!refs.is_empty(), || {
                Violation::NoIngredientReferences { id: id.clone() }
            }));
            for ingredient_id in refs {
                checks.push(check(ingredient_ids.contains(ingredient_id), || {
                    Violation::UnknownIngredient {
                        step_id: id.clone(),
                        ingredient_id: ingredient_id.clone(),
                    }
                }));
            }
        }
    }
}

/// Run every rule against a complete record, accumulating ALL violations.
pub fn check_recipe(recipe: &Recipe) -> Vec<Check> {
    let mut checks = Vec::new();

    let title_len = recipe.title.chars().count();
    checks.push(check(title_len >= MIN_TITLE_CHARS, || {
        Violation::TitleTooShort {
            min: MIN_TITLE_CHARS,
            len: title_len,
        }
    }));
    checks.push(check(!recipe.ingredients.is_empty(), || {
        Violation::NoIngredients
    }));
    checks.push(check(!recipe.steps.is_empty(), || Violation::NoSteps));

    let mut ingredient_ids = HashSet::new();
    for ingredient in &recipe.ingredients {
        ingredient_checks(ingredient, &mut ingredient_ids, &mut checks);
    }

    let mut step_ids = HashSet::new();
    for step in &recipe.steps {
        step_checks(step, &ingredient_ids, &mut step_ids, &mut checks);
    }

    checks
}

/// Validate a complete record. The record stands or falls as a whole.
pub fn validate(recipe: &Recipe) -> Result<(), ValidationError> {
    conclude(check_recipe(recipe))
}
