//! Fluent builder for recipe drafts.

use crate::recipe::error::BuildError;
use crate::recipe::model::{CookSettings, Difficulty, Ingredient, RecipeDraft, Step};

/// Builder for constructing a [`RecipeDraft`] with a fluent API.
///
/// The builder only checks that required fields are present. Range and
/// cross-reference checks happen when the draft is handed to the store.
///
/// # Example
///
/// ```rust
/// use cookwise::recipe::{Difficulty, RecipeBuilder};
///
/// let draft = RecipeBuilder::new()
///     .title("Pancakes")
///     .difficulty(Difficulty::Easy)
///     .ingredient("flour", "Flour", 200.0, "g")
///     .instruction_step("mix", "Mix the batter", 3, ["flour"])
///     .cooking_step("fry", "Fry", 5, 180, 1)
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.steps.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RecipeBuilder {
    title: Option<String>,
    cuisine: Option<String>,
    difficulty: Option<Difficulty>,
    ingredients: Vec<Ingredient>,
    steps: Vec<Step>,
    is_favorite: bool,
}

impl RecipeBuilder {
    /// Start an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (required).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Optional cuisine label.
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the difficulty (required).
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Mark the draft as a favorite.
    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Append an ingredient.
    pub fn ingredient(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        self.ingredients.push(Ingredient::new(id, name, quantity, unit));
        self
    }

    /// Append an appliance step.
    pub fn cooking_step(
        mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        temperature: i32,
        speed: i32,
    ) -> Self {
        self.steps.push(Step::cooking(
            id,
            description,
            duration_minutes,
            CookSettings { temperature, speed },
        ));
        self
    }

    /// Append a manual step referencing ingredient ids.
    pub fn instruction_step<I, S>(
        mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        ingredient_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(Step::instruction(
            id,
            description,
            duration_minutes,
            ingredient_ids,
        ));
        self
    }

    /// Add a pre-built step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Build the draft.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<RecipeDraft, BuildError> {
        let title = self.title.ok_or(BuildError::MissingTitle)?;
        let difficulty = self.difficulty.ok_or(BuildError::MissingDifficulty)?;

        Ok(RecipeDraft {
            title,
            cuisine: self.cuisine,
            difficulty,
            ingredients: self.ingredients,
            steps: self.steps,
            is_favorite: self.is_favorite,
        })
    }
}
