//! Derived recipe figures and list browsing.

use crate::recipe::model::{Difficulty, Recipe};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sum of step durations in minutes.
pub fn total_time_minutes(recipe: &Recipe) -> u64 {
    recipe
        .steps
        .iter()
        .map(|s| u64::from(s.duration_minutes))
        .sum()
}

/// Number of ingredients.
pub fn total_ingredients(recipe: &Recipe) -> usize {
    recipe.ingredients.len()
}

/// Difficulty weight multiplied by the number of steps.
pub fn complexity_score(recipe: &Recipe) -> u32 {
    let steps = u32::try_from(recipe.steps.len()).unwrap_or(u32::MAX);
    recipe.difficulty.weight().saturating_mul(steps)
}

/// Ordering applied when browsing the recipe list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    TimeAsc,
    TimeDesc,
    NameAsc,
    NameDesc,
    /// Favorites first, otherwise insertion order.
    Favorites,
}

fn compare(a: &Recipe, b: &Recipe, key: SortKey) -> Ordering {
    match key {
        SortKey::TimeAsc => total_time_minutes(a).cmp(&total_time_minutes(b)),
        SortKey::TimeDesc => total_time_minutes(b).cmp(&total_time_minutes(a)),
        SortKey::NameAsc => compare_titles(a, b),
        SortKey::NameDesc => compare_titles(b, a),
        SortKey::Favorites => b.is_favorite.cmp(&a.is_favorite),
    }
}

fn compare_titles(a: &Recipe, b: &Recipe) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Filter by difficulty (an empty filter keeps everything) and sort.
///
/// The sort is stable, so recipes that compare equal keep store order.
pub fn browse<'a>(recipes: &'a [Recipe], difficulties: &[Difficulty], key: SortKey) -> Vec<&'a Recipe> {
    let mut selected: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| difficulties.is_empty() || difficulties.contains(&r.difficulty))
        .collect();
    selected.sort_by(|a, b| compare(a, b, key));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::builder::RecipeBuilder;
    use chrono::Utc;

    fn recipe(id: &str, title: &str, difficulty: Difficulty, minutes: &[u32], fav: bool) -> Recipe {
        let mut builder = RecipeBuilder::new()
            .title(title)
            .difficulty(difficulty)
            .favorite(fav)
            .ingredient("i1", "Salt", 1.0, "g");
        for (n, m) in minutes.iter().enumerate() {
            builder = builder.instruction_step(format!("s{n}"), "Do it", *m, ["i1"]);
        }
        Recipe::from_draft(builder.build().unwrap(), id, Utc::now())
    }

    fn ids(list: &[&Recipe]) -> Vec<String> {
        list.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("a", "banana bread", Difficulty::Medium, &[10, 50], false),
            recipe("b", "Apple pie", Difficulty::Hard, &[5, 5], true),
            recipe("c", "Carrot salad", Difficulty::Easy, &[3], false),
        ]
    }

    #[test]
    fn figures_from_steps() {
        let r = recipe("a", "Bread", Difficulty::Hard, &[10, 50, 5], false);
        assert_eq!(total_time_minutes(&r), 65);
        assert_eq!(total_ingredients(&r), 1);
        assert_eq!(complexity_score(&r), 9);
    }

    #[test]
    fn sort_by_time() {
        let recipes = sample();
        assert_eq!(ids(&browse(&recipes, &[], SortKey::TimeAsc)), ["c", "b", "a"]);
        assert_eq!(ids(&browse(&recipes, &[], SortKey::TimeDesc)), ["a", "b", "c"]);
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let recipes = sample();
        assert_eq!(ids(&browse(&recipes, &[], SortKey::NameAsc)), ["b", "a", "c"]);
        assert_eq!(ids(&browse(&recipes, &[], SortKey::NameDesc)), ["c", "a", "b"]);
    }

    #[test]
    fn favorites_first_keeps_store_order_otherwise() {
        let recipes = sample();
        assert_eq!(ids(&browse(&recipes, &[], SortKey::Favorites)), ["b", "a", "c"]);
    }

    #[test]
    fn difficulty_filter() {
        let recipes = sample();
        let picked = browse(&recipes, &[Difficulty::Easy, Difficulty::Hard], SortKey::TimeAsc);
        assert_eq!(ids(&picked), ["c", "b"]);
    }
}
