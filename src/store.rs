//! Authoritative in-memory recipe set with best-effort persistence.
//!
//! Every mutation follows the same shape: resolve the target by id (a missing
//! id is a silent no-op), build the complete candidate record, validate it,
//! commit it in memory, then persist the whole set. A rejected candidate
//! leaves both memory and storage untouched.

use crate::clock::{Clock, SystemClock};
use crate::recipe::{Direction, Ingredient, Recipe, RecipeDraft, Step};
use crate::storage::{self, KeyValueStore};
use crate::validation::{validate, ValidationError};
use tracing::debug;
use uuid::Uuid;

/// Read access to recipes by id.
pub trait RecipeSource {
    fn recipe(&self, id: &str) -> Option<&Recipe>;
}

impl RecipeSource for [Recipe] {
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.iter().find(|r| r.id == id)
    }
}

impl RecipeSource for Vec<Recipe> {
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.as_slice().recipe(id)
    }
}

/// Owns the recipe set.
pub struct RecipeStore<K: KeyValueStore, C: Clock = SystemClock> {
    items: Vec<Recipe>,
    storage: K,
    key: String,
    clock: C,
}

impl<K: KeyValueStore> RecipeStore<K, SystemClock> {
    /// Open a store, loading every valid record persisted under `key`.
    pub fn open(storage: K, key: impl Into<String>) -> Self {
        Self::with_clock(storage, key, SystemClock)
    }
}

impl<K: KeyValueStore, C: Clock> RecipeStore<K, C> {
    /// Like [`RecipeStore::open`], stamping times from `clock`.
    pub fn with_clock(storage: K, key: impl Into<String>, clock: C) -> Self {
        let key = key.into();
        let items = storage::load_records(&storage, &key);
        Self {
            items,
            storage,
            key,
            clock,
        }
    }

    /// All recipes in store order (insertion order unless reordered).
    pub fn list(&self) -> &[Recipe] {
        &self.items
    }

    /// Recipe with `id`.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Backing key-value store.
    pub fn storage(&self) -> &K {
        &self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|r| r.id == id)
    }

    fn persist(&mut self) {
        storage::save_records(&mut self.storage, &self.key, &self.items);
    }

    /// Validate `candidate`, then swap it in at `index` and persist.
    fn commit(&mut self, index: usize, candidate: Recipe) -> Result<(), ValidationError> {
        validate(&candidate)?;
        self.items[index] = candidate;
        self.persist();
        Ok(())
    }

    /// Create a recipe from a draft, assigning a fresh id and timestamps.
    pub fn create(&mut self, draft: RecipeDraft) -> Result<&Recipe, ValidationError> {
        let recipe = Recipe::from_draft(draft, Uuid::new_v4().to_string(), self.clock.now());
        validate(&recipe)?;

        debug!(id = %recipe.id, title = %recipe.title, "Created recipe");
        self.items.push(recipe);
        self.persist();
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Replace the record with the same id, stamping a new update time.
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub fn update(&mut self, recipe: Recipe) -> Result<bool, ValidationError> {
        let Some(index) = self.position(&recipe.id) else {
            return Ok(false);
        };
        let candidate = Recipe {
            updated_at: self.clock.now(),
            ..recipe
        };
        self.commit(index, candidate)?;
        debug!(id = %self.items[index].id, "Updated recipe");
        Ok(true)
    }

    /// Remove every record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        debug!(id, "Deleted recipe");
        true
    }

    /// Flip the favorite flag. Does not touch the update time.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let recipe = &mut self.items[index];
        recipe.is_favorite = !recipe.is_favorite;
        debug!(id, favorite = recipe.is_favorite, "Toggled favorite");
        self.persist();
        true
    }

    /// Swap a step with its neighbour in `direction`.
    ///
    /// No-op when either id is unknown or the step is already at that edge.
    pub fn reorder_step(&mut self, id: &str, step_id: &str, direction: Direction) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let now = self.clock.now();
        let recipe = &mut self.items[index];
        let Some(from) = recipe.step_position(step_id) else {
            return false;
        };
        let to = match direction {
            Direction::Up => match from.checked_sub(1) {
                Some(to) => to,
                None => return false,
            },
            Direction::Down if from + 1 < recipe.steps.len() => from + 1,
            Direction::Down => return false,
        };

        recipe.steps.swap(from, to);
        recipe.updated_at = now;
        debug!(id, step_id, from, to, "Reordered step");
        self.persist();
        true
    }

    /// Append an ingredient. The resulting record must still validate.
    pub fn add_ingredient(&mut self, id: &str, ingredient: Ingredient) -> Result<bool, ValidationError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let mut candidate = self.items[index].clone();
        candidate.ingredients.push(ingredient);
        self.commit(index, candidate)?;
        debug!(id, "Added ingredient");
        Ok(true)
    }

    /// Append a step. The resulting record must still validate.
    pub fn add_step(&mut self, id: &str, step: Step) -> Result<bool, ValidationError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let mut candidate = self.items[index].clone();
        candidate.steps.push(step);
        self.commit(index, candidate)?;
        debug!(id, "Added step");
        Ok(true)
    }
}

impl<K: KeyValueStore, C: Clock> RecipeSource for RecipeStore<K, C> {
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::recipe::{CookSettings, Difficulty, RecipeBuilder};
    use crate::storage::{load_records, MemoryStore, DEFAULT_RECIPES_KEY};
    use crate::validation::Violation;

    fn draft() -> RecipeDraft {
        RecipeBuilder::new()
            .title("Shakshuka")
            .difficulty(Difficulty::Medium)
            .ingredient("egg", "Egg", 4.0, "pcs")
            .ingredient("tom", "Tomatoes", 400.0, "g")
            .instruction_step("a", "Add tomatoes", 1, ["tom"])
            .cooking_step("b", "Simmer", 10, 90, 1)
            .instruction_step("c", "Crack eggs", 1, ["egg"])
            .build()
            .unwrap()
    }

    fn store() -> (RecipeStore<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let store = RecipeStore::with_clock(MemoryStore::new(), DEFAULT_RECIPES_KEY, clock.clone());
        (store, clock)
    }

    fn persisted(store: &RecipeStore<MemoryStore, ManualClock>) -> Vec<Recipe> {
        load_records(store.storage(), DEFAULT_RECIPES_KEY)
    }

    fn step_ids(recipe: &Recipe) -> Vec<&str> {
        recipe.steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn create_assigns_id_and_equal_timestamps() {
        let (mut store, _) = store();
        let before = store.list().len();

        let created = store.create(draft()).unwrap().clone();

        assert_eq!(store.list().len(), before + 1);
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(persisted(&store), vec![created]);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let (mut store, _) = store();
        let a = store.create(draft()).unwrap().id.clone();
        let b = store.create(draft()).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn create_rejects_invalid_draft_without_side_effects() {
        let (mut store, _) = store();
        let mut bad = draft();
        bad.title = "Hi".to_string();

        let err = store.create(bad).unwrap_err();

        assert!(err.contains(|v| matches!(v, Violation::TitleTooShort { .. })));
        assert!(store.is_empty());
        assert_eq!(store.storage().get(DEFAULT_RECIPES_KEY).unwrap(), None);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let (mut store, _) = store();
        let created = store.create(draft()).unwrap().clone();
        let snapshot = store.list().to_vec();

        let mut other = created;
        other.id = "missing".to_string();
        other.title = "Something else".to_string();

        assert_eq!(store.update(other), Ok(false));
        assert_eq!(store.list(), snapshot.as_slice());
    }

    #[test]
    fn update_replaces_and_stamps() {
        let (mut store, clock) = store();
        let mut recipe = store.create(draft()).unwrap().clone();
        clock.advance_secs(60);

        recipe.title = "Green shakshuka".to_string();
        assert_eq!(store.update(recipe.clone()), Ok(true));

        let stored = store.get(&recipe.id).unwrap();
        assert_eq!(stored.title, "Green shakshuka");
        assert_eq!(stored.created_at, recipe.created_at);
        assert_eq!((stored.updated_at - stored.created_at).num_seconds(), 60);
        assert_eq!(persisted(&store)[0].title, "Green shakshuka");
    }

    #[test]
    fn invalid_update_leaves_store_unchanged() {
        let (mut store, _) = store();
        let mut recipe = store.create(draft()).unwrap().clone();
        let snapshot = store.list().to_vec();

        recipe.steps[1] = Step::cooking(
            "b",
            "Scorch",
            10,
            CookSettings {
                temperature: 500,
                speed: 1,
            },
        );

        assert!(store.update(recipe).is_err());
        assert_eq!(store.list(), snapshot.as_slice());
        assert_eq!(persisted(&store), snapshot);
    }

    #[test]
    fn delete_removes_and_persists() {
        let (mut store, _) = store();
        let id = store.create(draft()).unwrap().id.clone();

        assert!(!store.delete("missing"));
        assert!(store.delete(&id));
        assert!(store.is_empty());
        assert!(persisted(&store).is_empty());
    }

    #[test]
    fn delete_leaves_no_record_with_that_id() {
        let now = ManualClock::default().now();
        let twin = Recipe::from_draft(draft(), "dup", now);
        let blob = serde_json::to_string(&[twin.clone(), twin]).unwrap();
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_RECIPES_KEY, &blob).unwrap();

        let mut store = RecipeStore::open(storage, DEFAULT_RECIPES_KEY);
        assert_eq!(store.len(), 1);

        assert!(store.delete("dup"));
        assert!(store.get("dup").is_none());
        assert!(store.is_empty());
        assert!(load_records(store.storage(), DEFAULT_RECIPES_KEY).is_empty());
    }

    #[test]
    fn toggle_favorite_flips_flag() {
        let (mut store, _) = store();
        let id = store.create(draft()).unwrap().id.clone();

        assert!(store.toggle_favorite(&id));
        assert!(store.get(&id).unwrap().is_favorite);
        assert!(persisted(&store)[0].is_favorite);

        assert!(store.toggle_favorite(&id));
        assert!(!store.get(&id).unwrap().is_favorite);
        assert!(!store.toggle_favorite("missing"));
    }

    #[test]
    fn reorder_at_edges_is_noop() {
        let (mut store, _) = store();
        let recipe = store.create(draft()).unwrap().clone();

        assert!(!store.reorder_step(&recipe.id, "a", Direction::Up));
        assert!(!store.reorder_step(&recipe.id, "c", Direction::Down));
        assert!(!store.reorder_step(&recipe.id, "zzz", Direction::Down));
        assert!(!store.reorder_step("missing", "a", Direction::Down));
        assert_eq!(store.get(&recipe.id), Some(&recipe));
    }

    #[test]
    fn reorder_swaps_neighbours() {
        let (mut store, clock) = store();
        let id = store.create(draft()).unwrap().id.clone();
        clock.advance_secs(5);

        assert!(store.reorder_step(&id, "a", Direction::Down));
        assert_eq!(step_ids(store.get(&id).unwrap()), ["b", "a", "c"]);

        assert!(store.reorder_step(&id, "c", Direction::Up));
        assert_eq!(step_ids(store.get(&id).unwrap()), ["b", "c", "a"]);

        let stored = store.get(&id).unwrap();
        assert!(stored.updated_at > stored.created_at);
        assert_eq!(step_ids(&persisted(&store)[0]), ["b", "c", "a"]);
    }

    #[test]
    fn add_ingredient_and_step_append() {
        let (mut store, _) = store();
        let id = store.create(draft()).unwrap().id.clone();

        assert_eq!(
            store.add_ingredient(&id, Ingredient::new("salt", "Salt", 1.0, "tsp")),
            Ok(true)
        );
        assert_eq!(
            store.add_step(&id, Step::instruction("d", "Season", 1, ["salt"])),
            Ok(true)
        );

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.ingredients.last().unwrap().id, "salt");
        assert_eq!(step_ids(stored), ["a", "b", "c", "d"]);
        assert_eq!(persisted(&store)[0].steps.len(), 4);
    }

    #[test]
    fn add_to_unknown_recipe_is_noop() {
        let (mut store, _) = store();
        assert_eq!(
            store.add_ingredient("missing", Ingredient::new("x", "X", 1.0, "g")),
            Ok(false)
        );
        assert_eq!(
            store.add_step("missing", Step::instruction("x", "X", 1, ["x"])),
            Ok(false)
        );
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let (mut store, _) = store();
        let id = store.create(draft()).unwrap().id.clone();
        let snapshot = store.list().to_vec();

        let err = store
            .add_ingredient(&id, Ingredient::new("egg", "Duck egg", 1.0, "pcs"))
            .unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::DuplicateIngredientId { .. })));

        let err = store
            .add_step(&id, Step::instruction("e", "Use butter", 1, ["butter"]))
            .unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::UnknownIngredient { .. })));

        assert_eq!(store.list(), snapshot.as_slice());
    }

    #[test]
    fn reopening_loads_persisted_records() {
        let (mut store, _) = store();
        let created = store.create(draft()).unwrap().clone();

        let storage = store.storage().clone();
        let reopened = RecipeStore::open(storage, DEFAULT_RECIPES_KEY);

        assert_eq!(reopened.list(), &[created]);
    }

    #[test]
    fn persistence_failure_keeps_memory_state() {
        let clock = ManualClock::default();
        let mut store = RecipeStore::with_clock(MemoryStore::with_quota(16), DEFAULT_RECIPES_KEY, clock);

        let id = store.create(draft()).unwrap().id.clone();

        assert!(store.get(&id).is_some());
        assert_eq!(store.storage().get(DEFAULT_RECIPES_KEY).unwrap(), None);
    }
}
