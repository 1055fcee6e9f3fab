//! Durable storage for the recipe set.
//!
//! The whole recipe set is one JSON array stored under a single key and
//! replaced as a unit on every mutation. Persistence is best effort: a
//! missing or corrupt blob loads as an empty set, and a failed write is
//! logged and dropped. The in-memory set stays the source of truth for the
//! life of the process.

use crate::recipe::Recipe;
use crate::validation::parse_record;
use std::collections::HashSet;
use tracing::{debug, warn};

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which recipes are stored by default.
pub const DEFAULT_RECIPES_KEY: &str = "recipes:v1";

/// Host-provided durable key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key` as one atomic operation.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Read the raw records stored under `key`.
///
/// Never fails: a missing, unreadable, unparsable or non-array blob yields an
/// empty list.
pub fn load_raw<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Vec<serde_json::Value> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read recipe blob, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            warn!(key, "Recipe blob is not an array, starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!(key, error = %e, "Recipe blob is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Load the records under `key`, keeping only those that pass validation.
///
/// Ids are unique in the loaded set: when a blob repeats an id, the first
/// valid record wins and later ones are discarded.
pub fn load_records<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Vec<Recipe> {
    let raw = load_raw(store, key);
    let total = raw.len();
    let mut seen = HashSet::new();
    let recipes: Vec<Recipe> = raw
        .into_iter()
        .filter_map(|value| match parse_record(value) {
            Ok(recipe) if seen.insert(recipe.id.clone()) => Some(recipe),
            Ok(recipe) => {
                warn!(key, id = %recipe.id, "Discarding stored recipe with duplicate id");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding invalid stored recipe");
                None
            }
        })
        .collect();
    debug!(key, loaded = recipes.len(), discarded = total - recipes.len(), "Loaded recipes");
    recipes
}

/// Try to persist `recipes` under `key`.
pub fn try_save_records<K: KeyValueStore + ?Sized>(
    store: &mut K,
    key: &str,
    recipes: &[Recipe],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(recipes)
        .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
    store.set(key, &json)
}

/// Persist `recipes` under `key`, absorbing any failure.
///
/// Returns whether the write landed, for callers that want to surface it;
/// the store itself ignores the answer.
pub fn save_records<K: KeyValueStore + ?Sized>(store: &mut K, key: &str, recipes: &[Recipe]) -> bool {
    match try_save_records(store, key, recipes) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist recipes, keeping in-memory state");
            false
        }
    }
}
