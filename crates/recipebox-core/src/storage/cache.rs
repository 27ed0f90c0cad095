use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;
use crate::models::Recipe;

/// The one storage key this system reads and writes.
pub const CACHE_KEY: &str = "recipes";

/// The recipe collection, serialized as a JSON array under [`CACHE_KEY`].
pub struct RecipeCache<S> {
    store: S,
}

impl<S: KeyValueStore> RecipeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `None` when there is no entry. An empty entry counts as no entry.
    pub fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError> {
        let contents = match self.store.get_item(CACHE_KEY)? {
            Some(contents) if !contents.is_empty() => contents,
            _ => return Ok(None),
        };

        let recipes: Vec<Recipe> =
            serde_json::from_str(&contents).map_err(|source| StorageError::Deserialize {
                key: CACHE_KEY.to_string(),
                source,
            })?;

        debug!(count = recipes.len(), "Recipe cache hit");
        Ok(Some(recipes))
    }

    pub fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string(recipes).map_err(|source| StorageError::Serialize {
                key: CACHE_KEY.to_string(),
                source,
            })?;
        self.store.set_item(CACHE_KEY, &contents)
    }
}
