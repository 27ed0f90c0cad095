//! Cache-or-fetch loading of the recipe collection.
//!
//! A load first consults the [`RecipeCache`]. On a hit the cached
//! collection is returned and no request is made. On a miss every source is
//! fetched and parsed; only when all of them succeed is the collection
//! written back to the cache. The first failure aborts the load and leaves
//! the cache untouched.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::RecipeFetcher;
use crate::error::LoadError;
use crate::models::Recipe;
use crate::sources::RecipeSources;
use crate::storage::{KeyValueStore, RecipeCache};

/// How a cold load issues its requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// One request at a time, in source order
    #[default]
    Sequential,
    /// All requests at once, results placed by source index
    Concurrent,
}

pub struct RecipeLoader<F, S> {
    fetcher: F,
    cache: RecipeCache<S>,
    sources: RecipeSources,
    mode: FetchMode,
}

impl<F: RecipeFetcher, S: KeyValueStore> RecipeLoader<F, S> {
    pub fn new(fetcher: F, cache: RecipeCache<S>, sources: RecipeSources) -> Self {
        Self {
            fetcher,
            cache,
            sources,
            mode: FetchMode::default(),
        }
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Load the recipe collection from the cache, or from the sources on a miss.
    pub async fn load_recipes(&self) -> Result<Vec<Recipe>, LoadError> {
        if let Some(recipes) = self.cache.load()? {
            return Ok(recipes);
        }

        info!(
            sources = self.sources.len(),
            mode = ?self.mode,
            "Recipe cache empty, fetching from sources"
        );

        let recipes = match self.mode {
            FetchMode::Sequential => self.fetch_sequential().await?,
            FetchMode::Concurrent => self.fetch_concurrent().await?,
        };

        self.cache.save(&recipes)?;
        info!(count = recipes.len(), "Fetched and cached recipes");
        Ok(recipes)
    }

    async fn fetch_one(&self, url: &str) -> Result<Recipe, LoadError> {
        let body = self
            .fetcher
            .fetch_text(url)
            .await
            .map_err(|source| LoadError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let recipe: Recipe = serde_json::from_str(&body).map_err(|source| LoadError::Parse {
            url: url.to_string(),
            source,
        })?;

        debug!(url = url, name = recipe.name().unwrap_or("<unnamed>"), "Fetched recipe");
        Ok(recipe)
    }

    async fn fetch_sequential(&self) -> Result<Vec<Recipe>, LoadError> {
        let mut recipes = Vec::with_capacity(self.sources.len());
        for url in self.sources.iter() {
            match self.fetch_one(url).await {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => {
                    error!(url = url, error = %e, "Failed to fetch recipe");
                    return Err(e);
                }
            }
        }
        Ok(recipes)
    }

    async fn fetch_concurrent(&self) -> Result<Vec<Recipe>, LoadError> {
        // One slot per source; completion order never decides placement
        let mut slots: Vec<Option<Recipe>> = vec![None; self.sources.len()];

        let mut pending: FuturesUnordered<_> = self
            .sources
            .iter()
            .enumerate()
            .map(|(index, url)| async move { (index, url, self.fetch_one(url).await) })
            .collect();

        while let Some((index, url, result)) = pending.next().await {
            match result {
                Ok(recipe) => slots[index] = Some(recipe),
                Err(e) => {
                    // Dropping `pending` cancels the requests still in flight
                    error!(url = url, error = %e, "Failed to fetch recipe");
                    return Err(e);
                }
            }
        }

        debug_assert!(slots.iter().all(Option::is_some));
        Ok(slots.into_iter().flatten().collect())
    }
}
