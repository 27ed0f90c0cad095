//! Origin-scoped persistent storage.
//!
//! This module provides the [`KeyValueStore`] abstraction over string
//! entries, two implementations of it, and the [`RecipeCache`] that keeps
//! the recipe collection under a single fixed key.
//!
//! The cache entry has no timestamp and never goes stale: it exists or it
//! doesn't. Clearing the storage directory forces a refetch.

pub mod cache;
pub mod store;

pub use cache::{RecipeCache, CACHE_KEY};
pub use store::{origin_slug, FileStore, KeyValueStore, MemoryStore};
