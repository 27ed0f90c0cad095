//! Core library for recipebox.
//!
//! Loads a fixed set of recipe documents, keeps them in origin-scoped
//! storage, renders them into a page as `recipe-card` elements, and
//! registers the page's offline worker.
//!
//! The pieces are layered leaf-first:
//! - [`sources`]: the ordered list of recipe document URLs
//! - [`storage`]: key-value storage and the single-entry recipe cache
//! - [`api`]: HTTP fetching of raw recipe documents
//! - [`loader`]: cache-or-fetch orchestration
//! - [`page`]: the page model, lifecycle signals and card rendering
//! - [`worker`]: offline worker capability detection and registration

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod page;
pub mod sources;
pub mod storage;
pub mod worker;

pub use api::{FetchError, HttpFetcher, RecipeFetcher};
pub use config::Config;
pub use error::{LoadError, RenderError, StorageError, WorkerError};
pub use loader::{FetchMode, RecipeLoader};
pub use models::Recipe;
pub use page::{render, Document, Element, PageLifecycle};
pub use sources::RecipeSources;
pub use storage::{FileStore, KeyValueStore, MemoryStore, RecipeCache};
pub use worker::{detect_worker_support, install_worker, HttpWorkerRegistry, Registration, WorkerRegistry};
