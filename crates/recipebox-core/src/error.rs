//! Error types for loading, storage, rendering and worker registration.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::FetchError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize storage entry '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to parse storage entry '{key}': {source}")]
    Deserialize {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch recipe from {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Failed to parse recipe from {url}: {source}")]
    Parse {
        url: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Document has no <main> element")]
    MissingMain,

    #[error("Failed to serialize recipe payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Invalid worker script location '{script}': {source}")]
    InvalidUrl {
        script: String,
        source: url::ParseError,
    },

    #[error("Failed to fetch worker script {url}: {source}")]
    Fetch { url: String, source: FetchError },
}
