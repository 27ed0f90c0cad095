//! HTTP access to recipe documents.
//!
//! [`RecipeFetcher`] is the seam the loader fetches through; [`HttpFetcher`]
//! is the `reqwest` implementation used by the binary.

pub mod client;
pub mod error;

pub use client::{HttpFetcher, RecipeFetcher};
pub use error::FetchError;
