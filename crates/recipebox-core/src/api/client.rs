//! Fetching raw recipe documents over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::FetchError;

/// Source of raw recipe document bodies.
///
/// Implementations return the response body text for a successful request
/// and a [`FetchError`] for transport failures and non-OK statuses. Parsing
/// is left to the caller.
#[async_trait]
pub trait RecipeFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: RecipeFetcher + ?Sized> RecipeFetcher for Arc<T> {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url).await
    }
}

/// HTTP fetcher for recipe documents.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher. Without a timeout a hung request stalls the load.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// The underlying client, for sharing its connection pool
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Check if response is successful, returning an error with body if not.
    pub(crate) async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FetchError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl RecipeFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = url, "Fetching recipe document");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }
}
