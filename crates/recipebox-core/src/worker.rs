//! Offline worker installation.
//!
//! The page's offline worker is a background script served next to the
//! page. Installing it is fire-and-forget: the task waits for the page to
//! finish loading, registers the script, and logs the outcome. Nothing in
//! the load/render path waits on it or fails because of it.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::{Host, Url};

use crate::api::{FetchError, HttpFetcher};
use crate::error::WorkerError;
use crate::page::LoadSignal;

/// Location of the worker script, relative to the page
pub const WORKER_SCRIPT: &str = "./sw.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub script_url: Url,
    /// URLs at or below this prefix are handled by the worker
    pub scope: Url,
}

#[async_trait]
pub trait WorkerRegistry: Send + Sync {
    async fn register(&self, script: &str) -> Result<Registration, WorkerError>;
}

/// Whether a page at `page_url` may register an offline worker.
///
/// Workers need a secure context: `https`, or plain `http` on a loopback host.
pub fn detect_worker_support(page_url: &Url) -> bool {
    match page_url.scheme() {
        "https" => true,
        "http" => match page_url.host() {
            Some(Host::Domain(domain)) => domain == "localhost" || domain.ends_with(".localhost"),
            Some(Host::Ipv4(ip)) => ip.is_loopback(),
            Some(Host::Ipv6(ip)) => ip.is_loopback(),
            None => false,
        },
        _ => false,
    }
}

/// Registers worker scripts served over HTTP next to the page.
pub struct HttpWorkerRegistry {
    client: Client,
    page_url: Url,
}

impl HttpWorkerRegistry {
    pub fn new(client: Client, page_url: Url) -> Self {
        Self { client, page_url }
    }
}

#[async_trait]
impl WorkerRegistry for HttpWorkerRegistry {
    async fn register(&self, script: &str) -> Result<Registration, WorkerError> {
        let invalid = |source: url::ParseError| WorkerError::InvalidUrl {
            script: script.to_string(),
            source,
        };
        let script_url = self.page_url.join(script).map_err(invalid)?;
        // Default scope is the directory the script lives in
        let scope = script_url.join("./").map_err(invalid)?;

        debug!(url = %script_url, "Fetching worker script");
        let fetch_failed = |source: FetchError| WorkerError::Fetch {
            url: script_url.to_string(),
            source,
        };
        let response = self
            .client
            .get(script_url.clone())
            .header(header::ACCEPT, "text/javascript")
            .send()
            .await
            .map_err(|e| fetch_failed(e.into()))?;
        HttpFetcher::check_response(response)
            .await
            .map_err(fetch_failed)?;

        Ok(Registration { script_url, scope })
    }
}

/// Start offline worker installation in the background.
///
/// With no registry the page cannot host a worker: a warning is logged and
/// `None` returned. Otherwise the returned task waits for the page-load
/// signal, registers [`WORKER_SCRIPT`] once, and logs the result.
pub fn install_worker(
    registry: Option<Arc<dyn WorkerRegistry>>,
    mut signal: LoadSignal,
) -> Option<JoinHandle<()>> {
    let Some(registry) = registry else {
        warn!("Offline workers are not supported for this page");
        return None;
    };

    Some(tokio::spawn(async move {
        if !signal.loaded().await {
            warn!("Page closed before it finished loading, offline worker not registered");
            return;
        }

        match registry.register(WORKER_SCRIPT).await {
            Ok(registration) => {
                info!(scope = %registration.scope, "Offline worker registered successfully")
            }
            Err(e) => error!(error = %e, "Offline worker registration failed"),
        }
    }))
}
