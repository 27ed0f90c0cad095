//! recipebox - loads the recipe collection, renders the recipe page, and
//! registers its offline worker.

mod app;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use recipebox_core::{
    detect_worker_support, Config, Document, FileStore, HttpFetcher, HttpWorkerRegistry,
    RecipeCache, RecipeLoader, RecipeSources, WorkerRegistry,
};

/// Title of the rendered page
const PAGE_TITLE: &str = "Recipes";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("recipebox starting");

    let config = Config::load().context("Failed to load configuration")?;
    let page_url = config.page_url()?;

    let fetcher = HttpFetcher::new(config.request_timeout())
        .context("Failed to create HTTP client")?;
    let store = FileStore::for_origin(&config.storage_dir()?, &page_url)
        .context("Failed to open recipe storage")?;
    info!(dir = %store.dir().display(), "Using recipe storage");

    let loader = RecipeLoader::new(fetcher.clone(), RecipeCache::new(store), RecipeSources::default())
        .with_fetch_mode(config.fetch_mode);

    let worker_registry: Option<Arc<dyn WorkerRegistry>> = if detect_worker_support(&page_url) {
        Some(Arc::new(HttpWorkerRegistry::new(fetcher.client(), page_url.clone())))
    } else {
        None
    };

    let mut app = App::new(loader, Document::new(PAGE_TITLE), worker_registry);
    app.on_content_loaded().await;

    let html = app.document().to_html().context("Failed to render page")?;
    std::fs::write(&config.output, html)
        .with_context(|| format!("Failed to write page: {}", config.output.display()))?;
    info!(path = %config.output.display(), "Wrote recipe page");

    app.shutdown().await;

    info!("recipebox shutting down");
    Ok(())
}
