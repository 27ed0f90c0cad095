//! The page's content-loaded handler.
//!
//! `App` owns the page and its lifecycle. When content is loaded it starts
//! the offline worker installation in the background, loads the recipes,
//! and renders whatever it got. A failed load is logged and the page is
//! left with no recipe cards.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use recipebox_core::page::render;
use recipebox_core::{
    install_worker, Document, KeyValueStore, PageLifecycle, RecipeFetcher, RecipeLoader,
    WorkerRegistry,
};

pub struct App<F, S> {
    loader: RecipeLoader<F, S>,
    document: Document,
    lifecycle: PageLifecycle,
    worker_registry: Option<Arc<dyn WorkerRegistry>>,
    worker_task: Option<JoinHandle<()>>,
    started: bool,
}

impl<F: RecipeFetcher, S: KeyValueStore> App<F, S> {
    pub fn new(
        loader: RecipeLoader<F, S>,
        document: Document,
        worker_registry: Option<Arc<dyn WorkerRegistry>>,
    ) -> Self {
        Self {
            loader,
            document,
            lifecycle: PageLifecycle::new(),
            worker_registry,
            worker_task: None,
            started: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Runs the startup sequence. Only the first call does anything.
    pub async fn on_content_loaded(&mut self) -> bool {
        self.lifecycle.content_loaded();
        if self.started {
            debug!("Content-loaded handler already ran");
            return false;
        }
        self.started = true;

        self.worker_task = install_worker(self.worker_registry.take(), self.lifecycle.subscribe());

        let recipes = match self.loader.load_recipes().await {
            Ok(recipes) => Some(recipes.into_iter().map(Arc::new).collect::<Vec<_>>()),
            Err(e) => {
                error!(error = %e, "Failed to load recipes");
                None
            }
        };

        match render(&mut self.document, recipes.as_deref()) {
            Ok(count) => info!(count = count, "Rendered recipe cards"),
            Err(e) => error!(error = %e, "Failed to render recipe cards"),
        }
        true
    }

    /// Signal that the page finished loading
    pub fn page_loaded(&self) {
        self.lifecycle.loaded();
    }

    /// Wait for background work started by the page, then tear it down
    pub async fn shutdown(mut self) {
        self.page_loaded();
        if let Some(task) = self.worker_task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Offline worker task panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::MockServer;
    use recipebox_core::page::RECIPE_CARD_TAG;
    use recipebox_core::storage::CACHE_KEY;
    use recipebox_core::{FileStore, HttpFetcher, HttpWorkerRegistry, RecipeCache, RecipeSources};
    use serde_json::json;
    use tempfile::TempDir;

    fn app(
        server: &MockServer,
        storage: &TempDir,
        worker: bool,
    ) -> App<HttpFetcher, FileStore> {
        let fetcher = HttpFetcher::new(None).unwrap();
        let store = FileStore::new(storage.path().to_path_buf()).unwrap();
        let sources = RecipeSources::new([server.url("/a.json"), server.url("/b.json")]);
        let loader = RecipeLoader::new(fetcher.clone(), RecipeCache::new(store), sources);

        let registry: Option<Arc<dyn WorkerRegistry>> = if worker {
            let page_url = server.url("/index.html").parse().unwrap();
            Some(Arc::new(HttpWorkerRegistry::new(fetcher.client(), page_url)))
        } else {
            None
        };
        App::new(loader, Document::new("Recipes"), registry)
    }

    async fn serve_recipe(server: &MockServer, path: &str, status: u16, body: &str) {
        let path = path.to_string();
        let body = body.to_string();
        server
            .mock_async(move |when, then| {
                when.method("GET").path(path);
                then.status(status)
                    .header("content-type", "application/json")
                    .body(body);
            })
            .await;
    }

    #[tokio::test]
    async fn test_content_loaded_renders_fetched_recipes() {
        let server = MockServer::start_async().await;
        serve_recipe(&server, "/a.json", 200, r#"{"id":1}"#).await;
        serve_recipe(&server, "/b.json", 200, r#"{"id":2}"#).await;
        let storage = TempDir::new().unwrap();

        let mut app = app(&server, &storage, false);
        assert!(app.on_content_loaded().await);

        let cards = app.document().main().unwrap().children();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].tag(), RECIPE_CARD_TAG);
        assert_eq!(cards[0].data().unwrap().as_value(), &json!({"id": 1}));
        assert_eq!(cards[1].data().unwrap().as_value(), &json!({"id": 2}));

        let cached = std::fs::read_to_string(storage.path().join(format!("{CACHE_KEY}.json")))
            .unwrap();
        assert_eq!(cached, r#"[{"id":1},{"id":2}]"#);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_load_renders_nothing() {
        let server = MockServer::start_async().await;
        serve_recipe(&server, "/a.json", 200, r#"{"id":1}"#).await;
        serve_recipe(&server, "/b.json", 500, "oops").await;
        let storage = TempDir::new().unwrap();

        let mut app = app(&server, &storage, false);
        assert!(app.on_content_loaded().await);

        assert!(app.document().main().unwrap().children().is_empty());
        assert!(!storage.path().join(format!("{CACHE_KEY}.json")).exists());
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_handler_runs_once() {
        let server = MockServer::start_async().await;
        serve_recipe(&server, "/a.json", 200, r#"{"id":1}"#).await;
        serve_recipe(&server, "/b.json", 200, r#"{"id":2}"#).await;
        let storage = TempDir::new().unwrap();

        let mut app = app(&server, &storage, false);
        assert!(app.on_content_loaded().await);
        assert!(!app.on_content_loaded().await);

        assert_eq!(app.document().main().unwrap().children().len(), 2);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_worker_registered_after_page_load() {
        let server = MockServer::start_async().await;
        serve_recipe(&server, "/a.json", 200, r#"{"id":1}"#).await;
        serve_recipe(&server, "/b.json", 200, r#"{"id":2}"#).await;
        let worker_mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/sw.js");
                then.status(200).body("// offline worker");
            })
            .await;
        let storage = TempDir::new().unwrap();

        let mut app = app(&server, &storage, true);
        app.on_content_loaded().await;
        assert_eq!(worker_mock.hits_async().await, 0);

        app.shutdown().await;
        assert_eq!(worker_mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_worker_failure_does_not_affect_rendering() {
        let server = MockServer::start_async().await;
        serve_recipe(&server, "/a.json", 200, r#"{"id":1}"#).await;
        serve_recipe(&server, "/b.json", 200, r#"{"id":2}"#).await;
        let storage = TempDir::new().unwrap();

        // No /sw.js mock: registration gets a 404
        let mut app = app(&server, &storage, true);
        app.on_content_loaded().await;
        assert_eq!(app.document().main().unwrap().children().len(), 2);
        app.shutdown().await;
    }
}
