//! Application State
//!
//! Shared state accessible by all handlers, wrapped in `Arc` by the router.
//!
//! The dataset is immutable after startup and read without locking. The
//! presentation (page model plus controller) sits behind one async mutex,
//! so navigation and selection events are applied strictly one at a time.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, MutexGuard};

use super::error::{WebError, WebResult};
use super::page::HtmlSurface;
use crate::config::ServerConfig;
use crate::dataset::{Dataset, LoadError, LoadResult};
use crate::scenes::{report_load_failure, SceneController};

/// Page model and the controller driving it.
///
/// `controller` is `None` when the dataset failed to load.
#[derive(Debug)]
pub struct Presentation {
    pub page: HtmlSurface,
    pub controller: Option<SceneController>,
}

impl Presentation {
    /// Render the current page
    pub fn render(&self) -> String {
        self.page.render(self.controller.as_ref())
    }
}

/// Shared application state for all handlers
pub struct AppState {
    dataset: Result<Arc<Dataset>, String>,
    presentation: Mutex<Presentation>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// State for a successfully loaded dataset, starting at scene 0
    pub fn ready(dataset: Dataset, config: ServerConfig) -> Self {
        let dataset = Arc::new(dataset);
        let mut page = HtmlSurface::new();
        let controller = SceneController::start(Arc::clone(&dataset), &mut page);

        Self {
            dataset: Ok(dataset),
            presentation: Mutex::new(Presentation {
                page,
                controller: Some(controller),
            }),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// State after a load failure: the page shows the error, no scene renders
    pub fn failed(error: &LoadError, config: ServerConfig) -> Self {
        let mut page = HtmlSurface::new();
        report_load_failure(&mut page, error);

        Self {
            dataset: Err(error.to_string()),
            presentation: Mutex::new(Presentation {
                page,
                controller: None,
            }),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn from_load(result: LoadResult<Dataset>, config: ServerConfig) -> Self {
        match result {
            Ok(dataset) => Self::ready(dataset, config),
            Err(error) => Self::failed(&error, config),
        }
    }

    /// The loaded dataset, or 503 if loading failed
    pub fn dataset(&self) -> WebResult<&Arc<Dataset>> {
        self.dataset
            .as_ref()
            .map_err(|e| WebError::ServiceUnavailable(e.clone()))
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.is_ok()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.dataset.as_ref().err().map(String::as_str)
    }

    /// Exclusive access to the presentation
    pub async fn presentation(&self) -> MutexGuard<'_, Presentation> {
        self.presentation.lock().await
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
