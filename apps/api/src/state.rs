use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::config::Config;
use crate::editor::scheduler::{RenderScheduler, RenderedPreview};
use crate::editor::FormController;
use crate::export::{ExportAdapter, PrintHost};
use crate::storage::{KeyValueStore, Persistence};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session. Every mutation goes through this lock.
    pub editor: Arc<Mutex<FormController>>,
    pub exporter: Arc<ExportAdapter>,
    /// Latest published preview; updated by the render scheduler.
    pub preview: watch::Receiver<RenderedPreview>,
    pub config: Config,
}

impl AppState {
    /// Loads saved state from `store` and renders the first preview.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, host: Arc<dyn PrintHost>) -> Self {
        let (scheduler, preview) = RenderScheduler::new(config.preview_debounce);
        let controller = FormController::new(Persistence::new(store), scheduler);
        Self {
            editor: Arc::new(Mutex::new(controller)),
            exporter: Arc::new(ExportAdapter::new(host)),
            preview,
            config,
        }
    }
}
