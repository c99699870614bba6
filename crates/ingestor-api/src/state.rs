//! Application state shared by the HTTP handlers.

use std::sync::Arc;

use ingestor_core::IngestConfig;
use ingestor_storage::Storage;

use crate::services::ingest::IngestService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<IngestConfig>,
    pub ingest: IngestService,
}

impl AppState {
    pub fn new(config: Arc<IngestConfig>, storage: Arc<dyn Storage>) -> Self {
        let ingest = IngestService::new(config.clone(), storage);
        AppState { config, ingest }
    }
}
