use std::sync::Arc;

use crate::config::Config;
use crate::extraction::client::Extractor;
use crate::search::embedding::Embedder;
use crate::store::repository::CandidateStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The extractor and embedder sit behind trait objects so tests
/// and alternate backends can swap them without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub store: CandidateStore,
    pub extractor: Arc<dyn Extractor>,
    pub embedder: Arc<dyn Embedder>,
    pub config: Config,
}
