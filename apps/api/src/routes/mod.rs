pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers as pipeline_handlers;
use crate::search::handlers as search_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Orchestration
        .route(
            "/processBulkImport",
            post(pipeline_handlers::handle_process_bulk_import),
        )
        .route(
            "/assembleData",
            post(pipeline_handlers::handle_assemble_data),
        )
        // Retrieval
        .route("/extractData", post(store_handlers::handle_extract_data))
        .route(
            "/getAllCandidates",
            get(store_handlers::handle_get_all_candidates),
        )
        .route(
            "/getAllCandidatesDropdown",
            get(store_handlers::handle_get_all_candidates_dropdown),
        )
        // Filter/search
        .route(
            "/getRefinedResume",
            get(search_handlers::handle_get_refined_resume),
        )
        .with_state(state)
}
