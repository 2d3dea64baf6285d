use aerosearch_core::search::DEFAULT_SORT;
use aerosearch_core::{SearchCriteria, SearchResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(search_flights))
        .route("/health", get(health))
}

/// POST /search
pub async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(mut criteria) = payload?;
    criteria.validate()?;
    if criteria.sort_by.is_empty() {
        criteria.sort_by = DEFAULT_SORT.to_string();
    }

    info!(
        "Searching {} -> {} on {} (sort: {})",
        criteria.origin, criteria.destination, criteria.departure_date, criteria.sort_by
    );

    let response = state.aggregator.search_flights(criteria).await;
    let meta = &response.metadata;
    if meta.total_results == 0 && meta.providers_failed > 0 {
        warn!(
            "No flights found and {}/{} providers failed",
            meta.providers_failed, meta.providers_queried
        );
    }

    Ok(Json(response))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
