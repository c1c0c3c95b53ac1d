//! Gazette HTTP Routes
//!
//! `GET /gazettes` and `GET /gazettes/:territory_id`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::params::parse_gazette_query;
use crate::gazettes::{GatewayResult, GazetteAccessInterface, GazetteItem, QueryFilter};
use crate::observability::{Event, Logger};

/// State shared across gazette handlers
pub struct GazettesState {
    pub gazettes: Arc<dyn GazetteAccessInterface>,
}

/// Raw query pairs, in request order
type QueryPairs = Query<Vec<(String, String)>>;

/// Create gazette routes backed by `gazettes`
pub fn gazette_routes(gazettes: Arc<dyn GazetteAccessInterface>) -> Router {
    let state = Arc::new(GazettesState { gazettes });

    Router::new()
        .route("/gazettes", get(all_territories_handler))
        .route("/gazettes/", get(all_territories_handler))
        .route("/gazettes/:territory_id", get(territory_handler))
        .with_state(state)
}

async fn all_territories_handler(
    State(state): State<Arc<GazettesState>>,
    Query(pairs): QueryPairs,
) -> ApiResult<Json<Vec<GazetteItem>>> {
    search_gazettes(&state, None, &pairs).await
}

async fn territory_handler(
    State(state): State<Arc<GazettesState>>,
    Path(territory_id): Path<String>,
    Query(pairs): QueryPairs,
) -> ApiResult<Json<Vec<GazetteItem>>> {
    search_gazettes(&state, Some(territory_id), &pairs).await
}

async fn search_gazettes(
    state: &GazettesState,
    territory_id: Option<String>,
    pairs: &[(String, String)],
) -> ApiResult<Json<Vec<GazetteItem>>> {
    let filter = parse_gazette_query(territory_id, pairs).map_err(|e| {
        Logger::warn(Event::QueryRejected, &[("error", &e.to_string())]);
        e
    })?;
    log_query(&filter);

    // Gateways may block on I/O, so results are drained on a blocking worker.
    let gazettes = Arc::clone(&state.gazettes);
    let result = tokio::task::spawn_blocking(move || {
        gazettes
            .get_gazettes(Some(filter))
            .collect::<GatewayResult<Vec<GazetteItem>>>()
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    match result {
        Ok(items) => {
            Logger::info(Event::QueryCompleted, &[("count", &items.len().to_string())]);
            Ok(Json(items))
        }
        Err(e) => {
            Logger::error(Event::GatewayFailed, &[("error", &e.to_string())]);
            Err(ApiError::from(e))
        }
    }
}

fn log_query(filter: &QueryFilter) {
    let page = filter.page.to_string();
    let page_size = filter.page_size.to_string();
    Logger::info(
        Event::QueryReceived,
        &[
            ("territory_id", filter.territory_id.as_deref().unwrap_or("*")),
            ("page", &page),
            ("page_size", &page_size),
        ],
    );
}
