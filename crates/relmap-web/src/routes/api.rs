//! REST API endpoints for researcher relevance maps.

use crate::state::{AppState, ReloadError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use relmap::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Get dataset statistics.
pub async fn get_stats(State(state): State<AppState>) -> Json<DatasetStats> {
    Json(state.dataset().await.stats())
}

/// Researchers matching criteria given as query parameters.
pub async fn get_researchers(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<Vec<ResearcherRecord>> {
    let dataset = state.dataset().await;
    Json(dataset.filter(&criteria).into_iter().cloned().collect())
}

#[derive(Debug, Deserialize)]
pub struct ConnectionsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionItem {
    pub peer_id: String,
    pub name: String,
    pub affiliation: String,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub connections: Vec<ConnectionItem>,
}

/// Ranked connections of one researcher.
pub async fn get_connections(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ConnectionsQuery>,
) -> Result<Json<ConnectionsResponse>, StatusCode> {
    let dataset = state.dataset().await;
    let record = dataset.record(&id).ok_or(StatusCode::NOT_FOUND)?;
    let connections = dataset.connections(&id);
    let limit = query.limit.unwrap_or(connections.len());

    let items = connections
        .iter()
        .take(limit)
        .map(|connection| {
            let peer = dataset.record(&connection.peer_id);
            ConnectionItem {
                peer_id: connection.peer_id.clone(),
                name: peer.map(|p| p.name.clone()).unwrap_or_default(),
                affiliation: peer.map(|p| p.affiliation.clone()).unwrap_or_default(),
                score: connection.score,
            }
        })
        .collect();

    Ok(Json(ConnectionsResponse {
        id: record.id.clone(),
        name: record.name.clone(),
        total: connections.len(),
        connections: items,
    }))
}

/// Filter values per attribute.
pub async fn get_facets(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Vec<FacetValue>>> {
    Json(all_facets(state.dataset().await.records()))
}

/// Visible researchers and edges for the posted criteria.
pub async fn view(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Json<View> {
    Json(state.dataset().await.view(&criteria))
}

/// Reload response.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub researchers: usize,
    pub edges: usize,
    pub duplicate_ids: usize,
}

/// Reload the data source.
pub async fn reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    match state.reload().await {
        Ok(stats) => Ok(Json(ReloadResponse {
            researchers: stats.researchers,
            edges: stats.edges,
            duplicate_ids: stats.duplicate_ids,
        })),
        Err(err) => {
            warn!(error = %err, "Reload failed");
            let status = match err {
                ReloadError::NoSource => StatusCode::NOT_FOUND,
                ReloadError::Load(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ReloadError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, err.to_string()))
        }
    }
}
