//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{NamespaceDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Served namespaces with their connection and room counts and a consistency flag
pub async fn get_namespaces(State(state): State<Arc<AppState>>) -> Json<Vec<NamespaceDto>> {
    let mut namespaces = Vec::new();
    for core in state.cores() {
        let stats = core.get_rooms.stats().await;
        namespaces.push(NamespaceDto {
            name: core.namespace.as_str().to_string(),
            connections: stats.connections,
            rooms: stats.rooms,
            consistent: stats.inconsistencies == 0,
        });
    }
    Json(namespaces)
}

/// Get list of rooms of a namespace
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let core = state.core(&namespace).ok_or(StatusCode::NOT_FOUND)?;
    let rooms = core.get_rooms.execute().await;
    Ok(Json(rooms.iter().map(RoomSummaryDto::from).collect()))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path((namespace, room_id)): Path<(String, String)>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let core = state.core(&namespace).ok_or(StatusCode::NOT_FOUND)?;
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match core.get_room_detail.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(e) => {
            tracing::debug!("{}", e);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
