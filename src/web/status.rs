//! Health and status handlers.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::trace;

use crate::state::{AppState, ServiceStatus};

#[derive(Serialize)]
pub struct SnapshotInfo {
    key: String,
    fetched_at: String,
    courses: usize,
}

#[derive(Serialize)]
pub struct StatusResponse {
    status: ServiceStatus,
    version: String,
    commit: String,
    services: BTreeMap<String, ServiceStatus>,
    snapshots: Vec<SnapshotInfo>,
}

/// Health check endpoint.
pub(super) async fn health(State(state): State<AppState>) -> Json<Value> {
    trace!("health check requested");
    Json(json!({
        "status": "healthy",
        "last_update": state.store.last_refresh().map(|t| t.to_rfc3339()),
    }))
}

/// Status endpoint showing service and snapshot state.
pub(super) async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let services: BTreeMap<String, ServiceStatus> =
        state.service_statuses.all().into_iter().collect();

    let overall = if services
        .values()
        .any(|s| matches!(s, ServiceStatus::Error))
    {
        ServiceStatus::Error
    } else if services.is_empty() {
        ServiceStatus::Starting
    } else {
        ServiceStatus::Active
    };

    let mut snapshots: Vec<SnapshotInfo> = state
        .store
        .snapshot_info()
        .into_iter()
        .map(|(key, fetched_at, courses)| SnapshotInfo {
            key,
            fetched_at: fetched_at.to_rfc3339(),
            courses,
        })
        .collect();
    snapshots.sort_by(|a, b| a.key.cmp(&b.key));

    Json(StatusResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("GIT_COMMIT_HASH").to_string(),
        services,
        snapshots,
    })
}
