//! Web API router construction and shared response utilities.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;
use crate::web::{courses, rooms, salary, status};

/// Cache-Control presets for public endpoints.
pub mod cache {
    /// Course search results.
    pub const SEARCH: &str = "public, max-age=60, s-maxage=300, stale-while-revalidate=120";
    /// Room lists and schedules, derived from the same snapshots.
    pub const ROOMS: &str = "public, max-age=60, s-maxage=300, stale-while-revalidate=120";
    /// Salary records change rarely.
    pub const SALARY: &str = "public, max-age=3600, s-maxage=86400";
}

/// Wraps a JSON response with a `Cache-Control` header.
pub fn with_cache_control<T: serde::Serialize>(value: T, header: &'static str) -> Response {
    let mut response = Json(value).into_response();
    response.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(header),
    );
    response
}

// Default request parameters, matching the upstream's current academic period.

pub(crate) fn default_year() -> String {
    "2025".to_string()
}

pub(crate) fn default_term() -> String {
    "1".to_string()
}

pub(crate) fn default_campus() -> String {
    "NB".to_string()
}

/// Creates the web server router.
pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(status::health))
        .route("/status", get(status::status))
        .route("/courses", get(courses::get_courses))
        .route("/rooms", get(rooms::get_all_rooms))
        .route("/rooms/search", get(rooms::search_rooms))
        .route("/rooms/schedule", get(rooms::get_room_schedule))
        .route("/rooms/available", get(rooms::find_available_rooms))
        .route("/salary", get(salary::get_salary))
        .with_state(app_state);

    Router::new().nest("/api", api_router).layer((
        // The API is read-only and public; let browsers call it from anywhere.
        CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]),
        CompressionLayer::new()
            .zstd(true)
            .br(true)
            .gzip(true)
            .quality(tower_http::CompressionLevel::Fastest),
        TimeoutLayer::new(Duration::from_secs(60)),
    ))
}
