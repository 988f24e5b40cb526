//! Room listing, search, schedule and availability handlers.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::data::catalog;
use crate::data::rooms::parse_clock;
use crate::data::store::TermKey;
use crate::state::AppState;
use crate::web::error::ApiError;
use crate::web::routes::{cache, default_campus, default_term, default_year, with_cache_control};

#[derive(Debug, Deserialize)]
pub struct TermParams {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_campus")]
    pub campus: String,
}

impl TermParams {
    fn key(&self) -> TermKey {
        TermKey::new(&self.year, &self.term, &self.campus)
    }
}

/// `GET /api/rooms`
pub(super) async fn get_all_rooms(
    State(state): State<AppState>,
    Query(params): Query<TermParams>,
) -> Result<Response, ApiError> {
    let rooms = catalog::get_all_rooms(&state.store, &params.key()).await?;
    Ok(with_cache_control(rooms, cache::ROOMS))
}

#[derive(Debug, Deserialize)]
pub struct RoomSearchParams {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_campus")]
    pub campus: String,
    #[serde(default)]
    pub query: String,
}

/// `GET /api/rooms/search`
pub(super) async fn search_rooms(
    State(state): State<AppState>,
    Query(params): Query<RoomSearchParams>,
) -> Result<Response, ApiError> {
    let key = TermKey::new(&params.year, &params.term, &params.campus);
    let rooms = catalog::search_rooms(&state.store, &params.query, &key).await?;
    Ok(with_cache_control(rooms, cache::ROOMS))
}

#[derive(Debug, Deserialize)]
pub struct RoomScheduleParams {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_campus")]
    pub campus: String,
    pub building: Option<String>,
    pub room: Option<String>,
}

/// `GET /api/rooms/schedule`
pub(super) async fn get_room_schedule(
    State(state): State<AppState>,
    Query(params): Query<RoomScheduleParams>,
) -> Result<Response, ApiError> {
    let building = params
        .building
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::bad_request("Building and room must be specified"))?;
    let room = params
        .room
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::bad_request("Building and room must be specified"))?;

    let key = TermKey::new(&params.year, &params.term, &params.campus);
    let schedule = catalog::get_room_schedule(&state.store, building, room, &key).await?;
    Ok(with_cache_control(schedule, cache::ROOMS))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_campus")]
    pub campus: String,
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub campus_filter: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/rooms/available`
pub(super) async fn find_available_rooms(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Response, ApiError> {
    let day = params
        .day
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::bad_request("Day must be specified"))?;

    let start = params
        .start
        .as_deref()
        .and_then(parse_clock)
        .ok_or_else(|| ApiError::bad_request("Invalid or missing start time"))?;
    let end = params
        .end
        .as_deref()
        .and_then(parse_clock)
        .ok_or_else(|| ApiError::bad_request("Invalid or missing end time"))?;
    if start >= end {
        return Err(ApiError::bad_request("Start time must be before end time"));
    }

    let key = TermKey::new(&params.year, &params.term, &params.campus);
    let rooms = catalog::find_available_rooms(
        &state.store,
        day,
        (start, end),
        &key,
        params.campus_filter.as_deref(),
        params.search.as_deref(),
    )
    .await?;
    Ok(with_cache_control(rooms, cache::ROOMS))
}
