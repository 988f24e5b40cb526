//! High-level catalog operations over a course snapshot.
//!
//! Thin composition of the store and the pure engines: fetch-or-reuse the
//! snapshot for a key, narrow with filters, rank with search, reshape for
//! output. Room operations run over the enriched view of the full snapshot,
//! matching what clients see elsewhere.

use crate::data::enrich::{self, EnrichedCourse};
use crate::data::filters::{self, FilterSet};
use crate::data::rooms::{self, Room, RoomSchedule};
use crate::data::search;
use crate::data::store::{CourseStore, TermKey};
use crate::soc::SocApiError;

/// Filtered, searched and enriched courses for one term key.
pub async fn get_courses(
    store: &CourseStore,
    search_query: Option<&str>,
    key: &TermKey,
    filter_set: &FilterSet,
) -> Result<Vec<EnrichedCourse>, SocApiError> {
    let snapshot = store.get_or_refresh(key).await?;

    // Filters narrow the set first so a search runs only within them.
    let filtered = filters::apply(&snapshot, filter_set);

    let selected = match search_query.map(str::trim) {
        Some(query) if !query.is_empty() => {
            search::search(&filtered, query, search::DEFAULT_THRESHOLD)
        }
        _ => filtered,
    };

    Ok(selected.into_iter().map(enrich::enrich_course).collect())
}

async fn enriched_snapshot(
    store: &CourseStore,
    key: &TermKey,
) -> Result<Vec<EnrichedCourse>, SocApiError> {
    let snapshot = store.get_or_refresh(key).await?;
    Ok(snapshot.iter().map(enrich::enrich_course).collect())
}

/// Every unique room for one term key.
pub async fn get_all_rooms(store: &CourseStore, key: &TermKey) -> Result<Vec<Room>, SocApiError> {
    Ok(rooms::all_rooms(&enriched_snapshot(store, key).await?))
}

/// Ranked room search for one term key.
pub async fn search_rooms(
    store: &CourseStore,
    query: &str,
    key: &TermKey,
) -> Result<Vec<Room>, SocApiError> {
    Ok(rooms::search_rooms(query, &enriched_snapshot(store, key).await?))
}

/// Weekly schedule of one exact (building, room) pair.
pub async fn get_room_schedule(
    store: &CourseStore,
    building: &str,
    room: &str,
    key: &TermKey,
) -> Result<RoomSchedule, SocApiError> {
    Ok(rooms::room_schedule(
        building,
        room,
        &enriched_snapshot(store, key).await?,
    ))
}

/// Rooms free for a day and half-open time window, in minutes since midnight.
pub async fn find_available_rooms(
    store: &CourseStore,
    day: &str,
    window: (u32, u32),
    key: &TermKey,
    campus_filter: Option<&str>,
    room_filter: Option<&str>,
) -> Result<Vec<Room>, SocApiError> {
    Ok(rooms::find_available_rooms(
        day,
        window,
        &enriched_snapshot(store, key).await?,
        room_filter,
        campus_filter,
    ))
}
