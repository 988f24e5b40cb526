//! Physical-room derivation, search, schedules and availability.
//!
//! Rooms have no upstream existence of their own; the universe of rooms is
//! whatever the enriched course data mentions. Everything here is derived
//! fresh from a course snapshot per query and holds no state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::enrich::{EnrichedCourse, WEEKDAY_NAMES, format_campus, format_weekday};
use crate::data::fuzzy;
use crate::soc::types::NOT_AVAILABLE;

/// Minimum weighted fuzzy score for a room to appear in search results.
/// The permissive bound; direct substring hits bypass scoring entirely.
const ROOM_FUZZY_THRESHOLD: u32 = 50;

/// Weighted fields for fuzzy room scoring.
const ROOM_FIELD_WEIGHTS: [(RoomField, u32); 3] = [
    (RoomField::FullName, 100),
    (RoomField::Building, 90),
    (RoomField::Room, 80),
];

#[derive(Debug, Clone, Copy)]
enum RoomField {
    FullName,
    Building,
    Room,
}

/// A physical room, identified by (building, room). Campus is informational
/// and carries whichever label was seen first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub building: String,
    pub room: String,
    pub campus: String,
    pub full_name: String,
}

impl Room {
    fn field(&self, field: RoomField) -> &str {
        match field {
            RoomField::FullName => &self.full_name,
            RoomField::Building => &self.building,
            RoomField::Room => &self.room,
        }
    }
}

/// One meeting on a room's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomScheduleEntry {
    pub course: String,
    pub title: String,
    pub section: String,
    pub instructors: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub start_military: String,
    pub end_military: String,
    pub mode: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    AvailableAllDay,
    ClassesScheduled,
}

/// First and last occupied clock positions of a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyHours {
    pub first_class: String,
    pub last_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,
    pub status: DayStatus,
    pub entries: Vec<RoomScheduleEntry>,
    pub occupancy: Option<OccupancyHours>,
}

/// A room's full weekly schedule, Monday through Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSchedule {
    pub building: String,
    pub room: String,
    pub days: Vec<DaySchedule>,
    /// All entries in weekly order (Monday first, then by start time).
    pub weekly: Vec<RoomScheduleEntry>,
}

fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == NOT_AVAILABLE
}

/// Every unique room mentioned by the course data, sorted by (building, room).
pub fn all_rooms(courses: &[EnrichedCourse]) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    for course in courses {
        for section in &course.sections {
            for meeting in &section.meeting_times {
                if is_sentinel(&meeting.building) || is_sentinel(&meeting.room) {
                    continue;
                }
                let exists = rooms
                    .iter()
                    .any(|r| r.building == meeting.building && r.room == meeting.room);
                if !exists {
                    rooms.push(Room {
                        building: meeting.building.clone(),
                        room: meeting.room.clone(),
                        campus: meeting.campus.clone(),
                        full_name: format!("{} {}", meeting.building, meeting.room),
                    });
                }
            }
        }
    }
    rooms.sort_by(|a, b| (&a.building, &a.room).cmp(&(&b.building, &b.room)));
    rooms
}

/// Search rooms by free text.
///
/// Direct substring hits short-circuit; otherwise rooms are ranked by the
/// best weighted fuzzy field score and kept above the threshold.
pub fn search_rooms(query: &str, courses: &[EnrichedCourse]) -> Vec<Room> {
    let rooms = all_rooms(courses);
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rooms;
    }

    let direct: Vec<Room> = rooms
        .iter()
        .filter(|room| {
            room.building.to_lowercase().contains(&query)
                || room.room.to_lowercase().contains(&query)
                || room.full_name.to_lowercase().contains(&query)
                || room.campus.to_lowercase().contains(&query)
        })
        .cloned()
        .collect();
    if !direct.is_empty() {
        return direct;
    }

    let mut scored: Vec<(u32, Room)> = rooms
        .into_iter()
        .filter_map(|room| {
            let score = ROOM_FIELD_WEIGHTS
                .iter()
                .map(|(field, weight)| {
                    fuzzy::best_score(&query, &room.field(*field).to_lowercase()) * weight / 100
                })
                .max()
                .unwrap_or(0);
            (score >= ROOM_FUZZY_THRESHOLD).then_some((score, room))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, room)| room).collect()
}

/// Sort key for schedule entries: minutes since midnight, sentinels last.
fn start_sort_key(entry: &RoomScheduleEntry) -> u32 {
    crate::data::enrich::military_to_minutes(&entry.start_military).unwrap_or(u32::MAX)
}

/// Build the weekly schedule for one exact (building, room) pair.
pub fn room_schedule(building: &str, room: &str, courses: &[EnrichedCourse]) -> RoomSchedule {
    let mut by_day: Vec<Vec<RoomScheduleEntry>> = vec![Vec::new(); WEEKDAY_NAMES.len()];

    for course in courses {
        for section in &course.sections {
            for meeting in &section.meeting_times {
                if meeting.building != building || meeting.room != room {
                    continue;
                }
                let Some(day_index) = WEEKDAY_NAMES.iter().position(|d| *d == meeting.day) else {
                    continue;
                };
                by_day[day_index].push(RoomScheduleEntry {
                    course: course.course_string.clone(),
                    title: course.title.clone(),
                    section: section.number.clone(),
                    instructors: section.instructors.clone(),
                    start_time: meeting.start_time.formatted.clone(),
                    end_time: meeting.end_time.formatted.clone(),
                    start_military: meeting.start_time.military.clone(),
                    end_military: meeting.end_time.military.clone(),
                    mode: meeting.mode.clone(),
                });
            }
        }
    }

    let mut days = Vec::with_capacity(WEEKDAY_NAMES.len());
    let mut weekly = Vec::new();
    for (index, name) in WEEKDAY_NAMES.iter().enumerate() {
        let mut entries = std::mem::take(&mut by_day[index]);
        entries.sort_by_key(start_sort_key);
        weekly.extend(entries.iter().cloned());

        let occupancy = entries.first().map(|first| OccupancyHours {
            first_class: first.start_time.clone(),
            last_class: entries
                .last()
                .map(|last| last.end_time.clone())
                .unwrap_or_default(),
        });
        days.push(DaySchedule {
            day: name.to_string(),
            status: if entries.is_empty() {
                DayStatus::AvailableAllDay
            } else {
                DayStatus::ClassesScheduled
            },
            entries,
            occupancy,
        });
    }

    RoomSchedule {
        building: building.to_string(),
        room: room.to_string(),
        days,
        weekly,
    }
}

/// Parse a clock string into minutes since midnight.
///
/// Accepts 12-hour forms ("9:30 AM", "12:05 pm", "9 AM") and plain 24-hour
/// "HH:MM" as a fallback.
pub fn parse_clock(value: &str) -> Option<u32> {
    let value = value.trim().to_uppercase();

    let (time_part, meridiem) = if let Some(rest) = value.strip_suffix("AM") {
        (rest.trim(), Some(false))
    } else if let Some(rest) = value.strip_suffix("PM") {
        (rest.trim(), Some(true))
    } else {
        (value.as_str(), None)
    };

    let (hour_str, minute_str) = match time_part.split_once(':') {
        Some((h, m)) => (h, m),
        None => (time_part, "0"),
    };
    let hour: u32 = hour_str.trim().parse().ok()?;
    let minute: u32 = minute_str.trim().parse().ok()?;
    if minute >= 60 {
        return None;
    }

    match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            let base = (hour % 12) * 60 + minute;
            Some(if pm { base + 720 } else { base })
        }
        None => {
            if hour >= 24 {
                return None;
            }
            Some(hour * 60 + minute)
        }
    }
}

/// Rooms free for the whole window [start, end) on the given day.
///
/// `day` may be a weekday code or a full name. The candidate set comes from
/// `search_rooms` over the optional room filter, optionally narrowed to a
/// campus. A room is unavailable iff some meeting at that exact (building,
/// room, day) overlaps the window under the half-open rule; meetings with
/// unparseable times never block availability.
pub fn find_available_rooms(
    day: &str,
    window: (u32, u32),
    courses: &[EnrichedCourse],
    room_filter: Option<&str>,
    campus_filter: Option<&str>,
) -> Vec<Room> {
    let day_name = format_weekday(day);
    let (target_start, target_end) = window;

    let mut candidates = search_rooms(room_filter.unwrap_or_default(), courses);
    if let Some(filter) = campus_filter {
        let resolved = format_campus(filter.trim()).to_lowercase();
        candidates.retain(|room| {
            let campus = room.campus.to_lowercase();
            campus.contains(&resolved) || resolved.contains(&campus)
        });
    }

    candidates
        .into_iter()
        .filter(|room| {
            !occupied(courses, room, day_name, target_start, target_end)
        })
        .collect()
}

fn occupied(
    courses: &[EnrichedCourse],
    room: &Room,
    day_name: &str,
    target_start: u32,
    target_end: u32,
) -> bool {
    for course in courses {
        for section in &course.sections {
            for meeting in &section.meeting_times {
                if meeting.building != room.building
                    || meeting.room != room.room
                    || meeting.day != day_name
                {
                    continue;
                }
                let (start, end) = (
                    parse_clock(&meeting.start_time.formatted),
                    parse_clock(&meeting.end_time.formatted),
                );
                let (Some(class_start), Some(class_end)) = (start, end) else {
                    // TBA meetings can't be placed on the clock; report and
                    // treat as non-overlapping rather than guessing.
                    warn!(
                        building = %room.building,
                        room = %room.room,
                        course = %course.course_string,
                        "meeting has unparseable time, not counted against availability"
                    );
                    continue;
                };
                if target_start < class_end && class_start < target_end {
                    return true;
                }
            }
        }
    }
    false
}
