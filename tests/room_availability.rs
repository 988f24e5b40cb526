//! End-to-end tests for room derivation, schedules and availability.

mod helpers;

use helpers::{course, meeting_course};
use scarlet::data::enrich::{EnrichedCourse, enrich_course};
use scarlet::data::rooms::{self, DayStatus};
use serde_json::json;

fn enriched(raw: Vec<scarlet::soc::types::CourseRecord>) -> Vec<EnrichedCourse> {
    raw.iter().map(enrich_course).collect()
}

fn arc_103_courses() -> Vec<EnrichedCourse> {
    enriched(vec![
        meeting_course(
            "01:198:111",
            "Intro to CS",
            "01",
            "SMITH, JOHN",
            "M",
            "1000",
            "1050",
            "ARC",
            "103",
        ),
        meeting_course(
            "01:640:152",
            "Calculus II",
            "05",
            "GARCIA, MARIA",
            "M",
            "0900",
            "0950",
            "ARC",
            "103",
        ),
    ])
}

/// Spec scenario: two Monday meetings at 10:00-10:50 and 9:00-9:50 in ARC 103
/// come back ordered [9:00, 10:00].
#[test]
fn schedule_orders_monday_by_start_time() {
    let schedule = rooms::room_schedule("ARC", "103", &arc_103_courses());

    let monday = &schedule.days[0];
    assert_eq!(monday.day, "Monday");
    assert_eq!(monday.status, DayStatus::ClassesScheduled);
    let starts: Vec<&str> = monday
        .entries
        .iter()
        .map(|e| e.start_time.as_str())
        .collect();
    assert_eq!(starts, ["9:00 AM", "10:00 AM"]);

    // Every other day is free.
    for day in &schedule.days[1..] {
        assert_eq!(day.status, DayStatus::AvailableAllDay, "{}", day.day);
    }
}

#[test]
fn schedule_entries_carry_course_context() {
    let schedule = rooms::room_schedule("ARC", "103", &arc_103_courses());
    let first = &schedule.days[0].entries[0];
    assert_eq!(first.course, "01:640:152");
    assert_eq!(first.title, "Calculus II");
    assert_eq!(first.section, "05");
    assert_eq!(first.instructors, ["GARCIA, MARIA"]);
}

/// Spec scenario: a meeting at [10:30, 10:45) blocks the [10:00, 11:00)
/// window; a meeting at [11:00, 12:00) does not.
#[test]
fn interval_overlap_rule() {
    let blocking = enriched(vec![meeting_course(
        "01:198:112",
        "Data Structures",
        "02",
        "SMITH, JOHN",
        "M",
        "1030",
        "1045",
        "ARC",
        "103",
    )]);
    let window = (
        rooms::parse_clock("10:00 AM").unwrap(),
        rooms::parse_clock("11:00 AM").unwrap(),
    );
    assert!(rooms::find_available_rooms("M", window, &blocking, None, None).is_empty());

    let adjacent = enriched(vec![meeting_course(
        "01:198:112",
        "Data Structures",
        "02",
        "SMITH, JOHN",
        "M",
        "1100",
        "1200",
        "ARC",
        "103",
    )]);
    let free = rooms::find_available_rooms("M", window, &adjacent, None, None);
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].full_name, "ARC 103");
}

#[test]
fn rooms_are_unique_by_building_and_room() {
    let courses = enriched(vec![
        meeting_course("a", "A", "01", "X, Y", "M", "0900", "0950", "ARC", "103"),
        meeting_course("b", "B", "01", "X, Y", "T", "1000", "1050", "ARC", "103"),
        meeting_course("c", "C", "01", "X, Y", "W", "1100", "1150", "HLL", "114"),
    ]);
    let rooms = rooms::all_rooms(&courses);

    let mut keys: Vec<(String, String)> = rooms
        .iter()
        .map(|r| (r.building.clone(), r.room.clone()))
        .collect();
    keys.dedup();
    assert_eq!(keys.len(), rooms.len());
    assert_eq!(rooms.len(), 2);
}

#[test]
fn tba_meetings_never_block_availability() {
    let courses = enriched(vec![course(json!({
        "courseString": "01:090:101",
        "title": "Seminar",
        "sections": [{
            "number": "01",
            "meetingTimes": [{
                "meetingDay": "M",
                "startTimeMilitary": "N/A",
                "endTimeMilitary": "N/A",
                "buildingCode": "ARC",
                "roomNumber": "103"
            }]
        }]
    }))]);

    let window = (
        rooms::parse_clock("9:00 AM").unwrap(),
        rooms::parse_clock("5:00 PM").unwrap(),
    );
    let free = rooms::find_available_rooms("Monday", window, &courses, None, None);
    assert_eq!(free.len(), 1);
}

#[test]
fn room_search_prefers_direct_hits() {
    let courses = arc_103_courses();
    let hits = rooms::search_rooms("ARC 103", &courses);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].full_name, "ARC 103");
}

#[test]
fn availability_honors_room_and_campus_filters() {
    let mut raw = vec![
        meeting_course("a", "A", "01", "X, Y", "M", "0900", "0950", "ARC", "103"),
    ];
    raw.push(course(json!({
        "courseString": "b",
        "title": "B",
        "sections": [{
            "number": "01",
            "meetingTimes": [{
                "meetingDay": "T",
                "startTimeMilitary": "0900",
                "endTimeMilitary": "0950",
                "buildingCode": "TIL",
                "roomNumber": "254",
                "campusLocation": "3"
            }]
        }]
    })));
    let courses = enriched(raw);

    let window = (
        rooms::parse_clock("1:00 PM").unwrap(),
        rooms::parse_clock("2:00 PM").unwrap(),
    );

    let on_livingston =
        rooms::find_available_rooms("F", window, &courses, None, Some("Livingston"));
    assert_eq!(on_livingston.len(), 1);
    assert_eq!(on_livingston[0].building, "TIL");

    let filtered = rooms::find_available_rooms("F", window, &courses, Some("ARC"), None);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].building, "ARC");
}
