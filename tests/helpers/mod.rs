//! Shared fixture builders for integration tests.

// Each integration test binary compiles this module separately and uses a
// different subset of the builders.
#![allow(dead_code)]

use scarlet::soc::types::CourseRecord;
use serde_json::{Value, json};

/// Build a raw course record from JSON. Panics on malformed fixtures, which
/// is fine in tests.
pub fn course(value: Value) -> CourseRecord {
    serde_json::from_value(value).expect("fixture course should deserialize")
}

/// A minimal course with one section and no meetings.
pub fn simple_course(
    course_string: &str,
    subject: &str,
    number: &str,
    title: &str,
    subject_description: &str,
) -> CourseRecord {
    course(json!({
        "courseString": course_string,
        "subject": subject,
        "courseNumber": number,
        "title": title,
        "subjectDescription": subject_description,
        "sections": [{"number": "01"}]
    }))
}

/// A course with one section meeting at the given room and times.
#[allow(clippy::too_many_arguments)]
pub fn meeting_course(
    course_string: &str,
    title: &str,
    section: &str,
    instructor: &str,
    day: &str,
    start: &str,
    end: &str,
    building: &str,
    room: &str,
) -> CourseRecord {
    course(json!({
        "courseString": course_string,
        "title": title,
        "sections": [{
            "number": section,
            "instructors": [{"name": instructor}],
            "meetingTimes": [{
                "meetingDay": day,
                "startTimeMilitary": start,
                "endTimeMilitary": end,
                "buildingCode": building,
                "roomNumber": room,
                "campusLocation": "2",
                "meetingModeDesc": "LEC"
            }]
        }]
    }))
}
