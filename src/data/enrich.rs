//! Reshapes raw upstream course records into the enriched public shape.
//!
//! Pure formatting, no matching logic. Weekday codes, campus identifiers and
//! military times are resolved to display values here; every other component
//! that needs those resolutions (filters, rooms) goes through the same
//! helpers so the rules live in one place.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::soc::types::{CourseRecord, MeetingRecord, NOT_AVAILABLE, SectionRecord};

/// Upstream weekday codes, Monday through Sunday. Thursday is "H".
pub const WEEKDAY_CODES: [(&str, &str); 7] = [
    ("M", "Monday"),
    ("T", "Tuesday"),
    ("W", "Wednesday"),
    ("H", "Thursday"),
    ("F", "Friday"),
    ("S", "Saturday"),
    ("Su", "Sunday"),
];

/// Full weekday names in weekly order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Campus identifiers as sent in `campusLocation`.
pub const CAMPUS_ID_TO_NAME: [(&str, &str); 4] = [
    ("1", "College Ave"),
    ("2", "Busch"),
    ("3", "Livingston"),
    ("4", "Cook/Doug"),
];

/// Alternate campus code formats seen in other upstream fields.
pub const CAMPUS_ABBREV_TO_NAME: [(&str, &str); 6] = [
    ("CA", "College Ave"),
    ("BU", "Busch"),
    ("LIV", "Livingston"),
    ("CD", "Cook/Doug"),
    ("C/D", "Cook/Doug"),
    ("D/C", "Cook/Doug"),
];

/// Resolve a weekday code to its full name, passing unknown codes through.
pub fn format_weekday(code: &str) -> &str {
    WEEKDAY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Resolve a campus identifier (numeric or abbreviated) to its display name,
/// passing unknown identifiers through.
pub fn format_campus(id: &str) -> &str {
    CAMPUS_ID_TO_NAME
        .iter()
        .chain(CAMPUS_ABBREV_TO_NAME.iter())
        .find(|(c, _)| *c == id)
        .map(|(_, name)| *name)
        .unwrap_or(id)
}

/// Convert a 4-digit military time to "H:MM AM/PM" with no leading zero.
///
/// Missing or malformed input yields the "N/A" sentinel; this never fails.
pub fn to_am_pm(military: &str) -> String {
    let Some(minutes) = military_to_minutes(military) else {
        if !military.is_empty() && military != NOT_AVAILABLE {
            warn!(time = military, "invalid military time format");
        }
        return NOT_AVAILABLE.to_string();
    };

    let (hour24, minute) = (minutes / 60, minutes % 60);
    let meridiem = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minute:02} {meridiem}")
}

/// Parse a military time into minutes since midnight.
pub fn military_to_minutes(military: &str) -> Option<u32> {
    let value: u32 = military.trim().parse().ok()?;
    let (hour, minute) = (value / 100, value % 100);
    if hour < 24 && minute < 60 {
        Some(hour * 60 + minute)
    } else {
        None
    }
}

/// A time in both its raw military and display forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimePair {
    pub military: String,
    pub formatted: String,
}

impl TimePair {
    fn from_military(military: &str) -> Self {
        Self {
            military: military.to_string(),
            formatted: to_am_pm(military),
        }
    }
}

/// One scheduled meeting in display form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMeeting {
    pub day: String,
    pub start_time: TimePair,
    pub end_time: TimePair,
    pub building: String,
    pub room: String,
    pub mode: String,
    pub campus: String,
}

/// One section in display form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSection {
    pub number: String,
    pub index: String,
    pub instructors: Vec<String>,
    pub status: String,
    pub comments: String,
    pub meeting_times: Vec<EnrichedMeeting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreRequirement {
    pub code: String,
    pub description: String,
}

/// The public course shape served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCourse {
    #[serde(rename = "courseString")]
    pub course_string: String,
    pub title: String,
    pub subject: String,
    #[serde(rename = "subjectDescription")]
    pub subject_description: String,
    pub course_number: String,
    pub description: String,
    pub credits: Option<f64>,
    #[serde(rename = "creditsDescription")]
    pub credits_description: String,
    pub school: String,
    #[serde(rename = "campusLocations")]
    pub campus_locations: Vec<String>,
    pub prerequisites: String,
    #[serde(rename = "coreRequirements")]
    pub core_requirements: Vec<CoreRequirement>,
    pub sections: Vec<EnrichedSection>,
}

/// Format one meeting, resolving weekday, campus and clock display.
pub fn enrich_meeting(meeting: &MeetingRecord) -> EnrichedMeeting {
    EnrichedMeeting {
        day: format_weekday(meeting.day_code()).to_string(),
        start_time: TimePair::from_military(meeting.start_military()),
        end_time: TimePair::from_military(meeting.end_military()),
        building: meeting.building().to_string(),
        room: meeting.room().to_string(),
        mode: meeting.mode().to_string(),
        campus: format_campus(meeting.campus_id()).to_string(),
    }
}

fn enrich_section(section: &SectionRecord) -> EnrichedSection {
    EnrichedSection {
        number: section.number().to_string(),
        index: section.index().to_string(),
        instructors: section.instructor_names().map(str::to_string).collect(),
        status: section.status().to_string(),
        comments: section.comments().to_string(),
        meeting_times: section.meeting_times.iter().map(enrich_meeting).collect(),
    }
}

/// Reshape one raw course into the enriched public shape.
pub fn enrich_course(course: &CourseRecord) -> EnrichedCourse {
    EnrichedCourse {
        course_string: course.course_string().to_string(),
        title: course.title().to_string(),
        subject: course.subject().to_string(),
        subject_description: course.subject_description().to_string(),
        course_number: course.course_number().to_string(),
        description: course.description().to_string(),
        credits: course.credits,
        credits_description: course
            .credits_object
            .description
            .clone()
            .unwrap_or_default(),
        school: course.school.description().to_string(),
        campus_locations: course
            .campus_locations
            .iter()
            .filter_map(|loc| loc.description.clone())
            .collect(),
        prerequisites: course.prerequisites().to_string(),
        core_requirements: course
            .core_codes
            .iter()
            .map(|core| CoreRequirement {
                code: core.code().to_string(),
                description: core.description().to_string(),
            })
            .collect(),
        sections: course.sections.iter().map(enrich_section).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn am_pm_strips_leading_zero() {
        assert_eq!(to_am_pm("0930"), "9:30 AM");
        assert_eq!(to_am_pm("0905"), "9:05 AM");
    }

    #[test]
    fn am_pm_afternoon() {
        assert_eq!(to_am_pm("1330"), "1:30 PM");
        assert_eq!(to_am_pm("1200"), "12:00 PM");
    }

    #[test]
    fn am_pm_midnight() {
        assert_eq!(to_am_pm("0000"), "12:00 AM");
    }

    #[test]
    fn am_pm_sentinel_passthrough() {
        assert_eq!(to_am_pm("N/A"), "N/A");
        assert_eq!(to_am_pm(""), "N/A");
    }

    #[test]
    fn am_pm_invalid_never_panics() {
        assert_eq!(to_am_pm("2575"), "N/A");
        assert_eq!(to_am_pm("abcd"), "N/A");
    }

    #[test]
    fn minutes_since_midnight() {
        assert_eq!(military_to_minutes("0800"), Some(480));
        assert_eq!(military_to_minutes("1100"), Some(660));
        assert_eq!(military_to_minutes("N/A"), None);
        assert_eq!(military_to_minutes("2460"), None);
    }

    #[test]
    fn weekday_codes_resolve() {
        assert_eq!(format_weekday("M"), "Monday");
        assert_eq!(format_weekday("H"), "Thursday");
        assert_eq!(format_weekday("Su"), "Sunday");
        assert_eq!(format_weekday("X"), "X");
    }

    #[test]
    fn campus_codes_resolve() {
        assert_eq!(format_campus("2"), "Busch");
        assert_eq!(format_campus("LIV"), "Livingston");
        assert_eq!(format_campus("D/C"), "Cook/Doug");
        assert_eq!(format_campus("NB"), "NB");
    }

    #[test]
    fn enrich_defaults_on_empty_record() {
        let enriched = enrich_course(&CourseRecord::default());
        assert_eq!(enriched.course_string, "");
        assert!(enriched.sections.is_empty());
        assert!(enriched.core_requirements.is_empty());
    }

    #[test]
    fn enrich_meeting_applies_sentinels() {
        let enriched = enrich_meeting(&MeetingRecord::default());
        assert_eq!(enriched.start_time.formatted, "N/A");
        assert_eq!(enriched.building, "N/A");
        assert_eq!(enriched.campus, "N/A");
    }

    #[test]
    fn enrich_resolves_nested_display_fields() {
        let json = r#"{
            "courseString": "01:198:111",
            "title": "INTRO COMPUTER SCI",
            "coreCodes": [{"coreCode": "QQ", "coreCodeDescription": "Quantitative"}],
            "sections": [{
                "number": "01",
                "instructors": [{"name": "SMITH, JOHN"}],
                "meetingTimes": [{
                    "meetingDay": "H",
                    "startTimeMilitary": "1020",
                    "endTimeMilitary": "1140",
                    "buildingCode": "ARC",
                    "roomNumber": "103",
                    "campusLocation": "2"
                }]
            }]
        }"#;
        let course: CourseRecord = serde_json::from_str(json).unwrap();
        let enriched = enrich_course(&course);

        assert_eq!(enriched.core_requirements[0].code, "QQ");
        let meeting = &enriched.sections[0].meeting_times[0];
        assert_eq!(meeting.day, "Thursday");
        assert_eq!(meeting.start_time.formatted, "10:20 AM");
        assert_eq!(meeting.campus, "Busch");
    }
}
