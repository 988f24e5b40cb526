//! Raw record types for the Schedule of Classes API.
//!
//! Every field is optional at the serde layer: the upstream feed omits and
//! nulls fields freely, and a single odd record must never sink the batch.
//! Accessors apply the documented defaults ("" for descriptive text, "N/A"
//! for location and time sentinels) so nothing downstream touches an
//! untyped value.

use serde::{Deserialize, Serialize};

/// Sentinel used by the upstream feed for unknown times, rooms and buildings.
pub const NOT_AVAILABLE: &str = "N/A";

/// One course offering as returned by the upstream API. Several raw records
/// can share a `courseString`; they are treated as one logical course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecord {
    pub course_string: Option<String>,
    pub subject: Option<String>,
    pub course_number: Option<String>,
    pub title: Option<String>,
    pub course_description: Option<String>,
    pub subject_description: Option<String>,
    pub school: SchoolRecord,
    pub credits: Option<f64>,
    pub credits_object: CreditsObject,
    pub campus_locations: Vec<CampusLocationRecord>,
    pub pre_req_notes: Option<String>,
    pub core_codes: Vec<CoreCodeRecord>,
    pub sections: Vec<SectionRecord>,
}

impl CourseRecord {
    pub fn course_string(&self) -> &str {
        self.course_string.as_deref().unwrap_or_default()
    }

    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    pub fn course_number(&self) -> &str {
        self.course_number.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.course_description.as_deref().unwrap_or_default()
    }

    pub fn subject_description(&self) -> &str {
        self.subject_description.as_deref().unwrap_or_default()
    }

    pub fn prerequisites(&self) -> &str {
        self.pre_req_notes.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolRecord {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl SchoolRecord {
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditsObject {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampusLocationRecord {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreCodeRecord {
    pub core_code: Option<String>,
    pub core_code_description: Option<String>,
}

impl CoreCodeRecord {
    pub fn code(&self) -> &str {
        self.core_code.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.core_code_description.as_deref().unwrap_or_default()
    }
}

/// One enrollable section of a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRecord {
    pub number: Option<String>,
    pub index: Option<String>,
    pub open_status_text: Option<String>,
    pub comments_text: Option<String>,
    pub instructors: Vec<InstructorRecord>,
    pub meeting_times: Vec<MeetingRecord>,
}

impl SectionRecord {
    pub fn number(&self) -> &str {
        self.number.as_deref().unwrap_or_default()
    }

    pub fn index(&self) -> &str {
        self.index.as_deref().unwrap_or_default()
    }

    pub fn status(&self) -> &str {
        self.open_status_text.as_deref().unwrap_or_default()
    }

    pub fn comments(&self) -> &str {
        self.comments_text.as_deref().unwrap_or_default()
    }

    /// Non-empty instructor names, trimmed.
    pub fn instructor_names(&self) -> impl Iterator<Item = &str> {
        self.instructors
            .iter()
            .filter_map(|i| i.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstructorRecord {
    pub name: Option<String>,
}

/// One scheduled occurrence of a section at a day/time/location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingRecord {
    pub meeting_day: Option<String>,
    pub start_time_military: Option<String>,
    pub end_time_military: Option<String>,
    pub building_code: Option<String>,
    pub room_number: Option<String>,
    pub campus_location: Option<String>,
    pub meeting_mode_desc: Option<String>,
}

impl MeetingRecord {
    pub fn day_code(&self) -> &str {
        self.meeting_day.as_deref().unwrap_or_default()
    }

    pub fn start_military(&self) -> &str {
        self.start_time_military.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn end_military(&self) -> &str {
        self.end_time_military.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn building(&self) -> &str {
        self.building_code.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn room(&self) -> &str {
        self.room_number.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn campus_id(&self) -> &str {
        self.campus_location.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn mode(&self) -> &str {
        self.meeting_mode_desc.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_record() {
        let json = r#"{
            "courseString": "01:198:111",
            "subject": "198",
            "courseNumber": "111",
            "title": "INTRO COMPUTER SCI",
            "sections": [{
                "number": "01",
                "openStatusText": "OPEN",
                "instructors": [{"name": "SMITH, JOHN"}],
                "meetingTimes": [{
                    "meetingDay": "M",
                    "startTimeMilitary": "1000",
                    "endTimeMilitary": "1120",
                    "buildingCode": "ARC",
                    "roomNumber": "103",
                    "campusLocation": "2",
                    "meetingModeDesc": "LEC"
                }]
            }]
        }"#;

        let course: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(course.course_string(), "01:198:111");
        assert_eq!(course.subject_description(), "");
        let section = &course.sections[0];
        assert_eq!(section.status(), "OPEN");
        assert_eq!(section.instructor_names().collect::<Vec<_>>(), ["SMITH, JOHN"]);
        let meeting = &section.meeting_times[0];
        assert_eq!(meeting.building(), "ARC");
        assert_eq!(meeting.mode(), "LEC");
    }

    #[test]
    fn null_fields_fall_back_to_sentinels() {
        let json = r#"{
            "courseString": "01:640:152",
            "sections": [{
                "meetingTimes": [{
                    "meetingDay": "W",
                    "startTimeMilitary": null,
                    "endTimeMilitary": null,
                    "buildingCode": null,
                    "roomNumber": null
                }]
            }]
        }"#;

        let course: CourseRecord = serde_json::from_str(json).unwrap();
        let meeting = &course.sections[0].meeting_times[0];
        assert_eq!(meeting.start_military(), NOT_AVAILABLE);
        assert_eq!(meeting.building(), NOT_AVAILABLE);
        assert_eq!(meeting.room(), NOT_AVAILABLE);
    }

    #[test]
    fn empty_object_is_valid() {
        let course: CourseRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(course.course_string(), "");
        assert!(course.sections.is_empty());
    }
}
