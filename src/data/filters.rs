//! Structured course filtering.
//!
//! Predicates combine with AND across keys; a multi-valued key is satisfied
//! by ANY meeting of ANY section (OR within the key). An absent key is no
//! constraint. Delivery mode and campus are free text upstream, so those
//! predicates are substring rules rather than closed enums.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::enrich::{format_campus, format_weekday, military_to_minutes};
use crate::soc::types::{CourseRecord, MeetingRecord};

/// Section open/closed status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Open,
    Closed,
}

impl StatusFilter {
    fn matches(self, status_text: &str) -> bool {
        let status = status_text.to_lowercase();
        match self {
            StatusFilter::Open => status.contains("open"),
            StatusFilter::Closed => status.contains("closed"),
        }
    }
}

/// Delivery-mode filter, classified by substring over the free-text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTypeFilter {
    /// In-person: mode mentions none of the online/hybrid/remote markers.
    Traditional,
    Hybrid,
    /// Online, remote, or asynchronous instruction.
    Online,
}

impl CourseTypeFilter {
    fn matches(self, mode_text: &str) -> bool {
        let mode = mode_text.to_lowercase();
        match self {
            CourseTypeFilter::Traditional => {
                !mode.contains("online")
                    && !mode.contains("hybrid")
                    && !mode.contains("remote")
                    && !mode.contains("asynchronous")
            }
            CourseTypeFilter::Hybrid => mode.contains("hybrid"),
            CourseTypeFilter::Online => {
                mode.contains("online") || mode.contains("remote") || mode.contains("asynchronous")
            }
        }
    }
}

/// Time-of-day buckets over a meeting's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangeFilter {
    /// 8:00 AM up to 11:00 AM.
    Morning,
    /// 11:00 AM up to 4:00 PM.
    Afternoon,
    /// 4:00 PM up to 10:00 PM.
    Evening,
}

impl TimeRangeFilter {
    fn contains(self, minutes: u32) -> bool {
        match self {
            TimeRangeFilter::Morning => (480..660).contains(&minutes),
            TimeRangeFilter::Afternoon => (660..960).contains(&minutes),
            TimeRangeFilter::Evening => (960..1320).contains(&minutes),
        }
    }
}

/// The full set of optional course predicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub subject: Option<String>,
    pub school: Option<String>,
    pub core_code: Option<String>,
    pub status: Vec<StatusFilter>,
    pub course_type: Vec<CourseTypeFilter>,
    /// Weekday codes, full names, or "weekend".
    pub days: Vec<String>,
    pub time_range: Vec<TimeRangeFilter>,
    /// Campus names or fragments, matched case-insensitively in either
    /// containment direction against the resolved campus name.
    pub campus: Vec<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.school.is_none()
            && self.core_code.is_none()
            && self.status.is_empty()
            && self.course_type.is_empty()
            && self.days.is_empty()
            && self.time_range.is_empty()
            && self.campus.is_empty()
    }

    /// Whether any predicate needs section or meeting data to evaluate.
    fn needs_sections(&self) -> bool {
        !self.status.is_empty()
            || !self.course_type.is_empty()
            || !self.days.is_empty()
            || !self.time_range.is_empty()
            || !self.campus.is_empty()
    }
}

fn day_filter_matches(meeting: &MeetingRecord, wanted: &str) -> bool {
    let code = meeting.day_code();
    let name = format_weekday(code);
    if wanted == "weekend" {
        return matches!(code, "S" | "Su") || matches!(name, "Saturday" | "Sunday");
    }
    code == wanted || name == wanted || name == format_weekday(wanted)
}

fn campus_filter_matches(meeting: &MeetingRecord, wanted: &str) -> bool {
    let resolved = format_campus(meeting.campus_id()).to_lowercase();
    let wanted = wanted.to_lowercase();
    resolved.contains(&wanted) || wanted.contains(&resolved)
}

fn matches(course: &CourseRecord, filters: &FilterSet) -> bool {
    if let Some(subject) = &filters.subject {
        let subject = subject.trim();
        if !subject.is_empty() && course.subject().trim() != subject {
            return false;
        }
    }

    if let Some(school) = &filters.school
        && course.school.code() != school.as_str()
        && !course.school.description().contains(school.as_str())
    {
        return false;
    }

    if let Some(core) = &filters.core_code
        && !course.core_codes.iter().any(|c| c.code() == core.as_str())
    {
        return false;
    }

    if course.sections.is_empty() {
        // Section-dependent predicates can never hold without sections.
        return !filters.needs_sections();
    }

    if !filters.status.is_empty()
        && !course.sections.iter().any(|section| {
            filters.status.iter().any(|s| s.matches(section.status()))
        })
    {
        return false;
    }

    let mut type_ok = filters.course_type.is_empty();
    let mut days_ok = filters.days.is_empty();
    let mut time_ok = filters.time_range.is_empty();
    let mut campus_ok = filters.campus.is_empty();

    'sections: for section in &course.sections {
        if section.meeting_times.is_empty() {
            continue;
        }
        for meeting in &section.meeting_times {
            if !type_ok && filters.course_type.iter().any(|t| t.matches(meeting.mode())) {
                type_ok = true;
            }
            if !days_ok
                && filters
                    .days
                    .iter()
                    .any(|d| day_filter_matches(meeting, d))
            {
                days_ok = true;
            }
            if !time_ok
                && let Some(minutes) = military_to_minutes(meeting.start_military())
                && filters.time_range.iter().any(|r| r.contains(minutes))
            {
                time_ok = true;
            }
            if !campus_ok
                && filters
                    .campus
                    .iter()
                    .any(|c| campus_filter_matches(meeting, c))
            {
                campus_ok = true;
            }
            if type_ok && days_ok && time_ok && campus_ok {
                break 'sections;
            }
        }
    }

    type_ok && days_ok && time_ok && campus_ok
}

/// Apply the filter set, keeping original order. An empty set is identity.
pub fn apply<'a>(courses: &'a [CourseRecord], filters: &FilterSet) -> Vec<&'a CourseRecord> {
    if filters.is_empty() {
        return courses.iter().collect();
    }

    let kept: Vec<&CourseRecord> = courses.iter().filter(|c| matches(c, filters)).collect();
    debug!(
        before = courses.len(),
        after = kept.len(),
        "applied course filters"
    );
    kept
}
