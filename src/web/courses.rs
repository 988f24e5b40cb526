//! Course search handler.

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::data::catalog;
use crate::data::enrich::EnrichedCourse;
use crate::data::filters::{CourseTypeFilter, FilterSet, StatusFilter, TimeRangeFilter};
use crate::data::store::TermKey;
use crate::state::AppState;
use crate::web::error::ApiError;
use crate::web::routes::{cache, default_campus, default_term, default_year, with_cache_control};

#[derive(Debug, Deserialize)]
pub struct CourseParams {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_campus")]
    pub campus: String,
    pub search: Option<String>,
    pub subject: Option<String>,
    pub school: Option<String>,
    pub core_code: Option<String>,
    #[serde(default)]
    pub status: Vec<StatusFilter>,
    #[serde(default)]
    pub course_type: Vec<CourseTypeFilter>,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub time_range: Vec<TimeRangeFilter>,
    /// Meeting-campus fragments, distinct from the term `campus` key.
    #[serde(default)]
    pub campus_filter: Vec<String>,
}

impl CourseParams {
    fn key(&self) -> TermKey {
        TermKey::new(&self.year, &self.term, &self.campus)
    }

    fn filter_set(&self) -> FilterSet {
        FilterSet {
            subject: self.subject.clone(),
            school: self.school.clone(),
            core_code: self.core_code.clone(),
            status: self.status.clone(),
            course_type: self.course_type.clone(),
            days: self.days.clone(),
            time_range: self.time_range.clone(),
            campus: self.campus_filter.clone(),
        }
    }
}

#[derive(Serialize)]
struct CoursesResponse {
    status: &'static str,
    data: Vec<EnrichedCourse>,
    last_update: Option<String>,
}

/// `GET /api/courses`
pub(super) async fn get_courses(
    State(state): State<AppState>,
    axum_extra::extract::Query(params): axum_extra::extract::Query<CourseParams>,
) -> Result<Response, ApiError> {
    let key = params.key();
    let filter_set = params.filter_set();

    let data = catalog::get_courses(
        &state.store,
        params.search.as_deref(),
        &key,
        &filter_set,
    )
    .await?;

    Ok(with_cache_control(
        CoursesResponse {
            status: "success",
            data,
            last_update: state.store.last_refresh().map(|t| t.to_rfc3339()),
        },
        cache::SEARCH,
    ))
}
