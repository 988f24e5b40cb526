//! Instructor salary lookup handler.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::web::error::ApiError;
use crate::web::routes::{cache, with_cache_control};

#[derive(Debug, Deserialize)]
pub struct SalaryParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
struct SalaryResponse {
    name: String,
    title: String,
    department: String,
    campus: String,
    base_pay: String,
    gross_pay: String,
    hire_date: String,
}

/// `GET /api/salary?name=...`
pub(super) async fn get_salary(
    State(state): State<AppState>,
    Query(params): Query<SalaryParams>,
) -> Result<Response, ApiError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Missing instructor name"));
    }

    let record = state
        .salaries
        .find_by_instructor(name)
        .ok_or_else(|| ApiError::not_found("Salary record", name))?;

    Ok(with_cache_control(
        SalaryResponse {
            name: record.name.clone(),
            title: record.title.clone(),
            department: record.department.clone(),
            campus: record.campus.clone(),
            base_pay: record.base_pay.clone(),
            gross_pay: record.gross_pay.clone(),
            hire_date: record.hire_date.clone(),
        },
        cache::SALARY,
    ))
}
