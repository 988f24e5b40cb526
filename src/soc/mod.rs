//! Client for the Schedule of Classes API.
//!
//! One endpoint, three query parameters, occasionally flaky: requests get a
//! configurable timeout and a small bounded retry with exponential backoff
//! and jitter on transport errors and retryable HTTP statuses. Malformed
//! bodies are not retried; individual malformed records are skipped without
//! sinking the batch.

pub mod errors;
pub mod json;
pub mod types;

use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use tracing::{debug, warn};

pub use errors::SocApiError;
use types::CourseRecord;

/// HTTP statuses worth retrying; everything else fails immediately.
const RETRYABLE_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// Base delay for exponential backoff between retries.
const BACKOFF_BASE: Duration = Duration::from_secs(1);

enum AttemptError {
    /// Transport-level failure or retryable upstream status.
    Transient(anyhow::Error),
    /// Anything retrying won't help: a non-retryable status or a malformed body.
    Fatal(SocApiError),
}

pub struct SocApi {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl SocApi {
    pub fn new(base_url: String, timeout: Duration, max_retries: u32) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url,
            max_retries,
        })
    }

    /// Fetch the raw course list for one (year, term, campus) triple.
    pub async fn fetch_courses(
        &self,
        year: &str,
        term: &str,
        campus: &str,
    ) -> Result<Vec<CourseRecord>, SocApiError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.fetch_once(year, term, campus).await {
                Ok(courses) => return Ok(courses),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(source)) => {
                    if attempt > self.max_retries {
                        return Err(SocApiError::RetriesExhausted {
                            attempts: attempt,
                            source,
                        });
                    }
                    let backoff = BACKOFF_BASE * 2u32.saturating_pow(attempt - 1)
                        + Duration::from_millis(rand::rng().random_range(0..250));
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %source,
                        "course fetch failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        year: &str,
        term: &str,
        campus: &str,
    ) -> Result<Vec<CourseRecord>, AttemptError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("year", year), ("term", term), ("campus", campus)])
            .send()
            .await
            .map_err(|e| AttemptError::Transient(anyhow::Error::new(e).context("request failed")))?;

        let status = response.status();
        let url = response.url().to_string();

        if RETRYABLE_STATUS.contains(&status.as_u16()) {
            return Err(AttemptError::Transient(anyhow::anyhow!(
                "upstream returned HTTP {status} for {url}"
            )));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(SocApiError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            }));
        }

        let body = response.text().await.map_err(|e| {
            AttemptError::Transient(anyhow::Error::new(e).context("failed to read response body"))
        })?;

        let raw: Vec<serde_json::Value> = json::parse_json_with_context(&body).map_err(|source| {
            AttemptError::Fatal(SocApiError::ParseFailed {
                status: status.as_u16(),
                url: url.clone(),
                source,
            })
        })?;

        // One bad record must not discard the other few thousand.
        let total = raw.len();
        let mut courses = Vec::with_capacity(total);
        let mut skipped = 0usize;
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<CourseRecord>(value) {
                Ok(course) => courses.push(course),
                Err(e) => {
                    skipped += 1;
                    warn!(index, error = %e, "skipping malformed course record");
                }
            }
        }

        debug!(
            year,
            term,
            campus,
            fetched = courses.len(),
            skipped,
            body_kb = body.len() / 1024,
            "fetched course list"
        );
        Ok(courses)
    }
}
