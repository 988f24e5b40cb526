//! Error types for the Schedule of Classes API client.

#[derive(Debug, thiserror::Error)]
pub enum SocApiError {
    #[error("upstream returned HTTP {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("failed to parse course response")]
    ParseFailed {
        status: u16,
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("upstream request failed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    RequestFailed(#[from] anyhow::Error),
}
