use thiserror::Error;

/// Errors produced at the API boundary and in the derivation layer.
///
/// All of these are caught at the component boundary, logged, and turned
/// into an empty/default view state; none are expected to reach the user
/// as a panic.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("request to dashboard API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from {endpoint}: {detail}")]
    Malformed { endpoint: String, detail: String },

    #[error("upstream reported an error: {0}")]
    Upstream(String),

    #[error("rebase undefined: cumulative return is exactly -100% at window start {date}")]
    RebaseUndefined { date: String },

    #[error("invalid API URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

impl DashboardError {
    pub fn malformed(endpoint: &str, detail: impl ToString) -> Self {
        Self::Malformed {
            endpoint: endpoint.to_string(),
            detail: detail.to_string(),
        }
    }
}
