use thiserror::Error;

/// Errors from the remote listing API. All of these are recoverable from
/// the feed's point of view: the worst outcome is a feed that stops
/// loading further pages until the user changes filters.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

impl ApiError {
    /// True when a retry (re-triggering the scroll condition or changing
    /// filters) could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => status.is_server_error(),
            ApiError::Decode { .. } | ApiError::InvalidUrl { .. } => false,
        }
    }
}
