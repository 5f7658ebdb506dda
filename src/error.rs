//! @ai:module:intent Define error types for analytics stores and report synthesis
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for registry, fetch, store and report operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Invalid period range {start}..={end}: {reason}")]
    InvalidRange {
        start: i32,
        end: i32,
        reason: &'static str,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response shape ({malformed_records} malformed records): {reason}")]
    InvalidResponseShape {
        reason: String,
        malformed_records: usize,
    },

    #[error("Chart capture failed: {0}")]
    ChartCapture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Whether the error is an environmental fetch failure that falls back to simulated data
    /// @ai:effects pure
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::InvalidResponseShape { .. } | Error::ChartCapture(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network(format!("request timed out: {}", err))
        } else {
            Error::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
