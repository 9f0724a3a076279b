use thiserror::Error;

/// Failure modes of a weather query. Every variant maps to exactly one
/// user-facing notice; nothing here is retried.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The provider does not know the requested location.
    #[error("location not found")]
    NotFound,

    /// Non-success response (other than not-found) or transport failure.
    #[error("{endpoint} request failed: {reason}")]
    FetchFailed {
        endpoint: &'static str,
        reason: String,
    },

    /// The provider answered with a body we could not decode.
    #[error("failed to decode {endpoint} response: {reason}")]
    Parse {
        endpoint: &'static str,
        reason: String,
    },
}

/// Failure modes of the platform location capability.
#[derive(Debug, Error)]
pub enum LocationError {
    /// No location service is reachable at all.
    #[error("location service unavailable")]
    Unavailable,

    /// The service answered but refused to produce a position.
    #[error("location request denied")]
    Denied,
}
