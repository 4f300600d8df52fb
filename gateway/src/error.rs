//! Error taxonomy for gateway calls.

use thiserror::Error;

/// Errors that can occur when calling the club API.
///
/// The taxonomy distinguishes transport failures, server rejections and
/// malformed bodies; callers store the human-readable rendering on the state
/// slice that owns the failed operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing `COURTSIDE_API_URL` environment variable
    #[error("Missing COURTSIDE_API_URL environment variable")]
    MissingBaseUrl,

    /// Transport or connection failure - no response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    ///
    /// The message is extracted best-effort from the known response fields
    /// (`message`, `error`), falling back to `HTTP <status>`.
    #[error("{message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or `HTTP <status>`
        message: String,
    },

    /// The response body was not the JSON shape expected
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Fallback message for a non-2xx response with no usable body.
    #[must_use]
    pub fn http_fallback(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("HTTP {status}"),
        }
    }
}
