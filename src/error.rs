//! Error types.

use crate::json::Json;

/// Errors surfaced by [`request`](crate::request()).
///
/// Application-level error responses carry the decoded body in
/// [`Error::Api::payload`] so callers can branch on structured server
/// error details.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No transport was injected and no ambient transport is compiled in.
    /// Raised before any network activity.
    #[error("fetch is missing")]
    FetchMissing,

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The underlying transport failed; the original error is propagated
    /// unwrapped as both display and source.
    #[error("{0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The request was cancelled, either by the internal timeout or by a
    /// caller-supplied signal.
    #[error("request aborted")]
    Aborted,

    #[error("unexpected content-type in the response: {0}")]
    UnexpectedContentType(String),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A JSON error response (status >= 400). `message` is the payload's
    /// `message` field when present.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        payload: Json,
    },
}

#[cfg(feature = "native-transport")]
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Transport(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        assert_eq!(Error::FetchMissing.to_string(), "fetch is missing");
        assert_eq!(Error::Aborted.to_string(), "request aborted");
        assert_eq!(
            Error::UnexpectedContentType("text/plain".into()).to_string(),
            "unexpected content-type in the response: text/plain"
        );
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = Error::Api {
            status: 404,
            message: "not found".into(),
            payload: Json::Null,
        };
        assert_eq!(err.to_string(), "not found");
    }
}
