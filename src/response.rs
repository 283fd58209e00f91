//! Buffered HTTP response model.
//!
//! A [`Response`] is a fully buffered response as returned by a
//! [`Transport`](crate::Transport): final URL, status, headers, and raw body
//! bytes. No parsing has happened yet; the request pipeline decides what to
//! do with the body based on the `Content-Type` header.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use url::Url;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL of the response (after redirects, if the transport follows
    /// them).
    pub url: Url,

    /// HTTP status code.
    pub status: StatusCode,

    /// Response headers, case-insensitive by name.
    pub headers: HeaderMap,

    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// The `Content-Type` header value, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Whether the content type declares a JSON body, matched
    /// case-insensitively by prefix so parameters like `; charset=utf-8`
    /// are tolerated.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false)
    }
}
