//! Request options.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::transport::Transport;

/// Default request timeout, applied when the caller supplies neither a
/// timeout nor a cancellation signal.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body.
///
/// `Json` bodies holding an array or a plain object are serialized and get
/// the `content-type: application/json` header injected; everything else
/// passes through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    None,
    Json(serde_json::Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    /// Build a JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, Error> {
        Ok(Body::Json(
            serde_json::to_value(value).map_err(Error::Serialize)?,
        ))
    }
}

/// How the response body should be handled.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Parse {
    /// Decode JSON bodies (the default).
    #[default]
    Json,
    /// Decode JSON bodies, then coerce the designated keys to datetimes.
    JsonWithDates(Vec<String>),
    /// Return the raw response unprocessed; the caller handles the body.
    Raw,
}

/// Options for a single [`request`](crate::request()) call.
///
/// Built with the `RequestOptions::new()` chain; the record is moved into
/// the call and mutated there, so the caller's own values are never aliased.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Body,
    pub headers: HeaderMap,
    /// Injected transport; wins over the ambient one.
    pub transport: Option<Arc<dyn Transport>>,
    /// Caller-owned cancellation. Supplying one disables the internal
    /// timeout entirely.
    pub signal: Option<CancellationToken>,
    /// Timeout for the internal cancellation guard. Ignored when `signal`
    /// is set.
    pub timeout: Option<Duration>,
    pub parse: Parse,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Shortcut for `.body(Body::json(value)?)`.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, Error> {
        Ok(self.body(Body::json(value)?))
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn parse(mut self, parse: Parse) -> Self {
        self.parse = parse;
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("signal", &self.signal.is_some())
            .field("timeout", &self.timeout)
            .field("parse", &self.parse)
            .finish_non_exhaustive()
    }
}
