//! Transport abstraction and the ambient reqwest-backed implementation.
//!
//! The request pipeline never performs I/O itself; it hands a prepared
//! [`TransportRequest`] to a [`Transport`]. Callers may inject their own
//! implementation via [`RequestOptions::transport`](crate::RequestOptions);
//! otherwise the ambient [`HttpTransport`] is used when the
//! `native-transport` feature (default) is enabled.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::{HeaderMap, Method};
use url::Url;

use crate::error::Error;
use crate::response::Response;

/// A prepared outgoing request, ready for a transport to execute.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

pub type TransportFuture = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send>>;

/// Executes prepared requests.
///
/// Returns a boxed future so the trait is dyn-compatible and can be stored
/// as `Arc<dyn Transport>`. Implementations should buffer the full body;
/// redirect handling is theirs to decide (the pipeline treats 3xx statuses
/// as already handled).
pub trait Transport: Send + Sync {
    fn fetch(&self, request: TransportRequest) -> TransportFuture;
}

/// Resolve the transport for one call: an injected transport wins, otherwise
/// the ambient one. Fails with [`Error::FetchMissing`] when neither exists,
/// before any network activity.
pub(crate) fn resolve(injected: Option<Arc<dyn Transport>>) -> Result<Arc<dyn Transport>, Error> {
    match injected {
        Some(transport) => Ok(transport),
        None => ambient().ok_or(Error::FetchMissing),
    }
}

#[cfg(feature = "native-transport")]
fn ambient() -> Option<Arc<dyn Transport>> {
    use std::sync::OnceLock;

    static AMBIENT: OnceLock<Arc<HttpTransport>> = OnceLock::new();
    let transport = AMBIENT.get_or_init(|| Arc::new(HttpTransport::new()));
    Some(transport.clone())
}

#[cfg(not(feature = "native-transport"))]
fn ambient() -> Option<Arc<dyn Transport>> {
    None
}

/// Default user agent for the ambient transport.
#[cfg(feature = "native-transport")]
pub const USER_AGENT: &str = concat!("jsonfetch/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport.
///
/// Per-request timeouts are handled by the pipeline's cancellation race, not
/// by the client, so the client itself carries no request timeout.
#[cfg(feature = "native-transport")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

#[cfg(feature = "native-transport")]
impl HttpTransport {
    /// Create a transport with the standard configuration.
    pub fn new() -> Self {
        let inner = match reqwest::Client::builder().user_agent(USER_AGENT).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build HTTP client with custom config; using defaults");
                reqwest::Client::default()
            }
        };
        Self { inner }
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

#[cfg(feature = "native-transport")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "native-transport")]
impl Transport for HttpTransport {
    fn fetch(&self, request: TransportRequest) -> TransportFuture {
        let client = self.inner.clone();
        Box::pin(async move {
            let mut builder = client
                .request(request.method, request.url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let url = response.url().clone();
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();

            Ok(Response {
                url,
                status,
                headers,
                body,
            })
        })
    }
}
