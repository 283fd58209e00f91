//! jsonfetch -- JSON-first convenience wrapper over an injectable HTTP
//! transport.
//!
//! One exported operation, [`request`], composed of three stages around a
//! [`Transport`]:
//!
//! 1. **Body encoder** -- plain-object/array bodies are serialized to JSON
//!    with a `content-type: application/json` header.
//! 2. **Timeout guard** -- unless the caller supplies a cancellation signal,
//!    the call is aborted after a configurable timeout (default 10 s).
//! 3. **Response interpreter** -- JSON responses are decoded into [`Json`];
//!    error statuses become [`Error::Api`] with the decoded body attached;
//!    designated keys can be coerced to datetimes at any nesting depth.
//!
//! ```no_run
//! use jsonfetch::{request, Json, Parse, RequestOptions};
//!
//! # async fn run() -> Result<(), jsonfetch::Error> {
//! let options = RequestOptions::new()
//!     .method(http::Method::POST)
//!     .json(&serde_json::json!({ "name": "jane" }))?
//!     .parse(Parse::JsonWithDates(vec!["created_at".into()]));
//!
//! let user = request("https://api.example.com/users", options)
//!     .await?
//!     .into_json()
//!     .unwrap();
//! assert!(user.get("created_at").and_then(Json::as_datetime).is_some());
//! # Ok(())
//! # }
//! ```
//!
//! There is no retry logic, pooling, or session handling here: the value is
//! in the wrapped transport, and this crate only decides how requests are
//! encoded and responses interpreted.

pub mod dates;
pub mod error;
pub mod json;
pub mod options;
pub mod request;
pub mod response;
pub mod transport;

pub use dates::coerce_dates;
pub use error::Error;
pub use json::{Json, is_plain_object};
pub use options::{Body, DEFAULT_TIMEOUT, Parse, RequestOptions};
pub use request::{Payload, request};
pub use response::Response;
#[cfg(feature = "native-transport")]
pub use transport::HttpTransport;
pub use transport::{Transport, TransportFuture, TransportRequest};
