//! The request pipeline: body encoding, timeout guard, response
//! interpretation.

use std::time::Duration;

use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderValue};
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};
use url::Url;

use crate::dates::coerce_dates;
use crate::error::Error;
use crate::json::{Json, is_plain_object};
use crate::options::{Body, DEFAULT_TIMEOUT, Parse, RequestOptions};
use crate::response::Response;
use crate::transport::{self, TransportRequest};

/// Outcome of a request: the decoded payload, or the raw response when
/// parsing is disabled via [`Parse::Raw`].
#[derive(Debug)]
pub enum Payload {
    Json(Json),
    Response(Response),
}

impl Payload {
    pub fn into_json(self) -> Option<Json> {
        match self {
            Payload::Json(json) => Some(json),
            Payload::Response(_) => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            Payload::Response(response) => Some(response),
            Payload::Json(_) => None,
        }
    }
}

/// Perform an HTTP request and interpret the response.
///
/// Plain-object and array JSON bodies are serialized with a
/// `content-type: application/json` header (caller headers win on
/// conflict). Unless the caller supplies a cancellation signal, the call is
/// aborted after `timeout` (default [`DEFAULT_TIMEOUT`]). JSON responses are
/// decoded and returned as [`Payload::Json`]; error statuses (>= 400)
/// become [`Error::Api`] with the decoded body attached. See
/// [`RequestOptions`] for the full set of knobs.
pub async fn request(url: &str, options: RequestOptions) -> Result<Payload, Error> {
    let RequestOptions {
        method,
        body,
        headers,
        transport,
        signal,
        timeout,
        parse,
    } = options;

    let url: Url = url.parse()?;
    let transport = transport::resolve(transport)?;

    let (headers, body) = encode_body(body, headers)?;
    let outgoing = TransportRequest {
        method,
        url: url.clone(),
        headers,
        body,
    };
    debug!(method = %outgoing.method, url = %url, "dispatching request");

    // Arm the abort timer only when the caller did not bring their own
    // signal; a caller-supplied signal means the caller owns cancellation.
    let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
    let (signal, _timer) = match signal {
        Some(signal) => (signal, None),
        None => {
            let signal = CancellationToken::new();
            (signal.clone(), Some(arm_abort_timer(signal, timeout)))
        }
    };

    let response = tokio::select! {
        result = transport.fetch(outgoing) => result?,
        () = signal.cancelled() => {
            debug!(url = %url, "request aborted");
            return Err(Error::Aborted);
        }
    };
    // `_timer` drops when this function returns, on success and failure
    // alike, so a pending abort never outlives the call.

    interpret(response, parse)
}

/// Serialize plain-object/array JSON bodies and inject the JSON
/// content-type header. Caller-supplied headers win on conflict.
fn encode_body(body: Body, mut headers: HeaderMap) -> Result<(HeaderMap, Option<Vec<u8>>), Error> {
    let body = match body {
        Body::None => None,
        Body::Text(text) => Some(text.into_bytes()),
        Body::Bytes(bytes) => Some(bytes),
        Body::Json(value) => {
            if (value.is_array() || is_plain_object(&value))
                && !headers.contains_key(CONTENT_TYPE)
            {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            Some(serde_json::to_vec(&value).map_err(Error::Serialize)?)
        }
    };
    Ok((headers, body))
}

fn arm_abort_timer(signal: CancellationToken, timeout: Duration) -> AbortOnDropHandle<()> {
    AbortOnDropHandle::new(tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!(timeout_ms = timeout.as_millis() as u64, "request timed out, aborting");
        signal.cancel();
    }))
}

/// Branch on the content type and status of a buffered response.
fn interpret(response: Response, parse: Parse) -> Result<Payload, Error> {
    let date_keys = match parse {
        Parse::Raw => return Ok(Payload::Response(response)),
        Parse::Json => Vec::new(),
        Parse::JsonWithDates(keys) => keys,
    };

    if !response.is_json() {
        let actual = response.content_type().unwrap_or("<none>").to_owned();
        debug!(status = %response.status, content_type = %actual, "response body is not json");
        return Err(Error::UnexpectedContentType(actual));
    }

    let decoded: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(Error::Decode)?;
    let mut payload = Json::from(decoded);

    // A failed success check alone is not enough: 3xx statuses also fail it
    // but are presumed already handled by the transport.
    let is_error = !response.status.is_success() && response.status.as_u16() >= 400;
    if is_error {
        let message = payload
            .get("message")
            .and_then(Json::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| "response was not successful".to_owned());
        debug!(status = %response.status, message = %message, "error response");
        return Err(Error::Api {
            status: response.status.as_u16(),
            message,
            payload,
        });
    }

    if !date_keys.is_empty() {
        coerce_dates(&mut payload, &date_keys);
    }
    Ok(Payload::Json(payload))
}
