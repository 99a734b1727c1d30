//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. Endpoint
//! builders produce `HttpRequest` values and the normalizer consumes
//! `RawOutcome` values without either of them touching the network; only a
//! `Transport` implementation performs I/O.
//!
//! All fields use owned types (`String`, `Vec`) so a request can be moved
//! onto a blocking thread or into a test fixture without lifetime concerns.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built fresh by every endpoint call and never reused. `path` is the
/// absolute URL including any encoded query string; `body` is a
/// form-encoded payload for `POST` requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// What a `Transport` hands back for one request: either a response with
/// any status code, or a failure before a response was received.
#[derive(Debug)]
pub enum RawOutcome {
    Response(HttpResponse),
    TransportFailure(Box<dyn Error + Send + Sync>),
}

impl RawOutcome {
    pub fn failure(cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        RawOutcome::TransportFailure(cause.into())
    }
}

impl From<HttpResponse> for RawOutcome {
    fn from(response: HttpResponse) -> Self {
        RawOutcome::Response(response)
    }
}
