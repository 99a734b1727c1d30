//! The bound API client.
//!
//! # Design
//! `MollieClient` owns an immutable `ClientConfig` and a `Transport`. It has
//! no other state, so one client can serve concurrent calls without locking
//! and two clients built with different keys never see each other's
//! configuration. Resource endpoints are exposed through cheap borrowing
//! views (`payments()`, `refunds()`, ...) that build requests and hand them
//! to `send`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::form;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::{normalize, Outcome};
use crate::resources::{Issuers, Methods, Payments, Refunds};
use crate::transport::{Transport, UreqTransport};

/// Characters left untouched in a path segment: RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone)]
pub struct MollieClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl MollieClient<UreqTransport> {
    /// Bind `config` to the default `ureq` transport.
    ///
    /// Operations on this client must be awaited inside a tokio runtime.
    /// Polled from any other executor they fail with `ApiError::Transport`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> MollieClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn payments(&self) -> Payments<'_, T> {
        Payments::new(self)
    }

    pub fn refunds(&self) -> Refunds<'_, T> {
        Refunds::new(self)
    }

    pub fn issuers(&self) -> Issuers<'_, T> {
        Issuers::new(self)
    }

    pub fn methods(&self) -> Methods<'_, T> {
        Methods::new(self)
    }

    /// Execute a built request and classify its outcome.
    pub async fn send(&self, request: HttpRequest) -> Result<Outcome, ApiError> {
        tracing::debug!(method = %request.method, url = %request.path, "dispatching request");
        let method = request.method;
        let raw = self.transport.execute(request).await;
        normalize(method, raw)
    }

    /// Build a request for the resource at `segments` below the base URL.
    ///
    /// `fields` become the query string for `GET`/`DELETE` and the
    /// form-encoded body for `POST`.
    pub(crate) fn request(
        &self,
        method: HttpMethod,
        segments: &[&str],
        fields: Vec<(String, String)>,
    ) -> HttpRequest {
        let mut path = self.config.base_url().to_string();
        for segment in segments {
            path.push('/');
            path.extend(utf8_percent_encode(segment, SEGMENT));
        }

        let mut headers = self.config.headers();
        let body = match method {
            HttpMethod::Post => {
                headers.push((
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ));
                Some(form::encode(&fields))
            }
            HttpMethod::Get | HttpMethod::Delete => {
                if !fields.is_empty() {
                    path.push('?');
                    path.push_str(&form::encode(&fields));
                }
                None
            }
        };

        HttpRequest {
            method,
            path,
            headers,
            body,
            timeout: self.config.timeout(),
        }
    }
}

/// Flatten optional parameters into form fields; `None` means no fields.
pub(crate) fn fields_of<P: Serialize>(params: Option<&P>) -> Result<Vec<(String, String)>, ApiError> {
    match params {
        Some(params) => {
            let value = serde_json::to_value(params).map_err(ApiError::Serialization)?;
            Ok(form::flatten(&value))
        }
        None => Ok(Vec::new()),
    }
}
