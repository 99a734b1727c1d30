//! Transport adapters: the only place that performs network I/O.
//!
//! # Design
//! `Transport::execute` resolves exactly once per request with either a
//! response (any status code) or a transport failure. Status codes are never
//! treated as errors here; classifying them is the normalizer's job.
//!
//! `UreqTransport` runs a blocking `ureq` call on tokio's blocking pool and
//! so needs a current tokio runtime; polled anywhere else it reports a
//! transport failure. One agent is shared by every request so connections
//! are pooled. The request's own timeout is applied as ureq's global
//! deadline for that call, so an elapsed timeout ends the call with a single
//! error and no late response.

use std::fmt;
use std::future::Future;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, RawOutcome};

/// Executes `HttpRequest`s.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = RawOutcome> + Send;
}

/// Default transport backed by `ureq`. Clones share one connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx responses are data, not `Err`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Execute `req` on the current thread.
    pub fn execute_blocking(&self, req: HttpRequest) -> RawOutcome {
        let timeout = Some(req.timeout);
        let sent = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), &req.headers)
                .config()
                .timeout_global(timeout)
                .build()
                .call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), &req.headers)
                .config()
                .timeout_global(timeout)
                .build()
                .call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(&req.path), &req.headers)
                    .config()
                    .timeout_global(timeout)
                    .build();
                match req.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = match sent {
            Ok(response) => response,
            Err(err) => return RawOutcome::failure(err),
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => return RawOutcome::failure(err),
        };

        tracing::debug!(status, "response received");
        RawOutcome::Response(HttpResponse { status, headers, body })
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> RawOutcome {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return RawOutcome::failure("no tokio runtime is running");
        };
        let transport = self.clone();
        match runtime
            .spawn_blocking(move || transport.execute_blocking(request))
            .await
        {
            Ok(outcome) => outcome,
            Err(join) => RawOutcome::failure(join),
        }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
