//! Async client core for the Mollie payments API.
//!
//! # Overview
//! Translates method calls (`payments().get(..)`, `refunds().delete(..)`, ...)
//! into authenticated HTTP requests and translates whatever comes back into
//! one of three results: a parsed JSON `Outcome`, the soft-failure
//! `Outcome::Gone` for deleting something that no longer exists, or an
//! `ApiError`.
//!
//! ```no_run
//! use mollie_core::{ClientConfig, ListParams, MollieClient, NewPayment};
//!
//! # async fn run() -> Result<(), mollie_core::ApiError> {
//! let client = MollieClient::new(ClientConfig::new("test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM"));
//!
//! let payment = NewPayment::new(10.0, "Order 112233")
//!     .redirect_url("https://shop.example/order/112233")
//!     .metadata("order_id", 112233);
//! let created = client.payments().create(&payment).await?;
//!
//! let page = client.payments().list(Some(&ListParams::new().count(5))).await?;
//! # let _ = (created, page);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `MollieClient` holds an immutable `ClientConfig` and a `Transport`;
//!   clients never share configuration.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   an async call that executes it through the transport, so request
//!   construction is testable without I/O.
//! - All response interpretation lives in `normalize`.
//! - No retries, caching, or pagination: one call is one request.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod normalize;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::MollieClient;
pub use config::{ClientConfig, ConfigError, API_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RawOutcome};
pub use normalize::{normalize, Outcome};
pub use transport::{Transport, UreqTransport};
pub use types::{Issuer, ListParams, Method, NewPayment, NewRefund, Page, Payment, Refund};
