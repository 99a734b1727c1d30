//! Resource endpoints.
//!
//! Each resource is a borrowing view over a `MollieClient`. Every operation
//! comes in two halves: a `build_*` method that returns the `HttpRequest`
//! without touching the network, and an async method that sends it and
//! normalizes the outcome.
//!
//! Optional parameters are `Option<&_>`; passing `None` builds exactly the
//! same request as passing the parameter type's default.

mod issuers;
mod methods;
mod payments;
mod refunds;

pub use issuers::Issuers;
pub use methods::Methods;
pub use payments::Payments;
pub use refunds::Refunds;

use crate::types::ListParams;

fn list_fields(params: Option<&ListParams>) -> Vec<(String, String)> {
    params.map(ListParams::to_fields).unwrap_or_default()
}
