//! Refunds of a payment: list, create and cancel.
//!
//! # Design
//! Refunds live below their payment, so every operation takes the payment
//! id first. Cancelling is idempotent from the caller's side: the first
//! successful `DELETE` yields `Outcome::Done`, and any later one for the
//! same refund yields `Outcome::Gone` rather than an error.

use crate::client::{fields_of, MollieClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Outcome;
use crate::transport::Transport;
use crate::types::{ListParams, NewRefund};

use super::list_fields;

/// `/payments/{payment_id}/refunds`
#[derive(Debug)]
pub struct Refunds<'a, T> {
    client: &'a MollieClient<T>,
}

impl<T> Clone for Refunds<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Refunds<'_, T> {}

impl<'a, T: Transport> Refunds<'a, T> {
    pub(crate) fn new(client: &'a MollieClient<T>) -> Self {
        Self { client }
    }

    pub fn build_list(&self, payment_id: &str, params: Option<&ListParams>) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &["payments", payment_id, "refunds"], list_fields(params))
    }

    /// Without an amount the body is empty and the whole remaining amount is
    /// refunded.
    pub fn build_create(&self, payment_id: &str, refund: Option<&NewRefund>) -> Result<HttpRequest, ApiError> {
        let fields = fields_of(refund)?;
        Ok(self
            .client
            .request(HttpMethod::Post, &["payments", payment_id, "refunds"], fields))
    }

    pub fn build_delete(&self, payment_id: &str, refund_id: &str) -> HttpRequest {
        self.client.request(
            HttpMethod::Delete,
            &["payments", payment_id, "refunds", refund_id],
            Vec::new(),
        )
    }

    /// Fetch one page of refunds of a payment.
    pub async fn list(self, payment_id: &str, params: Option<&ListParams>) -> Result<Outcome, ApiError> {
        self.client.send(self.build_list(payment_id, params)).await
    }

    /// Refund a payment, fully or partially. A payment that cannot be
    /// refunded yields `ApiError::Api` with status 422.
    pub async fn create(self, payment_id: &str, refund: Option<&NewRefund>) -> Result<Outcome, ApiError> {
        let request = self.build_create(payment_id, refund)?;
        self.client.send(request).await
    }

    /// Cancel a refund. Resolves to `Outcome::Done` when it was cancelled and
    /// `Outcome::Gone` when there was nothing to cancel.
    pub async fn delete(self, payment_id: &str, refund_id: &str) -> Result<Outcome, ApiError> {
        self.client.send(self.build_delete(payment_id, refund_id)).await
    }
}
