//! Payments: fetch, list and create.
//!
//! # Design
//! A new payment is serialized to JSON and flattened into form fields, so
//! nested `metadata` travels as `metadata[key]=value`. Unset optional fields
//! are skipped rather than sent empty. Building the request is the only
//! fallible step before the network: a body that cannot be serialized is an
//! `ApiError::Serialization` and nothing is sent.

use crate::client::{fields_of, MollieClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Outcome;
use crate::transport::Transport;
use crate::types::{ListParams, NewPayment};

use super::list_fields;

/// `/payments`
#[derive(Debug)]
pub struct Payments<'a, T> {
    client: &'a MollieClient<T>,
}

impl<T> Clone for Payments<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Payments<'_, T> {}

impl<'a, T: Transport> Payments<'a, T> {
    pub(crate) fn new(client: &'a MollieClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.client.request(HttpMethod::Get, &["payments", id], Vec::new())
    }

    pub fn build_list(&self, params: Option<&ListParams>) -> HttpRequest {
        self.client.request(HttpMethod::Get, &["payments"], list_fields(params))
    }

    /// Nested `metadata` is sent as `metadata[key]` form fields.
    pub fn build_create(&self, payment: &NewPayment) -> Result<HttpRequest, ApiError> {
        let fields = fields_of(Some(payment))?;
        Ok(self.client.request(HttpMethod::Post, &["payments"], fields))
    }

    /// Fetch one payment.
    pub async fn get(self, id: &str) -> Result<Outcome, ApiError> {
        self.client.send(self.build_get(id)).await
    }

    /// Fetch one page of payments.
    pub async fn list(self, params: Option<&ListParams>) -> Result<Outcome, ApiError> {
        self.client.send(self.build_list(params)).await
    }

    /// Create a payment.
    pub async fn create(self, payment: &NewPayment) -> Result<Outcome, ApiError> {
        let request = self.build_create(payment)?;
        self.client.send(request).await
    }
}
