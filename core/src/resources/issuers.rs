//! Issuers of a payment method, e.g. the iDEAL banks.

use crate::client::MollieClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Outcome;
use crate::transport::Transport;
use crate::types::ListParams;

use super::list_fields;

/// `/issuers`: the banks a payment method such as iDEAL can be paid with.
#[derive(Debug)]
pub struct Issuers<'a, T> {
    client: &'a MollieClient<T>,
}

impl<T> Clone for Issuers<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Issuers<'_, T> {}

impl<'a, T: Transport> Issuers<'a, T> {
    pub(crate) fn new(client: &'a MollieClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.client.request(HttpMethod::Get, &["issuers", id], Vec::new())
    }

    pub fn build_list(&self, params: Option<&ListParams>) -> HttpRequest {
        self.client.request(HttpMethod::Get, &["issuers"], list_fields(params))
    }

    pub async fn get(self, id: &str) -> Result<Outcome, ApiError> {
        self.client.send(self.build_get(id)).await
    }

    pub async fn list(self, params: Option<&ListParams>) -> Result<Outcome, ApiError> {
        self.client.send(self.build_list(params)).await
    }
}
