//! Payment methods enabled for the account.

use crate::client::MollieClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Outcome;
use crate::transport::Transport;
use crate::types::ListParams;

use super::list_fields;

/// `/methods`
#[derive(Debug)]
pub struct Methods<'a, T> {
    client: &'a MollieClient<T>,
}

impl<T> Clone for Methods<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Methods<'_, T> {}

impl<'a, T: Transport> Methods<'a, T> {
    pub(crate) fn new(client: &'a MollieClient<T>) -> Self {
        Self { client }
    }

    pub fn build_list(&self, params: Option<&ListParams>) -> HttpRequest {
        self.client.request(HttpMethod::Get, &["methods"], list_fields(params))
    }

    /// Fetch one page of the payment methods enabled for the account.
    pub async fn list(self, params: Option<&ListParams>) -> Result<Outcome, ApiError> {
        self.client.send(self.build_list(params)).await
    }
}
