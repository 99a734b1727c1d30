//! Request parameters and response DTOs for the Mollie v1 API.
//!
//! # Design
//! Parameter structs serialize to JSON first and are then flattened into
//! form fields, so `None` fields must be skipped rather than sent as empty
//! values. Response DTOs keep only the commonly used fields; anything else
//! the API returns is ignored during deserialization. Callers who need the
//! full payload use the raw `serde_json::Value` body of `Outcome::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination for list endpoints. The default sends no parameters, and the
/// API applies its own offset and page size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Query fields in `offset`, `count` order.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(offset) = self.offset {
            fields.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(count) = self.count {
            fields.push(("count".to_string(), count.to_string()));
        }
        fields
    }
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Free-form data echoed back on the payment. Sent as `metadata[key]`
    /// form fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl NewPayment {
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            redirect_url: None,
            webhook_url: None,
            method: None,
            issuer: None,
            locale: None,
            metadata: None,
        }
    }

    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Body of `POST /payments/{id}/refunds`. Without an amount the full
/// remaining amount is refunded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRefund {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl NewRefund {
    pub fn amount(amount: f64) -> Self {
        Self { amount: Some(amount) }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u32,
    pub offset: u32,
    pub count: u32,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub mode: Option<String>,
    pub status: String,
    /// Decimal string, e.g. `"10.00"`.
    pub amount: String,
    #[serde(default)]
    pub amount_refunded: Option<String>,
    #[serde(default)]
    pub amount_remaining: Option<String>,
    pub description: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub links: Option<PaymentLinks>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinks {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: String,
    pub amount_refunded: String,
    pub status: String,
    #[serde(default)]
    pub payment: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issuer {
    pub id: String,
    pub name: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Method {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub amount: Option<MethodAmount>,
    #[serde(default)]
    pub image: Option<MethodImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodAmount {
    pub minimum: String,
    pub maximum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodImage {
    pub normal: String,
    pub bigger: String,
}
