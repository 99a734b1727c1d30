use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PAID_PAYMENT_ID: &str = "tr_paid0001";

const DEFAULT_COUNT: usize = 10;
const MAX_COUNT: usize = 250;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub mode: String,
    pub status: String,
    pub amount: String,
    pub amount_refunded: String,
    pub amount_remaining: String,
    pub description: String,
    pub method: Option<String>,
    pub metadata: Option<Value>,
    pub links: PaymentLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinks {
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: String,
    pub payment: Payment,
    pub amount_refunded: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issuer {
    pub id: String,
    pub name: String,
    pub method: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Method {
    pub id: String,
    pub description: String,
    pub amount: Value,
    pub image: Value,
}

#[derive(Deserialize)]
pub struct Paging {
    pub offset: Option<usize>,
    pub count: Option<usize>,
}

/// Amounts are kept in cents; the serialized views are refreshed on every
/// change.
#[derive(Debug)]
struct Entry {
    payment: Payment,
    amount: u64,
    refunded: u64,
    refunds: Vec<(Refund, u64)>,
}

impl Entry {
    fn remaining(&self) -> u64 {
        self.amount - self.refunded
    }

    fn refresh(&mut self) {
        self.payment.amount = cents(self.amount);
        self.payment.amount_refunded = cents(self.refunded);
        self.payment.amount_remaining = cents(self.remaining());
    }
}

#[derive(Debug, Default)]
pub struct Store {
    payments: Vec<Entry>,
    issuers: Vec<Issuer>,
    methods: Vec<Method>,
}

impl Store {
    /// One paid payment, the iDEAL issuers and a handful of methods.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let mut paid = Entry {
            payment: Payment {
                id: PAID_PAYMENT_ID.to_string(),
                mode: "test".to_string(),
                status: "paid".to_string(),
                amount: String::new(),
                amount_refunded: String::new(),
                amount_remaining: String::new(),
                description: "Seeded paid payment".to_string(),
                method: Some("ideal".to_string()),
                metadata: None,
                links: PaymentLinks::default(),
            },
            amount: 2500,
            refunded: 0,
            refunds: Vec::new(),
        };
        paid.refresh();
        store.payments.push(paid);

        for (id, name) in [
            ("ideal_ABNANL2A", "ABN AMRO"),
            ("ideal_ASNBNL21", "ASN Bank"),
            ("ideal_INGBNL2A", "ING"),
            ("ideal_RABONL2U", "Rabobank"),
            ("ideal_TESTNL99", "TBM Bank"),
        ] {
            store.issuers.push(Issuer {
                id: id.to_string(),
                name: name.to_string(),
                method: "ideal".to_string(),
            });
        }

        for (id, description, minimum, maximum) in [
            ("ideal", "iDEAL", "0.53", "50000.00"),
            ("creditcard", "Creditcard", "0.31", "10000.00"),
            ("paypal", "PayPal", "0.13", "8000.00"),
            ("banktransfer", "Bank transfer", "0.31", "1000000.00"),
        ] {
            store.methods.push(Method {
                id: id.to_string(),
                description: description.to_string(),
                amount: json!({"minimum": minimum, "maximum": maximum}),
                image: json!({
                    "normal": format!("https://www.mollie.com/images/payscreen/methods/{id}.png"),
                    "bigger": format!("https://www.mollie.com/images/payscreen/methods/{id}@2x.png"),
                }),
            });
        }
        store
    }

    fn payment_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.payments.iter_mut().find(|e| e.payment.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/v1/payments", get(list_payments).post(create_payment))
        .route("/v1/payments/{id}", get(get_payment))
        .route("/v1/payments/{id}/refunds", get(list_refunds).post(create_refund))
        .route("/v1/payments/{id}/refunds/{refund_id}", delete(delete_refund))
        .route("/v1/issuers", get(list_issuers))
        .route("/v1/issuers/{id}", get(get_issuer))
        .route("/v1/methods", get(list_methods))
        .route_layer(middleware::from_fn(require_bearer))
        .fallback(|| async { api_error(StatusCode::NOT_FOUND, "request", "Unknown endpoint") })
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Mollie-style error envelope.
pub fn api_error(status: StatusCode, kind: &str, message: &str) -> Response {
    (status, Json(json!({"error": {"type": kind, "message": message}}))).into_response()
}

fn field_error(message: &str, field: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"error": {"type": "request", "message": message, "field": field}})),
    )
        .into_response()
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() {
        return api_error(
            StatusCode::UNAUTHORIZED,
            "request",
            "Missing authentication, or failed to authenticate",
        );
    }
    if !(token.starts_with("test_") || token.starts_with("live_")) {
        return api_error(StatusCode::UNAUTHORIZED, "request", "Invalid API key");
    }
    next.run(request).await
}

fn page<T: Serialize>(items: &[T], paging: &Paging) -> Json<Value> {
    let offset = paging.offset.unwrap_or(0).min(items.len());
    let count = paging.count.unwrap_or(DEFAULT_COUNT).min(MAX_COUNT);
    let data: Vec<&T> = items.iter().skip(offset).take(count).collect();
    Json(json!({
        "totalCount": items.len(),
        "offset": offset,
        "count": data.len(),
        "data": data,
    }))
}

fn cents(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

fn parse_cents(raw: &str) -> Option<u64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some((value * 100.0).round() as u64)
}

/// Rebuild nested objects from bracket keys: `metadata[order_id]=1`
/// becomes `{"metadata": {"order_id": "1"}}`.
pub fn unflatten(fields: &[(String, String)]) -> Map<String, Value> {
    let mut root = Map::new();
    for (key, value) in fields {
        let mut parts = key.split('[').map(|p| p.trim_end_matches(']'));
        let Some(first) = parts.next() else { continue };
        let rest: Vec<&str> = parts.collect();

        let mut node = &mut root;
        let mut name = first;
        for part in rest {
            let child = node
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            node = match child {
                Value::Object(map) => map,
                _ => unreachable!(),
            };
            name = part;
        }
        node.insert(name.to_string(), Value::String(value.clone()));
    }
    root
}

async fn list_payments(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Value> {
    let store = db.read().await;
    let payments: Vec<&Payment> = store.payments.iter().map(|e| &e.payment).collect();
    page(&payments, &paging)
}

async fn get_payment(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    match store.payments.iter().find(|e| e.payment.id == id) {
        Some(entry) => Json(entry.payment.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "request", "The payment id is invalid"),
    }
}

async fn create_payment(State(db): State<Db>, Form(fields): Form<Vec<(String, String)>>) -> Response {
    let input = unflatten(&fields);
    let text = |name: &str| input.get(name).and_then(Value::as_str).map(str::to_string);

    let Some(amount) = text("amount").as_deref().and_then(parse_cents) else {
        return field_error("The amount is invalid", "amount");
    };
    let Some(description) = text("description").filter(|d| !d.is_empty()) else {
        return field_error("The description is invalid", "description");
    };

    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(10).collect();
    let mut entry = Entry {
        payment: Payment {
            id: format!("tr_{suffix}"),
            mode: "test".to_string(),
            status: "open".to_string(),
            amount: String::new(),
            amount_refunded: String::new(),
            amount_remaining: String::new(),
            description,
            method: text("method"),
            metadata: input.get("metadata").cloned(),
            links: PaymentLinks {
                payment_url: Some(format!("https://www.mollie.nl/payscreen/pay/{suffix}")),
                redirect_url: text("redirectUrl"),
                webhook_url: text("webhookUrl"),
            },
        },
        amount,
        refunded: 0,
        refunds: Vec::new(),
    };
    entry.refresh();

    let payment = entry.payment.clone();
    db.write().await.payments.push(entry);
    tracing::info!(id = %payment.id, amount = %payment.amount, "payment created");
    (StatusCode::CREATED, Json(payment)).into_response()
}

async fn list_refunds(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> Response {
    let store = db.read().await;
    match store.payments.iter().find(|e| e.payment.id == id) {
        Some(entry) => {
            let refunds: Vec<&Refund> = entry.refunds.iter().map(|(r, _)| r).collect();
            page(&refunds, &paging).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "request", "The payment id is invalid"),
    }
}

async fn create_refund(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let mut store = db.write().await;
    let Some(entry) = store.payment_mut(&id) else {
        return api_error(StatusCode::NOT_FOUND, "request", "The payment id is invalid");
    };
    if entry.payment.status != "paid" || entry.remaining() == 0 {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, "request", "The payment is not refundable");
    }

    let amount = match fields.get("amount") {
        None => entry.remaining(),
        Some(raw) => match parse_cents(raw) {
            Some(amount) if amount <= entry.remaining() => amount,
            Some(_) => return field_error("The amount exceeds the refundable amount", "amount"),
            None => return field_error("The amount is invalid", "amount"),
        },
    };

    entry.refunded += amount;
    if entry.remaining() == 0 {
        entry.payment.status = "refunded".to_string();
    }
    entry.refresh();

    let refund = Refund {
        id: format!("re_{}", &Uuid::new_v4().simple().to_string()[..10]),
        payment: entry.payment.clone(),
        amount_refunded: cents(amount),
        status: "pending".to_string(),
    };
    entry.refunds.push((refund.clone(), amount));
    tracing::info!(payment = %id, refund = %refund.id, "refund created");
    (StatusCode::CREATED, Json(refund)).into_response()
}

async fn delete_refund(
    State(db): State<Db>,
    Path((id, refund_id)): Path<(String, String)>,
) -> Response {
    let mut store = db.write().await;
    let Some(entry) = store.payment_mut(&id) else {
        return api_error(StatusCode::NOT_FOUND, "request", "The payment id is invalid");
    };
    let Some(index) = entry.refunds.iter().position(|(r, _)| r.id == refund_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let (_, amount) = entry.refunds.remove(index);
    entry.refunded -= amount;
    if entry.payment.status == "refunded" {
        entry.payment.status = "paid".to_string();
    }
    entry.refresh();
    StatusCode::NO_CONTENT.into_response()
}

async fn list_issuers(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Value> {
    page(&db.read().await.issuers, &paging)
}

async fn get_issuer(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    match store.issuers.iter().find(|i| i.id == id) {
        Some(issuer) => Json(issuer.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "request", "The issuer id is invalid"),
    }
}

async fn list_methods(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Value> {
    page(&db.read().await.methods, &paging)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn cents_format_two_decimals() {
        assert_eq!(cents(2500), "25.00");
        assert_eq!(cents(1005), "10.05");
        assert_eq!(cents(7), "0.07");
    }

    #[test]
    fn parse_cents_rejects_garbage() {
        assert_eq!(parse_cents("10.0"), Some(1000));
        assert_eq!(parse_cents("0.53"), Some(53));
        assert_eq!(parse_cents("0"), None);
        assert_eq!(parse_cents("-1"), None);
        assert_eq!(parse_cents("ten"), None);
        assert_eq!(parse_cents("NaN"), None);
    }

    #[test]
    fn unflatten_rebuilds_metadata() {
        let map = unflatten(&pairs(&[
            ("amount", "10.0"),
            ("metadata[order_id]", "112233"),
            ("metadata[customer][id]", "7"),
        ]));
        assert_eq!(map["amount"], "10.0");
        assert_eq!(map["metadata"]["order_id"], "112233");
        assert_eq!(map["metadata"]["customer"]["id"], "7");
    }

    #[test]
    fn seeded_store_has_paid_payment() {
        let store = Store::seeded();
        let paid = &store.payments[0].payment;
        assert_eq!(paid.id, PAID_PAYMENT_ID);
        assert_eq!(paid.status, "paid");
        assert_eq!(paid.amount, "25.00");
        assert_eq!(paid.amount_remaining, "25.00");
        assert_eq!(store.issuers.len(), 5);
    }

    #[test]
    fn payment_serializes_camel_case() {
        let store = Store::seeded();
        let json = serde_json::to_value(&store.payments[0].payment).unwrap();
        assert_eq!(json["amountRefunded"], "0.00");
        assert_eq!(json["links"]["paymentUrl"], Value::Null);
        assert!(json["links"].get("redirectUrl").is_none());
    }
}
