//! Classification of raw transport outcomes into the client's result shape.
//!
//! # Design
//! Every endpoint funnels through `normalize`, which applies a fixed rule
//! order (first match wins):
//!
//! 1. transport failure → `ApiError::Transport`
//! 2. status 204 → `Outcome::Done`
//! 3. `DELETE` with status 404 → `Outcome::Gone`
//! 4. body that is not JSON → `ApiError::InvalidResponse`
//! 5. JSON object with an `error` field → `ApiError::Api`, whatever the status
//! 6. anything else → `Outcome::Value`
//!
//! No other status code is special-cased. A 422 "not refundable" answer is
//! an ordinary rule-5 error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse, RawOutcome};

/// Successful or soft-failed result of an endpoint call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Parsed JSON body and the status it arrived with.
    Value { status: u16, body: Value },
    /// The API answered 204 No Content. Reported as `true`.
    Done,
    /// A `DELETE` found nothing to delete. Reported as `false`; not an error.
    Gone,
}

impl Outcome {
    /// Boolean form of deletion outcomes: `Some(true)` for `Done`,
    /// `Some(false)` for `Gone`, `None` for a JSON value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Outcome::Done => Some(true),
            Outcome::Gone => Some(false),
            Outcome::Value { .. } => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Outcome::Value { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Value { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Deserialize a `Value` outcome into a typed response. A shape
    /// mismatch is an `InvalidResponse` carrying the response's own status.
    ///
    /// `Done` and `Gone` carry no body and are deserialized from `null`, which
    /// only succeeds for types such as `Option<T>` or `()`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let (status, value) = match self {
            Outcome::Value { status, body } => (status, body),
            Outcome::Done => (204, Value::Null),
            Outcome::Gone => (404, Value::Null),
        };
        serde_json::from_value(value).map_err(|source| ApiError::InvalidResponse { status, source })
    }
}

/// Turn the outcome of a request issued with `method` into an `Outcome` or
/// an `ApiError`.
pub fn normalize(method: HttpMethod, raw: RawOutcome) -> Result<Outcome, ApiError> {
    let response = match raw {
        RawOutcome::TransportFailure(source) => return Err(ApiError::Transport { source }),
        RawOutcome::Response(response) => response,
    };
    classify(method, response)
}

fn classify(method: HttpMethod, response: HttpResponse) -> Result<Outcome, ApiError> {
    let status = response.status;
    if status == 204 {
        return Ok(Outcome::Done);
    }
    if method == HttpMethod::Delete && status == 404 {
        return Ok(Outcome::Gone);
    }

    let mut body: Value = serde_json::from_str(&response.body)
        .map_err(|source| ApiError::InvalidResponse { status, source })?;

    if let Some(detail) = body.as_object_mut().and_then(|map| map.remove("error")) {
        return Err(ApiError::Api { status, detail });
    }
    Ok(Outcome::Value { status, body })
}
