//! Verify request builders and the normalizer against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Form bodies are compared as decoded key/value maps, not raw strings, to
//! avoid false negatives from field ordering.

use std::collections::BTreeMap;

use mollie_core::{
    normalize, ClientConfig, ErrorKind, HttpMethod, HttpRequest, HttpResponse, ListParams, MollieClient,
    NewPayment, NewRefund, Outcome, RawOutcome, API_BASE_URL,
};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "transport" => ErrorKind::Transport,
        "invalid_response" => ErrorKind::InvalidResponse,
        "api" => ErrorKind::Api,
        other => panic!("unknown error kind: {other}"),
    }
}

fn arg(case: &Value, index: usize) -> &str {
    case["args"][index].as_str().unwrap()
}

fn params<T: serde::de::DeserializeOwned>(case: &Value) -> Option<T> {
    match &case["params"] {
        Value::Null => None,
        value => Some(serde_json::from_value(value.clone()).unwrap()),
    }
}

fn build(client: &MollieClient, case: &Value) -> HttpRequest {
    let call = case["call"].as_str().unwrap();
    match call {
        "payments.get" => client.payments().build_get(arg(case, 0)),
        "payments.list" => client.payments().build_list(params::<ListParams>(case).as_ref()),
        "payments.create" => {
            let payment: NewPayment = params(case).unwrap();
            client.payments().build_create(&payment).unwrap()
        }
        "refunds.list" => client
            .refunds()
            .build_list(arg(case, 0), params::<ListParams>(case).as_ref()),
        "refunds.create" => client
            .refunds()
            .build_create(arg(case, 0), params::<NewRefund>(case).as_ref())
            .unwrap(),
        "refunds.delete" => client.refunds().build_delete(arg(case, 0), arg(case, 1)),
        "issuers.get" => client.issuers().build_get(arg(case, 0)),
        "issuers.list" => client.issuers().build_list(params::<ListParams>(case).as_ref()),
        "methods.list" => client.methods().build_list(params::<ListParams>(case).as_ref()),
        other => panic!("unknown call: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let api_key = vectors["api_key"].as_str().unwrap();
    let client = MollieClient::new(ClientConfig::new(api_key));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(&client, case);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.path,
            format!("{API_BASE_URL}{}", expected["path"].as_str().unwrap()),
            "{name}: path"
        );
        assert_eq!(
            req.header("Authorization"),
            Some(format!("Bearer {api_key}").as_str()),
            "{name}: authorization"
        );
        assert_eq!(req.header("Accept"), Some("application/json"), "{name}: accept");

        match expected.get("form") {
            Some(form) => {
                let body = req.body.as_deref().unwrap_or_else(|| panic!("{name}: missing body"));
                let decoded: BTreeMap<String, String> = url::form_urlencoded::parse(body.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                let wanted: BTreeMap<String, String> = serde_json::from_value(form.clone()).unwrap();
                assert_eq!(decoded, wanted, "{name}: form body");
                assert_eq!(
                    req.header("Content-Type"),
                    Some("application/x-www-form-urlencoded"),
                    "{name}: content type"
                );
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());

        let outcome = match case["transport_failure"].as_str() {
            Some(cause) => RawOutcome::failure(cause.to_string()),
            None => {
                let sim = &case["response"];
                RawOutcome::Response(HttpResponse {
                    status: sim["status"].as_u64().unwrap() as u16,
                    headers: Vec::new(),
                    body: sim["body"].as_str().unwrap().to_string(),
                })
            }
        };
        let result = normalize(method, outcome);
        let expected = &case["expected"];

        if let Some(kind) = expected["error"].as_str() {
            let err = result.expect_err(name);
            assert_eq!(err.kind(), parse_kind(kind), "{name}: kind");
            assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: message");
            assert_eq!(
                err.status().map(u64::from),
                expected["status"].as_u64(),
                "{name}: status"
            );
            if let Some(detail) = expected.get("detail") {
                assert_eq!(err.detail(), Some(detail), "{name}: detail");
            }
        } else if expected.get("ok").is_some() {
            let outcome = result.expect(name);
            assert_eq!(outcome, Outcome::Done, "{name}");
            assert_eq!(outcome.as_bool(), expected["ok"].as_bool(), "{name}: bool");
        } else if expected.get("soft_fail").is_some() {
            let outcome = result.expect(name);
            assert_eq!(outcome, Outcome::Gone, "{name}");
            assert_eq!(outcome.as_bool(), expected["soft_fail"].as_bool(), "{name}: bool");
        } else {
            let outcome = result.expect(name);
            assert_eq!(outcome.as_value(), Some(&expected["value"]), "{name}: value");
        }
    }
}
