// Response assertions

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Assert the response status, naming both codes on failure
pub fn assert_status<B>(response: &ServiceResponse<B>, expected: StatusCode) {
    let status = response.status();
    assert_eq!(
        status,
        expected,
        "Expected {} {}, got {} {}",
        expected.as_u16(),
        expected.canonical_reason().unwrap_or("Unknown"),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
}

/// Assert a body has the `{"error": {"message", "code"}}` shape with the given code
pub fn assert_error_body(body: &Value, expected_code: u16) {
    let error = body
        .get("error")
        .unwrap_or_else(|| panic!("Response missing 'error' field: {}", body));
    assert_eq!(error["code"].as_u64(), Some(u64::from(expected_code)));
    assert!(
        error["message"].as_str().is_some_and(|m| !m.is_empty()),
        "Error message must be a non-empty string: {}",
        body
    );
}

/// Read a money field (serialized as a string) as a Decimal
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s)
            .unwrap_or_else(|_| panic!("Not a decimal string: {}", s)),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .unwrap_or_else(|_| panic!("Not a decimal number: {}", n)),
        other => panic!("Expected a money value, got {}", other),
    }
}
