use super::headers::{has_header, header_value, vary_values};
use cors_engine_rs::{CorsDecision, Headers, PreflightResponse};

pub fn assert_preflight(decision: CorsDecision) -> PreflightResponse {
    match decision {
        CorsDecision::Preflight(response) => response,
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_actual(decision: CorsDecision) {
    assert_eq!(decision, CorsDecision::Actual, "expected actual decision");
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for header {name}"
    );
}

pub fn assert_no_header(headers: &Headers, name: &str) {
    assert!(
        !has_header(headers, name),
        "expected header {name} to be absent, got {:?}",
        header_value(headers, name)
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let expected: Vec<String> = expected
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect();
    assert_eq!(vary_values(headers), expected);
}

/// Checks that `name` is listed in `Vary` exactly once.
pub fn assert_vary_contains(headers: &Headers, name: &str) {
    let count = vary_values(headers)
        .iter()
        .filter(|value| value.as_str() == name)
        .count();
    assert_eq!(count, 1, "expected {name} exactly once in Vary");
}

pub fn assert_vary_not_contains(headers: &Headers, name: &str) {
    assert!(
        !vary_values(headers).iter().any(|value| value == name),
        "expected {name} to be absent from Vary"
    );
}

pub fn assert_vary_is_empty(headers: &Headers) {
    assert_no_header(headers, cors_engine_rs::constants::header::VARY);
}
