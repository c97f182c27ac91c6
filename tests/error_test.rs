use apicheck::{ApicheckError, Result, TestFailure};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn test_file_not_found() {
    let err = ApicheckError::FileNotFound(PathBuf::from("tests.json"));
    assert_eq!(err.to_string(), "Cannot open file 'tests.json'. File not found.");
}

#[test]
fn test_missing_key() {
    let err = ApicheckError::MissingKey {
        index: 3,
        key: "method".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Malformed test #3. Must provide 'method' in tests file."
    );
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let err: ApicheckError = anyhow_err.into();
    assert!(err.to_string().contains("test anyhow error"));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(ApicheckError::InvalidBaseUrl("nope".to_string()))
    }

    match returns_error() {
        Err(ApicheckError::InvalidBaseUrl(url)) => assert_eq!(url, "nope"),
        _ => panic!("Expected InvalidBaseUrl"),
    }
}

#[test]
fn test_failure_messages() {
    let err = TestFailure::ValueMismatch {
        key: "id".to_string(),
        expected: json!(1),
        actual: json!("1"),
    };
    assert_eq!(err.to_string(), "Expected value '1' at key 'id' but got '1'.");

    let err = TestFailure::NetworkError("connection refused".to_string());
    assert_eq!(err.to_string(), "Request failed: connection refused");

    let err = TestFailure::MalformedTest("Allowed methods are GET and POST".to_string());
    assert_eq!(
        err.to_string(),
        "Malformed test. Allowed methods are GET and POST"
    );
}
