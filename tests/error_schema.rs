use jsonschema::validator_for;
use serde_json::Value;

use meetup_server::error::{ErrorCode, ResolverError};
use meetup_server::protocol::{JsonRpcError, OperationErrorResponse};

// Schema (v0) — frozen
const OPERATION_ERROR_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Operation Error Response v0",
  "type": "object",
  "required": ["error"],
  "additionalProperties": false,
  "properties": {
    "error": {
      "type": "object",
      "required": ["code", "message", "operation"],
      "additionalProperties": false,
      "properties": {
        "code": {
          "type": "string",
          "enum": [
            "validation_error",
            "storage_error",
            "cancelled",
            "not_implemented"
          ]
        },
        "message": { "type": "string", "minLength": 1 },
        "operation": { "type": "string", "enum": ["meetups", "createMeetup"] }
      }
    }
  }
}"#;

#[test]
fn golden_operation_error_schema_validation() {
    let response = OperationErrorResponse::from_resolver(
        "createMeetup",
        &ResolverError::validation("title", "must not be blank"),
    );

    let json_str = serde_json::to_string_pretty(&response).unwrap();
    let json_value: Value = serde_json::from_str(&json_str).unwrap();

    let schema_json: Value = serde_json::from_str(OPERATION_ERROR_SCHEMA).unwrap();
    let validator = validator_for(&schema_json).unwrap();
    assert!(validator.is_valid(&json_value), "operation error JSON must satisfy v0 schema");

    // Golden snapshot (byte-identical, stable)
    let expected = r#"{
  "error": {
    "code": "validation_error",
    "message": "invalid `title`: must not be blank",
    "operation": "createMeetup"
  }
}"#;

    assert_eq!(json_str.trim(), expected.trim(), "operation error JSON snapshot mismatch");
}

#[test]
fn every_resolver_error_satisfies_schema() {
    let schema_json: Value = serde_json::from_str(OPERATION_ERROR_SCHEMA).unwrap();
    let validator = validator_for(&schema_json).unwrap();

    let errors = vec![
        ResolverError::validation("location", "must not be blank"),
        ResolverError::Storage(meetup_server::store::StoreError::Unavailable("down".into())),
        ResolverError::Cancelled,
        ResolverError::not_implemented("meetups"),
    ];

    for err in errors {
        let value = serde_json::to_value(OperationErrorResponse::from_resolver("meetups", &err)).unwrap();
        assert!(validator.is_valid(&value), "invalid error document for {err:?}: {value}");
    }
}

#[test]
fn json_rpc_error_carries_operation_error_in_data() {
    let op = OperationErrorResponse::new(ErrorCode::Cancelled, "meetups", "request cancelled");
    let rpc: JsonRpcError = op.clone().into();

    assert_eq!(rpc.code, -32603);
    assert_eq!(rpc.message, "request cancelled");

    let data: OperationErrorResponse = serde_json::from_value(rpc.data.unwrap()).unwrap();
    assert_eq!(data, op);
}

#[test]
fn validation_errors_map_to_invalid_params() {
    assert_eq!(ErrorCode::ValidationError.json_rpc_code(), -32602);
    assert_eq!(ErrorCode::StorageError.json_rpc_code(), -32603);
    assert_eq!(ErrorCode::NotImplemented.json_rpc_code(), -32603);
}
