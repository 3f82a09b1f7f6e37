//! Declared operation schema.
//!
//! Each operation has a kind (query or mutation) and a JSON Schema
//! (draft 2020-12) describing its arguments. The dispatcher validates
//! arguments against that schema before any resolver runs.

use std::sync::OnceLock;

use jsonschema::{validator_for, Validator};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("{}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// One schema-declared operation.
#[derive(Serialize)]
pub struct OperationDef {
    pub name: &'static str,
    pub kind: OperationKind,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(skip)]
    validator: Validator,
}

impl OperationDef {
    fn new(
        name: &'static str,
        kind: OperationKind,
        description: &'static str,
        input_schema: Value,
    ) -> Self {
        // Schemas are compile-time constants; a compile failure is a bug.
        let validator = validator_for(&input_schema)
            .unwrap_or_else(|e| panic!("invalid input schema for {name}: {e}"));
        Self {
            name,
            kind,
            description,
            input_schema,
            validator,
        }
    }

    /// Validate call arguments. Absent arguments are checked as `{}`.
    pub fn validate_arguments(&self, arguments: Option<&Value>) -> Result<(), SchemaValidationError> {
        let empty = json!({});
        let instance = arguments.unwrap_or(&empty);
        check(&self.validator, instance)
    }
}

impl std::fmt::Debug for OperationDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// All operations exposed by the server.
pub fn operations() -> &'static [OperationDef] {
    static OPERATIONS: OnceLock<Vec<OperationDef>> = OnceLock::new();
    OPERATIONS.get_or_init(|| {
        vec![
            OperationDef::new(
                "meetups",
                OperationKind::Query,
                "List every meetup in creation order",
                json!({
                    "type": "object",
                    "properties": {},
                    "additionalProperties": false
                }),
            ),
            OperationDef::new(
                "createMeetup",
                OperationKind::Mutation,
                "Create a meetup and return it with its assigned id",
                json!({
                    "type": "object",
                    "required": ["input"],
                    "additionalProperties": false,
                    "properties": {
                        "input": {
                            "type": "object",
                            "required": ["title", "location"],
                            "additionalProperties": false,
                            "properties": {
                                "title": { "type": "string" },
                                "description": { "type": ["string", "null"] },
                                "location": { "type": "string" },
                                "startsAt": { "type": ["string", "null"] }
                            }
                        }
                    }
                }),
            ),
        ]
    })
}

/// Look up an operation by kind and field name.
pub fn find(kind: OperationKind, name: &str) -> Option<&'static OperationDef> {
    operations().iter().find(|op| op.kind == kind && op.name == name)
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
/// Returns Ok(()) if valid, Err otherwise.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;

    let validator = validator_for(&schema_json)
        .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    check(&validator, &instance_json)
}

fn check(validator: &Validator, instance: &Value) -> Result<(), SchemaValidationError> {
    let errors: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed(errors))
    }
}
