//! Port.io Self-Service Action input document
//!
//! The payload shape is deliberately loose: every top-level field is optional,
//! `properties` and `payload` are open maps, and `context` carries three
//! optional strings. Unknown keys are dropped during validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Origin of an action run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsaContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,

    #[serde(rename = "runId", default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl SsaContext {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let fields = [
            ("entity", &self.entity),
            ("blueprint", &self.blueprint),
            ("runId", &self.run_id),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        map
    }
}

/// A validated Self-Service Action payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsaInput {
    /// User-submitted action inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Entity, blueprint and run the action belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<SsaContext>,

    /// Raw trigger payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl SsaInput {
    /// Top-level fields that are present, in declaration order
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(properties) = &self.properties {
            map.insert("properties".to_string(), Value::Object(properties.clone()));
        }
        if let Some(context) = &self.context {
            map.insert("context".to_string(), Value::Object(context.to_map()));
        }
        if let Some(payload) = &self.payload {
            map.insert("payload".to_string(), Value::Object(payload.clone()));
        }
        map
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dot-joined location of the offending value, empty for the document root
    pub path: String,
    pub message: String,
}

impl Violation {
    fn expected(path: &str, expected: &str, received: &Value) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Expected {}, received {}", expected, type_name(received)),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found in a rejected document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema validation failed: {}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn render_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate decoded JSON against the SSA payload shape
///
/// All violations are collected before failing. Absent fields are fine;
/// a field that is present must have the right type, `null` included.
pub fn validate(value: Value) -> Result<SsaInput, ValidationError> {
    debug!("validate: called");
    let mut root = match value {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError {
                violations: vec![Violation::expected("", "object", &other)],
            });
        }
    };

    let mut violations = Vec::new();
    let properties = take_record(&mut root, "properties", &mut violations);
    let context = take_context(&mut root, &mut violations);
    let payload = take_record(&mut root, "payload", &mut violations);

    if !violations.is_empty() {
        debug!(count = violations.len(), "validate: rejected");
        return Err(ValidationError { violations });
    }

    Ok(SsaInput {
        properties,
        context,
        payload,
    })
}

fn take_record(root: &mut Map<String, Value>, key: &str, violations: &mut Vec<Violation>) -> Option<Map<String, Value>> {
    match root.remove(key)? {
        Value::Object(map) => Some(map),
        other => {
            violations.push(Violation::expected(key, "object", &other));
            None
        }
    }
}

fn take_context(root: &mut Map<String, Value>, violations: &mut Vec<Violation>) -> Option<SsaContext> {
    let mut fields = match root.remove("context")? {
        Value::Object(map) => map,
        other => {
            violations.push(Violation::expected("context", "object", &other));
            return None;
        }
    };

    let mut take_string = |key: &str| match fields.remove(key)? {
        Value::String(s) => Some(s),
        other => {
            violations.push(Violation::expected(&format!("context.{}", key), "string", &other));
            None
        }
    };

    Some(SsaContext {
        entity: take_string("entity"),
        blueprint: take_string("blueprint"),
        run_id: take_string("runId"),
    })
}
