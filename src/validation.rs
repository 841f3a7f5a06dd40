// Validation utilities module
// Provides custom validation functions for survey submission fields

use serde_json::Value;
use validator::ValidationError;

/// Returns true when a JSON value counts as present
///
/// Follows browser-side truthiness: null, false, 0, NaN and "" are all missing.
/// Arrays and objects are always present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Validates that a required field carries a truthy value
pub fn validate_present(value: &Value) -> Result<(), ValidationError> {
    if is_truthy(value) {
        Ok(())
    } else {
        Err(ValidationError::new("missing_value"))
    }
}
