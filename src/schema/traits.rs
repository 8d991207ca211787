//! The common validation seam.
//!
//! Every rule primitive and every schema node implements [`SchemaLike`], so
//! tests and callers can validate any piece of a schema in isolation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// Something that checks a JSON value and accumulates violations.
///
/// The `Send + Sync` bound lets schema graphs live in process-wide statics
/// shared by every request thread.
///
/// ```rust
/// use bidcheck::{FieldPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let pos = Schema::int_range(0, 7);
/// assert!(pos.validate(&json!(7), &FieldPath::root()).is_success());
/// assert!(pos.validate(&json!(8), &FieldPath::root()).is_failure());
/// ```
pub trait SchemaLike: Send + Sync {
    /// Validates `value` with default structural limits.
    fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        self.validate_with_context(value, path, &ValidationContext::default())
    }

    /// Validates `value`, reporting violations under `path`.
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> ValidationResult;
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Folds collected violations into a `Validation`.
pub(crate) fn finish(violations: Vec<Violation>) -> ValidationResult {
    match Violations::from_vec(violations) {
        Some(violations) => Validation::Failure(violations),
        None => Validation::Success(()),
    }
}
