//! Field constraints: what is checked on one field of one entity.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::Violations;
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::array::{ArraySchema, IntArraySchema, StringArraySchema};
use super::numeric::NumberSchema;
use super::object::ObjectSchema;
use super::string::StringSchema;
use super::traits::SchemaLike;

/// Whether a field must carry a non-empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optionality {
    Required,
    Optional,
}

/// An atomic rule applied to a present value.
#[derive(Debug, Clone)]
pub enum Rule {
    Number(NumberSchema),
    String(StringSchema),
    IntArray(IntArraySchema),
    StringArray(StringArraySchema),
}

impl SchemaLike for Rule {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match self {
            Rule::Number(rule) => rule.validate_with_context(value, path, context),
            Rule::String(rule) => rule.validate_with_context(value, path, context),
            Rule::IntArray(rule) => rule.validate_with_context(value, path, context),
            Rule::StringArray(rule) => rule.validate_with_context(value, path, context),
        }
    }
}

/// What runs on a field once it has passed the presence check.
#[derive(Clone)]
pub enum FieldCheck {
    /// Presence is the only requirement (free text, opaque codes).
    Unconstrained,
    Rule(Rule),
    /// A single nested entity.
    Nested(Arc<ObjectSchema>),
    /// A sequence of nested entities.
    Sequence(ArraySchema),
}

/// One entry in a schema node: optionality plus the check to apply.
#[derive(Clone)]
pub struct FieldConstraint {
    pub optionality: Optionality,
    pub check: FieldCheck,
}

impl FieldConstraint {
    pub fn is_required(&self) -> bool {
        self.optionality == Optionality::Required
    }

    /// Whether `value` counts as not supplied for this field.
    ///
    /// An optional sub-object or sequence is absent only when missing or
    /// `null`; a present `{}` or `[]` is checked against its node, so an
    /// empty `banner` still declares a banner.
    pub fn is_absent(&self, value: Option<&Value>) -> bool {
        match (&self.check, self.optionality) {
            (FieldCheck::Nested(_) | FieldCheck::Sequence(_), Optionality::Optional) => {
                matches!(value, None | Some(Value::Null))
            }
            _ => is_empty(value, self.optionality),
        }
    }
}

/// Presence test.
///
/// Absent, `null`, `""`, `[]` and `{}` are empty for every field. Required
/// fields additionally treat `0` and `false` as empty, matching the zero
/// value of the wire type; an optional `0` is a real value (a `lmt` of 0
/// means tracking is unrestricted, not that the flag was omitted).
pub fn is_empty(value: Option<&Value>, optionality: Optionality) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(members)) => members.is_empty(),
        Some(Value::Number(n)) => {
            optionality == Optionality::Required && n.as_f64() == Some(0.0)
        }
        Some(Value::Bool(b)) => optionality == Optionality::Required && !b,
    }
}

impl From<NumberSchema> for FieldCheck {
    fn from(rule: NumberSchema) -> Self {
        FieldCheck::Rule(Rule::Number(rule))
    }
}

impl From<StringSchema> for FieldCheck {
    fn from(rule: StringSchema) -> Self {
        FieldCheck::Rule(Rule::String(rule))
    }
}

impl From<IntArraySchema> for FieldCheck {
    fn from(rule: IntArraySchema) -> Self {
        FieldCheck::Rule(Rule::IntArray(rule))
    }
}

impl From<StringArraySchema> for FieldCheck {
    fn from(rule: StringArraySchema) -> Self {
        FieldCheck::Rule(Rule::StringArray(rule))
    }
}

impl From<ObjectSchema> for FieldCheck {
    fn from(node: ObjectSchema) -> Self {
        FieldCheck::Nested(Arc::new(node))
    }
}

impl From<Arc<ObjectSchema>> for FieldCheck {
    fn from(node: Arc<ObjectSchema>) -> Self {
        FieldCheck::Nested(node)
    }
}

impl From<ArraySchema> for FieldCheck {
    fn from(sequence: ArraySchema) -> Self {
        FieldCheck::Sequence(sequence)
    }
}
