//! Business rules that span sibling fields of one entity.
//!
//! These run once per entity instance after its per-field checks, and their
//! violations are reported at the entity's own path.

use serde_json::{Map, Value};

use crate::error::{Violation, ViolationKind};
use crate::path::FieldPath;

#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldRule {
    /// At least one of the named fields must be present and not `null`. An
    /// empty object counts as present.
    AtLeastOneOf {
        fields: Vec<String>,
        message: String,
    },
    /// When both fields hold numbers, `lower` must not exceed `upper`.
    NotGreaterThan { lower: String, upper: String },
}

impl CrossFieldRule {
    pub fn at_least_one_of<I, S>(fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CrossFieldRule::AtLeastOneOf {
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn not_greater_than(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        CrossFieldRule::NotGreaterThan {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Evaluates the rule against one entity instance.
    pub fn check(&self, object: &Map<String, Value>, path: &FieldPath) -> Option<Violation> {
        match self {
            CrossFieldRule::AtLeastOneOf { fields, message } => {
                let any_present = fields
                    .iter()
                    .any(|f| object.get(f).is_some_and(|v| !v.is_null()));
                if any_present {
                    return None;
                }
                Some(
                    Violation::new(path.clone(), ViolationKind::CrossFieldViolation, message)
                        .with_expected(format!("one of [{}]", fields.join(", "))),
                )
            }
            CrossFieldRule::NotGreaterThan { lower, upper } => {
                let low = object.get(lower).and_then(Value::as_f64)?;
                let high = object.get(upper).and_then(Value::as_f64)?;
                if low <= high {
                    return None;
                }
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::CrossFieldViolation,
                        format!("'{}' must not exceed '{}'", lower, upper),
                    )
                    .with_expected(format!("{} <= {}", lower, upper))
                    .with_offending_value(format!("{}={} > {}={}", lower, low, upper, high)),
                )
            }
        }
    }
}
