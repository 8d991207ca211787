//! Array validation: integer code lists, string lists and sequences of
//! objects.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, ViolationKind, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::object::ObjectSchema;
use super::traits::{finish, value_type_name, SchemaLike};

/// How an integer list is matched against the allowed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// At least one element must be allowed.
    Any,
    /// Every element must be allowed.
    All,
}

/// Membership check for lists of integer codes (API frameworks, protocols,
/// playback methods).
///
/// In [`Membership::All`] mode each offending element is reported at its own
/// index, so `[2, 9]` against `{2, 3, 5, 6}` yields one violation at `[1]`.
///
/// ```rust
/// use bidcheck::{FieldPath, Membership, Schema, SchemaLike};
/// use serde_json::json;
///
/// let protocols = Schema::int_array_enum([2, 3, 5, 6], Membership::All);
/// assert!(protocols.validate(&json!([2, 3]), &FieldPath::root()).is_success());
///
/// let violations = protocols
///     .validate(&json!([2, 9]), &FieldPath::root().push_field("protocols"))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(violations.first().path.to_string(), "protocols[1]");
/// ```
#[derive(Debug, Clone)]
pub struct IntArraySchema {
    allowed: BTreeSet<i64>,
    mode: Membership,
}

impl IntArraySchema {
    pub fn new(allowed: impl IntoIterator<Item = i64>, mode: Membership) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            mode,
        }
    }

    fn allowed_list(&self) -> String {
        let codes: Vec<String> = self.allowed.iter().map(i64::to_string).collect();
        format!("{{{}}}", codes.join(", "))
    }
}

impl SchemaLike for IntArraySchema {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        let Some(items) = value.as_array() else {
            return finish(vec![not_an_array(value, path)]);
        };

        let mut violations = Vec::new();
        let mut any_allowed = false;

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            match item.as_i64() {
                Some(code) if self.allowed.contains(&code) => any_allowed = true,
                Some(code) if self.mode == Membership::All => {
                    violations.push(
                        Violation::new(
                            item_path,
                            ViolationKind::InvalidEnum,
                            format!("code {} is not one of {}", code, self.allowed_list()),
                        )
                        .with_expected(self.allowed_list())
                        .with_offending_value(code.to_string()),
                    );
                }
                Some(_) => {}
                None => {
                    let got = value_type_name(item);
                    violations.push(
                        Violation::new(
                            item_path,
                            ViolationKind::InvalidFormat,
                            format!("expected integer code, got {}", got),
                        )
                        .with_expected("integer")
                        .with_offending_value(got),
                    );
                }
            }
        }

        if self.mode == Membership::Any && !any_allowed && !items.is_empty() {
            violations.push(
                Violation::new(
                    path.clone(),
                    ViolationKind::InvalidEnum,
                    format!("no element is one of {}", self.allowed_list()),
                )
                .with_expected(format!("at least one of {}", self.allowed_list()))
                .with_offending_value(value.to_string()),
            );
        }

        finish(violations)
    }
}

/// A list of free strings (MIME types, content categories).
///
/// Each non-string element is reported at its own index.
#[derive(Debug, Clone, Default)]
pub struct StringArraySchema;

impl StringArraySchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for StringArraySchema {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        let Some(items) = value.as_array() else {
            return finish(vec![not_an_array(value, path)]);
        };

        let violations = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_string())
            .map(|(index, item)| {
                let got = value_type_name(item);
                Violation::new(
                    path.push_index(index),
                    ViolationKind::InvalidFormat,
                    format!("expected string, got {}", got),
                )
                .with_expected("string")
                .with_offending_value(got)
            })
            .collect();

        finish(violations)
    }
}

/// A sequence whose elements are validated against one schema node.
#[derive(Clone)]
pub struct ArraySchema {
    item: Arc<ObjectSchema>,
    non_empty: bool,
}

impl ArraySchema {
    pub fn new(item: impl Into<Arc<ObjectSchema>>) -> Self {
        Self {
            item: item.into(),
            non_empty: false,
        }
    }

    /// Requires at least one element.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub fn item(&self) -> &ObjectSchema {
        &self.item
    }
}

impl SchemaLike for ArraySchema {
    /// Validates each element at `path[index]`; elements are one level deeper
    /// than `context`.
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        let Some(items) = value.as_array() else {
            return finish(vec![not_an_array(value, path)]);
        };

        let mut violations = Vec::new();

        if self.non_empty && items.is_empty() {
            violations.push(
                Violation::new(
                    path.clone(),
                    ViolationKind::MissingField,
                    format!("'{}' must contain at least one item", self.item.name()),
                )
                .with_expected("at least 1 item")
                .with_offending_value("0 items"),
            );
        }

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            if let Validation::Failure(found) =
                self.item.validate_with_context(item, &item_path, context)
            {
                violations.extend(found);
            }
        }

        finish(violations)
    }
}

fn not_an_array(value: &Value, path: &FieldPath) -> Violation {
    let got = value_type_name(value);
    Violation::new(
        path.clone(),
        ViolationKind::InvalidFormat,
        format!("expected array, got {}", got),
    )
    .with_expected("array")
    .with_offending_value(got)
}
