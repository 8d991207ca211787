//! Schema nodes and the traversal engine.
//!
//! An [`ObjectSchema`] is the full constraint set of one entity type: an
//! ordered map from field name to [`FieldConstraint`] plus the entity's
//! cross-field rules. Validating a value against it walks every declared
//! field in order, recursing into nested entities and sequences, and
//! accumulates every violation found.

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, ViolationKind, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::constraint::{FieldCheck, FieldConstraint, Optionality};
use super::cross_field::CrossFieldRule;
use super::traits::{finish, value_type_name, SchemaLike};

/// The constraint set for one entity type.
///
/// Fields are checked in declaration order and violations are reported in
/// that order, so reports are deterministic.
///
/// ```rust
/// use bidcheck::{FieldPath, Schema, SchemaLike, ViolationKind};
/// use serde_json::json;
///
/// let format = Schema::object("Format")
///     .field("w", Schema::positive_int())
///     .field("h", Schema::positive_int());
///
/// let result = format.validate(&json!({"w": 300}), &FieldPath::root().push_field("format"));
/// let violations = result.into_result().unwrap_err();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations.first().kind, ViolationKind::MissingField);
/// assert_eq!(violations.first().path.to_string(), "format.h");
/// ```
pub struct ObjectSchema {
    name: String,
    fields: IndexMap<String, FieldConstraint>,
    rules: Vec<CrossFieldRule>,
}

impl ObjectSchema {
    /// Creates an empty node for the entity type `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            rules: Vec::new(),
        }
    }

    /// Adds a required field.
    ///
    /// An empty value yields a single [`ViolationKind::MissingField`] and
    /// `check` does not run.
    pub fn field(self, name: impl Into<String>, check: impl Into<FieldCheck>) -> Self {
        self.with_field(name.into(), Optionality::Required, check.into())
    }

    /// Adds an optional field.
    ///
    /// An empty value is skipped without violations; anything else must pass
    /// `check`.
    pub fn optional(self, name: impl Into<String>, check: impl Into<FieldCheck>) -> Self {
        self.with_field(name.into(), Optionality::Optional, check.into())
    }

    fn with_field(mut self, name: String, optionality: Optionality, check: FieldCheck) -> Self {
        self.fields
            .insert(name, FieldConstraint { optionality, check });
        self
    }

    /// Adds a cross-field rule, evaluated after all fields.
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: &str) -> Option<&FieldConstraint> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldConstraint)> {
        self.fields.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Checks one field and appends what it finds to `violations`.
    fn validate_field(
        &self,
        name: &str,
        constraint: &FieldConstraint,
        value: Option<&Value>,
        path: &FieldPath,
        context: &ValidationContext,
        violations: &mut Vec<Violation>,
    ) {
        let field_path = path.push_field(name);

        let value = match value {
            Some(v) if !constraint.is_absent(Some(v)) => v,
            _ => {
                if constraint.is_required() {
                    violations.push(Violation::missing(field_path));
                }
                return;
            }
        };

        if let Value::Array(items) = value {
            if items.len() > context.max_array_len() {
                log::warn!(
                    "array at {} has {} items, limit is {}",
                    field_path,
                    items.len(),
                    context.max_array_len()
                );
                violations.push(
                    Violation::new(
                        field_path,
                        ViolationKind::StructuralLimitExceeded,
                        format!(
                            "array length {} exceeds limit {}",
                            items.len(),
                            context.max_array_len()
                        ),
                    )
                    .with_expected(format!("at most {} items", context.max_array_len()))
                    .with_offending_value(format!("{} items", items.len())),
                );
                return;
            }
        }

        let outcome = match &constraint.check {
            FieldCheck::Unconstrained => return,
            FieldCheck::Rule(rule) => rule.validate_with_context(value, &field_path, context),
            FieldCheck::Nested(node) => {
                node.validate_with_context(value, &field_path, &context.descend())
            }
            FieldCheck::Sequence(sequence) => {
                sequence.validate_with_context(value, &field_path, &context.descend())
            }
        };

        if let Validation::Failure(found) = outcome {
            violations.extend(found);
        }
    }
}

impl SchemaLike for ObjectSchema {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        if context.depth_exceeded() {
            log::warn!(
                "{} at {} is nested {} levels deep, limit is {}",
                self.name,
                path,
                context.depth(),
                context.max_depth()
            );
            return finish(vec![Violation::new(
                path.clone(),
                ViolationKind::StructuralLimitExceeded,
                format!(
                    "nesting depth {} exceeds limit {}",
                    context.depth(),
                    context.max_depth()
                ),
            )
            .with_expected(format!("depth at most {}", context.max_depth()))]);
        }

        let Some(object) = value.as_object() else {
            let got = value_type_name(value);
            return finish(vec![Violation::new(
                path.clone(),
                ViolationKind::InvalidFormat,
                format!("expected {} object, got {}", self.name, got),
            )
            .with_expected("object")
            .with_offending_value(got)]);
        };

        let mut violations = Vec::new();

        for (name, constraint) in &self.fields {
            self.validate_field(
                name,
                constraint,
                object.get(name),
                path,
                context,
                &mut violations,
            );
        }

        violations.extend(self.rules.iter().filter_map(|rule| rule.check(object, path)));

        finish(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::schema::{Membership, Schema};
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn paths(violations: &Violations) -> Vec<String> {
        violations.iter().map(|v| v.path.to_string()).collect()
    }

    fn banner() -> ObjectSchema {
        Schema::object("Banner")
            .optional("pos", Schema::int_range(0, 7))
            .optional("api", Schema::int_array_enum(1..=6, Membership::All))
    }

    #[test]
    fn test_rejects_non_object() {
        let errors = unwrap_failure(banner().validate(&json!("banner"), &FieldPath::root()));
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
        assert_eq!(errors.first().offending_value.as_deref(), Some("string"));
    }

    #[test]
    fn test_required_empty_is_single_missing_field() {
        let schema = Schema::object("Device").field("ip", Schema::ipv4());

        for empty in [json!({}), json!({"ip": ""}), json!({"ip": null})] {
            let errors = unwrap_failure(schema.validate(&empty, &FieldPath::root()));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().kind, ViolationKind::MissingField);
            assert_eq!(errors.first().path.to_string(), "ip");
        }
    }

    #[test]
    fn test_required_zero_is_missing() {
        let schema = Schema::object("Format").field("w", Schema::positive_int());
        let errors = unwrap_failure(schema.validate(&json!({"w": 0}), &FieldPath::root()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_optional_absent_is_skipped() {
        assert!(banner().validate(&json!({}), &FieldPath::root()).is_success());
        assert!(banner()
            .validate(&json!({"pos": null, "api": []}), &FieldPath::root())
            .is_success());
    }

    #[test]
    fn test_optional_zero_is_checked_as_value() {
        let schema = Schema::object("Video").optional("linearity", Schema::int_range(1, 2));
        let errors = unwrap_failure(schema.validate(&json!({"linearity": 0}), &FieldPath::root()));
        assert_eq!(errors.first().kind, ViolationKind::OutOfRange);

        let flags = Schema::object("Device").optional("lmt", Schema::int_range(0, 1));
        assert!(flags.validate(&json!({"lmt": 0}), &FieldPath::root()).is_success());
    }

    #[test]
    fn test_all_fields_checked() {
        let errors = unwrap_failure(
            banner().validate(&json!({"pos": 8, "api": [1, 9, 12]}), &FieldPath::root()),
        );
        assert_eq!(paths(&errors), ["pos", "api[1]", "api[2]"]);
    }

    #[test]
    fn test_string_fields_check_type() {
        let schema = Schema::object("Device")
            .field("ua", Schema::string())
            .optional("buyeruid", Schema::unconstrained());

        let errors = unwrap_failure(
            schema.validate(&json!({"ua": 42, "buyeruid": ["anything"]}), &FieldPath::root()),
        );
        assert_eq!(paths(&errors), ["ua"]);
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
    }

    #[test]
    fn test_optional_empty_object_is_validated() {
        let video = Schema::object("Video")
            .field("mimes", Schema::string_array())
            .field("w", Schema::positive_int());
        let schema = Schema::object("Imp")
            .optional("banner", banner())
            .optional("video", video);

        assert!(schema
            .validate(&json!({"banner": {}}), &FieldPath::root())
            .is_success());

        let errors = unwrap_failure(schema.validate(
            &json!({"banner": {"pos": 1}, "video": {}}),
            &FieldPath::root(),
        ));
        assert_eq!(paths(&errors), ["video.mimes", "video.w"]);
        assert!(errors.iter().all(|v| v.kind == ViolationKind::MissingField));
    }

    #[test]
    fn test_nested_paths() {
        let schema = Schema::object("Imp").optional("banner", banner());
        let errors = unwrap_failure(schema.validate(
            &json!({"banner": {"pos": 9}}),
            &FieldPath::root().push_field("imp").push_index(2),
        ));
        assert_eq!(paths(&errors), ["imp[2].banner.pos"]);
    }

    #[test]
    fn test_cross_field_after_fields() {
        let schema = Schema::object("Imp")
            .optional("banner", banner())
            .optional("instl", Schema::int_range(0, 1))
            .rule(CrossFieldRule::at_least_one_of(
                ["banner", "video"],
                "impression must declare banner or video",
            ));

        let errors = unwrap_failure(schema.validate(&json!({"instl": 4}), &FieldPath::root()));
        assert_eq!(errors.len(), 2);
        let kinds: Vec<ViolationKind> = errors.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            [ViolationKind::OutOfRange, ViolationKind::CrossFieldViolation]
        );
    }

    #[test]
    fn test_array_length_limit() {
        let ctx = ValidationContext::new(Limits {
            max_depth: 8,
            max_array_len: 3,
        });
        let value = json!({"api": [1, 2, 3, 4]});
        let errors = unwrap_failure(banner().validate_with_context(&value, &FieldPath::root(), &ctx));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ViolationKind::StructuralLimitExceeded);
        assert_eq!(errors.first().path.to_string(), "api");

        let ok = json!({"api": [1, 2, 3]});
        assert!(banner()
            .validate_with_context(&ok, &FieldPath::root(), &ctx)
            .is_success());
    }

    #[test]
    fn test_depth_limit_stops_descent() {
        let leaf = Schema::object("Leaf").field("x", Schema::positive_int());
        let middle = Schema::object("Middle").field("leaf", leaf);
        let top = Schema::object("Top").field("middle", middle);

        let ctx = ValidationContext::new(Limits {
            max_depth: 1,
            max_array_len: 8,
        });
        let value = json!({"middle": {"leaf": {"x": -1}}});
        let errors = unwrap_failure(top.validate_with_context(&value, &FieldPath::root(), &ctx));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ViolationKind::StructuralLimitExceeded);
        assert_eq!(errors.first().path.to_string(), "middle.leaf");
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        assert!(banner()
            .validate(&json!({"pos": 1, "battr": [9]}), &FieldPath::root())
            .is_success());
    }
}
