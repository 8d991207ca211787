//! Numeric rule primitives.
//!
//! [`NumberSchema`] covers the closed integer range used for codes and flags
//! and the lower bounds used for durations, sizes, bitrates and prices.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, ViolationKind, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, value_type_name, SchemaLike};

/// The bound a number must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    /// Type check only.
    Unbounded,
    /// Closed interval `[min, max]`.
    Range { min: i64, max: i64 },
    /// `>= 0`
    NonNegative,
    /// `> 0`
    Positive,
}

/// A numeric rule primitive.
///
/// Integer schemas reject fractional input with
/// [`ViolationKind::InvalidFormat`]; real schemas accept any JSON number.
/// Bound failures are [`ViolationKind::OutOfRange`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSchema {
    bound: Bound,
    integer: bool,
}

impl NumberSchema {
    /// Integer in the closed interval `[min, max]`.
    ///
    /// ```rust
    /// use bidcheck::{FieldPath, Schema, SchemaLike, ViolationKind};
    /// use serde_json::json;
    ///
    /// let linearity = Schema::int_range(1, 2);
    /// let result = linearity.validate(&json!(3), &FieldPath::root());
    /// let violations = result.into_result().unwrap_err();
    /// assert_eq!(violations.first().kind, ViolationKind::OutOfRange);
    /// ```
    pub fn int_range(min: i64, max: i64) -> Self {
        Self {
            bound: Bound::Range { min, max },
            integer: true,
        }
    }

    /// Any integer.
    pub fn int() -> Self {
        Self {
            bound: Bound::Unbounded,
            integer: true,
        }
    }

    pub fn non_negative_int() -> Self {
        Self {
            bound: Bound::NonNegative,
            integer: true,
        }
    }

    pub fn positive_int() -> Self {
        Self {
            bound: Bound::Positive,
            integer: true,
        }
    }

    /// Any real number `>= 0`; used for prices.
    pub fn non_negative_number() -> Self {
        Self {
            bound: Bound::NonNegative,
            integer: false,
        }
    }

    fn expected_type(&self) -> &'static str {
        if self.integer {
            "integer"
        } else {
            "number"
        }
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Option<Violation> {
        let Value::Number(num) = value else {
            return Some(type_mismatch(path, self.expected_type(), value_type_name(value)));
        };

        if self.integer {
            let Some(n) = num.as_i64() else {
                let got = if num.is_u64() { "integer beyond i64" } else { "float" };
                return Some(type_mismatch(path, "integer", got));
            };
            return check_integer(self.bound, n, path);
        }

        // Every serde_json number converts to f64; NaN never reaches here.
        let n = num.as_f64().unwrap_or(f64::NAN);
        check_real(self.bound, n, path)
    }
}

impl SchemaLike for NumberSchema {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        finish(self.check(value, path).into_iter().collect())
    }
}

fn type_mismatch(path: &FieldPath, expected: &str, got: &str) -> Violation {
    Violation::new(
        path.clone(),
        ViolationKind::InvalidFormat,
        format!("expected {}, got {}", expected, got),
    )
    .with_expected(expected)
    .with_offending_value(got)
}

fn out_of_range(path: &FieldPath, expected: String, got: String) -> Violation {
    Violation::new(
        path.clone(),
        ViolationKind::OutOfRange,
        format!("must be {}, got {}", expected, got),
    )
    .with_expected(expected)
    .with_offending_value(got)
}

fn check_integer(bound: Bound, n: i64, path: &FieldPath) -> Option<Violation> {
    match bound {
        Bound::Range { min, max } if n < min || n > max => Some(out_of_range(
            path,
            format!("between {} and {}", min, max),
            n.to_string(),
        )),
        Bound::NonNegative if n < 0 => {
            Some(out_of_range(path, "at least 0".to_string(), n.to_string()))
        }
        Bound::Positive if n <= 0 => {
            Some(out_of_range(path, "greater than 0".to_string(), n.to_string()))
        }
        _ => None,
    }
}

fn check_real(bound: Bound, n: f64, path: &FieldPath) -> Option<Violation> {
    let (ok, expected) = match bound {
        Bound::Unbounded => return None,
        Bound::Range { min, max } => (
            n >= min as f64 && n <= max as f64,
            format!("between {} and {}", min, max),
        ),
        Bound::NonNegative => (n >= 0.0, "at least 0".to_string()),
        Bound::Positive => (n > 0.0, "greater than 0".to_string()),
    };
    if ok {
        return None;
    }
    Some(out_of_range(path, expected, n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn root() -> FieldPath {
        FieldPath::root()
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let pos = NumberSchema::int_range(0, 7);
        assert!(pos.validate(&json!(0), &root()).is_success());
        assert!(pos.validate(&json!(7), &root()).is_success());

        let below = unwrap_failure(pos.validate(&json!(-1), &root()));
        assert_eq!(below.first().kind, ViolationKind::OutOfRange);
        assert_eq!(below.first().offending_value.as_deref(), Some("-1"));

        let above = unwrap_failure(pos.validate(&json!(8), &root()));
        assert_eq!(above.first().kind, ViolationKind::OutOfRange);
        assert_eq!(above.first().expected.as_deref(), Some("between 0 and 7"));
    }

    #[test]
    fn test_flag_range() {
        let flag = NumberSchema::int_range(0, 1);
        assert!(flag.validate(&json!(0), &root()).is_success());
        assert!(flag.validate(&json!(1), &root()).is_success());
        assert!(flag.validate(&json!(2), &root()).is_failure());
    }

    #[test]
    fn test_integer_rejects_float_and_string() {
        let schema = NumberSchema::int_range(0, 10);

        let errors = unwrap_failure(schema.validate(&json!(1.5), &root()));
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
        assert_eq!(errors.first().offending_value.as_deref(), Some("float"));

        let errors = unwrap_failure(schema.validate(&json!("3"), &root()));
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
        assert_eq!(errors.first().offending_value.as_deref(), Some("string"));
    }

    #[test]
    fn test_integer_rejects_u64_overflow() {
        let schema = NumberSchema::non_negative_int();
        let errors = unwrap_failure(schema.validate(&json!(u64::MAX), &root()));
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
    }

    #[test]
    fn test_int_checks_type_only() {
        let schema = NumberSchema::int();
        assert!(schema.validate(&json!(-3), &root()).is_success());
        assert!(schema.validate(&json!(1995), &root()).is_success());
        let errors = unwrap_failure(schema.validate(&json!("29"), &root()));
        assert_eq!(errors.first().kind, ViolationKind::InvalidFormat);
    }

    #[test]
    fn test_non_negative_int() {
        let schema = NumberSchema::non_negative_int();
        assert!(schema.validate(&json!(0), &root()).is_success());
        assert!(schema.validate(&json!(120), &root()).is_success());
        let errors = unwrap_failure(schema.validate(&json!(-1), &root()));
        assert_eq!(errors.first().kind, ViolationKind::OutOfRange);
    }

    #[test]
    fn test_positive_int() {
        let schema = NumberSchema::positive_int();
        assert!(schema.validate(&json!(1), &root()).is_success());
        assert!(schema.validate(&json!(0), &root()).is_failure());
        assert!(schema.validate(&json!(-320), &root()).is_failure());
    }

    #[test]
    fn test_non_negative_number_accepts_reals() {
        let floor = NumberSchema::non_negative_number();
        assert!(floor.validate(&json!(0.0), &root()).is_success());
        assert!(floor.validate(&json!(1.25), &root()).is_success());
        assert!(floor.validate(&json!(3), &root()).is_success());

        let errors = unwrap_failure(floor.validate(&json!(-0.01), &root()));
        assert_eq!(errors.first().kind, ViolationKind::OutOfRange);
        assert_eq!(errors.first().offending_value.as_deref(), Some("-0.01"));
    }

    #[test]
    fn test_violation_carries_path() {
        let path = root().push_field("imp").push_index(0).push_field("instl");
        let errors = unwrap_failure(NumberSchema::int_range(0, 1).validate(&json!(5), &path));
        assert_eq!(errors.first().path.to_string(), "imp[0].instl");
    }
}
