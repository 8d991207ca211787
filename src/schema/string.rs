//! String rule primitives: plain strings, enumerations and the IPv4 / UUIDv4
//! formats.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, ViolationKind, Violations};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{finish, value_type_name, SchemaLike};

/// Canonical 8-4-4-4-12 grouping, version nibble 4, variant nibble 8/9/a/b.
const UUID_V4_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$";

static UUID_V4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_V4_PATTERN).expect("UUIDv4 pattern compiles"));

#[derive(Debug, Clone)]
enum StringConstraint {
    Any,
    OneOf {
        allowed: Vec<String>,
        case_insensitive: bool,
    },
    Ipv4,
    Uuidv4,
}

/// A string rule primitive.
///
/// Non-string input is reported as [`ViolationKind::InvalidFormat`].
///
/// ```rust
/// use bidcheck::{FieldPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let ip = Schema::ipv4();
/// assert!(ip.validate(&json!("192.168.1.1"), &FieldPath::root()).is_success());
/// assert!(ip.validate(&json!("192.168.1"), &FieldPath::root()).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct StringSchema {
    constraint: StringConstraint,
}

impl StringSchema {
    /// Any string; only the JSON type is checked.
    pub fn any() -> Self {
        Self {
            constraint: StringConstraint::Any,
        }
    }

    /// Membership in a fixed set of literals.
    pub fn one_of<I, S>(allowed: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            constraint: StringConstraint::OneOf {
                allowed: allowed.into_iter().map(Into::into).collect(),
                case_insensitive,
            },
        }
    }

    /// Four dot-separated decimal octets, each 0-255.
    pub fn ipv4() -> Self {
        Self {
            constraint: StringConstraint::Ipv4,
        }
    }

    /// A version 4 UUID in canonical hyphenated form.
    pub fn uuid_v4() -> Self {
        Self {
            constraint: StringConstraint::Uuidv4,
        }
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Option<Violation> {
        let Some(s) = value.as_str() else {
            let got = value_type_name(value);
            return Some(
                Violation::new(
                    path.clone(),
                    ViolationKind::InvalidFormat,
                    format!("expected string, got {}", got),
                )
                .with_expected("string")
                .with_offending_value(got),
            );
        };

        match &self.constraint {
            StringConstraint::Any => None,
            StringConstraint::OneOf {
                allowed,
                case_insensitive,
            } => {
                let found = allowed.iter().any(|a| {
                    if *case_insensitive {
                        a.eq_ignore_ascii_case(s)
                    } else {
                        a == s
                    }
                });
                if found {
                    return None;
                }
                let expected = format!("one of [{}]", allowed.join(", "));
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::InvalidEnum,
                        format!("must be {}, got '{}'", expected, s),
                    )
                    .with_expected(expected)
                    .with_offending_value(s),
                )
            }
            StringConstraint::Ipv4 => match s.parse::<Ipv4Addr>() {
                Ok(_) => None,
                Err(_) => Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::InvalidFormat,
                        "must be a dotted-quad IPv4 address",
                    )
                    .with_expected("IPv4 address")
                    .with_offending_value(s),
                ),
            },
            StringConstraint::Uuidv4 if UUID_V4.is_match(s) => None,
            StringConstraint::Uuidv4 => Some(
                Violation::new(
                    path.clone(),
                    ViolationKind::InvalidFormat,
                    "must be a version 4 UUID",
                )
                .with_expected("UUIDv4")
                .with_offending_value(s),
            ),
        }
    }
}

impl SchemaLike for StringSchema {
    fn validate_with_context(
        &self,
        value: &Value,
        path: &FieldPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        finish(self.check(value, path).into_iter().collect())
    }
}
