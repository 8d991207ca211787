//! Single violations and non-empty violation sets.

use std::fmt::{self, Display};

use serde::Serialize;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// The category of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    /// A required field is absent or holds its empty value.
    MissingField,
    /// A number lies outside its declared interval.
    OutOfRange,
    /// A string or integer is not a member of the allowed set.
    InvalidEnum,
    /// A value has the wrong shape (IPv4, UUIDv4, or the wrong JSON type).
    InvalidFormat,
    /// A business rule spanning sibling fields is broken.
    CrossFieldViolation,
    /// The depth or array-length guard stopped the traversal.
    StructuralLimitExceeded,
}

impl ViolationKind {
    /// Machine-readable code, stable across releases.
    pub fn code(self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::OutOfRange => "out_of_range",
            ViolationKind::InvalidEnum => "invalid_enum",
            ViolationKind::InvalidFormat => "invalid_format",
            ViolationKind::CrossFieldViolation => "cross_field",
            ViolationKind::StructuralLimitExceeded => "structural_limit_exceeded",
        }
    }
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One failed check, addressed by the path of the offending value.
///
/// ```rust
/// use bidcheck::{FieldPath, Violation, ViolationKind};
///
/// let violation = Violation::new(
///     FieldPath::root().push_field("device").push_field("ip"),
///     ViolationKind::InvalidFormat,
///     "must be a dotted-quad IPv4 address",
/// )
/// .with_offending_value("999.1.1.1");
///
/// assert_eq!(violation.path.to_string(), "device.ip");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
    pub message: String,
    /// The rejected value, rendered for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl Violation {
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            offending_value: None,
            expected: None,
        }
    }

    pub fn with_offending_value(mut self, value: impl Into<String>) -> Self {
        self.offending_value = Some(value.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Shorthand for a [`ViolationKind::MissingField`] at `path`.
    pub fn missing(path: FieldPath) -> Self {
        let message = match path.last() {
            Some(crate::path::PathSegment::Field(name)) => {
                format!("required field '{}' is missing", name)
            }
            _ => "required value is missing".to_string(),
        };
        Self::new(path, ViolationKind::MissingField, message).with_expected("non-empty value")
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root) [{}]: {}", self.kind, self.message)?;
        } else {
            write!(f, "{} [{}]: {}", self.path, self.kind, self.message)?;
        }
        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.offending_value {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violation {}

/// At least one violation.
///
/// This is the failure side of `stillwater::Validation` inside the engine;
/// `Semigroup::combine` concatenates in order, which keeps reports in
/// traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Returns `None` when `violations` is empty.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        NonEmptyVec::from_vec(violations).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Violation>();
    assert_send_sync::<Violations>();
};
