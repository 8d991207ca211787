//! The outcome of validating one request.

use std::fmt::{self, Display};

use serde::Serialize;
use stillwater::Validation;

use crate::path::FieldPath;

use super::violation::{Violation, ViolationKind, Violations};

/// Every violation found in one request, in traversal order.
///
/// An empty report is the accept signal. The order is pre-order over the
/// schema's field declaration order, then array index order, with an
/// entity's cross-field violations following its field violations. Two
/// validations of the same tree produce equal reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn accepted() -> Self {
        Self::default()
    }

    /// True when no violation was found.
    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations whose path renders as `path` (e.g. `"imp[0].video.w"`).
    ///
    /// A malformed `path` matches nothing.
    pub fn at_path(&self, path: &str) -> Vec<&Violation> {
        match FieldPath::parse(path) {
            Some(wanted) => self.violations.iter().filter(|v| v.path == wanted).collect(),
            None => Vec::new(),
        }
    }

    pub fn of_kind(&self, kind: ViolationKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.kind == kind).collect()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }

    /// Renders the report as JSON for the rejection body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.violations)
    }
}

impl From<Validation<(), Violations>> for ValidationReport {
    fn from(outcome: Validation<(), Violations>) -> Self {
        match outcome {
            Validation::Success(()) => Self::accepted(),
            Validation::Failure(violations) => Self {
                violations: violations.into_vec(),
            },
        }
    }
}

impl From<Vec<Violation>> for ValidationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_accepted() {
            return writeln!(f, "Request accepted");
        }
        writeln!(f, "Request rejected with {} violation(s):", self.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
