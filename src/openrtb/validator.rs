//! Entry points for validating bid requests.

use rayon::prelude::*;
use serde_json::Value;

use crate::config::{EngineConfig, Limits};
use crate::error::{EngineError, ValidationReport};
use crate::path::FieldPath;
use crate::schema::{ObjectSchema, SchemaLike};
use crate::validation::ValidationContext;

use super::schema::bid_request_schema;
use super::BidRequest;

/// Validates bid requests against the bid request schema.
///
/// Holds only the configured limits and a reference to the shared schema, so
/// one validator can serve any number of threads.
///
/// ```rust
/// use bidcheck::openrtb::{BidRequest, RequestValidator};
///
/// let validator = RequestValidator::default();
/// let report = validator.validate(&BidRequest::default()).unwrap();
/// assert!(!report.is_accepted());
/// ```
#[derive(Clone, Copy)]
pub struct RequestValidator {
    limits: Limits,
    schema: &'static ObjectSchema,
}

impl RequestValidator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            limits: config.limits,
            schema: bid_request_schema(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Validates a typed request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Encode`] if the request cannot be turned into a
    /// JSON tree. Violations are never errors; they are in the report.
    pub fn validate(&self, request: &BidRequest) -> Result<ValidationReport, EngineError> {
        let tree = serde_json::to_value(request)?;
        Ok(self.validate_value(&tree))
    }

    /// Validates an already decoded JSON tree.
    pub fn validate_value(&self, tree: &Value) -> ValidationReport {
        let context = ValidationContext::new(self.limits);
        let report = ValidationReport::from(self.schema.validate_with_context(
            tree,
            &FieldPath::root(),
            &context,
        ));

        if report.is_accepted() {
            log::debug!("bid request accepted");
        } else {
            log::debug!("bid request rejected with {} violation(s)", report.len());
            for violation in report.iter() {
                log::trace!("{}", violation);
            }
        }

        report
    }

    /// Validates independent requests in parallel. Results keep the input
    /// order.
    pub fn validate_batch(
        &self,
        requests: &[BidRequest],
    ) -> Vec<Result<ValidationReport, EngineError>> {
        requests.par_iter().map(|r| self.validate(r)).collect()
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// Validates `request` with the default limits.
pub fn validate_request(request: &BidRequest) -> Result<ValidationReport, EngineError> {
    RequestValidator::default().validate(request)
}
