//! # bidcheck
//!
//! Admission checks for OpenRTB 2.5 bid requests. A request is walked
//! against a declarative schema and every violation is collected, each
//! addressed by the path of the offending value, rather than stopping at the
//! first problem.
//!
//! ## Core Types
//!
//! - [`Schema`] / [`ObjectSchema`]: declarative constraint tables for one entity type
//! - [`FieldPath`]: where a value lives (e.g. `imp[0].video.protocols[1]`)
//! - [`Violation`]: one failed check with its path, kind and offending value
//! - [`ValidationReport`]: every violation of one request; empty means accepted
//! - [`openrtb::RequestValidator`]: validates [`openrtb::BidRequest`] values
//!
//! ## Example
//!
//! ```rust
//! use bidcheck::openrtb::{validate_request, BidRequest};
//! use bidcheck::ViolationKind;
//!
//! let report = validate_request(&BidRequest::default()).unwrap();
//! assert!(!report.is_accepted());
//! assert_eq!(report.at_path("imp")[0].kind, ViolationKind::MissingField);
//! ```

pub mod config;
pub mod error;
pub mod openrtb;
pub mod path;
pub mod schema;
pub mod validation;

pub use config::{EngineConfig, Limits};
pub use error::{EngineError, ValidationReport, Violation, ViolationKind, Violations};
pub use path::{FieldPath, PathSegment};
pub use schema::{
    ArraySchema, CrossFieldRule, FieldCheck, IntArraySchema, Membership, NumberSchema,
    ObjectSchema, Schema, SchemaLike, StringArraySchema, StringSchema,
};
pub use validation::ValidationContext;

/// Outcome of validating a value against a schema.
pub type ValidationResult = stillwater::Validation<(), Violations>;
