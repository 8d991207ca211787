//! Violation and error types.
//!
//! Violations describe what is wrong with a request and are accumulated, never
//! thrown. [`EngineError`] covers the failures around the engine itself
//! (encoding the typed request, loading configuration).

mod engine_error;
mod report;
mod violation;

pub use engine_error::EngineError;
pub use report::ValidationReport;
pub use violation::{Violation, ViolationKind, Violations};
