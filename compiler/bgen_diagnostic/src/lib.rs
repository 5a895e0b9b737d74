//! Diagnostic system for generator faults.
//!
//! Tooling faults never escape the pipeline as panics or `Err` values. They
//! become `Diagnostic`s:
//! - Error codes for searchability (`BGN001`)
//! - A message naming the target type that failed
//! - Notes with the underlying cause
//!
//! Diagnostics are value-equatable and implement `Structural`, so they can be
//! cached as part of a stage output.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
