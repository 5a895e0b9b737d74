//! Emission errors.

use thiserror::Error;

/// Why a builder could not be emitted.
///
/// Raised before any text is written, so a failed emission never leaves a
/// partial artifact behind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("builder name is empty")]
    EmptyBuilderName,
    #[error("builder name `{name}` is not a valid type name")]
    InvalidBuilderName { name: String },
    #[error("target type name is empty")]
    EmptyTargetName,
    #[error("member #{index} has an empty name")]
    EmptyMemberName { index: usize },
    #[error("member `{member}` has an empty type name")]
    EmptyTypeName { member: String },
    #[error("member `{member}` is not a valid field name")]
    InvalidMemberName { member: String },
    #[error("member `{member}` maps to the reserved field `{field}`")]
    ReservedField { member: String, field: String },
    #[error("members `{first}` and `{second}` both map to the field `{field}`")]
    DuplicateField {
        first: String,
        second: String,
        field: String,
    },
    #[error("members `{first}` and `{second}` both generate the method `{method}`")]
    DuplicateMethod {
        first: String,
        second: String,
        method: String,
    },
}
