use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: BGN### in registration order. Warnings and errors share the range;
/// `is_warning` tells them apart.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Emission of one builder failed
    BGN001,
    /// Fragments of one builder name different target types (warning)
    BGN002,
    /// Two builders mapped to the same artifact identifier (warning)
    BGN003,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// When adding a new variant: add it to the enum, `as_str()`, `title()`,
    /// and here.
    pub const ALL: &[ErrorCode] = &[ErrorCode::BGN001, ErrorCode::BGN002, ErrorCode::BGN003];

    /// Get the code as a string (e.g., "BGN001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BGN001 => "BGN001",
            ErrorCode::BGN002 => "BGN002",
            ErrorCode::BGN003 => "BGN003",
        }
    }

    /// Short, fixed title shown next to the code.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::BGN001 => "Unexpected error",
            ErrorCode::BGN002 => "Conflicting builder targets",
            ErrorCode::BGN003 => "Artifact identifier collision",
        }
    }

    /// Check if this code is reported as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::BGN002 | ErrorCode::BGN003)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"BGN001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
