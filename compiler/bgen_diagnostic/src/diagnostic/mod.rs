use std::fmt;

use bgen_ir::{EqSeq, Shape, Structural};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn variant_name(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Note => "Note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A generator diagnostic scoped to one builder.
///
/// # Cache Compatibility
/// Has Clone, Eq, Hash, and only `EqSeq` for its notes, so it can be part of
/// a memoized stage output.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main message.
    pub message: String,
    /// Additional notes providing context.
    pub notes: EqSeq<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            notes: EqSeq::empty(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes = self
            .notes
            .iter()
            .cloned()
            .chain(std::iter::once(note.into()))
            .collect();
        self
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity,
            self.code,
            self.code.title(),
            self.message
        )?;

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

impl Structural for Diagnostic {
    fn shape(&self) -> Shape {
        Shape::record(
            "Diagnostic",
            vec![
                ("code", Shape::unit_variant("ErrorCode", self.code.as_str())),
                (
                    "severity",
                    Shape::unit_variant("Severity", self.severity.variant_name()),
                ),
                ("message", self.message.shape()),
                ("notes", self.notes.shape()),
            ],
        )
    }
}
