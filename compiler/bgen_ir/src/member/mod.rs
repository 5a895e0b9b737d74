//! Member models.
//!
//! A `MemberModel` is the extracted, provider-independent description of one
//! data member of a target type. Whether a member is a collection is decided
//! once during extraction and carried as a flag from then on.

use std::fmt;

/// Declared visibility of a member or setter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Crate,
    Super,
    Private,
}

impl Visibility {
    /// Rust visibility qualifier (empty for private).
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Crate => "pub(crate)",
            Visibility::Super => "pub(super)",
            Visibility::Private => "",
        }
    }

    /// Variant name, used by structural scans.
    pub fn variant_name(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Crate => "Crate",
            Visibility::Super => "Super",
            Visibility::Private => "Private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant_name())
    }
}

/// One data member of a target type.
///
/// Immutable once constructed; equality and hashing are field-wise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberModel {
    name: String,
    type_name: String,
    is_collection: bool,
    has_public_setter: bool,
    visibility: Visibility,
}

impl MemberModel {
    /// A member assigned wholesale through its public setter.
    pub fn settable(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        MemberModel {
            name: name.into(),
            type_name: type_name.into(),
            is_collection: false,
            has_public_setter: true,
            visibility,
        }
    }

    /// A read-only collection member populated by appending elements.
    pub fn collection(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        MemberModel {
            name: name.into(),
            type_name: type_name.into(),
            is_collection: true,
            has_public_setter: false,
            visibility,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn has_public_setter(&self) -> bool {
        self.has_public_setter
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Copy of this member with a different type name.
    #[must_use]
    pub fn with_type_name(&self, type_name: impl Into<String>) -> Self {
        MemberModel {
            type_name: type_name.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests;
