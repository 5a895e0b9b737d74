//! Testing utilities for the generator.
//!
//! - **Fakes**: in-memory symbol-provider implementations
//! - **Cache safety**: `assert_cache_safe` walks every tracked output of a
//!   stage report and fails on foreign references
//!
//! # Usage
//!
//! ```ignore
//! use bgen::testing::{batch, FakeDeclaration, FakeMember, FakeType};
//!
//! let target = FakeType::new("crate::Entity")
//!     .member(FakeMember::settable("id", "u64"))
//!     .member(FakeMember::collection("tags", "Vec<String>"));
//! let declarations = batch([FakeDeclaration::new(1, "app", "EntityBuilder", target)]);
//! ```

use std::sync::Arc;

use bgen_ir::{DeclarationId, Structural, Visibility};

use crate::stage::StageReport;
use crate::symbols::{DeclarationSymbol, MarkerArgument, MemberSymbol, TypeSymbol};

/// In-memory member.
#[derive(Clone, Debug)]
pub struct FakeMember {
    name: String,
    type_name: String,
    setter: Option<Visibility>,
    visibility: Visibility,
    collection: bool,
}

impl FakeMember {
    /// Public member with a public setter.
    pub fn settable(name: &str, type_name: &str) -> Self {
        FakeMember {
            name: name.to_string(),
            type_name: type_name.to_string(),
            setter: Some(Visibility::Public),
            visibility: Visibility::Public,
            collection: false,
        }
    }

    /// Public read-only member of a collection type.
    pub fn collection(name: &str, type_name: &str) -> Self {
        FakeMember {
            setter: None,
            collection: true,
            ..Self::settable(name, type_name)
        }
    }

    /// Public read-only scalar member.
    pub fn read_only(name: &str, type_name: &str) -> Self {
        FakeMember {
            setter: None,
            ..Self::settable(name, type_name)
        }
    }

    /// Replace the setter visibility.
    #[must_use]
    pub fn with_setter(mut self, setter: Option<Visibility>) -> Self {
        self.setter = setter;
        self
    }
}

impl MemberSymbol for FakeMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn setter(&self) -> Option<Visibility> {
        self.setter
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn is_collection_type(&self) -> bool {
        self.collection
    }
}

/// In-memory type with an optional base type.
#[derive(Clone)]
pub struct FakeType {
    full_name: String,
    members: Vec<Arc<dyn MemberSymbol>>,
    base: Option<Arc<dyn TypeSymbol>>,
}

impl FakeType {
    pub fn new(full_name: &str) -> Self {
        FakeType {
            full_name: full_name.to_string(),
            members: Vec::new(),
            base: None,
        }
    }

    /// Add a directly declared member.
    #[must_use]
    pub fn member(mut self, member: FakeMember) -> Self {
        self.members.push(Arc::new(member));
        self
    }

    /// Inherit members from `base`.
    #[must_use]
    pub fn with_base(mut self, base: FakeType) -> Self {
        self.base = Some(Arc::new(base));
        self
    }

    pub fn into_symbol(self) -> Arc<dyn TypeSymbol> {
        Arc::new(self)
    }
}

impl TypeSymbol for FakeType {
    fn full_name(&self) -> String {
        self.full_name.clone()
    }

    fn members(&self) -> Vec<Arc<dyn MemberSymbol>> {
        self.members.clone()
    }

    fn base(&self) -> Option<Arc<dyn TypeSymbol>> {
        self.base.clone()
    }
}

/// In-memory builder declaration.
#[derive(Clone)]
pub struct FakeDeclaration {
    id: DeclarationId,
    namespace: String,
    name: String,
    argument: MarkerArgument,
}

impl FakeDeclaration {
    /// Declaration whose marker names `target`.
    pub fn new(id: u32, namespace: &str, name: &str, target: FakeType) -> Self {
        Self::with_argument(id, namespace, name, MarkerArgument::Type(target.into_symbol()))
    }

    /// Declaration whose marker has the given argument.
    pub fn with_argument(id: u32, namespace: &str, name: &str, argument: MarkerArgument) -> Self {
        FakeDeclaration {
            id: DeclarationId::from_raw(id),
            namespace: namespace.to_string(),
            name: name.to_string(),
            argument,
        }
    }

    pub fn into_symbol(self) -> Arc<dyn DeclarationSymbol> {
        Arc::new(self)
    }
}

impl DeclarationSymbol for FakeDeclaration {
    fn id(&self) -> DeclarationId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn marker_argument(&self) -> MarkerArgument {
        self.argument.clone()
    }
}

/// Turn fakes into the batch a pipeline run consumes.
pub fn batch(
    declarations: impl IntoIterator<Item = FakeDeclaration>,
) -> Vec<Arc<dyn DeclarationSymbol>> {
    declarations
        .into_iter()
        .map(FakeDeclaration::into_symbol)
        .collect()
}

/// Panic if any key or value tracked by `report` holds a foreign reference.
#[track_caller]
pub fn assert_cache_safe<K: Structural, O: Structural>(report: &StageReport<K, O>) {
    let mut violations = Vec::new();
    for output in &report.outputs {
        for path in output.key.shape().foreign_paths() {
            violations.push(format!("{} key: {path}", report.stage));
        }
        for path in output.value.shape().foreign_paths() {
            violations.push(format!("{} value: {path}", report.stage));
        }
    }
    assert!(
        violations.is_empty(),
        "stage outputs hold foreign references:\n{}",
        violations.join("\n")
    );
}
