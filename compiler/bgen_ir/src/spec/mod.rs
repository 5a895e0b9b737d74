//! Builder specifications.
//!
//! A `BuilderSpec` is the snapshot of one builder to generate: where it lives,
//! what it builds, and the members it can set. It is rebuilt from provider
//! data on every run and used both as a cache key and as emission input.
//!
//! # Invariants
//!
//! - `normal_members` and `collection_members` partition the member set
//! - both lists are sorted by member name (ordinal)
//!
//! Both hold by construction: `BuilderSpec::new` takes the flat member list
//! and does the partitioning and sorting itself.

use std::fmt;

use crate::{EqSeq, MemberModel};

/// Identity of one annotated declaration fragment, assigned by the provider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(u32);

impl DeclarationId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclarationId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Logical identity of a builder: every fragment with the same namespace and
/// builder name describes the same builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderKey {
    pub namespace: String,
    pub builder_name: String,
}

impl BuilderKey {
    pub fn new(namespace: impl Into<String>, builder_name: impl Into<String>) -> Self {
        BuilderKey {
            namespace: namespace.into(),
            builder_name: builder_name.into(),
        }
    }
}

impl fmt::Display for BuilderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.builder_name)
        } else {
            write!(f, "{}::{}", self.namespace, self.builder_name)
        }
    }
}

/// Immutable description of one builder to generate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderSpec {
    builder_name: String,
    builder_namespace: String,
    target_type_full_name: String,
    normal_members: EqSeq<MemberModel>,
    collection_members: EqSeq<MemberModel>,
}

impl BuilderSpec {
    /// Build a spec, partitioning `members` by collection-ness and sorting
    /// each partition by member name.
    pub fn new(
        builder_name: impl Into<String>,
        builder_namespace: impl Into<String>,
        target_type_full_name: impl Into<String>,
        members: impl IntoIterator<Item = MemberModel>,
    ) -> Self {
        let (mut collection, mut normal): (Vec<_>, Vec<_>) = members
            .into_iter()
            .partition(MemberModel::is_collection);
        sort_by_name(&mut normal);
        sort_by_name(&mut collection);

        BuilderSpec {
            builder_name: builder_name.into(),
            builder_namespace: builder_namespace.into(),
            target_type_full_name: target_type_full_name.into(),
            normal_members: normal.into(),
            collection_members: collection.into(),
        }
    }

    pub fn builder_name(&self) -> &str {
        &self.builder_name
    }

    pub fn builder_namespace(&self) -> &str {
        &self.builder_namespace
    }

    pub fn target_type_full_name(&self) -> &str {
        &self.target_type_full_name
    }

    /// Members assigned wholesale, sorted by name.
    pub fn normal_members(&self) -> &EqSeq<MemberModel> {
        &self.normal_members
    }

    /// Members populated element by element, sorted by name.
    pub fn collection_members(&self) -> &EqSeq<MemberModel> {
        &self.collection_members
    }

    /// All members: normal first, then collection.
    pub fn all_members(&self) -> impl Iterator<Item = &MemberModel> {
        self.normal_members
            .iter()
            .chain(self.collection_members.iter())
    }

    /// Total number of members.
    pub fn member_count(&self) -> usize {
        self.normal_members.len() + self.collection_members.len()
    }

    /// The logical builder this spec belongs to.
    pub fn key(&self) -> BuilderKey {
        BuilderKey::new(self.builder_namespace.clone(), self.builder_name.clone())
    }
}

fn sort_by_name(members: &mut [MemberModel]) {
    members.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.cmp(b)));
}
