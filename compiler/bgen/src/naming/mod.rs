//! Artifact naming and collision resolution.
//!
//! Every logical builder becomes exactly one artifact. Its identifier is
//! derived from the namespace and builder name:
//!
//! ```text
//! ("A.B", "Builder")    → A_B_Builder
//! ("a::b", "Builder")   → a_b_Builder
//! ("", "Builder")       → Builder
//! ```
//!
//! Different keys can map to the same base identifier (`A.B` and `A::B`), and a
//! base can equal a reserved once-per-run artifact. Resolution walks all keys
//! in sorted order and suffixes later claimants with `_2`, `_3`, … so the
//! result depends only on the set of keys, never on discovery order.

use std::collections::{BTreeMap, BTreeSet};

use bgen_emit::{BUILDER_MARKER_ID, DOMAIN_RULES_ID};
use bgen_ir::{ArtifactId, BuilderKey};
use rustc_hash::FxHashMap;

/// Base identifier for a builder, before collision handling.
pub fn base_identifier(namespace: &str, builder_name: &str) -> String {
    let mut identifier = String::with_capacity(namespace.len() + builder_name.len() + 1);
    for segment in namespace
        .split("::")
        .flat_map(|part| part.split('.'))
        .filter(|segment| !segment.is_empty())
    {
        identifier.push_str(segment);
        identifier.push('_');
    }
    identifier.push_str(builder_name);
    identifier
}

/// A builder that could not use its base identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameCollision {
    pub key: BuilderKey,
    /// The identifier the key wanted.
    pub base: String,
    /// The identifier it got.
    pub assigned: ArtifactId,
    /// Who already held `base`; `None` for a reserved artifact.
    pub holder: Option<BuilderKey>,
}

/// Identifiers for every key of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub identifiers: BTreeMap<BuilderKey, ArtifactId>,
    pub collisions: Vec<NameCollision>,
}

impl Resolution {
    pub fn get(&self, key: &BuilderKey) -> Option<&ArtifactId> {
        self.identifiers.get(key)
    }
}

/// Assigns collision-free artifact identifiers.
#[derive(Clone, Debug)]
pub struct ArtifactNameResolver {
    reserved: Vec<String>,
}

impl Default for ArtifactNameResolver {
    fn default() -> Self {
        ArtifactNameResolver {
            reserved: vec![BUILDER_MARKER_ID.to_string(), DOMAIN_RULES_ID.to_string()],
        }
    }
}

impl ArtifactNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve identifiers for `keys`. Duplicate keys get one identifier.
    pub fn resolve<'a>(&self, keys: impl IntoIterator<Item = &'a BuilderKey>) -> Resolution {
        let keys: BTreeSet<&BuilderKey> = keys.into_iter().collect();

        let mut taken: FxHashMap<String, Option<BuilderKey>> = self
            .reserved
            .iter()
            .map(|id| (id.clone(), None))
            .collect();
        let mut resolution = Resolution::default();

        for key in keys {
            let base = base_identifier(&key.namespace, &key.builder_name);
            let assigned = if let Some(holder) = taken.get(&base) {
                let holder = holder.clone();
                let mut suffix = 2;
                let mut candidate = format!("{base}_{suffix}");
                while taken.contains_key(&candidate) {
                    suffix += 1;
                    candidate = format!("{base}_{suffix}");
                }
                tracing::debug!(
                    builder = %key,
                    base = %base,
                    assigned = %candidate,
                    "artifact identifier collision"
                );
                let assigned = ArtifactId::new(candidate);
                resolution.collisions.push(NameCollision {
                    key: key.clone(),
                    base,
                    assigned: assigned.clone(),
                    holder,
                });
                assigned
            } else {
                ArtifactId::new(base)
            };

            taken.insert(assigned.as_str().to_string(), Some(key.clone()));
            resolution.identifiers.insert(key.clone(), assigned);
        }

        resolution
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
