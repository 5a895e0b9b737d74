//! Fragment merge.
//!
//! A builder may be declared in several fragments that share its namespace
//! and name. They are grouped by `BuilderKey`, sorted, and merged into one
//! spec, so one logical builder yields one artifact regardless of how many
//! fragments were discovered or in which order.
//!
//! When fragments disagree on the target type, the smallest target name wins
//! and only fragments naming it contribute members. The other targets are
//! recorded so the pipeline can warn about them.

use std::collections::BTreeSet;

use bgen_ir::{BuilderSpec, EqSeq, MemberModel, Shape, Structural};
use rustc_hash::FxHashSet;

/// The merged spec of one logical builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MergedBuilder {
    pub spec: BuilderSpec,
    /// Targets named by some fragments but not chosen, sorted.
    pub conflicting_targets: EqSeq<String>,
}

impl MergedBuilder {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicting_targets.is_empty()
    }
}

impl Structural for MergedBuilder {
    fn shape(&self) -> Shape {
        Shape::record(
            "MergedBuilder",
            vec![
                ("spec", self.spec.shape()),
                ("conflicting_targets", self.conflicting_targets.shape()),
            ],
        )
    }
}

/// Merge the sorted fragments of one builder.
///
/// Members are unioned by name; the first fragment in sorted order wins a
/// name. An empty fragment list merges to an empty spec.
pub fn merge_fragments(fragments: &EqSeq<BuilderSpec>) -> MergedBuilder {
    let Some(first) = fragments.get(0) else {
        return MergedBuilder {
            spec: BuilderSpec::new("", "", "", Vec::new()),
            conflicting_targets: EqSeq::empty(),
        };
    };

    let target = fragments
        .iter()
        .map(BuilderSpec::target_type_full_name)
        .min()
        .unwrap_or(first.target_type_full_name());

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut members: Vec<MemberModel> = Vec::new();
    for fragment in fragments
        .iter()
        .filter(|fragment| fragment.target_type_full_name() == target)
    {
        for member in fragment.all_members() {
            if seen.insert(member.name()) {
                members.push(member.clone());
            }
        }
    }

    let conflicting: BTreeSet<&str> = fragments
        .iter()
        .map(BuilderSpec::target_type_full_name)
        .filter(|other| *other != target)
        .collect();
    if !conflicting.is_empty() {
        tracing::debug!(
            builder = %first.key(),
            chosen = target,
            ignored = conflicting.len(),
            "fragments name different targets"
        );
    }

    MergedBuilder {
        spec: BuilderSpec::new(
            first.builder_name(),
            first.builder_namespace(),
            target,
            members,
        ),
        conflicting_targets: conflicting.into_iter().map(str::to_string).collect(),
    }
}
