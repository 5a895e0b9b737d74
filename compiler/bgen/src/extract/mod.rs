//! Extraction boundary.
//!
//! Converts a live `DeclarationSymbol` into a `BuilderSpec`. This is the only
//! place provider objects are read; everything it returns is owned,
//! value-equatable data.
//!
//! # Member collection
//!
//! ```text
//! target ──members()──→ classify ──→ MemberModel
//!   │
//!   └─base()──→ base ──members()──→ classify ──→ MemberModel
//!                 │
//!                 └─base()──→ …   (loop, not recursion)
//! ```
//!
//! A member is kept when it is either
//! - a collection: no setter and a collection type, or
//! - normal: a public setter.
//!
//! Everything else (read-only scalars, non-public setters) cannot be set by a
//! builder and is skipped. A member shadowed by a more-derived member with the
//! same name is skipped too.

use bgen_ir::{BuilderSpec, MemberModel, Visibility};
use rustc_hash::FxHashSet;

use crate::symbols::{DeclarationSymbol, MarkerArgument, MemberSymbol, TypeSymbol};

/// Extract the spec for one declaration.
///
/// Returns `None` when the marker argument is missing or malformed; such a
/// declaration is not actionable and is dropped from the run.
pub fn extract_builder(declaration: &dyn DeclarationSymbol) -> Option<BuilderSpec> {
    let target = match declaration.marker_argument() {
        MarkerArgument::Type(target) => target,
        MarkerArgument::Missing => {
            tracing::trace!(
                declaration = %declaration.id(),
                builder = declaration.name(),
                "marker has no target type"
            );
            return None;
        }
        MarkerArgument::Malformed(argument) => {
            tracing::trace!(
                declaration = %declaration.id(),
                builder = declaration.name(),
                argument = %argument,
                "marker target does not resolve to a type"
            );
            return None;
        }
    };

    Some(BuilderSpec::new(
        declaration.name(),
        declaration.namespace(),
        target.full_name(),
        collect_members(target.as_ref()),
    ))
}

/// Collect the settable members of `target` and all its base types.
///
/// The walk stops at the first type whose full name was already visited, so a
/// cyclic base chain from a broken provider still terminates.
pub fn collect_members(target: &dyn TypeSymbol) -> Vec<MemberModel> {
    let mut members = Vec::new();
    let mut seen_members: FxHashSet<String> = FxHashSet::default();
    let mut seen_types: FxHashSet<String> = FxHashSet::default();

    seen_types.insert(target.full_name());
    collect_declared(target, &mut seen_members, &mut members);

    let mut next = target.base();
    while let Some(base) = next {
        if !seen_types.insert(base.full_name()) {
            tracing::debug!(
                ty = %target.full_name(),
                base = %base.full_name(),
                "base chain revisits a type; stopping"
            );
            break;
        }
        collect_declared(base.as_ref(), &mut seen_members, &mut members);
        next = base.base();
    }

    members
}

fn collect_declared(
    ty: &dyn TypeSymbol,
    seen: &mut FxHashSet<String>,
    members: &mut Vec<MemberModel>,
) {
    for member in ty.members() {
        if !seen.insert(member.name().to_string()) {
            continue;
        }
        if let Some(model) = classify(member.as_ref()) {
            members.push(model);
        }
    }
}

/// Decide collection-ness once, here.
fn classify(member: &dyn MemberSymbol) -> Option<MemberModel> {
    let setter = member.setter();
    if setter.is_none() && member.is_collection_type() {
        Some(MemberModel::collection(
            member.name(),
            member.type_name(),
            member.visibility(),
        ))
    } else if setter == Some(Visibility::Public) {
        Some(MemberModel::settable(
            member.name(),
            member.type_name(),
            member.visibility(),
        ))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
