//! Output buffer sizing.
//!
//! The estimate only decides the initial allocation of the emission buffer.
//! It never affects the emitted text.
//!
//! ```text
//! (HEADER + FOOTER
//!    + Σ members (PER_MEMBER + name_len + type_len)
//!    + collections × PER_COLLECTION) × 105 / 100
//! ```
//!
//! Every term is non-negative and additive, so the estimate never shrinks
//! when a member is added or a name grows.

use bgen_ir::BuilderSpec;

/// Banner, struct opening, constructors.
pub const HEADER_COST: usize = 900;
/// `build` tail, closing braces, `Default` impl.
pub const FOOTER_COST: usize = 250;
/// Field, setter pair and `build` block of one member.
pub const PER_MEMBER_COST: usize = 420;
/// Extra loop in `build` for a collection member.
pub const PER_COLLECTION_COST: usize = 150;

const MARGIN_NUMERATOR: usize = 105;
const MARGIN_DENOMINATOR: usize = 100;

/// Estimate the emitted size of `spec` in bytes.
pub fn estimate_capacity(spec: &BuilderSpec) -> usize {
    let members: usize = spec
        .all_members()
        .map(|member| PER_MEMBER_COST + member.name().len() + member.type_name().len())
        .sum();
    let collections = spec.collection_members().len() * PER_COLLECTION_COST;
    let fixed = HEADER_COST
        + FOOTER_COST
        + spec.builder_name().len()
        + spec.target_type_full_name().len();

    (fixed + members + collections) * MARGIN_NUMERATOR / MARGIN_DENOMINATOR
}
