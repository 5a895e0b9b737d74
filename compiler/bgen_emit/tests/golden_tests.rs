//! Golden tests for emitted builder source.
//!
//! Each golden file under `tests/golden/` is the exact expected output for a
//! fixed spec. The same files are compiled by `generated_builder.rs`, so a
//! golden file that stops compiling fails there as well.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use bgen_emit::{
    domain_rules_source, emit_builder, emit_builder_marker, emit_domain_rules, EmitOptions,
};
use bgen_ir::{BuilderSpec, MemberModel, Visibility};
use pretty_assertions::assert_eq;

fn price_range_spec() -> BuilderSpec {
    BuilderSpec::new(
        "PriceRangeBuilder",
        "pricing",
        "crate::domain::PriceRange",
        vec![
            MemberModel::settable("minimum_price", "i32", Visibility::Public),
            MemberModel::collection("tags", "Vec<String>", Visibility::Public),
            MemberModel::settable("maximum_price", "i32", Visibility::Public),
        ],
    )
}

#[test]
fn golden_price_range_builder() {
    let text = emit_builder(&price_range_spec(), &EmitOptions::default()).unwrap();

    assert_eq!(text, include_str!("golden/price_range_builder.rs"));
}

#[test]
fn golden_builder_marker() {
    let text = emit_builder_marker(&EmitOptions::default());

    assert_eq!(text, include_str!("golden/builder_marker.rs"));
}

#[test]
fn repeated_emission_is_byte_identical() {
    let options = EmitOptions::default();
    let first = emit_builder(&price_range_spec(), &options).unwrap();
    let second = emit_builder(&price_range_spec(), &options).unwrap();

    assert_eq!(first, second);
}

#[test]
fn domain_rules_banner_follows_options() {
    assert_eq!(emit_domain_rules(&EmitOptions::default()), domain_rules_source());

    let custom = emit_domain_rules(&EmitOptions::default().with_generator_version("v9"));
    assert!(custom.contains("Generated by bgen v9."));
    assert_eq!(custom.lines().count(), domain_rules_source().lines().count());
}
