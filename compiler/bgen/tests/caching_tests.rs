//! Incremental behavior across runs.
//!
//! Every test drives a long-lived `Pipeline` through several batches and
//! checks the tracked step reasons, plus the structural cache-safety scan of
//! every stage output.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use bgen::symbols::{DeclarationSymbol, MarkerArgument};
use bgen::testing::{assert_cache_safe, batch, FakeDeclaration, FakeMember, FakeType};
use bgen::{CancellationFlag, GeneratorConfig, Pipeline, RunResult, StepReason};
use bgen_ir::{BuilderKey, DeclarationId, Structural};
use pretty_assertions::assert_eq;

fn order_type(quantity_type: &str) -> FakeType {
    FakeType::new("crate::sales::Order")
        .member(FakeMember::settable("Quantity", quantity_type))
        .member(FakeMember::settable("Customer", "String"))
        .member(FakeMember::collection("Lines", "Vec<Line>"))
}

fn customer_type() -> FakeType {
    FakeType::new("crate::sales::Customer")
        .member(FakeMember::settable("Name", "String"))
        .member(FakeMember::settable("Email", "String"))
}

fn invoice_type() -> FakeType {
    FakeType::new("crate::billing::Invoice")
        .member(FakeMember::settable("Total", "i64"))
        .with_base(FakeType::new("crate::billing::Document").member(FakeMember::settable(
            "Number",
            "String",
        )))
}

fn declarations(quantity_type: &str) -> Vec<Arc<dyn DeclarationSymbol>> {
    batch([
        FakeDeclaration::new(1, "sales", "OrderBuilder", order_type(quantity_type)),
        FakeDeclaration::new(2, "sales", "CustomerBuilder", customer_type()),
        FakeDeclaration::new(3, "billing", "InvoiceBuilder", invoice_type()),
    ])
}

fn key(namespace: &str, name: &str) -> BuilderKey {
    BuilderKey::new(namespace, name)
}

fn assert_all_cache_safe(result: &RunResult) {
    assert_cache_safe(&result.extraction);
    assert_cache_safe(&result.merge);
    assert_cache_safe(&result.emission);
}

fn pipelines() -> [Pipeline; 2] {
    [
        Pipeline::new(GeneratorConfig::sequential()),
        Pipeline::new(GeneratorConfig::default().with_threads(4)),
    ]
}

#[test]
fn unchanged_batch_is_fully_reused() {
    for mut pipeline in pipelines() {
        pipeline.run(&declarations("u32"));
        let result = pipeline.run(&declarations("u32"));

        assert!(result.extraction.is_fully_reused());
        assert!(result.merge.is_fully_reused());
        assert!(result.emission.is_fully_reused());
        assert_eq!(result.extraction.count(StepReason::Unchanged), 3);
        assert_eq!(result.merge.count(StepReason::Cached), 3);
        assert_eq!(result.emission.count(StepReason::Cached), 3);
        assert_eq!(result.emission.misses, 0);
        assert!(result.changes.is_empty());
        assert_all_cache_safe(&result);
    }
}

#[test]
fn one_member_type_change_only_touches_that_builder() {
    for mut pipeline in pipelines() {
        pipeline.run(&declarations("u32"));
        let result = pipeline.run(&declarations("u64"));

        assert_eq!(
            result.extraction.reason_for(&DeclarationId::from_raw(1)),
            Some(StepReason::Modified)
        );
        assert_eq!(
            result.extraction.reason_for(&DeclarationId::from_raw(2)),
            Some(StepReason::Unchanged)
        );
        assert_eq!(
            result.extraction.reason_for(&DeclarationId::from_raw(3)),
            Some(StepReason::Unchanged)
        );

        let order = key("sales", "OrderBuilder");
        assert_eq!(result.merge.reason_for(&order), Some(StepReason::Modified));
        assert_eq!(result.emission.reason_for(&order), Some(StepReason::Modified));
        for other in [key("sales", "CustomerBuilder"), key("billing", "InvoiceBuilder")] {
            assert_eq!(result.merge.reason_for(&other), Some(StepReason::Cached));
            assert_eq!(result.emission.reason_for(&other), Some(StepReason::Cached));
        }

        assert_eq!(result.emission.misses, 1);
        assert_eq!(result.changes.changed.len(), 1);
        assert_eq!(result.changes.changed[0].as_str(), "sales_OrderBuilder");
        assert_all_cache_safe(&result);
    }
}

#[test]
fn reverting_a_change_recomputes_after_pruning() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));
    pipeline.run(&declarations("u64"));
    let result = pipeline.run(&declarations("u32"));

    // Stale entries were dropped after the second run.
    let order = key("sales", "OrderBuilder");
    assert_eq!(result.emission.reason_for(&order), Some(StepReason::Modified));
}

#[test]
fn removed_declaration_is_tagged_removed() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));

    let remaining = batch([
        FakeDeclaration::new(1, "sales", "OrderBuilder", order_type("u32")),
        FakeDeclaration::new(2, "sales", "CustomerBuilder", customer_type()),
    ]);
    let result = pipeline.run(&remaining);

    assert_eq!(
        result.extraction.reason_for(&DeclarationId::from_raw(3)),
        Some(StepReason::Removed)
    );
    let invoice = key("billing", "InvoiceBuilder");
    assert_eq!(result.merge.reason_for(&invoice), Some(StepReason::Removed));
    assert_eq!(result.emission.reason_for(&invoice), Some(StepReason::Removed));
    assert_eq!(result.changes.removed.len(), 1);
    assert!(result.artifact("billing_InvoiceBuilder").is_none());
    assert_all_cache_safe(&result);
}

#[test]
fn declaration_that_stops_resolving_is_removed() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));

    let broken = batch([
        FakeDeclaration::new(1, "sales", "OrderBuilder", order_type("u32")),
        FakeDeclaration::new(2, "sales", "CustomerBuilder", customer_type()),
        FakeDeclaration::with_argument(
            3,
            "billing",
            "InvoiceBuilder",
            MarkerArgument::Malformed("Invoce".to_string()),
        ),
    ]);
    let result = pipeline.run(&broken);
    assert_eq!(
        result.extraction.reason_for(&DeclarationId::from_raw(3)),
        Some(StepReason::Removed)
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn new_declaration_is_tagged_new() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));

    let mut grown = declarations("u32");
    grown.extend(batch([FakeDeclaration::new(
        4,
        "sales",
        "LineBuilder",
        FakeType::new("crate::sales::Line").member(FakeMember::settable("Sku", "String")),
    )]));
    let result = pipeline.run(&grown);

    let line = key("sales", "LineBuilder");
    assert_eq!(
        result.extraction.reason_for(&DeclarationId::from_raw(4)),
        Some(StepReason::New)
    );
    assert_eq!(result.merge.reason_for(&line), Some(StepReason::New));
    assert_eq!(result.emission.reason_for(&line), Some(StepReason::New));
    assert_eq!(result.emission.misses, 1);
}

#[test]
fn adding_a_fragment_modifies_only_the_merged_builder() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));

    let mut grown = declarations("u32");
    grown.extend(batch([FakeDeclaration::new(
        5,
        "sales",
        "CustomerBuilder",
        FakeType::new("crate::sales::Customer").member(FakeMember::settable("Phone", "String")),
    )]));
    let result = pipeline.run(&grown);

    let customer = key("sales", "CustomerBuilder");
    assert_eq!(result.merge.reason_for(&customer), Some(StepReason::Modified));
    assert_eq!(result.emission.reason_for(&customer), Some(StepReason::Modified));
    assert_eq!(result.emission.count(StepReason::Cached), 2);
    assert_eq!(result.artifacts.len(), 5);
}

#[test]
fn cancelled_run_then_full_run() {
    let mut pipeline = Pipeline::new(GeneratorConfig::sequential());
    pipeline.run(&declarations("u32"));

    let cancel = CancellationFlag::new();
    cancel.cancel();
    let cancelled = pipeline.run_with_cancellation(&declarations("u64"), &cancel);
    assert!(cancelled.cancelled);
    assert!(cancelled.changes.is_empty());
    assert_eq!(cancelled.extraction.count(StepReason::Removed), 0);
    assert_eq!(cancelled.emission.count(StepReason::Removed), 0);
    // Support artifacts are still produced.
    assert_eq!(cancelled.artifacts.len(), 2);

    let result = pipeline.run(&declarations("u32"));
    assert!(!result.cancelled);
    assert!(result.emission.is_fully_reused());
    assert!(result.changes.is_empty());
}

#[test]
fn provider_handles_are_not_cache_safe() {
    let argument = MarkerArgument::Type(order_type("u32").into_symbol());
    let paths = argument.shape().foreign_paths();
    assert_eq!(paths, vec!["MarkerArgument::Type.0: TypeSymbol".to_string()]);
}
