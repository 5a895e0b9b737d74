//! End-to-end behavior of a single pipeline run.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use bgen::testing::{batch, FakeDeclaration, FakeMember, FakeType};
use bgen::{GeneratorConfig, Pipeline};
use bgen_diagnostic::ErrorCode;
use bgen_emit::EmitOptions;
use pretty_assertions::assert_eq;

fn entity_type() -> FakeType {
    FakeType::new("crate::model::Entity")
        .member(FakeMember::settable("Id", "Guid"))
        .member(FakeMember::settable("Name", "String"))
        .member(FakeMember::collection("Tags", "Vec<String>"))
}

fn run(declarations: Vec<FakeDeclaration>) -> bgen::RunResult {
    Pipeline::new(GeneratorConfig::sequential()).run(&batch(declarations))
}

#[test]
fn entity_builder_has_one_setter_pair_per_member() {
    let result = run(vec![FakeDeclaration::new(1, "model", "EntityBuilder", entity_type())]);
    let text = &result.artifact("model_EntityBuilder").unwrap().text;

    for stem in ["id", "name", "tags"] {
        assert_eq!(text.matches(&format!("pub fn with_{stem}(")).count(), 1);
        assert_eq!(text.matches(&format!("pub fn with_{stem}_fn(")).count(), 1);
    }
    assert!(text.contains("instance.Id = produce();"));
    assert!(text.contains("instance.Name = produce();"));
    assert!(text.contains("instance.Tags.push(item);"));
    assert!(!text.contains("instance.Tags = produce();"));
    assert!(text.contains("self.domain_rules.check(&instance)?;"));
}

#[test]
fn build_assigns_members_in_sorted_order() {
    let result = run(vec![FakeDeclaration::new(1, "model", "EntityBuilder", entity_type())]);
    let text = &result.artifact("model_EntityBuilder").unwrap().text;

    let id = text.find("instance.Id = ").unwrap();
    let name = text.find("instance.Name = ").unwrap();
    let tags = text.find("instance.Tags.push").unwrap();
    assert!(id < name && name < tags);
}

#[test]
fn same_builder_name_in_two_namespaces() {
    let result = run(vec![
        FakeDeclaration::new(1, "A", "Builder", entity_type()),
        FakeDeclaration::new(2, "B", "Builder", entity_type()),
    ]);

    assert!(result.artifact("A_Builder").is_some());
    assert!(result.artifact("B_Builder").is_some());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn two_fragments_produce_one_artifact() {
    let result = run(vec![
        FakeDeclaration::new(
            1,
            "A",
            "Builder",
            FakeType::new("crate::T").member(FakeMember::settable("First", "u8")),
        ),
        FakeDeclaration::new(
            2,
            "A",
            "Builder",
            FakeType::new("crate::T").member(FakeMember::settable("Second", "u8")),
        ),
    ]);

    let builders: Vec<&str> = result
        .artifacts
        .iter()
        .map(|artifact| artifact.identifier.as_str())
        .filter(|id| id.starts_with("A_"))
        .collect();
    assert_eq!(builders, vec!["A_Builder"]);

    let text = &result.artifact("A_Builder").unwrap().text;
    assert!(text.contains("pub fn with_first("));
    assert!(text.contains("pub fn with_second("));
}

#[test]
fn fragment_discovery_order_does_not_matter() {
    let first = || {
        FakeDeclaration::new(
            1,
            "A",
            "Builder",
            FakeType::new("crate::T").member(FakeMember::settable("First", "u8")),
        )
    };
    let second = || {
        FakeDeclaration::new(
            2,
            "A",
            "Builder",
            FakeType::new("crate::T").member(FakeMember::settable("Second", "u8")),
        )
    };

    let forward = run(vec![first(), second()]);
    let backward = run(vec![second(), first()]);
    assert_eq!(forward.artifacts, backward.artifacts);
}

#[test]
fn exactly_one_of_each_support_artifact() {
    let result = run(vec![
        FakeDeclaration::new(1, "A", "Builder", entity_type()),
        FakeDeclaration::new(2, "B", "Builder", entity_type()),
    ]);
    for id in ["builder_marker", "domain_rules"] {
        let count = result
            .artifacts
            .iter()
            .filter(|artifact| artifact.identifier.as_str() == id)
            .count();
        assert_eq!(count, 1, "{id}");
    }
    assert_eq!(
        result.artifact("builder_marker").unwrap().identifier.file_name(),
        "builder_marker.g.rs"
    );
}

#[test]
fn failing_builder_does_not_affect_the_others() {
    let broken = FakeType::new("crate::Broken")
        .member(FakeMember::settable("Value", "u8"))
        .member(FakeMember::settable("value", "u8"));
    let result = run(vec![
        FakeDeclaration::new(1, "A", "Broken", broken),
        FakeDeclaration::new(2, "A", "Fine", entity_type()),
    ]);

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, ErrorCode::BGN001);
    assert_eq!(
        result.diagnostics[0].message,
        "An error occurred while generating a builder for 'crate::Broken'"
    );
    assert!(result.artifact("A_Broken").is_none());
    assert!(result.artifact("A_Fine").is_some());
}

#[test]
fn inherited_members_are_settable() {
    let base = FakeType::new("crate::Base").member(FakeMember::settable("Created", "u64"));
    let derived = FakeType::new("crate::Derived")
        .member(FakeMember::settable("Id", "u64"))
        .with_base(base);
    let result = run(vec![FakeDeclaration::new(1, "", "DerivedBuilder", derived)]);

    let text = &result.artifact("DerivedBuilder").unwrap().text;
    assert!(text.contains("// namespace: (root)"));
    assert!(text.contains("pub fn with_created("));
    assert!(text.contains("pub fn with_id("));
}

#[test]
fn emit_options_reach_every_artifact() {
    let config = GeneratorConfig::sequential().with_emit_options(
        EmitOptions::default()
            .with_support_module("crate::support")
            .with_generator_version("v2"),
    );
    let result = Pipeline::new(config).run(&batch([FakeDeclaration::new(
        1,
        "model",
        "EntityBuilder",
        entity_type(),
    )]));

    let text = &result.artifact("model_EntityBuilder").unwrap().text;
    assert!(text.contains("crate::support::DomainRules<crate::model::Entity>"));
    assert!(text.contains("Generated by bgen v2."));
    for id in ["builder_marker", "domain_rules"] {
        let text = &result.artifact(id).unwrap().text;
        assert!(text.contains("Generated by bgen v2."), "{id}");
        assert!(!text.contains("Generated by bgen v1."), "{id}");
    }
}
