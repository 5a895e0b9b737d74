//! The generator pipeline.
//!
//! ```text
//! [Arc<dyn DeclarationSymbol>]
//!        │  InitialExtraction   (TrackedStage, key DeclarationId)
//!        ↓
//!   BuilderSpec per fragment ──group by BuilderKey, sort──→ EqSeq<BuilderSpec>
//!        │  MergingFragments    (MemoStage, key BuilderKey)
//!        ↓
//!   MergedBuilder ──→ ArtifactNameResolver
//!        │  Emission            (MemoStage, key BuilderKey)
//!        ↓
//!   EmitOutcome ──→ artifacts + diagnostics + OutputChanges
//! ```
//!
//! A `Pipeline` lives as long as the host session and is run once per change
//! batch. Its stages keep their caches between runs, so an unchanged
//! declaration costs one extraction and two lookups.

use std::collections::BTreeMap;
use std::sync::Arc;

use bgen_diagnostic::{Diagnostic, ErrorCode};
use bgen_emit::{
    emit_builder, emit_builder_marker, emit_domain_rules, EmitOptions, BUILDER_MARKER_ID,
    DOMAIN_RULES_ID,
};
use bgen_ir::{
    ArtifactId, BuilderKey, BuilderSpec, DeclarationId, EqSeq, GeneratedArtifact, Shape,
    Structural,
};
use rustc_hash::FxHashSet;

use crate::extract::extract_builder;
use crate::merge::{merge_fragments, MergedBuilder};
use crate::naming::{ArtifactNameResolver, NameCollision, Resolution};
use crate::stage::{MemoStage, Scheduler, StageName, StageReport, TrackedStage};
use crate::symbols::DeclarationSymbol;
use crate::{CancellationFlag, GeneratorConfig};

/// Result of emitting one builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmitOutcome {
    Generated(String),
    Failed(Diagnostic),
}

impl EmitOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            EmitOutcome::Generated(text) => Some(text),
            EmitOutcome::Failed(_) => None,
        }
    }
}

impl Structural for EmitOutcome {
    fn shape(&self) -> Shape {
        match self {
            EmitOutcome::Generated(text) => Shape::Enum {
                name: "EmitOutcome",
                variant: "Generated",
                fields: vec![("0", text.shape())],
            },
            EmitOutcome::Failed(diagnostic) => Shape::Enum {
                name: "EmitOutcome",
                variant: "Failed",
                fields: vec![("0", diagnostic.shape())],
            },
        }
    }
}

/// Artifact identifiers that differ from the previous completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputChanges {
    pub added: Vec<ArtifactId>,
    pub removed: Vec<ArtifactId>,
    /// Same identifier, different text.
    pub changed: Vec<ArtifactId>,
}

impl OutputChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    fn between(previous: &BTreeMap<ArtifactId, String>, current: &[GeneratedArtifact]) -> Self {
        let mut changes = OutputChanges::default();
        let mut seen: FxHashSet<&ArtifactId> = FxHashSet::default();

        for artifact in current {
            seen.insert(&artifact.identifier);
            match previous.get(&artifact.identifier) {
                None => changes.added.push(artifact.identifier.clone()),
                Some(text) if *text != artifact.text => {
                    changes.changed.push(artifact.identifier.clone());
                }
                Some(_) => {}
            }
        }
        changes.removed = previous
            .keys()
            .filter(|id| !seen.contains(id))
            .cloned()
            .collect();
        changes
    }
}

/// Everything one run produced.
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Support artifacts and one artifact per emitted builder, sorted by id.
    pub artifacts: Vec<GeneratedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
    pub extraction: StageReport<DeclarationId, BuilderSpec>,
    pub merge: StageReport<BuilderKey, MergedBuilder>,
    pub emission: StageReport<BuilderKey, EmitOutcome>,
    /// Empty for a cancelled run.
    pub changes: OutputChanges,
    pub cancelled: bool,
}

impl RunResult {
    pub fn artifact(&self, identifier: &str) -> Option<&GeneratedArtifact> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.identifier.as_str() == identifier)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Incremental builder generator.
pub struct Pipeline {
    config: GeneratorConfig,
    pool: Option<rayon::ThreadPool>,
    resolver: ArtifactNameResolver,
    support: [GeneratedArtifact; 2],
    extraction: TrackedStage<DeclarationId, BuilderSpec>,
    merge: MemoStage<BuilderKey, EqSeq<BuilderSpec>, MergedBuilder>,
    emission: MemoStage<BuilderKey, BuilderSpec, EmitOutcome>,
    previous_artifacts: BTreeMap<ArtifactId, String>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: GeneratorConfig) -> Self {
        let pool = build_pool(&config);
        let support = [
            GeneratedArtifact::new(
                ArtifactId::new(BUILDER_MARKER_ID),
                emit_builder_marker(&config.emit),
            ),
            GeneratedArtifact::new(
                ArtifactId::new(DOMAIN_RULES_ID),
                emit_domain_rules(&config.emit),
            ),
        ];

        Pipeline {
            config,
            pool,
            resolver: ArtifactNameResolver::new(),
            support,
            extraction: TrackedStage::new(StageName::InitialExtraction),
            merge: MemoStage::new(StageName::MergingFragments),
            emission: MemoStage::new(StageName::Emission),
            previous_artifacts: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run on the current declaration batch.
    pub fn run(&mut self, declarations: &[Arc<dyn DeclarationSymbol>]) -> RunResult {
        self.run_with_cancellation(declarations, &CancellationFlag::new())
    }

    /// Run on the current declaration batch, stopping early once `cancel` is set.
    pub fn run_with_cancellation(
        &mut self,
        declarations: &[Arc<dyn DeclarationSymbol>],
        cancel: &CancellationFlag,
    ) -> RunResult {
        let scheduler = Scheduler::new(self.pool.as_ref(), cancel);

        let extraction = run_extraction(&mut self.extraction, declarations, scheduler);
        let merge = run_merge(&mut self.merge, &extraction, scheduler);
        let resolution = self.resolver.resolve(merge.live().map(|output| &output.key));
        let emission = run_emission(&mut self.emission, &merge, &self.config.emit, scheduler);

        let cancelled = !(extraction.complete && merge.complete && emission.complete);

        let mut artifacts: Vec<GeneratedArtifact> = self.support.to_vec();
        for output in emission.live() {
            let (EmitOutcome::Generated(text), Some(identifier)) =
                (&output.value, resolution.get(&output.key))
            else {
                continue;
            };
            artifacts.push(GeneratedArtifact::new(identifier.clone(), text.clone()));
        }
        artifacts.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        let diagnostics = collect_diagnostics(&merge, &resolution, &emission);

        let changes = if cancelled {
            tracing::debug!("run cancelled; caches kept, no changes reported");
            OutputChanges::default()
        } else {
            let changes = OutputChanges::between(&self.previous_artifacts, &artifacts);
            self.previous_artifacts = artifacts
                .iter()
                .map(|artifact| (artifact.identifier.clone(), artifact.text.clone()))
                .collect();
            changes
        };

        tracing::debug!(
            declarations = declarations.len(),
            artifacts = artifacts.len(),
            diagnostics = diagnostics.len(),
            added = changes.added.len(),
            removed = changes.removed.len(),
            changed = changes.changed.len(),
            cancelled,
            "run finished"
        );

        RunResult {
            artifacts,
            diagnostics,
            extraction,
            merge,
            emission,
            changes,
            cancelled,
        }
    }
}

fn build_pool(config: &GeneratorConfig) -> Option<rayon::ThreadPool> {
    if !config.parallel {
        return None;
    }
    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            None
        }
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(count = declarations.len()))]
fn run_extraction(
    stage: &mut TrackedStage<DeclarationId, BuilderSpec>,
    declarations: &[Arc<dyn DeclarationSymbol>],
    scheduler: Scheduler<'_>,
) -> StageReport<DeclarationId, BuilderSpec> {
    let mut ids: FxHashSet<DeclarationId> = FxHashSet::default();
    let mut items = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        let id = declaration.id();
        if ids.insert(id) {
            items.push((id, Arc::clone(declaration)));
        } else {
            tracing::debug!(declaration = %id, "duplicate declaration id; keeping the first");
        }
    }

    stage.run(&items, scheduler, |declaration: &Arc<dyn DeclarationSymbol>| {
        extract_builder(declaration.as_ref())
    })
}

#[tracing::instrument(level = "debug", skip_all)]
fn run_merge(
    stage: &mut MemoStage<BuilderKey, EqSeq<BuilderSpec>, MergedBuilder>,
    extraction: &StageReport<DeclarationId, BuilderSpec>,
    scheduler: Scheduler<'_>,
) -> StageReport<BuilderKey, MergedBuilder> {
    let mut groups: BTreeMap<BuilderKey, Vec<BuilderSpec>> = BTreeMap::new();
    for output in extraction.live() {
        groups
            .entry(output.value.key())
            .or_default()
            .push(output.value.clone());
    }

    let items: Vec<(BuilderKey, EqSeq<BuilderSpec>)> = groups
        .into_iter()
        .map(|(key, mut fragments)| {
            fragments.sort();
            (key, fragments.into())
        })
        .collect();

    stage.run(&items, scheduler, merge_fragments)
}

#[tracing::instrument(level = "debug", skip_all)]
fn run_emission(
    stage: &mut MemoStage<BuilderKey, BuilderSpec, EmitOutcome>,
    merge: &StageReport<BuilderKey, MergedBuilder>,
    options: &EmitOptions,
    scheduler: Scheduler<'_>,
) -> StageReport<BuilderKey, EmitOutcome> {
    let items: Vec<(BuilderKey, BuilderSpec)> = merge
        .live()
        .map(|output| (output.key.clone(), output.value.spec.clone()))
        .collect();

    stage.run(&items, scheduler, |spec: &BuilderSpec| emit(spec, options))
}

fn emit(spec: &BuilderSpec, options: &EmitOptions) -> EmitOutcome {
    match emit_builder(spec, options) {
        Ok(text) => EmitOutcome::Generated(text),
        Err(error) => {
            tracing::debug!(builder = %spec.key(), error = %error, "emission failed");
            EmitOutcome::Failed(
                Diagnostic::error(ErrorCode::BGN001)
                    .with_message(format!(
                        "An error occurred while generating a builder for '{}'",
                        spec.target_type_full_name()
                    ))
                    .with_note(error.to_string()),
            )
        }
    }
}

fn collect_diagnostics(
    merge: &StageReport<BuilderKey, MergedBuilder>,
    resolution: &Resolution,
    emission: &StageReport<BuilderKey, EmitOutcome>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for output in merge.live().filter(|output| output.value.has_conflicts()) {
        let mut diagnostic = Diagnostic::warning(ErrorCode::BGN002).with_message(format!(
            "fragments of builder '{}' name different target types; using '{}'",
            output.key,
            output.value.spec.target_type_full_name()
        ));
        for ignored in &output.value.conflicting_targets {
            diagnostic = diagnostic.with_note(format!("ignored target '{ignored}'"));
        }
        diagnostics.push(diagnostic);
    }

    diagnostics.extend(resolution.collisions.iter().map(collision_diagnostic));

    for output in emission.live() {
        if let EmitOutcome::Failed(diagnostic) = &output.value {
            diagnostics.push(diagnostic.clone());
        }
    }

    diagnostics
}

fn collision_diagnostic(collision: &NameCollision) -> Diagnostic {
    let holder = match &collision.holder {
        Some(key) => format!("builder '{key}'"),
        None => "a support artifact".to_string(),
    };
    Diagnostic::warning(ErrorCode::BGN003)
        .with_message(format!(
            "builder '{}' maps to artifact '{}', already used by {holder}",
            collision.key, collision.base
        ))
        .with_note(format!("generated as '{}'", collision.assigned))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
