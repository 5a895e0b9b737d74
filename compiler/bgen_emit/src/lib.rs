//! bgen emission engine.
//!
//! Turns a `BuilderSpec` into Rust source text. Emission is a pure function
//! of the spec and the `EmitOptions`: value-equal specs produce byte-identical
//! text on every run and every machine.
//!
//! # Architecture
//!
//! ```text
//! BuilderSpec ──→ BuilderPlan (validate + resolve identifiers)
//!                     │
//!                     ├── estimate_capacity() ──→ StringEmitter::with_capacity
//!                     ↓
//!               SourceWriter sections ──→ String
//! ```
//!
//! Besides per-builder text, two artifacts are produced once per run: the
//! `BuilderFor` marker trait and the runtime support module that generated
//! builders call into (`Producer`, `DomainRules`, `RuleViolation`).

pub mod builder;
pub mod capacity;
pub mod emitter;
mod error;
pub mod ident;
mod options;

/// Runtime support compiled into the host crate.
///
/// The same file is the text of the `domain_rules` artifact, so the code
/// tested here is exactly the code generated builders run against.
pub mod support;

pub use builder::{emit_builder, emit_builder_marker};
pub use capacity::estimate_capacity;
pub use emitter::{Emitter, SourceWriter, StringEmitter};
pub use error::EmitError;
pub use options::{EmitOptions, DEFAULT_SUPPORT_MODULE, GENERATOR_NAME, GENERATOR_VERSION};

/// Artifact identifier of the marker trait declaration.
pub const BUILDER_MARKER_ID: &str = "builder_marker";
/// Artifact identifier of the runtime support module.
pub const DOMAIN_RULES_ID: &str = "domain_rules";

/// Source text of the runtime support module.
pub fn domain_rules_source() -> &'static str {
    include_str!("support.rs")
}

/// Text of the `domain_rules` artifact: the support module with the banner
/// of `options`.
pub fn emit_domain_rules(options: &EmitOptions) -> String {
    domain_rules_source().replacen(&EmitOptions::default().banner(), &options.banner(), 1)
}
