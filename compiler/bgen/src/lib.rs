//! bgen: incremental builder generation.
//!
//! Turns builder declarations discovered by a semantic front-end into Rust
//! builder source, re-doing as little work as possible between runs.
//!
//! # Architecture
//!
//! ```text
//! front-end ──symbols──→ extract ──→ merge ──→ naming ──→ emit (bgen_emit)
//!                          │           │                    │
//!                          └───────────┴── stage caches ────┘
//! ```
//!
//! - [`symbols`]: the provider contract; live, non-comparable objects
//! - [`extract`]: the only code that reads provider objects
//! - [`merge`]: fragments of one builder become one spec
//! - [`naming`]: collision-free artifact identifiers
//! - [`stage`]: memoized, cancellable, optionally parallel stages
//! - [`pipeline`]: wires the stages together and reports what changed
//!
//! # Usage
//!
//! ```ignore
//! let mut pipeline = Pipeline::new(GeneratorConfig::default());
//! let result = pipeline.run(&declarations);
//! for artifact in &result.artifacts {
//!     host.write(artifact.identifier.file_name(), &artifact.text);
//! }
//! ```

mod cancel;
mod config;
pub mod extract;
pub mod merge;
pub mod naming;
pub mod pipeline;
pub mod stage;
pub mod symbols;
pub mod testing;

pub use cancel::CancellationFlag;
pub use config::GeneratorConfig;
pub use pipeline::{EmitOutcome, OutputChanges, Pipeline, RunResult};
pub use stage::{StageName, StageReport, StepReason, TrackedOutput};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=bgen=debug` or `RUST_LOG=bgen=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
