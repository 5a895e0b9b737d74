//! Pipeline configuration.

use bgen_emit::EmitOptions;

/// How a `Pipeline` schedules work and what it stamps into generated text.
///
/// Fixed for the lifetime of a pipeline: the emission memo is keyed by spec
/// only, so changing options would require a fresh pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Run per-item stage work on a rayon pool.
    pub parallel: bool,
    /// Worker threads; `0` lets rayon choose.
    pub threads: usize,
    pub emit: EmitOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            parallel: true,
            threads: 0,
            emit: EmitOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Single-threaded configuration.
    pub fn sequential() -> Self {
        GeneratorConfig {
            parallel: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_emit_options(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }
}
