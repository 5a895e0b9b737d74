//! Emission options.

/// Name written into every generated banner.
pub const GENERATOR_NAME: &str = "bgen";
/// Version written into every generated banner.
pub const GENERATOR_VERSION: &str = "v1";
/// Module path generated builders use to reach the support artifact.
pub const DEFAULT_SUPPORT_MODULE: &str = "crate::bgen_support";

/// Settings shared by every emission of a pipeline.
///
/// Fixed for the lifetime of a pipeline; cached emission output is only valid
/// for the options it was produced with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmitOptions {
    /// Generator name in the banner.
    pub generator_name: String,
    /// Generator version in the banner.
    pub generator_version: String,
    /// Path of the module the `domain_rules` artifact is included into.
    pub support_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            generator_name: GENERATOR_NAME.to_string(),
            generator_version: GENERATOR_VERSION.to_string(),
            support_module: DEFAULT_SUPPORT_MODULE.to_string(),
        }
    }
}

impl EmitOptions {
    /// Use a different support module path.
    #[must_use]
    pub fn with_support_module(mut self, path: impl Into<String>) -> Self {
        self.support_module = path.into();
        self
    }

    /// Use a different generator version in banners.
    #[must_use]
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = version.into();
        self
    }

    /// First line of the banner body.
    pub fn banner(&self) -> String {
        format!(
            "//     Generated by {} {}. Changes to this file will be lost when it is regenerated.",
            self.generator_name, self.generator_version
        )
    }
}
