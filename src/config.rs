//! Generation configuration.
//!
//! Built by the CLI from its flags and by [`Builder`](crate::builder::Builder) from build-script settings.

/// Default path of the runtime crate in generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "::prefsgen_runtime";

/// Settings shared by every declaration in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Package used for declarations whose source does not name one.
    pub package: String,
    /// Path generated code uses for the runtime crate.
    pub runtime_crate: String,
    /// Prepend the `@generated` header comment.
    pub header: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            header: true,
        }
    }
}

impl GenerateConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback package
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the runtime crate path (for example `crate::prefs` when the runtime is re-exported)
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Enable or disable the `@generated` header
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}
