//! Build-script integration.
//!
//! ```rust,ignore
//! // build.rs
//! fn main() {
//!     prefsgen::Builder::new()
//!         .file("src/settings.rs")
//!         .compile()
//!         .expect("settings generation failed");
//! }
//!
//! // src/settings.rs (after the trait)
//! include!(concat!(env!("OUT_DIR"), "/app_settings_prefs.rs"));
//! ```

use std::env;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::backend::{DeclarationFailure, Generator, OutputError, write_units};
use crate::config::GenerateConfig;
use crate::frontend::{DiscoveryError, discover_inputs};

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("environment variable `{0}` is not set")]
    #[diagnostic(
        code(prefsgen::build::missing_env),
        help("outside a build script, set the value explicitly with `Builder::out_dir` or `Builder::package`")
    )]
    MissingEnv(&'static str),

    #[error("{} input(s) could not be read: {}", errors.len(), failed_inputs(errors))]
    #[diagnostic(code(prefsgen::build::discovery))]
    Discovery {
        #[related]
        errors: Vec<DiscoveryError>,
    },

    #[error("{} declaration(s) failed: {}", failures.len(), failed_classes(failures))]
    #[diagnostic(code(prefsgen::build::generation))]
    Generation { failures: Vec<DeclarationFailure> },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] OutputError),
}

fn failed_inputs(errors: &[DiscoveryError]) -> String {
    errors
        .iter()
        .map(|e| e.path().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn failed_classes(failures: &[DeclarationFailure]) -> String {
    failures.iter().map(|f| f.class.as_str()).collect::<Vec<_>>().join(", ")
}

/// Generates settings implementations from a build script.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    files: Vec<PathBuf>,
    manifests: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    package: Option<String>,
    runtime_crate: Option<String>,
    emit_cargo_directives: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            emit_cargo_directives: true,
            ..Self::default()
        }
    }

    /// Add a Rust source file to scan for `#[prefs]` traits.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add a JSON declaration manifest.
    pub fn manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifests.push(path.into());
        self
    }

    /// Output directory. Defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Package qualifying the storage keys. Defaults to `$CARGO_PKG_NAME`.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Path of the runtime crate in generated code.
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = Some(path.into());
        self
    }

    /// Print `cargo:` directives (rerun triggers and warnings). On by default.
    pub fn cargo_directives(mut self, enabled: bool) -> Self {
        self.emit_cargo_directives = enabled;
        self
    }

    /// Discover, generate and write every declaration.
    ///
    /// Successful declarations are written even when other declarations or whole inputs fail. Unreadable inputs are
    /// then returned as [`BuildError::Discovery`]; otherwise failed declarations are returned as
    /// [`BuildError::Generation`].
    ///
    /// ## Returns
    /// - (`Vec<PathBuf>`): the written files.
    pub fn compile(self) -> Result<Vec<PathBuf>, BuildError> {
        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env::var_os("OUT_DIR")
                .map(PathBuf::from)
                .ok_or(BuildError::MissingEnv("OUT_DIR"))?,
        };
        let package = match self.package {
            Some(package) => package,
            None => env::var("CARGO_PKG_NAME").map_err(|_| BuildError::MissingEnv("CARGO_PKG_NAME"))?,
        };

        if self.emit_cargo_directives {
            for path in self.files.iter().chain(&self.manifests) {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }

        let discovered = discover_inputs(&self.files, &self.manifests, &package);
        let mut config = GenerateConfig::new().with_package(package);
        if let Some(runtime) = self.runtime_crate {
            config = config.with_runtime_crate(runtime);
        }

        let output = Generator::new(config).generate_batch(&discovered.declarations);
        if self.emit_cargo_directives {
            for warning in &output.warnings {
                println!("cargo:warning={warning}");
            }
            if !discovered.is_complete() {
                for failure in &output.failures {
                    println!("cargo:warning={}: {}", failure.class, failure.error);
                }
            }
        }
        let written = write_units(&out_dir, &output.units)?;
        if !discovered.is_complete() {
            Err(BuildError::Discovery {
                errors: discovered.errors,
            })
        } else if !output.failures.is_empty() {
            Err(BuildError::Generation {
                failures: output.failures,
            })
        } else {
            Ok(written)
        }
    }
}
