//! Batch generation facade
//!
//! This module provides [`Generator`], the entry point that runs declarations through the whole pipeline:
//!
//! ```text
//! Declaration → collect → ClassSchema → emit_schema → GeneratedUnit → render_unit → source
//! ```
//!
//! ## Error Handling
//!
//! A failure aborts only its own declaration. [`Generator::generate_batch`] keeps going and reports every failure in
//! [`BatchOutput::failures`] next to the units that did succeed.
//!
//! Output file names derive from the trait name alone, so two declarations named alike (in different modules, files
//! or packages) would write the same file. The first one wins; every later one fails with
//! [`GenerationError::DuplicateOutput`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prefsgen::backend::Generator;
//!
//! let output = Generator::new(config).generate_batch(&declarations);
//! for failure in &output.failures {
//!     eprintln!("{}: {}", failure.class, failure.error);
//! }
//! ```

use std::collections::HashSet;

use miette::Diagnostic;
use prefsgen_core::naming;
use thiserror::Error;

use super::ir::{EmitError, GeneratedUnit, emit_schema, render_unit};
use crate::config::GenerateConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::schema::{ClassSchema, Declaration, SchemaError, collect};

/// Error during generation of one declaration.
///
/// ## Examples
///
/// ```rust,ignore
/// match generator.generate_one(&declaration, &mut diagnostics) {
///     Ok(file) => println!("{}", file.source),
///     Err(GenerationError::Schema(e)) => eprintln!("schema error: {e}"),
///     Err(GenerationError::Emit(e)) => eprintln!("emission failed: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),

    #[error("`{class}` would overwrite `{file_name}`, which another declaration in this batch already generates")]
    #[diagnostic(
        code(prefsgen::generate::duplicate_output),
        help("settings traits must have distinct names across every input of one run")
    )]
    DuplicateOutput { class: String, file_name: String },
}

/// Rendered output for one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Declaration (trait) name.
    pub class: String,
    pub file_name: String,
    pub source: String,
    pub unit: GeneratedUnit,
}

/// A declaration that failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFailure {
    pub class: String,
    pub error: GenerationError,
}

/// Result of a batch: successful units, per-declaration failures and every warning raised.
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub units: Vec<GeneratedFile>,
    pub failures: Vec<DeclarationFailure>,
    pub warnings: Vec<Warning>,
}

impl BatchOutput {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of collecting schemas without emitting code.
#[derive(Debug, Clone, Default)]
pub struct CollectOutput {
    pub schemas: Vec<ClassSchema>,
    pub failures: Vec<DeclarationFailure>,
    pub warnings: Vec<Warning>,
}

/// Runs declarations through collection, emission and rendering.
///
/// The generator holds only the run-wide [`GenerateConfig`]; per-declaration options are resolved fresh inside each
/// call, so a batch never carries state from one declaration into the next.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GenerateConfig,
}

impl Generator {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Generate one declaration.
    ///
    /// ## Errors
    ///
    /// Returns `GenerationError::Schema` if collection fails, or `GenerationError::Emit` if lowering or rendering
    /// fails.
    pub fn generate_one(
        &self,
        declaration: &Declaration,
        diagnostics: &mut Diagnostics,
    ) -> Result<GeneratedFile, GenerationError> {
        let schema = collect(declaration, diagnostics)?;
        let unit = emit_schema(&schema)?;
        let source = render_unit(&unit, &self.config)?;
        Ok(GeneratedFile {
            class: declaration.name.clone(),
            file_name: unit.file_name.clone(),
            source,
            unit,
        })
    }

    /// Generate every declaration, isolating failures.
    #[tracing::instrument(skip_all, fields(declarations = declarations.len()))]
    pub fn generate_batch(&self, declarations: &[Declaration]) -> BatchOutput {
        let mut diagnostics = Diagnostics::new();
        let mut output = BatchOutput::default();
        let mut claimed = HashSet::new();
        for declaration in declarations {
            let generated = self.generate_one(declaration, &mut diagnostics).and_then(|file| {
                claim(&mut claimed, &declaration.name, &file.file_name)?;
                Ok(file)
            });
            match generated {
                Ok(file) => {
                    tracing::debug!(class = %file.class, file = %file.file_name, "generated");
                    output.units.push(file);
                }
                Err(error) => {
                    tracing::error!(class = %declaration.name, "{error}");
                    output.failures.push(DeclarationFailure {
                        class: declaration.name.clone(),
                        error,
                    });
                }
            }
        }
        output.warnings = diagnostics.into_warnings();
        output
    }

    /// Collect every declaration's schema without emitting code.
    #[tracing::instrument(skip_all, fields(declarations = declarations.len()))]
    pub fn collect_batch(&self, declarations: &[Declaration]) -> CollectOutput {
        let mut diagnostics = Diagnostics::new();
        let mut output = CollectOutput::default();
        let mut claimed = HashSet::new();
        for declaration in declarations {
            let collected = collect(declaration, &mut diagnostics)
                .map_err(GenerationError::from)
                .and_then(|schema| {
                    claim(&mut claimed, &declaration.name, &naming::output_file_name(&schema.class_name))?;
                    Ok(schema)
                });
            match collected {
                Ok(schema) => output.schemas.push(schema),
                Err(error) => output.failures.push(DeclarationFailure {
                    class: declaration.name.clone(),
                    error,
                }),
            }
        }
        output.warnings = diagnostics.into_warnings();
        output
    }
}

/// Reserve `file_name` for `class`, failing if an earlier declaration of the batch already produced it.
fn claim(claimed: &mut HashSet<String>, class: &str, file_name: &str) -> Result<(), GenerationError> {
    if claimed.insert(file_name.to_string()) {
        Ok(())
    } else {
        Err(GenerationError::DuplicateOutput {
            class: class.to_string(),
            file_name: file_name.to_string(),
        })
    }
}
