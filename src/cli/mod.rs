//! CLI module for prefsgen
//!
//! ## Commands
//!
//! - `generate <FILES>... --out-dir DIR` - Generate and write settings implementations
//! - `check <FILES>...` - Collect schemas and print a summary with diagnostics
//! - `emit <FILE>` - Print generated source to stdout
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::version::PREFSGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic-carrying error through miette's report handler.
    pub fn report<E>(error: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(error)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate settings implementations from `#[prefs]` traits
#[derive(Parser, Debug)]
#[command(name = "prefsgen")]
#[command(version = PREFSGEN_VERSION)]
#[command(about = "Generate settings implementations from #[prefs] traits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by the commands that read several files.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Rust source files to scan for #[prefs] traits
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
    /// JSON declaration manifest (repeatable)
    #[arg(long = "manifest", value_name = "FILE")]
    pub manifests: Vec<PathBuf>,
    /// Package qualifying the storage keys
    #[arg(long, value_name = "PKG", default_value = commands::DEFAULT_PACKAGE)]
    pub package: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate settings implementations and write them to a directory
    Generate {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output directory
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,
        /// Path of the runtime crate in generated code
        #[arg(long, value_name = "PATH")]
        runtime_crate: Option<String>,
    },

    /// Collect schemas and print a summary without generating code
    Check {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Print the generated source for one file to stdout
    Emit {
        /// Rust source file to scan for #[prefs] traits
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Package qualifying the storage keys
        #[arg(long, value_name = "PKG", default_value = commands::DEFAULT_PACKAGE)]
        package: String,
        /// Path of the runtime crate in generated code
        #[arg(long, value_name = "PATH")]
        runtime_crate: Option<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            inputs,
            out_dir,
            runtime_crate,
        } => commands::generate(&inputs, &out_dir, runtime_crate.as_deref()),
        Command::Check { inputs } => commands::check(&inputs),
        Command::Emit {
            file,
            package,
            runtime_crate,
        } => commands::emit(&file, &package, runtime_crate.as_deref()),
    }
}

// ============================================================================
// Tests
// ============================================================================
