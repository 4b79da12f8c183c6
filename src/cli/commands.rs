//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use crate::backend::{BatchOutput, DeclarationFailure, Generator, write_units};
use crate::config::GenerateConfig;
use crate::diagnostics::Warning;
use crate::frontend::{Discovered, discover_file, discover_inputs};
use crate::schema::Declaration;

use super::{CliError, CliResult, ExitCode, InputArgs};

/// Package used when `--package` is not given.
pub const DEFAULT_PACKAGE: &str = "app";

fn config(package: &str, runtime_crate: Option<&str>) -> GenerateConfig {
    let config = GenerateConfig::new().with_package(package);
    match runtime_crate {
        Some(path) => config.with_runtime_crate(path),
        None => config,
    }
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{warning}");
    }
}

fn print_failures(failures: &[DeclarationFailure]) {
    for failure in failures {
        eprintln!("{:?}", miette::Report::new(failure.error.clone()));
    }
}

/// Discover every input, printing the ones that could not be read.
///
/// ## Returns
/// - the declarations found, and the number of unreadable inputs.
fn discover(inputs: &InputArgs) -> (Vec<Declaration>, usize) {
    let Discovered { declarations, errors } = discover_inputs(&inputs.files, &inputs.manifests, &inputs.package);
    let unreadable = errors.len();
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }
    (declarations, unreadable)
}

fn exit_code(unreadable: usize, failures: &[DeclarationFailure]) -> ExitCode {
    if unreadable == 0 && failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Discover, generate and write every declaration.
///
/// Successful declarations are written even when other declarations or inputs fail; the exit code is then 1.
pub fn generate(inputs: &InputArgs, out_dir: &Path, runtime_crate: Option<&str>) -> CliResult<ExitCode> {
    if inputs.files.is_empty() && inputs.manifests.is_empty() {
        return Err(CliError::failure("Error: no input files given"));
    }
    let (declarations, unreadable) = discover(inputs);

    let BatchOutput {
        units,
        failures,
        warnings,
    } = Generator::new(config(&inputs.package, runtime_crate)).generate_batch(&declarations);
    print_warnings(&warnings);
    print_failures(&failures);

    let written = write_units(out_dir, &units).map_err(CliError::report)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    println!(
        "{} generated, {} failed, {} unreadable input(s)",
        written.len(),
        failures.len(),
        unreadable
    );
    Ok(exit_code(unreadable, &failures))
}

/// Collect every declaration and print its schema summary.
pub fn check(inputs: &InputArgs) -> CliResult<ExitCode> {
    let (declarations, unreadable) = discover(inputs);
    let output = Generator::new(config(&inputs.package, None)).collect_batch(&declarations);
    for schema in &output.schemas {
        println!("{schema}");
    }
    print_warnings(&output.warnings);
    print_failures(&output.failures);
    Ok(exit_code(unreadable, &output.failures))
}

/// Print the generated source of every declaration in one file.
pub fn emit(file: &Path, package: &str, runtime_crate: Option<&str>) -> CliResult<ExitCode> {
    let declarations = discover_file(file, package).map_err(CliError::report)?;
    if declarations.is_empty() {
        return Err(CliError::failure(format!(
            "Error: no #[prefs] traits found in {}",
            file.display()
        )));
    }
    let output = Generator::new(config(package, runtime_crate)).generate_batch(&declarations);
    for unit in &output.units {
        println!("// {}", unit.file_name);
        print!("{}", unit.source);
    }
    print_warnings(&output.warnings);
    print_failures(&output.failures);
    Ok(exit_code(0, &output.failures))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn inputs(files: Vec<PathBuf>) -> InputArgs {
        InputArgs {
            files,
            manifests: Vec::new(),
            package: "com.example".to_string(),
        }
    }

    #[test]
    fn generate_writes_files_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("settings.rs");
        fs::write(
            &input,
            "#[prefs] trait Good { fn count(&self) -> i32; }\n#[prefs] trait Bad { fn tags(&self) -> Vec<String>; }\n",
        )
        .unwrap();
        let out = dir.path().join("generated");

        let code = generate(&inputs(vec![input]), &out, None).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.join("good_prefs.rs").exists());
        assert!(!out.join("bad_prefs.rs").exists());
    }

    #[test]
    fn generate_skips_unreadable_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.rs");
        let bad = dir.path().join("bad.rs");
        fs::write(&good, "#[prefs] trait Good { fn count(&self) -> i32; }\n").unwrap();
        fs::write(&bad, "#[prefs] trait Bad { #[retain(always)] fn token(&self) -> String; }\n").unwrap();
        let out = dir.path().join("generated");

        let code = generate(&inputs(vec![bad, good]), &out, None).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.join("good_prefs.rs").exists());
        assert!(!out.join("bad_prefs.rs").exists());
    }

    #[test]
    fn generate_without_inputs_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&inputs(Vec::new()), dir.path(), None).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn emit_rejects_files_without_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.rs");
        fs::write(&input, "fn main() {}\n").unwrap();
        assert!(emit(&input, "p", None).is_err());
    }
}
