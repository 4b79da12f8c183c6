//! Write generated units to an output directory.
//!
//! Each file is written to a temporary sibling, flushed, and renamed over the target, so a failed write never leaves
//! a half-written `.rs` file behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use super::codegen::GeneratedFile;

#[derive(Debug, Error, Diagnostic)]
pub enum OutputError {
    #[error("failed to create output directory {}", path.display())]
    #[diagnostic(code(prefsgen::output::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(prefsgen::output::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write every file into `out_dir`, creating the directory if needed.
///
/// ## Returns
/// - (`Vec<PathBuf>`): the written paths, in input order.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.display(), files = files.len()))]
pub fn write_units(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(out_dir).map_err(|source| OutputError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.file_name);
        write_atomic(&path, file.source.as_bytes()).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote");
        written.push(path);
    }
    Ok(written)
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = write_and_sync(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_sync(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
