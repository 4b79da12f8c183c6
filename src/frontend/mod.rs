//! Declaration frontends.
//!
//! Frontends turn input files into [`Declaration`](crate::schema::Declaration) tuples. Two are provided:
//!
//! - `source` - Rust source files containing `#[prefs]` traits (parsed with `syn`)
//! - `manifest` - JSON manifests listing declarations explicitly
//!
//! Both report failures as [`DiscoveryError`].

pub mod manifest;
pub mod source;

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::schema::Declaration;

pub use manifest::{Manifest, load_manifest, parse_manifest};
pub use source::{discover_file, parse_declarations};

/// Declarations found across a set of inputs, plus the inputs that could not be read.
#[derive(Debug, Default)]
pub struct Discovered {
    pub declarations: Vec<Declaration>,
    pub errors: Vec<DiscoveryError>,
}

impl Discovered {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read every Rust file, then every manifest, and return all declarations in that order.
///
/// An input that cannot be read or holds a malformed marker is recorded in [`Discovered::errors`]; declarations from
/// the other inputs are still returned.
#[tracing::instrument(skip_all, fields(files = files.len(), manifests = manifests.len()))]
pub fn discover_inputs(files: &[PathBuf], manifests: &[PathBuf], package: &str) -> Discovered {
    let results = files
        .iter()
        .map(|file| discover_file(file, package))
        .chain(manifests.iter().map(|path| load_manifest(path, package)));
    let mut discovered = Discovered::default();
    for result in results {
        match result {
            Ok(found) => discovered.declarations.extend(found),
            Err(err) => {
                tracing::error!(path = %err.path().display(), "{err}");
                discovered.errors.push(err);
            }
        }
    }
    discovered
}

impl DiscoveryError {
    /// Input file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            DiscoveryError::Io { path, .. }
            | DiscoveryError::Parse { path, .. }
            | DiscoveryError::Marker { path, .. }
            | DiscoveryError::Manifest { path, .. } => path,
        }
    }
}

/// Error while reading declarations from an input file.
#[derive(Debug, Error, Diagnostic)]
pub enum DiscoveryError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(prefsgen::discovery::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    #[diagnostic(code(prefsgen::discovery::parse))]
    Parse { path: PathBuf, message: String },

    #[error("malformed marker on `{item}` in {}: {message}", path.display())]
    #[diagnostic(
        code(prefsgen::discovery::marker),
        help("markers are #[prefs(..)], #[default(..)], #[pref(default = .., test = ..)], #[retain] and #[on_reset]")
    )]
    Marker {
        path: PathBuf,
        item: String,
        message: String,
    },

    #[error("invalid manifest {}", path.display())]
    #[diagnostic(code(prefsgen::discovery::manifest))]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unreadable_inputs_do_not_hide_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.rs");
        let bad = dir.path().join("bad.rs");
        let manifest = dir.path().join("settings.json");
        fs::write(&good, "#[prefs] trait Good { fn count(&self) -> i32; }").unwrap();
        fs::write(&bad, "#[prefs(use_registry = true)] trait Bad { fn count(&self) -> i32; }").unwrap();
        fs::write(&manifest, r#"{ "declarations": [{ "name": "Listed", "members": [] }] }"#).unwrap();
        let missing = dir.path().join("missing.rs");

        let discovered = discover_inputs(&[good, bad.clone(), missing.clone()], &[manifest], "p");

        let names: Vec<&str> = discovered.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Listed"]);
        assert!(!discovered.is_complete());
        let failed: Vec<&Path> = discovered.errors.iter().map(DiscoveryError::path).collect();
        assert_eq!(failed, vec![bad.as_path(), missing.as_path()]);
        assert!(matches!(discovered.errors[0], DiscoveryError::Marker { .. }));
        assert!(matches!(discovered.errors[1], DiscoveryError::Io { .. }));
    }
}
