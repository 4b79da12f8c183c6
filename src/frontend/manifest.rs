//! JSON declaration manifests.
//!
//! A manifest lists declarations explicitly, for inputs that are not Rust source:
//!
//! ```json
//! {
//!   "package": "com.example",
//!   "declarations": [
//!     { "name": "AppSettings", "members": [
//!       { "name": "unit_id", "markers": [{ "kind": "default", "value": "unit102" }],
//!         "signature": { "receiver": "ref", "return_type": "String" } }
//!     ] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DiscoveryError;
use crate::schema::Declaration;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Package applied to declarations that do not name their own.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// Parse manifest text into declarations.
///
/// Declarations with an empty package take the manifest's `package`, or `default_package` when the manifest has
/// none.
pub fn parse_manifest(text: &str, origin: &Path, default_package: &str) -> Result<Vec<Declaration>, DiscoveryError> {
    let manifest: Manifest = serde_json::from_str(text).map_err(|source| DiscoveryError::Manifest {
        path: origin.to_path_buf(),
        source,
    })?;
    let package = manifest.package.as_deref().unwrap_or(default_package).to_string();
    let declarations = manifest
        .declarations
        .into_iter()
        .map(|mut declaration| {
            if declaration.package.is_empty() {
                declaration.package = package.clone();
            }
            declaration
        })
        .collect();
    Ok(declarations)
}

pub fn load_manifest(path: &Path, default_package: &str) -> Result<Vec<Declaration>, DiscoveryError> {
    let text = fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&text, path, default_package)
}
