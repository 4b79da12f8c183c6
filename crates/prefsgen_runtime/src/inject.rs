//! Process-wide store provider used by classes generated with `use_injected_store`.
//!
//! An application installs one [`StoreContext`] at startup; generated constructors then call [`inject`] with their
//! store-file key instead of taking a context parameter.

use std::sync::OnceLock;

use thiserror::Error;

use crate::store::{PrefStore, StoreContext};

type Provider = Box<dyn StoreContext + Send + Sync>;

static PROVIDER: OnceLock<Provider> = OnceLock::new();

/// Errors from the injection registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    #[error("no store provider installed; call prefsgen_runtime::install_provider before constructing `{file_key}`")]
    NoProvider { file_key: String },
    #[error("a store provider is already installed")]
    AlreadyInstalled,
}

/// Install the process-wide store provider. Only the first call succeeds.
pub fn install_provider<C>(context: C) -> Result<(), InjectError>
where
    C: StoreContext + Send + Sync + 'static,
{
    PROVIDER
        .set(Box::new(context))
        .map_err(|_| InjectError::AlreadyInstalled)?;
    tracing::debug!("store provider installed");
    Ok(())
}

/// Open the store named by `file_key` through the installed provider.
pub fn inject(file_key: &str) -> Result<Box<dyn PrefStore>, InjectError> {
    let provider = PROVIDER.get().ok_or_else(|| InjectError::NoProvider {
        file_key: file_key.to_string(),
    })?;
    Ok(provider.open_store(file_key))
}
