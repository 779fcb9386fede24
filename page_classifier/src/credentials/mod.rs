//! Credential persistence behind a small key-value interface.
//!
//! The classifier never reads a store itself; front ends resolve the key and
//! hand it to [`crate::OpenRouterBackend::classify`].

mod confy_store;
mod memory;

pub use confy_store::ConfyStore;
pub use memory::MemoryStore;

use secrecy::{ExposeSecret, Secret};
use std::path::PathBuf;

/// Storage key holding the OpenRouter API key.
pub const CREDENTIAL_KEY: &str = "openRouterApiKey";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential is empty")]
    EmptyCredential,
    #[error("{operation} failed for '{path}': {reason}")]
    Persist {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn persist(
        operation: &'static str,
        path: impl Into<PathBuf>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Persist {
            operation,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The single stored credential, kept under [`CREDENTIAL_KEY`].
#[derive(Debug, Clone)]
pub struct CredentialStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved credential. Blank stored values read as absent.
    pub fn load(&self) -> Result<Option<Secret<String>>, StoreError> {
        Ok(self
            .store
            .get(CREDENTIAL_KEY)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(Secret::new))
    }

    /// Trims and persists `input`, replacing any previous credential.
    pub fn save(&mut self, input: &str) -> Result<(), StoreError> {
        let credential = Secret::new(input.trim().to_string());
        if credential.expose_secret().is_empty() {
            return Err(StoreError::EmptyCredential);
        }
        self.store.set(CREDENTIAL_KEY, credential.expose_secret())?;
        crate::debug!("Saved credential under {CREDENTIAL_KEY}");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
