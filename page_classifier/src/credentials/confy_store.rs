use super::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const CONFY_APP_NAME: &str = "page_classifier";
pub const CONFY_CONFIG_NAME: &str = "credentials";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredValues {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// TOML file store managed by `confy`.
///
/// The file is created with an empty table on first access.
#[derive(Debug, Clone)]
pub struct ConfyStore {
    path: PathBuf,
}

impl ConfyStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The per-user location confy derives for this app.
    pub fn user_default() -> Result<Self, StoreError> {
        let path = confy::get_configuration_file_path(CONFY_APP_NAME, CONFY_CONFIG_NAME)
            .map_err(|e| StoreError::persist("resolving configuration path", "confy derives path", e))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_values(&self) -> Result<StoredValues, StoreError> {
        confy::load_path(&self.path)
            .map_err(|e| StoreError::persist("loading confy configuration file", &self.path, e))
    }
}

impl KeyValueStore for ConfyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load_values()?.values.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut stored = self.load_values()?;
        stored.values.insert(key.to_string(), value.to_string());
        confy::store_path(&self.path, &stored)
            .map_err(|e| StoreError::persist("saving confy configuration file", &self.path, e))?;
        restrict_to_owner(&self.path)
            .map_err(|e| StoreError::persist("restricting credential file permissions", &self.path, e))
    }
}

/// The file holds an API key: owner read/write only.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
