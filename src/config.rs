use crate::{error::RoamError, paths::expand_home};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

/// Default location of the org-roam database, `(org-roam-db-location)`.
pub const DEFAULT_DB_PATH: &str = "~/.emacs.d/org-roam.db";

/// Settings for the `roam` CLI, stored as TOML:
///
/// ```toml
/// db_path = "~/.config/emacs/.local/cache/org-roam.db"
/// exclude_tags = ["reference", "lecture"]
/// remove_orphans = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoamConfig {
    pub db_path: String,
    /// Tags removed from every collection the CLI loads
    pub exclude_tags: BTreeSet<String>,
    pub remove_orphans: bool,
}

impl Default for RoamConfig {
    fn default() -> Self {
        RoamConfig {
            db_path: DEFAULT_DB_PATH.to_string(),
            exclude_tags: BTreeSet::new(),
            remove_orphans: false,
        }
    }
}

impl RoamConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RoamConfig, RoamError> {
        let path = path.as_ref();
        tracing::debug!("Attempting to read config from: {:?}", path);
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(RoamConfig::default());
        }
        let content = read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RoamError> {
        tracing::debug!("Attempting to write config to: {:?}", path.as_ref());
        write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// `db_path` with a leading `~` expanded.
    pub fn db_path(&self) -> PathBuf {
        expand_home(&self.db_path)
    }
}
