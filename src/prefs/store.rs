// Flag store for persisted user preferences.
// Handles JSON serialization and atomic writes of presence flags.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key recording that the user opted out of the onboarding modal.
pub const SKIP_ONBOARDING_KEY: &str = "skipOnboarding";

/// Key-value store of presence flags that survive across sessions.
///
/// The session core only ever calls `contains`. Writes belong to the view
/// collaborators that own the corresponding opt-out.
pub trait FlagStore {
    fn contains(&self, key: &str) -> bool;

    fn set(&mut self, key: &str) -> Result<()>;
}

/// Metadata for a stored flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFlag {
    /// When the flag was written.
    pub set_at: DateTime<Utc>,
}

/// Flag store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFlagStore {
    path: PathBuf,
    flags: BTreeMap<String, StoredFlag>,
}

impl JsonFlagStore {
    /// Load the store from disk. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let flags = if path.exists() {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            flags,
        })
    }

    /// Look up when a flag was written.
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&StoredFlag> {
        self.flags.get(key)
    }

    fn persist(&self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.flags)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl FlagStore for JsonFlagStore {
    fn contains(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    fn set(&mut self, key: &str) -> Result<()> {
        self.flags.insert(key.to_string(), StoredFlag { set_at: Utc::now() });
        self.persist()
    }
}

/// In-memory flag store, used when no data directory is available.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: BTreeSet<String>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(key: &str) -> Self {
        let mut store = Self::new();
        store.flags.insert(key.to_string());
        store
    }
}

impl FlagStore for MemoryFlagStore {
    fn contains(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    fn set(&mut self, key: &str) -> Result<()> {
        self.flags.insert(key.to_string());
        Ok(())
    }
}
