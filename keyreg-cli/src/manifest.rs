//! Key manifest: a JSON list of PEM files placed at registry indices.
//!
//! ```json
//! {
//!   "keys": [
//!     { "index": 0, "pem_file": "release.pem", "generated_time": 1100000000 },
//!     { "index": 3, "pem_file": "dev.pem" }
//!   ]
//! }
//! ```
//!
//! Relative paths resolve against the manifest's directory. A missing
//! `generated_time` falls back to the PEM file's modification time. Indices
//! above [`MAX_KEY_INDEX`] are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};
use tracing::debug;

use keyreg_core::constants::MAX_KEY_INDEX;
use keyreg_core::error::{KeyRegError, Result};
use keyreg_core::types::KeyDefinition;

/// Parsed manifest file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KeyManifest {
    pub keys: Vec<ManifestEntry>,
}

/// One key in the manifest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub pem_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_time: Option<i64>,
}

impl KeyManifest {
    /// Reads and validates a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let manifest: KeyManifest = serde_json::from_str(&text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeMap::new();
        for entry in &self.keys {
            if entry.index > MAX_KEY_INDEX {
                return Err(KeyRegError::Manifest(format!(
                    "index {} for {} exceeds the maximum key index {MAX_KEY_INDEX}",
                    entry.index,
                    entry.pem_file.display()
                )));
            }
            if let Some(previous) = seen.insert(entry.index, &entry.pem_file) {
                return Err(KeyRegError::Manifest(format!(
                    "index {} assigned to both {} and {}",
                    entry.index,
                    previous.display(),
                    entry.pem_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Reads every referenced PEM file and builds a key table.
    ///
    /// Indices not named in the manifest become empty entries. The table and
    /// the key bytes are leaked: like a compiled-in table they must outlive
    /// the registry, which lives for the rest of the process.
    pub fn into_table(self, base_dir: &Path) -> Result<&'static [KeyDefinition]> {
        self.validate()?;
        let len = self
            .keys
            .iter()
            .map(|e| e.index.checked_add(1))
            .try_fold(0usize, |len, end| end.map(|end| len.max(end)))
            .ok_or_else(|| KeyRegError::Manifest("key index overflows".into()))?;
        let mut table: Vec<KeyDefinition> = (0..len).map(|_| KeyDefinition::EMPTY).collect();

        for entry in self.keys {
            let path = base_dir.join(&entry.pem_file);
            let bytes = std::fs::read(&path)?;
            let generated_time = match entry.generated_time {
                Some(t) => t,
                None => modified_time(&path)?,
            };
            debug!(index = entry.index, path = %path.display(), generated_time, "Loaded key file");

            let data: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            table[entry.index] = KeyDefinition::new(data, generated_time);
        }

        Ok(Box::leak(table.into_boxed_slice()))
    }
}

fn modified_time(path: &Path) -> Result<i64> {
    let modified = std::fs::metadata(path)?.modified()?;
    let secs = modified
        .duration_since(UNIX_EPOCH)
        .map_err(|e| KeyRegError::Manifest(format!("{}: {e}", path.display())))?
        .as_secs();
    i64::try_from(secs).map_err(|e| KeyRegError::Manifest(format!("{}: {e}", path.display())))
}
