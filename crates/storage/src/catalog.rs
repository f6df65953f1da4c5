//! Static park catalog: a JSON object mapping park name to image URL.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::models::ParkName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParkCatalog {
    entries: Vec<CatalogEntry>,
}

impl ParkCatalog {
    /// Entries keep the order they appear in the file.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| StorageError::Catalog(format!("Invalid catalog JSON: {}", e)))?;

        let entries = raw
            .into_iter()
            .map(|(name, value)| match value {
                serde_json::Value::String(image_url) => Ok(CatalogEntry { name, image_url }),
                other => Err(StorageError::Catalog(format!(
                    "Image URL for '{}' must be a string, got {}",
                    name, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StorageError::Catalog(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, image_url)| CatalogEntry { name, image_url })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ready for insertion: names cleaned up, blank names dropped,
    /// and later near-duplicates (same name ignoring case) dropped in favour
    /// of the first occurrence in catalog order. The `parks.name` column
    /// uses the same case-insensitive rule.
    pub fn normalized(&self) -> Vec<(ParkName, &str)> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let Some(name) = ParkName::new(&entry.name) else {
                continue;
            };
            if seen.insert(name.dedup_key()) {
                out.push((name, entry.image_url.trim()));
            }
        }

        out
    }
}
