//! Library assets: the canonical meta data for every file in a space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::is_set;

/// An asset as stored in the space's asset library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryAsset {
    /// Numeric asset id assigned by Storyblok
    pub id: u64,

    /// Public URL of the file
    #[serde(default)]
    pub filename: String,

    /// Per-field meta data (alt, title, copyright, source, ...)
    #[serde(default)]
    pub meta_data: Map<String, Value>,

    // Top-level copies of the meta data; informational only, syncing
    // always reads `meta_data`.
    #[serde(default)]
    pub alt: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub copyright: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl LibraryAsset {
    /// Library value for a meta-data field, if it is set to something non-empty
    pub fn meta_value(&self, field: &str) -> Option<&Value> {
        self.meta_data.get(field).filter(|v| is_set(Some(*v)))
    }
}

/// Library assets indexed by id for the duration of a run
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: HashMap<u64, LibraryAsset>,
}

impl AssetLibrary {
    /// Build the index from fetched assets
    pub fn new(assets: impl IntoIterator<Item = LibraryAsset>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Look up an asset by its exact id
    pub fn get(&self, id: u64) -> Option<&LibraryAsset> {
        self.assets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl FromIterator<LibraryAsset> for AssetLibrary {
    fn from_iter<I: IntoIterator<Item = LibraryAsset>>(iter: I) -> Self {
        Self::new(iter)
    }
}
