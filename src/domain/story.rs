//! Stories as returned by the Management API.
//!
//! The list endpoint only returns summaries; full content requires a
//! per-story detail call.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Story entry from `spaces/{space}/stories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySummary {
    pub id: u64,

    #[serde(default)]
    pub full_slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub is_folder: bool,

    /// Root component name (absent for folders)
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Full story from `spaces/{space}/stories/{id}`
///
/// Keys the sync does not touch are kept in `extra` so the story can be
/// written back without losing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,

    #[serde(default)]
    pub full_slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub is_folder: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Nested content tree
    #[serde(default)]
    pub content: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Story {
    /// Extract the story from a detail response body (`{"story": {...}}`)
    pub fn from_detail_response(body: Value) -> Result<Self> {
        let story = match body {
            Value::Object(mut map) => map.remove("story"),
            _ => None,
        }
        .context("Story detail response has no `story` object")?;

        serde_json::from_value(story).context("Failed to parse story detail")
    }
}
