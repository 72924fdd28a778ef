//! Tree synchronizer.
//!
//! Walks a story's content tree and copies library meta data onto every
//! embedded asset reference. The walk keeps its own work stack, so content
//! nesting depth is bounded by heap, not by the call stack.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::SyncConfig;
use crate::domain::content::{is_asset, is_set, ContentNode, TRANSLATION_MARKER};
use crate::domain::AssetLibrary;

/// Options controlling how assets are synced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Meta-data fields to sync, in order
    pub fields: Vec<String>,
    /// Replace differing non-empty values
    pub overwrite: bool,
    /// Leave locale variants (`__i18n__` keys) alone
    pub skip_translations: bool,
}

impl SyncOptions {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            fields: config.fields.clone(),
            overwrite: config.overwrite,
            skip_translations: config.skip_translations,
        }
    }
}

/// A single meta-data write on an embedded asset
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    /// Filename of the asset reference
    pub filename: String,
    pub field: String,
    /// Value in `meta_data` before the update
    pub previous: Option<Value>,
    /// Library value written
    pub value: Value,
}

/// Result of syncing one content tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    /// Writes performed, in document order
    pub updates: Vec<FieldUpdate>,
    /// Asset references visited
    pub assets_seen: usize,
    /// Asset references without a library counterpart
    pub assets_missing: usize,
}

impl SyncOutcome {
    /// Whether the tree was modified
    pub fn changed(&self) -> bool {
        !self.updates.is_empty()
    }
}

/// Pending children of a container on the walk stack
enum Frame<'a> {
    Object(serde_json::map::IterMut<'a>),
    Array(std::slice::IterMut<'a, Value>),
}

/// Next item produced by the top frame
enum Step<'a> {
    Field(&'a String, &'a mut Value),
    Element(&'a mut Value),
    Done,
}

/// Copies library meta data into content trees
pub struct TreeSynchronizer<'a> {
    library: &'a AssetLibrary,
    options: &'a SyncOptions,
}

impl<'a> TreeSynchronizer<'a> {
    pub fn new(library: &'a AssetLibrary, options: &'a SyncOptions) -> Self {
        Self { library, options }
    }

    /// Sync every asset reference below `content`, mutating it in place
    ///
    /// Assets are visited depth-first in document order.
    pub fn sync_content(&self, content: &mut Value) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        let mut stack: Vec<Frame<'_>> = Vec::new();
        if let Value::Object(root) = content {
            stack.push(Frame::Object(root.iter_mut()));
        }

        while let Some(frame) = stack.last_mut() {
            let step = match frame {
                Frame::Object(entries) => entries
                    .next()
                    .map_or(Step::Done, |(key, child)| Step::Field(key, child)),
                Frame::Array(items) => items.next().map_or(Step::Done, Step::Element),
            };

            match step {
                Step::Done => {
                    stack.pop();
                }
                // Only objects inside plain arrays are walked
                Step::Element(Value::Object(map)) => stack.push(Frame::Object(map.iter_mut())),
                Step::Element(_) => {}
                Step::Field(key, child) => {
                    if self.options.skip_translations && key.contains(TRANSLATION_MARKER) {
                        debug!(field = %key, "Skipping translation");
                        continue;
                    }

                    match ContentNode::classify(child) {
                        ContentNode::Asset(asset) => {
                            debug!(field = %key, "Single asset field");
                            self.sync_asset(asset, &mut outcome);
                        }
                        ContentNode::AssetList(items) => {
                            debug!(field = %key, count = items.len(), "Multi asset field");
                            for item in items.iter_mut() {
                                if let Value::Object(asset) = item {
                                    if is_asset(asset) {
                                        self.sync_asset(asset, &mut outcome);
                                    }
                                }
                            }
                        }
                        ContentNode::Array(items) => stack.push(Frame::Array(items.iter_mut())),
                        ContentNode::Object(map) => stack.push(Frame::Object(map.iter_mut())),
                        ContentNode::Scalar => {}
                    }
                }
            }
        }

        outcome
    }

    /// Sync the configured fields of one asset reference
    pub fn sync_asset(&self, asset: &mut Map<String, Value>, outcome: &mut SyncOutcome) {
        outcome.assets_seen += 1;

        let filename = asset
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let library_asset = asset
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| self.library.get(id));

        let Some(library_asset) = library_asset else {
            debug!(%filename, "Asset not found in library. Maybe it was deleted?");
            outcome.assets_missing += 1;
            return;
        };

        for field in &self.options.fields {
            let Some(library_value) = library_asset.meta_value(field) else {
                debug!(%filename, %field, "Not set in library. Skipping.");
                continue;
            };

            let previous = asset
                .get("meta_data")
                .and_then(|meta| meta.get(field))
                .cloned();

            if previous.as_ref() == Some(library_value) {
                debug!(%filename, %field, "Instance already has identical value. Skipping.");
                continue;
            }

            if is_set(previous.as_ref()) && !self.options.overwrite {
                debug!(
                    %filename,
                    %field,
                    instance = ?previous,
                    library = %library_value,
                    "Instance has different value. Use --overwrite to force sync. Skipping."
                );
                continue;
            }

            asset.insert(field.clone(), library_value.clone());
            let meta = asset
                .entry("meta_data")
                .or_insert_with(|| Value::Object(Map::new()));
            if !meta.is_object() {
                *meta = Value::Object(Map::new());
            }
            if let Value::Object(meta) = meta {
                meta.insert(field.clone(), library_value.clone());
            }

            debug!(%filename, %field, value = %library_value, "Value updated");
            outcome.updates.push(FieldUpdate {
                filename: filename.clone(),
                field: field.clone(),
                previous,
                value: library_value.clone(),
            });
        }
    }
}
