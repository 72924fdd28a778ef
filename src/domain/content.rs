//! Classification of nodes in a story's content tree.
//!
//! Story content is free-form JSON. Asset references are recognised by an
//! explicit `fieldtype: "asset"` discriminator plus a non-empty `filename`;
//! everything else is either a nested container or a scalar leaf.

use serde_json::{Map, Value};

/// Discriminator value of asset reference objects
pub const ASSET_FIELDTYPE: &str = "asset";

/// Substring marking locale variants of a field (e.g. `image__i18n__de`)
pub const TRANSLATION_MARKER: &str = "__i18n__";

/// A content node, borrowed mutably so the synchronizer can update it in place
#[derive(Debug)]
pub enum ContentNode<'a> {
    /// A single asset reference
    Asset(&'a mut Map<String, Value>),

    /// A multi-asset field: non-empty array whose first element is an asset
    AssetList(&'a mut Vec<Value>),

    /// Any other object (blok, rich text node, plugin data)
    Object(&'a mut Map<String, Value>),

    /// Any other array
    Array(&'a mut Vec<Value>),

    /// Strings, numbers, booleans, null
    Scalar,
}

impl<'a> ContentNode<'a> {
    /// Classify a JSON value
    pub fn classify(value: &'a mut Value) -> Self {
        let asset_object = value.as_object().is_some_and(is_asset);
        let asset_list = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_object)
            .is_some_and(is_asset);

        match value {
            Value::Object(map) => {
                if asset_object {
                    ContentNode::Asset(map)
                } else {
                    ContentNode::Object(map)
                }
            }
            Value::Array(items) => {
                if asset_list {
                    ContentNode::AssetList(items)
                } else {
                    ContentNode::Array(items)
                }
            }
            _ => ContentNode::Scalar,
        }
    }
}

/// Check whether an object is an asset reference
pub fn is_asset(map: &Map<String, Value>) -> bool {
    map.get("fieldtype").and_then(Value::as_str) == Some(ASSET_FIELDTYPE)
        && map
            .get("filename")
            .and_then(Value::as_str)
            .is_some_and(|f| !f.is_empty())
}

/// Whether a field carries a meaningful value (absent, null, "", false and 0 do not)
pub fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
