//! Domain types for the asset meta-data sync.
//!
//! This module contains the core data structures:
//! - LibraryAsset / AssetLibrary: Canonical asset meta data from the space
//! - Story / StorySummary: Content entries as returned by the Management API
//! - ContentNode: Classification of a node inside a story's content tree

pub mod asset;
pub mod content;
pub mod story;

// Re-export commonly used types
pub use asset::{AssetLibrary, LibraryAsset};
pub use content::{is_asset, ContentNode, ASSET_FIELDTYPE, TRANSLATION_MARKER};
pub use story::{Story, StorySummary};
