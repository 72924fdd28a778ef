//! storyblok-sync-asset-meta - Sync asset library meta data into stories
//!
//! Copies the meta data of assets (alt text, title, copyright, source) from
//! the central asset library of a Storyblok space into the asset references
//! embedded in its stories, optionally publishing the updated stories.
//!
//! # Flow
//!
//! - Fetch all library assets and index them by id
//! - List stories, filter them, fetch the selected ones in full
//! - Walk each story's content tree and sync every asset reference
//! - Write changed stories back (or only report them in dry-run mode)
//!
//! # Modules
//!
//! - `adapters`: Management API client (Storyblok)
//! - `core`: Story filter, tree synchronizer, orchestrator
//! - `domain`: Data structures (LibraryAsset, Story, ContentNode)
//! - `config`: Validated run configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Preview changes
//! storyblok-sync-asset-meta --token <oauth-token> --space 12345 --dry-run --verbose
//!
//! # Sync alt texts only, replacing existing values, and publish
//! storyblok-sync-asset-meta --space 12345 --fields alt --overwrite --publish
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ManagementApi, StoryblokClient};
pub use config::{ConfigError, Region, SyncConfig};
pub use self::core::{Orchestrator, RunSummary, StoryFilter, StoryOutcome, TreeSynchronizer};
pub use domain::{AssetLibrary, ContentNode, LibraryAsset, Story, StorySummary};
