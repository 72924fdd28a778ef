//! Core sync logic.
//!
//! This module contains:
//! - Filter: Story selection
//! - Sync: Content tree walk and per-asset meta-data sync
//! - Orchestrator: Fetch, sync and write-back driver

pub mod filter;
pub mod orchestrator;
pub mod sync;

// Re-export commonly used types
pub use filter::StoryFilter;
pub use orchestrator::{Orchestrator, RunSummary, StoryOutcome};
pub use sync::{FieldUpdate, SyncOptions, SyncOutcome, TreeSynchronizer};
