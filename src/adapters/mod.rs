//! Adapter interfaces for external systems.
//!
//! Adapters provide a unified interface for talking to the Storyblok
//! Management API, so the sync logic can run against the real service or
//! an in-memory fake.

pub mod storyblok;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

// Re-export the Storyblok client
pub use storyblok::StoryblokClient;

/// Trait for Management API clients
///
/// Paths are relative to the API base URL, e.g. `spaces/123/stories`.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Fetch every entry of a paginated collection
    async fn list_all(&self, path: &str) -> Result<Vec<Value>>;

    /// Fetch a single resource
    async fn get(&self, path: &str) -> Result<Value>;

    /// Update a resource with a JSON body
    async fn put(&self, path: &str, body: &Value) -> Result<Value>;
}
