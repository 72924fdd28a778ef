//! Shared test fixtures: an in-memory Management API that records calls.

#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use storyblok_sync_asset_meta::adapters::ManagementApi;
use storyblok_sync_asset_meta::config::{Region, SyncConfig};

/// A recorded API call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAll(String),
    Get(String),
    Put(String, Value),
}

/// In-memory space holding library assets and full stories
#[derive(Default)]
pub struct FakeApi {
    pub assets: Vec<Value>,
    pub stories: Vec<Value>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new(assets: Vec<Value>, stories: Vec<Value>) -> Self {
        Self {
            assets,
            stories,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies of all PUT calls, keyed by path
    pub fn puts(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Put(path, body) => Some((path, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ManagementApi for FakeApi {
    async fn list_all(&self, path: &str) -> Result<Vec<Value>> {
        self.record(Call::ListAll(path.to_string()));

        if path.ends_with("/assets") {
            Ok(self.assets.clone())
        } else if path.ends_with("/stories") {
            // List endpoint returns summaries without content
            Ok(self
                .stories
                .iter()
                .map(|s| {
                    json!({
                        "id": s["id"],
                        "full_slug": s["full_slug"],
                        "name": s["name"],
                        "is_folder": s["is_folder"].as_bool().unwrap_or(false),
                        "content_type": s["content"]["component"],
                    })
                })
                .collect())
        } else {
            anyhow::bail!("Unexpected collection: {}", path)
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.record(Call::Get(path.to_string()));

        let id: u64 = path
            .rsplit('/')
            .next()
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| anyhow::anyhow!("Unexpected path: {}", path))?;

        self.stories
            .iter()
            .find(|s| s["id"] == json!(id))
            .map(|s| json!({ "story": s }))
            .ok_or_else(|| anyhow::anyhow!("Story {} not found", id))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.record(Call::Put(path.to_string(), body.clone()));
        Ok(json!({ "story": body["story"] }))
    }
}

/// Library asset with meta data
pub fn library_asset(id: u64, meta: Value) -> Value {
    json!({
        "id": id,
        "filename": format!("https://a.storyblok.com/f/1/{}.jpg", id),
        "meta_data": meta,
    })
}

/// Asset reference as embedded in story content
pub fn asset_ref(id: u64, meta: Value) -> Value {
    json!({
        "id": id,
        "fieldtype": "asset",
        "filename": format!("https://a.storyblok.com/f/1/{}.jpg", id),
        "alt": meta.get("alt").cloned().unwrap_or(Value::Null),
        "title": meta.get("title").cloned().unwrap_or(Value::Null),
        "meta_data": meta,
    })
}

/// Full story with the given root component and content body
pub fn story(id: u64, slug: &str, component: &str, content: Value) -> Value {
    let mut content = content;
    content["component"] = json!(component);
    json!({
        "id": id,
        "full_slug": slug,
        "name": slug,
        "is_folder": false,
        "published": false,
        "content": content,
    })
}

/// Folder entry
pub fn folder(id: u64, slug: &str) -> Value {
    json!({
        "id": id,
        "full_slug": slug,
        "name": slug,
        "is_folder": true,
        "content": {},
    })
}

pub fn config() -> SyncConfig {
    SyncConfig {
        token: "oauth-token".to_string(),
        space_id: "1".to_string(),
        region: Region::Eu,
        fields: ["alt", "title", "copyright", "source"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        content_types: None,
        skip_stories: vec![],
        only_stories: vec![],
        skip_translations: false,
        overwrite: false,
        publish: false,
        dry_run: false,
        verbose: false,
    }
}
