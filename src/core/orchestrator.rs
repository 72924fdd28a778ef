//! Main orchestrator for a sync run.
//!
//! Fetches the asset library and the selected stories, runs the tree
//! synchronizer over each story and writes changed stories back (or only
//! reports them in dry-run mode). Stories are handled strictly one after
//! another.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::adapters::ManagementApi;
use crate::config::SyncConfig;
use crate::domain::{AssetLibrary, LibraryAsset, Story, StorySummary};

use super::filter::StoryFilter;
use super::sync::{SyncOptions, SyncOutcome, TreeSynchronizer};

/// What happened to a single story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOutcome {
    /// Nothing to sync
    Unchanged,
    /// Changes detected but not written (dry run)
    DryRun,
    /// Changes written back
    Updated,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub library_assets: usize,
    /// Stories fetched in full after filtering
    pub stories: usize,
    pub unchanged: usize,
    pub dry_run: usize,
    pub updated: usize,
    /// Individual meta-data writes across all stories
    pub field_updates: usize,
    /// Asset references with no library counterpart
    pub assets_missing: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, outcome: StoryOutcome, sync: &SyncOutcome) {
        match outcome {
            StoryOutcome::Unchanged => self.unchanged += 1,
            StoryOutcome::DryRun => self.dry_run += 1,
            StoryOutcome::Updated => self.updated += 1,
        }
        self.field_updates += sync.updates.len();
        self.assets_missing += sync.assets_missing;
    }
}

/// Sync run orchestrator
pub struct Orchestrator<A> {
    api: A,
    config: SyncConfig,
    options: SyncOptions,
}

impl<A: ManagementApi> Orchestrator<A> {
    /// Create a new orchestrator
    pub fn new(api: A, config: SyncConfig) -> Self {
        let options = SyncOptions::from_config(&config);
        Self {
            api,
            config,
            options,
        }
    }

    /// The underlying API client
    pub fn api(&self) -> &A {
        &self.api
    }

    fn story_path(&self, id: u64) -> String {
        format!("spaces/{}/stories/{}", self.config.space_id, id)
    }

    /// Execute a full run
    #[instrument(skip(self), fields(space = %self.config.space_id))]
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        let library = self.fetch_library().await?;
        summary.library_assets = library.len();

        let mut stories = self.fetch_stories().await?;
        summary.stories = stories.len();

        info!("Processing stories...");
        for story in stories.iter_mut() {
            let (outcome, sync) = self.process_story(story, &library).await?;
            summary.record(outcome, &sync);
        }

        summary.elapsed = started.elapsed();
        Ok(summary)
    }

    /// Fetch and index all library assets
    pub async fn fetch_library(&self) -> Result<AssetLibrary> {
        info!("Fetching library-assets...");
        let path = format!("spaces/{}/assets", self.config.space_id);

        let raw = self
            .api
            .list_all(&path)
            .await
            .context("Failed to fetch library assets")?;

        let assets = raw
            .into_iter()
            .map(serde_json::from_value::<LibraryAsset>)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse library assets")?;

        info!(count = assets.len(), "Fetched library assets");
        Ok(AssetLibrary::new(assets))
    }

    /// List stories, apply the filter and fetch each selected story in full
    pub async fn fetch_stories(&self) -> Result<Vec<Story>> {
        info!("Fetching stories...");
        let path = format!("spaces/{}/stories", self.config.space_id);

        let raw = self
            .api
            .list_all(&path)
            .await
            .context("Failed to list stories")?;

        let summaries = raw
            .into_iter()
            .map(serde_json::from_value::<StorySummary>)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse story list")?;

        let filter = StoryFilter::from_config(&self.config);
        let selected = filter.select(&summaries);
        info!(
            listed = summaries.len(),
            selected = selected.len(),
            "Filtered stories"
        );

        let mut stories = Vec::with_capacity(selected.len());
        for summary in selected {
            let body = self
                .api
                .get(&self.story_path(summary.id))
                .await
                .with_context(|| format!("Failed to fetch story {}", summary.full_slug))?;
            stories.push(Story::from_detail_response(body)?);
        }

        Ok(stories)
    }

    /// Sync one story and write it back if needed
    pub async fn process_story(
        &self,
        story: &mut Story,
        library: &AssetLibrary,
    ) -> Result<(StoryOutcome, SyncOutcome)> {
        debug!(slug = %story.full_slug, name = %story.name, "Processing story");

        let sync = TreeSynchronizer::new(library, &self.options).sync_content(&mut story.content);

        if !sync.changed() {
            debug!(slug = %story.full_slug, "No update required.");
            return Ok((StoryOutcome::Unchanged, sync));
        }

        if self.config.dry_run {
            for update in &sync.updates {
                info!(
                    slug = %story.full_slug,
                    asset = %update.filename,
                    field = %update.field,
                    value = %update.value,
                    "Would update"
                );
            }
            debug!(slug = %story.full_slug, "Dry-run mode. No changes performed.");
            return Ok((StoryOutcome::DryRun, sync));
        }

        let body = self.update_body(story)?;
        self.api
            .put(&self.story_path(story.id), &body)
            .await
            .with_context(|| format!("Failed to update story {}", story.full_slug))?;

        info!(
            slug = %story.full_slug,
            fields = sync.updates.len(),
            published = self.config.publish,
            "Story successfully updated"
        );
        Ok((StoryOutcome::Updated, sync))
    }

    /// PUT body for a story update
    pub fn update_body(&self, story: &Story) -> Result<Value> {
        let story = serde_json::to_value(story).context("Failed to serialize story")?;
        let mut body = json!({ "story": story });
        if self.config.publish {
            body["publish"] = json!(1);
        }
        Ok(body)
    }
}
