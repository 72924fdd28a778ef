//! Command-line interface for storyblok-sync-asset-meta.
//!
//! Declares every flag together with its environment fallback, prints the
//! run banner and summary, and wires the Management API client into the
//! orchestrator.

use anyhow::Result;
use clap::Parser;

use crate::adapters::{ManagementApi, StoryblokClient};
use crate::config::SyncConfig;
use crate::core::{Orchestrator, RunSummary};

/// Sync asset meta data (alt, title, copyright, source) from the asset
/// library of a Storyblok space into the asset fields of its stories
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "storyblok-sync-asset-meta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Personal OAuth access token of a Storyblok user (NOT the access token of a space)
    #[arg(long, env = "STORYBLOK_OAUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// ID of the space to sync
    #[arg(long, env = "STORYBLOK_SPACE_ID")]
    pub space: Option<String>,

    /// Region of the space: eu (default), us, ap, ca, cn
    #[arg(long, env = "STORYBLOK_REGION")]
    pub region: Option<String>,

    /// Comma separated meta-data fields to sync [default: alt,title,copyright,source]
    #[arg(long, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Comma separated content types to process (default: all)
    #[arg(long, value_name = "TYPES")]
    pub content_types: Option<String>,

    /// Comma separated full slugs of stories to skip
    #[arg(long, value_name = "STORIES")]
    pub skip_stories: Option<String>,

    /// Comma separated full slugs of stories to limit processing to
    #[arg(long, value_name = "STORIES")]
    pub only_stories: Option<String>,

    /// Do not sync translations of asset fields
    #[arg(long)]
    pub skip_translations: bool,

    /// Overwrite existing meta data
    #[arg(long)]
    pub overwrite: bool,

    /// Publish stories after updating (may publish previously unpublished stories)
    #[arg(long)]
    pub publish: bool,

    /// Only display the changes instead of performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Show detailed output for every processed asset
    #[arg(long)]
    pub verbose: bool,
}

/// Run a sync against the live Management API
pub async fn run(config: SyncConfig) -> Result<RunSummary> {
    print_banner(&config);
    let client = StoryblokClient::from_config(&config);
    execute(client, config).await
}

/// Run a sync with any Management API client and print the summary
pub async fn execute<A: ManagementApi>(api: A, config: SyncConfig) -> Result<RunSummary> {
    let orchestrator = Orchestrator::new(api, config);
    let summary = orchestrator.run().await?;

    println!();
    println!("Stories processed: {}", summary.stories);
    println!("- updated: {}", summary.updated);
    if summary.dry_run > 0 {
        println!("- changes pending (dry-run): {}", summary.dry_run);
    }
    println!("- unchanged: {}", summary.unchanged);
    println!("Meta-data fields synced: {}", summary.field_updates);
    if summary.assets_missing > 0 {
        println!(
            "Asset references not found in library: {}",
            summary.assets_missing
        );
    }
    println!();
    println!(
        "Process successfully finished in {} seconds.",
        summary.elapsed.as_secs_f64().round()
    );

    Ok(summary)
}

/// Print the effective settings of a run
fn print_banner(config: &SyncConfig) {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    println!();
    println!(
        "Performing asset meta-data sync for space {}:",
        config.space_id
    );
    println!("- region: {}", config.region);
    println!(
        "- mode: {}",
        if config.dry_run { "dry-run" } else { "live" }
    );
    println!("- publish: {}", yes_no(config.publish));
    println!("- overwrite: {}", yes_no(config.overwrite));
    println!("- fields: {}", config.fields.join(", "));
    println!(
        "- content types: {}",
        config
            .content_types
            .as_ref()
            .map(|t| t.join(", "))
            .unwrap_or_else(|| "all".to_string())
    );
    println!("- skip-translations: {}", yes_no(config.skip_translations));
    if !config.skip_stories.is_empty() {
        println!("- skipped stories: {}", config.skip_stories.join(", "));
    }
    if !config.only_stories.is_empty() {
        println!("- only stories: {}", config.only_stories.join(", "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "storyblok-sync-asset-meta",
            "--token",
            "abc",
            "--space",
            "12345",
            "--region",
            "us",
            "--fields",
            "alt,title",
            "--content-types",
            "page,news-article",
            "--only-stories",
            "home",
            "--skip-translations",
            "--overwrite",
            "--publish",
            "--dry-run",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.space.as_deref(), Some("12345"));
        assert_eq!(cli.region.as_deref(), Some("us"));
        assert_eq!(cli.content_types.as_deref(), Some("page,news-article"));
        assert_eq!(cli.only_stories.as_deref(), Some("home"));
        assert!(cli.skip_translations && cli.overwrite && cli.publish);
        assert!(cli.dry_run && cli.verbose);
    }

    #[test]
    fn test_flags_default_off() {
        let cli = Cli::try_parse_from(["storyblok-sync-asset-meta", "--token", "abc"]).unwrap();
        assert!(!cli.overwrite);
        assert!(!cli.publish);
        assert!(!cli.dry_run);
        assert!(cli.skip_stories.is_none());
    }
}
