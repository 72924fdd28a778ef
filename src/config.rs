//! Configuration for a sync run.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags (--token, --space, --region, ...)
//! 2. Environment variables (STORYBLOK_OAUTH_TOKEN, STORYBLOK_SPACE_ID, STORYBLOK_REGION)
//! 3. Defaults (region `eu`, all meta-data fields)
//!
//! Flag/env merging is done by clap; this module validates the merged values
//! and turns them into a [`SyncConfig`] before any network client exists.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cli::Cli;

/// Meta-data fields synced when `--fields` is not given
pub const DEFAULT_FIELDS: [&str; 4] = ["alt", "title", "copyright", "source"];

/// Storyblok region hosting the space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Eu,
    Us,
    Ap,
    Ca,
    Cn,
}

impl Region {
    /// Management API base URL for this region
    pub fn management_api_url(&self) -> &'static str {
        match self {
            Region::Eu => "https://mapi.storyblok.com/v1",
            Region::Us => "https://api-us.storyblok.com/v1",
            Region::Ap => "https://api-ap.storyblok.com/v1",
            Region::Ca => "https://api-ca.storyblok.com/v1",
            Region::Cn => "https://app.storyblokchina.cn/v1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Eu => write!(f, "eu"),
            Region::Us => write!(f, "us"),
            Region::Ap => write!(f, "ap"),
            Region::Ca => write!(f, "ca"),
            Region::Cn => write!(f, "cn"),
        }
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eu" => Ok(Region::Eu),
            "us" => Ok(Region::Us),
            "ap" => Ok(Region::Ap),
            "ca" => Ok(Region::Ca),
            "cn" => Ok(Region::Cn),
            other => Err(ConfigError::InvalidRegion(other.to_string())),
        }
    }
}

/// User-facing configuration errors (exit code 1)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Error: State your oauth token via the --token argument or the environment variable STORYBLOK_OAUTH_TOKEN. Use --help to find out more.")]
    MissingToken,

    #[error("Error: State your space id via the --space argument or the environment variable STORYBLOK_SPACE_ID. Use --help to find out more.")]
    MissingSpace,

    #[error("Error: Invalid region parameter stated ({0}). Possible values are eu, us, ap, ca, cn. Use --help to find out more.")]
    InvalidRegion(String),
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Personal OAuth token (not a space access token)
    pub token: String,
    pub space_id: String,
    pub region: Region,
    /// Meta-data fields to sync, in order
    pub fields: Vec<String>,
    /// Content types to process; `None` means all
    pub content_types: Option<Vec<String>>,
    /// Full slugs to skip
    pub skip_stories: Vec<String>,
    /// Full slugs to limit processing to; empty means all
    pub only_stories: Vec<String>,
    pub skip_translations: bool,
    pub overwrite: bool,
    pub publish: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl SyncConfig {
    /// Validate parsed CLI arguments into a run configuration
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let token = non_blank(cli.token.as_deref()).ok_or(ConfigError::MissingToken)?;
        let space_id = non_blank(cli.space.as_deref()).ok_or(ConfigError::MissingSpace)?;

        let region = match non_blank(cli.region.as_deref()) {
            Some(region) => region.parse()?,
            None => Region::default(),
        };

        let fields = match cli.fields.as_deref().map(split_csv) {
            Some(fields) if !fields.is_empty() => fields,
            _ => DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        };

        let content_types = cli
            .content_types
            .as_deref()
            .map(split_csv)
            .filter(|types| !types.is_empty());

        Ok(Self {
            token,
            space_id,
            region,
            fields,
            content_types,
            skip_stories: cli.skip_stories.as_deref().map(split_csv).unwrap_or_default(),
            only_stories: cli.only_stories.as_deref().map(split_csv).unwrap_or_default(),
            skip_translations: cli.skip_translations,
            overwrite: cli.overwrite,
            publish: cli.publish,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }
}

/// Split a comma separated list, dropping blank entries
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
