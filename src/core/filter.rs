//! Story selection.
//!
//! Decides which entries of the story list get fetched in full and
//! processed: folders never, everything else according to content type
//! and the skip/only slug lists.

use crate::config::SyncConfig;
use crate::domain::StorySummary;

/// Selection rules for stories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFilter {
    /// Allowed content types; `None` allows all
    pub content_types: Option<Vec<String>>,
    /// Full slugs never processed
    pub skip_stories: Vec<String>,
    /// If non-empty, only these full slugs are processed
    pub only_stories: Vec<String>,
}

impl StoryFilter {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            content_types: config.content_types.clone(),
            skip_stories: config.skip_stories.clone(),
            only_stories: config.only_stories.clone(),
        }
    }

    /// Check whether a story should be processed
    pub fn matches(&self, story: &StorySummary) -> bool {
        if story.is_folder {
            return false;
        }

        if let Some(types) = &self.content_types {
            match &story.content_type {
                Some(content_type) if types.contains(content_type) => {}
                _ => return false,
            }
        }

        if self.skip_stories.contains(&story.full_slug) {
            return false;
        }

        self.only_stories.is_empty() || self.only_stories.contains(&story.full_slug)
    }

    /// Select matching stories, keeping list order
    pub fn select<'a>(&self, stories: &'a [StorySummary]) -> Vec<&'a StorySummary> {
        stories.iter().filter(|s| self.matches(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, content_type: Option<&str>) -> StorySummary {
        StorySummary {
            id: 1,
            full_slug: slug.to_string(),
            name: slug.to_string(),
            is_folder: false,
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_default_filter_accepts_stories() {
        let filter = StoryFilter::default();
        assert!(filter.matches(&summary("home", Some("page"))));
        assert!(filter.matches(&summary("untyped", None)));
    }

    #[test]
    fn test_untyped_story_rejected_by_type_filter() {
        let filter = StoryFilter {
            content_types: Some(vec!["page".to_string()]),
            ..Default::default()
        };
        assert!(!filter.matches(&summary("untyped", None)));
    }

    #[test]
    fn test_skip_wins_over_only() {
        let filter = StoryFilter {
            skip_stories: vec!["home".to_string()],
            only_stories: vec!["home".to_string()],
            ..Default::default()
        };
        assert!(!filter.matches(&summary("home", Some("page"))));
    }
}
