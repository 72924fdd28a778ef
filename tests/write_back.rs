//! Write-back Integration Tests
//!
//! Runs the orchestrator against an in-memory Management API and checks
//! which stories are fetched, updated and published.

mod common;

use common::{asset_ref, config, folder, library_asset, story, Call, FakeApi};
use serde_json::json;
use storyblok_sync_asset_meta::core::{Orchestrator, StoryOutcome};

fn space() -> FakeApi {
    FakeApi::new(
        vec![
            library_asset(10, json!({ "alt": "Mountain", "title": "Alps", "copyright": "CC0" })),
            library_asset(11, json!({ "alt": "Lake" })),
        ],
        vec![
            story(1, "home", "page", json!({ "hero": asset_ref(10, json!({})) })),
            story(
                2,
                "news/lake",
                "news",
                json!({ "gallery": [asset_ref(11, json!({ "alt": "Lake" }))] }),
            ),
            folder(3, "news"),
        ],
    )
}

#[tokio::test]
async fn test_live_run_updates_changed_stories_only() {
    let orchestrator = Orchestrator::new(space(), config());
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.library_assets, 2);
    assert_eq!(summary.stories, 2);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.field_updates, 3);

    let puts = orchestrator.api().puts();
    assert_eq!(puts.len(), 1);

    let (path, body) = &puts[0];
    assert_eq!(path, "spaces/1/stories/1");
    assert_eq!(body["story"]["content"]["hero"]["alt"], "Mountain");
    assert_eq!(body["story"]["content"]["hero"]["meta_data"]["copyright"], "CC0");
    assert_eq!(body["story"]["published"], false);
    assert!(body.get("publish").is_none());
}

#[tokio::test]
async fn test_dry_run_never_puts() {
    let config = storyblok_sync_asset_meta::SyncConfig {
        dry_run: true,
        ..config()
    };
    let orchestrator = Orchestrator::new(space(), config);
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.dry_run, 1);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.field_updates, 3);
    assert!(orchestrator.api().puts().is_empty());
}

#[tokio::test]
async fn test_publish_flag_in_body() {
    let config = storyblok_sync_asset_meta::SyncConfig {
        publish: true,
        ..config()
    };
    let orchestrator = Orchestrator::new(space(), config);
    orchestrator.run().await.unwrap();

    let puts = orchestrator.api().puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].1["publish"], json!(1));
}

#[tokio::test]
async fn test_only_selected_stories_are_fetched() {
    let config = storyblok_sync_asset_meta::SyncConfig {
        content_types: Some(vec!["news".to_string()]),
        ..config()
    };
    let orchestrator = Orchestrator::new(space(), config);
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.stories, 1);
    assert_eq!(
        orchestrator.api().calls(),
        vec![
            Call::ListAll("spaces/1/assets".to_string()),
            Call::ListAll("spaces/1/stories".to_string()),
            Call::Get("spaces/1/stories/2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_process_story_outcomes() {
    let orchestrator = Orchestrator::new(space(), config());
    let library = orchestrator.fetch_library().await.unwrap();
    let mut stories = orchestrator.fetch_stories().await.unwrap();
    assert_eq!(stories.len(), 2);

    let (outcome, sync) = orchestrator
        .process_story(&mut stories[1], &library)
        .await
        .unwrap();
    assert_eq!(outcome, StoryOutcome::Unchanged);
    assert!(!sync.changed());

    let (outcome, sync) = orchestrator
        .process_story(&mut stories[0], &library)
        .await
        .unwrap();
    assert_eq!(outcome, StoryOutcome::Updated);
    assert_eq!(sync.updates.len(), 3);
}

#[tokio::test]
async fn test_overwrite_updates_existing_values() {
    let api = FakeApi::new(
        vec![library_asset(10, json!({ "alt": "Mountain" }))],
        vec![story(
            1,
            "home",
            "page",
            json!({ "hero": asset_ref(10, json!({ "alt": "Old alt" })) }),
        )],
    );

    let orchestrator = Orchestrator::new(api, config());
    let summary = orchestrator.run().await.unwrap();
    assert_eq!(summary.unchanged, 1);
    assert!(orchestrator.api().puts().is_empty());

    let api = FakeApi::new(orchestrator.api().assets.clone(), orchestrator.api().stories.clone());
    let config = storyblok_sync_asset_meta::SyncConfig {
        overwrite: true,
        ..config()
    };
    let orchestrator = Orchestrator::new(api, config);
    let summary = orchestrator.run().await.unwrap();
    assert_eq!(summary.updated, 1);

    let puts = orchestrator.api().puts();
    assert_eq!(puts[0].1["story"]["content"]["hero"]["alt"], "Mountain");
    assert_eq!(puts[0].1["story"]["content"]["hero"]["meta_data"]["alt"], "Mountain");
}

#[tokio::test]
async fn test_missing_library_asset_counted() {
    let api = FakeApi::new(
        vec![],
        vec![story(1, "home", "page", json!({ "hero": asset_ref(99, json!({})) }))],
    );

    let orchestrator = Orchestrator::new(api, config());
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.assets_missing, 1);
    assert_eq!(summary.unchanged, 1);
    assert!(orchestrator.api().puts().is_empty());
}
