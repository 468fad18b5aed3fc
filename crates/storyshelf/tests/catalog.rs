//! Catalog operations against a scripted transport.

mod common;

use common::{STORY_ID, ScriptedTransport, client, comment_row, profile_row, story_row};
use serde_json::json;
use storyshelf::catalog::{NewComment, StoryStore};
use storyshelf::{RestError, Verb};
use uuid::Uuid;

fn story_id() -> Uuid {
    Uuid::parse_str(STORY_ID).unwrap()
}

#[tokio::test]
async fn published_stories_without_search() {
    let transport = ScriptedTransport::new().reply_json(200, json!([story_row("a", 1, None)]));
    let store = StoryStore::new(client(transport));

    let stories = store.published_stories(None).await.unwrap();
    assert_eq!(stories.len(), 1);

    let req = &store.client().transport().requests()[0];
    assert_eq!(req.url.query(), Some("select=*&published=eq.true"));
}

#[tokio::test]
async fn published_stories_with_search_adds_or_clause() {
    let store = StoryStore::new(client(ScriptedTransport::new()));
    let stories = store.published_stories(Some("  fox ")).await.unwrap();
    assert!(stories.is_empty());

    let pairs = store.client().transport().requests()[0].query_pairs();
    assert_eq!(
        pairs,
        vec![
            ("select".to_string(), "*".to_string()),
            ("published".to_string(), "eq.true".to_string()),
            (
                "or".to_string(),
                "(title.ilike.%fox%,description.ilike.%fox%,content.ilike.%fox%)".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn blank_search_is_ignored() {
    let store = StoryStore::new(client(ScriptedTransport::new()));
    store.published_stories(Some("   ")).await.unwrap();
    let req = &store.client().transport().requests()[0];
    assert!(!req.url.query().unwrap().contains("or="));
}

#[tokio::test]
async fn archive_orders_by_story_date() {
    let store = StoryStore::new(client(ScriptedTransport::new()));
    store.archive(false).await.unwrap();
    let req = &store.client().transport().requests()[0];
    assert_eq!(
        req.url.query(),
        Some("select=*&published=eq.true&order=story_date.desc")
    );
}

#[tokio::test]
async fn story_by_slug_found_and_missing() {
    let transport = ScriptedTransport::new()
        .reply_json(200, json!([story_row("zima", 3, Some("01.2020"))]))
        .reply(200, "[]");
    let store = StoryStore::new(client(transport));

    let found = store.story_by_slug("zima").await.unwrap().unwrap();
    assert_eq!(found.slug, "zima");
    assert!(store.story_by_slug("nope").await.unwrap().is_none());

    let req = &store.client().transport().requests()[0];
    assert_eq!(req.url.query(), Some("select=*&slug=eq.zima&published=eq.true"));
}

#[tokio::test]
async fn record_view_patches_counter() {
    let transport = ScriptedTransport::new()
        .reply_json(200, json!([story_row("zima", 3, None)]))
        .reply(204, "");
    let store = StoryStore::new(client(transport));

    let story = store.story_by_slug("zima").await.unwrap().unwrap();
    let views = store.record_view(&story).await.unwrap();
    assert_eq!(views, 8);

    let req = &store.client().transport().requests()[1];
    assert_eq!(req.verb, Verb::Patch);
    assert_eq!(req.url.query(), Some(format!("id=eq.{STORY_ID}").as_str()));
    assert_eq!(req.body.as_deref(), Some(r#"{"views_count":8}"#));
}

#[tokio::test]
async fn comments_newest_first() {
    let transport = ScriptedTransport::new().reply_json(
        200,
        json!([
            comment_row("11111111-1111-4111-8111-111111111111", "second"),
            comment_row("22222222-2222-4222-8222-222222222222", "first"),
        ]),
    );
    let store = StoryStore::new(client(transport));

    let comments = store.comments_for(story_id()).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "second");

    let req = &store.client().transport().requests()[0];
    assert!(req.url.query().unwrap().ends_with("&order=created_at.desc"));
}

#[tokio::test]
async fn add_comment_returns_stored_row() {
    let transport = ScriptedTransport::new().reply_json(
        201,
        json!([comment_row("33333333-3333-4333-8333-333333333333", "hi")]),
    );
    let store = StoryStore::new(client(transport));

    let comment = store
        .add_comment(&NewComment {
            story_id: story_id(),
            author_name: "Reader".into(),
            content: "hi".into(),
            author_identifier: Some("user_1".into()),
        })
        .await
        .unwrap();
    assert_eq!(comment.content, "hi");

    let req = &store.client().transport().requests()[0];
    assert_eq!(req.verb, Verb::Post);
    assert_eq!(req.url.query(), None);
    assert_eq!(req.header("Prefer"), Some("return=representation"));
}

#[tokio::test]
async fn add_comment_rejects_blank_input_locally() {
    let store = StoryStore::new(client(ScriptedTransport::new()));
    let err = store
        .add_comment(&NewComment {
            story_id: story_id(),
            author_name: " ".into(),
            content: "hi".into(),
            author_identifier: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::Validation(_)));
    assert!(store.client().transport().requests().is_empty());
}

#[tokio::test]
async fn is_liked_maps_no_rows_to_false() {
    let transport = ScriptedTransport::new()
        .reply(200, "[]")
        .reply_json(200, json!([{"id": "x"}]));
    let store = StoryStore::new(client(transport));

    assert!(!store.is_liked(story_id(), "user_1").await.unwrap());
    assert!(store.is_liked(story_id(), "user_1").await.unwrap());

    let req = &store.client().transport().requests()[0];
    assert_eq!(
        req.url.query(),
        Some(format!("select=id&story_id=eq.{STORY_ID}&user_identifier=eq.user_1").as_str())
    );
}

#[tokio::test]
async fn is_liked_surfaces_server_errors() {
    let transport = ScriptedTransport::new().reply(500, "boom");
    let store = StoryStore::new(client(transport));
    let err = store.is_liked(story_id(), "u").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn toggle_like_unlikes_when_liked() {
    let transport = ScriptedTransport::new()
        .reply_json(200, json!([{"id": "x"}]))
        .reply(204, "");
    let store = StoryStore::new(client(transport));

    let liked = store.toggle_like(story_id(), "user_1").await.unwrap();
    assert!(!liked);

    let requests = store.client().transport().requests();
    assert_eq!(requests[1].verb, Verb::Delete);
    assert_eq!(requests[1].header("Prefer"), None);
}

#[tokio::test]
async fn toggle_like_likes_when_not_liked() {
    let transport = ScriptedTransport::new().reply(200, "[]").reply(201, "");
    let store = StoryStore::new(client(transport));

    assert!(store.toggle_like(story_id(), "user_1").await.unwrap());

    let requests = store.client().transport().requests();
    assert_eq!(requests[1].verb, Verb::Post);
    let body: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["user_identifier"], "user_1");
}

#[tokio::test]
async fn failed_like_is_an_error_not_a_panic() {
    let transport = ScriptedTransport::new()
        .reply(200, "[]")
        .fail(RestError::Transport("offline".into()));
    let store = StoryStore::new(client(transport));
    let err = store.toggle_like(story_id(), "u").await.unwrap_err();
    assert_eq!(err, RestError::Transport("offline".into()));
}

#[tokio::test]
async fn author_profile_first_row() {
    let transport = ScriptedTransport::new().reply_json(200, json!([profile_row()]));
    let store = StoryStore::new(client(transport));
    let profile = store.author_profile().await.unwrap().unwrap();
    assert_eq!(profile.name, "Author");
}
