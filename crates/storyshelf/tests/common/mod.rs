#![allow(dead_code)]

use serde_json::{Value, json};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use storyshelf::{ClientConfig, RawResponse, RestClient, RestError, RestRequest, RestResult, Transport};

/// Replays queued outcomes in order and records every request.
/// An empty queue answers `200 []`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<RestResult<RawResponse>>>,
    seen: Mutex<Vec<RestRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn reply_json(self, status: u16, body: Value) -> Self {
        let text = body.to_string();
        self.reply(status, &text)
    }

    pub fn fail(self, error: RestError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RestRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: RestRequest) -> impl Future<Output = RestResult<RawResponse>> + Send {
        self.seen.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "[]")));
        async move { reply }
    }
}

pub fn client(transport: ScriptedTransport) -> RestClient<ScriptedTransport> {
    RestClient::with_transport(
        ClientConfig::new("https://db.example.co", "anon-key"),
        transport,
    )
}

pub const STORY_ID: &str = "6f1c1d0e-2b8a-4d43-9a4e-3c1f5e1b2a10";

pub fn story_row(slug: &str, likes: i64, date: Option<&str>) -> Value {
    json!({
        "id": STORY_ID,
        "title": slug.to_uppercase(),
        "slug": slug,
        "description": "desc",
        "content": "**Hello** world",
        "image_url": null,
        "published": true,
        "likes_count": likes,
        "views_count": 7,
        "created_at": "2024-01-05T10:00:00+00:00",
        "updated_at": "2024-01-05T10:00:00+00:00",
        "story_date": date
    })
}

pub fn comment_row(id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "story_id": STORY_ID,
        "author_name": "Reader",
        "author_email": null,
        "author_identifier": "user_1",
        "content": content,
        "created_at": "2024-02-01T08:30:00+00:00"
    })
}

pub fn profile_row() -> Value {
    json!({
        "id": "0d7c5c2e-1111-4a4a-8b8b-222233334444",
        "name": "Author",
        "bio": "bio",
        "about": "about",
        "avatar_url": null,
        "updated_at": "2024-01-01T00:00:00+00:00"
    })
}
