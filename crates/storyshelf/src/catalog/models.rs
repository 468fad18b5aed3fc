//! Records stored in the site's tables and the payloads written to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STORIES: &str = "stories";
pub const COMMENTS: &str = "comments";
pub const STORY_LIKES: &str = "story_likes";
pub const AUTHOR_PROFILE: &str = "author_profile";

/// Description used when a draft leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "Рассказ от автора";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub published: bool,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Free-form `"MM.YYYY"` date, see [`StoryDate`](crate::listing::StoryDate).
    #[serde(default)]
    pub story_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_name: String,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_identifier: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryLike {
    pub id: Uuid,
    pub story_id: Uuid,
    pub user_identifier: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub about: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Story fields written by the admin editor, for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryDraft {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub story_date: Option<String>,
}

impl StoryDraft {
    /// Normalize editor input: fields are trimmed, a blank description gets
    /// the default blurb, blank optional fields become null.
    pub fn new(
        title: &str,
        slug: &str,
        description: &str,
        content: &str,
        image_url: Option<&str>,
        published: bool,
        story_date: Option<&str>,
    ) -> Self {
        let description = description.trim();
        Self {
            title: title.trim().to_string(),
            slug: slug.trim().to_string(),
            description: if description.is_empty() {
                DEFAULT_DESCRIPTION.to_string()
            } else {
                description.to_string()
            },
            content: content.trim().to_string(),
            image_url: non_blank(image_url),
            published,
            story_date: non_blank(story_date),
        }
    }

    /// Title and slug are required.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.slug.is_empty() {
            Some("slug")
        } else {
            None
        }
    }

    /// `story` with the draft's fields written over it. Counters and
    /// timestamps are kept.
    pub fn apply_to(&self, story: &Story) -> Story {
        Story {
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            image_url: self.image_url.clone(),
            published: self.published,
            story_date: self.story_date.clone(),
            ..story.clone()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub story_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub author_identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLike {
    pub story_id: Uuid,
    pub user_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: String,
    pub about: String,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// A blank avatar URL is written as null.
    pub fn new(name: &str, bio: &str, about: &str, avatar_url: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            bio: bio.to_string(),
            about: about.to_string(),
            avatar_url: non_blank(avatar_url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct ViewCount {
    pub views_count: i64,
}
