//! Operations of the public reading surface.

use crate::catalog::models::{
    AUTHOR_PROFILE, AuthorProfile, COMMENTS, Comment, NewComment, NewLike, STORIES, STORY_LIKES,
    Story, ViewCount,
};
use crate::client::{ReqwestTransport, RestClient, Transport};
use crate::error::{RestError, RestResult};
use crate::qb::or_ilike;
use uuid::Uuid;

/// Columns searched by [`StoryStore::published_stories`].
pub const SEARCH_COLUMNS: [&str; 3] = ["title", "description", "content"];

/// Typed access to stories, comments, likes and the author profile.
#[derive(Debug, Clone)]
pub struct StoryStore<T: Transport = ReqwestTransport> {
    client: RestClient<T>,
}

impl<T: Transport> StoryStore<T> {
    pub fn new(client: RestClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient<T> {
        &self.client
    }

    /// The author profile (first row), if one exists.
    pub async fn author_profile(&self) -> RestResult<Option<AuthorProfile>> {
        self.client
            .from(AUTHOR_PROFILE)
            .select("*")
            .await
            .into_first()
    }

    /// Published stories, optionally narrowed by a case-insensitive search
    /// over title, description and content. Unordered; see
    /// [`sort_stories`](crate::listing::sort_stories).
    pub async fn published_stories(&self, search: Option<&str>) -> RestResult<Vec<Story>> {
        let mut query = self.client.from(STORIES).select("*").eq("published", true);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.or(&or_ilike(&SEARCH_COLUMNS, &format!("%{term}%")));
        }

        query.await.into_rows()
    }

    /// Published stories ordered by `story_date`.
    pub async fn archive(&self, ascending: bool) -> RestResult<Vec<Story>> {
        self.client
            .from(STORIES)
            .select("*")
            .eq("published", true)
            .order("story_date", ascending)
            .await
            .into_rows()
    }

    /// A published story by slug.
    pub async fn story_by_slug(&self, slug: &str) -> RestResult<Option<Story>> {
        self.client
            .from(STORIES)
            .select("*")
            .eq("slug", slug)
            .eq("published", true)
            .await
            .into_first()
    }

    /// Bump the view counter of a story. Returns the new count.
    pub async fn record_view(&self, story: &Story) -> RestResult<i64> {
        let views = ViewCount {
            views_count: story.views_count + 1,
        };
        self.client
            .from(STORIES)
            .update(&views)
            .eq("id", story.id)
            .await
            .into_result()?;
        Ok(views.views_count)
    }

    /// Comments of a story, newest first.
    pub async fn comments_for(&self, story_id: Uuid) -> RestResult<Vec<Comment>> {
        self.client
            .from(COMMENTS)
            .select("*")
            .eq("story_id", story_id)
            .order("created_at", false)
            .await
            .into_rows()
    }

    /// Post a comment and return the stored row.
    pub async fn add_comment(&self, comment: &NewComment) -> RestResult<Comment> {
        if comment.author_name.trim().is_empty() || comment.content.trim().is_empty() {
            return Err(RestError::validation("comment needs a name and content"));
        }
        self.client
            .from(COMMENTS)
            .insert(comment)
            .select("*")
            .single()
            .await
            .into_first()?
            .ok_or(RestError::NoRows)
    }

    /// Delete a comment by id.
    pub async fn delete_comment(&self, id: Uuid) -> RestResult<()> {
        self.client
            .from(COMMENTS)
            .delete()
            .eq("id", id)
            .await
            .into_result()
            .map(|_| ())
    }

    /// Whether `user` has liked the story.
    pub async fn is_liked(&self, story_id: Uuid, user: &str) -> RestResult<bool> {
        let resp = self
            .client
            .from(STORY_LIKES)
            .select("id")
            .eq("story_id", story_id)
            .eq("user_identifier", user)
            .single()
            .await;

        match resp.into_result() {
            Ok(data) => Ok(data.is_some()),
            Err(RestError::NoRows) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub async fn like(&self, story_id: Uuid, user: &str) -> RestResult<()> {
        let like = NewLike {
            story_id,
            user_identifier: user.to_string(),
        };
        self.client
            .from(STORY_LIKES)
            .insert(&like)
            .await
            .into_result()
            .map(|_| ())
    }

    pub async fn unlike(&self, story_id: Uuid, user: &str) -> RestResult<()> {
        self.client
            .from(STORY_LIKES)
            .delete()
            .eq("story_id", story_id)
            .eq("user_identifier", user)
            .await
            .into_result()
            .map(|_| ())
    }

    /// Flip the like state of `user` for a story. Returns the new state.
    pub async fn toggle_like(&self, story_id: Uuid, user: &str) -> RestResult<bool> {
        if self.is_liked(story_id, user).await? {
            self.unlike(story_id, user).await?;
            Ok(false)
        } else {
            self.like(story_id, user).await?;
            Ok(true)
        }
    }
}

/// A stable anonymous identifier for likes and comments.
pub fn new_user_identifier() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}
