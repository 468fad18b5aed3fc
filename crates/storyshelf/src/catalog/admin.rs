//! Password-gated admin operations.

use crate::catalog::models::{
    AUTHOR_PROFILE, COMMENTS, Comment, ProfileUpdate, STORIES, Story, StoryDraft,
};
use crate::client::{ReqwestTransport, RestClient, Transport};
use crate::error::{RestError, RestResult};
use std::env;
use uuid::Uuid;

/// Environment variable holding the admin secret.
pub const ENV_ADMIN_SECRET: &str = "STORYSHELF_ADMIN_SECRET";

/// Static shared secret guarding the admin surface.
#[derive(Clone)]
pub struct AdminGate {
    secret: String,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Read the secret from `STORYSHELF_ADMIN_SECRET`. `None` when unset or
    /// empty: an empty secret would unlock on an empty password.
    pub fn from_env() -> Option<Self> {
        Self::from_secret(env::var(ENV_ADMIN_SECRET).ok())
    }

    fn from_secret(secret: Option<String>) -> Option<Self> {
        secret.filter(|s| !s.is_empty()).map(Self::new)
    }

    /// Open the admin console when `password` matches.
    pub fn unlock<T: Transport>(
        &self,
        password: &str,
        client: RestClient<T>,
    ) -> RestResult<AdminConsole<T>> {
        if password == self.secret {
            tracing::info!(target: "storyshelf.admin", "admin console unlocked");
            Ok(AdminConsole { client })
        } else {
            tracing::warn!(target: "storyshelf.admin", "rejected admin password");
            Err(RestError::Unauthorized)
        }
    }
}

/// Story CRUD, comment moderation and profile editing.
///
/// Only obtainable through [`AdminGate::unlock`].
#[derive(Debug)]
pub struct AdminConsole<T: Transport = ReqwestTransport> {
    client: RestClient<T>,
}

impl<T: Transport> AdminConsole<T> {
    /// All stories, published or not, newest first.
    pub async fn all_stories(&self) -> RestResult<Vec<Story>> {
        self.client
            .from(STORIES)
            .select("*")
            .order("created_at", false)
            .await
            .into_rows()
    }

    /// All comments, newest first.
    pub async fn all_comments(&self) -> RestResult<Vec<Comment>> {
        self.client
            .from(COMMENTS)
            .select("*")
            .order("created_at", false)
            .await
            .into_rows()
    }

    pub async fn create_story(&self, draft: &StoryDraft) -> RestResult<Story> {
        check_draft(draft)?;
        self.client
            .from(STORIES)
            .insert(std::slice::from_ref(draft))
            .select("*")
            .await
            .into_first()?
            .ok_or(RestError::NoRows)
    }

    /// Patch a story and re-read it.
    ///
    /// A successful patch whose re-read comes back empty still succeeds,
    /// with the draft applied over `story`.
    pub async fn update_story(&self, story: &Story, draft: &StoryDraft) -> RestResult<Story> {
        check_draft(draft)?;
        self.client
            .from(STORIES)
            .update(draft)
            .eq("id", story.id)
            .await
            .into_result()?;

        let fresh = self
            .client
            .from(STORIES)
            .select("*")
            .eq("id", story.id)
            .await
            .into_first()?;

        Ok(fresh.unwrap_or_else(|| {
            tracing::warn!(target: "storyshelf.admin", id = %story.id, "updated story not returned on re-read");
            draft.apply_to(story)
        }))
    }

    pub async fn delete_story(&self, id: Uuid) -> RestResult<()> {
        self.client
            .from(STORIES)
            .delete()
            .eq("id", id)
            .await
            .into_result()
            .map(|_| ())
    }

    pub async fn delete_comment(&self, id: Uuid) -> RestResult<()> {
        self.client
            .from(COMMENTS)
            .delete()
            .eq("id", id)
            .await
            .into_result()
            .map(|_| ())
    }

    pub async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> RestResult<()> {
        self.client
            .from(AUTHOR_PROFILE)
            .update(update)
            .eq("id", id)
            .await
            .into_result()
            .map(|_| ())
    }
}

fn check_draft(draft: &StoryDraft) -> RestResult<()> {
    match draft.missing_field() {
        Some(field) => Err(RestError::validation(format!("story {field} is required"))),
        None => Ok(()),
    }
}
