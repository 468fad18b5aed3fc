//! The story catalog: typed records and the operations the reading and
//! admin surfaces perform through the query builder.

mod admin;
mod models;
mod store;

pub use admin::{AdminConsole, AdminGate, ENV_ADMIN_SECRET};
pub use models::{
    AUTHOR_PROFILE, AuthorProfile, COMMENTS, Comment, DEFAULT_DESCRIPTION, NewComment, NewLike,
    ProfileUpdate, STORIES, STORY_LIKES, Story, StoryDraft, StoryLike,
};
pub use store::{SEARCH_COLUMNS, StoryStore, new_user_identifier};
