//! # storyshelf
//!
//! Data access for a personal storytelling site whose tables live behind a
//! hosted database's auto-generated REST API.
//!
//! ## Features
//!
//! - **Chainable queries**: `select` / `insert` / `update` / `delete`, `eq`,
//!   `ilike`, `or`, `order`, compiled into one HTTP request
//! - **Result pairs**: every execution ends in a [`QueryResponse`]
//!   (`{ data, error }`); nothing panics, nothing is retried
//! - **Immutable descriptors**: each builder call returns a new value, so one
//!   client serves concurrent queries
//! - **Pluggable transport**: `reqwest` by default, any [`Transport`] in tests
//! - **Story catalog**: typed stories, comments, likes and profile, plus the
//!   admin operations behind a shared secret
//! - **Listing helpers**: sorting, year archive, pagination, markdown subset
//!
//! ## Query builder
//!
//! ```ignore
//! use storyshelf::{ClientConfig, RestClient};
//!
//! let client = RestClient::new(ClientConfig::new(url, key));
//!
//! // SELECT
//! let resp = client
//!     .from("stories")
//!     .select("*")
//!     .eq("published", true)
//!     .order("created_at", false)
//!     .await;
//!
//! // INSERT, returning the stored row
//! let resp = client
//!     .from("comments")
//!     .insert(&new_comment)
//!     .select("*")
//!     .single()
//!     .await;
//!
//! // DELETE
//! let resp = client.from("comments").delete().eq("id", id).await;
//! if let Some(err) = resp.error {
//!     // revert optimistic state
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod markdown;
pub mod monitor;
pub mod qb;

pub use catalog::{AdminConsole, AdminGate, StoryStore};
pub use client::{ReqwestTransport, RestClient, Transport};
pub use config::ClientConfig;
pub use error::{RestError, RestResult};
pub use qb::{BoundQuery, Filter, Order, QueryResponse, RawResponse, RestRequest, TableQuery, Verb};
