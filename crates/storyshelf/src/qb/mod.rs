//! Chainable REST query builder.
//!
//! A [`TableQuery`] accumulates one table operation: verb, projection,
//! filters, ordering and payload. Executing it sends exactly one HTTP request
//! to `{base_url}/{rest_path}/{table}` and normalizes the outcome into a
//! [`QueryResponse`] pair.
//!
//! # Serialization rules
//!
//! - GET: `select=<projection>`, then filters in call order, then
//!   `order=<column>.<asc|desc>`.
//! - POST / PATCH / DELETE: filters only.
//! - POST / PATCH send the payload as a JSON body.
//! - All requests carry `apikey`, `Authorization: Bearer` and
//!   `Content-Type: application/json`; everything but DELETE also asks for
//!   `Prefer: return=representation`.
//!
//! # Usage
//!
//! ```ignore
//! use storyshelf::{qb, RestClient};
//!
//! let client = RestClient::from_env();
//!
//! // Awaiting the bound handle returns the raw pair
//! let resp = client
//!     .from("stories")
//!     .select("*")
//!     .eq("published", true)
//!     .order("story_date", false)
//!     .await;
//!
//! // Detached descriptors can be built, cloned and executed later
//! let query = qb::table("comments").delete().eq("id", comment_id);
//! let resp = query.execute(&client).await;
//! ```

mod bound;
mod filter;
mod query;
mod request;
mod response;
mod verb;

pub use bound::BoundQuery;
pub use filter::{Filter, Order, or_ilike};
pub use query::TableQuery;
pub use request::RestRequest;
pub use response::{QueryResponse, RawResponse};
pub use verb::Verb;

/// Start a detached descriptor for `table`.
///
/// # Example
/// ```ignore
/// let q = storyshelf::qb::table("stories").select("*").eq("slug", "x");
/// ```
pub fn table(table: &str) -> TableQuery {
    TableQuery::new(table)
}
