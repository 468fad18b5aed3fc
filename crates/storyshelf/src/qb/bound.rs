//! A descriptor bound to a client, executed by awaiting it.

use crate::client::{RestClient, Transport};
use crate::qb::query::TableQuery;
use crate::qb::response::QueryResponse;
use serde::Serialize;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

/// Chainable handle returned by [`RestClient::from`].
///
/// Awaiting the handle executes it and yields the raw pair; [`single`](Self::single)
/// executes and collapses the result to one row.
///
/// ```ignore
/// let resp = client
///     .from("stories")
///     .select("*")
///     .eq("published", true)
///     .order("story_date", true)
///     .await;
/// ```
#[must_use = "a query does nothing until it is awaited"]
pub struct BoundQuery<'c, T: Transport> {
    client: &'c RestClient<T>,
    query: TableQuery,
}

impl<'c, T: Transport> BoundQuery<'c, T> {
    pub(crate) fn new(client: &'c RestClient<T>, table: &str) -> Self {
        Self {
            client,
            query: TableQuery::new(table),
        }
    }

    fn map(self, f: impl FnOnce(TableQuery) -> TableQuery) -> Self {
        Self {
            client: self.client,
            query: f(self.query),
        }
    }

    pub fn select(self, columns: &str) -> Self {
        self.map(|q| q.select(columns))
    }

    pub fn insert<P: Serialize + ?Sized>(self, payload: &P) -> Self {
        self.map(|q| q.insert(payload))
    }

    pub fn update<P: Serialize + ?Sized>(self, payload: &P) -> Self {
        self.map(|q| q.update(payload))
    }

    pub fn delete(self) -> Self {
        self.map(TableQuery::delete)
    }

    pub fn eq(self, column: &str, value: impl std::fmt::Display) -> Self {
        self.map(|q| q.eq(column, value))
    }

    pub fn ilike(self, column: &str, pattern: &str) -> Self {
        self.map(|q| q.ilike(column, pattern))
    }

    pub fn or(self, raw: &str) -> Self {
        self.map(|q| q.or(raw))
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        self.map(|q| q.order(column, ascending))
    }

    /// The descriptor accumulated so far.
    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    /// Detach the descriptor from the client.
    pub fn into_query(self) -> TableQuery {
        self.query
    }

    /// Execute and collapse the result to its first row.
    pub async fn single(self) -> QueryResponse {
        self.client.run(&self.query).await.into_single()
    }
}

impl<'c, T: Transport + 'c> IntoFuture for BoundQuery<'c, T> {
    type Output = QueryResponse;
    type IntoFuture = Pin<Box<dyn Future<Output = QueryResponse> + Send + 'c>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.client.run(&self.query).await })
    }
}
