//! The query descriptor: one not-yet-executed table operation.

use crate::client::{RestClient, Transport};
use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::qb::filter::{Filter, Order};
use crate::qb::request::RestRequest;
use crate::qb::response::QueryResponse;
use crate::qb::verb::Verb;
use serde::Serialize;
use serde_json::Value;

/// Accumulated description of one remote table operation.
///
/// Every builder method consumes the descriptor and returns the refined one,
/// so a descriptor can be cloned, branched and shared freely.
#[derive(Clone, Debug)]
pub struct TableQuery {
    /// Target table
    table: String,
    /// Chosen verb (`None` until `select`/`insert`/`update`/`delete`)
    verb: Option<Verb>,
    /// Projection (default "*")
    columns: String,
    /// Filter clauses in call order
    filters: Vec<Filter>,
    /// Single sort clause
    order: Option<Order>,
    /// Payload for POST/PATCH
    payload: Option<Value>,
    /// Build error
    build_error: Option<String>,
}

impl TableQuery {
    /// Create a descriptor for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            verb: None,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            payload: None,
            build_error: None,
        }
    }

    // ==================== Verb & shape ====================

    /// Request a projection. Marks the descriptor GET unless a write verb
    /// was already chosen.
    pub fn select(mut self, columns: &str) -> Self {
        if self.verb.is_none() {
            self.verb = Some(Verb::Get);
        }
        self.columns = columns.to_string();
        self
    }

    /// Create one record, or several when `payload` serializes to an array.
    pub fn insert<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        self.set_write(Verb::Post);
        self.set_payload(payload);
        self
    }

    /// Patch the selected rows with a partial record.
    pub fn update<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        self.set_write(Verb::Patch);
        self.set_payload(payload);
        self
    }

    /// Delete the selected rows.
    pub fn delete(mut self) -> Self {
        self.set_write(Verb::Delete);
        self.payload = None;
        self
    }

    fn set_write(&mut self, verb: Verb) {
        if let Some(current) = self.verb
            && current.is_write()
            && current != verb
            && self.build_error.is_none()
        {
            self.build_error = Some(format!(
                "conflicting verbs on table '{}': {} then {}",
                self.table, current, verb
            ));
        }
        self.verb = Some(verb);
    }

    fn set_payload<T: Serialize + ?Sized>(&mut self, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.payload = Some(value),
            Err(e) => {
                if self.build_error.is_none() {
                    self.build_error = Some(format!("payload serialization failed: {e}"));
                }
            }
        }
    }

    // ==================== Filters ====================

    /// Add filter: `column=eq.value`
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    /// Add filter: `column=ilike.pattern`
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.filters.push(Filter::ilike(column, pattern));
        self
    }

    /// Add filter: `or=(raw)`
    pub fn or(mut self, raw: &str) -> Self {
        self.filters.push(Filter::or(raw));
        self
    }

    /// Add filter: `column=eq.value` if value is Some
    pub fn eq_opt<V: std::fmt::Display>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    /// Add a pre-built filter clause.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    // ==================== Ordering ====================

    /// Set the sort clause. Replaces any earlier one.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order::new(column, ascending));
        self
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Effective verb (GET when none was chosen).
    pub fn verb(&self) -> Verb {
        self.verb.unwrap_or(Verb::Get)
    }

    pub fn columns(&self) -> &str {
        &self.columns
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Filter clauses as strings, in call order.
    pub fn clauses(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.to_string()).collect()
    }

    pub fn order_clause(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }

    /// Validate builder state before execution.
    pub fn validate(&self) -> RestResult<()> {
        if let Some(ref err) = self.build_error {
            return Err(RestError::Validation(err.clone()));
        }
        Ok(())
    }

    // ==================== Serialization ====================

    /// Query-string pairs in emission order.
    ///
    /// GET emits `select`, then the filters, then `order`. Other verbs emit
    /// the filters only: projection and ordering never reach a write.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        let is_read = self.verb() == Verb::Get;

        if is_read {
            pairs.push(("select".to_string(), self.columns.clone()));
        }

        for filter in &self.filters {
            let (key, value) = filter.split();
            pairs.push((key.to_string(), value.to_string()));
        }

        if is_read && let Some(ref order) = self.order {
            pairs.push(("order".to_string(), order.to_string()));
        }

        pairs
    }

    /// Build the HTTP request this descriptor describes.
    pub fn to_request(&self, config: &ClientConfig) -> RestResult<RestRequest> {
        self.validate()?;
        RestRequest::build(self, config)
    }

    // ==================== Execution ====================

    /// Execute and return the raw `{ data, error }` pair.
    pub async fn execute<T: Transport>(&self, client: &RestClient<T>) -> QueryResponse {
        client.run(self).await
    }

    /// Execute and collapse a list result to its first row.
    pub async fn single<T: Transport>(&self, client: &RestClient<T>) -> QueryResponse {
        client.run(self).await.into_single()
    }
}
