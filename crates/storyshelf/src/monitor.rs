//! `tracing` events for REST executions.
//!
//! Events are emitted on the `storyshelf.rest` target: requests and responses
//! at `DEBUG`, failures at `WARN`. Bodies are truncated to
//! [`MAX_BODY_LOG_BYTES`].

use crate::error::RestError;
use crate::qb::{RawResponse, RestRequest, Verb};
use std::time::Duration;

/// Maximum number of body bytes included in a log event.
pub const MAX_BODY_LOG_BYTES: usize = 200;

pub(crate) fn truncate_body(body: &str, max_bytes: usize) -> &str {
    if body.len() <= max_bytes {
        return body;
    }
    let mut end = max_bytes;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

pub(crate) fn log_request(table: &str, request: &RestRequest) {
    tracing::debug!(
        target: "storyshelf.rest",
        table,
        verb = %request.verb,
        url = %request.url,
        has_body = request.body.is_some(),
        "executing query"
    );
}

pub(crate) fn log_response(table: &str, verb: Verb, raw: &RawResponse, elapsed: Duration) {
    tracing::debug!(
        target: "storyshelf.rest",
        table,
        verb = %verb,
        status = raw.status,
        elapsed_ms = elapsed.as_millis() as u64,
        body = truncate_body(&raw.body, MAX_BODY_LOG_BYTES),
        "response received"
    );
}

pub(crate) fn log_failure(table: &str, verb: Verb, err: &RestError) {
    tracing::warn!(
        target: "storyshelf.rest",
        table,
        verb = %verb,
        error = %err,
        "query failed"
    );
}
