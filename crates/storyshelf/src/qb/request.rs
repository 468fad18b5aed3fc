//! Serialization of a descriptor into one HTTP request.

use crate::config::ClientConfig;
use crate::error::RestResult;
use crate::qb::query::TableQuery;
use crate::qb::verb::Verb;
use url::Url;

/// A fully serialized request, independent of the HTTP library that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub verb: Verb,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl RestRequest {
    pub(crate) fn build(query: &TableQuery, config: &ClientConfig) -> RestResult<Self> {
        let verb = query.verb();

        let mut url = Url::parse(&config.table_endpoint(query.table()))?;
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut headers = vec![
            ("apikey", config.api_key.clone()),
            ("Authorization", format!("Bearer {}", config.api_key)),
            ("Content-Type", "application/json".to_string()),
        ];
        if verb != Verb::Delete {
            headers.push(("Prefer", "return=representation".to_string()));
        }

        let body = match (verb.has_body(), query.payload()) {
            (true, Some(payload)) => Some(serde_json::to_string(payload)?),
            _ => None,
        };

        Ok(Self {
            verb,
            url,
            headers,
            body,
        })
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query pairs of the URL, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}
