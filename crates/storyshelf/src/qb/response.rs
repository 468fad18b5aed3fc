//! Normalization of HTTP outcomes into a `{ data, error }` pair.

use crate::error::{RestError, RestResult};
use crate::qb::verb::Verb;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status and body text as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of one execution.
///
/// Every execution path ends here: failures are carried in `error`, never
/// raised. At most one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResponse {
    pub data: Option<Value>,
    pub error: Option<RestError>,
}

impl QueryResponse {
    pub fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// `{ data: null, error: null }`
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failure(error: RestError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Normalize a transport response for the given verb.
    pub fn from_raw(verb: Verb, raw: RawResponse) -> Self {
        if !raw.is_success() {
            return Self::failure(RestError::status(raw.status, raw.body));
        }

        if verb == Verb::Delete {
            return Self::empty();
        }

        if raw.body.trim().is_empty() {
            return Self::empty();
        }

        match serde_json::from_str::<Value>(&raw.body) {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(RestError::Parse(e.to_string())),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse a list result to its first element.
    ///
    /// Anything other than a non-empty list becomes an error: the original
    /// error when there was one, [`RestError::NoRows`] otherwise.
    pub fn into_single(self) -> Self {
        match self.data {
            Some(Value::Array(rows)) if !rows.is_empty() => {
                let first = rows.into_iter().next().unwrap_or(Value::Null);
                Self::success(first)
            }
            _ => Self::failure(self.error.unwrap_or(RestError::NoRows)),
        }
    }

    /// Convert into a `Result`, keeping an absent body as `None`.
    pub fn into_result(self) -> RestResult<Option<Value>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Decode the data as a list of rows. No data decodes to an empty list;
    /// a lone object decodes to one row.
    pub fn into_rows<T: DeserializeOwned>(self) -> RestResult<Vec<T>> {
        match self.into_result()? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(rows)) => rows
                .into_iter()
                .map(|row| serde_json::from_value(row).map_err(RestError::from))
                .collect(),
            Some(row) => Ok(vec![serde_json::from_value(row)?]),
        }
    }

    /// Decode the first row, if any.
    pub fn into_first<T: DeserializeOwned>(self) -> RestResult<Option<T>> {
        Ok(self.into_rows::<T>()?.into_iter().next())
    }
}
