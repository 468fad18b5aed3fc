//! HTTP transport seam and the REST client.

use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::monitor;
use crate::qb::{BoundQuery, QueryResponse, RawResponse, RestRequest, TableQuery};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Sends a serialized request and returns status and body text.
///
/// Implementations report network-level failures as `Err`; HTTP error
/// statuses are returned as ordinary responses and normalized by the caller.
pub trait Transport: Send + Sync {
    fn send(&self, request: RestRequest) -> impl Future<Output = RestResult<RawResponse>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing `reqwest` client (shared connection pool, proxies, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: RestRequest) -> impl Future<Output = RestResult<RawResponse>> + Send {
        let mut builder = self.http.request(request.verb.into(), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}

/// Client for the hosted data store's REST API.
///
/// Holds no per-query state: each [`from`](Self::from) starts a fresh
/// descriptor, so one client can serve any number of concurrent queries.
#[derive(Debug)]
pub struct RestClient<T: Transport = ReqwestTransport> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T: Transport> Clone for RestClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl RestClient<ReqwestTransport> {
    /// Create a client using `reqwest`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Create a client from `STORYSHELF_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> RestClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> BoundQuery<'_, T> {
        BoundQuery::new(self, table)
    }

    /// Execute a descriptor and normalize the outcome.
    ///
    /// Never fails: every error ends up in the returned pair.
    pub async fn run(&self, query: &TableQuery) -> QueryResponse {
        let request = match query.to_request(&self.config) {
            Ok(request) => request,
            Err(err) => {
                monitor::log_failure(query.table(), query.verb(), &err);
                return QueryResponse::failure(err);
            }
        };

        monitor::log_request(query.table(), &request);
        let verb = request.verb;
        let start = Instant::now();

        let outcome = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.transport.send(request))
                .await
                .unwrap_or(Err(RestError::Timeout(timeout))),
            None => self.transport.send(request).await,
        };

        match outcome {
            Ok(raw) => {
                monitor::log_response(query.table(), verb, &raw, start.elapsed());
                let response = QueryResponse::from_raw(verb, raw);
                if let Some(ref err) = response.error {
                    monitor::log_failure(query.table(), verb, err);
                }
                response
            }
            Err(err) => {
                monitor::log_failure(query.table(), verb, &err);
                QueryResponse::failure(err)
            }
        }
    }
}
