//! Shared HTTP client and the authenticated API call path.
//!
//! This module provides:
//! - The middleware-wrapped `reqwest` client (timeout, user agent, tracing)
//! - Bearer-token injection from the session store on every request
//! - The one place a 401 response is turned into "clear the session, notify
//!   the application, surface [`Error::Unauthorized`]"
//! - Error-body message extraction shared by all resource groups

use std::sync::Arc;

use http::Extensions;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Result as MiddlewareResult};
use reqwest_tracing::{
    ReqwestOtelSpanBackend, TracingMiddleware, default_on_request_end, reqwest_otel_span,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::SessionStore;

/// Fired after a 401 response has already cleared the stored session.
///
/// Applications register for this through
/// [`ApiClient::on_session_invalidated`](crate::ApiClient::on_session_invalidated)
/// to route the user back to a login flow. By the time the hook runs the
/// session store is empty, so re-entrant API calls go out unauthenticated
/// rather than replaying the dead token.
#[derive(Debug, Clone)]
pub struct SessionInvalidated {
    /// Method of the request that was rejected.
    pub method: Method,
    /// Path of the request that was rejected.
    pub path: String,
}

pub(crate) type InvalidatedHook = Arc<dyn Fn(&SessionInvalidated) + Send + Sync>;

// Only ever used as a type parameter to TracingMiddleware, so it is never
// constructed.
#[allow(dead_code)]
struct RequestSpan;

impl ReqwestOtelSpanBackend for RequestSpan {
    fn on_request_start(req: &Request, _extension: &mut Extensions) -> Span {
        // Headers are deliberately not recorded: the Authorization header
        // carries the bearer token.
        reqwest_otel_span!(name = "carddesk-api-request", req)
    }

    fn on_request_end(
        span: &Span,
        outcome: &MiddlewareResult<Response>,
        _extension: &mut Extensions,
    ) {
        default_on_request_end(span, outcome);
    }
}

/// A request against the API base URL, before authentication is applied.
#[derive(Debug)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub(crate) fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    #[must_use]
    pub(crate) fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The shared transport: one middleware-wrapped client, one base URL, one
/// session store. Every resource group call funnels through [`Self::send`].
#[derive(Clone)]
pub(crate) struct HttpClient {
    http: ClientWithMiddleware,
    base_url: String,
    session: SessionStore,
    on_invalidated: Option<InvalidatedHook>,
}

impl HttpClient {
    pub(crate) fn new(config: Config, session: SessionStore) -> Result<Self> {
        let Config {
            base_url,
            timeout,
            user_agent,
        } = config;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        let http = ClientBuilder::new(client)
            .with(TracingMiddleware::<RequestSpan>::new())
            .build();

        Ok(Self {
            http,
            base_url,
            session,
            on_invalidated: None,
        })
    }

    pub(crate) fn set_invalidated_hook(&mut self, hook: InvalidatedHook) {
        self.on_invalidated = Some(hook);
    }

    pub(crate) const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a request, attaching the stored bearer token when one exists.
    ///
    /// The token is read at send time, so a login or logout between two
    /// calls on the same client takes effect immediately. A 401 response
    /// clears the session store and fires the invalidated hook before the
    /// error is returned; any other non-success status maps to
    /// [`Error::Api`] with the server's message when the body carried one.
    pub(crate) async fn send(&self, req: ApiRequest) -> Result<Response> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = req;

        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(path = %path, "authentication failure, clearing stored session");
            if let Err(err) = self.session.clear() {
                warn!(error = %err, "failed to clear session storage after authentication failure");
            }
            if let Some(hook) = &self.on_invalidated {
                hook(&SessionInvalidated {
                    method,
                    path: path.clone(),
                });
            }
            return Err(Error::Unauthorized { path });
        }
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(Error::Api {
                status,
                path,
                message: error_message(&body, status),
            });
        }

        Ok(response)
    }

    /// Send a request and deserialize the JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        Ok(self.send(req).await?.json::<T>().await?)
    }

    /// Send a request whose response body does not matter (deletes).
    pub(crate) async fn send_unit(&self, req: ApiRequest) -> Result<()> {
        self.send(req).await?;
        Ok(())
    }
}

/// Best-effort human message from an API error body.
///
/// Checks `error.message`, then a string `error`, then a top-level
/// `message`, falling back to the status line.
fn error_message(body: &Value, status: StatusCode) -> String {
    body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .or_else(|| body["message"].as_str())
        .map_or_else(|| format!("HTTP {status}"), ToOwned::to_owned)
}
