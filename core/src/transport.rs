//! The network boundary.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and returns the response as data,
//! whatever its status. Only failures below HTTP semantics (timeouts,
//! unreachable hosts, a crashed worker) come back as `TransportError`;
//! status interpretation belongs to `NormalizedTransport`.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("timeout of {}ms exceeded", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("network error: {0}")]
    Network(String),

    /// The worker executing the request panicked or was cancelled.
    #[error("request aborted: {0}")]
    Aborted(String),
}

pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Blocking ureq agent driven from tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    /// Build an agent whose global timeout covers connect, send and receive.
    ///
    /// 4xx/5xx responses are returned as data rather than `Err`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, timeout }
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || call(&agent, request, timeout))
            .await
            .map_err(|e| TransportError::Aborted(e.to_string()))?
    }
}

fn call(
    agent: &ureq::Agent,
    request: HttpRequest,
    timeout: Duration,
) -> Result<HttpResponse, TransportError> {
    let result = match request.method {
        HttpMethod::Get => with_headers(agent.get(&request.url), &request.headers).call(),
        HttpMethod::Post => {
            let builder = with_headers(agent.post(&request.url), &request.headers);
            match &request.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| map_ureq_error(e, timeout))?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| map_ureq_error(e, timeout))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(error: ureq::Error, timeout: Duration) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout { timeout },
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
            TransportError::Timeout { timeout }
        }
        other => TransportError::Network(other.to_string()),
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedTransport;

#[cfg(any(test, feature = "test-support"))]
mod scripted {
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    use url::Url;

    use super::{Transport, TransportError};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    type Reply = Result<HttpResponse, TransportError>;

    /// In-memory transport answering from a table of canned replies.
    ///
    /// Replies are keyed by method and the URL's encoded path plus query, so
    /// the same script works for any origin. Unscripted requests get an
    /// empty 404.
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        replies: Mutex<HashMap<(HttpMethod, String), Reply>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
            self.insert(method, path, Ok(HttpResponse::new(status, body)))
        }

        pub fn fail(self, method: HttpMethod, path: &str, error: TransportError) -> Self {
            self.insert(method, path, Err(error))
        }

        /// Every request executed so far, in order.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn insert(self, method: HttpMethod, path: &str, reply: Reply) -> Self {
            self.replies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert((method, path.to_string()), reply);
            self
        }
    }

    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Reply {
            let key = (request.method, route_key(&request.url));
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            self.replies
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
        }
    }

    fn route_key(url: &str) -> String {
        match Url::parse(url) {
            Ok(url) => match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            },
            Err(_) => url.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn route_key_drops_origin() {
            assert_eq!(route_key("http://localhost:3001/news/public?limit=3"), "/news/public?limit=3");
            assert_eq!(route_key("https://cms.example.mn"), "/");
            assert_eq!(route_key("http://api/services/public/a%20b"), "/services/public/a%20b");
        }

        #[tokio::test]
        async fn unscripted_requests_get_404() {
            let transport = ScriptedTransport::new();
            let request = HttpRequest::json(HttpMethod::Get, "http://api/missing".to_string(), None);
            let response = transport.execute(request).await.unwrap();
            assert_eq!(response.status, 404);
            assert_eq!(transport.requests().len(), 1);
        }
    }
}
