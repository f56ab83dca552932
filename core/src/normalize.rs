//! Folds every transport outcome into a non-failing `RawResult`.
//!
//! # Design
//! `NormalizedTransport` wraps a `Transport` and is the only way accessors
//! reach the network, so the no-throw contract is visible at each call site:
//! `send` returns `RawResult`, never `Result`. A 2xx response passes through
//! untouched; anything else becomes a `Failure` carrying a message and a
//! status code.

use tracing::error;

use crate::config::ApiConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Status reported for failures that never produced an HTTP response.
pub const FALLBACK_STATUS: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    Success(HttpResponse),
    Failure(Failure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Timeout, unreachable host, aborted worker.
    Transport,
    /// The server answered with a non-2xx status.
    Status,
}

/// A normalized failure.
///
/// Fields are private so a transport failure can only ever carry
/// [`FALLBACK_STATUS`]; "404 plus a transport error" cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    status: u16,
    cause: FailureCause,
}

impl Failure {
    pub fn from_transport(error: &TransportError) -> Self {
        Self {
            message: error.to_string(),
            status: FALLBACK_STATUS,
            cause: FailureCause::Transport,
        }
    }

    pub fn from_status(status: u16) -> Self {
        Self {
            message: format!("Request failed with status code {status}"),
            status,
            cause: FailureCause::Status,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn cause(&self) -> FailureCause {
        self.cause
    }

    /// The server said the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.cause == FailureCause::Status && self.status == 404
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

#[derive(Debug)]
pub struct NormalizedTransport<T> {
    inner: T,
    config: ApiConfig,
}

impl<T: Transport> NormalizedTransport<T> {
    pub fn new(inner: T, config: ApiConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub async fn send(&self, request: HttpRequest) -> RawResult {
        let url = request.url.clone();
        let failure = match self.inner.execute(request).await {
            Ok(response) if response.is_success() => return RawResult::Success(response),
            Ok(response) => Failure::from_status(response.status),
            Err(err) => Failure::from_transport(&err),
        };

        if self.config.context().is_server() {
            error!(
                url = %url,
                base_url = %self.config.base_url(),
                status = failure.status(),
                message = %failure.message(),
                "content API request failed"
            );
        }
        RawResult::Failure(failure)
    }
}
