//! Content API configuration, resolved once at process start.
//!
//! # Design
//! The base URL and the execution context are plain values handed to
//! `ContentClient::new`. Request code never reads the environment; the only
//! ambient read lives in `ApiConfig::from_env`.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when neither an injected override nor `CONTENT_API_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Per-request timeout applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the content API base URL.
pub const BASE_URL_VAR: &str = "CONTENT_API_URL";

/// Environment variable naming the deployment; `production` disables diagnostics.
pub const SITE_ENV_VAR: &str = "SITE_ENV";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid content API base URL {value:?}: {source}")]
    InvalidBaseUrl { value: String, source: url::ParseError },

    #[error("content API base URL {0:?} cannot carry a path")]
    NotABase(String),
}

/// Where the client is running.
///
/// A browser build may have the base URL injected at runtime; that override
/// wins over anything baked into the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    Server,
    Browser { injected_url: Option<String> },
}

impl ExecutionContext {
    pub fn is_server(&self) -> bool {
        matches!(self, ExecutionContext::Server)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
    context: ExecutionContext,
    production: bool,
}

impl ApiConfig {
    /// Resolve the base URL from explicit inputs.
    ///
    /// Precedence: browser-injected override, then `env_url`, then
    /// [`DEFAULT_BASE_URL`]. Blank values count as absent. Trailing slashes,
    /// query and fragment are dropped.
    pub fn resolve(context: ExecutionContext, env_url: Option<&str>, production: bool) -> Result<Self, ConfigError> {
        let injected = match &context {
            ExecutionContext::Browser { injected_url } => non_blank(injected_url.as_deref()),
            ExecutionContext::Server => None,
        };
        let chosen = injected
            .or_else(|| non_blank(env_url))
            .unwrap_or(DEFAULT_BASE_URL);

        Ok(Self {
            base_url: parse_base(chosen)?,
            timeout: DEFAULT_TIMEOUT,
            context,
            production,
        })
    }

    /// Resolve from `CONTENT_API_URL` and `SITE_ENV`.
    pub fn from_env(context: ExecutionContext) -> Result<Self, ConfigError> {
        let env_url = std::env::var(BASE_URL_VAR).ok();
        let production = std::env::var(SITE_ENV_VAR)
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        Self::resolve(context, env_url.as_deref(), production)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The resolved base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for `segments` under the base path. Each segment is
    /// percent-encoded on its own, so `/`, `?` and `#` inside a segment stay
    /// literal.
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // `parse_base` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Server-side, non-production processes log the resolved base URL.
    pub fn logs_diagnostics(&self) -> bool {
        self.context.is_server() && !self.production
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim_end_matches('/')).map_err(|source| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(raw.to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
