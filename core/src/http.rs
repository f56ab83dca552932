//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `ContentClient` builds
//! `HttpRequest` values and maps `HttpResponse` values into envelopes; the
//! `Transport` implementation is the only place that touches the network.

use std::fmt;

use url::Url;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: base URL, path and query string already joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A request carrying the JSON content-type header every call sends.
    pub fn json(method: HttpMethod, url: String, body: Option<String>) -> Self {
        Self {
            method,
            url,
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Query-string builder that skips absent values.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append the pairs to `url`'s query, form-encoded. An empty set leaves
    /// `url` without a `?`.
    pub fn apply(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news_url() -> Url {
        Url::parse("http://api/news/public").unwrap()
    }

    #[test]
    fn absent_params_are_not_sent() {
        let mut url = news_url();
        QueryParams::new()
            .push::<bool>("featured", None)
            .push("limit", Some(3))
            .apply(&mut url);
        assert_eq!(url.as_str(), "http://api/news/public?limit=3");
        assert!(!url.as_str().contains("undefined"));
    }

    #[test]
    fn empty_query_leaves_url_alone() {
        let mut url = news_url();
        QueryParams::new().push::<u32>("limit", None).apply(&mut url);
        assert_eq!(url.as_str(), "http://api/news/public");
    }

    #[test]
    fn values_are_form_encoded() {
        let mut url = news_url();
        QueryParams::new().push("tag", Some("a&b=c")).apply(&mut url);
        assert_eq!(url.query(), Some("tag=a%26b%3Dc"));
    }

    #[test]
    fn success_covers_all_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
