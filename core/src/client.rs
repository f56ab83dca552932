//! Content accessors: one per resource of the content API.
//!
//! # Design
//! Each resource is split into a `build_*` method producing an
//! `HttpRequest` and a `parse_*` function mapping the normalized
//! `RawResult` to an `Envelope`. Both halves are pure, so they are tested
//! without a network; the async accessors only compose them around
//! `NormalizedTransport::send`.
//!
//! List accessors never report errors: every failure collapses to an empty
//! list. Single-item accessors keep three outcomes apart: failure (`error`
//! set), not found (`data: None`, no `error`) and found.

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::http::{HttpMethod, HttpRequest, QueryParams};
use crate::normalize::{NormalizedTransport, RawResult, FALLBACK_STATUS};
use crate::transport::Transport;
use crate::types::{CompanyInfo, ContactMessage, News, Partner, Project, Service, Slug, TeamMember};

/// Async client for the public content endpoints.
#[derive(Debug)]
pub struct ContentClient<T> {
    transport: NormalizedTransport<T>,
}

impl<T: Transport> ContentClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        if config.logs_diagnostics() {
            info!(base_url = %config.base_url(), "content API base URL");
        }
        Self {
            transport: NormalizedTransport::new(transport, config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        self.transport.config()
    }

    pub fn transport(&self) -> &T {
        self.transport.inner()
    }

    fn get<const N: usize>(&self, segments: [&str; N]) -> HttpRequest {
        HttpRequest::json(HttpMethod::Get, self.config().endpoint(segments).into(), None)
    }

    fn get_with_query<const N: usize>(&self, segments: [&str; N], query: QueryParams) -> HttpRequest {
        let mut url = self.config().endpoint(segments);
        query.apply(&mut url);
        HttpRequest::json(HttpMethod::Get, url.into(), None)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_company_info(&self) -> HttpRequest {
        self.get(["company-info", "public"])
    }

    pub fn build_services(&self) -> HttpRequest {
        self.get(["services", "public"])
    }

    pub fn build_service(&self, slug: &Slug) -> HttpRequest {
        self.get(["services", "public", slug.as_str()])
    }

    pub fn build_projects(&self, featured: Option<bool>) -> HttpRequest {
        self.get_with_query(["projects", "public"], QueryParams::new().push("featured", featured))
    }

    pub fn build_project(&self, slug: &Slug) -> HttpRequest {
        self.get(["projects", "public", slug.as_str()])
    }

    pub fn build_news(&self, featured: Option<bool>, limit: Option<u32>) -> HttpRequest {
        let query = QueryParams::new().push("featured", featured).push("limit", limit);
        self.get_with_query(["news", "public"], query)
    }

    pub fn build_news_article(&self, slug: &Slug) -> HttpRequest {
        self.get(["news", "public", slug.as_str()])
    }

    pub fn build_team_members(&self) -> HttpRequest {
        self.get(["team-members", "public"])
    }

    pub fn build_partners(&self) -> HttpRequest {
        self.get(["partners", "public"])
    }

    pub fn build_submit_contact(&self, message: &ContactMessage) -> Result<HttpRequest, serde_json::Error> {
        let body = serde_json::to_string(message)?;
        let url = self.config().endpoint(["contact"]);
        Ok(HttpRequest::json(HttpMethod::Post, url.into(), Some(body)))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub async fn company_info(&self) -> Envelope<CompanyInfo> {
        parse_item(self.transport.send(self.build_company_info()).await)
    }

    pub async fn services(&self) -> Envelope<Vec<Service>> {
        parse_list(self.transport.send(self.build_services()).await)
    }

    pub async fn service(&self, slug: &Slug) -> Envelope<Service> {
        parse_item(self.transport.send(self.build_service(slug)).await)
    }

    pub async fn projects(&self, featured: Option<bool>) -> Envelope<Vec<Project>> {
        parse_list(self.transport.send(self.build_projects(featured)).await)
    }

    pub async fn project(&self, slug: &Slug) -> Envelope<Project> {
        parse_item(self.transport.send(self.build_project(slug)).await)
    }

    pub async fn news(&self, featured: Option<bool>, limit: Option<u32>) -> Envelope<Vec<News>> {
        parse_list(self.transport.send(self.build_news(featured, limit)).await)
    }

    pub async fn news_article(&self, slug: &Slug) -> Envelope<News> {
        parse_item(self.transport.send(self.build_news_article(slug)).await)
    }

    pub async fn team_members(&self) -> Envelope<Vec<TeamMember>> {
        parse_list(self.transport.send(self.build_team_members()).await)
    }

    pub async fn partners(&self) -> Envelope<Vec<Partner>> {
        parse_list(self.transport.send(self.build_partners()).await)
    }

    /// Post a contact message. Not idempotent: callers must not retry blindly.
    pub async fn submit_contact(&self, message: &ContactMessage) -> Envelope<serde_json::Value> {
        let request = match self.build_submit_contact(message) {
            Ok(request) => request,
            Err(e) => return Envelope::rejected(e.to_string()),
        };
        parse_submission(self.transport.send(request).await)
    }
}

// ---------------------------------------------------------------------------
// Envelope mapping
// ---------------------------------------------------------------------------

/// Map a list response; every failure becomes an empty list.
pub fn parse_list<T: DeserializeOwned>(raw: RawResult) -> Envelope<Vec<T>> {
    match raw {
        RawResult::Success(response) => match decode::<Vec<T>>(&response.body) {
            Ok(items) => Envelope::list(items.unwrap_or_default()),
            Err(e) => {
                warn!(error = %e, "discarding undecodable content list");
                Envelope::list(Vec::new())
            }
        },
        RawResult::Failure(_) => Envelope::list(Vec::new()),
    }
}

/// Map a single-record response into found / not found / failed.
///
/// A 2xx with a `null` or empty body is not found; a body that does not
/// decode is reported as a failure with status 500.
pub fn parse_item<T: DeserializeOwned>(raw: RawResult) -> Envelope<T> {
    match raw {
        RawResult::Success(response) => match decode::<T>(&response.body) {
            Ok(Some(item)) => Envelope::found(item),
            Ok(None) => Envelope::not_found(),
            Err(e) => {
                warn!(error = %e, "undecodable content record");
                Envelope::failed(format!("invalid response body: {e}"), FALLBACK_STATUS)
            }
        },
        RawResult::Failure(failure) if failure.is_not_found() => Envelope::not_found(),
        RawResult::Failure(failure) => {
            let status = failure.status();
            Envelope::failed(failure.into_message(), status)
        }
    }
}

/// Map a mutation response: the echoed payload, or the failure message.
pub fn parse_submission(raw: RawResult) -> Envelope<serde_json::Value> {
    match raw {
        RawResult::Success(response) => match decode::<serde_json::Value>(&response.body) {
            Ok(Some(payload)) => Envelope::found(payload),
            Ok(None) => Envelope::not_found(),
            Err(e) => Envelope::rejected(format!("invalid response body: {e}")),
        },
        RawResult::Failure(failure) => Envelope::rejected(failure.into_message()),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Option<T>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionContext;
    use crate::http::{HttpResponse, APPLICATION_JSON, CONTENT_TYPE};
    use crate::normalize::Failure;
    use crate::transport::{ScriptedTransport, TransportError};

    fn client() -> ContentClient<ScriptedTransport> {
        let config = ApiConfig::resolve(ExecutionContext::Server, Some("http://localhost:3001/"), false).unwrap();
        ContentClient::new(ScriptedTransport::new(), config)
    }

    fn slug(raw: &str) -> Slug {
        Slug::parse(raw).unwrap()
    }

    fn ok(body: &str) -> RawResult {
        RawResult::Success(HttpResponse::new(200, body))
    }

    #[test]
    fn every_request_is_json() {
        let c = client();
        for req in [
            c.build_company_info(),
            c.build_services(),
            c.build_team_members(),
            c.build_partners(),
            c.build_news(None, None),
        ] {
            assert_eq!(req.method, HttpMethod::Get);
            assert_eq!(req.headers, vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]);
            assert!(req.body.is_none());
        }
    }

    #[test]
    fn build_service_uses_slug_path() {
        let req = client().build_service(&slug("interior-design"));
        assert_eq!(req.url, "http://localhost:3001/services/public/interior-design");
    }

    #[test]
    fn build_service_encodes_reserved_characters() {
        let c = client();
        assert_eq!(
            c.build_service(&slug("c++ fit/out?")).url,
            "http://localhost:3001/services/public/c++%20fit%2Fout%3F"
        );
        assert_eq!(
            c.build_news_article(&slug("50%-off")).url,
            "http://localhost:3001/news/public/50%25-off"
        );
    }

    #[test]
    fn build_projects_sends_featured_only_when_given() {
        let c = client();
        assert_eq!(c.build_projects(None).url, "http://localhost:3001/projects/public");
        assert_eq!(
            c.build_projects(Some(true)).url,
            "http://localhost:3001/projects/public?featured=true"
        );
    }

    #[test]
    fn build_news_combines_filters() {
        let c = client();
        assert_eq!(
            c.build_news(Some(true), Some(3)).url,
            "http://localhost:3001/news/public?featured=true&limit=3"
        );
        assert_eq!(c.build_news(None, Some(5)).url, "http://localhost:3001/news/public?limit=5");
    }

    #[test]
    fn build_submit_contact_posts_json() {
        let message = ContactMessage {
            name: "Saraa".to_string(),
            email: Some("saraa@example.mn".to_string()),
            message: "Need a quote".to_string(),
            ..Default::default()
        };
        let req = client().build_submit_contact(&message).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3001/contact");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Saraa");
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn parse_list_success() {
        let env: Envelope<Vec<Service>> = parse_list(ok(r#"[{"id":1,"title":"Design","slug":"design"}]"#));
        assert_eq!(env.items().len(), 1);
        assert!(env.error.is_none());
    }

    #[test]
    fn parse_list_null_body_is_empty() {
        let env: Envelope<Vec<Service>> = parse_list(ok("null"));
        assert_eq!(env, Envelope::list(Vec::new()));
    }

    #[test]
    fn parse_list_bad_json_is_empty() {
        let env: Envelope<Vec<Service>> = parse_list(ok("<html>"));
        assert_eq!(env, Envelope::list(Vec::new()));
    }

    #[test]
    fn parse_item_not_found_has_no_error() {
        let env: Envelope<Service> = parse_item(RawResult::Failure(Failure::from_status(404)));
        assert_eq!(env, Envelope::not_found());
    }

    #[test]
    fn parse_item_server_error_keeps_status() {
        let env: Envelope<Service> = parse_item(RawResult::Failure(Failure::from_status(502)));
        assert_eq!(env.status, Some(502));
        assert_eq!(env.error.as_deref(), Some("Request failed with status code 502"));
    }

    #[test]
    fn parse_item_transport_failure_is_500() {
        let failure = Failure::from_transport(&TransportError::Network("connection refused".into()));
        let env: Envelope<News> = parse_item(RawResult::Failure(failure));
        assert_eq!(env.status, Some(500));
        assert!(env.data.is_none());
        assert!(env.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn parse_item_bad_body_is_failure() {
        let env: Envelope<Project> = parse_item(ok(r#"{"title":"missing id"}"#));
        assert!(env.is_error());
        assert_eq!(env.status, Some(500));
    }

    #[test]
    fn parse_item_null_company_info_is_not_found() {
        let env: Envelope<CompanyInfo> = parse_item(ok("null"));
        assert_eq!(env, Envelope::not_found());
    }

    #[test]
    fn parse_submission_failure_has_message_only() {
        let env = parse_submission(RawResult::Failure(Failure::from_status(400)));
        assert_eq!(env, Envelope::rejected("Request failed with status code 400"));
    }

    #[test]
    fn parse_submission_echoes_payload() {
        let env = parse_submission(RawResult::Success(HttpResponse::new(201, r#"{"id":"x","name":"Saraa"}"#)));
        assert_eq!(env.data.unwrap()["name"], "Saraa");
        assert!(env.error.is_none());
    }
}
