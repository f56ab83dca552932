//! What each page renders for a given fetch outcome.
//!
//! # Design
//! Pages never retry and never move back to loading. List pages only look
//! at `data`, because list accessors have already collapsed failures to an
//! empty list. Detail pages follow a strict priority chain:
//!
//! 1. the fetch itself failed before producing an envelope -> `PageError::Load`
//! 2. the envelope carries `error` -> `PageError::Api`
//! 3. `data` is absent -> `DetailView::NotFound`
//! 4. otherwise -> `DetailView::Found`
//!
//! A slug that cannot name a record (empty, `.`, `..`) is `NotFound` before
//! any request is made.
//!
//! Aggregate pages (home, about) fetch their sections concurrently and let
//! each section degrade on its own.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::ContentClient;
use crate::envelope::Envelope;
use crate::transport::Transport;
use crate::types::{
    CompanyInfo, ContactError, ContactMessage, News, Partner, Project, Service, Slug, TeamMember,
};

/// Cards shown per section on the landing page.
pub const HOME_CARDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    CompanyInfo,
    Service,
    Project,
    NewsArticle,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::CompanyInfo => "company info",
            ContentKind::Service => "service",
            ContentKind::Project => "project",
            ContentKind::NewsArticle => "news article",
        })
    }
}

/// Failures that go to the error boundary instead of rendering content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Failed to load {kind}: {message}")]
    Load { kind: ContentKind, message: String },

    #[error("API Error: {message}")]
    Api {
        kind: ContentKind,
        message: String,
        status: Option<u16>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Empty,
    Grid(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<T> {
    Found(T),
    NotFound,
}

pub fn list_view<T>(envelope: Envelope<Vec<T>>) -> ListView<T> {
    match envelope.data {
        Some(items) if !items.is_empty() => ListView::Grid(items),
        _ => ListView::Empty,
    }
}

/// Apply steps 2-4 of the detail chain to an envelope.
pub fn resolve_detail<T>(kind: ContentKind, envelope: Envelope<T>) -> Result<DetailView<T>, PageError> {
    if let Some(message) = envelope.error {
        return Err(PageError::Api {
            kind,
            message,
            status: envelope.status,
        });
    }
    Ok(match envelope.data {
        Some(data) => DetailView::Found(data),
        None => DetailView::NotFound,
    })
}

/// Run the full detail chain over a fallible fetch.
pub async fn detail<T, E, F>(kind: ContentKind, fetch: F) -> Result<DetailView<T>, PageError>
where
    F: Future<Output = Result<Envelope<T>, E>>,
    E: fmt::Display,
{
    let envelope = fetch.await.map_err(|e| PageError::Load {
        kind,
        message: e.to_string(),
    })?;
    resolve_detail(kind, envelope)
}

// ---------------------------------------------------------------------------
// List pages
// ---------------------------------------------------------------------------

pub async fn services_index<T: Transport>(client: &ContentClient<T>) -> ListView<Service> {
    list_view(client.services().await)
}

pub async fn projects_index<T: Transport>(client: &ContentClient<T>) -> ListView<Project> {
    list_view(client.projects(None).await)
}

pub async fn news_index<T: Transport>(client: &ContentClient<T>) -> ListView<News> {
    list_view(client.news(None, None).await)
}

// ---------------------------------------------------------------------------
// Detail pages
// ---------------------------------------------------------------------------

/// Look up a detail record by slug. A slug that cannot name a resource is
/// not found, and nothing is requested for it.
async fn by_slug<V, F, Fut>(kind: ContentKind, raw_slug: &str, fetch: F) -> Result<DetailView<V>, PageError>
where
    F: FnOnce(Slug) -> Fut,
    Fut: Future<Output = Envelope<V>>,
{
    match Slug::parse(raw_slug) {
        Ok(slug) => resolve_detail(kind, fetch(slug).await),
        Err(reason) => {
            debug!(%kind, %reason, "slug names no resource");
            Ok(DetailView::NotFound)
        }
    }
}

pub async fn service_page<T: Transport>(
    client: &ContentClient<T>,
    raw_slug: &str,
) -> Result<DetailView<Service>, PageError> {
    by_slug(ContentKind::Service, raw_slug, |slug| async move { client.service(&slug).await }).await
}

pub async fn project_page<T: Transport>(
    client: &ContentClient<T>,
    raw_slug: &str,
) -> Result<DetailView<Project>, PageError> {
    by_slug(ContentKind::Project, raw_slug, |slug| async move { client.project(&slug).await }).await
}

pub async fn news_page<T: Transport>(
    client: &ContentClient<T>,
    raw_slug: &str,
) -> Result<DetailView<News>, PageError> {
    by_slug(ContentKind::NewsArticle, raw_slug, |slug| async move { client.news_article(&slug).await }).await
}

// ---------------------------------------------------------------------------
// Aggregate pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomePage {
    pub company_info: Option<CompanyInfo>,
    pub services: Vec<Service>,
    pub projects: Vec<Project>,
    pub news: Vec<News>,
}

/// Landing page: four independent fetches, each section optional.
pub async fn home<T: Transport>(client: &ContentClient<T>) -> HomePage {
    let (company_info, services, projects, news) = tokio::join!(
        client.company_info(),
        client.services(),
        client.projects(Some(true)),
        client.news(Some(true), Some(HOME_CARDS as u32)),
    );

    if let Some(error) = &company_info.error {
        warn!(%error, "hiding company section on home page");
    }

    HomePage {
        company_info: company_info.data,
        services: first_cards(services),
        projects: first_cards(projects),
        news: first_cards(news),
    }
}

fn first_cards<T>(envelope: Envelope<Vec<T>>) -> Vec<T> {
    let mut items = envelope.data.unwrap_or_default();
    items.truncate(HOME_CARDS);
    items
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutPage {
    pub company_info: Option<CompanyInfo>,
    pub team: Vec<TeamMember>,
    pub partners: Vec<Partner>,
}

/// About page. Team and partners degrade to empty; a company-info API error
/// escalates, while a missing record only hides its section.
pub async fn about<T: Transport>(client: &ContentClient<T>) -> Result<AboutPage, PageError> {
    let (company_info, team, partners) =
        tokio::join!(client.company_info(), client.team_members(), client.partners());

    let company_info = match resolve_detail(ContentKind::CompanyInfo, company_info)? {
        DetailView::Found(info) => Some(info),
        DetailView::NotFound => None,
    };

    Ok(AboutPage {
        company_info,
        team: team.data.unwrap_or_default(),
        partners: partners.data.unwrap_or_default(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    Invalid(ContactError),
    Failed(String),
}

/// Validate and submit once. A failure is reported, never retried.
pub async fn contact<T: Transport>(client: &ContentClient<T>, message: &ContactMessage) -> ContactOutcome {
    if let Err(reason) = message.validate() {
        return ContactOutcome::Invalid(reason);
    }
    match client.submit_contact(message).await.error {
        Some(error) => {
            warn!(%error, "contact submission failed");
            ContactOutcome::Failed(error)
        }
        None => ContactOutcome::Sent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_renders_empty_state() {
        assert_eq!(list_view::<u8>(Envelope::list(Vec::new())), ListView::Empty);
        assert_eq!(list_view::<u8>(Envelope::not_found()), ListView::Empty);
        assert_eq!(list_view(Envelope::list(vec![1, 2])), ListView::Grid(vec![1, 2]));
    }

    #[test]
    fn api_error_is_never_not_found() {
        let err = resolve_detail::<u8>(ContentKind::Project, Envelope::failed("timeout", 500)).unwrap_err();
        assert_eq!(err.to_string(), "API Error: timeout");
    }

    #[test]
    fn missing_data_without_error_is_not_found() {
        let view = resolve_detail::<u8>(ContentKind::Service, Envelope::not_found()).unwrap();
        assert_eq!(view, DetailView::NotFound);
    }

    #[test]
    fn error_wins_even_when_data_is_present() {
        let envelope = Envelope {
            data: Some(7u8),
            error: Some("partial".to_string()),
            status: Some(500),
        };
        assert!(resolve_detail(ContentKind::Service, envelope).is_err());
    }

    #[tokio::test]
    async fn failed_fetch_takes_priority() {
        let result = detail(ContentKind::NewsArticle, async {
            Err::<Envelope<u8>, _>("body could not be encoded")
        })
        .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to load news article: body could not be encoded"
        );
    }

    #[tokio::test]
    async fn found_renders_content() {
        let result = detail(ContentKind::Project, async { Ok::<_, String>(Envelope::found(1u8)) }).await;
        assert_eq!(result.unwrap(), DetailView::Found(1));
    }
}
