//! View models: page data with image URLs and reveal delays resolved.

use serde::Serialize;
use site_core::page::{AboutPage, HomePage};
use site_core::{CompanyInfo, ContactMessage, News, Project, Service};
use url::Url;

use crate::images::{image_url, ImageCategory};
use crate::render::reveal_delay;

/// A grid card linking to a detail page.
#[derive(Debug, Serialize)]
pub struct Card {
    pub title: String,
    pub href: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub delay: u64,
}

/// Site path of a detail page, with the slug encoded as one path segment.
fn detail_href(section: &str, slug: &str) -> String {
    let Ok(mut url) = Url::parse("http://site.invalid/") else {
        return format!("/{section}");
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().push(section).push(slug);
    }
    url.path().to_string()
}

pub fn service_cards(services: &[Service]) -> Vec<Card> {
    services
        .iter()
        .enumerate()
        .map(|(i, s)| Card {
            title: s.title.clone(),
            href: detail_href("services", &s.slug),
            image: image_url(s.image.as_deref(), ImageCategory::Service, Some(i)),
            summary: s.description.clone(),
            date: None,
            delay: reveal_delay(i),
        })
        .collect()
}

pub fn project_cards(projects: &[Project]) -> Vec<Card> {
    projects
        .iter()
        .enumerate()
        .map(|(i, p)| Card {
            title: p.title.clone(),
            href: detail_href("projects", &p.slug),
            image: project_cover(p, i),
            summary: p.description.clone(),
            date: None,
            delay: reveal_delay(i),
        })
        .collect()
}

pub fn news_cards(news: &[News]) -> Vec<Card> {
    news.iter()
        .enumerate()
        .map(|(i, n)| Card {
            title: n.title.clone(),
            href: detail_href("news", &n.slug),
            image: image_url(n.image.as_deref(), ImageCategory::News, Some(i)),
            summary: n.excerpt.clone(),
            date: n.published_date().map(str::to_string),
            delay: reveal_delay(i),
        })
        .collect()
}

/// Cover image, else the first gallery image, else a placeholder.
fn project_cover(project: &Project, index: usize) -> String {
    let raw = project.image.as_deref().or(project.images.first().map(String::as_str));
    image_url(raw, ImageCategory::Building, Some(index))
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub hero_image: String,
    pub company: Option<CompanyInfo>,
    pub services: Vec<Card>,
    pub projects: Vec<Card>,
    pub news: Vec<Card>,
}

impl From<HomePage> for HomeView {
    fn from(page: HomePage) -> Self {
        HomeView {
            title: "Home",
            hero_image: image_url(None, ImageCategory::Building, None),
            services: service_cards(&page.services),
            projects: project_cards(&page.projects),
            news: news_cards(&page.news),
            company: page.company_info,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub title: &'static str,
    pub intro: &'static str,
    pub empty: &'static str,
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub title: String,
    pub image: String,
    pub service: Service,
}

impl From<Service> for ServiceView {
    fn from(service: Service) -> Self {
        ServiceView {
            title: service.title.clone(),
            image: image_url(service.image.as_deref(), ImageCategory::Service, None),
            service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryImage {
    pub url: String,
    pub delay: u64,
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub title: String,
    pub cover: String,
    pub gallery: Vec<GalleryImage>,
    pub project: Project,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let gallery = project
            .images
            .iter()
            .enumerate()
            .map(|(i, raw)| GalleryImage {
                url: image_url(Some(raw), ImageCategory::Building, Some(i)),
                delay: reveal_delay(i),
            })
            .collect();
        ProjectView {
            title: project.title.clone(),
            cover: project_cover(&project, 0),
            gallery,
            project,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsView {
    pub title: String,
    pub image: String,
    pub date: Option<String>,
    pub article: News,
}

impl From<News> for NewsView {
    fn from(article: News) -> Self {
        NewsView {
            title: article.title.clone(),
            image: image_url(article.image.as_deref(), ImageCategory::News, None),
            date: article.published_date().map(str::to_string),
            article,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberCard {
    pub name: String,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub image: String,
    pub delay: u64,
}

#[derive(Debug, Serialize)]
pub struct PartnerCard {
    pub name: String,
    pub website: Option<String>,
    pub logo: String,
    pub delay: u64,
}

#[derive(Debug, Serialize)]
pub struct AboutView {
    pub title: &'static str,
    pub company: Option<CompanyInfo>,
    pub team: Vec<MemberCard>,
    pub partners: Vec<PartnerCard>,
}

impl From<AboutPage> for AboutView {
    fn from(page: AboutPage) -> Self {
        let team = page.team.into_iter().enumerate().map(|(i, m)| MemberCard {
            image: image_url(m.image.as_deref(), ImageCategory::Team, Some(i)),
            name: m.name,
            position: m.position,
            bio: m.bio,
            delay: reveal_delay(i),
        });
        let partners = page.partners.into_iter().enumerate().map(|(i, p)| PartnerCard {
            logo: image_url(p.logo.as_deref(), ImageCategory::Partner, Some(i)),
            name: p.name,
            website: p.website,
            delay: reveal_delay(i),
        });
        AboutView {
            title: "About us",
            company: page.company_info,
            team: team.collect(),
            partners: partners.collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub title: &'static str,
    pub notice: Option<Notice>,
    pub form: ContactMessage,
}

impl ContactView {
    pub fn new(form: ContactMessage, notice: Option<Notice>) -> Self {
        ContactView {
            title: "Contact us",
            notice,
            form,
        }
    }
}

/// Data for the not-found and failure views.
#[derive(Debug, Serialize)]
pub struct StatusView {
    pub title: &'static str,
}
