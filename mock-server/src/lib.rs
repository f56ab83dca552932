//! In-memory stand-in for the content API.
//!
//! Serves the public endpoints the site reads, plus `POST /contact`. DTOs
//! are defined here independently of `site-core` so integration tests catch
//! schema drift. Resources listed in `ContentStore::outages` answer 500.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub about_us: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub values: Option<String>,
    pub history: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<String>,
    pub image: Option<String>,
    /// Stored as the backend stores it: sometimes an array, sometimes an
    /// encoded string.
    pub images: serde_json::Value,
    pub featured: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub published_at: Option<String>,
    pub featured: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// A resource whose endpoints can be switched into failure mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    CompanyInfo,
    Services,
    Projects,
    News,
    TeamMembers,
    Partners,
    Contact,
}

#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    pub company_info: Option<CompanyInfo>,
    pub services: Vec<Service>,
    pub projects: Vec<Project>,
    pub news: Vec<News>,
    pub team_members: Vec<TeamMember>,
    pub partners: Vec<Partner>,
    pub messages: Vec<ContactRecord>,
    pub outages: HashSet<Resource>,
}

pub type Db = Arc<RwLock<ContentStore>>;

pub fn app() -> Router {
    app_with(ContentStore::seeded())
}

pub fn app_with(store: ContentStore) -> Router {
    router(Arc::new(RwLock::new(store)))
}

/// Router over a shared store, so tests can inspect or mutate it afterwards.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/company-info/public", get(company_info))
        .route("/services/public", get(list_services))
        .route("/services/public/{slug}", get(get_service))
        .route("/projects/public", get(list_projects))
        .route("/projects/public/{slug}", get(get_project))
        .route("/news/public", get(list_news))
        .route("/news/public/{slug}", get(get_news))
        .route("/team-members/public", get(list_team_members))
        .route("/partners/public", get(list_partners))
        .route("/contact", post(create_contact))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, ContentStore::seeded()).await
}

pub async fn run_with(listener: TcpListener, store: ContentStore) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock content API listening");
    }
    axum::serve(listener, app_with(store)).await
}

/// NestJS-style error body.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{what} not found"))
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

fn check_outage(store: &ContentStore, resource: Resource) -> Result<(), ApiFailure> {
    if store.outages.contains(&resource) {
        debug!(?resource, "simulated outage");
        return Err(ApiFailure::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"));
    }
    Ok(())
}

async fn company_info(State(db): State<Db>) -> Result<Json<CompanyInfo>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::CompanyInfo)?;
    store
        .company_info
        .clone()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Company info"))
}

async fn list_services(State(db): State<Db>) -> Result<Json<Vec<Service>>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::Services)?;
    Ok(Json(store.services.clone()))
}

async fn get_service(State(db): State<Db>, Path(slug): Path<String>) -> Result<Json<Service>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::Services)?;
    store
        .services
        .iter()
        .find(|s| s.slug == slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Service"))
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
}

async fn list_projects(
    State(db): State<Db>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<Project>>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::Projects)?;
    let projects = store
        .projects
        .iter()
        .filter(|p| filter.featured.map_or(true, |f| p.featured == f))
        .cloned()
        .collect();
    Ok(Json(projects))
}

async fn get_project(State(db): State<Db>, Path(slug): Path<String>) -> Result<Json<Project>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::Projects)?;
    store
        .projects
        .iter()
        .find(|p| p.slug == slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Project"))
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsFilter {
    pub featured: Option<bool>,
    pub limit: Option<usize>,
}

async fn list_news(State(db): State<Db>, Query(filter): Query<NewsFilter>) -> Result<Json<Vec<News>>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::News)?;
    let mut news: Vec<News> = store
        .news
        .iter()
        .filter(|n| filter.featured.map_or(true, |f| n.featured == f))
        .cloned()
        .collect();
    // Newest first; undated articles last.
    news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    if let Some(limit) = filter.limit {
        news.truncate(limit);
    }
    Ok(Json(news))
}

async fn get_news(State(db): State<Db>, Path(slug): Path<String>) -> Result<Json<News>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::News)?;
    store
        .news
        .iter()
        .find(|n| n.slug == slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("News"))
}

async fn list_team_members(State(db): State<Db>) -> Result<Json<Vec<TeamMember>>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::TeamMembers)?;
    Ok(Json(store.team_members.clone()))
}

async fn list_partners(State(db): State<Db>) -> Result<Json<Vec<Partner>>, ApiFailure> {
    let store = db.read().await;
    check_outage(&store, Resource::Partners)?;
    Ok(Json(store.partners.clone()))
}

async fn create_contact(
    State(db): State<Db>,
    Json(input): Json<CreateContact>,
) -> Result<(StatusCode, Json<ContactRecord>), ApiFailure> {
    let mut store = db.write().await;
    check_outage(&store, Resource::Contact)?;
    if input.name.trim().is_empty() || input.message.trim().is_empty() {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "name and message are required"));
    }
    let record = ContactRecord {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        subject: input.subject,
        message: input.message,
    };
    store.messages.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

impl ContentStore {
    /// A small catalogue resembling the production site.
    pub fn seeded() -> Self {
        Self {
            company_info: Some(CompanyInfo {
                about_us: Some("We design and build commercial and residential buildings.".to_string()),
                vision: Some("The most trusted builder in the region.".to_string()),
                mission: Some("Bring modern construction technology to every project.".to_string()),
                values: Some("Safety, quality, honesty.".to_string()),
                history: Some("Founded in 2009 as a three-person finishing crew.".to_string()),
            }),
            services: vec![
                Service {
                    id: 1,
                    title: "General contracting".to_string(),
                    slug: "general-contracting".to_string(),
                    description: "End-to-end delivery of building projects.".to_string(),
                    content: Some("Planning, permits, construction and handover.".to_string()),
                    image: Some("/uploads/services/contracting.jpg".to_string()),
                },
                Service {
                    id: 2,
                    title: "Interior finishing".to_string(),
                    slug: "interior-finishing".to_string(),
                    description: "Plaster, flooring and joinery.".to_string(),
                    content: None,
                    image: None,
                },
                Service {
                    id: 3,
                    title: "Facade systems".to_string(),
                    slug: "facade-systems".to_string(),
                    description: "Ventilated facades and curtain walls.".to_string(),
                    content: None,
                    image: None,
                },
                Service {
                    id: 4,
                    title: "Renovation".to_string(),
                    slug: "renovation".to_string(),
                    description: "Upgrading existing buildings.".to_string(),
                    content: None,
                    image: None,
                },
            ],
            projects: vec![
                Project {
                    id: 1,
                    title: "Central office tower".to_string(),
                    slug: "central-office-tower".to_string(),
                    description: "A 16-storey office building.".to_string(),
                    content: Some("Completed in 2022.".to_string()),
                    image: Some("/uploads/projects/tower.jpg".to_string()),
                    images: serde_json::Value::String(r#"["tower-1.jpg","tower-2.jpg"]"#.to_string()),
                    featured: true,
                },
                Project {
                    id: 2,
                    title: "Riverside apartments".to_string(),
                    slug: "riverside-apartments".to_string(),
                    description: "Three residential blocks.".to_string(),
                    content: None,
                    image: None,
                    images: serde_json::json!(["riverside-1.jpg", "riverside-2.jpg"]),
                    featured: true,
                },
                Project {
                    id: 3,
                    title: "School gymnasium".to_string(),
                    slug: "school-gymnasium".to_string(),
                    description: "Sports hall renovation.".to_string(),
                    content: None,
                    image: None,
                    images: serde_json::Value::Null,
                    featured: false,
                },
            ],
            news: vec![
                News {
                    id: 1,
                    title: "Tower handed over".to_string(),
                    slug: "tower-handed-over".to_string(),
                    excerpt: Some("The central office tower is complete.".to_string()),
                    content: "The client received the keys this week.".to_string(),
                    image: None,
                    published_at: Some("2024-03-12T09:00:00.000Z".to_string()),
                    featured: true,
                },
                News {
                    id: 2,
                    title: "New safety programme".to_string(),
                    slug: "new-safety-programme".to_string(),
                    excerpt: None,
                    content: "All site crews completed certification.".to_string(),
                    image: None,
                    published_at: Some("2024-05-02T09:00:00.000Z".to_string()),
                    featured: true,
                },
                News {
                    id: 3,
                    title: "Hiring site engineers".to_string(),
                    slug: "hiring-site-engineers".to_string(),
                    excerpt: Some("Join the team.".to_string()),
                    content: "We are hiring for the summer season.".to_string(),
                    image: None,
                    published_at: None,
                    featured: false,
                },
            ],
            team_members: vec![
                TeamMember {
                    id: 1,
                    name: "Bat-Erdene".to_string(),
                    position: "Chief engineer".to_string(),
                    bio: Some("Twenty years on site.".to_string()),
                    image: None,
                },
                TeamMember {
                    id: 2,
                    name: "Oyunaa".to_string(),
                    position: "Project manager".to_string(),
                    bio: None,
                    image: None,
                },
            ],
            partners: vec![Partner {
                id: 1,
                name: "Steel Supply LLC".to_string(),
                logo: None,
                website: Some("https://steel.example".to_string()),
            }],
            messages: Vec::new(),
            outages: HashSet::new(),
        }
    }

    pub fn with_outage(mut self, resource: Resource) -> Self {
        self.outages.insert(resource);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_serializes_camel_case_with_encoded_images() {
        let store = ContentStore::seeded();
        let json = serde_json::to_value(&store.projects[0]).unwrap();
        assert_eq!(json["slug"], "central-office-tower");
        assert!(json["images"].is_string());
        assert_eq!(json["featured"], true);
    }

    #[test]
    fn news_serializes_published_at() {
        let json = serde_json::to_value(&ContentStore::seeded().news[0]).unwrap();
        assert_eq!(json["publishedAt"], "2024-03-12T09:00:00.000Z");
    }

    #[test]
    fn create_contact_rejects_missing_message() {
        let result: Result<CreateContact, _> = serde_json::from_str(r#"{"name":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_contact_optional_fields() {
        let input: CreateContact = serde_json::from_str(r#"{"name":"A","message":"hi"}"#).unwrap();
        assert!(input.email.is_none());
        assert!(input.phone.is_none());
    }

    #[test]
    fn outage_is_recorded() {
        let store = ContentStore::default().with_outage(Resource::News);
        assert!(check_outage(&store, Resource::News).is_err());
        assert!(check_outage(&store, Resource::Services).is_ok());
    }
}
