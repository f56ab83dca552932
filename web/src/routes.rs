use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::{Deserialize, Serialize};
use site_core::page::{self, ContactOutcome};
use site_core::{ContactMessage, ContentClient, DetailView, ListView, PageError, Transport};
use tracing::error;

use crate::render::Renderer;
use crate::views::{
    news_cards, project_cards, service_cards, AboutView, Card, ContactView, HomeView, IndexView, NewsView, Notice,
    NoticeKind, ProjectView, ServiceView, StatusView,
};

pub struct AppState<T> {
    client: Arc<ContentClient<T>>,
    renderer: Arc<Renderer>,
}

// Derived Clone would require `T: Clone`.
impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<T: Transport> AppState<T> {
    pub fn new(client: ContentClient<T>, renderer: Renderer) -> Self {
        Self {
            client: Arc::new(client),
            renderer: Arc::new(renderer),
        }
    }

    pub fn client(&self) -> &ContentClient<T> {
        &self.client
    }

    fn page<S: Serialize>(&self, status: StatusCode, template: &str, data: &S) -> Response {
        match self.renderer.render(template, data) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                error!(template, error = %err, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }

    fn ok<S: Serialize>(&self, template: &str, data: &S) -> Response {
        self.page(StatusCode::OK, template, data)
    }

    fn not_found(&self) -> Response {
        self.page(StatusCode::NOT_FOUND, "not_found", &StatusView { title: "Page not found" })
    }

    fn failure(&self, err: &PageError) -> Response {
        error!(error = %err, "page failed to load");
        self.page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "failure",
            &StatusView {
                title: "Something went wrong",
            },
        )
    }

    fn detail<V, S>(&self, template: &str, view: Result<DetailView<V>, PageError>) -> Response
    where
        S: Serialize + From<V>,
    {
        match view {
            Ok(DetailView::Found(item)) => self.ok(template, &S::from(item)),
            Ok(DetailView::NotFound) => self.not_found(),
            Err(err) => self.failure(&err),
        }
    }
}

pub fn router<T: Transport>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(home::<T>))
        .route("/about", get(about::<T>))
        .route("/services", get(services::<T>))
        .route("/services/{slug}", get(service::<T>))
        .route("/projects", get(projects::<T>))
        .route("/projects/{slug}", get(project::<T>))
        .route("/news", get(news::<T>))
        .route("/news/{slug}", get(news_article::<T>))
        .route("/contact", get(contact_form::<T>).post(contact_submit::<T>))
        .fallback(fallback::<T>)
        .with_state(state)
}

async fn home<T: Transport>(State(state): State<AppState<T>>) -> Response {
    let page = page::home(state.client()).await;
    state.ok("home", &HomeView::from(page))
}

async fn about<T: Transport>(State(state): State<AppState<T>>) -> Response {
    match page::about(state.client()).await {
        Ok(page) => state.ok("about", &AboutView::from(page)),
        Err(err) => state.failure(&err),
    }
}

fn index_cards<V>(view: ListView<V>, cards: fn(&[V]) -> Vec<Card>) -> Vec<Card> {
    match view {
        ListView::Grid(items) => cards(&items),
        ListView::Empty => Vec::new(),
    }
}

async fn services<T: Transport>(State(state): State<AppState<T>>) -> Response {
    let view = IndexView {
        title: "Services",
        intro: "What we build and how we can help.",
        empty: "No services are listed yet.",
        cards: index_cards(page::services_index(state.client()).await, service_cards),
    };
    state.ok("index", &view)
}

async fn projects<T: Transport>(State(state): State<AppState<T>>) -> Response {
    let view = IndexView {
        title: "Projects",
        intro: "A selection of our completed and ongoing work.",
        empty: "No projects are listed yet.",
        cards: index_cards(page::projects_index(state.client()).await, project_cards),
    };
    state.ok("index", &view)
}

async fn news<T: Transport>(State(state): State<AppState<T>>) -> Response {
    let view = IndexView {
        title: "News",
        intro: "Company updates and announcements.",
        empty: "No news has been published yet.",
        cards: index_cards(page::news_index(state.client()).await, news_cards),
    };
    state.ok("index", &view)
}

async fn service<T: Transport>(State(state): State<AppState<T>>, Path(slug): Path<String>) -> Response {
    let view = page::service_page(state.client(), &slug).await;
    state.detail::<_, ServiceView>("service", view)
}

async fn project<T: Transport>(State(state): State<AppState<T>>, Path(slug): Path<String>) -> Response {
    let view = page::project_page(state.client(), &slug).await;
    state.detail::<_, ProjectView>("project", view)
}

async fn news_article<T: Transport>(State(state): State<AppState<T>>, Path(slug): Path<String>) -> Response {
    let view = page::news_page(state.client(), &slug).await;
    state.detail::<_, NewsView>("news_article", view)
}

/// Raw form fields; blank optional fields count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
}

impl From<ContactForm> for ContactMessage {
    fn from(form: ContactForm) -> Self {
        let optional = |v: String| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        ContactMessage {
            name: form.name.trim().to_string(),
            email: optional(form.email),
            phone: optional(form.phone),
            subject: optional(form.subject),
            message: form.message.trim().to_string(),
        }
    }
}

async fn contact_form<T: Transport>(State(state): State<AppState<T>>) -> Response {
    state.ok("contact", &ContactView::new(ContactMessage::default(), None))
}

async fn contact_submit<T: Transport>(State(state): State<AppState<T>>, Form(form): Form<ContactForm>) -> Response {
    let message = ContactMessage::from(form);
    match page::contact(state.client(), &message).await {
        ContactOutcome::Sent => {
            let notice = Notice {
                kind: NoticeKind::Success,
                message: "Thank you. We will get back to you soon.".to_string(),
            };
            state.ok("contact", &ContactView::new(ContactMessage::default(), Some(notice)))
        }
        ContactOutcome::Invalid(reason) => {
            let notice = Notice {
                kind: NoticeKind::Error,
                message: capitalize(&reason.to_string()),
            };
            state.page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "contact",
                &ContactView::new(message, Some(notice)),
            )
        }
        ContactOutcome::Failed(_) => {
            let notice = Notice {
                kind: NoticeKind::Error,
                message: "Your message could not be sent. Please try again later.".to_string(),
            };
            state.page(StatusCode::BAD_GATEWAY, "contact", &ContactView::new(message, Some(notice)))
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn fallback<T: Transport>(State(state): State<AppState<T>>) -> Response {
    state.not_found()
}
