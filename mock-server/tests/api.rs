use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, router, ContentStore, News, Project, Resource, Service};
use tokio::sync::RwLock;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- company info ---

#[tokio::test]
async fn company_info_is_served() {
    let resp = app().oneshot(get("/company-info/public")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let info: serde_json::Value = body_json(resp).await;
    assert!(info["aboutUs"].is_string());
}

#[tokio::test]
async fn company_info_unset_is_404() {
    let resp = app_with(ContentStore::default())
        .oneshot(get("/company-info/public"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["statusCode"], 404);
}

// --- services ---

#[tokio::test]
async fn services_list_and_detail() {
    let resp = app().oneshot(get("/services/public")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let services: Vec<Service> = body_json(resp).await;
    assert_eq!(services.len(), 4);

    let resp = app()
        .oneshot(get("/services/public/interior-finishing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let service: Service = body_json(resp).await;
    assert_eq!(service.title, "Interior finishing");
}

#[tokio::test]
async fn unknown_service_is_404() {
    let resp = app().oneshot(get("/services/public/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- projects ---

#[tokio::test]
async fn projects_featured_filter() {
    let resp = app().oneshot(get("/projects/public?featured=true")).await.unwrap();
    let projects: Vec<Project> = body_json(resp).await;
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p.featured));

    let resp = app().oneshot(get("/projects/public")).await.unwrap();
    let projects: Vec<Project> = body_json(resp).await;
    assert_eq!(projects.len(), 3);
}

// --- news ---

#[tokio::test]
async fn news_limit_and_order() {
    let resp = app().oneshot(get("/news/public?limit=2")).await.unwrap();
    let news: Vec<News> = body_json(resp).await;
    assert_eq!(news.len(), 2);
    assert_eq!(news[0].slug, "new-safety-programme");
}

#[tokio::test]
async fn news_detail_not_found() {
    let resp = app().oneshot(get("/news/public/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- team and partners ---

#[tokio::test]
async fn team_and_partners_are_listed() {
    let resp = app().oneshot(get("/team-members/public")).await.unwrap();
    let team: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(team.len(), 2);

    let resp = app().oneshot(get("/partners/public")).await.unwrap();
    let partners: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(partners.len(), 1);
}

// --- outages ---

#[tokio::test]
async fn outage_answers_500() {
    let app = app_with(ContentStore::seeded().with_outage(Resource::Services));
    let resp = app.oneshot(get("/services/public")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_bytes(resp).await.is_empty());
}

// --- contact ---

#[tokio::test]
async fn contact_is_stored() {
    let db = Arc::new(RwLock::new(ContentStore::seeded()));
    let resp = router(db.clone())
        .oneshot(json_request(
            "POST",
            "/contact",
            r#"{"name":"Saraa","email":"saraa@example.mn","message":"Quote please"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: serde_json::Value = body_json(resp).await;
    assert_eq!(record["name"], "Saraa");
    assert!(record["id"].is_string());
    assert_eq!(db.read().await.messages.len(), 1);
}

#[tokio::test]
async fn contact_blank_message_is_400() {
    let resp = app()
        .oneshot(json_request("POST", "/contact", r#"{"name":"Saraa","message":"  "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/contact", r#"{"not_name":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
