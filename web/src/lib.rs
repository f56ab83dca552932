//! Server-rendered company website on top of `site_core`.
//!
//! Each route asks `site_core::page` what to show, then renders the matching
//! handlebars view. Not-found pages answer 404; a page that fails to load
//! answers 500 with the generic failure view.

pub mod config;
pub mod images;
pub mod render;
pub mod routes;
pub mod views;

pub use config::SiteConfig;
pub use render::Renderer;
pub use routes::{router, AppState};
