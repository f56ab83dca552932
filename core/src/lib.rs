//! Content-fetching core for the company website.
//!
//! # Overview
//! Pages ask a `ContentClient` for company info, services, projects, news,
//! team members and partners, and get back an `Envelope` that keeps
//! "failed", "not found" and "found" apart without any error propagation
//! for expected conditions. The `page` module decides what each page
//! renders from those envelopes.
//!
//! # Design
//! - `Transport` is the only I/O seam; `NormalizedTransport` wraps it so
//!   every outcome becomes a `RawResult` instead of an `Err`.
//! - `ContentClient` keeps the `build_*` (request) / `parse_*` (envelope)
//!   split, so both halves are testable without a network.
//! - Configuration is resolved once into an `ApiConfig` and passed in.

pub mod client;
pub mod config;
pub mod envelope;
pub mod http;
pub mod normalize;
pub mod page;
pub mod transport;
pub mod types;

pub use client::{parse_item, parse_list, parse_submission, ContentClient};
pub use config::{ApiConfig, ConfigError, ExecutionContext};
pub use envelope::Envelope;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{Failure, FailureCause, NormalizedTransport, RawResult};
pub use page::{ContentKind, DetailView, ListView, PageError};
#[cfg(any(test, feature = "test-support"))]
pub use transport::ScriptedTransport;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    CompanyInfo, ContactError, ContactMessage, ContentId, News, Partner, Project, Service, Slug, SlugError,
    TeamMember,
};
