//! Image URL resolution with placeholder fallback.

use std::fmt;

/// Placeholder variants shipped per category.
const PLACEHOLDERS_PER_CATEGORY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Building,
    Service,
    News,
    Team,
    Partner,
    Default,
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageCategory::Building => "building",
            ImageCategory::Service => "service",
            ImageCategory::News => "news",
            ImageCategory::Team => "team",
            ImageCategory::Partner => "partner",
            ImageCategory::Default => "default",
        })
    }
}

/// A displayable URL for `raw`, or a category placeholder when it is absent.
///
/// Absolute URLs and root-relative paths pass through; bare file names are
/// served from `/uploads`. `index` spreads placeholders across a grid.
pub fn image_url(raw: Option<&str>, category: ImageCategory, index: Option<usize>) -> String {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/') => {
            url.to_string()
        }
        Some(name) => format!("/uploads/{name}"),
        None => {
            let variant = index.unwrap_or(0) % PLACEHOLDERS_PER_CATEGORY + 1;
            format!("/images/placeholders/{category}-{variant}.jpg")
        }
    }
}
