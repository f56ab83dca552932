//! Handlebars views.
//!
//! Every page template is wrapped by the `shell` partial (header, navigation
//! and footer). Cards and sections use the `reveal` helper, which emits the
//! scroll-reveal attributes for a given delay in milliseconds.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use thiserror::Error;

/// Delay between consecutive cards in a grid.
pub const REVEAL_STEP_MS: u64 = 100;

const PARTIALS: &[(&str, &str)] = &[("shell", include_str!("../templates/shell.hbs"))];

const PAGES: &[(&str, &str)] = &[
    ("home", include_str!("../templates/home.hbs")),
    ("about", include_str!("../templates/about.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("service", include_str!("../templates/service.hbs")),
    ("project", include_str!("../templates/project.hbs")),
    ("news_article", include_str!("../templates/news_article.hbs")),
    ("contact", include_str!("../templates/contact.hbs")),
    ("not_found", include_str!("../templates/not_found.hbs")),
    ("failure", include_str!("../templates/failure.hbs")),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// The delay for the `index`th card of a grid.
pub fn reveal_delay(index: usize) -> u64 {
    index as u64 * REVEAL_STEP_MS
}

fn reveal_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let delay = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    out.write(&format!("data-reveal data-reveal-delay=\"{delay}\""))?;
    Ok(())
}

pub struct Renderer {
    engine: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, ViewError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine.register_helper("reveal", Box::new(reveal_helper));
        for (name, source) in PARTIALS {
            engine.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            engine.register_template_string(name, *source)?;
        }
        Ok(Self { engine })
    }

    pub fn render<S: Serialize>(&self, page: &str, data: &S) -> Result<String, ViewError> {
        Ok(self.engine.render(page, data)?)
    }
}
