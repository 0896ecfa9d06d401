//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults, and renders them with Handlebars.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Where a template's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Override(PathBuf),
    Embedded,
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// Loads and renders prompt templates
///
/// Every known template is compiled once at construction, so a broken
/// override file fails startup instead of a user's request.
pub struct PromptLoader {
    /// Handlebars template engine with all templates registered
    hbs: Handlebars<'static>,
    /// Source of each registered template, in registration order
    sources: Vec<(&'static str, TemplateSource)>,
}

impl PromptLoader {
    /// Create a loader that prefers `<dir>/<name>.pmt` over the embedded text
    pub fn new(override_dir: Option<&Path>) -> Result<Self> {
        debug!(?override_dir, "PromptLoader::new: called");
        let mut hbs = Handlebars::new();
        // Prompts are plain text; HTML escaping would mangle quotes and ampersands
        hbs.register_escape_fn(handlebars::no_escape);
        // A misspelled variable in an override fails the render instead of going blank
        hbs.set_strict_mode(true);

        let mut sources = Vec::with_capacity(embedded::TEMPLATE_NAMES.len());
        for name in embedded::TEMPLATE_NAMES {
            let (content, source) = Self::load_template(override_dir, name)?;
            hbs.register_template_string(name, content)
                .map_err(|e| eyre!("Failed to compile template {} ({}): {}", name, source, e))?;
            sources.push((*name, source));
        }

        info!(
            overrides = sources
                .iter()
                .filter(|(_, s)| matches!(s, TemplateSource::Override(_)))
                .count(),
            "Prompt templates loaded"
        );
        Ok(Self { hbs, sources })
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Result<Self> {
        Self::new(None)
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `<dir>/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(override_dir: Option<&Path>, name: &str) -> Result<(String, TemplateSource)> {
        if let Some(dir) = override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e))?;
                return Ok((content, TemplateSource::Override(path)));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok((content.to_string(), TemplateSource::Embedded));
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a registered template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        debug!(%template_name, "render: called");
        self.hbs
            .render(template_name, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Template names with the source each was loaded from
    pub fn sources(&self) -> &[(&'static str, TemplateSource)] {
        &self.sources
    }
}
