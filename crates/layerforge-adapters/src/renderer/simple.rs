//! Simple variable substitution renderer.

use std::sync::LazyLock;

use layerforge_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{ComponentTemplate, GeneratedFile, TemplateContext},
    error::ForgeResult,
};
use regex::Regex;
use tracing::{debug, instrument};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*[A-Z_]+\s*\}\}").expect("valid placeholder regex"));

/// Renderer using plain `{{VARIABLE}}` substitution.
///
/// Optional template files are skipped unless [`SimpleRenderer::with_optional`]
/// is used. A file name that still holds a placeholder after substitution
/// is an error; leftover placeholders in content are left for validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer {
    include_optional: bool,
}

impl SimpleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optional() -> Self {
        Self {
            include_optional: true,
        }
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.name))]
    fn render(
        &self,
        template: &ComponentTemplate,
        context: &TemplateContext,
    ) -> ForgeResult<Vec<GeneratedFile>> {
        template.validate()?;

        let mut files = Vec::with_capacity(template.files.len());
        for spec in &template.files {
            if !spec.required && !self.include_optional {
                debug!(file = %spec.name, "skipping optional file");
                continue;
            }

            let path = context.render(&spec.name);
            if let Some(m) = PLACEHOLDER_RE.find(&path) {
                return Err(ApplicationError::RenderingFailed {
                    reason: format!("unresolved {} in file name '{}'", m.as_str(), spec.name),
                }
                .into());
            }
            files.push(GeneratedFile::new(path, context.render(spec.content.as_str())));
        }

        debug!(files = files.len(), "template rendered");
        Ok(files)
    }
}
