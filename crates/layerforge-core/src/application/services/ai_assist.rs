//! Optional AI assistance.
//!
//! [`AiAssist`] wraps an [`AiProvider`] whose capability check passed at
//! construction. Every helper returns `None` on failure after logging, so
//! callers fall through to their heuristic path without matching errors.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ports::{AiProvider, AnalysisContext, ValidationSuggestions};
use crate::domain::{
    ComponentTemplate, GeneratedFile, LayerAnalysis, TemplateContext, vocabulary,
};

/// Name recorded when no provider takes part.
pub const NO_PROVIDER: &str = "none";

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)```").expect("valid fenced block regex")
});

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"));

#[derive(Debug, Deserialize)]
struct TemplateChoice {
    template: String,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Clone, Default)]
pub struct AiAssist {
    provider: Option<Arc<dyn AiProvider>>,
}

impl std::fmt::Debug for AiAssist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiAssist")
            .field("provider", &self.provider_name())
            .finish()
    }
}

impl AiAssist {
    /// Keep `provider` only if its capability check passes.
    pub fn new(provider: Option<Arc<dyn AiProvider>>) -> Self {
        let provider = provider.filter(|p| {
            let available = p.is_available();
            if !available {
                warn!(provider = %p.name(), "AI provider unavailable, using heuristics");
            }
            available
        });
        Self { provider }
    }

    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> String {
        self.provider
            .as_ref()
            .map_or_else(|| NO_PROVIDER.to_string(), |p| p.name())
    }

    pub fn analyze(&self, description: &str, context: &AnalysisContext) -> Option<LayerAnalysis> {
        let provider = self.provider.as_ref()?;
        match provider.analyze_description(description, Some(context)) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(provider = %provider.name(), error = %e, "AI analysis failed");
                None
            }
        }
    }

    /// Concepts for naming, parsed from a comma or newline separated reply.
    pub fn extract_concepts(&self, description: &str) -> Option<Vec<String>> {
        let reply = self.complete(&format!(
            "List the key concepts of this UI component description as short English \
             words separated by commas, most important first.\n\nDescription: {description}"
        ))?;
        let concepts = vocabulary::parse_concept_list(&reply);
        (!concepts.is_empty()).then_some(concepts)
    }

    /// Ask the provider to choose among `candidates`. The reply must name
    /// one of them.
    pub fn select_template(
        &self,
        analysis: &LayerAnalysis,
        candidates: &[ComponentTemplate],
    ) -> Option<(String, f64)> {
        let listing: Vec<String> = candidates
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect();
        let analysis_json = serde_json::to_string(analysis).ok()?;
        let reply = self.complete(&format!(
            "Choose the best template for this component analysis.\n\
             Analysis: {analysis_json}\nTemplates:\n{}\n\
             Answer with JSON: {{\"template\": \"<name>\", \"confidence\": <0..1>}}",
            listing.join("\n")
        ))?;

        let choice = parse_template_choice(&reply)?;
        if !candidates.iter().any(|t| t.name == choice.template) {
            debug!(template = %choice.template, "AI chose an unknown template");
            return None;
        }
        let confidence = choice.confidence.unwrap_or(0.8).clamp(0.0, 1.0);
        Some((choice.template, confidence))
    }

    /// Improved content for one file, or `None` to keep it.
    pub fn enhance_file(&self, file: &GeneratedFile, context: &TemplateContext) -> Option<String> {
        let context_json = serde_json::to_string_pretty(context).ok()?;
        let reply = self.complete(&format!(
            "Improve this React Native file without changing its public API. \
             Reply with the full file in one code block.\n\
             File: {}\n```tsx\n{}\n```\nContext:\n{context_json}",
            file.path, file.content
        ))?;
        let code = extract_code_block(&reply);
        (!code.trim().is_empty() && code != file.content).then_some(code)
    }

    pub fn review(&self, code: &str, rules: &[String]) -> Option<ValidationSuggestions> {
        let provider = self.provider.as_ref()?;
        match provider.validate_code(code, rules) {
            Ok(review) => Some(review),
            Err(e) => {
                debug!(error = %e, "AI review failed");
                None
            }
        }
    }

    fn complete(&self, prompt: &str) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.complete(prompt) {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(provider = %provider.name(), error = %e, "AI completion failed");
                None
            }
        }
    }
}

/// First fenced code block of `reply`, or the whole reply trimmed.
pub fn extract_code_block(reply: &str) -> String {
    FENCED_BLOCK
        .captures(reply)
        .and_then(|c| c.get(1))
        .map_or_else(|| reply.trim().to_string(), |m| m.as_str().to_string())
}

fn parse_template_choice(reply: &str) -> Option<TemplateChoice> {
    let json = JSON_OBJECT.find(reply)?.as_str();
    serde_json::from_str(json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockAiProvider;
    use crate::application::ApplicationError;
    use crate::domain::{LayerType, TemplateFile};

    fn provider(available: bool, reply: &'static str) -> Arc<dyn AiProvider> {
        let mut mock = MockAiProvider::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_is_available().return_const(available);
        mock.expect_complete().returning(move |_| Ok(reply.to_string()));
        Arc::new(mock)
    }

    fn template(name: &str) -> ComponentTemplate {
        ComponentTemplate::builder(name, LayerType::Atom)
            .file(TemplateFile::new("{{FILE_STEM}}.atom.tsx", "x"))
            .build()
            .unwrap()
    }

    #[test]
    fn unavailable_provider_is_dropped() {
        let ai = AiAssist::new(Some(provider(false, "")));
        assert!(!ai.is_enabled());
        assert_eq!(ai.provider_name(), NO_PROVIDER);
    }

    #[test]
    fn extracts_first_fenced_block() {
        let reply = "Here you go:\n```tsx\nexport const A = 1;\n```\nand more\n```\nB\n```";
        assert_eq!(extract_code_block(reply), "export const A = 1;\n");
        assert_eq!(extract_code_block("  plain  "), "plain");
    }

    #[test]
    fn template_choice_must_name_a_candidate() {
        let ai = AiAssist::new(Some(provider(
            true,
            "Sure: {\"template\": \"atom-variant\", \"confidence\": 1.7}",
        )));
        let analysis = LayerAnalysis::new(LayerType::Atom, "button", 0.9);
        let picked = ai.select_template(&analysis, &[template("atom-basic"), template("atom-variant")]);
        assert_eq!(picked, Some(("atom-variant".to_string(), 1.0)));

        assert_eq!(ai.select_template(&analysis, &[template("atom-basic")]), None);
    }

    #[test]
    fn provider_errors_become_none() {
        let mut mock = MockAiProvider::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_is_available().return_const(true);
        mock.expect_complete()
            .returning(|_| Err(ApplicationError::ai("mock", "timeout").into()));
        let ai = AiAssist::new(Some(Arc::new(mock)));
        assert!(ai.extract_concepts("um botao").is_none());
    }

    #[test]
    fn concept_replies_are_kebab_cased() {
        let ai = AiAssist::new(Some(provider(true, "Search Bar, filter\nicon")));
        assert_eq!(
            ai.extract_concepts("barra de busca").unwrap(),
            vec!["search-bar", "filter", "icon"]
        );
    }
}
