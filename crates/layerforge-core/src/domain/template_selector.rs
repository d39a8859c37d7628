//! Rule-based template selection.
//!
//! | Signal | Score |
//! |--------|-------|
//! | fraction of inferred features the template supports | +0.3 × fraction |
//! | every required feature present / some missing | +0.4 / −0.2 |
//! | complexity exact / off by one | +0.3 / +0.1 |
//!
//! Scores are clamped to `[0, 1]`. A single candidate wins at 1.0.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{
    entities::{ComponentTemplate, LayerAnalysis},
    error::DomainError,
    text,
    value_objects::LayerType,
};

pub const FEATURE_PROPS: &str = "props";
pub const FEATURE_METHODS: &str = "methods";
pub const FEATURE_USE_CASE: &str = "use-case";
pub const FEATURE_DATA_FETCHING: &str = "data-fetching";
pub const FEATURE_STATE: &str = "state";
pub const FEATURE_VARIANTS: &str = "variants";
pub const FEATURE_ANIMATION: &str = "animation";
pub const FEATURE_TESTS: &str = "tests";
pub const FEATURE_ICON: &str = "icon";

const MAX_ALTERNATIVES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSelection {
    pub template: ComponentTemplate,
    pub confidence: f64,
    pub reasoning: String,
    pub alternatives: Vec<TemplateScore>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateSelector;

impl TemplateSelector {
    pub fn new() -> Self {
        Self
    }

    /// Pick the best template for `analysis` among `candidates`.
    ///
    /// Candidates of other layers are ignored.
    pub fn select_template(
        &self,
        analysis: &LayerAnalysis,
        candidates: &[ComponentTemplate],
    ) -> Result<TemplateSelection, DomainError> {
        let candidates: Vec<&ComponentTemplate> = candidates
            .iter()
            .filter(|t| t.layer == analysis.layer)
            .collect();

        match candidates.as_slice() {
            [] => Err(DomainError::NoTemplateForLayer(analysis.layer)),
            [only] => Ok(TemplateSelection {
                template: (*only).clone(),
                confidence: 1.0,
                reasoning: format!("Only template available for {}", analysis.layer),
                alternatives: Vec::new(),
            }),
            _ => {
                let features = infer_features(analysis);
                let complexity = analysis_complexity(analysis);

                let mut scored: Vec<(f64, &ComponentTemplate)> = candidates
                    .iter()
                    .map(|t| (score_template(t, &features, complexity), *t))
                    .collect();
                scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

                let (best_score, best) = scored[0];
                let alternatives = scored
                    .iter()
                    .skip(1)
                    .take(MAX_ALTERNATIVES)
                    .map(|(score, t)| TemplateScore {
                        name: t.name.clone(),
                        score: *score,
                    })
                    .collect();

                Ok(TemplateSelection {
                    template: best.clone(),
                    confidence: best_score,
                    reasoning: format!(
                        "Selected '{}' (score {:.2}) for features [{}] at complexity {}",
                        best.name,
                        best_score,
                        features.join(", "),
                        complexity
                    ),
                    alternatives,
                })
            }
        }
    }
}

/// Score of one template, clamped to `[0, 1]`.
pub fn score_template(template: &ComponentTemplate, features: &[&str], complexity: u8) -> f64 {
    let mut score = 0.0;

    if !features.is_empty() {
        let supported = features.iter().filter(|f| template.supports(f)).count();
        score += 0.3 * supported as f64 / features.len() as f64;
    }

    let has_required = template
        .required_features
        .iter()
        .all(|r| features.contains(&r.as_str()));
    score += if has_required { 0.4 } else { -0.2 };

    score += match template.complexity().abs_diff(complexity) {
        0 => 0.3,
        1 => 0.1,
        _ => 0.0,
    };

    score.clamp(0.0, 1.0)
}

/// Features implied by an analysis.
pub fn infer_features(analysis: &LayerAnalysis) -> Vec<&'static str> {
    let description = analysis
        .metadata
        .get("description")
        .map(|d| text::normalize(d))
        .unwrap_or_default();
    let props = analysis.props.join(" ").to_lowercase();
    let mentions = |terms: &[&str]| {
        terms
            .iter()
            .any(|t| text::contains_word(&description, t) || props.contains(t))
    };

    let mut features = Vec::new();
    if !analysis.props.is_empty() {
        features.push(FEATURE_PROPS);
    }
    if !analysis.methods.is_empty() {
        features.push(FEATURE_METHODS);
    }
    if analysis.layer.requires_use_case() {
        features.push(FEATURE_USE_CASE);
    }
    if analysis.dependencies.contains(&LayerType::Gateway)
        || analysis.dependencies.contains(&LayerType::Repository)
    {
        features.push(FEATURE_DATA_FETCHING);
    }
    if analysis.layer == LayerType::Particle
        || analysis.dependencies.contains(&LayerType::Particle)
    {
        features.push(FEATURE_STATE);
    }
    if mentions(&["variant", "variante", "primario", "secundario", "primary", "secondary"]) {
        features.push(FEATURE_VARIANTS);
    }
    if mentions(&["animacao", "animado", "animation", "animated"]) {
        features.push(FEATURE_ANIMATION);
    }
    if mentions(&["teste", "testes", "test", "tests"]) {
        features.push(FEATURE_TESTS);
    }
    if mentions(&["icone", "icon"]) {
        features.push(FEATURE_ICON);
    }
    features
}

/// 1..=3 from the number of props, methods and dependencies.
pub fn analysis_complexity(analysis: &LayerAnalysis) -> u8 {
    match analysis.props.len() + analysis.methods.len() + analysis.dependencies.len() {
        0..=3 => 1,
        4..=7 => 2,
        _ => 3,
    }
}
