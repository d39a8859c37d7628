//! Rule-based layer classification.
//!
//! ## Scoring
//!
//! For every [`LayerDef`](crate::domain::registry::LayerDef) in the registry:
//!
//! | Signal | Points |
//! |--------|--------|
//! | keyword found anywhere in the normalized text | +10 |
//! | keyword sharing a ≥4-char stem with a token | +5 |
//! | synonym of a keyword found | +3 |
//! | feature (caller-supplied or extracted concept) equal to a keyword | +8 |
//! | complexity indicator of the layer's complexity level | +5 |
//! | indicator of the layer's dependency profile | +3 |
//!
//! The raw sum is multiplied by the layer weight. Layers are sorted by
//! score (ties keep hierarchy order), the top one is `primary` and the next
//! three are alternatives.
//!
//! [`LayerClassifier::classify_with_fallback`] never fails: when scoring
//! fails it walks a short chain of high-signal keyword groups.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    registry::{self, LAYER_REGISTRY, LayerDef},
    text, vocabulary,
    value_objects::LayerType,
};

const KEYWORD_POINTS: f64 = 10.0;
const PARTIAL_POINTS: f64 = 5.0;
const SYNONYM_POINTS: f64 = 3.0;
const FEATURE_POINTS: f64 = 8.0;
const COMPLEXITY_POINTS: f64 = 5.0;
const DEPENDENCY_POINTS: f64 = 3.0;

/// Minimum shared stem for a partial keyword match.
const MIN_STEM: usize = 4;

const MAX_ALTERNATIVES: usize = 3;

/// Score of one layer for one description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerScore {
    pub layer: LayerType,
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerClassification {
    pub primary: LayerScore,
    pub alternatives: Vec<LayerScore>,
    pub confidence: f64,
    pub reasoning: String,
    /// Features that took part in scoring (caller-supplied + extracted).
    pub features: Vec<String>,
}

impl LayerClassification {
    pub fn layer(&self) -> LayerType {
        self.primary.layer
    }

    pub fn is_fallback(&self) -> bool {
        self.reasoning.starts_with("Fallback:")
    }
}

/// Stateless classifier over the static layer registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayerClassifier;

impl LayerClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score `description` against every layer.
    ///
    /// # Errors
    ///
    /// `ClassificationFailed` when the description has no matchable text or
    /// a score is not finite.
    pub fn classify(
        &self,
        description: &str,
        features: &[String],
    ) -> Result<LayerClassification, DomainError> {
        let normalized = text::normalize(description);
        if normalized.is_empty() {
            return Err(DomainError::ClassificationFailed(
                "description has no matchable text".into(),
            ));
        }

        let mut all_features: Vec<String> = features
            .iter()
            .map(|f| text::normalize(f))
            .filter(|f| !f.is_empty())
            .collect();
        for concept in vocabulary::extract_features(&normalized) {
            if !all_features.contains(&concept) {
                all_features.push(concept);
            }
        }

        let mut scores: Vec<LayerScore> = LAYER_REGISTRY
            .iter()
            .map(|def| score_layer(def, &normalized, &all_features))
            .collect();

        if let Some(bad) = scores.iter().find(|s| !s.score.is_finite()) {
            return Err(DomainError::ClassificationFailed(format!(
                "non-finite score for {}",
                bad.layer
            )));
        }

        // Stable: equal scores keep registry (hierarchy) order.
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut ranked = scores.into_iter();
        let primary = ranked.next().ok_or_else(|| {
            DomainError::ClassificationFailed("layer registry is empty".into())
        })?;
        let alternatives: Vec<LayerScore> = ranked.take(MAX_ALTERNATIVES).collect();

        let secondary = alternatives.first().map_or(0.0, |s| s.score);
        let confidence = confidence(primary.score, secondary);
        let reasoning = build_reasoning(&primary, &alternatives);

        Ok(LayerClassification {
            primary,
            alternatives,
            confidence,
            reasoning,
            features: all_features,
        })
    }

    /// Like [`classify`](Self::classify) but never fails.
    pub fn classify_with_fallback(
        &self,
        description: &str,
        features: &[String],
    ) -> LayerClassification {
        match self.classify(description, features) {
            Ok(classification) => classification,
            Err(err) => fallback_classification(description, &err),
        }
    }
}

fn score_layer(def: &LayerDef, normalized: &str, features: &[String]) -> LayerScore {
    let words = text::tokens(normalized);
    let mut raw = 0.0;
    let mut matched = Vec::new();

    for keyword in def.pattern.keywords {
        if normalized.contains(keyword) {
            raw += KEYWORD_POINTS;
            matched.push((*keyword).to_string());
        } else if is_partial_match(keyword, &words) {
            raw += PARTIAL_POINTS;
            matched.push(format!("~{keyword}"));
        }

        if registry::synonyms_of(keyword)
            .iter()
            .any(|syn| text::contains_word(normalized, syn))
        {
            raw += SYNONYM_POINTS;
        }
    }

    raw += FEATURE_POINTS
        * features
            .iter()
            .filter(|f| def.pattern.keywords.contains(&f.as_str()))
            .count() as f64;

    raw += COMPLEXITY_POINTS
        * count_indicators(normalized, registry::complexity_indicators(def.pattern.complexity));

    raw += DEPENDENCY_POINTS
        * count_indicators(
            normalized,
            registry::dependency_indicators(def.pattern.dependency_profile),
        );

    LayerScore {
        layer: def.layer,
        score: raw * def.pattern.weight,
        matched_keywords: matched,
    }
}

fn is_partial_match(keyword: &str, words: &[&str]) -> bool {
    if keyword.contains(' ') || keyword.len() < MIN_STEM {
        return false;
    }
    words.iter().any(|w| {
        *w != keyword && w.len() >= MIN_STEM && text::common_prefix_len(w, keyword) >= MIN_STEM
    })
}

fn count_indicators(normalized: &str, indicators: &[&str]) -> f64 {
    indicators
        .iter()
        .filter(|w| text::contains_word(normalized, w))
        .count() as f64
}

/// `max(0.1, min(1, (p - s) / p))`, 0 when nothing scored, 1 when only the
/// primary scored.
fn confidence(primary: f64, secondary: f64) -> f64 {
    if primary <= 0.0 {
        return 0.0;
    }
    if secondary <= 0.0 {
        return 1.0;
    }
    ((primary - secondary) / primary).clamp(0.1, 1.0)
}

fn build_reasoning(primary: &LayerScore, alternatives: &[LayerScore]) -> String {
    let pattern = primary.layer.def().pattern;
    let mut parts = Vec::new();

    if primary.matched_keywords.is_empty() {
        parts.push("No layer keywords matched".to_string());
    } else {
        parts.push(format!(
            "Matched keywords: {}",
            primary.matched_keywords.join(", ")
        ));
    }

    parts.push(format!(
        "{} layer: {} complexity, {} dependencies, {} reusability",
        primary.layer, pattern.complexity, pattern.dependency_profile, pattern.reusability
    ));

    if !alternatives.is_empty() {
        parts.push(format!(
            "Alternatives: {}",
            alternatives
                .iter()
                .map(|a| a.layer.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    parts.join(". ")
}

// ── Fallback chain ───────────────────────────────────────────────────────────

const FALLBACK_CHAIN: &[(LayerType, f64, &[&str])] = &[
    (
        LayerType::Atom,
        0.7,
        &["botao", "button", "input", "icone", "icon", "texto", "label"],
    ),
    (
        LayerType::Molecule,
        0.6,
        &["modal", "card", "cartao", "dropdown", "tooltip"],
    ),
    (
        LayerType::Organism,
        0.6,
        &["header", "footer", "formulario", "form", "lista", "tabela"],
    ),
    (
        LayerType::Feature,
        0.5,
        &["tela", "screen", "pagina", "page", "fluxo"],
    ),
];

const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.3;

fn fallback_classification(description: &str, cause: &DomainError) -> LayerClassification {
    let normalized = text::normalize(description);

    for (layer, confidence, keywords) in FALLBACK_CHAIN {
        let hits: Vec<String> = keywords
            .iter()
            .filter(|k| text::contains_word(&normalized, k))
            .map(|k| (*k).to_string())
            .collect();
        if !hits.is_empty() {
            return LayerClassification {
                primary: LayerScore {
                    layer: *layer,
                    score: 0.0,
                    matched_keywords: hits.clone(),
                },
                alternatives: Vec::new(),
                confidence: *confidence,
                reasoning: format!(
                    "Fallback: matched {} keywords ({}) after: {}",
                    layer,
                    hits.join(", "),
                    cause
                ),
                features: Vec::new(),
            };
        }
    }

    LayerClassification {
        primary: LayerScore {
            layer: LayerType::Atom,
            score: 0.0,
            matched_keywords: Vec::new(),
        },
        alternatives: Vec::new(),
        confidence: DEFAULT_FALLBACK_CONFIDENCE,
        reasoning: format!("Fallback: defaulting to atom after: {cause}"),
        features: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(description: &str) -> LayerClassification {
        LayerClassifier::new().classify(description, &[]).unwrap()
    }

    #[test]
    fn keyword_inside_a_longer_word_counts_as_exact() {
        let atom = registry::layer_def(LayerType::Atom);
        let score = score_layer(atom, &text::normalize("campo com dois inputs"), &[]);
        assert!(score.matched_keywords.contains(&"input".to_string()));
        assert!(!score.matched_keywords.iter().any(|k| k == "~input"));
        assert!(score.score >= KEYWORD_POINTS);
    }

    #[test]
    fn simple_button_is_an_atom() {
        let c = classify("um botão simples com ícone");
        assert_eq!(c.layer(), LayerType::Atom);
        assert!(c.confidence > 0.0);
        assert!(c.reasoning.contains("botao"));
    }

    #[test]
    fn reusable_confirmation_modal_is_a_molecule() {
        let c = classify("modal de confirmação reutilizável");
        assert_eq!(c.layer(), LayerType::Molecule);
    }

    #[test]
    fn screen_is_a_feature() {
        assert_eq!(classify("tela de depósito na carteira").layer(), LayerType::Feature);
    }

    #[test]
    fn data_layers_are_recognized() {
        assert_eq!(classify("gateway http para endpoint de pagamentos").layer(), LayerType::Gateway);
        assert_eq!(classify("repositorio com cache offline").layer(), LayerType::Repository);
        assert_eq!(classify("entidade com os campos do usuario").layer(), LayerType::Entity);
        assert_eq!(classify("funcao util para formatar moeda").layer(), LayerType::Util);
        assert_eq!(classify("provider de tema global").layer(), LayerType::Particle);
    }

    #[test]
    fn alternatives_are_the_next_three() {
        let c = classify("um botao simples");
        assert_eq!(c.alternatives.len(), 3);
        assert!(c.alternatives.iter().all(|a| a.layer != c.layer()));
        assert!(c.alternatives.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn caller_features_add_points() {
        let classifier = LayerClassifier::new();
        let without = classifier.classify("algo novo", &[]).unwrap();
        let with = classifier.classify("algo novo", &["modal".into()]).unwrap();
        assert_eq!(without.primary.score, 0.0);
        assert_eq!(with.layer(), LayerType::Molecule);
    }

    #[test]
    fn unmatched_text_scores_zero_confidence() {
        let c = classify("xyz qwerty");
        assert_eq!(c.confidence, 0.0);
        assert_eq!(c.layer(), LayerType::Atom);
        assert!(c.reasoning.contains("No layer keywords matched"));
    }

    #[test]
    fn confidence_formula() {
        assert_eq!(confidence(0.0, 0.0), 0.0);
        assert_eq!(confidence(10.0, 0.0), 1.0);
        assert!((confidence(10.0, 5.0) - 0.5).abs() < f64::EPSILON);
        assert_eq!(confidence(10.0, 10.0), 0.1);
    }

    #[test]
    fn confidence_is_always_bounded() {
        for d in [
            "",
            "!!!",
            "botao",
            "modal card tela gateway repositorio",
            "um formulario complexo com lista e tabela",
        ] {
            let c = LayerClassifier::new().classify_with_fallback(d, &[]);
            assert!((0.0..=1.0).contains(&c.confidence), "{d}: {}", c.confidence);
        }
    }

    #[test]
    fn empty_input_falls_back_to_atom() {
        let c = LayerClassifier::new().classify_with_fallback("", &[]);
        assert_eq!(c.layer(), LayerType::Atom);
        assert_eq!(c.confidence, 0.3);
        assert!(c.is_fallback());
    }

    #[test]
    fn fallback_chain_order() {
        let err = DomainError::ClassificationFailed("boom".into());
        let c = fallback_classification("modal com botao", &err);
        assert_eq!(c.layer(), LayerType::Atom);
        assert_eq!(c.confidence, 0.7);

        let c = fallback_classification("tela inicial", &err);
        assert_eq!(c.layer(), LayerType::Feature);
        assert_eq!(c.confidence, 0.5);
        assert!(c.reasoning.starts_with("Fallback:"));
    }
}
