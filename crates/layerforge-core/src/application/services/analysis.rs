//! Analysis strategies.
//!
//! The heuristic strategy chains the domain engines (classifier, naming,
//! dependency analyzer, prop/method inference). The AI strategy asks the
//! provider first and falls back to the heuristic chain on any failure or
//! invalid answer.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ports::AnalysisContext, services::AiAssist};
use crate::domain::{
    DependencyAnalyzer, LayerAnalysis, LayerClassifier, LayerType, NamingAnalyzer, NamingContext,
    text,
    variables::{infer_methods, infer_props},
};
use crate::error::ForgeResult;

/// Input of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub description: String,
    /// Skip classification and use this layer.
    #[serde(default)]
    pub layer: Option<LayerType>,
    /// Use this name instead of a suggested one.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub naming: NamingContext,
    #[serde(default)]
    pub features: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    fn context(&self) -> AnalysisContext {
        AnalysisContext {
            layer: self.layer,
            naming: self.naming.clone(),
            features: self.features.clone(),
        }
    }
}

/// A way of turning a description into a [`LayerAnalysis`].
pub trait AnalysisStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn analyze(&self, request: &AnalysisRequest) -> ForgeResult<LayerAnalysis>;
}

/// Classifier + naming + dependency rules, no provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalysisStrategy {
    classifier: LayerClassifier,
    naming: NamingAnalyzer,
    dependencies: DependencyAnalyzer,
}

impl HeuristicAnalysisStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic analysis using caller-supplied naming concepts.
    pub fn analyze_with_concepts(
        &self,
        request: &AnalysisRequest,
        concepts: Option<&[String]>,
    ) -> ForgeResult<LayerAnalysis> {
        let description = request.description.trim();
        if text::normalize(description).is_empty() {
            return Err(ApplicationError::invalid_input("description is empty").into());
        }

        let classification = self
            .classifier
            .classify_with_fallback(description, &request.features);
        let (layer, confidence, mut reasoning) = match request.layer {
            Some(layer) => (layer, 1.0, format!("Layer {layer} requested explicitly")),
            None => (
                classification.layer(),
                classification.confidence,
                classification.reasoning.clone(),
            ),
        };
        debug!(%layer, confidence, "classified");

        let component_name = match &request.name {
            Some(name) => name.trim().to_string(),
            None => {
                let suggestion = match concepts {
                    Some(concepts) => self.naming.suggest_from_concepts(
                        description,
                        layer,
                        concepts,
                        Some(&request.naming),
                    ),
                    None => self
                        .naming
                        .suggest_name(description, layer, Some(&request.naming)),
                };
                if !suggestion.alternatives.is_empty() {
                    reasoning.push_str(&format!(
                        "\nName alternatives: {}",
                        suggestion.alternatives.join(", ")
                    ));
                }
                suggestion.primary
            }
        };

        let deps = self.dependencies.analyze_dependencies(
            description,
            layer,
            &classification.features,
        );
        for violation in &deps.violations {
            debug!(%violation, "dependency rule");
        }

        let mut analysis = LayerAnalysis::new(layer, component_name, confidence);
        analysis.dependencies = deps.all_dependencies();
        analysis.props = infer_props(description, layer);
        analysis.methods = infer_methods(description, layer);
        analysis.reasoning = reasoning;
        analysis
            .metadata
            .insert("description".into(), description.to_string());
        analysis.metadata.insert("strategy".into(), self.name().into());
        analysis.validate()?;
        analysis.refresh_files();
        Ok(analysis)
    }
}

impl AnalysisStrategy for HeuristicAnalysisStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    #[instrument(skip_all, fields(strategy = "heuristic"))]
    fn analyze(&self, request: &AnalysisRequest) -> ForgeResult<LayerAnalysis> {
        self.analyze_with_concepts(request, None)
    }
}

/// Provider analysis with heuristic fallback.
#[derive(Debug, Clone)]
pub struct AiAnalysisStrategy {
    ai: AiAssist,
    fallback: HeuristicAnalysisStrategy,
}

impl AiAnalysisStrategy {
    pub fn new(ai: AiAssist) -> Self {
        Self {
            ai,
            fallback: HeuristicAnalysisStrategy::new(),
        }
    }

    /// Provider answers are checked like user edits: the layer is kept when
    /// forced, the name must match the layer convention, and files are
    /// recomputed from the registry.
    fn accept(&self, request: &AnalysisRequest, mut analysis: LayerAnalysis) -> Option<LayerAnalysis> {
        if let Some(layer) = request.layer {
            analysis.layer = layer;
        }
        if let Some(name) = &request.name {
            analysis.component_name = name.trim().to_string();
        }
        analysis.dependencies.remove(&analysis.layer);
        analysis.confidence = analysis.confidence.clamp(0.0, 1.0);
        if let Err(e) = analysis.validate() {
            warn!(error = %e, "AI analysis rejected");
            return None;
        }
        analysis
            .metadata
            .insert("description".into(), request.description.trim().to_string());
        analysis.metadata.insert("strategy".into(), self.name().into());
        analysis
            .metadata
            .insert("provider".into(), self.ai.provider_name());
        analysis.refresh_files();
        Some(analysis)
    }
}

impl AnalysisStrategy for AiAnalysisStrategy {
    fn name(&self) -> &'static str {
        "ai"
    }

    #[instrument(skip_all, fields(strategy = "ai", provider = %self.ai.provider_name()))]
    fn analyze(&self, request: &AnalysisRequest) -> ForgeResult<LayerAnalysis> {
        if text::normalize(&request.description).is_empty() {
            return Err(ApplicationError::invalid_input("description is empty").into());
        }

        if let Some(analysis) = self.ai.analyze(&request.description, &request.context()) {
            if let Some(accepted) = self.accept(request, analysis) {
                return Ok(accepted);
            }
        }

        warn!("falling back to heuristic analysis");
        let concepts = self.ai.extract_concepts(&request.description);
        self.fallback
            .analyze_with_concepts(request, concepts.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::ports::{AiProvider, MockAiProvider};

    fn mock(analysis: Option<LayerAnalysis>) -> AiAssist {
        let mut m = MockAiProvider::new();
        m.expect_name().return_const("mock".to_string());
        m.expect_is_available().return_const(true);
        m.expect_analyze_description().returning(move |_, _| {
            analysis
                .clone()
                .ok_or_else(|| ApplicationError::ai("mock", "offline").into())
        });
        m.expect_complete()
            .returning(|_| Err(ApplicationError::ai("mock", "offline").into()));
        let provider: Arc<dyn AiProvider> = Arc::new(m);
        AiAssist::new(Some(provider))
    }

    #[test]
    fn heuristic_rejects_empty_descriptions() {
        let err = HeuristicAnalysisStrategy::new()
            .analyze(&AnalysisRequest::new("   "))
            .unwrap_err();
        assert!(err.to_string().contains("description is empty"));
    }

    #[test]
    fn heuristic_fills_every_field() {
        let a = HeuristicAnalysisStrategy::new()
            .analyze(&AnalysisRequest::new("modal de confirmação reutilizável"))
            .unwrap();
        assert_eq!(a.layer, LayerType::Molecule);
        assert!(a.dependencies.contains(&LayerType::Atom));
        assert!(!a.files.is_empty());
        assert_eq!(a.metadata["strategy"], "heuristic");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn forced_layer_wins() {
        let mut req = AnalysisRequest::new("um botão simples");
        req.layer = Some(LayerType::Molecule);
        let a = HeuristicAnalysisStrategy::new().analyze(&req).unwrap();
        assert_eq!(a.layer, LayerType::Molecule);
        assert_eq!(a.confidence, 1.0);
    }

    #[test]
    fn ai_answer_is_used_when_valid() {
        let mut answer = LayerAnalysis::new(LayerType::Atom, "icon-button", 0.95);
        answer.dependencies.insert(LayerType::Atom);
        let a = AiAnalysisStrategy::new(mock(Some(answer)))
            .analyze(&AnalysisRequest::new("um botão com ícone"))
            .unwrap();
        assert_eq!(a.component_name, "icon-button");
        assert!(a.dependencies.is_empty());
        assert_eq!(a.metadata["provider"], "mock");
    }

    #[test]
    fn ai_failure_falls_back() {
        let a = AiAnalysisStrategy::new(mock(None))
            .analyze(&AnalysisRequest::new("um botão simples com ícone"))
            .unwrap();
        assert_eq!(a.layer, LayerType::Atom);
        assert_eq!(a.metadata["strategy"], "heuristic");
    }

    #[test]
    fn invalid_ai_answer_falls_back() {
        let bad = LayerAnalysis::new(LayerType::Atom, "Not Valid", 0.9);
        let a = AiAnalysisStrategy::new(mock(Some(bad)))
            .analyze(&AnalysisRequest::new("um botão simples com ícone"))
            .unwrap();
        assert_eq!(a.component_name, "button-icon");
    }
}
