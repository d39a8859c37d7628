//! Validation and auto-fix pipeline over rendered files.
//!
//! 1. static validation
//! 2. auto-fix (when enabled and errors exist)
//! 3. AI enhancement (when enabled and a provider is available)
//! 4. re-validation, plus provider review suggestions

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ports::Clock, services::AiAssist};
use crate::domain::{
    AutoFixer, CodeEnhancement, CodeValidator, ComponentTemplate, EnhancementKind, GeneratedCode,
    GeneratedFile, GenerationMetadata, LayerAnalysis, TemplateContext, TemplateSelection,
    TemplateSelector,
};
use crate::error::ForgeResult;

/// Confidence recorded for AI rewrites.
pub const AI_ENHANCEMENT_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub auto_fix: bool,
    pub ai_enhance: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            auto_fix: true,
            ai_enhance: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    validator: CodeValidator,
    fixer: AutoFixer,
    selector: TemplateSelector,
    ai: AiAssist,
}

impl CodeGenerator {
    pub fn new(ai: AiAssist) -> Self {
        Self {
            ai,
            ..Self::default()
        }
    }

    pub fn provider_name(&self) -> String {
        self.ai.provider_name()
    }

    /// Pick a template: the provider's choice when it names a candidate,
    /// otherwise the rule-based selector.
    pub fn select_template(
        &self,
        analysis: &LayerAnalysis,
        candidates: &[ComponentTemplate],
    ) -> ForgeResult<TemplateSelection> {
        let same_layer: Vec<ComponentTemplate> = candidates
            .iter()
            .filter(|t| t.layer == analysis.layer)
            .cloned()
            .collect();

        if same_layer.len() > 1 {
            if let Some((name, confidence)) = self.ai.select_template(analysis, &same_layer) {
                if let Some(template) = same_layer.iter().find(|t| t.name == name) {
                    debug!(template = %name, confidence, "template chosen by provider");
                    return Ok(TemplateSelection {
                        template: template.clone(),
                        confidence,
                        reasoning: format!("Chosen by {}", self.ai.provider_name()),
                        alternatives: Vec::new(),
                    });
                }
            }
        }

        let selection = self.selector.select_template(analysis, &same_layer)?;
        debug!(
            template = %selection.template.name,
            confidence = selection.confidence,
            "template selected"
        );
        Ok(selection)
    }

    #[instrument(skip_all, fields(layer = %analysis.layer, name = %analysis.component_name))]
    pub fn generate_with_validation(
        &self,
        analysis: &LayerAnalysis,
        context: &TemplateContext,
        files: Vec<GeneratedFile>,
        options: GenerationOptions,
        template: Option<String>,
        clock: &dyn Clock,
    ) -> GeneratedCode {
        let mut files = files;
        let mut enhancements: Vec<CodeEnhancement> = Vec::new();

        let initial = self.validator.validate(&files, context);
        debug!(
            errors = initial.errors.len(),
            warnings = initial.warnings.len(),
            score = initial.score,
            "initial validation"
        );

        if options.auto_fix && !initial.is_valid {
            let (fixed, applied) = self.fixer.apply(&files, &initial, context);
            info!(fixes = applied.len(), "auto-fix applied");
            files = fixed;
            enhancements.extend(applied);
        }

        if options.ai_enhance && self.ai.is_enabled() {
            for file in &mut files {
                if let Some(content) = self.ai.enhance_file(file, context) {
                    file.content = content;
                    enhancements.push(CodeEnhancement {
                        file: file.path.clone(),
                        kind: EnhancementKind::Ai,
                        description: format!("Enhanced by {}", self.ai.provider_name()),
                        confidence: AI_ENHANCEMENT_CONFIDENCE,
                    });
                }
            }
        }

        let mut validation = self.validator.validate(&files, context);
        if self.ai.is_enabled() {
            let rules: Vec<String> = validation
                .errors
                .iter()
                .chain(&validation.warnings)
                .map(|f| f.message.clone())
                .collect();
            for file in &files {
                if let Some(review) = self.ai.review(&file.content, &rules) {
                    for suggestion in review.suggestions {
                        if !validation.improvements.contains(&suggestion) {
                            validation.improvements.push(suggestion);
                        }
                    }
                }
            }
        }

        GeneratedCode {
            files,
            validation,
            enhancements,
            metadata: GenerationMetadata {
                layer: analysis.layer,
                name: analysis.component_name.clone(),
                generated_at: clock.now(),
                provider: self.ai.provider_name(),
                analysis_confidence: analysis.confidence,
                template,
            },
        }
    }
}
