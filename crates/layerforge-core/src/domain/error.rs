// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::LayerType;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are cached and replayed)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Heuristic misses are never errors. Classification, naming and dependency
/// analysis always degrade to a lower-confidence result instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid layer: '{0}'")]
    InvalidLayer(String),

    #[error("Invalid component name '{name}' for layer {layer}: {reason}")]
    InvalidComponentName {
        name: String,
        layer: LayerType,
        reason: String,
    },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{name}' has no files")]
    EmptyTemplate { name: String },

    #[error("Invalid analysis edit for field '{field}': {reason}")]
    InvalidAnalysisEdit { field: &'static str, reason: String },

    #[error("Confidence {0} is outside [0, 1]")]
    InvalidConfidence(f64),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No template available for layer {0}")]
    NoTemplateForLayer(LayerType),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    // ========================================================================
    // Classification
    // ========================================================================
    #[error("Classification failed: {0}")]
    ClassificationFailed(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLayer(_) => vec![
                "Valid layers are:".into(),
                format!(
                    "  {}",
                    LayerType::ALL
                        .iter()
                        .map(LayerType::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                "Try: layerforge layers".into(),
            ],
            Self::InvalidComponentName { layer, .. } => vec![
                format!(
                    "{} names must match {}",
                    layer,
                    layer.def().naming.style.pattern()
                ),
                format!("Example: {}", layer.def().naming.fallback),
            ],
            Self::NoTemplateForLayer(layer) => vec![
                format!("No template is registered for {}", layer.directory()),
                "Try: layerforge templates".into(),
                "Or point `templates.path` at a directory with custom templates".into(),
            ],
            Self::TemplateNotFound(name) => vec![
                format!("Template '{}' is not registered", name),
                "Try: layerforge templates".into(),
            ],
            Self::EmptyTemplate { name } => vec![
                format!("Template '{}' is corrupted", name),
                "Add at least one file to its template.toml".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLayer(_)
            | Self::InvalidComponentName { .. }
            | Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::InvalidAnalysisEdit { .. }
            | Self::InvalidConfidence(_) => ErrorCategory::Validation,
            Self::NoTemplateForLayer(_) | Self::TemplateNotFound(_) => ErrorCategory::NotFound,
            Self::ClassificationFailed(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_layer_lists_valid_layers() {
        let err = DomainError::InvalidLayer("widget".into());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("repository")));
    }

    #[test]
    fn invalid_name_mentions_pattern() {
        let err = DomainError::InvalidComponentName {
            name: "UserEntity".into(),
            layer: LayerType::Entity,
            reason: "pattern mismatch".into(),
        };
        assert!(err.suggestions()[0].contains("Entity$"));
        assert!(err.to_string().contains("UserEntity"));
    }

    #[test]
    fn missing_template_is_not_found() {
        assert_eq!(
            DomainError::NoTemplateForLayer(LayerType::Gateway).category(),
            ErrorCategory::NotFound
        );
    }
}
