//! Application layer errors.
//!
//! These errors represent failures in orchestration, not rule evaluation.
//! Rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Caller supplied unusable input (empty description, bad option).
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An AI provider call failed. Always recoverable by the heuristic path.
    #[error("AI provider '{provider}' failed: {reason}")]
    AiProvider { provider: String, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template store access failed (lock poisoned, unreadable directory).
    #[error("Template store error: {reason}")]
    StoreError { reason: String },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// Component directory already exists at the target location.
    #[error("Component already exists at {path}")]
    ComponentExists { path: PathBuf },

    /// The orchestrator was asked to move backwards or out of a final phase.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: &'static str, to: &'static str },

    /// The interactive prompt failed or was closed.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },
}

impl ApplicationError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn ai(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::AiProvider {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec![
                "Describe the component in a sentence, e.g. \"um botão simples com ícone\"".into(),
                "Or pass --layer to skip classification".into(),
            ],
            Self::AiProvider { provider, .. } => vec![
                format!("Provider '{}' is unavailable; heuristics were used instead", provider),
                "Check the provider credentials in your environment".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreError { .. } => vec![
                "Check templates.path in your configuration".into(),
                "Try: layerforge templates to list what was loaded".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a configuration error".into(),
            ],
            Self::ComponentExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different component name with --name".into(),
                "Or use --dry-run to preview without writing".into(),
            ],
            Self::Prompt { .. } => vec![
                "Run with --yes to skip interactive confirmation".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ComponentExists { .. } => ErrorCategory::Validation,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::StoreError { .. } => ErrorCategory::NotFound,
            Self::AiProvider { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::InvalidStateTransition { .. }
            | Self::Prompt { .. } => ErrorCategory::Internal,
        }
    }
}
