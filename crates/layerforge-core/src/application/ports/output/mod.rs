//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `layerforge-adapters` crate provides the filesystem, template and
//! clock implementations; the CLI provides the interactive prompt.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::SmartCreateRequest;
use crate::domain::{
    AnalysisEdit, ComponentTemplate, DependencyAnalysis, GeneratedFile, LayerAnalysis, LayerType,
    NamingContext, TemplateContext,
};
use crate::error::ForgeResult;

/// Hints passed to an AI provider alongside the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    /// Layer forced by the caller, if any.
    pub layer: Option<LayerType>,
    pub naming: NamingContext,
    pub features: Vec<String>,
}

/// Review returned by [`AiProvider::validate_code`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSuggestions {
    pub is_valid: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Port for an optional language-model provider.
///
/// No network provider ships in this workspace. Every call site has a
/// heuristic fallback, so implementations may fail freely.
#[cfg_attr(test, mockall::automock)]
pub trait AiProvider: Send + Sync {
    /// Provider name recorded in generation metadata.
    fn name(&self) -> String;

    /// Capability check, called once when the service is built.
    fn is_available(&self) -> bool;

    fn analyze_description<'a>(
        &self,
        description: &str,
        context: Option<&'a AnalysisContext>,
    ) -> ForgeResult<LayerAnalysis>;

    fn validate_code(&self, code: &str, rules: &[String]) -> ForgeResult<ValidationSuggestions>;

    /// Free-form completion used for concept extraction, template selection
    /// and code enhancement.
    fn complete(&self, prompt: &str) -> ForgeResult<String>;
}

/// Outcome of the interactive confirmation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Accepted,
    Modified(AnalysisEdit),
    Rejected,
}

/// Port for user interaction.
///
/// Implemented by:
/// - `layerforge_cli::prompt::DialoguerPrompt` (terminal)
/// - `layerforge_cli::prompt::NonInteractivePrompt` (CI, `--yes`)
#[cfg_attr(test, mockall::automock)]
pub trait InteractivePrompt: Send + Sync {
    /// Ask for a description and options.
    fn collect_input(&self) -> ForgeResult<SmartCreateRequest>;

    /// Show the analysis and ask whether to continue.
    fn confirm_analysis(
        &self,
        analysis: &LayerAnalysis,
        dependencies: &DependencyAnalysis,
    ) -> ForgeResult<Confirmation>;

    fn show_progress(&self, message: &str);
    fn show_success(&self, message: &str);
    fn show_warning(&self, message: &str);
    fn show_error(&self, message: &str);
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `layerforge_adapters::filesystem::LocalFilesystem` (production)
/// - `layerforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `layerforge_adapters::template_store::InMemoryStore` (built-in templates)
/// - `layerforge_adapters::template_loader::FilesystemTemplateLoader` (user templates, loaded into a store)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// All templates for a layer.
    fn find(&self, layer: LayerType) -> ForgeResult<Vec<ComponentTemplate>>;

    /// Get a specific template by name.
    fn get(&self, name: &str) -> ForgeResult<ComponentTemplate>;

    /// List all available templates.
    fn list(&self) -> ForgeResult<Vec<ComponentTemplate>>;

    /// Insert or replace a template (keyed by name).
    fn insert(&self, template: ComponentTemplate) -> ForgeResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `layerforge_adapters::renderer::SimpleRenderer` (`{{VARIABLE}}` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render every file of `template`, names and contents, against `context`.
    fn render(
        &self,
        template: &ComponentTemplate,
        context: &TemplateContext,
    ) -> ForgeResult<Vec<GeneratedFile>>;
}

/// Port for the current time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
