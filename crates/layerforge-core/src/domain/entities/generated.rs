//! Generation output: files, enhancements and metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{validation::ValidationResult, value_objects::LayerType};

/// A rendered file, path relative to the component directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Main component file of a visual layer (`button.atom.tsx`).
    pub fn is_component_file(&self, layer: LayerType) -> bool {
        self.path.ends_with(&format!(".{}.tsx", layer.as_str()))
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancementKind {
    AutoFix,
    Ai,
}

/// One change applied to a generated file after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeEnhancement {
    pub file: String,
    pub kind: EnhancementKind,
    pub description: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub layer: LayerType,
    pub name: String,
    pub generated_at: DateTime<Utc>,
    /// Provider name, or `"none"` when no AI provider took part.
    pub provider: String,
    pub analysis_confidence: f64,
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub files: Vec<GeneratedFile>,
    pub validation: ValidationResult,
    pub enhancements: Vec<CodeEnhancement>,
    pub metadata: GenerationMetadata,
}

impl GeneratedCode {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn auto_fix_count(&self) -> usize {
        self.enhancements
            .iter()
            .filter(|e| e.kind == EnhancementKind::AutoFix)
            .count()
    }
}
