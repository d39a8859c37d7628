//! Component templates.
//!
//! A [`ComponentTemplate`] is a named, ordered list of file specs scoped to
//! one layer. File names and contents may contain `{{VARIABLE}}`
//! placeholders that a renderer substitutes from the template context.
//!
//! ```text
//! ComponentTemplate (atom-basic)
//! ├── layer: atom
//! ├── supported_features: [props, tests, icon]
//! ├── required_features:  []
//! └── files
//!      ├── {{FILE_STEM}}.atom.tsx      (required)
//!      ├── {{FILE_STEM}}.type.ts       (required)
//!      └── {{FILE_STEM}}.spec.tsx      (optional)
//! ```

use std::collections::HashSet;

use crate::domain::{error::DomainError, value_objects::LayerType};

// ============================================================================
// Content
// ============================================================================

/// Source of template content: either compile-time or runtime.
///
/// `Static` references binary data (built-in templates). `Owned` holds
/// content loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check for `{{...}}` placeholder syntax.
    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{") && self.as_str().contains("}}")
    }
}

/// One file produced by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name pattern, e.g. `{{FILE_STEM}}.atom.tsx`.
    pub name: String,
    pub required: bool,
    pub content: TemplateSource,
}

impl TemplateFile {
    pub fn new(name: impl Into<String>, content: impl Into<TemplateSource>) -> Self {
        Self {
            name: name.into(),
            required: true,
            content: content.into(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

// ============================================================================
// Template aggregate
// ============================================================================

/// Invariants (enforced by [`ComponentTemplateBuilder::build`]):
///
/// 1. `name` is non-empty
/// 2. at least one file
/// 3. file names are unique
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTemplate {
    pub name: String,
    pub layer: LayerType,
    pub description: String,
    pub files: Vec<TemplateFile>,
    pub supported_features: Vec<String>,
    pub required_features: Vec<String>,
}

impl ComponentTemplate {
    pub fn builder(name: impl Into<String>, layer: LayerType) -> ComponentTemplateBuilder {
        ComponentTemplateBuilder {
            name: name.into(),
            layer,
            description: String::new(),
            files: Vec::new(),
            supported_features: Vec::new(),
            required_features: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.files.is_empty() {
            return Err(DomainError::EmptyTemplate {
                name: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.name.as_str()) {
                return Err(DomainError::InvalidTemplate(format!(
                    "Duplicate file '{}' in template '{}'",
                    file.name, self.name
                )));
            }
        }

        Ok(())
    }

    pub fn supports(&self, feature: &str) -> bool {
        self.supported_features.iter().any(|f| f == feature)
    }

    /// Estimated complexity on a 1..=3 scale from file count and feature lists.
    pub fn complexity(&self) -> u8 {
        let size =
            self.files.len() + self.supported_features.len() + self.required_features.len();
        match size {
            0..=5 => 1,
            6..=9 => 2,
            _ => 3,
        }
    }

    pub fn required_files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter().filter(|f| f.required)
    }
}

pub struct ComponentTemplateBuilder {
    name: String,
    layer: LayerType,
    description: String,
    files: Vec<TemplateFile>,
    supported_features: Vec<String>,
    required_features: Vec<String>,
}

impl ComponentTemplateBuilder {
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn supports<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_features
            .extend(features.into_iter().map(Into::into));
        self
    }

    pub fn requires<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_features
            .extend(features.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<ComponentTemplate, DomainError> {
        let template = ComponentTemplate {
            name: self.name,
            layer: self.layer,
            description: self.description,
            files: self.files,
            supported_features: self.supported_features,
            required_features: self.required_features,
        };
        template.validate()?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_empty_template() {
        let err = ComponentTemplate::builder("empty", LayerType::Atom)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyTemplate { .. }));
    }

    #[test]
    fn builder_rejects_duplicate_files() {
        let result = ComponentTemplate::builder("dup", LayerType::Atom)
            .file(TemplateFile::new("index.ts", "a"))
            .file(TemplateFile::new("index.ts", "b"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn complexity_grows_with_size() {
        let small = ComponentTemplate::builder("s", LayerType::Util)
            .file(TemplateFile::new("a.ts", ""))
            .supports(["tests"])
            .build()
            .unwrap();
        assert_eq!(small.complexity(), 1);

        let mut big = ComponentTemplate::builder("b", LayerType::Feature)
            .supports(["props", "methods", "use-case", "data-fetching", "state"]);
        for i in 0..6 {
            big = big.file(TemplateFile::new(format!("f{i}.ts"), ""));
        }
        assert_eq!(big.build().unwrap().complexity(), 3);
    }

    #[test]
    fn source_detects_placeholders() {
        assert!(TemplateSource::from("export {{PASCAL_NAME}}").contains_placeholder());
        assert!(!TemplateSource::from(String::from("plain")).contains_placeholder());
    }
}
