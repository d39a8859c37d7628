//! The layer analysis aggregate.
//!
//! A [`LayerAnalysis`] is the output of the analysis phase and the input of
//! generation. It is created by an analysis strategy, may be edited by the
//! user during interactive confirmation, and is never mutated after
//! generation starts (the orchestrator hands out shared references only).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, text, value_objects::LayerType};

/// Classified layer, component name and component shape for one description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerAnalysis {
    #[serde(rename = "layerType")]
    pub layer: LayerType,

    /// Heuristic certainty in `[0, 1]`.
    pub confidence: f64,

    pub component_name: String,

    /// Layers this component depends on. Order is irrelevant.
    #[serde(default)]
    pub dependencies: BTreeSet<LayerType>,

    /// Prop declarations in `name?: type` form.
    #[serde(default)]
    pub props: Vec<String>,

    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(default)]
    pub reasoning: String,

    /// Planned file names (resolved from the layer's file plan).
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl LayerAnalysis {
    pub fn new(layer: LayerType, component_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            layer,
            confidence,
            component_name: component_name.into(),
            dependencies: BTreeSet::new(),
            props: Vec::new(),
            methods: Vec::new(),
            reasoning: String::new(),
            files: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Check the invariants of the aggregate:
    ///
    /// 1. `confidence` is in `[0, 1]`
    /// 2. `component_name` matches the layer's naming convention
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.confidence) || self.confidence.is_nan() {
            return Err(DomainError::InvalidConfidence(self.confidence));
        }
        validate_component_name(self.layer, &self.component_name)
    }

    /// Stem used for file names and the output directory.
    ///
    /// Entities are named `TUserProfileEntity` but live in `user-profile/`.
    pub fn file_stem(&self) -> String {
        file_stem_for(self.layer, &self.component_name)
    }

    /// Resolve the layer's file plan against this component's stem.
    pub fn planned_files(&self, include_optional: bool) -> Vec<String> {
        let stem = self.file_stem();
        self.layer
            .def()
            .files
            .iter()
            .filter(|f| include_optional || f.required)
            .map(|f| f.resolve(&stem))
            .collect()
    }

    /// Recompute `files` from the current layer and name.
    pub fn refresh_files(&mut self) {
        self.files = self.planned_files(false);
    }

    /// Apply a user edit. Only the fields present in `edit` are overwritten;
    /// the result is re-validated and the file plan refreshed.
    pub fn apply_edit(&mut self, edit: AnalysisEdit) -> Result<(), DomainError> {
        let mut next = self.clone();

        if let Some(layer) = edit.layer {
            next.layer = layer;
        }
        if let Some(name) = edit.component_name {
            next.component_name = name.trim().to_string();
        }
        if let Some(deps) = edit.dependencies {
            if deps.contains(&next.layer) {
                return Err(DomainError::InvalidAnalysisEdit {
                    field: "dependencies",
                    reason: format!("{} cannot depend on itself", next.layer),
                });
            }
            next.dependencies = deps.into_iter().collect();
        }
        if let Some(props) = edit.props {
            next.props = props;
        }
        if let Some(methods) = edit.methods {
            next.methods = methods;
        }

        next.validate()?;
        next.refresh_files();
        next.metadata.insert("edited".into(), "true".into());
        *self = next;
        Ok(())
    }
}

/// User modifications collected during interactive confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEdit {
    pub layer: Option<LayerType>,
    pub component_name: Option<String>,
    pub dependencies: Option<Vec<LayerType>>,
    pub props: Option<Vec<String>>,
    pub methods: Option<Vec<String>>,
}

impl AnalysisEdit {
    pub fn is_empty(&self) -> bool {
        self.layer.is_none()
            && self.component_name.is_none()
            && self.dependencies.is_none()
            && self.props.is_none()
            && self.methods.is_none()
    }
}

/// Validate a component name against the layer convention and length limits.
pub fn validate_component_name(layer: LayerType, name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidComponentName {
        name: name.to_string(),
        layer,
        reason: reason.to_string(),
    };

    let len = name.chars().count();
    if !(2..=50).contains(&len) {
        return Err(invalid("length must be between 2 and 50 characters"));
    }
    // Edits may name a feature without a prefix; only the shape is enforced here.
    let style = match layer.def().naming.style {
        crate::domain::registry::NamingStyle::PrefixedKebab => {
            crate::domain::registry::NamingStyle::Kebab
        }
        other => other,
    };
    if !style.is_match(name) {
        return Err(invalid(&format!("must match {}", style.pattern())));
    }
    Ok(())
}

/// File stem for a layer/name pair.
pub fn file_stem_for(layer: LayerType, name: &str) -> String {
    if layer == LayerType::Entity {
        let core = name
            .strip_prefix('T')
            .and_then(|n| n.strip_suffix("Entity"))
            .unwrap_or(name);
        let stem = text::to_kebab_case(core);
        if stem.is_empty() { "data".into() } else { stem }
    } else {
        name.to_string()
    }
}
