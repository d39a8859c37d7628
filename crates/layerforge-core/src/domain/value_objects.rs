//! Domain value objects: LayerType, Level, DependencyProfile.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO pattern data. Keywords, hierarchy edges, naming conventions
//! and file plans live in `registry.rs`. This file's only job is to define
//! the types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a `LayerDef` entry in `registry.rs`
//! 4. The registry integrity test catches anything missing

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── LayerType ────────────────────────────────────────────────────────────────

/// One of the twelve architectural roles a generated component can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Atom,
    Molecule,
    Organism,
    Template,
    Feature,
    Layout,
    Particle,
    Model,
    Entity,
    Util,
    Gateway,
    Repository,
}

impl LayerType {
    /// All layers in hierarchy order. Ties in classification scores are
    /// broken by this order.
    pub const ALL: [LayerType; 12] = [
        Self::Atom,
        Self::Molecule,
        Self::Organism,
        Self::Template,
        Self::Feature,
        Self::Layout,
        Self::Particle,
        Self::Model,
        Self::Entity,
        Self::Util,
        Self::Gateway,
        Self::Repository,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Molecule => "molecule",
            Self::Organism => "organism",
            Self::Template => "template",
            Self::Feature => "feature",
            Self::Layout => "layout",
            Self::Particle => "particle",
            Self::Model => "model",
            Self::Entity => "entity",
            Self::Util => "util",
            Self::Gateway => "gateway",
            Self::Repository => "repository",
        }
    }

    /// Plural directory name used for output paths and template lookup.
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::Atom => "atoms",
            Self::Molecule => "molecules",
            Self::Organism => "organisms",
            Self::Template => "templates",
            Self::Feature => "features",
            Self::Layout => "layouts",
            Self::Particle => "particles",
            Self::Model => "models",
            Self::Entity => "entities",
            Self::Util => "utils",
            Self::Gateway => "gateways",
            Self::Repository => "repositories",
        }
    }

    /// Capitalised name, used for display-name namespaces (`Atom.Button`).
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Atom => "Atom",
            Self::Molecule => "Molecule",
            Self::Organism => "Organism",
            Self::Template => "Template",
            Self::Feature => "Feature",
            Self::Layout => "Layout",
            Self::Particle => "Particle",
            Self::Model => "Model",
            Self::Entity => "Entity",
            Self::Util => "Util",
            Self::Gateway => "Gateway",
            Self::Repository => "Repository",
        }
    }

    /// Whether components of this layer render UI (`.tsx` component files).
    pub const fn is_visual(self) -> bool {
        matches!(
            self,
            Self::Atom
                | Self::Molecule
                | Self::Organism
                | Self::Template
                | Self::Feature
                | Self::Layout
                | Self::Particle
        )
    }

    /// Whether the layer's main component must reference a use-case module.
    pub const fn requires_use_case(self) -> bool {
        matches!(self, Self::Molecule | Self::Organism | Self::Feature)
    }

    /// Static registry entry for this layer.
    ///
    /// Delegates to `registry::layer_def`. Do not add pattern data here;
    /// register it in `registry.rs` instead.
    pub fn def(self) -> &'static crate::domain::registry::LayerDef {
        crate::domain::registry::layer_def(self)
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        LayerType::ALL
            .into_iter()
            .find(|layer| layer.as_str() == lowered || layer.directory() == lowered)
            .ok_or_else(|| DomainError::InvalidLayer(s.to_string()))
    }
}

// ── Level ────────────────────────────────────────────────────────────────────

/// Three-step scale used for pattern complexity and reusability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Numeric rank 1..=3, used by template complexity matching.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DependencyProfile ────────────────────────────────────────────────────────

/// What a layer typically depends on. Each profile has its own indicator
/// vocabulary in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyProfile {
    /// Self-contained primitives.
    Standalone,
    /// Composes atoms.
    Atoms,
    /// Composes molecules and atoms.
    Components,
    /// Arranges organisms into page structure.
    Composition,
    /// Orchestrates UI with data and business logic.
    Orchestration,
    /// Provides shared state or context.
    SharedState,
    /// Business rules over entities.
    Domain,
    /// Pure data contracts.
    Contract,
    /// Pure helper functions.
    Pure,
    /// External I/O (HTTP, storage).
    External,
    /// Data access over gateways.
    DataAccess,
}

impl DependencyProfile {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Atoms => "atoms",
            Self::Components => "components",
            Self::Composition => "composition",
            Self::Orchestration => "orchestration",
            Self::SharedState => "shared-state",
            Self::Domain => "domain",
            Self::Contract => "contract",
            Self::Pure => "pure",
            Self::External => "external",
            Self::DataAccess => "data-access",
        }
    }
}

impl fmt::Display for DependencyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
