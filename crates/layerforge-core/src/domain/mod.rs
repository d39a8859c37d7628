//! Core domain layer for LayerForge.
//!
//! Pure, synchronous rule engines over the static layer registry. All I/O
//! (AI providers, templates on disk, generated files) is reached through
//! ports defined in the application layer.
//!
//! ## Pipeline
//!
//! ```text
//! description
//!   ├─► LayerClassifier      → layer + confidence
//!   ├─► NamingAnalyzer       → component name
//!   └─► DependencyAnalyzer   → required/optional deps, imports, files
//!          │
//!          ▼
//!   TemplateSelector + VariableExtractor → template + TemplateContext
//!          │
//!          ▼
//!   CodeValidator ⇄ AutoFixer → ValidationResult
//! ```
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Data-driven**: per-layer tables live in one registry (`registry.rs`)

pub mod autofix;
pub mod classifier;
pub mod dependency;
pub mod entities;
pub mod error;
pub mod naming;
pub mod registry;
pub mod template_selector;
pub mod text;
pub mod validation;
pub mod value_objects;
pub mod variables;
pub mod vocabulary;

pub use autofix::{AUTO_FIX_CONFIDENCE, AutoFixer};
pub use classifier::{LayerClassification, LayerClassifier, LayerScore};
pub use dependency::{DependencyAnalysis, DependencyAnalyzer, HierarchyValidation, ImportSuggestion};
pub use entities::{
    AnalysisEdit, CodeEnhancement, ComponentTemplate, EnhancementKind, GeneratedCode,
    GeneratedFile, GenerationMetadata, LayerAnalysis, TemplateFile, TemplateSource,
};
pub use error::{DomainError, ErrorCategory};
pub use naming::{NamingAnalyzer, NamingContext, NamingSuggestion};
pub use registry::{LAYER_REGISTRY, LayerDef, layer_def};
pub use template_selector::{TemplateScore, TemplateSelection, TemplateSelector};
pub use validation::{CodeValidator, Finding, FindingKind, Severity, ValidationResult};
pub use value_objects::{DependencyProfile, LayerType, Level};
pub use variables::{FeatureFlags, Prop, TemplateContext, VariableExtractor};
