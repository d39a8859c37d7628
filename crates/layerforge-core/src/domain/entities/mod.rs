pub mod analysis;
pub mod component_template;
pub mod generated;

pub use analysis::{AnalysisEdit, LayerAnalysis};
pub use component_template::{ComponentTemplate, TemplateFile, TemplateSource};
pub use generated::{
    CodeEnhancement, EnhancementKind, GeneratedCode, GeneratedFile, GenerationMetadata,
};
