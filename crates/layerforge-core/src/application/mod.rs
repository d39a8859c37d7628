//! Application layer for LayerForge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SmartCreateService, strategies, cache, code generator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules itself. All classification, naming and validation rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AnalysisCache, AnalysisRequest, AnalysisStrategy, CodeGenerator, GenerationOptions, Phase,
    SmartCreateOptions, SmartCreateRequest, SmartCreateResult, SmartCreateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    AiProvider, Clock, Confirmation, Filesystem, InteractivePrompt, TemplateRenderer,
    TemplateStore,
};

pub use error::ApplicationError;
