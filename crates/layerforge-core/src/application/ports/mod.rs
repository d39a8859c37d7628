//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `layerforge-adapters` and the
//! CLI implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `AiProvider`: optional language-model assistance
//!   - `InteractivePrompt`: input collection and confirmation
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template storage/retrieval
//!   - `TemplateRenderer`: Template rendering
//!   - `Clock`: time source for the cache and metadata
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `SmartCreateService::execute` and friends, consumed by the CLI

pub mod output;

pub use output::{
    AiProvider, AnalysisContext, Clock, Confirmation, Filesystem, InteractivePrompt, SystemClock,
    TemplateRenderer, TemplateStore, ValidationSuggestions,
};

#[cfg(test)]
pub use output::{
    MockAiProvider, MockClock, MockFilesystem, MockInteractivePrompt, MockTemplateRenderer,
    MockTemplateStore,
};
