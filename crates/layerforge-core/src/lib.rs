//! LayerForge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the LayerForge
//! component generator: a free-text description goes in, a classified
//! architectural layer, a validated dependency/file plan and auto-corrected
//! React Native files come out.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         layerforge-cli (CLI)            │
//! │   (Drives the service, owns prompts)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (SmartCreateService, CodeGenerator,    │
//! │   analysis strategies, TTL cache)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (AiProvider, Prompt, Store, Renderer,   │
//! │  Filesystem, Clock)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    layerforge-adapters (Infrastructure) │
//! │ (InMemoryStore, LocalFilesystem, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (LAYER_REGISTRY, classifier, naming,    │
//! │  dependencies, code rules, auto-fix)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layerforge_core::prelude::*;
//!
//! let mut service = SmartCreateService::builder()
//!     .templates(store)    // impl TemplateStore
//!     .renderer(renderer)  // impl TemplateRenderer
//!     .build();
//!
//! let result = service.execute(SmartCreateRequest::new("um botão simples com ícone"));
//! assert!(result.success);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        SmartCreateOptions, SmartCreateRequest, SmartCreateResult, SmartCreateService,
        ports::{
            AiProvider, Clock, Confirmation, Filesystem, InteractivePrompt, TemplateRenderer,
            TemplateStore,
        },
    };
    pub use crate::domain::{
        ComponentTemplate, DependencyAnalysis, GeneratedCode, GeneratedFile, LayerAnalysis,
        LayerClassifier, LayerType, NamingContext, TemplateContext, TemplateFile,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
