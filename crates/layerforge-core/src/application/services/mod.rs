//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain engines and ports to turn a description
//! into generated files. [`SmartCreateService`] is the single entry point
//! used by the CLI.

pub mod ai_assist;
pub mod analysis;
pub mod cache;
pub mod code_generator;
pub mod smart_create;

pub use ai_assist::{AiAssist, NO_PROVIDER};
pub use analysis::{AiAnalysisStrategy, AnalysisRequest, AnalysisStrategy, HeuristicAnalysisStrategy};
pub use cache::{AnalysisCache, CacheEntry, cache_key};
pub use code_generator::{CodeGenerator, GenerationOptions};
pub use smart_create::{
    Phase, SmartCreateOptions, SmartCreatePhase, SmartCreateRequest, SmartCreateResult,
    SmartCreateService, SmartCreateServiceBuilder, SmartCreateState,
};
