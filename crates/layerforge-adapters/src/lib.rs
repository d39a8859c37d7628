//! Infrastructure adapters for LayerForge.
//!
//! This crate implements the ports defined in
//! `layerforge-core::application::ports`: template storage, rendering and
//! filesystem access. All disk I/O lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
