//! Command handlers. Each translates parsed arguments into core calls and
//! renders the results; no classification or generation rules live here.

pub mod batch;
pub mod classify;
pub mod completions;
pub mod config;
pub mod create;
pub mod layers;
pub mod templates;

use chrono::Duration;
use tracing::debug;

use layerforge_adapters::{
    FilesystemTemplateLoader, InMemoryStore, LocalFilesystem, SimpleRenderer,
};
use layerforge_core::application::GenerationOptions;
use layerforge_core::prelude::*;

use crate::cli::GenerationArgs;
use crate::config::AppConfig;
use crate::error::CliResult;

/// Template store with the built-ins plus any user templates from
/// `templates.local_path`.
pub fn template_store(config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;
    if let Some(dir) = &config.templates.local_path {
        let loaded = FilesystemTemplateLoader::new(dir).load_into(&store)?;
        debug!(loaded, dir = %dir.display(), "user templates merged");
    }
    Ok(store)
}

/// Wire the production adapters into a service.
pub fn build_service(
    config: &AppConfig,
    prompt: Box<dyn InteractivePrompt>,
) -> CliResult<SmartCreateService> {
    let renderer = if config.templates.include_optional {
        SimpleRenderer::with_optional()
    } else {
        SimpleRenderer::new()
    };

    let builder = SmartCreateService::builder()
        .templates(Box::new(template_store(config)?))
        .renderer(Box::new(renderer))
        .filesystem(Box::new(LocalFilesystem::new()))
        .prompt(prompt);

    let builder = if config.analysis.cache_enabled {
        builder.cache_ttl(Duration::seconds(config.analysis.cache_ttl_secs))
    } else {
        builder.without_cache()
    };
    Ok(builder.build())
}

/// Merge generation flags over the configured defaults.
pub fn smart_options(args: &GenerationArgs, config: &AppConfig) -> SmartCreateOptions {
    SmartCreateOptions {
        interactive: config.generation.interactive,
        dry_run: args.dry_run,
        force_reanalysis: args.force_reanalysis,
        generation: GenerationOptions {
            auto_fix: config.generation.auto_fix && !args.no_auto_fix,
            ai_enhance: config.generation.ai_enhance || args.ai_enhance,
        },
        layer: args.layer.map(LayerType::from),
        name: None,
        naming: NamingContext {
            prefix: args.prefix.clone().or_else(|| config.naming.prefix.clone()),
            suffix: args.suffix.clone().or_else(|| config.naming.suffix.clone()),
        },
        features: args.features.clone(),
        target_dir: Some(config.output_dir(args.output.as_deref()).to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LayerArg;
    use std::path::PathBuf;

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.naming.prefix = Some("bank".into());
        let args = GenerationArgs {
            layer: Some(LayerArg::Feature),
            prefix: Some("wallet".into()),
            output: Some(PathBuf::from("out")),
            no_auto_fix: true,
            ..GenerationArgs::default()
        };

        let options = smart_options(&args, &config);
        assert_eq!(options.layer, Some(LayerType::Feature));
        assert_eq!(options.naming.prefix.as_deref(), Some("wallet"));
        assert_eq!(options.target_dir, Some(PathBuf::from("out")));
        assert!(!options.generation.auto_fix);
    }

    #[test]
    fn config_fills_missing_flags() {
        let mut config = AppConfig::default();
        config.naming.prefix = Some("bank".into());
        config.generation.ai_enhance = true;

        let options = smart_options(&GenerationArgs::default(), &config);
        assert_eq!(options.naming.prefix.as_deref(), Some("bank"));
        assert_eq!(options.target_dir, Some(PathBuf::from("src")));
        assert!(options.generation.ai_enhance);
        assert!(options.generation.auto_fix);
    }

    #[test]
    fn missing_template_dir_is_reported() {
        let mut config = AppConfig::default();
        config.templates.local_path = Some(PathBuf::from("/definitely/not/templates"));
        assert!(template_store(&config).is_err());
    }

    #[test]
    fn builtin_store_lists_atoms() {
        let store = template_store(&AppConfig::default()).unwrap();
        assert!(!store.find(LayerType::Atom).unwrap().is_empty());
    }
}
