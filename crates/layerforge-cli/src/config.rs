//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables, `LAYERFORGE__<SECTION>__<KEY>`
//! 3. `--config FILE`, or else `./.layerforge.toml` over the user config file
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use layerforge_core::application::services::cache::DEFAULT_TTL_SECS;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

pub const ENV_PREFIX: &str = "LAYERFORGE";
pub const LOCAL_CONFIG_FILE: &str = ".layerforge.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub generation: GenerationConfig,
    pub naming: NamingConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub cache_enabled: bool,
    pub cache_ttl_secs: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub auto_fix: bool,
    pub ai_enhance: bool,
    /// Root that layer directories are created under.
    pub output_dir: PathBuf,
    /// Confirm every analysis before generating.
    pub interactive: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            auto_fix: true,
            ai_enhance: false,
            output_dir: PathBuf::from("src"),
            interactive: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of user templates, laid out `<layer>/<name>/template.toml`.
    pub local_path: Option<PathBuf>,
    /// Render optional template files (stories, specs).
    pub include_optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    pub file: Option<PathBuf>,
    /// JSON lines instead of the human format, file only.
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// A file passed via `--config` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let files = match config_file {
            Some(path) => vec![(path.clone(), true)],
            None => vec![
                (Self::config_path(), false),
                (PathBuf::from(LOCAL_CONFIG_FILE), false),
            ],
        };
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::load_from(&files, env)
    }

    fn load_from(files: &[(PathBuf, bool)], env: Environment) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );
        for (path, required) in files {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(*required),
            );
        }

        builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Falls back to `.layerforge.toml` in the current directory when the
    /// platform has no config directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "layerforge", "layerforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Configured output root, unless a flag overrides it.
    pub fn output_dir<'a>(&'a self, flag: Option<&'a Path>) -> &'a Path {
        flag.unwrap_or(self.generation.output_dir.as_path())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        no_env().source(Some(map))
    }

    #[test]
    fn defaults_enable_cache_and_auto_fix() {
        let cfg = AppConfig::default();
        assert!(cfg.analysis.cache_enabled);
        assert_eq!(cfg.analysis.cache_ttl_secs, 300);
        assert!(cfg.generation.auto_fix);
        assert_eq!(cfg.generation.output_dir, PathBuf::from("src"));
    }

    #[test]
    fn load_without_files_returns_defaults() {
        let cfg = AppConfig::load_from(&[], no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let files = [(PathBuf::from("/definitely/not/here.toml"), false)];
        assert!(AppConfig::load_from(&files, no_env()).is_ok());
    }

    #[test]
    fn missing_required_file_fails() {
        let files = [(PathBuf::from("/definitely/not/here.toml"), true)];
        assert!(AppConfig::load_from(&files, no_env()).is_err());
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layerforge.toml");
        std::fs::write(
            &path,
            "[generation]\noutput_dir = \"app/src\"\n\n[naming]\nprefix = \"wallet\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&[(path, true)], no_env()).unwrap();
        assert_eq!(cfg.generation.output_dir, PathBuf::from("app/src"));
        assert_eq!(cfg.naming.prefix.as_deref(), Some("wallet"));
        assert!(cfg.generation.auto_fix);
    }

    #[test]
    fn environment_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layerforge.toml");
        std::fs::write(&path, "[analysis]\ncache_ttl_secs = 60\n").unwrap();

        let cfg = AppConfig::load_from(
            &[(path, true)],
            env(&[
                ("LAYERFORGE__ANALYSIS__CACHE_TTL_SECS", "5"),
                ("LAYERFORGE__OUTPUT__FORMAT", "json"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.analysis.cache_ttl_secs, 5);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn flag_wins_over_configured_output_dir() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.output_dir(None), Path::new("src"));
        assert_eq!(cfg.output_dir(Some(Path::new("out"))), Path::new("out"));
    }

    #[test]
    fn toml_dump_round_trips_sections() {
        let dumped = AppConfig::default().to_toml().unwrap();
        assert!(dumped.contains("[analysis]"));
        assert!(dumped.contains("[generation]"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
