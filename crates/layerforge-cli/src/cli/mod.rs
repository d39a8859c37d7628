//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use layerforge_core::domain::LayerType;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "layerforge",
    bin_name = "layerforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered React Native components from a sentence",
    long_about = "LayerForge classifies a free-text description into an \
                  architectural layer, validates its dependencies and \
                  generates auto-corrected component files.",
    after_help = "EXAMPLES:\n\
        \x20 layerforge create \"um botão simples com ícone\" -o src\n\
        \x20 layerforge create \"tela de depósito na carteira\" --prefix wallet --dry-run\n\
        \x20 layerforge classify \"modal de confirmação reutilizável\"\n\
        \x20 layerforge completions bash > /usr/share/bash-completion/completions/layerforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a description and generate the component.
    #[command(
        visible_alias = "c",
        about = "Create a component from a description",
        after_help = "EXAMPLES:\n\
            \x20 layerforge create \"um botão simples com ícone\"\n\
            \x20 layerforge create \"modal de confirmação\" --layer molecule -o src\n\
            \x20 layerforge create --interactive"
    )]
    Create(CreateArgs),

    /// Generate several components, one description per line.
    #[command(
        about = "Create components from many descriptions",
        after_help = "EXAMPLES:\n\
            \x20 layerforge batch \"botão\" \"campo de texto\" -o src\n\
            \x20 layerforge batch --file components.txt --dry-run"
    )]
    Batch(BatchArgs),

    /// Classify a description without generating anything.
    #[command(
        about = "Show layer scores, naming and dependencies",
        after_help = "EXAMPLES:\n\
            \x20 layerforge classify \"lista de transações com filtro\"\n\
            \x20 layerforge --output-format json classify \"repositorio de usuarios\""
    )]
    Classify(ClassifyArgs),

    /// Print the layer registry.
    #[command(about = "List architectural layers")]
    Layers,

    /// List available component templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 layerforge templates\n\
            \x20 layerforge templates --layer atom"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 layerforge completions bash > ~/.local/share/bash-completion/completions/layerforge\n\
            \x20 layerforge completions zsh  > ~/.zfunc/_layerforge\n\
            \x20 layerforge completions fish > ~/.config/fish/completions/layerforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the LayerForge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 layerforge config show\n\
            \x20 layerforge config path"
    )]
    Config(ConfigCommands),
}

// ── shared generation flags ──────────────────────────────────────────────────

/// Flags shared by `create` and `batch`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerationArgs {
    /// Skip classification and use this layer.
    #[arg(short = 'l', long = "layer", value_enum, help = "Force the layer")]
    pub layer: Option<LayerArg>,

    /// Prefix applied to generated names (required style for features).
    #[arg(long = "prefix", value_name = "PREFIX", help = "Name prefix, e.g. wallet")]
    pub prefix: Option<String>,

    /// Suffix applied to generated names.
    #[arg(long = "suffix", value_name = "SUFFIX", help = "Name suffix")]
    pub suffix: Option<String>,

    /// Root directory; components land in `<DIR>/<layer dir>/<name>`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root directory (default: generation.output_dir)"
    )]
    pub output: Option<PathBuf>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Keep validation errors instead of patching them.
    #[arg(long = "no-auto-fix", help = "Disable automatic fixes")]
    pub no_auto_fix: bool,

    /// Ask the configured AI provider to polish the generated code.
    #[arg(long = "ai-enhance", help = "Enable AI code enhancement")]
    pub ai_enhance: bool,

    /// Ignore cached analyses.
    #[arg(long = "force-reanalysis", help = "Bypass the analysis cache")]
    pub force_reanalysis: bool,

    /// Extra feature hints, e.g. `variants`, `loading`.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "FEATURE",
        action = clap::ArgAction::Append,
        help = "Feature hint (repeatable)"
    )]
    pub features: Vec<String>,
}

// ── create ───────────────────────────────────────────────────────────────────

/// Arguments for `layerforge create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Free-text description of the component.
    #[arg(
        value_name = "DESCRIPTION",
        required_unless_present = "interactive",
        help = "What the component should do"
    )]
    pub description: Option<String>,

    /// Explicit component name, validated against the layer convention.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Component name")]
    pub name: Option<String>,

    /// Prompt for the description and confirm the analysis.
    #[arg(short = 'i', long = "interactive", help = "Run interactively")]
    pub interactive: bool,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

// ── batch ────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Descriptions, one per argument.
    #[arg(value_name = "DESCRIPTION", help = "Component descriptions")]
    pub descriptions: Vec<String>,

    /// Read descriptions from a file, one per line (`-` for stdin).
    #[arg(
        long = "file",
        value_name = "FILE",
        help = "File with one description per line"
    )]
    pub file: Option<PathBuf>,

    /// Exit non-zero when any item fails.
    #[arg(long = "fail-fast", help = "Stop at the first failing description")]
    pub fail_fast: bool,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

// ── classify ─────────────────────────────────────────────────────────────────

/// Arguments for `layerforge classify`.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Free-text description of the component.
    #[arg(value_name = "DESCRIPTION", help = "What the component should do")]
    pub description: String,

    /// Prefix used for the naming suggestion.
    #[arg(long = "prefix", value_name = "PREFIX", help = "Name prefix")]
    pub prefix: Option<String>,

    /// Extra feature hints.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "FEATURE",
        action = clap::ArgAction::Append,
        help = "Feature hint (repeatable)"
    )]
    pub features: Vec<String>,
}

// ── templates ────────────────────────────────────────────────────────────────

/// Arguments for `layerforge templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Filter by layer.
    #[arg(short = 'l', long = "layer", value_enum, help = "Filter by layer")]
    pub layer: Option<LayerArg>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `layerforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `layerforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (defaults, file and environment merged).
    Show,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Layer names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LayerArg {
    #[value(alias = "atoms")]
    Atom,
    #[value(alias = "molecules")]
    Molecule,
    #[value(alias = "organisms")]
    Organism,
    #[value(alias = "templates")]
    Template,
    #[value(alias = "features")]
    Feature,
    #[value(alias = "layouts")]
    Layout,
    #[value(alias = "particles")]
    Particle,
    #[value(alias = "models")]
    Model,
    #[value(alias = "entities")]
    Entity,
    #[value(alias = "utils")]
    Util,
    #[value(alias = "gateways")]
    Gateway,
    #[value(alias = "repositories")]
    Repository,
}

impl From<LayerArg> for LayerType {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Atom => Self::Atom,
            LayerArg::Molecule => Self::Molecule,
            LayerArg::Organism => Self::Organism,
            LayerArg::Template => Self::Template,
            LayerArg::Feature => Self::Feature,
            LayerArg::Layout => Self::Layout,
            LayerArg::Particle => Self::Particle,
            LayerArg::Model => Self::Model,
            LayerArg::Entity => Self::Entity,
            LayerArg::Util => Self::Util,
            LayerArg::Gateway => Self::Gateway,
            LayerArg::Repository => Self::Repository,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn layer_arg_covers_every_layer() {
        for layer in LayerType::ALL {
            let arg = LayerArg::from_str(layer.as_str(), true).unwrap();
            assert_eq!(LayerType::from(arg), layer);
        }
    }

    #[test]
    fn plural_layer_alias() {
        let cli = Cli::parse_from(["layerforge", "templates", "--layer", "entities"]);
        if let Commands::Templates(args) = cli.command {
            assert_eq!(args.layer, Some(LayerArg::Entity));
        } else {
            panic!("expected Templates command");
        }
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from([
            "layerforge",
            "create",
            "um botão simples",
            "--layer",
            "atom",
            "-o",
            "src",
            "--dry-run",
            "-f",
            "variants",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.description.as_deref(), Some("um botão simples"));
        assert_eq!(args.generation.layer, Some(LayerArg::Atom));
        assert_eq!(args.generation.output, Some(PathBuf::from("src")));
        assert!(args.generation.dry_run);
        assert_eq!(args.generation.features, vec!["variants".to_string()]);
    }

    #[test]
    fn create_requires_description_unless_interactive() {
        assert!(Cli::try_parse_from(["layerforge", "create"]).is_err());
        assert!(Cli::try_parse_from(["layerforge", "create", "-i"]).is_ok());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["layerforge", "--quiet", "--verbose", "layers"]);
        assert!(result.is_err());
    }
}
