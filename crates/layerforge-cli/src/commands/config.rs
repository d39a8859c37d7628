//! `layerforge config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Effective configuration:")?;
                let rendered = config
                    .to_toml()
                    .with_cli_context(|| "Failed to render configuration")?;
                output.print(rendered.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path();
            if output.is_json() {
                output.json(&serde_json::json!({ "path": path }))?;
            } else {
                // Printed even with --quiet so it can be captured by scripts.
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
