//! `layerforge batch`: many descriptions, one independent run each.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{info, instrument, warn};

use layerforge_core::application::SmartCreateResult;
use layerforge_core::prelude::*;

use crate::{
    cli::BatchArgs,
    commands::{build_service, create::component_dir, smart_options},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::NonInteractivePrompt,
};

#[instrument(skip_all)]
pub fn execute(args: BatchArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let mut descriptions = args.descriptions.clone();
    if let Some(file) = &args.file {
        descriptions.extend(read_descriptions(file)?);
    }
    if descriptions.is_empty() {
        return Err(CliError::invalid_input(
            "no descriptions given; pass them as arguments or with --file",
        ));
    }

    let mut options = smart_options(&args.generation, config);
    options.interactive = false;
    let target = config.output_dir(args.generation.output.as_deref()).to_path_buf();

    let prompt = NonInteractivePrompt::new(output.clone());
    let spinner = prompt.progress_handle();
    let mut service = build_service(config, Box::new(prompt))?;

    let results = if args.fail_fast {
        let mut results = Vec::with_capacity(descriptions.len());
        for description in &descriptions {
            let result = service
                .execute(SmartCreateRequest::new(description.clone()).with_options(options.clone()));
            let failed = !result.success;
            results.push(result);
            if failed {
                warn!(%description, "stopping batch at first failure");
                break;
            }
        }
        results
    } else {
        service.execute_batch(&descriptions, &options)
    };
    spinner.finish_and_clear();

    let failed = results.iter().filter(|r| !r.success).count();
    info!(total = descriptions.len(), failed, "batch finished");

    if output.is_json() {
        output.json(&results)?;
    } else {
        for result in &results {
            report_item(result, &target, &output)?;
        }
        output.print("")?;
        output.info(&format!(
            "{} created, {} failed, {} skipped",
            results.len() - failed,
            failed,
            descriptions.len() - results.len()
        ))?;
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: descriptions.len(),
        });
    }
    Ok(())
}

fn report_item(result: &SmartCreateResult, target: &Path, output: &OutputManager) -> CliResult<()> {
    match (&result.analysis, result.success) {
        (Some(analysis), true) => {
            output.success(&format!(
                "{} {} -> {}",
                analysis.layer,
                analysis.component_name,
                component_dir(target, analysis).display()
            ))?;
            for warning in &result.warnings {
                output.warning(&format!("  {warning}"))?;
            }
        }
        _ => {
            let reason = result.errors.join("; ");
            output.error(&format!("\"{}\": {}", result.description, reason))?;
        }
    }
    Ok(())
}

/// One description per line; blank lines and `#` comments are skipped.
/// `-` reads standard input.
fn read_descriptions(path: &Path) -> CliResult<Vec<String>> {
    if path == Path::new("-") {
        return parse_lines(io::stdin().lock()).with_cli_context(|| "Failed to read stdin");
    }
    let file = std::fs::File::open(path)
        .with_cli_context(|| format!("Failed to open {}", path.display()))?;
    parse_lines(BufReader::new(file))
        .with_cli_context(|| format!("Failed to read {}", path.display()))
}

fn parse_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push(trimmed.to_owned());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn comments_and_blanks_are_skipped() {
        let input = "# atoms\num botão simples\n\n  campo de texto  \n#done\n";
        let lines = parse_lines(Cursor::new(input)).unwrap();
        assert_eq!(lines, vec!["um botão simples", "campo de texto"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_descriptions(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, CliError::IoError { .. }));
    }

    #[test]
    fn reads_descriptions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.txt");
        std::fs::write(&path, "botão\nmodal de confirmação\n").unwrap();
        assert_eq!(read_descriptions(&path).unwrap().len(), 2);
    }
}
