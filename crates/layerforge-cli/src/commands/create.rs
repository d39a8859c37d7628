//! Implementation of the `layerforge create` command.
//!
//! Responsibility: merge flags over config, run one description through
//! the smart-create pipeline, and display the result.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use layerforge_core::application::SmartCreateResult;
use layerforge_core::prelude::*;

use crate::{
    cli::{CreateArgs, GlobalArgs},
    commands::{build_service, smart_options},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{NonInteractivePrompt, describe_analysis},
};

#[instrument(skip_all, fields(interactive = args.interactive))]
pub fn execute(
    args: CreateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut options = smart_options(&args.generation, config);
    options.name = args.name;
    let target = config.output_dir(args.generation.output.as_deref()).to_path_buf();
    options.interactive =
        (args.interactive || options.interactive) && !global.yes && !output.is_json();

    let result = if options.interactive {
        let mut service = build_service(config, interactive_prompt(&output, &options)?)?;
        match args.description {
            Some(description) => {
                service.execute(SmartCreateRequest::new(description).with_options(options))
            }
            None => service.run_interactive()?,
        }
    } else {
        let description = args.description.ok_or_else(|| {
            CliError::invalid_input("a description is required unless --interactive is used")
        })?;
        let prompt = NonInteractivePrompt::new(output.clone());
        let spinner = prompt.progress_handle();
        let mut service = build_service(config, Box::new(prompt))?;
        let result = service.execute(SmartCreateRequest::new(description).with_options(options));
        spinner.finish_and_clear();
        result
    };

    info!(
        success = result.success,
        cancelled = result.cancelled,
        duration_ms = result.duration_ms,
        "create finished"
    );
    report(&result, &target, &output)?;
    outcome(result)
}

#[cfg(feature = "interactive")]
fn interactive_prompt(
    output: &OutputManager,
    options: &SmartCreateOptions,
) -> CliResult<Box<dyn InteractivePrompt>> {
    Ok(Box::new(crate::prompt::DialoguerPrompt::new(
        output.clone(),
        options.clone(),
    )))
}

#[cfg(not(feature = "interactive"))]
fn interactive_prompt(
    _output: &OutputManager,
    _options: &SmartCreateOptions,
) -> CliResult<Box<dyn InteractivePrompt>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Map a finished run to the command outcome.
pub fn outcome(result: SmartCreateResult) -> CliResult<()> {
    if result.cancelled {
        return Err(CliError::Cancelled);
    }
    if result.success {
        return Ok(());
    }
    Err(CliError::GenerationFailed {
        description: result.description,
        failed_in: result.failed_in,
        errors: result.errors,
    })
}

/// Directory the component lands in, whether or not it was written.
pub fn component_dir(target: &Path, analysis: &LayerAnalysis) -> PathBuf {
    target
        .join(analysis.layer.directory())
        .join(analysis.file_stem())
}

fn report(result: &SmartCreateResult, target: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(result)?;
        return Ok(());
    }
    if result.cancelled {
        output.info("Cancelled; no files were written")?;
        return Ok(());
    }
    if !result.success {
        return Ok(());
    }

    if let Some(analysis) = &result.analysis {
        output.header(&describe_analysis(analysis))?;
        output.detail("reasoning", &analysis.reasoning)?;
    }
    if let Some(deps) = &result.dependencies {
        let layers: Vec<&str> = deps.all_dependencies().iter().map(|l| l.as_str()).collect();
        let layers = if layers.is_empty() {
            "none".to_string()
        } else {
            layers.join(", ")
        };
        output.detail("dependencies", &layers)?;
    }
    if let Some(generated) = &result.generated {
        if let Some(template) = &generated.metadata.template {
            output.detail("template", template)?;
        }
        output.detail(
            "validation",
            &format!(
                "score {:.2}, {} auto-fixes",
                generated.validation.score,
                generated.auto_fix_count()
            ),
        )?;
    }

    for warning in &result.warnings {
        output.warning(warning)?;
    }

    if !result.written_files.is_empty() {
        for path in &result.written_files {
            output.success(&format!("created {}", path.display()))?;
        }
    } else if let (Some(analysis), Some(generated)) = (&result.analysis, &result.generated) {
        let dir = component_dir(target, analysis);
        output.info(&format!("Dry run; would create in {}:", dir.display()))?;
        for file in &generated.files {
            output.print(&format!("  {}", file.path))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerforge_core::application::Phase;

    fn result(success: bool, cancelled: bool) -> SmartCreateResult {
        SmartCreateResult {
            run_id: uuid::Uuid::nil(),
            description: "botão".into(),
            success,
            cancelled,
            phase: if success { Phase::Complete } else { Phase::Error },
            failed_in: (!success && !cancelled).then_some(Phase::Analysis),
            analysis: None,
            dependencies: None,
            generated: None,
            written_files: vec![],
            errors: vec!["boom".into()],
            warnings: vec![],
            duration_ms: 1,
        }
    }

    #[test]
    fn success_is_ok() {
        assert!(outcome(result(true, false)).is_ok());
    }

    #[test]
    fn cancelled_maps_to_cancelled() {
        assert!(matches!(
            outcome(result(false, true)),
            Err(CliError::Cancelled)
        ));
    }

    #[test]
    fn failure_carries_errors_and_phase() {
        match outcome(result(false, false)) {
            Err(CliError::GenerationFailed {
                failed_in, errors, ..
            }) => {
                assert_eq!(failed_in, Some(Phase::Analysis));
                assert_eq!(errors, vec!["boom".to_string()]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn component_dir_uses_layer_directory_and_stem() {
        let analysis = LayerAnalysis::new(LayerType::Molecule, "confirm-dialog", 0.7);
        assert_eq!(
            component_dir(Path::new("src"), &analysis),
            PathBuf::from("src/molecules/confirm-dialog")
        );
    }
}
