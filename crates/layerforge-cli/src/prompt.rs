//! Terminal implementations of the core `InteractivePrompt` port.
//!
//! - [`NonInteractivePrompt`]: never asks, reports progress on a spinner.
//! - [`DialoguerPrompt`]: asks for the description and confirms the
//!   analysis (feature `interactive`).

use std::io;

use indicatif::ProgressBar;
use tracing::debug;

use layerforge_core::application::ApplicationError;
use layerforge_core::prelude::*;

use crate::output::OutputManager;

fn emit(result: io::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "failed to write prompt output");
    }
}

fn prompt_error(reason: impl ToString) -> ForgeError {
    ApplicationError::Prompt {
        reason: reason.to_string(),
    }
    .into()
}

/// One-line summary used by both prompts and the `create` report.
pub fn describe_analysis(analysis: &LayerAnalysis) -> String {
    format!(
        "{} {} ({:.0}% confidence)",
        analysis.layer.title(),
        analysis.component_name,
        analysis.confidence * 100.0
    )
}

// ── NonInteractivePrompt ─────────────────────────────────────────────────────

/// Accepts every analysis and renders progress on a spinner.
pub struct NonInteractivePrompt {
    output: OutputManager,
    spinner: ProgressBar,
}

impl NonInteractivePrompt {
    pub fn new(output: OutputManager) -> Self {
        let spinner = output.spinner("Starting");
        Self { output, spinner }
    }

    /// Handle kept by the caller to clear the spinner after the run.
    pub fn progress_handle(&self) -> ProgressBar {
        self.spinner.clone()
    }
}

impl InteractivePrompt for NonInteractivePrompt {
    fn collect_input(&self) -> ForgeResult<SmartCreateRequest> {
        Err(prompt_error("interactive input is disabled"))
    }

    fn confirm_analysis(
        &self,
        _analysis: &LayerAnalysis,
        _dependencies: &DependencyAnalysis,
    ) -> ForgeResult<Confirmation> {
        Ok(Confirmation::Accepted)
    }

    fn show_progress(&self, message: &str) {
        self.spinner.set_message(message.to_owned());
    }

    fn show_success(&self, message: &str) {
        self.spinner.suspend(|| emit(self.output.success(message)));
    }

    fn show_warning(&self, message: &str) {
        self.spinner.suspend(|| emit(self.output.warning(message)));
    }

    /// Failures are reported once, by the command that owns the run.
    fn show_error(&self, message: &str) {
        debug!(%message, "run failed");
    }
}

// ── DialoguerPrompt ──────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompt;

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use layerforge_core::domain::AnalysisEdit;

    use super::*;

    const ACTIONS: [&str; 3] = ["Generate", "Edit", "Cancel"];

    /// Terminal prompt backed by `dialoguer`.
    pub struct DialoguerPrompt {
        output: OutputManager,
        /// Options every collected request starts from.
        defaults: SmartCreateOptions,
        theme: ColorfulTheme,
    }

    impl DialoguerPrompt {
        pub fn new(output: OutputManager, defaults: SmartCreateOptions) -> Self {
            Self {
                output,
                defaults,
                theme: ColorfulTheme::default(),
            }
        }

        fn select_layer(
            &self,
            prompt: &str,
            current: Option<LayerType>,
        ) -> ForgeResult<Option<LayerType>> {
            let mut items = vec!["auto (classify)".to_string()];
            items.extend(LayerType::ALL.iter().map(|l| l.as_str().to_string()));
            let default = current
                .and_then(|c| LayerType::ALL.iter().position(|l| *l == c))
                .map_or(0, |i| i + 1);

            let picked = Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(&items)
                .default(default)
                .interact()
                .map_err(prompt_error)?;
            Ok(picked.checked_sub(1).map(|i| LayerType::ALL[i]))
        }

        fn edit(&self, analysis: &LayerAnalysis) -> ForgeResult<AnalysisEdit> {
            let mut edit = AnalysisEdit::default();

            let layer = self.select_layer("Layer", Some(analysis.layer))?;
            if layer.is_some_and(|l| l != analysis.layer) {
                edit.layer = layer;
            }

            let name: String = Input::with_theme(&self.theme)
                .with_prompt("Component name")
                .default(analysis.component_name.clone())
                .interact_text()
                .map_err(prompt_error)?;
            if name != analysis.component_name {
                edit.component_name = Some(name);
            }

            let props: String = Input::with_theme(&self.theme)
                .with_prompt("Props (comma separated)")
                .default(analysis.props.join(", "))
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            let props = split_list(&props);
            if props != analysis.props {
                edit.props = Some(props);
            }

            Ok(edit)
        }
    }

    impl InteractivePrompt for DialoguerPrompt {
        fn collect_input(&self) -> ForgeResult<SmartCreateRequest> {
            let description: String = Input::with_theme(&self.theme)
                .with_prompt("Describe the component")
                .interact_text()
                .map_err(prompt_error)?;

            let mut options = self.defaults.clone();
            if options.layer.is_none() {
                options.layer = self.select_layer("Layer", None)?;
            }
            let dry_run = Confirm::with_theme(&self.theme)
                .with_prompt("Preview only (dry run)?")
                .default(options.dry_run)
                .interact()
                .map_err(prompt_error)?;
            options.dry_run = dry_run;

            Ok(SmartCreateRequest::new(description).with_options(options))
        }

        fn confirm_analysis(
            &self,
            analysis: &LayerAnalysis,
            dependencies: &DependencyAnalysis,
        ) -> ForgeResult<Confirmation> {
            emit(self.output.header(&describe_analysis(analysis)));
            emit(self.output.detail("reasoning", &analysis.reasoning));
            let deps: Vec<&str> = dependencies
                .all_dependencies()
                .iter()
                .map(|l| l.as_str())
                .collect();
            emit(self.output.detail("dependencies", &deps.join(", ")));
            emit(self.output.detail("files", &analysis.files.join(", ")));
            for violation in &dependencies.violations {
                emit(self.output.warning(violation));
            }

            let action = Select::with_theme(&self.theme)
                .with_prompt("Continue?")
                .items(&ACTIONS)
                .default(0)
                .interact()
                .map_err(prompt_error)?;

            match action {
                0 => Ok(Confirmation::Accepted),
                1 => {
                    let edit = self.edit(analysis)?;
                    if edit.is_empty() {
                        Ok(Confirmation::Accepted)
                    } else {
                        Ok(Confirmation::Modified(edit))
                    }
                }
                _ => Ok(Confirmation::Rejected),
            }
        }

        fn show_progress(&self, message: &str) {
            emit(self.output.info(message));
        }

        fn show_success(&self, message: &str) {
            emit(self.output.success(message));
        }

        fn show_warning(&self, message: &str) {
            emit(self.output.warning(message));
        }

        fn show_error(&self, message: &str) {
            emit(self.output.error(message));
        }
    }
}

#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};
    use crate::config::AppConfig;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            yes: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn non_interactive_accepts_analysis() {
        let prompt = NonInteractivePrompt::new(quiet_output());
        let analysis = LayerAnalysis::new(LayerType::Atom, "button", 0.8);
        let deps = layerforge_core::domain::DependencyAnalyzer::new()
            .analyze_dependencies("botão", LayerType::Atom, &[]);
        assert_eq!(
            prompt.confirm_analysis(&analysis, &deps).unwrap(),
            Confirmation::Accepted
        );
    }

    #[test]
    fn non_interactive_refuses_to_collect_input() {
        let prompt = NonInteractivePrompt::new(quiet_output());
        let err = prompt.collect_input().unwrap_err();
        assert!(err.to_string().contains("interactive input is disabled"));
    }

    #[test]
    fn spinner_is_hidden_when_quiet() {
        let prompt = NonInteractivePrompt::new(quiet_output());
        assert!(prompt.progress_handle().is_hidden());
        prompt.show_progress("Analyzing description");
    }

    #[test]
    fn summary_includes_confidence() {
        let analysis = LayerAnalysis::new(LayerType::Molecule, "confirm-dialog", 0.42);
        let summary = describe_analysis(&analysis);
        assert!(summary.contains("confirm-dialog"));
        assert!(summary.contains("42%"));
    }

    #[test]
    fn list_input_is_trimmed() {
        assert_eq!(split_list(" title, onPress ,,"), vec!["title", "onPress"]);
        assert!(split_list("").is_empty());
    }
}
