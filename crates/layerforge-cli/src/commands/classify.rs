//! `layerforge classify`: layer scores, naming and dependencies for a
//! description. Nothing is rendered or written.

use serde::Serialize;
use tracing::instrument;

use layerforge_core::domain::{
    DependencyAnalysis, DependencyAnalyzer, LayerClassification, LayerClassifier, LayerType,
    NamingAnalyzer, NamingContext, NamingSuggestion, entities::analysis::file_stem_for,
};

use crate::{
    cli::ClassifyArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyReport {
    pub classification: LayerClassification,
    pub naming: NamingSuggestion,
    pub dependencies: DependencyAnalysis,
}

pub fn classify(args: &ClassifyArgs, config: &AppConfig) -> CliResult<ClassifyReport> {
    if args.description.trim().is_empty() {
        return Err(CliError::invalid_input("the description is empty"));
    }
    let classification =
        LayerClassifier::new().classify_with_fallback(&args.description, &args.features);
    let layer = classification.layer();

    let naming = NamingContext {
        prefix: args.prefix.clone().or_else(|| config.naming.prefix.clone()),
        suffix: config.naming.suffix.clone(),
    };
    let name = NamingAnalyzer::new().suggest_name(&args.description, layer, Some(&naming));
    let dependencies =
        DependencyAnalyzer::new().analyze_dependencies(&args.description, layer, &args.features);

    Ok(ClassifyReport {
        classification,
        naming: name,
        dependencies,
    })
}

#[instrument(skip_all)]
pub fn execute(args: ClassifyArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let report = classify(&args, config)?;
    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    let c = &report.classification;
    output.header(&format!(
        "{} ({:.0}% confidence)",
        c.layer().title(),
        c.confidence * 100.0
    ))?;
    output.detail("reasoning", &c.reasoning)?;

    output.print("")?;
    output.print("Scores:")?;
    for score in std::iter::once(&c.primary).chain(&c.alternatives) {
        output.print(&format!(
            "  {:<12} {:>5.2}  {}",
            score.layer.as_str(),
            score.score,
            score.matched_keywords.join(", ")
        ))?;
    }

    output.print("")?;
    output.detail("name", &report.naming.primary)?;
    if !report.naming.alternatives.is_empty() {
        output.detail("alternatives", &report.naming.alternatives.join(", "))?;
    }

    let deps = &report.dependencies;
    output.detail("requires", &join_layers(deps.required.iter()))?;
    output.detail("optional", &join_layers(deps.optional.iter()))?;
    output.detail("files", &deps.files_for(&stem(&report)).join(", "))?;
    for violation in &deps.violations {
        output.warning(violation)?;
    }
    Ok(())
}

fn stem(report: &ClassifyReport) -> String {
    file_stem_for(report.classification.layer(), &report.naming.primary)
}

fn join_layers<'a>(layers: impl Iterator<Item = &'a LayerType>) -> String {
    let names: Vec<&str> = layers.map(|l| l.as_str()).collect();
    if names.is_empty() {
        "none".into()
    } else {
        names.join(", ")
    }
}
