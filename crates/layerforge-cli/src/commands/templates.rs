//! `layerforge templates`: list built-in and user templates.

use serde::Serialize;

use layerforge_core::domain::{ComponentTemplate, LayerType};
use layerforge_core::prelude::TemplateStore;

use crate::{
    cli::TemplatesArgs, commands::template_store, config::AppConfig, error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRow {
    pub name: String,
    pub layer: LayerType,
    pub description: String,
    pub files: Vec<String>,
    pub supported_features: Vec<String>,
    pub required_features: Vec<String>,
}

impl From<ComponentTemplate> for TemplateRow {
    fn from(t: ComponentTemplate) -> Self {
        Self {
            files: t.files.iter().map(|f| f.name.clone()).collect(),
            name: t.name,
            layer: t.layer,
            description: t.description,
            supported_features: t.supported_features,
            required_features: t.required_features,
        }
    }
}

pub fn execute(args: TemplatesArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let store = template_store(config)?;
    let templates = match args.layer {
        Some(layer) => store.find(layer.into())?,
        None => store.list()?,
    };
    let rows: Vec<TemplateRow> = templates.into_iter().map(TemplateRow::from).collect();

    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }
    if rows.is_empty() {
        output.info("No templates found")?;
        return Ok(());
    }

    output.header("Available templates:")?;
    let mut current = None;
    for row in &rows {
        if current != Some(row.layer) {
            output.print(&format!("{}:", row.layer.title()))?;
            current = Some(row.layer);
        }
        output.print(&format!("  {:<20} {}", row.name, row.description))?;
        if !row.required_features.is_empty() {
            output.detail("requires", &row.required_features.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerforge_core::domain::TemplateFile;

    #[test]
    fn row_lists_file_patterns() {
        let template = ComponentTemplate::builder("util-basic", LayerType::Util)
            .description("Pure helpers")
            .file(TemplateFile::new("{{FILE_STEM}}.util.ts", "export {};\n"))
            .requires(["formatting"])
            .build()
            .unwrap();
        let row = TemplateRow::from(template);
        assert_eq!(row.files, vec!["{{FILE_STEM}}.util.ts"]);
        assert_eq!(row.required_features, vec!["formatting"]);
    }
}
