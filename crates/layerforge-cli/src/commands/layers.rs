//! `layerforge layers`: print the layer registry.

use serde::Serialize;

use layerforge_core::domain::{LAYER_REGISTRY, LayerDef, LayerType};

use crate::{error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    pub layer: LayerType,
    pub directory: &'static str,
    pub description: &'static str,
    pub naming_pattern: &'static str,
    pub allowed_dependencies: Vec<LayerType>,
    pub files: Vec<&'static str>,
}

impl From<&LayerDef> for LayerRow {
    fn from(def: &LayerDef) -> Self {
        Self {
            layer: def.layer,
            directory: def.layer.directory(),
            description: def.description,
            naming_pattern: def.naming.style.pattern(),
            allowed_dependencies: def.allowed_dependencies.to_vec(),
            files: def.files.iter().map(|f| f.name).collect(),
        }
    }
}

pub fn rows() -> Vec<LayerRow> {
    LAYER_REGISTRY.iter().map(LayerRow::from).collect()
}

pub fn execute(output: OutputManager) -> CliResult<()> {
    let rows = rows();
    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    output.header("Layers:")?;
    for row in &rows {
        output.print(&format!(
            "  {:<12} {:<14} {}",
            row.layer.as_str(),
            row.directory,
            row.description
        ))?;
        let deps: Vec<&str> = row.allowed_dependencies.iter().map(|l| l.as_str()).collect();
        output.detail(
            "may use",
            &if deps.is_empty() {
                "nothing".to_string()
            } else {
                deps.join(", ")
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_layer_in_hierarchy_order() {
        let layers: Vec<LayerType> = rows().iter().map(|r| r.layer).collect();
        assert_eq!(layers, LayerType::ALL.to_vec());
    }

    #[test]
    fn atoms_depend_on_nothing() {
        let atom = &rows()[0];
        assert_eq!(atom.directory, "atoms");
        assert!(atom.allowed_dependencies.is_empty());
    }
}
