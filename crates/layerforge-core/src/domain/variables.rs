//! Variable extraction: analysis → [`TemplateContext`].
//!
//! The context is derived once per generation run and never mutated. It
//! exposes a flat `{{VARIABLE}}` map for renderers:
//!
//! | Variable | Example |
//! |----------|---------|
//! | `COMPONENT_NAME` | `icon-button` |
//! | `PASCAL_NAME` | `IconButton` |
//! | `CAMEL_NAME` | `iconButton` |
//! | `SNAKE_NAME` | `icon_button` |
//! | `SCREAMING_NAME` | `ICON_BUTTON` |
//! | `FILE_STEM` | `icon-button` |
//! | `LAYER` / `LAYER_TITLE` / `LAYER_DIR` | `atom` / `Atom` / `atoms` |
//! | `DISPLAY_NAME` | `Atom.IconButton` |
//! | `TEST_ID` | `atom-icon-button` |
//! | `PROPS_TYPE` | `IconButtonProps` |
//! | `PROPS_INTERFACE` | one `  name?: type;` line per prop |
//! | `PROPS_DESTRUCTURE` | `label, testID` |
//! | `METHODS` | one `  const handleX = () => {};` stub per method |
//! | `METHOD_NAMES` | `handleConfirm, handleCancel` |
//! | `USE_CASE_HOOK` | `useIconButtonUseCase` |
//! | `ENTITY_NAME` | `TIconButtonEntity` |
//! | `IMPORTS` | rendered import lines |
//! | `DESCRIPTION` | original description |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    dependency::{DependencyAnalysis, ImportSuggestion},
    entities::LayerAnalysis,
    registry::ImportKind,
    text,
    value_objects::LayerType,
};

/// A parsed prop declaration (`label?: string`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prop {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
}

impl Prop {
    /// Parse `name?: type`, `name: type` or a bare `name` (typed `string`).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_end_matches([';', ',']);
        let (name_part, type_part) = match raw.split_once(':') {
            Some((n, t)) => (n.trim(), t.trim()),
            None => (raw, "string"),
        };
        let (name, optional) = match name_part.strip_suffix('?') {
            Some(n) => (n.trim(), true),
            None => (name_part, false),
        };

        let valid_ident = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_ident {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            type_name: if type_part.is_empty() {
                "string".into()
            } else {
                type_part.to_string()
            },
            optional,
        })
    }

    pub fn declaration(&self) -> String {
        format!(
            "{}{}: {}",
            self.name,
            if self.optional { "?" } else { "" },
            self.type_name
        )
    }
}

/// Feature switches templates can branch on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub has_props: bool,
    pub has_methods: bool,
    pub has_use_case: bool,
    pub has_state: bool,
    pub has_data_fetching: bool,
    pub has_variants: bool,
}

/// Fully resolved naming/props/imports bag for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub layer: LayerType,
    pub component_name: String,
    pub kebab_name: String,
    pub pascal_name: String,
    pub camel_name: String,
    pub snake_name: String,
    pub screaming_name: String,
    pub file_stem: String,
    /// `{LayerTitle}.{PascalName}`
    pub display_name: String,
    pub test_id: String,
    pub props: Vec<Prop>,
    pub methods: Vec<String>,
    pub imports: Vec<ImportSuggestion>,
    pub features: FeatureFlags,
    pub description: String,
}

impl TemplateContext {
    /// Flat variable map for `{{VARIABLE}}` substitution.
    pub fn variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        let mut set = |k: &str, v: String| {
            vars.insert(k.to_string(), v);
        };

        set("COMPONENT_NAME", self.component_name.clone());
        set("NAME", self.kebab_name.clone());
        set("PASCAL_NAME", self.pascal_name.clone());
        set("CAMEL_NAME", self.camel_name.clone());
        set("SNAKE_NAME", self.snake_name.clone());
        set("SCREAMING_NAME", self.screaming_name.clone());
        set("FILE_STEM", self.file_stem.clone());
        set("LAYER", self.layer.as_str().to_string());
        set("LAYER_TITLE", self.layer.title().to_string());
        set("LAYER_DIR", self.layer.directory().to_string());
        set("DISPLAY_NAME", self.display_name.clone());
        set("TEST_ID", self.test_id.clone());
        set("PROPS_TYPE", format!("{}Props", self.pascal_name));
        set(
            "PROPS_INTERFACE",
            self.props
                .iter()
                .map(|p| format!("  {};", p.declaration()))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        set(
            "PROPS_DESTRUCTURE",
            self.props
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
        set(
            "METHODS",
            self.methods
                .iter()
                .map(|m| format!("  const {m} = () => {{}};"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        set("METHOD_NAMES", self.methods.join(", "));
        set("USE_CASE_HOOK", format!("use{}UseCase", self.pascal_name));
        set("ENTITY_NAME", self.entity_name());
        set("IMPORTS", render_imports(&self.imports));
        set("DESCRIPTION", self.description.clone());
        vars
    }

    /// Substitute every known `{{VARIABLE}}`; unknown placeholders stay as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in self.variables() {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, &value);
        }
        result
    }

    fn entity_name(&self) -> String {
        if self.layer == LayerType::Entity {
            self.component_name.clone()
        } else {
            format!("T{}Entity", self.pascal_name)
        }
    }
}

/// Render import suggestions as TypeScript import lines. Default and named
/// imports of the same module are merged into one line.
pub fn render_imports(imports: &[ImportSuggestion]) -> String {
    // (module, default, named, type-only named) in first-seen order
    let mut merged: Vec<(String, Option<String>, Vec<String>, Vec<String>)> = Vec::new();
    let mut namespaces: Vec<String> = Vec::new();

    for import in imports {
        if import.kind == ImportKind::Namespace {
            if let Some(alias) = import.imports.first() {
                namespaces.push(format!("import * as {alias} from '{}';", import.from));
            }
            continue;
        }

        let idx = match merged.iter().position(|(m, ..)| *m == import.from) {
            Some(i) => i,
            None => {
                merged.push((import.from.clone(), None, Vec::new(), Vec::new()));
                merged.len() - 1
            }
        };
        let entry = &mut merged[idx];
        match import.kind {
            ImportKind::Default => entry.1 = import.imports.first().cloned(),
            ImportKind::Named => entry.2.extend(import.imports.iter().cloned()),
            ImportKind::Type => entry.3.extend(import.imports.iter().cloned()),
            ImportKind::Namespace => {}
        }
    }

    let mut lines = Vec::new();
    for (module, default, named, types) in merged {
        let clause = match (default, named.is_empty()) {
            (Some(d), true) => Some(d),
            (Some(d), false) => Some(format!("{d}, {{ {} }}", named.join(", "))),
            (None, false) => Some(format!("{{ {} }}", named.join(", "))),
            (None, true) => None,
        };
        if let Some(clause) = clause {
            lines.push(format!("import {clause} from '{module}';"));
        }
        if !types.is_empty() {
            lines.push(format!("import type {{ {} }} from '{module}';", types.join(", ")));
        }
    }
    lines.extend(namespaces);
    lines.join("\n")
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct VariableExtractor;

impl VariableExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(
        &self,
        analysis: &LayerAnalysis,
        dependencies: &DependencyAnalysis,
    ) -> TemplateContext {
        let layer = analysis.layer;
        let file_stem = analysis.file_stem();
        let base = if layer == LayerType::Entity {
            file_stem.clone()
        } else {
            analysis.component_name.clone()
        };
        let pascal_name = text::to_pascal_case(&base);

        let mut props: Vec<Prop> = analysis.props.iter().filter_map(|p| Prop::parse(p)).collect();
        if layer == LayerType::Atom && !props.iter().any(|p| p.name == "testID") {
            props.push(Prop {
                name: "testID".into(),
                type_name: "string".into(),
                optional: true,
            });
        }

        let deps = &analysis.dependencies;
        let features = FeatureFlags {
            has_props: !props.is_empty(),
            has_methods: !analysis.methods.is_empty(),
            has_use_case: layer.requires_use_case(),
            has_state: layer == LayerType::Particle || deps.contains(&LayerType::Particle),
            has_data_fetching: deps.contains(&LayerType::Gateway)
                || deps.contains(&LayerType::Repository),
            has_variants: props.iter().any(|p| p.name == "variant"),
        };

        TemplateContext {
            layer,
            component_name: analysis.component_name.clone(),
            kebab_name: text::to_kebab_case(&base),
            camel_name: text::to_camel_case(&base),
            snake_name: text::to_snake_case(&base),
            screaming_name: text::to_screaming_snake_case(&base),
            display_name: format!("{}.{}", layer.title(), pascal_name),
            test_id: format!("{}-{}", layer.as_str(), text::to_kebab_case(&base)),
            pascal_name,
            file_stem,
            props,
            methods: analysis.methods.clone(),
            imports: dependencies.suggested_imports.clone(),
            features,
            description: analysis
                .metadata
                .get("description")
                .cloned()
                .unwrap_or_default(),
        }
    }
}

// ── Inference for the heuristic pipeline ─────────────────────────────────────

/// `(trigger terms, props)` for visual layers.
const PROP_RULES: &[(&[&str], &[&str])] = &[
    (
        &["texto", "text", "titulo", "title", "rotulo", "label", "botao", "button"],
        &["label: string"],
    ),
    (&["icone", "icon"], &["icon?: string"]),
    (
        &["botao", "button", "clique", "click", "toque", "press"],
        &["onPress?: () => void"],
    ),
    (&["desabilitado", "disabled"], &["disabled?: boolean"]),
    (&["carregando", "loading"], &["loading?: boolean"]),
    (
        &["modal", "dialog", "dialogo"],
        &["visible: boolean", "onClose: () => void"],
    ),
    (
        &["confirmacao", "confirmar", "confirmation", "confirm"],
        &["onConfirm: () => void", "onCancel?: () => void"],
    ),
    (&["lista", "list", "tabela", "table"], &["items: unknown[]"]),
    (
        &["variante", "variant", "primario", "secundario", "primary", "secondary"],
        &["variant?: 'primary' | 'secondary'"],
    ),
    (
        &["input", "campo", "field", "entrada"],
        &["value?: string", "onChangeText?: (value: string) => void"],
    ),
];

/// `(trigger terms, fields)` for entities.
const ENTITY_FIELD_RULES: &[(&[&str], &[&str])] = &[
    (&["nome", "name", "usuario", "user", "cliente", "customer"], &["name: string"]),
    (&["email"], &["email: string"]),
    (&["saldo", "balance"], &["balance: number"]),
    (&["valor", "amount", "preco", "price", "deposito", "deposit"], &["amount: number"]),
    (&["data", "date", "historico", "history"], &["createdAt: string"]),
    (&["status", "estado"], &["status: string"]),
];

/// `(trigger terms, methods)` for use-case layers.
const METHOD_RULES: &[(&[&str], &[&str])] = &[
    (
        &["confirmacao", "confirmar", "confirmation", "confirm"],
        &["handleConfirm", "handleCancel"],
    ),
    (
        &["formulario", "form", "enviar", "submit", "cadastro", "login"],
        &["handleSubmit"],
    ),
    (&["busca", "buscar", "pesquisa", "search"], &["handleSearch"]),
    (&["modal", "dialog", "fechar", "close"], &["handleClose"]),
    (&["lista", "list", "carregar", "load", "saldo", "extrato"], &["handleLoad"]),
    (&["deposito", "deposit", "pagamento", "payment", "transferencia"], &["handleSubmit"]),
];

fn apply_rules(normalized: &str, rules: &[(&[&str], &[&str])]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (terms, values) in rules {
        if terms.iter().any(|t| text::contains_word(normalized, t)) {
            for v in *values {
                if !out.iter().any(|o| o == v) {
                    out.push((*v).to_string());
                }
            }
        }
    }
    out
}

/// Props implied by the description.
pub fn infer_props(description: &str, layer: LayerType) -> Vec<String> {
    let normalized = text::normalize(description);
    match layer {
        LayerType::Entity => {
            let mut fields = vec!["id: string".to_string()];
            fields.extend(apply_rules(&normalized, ENTITY_FIELD_RULES));
            fields
        }
        l if l.is_visual() => {
            let mut props = apply_rules(&normalized, PROP_RULES);
            if layer == LayerType::Particle && !props.iter().any(|p| p.starts_with("children")) {
                props.push("children: React.ReactNode".into());
            }
            props
        }
        _ => Vec::new(),
    }
}

/// Methods implied by the description and layer.
pub fn infer_methods(description: &str, layer: LayerType) -> Vec<String> {
    let normalized = text::normalize(description);
    let fixed: &[&str] = match layer {
        LayerType::Gateway => &["execute"],
        LayerType::Repository => &["findAll", "findById", "save"],
        LayerType::Model => &["validate"],
        _ => &[],
    };
    let mut methods: Vec<String> = fixed.iter().map(|m| (*m).to_string()).collect();
    if layer.requires_use_case() {
        methods.extend(apply_rules(&normalized, METHOD_RULES));
        methods.dedup();
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dependency::DependencyAnalyzer;
    use pretty_assertions::assert_eq;

    fn context_for(layer: LayerType, name: &str, props: &[&str]) -> TemplateContext {
        let mut analysis = LayerAnalysis::new(layer, name, 0.9);
        analysis.props = props.iter().map(|p| (*p).to_string()).collect();
        let deps = DependencyAnalyzer::new().analyze_dependencies("", layer, &[]);
        VariableExtractor::new().extract(&analysis, &deps)
    }

    #[test]
    fn prop_parsing() {
        assert_eq!(
            Prop::parse("label?: string"),
            Some(Prop {
                name: "label".into(),
                type_name: "string".into(),
                optional: true
            })
        );
        assert_eq!(Prop::parse("onPress: () => void").unwrap().type_name, "() => void");
        assert_eq!(Prop::parse("title").unwrap().type_name, "string");
        assert_eq!(Prop::parse("1bad: string"), None);
    }

    #[test]
    fn naming_variants() {
        let ctx = context_for(LayerType::Atom, "icon-button", &["label: string"]);
        assert_eq!(ctx.pascal_name, "IconButton");
        assert_eq!(ctx.camel_name, "iconButton");
        assert_eq!(ctx.screaming_name, "ICON_BUTTON");
        assert_eq!(ctx.display_name, "Atom.IconButton");
        assert_eq!(ctx.test_id, "atom-icon-button");
    }

    #[test]
    fn atoms_get_test_id_prop() {
        let ctx = context_for(LayerType::Atom, "button", &[]);
        assert_eq!(ctx.props.last().unwrap().declaration(), "testID?: string");

        let ctx = context_for(LayerType::Molecule, "search-bar", &[]);
        assert!(ctx.props.is_empty());
    }

    #[test]
    fn entity_context_uses_concept() {
        let ctx = context_for(LayerType::Entity, "TUserProfileEntity", &["id: string"]);
        assert_eq!(ctx.file_stem, "user-profile");
        assert_eq!(ctx.pascal_name, "UserProfile");
        assert_eq!(ctx.variables()["ENTITY_NAME"], "TUserProfileEntity");
    }

    #[test]
    fn render_substitutes_known_variables_only() {
        let ctx = context_for(LayerType::Atom, "button", &[]);
        assert_eq!(
            ctx.render("{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}'; {{UNKNOWN}}"),
            "Button.displayName = 'Atom.Button'; {{UNKNOWN}}"
        );
    }

    #[test]
    fn imports_are_merged_per_module() {
        let ctx = context_for(LayerType::Particle, "theme", &[]);
        assert_eq!(
            ctx.variables()["IMPORTS"],
            "import React, { createContext, useContext } from 'react';"
        );

        let ctx = context_for(LayerType::Molecule, "card", &[]);
        assert_eq!(
            ctx.variables()["IMPORTS"],
            "import React from 'react';\nimport { View } from 'react-native';\nimport * as Atoms from '@/atoms';"
        );
    }

    #[test]
    fn prop_and_method_inference() {
        let props = infer_props("modal de confirmação", LayerType::Molecule);
        assert!(props.contains(&"visible: boolean".to_string()));
        assert!(props.contains(&"onConfirm: () => void".to_string()));

        let methods = infer_methods("modal de confirmação", LayerType::Molecule);
        assert_eq!(methods, vec!["handleConfirm", "handleCancel", "handleClose"]);

        assert!(infer_methods("botao", LayerType::Atom).is_empty());
        assert_eq!(infer_props("saldo", LayerType::Entity), vec!["id: string", "balance: number"]);
        assert!(infer_props("http", LayerType::Gateway).is_empty());
    }
}
