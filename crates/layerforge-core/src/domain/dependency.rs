//! Dependency analysis against the layer hierarchy.
//!
//! The hierarchy graph (`LayerDef::allowed_dependencies`) is the source of
//! truth. Text rules derive required and optional dependencies per layer;
//! every derived or declared dependency is then checked against the graph.
//!
//! Circular dependencies are detected by reachability: a dependency `d` of
//! layer `l` is circular when `l == d` or when `l` is reachable from `d`
//! through allowed edges.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use crate::domain::{
    registry::{ImportKind, ImportSpec},
    text,
    value_objects::LayerType,
};

// ── Rule vocabularies ────────────────────────────────────────────────────────

const DATA_TERMS: &[&str] = &[
    "api", "dados", "data", "servidor", "server", "backend", "buscar", "carregar", "load",
    "fetch", "saldo", "balance", "extrato", "historico", "http", "endpoint", "sincronizar",
    "deposito", "deposit",
];

const BUSINESS_TERMS: &[&str] = &[
    "regra", "rule", "negocio", "business", "calculo", "calcular", "calcula", "calculate",
    "validacao", "validar", "pagamento", "payment", "transacao", "transaction", "saque",
    "transferencia", "transfer", "deposito", "deposit",
];

const SCREEN_TERMS: &[&str] = &["tela", "screen", "pagina", "page", "view"];

const SECTION_TERMS: &[&str] = &[
    "header", "cabecalho", "footer", "rodape", "sidebar", "navbar", "secao", "section",
];

const FORMAT_TERMS: &[&str] = &[
    "formatar", "formata", "format", "formatacao", "mascara", "mask", "moeda", "currency",
];

const SHARED_STATE_TERMS: &[&str] = &[
    "estado global", "global state", "compartilhado", "shared", "contexto", "context", "tema",
    "theme",
];

const PERSISTENCE_TERMS: &[&str] = &[
    "persistir", "persist", "salvar", "save", "armazenar", "store", "cache", "offline",
];

const VALIDATION_TERMS: &[&str] = &[
    "validar", "validate", "validacao", "validation", "regra", "rule",
];

const LAYOUT_TERMS: &[&str] = &["grid", "coluna", "column", "colunas", "columns", "layout"];

/// Optional rules: `(owning layers, trigger terms, dependency)`.
const OPTIONAL_RULES: &[(&[LayerType], &[&str], LayerType)] = &[
    (
        &[
            LayerType::Feature,
            LayerType::Particle,
            LayerType::Model,
            LayerType::Gateway,
        ],
        FORMAT_TERMS,
        LayerType::Util,
    ),
    (&[LayerType::Feature], SHARED_STATE_TERMS, LayerType::Particle),
    (&[LayerType::Feature], PERSISTENCE_TERMS, LayerType::Repository),
    (
        &[LayerType::Feature, LayerType::Particle, LayerType::Repository],
        VALIDATION_TERMS,
        LayerType::Model,
    ),
    (&[LayerType::Template], LAYOUT_TERMS, LayerType::Layout),
];

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyValidation {
    pub is_valid: bool,
    pub violations: Vec<String>,
    pub allowed_dependencies: Vec<LayerType>,
}

/// A suggested import line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub struct ImportSuggestion {
    pub from: String,
    pub imports: Vec<String>,
    pub kind: ImportKind,
}

impl From<&ImportSpec> for ImportSuggestion {
    fn from(spec: &ImportSpec) -> Self {
        Self {
            from: spec.from.to_string(),
            imports: spec.imports.iter().map(|s| (*s).to_string()).collect(),
            kind: spec.kind,
        }
    }
}

impl ImportSuggestion {
    /// Deduplication key: `(from, joined imports)`.
    pub fn key(&self) -> (String, String) {
        (self.from.clone(), self.imports.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    pub layer: LayerType,
    pub required: BTreeSet<LayerType>,
    pub optional: BTreeSet<LayerType>,
    pub hierarchy: HierarchyValidation,
    pub violations: Vec<String>,
    pub suggested_imports: Vec<ImportSuggestion>,
    /// File-name patterns with a `{stem}` placeholder.
    pub suggested_files: Vec<String>,
}

impl DependencyAnalysis {
    pub fn is_valid(&self) -> bool {
        self.hierarchy.is_valid && self.violations.is_empty()
    }

    /// Required plus optional dependencies.
    pub fn all_dependencies(&self) -> BTreeSet<LayerType> {
        self.required.union(&self.optional).copied().collect()
    }

    /// Resolve the suggested file patterns against a stem.
    pub fn files_for(&self, stem: &str) -> Vec<String> {
        self.suggested_files
            .iter()
            .map(|f| f.replace("{stem}", stem))
            .collect()
    }
}

// ── Analyzer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyAnalyzer;

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_dependencies(
        &self,
        description: &str,
        layer: LayerType,
        features: &[String],
    ) -> DependencyAnalysis {
        self.analyze_with_declared(description, layer, features, &[])
    }

    /// Analyze and also validate dependencies declared elsewhere (AI
    /// analysis, user edit). Declared dependencies count as required.
    pub fn analyze_with_declared(
        &self,
        description: &str,
        layer: LayerType,
        features: &[String],
        declared: &[LayerType],
    ) -> DependencyAnalysis {
        let mut haystack = text::normalize(description);
        for f in features {
            haystack.push(' ');
            haystack.push_str(&text::normalize(f));
        }

        let mut required = required_dependencies(&haystack, layer);
        required.extend(declared.iter().copied());
        let optional: BTreeSet<LayerType> = optional_dependencies(&haystack, layer)
            .difference(&required)
            .copied()
            .collect();

        let all: BTreeSet<LayerType> = required.union(&optional).copied().collect();
        let hierarchy = validate_hierarchy(layer, &all);
        let violations = detect_violations(layer, &all);

        DependencyAnalysis {
            layer,
            required,
            optional,
            hierarchy,
            violations,
            suggested_imports: suggest_imports(layer, &all),
            suggested_files: layer
                .def()
                .files
                .iter()
                .map(|f| f.name.to_string())
                .collect(),
        }
    }
}

fn mentions_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text::contains_word(haystack, t))
}

fn required_dependencies(haystack: &str, layer: LayerType) -> BTreeSet<LayerType> {
    use LayerType as L;

    let mut deps = BTreeSet::new();
    match layer {
        L::Molecule => {
            deps.insert(L::Atom);
        }
        L::Organism => {
            deps.insert(L::Molecule);
            deps.insert(L::Atom);
        }
        L::Feature => {
            if mentions_any(haystack, DATA_TERMS) {
                deps.insert(L::Gateway);
                deps.insert(L::Entity);
            }
            if mentions_any(haystack, BUSINESS_TERMS) {
                deps.insert(L::Model);
                deps.insert(L::Repository);
            }
            if mentions_any(haystack, SCREEN_TERMS) {
                deps.insert(L::Template);
            }
        }
        L::Repository => {
            deps.insert(L::Gateway);
            deps.insert(L::Entity);
        }
        L::Gateway | L::Model => {
            deps.insert(L::Entity);
        }
        L::Template => {
            deps.insert(L::Organism);
        }
        L::Layout => {
            if mentions_any(haystack, SECTION_TERMS) {
                deps.insert(L::Organism);
            } else {
                deps.insert(L::Molecule);
            }
        }
        L::Atom | L::Entity | L::Util | L::Particle => {}
    }
    deps
}

fn optional_dependencies(haystack: &str, layer: LayerType) -> BTreeSet<LayerType> {
    OPTIONAL_RULES
        .iter()
        .filter(|(owners, terms, _)| owners.contains(&layer) && mentions_any(haystack, terms))
        .map(|(_, _, dep)| *dep)
        .collect()
}

/// Flag every dependency outside the layer's allowed set.
pub fn validate_hierarchy(layer: LayerType, deps: &BTreeSet<LayerType>) -> HierarchyValidation {
    let allowed = layer.def().allowed_dependencies;
    let violations: Vec<String> = deps
        .iter()
        .filter(|d| !allowed.contains(d))
        .map(|d| format!("{layer} cannot depend on {d}"))
        .collect();

    HierarchyValidation {
        is_valid: violations.is_empty(),
        violations,
        allowed_dependencies: allowed.to_vec(),
    }
}

/// Hierarchy violations, layer-specific missing-dependency warnings and
/// circular dependencies.
pub fn detect_violations(layer: LayerType, deps: &BTreeSet<LayerType>) -> Vec<String> {
    use LayerType as L;

    let mut out = validate_hierarchy(layer, deps).violations;

    let missing = match layer {
        L::Molecule if !deps.contains(&L::Atom) => Some("molecule should compose at least one atom"),
        L::Organism if !deps.contains(&L::Molecule) && !deps.contains(&L::Atom) => {
            Some("organism should compose molecules or atoms")
        }
        L::Template if !deps.contains(&L::Organism) => {
            Some("template should place at least one organism")
        }
        L::Repository if !deps.contains(&L::Gateway) => {
            Some("repository should read through a gateway")
        }
        L::Layout if !deps.contains(&L::Molecule) && !deps.contains(&L::Organism) => {
            Some("layout should arrange molecules or organisms")
        }
        L::Feature if deps.is_empty() => Some("feature has no dependencies to orchestrate"),
        _ => None,
    };
    if let Some(warning) = missing {
        out.push(warning.to_string());
    }

    for dep in deps {
        if *dep == layer {
            out.push(format!("circular dependency: {layer} depends on itself"));
        } else if let Some(path) = path_between(*dep, layer) {
            let chain: Vec<&str> = path.iter().map(LayerType::as_str).collect();
            out.push(format!(
                "circular dependency: {layer} -> {}",
                chain.join(" -> ")
            ));
        }
    }

    out
}

/// Shortest path `from → … → to` through allowed edges, if any.
fn path_between(from: LayerType, to: LayerType) -> Option<Vec<LayerType>> {
    let mut queue = VecDeque::from([vec![from]]);
    let mut seen = HashSet::from([from]);

    while let Some(path) = queue.pop_front() {
        let last = *path.last()?;
        if last == to {
            return Some(path);
        }
        for next in last.def().allowed_dependencies {
            if seen.insert(*next) {
                let mut extended = path.clone();
                extended.push(*next);
                queue.push_back(extended);
            }
        }
    }
    None
}

/// Base imports of the layer plus one import per dependency (hierarchy
/// order), deduplicated by `(from, joined imports)`.
pub fn suggest_imports(layer: LayerType, deps: &BTreeSet<LayerType>) -> Vec<ImportSuggestion> {
    let mut seen = HashSet::new();
    layer
        .def()
        .base_imports
        .iter()
        .chain(deps.iter().map(|d| &d.def().dependent_import))
        .map(ImportSuggestion::from)
        .filter(|s| seen.insert(s.key()))
        .collect()
}
