//! Layer registry.
//!
//! Each layer's keyword patterns, hierarchy edges, naming convention, file
//! plan and import table are described once by a [`LayerDef`] in
//! [`LAYER_REGISTRY`]. The registry is indexed by the
//! discriminant of [`LayerType`], so the "twelve layers" invariant is checked
//! by the type system plus the `registry_is_complete_and_ordered` test.
//!
//! # Adding a New Layer
//!
//! 1. Add a variant to `LayerType` in `value_objects.rs`
//! 2. Add one [`LayerDef`] entry to [`LAYER_REGISTRY`] at the same position
//! 3. Classification, naming and dependency checks read the new entry

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::value_objects::{DependencyProfile, LayerType, Level};

// ── Pattern ──────────────────────────────────────────────────────────────────

/// Static scoring pattern for one layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerPattern {
    /// Normalized keywords (lowercase, no diacritics). Multi-word entries
    /// match as whole phrases.
    pub keywords: &'static [&'static str],
    pub complexity: Level,
    pub dependency_profile: DependencyProfile,
    pub reusability: Level,
    /// Multiplier applied to the raw score.
    pub weight: f64,
}

// ── Naming ───────────────────────────────────────────────────────────────────

/// Identifier convention for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStyle {
    /// `button`, `search-bar`
    Kebab,
    /// `wallet-deposit` (at least one hyphen)
    PrefixedKebab,
    /// `TUserEntity`
    EntityType,
}

static KEBAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("valid kebab regex"));

static PREFIXED_KEBAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)+$").expect("valid prefixed kebab regex")
});

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T[A-Z][a-zA-Z]*Entity$").expect("valid entity regex"));

impl NamingStyle {
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Kebab => r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$",
            Self::PrefixedKebab => r"^[a-z][a-z0-9]*(-[a-z0-9]+)+$",
            Self::EntityType => r"^T[A-Z][a-zA-Z]*Entity$",
        }
    }

    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Kebab => &KEBAB_RE,
            Self::PrefixedKebab => &PREFIXED_KEBAB_RE,
            Self::EntityType => &ENTITY_RE,
        }
    }

    pub fn is_match(self, name: &str) -> bool {
        self.regex().is_match(name)
    }
}

/// Naming convention plus the name used when no candidate survives.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    pub style: NamingStyle,
    pub fallback: &'static str,
}

// ── Files & imports ──────────────────────────────────────────────────────────

/// One planned file. `{stem}` is replaced by the component's file stem.
#[derive(Debug, Clone, Copy)]
pub struct FilePattern {
    pub name: &'static str,
    pub required: bool,
}

impl FilePattern {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }

    pub fn resolve(&self, stem: &str) -> String {
        self.name.replace("{stem}", stem)
    }
}

/// How an import line is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import React from 'react';`
    Default,
    /// `import { a, b } from 'x';`
    Named,
    /// `import * as Atoms from '@/atoms';`
    Namespace,
    /// `import type { A } from 'x';`
    Type,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportSpec {
    pub from: &'static str,
    pub imports: &'static [&'static str],
    pub kind: ImportKind,
}

// ── Layer definition ─────────────────────────────────────────────────────────

/// Everything the domain knows about one layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerDef {
    pub layer: LayerType,
    pub description: &'static str,
    pub pattern: LayerPattern,
    /// Outgoing edges of the layer-hierarchy graph.
    pub allowed_dependencies: &'static [LayerType],
    pub naming: NamingConvention,
    pub files: &'static [FilePattern],
    /// Imports every component of this layer starts with.
    pub base_imports: &'static [ImportSpec],
    /// Import used by components that depend on this layer.
    pub dependent_import: ImportSpec,
}

impl LayerDef {
    pub fn allows(&self, dependency: LayerType) -> bool {
        self.allowed_dependencies.contains(&dependency)
    }

    pub fn required_files(&self) -> impl Iterator<Item = &FilePattern> {
        self.files.iter().filter(|f| f.required)
    }
}

const REACT_DEFAULT: ImportSpec = ImportSpec {
    from: "react",
    imports: &["React"],
    kind: ImportKind::Default,
};

const REACT_NATIVE_VIEW: ImportSpec = ImportSpec {
    from: "react-native",
    imports: &["View"],
    kind: ImportKind::Named,
};

const fn namespace(from: &'static str, alias: &'static [&'static str]) -> ImportSpec {
    ImportSpec {
        from,
        imports: alias,
        kind: ImportKind::Namespace,
    }
}

use LayerType as L;

/// Single source of truth for layer capabilities, in `LayerType::ALL` order.
pub static LAYER_REGISTRY: [LayerDef; 12] = [
    // ── UI layers ────────────────────────────────────────────────────────────
    LayerDef {
        layer: L::Atom,
        description: "Indivisible UI primitive (button, icon, input, text)",
        pattern: LayerPattern {
            keywords: &[
                "botao", "button", "input", "icone", "icon", "label", "rotulo", "texto", "text",
                "badge", "avatar", "spinner", "loader", "checkbox", "radio", "switch", "toggle",
                "link", "imagem", "image", "tag", "chip", "divisor", "divider", "tipografia",
                "typography",
            ],
            complexity: Level::Low,
            dependency_profile: DependencyProfile::Standalone,
            reusability: Level::High,
            weight: 1.0,
        },
        allowed_dependencies: &[],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "base-component",
        },
        files: &[
            FilePattern::required("{stem}.atom.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("{stem}.constant.ts"),
            FilePattern::optional("{stem}.variant.ts"),
            FilePattern::optional("{stem}.spec.tsx"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/atoms", &["Atoms"]),
    },
    LayerDef {
        layer: L::Molecule,
        description: "Small composition of atoms with one purpose (modal, card, search bar)",
        pattern: LayerPattern {
            keywords: &[
                "modal", "dialog", "dialogo", "card", "cartao", "dropdown", "tooltip",
                "search bar", "barra de busca", "form field", "campo de formulario", "list item",
                "item de lista", "menu item", "alerta", "alert", "toast", "snackbar", "popover",
                "stepper", "abas", "tabs", "paginacao", "pagination", "breadcrumb",
                "confirmacao", "confirmation",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::Atoms,
            reusability: Level::High,
            weight: 1.0,
        },
        allowed_dependencies: &[L::Atom],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "composite",
        },
        files: &[
            FilePattern::required("{stem}.molecule.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("{stem}.use-case.ts"),
            FilePattern::optional("{stem}.constant.ts"),
            FilePattern::optional("{stem}.spec.tsx"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/molecules", &["Molecules"]),
    },
    LayerDef {
        layer: L::Organism,
        description: "Self-contained UI section built from molecules (header, form, table)",
        pattern: LayerPattern {
            keywords: &[
                "header", "cabecalho", "footer", "rodape", "navbar", "sidebar", "menu lateral",
                "formulario", "form", "lista", "list", "tabela", "table", "carrossel",
                "carousel", "galeria", "gallery", "secao", "section", "feed",
            ],
            complexity: Level::High,
            dependency_profile: DependencyProfile::Components,
            reusability: Level::Medium,
            weight: 1.0,
        },
        allowed_dependencies: &[L::Molecule, L::Atom],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "section",
        },
        files: &[
            FilePattern::required("{stem}.organism.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("{stem}.use-case.ts"),
            FilePattern::optional("{stem}.constant.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/organisms", &["Organisms"]),
    },
    LayerDef {
        layer: L::Template,
        description: "Page skeleton that places organisms into named regions",
        pattern: LayerPattern {
            keywords: &[
                "template", "esqueleto", "skeleton", "wireframe", "estrutura de pagina",
                "page template", "modelo de pagina", "slot", "slots", "placeholder",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::Composition,
            reusability: Level::Medium,
            weight: 0.9,
        },
        allowed_dependencies: &[L::Organism, L::Molecule, L::Atom, L::Layout],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "page-template",
        },
        files: &[
            FilePattern::required("{stem}.template.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/templates", &["Templates"]),
    },
    LayerDef {
        layer: L::Feature,
        description: "Screen or flow that wires UI to data and business logic",
        pattern: LayerPattern {
            keywords: &[
                "tela", "screen", "pagina", "page", "fluxo", "flow", "jornada", "journey",
                "feature", "funcionalidade", "checkout", "onboarding", "login", "cadastro",
                "signup", "dashboard", "painel",
            ],
            complexity: Level::High,
            dependency_profile: DependencyProfile::Orchestration,
            reusability: Level::Low,
            weight: 1.1,
        },
        allowed_dependencies: &[
            L::Template,
            L::Organism,
            L::Molecule,
            L::Atom,
            L::Util,
            L::Model,
            L::Entity,
            L::Gateway,
            L::Repository,
            L::Particle,
            L::Layout,
        ],
        naming: NamingConvention {
            style: NamingStyle::PrefixedKebab,
            fallback: "app-feature",
        },
        files: &[
            FilePattern::required("{stem}.feature.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("{stem}.use-case.ts"),
            FilePattern::optional("{stem}.gateway.ts"),
            FilePattern::optional("{stem}.spec.tsx"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/features", &["Features"]),
    },
    LayerDef {
        layer: L::Layout,
        description: "Structural wrapper that arranges children (grid, container, columns)",
        pattern: LayerPattern {
            keywords: &[
                "layout", "grid", "container", "wrapper", "shell", "coluna", "column",
                "colunas", "columns", "responsivo", "responsive", "stack", "espacamento",
                "spacing",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::Composition,
            reusability: Level::High,
            weight: 0.9,
        },
        allowed_dependencies: &[L::Organism, L::Molecule, L::Atom],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "main-layout",
        },
        files: &[
            FilePattern::required("{stem}.layout.tsx"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[REACT_DEFAULT, REACT_NATIVE_VIEW],
        dependent_import: namespace("@/layouts", &["Layouts"]),
    },
    LayerDef {
        layer: L::Particle,
        description: "Context provider or hook that shares state across the tree",
        pattern: LayerPattern {
            keywords: &[
                "contexto", "context", "provider", "provedor", "estado global", "global state",
                "tema", "theme", "store", "hook", "compartilhado", "shared",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::SharedState,
            reusability: Level::Medium,
            weight: 0.9,
        },
        allowed_dependencies: &[L::Model, L::Entity, L::Util],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "app-provider",
        },
        files: &[
            FilePattern::required("{stem}.particle.tsx"),
            FilePattern::required("{stem}.context.ts"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[
            REACT_DEFAULT,
            ImportSpec {
                from: "react",
                imports: &["createContext", "useContext"],
                kind: ImportKind::Named,
            },
        ],
        dependent_import: namespace("@/particles", &["Particles"]),
    },
    // ── Domain & data layers ─────────────────────────────────────────────────
    LayerDef {
        layer: L::Model,
        description: "Business rules and calculations over entities",
        pattern: LayerPattern {
            keywords: &[
                "model", "modelo", "regra de negocio", "business rule", "regra", "rule",
                "calculo", "calculation", "dominio", "domain", "logica", "logic", "validacao",
                "validation",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::Domain,
            reusability: Level::Medium,
            weight: 1.0,
        },
        allowed_dependencies: &[L::Entity, L::Util],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "domain-model",
        },
        files: &[
            FilePattern::required("{stem}.model.ts"),
            FilePattern::optional("{stem}.type.ts"),
            FilePattern::optional("{stem}.spec.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[],
        dependent_import: namespace("@/models", &["Models"]),
    },
    LayerDef {
        layer: L::Entity,
        description: "Typed data contract shared across layers",
        pattern: LayerPattern {
            keywords: &[
                "entidade", "entity", "tipo", "type", "interface", "contrato", "contract",
                "dto", "schema", "estrutura de dados", "data structure", "campos", "fields",
            ],
            complexity: Level::Low,
            dependency_profile: DependencyProfile::Contract,
            reusability: Level::High,
            weight: 1.0,
        },
        allowed_dependencies: &[],
        naming: NamingConvention {
            style: NamingStyle::EntityType,
            fallback: "TDataEntity",
        },
        files: &[
            FilePattern::required("{stem}.entity.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[],
        dependent_import: namespace("@/entities", &["Entities"]),
    },
    LayerDef {
        layer: L::Util,
        description: "Pure helper function (format, validate, parse, convert)",
        pattern: LayerPattern {
            keywords: &[
                "util", "utils", "utilitario", "utility", "helper", "funcao", "function",
                "formatar", "format", "formatador", "formatter", "converter", "convert",
                "mascara", "mask", "parser", "parse",
            ],
            complexity: Level::Low,
            dependency_profile: DependencyProfile::Pure,
            reusability: Level::High,
            weight: 0.9,
        },
        allowed_dependencies: &[],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "helper",
        },
        files: &[
            FilePattern::required("{stem}.util.ts"),
            FilePattern::optional("{stem}.spec.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[],
        dependent_import: namespace("@/utils", &["Utils"]),
    },
    LayerDef {
        layer: L::Gateway,
        description: "Boundary to an external API (HTTP request per operation)",
        pattern: LayerPattern {
            keywords: &[
                "gateway", "api", "endpoint", "http", "request", "requisicao", "fetch",
                "client", "cliente http", "integracao", "integration", "servico", "service",
                "rest", "graphql",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::External,
            reusability: Level::Medium,
            weight: 1.0,
        },
        allowed_dependencies: &[L::Entity, L::Util],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "find-many-data",
        },
        files: &[
            FilePattern::required("{stem}.gateway.ts"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[],
        dependent_import: namespace("@/gateways", &["Gateways"]),
    },
    LayerDef {
        layer: L::Repository,
        description: "Data access that combines gateways, models and local storage",
        pattern: LayerPattern {
            keywords: &[
                "repositorio", "repository", "persistencia", "persistence", "armazenamento",
                "storage", "cache", "banco", "database", "dados locais", "local data",
                "offline", "query", "consulta",
            ],
            complexity: Level::Medium,
            dependency_profile: DependencyProfile::DataAccess,
            reusability: Level::Medium,
            weight: 1.0,
        },
        allowed_dependencies: &[L::Gateway, L::Model, L::Entity],
        naming: NamingConvention {
            style: NamingStyle::Kebab,
            fallback: "data",
        },
        files: &[
            FilePattern::required("{stem}.repository.ts"),
            FilePattern::required("{stem}.type.ts"),
            FilePattern::required("index.ts"),
        ],
        base_imports: &[],
        dependent_import: namespace("@/repositories", &["Repositories"]),
    },
];

/// Registry entry for a layer.
pub fn layer_def(layer: LayerType) -> &'static LayerDef {
    &LAYER_REGISTRY[layer as usize]
}

// ── Indicator vocabularies ───────────────────────────────────────────────────

/// Complexity-adjective indicators.
pub fn complexity_indicators(level: Level) -> &'static [&'static str] {
    match level {
        Level::Low => &[
            "simples", "simple", "basico", "basic", "pequeno", "small", "minimo", "minimal",
            "unico", "single", "primitivo", "primitive",
        ],
        Level::Medium => &[
            "reutilizavel", "reusable", "composto", "composed", "combinado", "combined",
            "moderado", "moderate", "agrupado", "grouped",
        ],
        Level::High => &[
            "complexo", "complex", "completo", "complete", "avancado", "advanced", "multiplos",
            "multiple", "inteiro", "entire", "integrado", "integrated",
        ],
    }
}

/// Dependency-profile indicators.
pub fn dependency_indicators(profile: DependencyProfile) -> &'static [&'static str] {
    match profile {
        DependencyProfile::Standalone => &[
            "independente", "independent", "isolado", "isolated", "primitivo", "primitive",
            "sozinho", "standalone",
        ],
        DependencyProfile::Atoms => &[
            "combina", "combines", "agrupa", "groups", "reutilizavel", "reusable", "composto",
            "composed",
        ],
        DependencyProfile::Components => &[
            "secao", "section", "conjunto", "set", "bloco", "block", "composicao", "composition",
        ],
        DependencyProfile::Composition => &[
            "estrutura", "structure", "slots", "posiciona", "arrange", "regioes", "regions",
        ],
        DependencyProfile::Orchestration => &[
            "dados", "data", "api", "integra", "integrates", "orquestra", "orchestrates",
            "usuario", "user", "carrega", "loads",
        ],
        DependencyProfile::SharedState => &[
            "compartilhado", "shared", "global", "estado", "state", "contexto", "context",
        ],
        DependencyProfile::Domain => &[
            "regra", "rule", "negocio", "business", "calcula", "calculates", "valida",
            "validates",
        ],
        DependencyProfile::Contract => &[
            "tipo", "type", "contrato", "contract", "campos", "fields", "formato",
        ],
        DependencyProfile::Pure => &["pura", "pure", "recebe", "receives", "retorna", "returns"],
        DependencyProfile::External => &[
            "http", "api", "endpoint", "externo", "external", "remoto", "remote", "servidor",
            "server",
        ],
        DependencyProfile::DataAccess => &[
            "persiste", "persists", "armazena", "stores", "cache", "banco", "database",
        ],
    }
}

/// Hard-coded synonym table: keyword → alternative spellings worth +3.
pub static SYNONYMS: &[(&str, &[&str])] = &[
    ("botao", &["btn", "cta"]),
    ("icone", &["glyph", "pictograma"]),
    ("modal", &["popup", "janela"]),
    ("card", &["tile"]),
    ("formulario", &["questionario"]),
    ("tela", &["view", "visao"]),
    ("layout", &["disposicao", "arranjo"]),
    ("template", &["gabarito", "molde"]),
    ("contexto", &["ambiente"]),
    ("model", &["modelagem"]),
    ("entidade", &["registro", "record"]),
    ("util", &["lib", "tools"]),
    ("gateway", &["adapter", "adaptador"]),
    ("repositorio", &["repo", "dao"]),
];

/// Synonyms of a keyword, empty if none are registered.
pub fn synonyms_of(keyword: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, s)| *s)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_complete_and_ordered() {
        assert_eq!(LAYER_REGISTRY.len(), LayerType::ALL.len());
        for (def, layer) in LAYER_REGISTRY.iter().zip(LayerType::ALL) {
            assert_eq!(def.layer, layer, "registry out of order at {layer}");
            assert_eq!(layer_def(layer).layer, layer);
        }
    }

    #[test]
    fn registry_entries_are_well_formed() {
        for def in &LAYER_REGISTRY {
            assert!(!def.pattern.keywords.is_empty(), "{} has no keywords", def.layer);
            assert!(def.pattern.weight > 0.0);
            assert!(!def.allows(def.layer), "{} allows itself", def.layer);
            assert!(
                def.naming.style.is_match(def.naming.fallback),
                "fallback name of {} violates its convention",
                def.layer
            );
            assert!(def.required_files().count() >= 2);
            for kw in def.pattern.keywords {
                assert_eq!(*kw, crate::domain::text::normalize(kw), "keyword not normalized");
            }
        }
    }

    #[test]
    fn hierarchy_graph_is_acyclic() {
        fn visit(layer: LayerType, stack: &mut Vec<LayerType>) {
            assert!(!stack.contains(&layer), "cycle through {layer}");
            stack.push(layer);
            for dep in layer_def(layer).allowed_dependencies {
                visit(*dep, stack);
            }
            stack.pop();
        }
        for layer in LayerType::ALL {
            visit(layer, &mut Vec::new());
        }
    }

    #[test]
    fn naming_styles() {
        assert!(NamingStyle::Kebab.is_match("search-bar"));
        assert!(!NamingStyle::Kebab.is_match("SearchBar"));
        assert!(NamingStyle::PrefixedKebab.is_match("wallet-deposit"));
        assert!(!NamingStyle::PrefixedKebab.is_match("wallet"));
        assert!(NamingStyle::EntityType.is_match("TUserEntity"));
        assert!(!NamingStyle::EntityType.is_match("UserEntity"));
    }

    #[test]
    fn file_pattern_resolves_stem() {
        let atom = layer_def(LayerType::Atom);
        let names: Vec<_> = atom.required_files().map(|f| f.resolve("button")).collect();
        assert_eq!(
            names,
            vec!["button.atom.tsx", "button.type.ts", "button.constant.ts", "index.ts"]
        );
    }
}
