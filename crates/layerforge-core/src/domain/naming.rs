//! Component naming.
//!
//! Pipeline: concepts → candidates → validation → ranking.
//!
//! - **Concepts** come from the PT/EN vocabulary plus generic long words, or
//!   from a caller (the application layer passes AI-extracted concepts to
//!   [`NamingAnalyzer::suggest_from_concepts`]).
//! - **Candidates** are single concepts, ordered pairs of concepts and the
//!   layer's own patterns (feature prefix, gateway/util verbs, entity type).
//! - **Validation** applies the layer regex, the length limits and the
//!   reserved-word list.
//! - **Ranking** favours names close to 15 characters whose segments appear
//!   in the description, and penalises hyphens.

use serde::{Deserialize, Serialize};

use crate::domain::{
    registry::NamingStyle,
    text::{self, to_kebab_case, to_pascal_case},
    value_objects::LayerType,
    vocabulary,
};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
const IDEAL_LEN: i64 = 15;
const MAX_ALTERNATIVES: usize = 4;
const SEGMENT_POINTS: i64 = 15;
const PATTERN_BONUS: i64 = 10;
const VERB_HINT_BONUS: i64 = 5;
const HYPHEN_PENALTY: i64 = 2;
const MIN_CONFIDENCE: f64 = 0.2;

pub static RESERVED_WORDS: &[&str] = &[
    "index", "default", "class", "function", "return", "import", "export", "const", "let", "var",
    "new", "delete", "this", "null", "undefined", "true", "false", "react", "component", "type",
    "interface", "enum", "void",
];

/// `(verb, hint words)` for gateway names.
const GATEWAY_VERBS: &[(&str, &[&str])] = &[
    ("find-one", &["detalhe", "detail", "obter", "get", "one"]),
    ("find-many", &["listar", "lista", "list", "buscar", "busca", "fetch", "todos", "all"]),
    ("create", &["criar", "cria", "create", "cadastrar", "novo", "new", "adicionar", "add"]),
    ("update", &["atualizar", "atualiza", "update", "editar", "edit", "alterar"]),
    ("delete", &["remover", "remove", "excluir", "deletar", "delete", "apagar"]),
];

/// `(verb, hint words)` for util names.
const UTIL_VERBS: &[(&str, &[&str])] = &[
    ("format", &["formatar", "formata", "format", "formatador", "mascara", "mask"]),
    ("validate", &["validar", "valida", "validate", "validacao", "validation"]),
    ("parse", &["parse", "parser", "interpretar", "ler"]),
    ("convert", &["converter", "converte", "convert", "transformar"]),
    ("calculate", &["calcular", "calcula", "calculate", "calculo", "soma", "total"]),
];

/// Optional caller context for naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingContext {
    /// Required leading segment for feature names (`wallet` → `wallet-deposit`).
    pub prefix: Option<String>,
    /// Trailing segment appended to kebab names.
    pub suffix: Option<String>,
}

impl NamingContext {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            suffix: None,
        }
    }

    fn prefix_kebab(&self) -> Option<String> {
        self.prefix
            .as_deref()
            .map(to_kebab_case)
            .filter(|p| !p.is_empty())
    }

    fn suffix_kebab(&self) -> Option<String> {
        self.suffix
            .as_deref()
            .map(to_kebab_case)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingSuggestion {
    pub primary: String,
    pub alternatives: Vec<String>,
    pub concepts: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    from_pattern: bool,
    verb_hinted: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NamingAnalyzer;

impl NamingAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Suggest a name using vocabulary concepts extracted from `description`.
    pub fn suggest_name(
        &self,
        description: &str,
        layer: LayerType,
        context: Option<&NamingContext>,
    ) -> NamingSuggestion {
        let normalized = text::normalize(description);
        let concepts = vocabulary::extract_concepts(&normalized);
        self.suggest_from_concepts(description, layer, &concepts, context)
    }

    /// Suggest a name from caller-supplied concepts.
    pub fn suggest_from_concepts(
        &self,
        description: &str,
        layer: LayerType,
        concepts: &[String],
        context: Option<&NamingContext>,
    ) -> NamingSuggestion {
        let normalized = text::normalize(description);
        let default_context = NamingContext::default();
        let context = context.unwrap_or(&default_context);

        let concepts: Vec<String> = concepts
            .iter()
            .map(|c| to_kebab_case(c))
            .filter(|c| !c.is_empty())
            .fold(Vec::new(), |mut acc, c| {
                if !acc.contains(&c) {
                    acc.push(c);
                }
                acc
            });

        let candidates = generate_candidates(layer, &concepts, &normalized, context);

        let mut scored: Vec<(i64, String)> = candidates
            .into_iter()
            .filter(|c| is_valid_name(layer, &c.name, context))
            .map(|c| (rank(layer, &c, &normalized), c.name))
            .collect();
        // Stable: equal scores keep generation order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut names: Vec<String> = Vec::new();
        for (_, name) in scored {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let primary = if names.is_empty() {
            fallback_name(layer, context)
        } else {
            names.remove(0)
        };
        names.truncate(MAX_ALTERNATIVES);

        let confidence = name_confidence(layer, &primary, &normalized);

        NamingSuggestion {
            primary,
            alternatives: names,
            concepts,
            confidence,
        }
    }
}

fn generate_candidates(
    layer: LayerType,
    concepts: &[String],
    normalized: &str,
    context: &NamingContext,
) -> Vec<Candidate> {
    let plain = |name: String| Candidate {
        name,
        from_pattern: false,
        verb_hinted: false,
    };
    let pattern = |name: String, verb_hinted: bool| Candidate {
        name,
        from_pattern: true,
        verb_hinted,
    };

    let mut out = Vec::new();

    match layer {
        LayerType::Entity => {
            for c in concepts {
                out.push(pattern(format!("T{}Entity", to_pascal_case(c)), false));
            }
            for (i, a) in concepts.iter().enumerate() {
                for b in &concepts[i + 1..] {
                    out.push(pattern(
                        format!("T{}{}Entity", to_pascal_case(a), to_pascal_case(b)),
                        false,
                    ));
                }
            }
            return out;
        }
        LayerType::Feature => {
            if let Some(prefix) = context.prefix_kebab() {
                for c in concepts.iter().filter(|c| **c != prefix) {
                    out.push(pattern(format!("{prefix}-{c}"), false));
                }
            }
        }
        LayerType::Gateway => push_verb_candidates(&mut out, GATEWAY_VERBS, concepts, normalized),
        LayerType::Util => push_verb_candidates(&mut out, UTIL_VERBS, concepts, normalized),
        LayerType::Repository => {
            for c in concepts {
                out.push(pattern(c.clone(), false));
            }
        }
        _ => {}
    }

    for c in concepts {
        out.push(plain(c.clone()));
    }
    for (i, a) in concepts.iter().enumerate() {
        for b in &concepts[i + 1..] {
            out.push(plain(format!("{a}-{b}")));
        }
    }

    if let Some(suffix) = context.suffix_kebab() {
        for c in &mut out {
            if !c.name.ends_with(&format!("-{suffix}")) {
                c.name = format!("{}-{suffix}", c.name);
            }
        }
    }

    out
}

fn push_verb_candidates(
    out: &mut Vec<Candidate>,
    verbs: &[(&str, &[&str])],
    concepts: &[String],
    normalized: &str,
) {
    for (verb, hints) in verbs {
        let hinted = hints.iter().any(|h| text::contains_word(normalized, h));
        for c in concepts {
            out.push(Candidate {
                name: format!("{verb}-{c}"),
                from_pattern: true,
                verb_hinted: hinted,
            });
        }
    }
}

/// Regex, length, reserved words and, for prefixed features, the prefix.
pub fn is_valid_name(layer: LayerType, name: &str, context: &NamingContext) -> bool {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return false;
    }
    if RESERVED_WORDS.contains(&name) {
        return false;
    }
    if !layer.def().naming.style.is_match(name) {
        return false;
    }
    if layer == LayerType::Feature {
        if let Some(prefix) = context.prefix_kebab() {
            return name.starts_with(&format!("{prefix}-"));
        }
    }
    true
}

fn rank(layer: LayerType, candidate: &Candidate, normalized: &str) -> i64 {
    let len = candidate.name.chars().count() as i64;
    let mut score = (10 - (len - IDEAL_LEN).abs()).max(0);

    let matched = name_segments(layer, &candidate.name)
        .iter()
        .filter(|s| normalized.contains(s.as_str()))
        .count() as i64;
    score += matched * SEGMENT_POINTS;

    if candidate.from_pattern {
        score += PATTERN_BONUS;
    }
    if candidate.verb_hinted {
        score += VERB_HINT_BONUS;
    }

    score - HYPHEN_PENALTY * candidate.name.matches('-').count() as i64
}

/// Segments a name is built from (`TUserProfileEntity` → `user`, `profile`).
fn name_segments(layer: LayerType, name: &str) -> Vec<String> {
    let core = if layer == LayerType::Entity {
        name.strip_prefix('T')
            .and_then(|n| n.strip_suffix("Entity"))
            .unwrap_or(name)
    } else {
        name
    };
    text::split_words(core)
}

fn name_confidence(layer: LayerType, name: &str, normalized: &str) -> f64 {
    let segments = name_segments(layer, name);
    if segments.is_empty() {
        return MIN_CONFIDENCE;
    }
    let found = segments
        .iter()
        .filter(|s| text::contains_word(normalized, s))
        .count();
    (found as f64 / segments.len() as f64).clamp(MIN_CONFIDENCE, 1.0)
}

fn fallback_name(layer: LayerType, context: &NamingContext) -> String {
    if layer == LayerType::Feature {
        if let Some(prefix) = context.prefix_kebab() {
            let name = format!("{prefix}-feature");
            if is_valid_name(layer, &name, context) {
                return name;
            }
        }
    }
    layer.def().naming.fallback.to_string()
}

/// Whether `name` satisfies the naming style of `layer` (no context rules).
pub fn matches_convention(layer: LayerType, name: &str) -> bool {
    let style = layer.def().naming.style;
    // Feature names entered by users need not carry a prefix.
    let style = if style == NamingStyle::PrefixedKebab {
        NamingStyle::Kebab
    } else {
        style
    };
    style.is_match(name)
}
