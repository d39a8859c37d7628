//! Static validation of generated files.
//!
//! All checks are line-based heuristics over raw text; nothing here parses
//! TypeScript. Every finding is either an error (blocks `is_valid`) or a
//! warning, and each one multiplies the quality score by a factor that
//! depends on its kind and severity.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::GeneratedFile, value_objects::LayerType, variables::TemplateContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    Syntax,
    Convention,
    React,
    TypeScript,
    Imports,
}

impl FindingKind {
    /// Score multiplier per finding.
    fn factor(self, severity: Severity) -> f64 {
        match (self, severity) {
            (Self::Syntax, Severity::Error) => 0.9,
            (Self::Convention, Severity::Error) => 0.85,
            (Self::React, Severity::Error) => 0.85,
            (Self::TypeScript, Severity::Error) => 0.9,
            (Self::Imports, Severity::Error) => 0.9,
            (Self::Convention, Severity::Warning) => 0.95,
            (_, Severity::Warning) => 0.97,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    /// 1-based line, when the finding is tied to one.
    pub line: Option<usize>,
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub score: f64,
    pub improvements: Vec<String>,
}

impl ValidationResult {
    fn from_findings(findings: Vec<Finding>) -> Self {
        let mut score: f64 = 1.0;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut improvements: Vec<String> = Vec::new();

        for finding in findings {
            score *= finding.kind.factor(finding.severity);
            if let Some(tip) = improvement_for(&finding) {
                if !improvements.iter().any(|i| i == tip) {
                    improvements.push(tip.to_string());
                }
            }
            match finding.severity {
                Severity::Error => errors.push(finding),
                Severity::Warning => warnings.push(finding),
            }
        }

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            score: score.clamp(0.0, 1.0),
            improvements,
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|f| format!("{}: {}", f.file, f.message)).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|f| format!("{}: {}", f.file, f.message)).collect()
    }
}

fn improvement_for(finding: &Finding) -> Option<&'static str> {
    let m = finding.message.as_str();
    Some(if m.contains("console.log") {
        "Remove console.log statements"
    } else if m.contains("TODO") || m.contains("FIXME") {
        "Resolve TODO/FIXME comments"
    } else if m.contains("testID") {
        "Expose a testID prop on atoms"
    } else if m.contains("import type") {
        "Use `import type` for type-only imports"
    } else if m.contains("Deep relative import") {
        "Prefer path aliases (@/...) over deep relative imports"
    } else if m.contains("Explicit extension") {
        "Drop .ts/.tsx extensions from import paths"
    } else if m.contains("Duplicate import") {
        "Merge imports from the same module"
    } else {
        return None;
    })
}

// ── Patterns ─────────────────────────────────────────────────────────────────

static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from\s+['"]([^'"]+)['"]"#).expect("valid from regex"));

static EXPORT_DEFAULT_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+default\s+[A-Za-z_$][\w$.]*$").expect("valid export default regex")
});

static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^import\s+['"][^'"]+['"]$"#).expect("valid import regex"));

static REACT_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\s+(React\b|\*\s+as\s+React\b)[^;]*from\s+['"]react['"]"#)
        .expect("valid react import regex")
});

static TODO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(TODO|FIXME)\b").expect("valid todo regex"));

// ── Validator ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct CodeValidator;

impl CodeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a set of files. A new result is produced on every call.
    pub fn validate(&self, files: &[GeneratedFile], context: &TemplateContext) -> ValidationResult {
        let findings = files
            .iter()
            .flat_map(|f| self.validate_file(f, context))
            .collect();
        ValidationResult::from_findings(findings)
    }

    /// Findings for one file. Non-TypeScript files are skipped.
    pub fn validate_file(&self, file: &GeneratedFile, context: &TemplateContext) -> Vec<Finding> {
        if !(file.path.ends_with(".ts") || file.path.ends_with(".tsx")) {
            return Vec::new();
        }

        let mut out = Vec::new();
        let finding = |line: Option<usize>, kind, severity, message: String| Finding {
            file: file.path.clone(),
            line,
            kind,
            severity,
            message,
        };

        // Line rules
        let mut seen_modules: HashMap<String, usize> = HashMap::new();
        for (idx, raw) in file.content.lines().enumerate() {
            let n = idx + 1;
            let line = raw.trim();

            if is_complete_statement_missing_semicolon(line) {
                out.push(finding(
                    Some(n),
                    FindingKind::Syntax,
                    Severity::Error,
                    format!("Missing semicolon at line {n}"),
                ));
            }

            if line.contains("console.log") {
                out.push(finding(
                    Some(n),
                    FindingKind::Syntax,
                    Severity::Warning,
                    format!("Unexpected console.log at line {n}"),
                ));
            }

            if let Some(m) = TODO_RE.find(line) {
                out.push(finding(
                    Some(n),
                    FindingKind::Convention,
                    Severity::Warning,
                    format!("Unresolved {} at line {n}", m.as_str()),
                ));
            }

            if line.starts_with("import ") || line.starts_with("} from") {
                if let Some(module) = FROM_RE.captures(line).and_then(|c| c.get(1)) {
                    let module = module.as_str();
                    self.check_import_shape(line, module, n, &mut out, &finding);
                    if let Some(first) = seen_modules.get(module) {
                        out.push(finding(
                            Some(n),
                            FindingKind::Imports,
                            Severity::Warning,
                            format!("Duplicate import of '{module}' at line {n} (first at line {first})"),
                        ));
                    } else {
                        seen_modules.insert(module.to_string(), n);
                    }
                }
            }
        }

        // File rules
        let layer = context.layer;
        let content = &file.content;

        if content.contains("React.") && !has_react_import(content) {
            out.push(finding(
                None,
                FindingKind::React,
                Severity::Error,
                "Missing React import".into(),
            ));
        }

        if file.is_component_file(layer) {
            if layer == LayerType::Atom && !content.contains("testID") {
                out.push(finding(
                    None,
                    FindingKind::Convention,
                    Severity::Warning,
                    "Atom component has no testID support".into(),
                ));
            }

            if layer.is_visual() && !content.contains("displayName") {
                out.push(finding(
                    None,
                    FindingKind::Convention,
                    Severity::Error,
                    format!("Missing displayName for {}", context.pascal_name),
                ));
            }

            if layer.requires_use_case()
                && !(content.contains("use-case") || content.contains("UseCase"))
            {
                out.push(finding(
                    None,
                    FindingKind::Convention,
                    Severity::Error,
                    format!("Missing use-case reference in {layer} component"),
                ));
            }
        }

        if layer == LayerType::Feature && file.path != "index.ts" {
            let stem = file.path.split('.').next().unwrap_or_default();
            if !stem.contains('-') {
                out.push(finding(
                    None,
                    FindingKind::Convention,
                    Severity::Error,
                    format!("Feature file name '{}' needs a hyphenated prefix", file.path),
                ));
            }
        }

        out
    }

    fn check_import_shape<F>(&self, line: &str, module: &str, n: usize, out: &mut Vec<Finding>, finding: &F)
    where
        F: Fn(Option<usize>, FindingKind, Severity, String) -> Finding,
    {
        let is_type_module = module.ends_with(".type") || module.ends_with(".types");
        let is_type_import = line.starts_with("import type ");
        if is_type_module && !is_type_import && line.starts_with("import {") {
            out.push(finding(
                Some(n),
                FindingKind::TypeScript,
                Severity::Warning,
                format!("Prefer 'import type' for type-only import at line {n}"),
            ));
        }

        if module.starts_with("../../../") {
            out.push(finding(
                Some(n),
                FindingKind::Imports,
                Severity::Warning,
                format!("Deep relative import '{module}' at line {n}"),
            ));
        }

        if module.ends_with(".ts") || module.ends_with(".tsx") {
            out.push(finding(
                Some(n),
                FindingKind::Imports,
                Severity::Warning,
                format!("Explicit extension in import '{module}' at line {n}"),
            ));
        }
    }
}

/// Import/export statements that are complete on one line but lack `;`.
fn is_complete_statement_missing_semicolon(line: &str) -> bool {
    if line.ends_with(';') {
        return false;
    }

    let ends_with_quote = line.ends_with('\'') || line.ends_with('"');

    if line.starts_with("import ") {
        return (line.contains(" from ") && ends_with_quote) || SIDE_EFFECT_IMPORT_RE.is_match(line);
    }

    if line.starts_with("} from ") {
        return ends_with_quote;
    }

    if line.starts_with("export ") {
        return (line.contains(" from ") && ends_with_quote)
            || (line.starts_with("export {") && line.ends_with('}'))
            || EXPORT_DEFAULT_IDENT_RE.is_match(line);
    }

    false
}

pub fn has_react_import(content: &str) -> bool {
    content.lines().any(|l| REACT_IMPORT_RE.is_match(l.trim()))
}
