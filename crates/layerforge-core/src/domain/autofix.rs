//! Deterministic textual fixes keyed by validation message.
//!
//! | Message contains | Fix |
//! |------------------|-----|
//! | `Missing semicolon at line N` | append `;` to line N |
//! | `Missing displayName` | append `Pascal.displayName = 'Namespace';` |
//! | `Missing React import` | prepend `import React from 'react';` |
//!
//! Each applied fix is recorded as a [`CodeEnhancement`] at confidence 0.8.
//! Fixes check the content before editing, so running the fixer on its own
//! output changes nothing.

use crate::domain::{
    entities::{CodeEnhancement, EnhancementKind, GeneratedFile},
    validation::{ValidationResult, has_react_import},
    variables::TemplateContext,
};

pub const AUTO_FIX_CONFIDENCE: f64 = 0.8;

const SEMICOLON_KEY: &str = "Missing semicolon at line ";
const DISPLAY_NAME_KEY: &str = "Missing displayName";
const REACT_IMPORT_KEY: &str = "Missing React import";

#[derive(Debug, Default, Clone, Copy)]
pub struct AutoFixer;

impl AutoFixer {
    pub fn new() -> Self {
        Self
    }

    /// Apply fixes for the errors in `validation`. Returns the fixed files
    /// and one enhancement per applied fix.
    pub fn apply(
        &self,
        files: &[GeneratedFile],
        validation: &ValidationResult,
        context: &TemplateContext,
    ) -> (Vec<GeneratedFile>, Vec<CodeEnhancement>) {
        let mut enhancements = Vec::new();
        let fixed = files
            .iter()
            .map(|file| {
                let messages: Vec<&str> = validation
                    .errors
                    .iter()
                    .filter(|e| e.file == file.path)
                    .map(|e| e.message.as_str())
                    .collect();
                if messages.is_empty() {
                    return file.clone();
                }
                let (content, applied) = fix_content(&file.content, &messages, context);
                enhancements.extend(applied.into_iter().map(|description| CodeEnhancement {
                    file: file.path.clone(),
                    kind: EnhancementKind::AutoFix,
                    description,
                    confidence: AUTO_FIX_CONFIDENCE,
                }));
                GeneratedFile::new(file.path.clone(), content)
            })
            .collect();
        (fixed, enhancements)
    }
}

/// Semicolons first (line numbers refer to the original content), then the
/// displayName append, then the React import prepend.
fn fix_content(content: &str, messages: &[&str], context: &TemplateContext) -> (String, Vec<String>) {
    let mut applied = Vec::new();
    let trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let mut semicolon_lines: Vec<usize> = messages
        .iter()
        .filter_map(|m| m.split(SEMICOLON_KEY).nth(1))
        .filter_map(|rest| {
            rest.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .ok()
        })
        .collect();
    semicolon_lines.sort_unstable();
    semicolon_lines.dedup();

    for n in semicolon_lines {
        if let Some(line) = n.checked_sub(1).and_then(|i| lines.get_mut(i)) {
            if !line.trim_end().ends_with(';') {
                let trimmed = line.trim_end().to_string();
                *line = format!("{trimmed};");
                applied.push(format!("Added missing semicolon at line {n}"));
            }
        }
    }

    if messages.iter().any(|m| m.contains(DISPLAY_NAME_KEY))
        && !lines.iter().any(|l| l.contains("displayName"))
    {
        if lines.last().is_some_and(|l| !l.trim().is_empty()) {
            lines.push(String::new());
        }
        lines.push(format!(
            "{}.displayName = '{}';",
            context.pascal_name, context.display_name
        ));
        applied.push(format!("Added displayName '{}'", context.display_name));
    }

    let mut out = lines.join("\n");
    if trailing_newline || !applied.is_empty() {
        out.push('\n');
    }

    if messages.iter().any(|m| m.contains(REACT_IMPORT_KEY)) && !has_react_import(&out) {
        out = format!("import React from 'react';\n{out}");
        applied.push("Added React import".to_string());
    }

    if applied.is_empty() {
        return (content.to_string(), applied);
    }
    (out, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        dependency::DependencyAnalyzer, entities::LayerAnalysis, validation::CodeValidator,
        value_objects::LayerType, variables::VariableExtractor,
    };

    fn ctx() -> TemplateContext {
        let analysis = LayerAnalysis::new(LayerType::Atom, "button", 0.9);
        let deps = DependencyAnalyzer::new().analyze_dependencies("", LayerType::Atom, &[]);
        VariableExtractor::new().extract(&analysis, &deps)
    }

    const BROKEN: &str = "import { View } from 'react-native'
import type { ButtonProps } from './button.type'

export const Button = (props: ButtonProps): React.ReactElement => <View testID={props.testID} />;
";

    #[test]
    fn fixes_all_three_error_kinds() {
        let ctx = ctx();
        let validator = CodeValidator::new();
        let files = vec![GeneratedFile::new("button.atom.tsx", BROKEN)];

        let before = validator.validate(&files, &ctx);
        assert_eq!(before.errors.len(), 4, "{:?}", before.errors);

        let (fixed, enhancements) = AutoFixer::new().apply(&files, &before, &ctx);
        assert_eq!(enhancements.len(), 4);
        assert!(enhancements.iter().all(|e| e.confidence == AUTO_FIX_CONFIDENCE));

        let content = &fixed[0].content;
        assert!(content.starts_with("import React from 'react';\n"));
        assert!(content.contains("from 'react-native';"));
        assert!(content.trim_end().ends_with("Button.displayName = 'Atom.Button';"));

        let after = validator.validate(&fixed, &ctx);
        assert!(after.is_valid, "{:?}", after.errors);
        assert!(after.score > before.score);
    }

    #[test]
    fn second_pass_applies_nothing() {
        let ctx = ctx();
        let validator = CodeValidator::new();
        let files = vec![GeneratedFile::new("button.atom.tsx", BROKEN)];

        let first = validator.validate(&files, &ctx);
        let (fixed, _) = AutoFixer::new().apply(&files, &first, &ctx);

        let second = validator.validate(&fixed, &ctx);
        let (refixed, enhancements) = AutoFixer::new().apply(&fixed, &second, &ctx);
        assert!(enhancements.is_empty());
        assert_eq!(refixed, fixed);
    }

    #[test]
    fn stale_messages_do_not_duplicate_fixes() {
        let ctx = ctx();
        let files = vec![GeneratedFile::new("button.atom.tsx", BROKEN)];
        let result = CodeValidator::new().validate(&files, &ctx);

        let (fixed, _) = AutoFixer::new().apply(&files, &result, &ctx);
        // Replaying the old result against fixed content is a no-op.
        let (again, enhancements) = AutoFixer::new().apply(&fixed, &result, &ctx);
        assert!(enhancements.is_empty());
        assert_eq!(again, fixed);
    }
}
