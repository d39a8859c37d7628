//! Integration tests for layerforge-core.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;

use layerforge_core::{
    application::{
        AnalysisRequest, Phase, SmartCreateOptions, SmartCreateRequest, SmartCreateService,
        ports::Clock,
    },
    domain::{
        DependencyAnalyzer, LayerClassifier, NamingAnalyzer, NamingContext, naming::matches_convention,
    },
    prelude::*,
};

// ── Test doubles ─────────────────────────────────────────────────────────────

struct VecStore(Vec<ComponentTemplate>);

impl TemplateStore for VecStore {
    fn find(&self, layer: LayerType) -> ForgeResult<Vec<ComponentTemplate>> {
        Ok(self.0.iter().filter(|t| t.layer == layer).cloned().collect())
    }

    fn get(&self, name: &str) -> ForgeResult<ComponentTemplate> {
        self.0
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| layerforge_core::domain::DomainError::TemplateNotFound(name.into()).into())
    }

    fn list(&self) -> ForgeResult<Vec<ComponentTemplate>> {
        Ok(self.0.clone())
    }

    fn insert(&self, _template: ComponentTemplate) -> ForgeResult<()> {
        Ok(())
    }
}

/// Substitutes `{{VARIABLE}}` in names and contents.
struct ContextRenderer;

impl TemplateRenderer for ContextRenderer {
    fn render(
        &self,
        template: &ComponentTemplate,
        context: &TemplateContext,
    ) -> ForgeResult<Vec<GeneratedFile>> {
        Ok(template
            .files
            .iter()
            .map(|f| GeneratedFile::new(context.render(&f.name), context.render(f.content.as_str())))
            .collect())
    }
}

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Records every path the service touches.
#[derive(Clone, Default)]
struct RecordingFs(Arc<Mutex<Vec<PathBuf>>>);

impl RecordingFs {
    fn touched(&self) -> Vec<PathBuf> {
        self.0.lock().unwrap().clone()
    }
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        self.0.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, _content: &str) -> ForgeResult<()> {
        self.0.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn remove_dir_all(&self, _path: &Path) -> ForgeResult<()> {
        Ok(())
    }
}

/// Atom template missing the semicolon, React import and displayName the
/// auto-fixer knows how to add.
fn sloppy_atom() -> ComponentTemplate {
    ComponentTemplate::builder("atom-basic", LayerType::Atom)
        .description("Plain atom")
        .file(TemplateFile::new(
            "{{FILE_STEM}}.atom.tsx",
            "import { View } from 'react-native'\n\
             import type { {{PASCAL_NAME}}Props } from './{{FILE_STEM}}.type';\n\
             \n\
             export const {{PASCAL_NAME}} = (props: {{PASCAL_NAME}}Props): React.ReactElement => (\n  \
             <View testID={props.testID ?? '{{TEST_ID}}'} />\n\
             );\n",
        ))
        .file(TemplateFile::new(
            "{{FILE_STEM}}.type.ts",
            "export type {{PROPS_TYPE}} = {\n{{PROPS_INTERFACE}}\n};\n",
        ))
        .file(TemplateFile::new(
            "index.ts",
            "export * from './{{FILE_STEM}}.atom';\n",
        ))
        .supports(["props"])
        .build()
        .unwrap()
}

fn service() -> SmartCreateService {
    SmartCreateService::builder()
        .templates(Box::new(VecStore(vec![sloppy_atom()])))
        .renderer(Box::new(ContextRenderer))
        .build()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn scenario_simple_button_is_an_atom() {
    let classification = LayerClassifier::new()
        .classify("um botão simples com ícone", &[])
        .unwrap();
    assert_eq!(classification.layer(), LayerType::Atom);
    assert!(classification.confidence > 0.0);

    let name = NamingAnalyzer::new().suggest_name("um botão simples com ícone", LayerType::Atom, None);
    assert!(matches_convention(LayerType::Atom, &name.primary));
}

#[test]
fn scenario_confirmation_modal_needs_atoms() {
    let description = "modal de confirmação reutilizável";
    let classification = LayerClassifier::new().classify(description, &[]).unwrap();
    assert_eq!(classification.layer(), LayerType::Molecule);

    let deps = DependencyAnalyzer::new().analyze_dependencies(description, LayerType::Molecule, &[]);
    assert!(deps.required.contains(&LayerType::Atom));
}

#[test]
fn scenario_feature_name_keeps_prefix() {
    let name = NamingAnalyzer::new().suggest_name(
        "tela de depósito na carteira",
        LayerType::Feature,
        Some(&NamingContext::with_prefix("wallet")),
    );
    assert!(name.primary.starts_with("wallet-"), "{}", name.primary);
}

#[test]
fn scenario_batch_isolates_failures() {
    let mut service = service();
    let options = SmartCreateOptions {
        dry_run: true,
        ..SmartCreateOptions::default()
    };
    let results = service.execute_batch(
        &["".to_string(), "um botão simples com ícone".to_string()],
        &options,
    );

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert_eq!(results[0].failed_in, Some(Phase::Analysis));
    assert!(results[1].success, "{:?}", results[1].errors);
    assert_ne!(results[0].run_id, results[1].run_id);
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn classification_confidence_is_bounded() {
    let classifier = LayerClassifier::new();
    for d in [
        "",
        "???",
        "botão",
        "tela de login com formulário, validação e chamada de api",
        "repositorio de usuarios com cache offline",
    ] {
        let c = classifier.classify_with_fallback(d, &[]);
        assert!((0.0..=1.0).contains(&c.confidence), "{d}: {}", c.confidence);
    }
}

#[test]
fn atom_dependencies_are_always_valid() {
    let analyzer = DependencyAnalyzer::new();
    for d in ["botão", "botão que busca dados da api e salva no repositorio", ""] {
        let deps = analyzer.analyze_dependencies(d, LayerType::Atom, &[]);
        assert!(deps.is_valid(), "{d}: {:?}", deps.violations);
    }
}

#[test]
fn entity_names_round_trip_the_convention() {
    let name = NamingAnalyzer::new().suggest_name("entidade de perfil do usuario", LayerType::Entity, None);
    assert!(matches_convention(LayerType::Entity, &name.primary), "{}", name.primary);
    for alt in &name.alternatives {
        assert!(matches_convention(LayerType::Entity, alt), "{alt}");
    }
}

#[test]
fn cached_analysis_is_identical_until_expiry() {
    let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
    let mut service = SmartCreateService::builder()
        .clock(clock.clone())
        .cache_ttl(Duration::seconds(30))
        .build();
    let request = AnalysisRequest::new("modal de confirmação reutilizável");

    let first = service.analyze_description(&request, false).unwrap();
    let second = service.analyze_description(&request, false).unwrap();
    assert_eq!(first, second);

    clock.advance(Duration::seconds(31));
    let third = service.analyze_description(&request, false).unwrap();
    assert_eq!(third.layer, first.layer);
    assert_eq!(service.cache().map(|c| c.len()), Some(1));
}

#[test]
fn caller_features_are_part_of_the_cache_key() {
    let mut service = SmartCreateService::builder().build();
    let plain = AnalysisRequest::new("um botão simples");
    let mut with_modal = AnalysisRequest::new("um botão simples");
    with_modal.features = vec!["modal".into()];

    let first = service.analyze_description(&plain, false).unwrap();
    assert_eq!(first.layer, LayerType::Atom);

    let fresh = SmartCreateService::builder()
        .without_cache()
        .build()
        .analyze_description(&with_modal, false)
        .unwrap();
    let cached = service.analyze_description(&with_modal, false).unwrap();
    assert_eq!(cached.layer, fresh.layer);
    assert_eq!(service.cache().map(|c| c.len()), Some(2));
}

// ── End to end ───────────────────────────────────────────────────────────────

#[test]
fn generation_renders_and_auto_fixes() {
    let mut service = service();
    let result = service.execute(SmartCreateRequest::new("um botão simples com ícone"));

    assert!(result.success, "{:?}", result.errors);
    let generated = result.generated.expect("generated code");
    assert_eq!(generated.metadata.template.as_deref(), Some("atom-basic"));
    assert_eq!(generated.metadata.provider, "none");
    assert!(generated.validation.is_valid, "{:?}", generated.validation.errors);
    assert_eq!(generated.auto_fix_count(), 3);

    let analysis = result.analysis.unwrap();
    let main = generated
        .file(&format!("{}.atom.tsx", analysis.file_stem()))
        .expect("component file");
    assert!(main.content.starts_with("import React from 'react';"));
    assert!(main.content.contains(".displayName = 'Atom."));
}

#[test]
fn failures_never_escape_execute() {
    let mut service = SmartCreateService::builder().build();
    let mut request = SmartCreateRequest::new("um botão simples");
    request.options.target_dir = Some("/tmp/out".into());

    let result = service.execute(request);
    assert!(!result.success);
    assert_eq!(result.phase, Phase::Error);
    assert!(!result.errors.is_empty());
}

#[test]
fn interactive_run_without_prompt_fails_before_writing() {
    let fs = RecordingFs::default();
    let mut service = SmartCreateService::builder()
        .templates(Box::new(VecStore(vec![sloppy_atom()])))
        .renderer(Box::new(ContextRenderer))
        .filesystem(Box::new(fs.clone()))
        .build();
    let mut request = SmartCreateRequest::new("um botão simples com ícone");
    request.options.interactive = true;
    request.options.target_dir = Some("out".into());

    let result = service.execute(request);
    assert!(!result.success);
    assert!(!result.cancelled);
    assert_eq!(result.phase, Phase::Error);
    assert_eq!(result.failed_in, Some(Phase::Confirmation));
    assert!(
        result.errors.iter().any(|e| e.contains("InteractivePrompt")),
        "{:?}",
        result.errors
    );
    assert!(result.generated.is_none());
    assert!(result.written_files.is_empty());
    assert!(fs.touched().is_empty());
}
