//! SmartCreate - main application orchestrator.
//!
//! Drives one description through
//! `input → analysis → confirmation → generation → complete`, with `error`
//! reachable from any non-final phase:
//! 1. Analyze (cache, then AI or heuristic strategy)
//! 2. Confirm with the user (interactive runs only)
//! 3. Select and render a template, validate and auto-fix
//! 4. Write under `{target}/{layer directory}/{file stem}/` when asked
//!
//! [`SmartCreateService::execute`] never returns an error: failures end the
//! run in the `error` phase and come back as a structured result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, instrument, warn};
use uuid::Uuid;

use crate::application::{
    ApplicationError,
    ports::{
        AiProvider, Clock, Confirmation, Filesystem, InteractivePrompt, SystemClock,
        TemplateRenderer, TemplateStore,
    },
    services::{
        AiAnalysisStrategy, AiAssist, AnalysisCache, AnalysisRequest, AnalysisStrategy,
        CodeGenerator, GenerationOptions, HeuristicAnalysisStrategy, cache::DEFAULT_TTL_SECS,
    },
};
use crate::domain::{
    ComponentTemplate, DependencyAnalysis, DependencyAnalyzer, GeneratedCode, GeneratedFile,
    GenerationMetadata, LayerAnalysis, LayerType, NamingContext, ValidationResult,
    VariableExtractor,
};
use crate::error::ForgeResult;

// ── Requests ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmartCreateOptions {
    /// Ask for confirmation after analysis.
    pub interactive: bool,
    /// Produce placeholder files without rendering or writing.
    pub dry_run: bool,
    /// Bypass the analysis cache.
    pub force_reanalysis: bool,
    pub generation: GenerationOptions,
    pub layer: Option<LayerType>,
    pub name: Option<String>,
    pub naming: NamingContext,
    pub features: Vec<String>,
    /// Root under which component directories are written.
    pub target_dir: Option<PathBuf>,
}

impl Default for SmartCreateOptions {
    fn default() -> Self {
        Self {
            interactive: false,
            dry_run: false,
            force_reanalysis: false,
            generation: GenerationOptions::default(),
            layer: None,
            name: None,
            naming: NamingContext::default(),
            features: Vec::new(),
            target_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartCreateRequest {
    pub description: String,
    pub options: SmartCreateOptions,
}

impl SmartCreateRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: SmartCreateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SmartCreateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            description: self.description.clone(),
            layer: self.options.layer,
            name: self.options.name.clone(),
            naming: self.options.naming.clone(),
            features: self.options.features.clone(),
        }
    }
}

// ── State machine ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Input,
    Analysis,
    Confirmation,
    Generation,
    Complete,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Analysis => "analysis",
            Self::Confirmation => "confirmation",
            Self::Generation => "generation",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    /// Forward-only; skipping phases is allowed, `error` is reachable from
    /// every non-final phase.
    pub fn can_advance_to(&self, next: Phase) -> bool {
        !self.is_final() && (next == Self::Error || next > *self)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase data. Each variant carries only what is valid in it.
#[derive(Debug, Clone, PartialEq)]
pub enum SmartCreatePhase {
    Input {
        description: String,
    },
    Analysis {
        description: String,
    },
    Confirmation {
        analysis: LayerAnalysis,
    },
    Generation {
        analysis: LayerAnalysis,
    },
    Complete {
        analysis: LayerAnalysis,
        generated: Option<GeneratedCode>,
        cancelled: bool,
    },
    Error {
        failed_in: Phase,
        errors: Vec<String>,
    },
}

impl SmartCreatePhase {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Input { .. } => Phase::Input,
            Self::Analysis { .. } => Phase::Analysis,
            Self::Confirmation { .. } => Phase::Confirmation,
            Self::Generation { .. } => Phase::Generation,
            Self::Complete { .. } => Phase::Complete,
            Self::Error { .. } => Phase::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmartCreateState {
    current: SmartCreatePhase,
    started_at: DateTime<Utc>,
}

impl SmartCreateState {
    pub fn new(description: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            current: SmartCreatePhase::Input {
                description: description.into(),
            },
            started_at,
        }
    }

    pub fn phase(&self) -> Phase {
        self.current.phase()
    }

    pub fn current(&self) -> &SmartCreatePhase {
        &self.current
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn advance(&mut self, next: SmartCreatePhase) -> Result<(), ApplicationError> {
        let (from, to) = (self.phase(), next.phase());
        if !from.can_advance_to(to) {
            return Err(ApplicationError::InvalidStateTransition {
                from: from.as_str(),
                to: to.as_str(),
            });
        }
        debug!(%from, %to, "phase transition");
        self.current = next;
        Ok(())
    }

    /// Move to `error`. A final state is left untouched.
    pub fn fail(&mut self, errors: Vec<String>) {
        let failed_in = self.phase();
        if failed_in.is_final() {
            warn!(phase = %failed_in, "failure reported after the run ended");
            return;
        }
        self.current = SmartCreatePhase::Error { failed_in, errors };
    }

    fn into_phase(self) -> SmartCreatePhase {
        self.current
    }
}

// ── Result ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartCreateResult {
    pub run_id: Uuid,
    pub description: String,
    pub success: bool,
    pub cancelled: bool,
    /// Final phase: `complete` or `error`.
    pub phase: Phase,
    /// Phase that was running when the failure happened.
    pub failed_in: Option<Phase>,
    pub analysis: Option<LayerAnalysis>,
    pub dependencies: Option<DependencyAnalysis>,
    pub generated: Option<GeneratedCode>,
    pub written_files: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

/// Data gathered along the run that outlives individual phases.
#[derive(Default)]
struct RunReport {
    analysis: Option<LayerAnalysis>,
    dependencies: Option<DependencyAnalysis>,
    written: Vec<PathBuf>,
    warnings: Vec<String>,
}

// ── Service ──────────────────────────────────────────────────────────────────

pub struct SmartCreateService {
    strategy: Box<dyn AnalysisStrategy>,
    generator: CodeGenerator,
    extractor: VariableExtractor,
    dependencies: DependencyAnalyzer,
    templates: Option<Box<dyn TemplateStore>>,
    renderer: Option<Box<dyn TemplateRenderer>>,
    filesystem: Option<Box<dyn Filesystem>>,
    prompt: Option<Box<dyn InteractivePrompt>>,
    cache: Option<AnalysisCache>,
    clock: Arc<dyn Clock>,
}

impl SmartCreateService {
    /// Create a service builder.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use layerforge_core::application::{SmartCreateRequest, SmartCreateService};
    ///
    /// let mut service = SmartCreateService::builder().build();
    /// let mut request = SmartCreateRequest::new("um botão simples com ícone");
    /// request.options.dry_run = true;
    /// let result = service.execute(request);
    /// assert!(result.success);
    /// ```
    pub fn builder() -> SmartCreateServiceBuilder {
        SmartCreateServiceBuilder::default()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn cache(&self) -> Option<&AnalysisCache> {
        self.cache.as_ref()
    }

    /// Analyze a description, reading and filling the cache unless `force`.
    #[instrument(skip_all, fields(strategy = self.strategy.name(), force = force))]
    pub fn analyze_description(
        &mut self,
        request: &AnalysisRequest,
        force: bool,
    ) -> ForgeResult<LayerAnalysis> {
        if request.description.trim().is_empty() {
            return Err(ApplicationError::invalid_input("description is empty").into());
        }

        if !force {
            if let Some(hit) = self.cache.as_mut().and_then(|c| c.get(request)) {
                return Ok(hit);
            }
        }

        let analysis = self.strategy.analyze(request)?;
        info!(
            layer = %analysis.layer,
            name = %analysis.component_name,
            confidence = analysis.confidence,
            "description analyzed"
        );
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(request, analysis.clone());
        }
        Ok(analysis)
    }

    /// Dependency analysis for an analysis; its declared dependencies are
    /// validated as required ones.
    pub fn analyze_dependencies(&self, analysis: &LayerAnalysis) -> DependencyAnalysis {
        let description = analysis
            .metadata
            .get("description")
            .map(String::as_str)
            .unwrap_or_default();
        let declared: Vec<LayerType> = analysis.dependencies.iter().copied().collect();
        self.dependencies
            .analyze_with_declared(description, analysis.layer, &[], &declared)
    }

    /// Templates from the store, optionally for one layer.
    pub fn templates(&self, layer: Option<LayerType>) -> ForgeResult<Vec<ComponentTemplate>> {
        let store = self
            .templates
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "TemplateStore",
            })?;
        match layer {
            Some(layer) => store.find(layer),
            None => store.list(),
        }
    }

    /// Run one description to completion. Never fails; see the result.
    pub fn execute(&mut self, request: SmartCreateRequest) -> SmartCreateResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("smart_create", %run_id);
        let _guard = span.enter();

        let mut state = SmartCreateState::new(request.description.clone(), self.clock.now());
        let mut report = RunReport::default();

        if let Err(e) = self.drive(&request, &mut state, &mut report) {
            warn!(error = %e, phase = %state.phase(), "smart create failed");
            self.notify(|p| p.show_error(&e.to_string()));
            state.fail(vec![e.to_string()]);
        }

        self.finish(run_id, request.description, state, report)
    }

    /// Run descriptions one after another. A failing item does not affect
    /// the others.
    #[instrument(skip_all, fields(items = descriptions.len()))]
    pub fn execute_batch(
        &mut self,
        descriptions: &[String],
        options: &SmartCreateOptions,
    ) -> Vec<SmartCreateResult> {
        descriptions
            .iter()
            .map(|d| self.execute(SmartCreateRequest::new(d.clone()).with_options(options.clone())))
            .collect()
    }

    /// Collect the request from the prompt, then execute it interactively.
    ///
    /// # Errors
    ///
    /// `AdapterNotConfigured` without a prompt, or the prompt's own failure.
    pub fn run_interactive(&mut self) -> ForgeResult<SmartCreateResult> {
        let prompt = self
            .prompt
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "InteractivePrompt",
            })?;
        let mut request = prompt.collect_input()?;
        request.options.interactive = true;
        Ok(self.execute(request))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn drive(
        &mut self,
        request: &SmartCreateRequest,
        state: &mut SmartCreateState,
        report: &mut RunReport,
    ) -> ForgeResult<()> {
        let options = &request.options;

        state.advance(SmartCreatePhase::Analysis {
            description: request.description.clone(),
        })?;
        self.notify(|p| p.show_progress("Analyzing description"));
        let mut analysis =
            self.analyze_description(&request.analysis_request(), options.force_reanalysis)?;
        let mut dependencies = self.analyze_dependencies(&analysis);
        report.analysis = Some(analysis.clone());

        if options.interactive {
            state.advance(SmartCreatePhase::Confirmation {
                analysis: analysis.clone(),
            })?;
            let prompt = self
                .prompt
                .as_deref()
                .ok_or(ApplicationError::AdapterNotConfigured {
                    name: "InteractivePrompt",
                })?;
            match prompt.confirm_analysis(&analysis, &dependencies)? {
                Confirmation::Accepted => {}
                Confirmation::Modified(edit) => {
                    analysis.apply_edit(edit)?;
                    dependencies = self.analyze_dependencies(&analysis);
                    report.analysis = Some(analysis.clone());
                    debug!(name = %analysis.component_name, "analysis edited");
                }
                Confirmation::Rejected => {
                    info!("cancelled at confirmation");
                    report.dependencies = Some(dependencies);
                    state.advance(SmartCreatePhase::Complete {
                        analysis,
                        generated: None,
                        cancelled: true,
                    })?;
                    return Ok(());
                }
            }
        }

        for violation in &dependencies.violations {
            self.notify(|p| p.show_warning(violation));
        }
        report.warnings.extend(dependencies.violations.iter().cloned());

        state.advance(SmartCreatePhase::Generation {
            analysis: analysis.clone(),
        })?;
        self.notify(|p| p.show_progress("Generating files"));
        let generated = if options.dry_run {
            self.placeholder(&analysis)
        } else {
            self.generate(&analysis, &dependencies, options.generation)?
        };

        if !options.dry_run {
            if let Some(target) = &options.target_dir {
                report.written = self.write(target, &analysis, &generated)?;
            }
        }
        report.dependencies = Some(dependencies);

        self.notify(|p| {
            p.show_success(&format!(
                "{} {} ready ({} files)",
                analysis.layer,
                analysis.component_name,
                generated.files.len()
            ))
        });
        state.advance(SmartCreatePhase::Complete {
            analysis,
            generated: Some(generated),
            cancelled: false,
        })?;
        Ok(())
    }

    fn generate(
        &self,
        analysis: &LayerAnalysis,
        dependencies: &DependencyAnalysis,
        options: GenerationOptions,
    ) -> ForgeResult<GeneratedCode> {
        let store = self
            .templates
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "TemplateStore",
            })?;
        let renderer = self
            .renderer
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "TemplateRenderer",
            })?;

        let candidates = store.find(analysis.layer)?;
        let selection = self.generator.select_template(analysis, &candidates)?;
        info!(
            template = %selection.template.name,
            confidence = selection.confidence,
            "template selected"
        );

        let context = self.extractor.extract(analysis, dependencies);
        let files = renderer.render(&selection.template, &context)?;

        Ok(self.generator.generate_with_validation(
            analysis,
            &context,
            files,
            options,
            Some(selection.template.name),
            self.clock.as_ref(),
        ))
    }

    /// Placeholder content for each planned required file.
    fn placeholder(&self, analysis: &LayerAnalysis) -> GeneratedCode {
        let names = if analysis.files.is_empty() {
            analysis.planned_files(false)
        } else {
            analysis.files.clone()
        };
        let files = names
            .into_iter()
            .map(|name| {
                let content = format!(
                    "// {name}: placeholder for {} {}\n",
                    analysis.layer, analysis.component_name
                );
                GeneratedFile::new(name, content)
            })
            .collect();

        GeneratedCode {
            files,
            validation: ValidationResult {
                is_valid: true,
                errors: Vec::new(),
                warnings: Vec::new(),
                score: 1.0,
                improvements: Vec::new(),
            },
            enhancements: Vec::new(),
            metadata: GenerationMetadata {
                layer: analysis.layer,
                name: analysis.component_name.clone(),
                generated_at: self.clock.now(),
                provider: self.generator.provider_name(),
                analysis_confidence: analysis.confidence,
                template: None,
            },
        }
    }

    /// Write files with rollback on failure.
    fn write(
        &self,
        target: &Path,
        analysis: &LayerAnalysis,
        generated: &GeneratedCode,
    ) -> ForgeResult<Vec<PathBuf>> {
        let filesystem = self
            .filesystem
            .as_deref()
            .ok_or(ApplicationError::AdapterNotConfigured { name: "Filesystem" })?;

        let root = target
            .join(analysis.layer.directory())
            .join(analysis.file_stem());
        if filesystem.exists(&root) {
            return Err(ApplicationError::ComponentExists { path: root }.into());
        }

        match write_all(filesystem, &root, &generated.files) {
            Ok(paths) => {
                info!(files = paths.len(), root = %root.display(), "component written");
                Ok(paths)
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                rollback(filesystem, &root);
                Err(e)
            }
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn InteractivePrompt)) {
        if let Some(prompt) = self.prompt.as_deref() {
            f(prompt);
        }
    }

    fn finish(
        &self,
        run_id: Uuid,
        description: String,
        state: SmartCreateState,
        report: RunReport,
    ) -> SmartCreateResult {
        let elapsed = self.clock.now() - state.started_at();
        let duration_ms = u64::try_from(elapsed.num_milliseconds()).unwrap_or(0);
        let RunReport {
            analysis: last_analysis,
            dependencies,
            written,
            mut warnings,
        } = report;

        let mut result = SmartCreateResult {
            run_id,
            description,
            success: false,
            cancelled: false,
            phase: state.phase(),
            failed_in: None,
            analysis: last_analysis,
            dependencies,
            generated: None,
            written_files: written,
            errors: Vec::new(),
            warnings: Vec::new(),
            duration_ms,
        };

        match state.into_phase() {
            SmartCreatePhase::Complete {
                analysis,
                generated,
                cancelled,
            } => {
                if let Some(code) = &generated {
                    warnings.extend(code.validation.warning_messages());
                    warnings.extend(code.validation.error_messages());
                }
                result.success = !cancelled;
                result.cancelled = cancelled;
                result.analysis = Some(analysis);
                result.generated = generated;
            }
            SmartCreatePhase::Error { failed_in, errors } => {
                result.failed_in = Some(failed_in);
                result.errors = errors;
            }
            other => {
                result.errors = vec![format!("run stopped in {} phase", other.phase())];
            }
        }
        result.warnings = warnings;
        result
    }
}

fn write_all(
    filesystem: &dyn Filesystem,
    root: &Path,
    files: &[GeneratedFile],
) -> ForgeResult<Vec<PathBuf>> {
    filesystem.create_dir_all(root)?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write_file(&path, &file.content)?;
        written.push(path);
    }
    Ok(written)
}

/// Best-effort rollback on failure.
fn rollback(filesystem: &dyn Filesystem, root: &Path) {
    if let Err(e) = filesystem.remove_dir_all(root) {
        warn!(error = %e, path = %root.display(), "Rollback failed");
    } else {
        info!("Rollback successful");
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

enum CacheSetting {
    Enabled(Duration),
    Disabled,
}

/// Builder for [`SmartCreateService`]. Every adapter is optional; the
/// service reports `AdapterNotConfigured` when a run needs a missing one.
pub struct SmartCreateServiceBuilder {
    provider: Option<Arc<dyn AiProvider>>,
    strategy: Option<Box<dyn AnalysisStrategy>>,
    templates: Option<Box<dyn TemplateStore>>,
    renderer: Option<Box<dyn TemplateRenderer>>,
    filesystem: Option<Box<dyn Filesystem>>,
    prompt: Option<Box<dyn InteractivePrompt>>,
    clock: Arc<dyn Clock>,
    cache: CacheSetting,
}

impl Default for SmartCreateServiceBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            strategy: None,
            templates: None,
            renderer: None,
            filesystem: None,
            prompt: None,
            clock: Arc::new(SystemClock),
            cache: CacheSetting::Enabled(Duration::seconds(DEFAULT_TTL_SECS)),
        }
    }
}

impl SmartCreateServiceBuilder {
    pub fn ai_provider(mut self, provider: Arc<dyn AiProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the analysis strategy chosen from the provider.
    pub fn strategy(mut self, strategy: Box<dyn AnalysisStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn templates(mut self, store: Box<dyn TemplateStore>) -> Self {
        self.templates = Some(store);
        self
    }

    pub fn renderer(mut self, renderer: Box<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn filesystem(mut self, filesystem: Box<dyn Filesystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    pub fn prompt(mut self, prompt: Box<dyn InteractivePrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = CacheSetting::Enabled(ttl);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = CacheSetting::Disabled;
        self
    }

    pub fn build(self) -> SmartCreateService {
        let ai = AiAssist::new(self.provider);
        let strategy = self.strategy.unwrap_or_else(|| {
            if ai.is_enabled() {
                Box::new(AiAnalysisStrategy::new(ai.clone()))
            } else {
                Box::new(HeuristicAnalysisStrategy::new())
            }
        });
        let cache = match self.cache {
            CacheSetting::Enabled(ttl) => Some(AnalysisCache::new(ttl, self.clock.clone())),
            CacheSetting::Disabled => None,
        };
        info!(strategy = strategy.name(), cache = cache.is_some(), "smart create service ready");

        SmartCreateService {
            strategy,
            generator: CodeGenerator::new(ai),
            extractor: VariableExtractor::new(),
            dependencies: DependencyAnalyzer::new(),
            templates: self.templates,
            renderer: self.renderer,
            filesystem: self.filesystem,
            prompt: self.prompt,
            cache,
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockAiProvider, MockFilesystem, MockInteractivePrompt};
    use crate::domain::AnalysisEdit;

    fn dry_run(description: &str) -> SmartCreateRequest {
        let mut request = SmartCreateRequest::new(description);
        request.options.dry_run = true;
        request
    }

    fn quiet_prompt() -> MockInteractivePrompt {
        let mut p = MockInteractivePrompt::new();
        p.expect_show_progress().return_const(());
        p.expect_show_success().return_const(());
        p.expect_show_warning().return_const(());
        p.expect_show_error().return_const(());
        p
    }

    #[test]
    fn phases_only_move_forward() {
        let mut state = SmartCreateState::new("x", Utc::now());
        state
            .advance(SmartCreatePhase::Analysis {
                description: "x".into(),
            })
            .unwrap();
        let back = state.advance(SmartCreatePhase::Input {
            description: "x".into(),
        });
        assert!(matches!(
            back,
            Err(ApplicationError::InvalidStateTransition { from: "analysis", to: "input" })
        ));

        state.fail(vec!["boom".into()]);
        assert_eq!(state.phase(), Phase::Error);
        assert!(!Phase::Error.can_advance_to(Phase::Complete));
        assert!(Phase::Analysis.can_advance_to(Phase::Generation));
    }

    #[test]
    fn dry_run_produces_placeholders() {
        let mut service = SmartCreateService::builder().build();
        let result = service.execute(dry_run("um botão simples com ícone"));

        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.phase, Phase::Complete);
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis.layer, LayerType::Atom);
        let generated = result.generated.unwrap();
        assert_eq!(generated.files.len(), analysis.files.len());
        assert!(generated.files.iter().all(|f| f.content.contains("placeholder")));
        assert!(result.written_files.is_empty());
    }

    #[test]
    fn empty_description_fails_in_analysis() {
        let mut service = SmartCreateService::builder().build();
        let result = service.execute(dry_run("  "));
        assert!(!result.success);
        assert_eq!(result.phase, Phase::Error);
        assert_eq!(result.failed_in, Some(Phase::Analysis));
        assert!(result.errors[0].contains("description is empty"));
    }

    #[test]
    fn missing_store_is_a_structured_failure() {
        let mut service = SmartCreateService::builder().build();
        let result = service.execute(SmartCreateRequest::new("um botão simples"));
        assert!(!result.success);
        assert_eq!(result.failed_in, Some(Phase::Generation));
        assert!(result.errors[0].contains("TemplateStore"));
        assert!(result.analysis.is_some());
    }

    #[test]
    fn cached_analysis_is_reused() {
        let mut service = SmartCreateService::builder().build();
        let req = AnalysisRequest::new("modal de confirmação reutilizável");
        let first = service.analyze_description(&req, false).unwrap();
        let second = service.analyze_description(&req, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cache().map(AnalysisCache::len), Some(1));
    }

    #[test]
    fn rejected_confirmation_cancels() {
        let mut prompt = quiet_prompt();
        prompt
            .expect_confirm_analysis()
            .times(1)
            .returning(|_, _| Ok(Confirmation::Rejected));
        let mut service = SmartCreateService::builder()
            .prompt(Box::new(prompt))
            .build();

        let mut request = dry_run("um botão simples");
        request.options.interactive = true;
        let result = service.execute(request);
        assert!(result.cancelled);
        assert!(!result.success);
        assert!(result.errors.is_empty());
        assert!(result.generated.is_none());
    }

    #[test]
    fn confirmation_edits_are_applied() {
        let mut prompt = quiet_prompt();
        prompt.expect_confirm_analysis().returning(|_, _| {
            Ok(Confirmation::Modified(AnalysisEdit {
                component_name: Some("primary-button".into()),
                ..AnalysisEdit::default()
            }))
        });
        let mut service = SmartCreateService::builder()
            .prompt(Box::new(prompt))
            .build();

        let mut request = dry_run("um botão simples");
        request.options.interactive = true;
        let result = service.execute(request);
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis.component_name, "primary-button");
        assert!(result.generated.unwrap().file("primary-button.atom.tsx").is_some());
    }

    #[test]
    fn unavailable_provider_uses_heuristics() {
        let mut provider = MockAiProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_is_available().return_const(false);
        let service = SmartCreateService::builder()
            .ai_provider(Arc::new(provider))
            .build();
        assert_eq!(service.strategy_name(), "heuristic");
    }

    #[test]
    fn existing_component_directory_is_refused() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        let service = SmartCreateService::builder()
            .filesystem(Box::new(fs))
            .build();

        let mut analysis = LayerAnalysis::new(LayerType::Atom, "button", 0.9);
        analysis.refresh_files();
        let code = service.placeholder(&analysis);
        let err = service
            .write(Path::new("/out"), &analysis, &code)
            .unwrap_err();
        assert!(err.to_string().contains("/out/atoms/button"));
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|p| p.ends_with("atoms/button"))
            .times(1)
            .returning(|_| Ok(()));
        let service = SmartCreateService::builder()
            .filesystem(Box::new(fs))
            .build();

        let mut analysis = LayerAnalysis::new(LayerType::Atom, "button", 0.9);
        analysis.refresh_files();
        let code = service.placeholder(&analysis);
        assert!(service.write(Path::new("/out"), &analysis, &code).is_err());
    }
}
