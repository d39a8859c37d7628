//! Filesystem-based template loader.
//!
//! Discovers `template.toml` manifests under a user template directory and
//! turns each one into a [`ComponentTemplate`].
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── atoms/
//! │   └── atom-rounded/
//! │       ├── template.toml              ← manifest (required)
//! │       ├── component.tsx              ← mapped through [[files]]
//! │       └── index.ts.ejs               ← output name `index.ts`
//! └── molecule/
//!     └── molecule-form/
//!         ├── template.toml
//!         └── {{FILE_STEM}}.molecule.tsx
//! ```
//!
//! The layer directory accepts singular or plural names. A `layer` key in
//! the manifest wins over the directory name.
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name        = "atom-rounded"     # unique; replaces a built-in of the same name
//! layer       = "atom"             # optional
//! description = "Rounded button"   # optional
//!
//! [features]
//! supported = ["props", "icon"]    # optional
//! required  = []                   # optional
//!
//! # Optional: rename or mark files optional. Files not listed keep their
//! # relative path (minus a trailing `.ejs`) as output name and are required.
//! [[files]]
//! source   = "component.tsx"
//! name     = "{{FILE_STEM}}.atom.tsx"
//! required = true
//! ```

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use layerforge_core::{
    application::ports::TemplateStore,
    domain::{ComponentTemplate, DomainError, LayerType, TemplateFile, TemplateSource},
    error::ForgeResult,
};

const MANIFEST: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `template.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    #[serde(default)]
    pub features: FeaturesSection,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub name: String,
    pub layer: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FeaturesSection {
    #[serde(default)]
    pub supported: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Path relative to the template directory.
    pub source: String,
    /// Output name pattern; defaults to `source`.
    pub name: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`ComponentTemplate`]s from a directory tree of manifests.
///
/// Template directories whose manifest is invalid emit a `WARN` log and are
/// skipped; they do not prevent other templates from loading.
///
/// # Example
///
/// ```no_run
/// use layerforge_adapters::{InMemoryStore, template_loader::FilesystemTemplateLoader};
///
/// let store = InMemoryStore::with_builtin()?;
/// let loaded = FilesystemTemplateLoader::new("./templates").load_into(&store)?;
/// println!("Loaded {loaded} user templates");
/// # Ok::<(), layerforge_core::error::ForgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template found under the templates directory, in
    /// path order.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidTemplate`] if the directory is missing or
    /// cannot be walked.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<ComponentTemplate>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let mut templates = Vec::new();
        let walker = WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .max_depth(3)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry
                .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
            if !entry.file_type().is_file() || entry.file_name() != MANIFEST {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };

            match self.load_template_from_dir(dir) {
                Ok(template) => {
                    debug!(name = %template.name, layer = %template.layer, "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Load every template and insert it into `store`. Returns how many
    /// were inserted.
    pub fn load_into(&self, store: &dyn TemplateStore) -> ForgeResult<usize> {
        let templates = self.load_all()?;
        let count = templates.len();
        for template in templates {
            store.insert(template)?;
        }
        info!(count, dir = %self.templates_dir.display(), "user templates loaded");
        Ok(count)
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn load_template_from_dir(&self, dir: &Path) -> Result<ComponentTemplate, DomainError> {
        let manifest_path = dir.join(MANIFEST);
        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let layer = self.resolve_layer(dir, manifest.template.layer.as_deref())?;

        let mut builder = ComponentTemplate::builder(manifest.template.name.trim(), layer)
            .description(manifest.template.description.clone())
            .supports(manifest.features.supported.iter().cloned())
            .requires(manifest.features.required.iter().cloned());
        for file in read_files(dir, &manifest.files)? {
            builder = builder.file(file);
        }
        builder.build()
    }

    /// Manifest `layer` first, then the name of the directory holding the
    /// template directory.
    fn resolve_layer(&self, dir: &Path, declared: Option<&str>) -> Result<LayerType, DomainError> {
        if let Some(layer) = declared {
            return layer.parse();
        }

        let parent = dir
            .parent()
            .filter(|p| *p != self.templates_dir)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        match parent {
            Some(name) => name.parse(),
            None => Err(DomainError::InvalidTemplate(format!(
                "cannot infer layer for '{}': set [template].layer or nest it under a layer directory",
                dir.display()
            ))),
        }
    }
}

/// Manifest entries first, in declared order, then every other file found
/// on disk in path order.
fn read_files(dir: &Path, entries: &[FileEntry]) -> Result<Vec<TemplateFile>, DomainError> {
    let mut on_disk: HashMap<String, String> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry
            .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
        if !walk_entry.file_type().is_file() {
            continue;
        }
        let rel = walk_entry.path().strip_prefix(dir).map_err(|_| {
            DomainError::InvalidTemplate(format!(
                "failed to relativise '{}' against '{}'",
                walk_entry.path().display(),
                dir.display()
            ))
        })?;
        let rel = normalize_path(&rel.to_string_lossy());
        if rel == MANIFEST {
            continue;
        }

        let content = fs::read_to_string(walk_entry.path())
            .map_err(|e| DomainError::InvalidTemplate(format!("failed to read file '{rel}': {e}")))?;
        order.push(rel.clone());
        on_disk.insert(rel, content);
    }

    let mut files = Vec::new();
    let mut mapped: HashSet<String> = HashSet::new();

    for entry in entries {
        let source = normalize_path(&entry.source);
        let content = on_disk.get(&source).cloned().ok_or_else(|| {
            DomainError::InvalidTemplate(format!("[[files]] source '{source}' not found"))
        })?;
        let name = entry.name.clone().unwrap_or_else(|| output_name(&source));
        let file = TemplateFile::new(name, TemplateSource::Owned(content));
        files.push(if entry.required { file } else { file.optional() });
        mapped.insert(source);
    }

    for rel in order {
        if mapped.contains(&rel) {
            continue;
        }
        if let Some(content) = on_disk.remove(&rel) {
            files.push(TemplateFile::new(output_name(&rel), TemplateSource::Owned(content)));
        }
    }

    Ok(files)
}

/// `button.atom.tsx.ejs` → `button.atom.tsx`
fn output_name(rel: &str) -> String {
    rel.strip_suffix(".ejs").unwrap_or(rel).to_string()
}

/// Forward slashes everywhere so output names match on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::InMemoryStore;

    /// Write a template directory under `root/rel`.
    fn write_template(root: &Path, rel: &str, manifest: &str, files: &[(&str, &str)]) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST), manifest).unwrap();
        for (path, content) in files {
            let full = dir.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
    }

    const ROUNDED: &str = r#"
[template]
name = "atom-rounded"
description = "Rounded button"

[features]
supported = ["props", "icon"]

[[files]]
source = "component.tsx"
name = "{{FILE_STEM}}.atom.tsx"

[[files]]
source = "spec.tsx"
name = "{{FILE_STEM}}.spec.tsx"
required = false
"#;

    #[test]
    fn missing_directory_is_an_error() {
        let loader = FilesystemTemplateLoader::new("/absolutely/does/not/exist");
        assert!(matches!(loader.load_all(), Err(DomainError::InvalidTemplate(_))));
    }

    #[test]
    fn layer_comes_from_parent_directory() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "atoms/atom-rounded",
            ROUNDED,
            &[
                ("component.tsx", "export const {{PASCAL_NAME}} = 1;\n"),
                ("spec.tsx", "it('works', () => {});\n"),
                ("index.ts", "export * from './{{FILE_STEM}}.atom';\n"),
            ],
        );

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(templates.len(), 1);

        let t = &templates[0];
        assert_eq!(t.name, "atom-rounded");
        assert_eq!(t.layer, LayerType::Atom);
        assert!(t.supports("icon"));

        let names: Vec<&str> = t.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["{{FILE_STEM}}.atom.tsx", "{{FILE_STEM}}.spec.tsx", "index.ts"]);
        assert!(!t.files[1].required);
        assert!(matches!(t.files[0].content, TemplateSource::Owned(_)));
    }

    #[test]
    fn manifest_layer_wins() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "atoms/molecule-odd",
            "[template]\nname = \"molecule-odd\"\nlayer = \"molecule\"\n",
            &[("index.ts", "export {};\n")],
        );

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(templates[0].layer, LayerType::Molecule);
    }

    #[test]
    fn invalid_templates_are_skipped() {
        let temp = TempDir::new().unwrap();
        // unknown layer directory
        write_template(
            temp.path(),
            "widgets/widget-basic",
            "[template]\nname = \"widget-basic\"\n",
            &[("index.ts", "")],
        );
        // no files
        write_template(temp.path(), "utils/util-empty", "[template]\nname = \"util-empty\"\n", &[]);
        // bad toml
        write_template(temp.path(), "utils/util-broken", "[template\n", &[("a.ts", "")]);
        // missing [[files]] source
        write_template(
            temp.path(),
            "utils/util-missing",
            "[template]\nname = \"util-missing\"\n[[files]]\nsource = \"nope.ts\"\n",
            &[("a.ts", "")],
        );
        write_template(
            temp.path(),
            "utils/util-good",
            "[template]\nname = \"util-good\"\n",
            &[("{{FILE_STEM}}.util.ts", "export {};\n")],
        );

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["util-good"]);
    }

    #[test]
    fn nested_files_keep_forward_slash_names() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "util/util-nested",
            "[template]\nname = \"util-nested\"\n",
            &[("helpers/{{FILE_STEM}}.util.ts", "export {};\n")],
        );

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(templates[0].files[0].name, "helpers/{{FILE_STEM}}.util.ts");
    }

    #[test]
    fn ejs_suffix_is_dropped() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "gateways/gateway-rest",
            "[template]\nname = \"gateway-rest\"\n",
            &[("{{FILE_STEM}}.gateway.ts.ejs", "export {};\n"), ("index.ts", "")],
        );

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        let names: Vec<&str> = templates[0].files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["index.ts", "{{FILE_STEM}}.gateway.ts"]);
    }

    #[test]
    fn user_template_shadows_builtin() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "atoms/atom-basic",
            "[template]\nname = \"atom-basic\"\ndescription = \"custom\"\n",
            &[("index.ts", "export {};\n")],
        );

        let store = InMemoryStore::with_builtin().unwrap();
        let before = store.len();
        let loaded = FilesystemTemplateLoader::new(temp.path())
            .load_into(&store)
            .unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(store.len(), before);
        assert_eq!(store.get("atom-basic").unwrap().description, "custom");
    }
}
