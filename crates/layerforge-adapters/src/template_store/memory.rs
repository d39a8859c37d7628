//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use layerforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ComponentTemplate, DomainError, LayerType},
    error::ForgeResult,
};
use tracing::debug;

use crate::builtin_templates;

/// Thread-safe in-memory template store keyed by template name.
///
/// Inserting a template whose name already exists replaces it, so a
/// user template directory can shadow a built-in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, ComponentTemplate>>>,
}

fn lock_error() -> ApplicationError {
    ApplicationError::StoreError {
        reason: "template store lock poisoned".into(),
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in templates loaded.
    pub fn with_builtin() -> ForgeResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    pub fn load_builtin(&self) -> ForgeResult<()> {
        let templates = builtin_templates::all_templates()?;
        debug!(count = templates.len(), "loading built-in templates");
        for template in templates {
            self.insert(template)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remove(&self, name: &str) -> ForgeResult<ComponentTemplate> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner
            .remove(name)
            .ok_or_else(|| DomainError::TemplateNotFound(name.to_string()).into())
    }
}

impl TemplateStore for InMemoryStore {
    /// Templates for `layer`, sorted by name.
    fn find(&self, layer: LayerType) -> ForgeResult<Vec<ComponentTemplate>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner
            .values()
            .filter(|t| t.layer == layer)
            .cloned()
            .collect())
    }

    fn get(&self, name: &str) -> ForgeResult<ComponentTemplate> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::TemplateNotFound(name.to_string()).into())
    }

    fn list(&self) -> ForgeResult<Vec<ComponentTemplate>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        let mut templates: Vec<ComponentTemplate> = inner.values().cloned().collect();
        templates.sort_by(|a, b| a.layer.cmp(&b.layer).then_with(|| a.name.cmp(&b.name)));
        Ok(templates)
    }

    fn insert(&self, template: ComponentTemplate) -> ForgeResult<()> {
        template.validate()?;

        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        if inner.insert(template.name.clone(), template).is_some() {
            debug!("template replaced");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerforge_core::{domain::TemplateFile, error::ForgeError};

    fn template(name: &str, layer: LayerType) -> ComponentTemplate {
        ComponentTemplate::builder(name, layer)
            .file(TemplateFile::new("index.ts", "export {};\n"))
            .build()
            .unwrap()
    }

    #[test]
    fn find_filters_by_layer_in_name_order() {
        let store = InMemoryStore::new();
        store.insert(template("atom-z", LayerType::Atom)).unwrap();
        store.insert(template("molecule-basic", LayerType::Molecule)).unwrap();
        store.insert(template("atom-a", LayerType::Atom)).unwrap();

        let names: Vec<String> = store
            .find(LayerType::Atom)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["atom-a", "atom-z"]);
    }

    #[test]
    fn insert_replaces_same_name() {
        let store = InMemoryStore::new();
        store.insert(template("atom-basic", LayerType::Atom)).unwrap();
        store.insert(template("atom-basic", LayerType::Atom)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_rejects_invalid_template() {
        let mut broken = template("atom-basic", LayerType::Atom);
        broken.files.clear();
        let err = InMemoryStore::new().insert(broken).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn missing_template_is_not_found() {
        let err = InMemoryStore::new().get("nope").unwrap_err();
        assert!(matches!(err, ForgeError::Domain(DomainError::TemplateNotFound(_))));
    }

    #[test]
    fn builtin_store_covers_every_layer() {
        let store = InMemoryStore::with_builtin().unwrap();
        for layer in LayerType::ALL {
            assert!(!store.find(layer).unwrap().is_empty(), "no template for {layer}");
        }
    }
}
