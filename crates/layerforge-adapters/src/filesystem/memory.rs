//! In-memory filesystem adapter for tests and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use layerforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};

/// Cloneable handle; clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

fn lock_error() -> ApplicationError {
    ApplicationError::StoreError {
        reason: "memory filesystem lock poisoned".into(),
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All written files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.files.clear();
        inner.directories.clear();
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("out/atoms/button/index.ts"), "").is_err());

        fs.create_dir_all(Path::new("out/atoms/button")).unwrap();
        fs.write_file(Path::new("out/atoms/button/index.ts"), "x").unwrap();
        assert!(fs.exists(Path::new("out/atoms")));
        assert_eq!(
            fs.read_file(Path::new("out/atoms/button/index.ts")).as_deref(),
            Some("x")
        );
    }

    #[test]
    fn remove_drops_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("out/atoms/button")).unwrap();
        fs.write_file(Path::new("out/atoms/button/a.ts"), "").unwrap();

        fs.remove_dir_all(Path::new("out/atoms")).unwrap();
        assert!(fs.list_files().is_empty());
        assert!(!fs.exists(Path::new("out/atoms/button")));
        assert!(fs.exists(Path::new("out")));
    }
}
