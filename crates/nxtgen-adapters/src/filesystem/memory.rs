//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use nxtgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{NxtgenError, NxtgenResult},
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = self.create_dir_all(parent);
        }
        let _ = self.write_file(path, content);
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// Every file path, in path order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> NxtgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> NxtgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned(path))?;

        // Ensure parent exists
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

    fn read_to_string(&self, path: &Path) -> NxtgenResult<String> {
        let inner = self.inner.read().map_err(|_| poisoned(path))?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> NxtgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned(path))?;
        if inner.files.remove(path).is_none() {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into());
        }
        inner.executables.remove(path);
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> NxtgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned(path))?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }
}

fn poisoned(path: &Path) -> NxtgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "in-memory filesystem lock poisoned".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert!(fs.exists(Path::new("/p")));
        assert_eq!(fs.read_file("/p/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new().with_file("/p/package.json", "{}");
        let other = fs.clone();
        other.remove_file(Path::new("/p/package.json")).unwrap();
        assert!(!fs.exists(Path::new("/p/package.json")));
        assert!(fs.remove_file(Path::new("/p/package.json")).is_err());
    }

    #[test]
    fn executables_are_tracked() {
        let fs = MemoryFilesystem::new().with_file("/p/.husky/pre-commit", "npx lint-staged\n");
        fs.set_permissions(Path::new("/p/.husky/pre-commit"), true)
            .unwrap();
        assert!(fs.is_executable("/p/.husky/pre-commit"));
    }
}
