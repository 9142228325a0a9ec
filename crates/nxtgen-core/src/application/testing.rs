//! In-crate test doubles for the driven ports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::NxtgenResult,
};

/// Map-backed filesystem; clones share state.
#[derive(Debug, Clone, Default)]
pub(crate) struct MapFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MapFs {
    pub(crate) fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub(crate) fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub(crate) fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl Filesystem for MapFs {
    fn create_dir_all(&self, _path: &Path) -> NxtgenResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> NxtgenResult<()> {
        *self.writes.lock().unwrap() += 1;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> NxtgenResult<String> {
        self.read(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path))
    }

    fn remove_file(&self, path: &Path) -> NxtgenResult<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> NxtgenResult<()> {
        Ok(())
    }
}
