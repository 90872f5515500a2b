use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartialError {
    #[error("failed to list partials in {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read partial {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Named HTML fragments, keyed by file stem.
///
/// Texts are stored verbatim. The store is immutable once loaded and is
/// rebuilt from disk on every build pass.
#[derive(Debug, Default, Clone)]
pub struct PartialStore {
    partials: BTreeMap<String, String>,
}

impl PartialStore {
    /// Load every `*.{extension}` file directly inside `dir`.
    ///
    /// A missing directory yields an empty store.
    pub fn load<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Self, PartialError> {
        let dir = dir.as_ref();
        let mut partials = BTreeMap::new();

        if !dir.is_dir() {
            return Ok(Self { partials });
        }

        let entries = std::fs::read_dir(dir).map_err(|source| PartialError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| PartialError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if !path.is_file() || !has_extension(&path, extension) {
                continue;
            }
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };

            let text = std::fs::read_to_string(&path)
                .map_err(|source| PartialError::Read { path: path.clone(), source })?;
            partials.insert(name, text);
        }

        Ok(Self { partials })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(String::as_str)
    }

    /// Partial names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.partials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    pub fn insert<N: Into<String>, T: Into<String>>(&mut self, name: N, text: T) {
        self.partials.insert(name.into(), text.into());
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for PartialStore {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut store = Self::default();
        for (name, text) in iter {
            store.insert(name, text);
        }
        store
    }
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy() == extension)
        .unwrap_or(false)
}
