//! Discovery of tag substitution files.
//!
//! Substitution files (`*.sub`) are looked up in two places: an optional
//! custom directory given by the caller and the standard directory
//! `<config dir>/bkmkorg/substitutions` (e.g. `~/.config/bkmkorg/substitutions`
//! on Linux). Custom files are read first; within a directory files are read
//! in name order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BkmkError, Result};
use crate::tagfile::SubstitutionFile;

/// Extension of substitution files.
pub const SUBSTITUTION_EXT: &str = "sub";

/// Loader for substitution files.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionLoader {
    /// Custom directory path
    custom_dir: Option<PathBuf>,
    /// Standard directory path
    standard_dir: Option<PathBuf>,
}

impl SubstitutionLoader {
    /// Loader using only the standard directory.
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: Self::standard_dir() }
    }

    /// Loader with explicit directories; `None` disables a location.
    pub fn with_dirs(custom_dir: Option<PathBuf>, standard_dir: Option<PathBuf>) -> Self {
        Self { custom_dir, standard_dir }
    }

    /// Sets the custom directory.
    pub fn custom_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.custom_dir = Some(dir.into());
        self
    }

    /// `<config dir>/bkmkorg/substitutions`, if the platform has a config dir.
    pub fn standard_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bkmkorg").join("substitutions"))
    }

    /// Loads and merges every substitution file found.
    ///
    /// Missing directories are skipped. A file that cannot be read is logged
    /// and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::SubstitutionConflict`] if two files disagree on a
    /// tag's replacement.
    pub fn load(&self) -> Result<SubstitutionFile> {
        let mut merged = SubstitutionFile::new();

        for path in self.find_files()? {
            match SubstitutionFile::parse_file(&path) {
                Ok(file) => {
                    tracing::debug!(path = %path.display(), substitutions = file.len(), "Loaded substitution file");
                    merged.merge(&file)?;
                }
                Err(e) => tracing::warn!(path = %path.display(), "Failed to read substitution file: {}", e),
            }
        }

        Ok(merged)
    }

    /// Substitution files in priority order.
    fn find_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for dir in [&self.custom_dir, &self.standard_dir].into_iter().flatten() {
            for path in list_dir(dir)? {
                if !files.contains(&path) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| BkmkError::ConfigError(format!("Cannot read directory {}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == SUBSTITUTION_EXT))
        .collect();
    paths.sort();

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_merges_custom_and_standard() {
        let custom = TempDir::new().unwrap();
        let standard = TempDir::new().unwrap();

        fs::write(custom.path().join("a.sub"), "ml : 1 : machine_learning\n").unwrap();
        fs::write(standard.path().join("b.sub"), "js : 2 : javascript\n").unwrap();
        fs::write(standard.path().join("notes.txt"), "ignored : 1 : nope\n").unwrap();

        let loader =
            SubstitutionLoader::with_dirs(Some(custom.path().to_path_buf()), Some(standard.path().to_path_buf()));
        let subs = loader.load().unwrap();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs.substitute("js"), vec!["javascript".to_string()]);
        assert!(!subs.has_sub("ignored"));
    }

    #[test]
    fn test_load_conflict() {
        let custom = TempDir::new().unwrap();
        fs::write(custom.path().join("a.sub"), "ml : 1 : machine_learning\n").unwrap();
        fs::write(custom.path().join("b.sub"), "ml : 1 : markup\n").unwrap();

        let loader = SubstitutionLoader::with_dirs(Some(custom.path().to_path_buf()), None);
        assert!(matches!(loader.load(), Err(BkmkError::SubstitutionConflict(_))));
    }

    #[test]
    fn test_missing_dirs_are_empty() {
        let loader = SubstitutionLoader::with_dirs(Some(PathBuf::from("/no/such/dir")), None);
        assert!(loader.load().unwrap().is_empty());
    }
}
