//! `IFileTree` over a local directory: `<root>/<memory_dir>/**` plus the
//! top-level notes file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;
use walkdir::WalkDir;

use mnemos_core::config::MarkdownConfig;
use mnemos_core::errors::{MnemosError, MnemosResult};
use mnemos_core::traits::{FileEntry, IFileTree};

pub struct LocalFileTree {
    root: PathBuf,
    memory_dir: String,
    notes_file: String,
    extensions: Vec<String>,
}

fn io_err(path: &Path, e: impl std::fmt::Display) -> MnemosError {
    MnemosError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

impl LocalFileTree {
    pub fn new(config: &MarkdownConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            memory_dir: config.memory_dir.trim_matches('/').to_string(),
            notes_file: config.notes_file.trim_start_matches('/').to_string(),
            extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a logical path.
    pub fn resolve(&self, logical: &str) -> PathBuf {
        logical
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    fn logical(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
    }

    fn entry(&self, full: &Path) -> MnemosResult<Option<FileEntry>> {
        let Some(path) = self.logical(full) else {
            return Ok(None);
        };
        let modified = fs::metadata(full)
            .and_then(|m| m.modified())
            .map_err(|e| io_err(full, e))?;
        Ok(Some(FileEntry {
            path,
            modified: DateTime::<Utc>::from(modified),
        }))
    }
}

impl IFileTree for LocalFileTree {
    fn list(&self) -> MnemosResult<Vec<FileEntry>> {
        let mut entries = Vec::new();

        let notes = self.resolve(&self.notes_file);
        if notes.is_file() {
            entries.extend(self.entry(&notes)?);
        }

        let dir = self.resolve(&self.memory_dir);
        if dir.is_dir() {
            for item in WalkDir::new(&dir).follow_links(false).into_iter() {
                let item = match item {
                    Ok(item) => item,
                    Err(e) => {
                        debug!(error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                if item.file_type().is_file() && self.wanted_extension(item.path()) {
                    entries.extend(self.entry(item.path())?);
                }
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries.dedup_by(|a, b| a.path == b.path);
        Ok(entries)
    }

    fn read(&self, path: &str) -> MnemosResult<String> {
        let full = self.resolve(path);
        if path.split('/').any(|part| part == "..") {
            return Err(io_err(&full, "path escapes the tree root"));
        }
        fs::read_to_string(&full).map_err(|e| io_err(&full, e))
    }

    fn owns(&self, path: &str) -> bool {
        if path.split('/').any(|part| part == "..") {
            return false;
        }
        path == self.notes_file
            || (!self.memory_dir.is_empty()
                && path
                    .strip_prefix(self.memory_dir.as_str())
                    .is_some_and(|rest| rest.starts_with('/')))
    }
}
