use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;
use crate::parsers::{is_recognized, HEADER_EXTENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    Header,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileInfo {
    /// Path relative to the scanned root.
    pub relative_path: PathBuf,
    pub path: PathBuf,
    pub kind: FileKind,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Lists every header and implementation file under `root_path`.
    ///
    /// Results are sorted by relative path and free of duplicates, so
    /// reports built on top of them are reproducible.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<FileInfo>> {
        let entries = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Directories are not descended through links, but a link to a
        // regular file still counts as a file.
        let mut files: Vec<FileInfo> = entries
            .par_iter()
            .filter(|entry| is_recognized(entry.path()) && entry.path().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                let relative_path = path.strip_prefix(root_path).ok()?.to_path_buf();
                Some(FileInfo {
                    relative_path,
                    path: path.to_path_buf(),
                    kind: file_kind(path),
                })
            })
            .collect();

        files.sort();
        files.dedup_by(|a, b| a.relative_path == b.relative_path);
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn file_kind(path: &Path) -> FileKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(HEADER_EXTENSION) => FileKind::Header,
        _ => FileKind::Source,
    }
}
