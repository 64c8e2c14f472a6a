use std::path::{Path, PathBuf};

use crate::parsers::Include;

/// Finds the directory an include directive refers to.
///
/// Search order follows the C standard (6.10.2, source file inclusion):
/// a quoted name is first looked up next to the including file, then both
/// forms walk the search directories in the order they were given.
#[derive(Debug, Clone, Default)]
pub struct IncludeResolver {
    search_dirs: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Directory containing the referenced file, or `None` when no
    /// candidate holds a regular file of that name.
    pub fn resolve(&self, include: &Include, file_dir: &Path) -> Option<PathBuf> {
        find_include_parent(include, file_dir, &self.search_dirs)
    }
}

pub fn find_include_parent(
    include: &Include,
    file_dir: &Path,
    search_dirs: &[PathBuf],
) -> Option<PathBuf> {
    if include.is_quoted() && file_dir.join(include.path()).is_file() {
        return Some(file_dir.to_path_buf());
    }

    search_dirs
        .iter()
        .find(|dir| dir.join(include.path()).is_file())
        .cloned()
}
