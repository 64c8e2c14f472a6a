pub mod cache;
pub mod common;
pub mod cpp;
pub mod sanitizer;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Extension of header files.
pub const HEADER_EXTENSION: &str = "hpp";
/// Extension of implementation files.
pub const SOURCE_EXTENSION: &str = "cpp";

/// Returns true when `path` carries one of the two recognized extensions.
pub fn is_recognized(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == HEADER_EXTENSION || ext == SOURCE_EXTENSION)
        .unwrap_or(false)
}

/// Syntactic form of the filename in an include directive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Delimiter {
    /// `#include "name.hpp"`
    Quoted,
    /// `#include <name.hpp>`
    Angled,
}

/// A single include directive as written in a source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Include {
    path: PathBuf,
    delimiter: Delimiter,
}

impl Include {
    pub fn new(path: impl Into<PathBuf>, delimiter: Delimiter) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn quoted(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Delimiter::Quoted)
    }

    pub fn angled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Delimiter::Angled)
    }

    /// The referenced path, relative to whichever directory resolves it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_quoted(&self) -> bool {
        self.delimiter == Delimiter::Quoted
    }
}

/// Anything able to list the include directives of a file on disk.
pub trait DirectiveSource: Send + Sync {
    /// Include directives of `file_path`, in file order.
    fn includes(&self, file_path: &Path) -> Result<Vec<Include>>;
}
