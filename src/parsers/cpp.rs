use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::common::read_source;
use super::sanitizer::strip_noise;
use super::{DirectiveSource, Include};
use crate::error::Result;

/// `#include "name.hpp"` or `#include <name.cpp>` at the start of a line.
///
/// Only horizontal whitespace may surround the `#` and the keyword. The name
/// is restricted to ASCII letters, digits, `_`, dots and path separators and
/// must end in a recognized extension.
static INCLUDE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^[\t\x0B\x0C ]*#[\t\x0B\x0C ]*include[\t\x0B\x0C ]*(?:"(?P<quoted>[A-Za-z0-9_./\\]+\.(?:hpp|cpp))"|<(?P<angled>[A-Za-z0-9_./\\]+\.(?:hpp|cpp))>)"#,
    )
    .expect("valid regex")
});

/// Include directive extractor for C++ sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct CppParser;

impl CppParser {
    pub fn new() -> Self {
        Self
    }

    /// Include directives of raw file content, in file order.
    pub fn extract_includes(&self, source: &str) -> Vec<Include> {
        scan_directives(&strip_noise(source))
    }
}

impl DirectiveSource for CppParser {
    fn includes(&self, file_path: &Path) -> Result<Vec<Include>> {
        let source = read_source(file_path)?;
        Ok(self.extract_includes(&source))
    }
}

/// Scans already sanitized text for include directives.
pub fn scan_directives(sanitized: &str) -> Vec<Include> {
    INCLUDE_DIRECTIVE
        .captures_iter(sanitized)
        .filter_map(|caps| {
            if let Some(quoted) = caps.name("quoted") {
                Some(Include::quoted(quoted.as_str()))
            } else {
                caps.name("angled").map(|angled| Include::angled(angled.as_str()))
            }
        })
        .collect()
}
