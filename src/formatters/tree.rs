//! Plain-text report.
//!
//! One indented block per root file followed by the inclusion histogram:
//!
//! ```text
//! a.hpp
//!   b.hpp
//!     a.hpp (cycle)
//!   lib.hpp (unresolved)
//!   vendor.hpp [/opt/include]
//!
//! a.hpp 1
//! b.hpp 1
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::{IncludeReport, IncludeStatus, TreeEntry};
use crate::error::Result;

pub struct TreeFormatter {
    /// Spaces per depth level.
    indent: usize,
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn format_to_file(&self, report: &IncludeReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_report(report))?;
        Ok(())
    }

    pub fn write_report<W: Write>(&self, report: &IncludeReport, out: &mut W) -> Result<()> {
        out.write_all(self.format_report(report).as_bytes())?;
        Ok(())
    }

    pub fn format_report(&self, report: &IncludeReport) -> String {
        let mut output = String::new();

        for tree in &report.trees {
            for entry in &tree.entries {
                output.push_str(&self.format_entry(entry));
                output.push('\n');
            }
        }

        output.push('\n');

        for (key, count) in report.sorted_counts() {
            output.push_str(&format!("{} {}\n", key.path.display(), count));
        }

        output
    }

    fn format_entry(&self, entry: &TreeEntry) -> String {
        let mut line = " ".repeat(entry.depth * self.indent);
        line.push_str(&entry.include.path().display().to_string());

        if entry.found_elsewhere() {
            if let Some(parent) = &entry.parent {
                line.push_str(&format!(" [{}]", parent.display()));
            }
        }

        match entry.status {
            IncludeStatus::Resolved => {}
            IncludeStatus::Cycle => line.push_str(" (cycle)"),
            IncludeStatus::Unresolved => line.push_str(" (unresolved)"),
        }

        line
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}
