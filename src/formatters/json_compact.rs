use petgraph::visit::EdgeRef;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::{IncludeReport, IncludeStatus};
use crate::error::Result;

/// JSON formatter with interned directories and positional rows.
///
/// Tree rows are `[depth, path, dir_id, status]` and count rows are
/// `[path, dir_id, count]`, where `dir_id` indexes `dirs` and is `null`
/// for unresolved references.
pub struct JsonCompactFormatter {
    /// Also emit the distinct file-to-file include graph.
    include_graph: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self {
            include_graph: true,
        }
    }

    pub fn with_include_graph(mut self, include_graph: bool) -> Self {
        self.include_graph = include_graph;
        self
    }

    pub fn format_to_file(&self, report: &IncludeReport, output_path: &Path) -> Result<()> {
        let json_content = self.format_report(report)?;
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn write_report<W: Write>(&self, report: &IncludeReport, out: &mut W) -> Result<()> {
        out.write_all(self.format_report(report)?.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }

    pub fn format_report(&self, report: &IncludeReport) -> Result<String> {
        let mut dirs = DirTable::default();

        let roots: Vec<Value> = report
            .trees
            .iter()
            .map(|tree| {
                let rows: Vec<Value> = tree
                    .entries
                    .iter()
                    .map(|entry| {
                        let dir = entry.parent.as_deref().map(|dir| dirs.intern(dir));
                        json!([
                            entry.depth,
                            entry.include.path().to_string_lossy(),
                            dir,
                            status_code(entry.status)
                        ])
                    })
                    .collect();
                json!({
                    "root": tree.root.to_string_lossy(),
                    "tree": rows
                })
            })
            .collect();

        let counts: Vec<Value> = report
            .sorted_counts()
            .into_iter()
            .map(|(key, count)| {
                let dir = key.is_resolved().then(|| dirs.intern(&key.parent));
                json!([key.path.to_string_lossy(), dir, count])
            })
            .collect();

        let mut output = json!({
            "meta": {
                "roots": report.trees.len(),
                "entries": report.counter.len(),
                "format": "compact"
            },
            "dirs": dirs.into_strings(),
            "roots": roots,
            "counts": counts
        });

        if self.include_graph {
            let graph = report.include_graph();
            let files: Vec<String> = graph
                .node_weights()
                .map(|file| display_path(file, &report.project_root))
                .collect();
            let edges: Vec<Value> = graph
                .edge_references()
                .map(|edge| json!([edge.source().index(), edge.target().index()]))
                .collect();
            output["files"] = json!(files);
            output["edges"] = json!(edges);
        }

        Ok(serde_json::to_string(&output)?)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn status_code(status: IncludeStatus) -> u8 {
    match status {
        IncludeStatus::Resolved => 0,
        IncludeStatus::Unresolved => 1,
        IncludeStatus::Cycle => 2,
    }
}

/// Files inside the project are shown relative to it.
fn display_path(file: &Path, project_root: &Path) -> String {
    file.strip_prefix(project_root)
        .unwrap_or(file)
        .to_string_lossy()
        .into_owned()
}

/// Directory ids in first-seen order.
#[derive(Default)]
struct DirTable {
    ids: HashMap<PathBuf, usize>,
    dirs: Vec<PathBuf>,
}

impl DirTable {
    fn intern(&mut self, dir: &Path) -> usize {
        if let Some(id) = self.ids.get(dir) {
            return *id;
        }
        let id = self.dirs.len();
        self.ids.insert(dir.to_path_buf(), id);
        self.dirs.push(dir.to_path_buf());
        id
    }

    fn into_strings(self) -> Vec<String> {
        self.dirs
            .into_iter()
            .map(|dir| dir.to_string_lossy().into_owned())
            .collect()
    }
}
