use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::parsers::Include;

/// Identity of a traversal edge: the referenced path plus the directory it
/// resolved in. Unresolved references carry an empty directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncludeKey {
    pub path: PathBuf,
    pub parent: PathBuf,
}

impl IncludeKey {
    pub fn new(path: impl Into<PathBuf>, parent: Option<&Path>) -> Self {
        Self {
            path: path.into(),
            parent: parent.map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.parent.as_os_str().is_empty()
    }
}

/// Run-wide count of how often each resolved edge was traversed as a child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeCounter {
    counts: BTreeMap<IncludeKey, u64>,
}

impl IncludeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `key` is present, leaving an existing count untouched.
    pub fn ensure(&mut self, key: IncludeKey) {
        self.counts.entry(key).or_insert(0);
    }

    pub fn increment(&mut self, key: IncludeKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: IncludeCounter) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }

    pub fn get(&self, path: impl AsRef<Path>, parent: Option<&Path>) -> Option<u64> {
        self.counts
            .get(&IncludeKey::new(path.as_ref(), parent))
            .copied()
    }

    /// Total count of every entry whose referenced path is `path`, whatever
    /// directory it resolved in.
    pub fn total_for(&self, path: impl AsRef<Path>) -> u64 {
        let path = path.as_ref();
        self.counts
            .iter()
            .filter(|(key, _)| key.path == path)
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries by descending count, ties by ascending key.
    pub fn sorted(&self) -> Vec<(&IncludeKey, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, c)| (k, *c)).collect();
        // BTreeMap iteration is already key ordered, the stable sort keeps it
        // within equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Keys on the path from a root down to the node being expanded.
///
/// Each child branch works on its own clone, so siblings never see each
/// other's links.
#[derive(Debug, Clone, Default)]
pub struct InclusionChain {
    links: HashSet<IncludeKey>,
}

impl InclusionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`, returning false when it was already on the chain.
    pub fn insert(&mut self, key: IncludeKey) -> bool {
        self.links.insert(key)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IncludeStatus {
    Resolved,
    Unresolved,
    Cycle,
}

/// One line of a dependency tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub include: Include,
    pub depth: usize,
    /// Directory the reference was resolved relative to.
    pub base_dir: PathBuf,
    /// Directory the referenced file was found in.
    pub parent: Option<PathBuf>,
    pub status: IncludeStatus,
}

impl TreeEntry {
    /// True when the file came from somewhere other than `base_dir`.
    pub fn found_elsewhere(&self) -> bool {
        self.parent
            .as_deref()
            .map(|parent| parent != self.base_dir)
            .unwrap_or(false)
    }

    /// Full path of the referenced file, when it was found.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.parent
            .as_ref()
            .map(|parent| parent.join(self.include.path()))
    }
}

/// Pre-order listing of everything reachable from one root file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyTree {
    /// Root path relative to the project root.
    pub root: PathBuf,
    pub entries: Vec<TreeEntry>,
}

impl DependencyTree {
    /// Where the root itself resolved.
    pub fn resolved_parent(&self) -> Option<&Path> {
        self.entries.first().and_then(|entry| entry.parent.as_deref())
    }

    pub fn cycles(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == IncludeStatus::Cycle)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == IncludeStatus::Unresolved)
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct IncludeReport {
    pub project_root: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub trees: Vec<DependencyTree>,
    pub counter: IncludeCounter,
}

impl IncludeReport {
    pub fn sorted_counts(&self) -> Vec<(&IncludeKey, u64)> {
        self.counter.sorted()
    }

    pub fn tree(&self, root: impl AsRef<Path>) -> Option<&DependencyTree> {
        let root = root.as_ref();
        self.trees.iter().find(|tree| tree.root == root)
    }

    /// Distinct include relation over every file reached by the run.
    pub fn include_graph(&self) -> IncludeGraph {
        let mut builder = GraphBuilder::new();
        for tree in &self.trees {
            builder.add_tree(tree);
        }
        builder.build()
    }
}

/// Distinct file-to-file include relation between resolved files.
pub type IncludeGraph = Graph<PathBuf, (), Directed>;

pub struct GraphBuilder {
    graph: IncludeGraph,
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn add_file(&mut self, file: PathBuf) -> NodeIndex {
        if let Some(index) = self.node_map.get(&file) {
            return *index;
        }
        let index = self.graph.add_node(file.clone());
        self.node_map.insert(file, index);
        index
    }

    /// Records `from` including `to`. Repeated edges are stored once.
    pub fn add_include(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, ());
    }

    /// Adds every parent/child pair found in `tree`.
    pub fn add_tree(&mut self, tree: &DependencyTree) {
        // ancestors[d] is the file node at depth d on the current branch.
        let mut ancestors: Vec<Option<NodeIndex>> = Vec::new();

        for entry in &tree.entries {
            ancestors.truncate(entry.depth);
            let node = entry.file_path().map(|file| self.add_file(file));

            if let (Some(Some(from)), Some(to)) = (ancestors.last().copied(), node) {
                self.add_include(from, to);
            }

            let expandable = entry.status == IncludeStatus::Resolved;
            ancestors.push(if expandable { node } else { None });
        }
    }

    pub fn build(self) -> IncludeGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
