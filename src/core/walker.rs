use std::path::{Path, PathBuf};
use tracing::debug;

use super::graph::{
    DependencyTree, IncludeCounter, IncludeKey, IncludeStatus, InclusionChain, TreeEntry,
};
use super::IncludeResolver;
use crate::error::Result;
use crate::parsers::{DirectiveSource, Include};

/// Pending visit on the explicit work stack.
struct Frame {
    include: Include,
    base_dir: PathBuf,
    chain: InclusionChain,
    depth: usize,
    /// Child references count their edge, roots do not.
    counted: bool,
}

/// Expands a root file into its full include tree.
///
/// Traversal is depth first in source order. Each child gets its own copy
/// of the inclusion chain, so a cycle is only detected when a key repeats on
/// the path from the root down to the current node.
pub struct DependencyWalker<'a> {
    resolver: &'a IncludeResolver,
    directives: &'a dyn DirectiveSource,
}

impl<'a> DependencyWalker<'a> {
    pub fn new(resolver: &'a IncludeResolver, directives: &'a dyn DirectiveSource) -> Self {
        Self {
            resolver,
            directives,
        }
    }

    /// Walks everything reachable from `root`, resolved relative to
    /// `base_dir`, adding one count per traversed child edge to `counter`.
    ///
    /// Fails only when a resolved file cannot be read.
    pub fn walk(
        &self,
        root: &Include,
        base_dir: &Path,
        counter: &mut IncludeCounter,
    ) -> Result<DependencyTree> {
        let mut entries = Vec::new();
        let mut stack = vec![Frame {
            include: root.clone(),
            base_dir: base_dir.to_path_buf(),
            chain: InclusionChain::new(),
            depth: 0,
            counted: false,
        }];

        while let Some(frame) = stack.pop() {
            let Frame {
                include,
                base_dir,
                mut chain,
                depth,
                counted,
            } = frame;

            let parent = self.resolver.resolve(&include, &base_dir);
            let key = IncludeKey::new(include.path(), parent.as_deref());
            if counted {
                counter.increment(key.clone());
            }

            let status = if !chain.insert(key) {
                IncludeStatus::Cycle
            } else if parent.is_none() {
                IncludeStatus::Unresolved
            } else {
                IncludeStatus::Resolved
            };

            entries.push(TreeEntry {
                include: include.clone(),
                depth,
                base_dir,
                parent: parent.clone(),
                status,
            });

            let (IncludeStatus::Resolved, Some(parent)) = (status, parent) else {
                continue;
            };

            let file_path = parent.join(include.path());
            let file_dir = file_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or(parent);
            let children = self.directives.includes(&file_path)?;
            debug!(
                "{} includes {} file(s)",
                file_path.display(),
                children.len()
            );

            // Reversed so the first directive is popped first.
            for child in children.into_iter().rev() {
                stack.push(Frame {
                    include: child,
                    base_dir: file_dir.clone(),
                    chain: chain.clone(),
                    depth: depth + 1,
                    counted: true,
                });
            }
        }

        Ok(DependencyTree {
            root: root.path().to_path_buf(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Directive source backed by a fixed map, no file reads.
    struct FixedSource(HashMap<PathBuf, Vec<Include>>);

    impl DirectiveSource for FixedSource {
        fn includes(&self, file_path: &Path) -> Result<Vec<Include>> {
            Ok(self.0.get(file_path).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn self_include_stops_on_second_visit() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::write(root.join("a.hpp"), "").unwrap();

        let source = FixedSource(HashMap::from([(
            root.join("a.hpp"),
            vec![Include::quoted("a.hpp")],
        )]));
        let resolver = IncludeResolver::default();
        let walker = DependencyWalker::new(&resolver, &source);

        let mut counter = IncludeCounter::new();
        let tree = walker
            .walk(&Include::quoted("a.hpp"), &root, &mut counter)
            .unwrap();

        let statuses: Vec<_> = tree.entries.iter().map(|e| (e.depth, e.status)).collect();
        assert_eq!(
            statuses,
            vec![(0, IncludeStatus::Resolved), (1, IncludeStatus::Cycle)]
        );
        assert_eq!(counter.get("a.hpp", Some(root.as_path())), Some(1));
        assert_eq!(tree.resolved_parent(), Some(root.as_path()));
    }

    #[test]
    fn root_itself_is_not_counted() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::write(root.join("lonely.cpp"), "").unwrap();

        let source = FixedSource(HashMap::new());
        let resolver = IncludeResolver::default();
        let walker = DependencyWalker::new(&resolver, &source);

        let mut counter = IncludeCounter::new();
        let tree = walker
            .walk(&Include::quoted("lonely.cpp"), &root, &mut counter)
            .unwrap();

        assert_eq!(tree.entries.len(), 1);
        assert!(counter.is_empty());
    }
}
