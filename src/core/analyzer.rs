use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::graph::{DependencyTree, IncludeCounter, IncludeKey, IncludeReport};
use super::{DependencyWalker, FileScanner, IncludeResolver};
use crate::error::{Error, Result};
use crate::parsers::{cache::DirectiveCache, cpp::CppParser, DirectiveSource, Include};

#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    include_dirs: Vec<PathBuf>,
    jobs: usize,
}

impl AnalyzerOptions {
    pub fn new() -> Self {
        Self {
            include_dirs: Vec::new(),
            jobs: 1,
        }
    }

    /// Search directories, consulted in the given order.
    pub fn with_include_dirs(mut self, include_dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = include_dirs;
        self
    }

    /// Number of roots walked concurrently. `0` and `1` both mean sequential.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CodebaseAnalyzer {
    file_scanner: FileScanner,
    resolver: IncludeResolver,
    directive_cache: DirectiveCache<CppParser>,
    jobs: usize,
}

impl CodebaseAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            file_scanner: FileScanner::new(),
            resolver: IncludeResolver::new(options.include_dirs),
            directive_cache: DirectiveCache::new(CppParser::new()),
            jobs: options.jobs,
        }
    }

    pub fn analyze(&self, root_path: &Path) -> Result<IncludeReport> {
        let project_root = validate_root(root_path)?;
        for dir in self.resolver.search_dirs() {
            if !dir.is_dir() {
                warn!("Include directory {} is not a directory", dir.display());
            }
        }

        let start = Instant::now();
        self.directive_cache.clear();
        let files = self.file_scanner.scan_directory(&project_root)?;
        info!(
            "Found {} source files under {}",
            files.len(),
            project_root.display()
        );

        let mut counter = IncludeCounter::new();
        for file in &files {
            counter.ensure(IncludeKey::new(
                file.relative_path.clone(),
                Some(&project_root),
            ));
        }

        let roots: Vec<Include> = files
            .iter()
            .map(|file| Include::quoted(file.relative_path.clone()))
            .collect();
        let results = self.walk_roots(&roots, &project_root)?;

        let mut trees = Vec::with_capacity(results.len());
        for (tree, local) in results {
            counter.merge(local);
            trees.push(tree);
        }

        let stats = self.directive_cache.stats();
        info!(
            "Walked {} roots in {:.2}s ({} files read, {} counted edges)",
            trees.len(),
            start.elapsed().as_secs_f64(),
            stats.misses,
            counter.len()
        );

        Ok(IncludeReport {
            project_root,
            include_dirs: self.resolver.search_dirs().to_vec(),
            trees,
            counter,
        })
    }

    /// Walks every root with its own counter. Results keep root order
    /// whether or not the walks ran in parallel.
    fn walk_roots(
        &self,
        roots: &[Include],
        project_root: &Path,
    ) -> Result<Vec<(DependencyTree, IncludeCounter)>> {
        let directives: &dyn DirectiveSource = &self.directive_cache;
        let walker = DependencyWalker::new(&self.resolver, directives);
        let walk_one = |root: &Include| -> Result<(DependencyTree, IncludeCounter)> {
            debug!("Walking {}", root.path().display());
            let mut local = IncludeCounter::new();
            let tree = walker.walk(root, project_root, &mut local)?;
            Ok((tree, local))
        };

        if self.jobs <= 1 {
            return roots.iter().map(walk_one).collect();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool.install(|| roots.par_iter().map(walk_one).collect()),
            Err(err) => {
                warn!("Failed to start {} workers, walking sequentially: {err}", self.jobs);
                roots.iter().map(walk_one).collect()
            }
        }
    }
}

impl Default for CodebaseAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

/// The project root must be an existing directory. Returns its canonical
/// form so every resolved path shares one spelling.
fn validate_root(root_path: &Path) -> Result<PathBuf> {
    if !root_path.exists() {
        return Err(Error::InvalidArgument {
            path: root_path.to_path_buf(),
            reason: "path does not exist".to_string(),
        });
    }
    if !root_path.is_dir() {
        return Err(Error::InvalidArgument {
            path: root_path.to_path_buf(),
            reason: "path is not a directory".to_string(),
        });
    }
    Ok(root_path.canonicalize()?)
}
