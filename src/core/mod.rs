pub mod analyzer;
pub mod graph;
pub mod resolver;
pub mod scanner;
pub mod walker;

pub use analyzer::{AnalyzerOptions, CodebaseAnalyzer};
pub use graph::{
    DependencyTree, GraphBuilder, IncludeCounter, IncludeGraph, IncludeKey, IncludeReport,
    IncludeStatus, InclusionChain, TreeEntry,
};
pub use resolver::IncludeResolver;
pub use scanner::{FileInfo, FileKind, FileScanner};
pub use walker::DependencyWalker;
