//! # INCDEP
//!
//! Include dependency analysis for C++ source trees.
//!
//! INCDEP walks every `.hpp`/`.cpp` file under a project root, follows its
//! `#include` directives with the preprocessor's quote-then-search-path rules
//! and reports an indented dependency tree per file together with a histogram
//! of how often each resolved header is pulled in.
//!
//! ## Output Formats
//!
//! - **Tree**: indented plain text followed by the `path count` table
//! - **JSON-Compact**: minimal token format for programmatic consumption

pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use error::{Error, Result};
