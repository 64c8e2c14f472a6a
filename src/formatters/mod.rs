pub mod json_compact;
pub mod tree;

pub use json_compact::JsonCompactFormatter;
pub use tree::TreeFormatter;
