//! Pattern scanners that answer some queries straight from flattened text.

mod definitions;
mod todos;

pub use definitions::extract_definitions;
pub use todos::extract_todos;
