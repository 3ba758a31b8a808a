pub mod error_handling;
pub mod graph;
pub mod repository;

pub use error_handling::*;
pub use graph::{build_commit_graph, estimate_branches};
pub use repository::*;
