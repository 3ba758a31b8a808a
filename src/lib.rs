//! # git-bonsai
//!
//! Grow a bonsai tree out of a Git history.
//!
//! The crate reads a bounded window of commits from a repository, lays the commit graph
//! out as a deterministic, tree-like picture and renders it as SVG. The same history
//! always grows the same tree.
//!
//! ## Architecture
//!
//! - [`git`] - repository reading and commit graph construction
//! - [`layout`] - the layout engine: roles, sizes, positions, overlap removal, canvas fit
//! - [`models`] - commits, branches and positioned layout nodes
//! - [`state`] - configuration
//! - [`render`] - SVG and JSON output
//!
//! ## Example
//!
//! ```rust,no_run
//! use git_bonsai::git::GitRepository;
//! use git_bonsai::layout::BonsaiLayout;
//! use git_bonsai::render::SvgRenderer;
//! use git_bonsai::state::BonsaiConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = BonsaiConfig::default();
//! let repo = GitRepository::discover(".")?;
//! let graph = repo.load_graph(&config.git)?;
//!
//! let nodes = BonsaiLayout::new(config.clone()).generate_layout(&graph.commits, &graph.branches)?;
//! let svg = SvgRenderer::new(&config).render(&nodes);
//! std::fs::write("bonsai.svg", svg)?;
//! # Ok(())
//! # }
//! ```

pub mod git;
pub mod layout;
pub mod models;
pub mod render;
pub mod state;

pub use layout::{BonsaiLayout, LayoutError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
