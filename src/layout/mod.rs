//! The bonsai layout engine.
//!
//! A layout runs as a fixed pipeline over a frozen commit snapshot:
//!
//! 1. [`classify`] gives every commit a [`NodeRole`] and a size.
//! 2. [`position`] places commits breadth-first from the root, fanning
//!    branches out with seeded jitter.
//! 3. [`collision`] pushes overlapping nodes apart.
//! 4. [`fit`] scales and centers everything into the square canvas.
//!
//! The same commits and branches always produce the same layout: the only
//! randomness is drawn from a generator seeded by the root commit id.

pub mod classify;
pub mod collision;
pub mod fit;
pub mod position;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::git::graph::{find_oldest_commit, find_root_commit};
use crate::models::{BranchMap, CommitMap, LayoutNode, NodeRole};
use crate::state::BonsaiConfig;
use position::{AngleJitter, MainBranches};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("no commits to lay out")]
    NoCommits,

    #[error("canvas of size {canvas_size} leaves no room inside a margin of {margin}")]
    InvalidCanvas { canvas_size: f64, margin: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct BonsaiLayout {
    config: BonsaiConfig,
}

impl BonsaiLayout {
    pub fn new(config: BonsaiConfig) -> Self {
        Self { config }
    }

    /// Lay out `commits` as a bonsai.
    ///
    /// Fails only when there is nothing to lay out or the canvas settings are
    /// unusable. A history without a parentless commit (a shallow window)
    /// grows from its oldest commit instead.
    pub fn generate_layout(
        &self,
        commits: &CommitMap,
        branches: &BranchMap,
    ) -> Result<Vec<LayoutNode>, LayoutError> {
        let settings = &self.config.layout;
        if settings.canvas_size <= 2.0 * settings.margin {
            return Err(LayoutError::InvalidCanvas {
                canvas_size: settings.canvas_size,
                margin: settings.margin,
            });
        }

        let (root, pseudo_root) = match find_root_commit(commits) {
            Some(root) => (root, false),
            None => {
                let oldest = find_oldest_commit(commits).ok_or(LayoutError::NoCommits)?;
                warn!("No root commit found, growing from oldest commit {}", oldest.short_id());
                (oldest, true)
            }
        };

        let mut jitter = AngleJitter::from_id(&root.id);
        let mut nodes = classify::create_nodes(commits, branches, &self.config);

        if pseudo_root {
            if let Some(node) = nodes.iter_mut().find(|n| n.id == root.id) {
                node.role = NodeRole::Root;
                node.color = self.config.colors.for_role(NodeRole::Root).to_string();
            }
        }

        let main = MainBranches::new(
            self.config
                .git
                .main_branch_names
                .iter()
                .cloned()
                .chain(branches.values().filter(|b| b.is_main).map(|b| b.name.clone())),
        );

        position::calculate_positions(&mut nodes, commits, &root.id, &main, &self.config, &mut jitter);
        let passes = collision::resolve_collisions(&mut nodes, settings);
        fit::fit_to_canvas(&mut nodes, settings);

        debug!("Collision relaxation used {} passes", passes);
        info!("Laid out {} nodes from root {}", nodes.len(), root.short_id());

        Ok(nodes)
    }
}
