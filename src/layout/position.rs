//! Breadth-first placement of commits around the root.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::models::{Commit, CommitMap, LayoutNode};
use crate::state::BonsaiConfig;

/// Seeded source of angle jitter.
///
/// Seeded from the root commit id so a given history always grows the same tree.
/// ChaCha8 keeps the stream fixed across `rand` releases, which `StdRng` does not.
pub struct AngleJitter {
    rng: ChaCha8Rng,
}

impl AngleJitter {
    pub fn from_id(id: &str) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(stable_seed(id)),
        }
    }

    /// Uniform offset in `[-width / 2, width / 2)`.
    pub fn centered(&mut self, width: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * width
    }
}

/// 64-bit FNV-1a; unlike `DefaultHasher` it is stable across Rust releases.
fn stable_seed(id: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    id.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// Branch-name predicate for "stays vertical" commits.
pub struct MainBranches {
    names: HashSet<String>,
}

impl MainBranches {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, commit: &Commit) -> bool {
        commit
            .branch_name
            .as_deref()
            .is_some_and(|name| self.names.contains(name))
    }
}

/// Angle in degrees from vertical for `child`, the `index`-th of `siblings` children of `parent`.
pub fn calculate_angle(
    child: &Commit,
    parent: &Commit,
    index: usize,
    siblings: usize,
    main: &MainBranches,
    config: &BonsaiConfig,
    jitter: &mut AngleJitter,
) -> f64 {
    let angles = &config.angle;

    if main.contains(child) {
        return jitter.centered(angles.main_branch_variation);
    }

    if siblings > 1 {
        let step = angles.angle_range / (siblings - 1) as f64;
        return -angles.angle_range / 2.0 + step * index as f64 + jitter.centered(angles.angle_variation);
    }

    let base = if parent.branch_name == child.branch_name {
        0.0
    } else {
        angles.single_child_base
    };
    base + jitter.centered(angles.single_child_variation)
}

/// Place every node reachable from `root_id`; others stay at the origin.
pub fn calculate_positions(
    nodes: &mut [LayoutNode],
    commits: &CommitMap,
    root_id: &str,
    main: &MainBranches,
    config: &BonsaiConfig,
    jitter: &mut AngleJitter,
) {
    let layout = &config.layout;
    let index: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();

    let Some(&root_index) = index.get(root_id) else {
        debug!("Root {} has no node, nothing to place", root_id);
        return;
    };
    nodes[root_index].x = layout.canvas_size / 2.0;
    nodes[root_index].y = layout.canvas_size - layout.margin;

    let mut queue = VecDeque::from([root_id.to_string()]);
    let mut visited = HashSet::new();

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let (Some(commit), Some(&node_index)) = (commits.get(&id), index.get(&id)) else {
            continue;
        };
        let (origin_x, origin_y) = (nodes[node_index].x, nodes[node_index].y);
        let siblings = commit.children.len();

        for (i, child_id) in commit.children.iter().enumerate() {
            let (Some(child), Some(&child_index)) = (commits.get(child_id), index.get(child_id)) else {
                continue;
            };

            // Grows per BFS level, not with the length of the path walked
            let distance = layout.base_distance + f64::from(child.depth) * layout.depth_factor;
            let angle = calculate_angle(child, commit, i, siblings, main, config, jitter);
            let radians = angle.to_radians();

            let child_node = &mut nodes[child_index];
            child_node.x = origin_x + distance * radians.sin() * layout.horizontal_scale;
            child_node.y = origin_y - distance * radians.cos() * layout.vertical_scale;
            child_node.angle = angle;

            queue.push_back(child_id.clone());
        }
    }
}
