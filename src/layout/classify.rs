//! Role and size assignment.

use std::collections::{HashSet, VecDeque};

use crate::models::{BranchMap, Commit, CommitMap, LayoutNode, NodeRole};
use crate::state::BonsaiConfig;

/// Decide the visual role of a commit. The first matching rule wins.
pub fn classify(commit: &Commit, branch_heads: &HashSet<&str>, commits: &CommitMap) -> NodeRole {
    if commit.parents.is_empty() {
        return NodeRole::Root;
    }
    if commit.parents.len() > 1 {
        return NodeRole::Merge;
    }
    if branch_heads.contains(commit.id.as_str()) {
        return NodeRole::Leaf;
    }
    // Last commit of a branch that is about to be merged
    if let [only_child] = commit.children.as_slice() {
        if commits.get(only_child).is_some_and(|child| child.is_merge) {
            return NodeRole::Leaf;
        }
    }
    NodeRole::Trunk
}

/// Size of a node, before canvas scaling.
pub fn node_size(commit: &Commit, commits: &CommitMap, role: NodeRole, config: &BonsaiConfig) -> f64 {
    let sizes = &config.node_size;
    let layout = &config.layout;

    match role {
        NodeRole::Root => sizes.root,
        NodeRole::Trunk => sizes.trunk,
        NodeRole::Merge => {
            let grown = sizes.merge_base + commit.parents.len() as f64 * sizes.merge_factor;
            grown.min(sizes.merge_max)
        }
        NodeRole::Leaf => match merged_side_branch(commit, commits) {
            Some(start) => {
                let count = count_commits_in_branch(start, commits, layout.max_branch_walk);
                let bonus = (count as f64 * layout.size_multiplier).min(layout.max_leaf_bonus);
                layout.base_leaf_size + bonus
            }
            None => layout.base_leaf_size,
        },
    }
}

/// Where the side branch feeding a leaf starts, if the leaf has one.
///
/// A leaf that is itself a merge measures its second parent. A leaf whose only
/// child merges it in as second parent is the tip of that side branch and
/// measures itself.
fn merged_side_branch<'a>(commit: &'a Commit, commits: &'a CommitMap) -> Option<&'a str> {
    if commit.is_merge {
        return commit.parents.get(1).map(String::as_str);
    }

    let [only_child] = commit.children.as_slice() else {
        return None;
    };
    let child = commits.get(only_child)?;
    if child.is_merge && child.parents.get(1) == Some(&commit.id) {
        Some(commit.id.as_str())
    } else {
        None
    }
}

/// Count commits along the first-parent chain starting at `start`.
///
/// The walk stops after a merge commit (which is counted), at a commit
/// outside the map, or once `cap` commits have been counted.
pub fn count_commits_in_branch(start: &str, commits: &CommitMap, cap: usize) -> usize {
    let mut count = 0;
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);

    while count < cap {
        let Some(id) = queue.pop_front() else {
            break;
        };
        if !visited.insert(id) {
            continue;
        }
        let Some(commit) = commits.get(id) else {
            continue;
        };

        count += 1;

        if !commit.is_merge {
            if let Some(parent) = commit.first_parent() {
                queue.push_back(parent);
            }
        }
    }

    count
}

/// One classified, sized node per commit, in map order.
pub fn create_nodes(commits: &CommitMap, branches: &BranchMap, config: &BonsaiConfig) -> Vec<LayoutNode> {
    let branch_heads: HashSet<&str> = branches.values().map(|b| b.head.as_str()).collect();

    commits
        .values()
        .map(|commit| {
            let role = classify(commit, &branch_heads, commits);
            let size = node_size(commit, commits, role, config);

            LayoutNode {
                id: commit.id.clone(),
                role,
                x: 0.0,
                y: 0.0,
                angle: 0.0,
                size,
                color: config.colors.for_role(role).to_string(),
                parent: commit.first_parent().map(str::to_string),
                commit: commit.clone(),
            }
        })
        .collect()
}
