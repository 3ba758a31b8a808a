//! Commit graph construction: child links, depths and branch estimation.
//!
//! The repository walk only hands us commits with parent ids. Everything the
//! layout engine relies on beyond that (children, depth from the root and a
//! best-effort branch name per commit) is derived here.

use std::collections::{HashSet, VecDeque};
use tracing::debug;

use crate::models::{BranchMap, Commit, CommitMap};

/// Build the commit map, link children and compute depths.
///
/// Parents outside the loaded window are kept in `parents` but never get a
/// child link, since they are not part of the map.
pub fn build_commit_graph(entries: Vec<Commit>) -> CommitMap {
    let mut commits = CommitMap::with_capacity(entries.len());
    for commit in entries {
        commits.insert(commit.id.clone(), commit);
    }

    let links: Vec<(String, String)> = commits
        .values()
        .flat_map(|commit| {
            commit
                .parents
                .iter()
                .map(move |parent| (parent.clone(), commit.id.clone()))
        })
        .collect();

    for (parent_id, child_id) in links {
        match commits.get_mut(&parent_id) {
            Some(parent) => parent.children.push(child_id),
            None => debug!("Parent {} of {} is outside the loaded history", parent_id, child_id),
        }
    }

    if let Some(root_id) = find_root_commit(&commits).map(|c| c.id.clone()) {
        calculate_depths(&mut commits, &root_id);
    }

    commits
}

/// First commit without parents, in map order.
pub fn find_root_commit(commits: &CommitMap) -> Option<&Commit> {
    commits.values().find(|commit| commit.is_root())
}

/// Commit with the smallest timestamp; the first one wins on ties.
pub fn find_oldest_commit(commits: &CommitMap) -> Option<&Commit> {
    commits.values().fold(None, |oldest: Option<&Commit>, commit| match oldest {
        Some(current) if current.timestamp <= commit.timestamp => Some(current),
        _ => Some(commit),
    })
}

/// Breadth-first depth assignment along child edges.
pub fn calculate_depths(commits: &mut CommitMap, root_id: &str) {
    let mut queue = VecDeque::from([(root_id.to_string(), 0u32)]);
    let mut visited = HashSet::new();

    while let Some((id, depth)) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let Some(commit) = commits.get_mut(&id) else {
            continue;
        };
        commit.depth = depth;

        for child_id in &commit.children {
            if !visited.contains(child_id) {
                queue.push_back((child_id.clone(), depth + 1));
            }
        }
    }
}

/// Assign every commit the branch whose first-parent chain reaches it first.
///
/// The main branch claims its history before any other branch, and a name
/// once assigned is never overwritten.
pub fn estimate_branches(commits: &mut CommitMap, branches: &BranchMap) {
    if let Some(main) = branches.values().find(|b| b.is_main) {
        mark_branch_commits(commits, &main.head, &main.name);
    }

    for branch in branches.values().filter(|b| !b.is_main) {
        mark_branch_commits(commits, &branch.head, &branch.name);
    }
}

/// Walk first parents from `head_id`, naming unnamed commits `branch_name`.
pub fn mark_branch_commits(commits: &mut CommitMap, head_id: &str, branch_name: &str) {
    let mut visited = HashSet::new();
    let mut next = Some(head_id.to_string());

    while let Some(id) = next.take() {
        if !visited.insert(id.clone()) {
            break;
        }

        let Some(commit) = commits.get_mut(&id) else {
            break;
        };

        if commit.branch_name.is_none() {
            commit.branch_name = Some(branch_name.to_string());
        }

        next = commit.parents.first().cloned();
    }
}
