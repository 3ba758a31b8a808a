use crate::models::{BranchMap, CommitMap};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub path: PathBuf,
    pub name: String,
    pub head_branch: Option<String>,
}

/// Everything the layout engine needs from a repository.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    pub commits: CommitMap,
    pub branches: BranchMap,
}

impl RepositoryInfo {
    pub fn from_repo(repo: &git2::Repository) -> Self {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string();

        let head_branch = repo
            .head()
            .ok()
            .and_then(|head| head.shorthand().map(|s| s.to_string()));

        RepositoryInfo {
            path,
            name,
            head_branch,
        }
    }
}

impl CommitGraph {
    pub fn main_branch(&self) -> Option<&crate::models::Branch> {
        self.branches.values().find(|b| b.is_main)
    }
}
