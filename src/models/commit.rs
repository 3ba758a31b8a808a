use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Commits keyed by id, in the order the repository walk produced them.
pub type CommitMap = IndexMap<String, Commit>;

/// Branches keyed by name.
pub type BranchMap = IndexMap<String, Branch>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub message: String,
    pub author: String,
    pub timestamp: i64,
    pub is_merge: bool,
    pub branch_name: Option<String>,
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub head: String,
    pub is_main: bool,
}

impl Commit {
    pub fn new(
        id: impl Into<String>,
        parents: Vec<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        let message = message.into();
        // Only the summary line is kept for display
        let message = message.lines().next().unwrap_or("").to_string();
        let is_merge = parents.len() > 1;

        Commit {
            id: id.into(),
            parents,
            children: Vec::new(),
            message,
            author: author.into(),
            timestamp,
            is_merge,
            branch_name: None,
            depth: 0,
        }
    }

    pub fn from_git2(commit: &git2::Commit) -> Self {
        let parents = commit.parent_ids().map(|id| id.to_string()).collect();
        Commit::new(
            commit.id().to_string(),
            parents,
            commit.message().unwrap_or(""),
            commit.author().name().unwrap_or(""),
            commit.author().when().seconds(),
        )
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// First seven characters of the id.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl Branch {
    pub fn new(name: impl Into<String>, head: impl Into<String>, is_main: bool) -> Self {
        Branch {
            name: name.into(),
            head: head.into(),
            is_main,
        }
    }
}
