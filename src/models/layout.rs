use crate::models::Commit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual treatment of a commit in the bonsai.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Root,
    Trunk,
    Merge,
    Leaf,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Root => "root",
            NodeRole::Trunk => "trunk",
            NodeRole::Merge => "merge",
            NodeRole::Leaf => "leaf",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commit placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub role: NodeRole,
    pub x: f64,
    pub y: f64,
    /// Degrees clockwise from vertical; only leaves are drawn rotated
    pub angle: f64,
    pub size: f64,
    pub color: String,
    /// First parent, `None` for the root
    pub parent: Option<String>,
    pub commit: Commit,
}

impl LayoutNode {
    pub fn distance_to(&self, other: &LayoutNode) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
