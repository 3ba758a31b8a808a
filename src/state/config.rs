use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::NodeRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonsaiConfig {
    pub git: GitSettings,
    pub layout: LayoutSettings,
    pub node_size: NodeSizeSettings,
    pub angle: AngleSettings,
    pub branch_width: BranchWidthSettings,
    pub pot: PotSettings,
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSettings {
    pub max_commits: usize,
    pub main_branch_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub canvas_size: f64,
    pub margin: f64,
    pub base_distance: f64,
    pub depth_factor: f64,
    pub horizontal_scale: f64, // stretches the crown sideways
    pub vertical_scale: f64,   // keeps it flat
    pub base_leaf_size: f64,
    pub size_multiplier: f64,
    pub max_leaf_bonus: f64,
    pub max_branch_walk: usize,
    pub max_iterations: usize,
    pub collision_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizeSettings {
    pub root: f64,
    pub trunk: f64,
    pub merge_base: f64,
    pub merge_factor: f64,
    pub merge_max: f64,
}

/// All variations are full widths: a variation of 20 means +/-10 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleSettings {
    pub main_branch_variation: f64,
    pub angle_range: f64,
    pub angle_variation: f64,
    pub single_child_base: f64,
    pub single_child_variation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchWidthSettings {
    pub main: f64,
    pub other: f64,
    pub max: f64,
    pub depth_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotSettings {
    pub top_width: f64,
    pub bottom_width: f64,
    pub height: f64,
    pub offset_y: f64,
    pub rim_height: f64,
    pub soil_height: f64,
    pub soil_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub root: String,
    pub trunk: String,
    pub merge: String,
    pub leaf: String,
    pub leaf_stroke: String,
    pub pot_body: String,
    pub pot_stroke: String,
    pub pot_rim: String,
    pub soil: String,
    pub background: String,
}

impl Default for BonsaiConfig {
    fn default() -> Self {
        Self {
            git: GitSettings::default(),
            layout: LayoutSettings::default(),
            node_size: NodeSizeSettings::default(),
            angle: AngleSettings::default(),
            branch_width: BranchWidthSettings::default(),
            pot: PotSettings::default(),
            colors: ColorSettings::default(),
        }
    }
}

impl BonsaiConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("git-bonsai").join("config.json"))
    }

    /// Load the user config, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => warn!("Ignoring config at {:?}: {:#}", config_path, e),
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_main_branch_name(&self, name: &str) -> bool {
        self.git.main_branch_names.iter().any(|n| n == name)
    }
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            max_commits: 30,
            main_branch_names: vec!["main".to_string(), "master".to_string()],
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            canvas_size: 800.0,
            margin: 50.0,
            base_distance: 50.0,
            depth_factor: 2.0,
            horizontal_scale: 3.0,
            vertical_scale: 0.3,
            base_leaf_size: 50.0,
            size_multiplier: 10.0,
            max_leaf_bonus: 50.0,
            max_branch_walk: 100,
            max_iterations: 50,
            collision_margin: 5.0,
        }
    }
}

impl Default for NodeSizeSettings {
    fn default() -> Self {
        Self {
            root: 15.0,
            trunk: 10.0,
            merge_base: 10.0,
            merge_factor: 5.0,
            merge_max: 20.0,
        }
    }
}

impl Default for AngleSettings {
    fn default() -> Self {
        Self {
            main_branch_variation: 20.0,
            angle_range: 170.0,
            angle_variation: 25.0,
            single_child_base: 75.0,
            single_child_variation: 30.0,
        }
    }
}

impl Default for BranchWidthSettings {
    fn default() -> Self {
        Self {
            main: 16.0,
            other: 10.0,
            max: 25.0,
            depth_reduction: 10.0,
        }
    }
}

impl Default for PotSettings {
    fn default() -> Self {
        Self {
            top_width: 240.0,
            bottom_width: 180.0,
            height: 70.0,
            offset_y: 10.0,
            rim_height: 8.0,
            soil_height: 12.0,
            soil_margin: 10.0,
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            root: "#654321".to_string(),
            trunk: "#8B4513".to_string(),
            merge: "#654321".to_string(),
            leaf: "#228B22".to_string(),
            leaf_stroke: "#006400".to_string(),
            pot_body: "#8B4513".to_string(),
            pot_stroke: "#654321".to_string(),
            pot_rim: "#A0522D".to_string(),
            soil: "#3E2723".to_string(),
            background: "#FFFEF8".to_string(),
        }
    }
}

impl ColorSettings {
    pub fn for_role(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Root => &self.root,
            NodeRole::Trunk => &self.trunk,
            NodeRole::Merge => &self.merge,
            NodeRole::Leaf => &self.leaf,
        }
    }
}
