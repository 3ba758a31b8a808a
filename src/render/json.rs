use crate::models::LayoutNode;

/// Positioned nodes as a pretty-printed JSON array, for other renderers.
pub fn export_json(nodes: &[LayoutNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(nodes)
}
