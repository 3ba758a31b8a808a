//! Final normalization into the square canvas.

use crate::models::LayoutNode;
use crate::state::LayoutSettings;

/// Axis-aligned bounds of node footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

/// Bounds of every node extended by its own size; `None` for no nodes.
pub fn calculate_bounding_box(nodes: &[LayoutNode]) -> Option<BoundingBox> {
    if nodes.is_empty() {
        return None;
    }

    let mut bbox = BoundingBox {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    for node in nodes {
        bbox.min_x = bbox.min_x.min(node.x - node.size);
        bbox.max_x = bbox.max_x.max(node.x + node.size);
        bbox.min_y = bbox.min_y.min(node.y - node.size);
        bbox.max_y = bbox.max_y.max(node.y + node.size);
    }

    Some(bbox)
}

/// Scale uniformly so the larger side spans the canvas minus both margins,
/// then center on the canvas. Sizes are scaled along with positions.
pub fn fit_to_canvas(nodes: &mut [LayoutNode], settings: &LayoutSettings) {
    let Some(bbox) = calculate_bounding_box(nodes) else {
        return;
    };

    let max_dimension = bbox.width().max(bbox.height());
    let available = settings.canvas_size - 2.0 * settings.margin;
    let scale = if max_dimension > 0.0 && max_dimension.is_finite() {
        available / max_dimension
    } else {
        1.0
    };

    let center = settings.canvas_size / 2.0;
    let (bbox_x, bbox_y) = bbox.center();

    for node in nodes.iter_mut() {
        node.x = center + (node.x - bbox_x) * scale;
        node.y = center + (node.y - bbox_y) * scale;
        node.size *= scale;
    }
}
