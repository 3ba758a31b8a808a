//! Pairwise overlap relaxation.
//!
//! Bounded effort: dense trees may keep some overlap once the iteration cap
//! is reached.

use tracing::debug;

use crate::models::LayoutNode;
use crate::state::LayoutSettings;

fn min_distance(a: &LayoutNode, b: &LayoutNode, margin: f64) -> f64 {
    a.size + b.size + margin
}

pub fn is_colliding(a: &LayoutNode, b: &LayoutNode, margin: f64) -> bool {
    a.distance_to(b) < min_distance(a, b, margin)
}

/// Push `a` and `b` apart along the line joining them, half the overlap each.
/// Coincident nodes have no direction to move in and are left alone.
pub fn separate(a: &mut LayoutNode, b: &mut LayoutNode, margin: f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance == 0.0 {
        return;
    }

    let overlap = min_distance(a, b, margin) - distance;
    let shift_x = dx / distance * overlap * 0.5;
    let shift_y = dy / distance * overlap * 0.5;

    a.x -= shift_x;
    a.y -= shift_y;
    b.x += shift_x;
    b.y += shift_y;
}

/// Relax overlaps in place. Returns the number of passes made, at most
/// `settings.max_iterations`.
pub fn resolve_collisions(nodes: &mut [LayoutNode], settings: &LayoutSettings) -> usize {
    let margin = settings.collision_margin;

    for iteration in 0..settings.max_iterations {
        let mut collisions = 0usize;

        for i in 0..nodes.len() {
            let (head, tail) = nodes.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if is_colliding(a, b, margin) {
                    separate(a, b, margin);
                    collisions += 1;
                }
            }
        }

        if collisions == 0 {
            debug!("Collisions resolved after {} passes", iteration);
            return iteration + 1;
        }
    }

    debug!("Collision pass cap of {} reached", settings.max_iterations);
    settings.max_iterations
}
