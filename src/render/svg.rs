//! SVG renderer - turns positioned layout nodes into an SVG document.
//!
//! Pure string building. Draws back-to-front: pot, branches, knots, leaves.

use std::collections::HashMap;

use crate::models::{LayoutNode, NodeRole};
use crate::state::BonsaiConfig;

const TOOLTIP_MESSAGE_CHARS: usize = 50;

pub struct SvgRenderer<'a> {
    config: &'a BonsaiConfig,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(config: &'a BonsaiConfig) -> Self {
        Self { config }
    }

    /// Render the whole bonsai as a standalone SVG document.
    pub fn render(&self, nodes: &[LayoutNode]) -> String {
        let size = self.config.layout.canvas_size;
        let by_id: HashMap<&str, &LayoutNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut parts: Vec<String> = Vec::new();
        parts.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = fmt_num(size)
        ));
        parts.push(format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.config.colors.background
        ));
        parts.push(r#"<g id="viewport">"#.to_string());

        parts.push(r#"<g id="root">"#.to_string());
        if let Some(root) = nodes.iter().find(|n| n.role == NodeRole::Root) {
            parts.extend(self.render_pot(root));
        }
        parts.push("</g>".to_string());

        parts.push(r#"<g id="branches">"#.to_string());
        for node in nodes {
            let Some(parent) = node.parent.as_deref().and_then(|id| by_id.get(id)) else {
                continue;
            };
            parts.push(self.render_branch(parent, node));
        }
        parts.push("</g>".to_string());

        parts.push(r#"<g id="nodes">"#.to_string());
        for node in nodes.iter().filter(|n| n.role == NodeRole::Merge) {
            parts.push(self.render_knot(node));
        }
        parts.push("</g>".to_string());

        parts.push(r#"<g id="leaves">"#.to_string());
        for node in nodes.iter().filter(|n| n.role == NodeRole::Leaf) {
            parts.push(self.render_leaf(node));
        }
        parts.push("</g>".to_string());

        parts.push("</g>".to_string());
        parts.push("</svg>".to_string());

        parts.join("\n")
    }

    /// Inverted trapezoid pot with a rim and a soil strip, just under the root.
    fn render_pot(&self, root: &LayoutNode) -> Vec<String> {
        let pot = &self.config.pot;
        let colors = &self.config.colors;

        let cx = root.x;
        let top = root.y + pot.offset_y;
        let half_top = pot.top_width / 2.0;
        let half_bottom = pot.bottom_width / 2.0;

        let body = format!(
            r#"<path d="M {} {} L {} {} L {} {} L {} {} Z" fill="{}" stroke="{}" stroke-width="5"/>"#,
            fmt_num(cx - half_top),
            fmt_num(top),
            fmt_num(cx - half_bottom),
            fmt_num(top + pot.height),
            fmt_num(cx + half_bottom),
            fmt_num(top + pot.height),
            fmt_num(cx + half_top),
            fmt_num(top),
            colors.pot_body,
            colors.pot_stroke,
        );
        let rim = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="3"/>"#,
            fmt_num(cx - half_top),
            fmt_num(top - pot.rim_height),
            fmt_num(pot.top_width),
            fmt_num(pot.rim_height),
            colors.pot_rim,
            colors.pot_stroke,
        );
        let soil = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(cx - half_top + pot.soil_margin),
            fmt_num(top),
            fmt_num(pot.top_width - pot.soil_margin * 2.0),
            fmt_num(pot.soil_height),
            colors.soil,
        );

        vec![body, rim, soil]
    }

    fn render_branch(&self, parent: &LayoutNode, child: &LayoutNode) -> String {
        format!(
            r#"<line class="branch" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            fmt_num(parent.x),
            fmt_num(parent.y),
            fmt_num(child.x),
            fmt_num(child.y),
            self.config.colors.trunk,
            fmt_num(self.branch_width(child)),
        )
    }

    /// Thick near the pot, thinning out with depth; main-branch wood is heavier.
    pub fn branch_width(&self, node: &LayoutNode) -> f64 {
        let widths = &self.config.branch_width;
        let base = if self.is_main(node) { widths.main } else { widths.other };
        let depth_factor = (widths.depth_reduction - f64::from(node.commit.depth)).max(1.0);
        (base * depth_factor * 0.5).min(widths.max)
    }

    fn is_main(&self, node: &LayoutNode) -> bool {
        node.commit
            .branch_name
            .as_deref()
            .is_some_and(|name| self.config.is_main_branch_name(name))
    }

    fn render_knot(&self, node: &LayoutNode) -> String {
        format!(
            r#"<circle class="node" cx="{}" cy="{}" r="{}" fill="{}"{}>{}</circle>"#,
            fmt_num(node.x),
            fmt_num(node.y),
            fmt_num(node.size / 2.0),
            node.color,
            data_attributes(node),
            tooltip(node),
        )
    }

    fn render_leaf(&self, node: &LayoutNode) -> String {
        format!(
            r#"<ellipse class="leaf" cx="{x}" cy="{y}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="3" transform="rotate({} {x} {y})"{}>{}</ellipse>"#,
            fmt_num(node.size),
            fmt_num(node.size * 0.6),
            node.color,
            self.config.colors.leaf_stroke,
            fmt_num(node.angle),
            data_attributes(node),
            tooltip(node),
            x = fmt_num(node.x),
            y = fmt_num(node.y),
        )
    }
}

fn data_attributes(node: &LayoutNode) -> String {
    format!(
        r#" data-sha="{}" data-message="{}" data-author="{}" data-timestamp="{}""#,
        escape_xml(&node.id),
        escape_xml(&node.commit.message),
        escape_xml(&node.commit.author),
        node.commit.timestamp,
    )
}

fn tooltip(node: &LayoutNode) -> String {
    let commit = &node.commit;
    let mut message: String = commit.message.chars().take(TOOLTIP_MESSAGE_CHARS).collect();
    if commit.message.chars().count() > TOOLTIP_MESSAGE_CHARS {
        message.push_str("...");
    }
    let date = commit
        .authored_at()
        .map(|when| when.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "<title>{}\nAuthor: {}\nDate: {}</title>",
        escape_xml(&message),
        escape_xml(&commit.author),
        date
    )
}

/// Two decimals, without trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
