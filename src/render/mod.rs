pub mod json;
pub mod svg;

pub use json::export_json;
pub use svg::SvgRenderer;
