mod component;
mod paint;
mod render;
mod state;
mod style;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode, Rank};
