//! Dataset loading, session state, and the pure graph-preparation logic that
//! feeds the force-graph canvas.

mod ancestry;
mod dataset;
mod prepare;

pub use ancestry::AncestorIndex;
pub use dataset::Session;
pub use prepare::prepare_graph_data;

#[cfg(test)]
pub use dataset::GenreDataset;
