use std::fmt;

/// Popularity rank of a genre, or `N/A` when the dataset has no entry for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
	Ranked(u32),
	NotAvailable,
}

impl fmt::Display for Rank {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rank::Ranked(n) => write!(f, "{}", n),
			Rank::NotAvailable => write!(f, "N/A"),
		}
	}
}

/// A visible genre node. Identity is the id; immutable per render.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub rank: Rank,
}

/// Directed parent-to-child edge between two visible nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
