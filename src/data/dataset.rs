use std::collections::HashMap;

use gloo_net::http::Request;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use super::ancestry::AncestorIndex;
use crate::components::force_graph::Rank;

/// Wire format of the genre dataset document.
///
/// Missing maps deserialize to empty ones; absent ranks later surface as
/// [`Rank::NotAvailable`]. `adjacency_list` keeps document order because the
/// child-parent derivation is first-parent-wins over that order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenreDataset {
	#[serde(default)]
	pub nodes_bfs_order: Vec<String>,
	#[serde(default)]
	pub adjacency_list: IndexMap<String, Vec<String>>,
	#[serde(default)]
	pub genre_ranks: HashMap<String, u32>,
}

#[derive(Clone, Debug, Error)]
pub enum DatasetError {
	#[error("dataset request failed: {0}")]
	Fetch(String),
	#[error("dataset decode failed: {0}")]
	Decode(String),
}

/// Session-scoped graph state: the three wire structures plus the derived
/// ancestor index, replaced together by [`Session::load`] whenever a dataset
/// is (re)loaded.
#[derive(Clone, Debug, Default)]
pub struct Session {
	bfs_order: Vec<String>,
	adjacency: IndexMap<String, Vec<String>>,
	ranks: HashMap<String, u32>,
	ancestry: AncestorIndex,
}

impl Session {
	/// Atomically derive all session structures from a fetched dataset.
	pub fn load(dataset: GenreDataset) -> Self {
		let root = dataset.nodes_bfs_order.first().cloned();
		let ancestry = AncestorIndex::derive(&dataset.adjacency_list, root);
		Self {
			bfs_order: dataset.nodes_bfs_order,
			adjacency: dataset.adjacency_list,
			ranks: dataset.genre_ranks,
			ancestry,
		}
	}

	/// Fetch and decode the dataset, then [`load`](Session::load) it.
	pub async fn fetch(url: &str) -> Result<Self, DatasetError> {
		let response = Request::get(url)
			.send()
			.await
			.map_err(|e| DatasetError::Fetch(e.to_string()))?;
		if !response.ok() {
			return Err(DatasetError::Fetch(format!("HTTP {}", response.status())));
		}
		let dataset: GenreDataset = response
			.json()
			.await
			.map_err(|e| DatasetError::Decode(e.to_string()))?;
		Ok(Self::load(dataset))
	}

	pub fn bfs_order(&self) -> &[String] {
		&self.bfs_order
	}

	pub fn adjacency(&self) -> &IndexMap<String, Vec<String>> {
		&self.adjacency
	}

	pub fn ancestry(&self) -> &AncestorIndex {
		&self.ancestry
	}

	pub fn rank_of(&self, id: &str) -> Rank {
		self.ranks
			.get(id)
			.copied()
			.map_or(Rank::NotAvailable, Rank::Ranked)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOC: &str = r#"{
		"nodes_bfs_order": ["pop", "rock", "indie"],
		"adjacency_list": {"pop": ["rock"], "rock": ["indie"]},
		"genre_ranks": {"pop": 1, "rock": 2}
	}"#;

	#[test]
	fn parses_the_wire_document() {
		let dataset: GenreDataset = serde_json::from_str(DOC).unwrap();
		assert_eq!(dataset.nodes_bfs_order.len(), 3);
		assert_eq!(dataset.adjacency_list["pop"], vec!["rock"]);
		assert_eq!(dataset.genre_ranks["rock"], 2);
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let dataset: GenreDataset = serde_json::from_str("{}").unwrap();
		assert!(dataset.nodes_bfs_order.is_empty());
		assert!(dataset.adjacency_list.is_empty());
		assert!(dataset.genre_ranks.is_empty());
	}

	#[test]
	fn load_derives_root_and_parents_together() {
		let dataset: GenreDataset = serde_json::from_str(DOC).unwrap();
		let session = Session::load(dataset);
		assert_eq!(session.ancestry().root(), Some("pop"));
		assert_eq!(session.ancestry().path_string("indie", 3), "pop → rock → indie");
	}

	#[test]
	fn absent_rank_is_not_available() {
		let dataset: GenreDataset = serde_json::from_str(DOC).unwrap();
		let session = Session::load(dataset);
		assert_eq!(session.rank_of("pop"), Rank::Ranked(1));
		assert_eq!(session.rank_of("indie"), Rank::NotAvailable);
	}

	#[test]
	fn empty_order_has_no_root() {
		let session = Session::load(GenreDataset::default());
		assert_eq!(session.ancestry().root(), None);
	}
}
