use std::collections::HashSet;

use super::dataset::Session;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Slice the first `count` ids off the BFS order into a renderable subgraph.
///
/// The slice is deduplicated while preserving order, the root id is
/// force-included for any `count >= 1`, and a link survives only when both of
/// its endpoints are visible. `count` past the end of the order clamps; an
/// empty order yields an empty graph.
pub fn prepare_graph_data(session: &Session, count: usize) -> GraphData {
	let bfs = session.bfs_order();
	if bfs.is_empty() {
		return GraphData::default();
	}

	let mut order: Vec<&str> = Vec::new();
	let mut selected: HashSet<&str> = HashSet::new();
	for id in &bfs[..count.min(bfs.len())] {
		if selected.insert(id.as_str()) {
			order.push(id.as_str());
		}
	}
	if count > 0 && selected.insert(bfs[0].as_str()) {
		order.push(bfs[0].as_str());
	}

	let nodes = order
		.iter()
		.map(|id| GraphNode {
			id: id.to_string(),
			rank: session.rank_of(id),
		})
		.collect();

	let mut links = Vec::new();
	for (parent, children) in session.adjacency() {
		if !selected.contains(parent.as_str()) {
			continue;
		}
		for child in children {
			if selected.contains(child.as_str()) {
				links.push(GraphLink {
					source: parent.clone(),
					target: child.clone(),
				});
			}
		}
	}

	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::Rank;
	use crate::data::dataset::GenreDataset;

	fn session() -> Session {
		let dataset: GenreDataset = serde_json::from_str(
			r#"{
				"nodes_bfs_order": ["pop", "rock", "indie"],
				"adjacency_list": {"pop": ["rock"], "rock": ["indie"]},
				"genre_ranks": {"pop": 1, "rock": 2}
			}"#,
		)
		.unwrap();
		Session::load(dataset)
	}

	fn node_ids(data: &GraphData) -> HashSet<String> {
		data.nodes.iter().map(|n| n.id.clone()).collect()
	}

	#[test]
	fn slices_the_bfs_prefix() {
		let data = prepare_graph_data(&session(), 2);
		assert_eq!(
			node_ids(&data),
			["pop", "rock"].iter().map(|s| s.to_string()).collect()
		);
		assert_eq!(
			data.links,
			vec![GraphLink {
				source: "pop".to_string(),
				target: "rock".to_string(),
			}]
		);
	}

	#[test]
	fn count_zero_and_empty_order_yield_empty_graphs() {
		assert_eq!(prepare_graph_data(&session(), 0), GraphData::default());
		let empty = Session::load(GenreDataset::default());
		assert_eq!(prepare_graph_data(&empty, 10), GraphData::default());
	}

	#[test]
	fn out_of_range_count_clamps() {
		let data = prepare_graph_data(&session(), 99);
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.links.len(), 2);
	}

	#[test]
	fn node_set_grows_monotonically() {
		let s = session();
		for k in 0..3 {
			let smaller = node_ids(&prepare_graph_data(&s, k));
			let larger = node_ids(&prepare_graph_data(&s, k + 1));
			assert!(smaller.is_subset(&larger), "count {} not a subset", k);
		}
	}

	#[test]
	fn links_are_closed_over_visible_nodes() {
		let s = session();
		for k in 0..=3 {
			let data = prepare_graph_data(&s, k);
			let ids = node_ids(&data);
			for link in &data.links {
				assert!(ids.contains(&link.source));
				assert!(ids.contains(&link.target));
			}
		}
	}

	#[test]
	fn duplicate_ids_in_the_order_are_deduplicated() {
		let dataset: GenreDataset = serde_json::from_str(
			r#"{"nodes_bfs_order": ["pop", "rock", "pop", "indie"]}"#,
		)
		.unwrap();
		let data = prepare_graph_data(&Session::load(dataset), 3);
		assert_eq!(data.nodes.len(), 2);
	}

	#[test]
	fn missing_rank_degrades_to_not_available() {
		let data = prepare_graph_data(&session(), 3);
		let indie = data.nodes.iter().find(|n| n.id == "indie").unwrap();
		assert_eq!(indie.rank, Rank::NotAvailable);
	}
}
