use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::paint::{LinkPaint, NodePaint};
use super::style::GraphStyle;
use super::types::{GraphData, Rank};
use crate::data::AncestorIndex;

/// Extra world-space slack around a node's radius for pointer hit tests.
pub const HIT_SLACK: f64 = 5.0;

/// Highlight ramps in over ~150 ms and back out over ~200 ms.
pub const HIGHLIGHT_IN_SECS: f64 = 0.15;
pub const HIGHLIGHT_OUT_SECS: f64 = 0.20;

// Simulation "temperature": decays each tick until the layout settles,
// drag-start reheats it so neighbors re-settle around the pinned node.
const ALPHA_REHEAT: f64 = 0.3;
const ALPHA_DECAY: f64 = 0.9772;
const ALPHA_MIN: f64 = 0.001;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub rank: Rank,
	pub paint: NodePaint,
	pub label_size: f64,
	pub label_opacity: f64,
}

/// Edge endpoints with the link's original-paint snapshot.
#[derive(Clone, Debug)]
pub struct Edge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub paint: LinkPaint,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hover state plus the previous ancestor set, kept so the fade-out still
/// knows which marks were highlighted.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub ancestors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_ancestors: HashSet<DefaultNodeIdx>,
}

/// Tooltip content for the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
	pub id: String,
	pub rank: Rank,
	pub path: String,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<Edge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub style: GraphStyle,
	pub width: f64,
	pub height: f64,
	ancestry: AncestorIndex,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	node_count: usize,
	alpha: f64,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		ancestry: AncestorIndex,
		style: GraphStyle,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: style.charge as f32,
			force_spring: style.spring as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let spread = (width.min(height) / 4.0).max(50.0);
		let total = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let paint = NodePaint {
				fill: style.node_fill.get(node),
				fill_opacity: style.node_fill_opacity.get(node),
				radius: style.node_radius.get(node),
			};
			let angle = (i as f64) * 2.0 * PI / total;
			let (x, y) = (
				(spread * angle.cos()) as f32,
				(spread * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					rank: node.rank,
					paint,
					label_size: style.label_font_size.get(node),
					label_opacity: style.label_fill_opacity.get(node),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(Edge {
					source: src,
					target: tgt,
					paint: LinkPaint {
						stroke: style.link_stroke.get(link),
						stroke_opacity: style.link_stroke_opacity.get(link),
						stroke_width: style.link_stroke_width.get(link),
					},
				});
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			style,
			width,
			height,
			ancestry,
			id_to_idx,
			node_count: data.nodes.len(),
			alpha: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// hit radius is in world-space, scales with zoom like nodes
			let hit = node.data.user_data.paint.radius + HIT_SLACK;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Current world-space positions keyed by node index, sampled once per
	/// frame for edge and label drawing.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.node_count);
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn id_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Update the hovered node, recomputing the ancestor set from the
	/// child-parent index. Returns whether the hover changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		let was_hovering = self.hover.node.is_some();

		// Save the outgoing ancestor set for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_ancestors = std::mem::take(&mut self.hover.ancestors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_ancestors.clear();
		}

		self.hover.node = node;
		self.hover.ancestors.clear();

		if let Some(idx) = node {
			if let Some(id) = self.id_of(idx) {
				for ancestor in self.ancestry.ancestors_of(&id, self.node_count) {
					if let Some(&aidx) = self.id_to_idx.get(&ancestor) {
						self.hover.ancestors.insert(aidx);
					}
				}
			}
		}
		true
	}

	pub fn is_member(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.ancestors.contains(&idx) || self.hover.prev_ancestors.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Tooltip content for the currently hovered node.
	pub fn hover_info(&self) -> Option<HoverInfo> {
		let idx = self.hover.node?;
		let mut info = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let d = &node.data.user_data;
				info = Some(HoverInfo {
					id: d.id.clone(),
					rank: d.rank,
					path: self.ancestry.path_string(&d.id, self.node_count),
				});
			}
		});
		info
	}

	/// One cooperative frame of work: advance the simulation while it is
	/// still warm and move the highlight transition toward its target.
	pub fn tick(&mut self, dt: f32) {
		if self.alpha > ALPHA_MIN {
			self.graph.update(dt);
			self.alpha *= ALPHA_DECAY;
		}

		let dt = dt as f64;
		if self.hover.node.is_some() {
			self.hover.highlight_t = (self.hover.highlight_t + dt / HIGHLIGHT_IN_SECS).min(1.0);
		} else if self.hover.highlight_t > 0.0 {
			self.hover.highlight_t = (self.hover.highlight_t - dt / HIGHLIGHT_OUT_SECS).max(0.0);
			if self.hover.highlight_t == 0.0 {
				self.hover.prev_node = None;
				self.hover.prev_ancestors.clear();
			}
		}
	}

	pub fn is_settled(&self) -> bool {
		self.alpha <= ALPHA_MIN
	}

	/// Raise the simulation temperature, e.g. when a drag starts.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(ALPHA_REHEAT);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};
	use crate::data::{GenreDataset, Session, prepare_graph_data};

	fn build_state() -> ForceGraphState {
		let dataset: GenreDataset = serde_json::from_str(
			r#"{
				"nodes_bfs_order": ["pop", "rock", "indie"],
				"adjacency_list": {"pop": ["rock"], "rock": ["indie"]},
				"genre_ranks": {"pop": 1}
			}"#,
		)
		.unwrap();
		let session = Session::load(dataset);
		let data = prepare_graph_data(&session, 3);
		let style = GraphStyle::for_count(data.nodes.len());
		ForceGraphState::new(&data, session.ancestry().clone(), style, 640.0, 400.0)
	}

	fn idx_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		*state.id_to_idx.get(id).unwrap()
	}

	#[test]
	fn builds_nodes_and_edges_from_graph_data() {
		let state = build_state();
		assert_eq!(state.node_count, 3);
		assert_eq!(state.edges.len(), 2);
		assert_eq!(state.id_of(idx_of(&state, "rock")).as_deref(), Some("rock"));
	}

	#[test]
	fn hover_selects_the_full_ancestor_path() {
		let mut state = build_state();
		let indie = idx_of(&state, "indie");
		assert!(state.set_hover(Some(indie)));
		assert_eq!(state.hover.ancestors.len(), 3);
		assert!(state.is_member(idx_of(&state, "pop")));
		assert!(state.is_member(idx_of(&state, "rock")));
	}

	#[test]
	fn repeated_hover_is_a_no_op() {
		let mut state = build_state();
		let rock = idx_of(&state, "rock");
		assert!(state.set_hover(Some(rock)));
		assert!(!state.set_hover(Some(rock)));
	}

	#[test]
	fn hover_info_carries_rank_and_path() {
		let mut state = build_state();
		state.set_hover(Some(idx_of(&state, "indie")));
		let info = state.hover_info().unwrap();
		assert_eq!(info.id, "indie");
		assert_eq!(info.rank, Rank::NotAvailable);
		assert_eq!(info.path, "pop → rock → indie");
	}

	#[test]
	fn highlight_ramps_in_within_150ms() {
		let mut state = build_state();
		state.set_hover(Some(idx_of(&state, "indie")));
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_eq!(state.hover.highlight_t, 1.0);
	}

	#[test]
	fn highlight_ramps_out_and_clears_the_previous_set() {
		let mut state = build_state();
		state.set_hover(Some(idx_of(&state, "indie")));
		for _ in 0..10 {
			state.tick(0.016);
		}
		state.set_hover(None);
		// the outgoing set still drives the fade-out
		assert!(state.is_member(idx_of(&state, "pop")));
		for _ in 0..13 {
			state.tick(0.016);
		}
		assert_eq!(state.hover.highlight_t, 0.0);
		assert!(!state.has_active_highlight());
		assert!(!state.is_member(idx_of(&state, "pop")));
	}

	#[test]
	fn simulation_settles_and_reheats() {
		let mut state = build_state();
		assert!(!state.is_settled());
		for _ in 0..3000 {
			state.tick(0.016);
		}
		assert!(state.is_settled());
		state.reheat();
		assert!(!state.is_settled());
	}

	#[test]
	fn links_with_missing_endpoints_are_dropped() {
		let data = GraphData {
			nodes: vec![GraphNode {
				id: "pop".to_string(),
				rank: Rank::Ranked(1),
			}],
			links: vec![GraphLink {
				source: "pop".to_string(),
				target: "ghost".to_string(),
			}],
		};
		let style = GraphStyle::for_count(1);
		let state =
			ForceGraphState::new(&data, AncestorIndex::default(), style, 640.0, 400.0);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn empty_graph_builds_without_panicking() {
		let style = GraphStyle::for_count(0);
		let state = ForceGraphState::new(
			&GraphData::default(),
			AncestorIndex::default(),
			style,
			640.0,
			400.0,
		);
		assert!(state.positions().is_empty());
	}
}
