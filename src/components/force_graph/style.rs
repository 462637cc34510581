use std::rc::Rc;

use super::types::{GraphLink, GraphNode};

/// A visual parameter that is either a constant or a function of the entity
/// it styles. Constants are the common case; per-entity closures cover the
/// rest without a second code path at the use site.
#[derive(Clone)]
pub enum Accessor<D, T> {
	Const(T),
	Per(Rc<dyn Fn(&D) -> T>),
}

impl<D, T: Clone> Accessor<D, T> {
	pub fn get(&self, d: &D) -> T {
		match self {
			Accessor::Const(v) => v.clone(),
			Accessor::Per(f) => f(d),
		}
	}
}

impl<D, T: Clone> From<T> for Accessor<D, T> {
	fn from(v: T) -> Self {
		Accessor::Const(v)
	}
}

/// Full visual configuration for one render of the graph.
#[derive(Clone)]
pub struct GraphStyle {
	pub node_radius: Accessor<GraphNode, f64>,
	pub node_fill: Accessor<GraphNode, String>,
	pub node_fill_opacity: Accessor<GraphNode, f64>,
	pub node_stroke: String,
	pub node_stroke_width: f64,
	pub node_stroke_opacity: f64,
	pub link_stroke: Accessor<GraphLink, String>,
	pub link_stroke_opacity: Accessor<GraphLink, f64>,
	pub link_stroke_width: Accessor<GraphLink, f64>,
	pub label_font_size: Accessor<GraphNode, f64>,
	pub label_fill_opacity: Accessor<GraphNode, f64>,
	pub label_color: String,
	pub label_offset: (f64, f64),
	pub charge: f64,
	pub spring: f64,
}

impl GraphStyle {
	/// Count-tiered preset: larger graphs get smaller marks, no labels, and a
	/// stronger charge so the layout stays readable.
	pub fn for_count(count: usize) -> Self {
		let n = count as f64;
		let (radius, font_size, charge) = if count > 200 {
			(3.0, 0.0, 40.0 + n / 10.0)
		} else if count > 100 {
			(4.0, 5.0, 70.0 + n / 8.0)
		} else if count > 50 {
			(5.0, 7.0, 100.0 + n / 6.0)
		} else {
			(7.0, 15.0, 150.0 + n / 4.0)
		};
		let label_opacity = if font_size == 0.0 { 0.0 } else { 1.0 };

		Self {
			node_radius: radius.into(),
			node_fill: "steelblue".to_string().into(),
			node_fill_opacity: 1.0.into(),
			node_stroke: "#fff".to_string(),
			node_stroke_width: 1.5,
			node_stroke_opacity: 1.0,
			link_stroke: "#999".to_string().into(),
			link_stroke_opacity: 0.6.into(),
			link_stroke_width: 1.0.into(),
			label_font_size: font_size.into(),
			label_fill_opacity: label_opacity.into(),
			label_color: "#222".to_string(),
			label_offset: (2.0, 3.0),
			charge,
			spring: 0.05,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::Rank;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			rank: Rank::NotAvailable,
		}
	}

	#[test]
	fn constant_accessor_ignores_the_entity() {
		let a: Accessor<GraphNode, f64> = 5.0.into();
		assert_eq!(a.get(&node("pop")), 5.0);
	}

	#[test]
	fn per_entity_accessor_sees_the_entity() {
		let a: Accessor<GraphNode, f64> =
			Accessor::Per(Rc::new(|n: &GraphNode| n.id.len() as f64));
		assert_eq!(a.get(&node("rock")), 4.0);
	}

	#[test]
	fn small_graphs_get_full_size_marks() {
		let style = GraphStyle::for_count(30);
		assert_eq!(style.node_radius.get(&node("pop")), 7.0);
		assert_eq!(style.label_font_size.get(&node("pop")), 15.0);
	}

	#[test]
	fn tiers_shrink_with_count() {
		for (count, radius, font) in
			[(51usize, 5.0, 7.0), (101, 4.0, 5.0), (201, 3.0, 0.0)]
		{
			let style = GraphStyle::for_count(count);
			assert_eq!(style.node_radius.get(&node("x")), radius);
			assert_eq!(style.label_font_size.get(&node("x")), font);
		}
	}

	#[test]
	fn hidden_labels_are_fully_transparent() {
		let style = GraphStyle::for_count(500);
		assert_eq!(style.label_fill_opacity.get(&node("x")), 0.0);
	}

	#[test]
	fn charge_grows_with_count_within_a_tier() {
		let a = GraphStyle::for_count(210).charge;
		let b = GraphStyle::for_count(400).charge;
		assert!(b > a);
	}
}
