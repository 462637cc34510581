//! Pure resolution of per-frame appearance from original-paint snapshots and
//! the current highlight transition, kept free of canvas calls so it is
//! testable on its own.

/// Fill applied to ancestor-path members while a hover is active.
pub const HIGHLIGHT_COLOR: &str = "orange";
pub const NODE_DIM_OPACITY: f64 = 0.15;
pub const LINK_DIM_OPACITY: f64 = 0.05;
pub const LABEL_DIM_OPACITY: f64 = 0.15;

/// Appearance snapshot taken when a node is built, restored after
/// de-highlighting.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePaint {
	pub fill: String,
	pub fill_opacity: f64,
	pub radius: f64,
}

/// Appearance snapshot taken when a link is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPaint {
	pub stroke: String,
	pub stroke_opacity: f64,
	pub stroke_width: f64,
}

/// Per-frame node appearance: the original fill drawn at `base_alpha` with
/// the highlight color crossfaded on top at `highlight_alpha`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedNode {
	pub base_alpha: f64,
	pub highlight_alpha: f64,
}

impl ResolvedNode {
	pub fn total_alpha(&self) -> f64 {
		self.base_alpha + self.highlight_alpha
	}
}

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

// Exact at t = 1 so a fully-dimmed mark lands on the dim floor, not a
// float-rounding neighbor of it.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
	if t >= 1.0 { b } else { a + (b - a) * t }
}

/// Resolve a node's appearance at transition position `t` (0 = idle,
/// 1 = fully highlighted). Members keep their opacity and crossfade toward
/// the highlight color; non-members keep their fill and dim.
pub fn node_appearance(original: &NodePaint, member: bool, t: f64) -> ResolvedNode {
	if member {
		ResolvedNode {
			base_alpha: original.fill_opacity * (1.0 - t),
			highlight_alpha: original.fill_opacity * t,
		}
	} else {
		ResolvedNode {
			base_alpha: lerp(original.fill_opacity, NODE_DIM_OPACITY, t),
			highlight_alpha: 0.0,
		}
	}
}

/// Resolve a link's appearance; a link counts as a member only when both of
/// its endpoints are in the ancestor set.
pub fn link_appearance(original: &LinkPaint, both_members: bool, t: f64) -> ResolvedNode {
	if both_members {
		ResolvedNode {
			base_alpha: original.stroke_opacity * (1.0 - t),
			highlight_alpha: original.stroke_opacity * t,
		}
	} else {
		ResolvedNode {
			base_alpha: lerp(original.stroke_opacity, LINK_DIM_OPACITY, t),
			highlight_alpha: 0.0,
		}
	}
}

/// Labels never recolor; members keep their opacity, non-members fade.
pub fn label_alpha(original_opacity: f64, member: bool, t: f64) -> f64 {
	if member {
		original_opacity
	} else {
		lerp(original_opacity, LABEL_DIM_OPACITY, t)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node_paint() -> NodePaint {
		NodePaint {
			fill: "steelblue".to_string(),
			fill_opacity: 1.0,
			radius: 7.0,
		}
	}

	fn link_paint() -> LinkPaint {
		LinkPaint {
			stroke: "#999".to_string(),
			stroke_opacity: 0.6,
			stroke_width: 1.0,
		}
	}

	#[test]
	fn idle_state_is_the_original() {
		let r = node_appearance(&node_paint(), false, 0.0);
		assert_eq!(r.total_alpha(), 1.0);
		assert_eq!(r.highlight_alpha, 0.0);
	}

	#[test]
	fn member_crossfades_at_constant_opacity() {
		let r = node_appearance(&node_paint(), true, 0.5);
		assert!((r.total_alpha() - 1.0).abs() < 1e-9);
		assert_eq!(r.highlight_alpha, 0.5);
		let done = node_appearance(&node_paint(), true, 1.0);
		assert_eq!(done.base_alpha, 0.0);
		assert_eq!(done.highlight_alpha, 1.0);
	}

	#[test]
	fn non_member_dims_without_recoloring() {
		let r = node_appearance(&node_paint(), false, 1.0);
		assert_eq!(r.base_alpha, NODE_DIM_OPACITY);
		assert_eq!(r.highlight_alpha, 0.0);
	}

	#[test]
	fn link_needs_both_endpoints() {
		let member = link_appearance(&link_paint(), true, 1.0);
		assert_eq!(member.highlight_alpha, 0.6);
		let partial = link_appearance(&link_paint(), false, 1.0);
		assert_eq!(partial.base_alpha, LINK_DIM_OPACITY);
		assert_eq!(partial.highlight_alpha, 0.0);
	}

	#[test]
	fn label_fade_targets_the_dim_floor() {
		assert_eq!(label_alpha(1.0, true, 1.0), 1.0);
		assert_eq!(label_alpha(1.0, false, 1.0), LABEL_DIM_OPACITY);
		assert_eq!(label_alpha(0.0, false, 0.0), 0.0);
	}

	#[test]
	fn full_dim_lands_exactly_on_the_floor() {
		// dim floors are exact values, not within-epsilon approximations
		assert_eq!(
			node_appearance(&node_paint(), false, 1.0).base_alpha,
			NODE_DIM_OPACITY
		);
		assert_eq!(
			link_appearance(&link_paint(), false, 1.0).base_alpha,
			LINK_DIM_OPACITY
		);
		assert_eq!(label_alpha(0.8, false, 1.0), LABEL_DIM_OPACITY);
	}

	#[test]
	fn easing_is_monotonic_and_clamped() {
		assert_eq!(ease_out_cubic(0.0), 0.0);
		assert_eq!(ease_out_cubic(1.0), 1.0);
		assert!(ease_out_cubic(0.3) < ease_out_cubic(0.6));
	}
}
