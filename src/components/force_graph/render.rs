use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::paint::{self, HIGHLIGHT_COLOR, ease_out_cubic};
use super::state::ForceGraphState;

const BACKGROUND: &str = "#fafafa";

/// Draw one frame: clear, apply the pan/zoom transform, then links, nodes,
/// and labels in that order so labels stay on top.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let t = ease_out_cubic(state.hover.highlight_t);
	draw_links(state, ctx, t);
	draw_nodes(state, ctx, t);
	draw_labels(state, ctx, t);
	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, t: f64) {
	let positions = state.positions();
	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let both_members = state.is_member(edge.source) && state.is_member(edge.target);
		let appearance = paint::link_appearance(&edge.paint, both_members, t);

		ctx.set_line_width(edge.paint.stroke_width);
		if appearance.base_alpha > 0.0 {
			ctx.set_global_alpha(appearance.base_alpha);
			ctx.set_stroke_style_str(&edge.paint.stroke);
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
		}
		if appearance.highlight_alpha > 0.0 {
			ctx.set_global_alpha(appearance.highlight_alpha);
			ctx.set_stroke_style_str(HIGHLIGHT_COLOR);
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
		}
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, t: f64) {
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let appearance = paint::node_appearance(&info.paint, state.is_member(node.index()), t);

		if appearance.base_alpha > 0.0 {
			ctx.set_global_alpha(appearance.base_alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.paint.radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&info.paint.fill);
			ctx.fill();
		}
		if appearance.highlight_alpha > 0.0 {
			ctx.set_global_alpha(appearance.highlight_alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.paint.radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(HIGHLIGHT_COLOR);
			ctx.fill();
		}

		let stroke_alpha = state.style.node_stroke_opacity * appearance.total_alpha();
		if stroke_alpha > 0.0 {
			ctx.set_global_alpha(stroke_alpha);
			ctx.set_stroke_style_str(&state.style.node_stroke);
			ctx.set_line_width(state.style.node_stroke_width);
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.paint.radius, 0.0, 2.0 * PI);
			ctx.stroke();
		}
	});
}

fn draw_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, t: f64) {
	let (offset_x, offset_y) = state.style.label_offset;
	ctx.set_fill_style_str(&state.style.label_color);
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.label_size <= 0.0 {
			return;
		}
		let alpha = paint::label_alpha(info.label_opacity, state.is_member(node.index()), t);
		if alpha <= 0.0 {
			return;
		}
		ctx.set_global_alpha(alpha);
		ctx.set_font(&format!("{}px sans-serif", info.label_size));
		let (x, y) = (node.x() as f64, node.y() as f64);
		let _ = ctx.fill_text(&info.id, x + info.paint.radius + offset_x, y + offset_y);
	});
}
