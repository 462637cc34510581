use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ForceGraphState, HoverInfo};
use super::style::GraphStyle;
use super::types::GraphData;
use crate::data::AncestorIndex;

/// Rapid resize events collapse into one rebuild after this delay.
const RESIZE_DEBOUNCE_MS: i32 = 250;

/// Interactive force-directed genre graph on a canvas. Any change to `data`
/// or `ancestry` tears the scene down and rebuilds it; window resizes do the
/// same, debounced.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] ancestry: Signal<AncestorIndex>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_fire: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_timer: Rc<Cell<i32>> = Rc::new(Cell::new(0));
	let raf_started: Rc<Cell<bool>> = Rc::new(Cell::new(false));

	let tooltip: RwSignal<Option<HoverInfo>> = RwSignal::new(None);
	let tooltip_pos: RwSignal<(i32, i32)> = RwSignal::new((0, 0));

	let measure = move |canvas: &HtmlCanvasElement, window: &Window| -> (f64, f64) {
		if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		}
	};

	// Full clear-and-rebuild of the scene from the current data and canvas
	// size; shared by the data effect and the debounced resize path.
	let rebuild: Rc<dyn Fn()> = {
		let state = state.clone();
		Rc::new(move || {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let window: Window = web_sys::window().unwrap();
			let (w, h) = measure(&canvas, &window);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let graph_data = data.get_untracked();
			let style = GraphStyle::for_count(graph_data.nodes.len());
			*state.borrow_mut() = Some(ForceGraphState::new(
				&graph_data,
				ancestry.get_untracked(),
				style,
				w,
				h,
			));
			tooltip.set(None);
		})
	};

	let (state_init, animate_init, rebuild_init) = (state.clone(), animate.clone(), rebuild.clone());
	let (resize_cb_init, resize_fire_init, resize_timer_init, raf_started_init) = (
		resize_cb.clone(),
		resize_fire.clone(),
		resize_timer.clone(),
		raf_started.clone(),
	);

	Effect::new(move |_| {
		data.track();
		ancestry.track();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		rebuild_init();

		if raf_started_init.get() {
			return;
		}
		raf_started_init.set(true);

		let window: Window = web_sys::window().unwrap();
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}

		let rebuild_resize = rebuild_init.clone();
		*resize_fire_init.borrow_mut() = Some(Closure::new(move || {
			rebuild_resize();
		}));
		let (fire, timer) = (resize_fire_init.clone(), resize_timer_init.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			// cancel any pending rebuild before scheduling the next one
			win.clear_timeout_with_handle(timer.get());
			if let Some(ref cb) = *fire.borrow() {
				if let Ok(handle) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					RESIZE_DEBOUNCE_MS,
				) {
					timer.set(handle);
				}
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				// pin the node and wake the simulation so neighbors re-settle
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
						node.data.is_anchor = true;
					}
				});
				s.reheat();
				tooltip.set(None);
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				if s.set_hover(hovered) {
					tooltip.set(s.hover_info());
				}
				if s.hover.node.is_some() {
					tooltip_pos.set((ev.client_x(), ev.client_y()));
				}
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					// release un-pins; the simulation cools back down on its own
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.is_anchor = false;
						}
					});
				}
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if let Some(idx) = s.drag.node_idx {
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
			tooltip.set(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<div class="force-graph-wrap">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				tooltip
					.get()
					.map(|info| {
						let (x, y) = tooltip_pos.get();
						view! {
							<div
								class="graph-tooltip"
								style=format!("left: {}px; top: {}px;", x + 12, y + 12)
							>
								<div>
									<strong>"Genre: "</strong>
									{info.id}
								</div>
								<div>
									<strong>"Rank: "</strong>
									{info.rank.to_string()}
								</div>
								<div>
									<strong>"Path: "</strong>
									{info.path}
								</div>
							</div>
						}
					})
			}}
		</div>
	}
}
