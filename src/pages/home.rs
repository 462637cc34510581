use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::data::{Session, prepare_graph_data};

const DATASET_URL: &str = "data/music_genres_data.json";
const DEFAULT_NODE_COUNT: usize = 30;

/// Genre hierarchy page: fetches the dataset once, then drives the canvas
/// from a node-count slider.
#[component]
pub fn Home() -> impl IntoView {
	let session = LocalResource::new(|| Session::fetch(DATASET_URL));

	view! {
		<div class="vis-page">
			<h1>"Music Genre Hierarchy"</h1>
			{move || {
				let loaded = session.get();
				match loaded.as_ref() {
					None => view! { <p class="status">"Loading genre data…"</p> }.into_any(),
					Some(Err(e)) => {
						log::error!("failed to load genre dataset: {}", e);
						view! {
							<p class="status load-error">"Error loading genre data."</p>
						}
							.into_any()
					}
					Some(Ok(s)) => {
						let s = s.clone();
						view! { <GenreGraph session=s /> }.into_any()
					}
				}
			}}
		</div>
	}
}

#[component]
fn GenreGraph(session: Session) -> impl IntoView {
	let total = session.bfs_order().len();
	let count = RwSignal::new(DEFAULT_NODE_COUNT.min(total));
	let session = StoredValue::new(session);

	let data =
		Signal::derive(move || session.with_value(|s| prepare_graph_data(s, count.get())));
	let ancestry = Signal::derive(move || session.with_value(|s| s.ancestry().clone()));

	view! {
		<div class="graph-controls">
			<span class="count-label">"Visible genres: " {move || count.get()}</span>
			<input
				id="node-count"
				type="range"
				min="0"
				max=total.to_string()
				prop:value=move || count.get().to_string()
				on:input=move |ev| {
					if let Ok(v) = event_target_value(&ev).parse() {
						count.set(v);
					}
				}
			/>
		</div>
		<div class="vis-container">
			<ForceGraphCanvas data=data ancestry=ancestry />
		</div>
	}
}
