use leptos::prelude::*;

/// 404 page for unmatched routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="vis-page">
			<h1>"Page not found"</h1>
			<p>
				"Nothing to see here. "
				<a href="/">"Back to the genre graph"</a>
			</p>
		</div>
	}
}
