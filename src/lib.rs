//! topic-flow: Interactive topic map with click-to-focus zoom.
//!
//! This crate provides a WASM-based diagram component that lays out topic
//! nodes on a canvas, animates the view onto a topic when it is picked, and
//! hides node content until the view is zoomed in far enough to read it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod topics;

pub use components::flow_canvas::{FlowCanvas, FlowData, FlowEdge, FlowNode, FocusController};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topic-flow: logging initialized");
}

/// Parse and validate diagram JSON.
fn parse_flow_data(json_text: &str) -> Option<FlowData> {
	let data = match serde_json::from_str::<FlowData>(json_text) {
		Ok(data) => data,
		Err(e) => {
			warn!("topic-flow: failed to parse flow data: {}", e);
			return None;
		}
	};
	if let Err(e) = FocusController::new(data.clone()) {
		warn!("topic-flow: rejected flow data: {}", e);
		return None;
	}
	info!(
		"topic-flow: loaded {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Some(data)
}

/// Load diagram data from a script element with id="flow-data".
/// Expected format: JSON with { nodes: [...], edges: [...], focus: {...} }.
/// An optional `data-theme` attribute on the element picks the theme.
fn load_flow_data() -> Option<(FlowData, Option<String>)> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("flow-data")?;
	let theme = element.get_attribute("data-theme");
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	parse_flow_data(&json_text).map(|data| (data, theme))
}

/// Main application component.
/// Loads diagram data from the DOM, falling back to the built-in topic map.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (flow_data, theme) =
		load_flow_data().unwrap_or_else(|| (topics::builtin_topics(), None));
	let flow_signal = Signal::derive(move || flow_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Interaction Design Topics" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-flow">
			<FlowCanvas data=flow_signal fullscreen=true theme=theme />
			<div class="flow-overlay">
				<h1>"Interaction Design"</h1>
				<p class="subtitle">
					"Pick a topic to focus it. Zoom in to read. Drag a handle to connect."
				</p>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_valid_flow_data() {
		let data = parse_flow_data(
			r#"{"nodes":[{"id":"a","position":{"x":0,"y":0},"content":"A"}],"edges":[]}"#,
		);
		assert_eq!(data.map(|d| d.nodes.len()), Some(1));
	}

	#[test]
	fn rejects_malformed_json() {
		assert_eq!(parse_flow_data("{nodes"), None);
	}

	#[test]
	fn rejects_dangling_edges() {
		let data = parse_flow_data(
			r#"{"nodes":[{"id":"a","position":{"x":0,"y":0},"content":"A"}],
			"edges":[{"id":"e","source":"a","target":"zz"}]}"#,
		);
		assert_eq!(data, None);
	}
}
