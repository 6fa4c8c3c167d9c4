//! Diagram data structures and focus configuration.
//!
//! Everything here deserializes from the `flow-data` JSON a host page may embed,
//! so every optional field carries a serde default.

use serde::Deserialize;

/// A point in canvas (world) units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A topic node in the diagram.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlowNode {
	/// Unique identifier. Edges reference nodes by this value.
	pub id: String,
	/// Top-left corner of the node box in world units.
	pub position: Position,
	/// Text shown inside the node when its content is visible.
	pub content: String,
	/// Short name used for the "Zoom to" button. Falls back to `content`.
	#[serde(default)]
	pub topic: Option<String>,
}

impl FlowNode {
	/// Label for this node's focus button.
	pub fn button_label(&self) -> String {
		format!("Zoom to {}", self.topic.as_deref().unwrap_or(&self.content))
	}
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlowEdge {
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Draw the edge with flowing dashes.
	#[serde(default)]
	pub animated: bool,
}

/// Bounds and step of the manual zoom slider.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomRange {
	pub min: f64,
	pub max: f64,
	pub step: f64,
}

impl Default for ZoomRange {
	fn default() -> Self {
		Self {
			min: 0.5,
			max: 3.0,
			step: 0.1,
		}
	}
}

/// Tunables for click-to-focus and zoom-dependent content.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
	/// Unselected nodes show content only below this zoom.
	pub visibility_threshold: f64,
	/// Zoom applied when a node is focused.
	pub focus_zoom: f64,
	/// Length of the focus animation in milliseconds.
	pub focus_duration_ms: f64,
	/// Added to a node's position to get the point that gets centered.
	pub focus_offset: Position,
	/// Zoom applied once the view has been fitted on startup.
	pub initial_zoom: f64,
	pub zoom_range: ZoomRange,
	/// Text drawn in place of hidden node content.
	pub placeholder: String,
}

impl Default for FocusConfig {
	fn default() -> Self {
		Self {
			visibility_threshold: 1.5,
			focus_zoom: 2.0,
			focus_duration_ms: 800.0,
			focus_offset: Position::new(100.0, 75.0),
			initial_zoom: 1.0,
			zoom_range: ZoomRange::default(),
			placeholder: "Zoom in to see content".into(),
		}
	}
}

/// Complete diagram input: nodes, edges and focus settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FlowData {
	pub nodes: Vec<FlowNode>,
	#[serde(default)]
	pub edges: Vec<FlowEdge>,
	#[serde(default)]
	pub focus: FocusConfig,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_minimal_json_with_defaults() {
		let json = r#"{
			"nodes": [
				{ "id": "a", "position": { "x": 1, "y": 2 }, "content": "Alpha" },
				{ "id": "b", "position": { "x": 3, "y": 4 }, "content": "Beta", "topic": "B" }
			],
			"edges": [{ "id": "ea-b", "source": "a", "target": "b" }]
		}"#;
		let data: FlowData = serde_json::from_str(json).unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].position, Position::new(1.0, 2.0));
		assert_eq!(data.nodes[0].topic, None);
		assert!(!data.edges[0].animated);
		assert_eq!(data.focus, FocusConfig::default());
	}

	#[test]
	fn partial_focus_overrides_keep_other_defaults() {
		let json = r#"{
			"nodes": [],
			"focus": { "visibility_threshold": 2.5, "zoom_range": { "max": 4.0 } }
		}"#;
		let data: FlowData = serde_json::from_str(json).unwrap();

		assert_eq!(data.focus.visibility_threshold, 2.5);
		assert_eq!(data.focus.focus_zoom, 2.0);
		assert_eq!(data.focus.zoom_range.max, 4.0);
		assert_eq!(data.focus.zoom_range.min, 0.5);
	}

	#[test]
	fn button_label_prefers_topic() {
		let mut node = FlowNode {
			id: "1".into(),
			position: Position::default(),
			content: "Unveiling the Mysteries of Interaction Design".into(),
			topic: Some("Main Topic".into()),
		};
		assert_eq!(node.button_label(), "Zoom to Main Topic");

		node.topic = None;
		assert_eq!(
			node.button_label(),
			"Zoom to Unveiling the Mysteries of Interaction Design"
		);
	}
}
