//! Selection, intended zoom and zoom-dependent content visibility.
//!
//! The controller owns the node and edge collections together with the current
//! selection. It never touches the viewport directly: user intents are turned
//! into [`ViewportCommand`]s which the caller applies, and visibility is a pure
//! function of the selection and whatever zoom the caller reads back from the
//! live viewport.

use std::collections::HashSet;

use log::debug;

use super::error::FlowError;
use super::types::{FlowData, FlowEdge, FlowNode, FocusConfig};

/// A request for the viewport produced by a controller operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportCommand {
	/// Animate so world point `(x, y)` ends up centered at `zoom`.
	Center {
		/// World x of the new view center.
		x: f64,
		/// World y of the new view center.
		y: f64,
		/// Zoom at the end of the animation.
		zoom: f64,
		/// Animation length in milliseconds.
		duration_ms: f64,
	},
	/// Jump to `zoom` immediately.
	ZoomTo {
		/// Target zoom.
		zoom: f64,
	},
}

/// Owns the diagram model and the focus state layered on top of it.
#[derive(Clone, Debug)]
pub struct FocusController {
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	selected: Option<String>,
	zoom_level: f64,
	config: FocusConfig,
}

impl FocusController {
	/// Build a controller from input data, rejecting duplicate node IDs and
	/// edges whose endpoints do not exist.
	pub fn new(data: FlowData) -> Result<Self, FlowError> {
		let mut ids = HashSet::new();
		for node in &data.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(FlowError::DuplicateNode(node.id.clone()));
			}
		}
		for edge in &data.edges {
			for end in [&edge.source, &edge.target] {
				if !ids.contains(end.as_str()) {
					return Err(FlowError::DanglingEdge {
						edge: edge.id.clone(),
						node: end.clone(),
					});
				}
			}
		}

		Ok(Self {
			nodes: data.nodes,
			edges: data.edges,
			selected: None,
			zoom_level: data.focus.initial_zoom,
			config: data.focus,
		})
	}

	pub fn nodes(&self) -> &[FlowNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[FlowEdge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Currently focused node, if any node has been focused yet.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Last zoom requested through the slider.
	pub fn zoom_level(&self) -> f64 {
		self.zoom_level
	}

	pub fn config(&self) -> &FocusConfig {
		&self.config
	}

	/// Focus a node: select it and center the view on it at the focus zoom.
	///
	/// Unknown IDs leave the selection untouched.
	pub fn select_node(&mut self, id: &str) -> Result<ViewportCommand, FlowError> {
		let position = self
			.node(id)
			.map(|n| n.position)
			.ok_or_else(|| FlowError::UnknownNode(id.to_string()))?;

		self.selected = Some(id.to_string());
		debug!("topic-flow: focused node {}", id);

		Ok(ViewportCommand::Center {
			x: position.x + self.config.focus_offset.x,
			y: position.y + self.config.focus_offset.y,
			zoom: self.config.focus_zoom,
			duration_ms: self.config.focus_duration_ms,
		})
	}

	/// Record a manually chosen zoom. The value is passed through unclamped;
	/// the viewport applies its own limits.
	pub fn set_zoom_level(&mut self, zoom: f64) -> ViewportCommand {
		self.zoom_level = zoom;
		ViewportCommand::ZoomTo { zoom }
	}

	/// Append an edge from `source` to `target`.
	///
	/// The edge ID is `e<source>-<target>`, suffixed with `-<n>` when that pair
	/// has been connected before.
	pub fn connect(&mut self, source: &str, target: &str) -> Result<&FlowEdge, FlowError> {
		for end in [source, target] {
			if self.node(end).is_none() {
				return Err(FlowError::UnknownNode(end.to_string()));
			}
		}

		let base = format!("e{}-{}", source, target);
		let mut id = base.clone();
		let mut n = 1;
		while self.has_edge(&id) {
			id = format!("{}-{}", base, n);
			n += 1;
		}
		debug!("topic-flow: connected {} -> {} as {}", source, target, id);

		self.edges.push(FlowEdge {
			id,
			source: source.to_string(),
			target: target.to_string(),
			animated: false,
		});
		Ok(&self.edges[self.edges.len() - 1])
	}

	/// Whether node `id` shows its real content at live zoom `zoom`.
	///
	/// True before anything has been focused, for the focused node itself, and
	/// for every node while zoomed out below the threshold.
	pub fn is_content_visible(&self, id: &str, zoom: f64) -> bool {
		match &self.selected {
			None => true,
			Some(selected) => selected == id || zoom < self.config.visibility_threshold,
		}
	}

	fn has_edge(&self, id: &str) -> bool {
		self.edges.iter().any(|e| e.id == id)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::topics::builtin_topics;

	fn controller() -> FocusController {
		FocusController::new(builtin_topics()).unwrap()
	}

	const IDS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

	#[test]
	fn nothing_selected_shows_everything_at_any_zoom() {
		let c = controller();
		for zoom in [0.5, 1.0, 1.5, 2.0, 3.0] {
			for id in IDS {
				assert!(c.is_content_visible(id, zoom), "node {id} at {zoom}");
			}
		}
	}

	#[test]
	fn selected_node_is_always_visible() {
		let mut c = controller();
		c.select_node("4").unwrap();
		for zoom in [0.5, 1.49, 1.5, 2.0, 3.0] {
			assert!(c.is_content_visible("4", zoom));
		}
	}

	#[test]
	fn unselected_nodes_follow_threshold() {
		let mut c = controller();
		c.select_node("1").unwrap();

		assert!(c.is_content_visible("2", 1.0));
		assert!(c.is_content_visible("2", 1.49));
		assert!(!c.is_content_visible("2", 1.5));
		assert!(!c.is_content_visible("2", 2.0));
	}

	#[test]
	fn select_node_centers_with_offset() {
		let mut c = controller();
		c.set_zoom_level(0.8);
		let cmd = c.select_node("3").unwrap();

		assert_eq!(
			cmd,
			ViewportCommand::Center {
				x: 700.0,
				y: 125.0,
				zoom: 2.0,
				duration_ms: 800.0,
			}
		);
		assert_eq!(c.selected(), Some("3"));
		// focusing animates the view but leaves the slider's zoom alone
		assert_eq!(c.zoom_level(), 0.8);
	}

	#[test]
	fn select_node_is_idempotent() {
		let mut once = controller();
		once.select_node("2").unwrap();
		let mut twice = controller();
		twice.select_node("2").unwrap();
		twice.select_node("2").unwrap();

		assert_eq!(once.selected(), twice.selected());
		for id in IDS {
			assert_eq!(
				once.is_content_visible(id, 2.0),
				twice.is_content_visible(id, 2.0)
			);
		}
	}

	#[test]
	fn unknown_node_is_rejected_without_state_change() {
		let mut c = controller();
		c.select_node("2").unwrap();

		assert_eq!(
			c.select_node("missing"),
			Err(FlowError::UnknownNode("missing".into()))
		);
		assert_eq!(c.selected(), Some("2"));
	}

	#[test]
	fn set_zoom_level_is_unclamped() {
		let mut c = controller();
		assert_eq!(c.set_zoom_level(7.5), ViewportCommand::ZoomTo { zoom: 7.5 });
		assert_eq!(c.zoom_level(), 7.5);
	}

	#[test]
	fn connect_appends_exactly_one_edge() {
		let mut c = controller();
		let before = c.edges().len();
		let edge = c.connect("2", "3").unwrap().clone();

		assert_eq!(c.edges().len(), before + 1);
		assert_eq!(edge.source, "2");
		assert_eq!(edge.target, "3");
		assert_eq!(edge.id, "e2-3");
		assert!(!edge.animated);
	}

	#[test]
	fn repeated_connect_keeps_ids_unique() {
		let mut c = controller();
		let first = c.connect("1", "2").unwrap().id.clone();
		let second = c.connect("1", "2").unwrap().id.clone();

		// "e1-2" already exists in the built-in edges
		assert_eq!(first, "e1-2-1");
		assert_eq!(second, "e1-2-2");
		let ids: HashSet<_> = c.edges().iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids.len(), c.edges().len());
	}

	#[test]
	fn connect_rejects_unknown_endpoints() {
		let mut c = controller();
		let before = c.edges().len();

		assert_eq!(
			c.connect("1", "9").map(|e| e.id.clone()),
			Err(FlowError::UnknownNode("9".into()))
		);
		assert_eq!(c.edges().len(), before);
	}

	#[test]
	fn new_rejects_duplicates_and_dangling_edges() {
		let mut data = builtin_topics();
		data.nodes.push(data.nodes[0].clone());
		assert_eq!(
			FocusController::new(data).err(),
			Some(FlowError::DuplicateNode("1".into()))
		);

		let mut data = builtin_topics();
		data.edges[0].target = "42".into();
		assert_eq!(
			FocusController::new(data).err(),
			Some(FlowError::DanglingEdge {
				edge: "e1-2".into(),
				node: "42".into(),
			})
		);
	}

	#[test]
	fn switching_focus_moves_visibility() {
		let mut c = controller();
		c.select_node("3").unwrap();
		c.select_node("5").unwrap();

		assert!(!c.is_content_visible("3", 2.0));
		assert!(c.is_content_visible("5", 2.0));
	}
}
