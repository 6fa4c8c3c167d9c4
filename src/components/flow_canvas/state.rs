//! Diagram state and interaction tracking.
//!
//! Combines the focus controller with the viewport and the bookkeeping needed
//! for pointer gestures: panning, click-versus-drag detection on nodes, and
//! dragging a new connection out of a handle.

use log::info;

use super::error::FlowError;
use super::focus::FocusController;
use super::minimap::MinimapLayout;
use super::scale::{ScaleConfig, ScaledValues};
use super::types::{FlowData, FlowNode};
use super::viewport::{Rect, Viewport};

/// Node box width in world units.
pub const NODE_WIDTH: f64 = 200.0;
/// Node box height in world units.
pub const NODE_HEIGHT: f64 = 80.0;
/// Pointer travel (screen pixels) after which a press on a node becomes a pan.
pub const CLICK_SLOP: f64 = 4.0;
/// Padding used when fitting the diagram into view.
pub const FIT_PADDING: f64 = 0.1;
/// Zoom factor of the zoom in / zoom out controls.
pub const ZOOM_STEP: f64 = 1.2;

/// Which side of a node a handle sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
	/// Left side: incoming edges.
	Target,
	/// Right side: outgoing edges.
	Source,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A press on a node that turns into a click if the pointer stays put.
#[derive(Clone, Debug)]
pub struct NodePress {
	pub node_idx: usize,
	pub start_x: f64,
	pub start_y: f64,
}

/// A connection being dragged out of a handle.
#[derive(Clone, Debug)]
pub struct ConnectDrag {
	pub node_idx: usize,
	pub handle: HandleKind,
	/// Current pointer position in world units.
	pub cursor_x: f64,
	pub cursor_y: f64,
}

/// What a pointer release amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
	None,
	/// A node was clicked and focused.
	Selected(String),
	/// A new edge was added.
	Connected(String),
}

/// Core diagram state, created when the component mounts and mutated by event
/// handlers and the animation loop.
pub struct FlowState {
	pub focus: FocusController,
	pub viewport: Viewport,
	pub pan: PanState,
	pub press: Option<NodePress>,
	pub pending_edge: Option<ConnectDrag>,
	pub hovered: Option<usize>,
	pub flow_time: f64,
	scale: ScaleConfig,
}

impl FlowState {
	/// Build the state, fit the diagram into view and apply the initial zoom.
	pub fn new(data: FlowData, width: f64, height: f64) -> Result<Self, FlowError> {
		let focus = FocusController::new(data)?;
		let mut state = Self {
			focus,
			viewport: Viewport::new(width, height),
			pan: PanState::default(),
			press: None,
			pending_edge: None,
			hovered: None,
			flow_time: 0.0,
			scale: ScaleConfig::default(),
		};
		state.fit_view();
		let initial = state.focus.config().initial_zoom;
		state.set_zoom_level(initial);
		info!(
			"topic-flow: {} nodes, {} edges",
			state.focus.nodes().len(),
			state.focus.edges().len()
		);
		Ok(state)
	}

	pub fn scale(&self) -> &ScaleConfig {
		&self.scale
	}

	/// Focus node `id` and start centering on it.
	pub fn select_node(&mut self, id: &str) -> Result<(), FlowError> {
		let command = self.focus.select_node(id)?;
		self.viewport.apply(command);
		Ok(())
	}

	/// Apply a manually chosen zoom immediately.
	pub fn set_zoom_level(&mut self, zoom: f64) {
		let command = self.focus.set_zoom_level(zoom);
		self.viewport.apply(command);
	}

	/// Add an edge between two nodes. Returns the new edge ID.
	pub fn connect(&mut self, source: &str, target: &str) -> Result<String, FlowError> {
		self.focus.connect(source, target).map(|e| e.id.clone())
	}

	/// Whether node `id` shows its content at the live viewport zoom.
	pub fn is_content_visible(&self, id: &str) -> bool {
		self.focus.is_content_visible(id, self.viewport.zoom())
	}

	pub fn zoom_in(&mut self) {
		self.set_zoom_level(self.viewport.zoom() * ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.set_zoom_level(self.viewport.zoom() / ZOOM_STEP);
	}

	pub fn fit_view(&mut self) {
		if let Some(bounds) = self.content_bounds() {
			self.viewport.fit_view(bounds, FIT_PADDING);
		}
	}

	/// World-space box of a node.
	pub fn node_rect(node: &FlowNode) -> Rect {
		Rect::new(node.position.x, node.position.y, NODE_WIDTH, NODE_HEIGHT)
	}

	/// World-space center of one of a node's handles.
	pub fn handle_position(node: &FlowNode, handle: HandleKind) -> (f64, f64) {
		let r = Self::node_rect(node);
		let y = r.y + r.height / 2.0;
		match handle {
			HandleKind::Target => (r.x, y),
			HandleKind::Source => (r.right(), y),
		}
	}

	/// Bounding box of all nodes.
	pub fn content_bounds(&self) -> Option<Rect> {
		self.focus
			.nodes()
			.iter()
			.map(Self::node_rect)
			.reduce(|acc, r| acc.union(&r))
	}

	pub fn minimap(&self) -> Option<MinimapLayout> {
		self.content_bounds().map(|content| {
			MinimapLayout::new(
				content,
				self.viewport.visible_world_rect(),
				self.viewport.width(),
				self.viewport.height(),
			)
		})
	}

	/// Topmost node under screen point `(sx, sy)`.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.viewport.transform().screen_to_world(sx, sy);
		self.focus
			.nodes()
			.iter()
			.rposition(|n| Self::node_rect(n).contains(wx, wy))
	}

	/// Handle under screen point `(sx, sy)`.
	pub fn handle_at_position(&self, sx: f64, sy: f64) -> Option<(usize, HandleKind)> {
		let (wx, wy) = self.viewport.transform().screen_to_world(sx, sy);
		let hit = ScaledValues::new(&self.scale, self.viewport.zoom()).handle_hit_radius;
		self.focus
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find_map(|(idx, node)| {
				[HandleKind::Source, HandleKind::Target]
					.into_iter()
					.find(|&kind| {
						let (hx, hy) = Self::handle_position(node, kind);
						let (dx, dy) = (hx - wx, hy - wy);
						(dx * dx + dy * dy).sqrt() <= hit
					})
					.map(|kind| (idx, kind))
			})
	}

	/// Pointer pressed at screen `(sx, sy)`: start a connection, a node press
	/// or a pan. Presses on the minimap recenter the view there.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some((wx, wy)) = self.minimap().and_then(|m| m.world_at(sx, sy)) {
			let k = self.viewport.zoom();
			self.viewport.set_center(wx, wy, k, 0.0);
			return;
		}

		if let Some((node_idx, handle)) = self.handle_at_position(sx, sy) {
			let (cursor_x, cursor_y) = self.viewport.transform().screen_to_world(sx, sy);
			self.pending_edge = Some(ConnectDrag {
				node_idx,
				handle,
				cursor_x,
				cursor_y,
			});
			return;
		}

		self.press = self.node_at_position(sx, sy).map(|node_idx| NodePress {
			node_idx,
			start_x: sx,
			start_y: sy,
		});
		let t = self.viewport.transform();
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: t.x,
			transform_start_y: t.y,
		};
	}

	/// Pointer moved to screen `(sx, sy)`.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(drag) = self.pending_edge.as_mut() {
			let (wx, wy) = self.viewport.transform().screen_to_world(sx, sy);
			drag.cursor_x = wx;
			drag.cursor_y = wy;
			self.hovered = self.node_at_position(sx, sy);
			return;
		}

		if !self.pan.active {
			self.hovered = self.node_at_position(sx, sy);
			return;
		}

		if let Some(press) = &self.press {
			let (dx, dy) = (sx - press.start_x, sy - press.start_y);
			if (dx * dx + dy * dy).sqrt() <= CLICK_SLOP {
				return;
			}
			self.press = None;
		}
		self.viewport.pan_to(
			self.pan.transform_start_x + (sx - self.pan.start_x),
			self.pan.transform_start_y + (sy - self.pan.start_y),
		);
	}

	/// Pointer released at screen `(sx, sy)`: finish a click or a connection.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Result<PointerOutcome, FlowError> {
		self.pan.active = false;

		if let Some(drag) = self.pending_edge.take() {
			let Some(other) = self.node_at_position(sx, sy) else {
				return Ok(PointerOutcome::None);
			};
			if other == drag.node_idx {
				return Ok(PointerOutcome::None);
			}
			let nodes = self.focus.nodes();
			let (from, to) = match drag.handle {
				HandleKind::Source => (nodes[drag.node_idx].id.clone(), nodes[other].id.clone()),
				HandleKind::Target => (nodes[other].id.clone(), nodes[drag.node_idx].id.clone()),
			};
			return self.connect(&from, &to).map(PointerOutcome::Connected);
		}

		if let Some(press) = self.press.take() {
			let id = self.focus.nodes()[press.node_idx].id.clone();
			self.select_node(&id)?;
			return Ok(PointerOutcome::Selected(id));
		}

		Ok(PointerOutcome::None)
	}

	/// Pointer left the canvas: abandon any gesture.
	pub fn pointer_leave(&mut self) {
		self.pan.active = false;
		self.press = None;
		self.pending_edge = None;
		self.hovered = None;
	}

	/// CSS cursor for the pointer at screen `(sx, sy)`.
	pub fn cursor_at(&self, sx: f64, sy: f64) -> &'static str {
		if self.pending_edge.is_some() || self.handle_at_position(sx, sy).is_some() {
			"crosshair"
		} else if self.pan.active && self.press.is_none() {
			"grabbing"
		} else if self.node_at_position(sx, sy).is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	/// Wheel zoom about screen `(sx, sy)`. Purely horizontal scrolls are
	/// ignored.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.viewport.zoom_at(sx, sy, factor);
	}

	pub fn tick(&mut self, dt: f64) {
		self.viewport.tick(dt);
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
	}
}
