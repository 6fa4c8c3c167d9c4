//! Minimap geometry: where the overview sits on screen and how world
//! coordinates map into it.

use super::viewport::Rect;

/// Minimap width and height in screen pixels.
pub const MINIMAP_SIZE: (f64, f64) = (200.0, 150.0);
/// Gap between the minimap and the canvas corner.
pub const MINIMAP_MARGIN: f64 = 15.0;

/// Screen placement and world mapping of the minimap for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapLayout {
	/// Minimap frame in screen pixels (bottom-right corner of the canvas).
	pub frame: Rect,
	scale: f64,
	offset_x: f64,
	offset_y: f64,
}

impl MinimapLayout {
	/// Fit the union of the diagram `content` and the `visible` viewport
	/// rectangle into the minimap frame, centered.
	pub fn new(content: Rect, visible: Rect, canvas_width: f64, canvas_height: f64) -> Self {
		let (fw, fh) = MINIMAP_SIZE;
		let frame = Rect::new(
			canvas_width - fw - MINIMAP_MARGIN,
			canvas_height - fh - MINIMAP_MARGIN,
			fw,
			fh,
		);
		let world = content.union(&visible);
		let scale = if world.width > 0.0 && world.height > 0.0 {
			(fw / world.width).min(fh / world.height)
		} else {
			1.0
		};
		let (cx, cy) = world.center();
		let (fcx, fcy) = frame.center();

		Self {
			frame,
			scale,
			offset_x: fcx - cx * scale,
			offset_y: fcy - cy * scale,
		}
	}

	/// Map a world rectangle into minimap screen space.
	pub fn project(&self, r: Rect) -> Rect {
		Rect::new(
			r.x * self.scale + self.offset_x,
			r.y * self.scale + self.offset_y,
			r.width * self.scale,
			r.height * self.scale,
		)
	}

	/// World point under minimap screen point `(sx, sy)`, if it lies inside
	/// the frame.
	pub fn world_at(&self, sx: f64, sy: f64) -> Option<(f64, f64)> {
		if !self.frame.contains(sx, sy) {
			return None;
		}
		Some((
			(sx - self.offset_x) / self.scale,
			(sy - self.offset_y) / self.scale,
		))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn layout() -> MinimapLayout {
		MinimapLayout::new(
			Rect::new(0.0, 0.0, 400.0, 300.0),
			Rect::new(100.0, 100.0, 100.0, 75.0),
			1000.0,
			800.0,
		)
	}

	#[test]
	fn frame_sits_in_bottom_right_corner() {
		assert_eq!(layout().frame, Rect::new(785.0, 635.0, 200.0, 150.0));
	}

	#[test]
	fn content_fills_frame() {
		let l = layout();
		assert_eq!(l.project(Rect::new(0.0, 0.0, 400.0, 300.0)), l.frame);
	}

	#[test]
	fn world_at_inverts_projection() {
		let l = layout();
		let r = l.project(Rect::new(200.0, 150.0, 0.0, 0.0));
		assert_eq!(l.world_at(r.x, r.y), Some((200.0, 150.0)));
		assert_eq!(l.world_at(10.0, 10.0), None);
	}

	#[test]
	fn visible_area_outside_content_widens_bounds() {
		let l = MinimapLayout::new(
			Rect::new(0.0, 0.0, 400.0, 300.0),
			Rect::new(-400.0, 0.0, 400.0, 300.0),
			1000.0,
			800.0,
		);
		let content = l.project(Rect::new(0.0, 0.0, 400.0, 300.0));
		assert!(content.width < l.frame.width);
		assert!(content.x > l.frame.x);
	}
}
