//! Pan/zoom viewport with animated centering.
//!
//! The transform maps world coordinates to screen pixels as
//! `screen = world * k + (x, y)`. Animations interpolate the world point at the
//! screen center together with the zoom, so a focus transition glides towards
//! its target instead of swinging around the canvas origin.

use log::warn;

use super::focus::ViewportCommand;

/// Smallest zoom the viewport accepts.
pub const MIN_ZOOM: f64 = 0.25;
/// Largest zoom the viewport accepts.
pub const MAX_ZOOM: f64 = 4.0;

/// Pan and zoom transform applied to the entire diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to MIN_ZOOM..MAX_ZOOM).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	pub fn contains(&self, px: f64, py: f64) -> bool {
		px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect::new(
			x,
			y,
			self.right().max(other.right()) - x,
			self.bottom().max(other.bottom()) - y,
		)
	}
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

fn clamp_zoom(k: f64) -> f64 {
	k.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// An in-flight centering transition.
#[derive(Clone, Debug)]
struct Transition {
	from_center: (f64, f64),
	from_k: f64,
	to_center: (f64, f64),
	to_k: f64,
	elapsed_ms: f64,
	duration_ms: f64,
}

/// The visible window onto the diagram.
#[derive(Clone, Debug)]
pub struct Viewport {
	transform: ViewTransform,
	width: f64,
	height: f64,
	transition: Option<Transition>,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			width,
			height,
			transition: None,
		}
	}

	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	/// Live zoom, including mid-animation and gesture-driven values.
	pub fn zoom(&self) -> f64 {
		self.transform.k
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Carry out a command issued by the focus controller.
	pub fn apply(&mut self, command: ViewportCommand) {
		match command {
			ViewportCommand::Center {
				x,
				y,
				zoom,
				duration_ms,
			} => self.set_center(x, y, zoom, duration_ms),
			ViewportCommand::ZoomTo { zoom } => self.zoom_to(zoom),
		}
	}

	/// World point currently under the middle of the screen.
	pub fn center(&self) -> (f64, f64) {
		self.transform
			.screen_to_world(self.width / 2.0, self.height / 2.0)
	}

	/// World-space rectangle visible on screen.
	pub fn visible_world_rect(&self) -> Rect {
		let (x, y) = self.transform.screen_to_world(0.0, 0.0);
		Rect::new(
			x,
			y,
			self.width / self.transform.k,
			self.height / self.transform.k,
		)
	}

	/// Move world point `(cx, cy)` to the screen center at `zoom`, animating over
	/// `duration_ms`. A transition already in flight is redirected from wherever
	/// it has got to.
	pub fn set_center(&mut self, cx: f64, cy: f64, zoom: f64, duration_ms: f64) {
		if !zoom.is_finite() {
			warn!("topic-flow: ignoring non-finite center zoom {}", zoom);
			return;
		}
		let to_k = clamp_zoom(zoom);
		if duration_ms <= 0.0 {
			self.transition = None;
			self.transform = self.centered_on(cx, cy, to_k);
			return;
		}
		self.transition = Some(Transition {
			from_center: self.center(),
			from_k: self.transform.k,
			to_center: (cx, cy),
			to_k,
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	/// Zoom about the screen center immediately, cancelling any transition.
	pub fn zoom_to(&mut self, zoom: f64) {
		if !zoom.is_finite() {
			warn!("topic-flow: ignoring non-finite zoom {}", zoom);
			return;
		}
		self.transition = None;
		let (cx, cy) = self.center();
		self.transform = self.centered_on(cx, cy, clamp_zoom(zoom));
	}

	/// Zoom by `factor` keeping the world point under screen `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transition = None;
		let t = &mut self.transform;
		let new_k = clamp_zoom(t.k * factor);
		let ratio = new_k / t.k;
		t.x = sx - (sx - t.x) * ratio;
		t.y = sy - (sy - t.y) * ratio;
		t.k = new_k;
	}

	/// Set the translation directly (pan gestures), cancelling any transition.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.transition = None;
		self.transform.x = x;
		self.transform.y = y;
	}

	/// Fit a world rectangle on screen with `padding` as a fraction of its size.
	pub fn fit_view(&mut self, bounds: Rect, padding: f64) {
		if bounds.width <= 0.0 || bounds.height <= 0.0 {
			return;
		}
		let k = clamp_zoom(
			(self.width / (bounds.width * (1.0 + padding)))
				.min(self.height / (bounds.height * (1.0 + padding))),
		);
		let (cx, cy) = bounds.center();
		self.transition = None;
		self.transform = self.centered_on(cx, cy, k);
	}

	/// Advance any running transition by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let Some(tr) = self.transition.as_mut() else {
			return;
		};
		tr.elapsed_ms += dt * 1000.0;
		let t = tr.elapsed_ms / tr.duration_ms;
		let ((cx, cy), k) = if t >= 1.0 {
			let target = (tr.to_center, tr.to_k);
			self.transition = None;
			target
		} else {
			let e = ease_in_out_cubic(t);
			(
				(
					tr.from_center.0 + (tr.to_center.0 - tr.from_center.0) * e,
					tr.from_center.1 + (tr.to_center.1 - tr.from_center.1) * e,
				),
				tr.from_k + (tr.to_k - tr.from_k) * e,
			)
		};
		self.transform = self.centered_on(cx, cy, k);
	}

	fn centered_on(&self, cx: f64, cy: f64, k: f64) -> ViewTransform {
		ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	fn run(viewport: &mut Viewport, seconds: f64) {
		let steps = (seconds / 0.016).ceil() as usize;
		for _ in 0..steps {
			viewport.tick(0.016);
		}
	}

	#[test]
	fn set_center_lands_on_target() {
		let mut v = Viewport::new(800.0, 600.0);
		v.set_center(400.0, 175.0, 2.0, 800.0);
		assert!(v.is_animating());

		run(&mut v, 0.4);
		assert!(v.is_animating());
		assert!(v.zoom() > 1.0 && v.zoom() < 2.0);

		run(&mut v, 0.5);
		assert!(!v.is_animating());
		assert_eq!(v.zoom(), 2.0);
		let (sx, sy) = v.transform().world_to_screen(400.0, 175.0);
		assert!(approx(sx, 400.0) && approx(sy, 300.0));
	}

	#[test]
	fn set_center_redirects_mid_flight() {
		let mut v = Viewport::new(800.0, 600.0);
		v.set_center(400.0, 175.0, 2.0, 800.0);
		run(&mut v, 0.3);
		let k_mid = v.zoom();

		v.set_center(-200.0, 50.0, 1.5, 800.0);
		// redirect starts from the in-flight transform, not the old target
		v.tick(0.0);
		assert!(approx(v.zoom(), k_mid));

		run(&mut v, 0.9);
		let (cx, cy) = v.center();
		assert!(approx(cx, -200.0) && approx(cy, 50.0));
		assert_eq!(v.zoom(), 1.5);
	}

	#[test]
	fn zero_duration_applies_immediately() {
		let mut v = Viewport::new(800.0, 600.0);
		v.set_center(10.0, 20.0, 3.0, 0.0);
		assert!(!v.is_animating());
		assert_eq!(v.zoom(), 3.0);
		assert_eq!(v.center(), (10.0, 20.0));
	}

	#[test]
	fn zoom_to_keeps_center_and_cancels_transition() {
		let mut v = Viewport::new(800.0, 600.0);
		v.pan_to(100.0, 50.0);
		let before = v.center();
		v.set_center(500.0, 500.0, 2.0, 800.0);

		v.zoom_to(1.2);
		assert!(!v.is_animating());
		assert_eq!(v.zoom(), 1.2);
		let after = v.center();
		assert!(approx(before.0, after.0) && approx(before.1, after.1));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut v = Viewport::new(800.0, 600.0);
		v.zoom_to(10.0);
		assert_eq!(v.zoom(), MAX_ZOOM);
		v.zoom_to(0.01);
		assert_eq!(v.zoom(), MIN_ZOOM);
		v.zoom_to(f64::NAN);
		assert_eq!(v.zoom(), MIN_ZOOM);
	}

	#[test]
	fn zoom_at_keeps_point_under_cursor() {
		let mut v = Viewport::new(800.0, 600.0);
		let world = v.transform().screen_to_world(120.0, 80.0);
		v.zoom_at(120.0, 80.0, 1.1);
		let (sx, sy) = v.transform().world_to_screen(world.0, world.1);
		assert!(approx(sx, 120.0) && approx(sy, 80.0));
		assert!(approx(v.zoom(), 1.1));
	}

	#[test]
	fn fit_view_covers_bounds() {
		let mut v = Viewport::new(800.0, 600.0);
		let bounds = Rect::new(50.0, 50.0, 750.0, 530.0);
		v.fit_view(bounds, 0.1);

		let visible = v.visible_world_rect();
		assert!(visible.x <= bounds.x && visible.right() >= bounds.right());
		assert!(visible.y <= bounds.y && visible.bottom() >= bounds.bottom());
		let (cx, cy) = v.center();
		assert!(approx(cx, 425.0) && approx(cy, 315.0));
	}

	#[test]
	fn rect_union_and_contains() {
		let a = Rect::new(0.0, 0.0, 10.0, 10.0);
		let b = Rect::new(5.0, -5.0, 20.0, 5.0);
		assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 25.0, 15.0));
		assert!(a.contains(10.0, 0.0));
		assert!(!a.contains(10.5, 0.0));
	}
}
