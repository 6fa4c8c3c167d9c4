//! Zoom-dependent sizing for diagram visuals.
//!
//! Node boxes and their text live in world space and grow with the zoom, the way
//! a document does. Strokes, grid dots and handle hit areas need guard rails so
//! they neither vanish when zoomed out nor turn into blobs when zoomed in.
//!
//! - [`ScaleBehavior::World`]: scales with zoom.
//! - [`ScaleBehavior::Screen`]: constant on-screen size.
//! - [`ScaleBehavior::Clamped`]: world-space size limited to a screen-space band.

/// How a size reacts to the zoom level `k`.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size.
	World,
	/// Constant screen-space size in pixels.
	Screen,
	/// World-space size whose on-screen size stays within
	/// `min_screen..=max_screen` pixels.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value to draw with after the canvas transform is applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// How opacity reacts to the zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Fully opaque at every zoom.
	Constant,
	/// Invisible at `zero_alpha_k`, fully visible from `full_alpha_k` up.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Node box and text sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Font size of node content in world units.
	pub font_size: f64,
	pub line_height: f64,
	/// Inner padding of the node box in world units.
	pub padding: f64,
	pub corner_radius: f64,
	/// Outline drawn around the focused node, in screen pixels.
	pub selected_border: f64,
}

/// Connection handle sizing.
#[derive(Clone, Debug)]
pub struct HandleScaleConfig {
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Hit radius for starting a connection.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
}

/// Edge stroke sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	pub line_width: f64,
	pub line_behavior: ScaleBehavior,
	/// Dash pattern (dash, gap) for animated edges, in world units.
	pub dash_pattern: (f64, f64),
	/// Dash travel speed for animated edges (world units per second).
	pub flow_speed: f64,
}

/// Background dot grid.
#[derive(Clone, Debug)]
pub struct GridScaleConfig {
	/// Distance between dots in world units.
	pub gap: f64,
	/// Dot radius in screen pixels.
	pub dot_radius: f64,
	/// Dots fade out when zoomed far out and packed too tightly.
	pub alpha_behavior: AlphaBehavior,
}

/// Complete scale configuration for all diagram elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub handle: HandleScaleConfig,
	pub edge: EdgeScaleConfig,
	pub grid: GridScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				font_size: 14.0,
				line_height: 18.0,
				padding: 20.0,
				corner_radius: 5.0,
				selected_border: 1.5,
			},
			handle: HandleScaleConfig {
				radius: 4.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: 10.0,
				},
				hit_radius: 8.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.0,
				line_behavior: ScaleBehavior::Clamped {
					min_screen: 0.75,
					max_screen: 3.0,
				},
				dash_pattern: (5.0, 5.0),
				flow_speed: 20.0,
			},
			grid: GridScaleConfig {
				gap: 16.0,
				dot_radius: 1.0,
				alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.3,
					full_alpha_k: 0.6,
				},
			},
		}
	}
}

/// Scale values resolved for one zoom level.
///
/// Built once per frame. Sizes are world-space unless noted.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub content_font: String,
	pub handle_radius: f64,
	pub handle_hit_radius: f64,
	pub edge_line_width: f64,
	pub selected_border: f64,
	/// Grid spacing on screen, in pixels.
	pub grid_gap_screen: f64,
	pub grid_alpha: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			content_font: format!("{}px sans-serif", config.node.font_size),
			handle_radius: config
				.handle
				.radius_behavior
				.apply(config.handle.radius, k),
			handle_hit_radius: config
				.handle
				.hit_behavior
				.apply(config.handle.hit_radius, k),
			edge_line_width: config
				.edge
				.line_behavior
				.apply(config.edge.line_width, k),
			selected_border: ScaleBehavior::Screen.apply(config.node.selected_border, k),
			grid_gap_screen: config.grid.gap * k,
			grid_alpha: config.grid.alpha_behavior.apply(k),
		}
	}

	/// Dash offset for the flowing animation at `flow_time` seconds.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn clamped_keeps_screen_size_in_band() {
		let b = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: 10.0,
		};
		// zoomed out: 4 world units would be 1px, so it grows to 3px on screen
		assert_eq!(b.apply(4.0, 0.25) * 0.25, 3.0);
		// normal zoom: untouched
		assert_eq!(b.apply(4.0, 1.0), 4.0);
		// zoomed in: 4 world units would be 16px, capped at 10px
		assert_eq!(b.apply(4.0, 4.0) * 4.0, 10.0);
	}

	#[test]
	fn screen_behavior_cancels_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(1.5, 2.0), 0.75);
		assert_eq!(ScaleBehavior::World.apply(1.5, 2.0), 1.5);
	}

	#[test]
	fn grid_fades_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.25).grid_alpha, 0.0);
		assert_eq!(ScaledValues::new(&config, 1.0).grid_alpha, 1.0);
		let mid = ScaledValues::new(&config, 0.45).grid_alpha;
		assert!(mid > 0.0 && mid < 1.0);
		assert_eq!(AlphaBehavior::Constant.apply(0.1), 1.0);
	}

	#[test]
	fn scaled_values_follow_zoom() {
		let config = ScaleConfig::default();
		let v = ScaledValues::new(&config, 2.0);
		assert_eq!(v.grid_gap_screen, 32.0);
		assert_eq!(v.selected_border, 0.75);
		assert_eq!(v.content_font, "14px sans-serif");
		assert_eq!(v.dash_offset(2.0, 20.0), -40.0);
	}
}
