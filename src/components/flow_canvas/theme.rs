//! Visual theming for the diagram canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Canvas background and dot grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	pub grid_color: Color,
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub fill: Color,
	pub text: Color,
	/// Text color of the zoom-in placeholder.
	pub placeholder_text: Color,
	/// Outline of the focused node.
	pub selected_border: Color,
	/// Outline of the node under the cursor.
	pub hover_border: Color,
	pub shadow: Color,
	/// Shadow blur and vertical offset in world units.
	pub shadow_blur: f64,
	pub shadow_offset_y: f64,
}

/// Connection handle style.
#[derive(Clone, Debug)]
pub struct HandleStyle {
	pub fill: Color,
	pub border: Color,
}

/// Edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line drawn while dragging out a new connection.
	pub connecting: Color,
}

/// Minimap overlay style.
#[derive(Clone, Debug)]
pub struct MinimapStyle {
	pub background: Color,
	pub node: Color,
	pub selected_node: Color,
	/// Fill outside the visible viewport rectangle.
	pub mask: Color,
	pub border: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub handle: HandleStyle,
	pub edge: EdgeStyle,
	pub minimap: MinimapStyle,
}

impl Theme {
	/// Light paper theme (default).
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				grid_color: Color::rgb(170, 170, 170),
			},
			node: NodeStyle {
				fill: Color::rgb(255, 255, 255),
				text: Color::rgb(34, 34, 34),
				placeholder_text: Color::rgb(136, 136, 136),
				selected_border: Color::rgb(26, 25, 43),
				hover_border: Color::rgba(26, 25, 43, 0.35),
				shadow: Color::rgba(0, 0, 0, 0.1),
				shadow_blur: 6.0,
				shadow_offset_y: 3.0,
			},
			handle: HandleStyle {
				fill: Color::rgb(26, 25, 43),
				border: Color::rgb(255, 255, 255),
			},
			edge: EdgeStyle {
				color: Color::rgb(177, 177, 183),
				connecting: Color::rgb(74, 144, 226),
			},
			minimap: MinimapStyle {
				background: Color::rgb(255, 255, 255),
				node: Color::rgb(226, 226, 226),
				selected_node: Color::rgb(120, 130, 150),
				mask: Color::rgba(240, 240, 240, 0.6),
				border: Color::rgba(0, 0, 0, 0.15),
			},
		}
	}

	/// Dark slate theme.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				grid_color: Color::rgb(70, 78, 90),
			},
			node: NodeStyle {
				fill: Color::rgb(40, 46, 56),
				text: Color::rgb(230, 233, 238),
				placeholder_text: Color::rgb(130, 140, 155),
				selected_border: Color::rgb(129, 161, 193),
				hover_border: Color::rgba(129, 161, 193, 0.4),
				shadow: Color::rgba(0, 0, 0, 0.4),
				shadow_blur: 8.0,
				shadow_offset_y: 3.0,
			},
			handle: HandleStyle {
				fill: Color::rgb(129, 161, 193),
				border: Color::rgb(22, 27, 34),
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.7),
				connecting: Color::rgb(129, 161, 193),
			},
			minimap: MinimapStyle {
				background: Color::rgb(30, 35, 42),
				node: Color::rgb(70, 78, 90),
				selected_node: Color::rgb(129, 161, 193),
				mask: Color::rgba(10, 12, 16, 0.6),
				border: Color::rgba(255, 255, 255, 0.1),
			},
		}
	}

	/// Look a preset up by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"light" => Some(Self::light()),
			"dark" => Some(Self::dark()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn css_uses_hex_when_opaque() {
		assert_eq!(Color::rgb(170, 170, 170).to_css(), "#aaaaaa");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.1).to_css(),
			"rgba(0, 0, 0, 0.1)"
		);
	}

	#[test]
	fn presets_resolve_by_name() {
		assert_eq!(Theme::by_name("dark").map(|t| t.name), Some("dark"));
		assert_eq!(Theme::default().name, "light");
		assert!(Theme::by_name("neon").is_none());
	}
}
