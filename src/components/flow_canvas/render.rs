//! Canvas rendering for the diagram.
//!
//! Every frame is drawn from scratch, so node visibility is re-evaluated against
//! the live zoom on each pass. Passes, back to front:
//! 1. Background fill and dot grid (screen space)
//! 2. Edges and the connection being dragged (world space)
//! 3. Node boxes with content or placeholder, then handles (world space)
//! 4. Minimap (screen space)

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule};

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{FlowState, HandleKind, NODE_HEIGHT, NODE_WIDTH};
use super::theme::Theme;
use super::types::FlowNode;
use super::viewport::Rect;

/// Renders the complete diagram to the canvas.
pub fn render(state: &FlowState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let config = state.scale();
	let t = state.viewport.transform();
	let scale = ScaledValues::new(config, t.k);

	draw_background(state, ctx, config, &scale, theme);

	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	draw_edges(state, ctx, config, &scale, theme);
	draw_pending_edge(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, config, &scale, theme);

	ctx.restore();

	draw_minimap(state, ctx, theme);
}

fn draw_background(
	state: &FlowState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let (w, h) = (state.viewport.width(), state.viewport.height());
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, w, h);

	let gap = scale.grid_gap_screen;
	if scale.grid_alpha < 0.01 || gap < 2.0 {
		return;
	}
	let t = state.viewport.transform();
	let r = config.grid.dot_radius;

	ctx.set_fill_style_str(
		&theme
			.background
			.grid_color
			.with_alpha(theme.background.grid_color.a * scale.grid_alpha)
			.to_css(),
	);
	ctx.begin_path();
	let mut x = t.x.rem_euclid(gap);
	while x < w {
		let mut y = t.y.rem_euclid(gap);
		while y < h {
			ctx.move_to(x + r, y);
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
			y += gap;
		}
		x += gap;
	}
	ctx.fill();
}

/// Control points of a horizontal bezier from a right-side handle to a
/// left-side handle.
fn bezier_controls(sx: f64, sy: f64, tx: f64, ty: f64) -> ((f64, f64), (f64, f64)) {
	let offset = ((tx - sx).abs() * 0.5).max(25.0);
	((sx + offset, sy), (tx - offset, ty))
}

fn stroke_bezier(ctx: &CanvasRenderingContext2d, from: (f64, f64), to: (f64, f64)) {
	let (c1, c2) = bezier_controls(from.0, from.1, to.0, to.1);
	ctx.begin_path();
	ctx.move_to(from.0, from.1);
	ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
	ctx.stroke();
}

fn set_dash(ctx: &CanvasRenderingContext2d, pattern: Option<(f64, f64)>, offset: f64) {
	match pattern {
		Some((dash, gap)) => {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(offset);
		}
		None => {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
	}
}

fn draw_edges(
	state: &FlowState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let by_id: HashMap<&str, &FlowNode> = state
		.focus
		.nodes()
		.iter()
		.map(|n| (n.id.as_str(), n))
		.collect();
	let dash_offset = scale.dash_offset(state.flow_time, config.edge.flow_speed);

	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_line_width);

	for edge in state.focus.edges() {
		let (Some(source), Some(target)) = (
			by_id.get(edge.source.as_str()),
			by_id.get(edge.target.as_str()),
		) else {
			continue;
		};
		let pattern = edge.animated.then_some(config.edge.dash_pattern);
		set_dash(ctx, pattern, dash_offset);
		stroke_bezier(
			ctx,
			FlowState::handle_position(source, HandleKind::Source),
			FlowState::handle_position(target, HandleKind::Target),
		);
	}
	set_dash(ctx, None, 0.0);
}

fn draw_pending_edge(
	state: &FlowState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(drag) = &state.pending_edge else {
		return;
	};
	let Some(node) = state.focus.nodes().get(drag.node_idx) else {
		return;
	};
	let anchor = FlowState::handle_position(node, drag.handle);
	let cursor = (drag.cursor_x, drag.cursor_y);
	let (from, to) = match drag.handle {
		HandleKind::Source => (anchor, cursor),
		HandleKind::Target => (cursor, anchor),
	};

	ctx.set_stroke_style_str(&theme.edge.connecting.to_css());
	ctx.set_line_width(scale.edge_line_width * 1.5);
	set_dash(ctx, Some(config.edge.dash_pattern), 0.0);
	stroke_bezier(ctx, from, to);
	set_dash(ctx, None, 0.0);
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) {
	let radius = radius.min(r.width / 2.0).min(r.height / 2.0);
	ctx.begin_path();
	ctx.move_to(r.x + radius, r.y);
	let _ = ctx.arc_to(r.right(), r.y, r.right(), r.bottom(), radius);
	let _ = ctx.arc_to(r.right(), r.bottom(), r.x, r.bottom(), radius);
	let _ = ctx.arc_to(r.x, r.bottom(), r.x, r.y, radius);
	let _ = ctx.arc_to(r.x, r.y, r.right(), r.y, radius);
	ctx.close_path();
}

fn draw_nodes(
	state: &FlowState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let selected = state.focus.selected();
	let placeholder = &state.focus.config().placeholder;
	let padding = config.node.padding;
	let max_lines = ((NODE_HEIGHT - padding) / config.node.line_height)
		.floor()
		.max(1.0) as usize;

	ctx.set_font(&scale.content_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (idx, node) in state.focus.nodes().iter().enumerate() {
		let rect = FlowState::node_rect(node);

		// Shadow blur and offset are not affected by the canvas transform
		ctx.set_shadow_color(&theme.node.shadow.to_css());
		ctx.set_shadow_blur(theme.node.shadow_blur * scale.k);
		ctx.set_shadow_offset_y(theme.node.shadow_offset_y * scale.k);
		rounded_rect_path(ctx, rect, config.node.corner_radius);
		ctx.set_fill_style_str(&theme.node.fill.to_css());
		ctx.fill();
		ctx.set_shadow_color("rgba(0, 0, 0, 0)");

		let border = if selected == Some(node.id.as_str()) {
			Some(theme.node.selected_border)
		} else if state.hovered == Some(idx) {
			Some(theme.node.hover_border)
		} else {
			None
		};
		if let Some(color) = border {
			ctx.set_stroke_style_str(&color.to_css());
			ctx.set_line_width(scale.selected_border);
			ctx.stroke();
		}

		let (text, color) = if state.is_content_visible(&node.id) {
			(node.content.as_str(), theme.node.text)
		} else {
			(placeholder.as_str(), theme.node.placeholder_text)
		};
		let lines = wrap_text(text, NODE_WIDTH - 2.0 * padding, max_lines, |s| {
			ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
		});
		ctx.set_fill_style_str(&color.to_css());
		let (cx, cy) = rect.center();
		let top = cy - config.node.line_height * (lines.len() as f64 - 1.0) / 2.0;
		for (i, line) in lines.iter().enumerate() {
			let _ = ctx.fill_text(line, cx, top + config.node.line_height * i as f64);
		}

		for kind in [HandleKind::Target, HandleKind::Source] {
			let (hx, hy) = FlowState::handle_position(node, kind);
			ctx.begin_path();
			let _ = ctx.arc(hx, hy, scale.handle_radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&theme.handle.fill.to_css());
			ctx.fill();
			ctx.set_stroke_style_str(&theme.handle.border.to_css());
			ctx.set_line_width(scale.handle_radius * 0.25);
			ctx.stroke();
		}
	}
}

fn draw_minimap(state: &FlowState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some(map) = state.minimap() else {
		return;
	};
	let frame = map.frame;
	let style = &theme.minimap;
	let selected = state.focus.selected();

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(frame.x, frame.y, frame.width, frame.height);

	for node in state.focus.nodes() {
		let r = map.project(FlowState::node_rect(node));
		let color = if selected == Some(node.id.as_str()) {
			style.selected_node
		} else {
			style.node
		};
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill_rect(r.x, r.y, r.width, r.height);
	}

	let view = map.project(state.viewport.visible_world_rect());
	ctx.begin_path();
	ctx.rect(frame.x, frame.y, frame.width, frame.height);
	ctx.rect(view.x, view.y, view.width, view.height);
	ctx.set_fill_style_str(&style.mask.to_css());
	ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);

	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(frame.x, frame.y, frame.width, frame.height);
}

/// Greedy word wrap into at most `max_lines` lines no wider than `max_width`
/// according to `measure`. Overflow is cut with an ellipsis on the last line.
fn wrap_text(
	text: &str,
	max_width: f64,
	max_lines: usize,
	measure: impl Fn(&str) -> f64,
) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	let mut current = String::new();

	for word in text.split_whitespace() {
		let candidate = if current.is_empty() {
			word.to_string()
		} else {
			format!("{} {}", current, word)
		};
		if current.is_empty() || measure(&candidate) <= max_width {
			current = candidate;
		} else {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}

	if lines.len() > max_lines {
		lines.truncate(max_lines);
		if let Some(last) = lines.last_mut() {
			while !last.is_empty() && measure(&format!("{}…", last)) > max_width {
				last.pop();
			}
			let trimmed = last.trim_end().len();
			last.truncate(trimmed);
			last.push('…');
		}
	}
	lines
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn chars(s: &str) -> f64 {
		s.chars().count() as f64
	}

	#[test]
	fn wraps_on_word_boundaries() {
		let lines = wrap_text(
			"Unveiling the Mysteries of Interaction Design",
			20.0,
			3,
			chars,
		);
		assert_eq!(
			lines,
			vec!["Unveiling the", "Mysteries of", "Interaction Design"]
		);
	}

	#[test]
	fn short_text_stays_on_one_line() {
		assert_eq!(wrap_text("Fitts's Law", 20.0, 3, chars), vec!["Fitts's Law"]);
		assert!(wrap_text("   ", 20.0, 3, chars).is_empty());
	}

	#[test]
	fn overflow_gets_ellipsis() {
		let lines = wrap_text("one two three four five six", 9.0, 2, chars);
		assert_eq!(lines, vec!["one two", "three…"]);
	}

	#[test]
	fn bezier_bends_outwards_from_handles() {
		let ((c1x, c1y), (c2x, c2y)) = bezier_controls(0.0, 0.0, 200.0, 100.0);
		assert_eq!((c1x, c1y), (100.0, 0.0));
		assert_eq!((c2x, c2y), (100.0, 100.0));

		// short edges keep a minimum bend
		let ((c1x, _), (c2x, _)) = bezier_controls(0.0, 0.0, 10.0, 0.0);
		assert_eq!((c1x, c2x), (25.0, -15.0));
	}
}
