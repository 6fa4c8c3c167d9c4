//! Leptos component wrapping the diagram canvas and its controls.
//!
//! The component creates an HTML canvas element and wires mouse/wheel handlers
//! for focusing, panning, zooming and connecting nodes. An animation loop runs
//! via `requestAnimationFrame`, advancing the viewport transition and redrawing
//! each frame. Live zoom and selection are mirrored into signals so the DOM
//! controls stay in step with gestures and focus animations.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::error::FlowError;
use super::render;
use super::state::{FlowState, PointerOutcome};
use super::theme::Theme;
use super::types::FlowData;

/// Bundles diagram state with the theme it is drawn in.
struct FlowContext {
	state: FlowState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<FlowContext>>>;

/// Pointer position relative to the canvas.
fn local_coords(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn report(result: Result<(), FlowError>) {
	if let Err(e) = result {
		warn!("topic-flow: {}", e);
	}
}

/// Run `f` against the mounted diagram state, if any.
fn with_state(context: &SharedContext, f: impl FnOnce(&mut FlowState)) {
	if let Some(ref mut c) = *context.borrow_mut() {
		f(&mut c.state);
	}
}

/// Renders an interactive topic diagram on a canvas element, with zoom
/// controls, one focus button per node and a zoom slider.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Explicit `width`/`height` override automatic sizing. `theme` picks a preset
/// by name and falls back to the light theme.
#[component]
pub fn FlowCanvas(
	#[prop(into)] data: Signal<FlowData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] theme: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let initial = data.get_untracked();
	let live_zoom = RwSignal::new(initial.focus.initial_zoom);
	let selected = RwSignal::new(Option::<String>::None);
	let zoom_range = initial.focus.zoom_range;

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("topic-flow: canvas 2d context unavailable");
			return;
		};

		let theme = match theme.as_deref() {
			Some(name) => Theme::by_name(name).unwrap_or_else(|| {
				warn!("topic-flow: unknown theme {}, using default", name);
				Theme::default()
			}),
			None => Theme::default(),
		};

		let state = match FlowState::new(data.get_untracked(), w, h) {
			Ok(state) => state,
			Err(e) => {
				error!("topic-flow: cannot build diagram: {}", e);
				return;
			}
		};
		info!("topic-flow: canvas {}x{}, theme {}", w, h, theme.name);
		*context_init.borrow_mut() = Some(FlowContext { state, theme });

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				with_state(&context_resize, |s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.theme);

				let k = c.state.viewport.zoom();
				if (live_zoom.get_untracked() - k).abs() > 1e-6 {
					live_zoom.set(k);
				}
				let focused = c.state.focus.selected();
				if selected.with_untracked(|s| s.as_deref() != focused) {
					selected.set(focused.map(str::to_string));
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		with_state(&context_md, |s| s.pointer_down(x, y));
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		with_state(&context_mm, |s| {
			s.pointer_move(x, y);
			if let Some(canvas) = canvas_ref.get() {
				let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", s.cursor_at(x, y));
			}
		});
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		with_state(&context_mu, |s| match s.pointer_up(x, y) {
			Ok(PointerOutcome::Connected(id)) => info!("topic-flow: added edge {}", id),
			Ok(_) => {}
			Err(e) => warn!("topic-flow: {}", e),
		});
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_state(&context_ml, |s| s.pointer_leave());
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		with_state(&context_wh, |s| s.wheel(x, y, ev.delta_y()));
	};

	let context_zi = context.clone();
	let zoom_in = move |_: MouseEvent| with_state(&context_zi, |s| s.zoom_in());
	let context_zo = context.clone();
	let zoom_out = move |_: MouseEvent| with_state(&context_zo, |s| s.zoom_out());
	let context_fit = context.clone();
	let fit_view = move |_: MouseEvent| with_state(&context_fit, |s| s.fit_view());

	let context_slider = context.clone();
	let on_slider = move |ev: web_sys::Event| match event_target_value(&ev).parse::<f64>() {
		Ok(zoom) => with_state(&context_slider, |s| s.set_zoom_level(zoom)),
		Err(e) => warn!("topic-flow: bad slider value: {}", e),
	};

	let topic_buttons = initial
		.nodes
		.iter()
		.map(|node| {
			let (id, label) = (node.id.clone(), node.button_label());
			let active_id = id.clone();
			let context_btn = context.clone();
			view! {
				<button
					class="flow-topic"
					class:active=move || selected.with(|s| s.as_deref() == Some(active_id.as_str()))
					on:click=move |_| {
						with_state(&context_btn, |s| report(s.select_node(&id)));
					}
				>
					{label}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="flow-canvas">
			<canvas
				node_ref=canvas_ref
				class="flow-canvas-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="flow-controls">
				<button title="Zoom in" on:click=zoom_in>"+"</button>
				<button title="Zoom out" on:click=zoom_out>"-"</button>
				<button title="Fit view" on:click=fit_view>"[ ]"</button>
			</div>
			<div class="flow-panel">
				<div class="flow-topics">{topic_buttons}</div>
				<input
					class="flow-zoom"
					type="range"
					min=zoom_range.min.to_string()
					max=zoom_range.max.to_string()
					step=zoom_range.step.to_string()
					prop:value=move || format!("{:.1}", live_zoom.get())
					on:input=on_slider
				/>
				<span class="flow-zoom-readout">
					{move || format!("{:.0}%", live_zoom.get() * 100.0)}
				</span>
			</div>
		</div>
	}
}
