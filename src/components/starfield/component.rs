//! Leptos component hosting the starfield canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page and
//! wires window listeners (resize, mouse move, mouse down) plus a
//! `MutationObserver` on `<body>`'s class list into the engine. An animation
//! loop runs via `requestAnimationFrame`, ticking the engine and painting the
//! resulting frame whenever the frame clock lets it through.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent,
	MutationObserver, MutationObserverInit, Window,
};

use super::clock::FrameClock;
use super::config::StarfieldConfig;
use super::engine::StarfieldEngine;
use super::render;

/// Bundles the engine with the host-side frame throttle.
struct CanvasContext {
	engine: StarfieldEngine,
	clock: FrameClock,
}

/// Slot keeping a JS callback alive for as long as the component is mounted.
type Listener<T> = Rc<RefCell<Option<Closure<T>>>>;

fn viewport_size(window: &Window) -> (f64, f64) {
	let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(extent(window.inner_width()), extent(window.inner_height()))
}

/// The page marks its theme with a `dark` or `light` body class; anything
/// other than an explicit `light` counts as dark.
fn body_is_dark(body: &HtmlElement) -> bool {
	!body.class_list().contains("light")
}

fn random_seed() -> u64 {
	let entropy = (js_sys::Math::random() * u64::MAX as f64) as u64;
	entropy ^ js_sys::Date::now() as u64
}

fn listen<T: ?Sized>(target: &EventTarget, event: &str, slot: &Listener<T>) {
	if let Some(ref cb) = *slot.borrow() {
		if target
			.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("starfield: failed to listen for {}", event);
		}
	}
}

fn request_frame(slot: &Listener<dyn FnMut(f64)>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *slot.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Mirrors `<body>`'s theme class into the engine on every class change.
fn observe_theme(
	body: &HtmlElement,
	context: &Rc<RefCell<Option<CanvasContext>>>,
	callback: &Listener<dyn FnMut(js_sys::Array, MutationObserver)>,
) -> Option<MutationObserver> {
	let (context_theme, body_theme) = (context.clone(), body.clone());
	*callback.borrow_mut() = Some(Closure::new(
		move |_: js_sys::Array, _: MutationObserver| {
			if let Some(ref mut c) = *context_theme.borrow_mut() {
				c.engine.set_dark(body_is_dark(&body_theme));
			}
		},
	));

	let slot = callback.borrow();
	let cb = slot.as_ref()?;
	let Ok(observer) = MutationObserver::new(cb.as_ref().unchecked_ref()) else {
		warn!("starfield: MutationObserver unavailable, theme changes won't be tracked");
		return None;
	};
	let options = MutationObserverInit::new();
	options.set_attributes(true);
	options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
	if observer.observe_with_options(body, &options).is_err() {
		warn!("starfield: failed to observe body class changes");
		return None;
	}
	Some(observer)
}

/// Renders the animated starfield background.
///
/// The canvas fills the viewport, sits behind the page content and ignores
/// pointer events itself; pointer input is read from the window so clicks on
/// page content still spawn bursts. Pass a `config` to pick a preset or tune
/// the engine; the rich preset is the default.
#[component]
pub fn StarfieldCanvas(
	#[prop(default = StarfieldConfig::default())] config: StarfieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Listener<dyn FnMut(f64)> = Rc::default();
	let resize_cb: Listener<dyn FnMut()> = Rc::default();
	let pointer_move_cb: Listener<dyn FnMut(MouseEvent)> = Rc::default();
	let pointer_down_cb: Listener<dyn FnMut(MouseEvent)> = Rc::default();
	let theme_cb: Listener<dyn FnMut(js_sys::Array, MutationObserver)> = Rc::default();
	let theme_observer: Rc<RefCell<Option<MutationObserver>>> = Rc::default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("starfield: no window, not starting");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("starfield: 2d canvas context unavailable, not starting");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut engine = StarfieldEngine::initialize(config.clone(), w, h, random_seed());
		let body = window.document().and_then(|d| d.body());
		if let Some(ref body) = body {
			engine.set_dark(body_is_dark(body));
		}
		info!(
			"starfield: {} preset, {} stars on {}x{}",
			config.name,
			engine.stars().len(),
			w,
			h
		);
		*context.borrow_mut() = Some(CanvasContext {
			engine,
			clock: FrameClock::new(config.target_fps),
		});

		let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.engine.on_resize(nw, nh);
			}
		}));
		listen(&window, "resize", &resize_cb);

		let context_mm = context.clone();
		*pointer_move_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut c) = *context_mm.borrow_mut() {
				c.engine
					.on_pointer_move(ev.client_x() as f64, ev.client_y() as f64);
			}
		}));
		listen(&window, "mousemove", &pointer_move_cb);

		let context_md = context.clone();
		*pointer_down_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut c) = *context_md.borrow_mut() {
				c.engine
					.on_pointer_down(ev.client_x() as f64, ev.client_y() as f64);
			}
		}));
		listen(&window, "mousedown", &pointer_down_cb);

		if let Some(ref body) = body {
			*theme_observer.borrow_mut() = observe_theme(body, &context, &theme_cb);
		}

		let (context_anim, animate_inner) = (context.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.clock.should_render(now) {
					let commands = c.engine.tick(now);
					render::paint(&ctx, &commands);
				}
			}
			request_frame(&animate_inner);
		}));
		request_frame(&animate);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: -1;"
		/>
	}
}
