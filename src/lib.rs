//! portfolio-starfield: animated starfield background for a personal portfolio page.
//!
//! This crate provides a WASM-based canvas component that renders a drifting,
//! twinkling starfield pulled toward the pointer, with particle bursts on click
//! and star colors following the page's dark/light theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{StarfieldCanvas, StarfieldConfig, StarfieldEngine};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load engine configuration from a script element with id="starfield-config".
/// Expected format: a (partial) JSON `StarfieldConfig`, optionally with a
/// `"preset"` key naming the base preset.
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("starfield: loaded {} config from page", config.name);
			Some(config)
		}
		Err(e) => {
			warn!("starfield: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the starfield config from the DOM and mounts the background canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas config=config />
	}
}
