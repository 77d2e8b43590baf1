//! Frame building and canvas painting.
//!
//! A frame is a flat list of [`DrawCommand`]s built from engine state, so the
//! simulation can be checked without a browser. [`paint`] replays a frame onto
//! a 2D canvas context in order:
//! 1. Clear the whole surface
//! 2. Stars
//! 3. Burst particles on top

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::engine::StarfieldEngine;
use super::theme::Fill;

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Clear `[0, width) × [0, height)` to transparent.
	Clear { width: f64, height: f64 },
	/// Filled circle.
	Circle { x: f64, y: f64, radius: f64, fill: Fill },
}

/// Builds the draw list for the engine's current state at time `t` (seconds).
///
/// A surface with no area draws nothing, not even the clear.
pub fn frame(engine: &StarfieldEngine, t: f64) -> Vec<DrawCommand> {
	let (width, height) = (engine.width(), engine.height());
	if !(width > 0.0 && height > 0.0) {
		return Vec::new();
	}

	let config = engine.config();
	let theme = engine.theme();
	let mut commands = Vec::with_capacity(1 + engine.stars().len() + engine.particles().len());
	commands.push(DrawCommand::Clear { width, height });

	for star in engine.stars() {
		let pulse = if config.pulse { star.pulse(t) } else { 1.0 };
		commands.push(DrawCommand::Circle {
			x: star.x,
			y: star.y,
			radius: star.radius * pulse,
			fill: theme.star_fill(star.opacity * pulse),
		});
	}

	for p in engine.particles() {
		commands.push(DrawCommand::Circle {
			x: p.x,
			y: p.y,
			radius: p.radius(),
			fill: theme.particle_fill(p.hue, p.life),
		});
	}

	commands
}

/// Replays a frame onto the canvas.
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) {
	for command in commands {
		match command {
			DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
			DrawCommand::Circle { x, y, radius, fill } => {
				if !(*radius > 0.0) {
					continue;
				}
				ctx.begin_path();
				let _ = ctx.arc(*x, *y, *radius, 0.0, TAU);
				ctx.set_fill_style_str(&fill.to_css());
				ctx.fill();
			}
		}
	}
}
