//! Starfield engine state and its per-frame update.
//!
//! The engine is a plain value: the host creates it once, feeds it input
//! events as they arrive and calls [`StarfieldEngine::tick`] once per
//! animation frame. It never schedules anything itself and holds no browser
//! handles, so it runs the same under `cargo test` as in the page.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::StarfieldConfig;
use super::particles::{Particle, ParticleSystem};
use super::render::{self, DrawCommand};
use super::stars::{Star, StarField};
use super::theme::SurfaceTheme;

/// Live state for one starfield canvas.
#[derive(Clone, Debug)]
pub struct StarfieldEngine {
	config: StarfieldConfig,
	stars: StarField,
	particles: ParticleSystem,
	/// Last known pointer position; unknown until the first move.
	pointer: Option<(f64, f64)>,
	theme: SurfaceTheme,
	rng: SmallRng,
}

/// Dimensions that aren't positive finite numbers collapse to an empty surface.
fn surface_extent(v: f64) -> f64 {
	if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

impl StarfieldEngine {
	/// Creates the engine for a `width × height` surface with its first star
	/// batch. `seed` drives every random draw (star batches, bursts).
	pub fn initialize(config: StarfieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let (width, height) = (surface_extent(width), surface_extent(height));
		let mut rng = SmallRng::seed_from_u64(seed);
		let stars = StarField::generate(&config, width, height, &mut rng);
		debug!(
			"starfield: initialized {}x{} with {} stars ({} preset)",
			width,
			height,
			stars.stars.len(),
			config.name
		);
		Self {
			config,
			stars,
			particles: ParticleSystem::new(),
			pointer: None,
			theme: SurfaceTheme::default(),
			rng,
		}
	}

	/// Resizes the surface and replaces the whole star batch.
	pub fn on_resize(&mut self, width: f64, height: f64) {
		let (width, height) = (surface_extent(width), surface_extent(height));
		self.stars = StarField::generate(&self.config, width, height, &mut self.rng);
		debug!(
			"starfield: resized to {}x{}, regenerated {} stars",
			width,
			height,
			self.stars.stars.len()
		);
	}

	/// Records the pointer for the next tick's attraction pass.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	/// Spawns a particle burst at `(x, y)`.
	pub fn on_pointer_down(&mut self, x: f64, y: f64) {
		self.particles
			.burst(&self.config.particles, x, y, &mut self.rng);
	}

	/// Mirrors the page's dark/light theme.
	pub fn set_dark(&mut self, is_dark: bool) {
		self.theme = SurfaceTheme::from_dark_flag(is_dark);
	}

	/// Advances one frame and returns what to draw.
	///
	/// `now_ms` is the host's monotonic animation timestamp in milliseconds
	/// (what `requestAnimationFrame` passes); drift and pulse run on it in
	/// seconds. Given the same state and timestamp the result is identical.
	pub fn tick(&mut self, now_ms: f64) -> Vec<DrawCommand> {
		let t = now_ms / 1000.0;
		self.stars.update(&self.config, self.pointer, t);
		self.particles.update(&self.config.particles);
		render::frame(self, t)
	}

	pub fn config(&self) -> &StarfieldConfig {
		&self.config
	}

	pub fn stars(&self) -> &[Star] {
		&self.stars.stars
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles.particles
	}

	pub fn width(&self) -> f64 {
		self.stars.width()
	}

	pub fn height(&self) -> f64 {
		self.stars.height()
	}

	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	pub fn theme(&self) -> SurfaceTheme {
		self.theme
	}

	pub fn is_dark(&self) -> bool {
		self.theme.is_dark()
	}

	#[cfg(test)]
	pub(crate) fn push_particle(&mut self, particle: Particle) {
		self.particles.push(particle);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::starfield::theme::{Color, Fill};

	fn rich(width: f64, height: f64) -> StarfieldEngine {
		StarfieldEngine::initialize(StarfieldConfig::rich(), width, height, 42)
	}

	fn circles(commands: &[DrawCommand]) -> Vec<(f64, f64, f64, Fill)> {
		commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Circle { x, y, radius, fill } => Some((*x, *y, *radius, *fill)),
				DrawCommand::Clear { .. } => None,
			})
			.collect()
	}

	#[test]
	fn test_initialize_rich_star_count() {
		let engine = rich(800.0, 600.0);
		assert_eq!(engine.stars().len(), 200);
		assert!(engine.particles().is_empty());
		assert_eq!(engine.pointer(), None);
		assert!(engine.is_dark());
	}

	#[test]
	fn test_initialize_simplified_star_count() {
		let engine = StarfieldEngine::initialize(StarfieldConfig::simplified(), 800.0, 600.0, 42);
		assert_eq!(engine.stars().len(), 32);
	}

	#[test]
	fn test_zero_surface_runs_harmlessly() {
		let mut engine = rich(0.0, 0.0);
		assert!(engine.stars().is_empty());
		engine.on_pointer_move(10.0, 10.0);
		engine.on_pointer_down(10.0, 10.0);
		assert!(engine.tick(16.0).is_empty());
		assert_eq!(engine.particles().len(), 20);
	}

	#[test]
	fn test_negative_dimensions_clamp_to_empty() {
		let engine = rich(-800.0, f64::NAN);
		assert_eq!((engine.width(), engine.height()), (0.0, 0.0));
		assert!(engine.stars().is_empty());
	}

	#[test]
	fn test_resize_regenerates_batch() {
		let mut engine = rich(800.0, 600.0);
		let before = engine.stars().to_vec();
		engine.on_resize(300.0, 200.0);
		assert_eq!(engine.stars().len(), 60);
		assert_eq!((engine.width(), engine.height()), (300.0, 200.0));
		assert!(
			engine
				.stars()
				.iter()
				.all(|s| s.x >= 0.0 && s.x < 300.0 && s.y >= 0.0 && s.y < 200.0)
		);
		assert_ne!(engine.stars(), &before[..60]);
	}

	#[test]
	fn test_pointer_move_only_records() {
		let mut engine = rich(800.0, 600.0);
		let before = engine.stars().to_vec();
		engine.on_pointer_move(400.0, 300.0);
		assert_eq!(engine.pointer(), Some((400.0, 300.0)));
		assert_eq!(engine.stars(), &before[..]);
	}

	#[test]
	fn test_pointer_down_adds_burst() {
		let mut engine = rich(800.0, 600.0);
		engine.on_pointer_down(100.0, 100.0);
		assert_eq!(engine.particles().len(), 20);
		assert!(
			engine
				.particles()
				.iter()
				.all(|p| p.life == 1.0 && (p.x, p.y) == (100.0, 100.0))
		);
	}

	#[test]
	fn test_frame_layout() {
		let mut engine = rich(800.0, 600.0);
		engine.on_pointer_down(100.0, 100.0);
		let commands = engine.tick(1000.0);
		assert_eq!(commands.len(), 1 + 200 + 20);
		assert_eq!(
			commands[0],
			DrawCommand::Clear {
				width: 800.0,
				height: 600.0
			}
		);
		for (_, _, _, fill) in circles(&commands[201..]) {
			assert!(matches!(fill, Fill::Hsla(_)));
		}
	}

	#[test]
	fn test_tick_is_pure_given_state_and_time() {
		let mut a = rich(640.0, 480.0);
		a.on_pointer_move(320.0, 240.0);
		a.on_pointer_down(50.0, 50.0);
		let mut b = a.clone();
		for frame in 0..120 {
			let now = frame as f64 * 16.0;
			assert_eq!(a.tick(now), b.tick(now));
		}
	}

	#[test]
	fn test_stars_in_bounds_every_tick() {
		let mut engine = rich(1024.0, 768.0);
		for frame in 0..300 {
			if frame % 40 == 0 {
				engine.on_pointer_move((frame * 3) as f64, (frame * 2) as f64);
			}
			engine.tick(frame as f64 * 16.7);
			assert!(
				engine
					.stars()
					.iter()
					.all(|s| s.x >= 0.0 && s.x < 1024.0 && s.y >= 0.0 && s.y < 768.0)
			);
		}
	}

	#[test]
	fn test_particle_expires_after_decay() {
		let mut engine = rich(800.0, 600.0);
		engine.push_particle(Particle::new(400.0, 300.0, 0.0, 0.0, 0.02, 3.0, 210.0));

		for i in 0..24 {
			engine.tick(i as f64 * 16.0);
		}
		let last = engine.tick(24.0 * 16.0);
		let p = &engine.particles()[0];
		assert!((p.life - 0.5).abs() < 1e-9);
		let (_, _, radius, fill) = *circles(&last).last().unwrap();
		assert!((radius - 1.5).abs() < 1e-9);
		assert!((fill.alpha() - 0.5).abs() < 1e-9);

		for i in 25..50 {
			engine.tick(i as f64 * 16.0);
		}
		assert!(engine.particles().is_empty());
	}

	#[test]
	fn test_theme_switch_changes_star_ink() {
		let mut config = StarfieldConfig::rich();
		config.pulse = false;
		config.attraction_radius = None;
		let mut engine = StarfieldEngine::initialize(config, 200.0, 100.0, 5);
		let opacity = engine.stars()[0].opacity;

		let dark = circles(&engine.tick(0.0));
		assert_eq!(dark[0].3, Fill::Rgba(Color::rgba(255, 255, 255, opacity)));

		engine.set_dark(false);
		let light = circles(&engine.tick(16.0));
		match light[0].3 {
			Fill::Rgba(c) => {
				assert_eq!((c.r, c.g, c.b), (0, 0, 0));
				assert!((c.a - opacity * 0.3).abs() < 1e-12);
			}
			other => panic!("unexpected fill {:?}", other),
		}
	}

	#[test]
	fn test_pulse_scales_radius_and_alpha() {
		let mut engine = rich(300.0, 300.0);
		let t_ms = 2500.0;
		let commands = engine.tick(t_ms);
		for (star, (_, _, radius, fill)) in engine.stars().iter().zip(circles(&commands)) {
			let pulse = star.pulse(t_ms / 1000.0);
			assert!((0.4 - 1e-12..=1.0 + 1e-12).contains(&pulse));
			assert!((radius - star.radius * pulse).abs() < 1e-12);
			assert!((fill.alpha() - star.opacity * pulse).abs() < 1e-12);
		}
	}

	#[test]
	fn test_simplified_star_falls_and_wraps() {
		let mut engine = StarfieldEngine::initialize(StarfieldConfig::simplified(), 800.0, 600.0, 9);
		engine.on_pointer_move(10.0, 10.0);
		let before = engine.stars().to_vec();
		let commands = engine.tick(33.0);
		for (old, new) in before.iter().zip(engine.stars()) {
			assert_eq!(new.x, old.x);
			let fallen = old.y + old.speed;
			if fallen < 600.0 {
				assert_eq!(new.y, fallen);
			} else {
				assert_eq!(new.y, 0.0);
			}
		}
		// No pulse: stars render at their base radius.
		for (star, (_, _, radius, _)) in engine.stars().iter().zip(circles(&commands)) {
			assert_eq!(radius, star.radius);
		}
	}
}
