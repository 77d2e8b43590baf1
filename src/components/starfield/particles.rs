//! Click-burst particles.

use rand::Rng;

use super::config::ParticleStyle;

/// A single short-lived burst particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Remaining life, 1.0 at spawn and removed at or below 0.0
	pub life: f64,
	pub decay: f64,
	pub size: f64,
	/// Hue in degrees
	pub hue: f64,
	/// Completed ticks since spawn
	age: u32,
}

impl Particle {
	pub const INITIAL_LIFE: f64 = 1.0;

	pub fn new(x: f64, y: f64, vx: f64, vy: f64, decay: f64, size: f64, hue: f64) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			life: Self::INITIAL_LIFE,
			decay,
			size,
			hue,
			age: 0,
		}
	}

	fn random<R: Rng + ?Sized>(rng: &mut R, style: &ParticleStyle, x: f64, y: f64) -> Self {
		let mut velocity = || (rng.gen_range(0.0..1.0) - 0.5) * style.velocity_spread;
		let (vx, vy) = (velocity(), velocity());
		Self::new(
			x,
			y,
			vx,
			vy,
			style.decay.lerp(rng.gen_range(0.0..1.0)),
			style.size.lerp(rng.gen_range(0.0..1.0)),
			style.hue.lerp(rng.gen_range(0.0..1.0)),
		)
	}

	/// Rendered radius, shrinking with remaining life.
	pub fn radius(&self) -> f64 {
		self.size * self.life
	}

	fn step(&mut self, style: &ParticleStyle) {
		self.x += self.vx;
		self.y += self.vy;
		self.vx *= style.drag;
		self.vy *= style.drag;
		self.vy += style.gravity;
		// Derived from age so long-lived particles don't accumulate rounding
		// error; a 0.02 decay reaches exactly zero on tick 50.
		self.age = self.age.saturating_add(1);
		self.life = Self::INITIAL_LIFE - self.decay * self.age as f64;
	}

	pub fn is_alive(&self) -> bool {
		self.life > 0.0
	}
}

/// The live particle set.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
}

impl ParticleSystem {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Spawns one burst at `(x, y)`. No-op when bursts are disabled.
	pub fn burst<R: Rng + ?Sized>(&mut self, style: &ParticleStyle, x: f64, y: f64, rng: &mut R) {
		if !style.enabled {
			return;
		}
		self.particles.reserve(style.burst);
		for _ in 0..style.burst {
			self.particles.push(Particle::random(rng, style, x, y));
		}
	}

	pub fn push(&mut self, particle: Particle) {
		self.particles.push(particle);
	}

	/// Advances every particle one tick and drops the ones that expired.
	pub fn update(&mut self, style: &ParticleStyle) {
		self.particles.retain_mut(|p| {
			p.step(style);
			p.is_alive()
		});
	}
}
