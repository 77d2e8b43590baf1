//! Background stars: batch generation, pointer pull, ambient motion and wrap.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::{StarMotion, StarStyle, StarfieldConfig, WrapMode};

/// Ambient drift: angular rate applied to elapsed seconds.
const DRIFT_RATE: f64 = 0.5;
/// Ambient drift: spatial frequency of the wander field.
const DRIFT_FREQUENCY: f64 = 0.01;
/// Ambient drift: per-tick amplitude in px.
const DRIFT_AMPLITUDE: f64 = 0.3;

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub opacity: f64,
	pub speed: f64,
	pub pulse_offset: f64,
	/// Radians per second
	pub pulse_rate: f64,
}

impl Star {
	fn random<R: Rng + ?Sized>(rng: &mut R, style: &StarStyle, width: f64, height: f64) -> Self {
		Self {
			x: wrap_axis(unit(rng) * width, width),
			y: wrap_axis(unit(rng) * height, height),
			radius: style.radius.lerp(unit(rng)),
			opacity: style.opacity.lerp(unit(rng)),
			speed: style.speed.lerp(unit(rng)),
			pulse_offset: unit(rng) * TAU,
			pulse_rate: style.pulse_rate.lerp(unit(rng)),
		}
	}

	/// Twinkle multiplier in `[0.4, 1.0]` at time `t` (seconds).
	pub fn pulse(&self, t: f64) -> f64 {
		(t * self.pulse_rate + self.pulse_offset).sin() * 0.3 + 0.7
	}

	/// Pulls the star toward the pointer with a linear falloff.
	///
	/// Returns whether the pointer was within `radius`; a star outside the
	/// pull takes its ambient motion instead.
	fn attract(&mut self, (px, py): (f64, f64), radius: f64) -> bool {
		let (dx, dy) = (px - self.x, py - self.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if !(dist < radius) {
			return false;
		}
		if dist > 0.0 {
			let force = (radius - dist) / radius;
			self.x += dx / dist * force * self.speed;
			self.y += dy / dist * force * self.speed;
		}
		true
	}

	fn drift(&mut self, t: f64) {
		let phase = t * DRIFT_RATE;
		self.x += (phase + self.x * DRIFT_FREQUENCY).sin() * DRIFT_AMPLITUDE;
		self.y += (phase + self.y * DRIFT_FREQUENCY).cos() * DRIFT_AMPLITUDE;
	}

	fn wrap(&mut self, mode: WrapMode, width: f64, height: f64) {
		match mode {
			WrapMode::Toroidal => {
				self.x = wrap_axis(self.x, width);
				self.y = wrap_axis(self.y, height);
			}
			WrapMode::VerticalOnly => {
				// Falling stars never move sideways unless a custom config adds
				// pointer pull, so x only needs correcting in that case.
				self.x = wrap_axis(self.x, width);
				if !(self.y >= 0.0 && self.y < height) {
					self.y = 0.0;
				}
			}
		}
	}
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.gen_range(0.0..1.0)
}

/// Brings a coordinate back into `[0, extent)`.
///
/// Past the far edge resets to `0`; before the near edge resets to the far
/// side. Non-finite input and empty extents collapse to `0`.
pub fn wrap_axis(v: f64, extent: f64) -> f64 {
	if !(extent > 0.0) || !v.is_finite() {
		return 0.0;
	}
	if v >= extent {
		0.0
	} else if v < 0.0 {
		let wrapped = v + extent;
		if wrapped >= 0.0 && wrapped < extent { wrapped } else { 0.0 }
	} else {
		v
	}
}

/// The live star batch for one surface size.
#[derive(Clone, Debug)]
pub struct StarField {
	pub stars: Vec<Star>,
	width: f64,
	height: f64,
}

impl StarField {
	/// Generates a fresh batch sized by the config's density rule.
	pub fn generate<R: Rng + ?Sized>(
		config: &StarfieldConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let count = config.star_count(width, height);
		let stars = (0..count)
			.map(|_| Star::random(rng, &config.stars, width, height))
			.collect();
		Self {
			stars,
			width,
			height,
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Advances every star by one tick at time `t` (seconds).
	pub fn update(&mut self, config: &StarfieldConfig, pointer: Option<(f64, f64)>, t: f64) {
		let attraction = config.attraction_radius.zip(pointer);
		for star in &mut self.stars {
			let pulled = match attraction {
				Some((radius, at)) => star.attract(at, radius),
				None => false,
			};
			if !pulled {
				match config.motion {
					StarMotion::Drift => star.drift(t),
					StarMotion::Fall => star.y += star.speed,
				}
			}
			star.wrap(config.wrap, self.width, self.height);
		}
	}
}
