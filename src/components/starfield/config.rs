//! Engine configuration and named presets.
//!
//! The page historically shipped two starfields: a rich one (dense, pulsing,
//! pointer-attracted, with click bursts) and a lighter one (sparse stars that
//! just fall). Both are the same engine with different knobs, so they live
//! here as presets of a single [`StarfieldConfig`].

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How stars that leave the surface are brought back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
	/// Wrap on all four edges.
	Toroidal,
	/// Only reset `y` to the top once a star falls past the bottom edge.
	VerticalOnly,
}

/// Ambient motion applied to stars outside the pointer's pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarMotion {
	/// Smooth, time-driven sinusoidal wander.
	Drift,
	/// Constant fall at each star's own speed.
	Fall,
}

/// Inclusive-exclusive range `[min, max)` used for uniform draws.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
	pub min: f64,
	pub max: f64,
}

impl UniformRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Maps a unit sample `u ∈ [0, 1)` into the range.
	pub fn lerp(&self, u: f64) -> f64 {
		self.min + u * (self.max - self.min)
	}

	pub fn contains(&self, v: f64) -> bool {
		v >= self.min && v <= self.max
	}
}

/// Per-star creation ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarStyle {
	pub radius: UniformRange,
	pub speed: UniformRange,
	pub opacity: UniformRange,
	/// Pulse rate in radians per second.
	pub pulse_rate: UniformRange,
}

/// Click burst parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
	/// Whether pointer-down spawns particles at all
	pub enabled: bool,
	/// Particles per burst
	pub burst: usize,
	/// Full width of the velocity spread; each component is drawn from `[-spread/2, spread/2)`
	pub velocity_spread: f64,
	pub decay: UniformRange,
	pub size: UniformRange,
	/// Hue band in degrees
	pub hue: UniformRange,
	/// Per-tick velocity multiplier
	pub drag: f64,
	/// Per-tick downward acceleration
	pub gravity: f64,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarfieldConfig {
	pub name: String,
	/// Surface area (px²) per star.
	pub density_divisor: f64,
	/// Upper bound on stars per batch.
	pub capacity: usize,
	/// Pointer pull radius in px; `None` disables attraction.
	pub attraction_radius: Option<f64>,
	pub pulse: bool,
	pub wrap: WrapMode,
	pub motion: StarMotion,
	pub stars: StarStyle,
	pub particles: ParticleStyle,
	/// Throttle for the host loop; `None` renders every animation frame.
	pub target_fps: Option<f64>,
}

impl StarfieldConfig {
	/// Dense, pulsing, pointer-attracted starfield with click bursts (default)
	pub fn rich() -> Self {
		Self {
			name: "rich".to_string(),
			density_divisor: 1000.0,
			capacity: 200,
			attraction_radius: Some(200.0),
			pulse: true,
			wrap: WrapMode::Toroidal,
			motion: StarMotion::Drift,
			stars: StarStyle {
				radius: UniformRange::new(0.5, 2.0),
				speed: UniformRange::new(0.05, 0.35),
				opacity: UniformRange::new(0.3, 0.8),
				pulse_rate: UniformRange::new(0.5, 2.0),
			},
			particles: ParticleStyle {
				enabled: true,
				burst: 20,
				velocity_spread: 15.0,
				decay: UniformRange::new(0.015, 0.045),
				size: UniformRange::new(1.0, 4.0),
				hue: UniformRange::new(200.0, 230.0),
				drag: 0.97,
				gravity: 0.1,
			},
			target_fps: None,
		}
	}

	/// Sparse falling stars at 30 fps, no pulse, attraction or bursts
	pub fn simplified() -> Self {
		Self {
			name: "simplified".to_string(),
			density_divisor: 15000.0,
			capacity: 80,
			attraction_radius: None,
			pulse: false,
			wrap: WrapMode::VerticalOnly,
			motion: StarMotion::Fall,
			stars: StarStyle {
				radius: UniformRange::new(0.3, 1.5),
				speed: UniformRange::new(0.05, 0.35),
				opacity: UniformRange::new(0.3, 0.8),
				pulse_rate: UniformRange::new(0.0, 0.0),
			},
			particles: ParticleStyle {
				enabled: false,
				..Self::rich().particles
			},
			target_fps: Some(30.0),
		}
	}

	/// Looks up a preset by name.
	pub fn preset(name: &str) -> Option<Self> {
		match name {
			"rich" => Some(Self::rich()),
			"simplified" => Some(Self::simplified()),
			_ => None,
		}
	}

	/// Number of stars for a surface of the given size.
	pub fn star_count(&self, width: f64, height: f64) -> usize {
		if self.density_divisor <= 0.0 || !(width > 0.0 && height > 0.0) {
			return 0;
		}
		let by_density = (width * height / self.density_divisor).floor();
		(by_density as usize).min(self.capacity)
	}

	/// Parses a (partial) JSON config.
	///
	/// An optional `"preset"` key picks the base preset; every other key
	/// overrides the matching field of that base, recursing into nested objects.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut overrides: Value = serde_json::from_str(json)?;
		let preset_name = overrides
			.as_object_mut()
			.and_then(|o| o.remove("preset"))
			.and_then(|v| v.as_str().map(str::to_string));

		let base = match preset_name.as_deref() {
			None => Self::default(),
			Some(name) => Self::preset(name).unwrap_or_else(|| {
				warn!("starfield: unknown preset {:?}, using rich", name);
				Self::default()
			}),
		};

		let mut merged = serde_json::to_value(base)?;
		merge(&mut merged, overrides);
		serde_json::from_value(merged)
	}
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self::rich()
	}
}

fn merge(base: &mut Value, overrides: Value) {
	match (base, overrides) {
		(Value::Object(base), Value::Object(overrides)) => {
			for (key, value) in overrides {
				match base.get_mut(&key) {
					Some(slot) => merge(slot, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(slot, value) => *slot = value,
	}
}
