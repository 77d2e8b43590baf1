//! Colors and the dark/light surface theme.
//!
//! The page toggles a `dark`/`light` class on `<body>`; the starfield mirrors
//! that as a [`SurfaceTheme`] and picks its star ink from it.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(255, 255, 255);
	pub const BLACK: Color = Color::rgb(0, 0, 0);

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
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// HSLA color, used for the click-burst particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	/// Hue in degrees
	pub h: f64,
	/// Saturation in percent
	pub s: f64,
	/// Lightness in percent
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Fill style for a draw command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
	Rgba(Color),
	Hsla(Hsla),
}

impl Fill {
	/// Alpha component regardless of color model.
	pub fn alpha(&self) -> f64 {
		match self {
			Fill::Rgba(c) => c.a,
			Fill::Hsla(c) => c.a,
		}
	}

	pub fn to_css(self) -> String {
		match self {
			Fill::Rgba(c) => c.to_css(),
			Fill::Hsla(c) => c.to_css(),
		}
	}
}

/// Light mode stars are drawn at this fraction of their dark mode alpha so
/// they stay subtle against a pale background.
const LIGHT_ALPHA_SCALE: f64 = 0.3;

/// Particle saturation and lightness, in percent.
const PARTICLE_SATURATION: f64 = 100.0;
const PARTICLE_LIGHTNESS: f64 = 70.0;

/// Which page theme the surface sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceTheme {
	#[default]
	Dark,
	Light,
}

impl SurfaceTheme {
	pub fn from_dark_flag(is_dark: bool) -> Self {
		if is_dark { Self::Dark } else { Self::Light }
	}

	pub fn is_dark(self) -> bool {
		self == Self::Dark
	}

	/// Ink for a star at the given (already pulsed) opacity.
	pub fn star_fill(self, opacity: f64) -> Fill {
		match self {
			Self::Dark => Fill::Rgba(Color::WHITE.with_alpha(opacity)),
			Self::Light => Fill::Rgba(Color::BLACK.with_alpha(opacity * LIGHT_ALPHA_SCALE)),
		}
	}

	/// Ink for a burst particle. Particles look the same in both themes.
	pub fn particle_fill(self, hue: f64, life: f64) -> Fill {
		Fill::Hsla(Hsla::new(hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS, life))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dark_star_fill_is_white() {
		let fill = SurfaceTheme::Dark.star_fill(0.5);
		assert_eq!(fill, Fill::Rgba(Color::rgba(255, 255, 255, 0.5)));
		assert_eq!(fill.to_css(), "rgba(255, 255, 255, 0.5)");
	}

	#[test]
	fn test_light_star_fill_is_dimmed_black() {
		let fill = SurfaceTheme::Light.star_fill(0.5);
		match fill {
			Fill::Rgba(c) => {
				assert_eq!((c.r, c.g, c.b), (0, 0, 0));
				assert!((c.a - 0.15).abs() < 1e-12);
			}
			other => panic!("unexpected fill {:?}", other),
		}
	}

	#[test]
	fn test_particle_fill_css() {
		let fill = SurfaceTheme::Dark.particle_fill(215.0, 0.5);
		assert_eq!(fill.to_css(), "hsla(215, 100%, 70%, 0.5)");
		assert_eq!(fill.alpha(), 0.5);
	}

	#[test]
	fn test_missing_flag_defaults_to_dark() {
		assert!(SurfaceTheme::default().is_dark());
		assert_eq!(SurfaceTheme::from_dark_flag(false), SurfaceTheme::Light);
	}
}
