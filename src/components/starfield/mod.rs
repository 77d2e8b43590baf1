//! Starfield and click-burst particle canvas.
//!
//! Renders an animated background on an HTML canvas with:
//! - A density-sized batch of twinkling stars that drift (or fall) and wrap
//!   around the viewport edges
//! - Pointer attraction pulling nearby stars toward the cursor
//! - Bursts of short-lived particles on every click, with drag and gravity
//! - Star ink following the page's dark/light theme
//!
//! The simulation lives in [`StarfieldEngine`], a plain value with no browser
//! handles; [`StarfieldCanvas`] is the Leptos host that feeds it input and
//! paints its frames.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_starfield::{StarfieldCanvas, StarfieldConfig};
//!
//! view! { <StarfieldCanvas config=StarfieldConfig::simplified() /> }
//! ```

mod clock;
mod component;
pub mod config;
mod engine;
mod particles;
mod render;
mod stars;
pub mod theme;

pub use clock::FrameClock;
pub use component::StarfieldCanvas;
pub use config::{StarMotion, StarfieldConfig, WrapMode};
pub use engine::StarfieldEngine;
pub use particles::Particle;
pub use render::DrawCommand;
pub use stars::Star;
pub use theme::{Fill, SurfaceTheme};
