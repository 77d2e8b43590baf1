//! Optional frame-rate throttle for the animation loop.

/// Decides which host animation frames actually advance the engine.
///
/// Without a target rate every frame passes. With one, a frame passes once
/// more than `1000 / fps` ms have elapsed since the last accepted frame; the
/// reference point then snaps back by the overshoot so the cadence holds
/// steady instead of drifting later each frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
	interval_ms: Option<f64>,
	last_ms: f64,
}

impl FrameClock {
	pub fn new(target_fps: Option<f64>) -> Self {
		Self {
			interval_ms: target_fps.filter(|fps| *fps > 0.0).map(|fps| 1000.0 / fps),
			last_ms: 0.0,
		}
	}

	pub fn interval_ms(&self) -> Option<f64> {
		self.interval_ms
	}

	/// Returns whether the frame at `now_ms` should be simulated and drawn.
	pub fn should_render(&mut self, now_ms: f64) -> bool {
		let Some(interval) = self.interval_ms else {
			return true;
		};
		let elapsed = now_ms - self.last_ms;
		if elapsed > interval {
			self.last_ms = now_ms - (elapsed % interval);
			true
		} else {
			false
		}
	}
}
