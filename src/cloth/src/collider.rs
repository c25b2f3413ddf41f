use crate::V3;
use protocol::pr_model::PrBall;

/// Hard clamp against a horizontal floor plane. No bounce, the implied
/// velocity is left alone.
pub struct Floor {
	pub y: f32,
}

impl Floor {
	pub fn apply(&self, pos: &mut V3) -> bool {
		if pos[1] < self.y {
			pos[1] = self.y;
			return true;
		}
		false
	}
}

/// Orbiting sphere obstacle. Penetrating particles are projected
/// radially back to the surface, no penalty force.
pub struct Ball {
	pub center: V3,
	pub radius: f32,
}

impl Ball {
	pub fn new(radius: f32) -> Self {
		Self {
			center: V3::new(0., -45., 0.),
			radius,
		}
	}

	/// Sinusoidal x/z orbit, `t` in seconds.
	pub fn orbit(&mut self, t: f32) {
		self.center[0] = (t / 0.4).cos() * 70.0;
		self.center[2] = -(t / 0.6).sin() * 90.0;
	}

	pub fn apply(&self, pos: &mut V3) -> bool {
		let diff = *pos - self.center;
		let dist = diff.magnitude();
		if dist < self.radius {
			*pos = self.center + diff * (self.radius / dist);
			return true;
		}
		false
	}

	pub fn render(&self, visible: bool) -> PrBall {
		PrBall {
			pos: [self.center[0], self.center[1], self.center[2]],
			radius: self.radius,
			visible,
		}
	}
}
