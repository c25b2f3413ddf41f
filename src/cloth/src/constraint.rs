use crate::particle::Particle;
use protocol::pr_model::PrConstraint;

/// Structural link between two grid neighbors, addressed by particle
/// index. Topology is fixed at cloth construction, only positions move.
#[derive(Clone, Copy)]
pub struct DistanceConstraint {
	pub a: usize,
	pub b: usize,
	pub rest: f32,
}

impl DistanceConstraint {
	pub fn new(a: usize, b: usize, rest: f32) -> Self {
		Self { a, b, rest }
	}

	pub fn render(&self, id: usize) -> PrConstraint {
		PrConstraint {
			id,
			particles: [self.a, self.b],
		}
	}

	/// One relaxation pass: both ends move half the correction toward
	/// the rest length. Residual stretch is left for the next pass.
	pub fn satisfy(&self, particles: &mut [Particle]) {
		let diff = particles[self.b].pos - particles[self.a].pos;
		let dist = diff.magnitude();
		if dist == 0.0 {
			// coincident ends, no correction direction
			return;
		}
		let half = diff * (1.0 - self.rest / dist) * 0.5;
		particles[self.a].pos += half;
		particles[self.b].pos -= half;
	}
}
