use crate::V3;
use protocol::pr_model::PrParticle;

pub const DAMPING: f32 = 0.03;
pub const DRAG: f32 = 1.0 - DAMPING;

/// One mass point of the cloth grid. Velocity is never stored, it is
/// implied by `pos - ppos` (Verlet).
#[derive(Clone)]
pub struct Particle {
	pub pos: V3,
	pub ppos: V3,
	pub origin: V3,
	pub accel: V3,
	pub mass: f32,
	pub imass: f32,
}

impl Particle {
	/// `mass` must be positive, anchoring is done by positional reset
	/// (see `reset_to_origin`), never by infinite mass.
	pub fn new(pos: V3, mass: f32) -> Self {
		Self {
			pos,
			ppos: pos,
			origin: pos,
			accel: V3::zeros(),
			mass,
			imass: 1.0 / mass,
		}
	}

	pub fn add_force(&mut self, force: V3) {
		self.accel += force * self.imass;
	}

	/// One Verlet step. The implied velocity is scaled by `DRAG` so the
	/// sheet loses a little energy every frame. Acceleration is cleared
	/// afterwards, forces must be re-applied each step.
	pub fn integrate(&mut self, dt2: f32) {
		let new_pos =
			self.pos + (self.pos - self.ppos) * DRAG + self.accel * dt2;
		self.ppos = self.pos;
		self.pos = new_pos;
		self.accel = V3::zeros();
	}

	/// Snap back to the rest position. Setting `ppos` as well zeroes
	/// the implied velocity, so the particle stays put next step.
	pub fn reset_to_origin(&mut self) {
		self.pos = self.origin;
		self.ppos = self.origin;
	}

	pub fn render(&self) -> PrParticle {
		PrParticle {
			pos: [self.pos[0], self.pos[1], self.pos[2]],
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn at_rest_stays_put() {
		let mut p = Particle::new(V3::new(1., 2., 3.), 0.1);
		p.integrate(0.018 * 0.018);
		assert_eq!(p.pos, V3::new(1., 2., 3.));
		assert_eq!(p.ppos, p.pos);
	}

	#[test]
	fn force_scaled_by_inverse_mass() {
		let mut p = Particle::new(V3::zeros(), 0.1);
		p.add_force(V3::new(0., -1., 0.));
		assert!((p.accel[1] + 10.).abs() < 1e-4);
	}

	#[test]
	fn acceleration_cleared_after_integrate() {
		let mut p = Particle::new(V3::zeros(), 1.0);
		p.add_force(V3::new(0., -9.8, 0.));
		let dt2 = 0.018 * 0.018;
		p.integrate(dt2);
		assert_eq!(p.accel, V3::zeros());
		assert!((p.pos[1] + 9.8 * dt2).abs() < 1e-6);
	}

	#[test]
	fn drag_bleeds_implied_velocity() {
		let mut p = Particle::new(V3::zeros(), 1.0);
		p.ppos = V3::new(-1., 0., 0.);
		p.integrate(0.018 * 0.018);
		assert!((p.pos[0] - DRAG).abs() < 1e-6);
	}

	#[test]
	fn reset_is_idempotent() {
		let mut p = Particle::new(V3::new(5., 5., 5.), 0.1);
		p.pos = V3::new(7., 7., 7.);
		p.ppos = V3::new(6., 6., 6.);
		p.reset_to_origin();
		let once = (p.pos, p.ppos);
		p.reset_to_origin();
		assert_eq!(once, (p.pos, p.ppos));
		assert_eq!(p.pos, p.origin);
	}
}
