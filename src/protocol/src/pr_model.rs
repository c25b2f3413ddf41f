// pr_model: physical model snapshot for rendering

pub struct PrParticle {
	pub pos: [f32; 3],
}

pub struct PrConstraint {
	pub id: usize,
	pub particles: [usize; 2],
}

pub struct PrBall {
	pub pos: [f32; 3],
	pub radius: f32,
	pub visible: bool,
}

/// One frame of solver output. Particles are in grid order
/// (`u + v * (w + 1)`); a renderer copies them into its vertex buffer
/// and recomputes vertex normals itself.
pub struct PrModel {
	pub particles: Vec<PrParticle>,
	pub constraints: Vec<PrConstraint>,
	pub ball: PrBall,
}
