use crate::constraint::DistanceConstraint;
use crate::particle::Particle;
use crate::V3;

pub const MASS: f32 = 0.1;
pub const REST_DISTANCE: f32 = 25.0;

/// Flat sheet of `width x height` world units, the classic hanging
/// cloth. `u` runs along x, `v` along y.
pub fn plane(width: f32, height: f32) -> impl Fn(f32, f32) -> V3 {
	move |u, v| V3::new((u - 0.5) * width, (v + 0.5) * height, 0.0)
}

/// A `(w+1) x (h+1)` particle grid with structural constraints between
/// horizontal and vertical neighbors (no shear or bend links).
pub struct Cloth {
	pub w: usize,
	pub h: usize,
	pub particles: Vec<Particle>,
	pub constraints: Vec<DistanceConstraint>,
	triangles: Vec<[usize; 3]>,
	normals: Vec<V3>,
}

impl Cloth {
	/// `surface` maps normalized `(u, v)` in `[0, 1]^2` to a rest
	/// position. Particle indices are `u + v * (w + 1)` and stay stable
	/// for the cloth lifetime, constraints and pins hold raw indices.
	pub fn new(w: usize, h: usize, surface: impl Fn(f32, f32) -> V3) -> Self {
		let mut particles = Vec::with_capacity((w + 1) * (h + 1));
		for v in 0..=h {
			for u in 0..=w {
				let pos = surface(u as f32 / w as f32, v as f32 / h as f32);
				particles.push(Particle::new(pos, MASS));
			}
		}

		let index = |u: usize, v: usize| u + v * (w + 1);

		let mut constraints = Vec::new();
		for v in 0..h {
			for u in 0..w {
				constraints.push(DistanceConstraint::new(
					index(u, v),
					index(u, v + 1),
					REST_DISTANCE,
				));
				constraints.push(DistanceConstraint::new(
					index(u, v),
					index(u + 1, v),
					REST_DISTANCE,
				));
			}
		}
		// last column and last row
		for v in 0..h {
			constraints.push(DistanceConstraint::new(
				index(w, v),
				index(w, v + 1),
				REST_DISTANCE,
			));
		}
		for u in 0..w {
			constraints.push(DistanceConstraint::new(
				index(u, h),
				index(u + 1, h),
				REST_DISTANCE,
			));
		}

		// two triangles per quad, same winding as the rendered mesh
		let mut triangles = Vec::with_capacity(2 * w * h);
		for v in 0..h {
			for u in 0..w {
				let a = index(u, v);
				let b = index(u, v + 1);
				let c = index(u + 1, v + 1);
				let d = index(u + 1, v);
				triangles.push([a, b, d]);
				triangles.push([b, c, d]);
			}
		}

		let normals = vec![V3::zeros(); particles.len()];
		Self {
			w,
			h,
			particles,
			constraints,
			triangles,
			normals,
		}
	}

	pub fn index(&self, u: usize, v: usize) -> usize {
		u + v * (self.w + 1)
	}

	/// Area-weighted vertex normals from current positions, the same
	/// normals the renderer shades with.
	fn update_normals(&mut self) {
		for n in self.normals.iter_mut() {
			*n = V3::zeros();
		}
		for tri in self.triangles.iter() {
			let pa = self.particles[tri[0]].pos;
			let pb = self.particles[tri[1]].pos;
			let pc = self.particles[tri[2]].pos;
			let face = (pc - pb).cross(&(pa - pb));
			for &i in tri {
				self.normals[i] += face;
			}
		}
		for n in self.normals.iter_mut() {
			let mag = n.magnitude();
			if mag > 0.0 {
				*n /= mag;
			}
		}
	}

	/// Per-facet aerodynamic push: project the wind onto each vertex
	/// normal, once per adjacent triangle. Interior particles pick up
	/// more contributions than boundary ones purely because they touch
	/// more triangles, behavior kept as-is from the reference demo.
	pub fn add_wind_force(&mut self, wind: V3) {
		self.update_normals();
		for tri in self.triangles.iter() {
			for &i in tri {
				let normal = self.normals[i];
				self.particles[i].add_force(normal * normal.dot(&wind));
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn sheet() -> Cloth {
		Cloth::new(10, 10, plane(250., 250.))
	}

	#[test]
	fn grid_counts() {
		let cloth = sheet();
		assert_eq!(cloth.particles.len(), 11 * 11);
		// w*(h+1) vertical + h*(w+1) horizontal
		assert_eq!(cloth.constraints.len(), 10 * 11 + 10 * 11);
		assert_eq!(cloth.triangles.len(), 2 * 10 * 10);
	}

	#[test]
	fn index_layout() {
		let cloth = sheet();
		assert_eq!(cloth.index(0, 0), 0);
		assert_eq!(cloth.index(10, 0), 10);
		assert_eq!(cloth.index(0, 1), 11);
		assert_eq!(cloth.index(10, 10), 120);
	}

	#[test]
	fn plane_rest_positions() {
		let cloth = sheet();
		let p0 = cloth.particles[cloth.index(0, 0)].pos;
		assert!((p0 - V3::new(-125., 125., 0.)).magnitude() < 1e-4);
		let p1 = cloth.particles[cloth.index(10, 10)].pos;
		assert!((p1 - V3::new(125., 375., 0.)).magnitude() < 1e-4);
		// neighbor spacing matches the rest distance
		let d = (cloth.particles[1].pos - cloth.particles[0].pos).magnitude();
		assert!((d - REST_DISTANCE).abs() < 1e-4);
	}

	#[test]
	fn constraints_link_neighbors_only() {
		let cloth = sheet();
		for c in cloth.constraints.iter() {
			let (ua, va) = (c.a % 11, c.a / 11);
			let (ub, vb) = (c.b % 11, c.b / 11);
			let du = ua.abs_diff(ub);
			let dv = va.abs_diff(vb);
			assert!(du + dv == 1, "non-structural link {} {}", c.a, c.b);
		}
	}

	#[test]
	fn wind_accumulates_per_adjacent_triangle() {
		// flat sheet, all normals are +-z, so a unit z wind turns the
		// contribution count directly into accel magnitude
		let mut cloth = sheet();
		let wind = V3::new(0., 0., 1.);
		cloth.add_wind_force(wind);
		let corner = cloth.particles[cloth.index(0, 0)].accel[2].abs();
		let interior = cloth.particles[cloth.index(5, 5)].accel[2].abs();
		// corner touches 1 triangle, an interior vertex touches 6
		assert!((interior / corner - 6.0).abs() < 1e-3);
	}

	#[test]
	fn wind_along_surface_is_no_force() {
		let mut cloth = sheet();
		cloth.add_wind_force(V3::new(1., 0., 0.));
		for p in cloth.particles.iter() {
			assert!(p.accel.magnitude() < 1e-5);
		}
	}
}
