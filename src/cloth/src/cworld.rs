use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime};

use fnv::FnvHashSet;

use crate::cloth::{plane, Cloth, MASS, REST_DISTANCE};
use crate::collider::{Ball, Floor};
use crate::controller_message::ControllerMessage;
use crate::pins::PinFormation;
use crate::V3;
use protocol::pr_model::PrModel;

pub const GRAVITY: f32 = 981.0 * 1.4;
pub const TIMESTEP: f32 = 18.0 / 1000.0;

/// Oscillating wind, strength and direction drift with elapsed time
/// (seconds).
pub fn wind_force(t: f32) -> V3 {
	let strength = (t / 7.0).cos() * 20.0 + 40.0;
	let dir = V3::new((t / 2.0).sin(), (t / 3.0).cos(), t.sin());
	dir.normalize() * strength
}

/// The simulation context: cloth, colliders, pins and the frame clock.
/// Owned by the driver, one `step` per display frame.
pub struct CWorld {
	pub dt: f32,
	pub time_scale: f32,
	iterations: usize,

	enable_wind: bool,
	show_ball: bool,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,

	time: f32,
	cloth: Cloth,
	gravity: V3,
	floor: Floor,
	ball: Ball,
	formation: PinFormation,
	pins: FnvHashSet<usize>,
}

impl Default for CWorld {
	fn default() -> Self {
		let (xsegs, ysegs) = (10, 10);
		let cloth = Cloth::new(
			xsegs,
			ysegs,
			plane(REST_DISTANCE * xsegs as f32, REST_DISTANCE * ysegs as f32),
		);
		let formation = PinFormation::Edge;
		Self {
			dt: TIMESTEP,
			time_scale: 1.0,
			iterations: 1,
			enable_wind: true,
			show_ball: false,
			forward_frames: -1,
			time: 0.0,
			pins: formation.indices(cloth.w),
			formation,
			cloth,
			gravity: V3::new(0.0, -GRAVITY * MASS, 0.0),
			floor: Floor { y: -250.0 },
			ball: Ball::new(60.0),
		}
	}
}

impl CWorld {
	pub fn with_cloth(mut self, cloth: Cloth) -> Self {
		self.pins = self.formation.indices(cloth.w);
		self.cloth = cloth;
		self
	}

	pub fn with_dt(mut self, dt: f32) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_time_scale(mut self, time_scale: f32) -> Self {
		self.time_scale = time_scale;
		self
	}

	/// Relaxation passes per step. One pass matches the reference demo,
	/// higher counts trade speed for less visible stretch.
	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations.max(1);
		self
	}

	pub fn with_wind(mut self, on: bool) -> Self {
		self.enable_wind = on;
		self
	}

	pub fn with_ball(mut self, on: bool) -> Self {
		self.show_ball = on;
		self
	}

	pub fn with_floor(mut self, y: f32) -> Self {
		self.floor = Floor { y };
		self
	}

	pub fn with_formation(mut self, formation: PinFormation) -> Self {
		self.set_formation(formation);
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 1; // provide first frame
		self
	}

	pub fn cloth(&self) -> &Cloth {
		&self.cloth
	}

	pub fn set_formation(&mut self, formation: PinFormation) {
		self.formation = formation;
		self.pins = formation.indices(self.cloth.w);
	}

	/// Replace the active pin set wholesale.
	pub fn set_pins(&mut self, pins: FnvHashSet<usize>) {
		self.pins = pins;
	}

	pub fn toggle_pins(&mut self) {
		let formation = PinFormation::random(&mut rand::thread_rng());
		eprintln!("INFO: pin formation {:?}", formation);
		self.set_formation(formation);
	}

	pub fn toggle_wind(&mut self) {
		self.enable_wind = !self.enable_wind;
	}

	pub fn toggle_ball(&mut self) {
		self.show_ball = !self.show_ball;
	}

	pub fn pr_model(&self) -> PrModel {
		let particles =
			self.cloth.particles.iter().map(|p| p.render()).collect();
		let constraints = self
			.cloth
			.constraints
			.iter()
			.enumerate()
			.map(|(id, c)| c.render(id))
			.collect();
		PrModel {
			particles,
			constraints,
			ball: self.ball.render(self.show_ball),
		}
	}

	#[cfg(not(debug_assertions))]
	fn integrate_particles(&mut self, dt2: f32) {
		use rayon::prelude::*;
		self.cloth
			.particles
			.par_iter_mut()
			.for_each(|p| p.integrate(dt2));
	}

	#[cfg(debug_assertions)]
	fn integrate_particles(&mut self, dt2: f32) {
		self.cloth
			.particles
			.iter_mut()
			.for_each(|p| p.integrate(dt2));
	}

	/// One fixed timestep at elapsed time `time` (seconds). Phase order
	/// matters: forces, integration, relaxation, collisions, pins.
	pub fn step(&mut self, time: f32) {
		if self.dt == 0f32 {
			return;
		}
		if self.enable_wind {
			self.cloth.add_wind_force(wind_force(time));
		}
		let gravity = self.gravity;
		for p in self.cloth.particles.iter_mut() {
			p.add_force(gravity);
		}
		self.integrate_particles(self.dt * self.dt);

		// sequential by design, corrections feed into later constraints
		for _ in 0..self.iterations {
			for c in self.cloth.constraints.iter() {
				c.satisfy(&mut self.cloth.particles);
			}
		}

		if self.show_ball {
			self.ball.orbit(time);
			for p in self.cloth.particles.iter_mut() {
				self.ball.apply(&mut p.pos);
			}
		}
		for p in self.cloth.particles.iter_mut() {
			self.floor.apply(&mut p.pos);
		}
		for &i in self.pins.iter() {
			self.cloth.particles[i].reset_to_origin();
		}
	}

	/// Advance one frame on the internal clock.
	pub fn run(&mut self) {
		self.time += self.dt;
		let time = self.time;
		self.step(time);
	}

	pub fn run_thread(
		&mut self,
		tx: Sender<PrModel>,
		rx: Receiver<ControllerMessage>,
	) {
		let mut start_time = SystemTime::now();
		let rtime: u64 = (self.dt * 1e6 * self.time_scale) as u64;
		let mut first_frame = true;
		loop {
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				if !first_frame {
					self.run();
				} else {
					first_frame = false;
				}
				let model = self.pr_model();
				if tx.send(model).is_err() {
					eprintln!("INFO: viewer closed, stop physics thread");
					return;
				}
			}

			let next_time = SystemTime::now();
			let dt = next_time
				.duration_since(start_time)
				.unwrap_or_default()
				.as_micros() as u64;
			while let Ok(msg) = rx.try_recv() {
				match msg {
					ControllerMessage::TogglePause => {
						if self.forward_frames == 0 {
							self.forward_frames = -1;
						} else {
							self.forward_frames = 0;
						}
					}
					ControllerMessage::FrameForward => {
						if self.forward_frames == 0 {
							self.forward_frames += 1;
						}
					}
					ControllerMessage::TogglePins => self.toggle_pins(),
					ControllerMessage::ToggleWind => self.toggle_wind(),
					ControllerMessage::ToggleBall => self.toggle_ball(),
				}
			}
			if dt < rtime {
				std::thread::sleep(Duration::from_micros(rtime - dt));
			}
			start_time = next_time;
		}
	}
}
