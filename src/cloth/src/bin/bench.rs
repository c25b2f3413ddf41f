use std::time::SystemTime;
use vcloth::cworld::CWorld;

fn main() {
	let start = SystemTime::now();
	let mut cworld = CWorld::default().with_ball(true);
	let rframes = 1000;
	for _ in 0..rframes {
		cworld.run();
	}
	let time = rframes as f32 * cworld.dt;
	let duration = SystemTime::now().duration_since(start).unwrap().as_micros();
	eprintln!("{:.3}%", duration as f32 / time / 1e4);
}
