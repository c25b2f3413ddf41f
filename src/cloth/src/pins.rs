use fnv::FnvHashSet;
use rand::Rng;

/// Named anchor layouts from the demo. All indices sit on the grid
/// edge row `v = 0` (`0..=w`), the row the sheet hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinFormation {
	/// every particle of the edge row
	Edge,
	/// one particle near the middle of the edge row
	MidEdge,
	/// single corner
	Corner,
	/// classic two-corner hang
	TwoCorners,
	/// cut the rope ;)
	Loose,
}

pub const FORMATIONS: [PinFormation; 5] = [
	PinFormation::Edge,
	PinFormation::MidEdge,
	PinFormation::Corner,
	PinFormation::TwoCorners,
	PinFormation::Loose,
];

impl PinFormation {
	/// Particle indices for a cloth with `w` horizontal segments.
	/// Swapping the active set is an atomic replacement, never a
	/// per-particle flag.
	pub fn indices(&self, w: usize) -> FnvHashSet<usize> {
		match self {
			PinFormation::Edge => (0..=w).collect(),
			PinFormation::MidEdge => std::iter::once(w / 2 + 1).collect(),
			PinFormation::Corner => std::iter::once(0).collect(),
			PinFormation::TwoCorners => [0, w].into_iter().collect(),
			PinFormation::Loose => FnvHashSet::default(),
		}
	}

	pub fn random(rng: &mut impl Rng) -> Self {
		FORMATIONS[rng.gen_range(0..FORMATIONS.len())]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn edge_pins_whole_row() {
		let pins = PinFormation::Edge.indices(10);
		assert_eq!(pins.len(), 11);
		assert!((0..=10).all(|i| pins.contains(&i)));
	}

	#[test]
	fn two_corner_hang() {
		let pins = PinFormation::TwoCorners.indices(10);
		assert_eq!(pins.len(), 2);
		assert!(pins.contains(&0) && pins.contains(&10));
	}

	#[test]
	fn loose_is_empty() {
		assert!(PinFormation::Loose.indices(10).is_empty());
	}

	#[test]
	fn random_picks_known_formation() {
		let mut rng = rand::thread_rng();
		for _ in 0..32 {
			let f = PinFormation::random(&mut rng);
			assert!(FORMATIONS.contains(&f));
		}
	}
}
