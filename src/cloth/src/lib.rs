pub mod cloth;
pub mod collider;
pub mod constraint;
pub mod controller_message;
pub mod cworld;
pub mod particle;
pub mod pins;

pub type V3 = nalgebra::Vector3<f32>;
