mod error;
mod look;
mod rotation;
mod twist;

pub use error::GeometryError;
pub use look::{look_state, LookState, OCCLUDED_STEP};
pub use rotation::{attitude_matrix, fk4_to_j2000, r1, r3, Frame, FrameRotation};
pub use twist::{derive_twist, REFERENCE_POLE};

#[cfg(test)]
pub use twist::spin_axis;
