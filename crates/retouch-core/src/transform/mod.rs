//! Geometric transforms.
//!
//! Only lossless quarter-turn rotation is provided. It is a discrete
//! operator: the session applies it to the working image and commits the
//! result as the new baseline.

mod rotation;

pub use rotation::{rotate90, rotated_dimensions};
