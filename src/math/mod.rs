//! Mathematical utilities and data structures

pub mod block_box;
pub mod chance;
pub mod vector;

pub use block_box::BlockBox;
pub use chance::one_in;
pub use vector::{angle_between, random_unit_vector, random_vector_within_angle, UP};
