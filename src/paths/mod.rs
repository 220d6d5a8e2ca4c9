//! Single-trajectory generators: the 2D unit-hop random walk and the 1D
//! Wiener process.

pub mod generator;
pub mod random_walk;
pub mod wiener;

pub use generator::PathGenerator;
pub use random_walk::{RandomWalk2D, Walk2D};
pub use wiener::{Wiener1D, WienerPath};
