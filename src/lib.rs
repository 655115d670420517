//! Animated aquarium and spiral watchfaces.
//!
//! The library holds the engine: entity pools, the per-tick simulation step,
//! the stateless renderers and the tick driver that the host feeds with
//! events. The binary in `main.rs` hosts it in a terminal.

pub mod clock;
pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod geometry;
pub mod grid;
pub mod random;
pub mod render;
pub mod shapes;
pub mod spawn;
pub mod spiral;
