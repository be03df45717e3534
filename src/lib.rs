//! Toroidal Game of Life: simulation core and the wgpu rectangle renderer
//! that draws it.

pub mod config;
pub mod gpu;
pub mod simulation;
