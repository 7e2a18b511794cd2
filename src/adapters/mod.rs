//! Adapters implementing the collaborator ports.

pub mod grid_world;

pub use grid_world::GridWorld;
