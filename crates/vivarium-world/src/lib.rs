//! World simulation engine.
//!
//! This crate implements the bounded grid world where plants, herbivores,
//! omnivores and carnivores take turns starving, feeding, breeding and
//! moving.

pub mod cell;
pub mod grid;
pub mod organism;
pub mod rng;
pub mod world;

pub use cell::Cell;
pub use grid::Grid;
pub use organism::{Organism, OrganismId};
pub use rng::Selector;
pub use world::{Census, World};
