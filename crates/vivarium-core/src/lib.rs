//! Core types and rule tables for the Vivarium ecosystem simulation.
//!
//! Everything in this crate is pure data: coordinates, layouts, species
//! rules, configuration, and errors. The world crate builds the running
//! simulation on top of these definitions.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
