//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A structural invariant of the world was violated, such as installing
    /// an occupant into a cell that already holds one. Legal turn sequences
    /// never produce this; treat it as fatal.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A configuration value was rejected before any world was built.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
