//! Grid cells and occupancy.
//!
//! A cell owns at most one organism. All occupancy changes go through the
//! crate-private mutators here, so code outside the engine can observe a
//! world but never rearrange it.

use serde::Serialize;
use vivarium_core::{Color, Coordinate, Error, Result, Species};

use crate::organism::Organism;

/// One slot of the world grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    coordinate: Coordinate,
    occupant: Option<Organism>,
}

impl Cell {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            occupant: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn occupant(&self) -> Option<&Organism> {
        self.occupant.as_ref()
    }

    /// Species of the occupant, if any
    pub fn species(&self) -> Option<Species> {
        self.occupant.as_ref().map(|organism| organism.species)
    }

    /// Display color, recomputed from the occupant on every call so it can
    /// never disagree with occupancy
    pub fn color(&self) -> Color {
        self.species().map_or(Color::WHITE, Species::color)
    }

    /// True when this cell's occupant may eat `other`'s occupant. False
    /// whenever either cell is empty.
    pub fn can_eat(&self, other: &Cell) -> bool {
        match (self.species(), other.species()) {
            (Some(eater), Some(prey)) => eater.eats(prey),
            _ => false,
        }
    }

    /// True when the two occupants are breeding partners for each other
    pub fn can_breed(&self, other: &Cell) -> bool {
        match (self.species(), other.species()) {
            (Some(a), Some(b)) => a.breeds_with(b),
            _ => false,
        }
    }

    /// Install an occupant into an empty cell.
    ///
    /// The turn algorithm only ever targets cells it has just verified or
    /// emptied, so an occupied destination is an engine invariant violation,
    /// not a recoverable condition.
    pub(crate) fn set_occupant(&mut self, organism: Organism) -> Result<()> {
        if self.occupant.is_some() {
            return Err(Error::InvalidState(format!(
                "cell {} is already occupied",
                self.coordinate
            )));
        }
        self.occupant = Some(organism);
        Ok(())
    }

    /// Remove and return the occupant. Eaten prey is dropped by the caller;
    /// a moving organism is reinstalled at its destination.
    pub(crate) fn kill(&mut self) -> Option<Organism> {
        self.occupant.take()
    }

    pub(crate) fn occupant_mut(&mut self) -> Option<&mut Organism> {
        self.occupant.as_mut()
    }
}
