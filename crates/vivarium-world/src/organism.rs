//! Organism state.

use serde::Serialize;
use std::fmt;
use vivarium_core::{Coordinate, Species};

/// Identifier for an organism, unique within its world for the lifetime of
/// the world. Minted sequentially so same-seed worlds agree on every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single organism: a species tag, an energy reserve, and the coordinate
/// of the cell holding it.
///
/// The grid's cell is the only owner of an organism. `cell` is a lookup key
/// pointing back at that owner, kept in sync by the world whenever the
/// organism is moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organism {
    pub id: OrganismId,
    pub species: Species,
    /// Turns left before starvation; `None` for species that never starve
    pub energy: Option<u32>,
    pub cell: Coordinate,
}

impl Organism {
    pub(crate) fn new(id: OrganismId, species: Species, cell: Coordinate) -> Self {
        Self {
            id,
            species,
            energy: species.max_energy(),
            cell,
        }
    }

    /// True when the starvation check at the start of a turn removes this
    /// organism. Checked before the turn's energy decrement, so a fresh
    /// organism always survives at least its energy budget in turns.
    pub fn starved(&self) -> bool {
        self.energy == Some(0)
    }

    /// Spend one turn's worth of energy
    pub fn lose_energy(&mut self) {
        if let Some(energy) = &mut self.energy {
            *energy = energy.saturating_sub(1);
        }
    }

    /// Refill energy to the species maximum, after eating
    pub fn restore_energy(&mut self) {
        self.energy = self.species.max_energy();
    }

    /// Update the back-reference after the world moves this organism
    pub(crate) fn relocate(&mut self, cell: Coordinate) {
        self.cell = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_organism_starts_at_full_energy() {
        let herbivore = Organism::new(OrganismId(0), Species::Herbivore, Coordinate::new(0, 0));
        assert_eq!(herbivore.energy, Some(5));
        assert!(!herbivore.starved());

        let plant = Organism::new(OrganismId(1), Species::Plant, Coordinate::new(1, 1));
        assert_eq!(plant.energy, None);
    }

    #[test]
    fn test_energy_decrements_to_starvation() {
        let mut carnivore = Organism::new(OrganismId(0), Species::Carnivore, Coordinate::new(0, 0));
        for expected in (0..5).rev() {
            carnivore.lose_energy();
            assert_eq!(carnivore.energy, Some(expected));
        }
        assert!(carnivore.starved());

        // Saturates rather than wrapping
        carnivore.lose_energy();
        assert_eq!(carnivore.energy, Some(0));
    }

    #[test]
    fn test_plants_never_starve() {
        let mut plant = Organism::new(OrganismId(0), Species::Plant, Coordinate::new(0, 0));
        for _ in 0..100 {
            plant.lose_energy();
        }
        assert_eq!(plant.energy, None);
        assert!(!plant.starved());
    }

    #[test]
    fn test_restore_energy_refills_to_max() {
        let mut omnivore = Organism::new(OrganismId(0), Species::Omnivore, Coordinate::new(0, 0));
        omnivore.lose_energy();
        omnivore.lose_energy();
        assert_eq!(omnivore.energy, Some(3));
        omnivore.restore_energy();
        assert_eq!(omnivore.energy, Some(5));
    }

    #[test]
    fn test_relocate_updates_back_reference() {
        let mut herbivore = Organism::new(OrganismId(0), Species::Herbivore, Coordinate::new(2, 3));
        herbivore.relocate(Coordinate::new(2, 4));
        assert_eq!(herbivore.cell, Coordinate::new(2, 4));
    }
}
