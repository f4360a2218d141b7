//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{LayoutKind, Species};

/// Spawn weights for the initial population, in percent of the per-cell
/// draw.
///
/// Every cell of a fresh world takes one uniform draw in
/// `[0, DRAW_BOUND)`. Bands are assigned from the top of the range down, in
/// the order herbivore, plant, carnivore, omnivore; whatever the weights do
/// not claim is the chance of the cell starting empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWeights {
    /// Percent chance of a herbivore
    pub herbivore: u32,
    /// Percent chance of a plant
    pub plant: u32,
    /// Percent chance of a carnivore
    pub carnivore: u32,
    /// Percent chance of an omnivore
    pub omnivore: u32,
}

impl SpawnWeights {
    /// Exclusive upper bound of the per-cell spawn draw
    pub const DRAW_BOUND: u32 = 100;

    /// Reject weight sets that claim more than the whole draw range
    pub fn validate(&self) -> Result<()> {
        let claimed = u64::from(self.herbivore)
            + u64::from(self.plant)
            + u64::from(self.carnivore)
            + u64::from(self.omnivore);
        if claimed > u64::from(Self::DRAW_BOUND) {
            return Err(Error::InvalidConfig(format!(
                "spawn weights claim {} of a {} point draw",
                claimed,
                Self::DRAW_BOUND
            )));
        }
        Ok(())
    }

    /// Map one uniform draw in `[0, DRAW_BOUND)` to the species it spawns,
    /// or `None` for an empty cell. Assumes the weights passed `validate`.
    pub fn species_for(&self, draw: u32) -> Option<Species> {
        let herbivore_floor = Self::DRAW_BOUND - self.herbivore;
        let plant_floor = herbivore_floor - self.plant;
        let carnivore_floor = plant_floor - self.carnivore;
        let omnivore_floor = carnivore_floor - self.omnivore;

        if draw >= herbivore_floor {
            Some(Species::Herbivore)
        } else if draw >= plant_floor {
            Some(Species::Plant)
        } else if draw >= carnivore_floor {
            Some(Species::Carnivore)
        } else if draw >= omnivore_floor {
            Some(Species::Omnivore)
        } else {
            None
        }
    }
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            herbivore: 20,
            plant: 20,
            carnivore: 10,
            omnivore: 5,
        }
    }
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid topology
    pub layout: LayoutKind,
    /// Number of rows in the grid
    pub rows: i32,
    /// Number of columns per row
    pub columns: i32,
    /// Seed fixing both the initial population and all gameplay draws
    pub seed: u64,
    /// Initial population mix
    pub spawn: SpawnWeights,
}

impl WorldConfig {
    /// Configuration for `layout` at its default dimensions
    pub fn for_layout(layout: LayoutKind) -> Self {
        let (rows, columns) = layout.default_dimensions();
        Self {
            layout,
            rows,
            columns,
            seed: 0,
            spawn: SpawnWeights::default(),
        }
    }

    /// Reject dimensions or spawn weights no world can be built from
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.columns
            )));
        }
        self.spawn.validate()
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::for_layout(LayoutKind::Square)
    }
}
