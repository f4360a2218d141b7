//! World construction and the turn algorithm.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vivarium_core::{Coordinate, Error, Result, Species, SpawnWeights, WorldConfig};

use crate::cell::Cell;
use crate::grid::Grid;
use crate::organism::{Organism, OrganismId};
use crate::rng::Selector;

/// Per-species population counts for one world state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub plants: usize,
    pub herbivores: usize,
    pub omnivores: usize,
    pub carnivores: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.plants + self.herbivores + self.omnivores + self.carnivores
    }

    fn tally(&mut self, species: Species) {
        match species {
            Species::Plant => self.plants += 1,
            Species::Herbivore => self.herbivores += 1,
            Species::Omnivore => self.omnivores += 1,
            Species::Carnivore => self.carnivores += 1,
        }
    }
}

/// What happened during one simulated turn, for logging
#[derive(Debug, Default)]
struct TurnOutcome {
    starved: u32,
    born: u32,
    eaten: u32,
    moved: u32,
}

/// A bounded ecosystem: the cell grid, the selector feeding its random
/// choices, and a turn counter.
///
/// The world's layout and dimensions are fixed at construction; switching
/// layouts means building a fresh world. All occupancy changes happen inside
/// [`World::simulate`], so any reachable state is one a legal turn sequence
/// produced.
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    rng: Selector,
    config: WorldConfig,
    turn: u64,
    next_organism: u64,
}

impl World {
    /// Build a world from `config` and populate it with one spawn draw per
    /// cell, in row-major order.
    ///
    /// The selector is reset immediately before and after population, so
    /// worlds of different sizes but equal seeds still agree on every
    /// gameplay draw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `config` fails validation; no
    /// partially built world is produced.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let mut world = Self {
            grid: Grid::new(config.layout, config.rows, config.columns),
            rng: Selector::new(config.seed),
            config,
            turn: 0,
            next_organism: 0,
        };
        world.populate()?;
        let census = world.census();
        info!(
            layout = %world.config.layout,
            rows = world.config.rows,
            columns = world.config.columns,
            seed = world.config.seed,
            plants = census.plants,
            herbivores = census.herbivores,
            omnivores = census.omnivores,
            carnivores = census.carnivores,
            "World populated"
        );
        Ok(world)
    }

    fn populate(&mut self) -> Result<()> {
        self.rng.reset();
        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                let draw = self.rng.next(SpawnWeights::DRAW_BOUND as usize) as u32;
                if let Some(species) = self.config.spawn.species_for(draw) {
                    self.spawn(Coordinate::new(row, column), species)?;
                }
            }
        }
        self.rng.reset();
        Ok(())
    }

    fn mint_id(&mut self) -> OrganismId {
        let id = OrganismId(self.next_organism);
        self.next_organism += 1;
        id
    }

    /// Create a fresh organism of `species` on the empty cell at `coordinate`
    fn spawn(&mut self, coordinate: Coordinate, species: Species) -> Result<()> {
        let id = self.mint_id();
        self.grid
            .cell_mut(coordinate)
            .set_occupant(Organism::new(id, species, coordinate))
    }

    /// Advance the world by exactly one turn.
    ///
    /// Every occupied cell is snapshotted in row-major order at the start of
    /// the turn, then each snapshotted organism takes its turn in that
    /// order: starvation check, energy decrement, breeding, movement and
    /// eating. Organisms born this turn first act next turn; organisms eaten
    /// this turn act no further.
    ///
    /// # Errors
    ///
    /// Surfaces [`Error::InvalidState`] if an engine invariant is violated
    /// mid-turn. Legal turn sequences never produce one.
    pub fn simulate(&mut self) -> Result<()> {
        let snapshot: Vec<(Coordinate, OrganismId)> = self
            .grid
            .iter()
            .filter_map(|cell| cell.occupant().map(|organism| (cell.coordinate(), organism.id)))
            .collect();

        let mut outcome = TurnOutcome::default();
        for (coordinate, id) in snapshot {
            self.take_turn(coordinate, id, &mut outcome)?;
        }

        self.turn += 1;
        debug!(
            turn = self.turn,
            starved = outcome.starved,
            born = outcome.born,
            eaten = outcome.eaten,
            moved = outcome.moved,
            population = self.population(),
            "Turn complete"
        );
        self.assert_invariants();
        Ok(())
    }

    /// Run `turns` consecutive turns
    pub fn run(&mut self, turns: u64) -> Result<()> {
        info!(turns, population = self.population(), "Running simulation");
        for _ in 0..turns {
            self.simulate()?;
        }
        info!(
            turn = self.turn,
            population = self.population(),
            "Simulation finished"
        );
        Ok(())
    }

    fn take_turn(
        &mut self,
        origin: Coordinate,
        id: OrganismId,
        outcome: &mut TurnOutcome,
    ) -> Result<()> {
        // Revalidate the snapshot entry. The organism may have been eaten
        // since the turn began, and its cell may since hold a mover or a
        // newborn whose turn this is not.
        let (species, starved) = match self.grid.cell(origin).occupant() {
            Some(organism) if organism.id == id => (organism.species, organism.starved()),
            _ => return Ok(()),
        };

        if starved {
            self.grid.cell_mut(origin).kill();
            outcome.starved += 1;
            return Ok(());
        }

        if let Some(organism) = self.grid.cell_mut(origin).occupant_mut() {
            organism.lose_energy();
        }

        let empty = self.adjacent_empty(origin);
        let partners = self.adjacent_breedable(origin);
        let food = self.adjacent_edible(origin);

        if species
            .breed_threshold()
            .permits(empty.len(), partners.len(), food.len())
        {
            // Thresholds all require spare empty neighbors, so the pick
            // cannot be from an empty list
            let destination = *self.rng.pick(&empty);
            self.spawn(destination, species)?;
            outcome.born += 1;
        }

        if species.is_sessile() {
            return Ok(());
        }

        // Recomputed after breeding: a cell the offspring just filled is no
        // longer somewhere to move
        let destinations = self.adjacent_edible_or_empty(origin);
        if destinations.is_empty() {
            return Ok(());
        }
        let destination = *self.rng.pick(&destinations);
        self.advance(origin, destination, outcome)
    }

    /// Move the organism at `origin` to `destination`, eating any prey there
    fn advance(
        &mut self,
        origin: Coordinate,
        destination: Coordinate,
        outcome: &mut TurnOutcome,
    ) -> Result<()> {
        let ate = self.grid.cell_mut(destination).kill().is_some();
        let mut mover = match self.grid.cell_mut(origin).kill() {
            Some(organism) => organism,
            None => {
                return Err(Error::InvalidState(format!(
                    "no organism to move at {}",
                    origin
                )))
            }
        };
        if ate {
            mover.restore_energy();
            outcome.eaten += 1;
        }
        mover.relocate(destination);
        self.grid.cell_mut(destination).set_occupant(mover)?;
        outcome.moved += 1;
        Ok(())
    }

    fn adjacent_where<F>(&self, origin: Coordinate, keep: F) -> Vec<Coordinate>
    where
        F: Fn(&Cell) -> bool,
    {
        self.grid
            .neighbors(origin)
            .into_iter()
            .filter(|&coordinate| keep(self.grid.cell(coordinate)))
            .collect()
    }

    /// Adjacent cells with no occupant
    fn adjacent_empty(&self, origin: Coordinate) -> Vec<Coordinate> {
        self.adjacent_where(origin, Cell::is_empty)
    }

    /// Adjacent cells holding a breeding partner for the organism at `origin`
    fn adjacent_breedable(&self, origin: Coordinate) -> Vec<Coordinate> {
        let cell = self.grid.cell(origin);
        self.adjacent_where(origin, |candidate| cell.can_breed(candidate))
    }

    /// Adjacent cells holding prey for the organism at `origin`
    fn adjacent_edible(&self, origin: Coordinate) -> Vec<Coordinate> {
        let cell = self.grid.cell(origin);
        self.adjacent_where(origin, |candidate| cell.can_eat(candidate))
    }

    /// Adjacent cells the organism at `origin` may move into: empty ones,
    /// plus ones holding its prey
    fn adjacent_edible_or_empty(&self, origin: Coordinate) -> Vec<Coordinate> {
        let cell = self.grid.cell(origin);
        self.adjacent_where(origin, |candidate| {
            candidate.is_empty() || cell.can_eat(candidate)
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Turns simulated so far
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// All cells in row-major order. The render path reads species and
    /// color through this without any way to mutate occupancy.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    pub fn population(&self) -> usize {
        self.grid.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Count every species in one pass
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in self.grid.iter() {
            if let Some(species) = cell.species() {
                census.tally(species);
            }
        }
        census
    }

    /// Audit structural invariants: back-references match cells and bounded
    /// energies stay within the species maximum
    fn assert_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for cell in self.grid.iter() {
            if let Some(organism) = cell.occupant() {
                assert_eq!(organism.cell, cell.coordinate());
                if let (Some(energy), Some(max)) = (organism.energy, organism.species.max_energy())
                {
                    assert!(energy <= max);
                }
            }
        }
    }
}

#[cfg(test)]
impl World {
    /// A world with every cell left empty, for tests that place organisms
    /// by hand
    fn unpopulated(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.layout, config.rows, config.columns),
            rng: Selector::new(config.seed),
            config,
            turn: 0,
            next_organism: 0,
        })
    }

    fn place(&mut self, coordinate: Coordinate, species: Species) -> Result<()> {
        self.spawn(coordinate, species)
    }

    fn place_with_energy(
        &mut self,
        coordinate: Coordinate,
        species: Species,
        energy: u32,
    ) -> Result<()> {
        self.spawn(coordinate, species)?;
        if let Some(organism) = self.grid.cell_mut(coordinate).occupant_mut() {
            organism.energy = Some(energy);
        }
        Ok(())
    }
}
