//! Property-based tests for the world engine.
//!
//! These tests verify determinism and the structural invariants every
//! reachable world state must uphold.
//! Run with: cargo test -p vivarium-world --test prop_world

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use vivarium_core::{LayoutKind, SpawnWeights, WorldConfig};
use vivarium_world::{OrganismId, Selector, World};

fn layouts() -> impl Strategy<Value = LayoutKind> {
    prop_oneof![Just(LayoutKind::Square), Just(LayoutKind::Hex)]
}

fn configs() -> impl Strategy<Value = WorldConfig> {
    (layouts(), 1i32..=16, 1i32..=16, any::<u64>()).prop_map(|(layout, rows, columns, seed)| {
        WorldConfig {
            layout,
            rows,
            columns,
            seed,
            spawn: SpawnWeights::default(),
        }
    })
}

/// Back-references, energy bounds, id uniqueness and census consistency
/// for one world state.
fn check_structure(world: &World) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for cell in world.cells() {
        if let Some(organism) = cell.occupant() {
            prop_assert_eq!(organism.cell, cell.coordinate());
            prop_assert!(ids.insert(organism.id), "duplicate id {}", organism.id);
            match organism.species.max_energy() {
                Some(max) => {
                    let energy = organism.energy.expect("bounded species carries energy");
                    prop_assert!(energy <= max);
                }
                None => prop_assert_eq!(organism.energy, None),
            }
        }
    }
    prop_assert_eq!(ids.len(), world.population());
    prop_assert_eq!(world.census().total(), world.population());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Equal seeds replay the exact same draw sequence, and resetting
    /// rewinds a stream to its start.
    #[test]
    fn prop_selector_draws_replay(
        seed in any::<u64>(),
        bounds in prop::collection::vec(1usize..=64, 1..64)
    ) {
        let mut a = Selector::new(seed);
        let mut b = Selector::new(seed);
        let draws: Vec<usize> = bounds.iter().map(|&bound| a.next(bound)).collect();
        let again: Vec<usize> = bounds.iter().map(|&bound| b.next(bound)).collect();
        prop_assert_eq!(&draws, &again);

        a.reset();
        let replayed: Vec<usize> = bounds.iter().map(|&bound| a.next(bound)).collect();
        prop_assert_eq!(&draws, &replayed);
    }

    /// A fresh world honors its configuration and starts structurally sound.
    #[test]
    fn prop_construction_matches_config(config in configs()) {
        let world = World::new(config.clone()).unwrap();
        prop_assert_eq!(world.grid().layout(), config.layout);
        prop_assert_eq!(world.grid().rows(), config.rows);
        prop_assert_eq!(world.grid().columns(), config.columns);
        prop_assert_eq!(world.turn(), 0);
        prop_assert!(world.population() <= (config.rows * config.columns) as usize);

        for cell in world.cells() {
            if let Some(organism) = cell.occupant() {
                prop_assert_eq!(organism.energy, organism.species.max_energy());
            }
        }
        check_structure(&world)?;
    }

    /// Structural invariants survive any number of turns.
    #[test]
    fn prop_simulation_upholds_invariants(config in configs(), turns in 0u64..12) {
        let mut world = World::new(config).unwrap();
        for _ in 0..turns {
            world.simulate().unwrap();
            check_structure(&world)?;
        }
        prop_assert_eq!(world.turn(), turns);
    }

    /// Two worlds built and run from the same configuration agree cell for
    /// cell, organism for organism.
    #[test]
    fn prop_same_seed_runs_agree(config in configs(), turns in 0u64..10) {
        let mut a = World::new(config.clone()).unwrap();
        let mut b = World::new(config).unwrap();
        a.run(turns).unwrap();
        b.run(turns).unwrap();
        prop_assert!(a.cells().eq(b.cells()));
    }

    /// Ids are never reused: once an organism dies its id stays dead, and a
    /// living id never changes species.
    #[test]
    fn prop_ids_are_never_recycled(config in configs(), turns in 1u64..10) {
        let mut world = World::new(config).unwrap();
        let mut ever_seen = HashMap::new();
        let mut previous: HashSet<OrganismId> = HashSet::new();

        for _ in 0..=turns {
            let mut current = HashSet::new();
            for cell in world.cells() {
                if let Some(organism) = cell.occupant() {
                    current.insert(organism.id);
                    match ever_seen.get(&organism.id) {
                        Some(&species) => {
                            prop_assert_eq!(species, organism.species);
                            prop_assert!(
                                previous.contains(&organism.id),
                                "id {} came back from the dead",
                                organism.id
                            );
                        }
                        None => {
                            ever_seen.insert(organism.id, organism.species);
                        }
                    }
                }
            }
            previous = current;
            world.simulate().unwrap();
        }
    }

    /// The population can never outgrow the grid, whatever happens.
    #[test]
    fn prop_population_fits_the_grid(config in configs(), turns in 0u64..12) {
        let cells = (config.rows * config.columns) as usize;
        let mut world = World::new(config).unwrap();
        for _ in 0..turns {
            world.simulate().unwrap();
            prop_assert!(world.population() <= cells);
        }
    }
}
