//! Core type definitions: coordinates, grid layouts, species, and the rule
//! tables that drive every organism's turn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 0-based grid position: `row` counts down from the top edge, `column`
/// across from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The coordinate one offset away; may fall outside any particular grid
    pub fn offset(self, delta_row: i32, delta_column: i32) -> Self {
        Self {
            row: self.row + delta_row,
            column: self.column + delta_column,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Moore neighborhood of a square cell
const SQUARE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Hex neighborhood for odd rows, which are staggered half a cell right
const HEX_ODD_OFFSETS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Hex neighborhood for even rows, staggered half a cell left
const HEX_EVEN_OFFSETS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Grid topology: which cells neighbor which, and the default world size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Rectangular lattice with the eight-cell Moore neighborhood
    Square,
    /// Staggered hexagonal lattice with six neighbors per cell
    Hex,
}

impl LayoutKind {
    /// Relative neighbor offsets for a cell in `row` under this layout.
    ///
    /// Square cells have the same eight offsets everywhere. Hex cells have
    /// six, and the set depends on the parity of `row` because odd rows are
    /// drawn shifted half a cell to the right.
    pub fn offsets(self, row: i32) -> &'static [(i32, i32)] {
        match self {
            LayoutKind::Square => &SQUARE_OFFSETS,
            LayoutKind::Hex => {
                if row % 2 == 1 {
                    &HEX_ODD_OFFSETS
                } else {
                    &HEX_EVEN_OFFSETS
                }
            }
        }
    }

    /// Default (rows, columns) for a world of this layout
    pub fn default_dimensions(self) -> (i32, i32) {
        match self {
            LayoutKind::Square => (30, 40),
            LayoutKind::Hex => (17, 21),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Square => write!(f, "square"),
            LayoutKind::Hex => write!(f, "hex"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(LayoutKind::Square),
            "hex" => Ok(LayoutKind::Hex),
            other => Err(Error::InvalidConfig(format!("unknown layout {:?}", other))),
        }
    }
}

/// RGB display color derived from cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const GREEN: Color = Color { r: 0, g: 128, b: 0 };
    pub const YELLOW: Color = Color {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
}

/// The closed set of organism kinds.
///
/// All species-specific behavior lives in the rule-table methods here: who
/// eats whom, who breeds with whom, breeding thresholds, energy budgets, and
/// whether the species moves. The turn algorithm itself is species-blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Plant,
    Herbivore,
    Omnivore,
    Carnivore,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Plant,
        Species::Herbivore,
        Species::Omnivore,
        Species::Carnivore,
    ];

    /// Whether this species may eat a member of `prey`.
    ///
    /// The relation is one-directional and no species eats its own kind:
    /// plants eat nothing, herbivores eat plants, omnivores eat plants and
    /// herbivores, carnivores eat herbivores and omnivores. Nothing eats a
    /// carnivore.
    pub fn eats(self, prey: Species) -> bool {
        match self {
            Species::Plant => false,
            Species::Herbivore => matches!(prey, Species::Plant),
            Species::Omnivore => matches!(prey, Species::Plant | Species::Herbivore),
            Species::Carnivore => matches!(prey, Species::Herbivore | Species::Omnivore),
        }
    }

    /// Whether a member of this species may be eaten by `eater`
    pub fn edible_to(self, eater: Species) -> bool {
        eater.eats(self)
    }

    /// Breeding partners must be the same species, for all four species
    pub fn breeds_with(self, partner: Species) -> bool {
        self == partner
    }

    /// Adjacency counts a member of this species needs before it breeds
    pub fn breed_threshold(self) -> BreedThreshold {
        match self {
            Species::Plant => BreedThreshold {
                min_empty: 3,
                min_partners: 2,
                food: FoodRule::Exactly(0),
            },
            Species::Herbivore => BreedThreshold {
                min_empty: 2,
                min_partners: 1,
                food: FoodRule::AtLeast(2),
            },
            Species::Omnivore => BreedThreshold {
                min_empty: 3,
                min_partners: 1,
                food: FoodRule::Exactly(1),
            },
            Species::Carnivore => BreedThreshold {
                min_empty: 3,
                min_partners: 1,
                food: FoodRule::Exactly(2),
            },
        }
    }

    /// Turns a member survives without eating; `None` means it never starves
    pub fn max_energy(self) -> Option<u32> {
        match self {
            Species::Plant => None,
            Species::Herbivore | Species::Omnivore | Species::Carnivore => Some(5),
        }
    }

    /// Sessile species skip the movement step of their turn entirely
    pub fn is_sessile(self) -> bool {
        matches!(self, Species::Plant)
    }

    /// Display color for cells occupied by this species
    pub fn color(self) -> Color {
        match self {
            Species::Plant => Color::GREEN,
            Species::Herbivore => Color::YELLOW,
            Species::Omnivore => Color::BLUE,
            Species::Carnivore => Color::RED,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Plant => write!(f, "plant"),
            Species::Herbivore => write!(f, "herbivore"),
            Species::Omnivore => write!(f, "omnivore"),
            Species::Carnivore => write!(f, "carnivore"),
        }
    }
}

/// Adjacency requirements gating reproduction for one species.
///
/// Every species requires at least two empty neighbors, so a breeder always
/// has an empty cell left for its offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreedThreshold {
    /// Minimum adjacent empty cells
    pub min_empty: usize,
    /// Minimum adjacent same-species partners
    pub min_partners: usize,
    /// Constraint on the count of adjacent edible cells
    pub food: FoodRule,
}

impl BreedThreshold {
    /// Whether the observed adjacency counts satisfy this threshold
    pub fn permits(self, empty: usize, partners: usize, food: usize) -> bool {
        if empty < self.min_empty || partners < self.min_partners {
            return false;
        }
        match self.food {
            FoodRule::AtLeast(n) => food >= n,
            FoodRule::Exactly(n) => food == n,
        }
    }
}

/// Food-count constraint inside a breeding threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodRule {
    AtLeast(usize),
    Exactly(usize),
}
