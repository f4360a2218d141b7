//! Bounded 2D grid of cells.

use serde::Serialize;
use vivarium_core::{Coordinate, LayoutKind};

use crate::cell::Cell;

/// The fixed lattice of cells making up a world.
///
/// Cells are stored in row-major order, which is also the order organisms
/// take their turns in. The grid is bounded: coordinates outside it are not
/// wrapped, they simply have no cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    layout: LayoutKind,
    rows: i32,
    columns: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(layout: LayoutKind, rows: i32, columns: i32) -> Self {
        let mut cells = Vec::with_capacity(rows as usize * columns as usize);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::new(Coordinate::new(row, column)));
            }
        }
        Self {
            layout,
            rows,
            columns,
            cells,
        }
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Whether `coordinate` falls inside `[0, rows) x [0, columns)`
    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.row >= 0
            && coordinate.row < self.rows
            && coordinate.column >= 0
            && coordinate.column < self.columns
    }

    fn index(&self, coordinate: Coordinate) -> usize {
        coordinate.row as usize * self.columns as usize + coordinate.column as usize
    }

    /// The cell at `coordinate`, or `None` when out of bounds
    pub fn get(&self, coordinate: Coordinate) -> Option<&Cell> {
        self.in_bounds(coordinate)
            .then(|| &self.cells[self.index(coordinate)])
    }

    /// Lookup for coordinates already proven in bounds, such as snapshot
    /// entries and neighbor lists
    pub(crate) fn cell(&self, coordinate: Coordinate) -> &Cell {
        &self.cells[self.index(coordinate)]
    }

    pub(crate) fn cell_mut(&mut self, coordinate: Coordinate) -> &mut Cell {
        let index = self.index(coordinate);
        &mut self.cells[index]
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// In-bounds neighbors of `coordinate` under this grid's layout, in the
    /// fixed offset-table order
    pub fn neighbors(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        self.layout
            .offsets(coordinate.row)
            .iter()
            .map(|&(delta_row, delta_column)| coordinate.offset(delta_row, delta_column))
            .filter(|&candidate| self.in_bounds(candidate))
            .collect()
    }
}
