use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular matrix of [`Cell`]s, indexed `(x, y)`.
///
/// Cloning a board yields an independent snapshot; every mutation goes through
/// `&mut self` so a caller that wants copy-on-write clones first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Creates a board with no mines and every cell hidden.
    pub fn empty(size: Coord2) -> Self {
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // shape comes from `size`, both axes fit in `Coord`
            Cell::new((x as Coord, y as Coord))
        });
        Self { cells }
    }

    /// Creates a hidden board carrying the mines of `layout`, counts included.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let mut board = Self::empty(layout.size());
        board.apply_layout(layout);
        board
    }

    /// Replaces the mines of this board and recomputes every adjacency count.
    pub fn apply_layout(&mut self, layout: &MineLayout) {
        debug_assert_eq!(layout.size(), self.size());
        for cell in self.cells.iter_mut() {
            cell.is_mine = layout[cell.coords];
        }
        self.recompute_adjacency_counts();
    }

    /// Sets `adjacent_mines` on every safe cell; placement code calls this once.
    pub fn recompute_adjacency_counts(&mut self) {
        let counts = adjacency_counts(&self.cells.map(|cell| cell.is_mine));
        for cell in self.cells.iter_mut() {
            cell.adjacent_mines = if cell.is_mine {
                0
            } else {
                counts[cell.coords.to_nd_index()]
            };
        }
    }

    pub fn size(&self) -> Coord2 {
        size_of(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        if self.contains(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: Coord) -> impl Iterator<Item = &Cell> {
        self.cells.column(y as usize).into_iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn flags_used(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed)
    }

    pub fn mine_layout(&self) -> MineLayout {
        MineLayout::from_mine_mask(self.cells.map(|cell| cell.is_mine))
    }

    /// Adjacent-mine counts as a plain matrix, mines at 0.
    pub fn count_matrix(&self) -> Array2<u8> {
        self.cells
            .map(|cell| if cell.is_mine { 0 } else { cell.adjacent_mines })
    }

    fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| pred(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
