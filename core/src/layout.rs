use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions of a board, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            layout.set_mine(coords);
        }
        Ok(layout)
    }

    /// Builds a layout from a row-major matrix (`rows[y][x]`).
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord2 = (
            width.try_into().map_err(|_| GameError::InvalidBoardShape)?,
            height.try_into().map_err(|_| GameError::InvalidBoardShape)?,
        );
        let mine_mask = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| rows[y][x]);
        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Row-major copy of the mask (`rows[y][x]`).
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let (size_x, size_y) = self.size();
        (0..size_y)
            .map(|y| (0..size_x).map(|x| self[(x, y)]).collect())
            .collect()
    }

    pub fn size(&self) -> Coord2 {
        size_of(&self.mine_mask)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    /// Marks `coords` as mined, returning whether it was free before.
    /// Out-of-bounds coordinates are ignored and return `false`.
    pub fn set_mine(&mut self, coords: Coord2) -> bool {
        if !in_bounds(coords, self.size()) || self[coords] {
            return false;
        }
        self[coords] = true;
        self.mine_count += 1;
        true
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        count_mined_neighbors(&self.mine_mask, coords)
    }

    pub fn adjacency_counts(&self) -> Array2<u8> {
        adjacency_counts(&self.mine_mask)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.mine_mask[(x as usize, y as usize)]
    }
}

fn count_mined_neighbors(mines: &Array2<bool>, coords: Coord2) -> u8 {
    // at most 8 neighbors, always fits
    mines
        .iter_neighbors(coords)
        .filter(|&pos| mines[pos.to_nd_index()])
        .count() as u8
}

/// Mined-neighbor count for every cell of `mines`; mine cells are left at 0.
///
/// This is the one counting routine, shared by [`Board`] and the raw matrices
/// of the daily puzzle.
pub fn adjacency_counts(mines: &Array2<bool>) -> Array2<u8> {
    let mut counts = Array2::zeros(mines.dim());
    for coords in iter_coords(size_of(mines)) {
        if !mines[coords.to_nd_index()] {
            counts[coords.to_nd_index()] = count_mined_neighbors(mines, coords);
        }
    }
    counts
}
