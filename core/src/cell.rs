use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One board position as seen by the engine.
///
/// `is_mine` and `adjacent_mines` are written once during placement. A mine's
/// `adjacent_mines` carries no meaning and is never read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn x(&self) -> u8 {
        self.coords.0
    }

    pub const fn y(&self) -> u8 {
        self.coords.1
    }

    pub const fn is_safe(&self) -> bool {
        !self.is_mine
    }

    /// Safe and showing a zero, the cells a cascade expands through.
    pub const fn is_blank(&self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }

    /// A clue that carries information: safe with at least one mined neighbor.
    pub const fn is_numbered(&self) -> bool {
        !self.is_mine && self.adjacent_mines > 0
    }

    /// Flag left on a safe cell, only meaningful once the game is over.
    pub const fn is_false_flag(&self) -> bool {
        self.is_flagged && !self.is_mine
    }
}
