use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

impl Board {
    /// Reveals `coords`, flooding outward from zero cells.
    ///
    /// Out-of-bounds, revealed and flagged cells are left alone. A mine is
    /// revealed and reported as [`RevealOutcome::HitMine`]; the cascade itself
    /// never opens a mine or a flagged cell.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell_mut(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        cell.is_revealed = true;
        if cell.is_mine {
            return RevealOutcome::HitMine;
        }

        if cell.adjacent_mines == 0 {
            self.flood_from(coords);
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn flood_from(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.neighbors(origin).collect();
        let mut opened = 0usize;

        while let Some(coords) = to_visit.pop_front() {
            let Some(cell) = self.cell_mut(coords) else {
                continue;
            };
            if cell.is_revealed || cell.is_flagged || cell.is_mine {
                continue;
            }

            cell.is_revealed = true;
            opened += 1;
            if cell.adjacent_mines == 0 {
                to_visit.extend(
                    self.neighbors(coords)
                        .filter(|&pos| !self[pos].is_revealed),
                );
            }
        }

        log::trace!("Cascade from {:?} opened {} cells", origin, opened);
    }

    /// Flips the flag on a hidden cell; revealed and out-of-bounds cells are
    /// left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        match self.cell_mut(coords) {
            Some(cell) if !cell.is_revealed => {
                cell.is_flagged = !cell.is_flagged;
                FlagOutcome::Changed
            }
            _ => FlagOutcome::NoChange,
        }
    }

    /// Every safe cell is revealed.
    pub fn check_win(&self) -> bool {
        self.iter().all(|cell| cell.is_mine || cell.is_revealed)
    }

    /// Reveals every mine and leaves all other cells as they are.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }
}

/// One frame of the loss animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlastStep {
    pub coords: Coord2,
    pub order: u16,
    pub delay_ms: u32,
}

/// Default spacing between two detonations.
pub const BLAST_STEP_MS: u32 = 100;

/// Every mine on `board`, nearest to `origin` first, ties broken by
/// coordinates.
pub fn blast_order(board: &Board, origin: Coord2, step_ms: u32) -> Vec<BlastStep> {
    let distance = |(x, y): Coord2| {
        let dx = i32::from(x) - i32::from(origin.0);
        let dy = i32::from(y) - i32::from(origin.1);
        dx * dx + dy * dy
    };

    let mut mines: Vec<Coord2> = board
        .iter()
        .filter(|cell| cell.is_mine)
        .map(|cell| cell.coords)
        .collect();
    mines.sort_by_key(|&coords| (distance(coords), coords));

    mines
        .into_iter()
        .zip(0u16..)
        .map(|(coords, order)| BlastStep {
            coords,
            order,
            delay_ms: u32::from(order).saturating_mul(step_ms),
        })
        .collect()
}
