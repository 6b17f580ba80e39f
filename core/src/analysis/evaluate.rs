//! Heuristic quality score of a mine layout.
//!
//! This is not a solver. It rewards informative numbers and penalizes shapes
//! that tend to force a guess, which is enough to rank candidate layouts
//! against each other. All weights are tuning constants.

use serde::{Deserialize, Serialize};

use crate::*;

pub const SAME_COUNT_PENALTY: f64 = 1.0;
pub const CORNER_PENALTY: f64 = 2.0;
pub const TANK_PENALTY: f64 = 3.0;
pub const COLLINEAR_PENALTY: f64 = 1.5;
pub const ASYMMETRY_WEIGHT: f64 = 0.5;
pub const MULTI_CLUE_BONUS: f64 = 0.5;

/// Penalty above which a cell counts as a likely 50/50 in [`LayoutReport`].
pub const FIFTY_FIFTY_THRESHOLD: f64 = 2.0;

/// Worth of a number to a player: ones and twos pin mines down, zeros only
/// open space, high numbers say little about which neighbor is which.
pub const fn information_value(adjacent_mines: u8) -> f64 {
    match adjacent_mines {
        0 => 0.25,
        1 | 2 => 2.0,
        3 | 4 => 1.0,
        5 => 0.0,
        _ => -1.0,
    }
}

/// Cells a cascade would not open: mines and numbered cells.
fn is_unresolved(cell: &Cell) -> bool {
    !cell.is_blank()
}

fn shared_unresolved_neighbors(board: &Board, a: Coord2, b: Coord2) -> usize {
    board
        .neighbors(a)
        .filter(|&pos| pos != b && within_one(pos, b) && is_unresolved(&board[pos]))
        .count()
}

/// 1-2-1 triples centered on `coords`, horizontal and vertical.
pub fn tank_patterns(board: &Board, coords: Coord2) -> usize {
    let size = board.size();
    [((-1, 0), (1, 0)), ((0, -1), (0, 1))]
        .into_iter()
        .filter(|&(before, after)| {
            let (Some(before), Some(after)) = (
                apply_delta(coords, before, size),
                apply_delta(coords, after, size),
            ) else {
                return false;
            };
            let counts = [&board[before], &board[coords], &board[after]]
                .map(|cell| cell.is_numbered().then_some(cell.adjacent_mines));
            counts == [Some(1), Some(2), Some(1)]
        })
        .count()
}

/// Directions in which `coords` starts a run of three equal non-zero numbers.
pub fn collinear_runs(board: &Board, coords: Coord2) -> usize {
    let cell = &board[coords];
    if !cell.is_numbered() {
        return 0;
    }

    let size = board.size();
    let same = |pos: Coord2| {
        let other = &board[pos];
        other.is_numbered() && other.adjacent_mines == cell.adjacent_mines
    };

    DISPLACEMENTS
        .into_iter()
        .filter(|&delta| {
            apply_delta(coords, delta, size)
                .filter(|&step| same(step))
                .and_then(|step| apply_delta(step, delta, size))
                .is_some_and(same)
        })
        .count()
}

/// Ambiguity penalty of one numbered cell, zero for everything else.
pub fn fifty_fifty_penalty(board: &Board, coords: Coord2) -> f64 {
    let cell = &board[coords];
    if !cell.is_numbered() {
        return 0.0;
    }

    let mut penalty = 0.0;
    for neighbor in board.neighbors(coords) {
        let other = &board[neighbor];
        if other.is_numbered()
            && other.adjacent_mines == cell.adjacent_mines
            && shared_unresolved_neighbors(board, coords, neighbor) >= 2
        {
            penalty += SAME_COUNT_PENALTY;
        }
    }

    if is_corner(coords, board.size()) && cell.adjacent_mines <= 2 {
        penalty += CORNER_PENALTY;
    }

    penalty += tank_patterns(board, coords) as f64 * TANK_PENALTY;
    penalty += collinear_runs(board, coords) as f64 * COLLINEAR_PENALTY;
    penalty
}

/// Distance between `coords` and the centroid of its mined neighbors, scaled.
///
/// A lopsided ring of mines usually has one logical reading, a symmetric one
/// tends to leave two.
pub fn asymmetry_bonus(board: &Board, coords: Coord2) -> f64 {
    let (mut sum_x, mut sum_y, mut mines) = (0.0, 0.0, 0u32);
    for neighbor in board.neighbors(coords).filter(|&pos| board[pos].is_mine) {
        sum_x += f64::from(neighbor.0) - f64::from(coords.0);
        sum_y += f64::from(neighbor.1) - f64::from(coords.1);
        mines += 1;
    }
    if mines == 0 {
        return 0.0;
    }

    let mines = f64::from(mines);
    (sum_x / mines).hypot(sum_y / mines) * ASYMMETRY_WEIGHT
}

pub fn cell_score(board: &Board, coords: Coord2) -> f64 {
    let cell = &board[coords];
    if cell.is_mine {
        return 0.0;
    }

    let mut score = information_value(cell.adjacent_mines);
    if cell.is_numbered() {
        score -= fifty_fifty_penalty(board, coords);
        score += asymmetry_bonus(board, coords);

        let clues = board
            .neighbors(coords)
            .filter(|&pos| board[pos].is_numbered())
            .count();
        if clues > 2 {
            score += MULTI_CLUE_BONUS;
        }
    }
    score
}

/// Sum of [`cell_score`] over every safe cell; higher is better.
pub fn evaluate_layout(board: &Board) -> f64 {
    board
        .iter()
        .filter(|cell| cell.is_safe())
        .map(|cell| cell_score(board, cell.coords))
        .sum()
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub score: f64,
    pub fifty_fifty_count: usize,
    pub information_density: f64,
}

pub fn analyze_layout(board: &Board) -> LayoutReport {
    let mut fifty_fifty_count = 0;
    let mut information = 0.0;

    for cell in board.iter().filter(|cell| cell.is_safe()) {
        if fifty_fifty_penalty(board, cell.coords) > FIFTY_FIFTY_THRESHOLD {
            fifty_fifty_count += 1;
        }
        information += information_value(cell.adjacent_mines);
    }

    LayoutReport {
        score: evaluate_layout(board),
        fifty_fifty_count,
        information_density: information / f64::from(board.total_cells().max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn information_prefers_small_numbers() {
        assert!(information_value(1) > information_value(3));
        assert!(information_value(3) > information_value(0));
        assert!(information_value(0) > information_value(6));
        assert!(information_value(8) < 0.0);
    }

    #[test]
    fn corner_one_is_penalized() {
        let board = board((5, 5), &[(1, 1)]);

        assert_eq!(board[(0, 0)].adjacent_mines, 1);
        assert!(fifty_fifty_penalty(&board, (0, 0)) >= CORNER_PENALTY);
        assert_eq!(fifty_fifty_penalty(&board, (3, 3)), 0.0);
    }

    #[test]
    fn wall_of_mines_makes_collinear_runs() {
        let board = board((7, 5), &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)]);

        assert_eq!(board[(1, 1)].adjacent_mines, 3);
        assert_eq!(collinear_runs(&board, (1, 1)), 1);
        assert_eq!(collinear_runs(&board, (3, 1)), 2);
        assert_eq!(collinear_runs(&board, (2, 2)), 0);
    }

    #[test]
    fn tank_pattern_is_detected() {
        // counts along y = 1 read 1 2 1 at x = 1..=3
        let board = board((5, 5), &[(1, 0), (3, 0)]);

        assert_eq!(board[(1, 1)].adjacent_mines, 1);
        assert_eq!(board[(2, 1)].adjacent_mines, 2);
        assert_eq!(board[(3, 1)].adjacent_mines, 1);
        assert_eq!(tank_patterns(&board, (2, 1)), 1);
        assert_eq!(tank_patterns(&board, (1, 1)), 0);
    }

    #[test]
    fn lopsided_mines_earn_asymmetry_bonus() {
        let lopsided = board((5, 5), &[(1, 1), (1, 2)]);
        let balanced = board((5, 5), &[(1, 2), (3, 2)]);

        assert!(asymmetry_bonus(&lopsided, (2, 2)) > 0.0);
        assert_eq!(asymmetry_bonus(&balanced, (2, 2)), 0.0);
        assert_eq!(asymmetry_bonus(&balanced, (0, 4)), 0.0);
    }

    #[test]
    fn wall_scores_below_scattered_pairs() {
        let wall: Vec<Coord2> = (0..8).map(|x| (x, 4)).collect();
        let wall = board((9, 9), &wall);
        let pairs = board(
            (9, 9),
            &[(1, 1), (2, 1), (5, 2), (5, 3), (1, 6), (2, 7), (6, 6), (7, 7)],
        );

        assert!(evaluate_layout(&wall) < evaluate_layout(&pairs));
        assert!(fifty_fifty_penalty(&wall, (3, 3)) > FIFTY_FIFTY_THRESHOLD);
        assert!(analyze_layout(&wall).fifty_fifty_count > 0);
    }

    #[test]
    fn mines_contribute_nothing() {
        let board = board((5, 5), &[(2, 2)]);
        assert_eq!(cell_score(&board, (2, 2)), 0.0);
    }
}
