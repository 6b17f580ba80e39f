//! Composite score used by the non-uniform placement strategies.

use crate::*;

/// Base credit of a safe cell whose number is consistent with its neighbors.
const CONSTRAINT_CREDIT: f64 = 5.0;
const TANK_WEIGHT: f64 = 5.0;
const ISLAND_WEIGHT: f64 = 3.0;
const CLUSTER_WEIGHT: f64 = 2.0;

/// Cell score below which a cell counts as problematic.
const PROBLEM_THRESHOLD: f64 = -5.0;
const PROBLEM_PENALTY: f64 = 10.0;

const COMPLEXITY_WEIGHT: f64 = 0.1;

/// Numbered cell with at most one numbered neighbor.
fn is_island(board: &Board, coords: Coord2) -> bool {
    board[coords].is_numbered()
        && board
            .neighbors(coords)
            .filter(|&pos| board[pos].is_numbered())
            .count()
            <= 1
}

/// More than half of the 3x3 block around `coords` is mined.
fn is_clustered(board: &Board, coords: Coord2) -> bool {
    let block = board.neighbors(coords).chain(Some(coords));
    let (mut cells, mut mines) = (0u32, 0u32);
    for pos in block {
        cells += 1;
        mines += u32::from(board[pos].is_mine);
    }
    mines * 2 > cells
}

fn structural_penalty(board: &Board, coords: Coord2) -> f64 {
    let mut penalty = tank_patterns(board, coords) as f64 * TANK_WEIGHT;
    if is_island(board, coords) {
        penalty += ISLAND_WEIGHT;
    }
    if is_clustered(board, coords) {
        penalty += CLUSTER_WEIGHT;
    }
    penalty
}

/// Local deducibility summed over safe cells, with a heavy penalty once the
/// number of problematic cells exceeds `max(2, cells / 50)`.
pub fn solvability_score(board: &Board) -> f64 {
    let mut score = 0.0;
    let mut problematic = 0usize;

    for cell in board.iter().filter(|cell| cell.is_safe()) {
        let cell_score = CONSTRAINT_CREDIT - structural_penalty(board, cell.coords);
        score += cell_score;
        if cell_score < PROBLEM_THRESHOLD {
            problematic += 1;
        }
    }

    let tolerated = (f64::from(board.total_cells()) / 50.0).max(2.0);
    if problematic as f64 > tolerated {
        score -= problematic as f64 * PROBLEM_PENALTY;
    }
    score
}

/// Rewards a mine centroid near the board center and balanced quadrants.
pub fn symmetry_score(board: &Board) -> f64 {
    let mines: Vec<Coord2> = board.mine_layout().iter_mines().collect();
    if mines.is_empty() {
        return 0.0;
    }

    let count = mines.len() as f64;
    let center_x = (f64::from(board.width()) - 1.0) / 2.0;
    let center_y = (f64::from(board.height()) - 1.0) / 2.0;
    let mass_x = mines.iter().map(|&(x, _)| f64::from(x)).sum::<f64>() / count;
    let mass_y = mines.iter().map(|&(_, y)| f64::from(y)).sum::<f64>() / count;

    let mut score = (5.0 - (mass_x - center_x).hypot(mass_y - center_y)).max(0.0);

    let mut quadrants = [0usize; 4];
    for &(x, y) in &mines {
        let right = usize::from(f64::from(x) >= center_x);
        let bottom = usize::from(f64::from(y) >= center_y);
        quadrants[right + 2 * bottom] += 1;
    }
    let max = quadrants.iter().max().copied().unwrap_or(0);
    let min = quadrants.iter().min().copied().unwrap_or(0);
    score += (3.0 - (max - min) as f64).max(0.0);
    score
}

/// Penalizes touching mine pairs, rewards an average pair distance close to
/// `0.8 * sqrt(cells / mines)`.
pub fn distribution_score(board: &Board) -> f64 {
    let mines: Vec<Coord2> = board.mine_layout().iter_mines().collect();
    let mut score = 0.0;
    let mut total_distance = 0.0;
    let mut pairs = 0usize;

    for (i, &(ax, ay)) in mines.iter().enumerate() {
        for &(bx, by) in &mines[i + 1..] {
            let dx = f64::from(ax) - f64::from(bx);
            let dy = f64::from(ay) - f64::from(by);
            let distance = dx.hypot(dy);
            total_distance += distance;
            pairs += 1;
            if distance < 1.5 {
                score -= 2.0;
            }
        }
    }

    if pairs > 0 {
        let average = total_distance / pairs as f64;
        let ideal = (f64::from(board.total_cells()) / mines.len() as f64).sqrt() * 0.8;
        score += (5.0 - (average - ideal).abs()).max(0.0);
    }
    score
}

/// Entropy of the number histogram, nudged toward twos and threes.
pub fn complexity_score(board: &Board) -> f64 {
    let mut histogram = [0usize; 9];
    for cell in board.iter().filter(|cell| cell.is_safe()) {
        if let Some(slot) = histogram.get_mut(usize::from(cell.adjacent_mines)) {
            *slot += 1;
        }
    }

    let total: usize = histogram.iter().sum();
    let mut score = 0.0;
    if total > 0 {
        for &count in histogram.iter().filter(|&&count| count > 0) {
            let p = count as f64 / total as f64;
            score -= p * p.log2();
        }
    }

    score += (histogram[2] + histogram[3]) as f64 * 0.1;
    score -= histogram[0] as f64 * 0.05;
    score -= (histogram[6] + histogram[7] + histogram[8]) as f64 * 0.2;
    score
}

pub fn evaluate_layout_weighted(board: &Board, weights: &ScoreWeights) -> f64 {
    solvability_score(board) * weights.solvability
        + symmetry_score(board) * weights.symmetry
        + distribution_score(board) * weights.distribution
        + complexity_score(board) * COMPLEXITY_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn clustered_block_is_flagged() {
        let board = board((5, 5), &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 0)]);

        assert!(is_clustered(&board, (1, 1)));
        assert!(!is_clustered(&board, (3, 3)));
    }

    #[test]
    fn lone_mine_makes_no_islands_next_to_it() {
        let board = board((5, 5), &[(2, 2)]);

        // every ring cell sees at least two numbered neighbors
        assert!(board.neighbors((2, 2)).all(|pos| !is_island(&board, pos)));
        assert!(!is_island(&board, (0, 0)));
    }

    #[test]
    fn symmetry_prefers_centered_mines() {
        let centered = board((9, 9), &[(2, 2), (6, 2), (2, 6), (6, 6)]);
        let corner = board((9, 9), &[(0, 0), (1, 0), (0, 1), (1, 1)]);

        assert_eq!(symmetry_score(&centered), 8.0);
        assert!(symmetry_score(&corner) < symmetry_score(&centered));
        assert_eq!(symmetry_score(&Board::empty((5, 5))), 0.0);
    }

    #[test]
    fn distribution_penalizes_touching_mines() {
        let spread = board((9, 9), &[(1, 1), (7, 1), (1, 7), (7, 7)]);
        let packed = board((9, 9), &[(4, 4), (5, 4), (4, 5), (5, 5)]);

        assert!(distribution_score(&packed) < distribution_score(&spread));
        assert_eq!(distribution_score(&board((9, 9), &[(4, 4)])), 0.0);
    }

    #[test]
    fn complexity_of_blank_board_is_negative() {
        let blank = Board::empty((4, 4));
        assert!((complexity_score(&blank) + 0.8).abs() < 1e-9);
    }

    #[test]
    fn weights_scale_components() {
        let board = board((9, 9), &[(1, 1), (4, 5), (7, 2)]);
        let only_symmetry = ScoreWeights {
            solvability: 0.0,
            symmetry: 1.0,
            distribution: 0.0,
        };

        let expected = symmetry_score(&board) + complexity_score(&board) * COMPLEXITY_WEIGHT;
        assert!((evaluate_layout_weighted(&board, &only_symmetry) - expected).abs() < 1e-9);
    }
}
