use ndarray::Array2;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::*;

/// Mine layout strategies sharing one generate/score contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Uniform shuffle of the eligible cells.
    Uniform,
    /// Weighted sampling that discourages touching mines, corners and edges.
    Spread,
    /// Fixed shares of mines for the center, edge and corner zones.
    WeightedZones,
    /// Greedy per-mine placement favoring moderate numbers.
    PatternAware,
}

/// Weights of the composite evaluator used by the non-uniform strategies.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub solvability: f64,
    pub symmetry: f64,
    pub distribution: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            solvability: 0.7,
            symmetry: 0.15,
            distribution: 0.15,
        }
    }
}

impl Strategy {
    pub fn generate_layout<R: Rng + ?Sized>(
        self,
        config: GameConfig,
        first_click: Coord2,
        rng: &mut R,
    ) -> MineLayout {
        match self {
            Strategy::Uniform => generate_single_layout(config, first_click, rng),
            Strategy::Spread => generate_spread_layout(config, first_click, rng),
            Strategy::WeightedZones => generate_zoned_layout(config, first_click, rng),
            Strategy::PatternAware => generate_pattern_layout(config, first_click, rng),
        }
    }

    pub fn score_layout(self, board: &Board, weights: &ScoreWeights) -> f64 {
        match self {
            Strategy::Uniform => evaluate_layout(board),
            _ => evaluate_layout_weighted(board, weights),
        }
    }
}

impl StrategyPlan {
    /// Picks the strategy from board size and mine density alone.
    pub fn select(config: GameConfig) -> Self {
        let cells = usize::from(config.total_cells());
        let density = config.density();

        if density > 0.2 {
            Self {
                strategy: Strategy::Spread,
                max_attempts: cells.min(100),
                target_score: cells as f64 * 0.9,
                weights: ScoreWeights {
                    solvability: 0.6,
                    symmetry: 0.2,
                    distribution: 0.2,
                },
            }
        } else if cells > 256 && density > 0.15 {
            Self {
                strategy: Strategy::WeightedZones,
                max_attempts: 75,
                target_score: cells as f64 * 0.8,
                weights: ScoreWeights {
                    solvability: 0.5,
                    symmetry: 0.25,
                    distribution: 0.25,
                },
            }
        } else {
            Self {
                strategy: Strategy::PatternAware,
                max_attempts: 50,
                target_score: cells as f64 * 0.7,
                weights: ScoreWeights::default(),
            }
        }
    }
}

fn spread_base_weight(coords: Coord2, size: Coord2) -> f64 {
    if is_corner(coords, size) {
        0.7
    } else if is_edge(coords, size) {
        0.9
    } else {
        1.2
    }
}

/// Index drawn with probability proportional to its weight.
fn weighted_pick<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let mut remaining = rng.random::<f64>() * total;
    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining < 0.0 {
            return index;
        }
    }
    weights.len() - 1
}

fn generate_spread_layout<R: Rng + ?Sized>(
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> MineLayout {
    let mut available = eligible_positions(config, first_click);
    let mines_to_place = placement_count(config, available.len());
    let mut weights: Vec<f64> = available
        .iter()
        .map(|&coords| spread_base_weight(coords, config.size))
        .collect();

    let mut layout = MineLayout::empty(config.size);
    for _ in 0..mines_to_place {
        let index = weighted_pick(&weights, rng);
        let chosen = available.swap_remove(index);
        weights.swap_remove(index);
        layout.set_mine(chosen);

        // halve the odds of every remaining orthogonal neighbor
        for (coords, weight) in available.iter().zip(weights.iter_mut()) {
            if manhattan(*coords, chosen) == 1 {
                *weight *= 0.5;
            }
        }
    }
    layout
}

const CENTER_SHARE: f64 = 0.5;
const EDGE_SHARE: f64 = 0.35;

fn generate_zoned_layout<R: Rng + ?Sized>(
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> MineLayout {
    let available = eligible_positions(config, first_click);
    let mines_to_place = placement_count(config, available.len());

    let (mut corners, mut edges, mut center) = (Vec::new(), Vec::new(), Vec::new());
    for coords in available {
        if is_corner(coords, config.size) {
            corners.push(coords);
        } else if is_edge(coords, config.size) {
            edges.push(coords);
        } else {
            center.push(coords);
        }
    }

    let center_quota = (mines_to_place as f64 * CENTER_SHARE).floor() as usize;
    let edge_quota = (mines_to_place as f64 * EDGE_SHARE).floor() as usize;
    let corner_quota = mines_to_place - center_quota - edge_quota;

    let mut layout = MineLayout::empty(config.size);
    let mut leftovers = Vec::new();
    for (mut zone, quota) in [
        (center, center_quota),
        (edges, edge_quota),
        (corners, corner_quota),
    ] {
        zone.shuffle(rng);
        let taken = quota.min(zone.len());
        for &coords in &zone[..taken] {
            layout.set_mine(coords);
        }
        leftovers.extend_from_slice(&zone[taken..]);
    }

    // zones too small for their share spill over into whatever is left
    let missing = mines_to_place - usize::from(layout.mine_count());
    if missing > 0 {
        log::trace!("Zone quotas short by {}, spilling over", missing);
        leftovers.shuffle(rng);
        for &coords in &leftovers[..missing] {
            layout.set_mine(coords);
        }
    }
    layout
}

/// Top candidates kept per mine before the random pick.
const PATTERN_SHORTLIST: usize = 5;

fn pattern_score(
    coords: Coord2,
    size: Coord2,
    nearest_mine: &Array2<u16>,
    layout: &MineLayout,
    counts: &Array2<u8>,
) -> f64 {
    let mut score = match nearest_mine[coords.to_nd_index()] {
        0 => 0.0,
        1 => -2.0,
        2 => 1.0,
        _ => 3.0,
    };

    for neighbor in neighbors(coords, size) {
        if layout[neighbor] {
            continue;
        }
        score += match counts[neighbor.to_nd_index()] + 1 {
            2..=4 => 2.0,
            1 | 5 => 1.0,
            6.. => -3.0,
            _ => 0.0,
        };
    }

    if is_corner(coords, size) {
        score -= 1.0;
    } else if is_edge(coords, size) {
        score -= 0.5;
    }
    score
}

fn generate_pattern_layout<R: Rng + ?Sized>(
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> MineLayout {
    let size = config.size;
    let mut available = eligible_positions(config, first_click);
    let mines_to_place = placement_count(config, available.len());

    let mut layout = MineLayout::empty(size);
    let mut counts: Array2<u8> = Array2::zeros(size.to_nd_index());
    let mut nearest_mine: Array2<u16> = Array2::from_elem(size.to_nd_index(), u16::MAX);

    for _ in 0..mines_to_place {
        let mut scored: Vec<(usize, f64)> = available
            .iter()
            .enumerate()
            .map(|(index, &coords)| {
                let score = pattern_score(coords, size, &nearest_mine, &layout, &counts);
                (index, score)
            })
            .collect();

        let shortlist = PATTERN_SHORTLIST.min(scored.len());
        if shortlist < scored.len() {
            scored.select_nth_unstable_by(shortlist - 1, |a, b| b.1.total_cmp(&a.1));
        }
        let (index, _) = scored[rng.random_range(0..shortlist)];
        let chosen = available.swap_remove(index);

        layout.set_mine(chosen);
        for neighbor in neighbors(chosen, size) {
            counts[neighbor.to_nd_index()] += 1;
        }
        for (coords, distance) in nearest_mine.indexed_iter_mut() {
            let coords = (coords.0 as Coord, coords.1 as Coord);
            *distance = (*distance).min(manhattan(coords, chosen));
        }
    }
    layout
}
