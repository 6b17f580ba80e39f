use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use daily::*;
pub use random::*;
pub use scored::*;
pub use strategy::*;

mod daily;
mod random;
mod scored;
mod strategy;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How an interactive game lays out its mines on the first reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// One shuffled layout, no scoring.
    Uniform,
    /// Best of several uniform layouts by [`evaluate_layout`].
    #[default]
    Scored,
    /// Strategy picked from board size and density, see [`StrategyPlan::select`].
    Adaptive,
}

impl Placement {
    pub fn plan(self, config: GameConfig) -> StrategyPlan {
        match self {
            Placement::Uniform => StrategyPlan::single(Strategy::Uniform),
            Placement::Scored => StrategyPlan::scored(config),
            Placement::Adaptive => StrategyPlan::select(config),
        }
    }

    pub fn layout<R: Rng + ?Sized>(
        self,
        config: GameConfig,
        first_click: Coord2,
        rng: &mut R,
    ) -> MineLayout {
        self.plan(config).run(config, first_click, rng).board.mine_layout()
    }
}

/// Whether `coords` is the first click or one of its neighbors.
pub const fn in_safe_zone(coords: Coord2, first_click: Coord2) -> bool {
    within_one(coords, first_click)
}

/// Every cell that may hold a mine, in a fixed order.
pub fn eligible_positions(config: GameConfig, first_click: Coord2) -> Vec<Coord2> {
    iter_coords(config.size)
        .filter(|&coords| !in_safe_zone(coords, first_click))
        .collect()
}

/// Mines that will actually be placed given `available` eligible cells.
pub fn placement_count(config: GameConfig, available: usize) -> usize {
    let requested = usize::from(config.mines);
    if requested > available {
        log::warn!(
            "Cannot fit {} mines outside the safe zone, placing {}",
            requested,
            available
        );
        available
    } else {
        requested
    }
}

/// Lays mines for a first reveal at `first_click` with the default scored
/// strategy and returns the populated copy of `board`.
///
/// Flags and reveals already on `board` are kept.
pub fn place<R: Rng + ?Sized>(
    board: &Board,
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> Board {
    place_with(board, Placement::Scored, config, first_click, rng)
}

/// Like [`place`] with the strategy chosen by [`StrategyPlan::select`].
pub fn place_adaptive<R: Rng + ?Sized>(
    board: &Board,
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> Board {
    place_with(board, Placement::Adaptive, config, first_click, rng)
}

pub fn place_with<R: Rng + ?Sized>(
    board: &Board,
    placement: Placement,
    config: GameConfig,
    first_click: Coord2,
    rng: &mut R,
) -> Board {
    let layout = placement.layout(config, first_click, rng);
    let mut placed = board.clone();
    placed.apply_layout(&layout);
    log::debug!(
        "Placed {} mines ({:?}) around first click {:?}",
        layout.mine_count(),
        placement,
        first_click
    );
    placed
}
