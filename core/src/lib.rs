use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use reveal::*;
pub use rng::*;
pub use stats::*;
pub use types::*;

mod analysis;
mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod layout;
mod reveal;
mod rng;
mod stats;
mod types;

/// Smallest width or height accepted by [`GameConfig::try_new`].
pub const MIN_SIDE: Coord = 5;

/// Highest mine density that still makes for a playable board.
pub const MAX_RECOMMENDED_DENSITY: f64 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps everything into a usable range: at least one cell per axis and
    /// between one mine and one fewer than the cell count.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let max_mines = mult(size_x, size_y).saturating_sub(1).max(1);
        let mines = mines.clamp(1, max_mines);
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 < MIN_SIDE || size.1 < MIN_SIDE {
            return Err(GameError::BoardTooSmall { min: MIN_SIDE });
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        let cells = mult(size.0, size.1);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        let config = Self::new_unchecked(size, mines);
        if config.density() > MAX_RECOMMENDED_DENSITY {
            log::warn!(
                "{} mines on {} cells is above the recommended density",
                mines,
                cells
            );
        }
        Ok(config)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn density(&self) -> f64 {
        f64::from(self.mines) / f64::from(self.total_cells().max(1))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::Beginner.config()
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.size.0, self.size.1, self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Master,
    Insane,
    Extreme,
    Custom,
}

impl Difficulty {
    pub const RANKED: [Difficulty; 6] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
        Difficulty::Master,
        Difficulty::Insane,
        Difficulty::Extreme,
    ];

    /// Preset board; `Custom` falls back to the beginner board.
    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner | Custom => GameConfig::new_unchecked((9, 9), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((30, 16), 99),
            Master => GameConfig::new_unchecked((40, 20), 160),
            Insane => GameConfig::new_unchecked((50, 25), 250),
            Extreme => GameConfig::new_unchecked((60, 30), 360),
        }
    }

    /// Leaderboard weight; custom boards are not ranked.
    pub const fn score_multiplier(self) -> Option<u32> {
        use Difficulty::*;
        match self {
            Beginner => Some(1),
            Intermediate => Some(2),
            Expert => Some(3),
            Master => Some(4),
            Insane => Some(5),
            Extreme => Some(6),
            Custom => None,
        }
    }

    pub const fn is_ranked(self) -> bool {
        self.score_multiplier().is_some()
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
            Master => "master",
            Insane => "insane",
            Extreme => "extreme",
            Custom => "custom",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::RANKED
            .into_iter()
            .chain([Difficulty::Custom])
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDifficulty(s.into()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_mines_below_cell_count() {
        let config = GameConfig::new((5, 5), 500);
        assert_eq!(config.mines, 24);

        let config = GameConfig::new((0, 0), 0);
        assert_eq!(config.size, (1, 1));
        assert_eq!(config.mines, 1);
    }

    #[test]
    fn try_new_validates() {
        assert_eq!(
            GameConfig::try_new((4, 9), 3),
            Err(GameError::BoardTooSmall { min: 5 })
        );
        assert_eq!(GameConfig::try_new((5, 5), 0), Err(GameError::NoMines));
        assert_eq!(
            GameConfig::try_new((5, 5), 25),
            Err(GameError::TooManyMines {
                mines: 25,
                cells: 25
            })
        );
        assert!(GameConfig::try_new((5, 5), 24).is_ok());
    }

    #[test]
    fn presets_are_valid_and_fit_largest_board() {
        for difficulty in Difficulty::RANKED {
            let config = difficulty.config();
            assert_eq!(GameConfig::try_new(config.size, config.mines), Ok(config));
            assert!(config.total_cells() <= 1800);
        }
        assert_eq!(Difficulty::Extreme.config().size, (60, 30));
    }

    #[test]
    fn difficulty_names_parse_back() {
        for difficulty in Difficulty::RANKED {
            assert_eq!(difficulty.name().parse(), Ok(difficulty));
        }
        assert_eq!("EXPERT".parse(), Ok(Difficulty::Expert));
        assert!("nightmare".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Custom.score_multiplier(), None);
        assert_eq!(Difficulty::Expert.score_multiplier(), Some(3));
    }
}
