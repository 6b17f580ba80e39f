use serde::{Deserialize, Serialize};
use time::Date;

use super::*;

/// Board shared by every player on a given date.
pub const DAILY_CONFIG: GameConfig = GameConfig::new_unchecked((16, 16), 40);

/// Seed and board size of one daily puzzle.
///
/// Mines are placed by rejection sampling straight from the seed. There is no
/// first-click exclusion: adding one would change which board a seed maps to
/// and break agreement between clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    pub seed: String,
    pub config: GameConfig,
}

impl DailyPuzzle {
    pub fn new(seed: impl Into<String>, config: GameConfig) -> Self {
        Self {
            seed: seed.into(),
            config,
        }
    }

    /// Puzzle for `date` with the seed `daily-YYYY-MM-DD`.
    pub fn for_date(date: Date) -> Self {
        Self::new(daily_seed(date), DAILY_CONFIG)
    }

    pub fn mine_layout(&self) -> MineLayout {
        DailyGenerator::new(&self.seed).generate(self.config)
    }

    pub fn generate(&self) -> Board {
        Board::from_layout(&self.mine_layout())
    }
}

pub fn daily_seed(date: Date) -> String {
    format!(
        "daily-{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyGenerator {
    rng: SeededRng,
}

impl DailyGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }
}

impl LayoutGenerator for DailyGenerator {
    fn generate(mut self, config: GameConfig) -> MineLayout {
        let (width, height) = config.size;
        let total_cells = config.total_cells();
        let mines = if config.mines > total_cells {
            log::warn!(
                "Daily puzzle asks for {} mines but only {} cells exist",
                config.mines,
                total_cells
            );
            total_cells
        } else {
            config.mines
        };

        let mut layout = MineLayout::empty(config.size);
        while layout.mine_count() < mines {
            // row is drawn before column, the order is part of the seed contract
            let row = self.rng.next_int(0, height.into()) as Coord;
            let col = self.rng.next_int(0, width.into()) as Coord;
            layout.set_mine((col, row));
        }
        layout
    }
}

/// Board for `(seed, width, height, mine_count)`, identical on every client.
pub fn generate(seed: &str, width: Coord, height: Coord, mine_count: CellCount) -> Board {
    DailyPuzzle::new(seed, GameConfig::new_unchecked((width, height), mine_count)).generate()
}

/// Adjacent-mine counts for a row-major matrix (`mines[row][col]`), mines at 0.
///
/// Rows beyond `height` and columns beyond `width` are ignored; missing ones
/// count as empty.
pub fn compute_adjacency_counts(mines: &[Vec<bool>], width: Coord, height: Coord) -> Vec<Vec<u8>> {
    let shape = (usize::from(width), usize::from(height));
    let mask = ndarray::Array2::from_shape_fn(shape, |(x, y)| {
        mines
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    });
    let counts = adjacency_counts(&mask);
    (0..usize::from(height))
        .map(|y| (0..usize::from(width)).map(|x| counts[[x, y]]).collect())
        .collect()
}
