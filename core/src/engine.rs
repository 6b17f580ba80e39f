use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from empty board to win or loss.
///
/// Interactive games stay mine-free until the first reveal, which then lays
/// out mines around it. Daily games are mined up front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    first_click_taken: bool,
    placement: Placement,
    seed: u64,
    triggered_mine: Option<Coord2>,
    blast: Vec<BlastStep>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            board: Board::empty(config.size),
            status: GameStatus::Ready,
            first_click_taken: false,
            placement: Placement::default(),
            seed,
            triggered_mine: None,
            blast: Vec::new(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn daily(puzzle: &DailyPuzzle) -> Self {
        log::debug!("Starting daily puzzle {}", puzzle.seed);
        Self::from_layout(&puzzle.mine_layout())
    }

    /// Game over a fixed layout, no placement on the first reveal.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let config = GameConfig::new_unchecked(layout.size(), layout.mine_count());
        Self {
            board: Board::from_layout(layout),
            first_click_taken: true,
            ..Self::new(config, 0)
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn first_click_taken(&self) -> bool {
        self.first_click_taken
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Detonation order of the last loss, empty otherwise.
    pub fn blast(&self) -> &[BlastStep] {
        &self.blast
    }

    pub fn total_mines(&self) -> CellCount {
        if self.first_click_taken {
            self.board.mine_count()
        } else {
            self.config.mines
        }
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        self.total_mines() as isize - self.flags_used() as isize
    }

    pub fn flags_used(&self) -> CellCount {
        self.board.flags_used()
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.board.cells_revealed()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.status.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.board.cell(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_flagged || cell.is_revealed {
            return RevealOutcome::NoChange;
        }

        if !self.first_click_taken {
            self.place_mines(coords);
        }

        let outcome = self.board.reveal(coords);
        match outcome {
            RevealOutcome::HitMine => self.lose(coords),
            RevealOutcome::Won => self.end_game(GameStatus::Won),
            RevealOutcome::Revealed => {
                if self.status.is_ready() {
                    log::debug!("Game started");
                    self.status = GameStatus::Playing;
                }
            }
            RevealOutcome::NoChange => {}
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.status.is_finished() {
            return FlagOutcome::NoChange;
        }
        self.board.toggle_flag(coords)
    }

    /// Result to hand to statistics, once the game is over.
    pub fn outcome(&self, difficulty: Difficulty, time_elapsed: u32) -> Option<GameOutcome> {
        self.is_finished().then(|| GameOutcome {
            won: self.status == GameStatus::Won,
            time_elapsed,
            config: self.config,
            difficulty,
        })
    }

    fn place_mines(&mut self, first_click: Coord2) {
        let layout =
            RandomLayoutGenerator::new(self.seed, first_click, self.placement).generate(self.config);
        self.board.apply_layout(&layout);
        self.first_click_taken = true;
        log::debug!(
            "Placed {} mines for first click {:?}",
            layout.mine_count(),
            first_click
        );
    }

    fn lose(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);
        self.board.reveal_all_mines();
        self.blast = blast_order(&self.board, coords, BLAST_STEP_MS);
        self.end_game(GameStatus::Lost);
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!("Game ended: {:?}", status);
        self.status = status;
    }

    /// Runs the usual first-click placement for `coords`, then adds a mine
    /// under it.
    #[cfg(test)]
    pub(crate) fn force_mine(&mut self, coords: Coord2) {
        if !self.first_click_taken {
            self.place_mines(coords);
        }
        let mut layout = self.board.mine_layout();
        layout.set_mine(coords);
        self.board.apply_layout(&layout);
    }
}
