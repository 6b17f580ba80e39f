use dailysweep_core::{Board, Cell, Coord2, Game, GameStatus};

/// What the player sees at one position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ViewCell {
    Hidden,
    Revealed(u8),
    Flagged,
    TriggeredMine,
    Mine,
    Misflagged,
}

impl ViewCell {
    pub fn of(cell: &Cell, status: GameStatus, triggered: Option<Coord2>) -> Self {
        use ViewCell::*;

        if !status.is_finished() {
            return match cell {
                Cell { is_flagged: true, .. } => Flagged,
                Cell { is_revealed: true, adjacent_mines, .. } => Revealed(*adjacent_mines),
                _ => Hidden,
            };
        }

        if triggered == Some(cell.coords) {
            return TriggeredMine;
        }
        match (cell.is_mine, cell.is_flagged, cell.is_revealed) {
            (true, true, _) => Flagged,
            // a won board shows every mine as flagged
            (true, false, _) if status == GameStatus::Won => Flagged,
            (true, false, _) => Mine,
            (false, true, _) => Misflagged,
            (false, false, true) => Revealed(cell.adjacent_mines),
            (false, false, false) => Hidden,
        }
    }

    pub fn glyph(self) -> char {
        use ViewCell::*;
        match self {
            Hidden => '#',
            Revealed(0) => '.',
            Revealed(count) => char::from_digit(u32::from(count), 10).unwrap_or('?'),
            Flagged => 'F',
            TriggeredMine => 'X',
            Mine => '*',
            Misflagged => 'x',
        }
    }
}

fn header(out: &mut String, width: u8) {
    out.push_str("    ");
    for x in 0..width {
        out.push_str(&(x % 10).to_string());
    }
    out.push('\n');
}

/// Board as the player currently sees it, with axis labels.
pub fn render_game(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();
    header(&mut out, board.width());
    for y in 0..board.height() {
        out.push_str(&format!("{:>3} ", y));
        for cell in board.row(y) {
            out.push(ViewCell::of(cell, game.status(), game.triggered_mine()).glyph());
        }
        out.push('\n');
    }
    out
}

/// Every cell uncovered: `*` for mines, counts elsewhere.
pub fn render_solution(board: &Board) -> String {
    let mut out = String::new();
    for y in 0..board.height() {
        for cell in board.row(y) {
            out.push(match cell.adjacent_mines {
                _ if cell.is_mine => '*',
                0 => '.',
                count => char::from_digit(u32::from(count), 10).unwrap_or('?'),
            });
        }
        out.push('\n');
    }
    out
}

pub fn status_line(game: &Game, elapsed: u32) -> String {
    let status = match game.status() {
        GameStatus::Ready => "ready",
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    };
    format!(
        "{} | mines left {} | revealed {} | {}s",
        status,
        game.mines_left(),
        game.cells_revealed(),
        elapsed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailysweep_core::MineLayout;

    fn game(mines: &[Coord2]) -> Game {
        Game::from_layout(&MineLayout::from_mine_coords((5, 5), mines).unwrap())
    }

    #[test]
    fn hidden_board_renders_hashes() {
        let game = game(&[(0, 0)]);
        let text = render_game(&game);

        assert_eq!(text.lines().next(), Some("    01234"));
        assert_eq!(text.lines().nth(1), Some("  0 #####"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn lost_board_marks_trigger_and_misflags() {
        let mut game = game(&[(0, 0), (4, 4)]);
        game.toggle_flag((2, 2));
        game.reveal((4, 4));

        let text = render_game(&game);
        let rows: Vec<&str> = text.lines().skip(1).collect();

        assert_eq!(rows[0], "  0 *####");
        assert_eq!(rows[2], "  2 ##x##");
        assert_eq!(rows[4], "  4 ####X");
    }

    #[test]
    fn won_board_flags_every_mine() {
        let mut game = game(&[(4, 4)]);
        game.reveal((0, 0));

        let text = render_game(&game);
        assert!(text.ends_with("  4 ...1F\n"));
        assert_eq!(
            ViewCell::of(&game.board()[(4, 4)], game.status(), None),
            ViewCell::Flagged
        );
    }

    #[test]
    fn solution_shows_counts() {
        let board = Board::from_layout(&MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap());
        assert_eq!(render_solution(&board), "111\n1*1\n111\n");
    }
}
