use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Result, bail};
use dailysweep_core::{Coord, Coord2, FlagOutcome, Game, RevealOutcome};

use crate::render::{render_game, status_line};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command");
        };
        let command: fn(Coord2) -> Command = match verb {
            "r" | "reveal" => Command::Reveal,
            "f" | "flag" => Command::Flag,
            "q" | "quit" => return Ok(Command::Quit),
            _ => bail!("Unknown command: {}", verb),
        };

        let mut coord = |axis: &str| -> Result<Coord> {
            match words.next() {
                Some(word) => word
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Bad {} coordinate: {}", axis, word)),
                None => bail!("Missing {} coordinate", axis),
            }
        };
        Ok(command((coord("x")?, coord("y")?)))
    }
}

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished { time_elapsed: u32 },
    Quit,
}

/// Reads commands from `input` until the game ends, drawing the board to
/// `output` after every change.
pub fn run_session<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    mut output: W,
) -> Result<SessionEnd> {
    writeln!(output, "{}", render_game(game))?;
    writeln!(output, "commands: r <x> <y> | f <x> <y> | q")?;

    let mut started: Option<Instant> = None;
    let elapsed = |started: Option<Instant>| {
        started.map_or(0, |at| u32::try_from(at.elapsed().as_secs()).unwrap_or(u32::MAX))
    };

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        let updated = match command {
            Command::Quit => return Ok(SessionEnd::Quit),
            Command::Reveal(coords) => {
                if started.is_none() {
                    started = Some(Instant::now());
                }
                game.reveal(coords) != RevealOutcome::NoChange
            }
            Command::Flag(coords) => game.toggle_flag(coords) == FlagOutcome::Changed,
        };
        if !updated {
            log::debug!("{:?} changed nothing", command);
            continue;
        }

        writeln!(output, "{}", render_game(game))?;
        writeln!(output, "{}", status_line(game, elapsed(started)))?;

        if game.is_finished() {
            return Ok(SessionEnd::Finished {
                time_elapsed: elapsed(started),
            });
        }
    }

    Ok(SessionEnd::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailysweep_core::{GameStatus, MineLayout};

    #[test]
    fn parses_commands() {
        assert_eq!("r 3 4".parse::<Command>().unwrap(), Command::Reveal((3, 4)));
        assert_eq!("flag 0 12".parse::<Command>().unwrap(), Command::Flag((0, 12)));
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert!("r 3".parse::<Command>().is_err());
        assert!("r x 3".parse::<Command>().is_err());
        assert!("r 300 3".parse::<Command>().is_err());
        assert!("dig 1 1".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn session_plays_to_a_win() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(4, 4)]).unwrap();
        let mut game = Game::from_layout(&layout);
        let mut output = Vec::new();

        let end = run_session(&mut game, "f 4 4\nbogus\nr 0 0\nr 1 1\n".as_bytes(), &mut output)
            .unwrap();

        assert!(matches!(end, SessionEnd::Finished { .. }));
        assert_eq!(game.status(), GameStatus::Won);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Unknown command: bogus"));
        assert!(output.contains("won"));
    }

    #[test]
    fn quitting_leaves_game_unfinished() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(4, 4)]).unwrap();
        let mut game = Game::from_layout(&layout);

        let end = run_session(&mut game, "q\nr 0 0\n".as_bytes(), std::io::sink()).unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(game.status(), GameStatus::Ready);
    }
}
