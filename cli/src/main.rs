use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dailysweep_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use time::{Date, OffsetDateTime, macros::format_description};

mod play;
mod render;
mod settings;
mod store;

use play::SessionEnd;
use settings::Settings;
use store::StatsStore;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Settings file, `dailysweep.toml` when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Print or play the puzzle of the day
    Daily(DailyArgs),
    /// Show lifetime statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Compare baseline, scored and adaptive placement
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// Preset, overrides the settings file
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Custom width, requires --height and --mines
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,
}

impl BoardArgs {
    fn resolve(&self, settings: &Settings) -> Result<(Difficulty, GameConfig)> {
        if let (Some(width), Some(height), Some(mines)) = (self.width, self.height, self.mines) {
            let config = GameConfig::try_new((width, height), mines)
                .context("Invalid custom board")?;
            return Ok((Difficulty::Custom, config));
        }
        let difficulty = self.difficulty.unwrap_or(settings.difficulty);
        Ok((difficulty, difficulty.config()))
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlacementArg {
    Uniform,
    Scored,
    Adaptive,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Uniform => Placement::Uniform,
            PlacementArg::Scored => Placement::Scored,
            PlacementArg::Adaptive => Placement::Adaptive,
        }
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    board: BoardArgs,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum)]
    placement: Option<PlacementArg>,

    /// Print the score submission as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct DailyArgs {
    /// Date as YYYY-MM-DD, today (UTC) by default
    #[arg(long)]
    date: Option<String>,

    /// Print the uncovered board and exit
    #[arg(long)]
    solution: bool,

    /// Print the score submission as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    board: BoardArgs,

    #[arg(short, long, default_value_t = LayoutComparer::DEFAULT_ROUNDS)]
    rounds: usize,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    json: bool,
}

fn parse_date(text: &str) -> Result<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("Expected YYYY-MM-DD, got {text}"))
}

fn random_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Delay of `step` when detonations are `step_ms` apart.
fn blast_delay(step: &BlastStep, step_ms: u32) -> u32 {
    u32::from(step.order).saturating_mul(step_ms)
}

/// Replays the loss animation as log lines, paced by `step_ms`.
fn report_blast(game: &Game, step_ms: u32) {
    let steps = game.blast();
    for step in steps {
        log::debug!("t+{}ms: mine {:?} goes off", blast_delay(step, step_ms), step.coords);
    }
    if let Some(last) = steps.last() {
        log::info!("{} mines went off over {}ms", steps.len(), blast_delay(last, step_ms));
    }
}

fn play(args: PlayArgs, settings: &Settings) -> Result<()> {
    let (difficulty, config) = args.board.resolve(settings)?;
    let placement = args.placement.map_or(settings.placement, Placement::from);
    let seed = random_seed(args.seed);
    log::info!("Playing {} ({}), seed {}", difficulty, config, seed);

    let mut game = Game::new(config, seed).with_placement(placement);
    let end = play::run_session(&mut game, io::stdin().lock(), io::stdout().lock())?;
    let SessionEnd::Finished { time_elapsed } = end else {
        return Ok(());
    };
    let Some(outcome) = game.outcome(difficulty, time_elapsed) else {
        return Ok(());
    };
    report_blast(&game, settings.blast_step_ms);

    let mut store = StatsStore::open(&settings.stats_path)?;
    store.record(&outcome)?;

    match ScoreSubmission::ranked(&outcome) {
        Some(submission) if args.json => println!("{}", serde_json::to_string(&submission)?),
        Some(submission) => println!("Score: {}", submission.score),
        None if outcome.won => println!("Custom boards are not ranked"),
        None => println!("Boom. Better luck next time"),
    }
    Ok(())
}

fn daily(args: DailyArgs, settings: &Settings) -> Result<()> {
    let date = match &args.date {
        Some(text) => parse_date(text)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let puzzle = DailyPuzzle::for_date(date);
    log::info!("Daily puzzle {} ({})", puzzle.seed, puzzle.config);

    if args.solution {
        print!("{}", render::render_solution(&puzzle.generate()));
        return Ok(());
    }

    let mut game = Game::daily(&puzzle);
    let end = play::run_session(&mut game, io::stdin().lock(), io::stdout().lock())?;
    let time_elapsed = match end {
        SessionEnd::Finished { time_elapsed } => time_elapsed,
        SessionEnd::Quit => return Ok(()),
    };
    let Some(outcome) = game.outcome(Difficulty::Custom, time_elapsed) else {
        return Ok(());
    };
    report_blast(&game, settings.blast_step_ms);

    let submission = ScoreSubmission::daily(&outcome);
    if args.json {
        println!("{}", serde_json::to_string(&submission)?);
    } else {
        println!("Daily score: {}", submission.score);
    }
    Ok(())
}

fn stats(json: bool, settings: &Settings) -> Result<()> {
    let store = StatsStore::open(&settings.stats_path)?;
    log::debug!("Reading stats from {}", store.path().display());
    let stats = store.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("played {} | won {} | lost {}", stats.games_played, stats.games_won, stats.games_lost);
    println!("win rate {:.1}% | total time {}s", stats.win_rate(), stats.total_play_time);
    for difficulty in Difficulty::RANKED {
        if let Some(best) = stats.best_time(difficulty) {
            println!("best {difficulty}: {best}s");
        }
    }
    Ok(())
}

fn compare(args: CompareArgs, settings: &Settings) -> Result<()> {
    let (_, config) = args.board.resolve(settings)?;
    let first_click = (config.width() / 2, config.height() / 2);
    let mut rng = SmallRng::seed_from_u64(random_seed(args.seed));

    let comparison = LayoutComparer::new(config, first_click)
        .with_rounds(args.rounds)
        .run(&mut rng);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("{} over {} rounds", config, comparison.rounds);
    for (name, arm) in [
        ("baseline", comparison.baseline),
        ("scored", comparison.scored),
        ("adaptive", comparison.adaptive),
    ] {
        println!(
            "{name:>9}: score {:8.2} | 50/50 {:5.2} | information {:.3}",
            arm.average_score, arm.average_fifty_fifty, arm.average_information
        );
    }
    if let Some(reduction) = comparison.fifty_fifty_reduction() {
        println!("50/50 reduction: {reduction:.1}%");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;
    match cli.command {
        Command::Play(args) => play(args, &settings),
        Command::Daily(args) => daily(args, &settings),
        Command::Stats { json } => stats(json, &settings),
        Command::Compare(args) => compare(args, &settings),
    }
}
