use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use inertia_core::{Board, GameController, GameState, GameStatus, MoveOutcome};
use inertia_protocol::{GameEvent, StatisticsLabels};

use config::{apply_overrides, load_config};
use script::{Step, parse_script};

mod config;
mod script;

/// Headless driver for Inertia puzzles.
#[derive(Parser, Debug)]
#[command(name = "inertia", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a level file and print a short summary
    Check { level: PathBuf },
    /// Play a scripted sequence of moves and undos
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Start a new game from a level file
    #[arg(long)]
    level: Option<PathBuf>,
    /// Continue a saved game
    #[arg(long)]
    load: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    source: Source,
    /// Steps to play: U, D, L, R to move and Z to undo
    #[arg(long, default_value = "")]
    moves: String,
    /// Write the resulting game here
    #[arg(long)]
    save: Option<PathBuf>,
    /// TOML rules file, e.g. `lives = 3`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the number of lives
    #[arg(long, conflicts_with = "unlimited_lives")]
    lives: Option<u32>,
    /// Never run out of lives
    #[arg(long)]
    unlimited_lives: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check { level } => check(&level),
        Command::Replay(args) => replay(args),
    }
}

fn check(path: &Path) -> Result<()> {
    let level = inertia_protocol::load_level(path)
        .with_context(|| format!("loading level {}", path.display()))?;
    let board = &level.board;

    println!("{}", path.display());
    println!("  size:  {}x{}", board.num_rows(), board.num_cols());
    println!("  start: {:?}", board.start());
    println!("  goal:  {:?}", board.goal());
    println!("  gems:  {}", board.initial_gem_count());
    println!("  lives: {}", level.lives);
    Ok(())
}

fn replay(args: ReplayArgs) -> Result<()> {
    let steps = parse_script(&args.moves)?;
    let mut game = GameController::new(start_state(&args)?);

    for line in play(&mut game, &steps)
        .into_iter()
        .chain(report(game.game_state()))
    {
        println!("{line}");
    }

    if let Some(path) = &args.save {
        inertia_protocol::save(game.game_state(), path)
            .with_context(|| format!("saving game to {}", path.display()))?;
    }
    Ok(())
}

/// Runs every step against the game and describes what each one did.
fn play(game: &mut GameController, steps: &[Step]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, &step) in steps.iter().enumerate() {
        let number = index + 1;
        match step {
            Step::Move(direction) => match game.process_move(direction) {
                Ok(result) => {
                    let line = format!(
                        "{number:>3} {direction:<5} {:?} -> {:?}",
                        result.outcome(),
                        result.new_position()
                    );
                    let outcome = result.outcome();
                    lines.push(event_line(&line, &GameEvent::moved(game, result)));
                    if matches!(outcome, MoveOutcome::Won) {
                        lines.push("You won the game!".to_owned());
                    }
                }
                Err(err) => lines.push(format!("{number:>3} {direction:<5} rejected: {err}")),
            },
            Step::Undo => match game.process_undo() {
                Ok(outcome) => {
                    let event = GameEvent::undone(game, outcome);
                    let line = match &event {
                        GameEvent::Undone { undone, .. } => format!(
                            "{number:>3} undo  {} back to {:?}",
                            undone.direction(),
                            undone.origin()
                        ),
                        _ => format!("{number:>3} undo  nothing to undo"),
                    };
                    lines.push(event_line(&line, &event));
                }
                Err(err) => lines.push(format!("{number:>3} undo  rejected: {err}")),
            },
        }
    }
    lines
}

/// Closing summary: the lose message if any, the statistics and the board.
fn report(state: &GameState) -> Vec<String> {
    let mut lines = Vec::new();
    if matches!(state.status(), GameStatus::Lost) {
        lines.push("You lose the game.".to_owned());
    }
    lines.push(String::new());
    lines.push(StatisticsLabels(state.statistics()).to_string());
    lines.extend(board_lines(state.game_board()));
    lines
}

fn start_state(args: &ReplayArgs) -> Result<GameState> {
    if let Some(path) = &args.source.load {
        if args.config.is_some() || args.lives.is_some() || args.unlimited_lives {
            log::warn!("Lives settings are ignored when continuing a saved game");
        }
        return inertia_protocol::load(path)
            .with_context(|| format!("loading saved game {}", path.display()));
    }

    let path = args
        .source
        .level
        .as_ref()
        .context("either --level or --load is required")?;
    let level = inertia_protocol::load_level(path)
        .with_context(|| format!("loading level {}", path.display()))?;

    let config = match &args.config {
        Some(config) => load_config(config)?,
        None => Default::default(),
    };
    let config = apply_overrides(config, args.lives, args.unlimited_lives);
    log::debug!("Starting {} with {:?}", path.display(), config);
    Ok(GameState::from_level(level, &config))
}

fn event_line(line: &str, event: &GameEvent) -> String {
    match event.statistics() {
        Some(statistics) => format!("{line:<40} {}", StatisticsLabels(*statistics)),
        None => line.to_owned(),
    }
}

fn board_lines(board: &Board) -> impl Iterator<Item = String> + '_ {
    board
        .rows()
        .map(|row| row.map(|cell| cell.to_char()).collect::<String>())
}
