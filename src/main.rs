//! Hanoi - Unified CLI
//!
//! Play in the terminal, print solutions, or browse scores.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use hanoi::cli::{BoardArgs, Cli, Command};
use hanoi::{GameConfig, JsonScoreStore, Overrides};
use hanoi_core::{PlayMode, ScoreKey, plan};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        None => hanoi::tui::run_tui(config).await,
        Some(Command::Play {
            board,
            auto,
            animation_ms,
            player,
            scores,
        }) => {
            let overrides = Overrides {
                mode: auto.then_some(PlayMode::Auto),
                animation_ms,
                player_name: player,
                scores_path: scores,
                ..board.overrides()
            };
            hanoi::tui::run_tui(config.with_overrides(overrides)).await
        }
        Some(Command::Solve { board, json }) => run_solve(config, board, json),
        Some(Command::Scores {
            disks,
            pegs,
            limit,
            scores,
        }) => run_scores(config, disks, pegs, limit, scores),
    }
}

/// Logging to stderr for the non-interactive commands.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the solution for a board.
#[instrument(skip(config))]
fn run_solve(config: GameConfig, board: BoardArgs, json: bool) -> Result<()> {
    initialize_tracing();

    let config = config.with_overrides(board.overrides());
    let launch = config.launch().context("Invalid board parameters")?;
    let board = launch.create_board()?;
    let plan = plan(&board)?;
    info!(policy = %plan.policy(), moves = plan.moves().len(), "Solution planned");

    if json {
        println!("{}", serde_json::to_string_pretty(plan.moves())?);
        return Ok(());
    }

    println!(
        "{} disks, {} pegs, target peg {} ({}): {} moves",
        launch.disk_count(),
        launch.peg_count(),
        launch.target_peg(),
        plan.policy(),
        plan.moves().len()
    );
    for (i, mov) in plan.moves().iter().enumerate() {
        println!("{:>6}. {}", i + 1, mov);
    }
    Ok(())
}

/// Print best scores and the leaderboard.
#[instrument(skip(config))]
fn run_scores(
    config: GameConfig,
    disks: Option<u8>,
    pegs: Option<usize>,
    limit: usize,
    scores: Option<PathBuf>,
) -> Result<()> {
    initialize_tracing();

    let path = scores.unwrap_or_else(|| config.scores_path().clone());
    let store = JsonScoreStore::new(path);
    let key = disks.map(|d| ScoreKey::new(d, pegs.unwrap_or(3)));

    let bests = store
        .bests()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;
    if bests.is_empty() {
        println!("No scores yet in {}", store.path().display());
        return Ok(());
    }

    println!("Best scores");
    for (k, record) in bests.iter().filter(|(k, _)| key.is_none_or(|key| *k == key)) {
        println!(
            "  {:<18} {:>6} moves {:>8.1}s  {}{}",
            k.to_string(),
            record.move_count(),
            record.elapsed().as_secs_f32(),
            record.player(),
            if *record.perfect() { "  (perfect)" } else { "" }
        );
    }

    println!();
    println!("Leaderboard (top {})", limit);
    for (rank, entry) in store.leaderboard(key, limit)?.iter().enumerate() {
        println!(
            "  {:>3}. {:<18} {:>6} moves {:>8.1}s  {:<12} {}",
            rank + 1,
            entry.key().to_string(),
            entry.record().move_count(),
            entry.record().elapsed().as_secs_f32(),
            entry.record().player(),
            entry.played_at().format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
