//! Sliding puzzle CLI.
//!
//! Commands:
//! - solve: scramble (or read) a board and solve it with A*
//! - check: report whether a board can be solved
//! - compare: solve one board with every heuristic

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slider_puzzle::render::{write_board, write_replay};
use slider_puzzle::{
    a_star, compare, is_solvable, Grid, GeneratorConfig, Heuristic, Memo, PuzzleGenerator,
    ScrambleMode, SearchConfig, SearchStats, State,
};

#[derive(Parser)]
#[command(name = "slider-puzzle")]
#[command(version)]
#[command(about = "Optimal A* solver for the N×N sliding-tile puzzle")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PuzzleArgs {
    /// Board width
    #[arg(long, env = "SLIDER_SIZE", default_value = "3")]
    size: usize,

    /// Random moves used to scramble the goal
    #[arg(long, env = "SLIDER_STEPS", default_value = "200")]
    steps: usize,

    /// Random seed
    #[arg(long, env = "SLIDER_SEED", default_value = "42")]
    seed: u64,

    /// Scramble mode: walk or shuffle
    #[arg(long, default_value = "walk")]
    mode: ScrambleMode,

    /// Solve this board instead of a generated one, e.g. "1,2,3;4,5,6;7,0,8"
    #[arg(long)]
    grid: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    /// Keep stale frontier priorities when a cheaper path is found
    #[arg(long)]
    no_refresh: bool,

    /// Abort after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Abort after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

impl SearchArgs {
    fn config(&self, heuristic: Heuristic) -> SearchConfig {
        let mut config = SearchConfig::default()
            .with_heuristic(heuristic)
            .with_refresh(!self.no_refresh);
        if let Some(max) = self.max_expansions {
            config = config.with_max_expansions(max);
        }
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit(Duration::from_millis(ms));
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single board
    Solve {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        #[command(flatten)]
        search: SearchArgs,

        /// Heuristic: manhattan, misplaced or linear-conflict
        #[arg(long, default_value = "manhattan")]
        heuristic: Heuristic,

        /// Print the board after every move of the solution
        #[arg(long)]
        replay: bool,
    },

    /// Check whether a board is solvable (exit code 1 if not)
    Check {
        /// Board rows separated by ';', cells by ','
        #[arg(long)]
        grid: String,
    },

    /// Solve one board with every heuristic and compare the effort
    Compare {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        #[command(flatten)]
        search: SearchArgs,
    },
}

fn start_state(args: &PuzzleArgs) -> Result<State> {
    if let Some(text) = &args.grid {
        let grid: Grid = text.parse()?;
        if !is_solvable(grid.cells(), grid.size())? {
            bail!("board is not solvable:\n{}", grid.lock());
        }
        return Ok(grid.lock());
    }

    let mut generator = PuzzleGenerator::new(GeneratorConfig {
        size: args.size,
        steps: args.steps,
        seed: Some(args.seed),
        mode: args.mode,
    })?;
    Ok(generator.generate()?)
}

/// At most `points` evenly spaced values of the running-minimum priority.
fn history_summary(stats: &SearchStats, points: usize) -> String {
    let best = stats.best_history();
    if best.is_empty() {
        return "-".to_string();
    }
    let stride = best.len().div_ceil(points).max(1);
    let mut sampled: Vec<String> = best.iter().step_by(stride).map(u32::to_string).collect();
    if (best.len() - 1) % stride != 0 {
        sampled.push(best[best.len() - 1].to_string());
    }
    sampled.join(" -> ")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Solve {
            puzzle,
            search,
            heuristic,
            replay,
        } => {
            let start = start_state(&puzzle)?;
            writeln!(out, "Start:")?;
            write_board(&mut out, &start, None)?;

            info!(%heuristic, "Solver starting");
            let mut memo = Memo::new();
            let solution = a_star(&start, &search.config(heuristic), &mut memo)?;
            let stats = &solution.stats;

            writeln!(out, "\nFound solution with {} moves", solution.cost)?;
            writeln!(
                out,
                "expanded={} generated={} improved={} refreshed={} peak_frontier={} time={:.4}s",
                stats.expanded,
                stats.generated,
                stats.improved,
                stats.refreshed,
                stats.peak_frontier,
                stats.elapsed.as_secs_f64()
            )?;
            writeln!(out, "f-value floor: {}", history_summary(stats, 10))?;

            if replay {
                writeln!(out)?;
                write_replay(&mut out, &start, &solution.path)?;
            } else {
                let moves: Vec<String> =
                    solution.path.iter().map(|a| a.direction().to_string()).collect();
                writeln!(out, "Moves: {}", moves.join(" "))?;
            }
        }

        Commands::Check { grid } => {
            let grid: Grid = grid.parse()?;
            let state = grid.lock();
            write_board(&mut out, &state, None)?;
            if is_solvable(state.cells(), state.size())? {
                writeln!(out, "solvable")?;
            } else {
                writeln!(out, "unsolvable")?;
                out.flush()?;
                std::process::exit(1);
            }
        }

        Commands::Compare { puzzle, search } => {
            let start = start_state(&puzzle)?;
            writeln!(out, "Start:")?;
            write_board(&mut out, &start, None)?;
            writeln!(out)?;

            let mut memo = Memo::new();
            let results = compare(
                &start,
                &Heuristic::ALL,
                &search.config(Heuristic::default()),
                &mut memo,
            );

            writeln!(
                out,
                "{:<16} {:>6} {:>10} {:>10} {:>10}",
                "heuristic", "cost", "expanded", "generated", "secs"
            )?;
            for (heuristic, result) in results {
                match result {
                    Ok(solution) => writeln!(
                        out,
                        "{:<16} {:>6} {:>10} {:>10} {:>10.4}",
                        heuristic.name(),
                        solution.cost,
                        solution.stats.expanded,
                        solution.stats.generated,
                        solution.stats.elapsed.as_secs_f64()
                    )?,
                    Err(e) => writeln!(out, "{:<16} failed: {}", heuristic.name(), e)?,
                }
            }
            writeln!(
                out,
                "\nmemo: {} entries, {} hits, {} misses",
                memo.len(),
                memo.hits(),
                memo.misses()
            )?;
        }
    }

    Ok(())
}
