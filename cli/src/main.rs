//! # slide2048 CLI
//!
//! Runs headless games against the core engine with a simple move policy and
//! prints summary statistics. Useful for smoke-testing board shapes and
//! thresholds without a front end.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use slide2048_core::{Direction, Game, GameConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slide2048")]
#[command(author, version, about = "Run headless slide2048 simulations")]
struct Args {
    /// Number of episodes to run
    #[arg(short, long, default_value = "1")]
    episodes: u32,

    /// Random seed for deterministic runs
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Maximum steps per episode (0 = unlimited)
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Move policy
    #[arg(short, long, value_enum, default_value = "random")]
    policy: Policy,

    /// JSON file with `rows`, `cols` and `win_threshold`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board rows (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Tile value that ends a game (overrides the config file)
    #[arg(long)]
    threshold: Option<u32>,

    /// Undo after every N-th successful move (0 = never)
    #[arg(long, default_value = "0")]
    undo_every: u32,

    /// Show the grid after each move
    #[arg(long)]
    verbose: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Policy {
    /// Random legal moves
    Random,
    /// Cycle through moves: Left, Down, Right, Up
    Cycle,
}

#[derive(Debug, Serialize)]
struct Summary {
    episodes: u32,
    policy: Policy,
    seed: u64,
    config: GameConfig,
    wins: u32,
    avg_steps: f64,
    total_undos: u64,
    max_tile_overall: u32,
    tile_distribution: BTreeMap<u32, u32>,
}

struct EpisodeStats {
    won: bool,
    steps: u32,
    undos: u32,
    max_tile: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(?config, episodes = args.episodes, "starting simulation");

    let summary = run_headless(&args, config)?;
    if args.json {
        let out = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{}", out);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Defaults, then the optional JSON file, then flag overrides.
fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(threshold) = args.threshold {
        config.win_threshold = threshold;
    }
    config.validate().context("invalid game config")?;
    Ok(config)
}

fn run_headless(args: &Args, config: GameConfig) -> Result<Summary> {
    // Separate RNG for move selection so policies don't perturb spawns
    let mut policy_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1000));

    let mut wins = 0;
    let mut total_steps: u64 = 0;
    let mut total_undos: u64 = 0;
    let mut tile_distribution = BTreeMap::new();

    for episode in 0..args.episodes {
        let episode_seed = args.seed.wrapping_add(episode as u64);
        let mut game = Game::with_config(config, episode_seed)
            .with_context(|| format!("starting episode {}", episode + 1))?;
        let stats = run_episode(args, &mut game, &mut policy_rng, episode);

        debug!(
            episode = episode + 1,
            steps = stats.steps,
            won = stats.won,
            max_tile = stats.max_tile,
            "episode finished"
        );
        if args.verbose {
            println!(
                "Episode {}: Won={}, MaxTile={}, Steps={}, Undos={}",
                episode + 1,
                stats.won,
                stats.max_tile,
                stats.steps,
                stats.undos
            );
        }

        wins += stats.won as u32;
        total_steps += stats.steps as u64;
        total_undos += stats.undos as u64;
        *tile_distribution.entry(stats.max_tile).or_insert(0u32) += 1;
    }

    Ok(Summary {
        episodes: args.episodes,
        policy: args.policy,
        seed: args.seed,
        config,
        wins,
        avg_steps: if args.episodes == 0 {
            0.0
        } else {
            total_steps as f64 / args.episodes as f64
        },
        total_undos,
        max_tile_overall: tile_distribution.keys().next_back().copied().unwrap_or(0),
        tile_distribution,
    })
}

fn run_episode(args: &Args, game: &mut Game, rng: &mut SmallRng, episode: u32) -> EpisodeStats {
    let mut steps = 0;
    let mut undos = 0;
    let mut moves = 0;
    let mut cycle = 0;

    while !game.is_over() && (args.max_steps == 0 || steps < args.max_steps) {
        let direction = match args.policy {
            Policy::Random => select_random_move(game, rng),
            Policy::Cycle => select_cycle_move(game, &mut cycle),
        };
        let Some(direction) = direction else {
            break; // stuck
        };

        game.apply_move(direction);
        steps += 1;
        moves += 1;
        if args.verbose {
            println!("Episode {} Step {}: {:?}", episode + 1, steps, direction);
            print!("{}", game);
        }

        if args.undo_every > 0 && moves % args.undo_every == 0 && game.undo() {
            undos += 1;
            if args.verbose {
                println!("Episode {} Step {}: undo", episode + 1, steps);
                print!("{}", game);
            }
        }
    }

    EpisodeStats {
        won: game.is_over(),
        steps,
        undos,
        max_tile: game.max_tile(),
    }
}

fn legal_directions(game: &Game) -> Vec<Direction> {
    let legal = game.legal_moves();
    Direction::all()
        .into_iter()
        .zip(legal)
        .filter_map(|(direction, ok)| ok.then_some(direction))
        .collect()
}

/// Select a random legal move.
fn select_random_move(game: &Game, rng: &mut SmallRng) -> Option<Direction> {
    legal_directions(game).choose(rng).copied()
}

/// Select moves in a cycle: Left, Down, Right, Up, skipping blocked ones.
fn select_cycle_move(game: &Game, cycle: &mut usize) -> Option<Direction> {
    const ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];
    let legal = legal_directions(game);

    for _ in 0..ORDER.len() {
        let direction = ORDER[*cycle % ORDER.len()];
        *cycle += 1;
        if legal.contains(&direction) {
            return Some(direction);
        }
    }
    None
}

fn print_summary(summary: &Summary) {
    println!("=== Simulation Results ===");
    println!("episodes={}", summary.episodes);
    println!("policy={:?}", summary.policy);
    println!("seed={}", summary.seed);
    println!("rows={}", summary.config.rows);
    println!("cols={}", summary.config.cols);
    println!("win_threshold={}", summary.config.win_threshold);
    println!("wins={}", summary.wins);
    println!("avg_steps={:.2}", summary.avg_steps);
    println!("total_undos={}", summary.total_undos);
    println!("max_tile_overall={}", summary.max_tile_overall);

    let distribution: Vec<String> = summary
        .tile_distribution
        .iter()
        .map(|(tile, count)| format!("{}:{}", tile, count))
        .collect();
    println!("tile_distribution={}", distribution.join(","));
}
