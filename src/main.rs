//! Command-line front end.
//!
//! Usage:
//!   slider solve <FILE> [--algorithm <iddfs|a-star|ida-star>]... [--max-depth <n>]
//!   slider solve --stdin
//!   slider scramble --size <n> --moves <n> [--seed <n>]

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sliding_puzzle_search::{Algorithm, Puzzle, SearchConfig, Solution};

#[derive(Parser)]
#[command(name = "slider")]
#[command(version, about = "Sliding tile puzzle solver", long_about = None)]
struct Cli {
    /// Log search progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board with one or more search algorithms
    Solve {
        /// Board file: the size, then the cells row by row with X for the blank
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the board from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Algorithms to run, in order (default: all three)
        #[arg(short, long, value_enum)]
        algorithm: Vec<Algorithm>,

        /// Deepest limit tried by iterative-deepening DFS
        #[arg(long, default_value_t = SearchConfig::default().max_depth)]
        max_depth: u32,

        /// Print boards without highlighting the blank
        #[arg(long)]
        no_color: bool,
    },
    /// Print a random board reachable from the solved one
    Scramble {
        /// Board dimension
        #[arg(long, default_value = "3")]
        size: usize,

        /// Number of random blank moves
        #[arg(long, default_value = "20")]
        moves: usize,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            algorithm,
            max_depth,
            no_color,
        } => {
            let input = read_input(file, stdin)?;
            let start: Puzzle = input.parse().context("failed to parse board")?;
            let color = !no_color && io::stdout().is_terminal();
            let algorithms = if algorithm.is_empty() {
                Algorithm::ALL.to_vec()
            } else {
                algorithm
            };
            solve(start, &algorithms, &SearchConfig { max_depth }, color);
            Ok(())
        }
        Commands::Scramble { size, moves, seed } => {
            if size == 0 {
                bail!("board size must be positive");
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let puzzle = Puzzle::scrambled(size, moves, &mut rng);
            println!("{}", size);
            print!("{}", puzzle);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read board from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        bail!("must provide either a board file or --stdin")
    }
}

fn solve(start: Puzzle, algorithms: &[Algorithm], config: &SearchConfig, color: bool) {
    let goal = Puzzle::new(start.size());
    let start = Rc::new(start);

    for algorithm in algorithms {
        println!("{}", algorithm.name());
        let started = Instant::now();
        let (found, stats) = algorithm.run(&start, &goal, config);
        tracing::info!(
            algorithm = algorithm.name(),
            expanded = stats.expanded,
            generated = stats.generated,
            iterations = stats.iterations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );

        match found {
            Some(end) => print_solution(&Solution::from_goal(&end), color),
            None => println!("No solution found"),
        }
        println!();
    }
}

fn print_solution(solution: &Solution, color: bool) {
    if !color {
        println!("{}", solution);
        return;
    }
    for state in &solution.states {
        for row in state.to_string().lines() {
            let cells: Vec<String> = row
                .split('\t')
                .map(|cell| {
                    if cell == "X" {
                        cell.bold().yellow().to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect();
            println!("{}", cells.join("\t"));
        }
        println!();
    }
    println!("It took {} moves to find a solution", solution.len());
}
