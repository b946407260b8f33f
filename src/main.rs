//! Vanguard CLI - drive the decision engine over stdio or in offline matches.

// Allow print in the CLI binary, unwrap in its tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

/// Vanguard - an objective-driven bot for fog-of-war territory games
#[derive(Parser, Debug)]
#[command(name = "vanguard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine config file (JSON); defaults apply to missing fields
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions (repeat for more detail); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one seat: tick events in as JSON lines on stdin, commands out on stdout
    Play {
        /// Player index of this seat
        #[arg(short, long, default_value = "0")]
        player: usize,
    },

    /// Run many seeded engine-vs-engine matches and aggregate the results
    Arena {
        /// Number of matches (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each match; default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Players per match (default: 2)
        #[arg(short = 'n', long, default_value = "2")]
        players: usize,

        /// Map width and height (default: 18)
        #[arg(long, default_value = "18")]
        size: usize,

        /// Maximum turns per match (default: 500)
        #[arg(short = 't', long, default_value = "500")]
        max_turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ArenaFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("vanguard=debug"),
        _ => EnvFilter::new("vanguard=trace"),
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = cli::load_config(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Play { player } => cli::play::execute(player, config),

        Commands::Arena {
            games,
            seed,
            threads,
            players,
            size,
            max_turns,
            format,
            progress,
        } => {
            let arena = vanguard::arena::ArenaConfig {
                width: size,
                height: size,
                players,
                max_turns,
                ..vanguard::arena::ArenaConfig::default()
            };
            cli::arena::execute(&config, arena, games, seed, threads, format, progress)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
