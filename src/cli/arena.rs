//! Arena command implementation.

use super::output::{ArenaStats, JsonArenaResult, format_arena_text};
use super::{ArenaFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use vanguard::EngineConfig;
use vanguard::arena::{ArenaConfig, run_match};

/// Execute the arena command.
///
/// # Errors
///
/// Returns an error if the arena parameters are invalid or output fails.
pub(crate) fn execute(
    engine: &EngineConfig,
    arena: ArenaConfig,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: ArenaFormat,
    progress: bool,
) -> Result<(), CliError> {
    arena.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    #[allow(clippy::cast_possible_truncation)]
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})")
            .map_err(|e| CliError::new(format!("invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let players = arena.players;

    // Each worker folds into its own stats; the progress bar is the only
    // shared state
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || ArenaStats::new(players),
            |mut local, i| {
                let match_seed = base_seed.wrapping_add(i);
                match run_match(match_seed, engine, &arena) {
                    Ok(report) => local.add_report(&report),
                    Err(e) => {
                        tracing::warn!(seed = match_seed, error = %e, "match failed to start");
                        local.failures += 1;
                    }
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            },
        )
        .reduce(
            || ArenaStats::new(players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        ArenaFormat::Text => {
            println!();
            print!("{}", format_arena_text(&stats));
            println!();
            println!(
                "Seed: {base_seed}  Duration: {:.2}s ({games_per_sec:.0} matches/sec)",
                duration.as_secs_f64()
            );
        }
        ArenaFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonArenaResult::from_stats(&stats))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
