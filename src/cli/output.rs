//! Output formatting utilities for CLI.

use serde::Serialize;
use std::fmt::Write;
use vanguard::arena::MatchReport;

/// Aggregated statistics over many arena matches.
///
/// Built per rayon worker and merged, so it only holds sums.
#[derive(Debug, Clone, Default)]
pub(super) struct ArenaStats {
    /// Matches that ran to completion.
    pub(super) games_played: u64,
    /// Matches that could not be set up.
    pub(super) failures: u64,
    /// Wins per seat.
    pub(super) wins: Vec<u64>,
    /// Matches without a clear winner.
    pub(super) draws: u64,
    /// Sum of turns over all matches.
    pub(super) total_turns: u64,
    /// Accepted commands per seat.
    pub(super) moves: Vec<u64>,
    /// Rejected commands per seat.
    pub(super) rejected: Vec<u64>,
    /// Dropped updates over all seats.
    pub(super) dropped_ticks: u64,
}

impl ArenaStats {
    /// Empty statistics for `players` seats.
    pub(super) fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            moves: vec![0; players],
            rejected: vec![0; players],
            ..Self::default()
        }
    }

    /// Fold one match into the totals.
    pub(super) fn add_report(&mut self, report: &MatchReport) {
        self.games_played += 1;
        self.total_turns += u64::from(report.turns);
        match report.winner.and_then(|w| self.wins.get_mut(w)) {
            Some(wins) => *wins += 1,
            None => self.draws += 1,
        }
        for player in &report.players {
            if let Some(moves) = self.moves.get_mut(player.player) {
                *moves += u64::from(player.moves);
            }
            if let Some(rejected) = self.rejected.get_mut(player.player) {
                *rejected += u64::from(player.rejected);
            }
            self.dropped_ticks += u64::from(player.dropped_ticks);
        }
    }

    /// Add another worker's totals.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        self.dropped_ticks += other.dropped_ticks;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.moves.iter_mut().zip(&other.moves) {
            *a += b;
        }
        for (a, b) in self.rejected.iter_mut().zip(&other.rejected) {
            *a += b;
        }
    }

    /// Mean match length in turns.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games_played as f64
        }
    }
}

/// JSON-serializable arena summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonArenaResult {
    /// Matches played.
    pub(super) games: u64,
    /// Matches that failed to start.
    pub(super) failures: u64,
    /// Matches without a winner.
    pub(super) draws: u64,
    /// Mean match length.
    pub(super) average_turns: f64,
    /// Dropped updates over all seats.
    pub(super) dropped_ticks: u64,
    /// Per-seat results.
    pub(super) players: Vec<JsonSeatResult>,
}

/// JSON-serializable per-seat summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeatResult {
    /// Seat index.
    pub(super) player: usize,
    /// Matches won.
    pub(super) wins: u64,
    /// Accepted commands.
    pub(super) moves: u64,
    /// Rejected commands.
    pub(super) rejected: u64,
}

impl JsonArenaResult {
    /// Create from aggregated statistics.
    pub(super) fn from_stats(stats: &ArenaStats) -> Self {
        Self {
            games: stats.games_played,
            failures: stats.failures,
            draws: stats.draws,
            average_turns: stats.average_turns(),
            dropped_ticks: stats.dropped_ticks,
            players: (0..stats.wins.len())
                .map(|player| JsonSeatResult {
                    player,
                    wins: stats.wins[player],
                    moves: stats.moves[player],
                    rejected: stats.rejected[player],
                })
                .collect(),
        }
    }
}

/// Format arena statistics as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_arena_text(stats: &ArenaStats) -> String {
    let mut output = String::new();
    let games = stats.games_played.max(1) as f64;

    let _ = writeln!(output, "Arena Results ({} matches)", stats.games_played);
    let _ = writeln!(output, "  Average length: {:.1} turns", stats.average_turns());
    let _ = writeln!(
        output,
        "  Draws: {} ({:.1}%)",
        stats.draws,
        stats.draws as f64 / games * 100.0
    );
    if stats.failures > 0 {
        let _ = writeln!(output, "  Failed to start: {}", stats.failures);
    }
    if stats.dropped_ticks > 0 {
        let _ = writeln!(output, "  Dropped updates: {}", stats.dropped_ticks);
    }
    output.push('\n');

    for (player, wins) in stats.wins.iter().enumerate() {
        let _ = writeln!(
            output,
            "  Player {player}: {wins} wins ({:.1}%), {} moves, {} rejected",
            *wins as f64 / games * 100.0,
            stats.moves[player],
            stats.rejected[player],
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard::arena::PlayerReport;

    fn report(winner: Option<usize>, turns: u32) -> MatchReport {
        let seat = |player| PlayerReport {
            player,
            land: 1,
            army: 1,
            moves: 10,
            idle: 0,
            rejected: 1,
            dropped_ticks: 0,
            eliminated_turn: None,
        };
        MatchReport {
            seed: 0,
            winner,
            turns,
            players: vec![seat(0), seat(1)],
        }
    }

    #[test]
    fn test_merge_sums_workers() {
        let mut a = ArenaStats::new(2);
        a.add_report(&report(Some(0), 100));
        let mut b = ArenaStats::new(2);
        b.add_report(&report(None, 300));
        b.add_report(&report(Some(1), 200));
        a.merge(&b);

        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, [1, 1]);
        assert_eq!(a.draws, 1);
        assert_eq!(a.moves, [30, 30]);
        assert_eq!(a.rejected, [3, 3]);
        assert!((a.average_turns() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_lists_every_seat() {
        let mut stats = ArenaStats::new(2);
        stats.add_report(&report(Some(1), 50));
        let text = format_arena_text(&stats);
        assert!(text.contains("Arena Results (1 matches)"));
        assert!(text.contains("Player 0: 0 wins"));
        assert!(text.contains("Player 1: 1 wins (100.0%)"));
    }

    #[test]
    fn test_json_shape() {
        let mut stats = ArenaStats::new(2);
        stats.add_report(&report(Some(0), 10));
        let json = serde_json::to_value(JsonArenaResult::from_stats(&stats)).unwrap();
        assert_eq!(json["games"], 1);
        assert_eq!(json["players"][0]["wins"], 1);
        assert_eq!(json["players"].as_array().map(Vec::len), Some(2));
    }
}
