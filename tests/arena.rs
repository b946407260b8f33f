//! Integration tests for offline arena matches.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use vanguard::EngineConfig;
use vanguard::arena::{ArenaConfig, ArenaError, generate, run_match};

fn quick(players: usize) -> ArenaConfig {
    ArenaConfig {
        width: 14,
        height: 14,
        players,
        max_turns: 120,
        ..ArenaConfig::default()
    }
}

#[test]
fn matches_are_deterministic() {
    let engine = EngineConfig::default();
    let a = run_match(11, &engine, &quick(2)).unwrap();
    let b = run_match(11, &engine, &quick(2)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn engines_expand_during_a_match() {
    let report = run_match(3, &EngineConfig::default(), &quick(2)).unwrap();
    for player in &report.players {
        assert!(player.land > 5, "player {} stayed home", player.player);
        assert_eq!(player.dropped_ticks, 0);
    }
}

#[test]
fn four_player_match_runs_to_completion() {
    let arena = quick(4);
    let report = run_match(8, &EngineConfig::default(), &arena).unwrap();
    assert_eq!(report.players.len(), 4);
    assert!(report.turns <= arena.max_turns);
    let alive = report
        .players
        .iter()
        .filter(|p| p.eliminated_turn.is_none())
        .count();
    assert!(alive >= 1);
    if report.turns < arena.max_turns {
        assert_eq!(alive, 1, "match ended early without a sole survivor");
        assert!(report.winner.is_some());
    }
}

#[test]
fn generated_world_has_requested_features() {
    let arena = quick(3);
    let world = generate(21, &arena).unwrap();
    assert_eq!(world.players(), 3);
    assert_eq!(world.cities().len(), arena.cities);
    assert_eq!(world.swamps().len(), arena.swamps);
    assert_eq!(world.alive().count(), 3);
}

#[test]
fn invalid_arena_is_rejected() {
    let arena = ArenaConfig {
        players: 12,
        ..quick(2)
    };
    assert_eq!(
        run_match(0, &EngineConfig::default(), &arena),
        Err(ArenaError::Players(12))
    );
}

#[test]
fn report_serializes_to_json() {
    let report = run_match(4, &EngineConfig::default(), &quick(2)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["seed"], 4);
    assert_eq!(json["players"].as_array().map(Vec::len), Some(2));
    assert!(json["players"][0].get("eliminated_turn").is_some());
}
