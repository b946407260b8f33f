//! Offline arena: engine-vs-engine matches under generals.io rules.
//!
//! Provides a pure function interface: `(seed, configs) -> MatchReport`.
//!
//! Each turn every living player receives the fogged board as a pair of
//! diffs against what it saw the turn before, exactly as a server would
//! send it. Sessions decide in parallel; their commands are then applied
//! in player order and the world grows.

mod mapgen;
mod world;

pub use mapgen::generate;
pub use world::{LAND_BONUS_PERIOD, View, World};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::PlayerIndex;
use crate::config::EngineConfig;
use crate::diff;
use crate::protocol::{Command, TickEvent};
use crate::session::Session;

/// Most players a match can seat.
pub const MAX_PLAYERS: usize = 8;

/// Match parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Map width in tiles.
    pub width: usize,
    /// Map height in tiles.
    pub height: usize,
    /// Number of players (2-8).
    pub players: usize,
    /// Turn limit.
    pub max_turns: u32,
    /// Chance in percent that a tile starts as a mountain.
    pub mountain_percent: u8,
    /// Neutral cities to place.
    pub cities: usize,
    /// Swamps to place.
    pub swamps: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 18,
            height: 18,
            players: 2,
            max_turns: 500,
            mountain_percent: 15,
            cities: 8,
            swamps: 6,
        }
    }
}

impl ArenaConfig {
    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ArenaError`] naming the first unusable parameter.
    pub const fn validate(&self) -> Result<(), ArenaError> {
        if self.players < 2 || self.players > MAX_PLAYERS {
            return Err(ArenaError::Players(self.players));
        }
        if self.width < 2 || self.height < 2 {
            return Err(ArenaError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.mountain_percent > 90 {
            return Err(ArenaError::Mountains(self.mountain_percent));
        }
        Ok(())
    }
}

/// Why a match could not be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// Player count outside 2-8.
    #[error("matches need 2 to 8 players, got {0}")]
    Players(usize),
    /// Map too small to play on.
    #[error("map of {width}x{height} is too small")]
    Dimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Mountain share leaves no room to move.
    #[error("mountain share of {0}% is above 90%")]
    Mountains(u8),
    /// Not enough open tiles for what was requested.
    #[error("map needs {needed} open tiles but has {available}")]
    Crowded {
        /// Tiles required.
        needed: usize,
        /// Tiles available.
        available: usize,
    },
}

/// Per-player statistics of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerReport {
    /// Player index.
    pub player: PlayerIndex,
    /// Tiles held at the end.
    pub land: usize,
    /// Total army at the end.
    pub army: u64,
    /// Commands the world accepted.
    pub moves: u32,
    /// Ticks without a command.
    pub idle: u32,
    /// Commands the world rejected.
    pub rejected: u32,
    /// Updates the session failed to process.
    pub dropped_ticks: u32,
    /// Turn the player lost its general.
    pub eliminated_turn: Option<u32>,
}

/// Result of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Seed the map was generated from.
    pub seed: u64,
    /// Last player standing, or the clear leader at the turn limit.
    pub winner: Option<PlayerIndex>,
    /// Turns played.
    pub turns: u32,
    /// One entry per player.
    pub players: Vec<PlayerReport>,
}

/// One player's side of the table.
#[derive(Debug)]
struct Seat {
    session: Session,
    seen: View,
    first: bool,
    report: PlayerReport,
}

impl Seat {
    fn new(player: PlayerIndex, config: EngineConfig) -> Self {
        Self {
            session: Session::new(player, config),
            seen: View::default(),
            first: true,
            report: PlayerReport {
                player,
                land: 0,
                army: 0,
                moves: 0,
                idle: 0,
                rejected: 0,
                dropped_ticks: 0,
                eliminated_turn: None,
            },
        }
    }

    fn decide(&mut self, world: &World) -> Option<Command> {
        let player = self.report.player;
        let view = world.view(player);
        let event = TickEvent {
            turn: world.turn(),
            map_diff: diff::encode(&self.seen.map, &view.map),
            cities_diff: diff::encode(&self.seen.cities, &view.cities),
            generals: view.generals.clone(),
            swamps: if self.first {
                world.swamps().iter().copied().collect()
            } else {
                Vec::new()
            },
        };
        self.seen = view;
        self.first = false;

        match self.session.update(&event) {
            Ok(Some(command)) => Some(command),
            Ok(None) => {
                self.report.idle += 1;
                None
            }
            Err(error) => {
                tracing::warn!(player, turn = event.turn, %error, "update rejected");
                self.report.dropped_ticks += 1;
                None
            }
        }
    }
}

/// Play one match between engine-driven players.
///
/// Every player runs its own [`Session`] with `engine`; the session seed is
/// offset by the match seed so repeated matches do not share tie-breaks.
///
/// # Errors
///
/// Returns an [`ArenaError`] if `arena` is invalid or the map cannot be
/// generated.
pub fn run_match(
    seed: u64,
    engine: &EngineConfig,
    arena: &ArenaConfig,
) -> Result<MatchReport, ArenaError> {
    let mut world = generate(seed, arena)?;
    let engine = EngineConfig {
        seed: engine.seed.wrapping_add(seed),
        ..*engine
    };
    let mut seats: Vec<Seat> = (0..world.players())
        .map(|player| Seat::new(player, engine))
        .collect();

    while world.turn() < arena.max_turns && world.alive().count() > 1 {
        let commands: Vec<(PlayerIndex, Option<Command>)> = seats
            .par_iter_mut()
            .filter(|seat| world.is_alive(seat.report.player))
            .map(|seat| (seat.report.player, seat.decide(&world)))
            .collect();

        for (player, command) in commands {
            let Some(command) = command else { continue };
            let seat = &mut seats[player];
            if world.apply(player, command) {
                seat.report.moves += 1;
            } else {
                tracing::trace!(player, ?command, "command rejected");
                seat.report.rejected += 1;
            }
        }

        let turn = world.turn();
        for seat in &mut seats {
            if seat.report.eliminated_turn.is_none() && !world.is_alive(seat.report.player) {
                seat.report.eliminated_turn = Some(turn);
            }
        }
        world.advance();
    }

    let players: Vec<PlayerReport> = seats
        .into_iter()
        .map(|seat| PlayerReport {
            land: world.land(seat.report.player),
            army: world.total_army(seat.report.player),
            ..seat.report
        })
        .collect();
    let winner = leader(&world, &players);
    tracing::debug!(seed, turns = world.turn(), ?winner, "match finished");

    Ok(MatchReport {
        seed,
        winner,
        turns: world.turn(),
        players,
    })
}

/// The sole survivor, or the living player strictly ahead on land then
/// army.
fn leader(world: &World, players: &[PlayerReport]) -> Option<PlayerIndex> {
    let mut alive: Vec<&PlayerReport> = players
        .iter()
        .filter(|p| world.is_alive(p.player))
        .collect();
    alive.sort_by(|a, b| (b.land, b.army).cmp(&(a.land, a.army)));
    match alive.as_slice() {
        [only] => Some(only.player),
        [first, second, ..] if (first.land, first.army) != (second.land, second.army) => {
            Some(first.player)
        }
        _ => None,
    }
}
