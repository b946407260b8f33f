//! Per-match tick coordinator.
//!
//! A [`Session`] owns everything that survives between ticks: the running
//! map and city sequences the diffs apply to, the cities seen so far, the
//! swamp set, the readiness gate and the objective engine.

use std::collections::BTreeSet;

use crate::board::{Board, PlayerIndex};
use crate::config::EngineConfig;
use crate::diff;
use crate::engine::Engine;
use crate::error::{TickError, TickResult};
use crate::events::{EngineEvent, EventSink, TracingSink};
use crate::objective::ObjectiveQueue;
use crate::protocol::{Command, TickEvent};

/// Decision state for one player in one match.
#[derive(Debug)]
pub struct Session<S: EventSink = TracingSink> {
    player: PlayerIndex,
    config: EngineConfig,
    map: Vec<i32>,
    cities: Vec<i32>,
    known_cities: BTreeSet<usize>,
    swamps: BTreeSet<usize>,
    ready: bool,
    engine: Option<Engine>,
    sink: S,
}

impl Session<TracingSink> {
    /// Create a session that reports through `tracing`.
    #[must_use]
    pub fn new(player: PlayerIndex, config: EngineConfig) -> Self {
        Self::with_sink(player, config, TracingSink)
    }
}

impl<S: EventSink> Session<S> {
    /// Create a session that reports to `sink`.
    #[must_use]
    pub fn with_sink(player: PlayerIndex, config: EngineConfig, sink: S) -> Self {
        Self {
            player,
            config,
            map: Vec::new(),
            cities: Vec::new(),
            known_cities: BTreeSet::new(),
            swamps: BTreeSet::new(),
            ready: false,
            engine: None,
            sink,
        }
    }

    /// The acting player.
    #[must_use]
    pub const fn player(&self) -> PlayerIndex {
        self.player
    }

    /// Whether the general has reached the start threshold.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Running flat map sequence after the last good tick.
    #[must_use]
    pub fn map(&self) -> &[i32] {
        &self.map
    }

    /// Every city index seen this match.
    #[must_use]
    pub const fn known_cities(&self) -> &BTreeSet<usize> {
        &self.known_cities
    }

    /// Swamp tiles of this match.
    #[must_use]
    pub const fn swamps(&self) -> &BTreeSet<usize> {
        &self.swamps
    }

    /// Objective queue, once the engine has started.
    #[must_use]
    pub fn queue(&self) -> Option<&ObjectiveQueue> {
        self.engine.as_ref().map(Engine::queue)
    }

    /// The event sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the session, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Apply one update and choose at most one command.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::MapDiff`] or [`TickError::CitiesDiff`] if a diff
    /// does not apply; nothing is committed in that case. Returns
    /// [`TickError::Board`] if the patched map is malformed and
    /// [`TickError::UnknownGeneral`] if the acting general is not known.
    pub fn update(&mut self, event: &TickEvent) -> TickResult<Option<Command>> {
        let patched = diff::patch(&self.map, &event.map_diff)
            .map_err(TickError::MapDiff)
            .and_then(|map| {
                diff::patch(&self.cities, &event.cities_diff)
                    .map(|cities| (map, cities))
                    .map_err(TickError::CitiesDiff)
            });
        let (map, cities) = match patched {
            Ok(parts) => parts,
            Err(error) => return Err(self.drop_tick(event.turn, error)),
        };

        self.map = map;
        self.cities = cities;
        self.known_cities
            .extend(self.cities.iter().filter_map(|&c| usize::try_from(c).ok()));
        if self.swamps.is_empty() {
            self.swamps.extend(event.swamps.iter().copied());
        }

        let board = match self.board(event) {
            Ok(board) => board,
            Err(error) => return Err(self.drop_tick(event.turn, error)),
        };
        let Some(general) = board.general_of(self.player) else {
            return Err(self.drop_tick(event.turn, TickError::UnknownGeneral(self.player)));
        };

        if !self.ready {
            let army = board.army(general);
            if army < self.config.start_army {
                tracing::trace!(turn = event.turn, army, "waiting for start army");
                return Ok(None);
            }
            self.ready = true;
            self.sink.record(EngineEvent::GateOpened {
                turn: event.turn,
                army,
            });
        }

        let (player, config) = (self.player, self.config);
        let engine = self
            .engine
            .get_or_insert_with(|| Engine::new(player, general, config));
        Ok(engine.tick(&board, &mut self.sink))
    }

    fn board(&self, event: &TickEvent) -> TickResult<Board> {
        Ok(Board::from_flat(&self.map, event.turn)?
            .with_cities(self.known_cities.iter().copied())
            .with_generals(&event.generals)
            .with_swamps(self.swamps.iter().copied()))
    }

    fn drop_tick(&mut self, turn: u32, error: TickError) -> TickError {
        self.sink.record(EngineEvent::TickDropped { turn, error });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Terrain;

    /// 3x3 board with our general in the centre holding `army`.
    fn centre(army: i32) -> Vec<i32> {
        let mut map = vec![3, 3];
        map.extend((0..9).map(|tile| if tile == 4 { army } else { 0 }));
        map.extend((0..9).map(|tile| if tile == 4 { 0 } else { Terrain::EMPTY }));
        map
    }

    fn tick(turn: u32, old: &[i32], new: &[i32]) -> TickEvent {
        TickEvent {
            turn,
            map_diff: diff::encode(old, new),
            cities_diff: vec![0],
            generals: vec![4],
            swamps: Vec::new(),
        }
    }

    #[test]
    fn test_gate_stays_closed_below_threshold() {
        let mut session = Session::with_sink(0, EngineConfig::default(), Vec::new());
        assert_eq!(session.update(&tick(1, &[], &centre(4))), Ok(None));
        assert!(!session.is_ready());
        assert!(session.queue().is_none());
    }

    #[test]
    fn test_gate_opens_and_stays_open() {
        let mut session = Session::with_sink(0, EngineConfig::default(), Vec::new());
        assert_eq!(
            session.update(&tick(1, &[], &centre(5))),
            Ok(Some(Command::new(4, 5)))
        );
        assert!(session.is_ready());
        assert!(
            session
                .sink()
                .contains(&EngineEvent::GateOpened { turn: 1, army: 5 })
        );

        // General drained back to 1: no source left, but the gate holds
        session.update(&tick(2, &centre(5), &centre(1))).unwrap();
        assert!(session.is_ready());
    }

    #[test]
    fn test_bad_diff_commits_nothing() {
        let mut session = Session::with_sink(0, EngineConfig::default(), Vec::new());
        session.update(&tick(1, &[], &centre(4))).unwrap();
        let before = session.map().to_vec();

        let mut bad = tick(2, &centre(4), &centre(9));
        bad.cities_diff = vec![3];
        let err = session.update(&bad).unwrap_err();
        assert!(matches!(err, TickError::CitiesDiff(_)));
        assert_eq!(session.map(), before.as_slice());
        assert!(matches!(
            session.sink().last(),
            Some(EngineEvent::TickDropped { turn: 2, .. })
        ));
    }

    #[test]
    fn test_missing_general_is_reported() {
        let mut session = Session::with_sink(1, EngineConfig::default(), Vec::new());
        let err = session.update(&tick(1, &[], &centre(9))).unwrap_err();
        assert_eq!(err, TickError::UnknownGeneral(1));
    }

    #[test]
    fn test_cities_and_swamps_accumulate() {
        let mut session = Session::with_sink(0, EngineConfig::default(), Vec::new());
        let mut first = tick(1, &[], &centre(1));
        first.cities_diff = vec![0, 2, 1, 2];
        first.swamps = vec![8];
        session.update(&first).unwrap();

        // Cities list shrinks to [2]; swamps in later updates are ignored
        let mut second = tick(2, &centre(1), &centre(1));
        second.cities_diff = vec![0, 1, 2];
        second.swamps = vec![7];
        session.update(&second).unwrap();

        assert_eq!(session.known_cities().iter().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(session.swamps().iter().copied().collect::<Vec<_>>(), [8]);
    }
}
