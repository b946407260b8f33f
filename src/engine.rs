//! Objective engine: discovery, ordering and evaluation for one tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, PlayerIndex};
use crate::config::EngineConfig;
use crate::events::{EngineEvent, EventSink};
use crate::objective::{
    Conquest, Context, ObjectiveQueue, Outcome, Reach, TailKind, find_conquest, find_exploration,
};
use crate::protocol::Command;

/// Standing objectives of one player plus the machinery to run them.
#[derive(Debug, Clone)]
pub struct Engine {
    me: PlayerIndex,
    general: usize,
    config: EngineConfig,
    queue: ObjectiveQueue,
    rng: ChaCha8Rng,
}

impl Engine {
    /// Create an engine for `me`, collecting onto `general`.
    #[must_use]
    pub fn new(me: PlayerIndex, general: usize, config: EngineConfig) -> Self {
        let seed = config.seed ^ (me as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            me,
            general,
            config,
            queue: ObjectiveQueue::new(general, config.tail_capacity),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The objective queue.
    #[must_use]
    pub const fn queue(&self) -> &ObjectiveQueue {
        &self.queue
    }

    /// Mutable access to the objective queue.
    pub fn queue_mut(&mut self) -> &mut ObjectiveQueue {
        &mut self.queue
    }

    /// Run one tick: discover new objectives, then evaluate in priority
    /// order until one produces a command.
    pub fn tick(&mut self, board: &Board, sink: &mut impl EventSink) -> Option<Command> {
        self.discover(board, sink);

        let order = self.queue.order(board.turn(), &self.config);
        sink.record(EngineEvent::Ordered {
            turn: board.turn(),
            order: order.clone(),
        });

        let mut ctx = Context {
            board,
            me: self.me,
            config: &self.config,
            rng: &mut self.rng,
        };

        for slot in order {
            let Some(objective) = self.queue.get_mut(slot) else {
                continue;
            };
            match objective.exec(&mut ctx) {
                Outcome::Move(command) => {
                    sink.record(EngineEvent::Chose { slot, command });
                    return Some(command);
                }
                Outcome::Wait => {}
                Outcome::Finished => {
                    self.queue.retire(slot);
                    sink.record(EngineEvent::Retired { slot });
                }
            }
        }

        sink.record(EngineEvent::Idle { turn: board.turn() });
        None
    }

    fn discover(&mut self, board: &Board, sink: &mut impl EventSink) {
        let reach = Reach::from_general(board, self.me, self.general, self.config.flood_ceiling);

        if let Some(conquest) = find_conquest(board, self.me, self.general, &reach, &self.queue) {
            self.enqueue(TailKind::Discovery, conquest, sink);
        }

        if let Some(exploration) = find_exploration(
            board,
            self.me,
            self.general,
            self.config.explore_army,
            &reach,
            &self.queue,
        ) {
            self.enqueue(TailKind::Exploration, exploration, sink);
        }
    }

    fn enqueue(
        &mut self,
        kind: TailKind,
        conquest: Conquest,
        sink: &mut impl EventSink,
    ) {
        let target = conquest.target();
        let (id, evicted) = self.queue.push(kind, conquest);
        if let Some(evicted) = evicted {
            sink.record(EngineEvent::Evicted { id: evicted });
        }
        sink.record(EngineEvent::Discovered { id, kind, target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Terrain;
    use crate::objective::Slot;

    #[test]
    fn test_expand_first() {
        let board = Board::blank(3, 3)
            .unwrap()
            .with_tile(4, Terrain::Owned(0), 10)
            .with_generals(&[4]);
        let mut engine = Engine::new(0, 4, EngineConfig::default());
        let mut events = Vec::new();
        assert_eq!(engine.tick(&board, &mut events), Some(Command::new(4, 5)));
        assert!(events.contains(&EngineEvent::Chose {
            slot: Slot::Expand,
            command: Command::new(4, 5)
        }));
    }

    #[test]
    fn test_idle_when_nothing_moves() {
        let board = Board::blank(2, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 1)
            .with_tile(1, Terrain::Mountain, 0)
            .with_generals(&[0]);
        let mut engine = Engine::new(0, 0, EngineConfig::default());
        let mut events = Vec::new();
        assert_eq!(engine.tick(&board, &mut events), None);
        assert_eq!(events.last(), Some(&EngineEvent::Idle { turn: 0 }));
    }

    #[test]
    fn test_discovered_conquest_runs_before_collect() {
        // Row: general(30) | owned(2) | city(20); everything else mountain
        let mut board = Board::blank(3, 2)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 30)
            .with_tile(1, Terrain::Owned(0), 2)
            .with_tile(2, Terrain::Empty, 20)
            .with_cities([2])
            .with_generals(&[0]);
        for tile in 3..6 {
            board = board.with_tile(tile, Terrain::Mountain, 0);
        }
        let mut engine = Engine::new(0, 0, EngineConfig::default());
        let mut events = Vec::new();

        assert_eq!(engine.tick(&board, &mut events), Some(Command::new(0, 1)));
        assert_eq!(engine.queue().tail_len(), 1);
        assert!(matches!(
            events.iter().find(|e| matches!(e, EngineEvent::Chose { .. })),
            Some(EngineEvent::Chose {
                slot: Slot::Tail(_),
                ..
            })
        ));
    }

    #[test]
    fn test_finished_tail_objective_is_removed() {
        // Target already ours: the conquest retires on evaluation
        let board = Board::blank(2, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 1)
            .with_tile(1, Terrain::Owned(0), 1)
            .with_generals(&[0]);
        let mut engine = Engine::new(0, 0, EngineConfig::default());
        engine
            .queue_mut()
            .push(TailKind::Discovery, Conquest::new(0, 1));

        let mut events = Vec::new();
        assert_eq!(engine.tick(&board, &mut events), None);
        assert_eq!(engine.queue().tail_len(), 0);
        assert!(events.iter().any(|e| matches!(
            e,
            EngineEvent::Retired {
                slot: Slot::Tail(_)
            }
        )));
    }
}
