//! Ordered collection of standing objectives.

use std::collections::VecDeque;
use std::fmt;

use crate::config::EngineConfig;
use crate::objective::{Collect, Expand, Objective};

/// Stable handle of a tail objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectiveId(u64);

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a tail objective was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailKind {
    /// A profitable capture next to own territory.
    Discovery,
    /// A push into unclaimed or swamp territory.
    Exploration,
}

/// Position in the evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The fixed expansion slot.
    Expand,
    /// The fixed collection slot.
    Collect,
    /// A discovered objective.
    Tail(ObjectiveId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TailEntry {
    id: ObjectiveId,
    kind: TailKind,
    objective: Objective,
}

/// Two fixed slots plus a bounded FIFO tail of discovered objectives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveQueue {
    expand: Objective,
    collect: Objective,
    collect_target: usize,
    tail: VecDeque<TailEntry>,
    capacity: usize,
    next_id: u64,
}

impl ObjectiveQueue {
    /// Create a queue that collects onto `collect_target` and keeps at most
    /// `capacity` tail objectives.
    #[must_use]
    pub fn new(collect_target: usize, capacity: usize) -> Self {
        Self {
            expand: Expand.into(),
            collect: Collect::new(collect_target).into(),
            collect_target,
            tail: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Append a tail objective, dropping the oldest one if the tail is full.
    ///
    /// Returns the new id and the id of the dropped objective, if any.
    pub fn push(
        &mut self,
        kind: TailKind,
        objective: impl Into<Objective>,
    ) -> (ObjectiveId, Option<ObjectiveId>) {
        let evicted = if self.tail.len() >= self.capacity {
            self.tail.pop_front().map(|entry| entry.id)
        } else {
            None
        };

        let id = ObjectiveId(self.next_id);
        self.next_id += 1;
        self.tail.push_back(TailEntry {
            id,
            kind,
            objective: objective.into(),
        });

        (id, evicted)
    }

    /// Remove a tail objective.
    pub fn remove(&mut self, id: ObjectiveId) -> Option<(TailKind, Objective)> {
        let index = self.tail.iter().position(|entry| entry.id == id)?;
        self.tail
            .remove(index)
            .map(|entry| (entry.kind, entry.objective))
    }

    /// Number of tail objectives.
    #[must_use]
    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Tail objectives in insertion order.
    pub fn tail(&self) -> impl Iterator<Item = (ObjectiveId, TailKind, &Objective)> {
        self.tail
            .iter()
            .map(|entry| (entry.id, entry.kind, &entry.objective))
    }

    /// Whether some tail objective already aims at `tile`.
    #[must_use]
    pub fn targets(&self, tile: usize) -> bool {
        self.tail
            .iter()
            .any(|entry| entry.objective.target() == Some(tile))
    }

    /// The outstanding exploration objective, if any.
    #[must_use]
    pub fn exploration(&self) -> Option<ObjectiveId> {
        self.tail
            .iter()
            .find(|entry| entry.kind == TailKind::Exploration)
            .map(|entry| entry.id)
    }

    /// Kind of a tail objective.
    #[must_use]
    pub fn kind(&self, id: ObjectiveId) -> Option<TailKind> {
        self.tail
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.kind)
    }

    /// Evaluation order for `turn`.
    ///
    /// Near the end of each priority window Collect runs right after Expand;
    /// for the rest of the window it runs after every tail objective.
    #[must_use]
    pub fn order(&self, turn: u32, config: &EngineConfig) -> Vec<Slot> {
        let window = config.priority_window.max(1);
        let collect_first = turn % window >= window.saturating_sub(config.collect_first_span);
        let tail = self.tail.iter().map(|entry| Slot::Tail(entry.id));

        let mut order = Vec::with_capacity(self.tail.len() + 2);
        order.push(Slot::Expand);
        if collect_first {
            order.push(Slot::Collect);
            order.extend(tail);
        } else {
            order.extend(tail);
            order.push(Slot::Collect);
        }
        order
    }

    /// Objective stored in `slot`.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Objective> {
        match slot {
            Slot::Expand => Some(&mut self.expand),
            Slot::Collect => Some(&mut self.collect),
            Slot::Tail(id) => self
                .tail
                .iter_mut()
                .find(|entry| entry.id == id)
                .map(|entry| &mut entry.objective),
        }
    }

    /// Discard an exhausted objective. Fixed slots start over fresh; tail
    /// objectives are removed for good.
    pub fn retire(&mut self, slot: Slot) {
        match slot {
            Slot::Expand => self.expand = Expand.into(),
            Slot::Collect => self.collect = Collect::new(self.collect_target).into(),
            Slot::Tail(id) => {
                self.remove(id);
            }
        }
    }
}
