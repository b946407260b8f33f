//! Shortest hop-count routing over the acting player's territory.
//!
//! The router floods outward from the target across tiles owned by the
//! acting player, labelling each with its hop distance, then walks down the
//! labels from the source. The resulting path is cached inside a [`Move`]
//! and handed out one edge per call.
//!
//! The cache is never re-validated against later boards. If a tile on the
//! path changes hands the caller has to [`Move::invalidate`] or drop the
//! move.

use std::collections::VecDeque;

use crate::board::{Board, PlayerIndex};
use crate::protocol::Command;

/// Label of a tile the flood has not reached.
const UNREACHED: u32 = u32::MAX;

/// Result of advancing a [`Move`] by one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Send the army along this edge.
    Advance(Command),
    /// The path is fully consumed.
    Arrived,
    /// The source cannot reach the target through owned tiles.
    NoPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathCache {
    Unplanned,
    Planned(VecDeque<usize>),
    Unreachable,
}

/// A lazily planned multi-hop move from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    source: usize,
    target: usize,
    cache: PathCache,
}

impl Move {
    /// Create an unplanned move.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            cache: PathCache::Unplanned,
        }
    }

    /// Tile the move starts from.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Tile the move ends on.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Whether a path has been computed and not yet exhausted.
    #[must_use]
    pub fn is_planned(&self) -> bool {
        matches!(self.cache, PathCache::Planned(_))
    }

    /// Unconsumed part of the cached path, head first.
    #[must_use]
    pub fn remaining(&self) -> Option<&VecDeque<usize>> {
        match &self.cache {
            PathCache::Planned(path) => Some(path),
            PathCache::Unplanned | PathCache::Unreachable => None,
        }
    }

    /// Drop the cached path so the next step replans from `source`.
    pub fn invalidate(&mut self) {
        self.cache = PathCache::Unplanned;
    }

    /// Consume the next edge, planning first if needed.
    pub fn step(&mut self, board: &Board, me: PlayerIndex, ceiling: usize) -> Step {
        if self.cache == PathCache::Unplanned {
            self.cache = match plan(board, self.source, self.target, me, ceiling) {
                Some(path) => {
                    tracing::trace!(
                        source = self.source,
                        target = self.target,
                        hops = path.len().saturating_sub(1),
                        "planned path"
                    );
                    PathCache::Planned(path.into())
                }
                None => {
                    tracing::trace!(source = self.source, target = self.target, "no path");
                    PathCache::Unreachable
                }
            };
        }

        match &mut self.cache {
            PathCache::Unreachable => Step::NoPath,
            PathCache::Planned(path) if path.len() > 1 => match path.pop_front() {
                Some(from) => Step::Advance(Command::new(from, path[0])),
                None => Step::Arrived,
            },
            PathCache::Planned(_) | PathCache::Unplanned => Step::Arrived,
        }
    }
}

/// Hop distance to `target` for every tile owned by `me` within `ceiling`
/// flood rounds. The target itself is labelled 0 whoever owns it.
///
/// Stops early once `stop_at` is labelled.
#[must_use]
pub fn flood(
    board: &Board,
    target: usize,
    me: PlayerIndex,
    ceiling: usize,
    stop_at: Option<usize>,
) -> Vec<Option<u32>> {
    flood_labels(board, target, me, ceiling, stop_at)
        .into_iter()
        .map(|label| (label != UNREACHED).then_some(label))
        .collect()
}

/// Plan a path from `source` to `target` through tiles owned by `me`.
///
/// The path includes both endpoints. Among equally short next hops the first
/// neighbour in right, left, up, down order wins.
#[must_use]
pub fn plan(
    board: &Board,
    source: usize,
    target: usize,
    me: PlayerIndex,
    ceiling: usize,
) -> Option<Vec<usize>> {
    if source >= board.size() || target >= board.size() {
        return None;
    }

    let labels = flood_labels(board, target, me, ceiling, Some(source));
    if labels[source] == UNREACHED {
        return None;
    }

    let mut path = Vec::with_capacity(labels[source] as usize + 1);
    let mut tile = source;
    while tile != target {
        path.push(tile);
        let mut best = (usize::MAX, UNREACHED);
        for next in board.neighbors(tile).iter() {
            if labels[next] < best.1 {
                best = (next, labels[next]);
            }
        }
        if best.1 >= labels[tile] {
            return None;
        }
        tile = best.0;
    }
    path.push(target);

    Some(path)
}

fn flood_labels(
    board: &Board,
    target: usize,
    me: PlayerIndex,
    ceiling: usize,
    stop_at: Option<usize>,
) -> Vec<u32> {
    let mut labels = vec![UNREACHED; board.size()];
    if target >= labels.len() {
        return labels;
    }

    labels[target] = 0;
    let mut frontier = vec![target];
    let mut next = Vec::new();

    for round in 1..=ceiling {
        if stop_at.is_some_and(|s| labels.get(s).is_some_and(|&l| l != UNREACHED)) {
            break;
        }
        let depth = u32::try_from(round).unwrap_or(UNREACHED - 1);
        for &tile in &frontier {
            for adj in board.neighbors(tile).iter() {
                if labels[adj] == UNREACHED && board.terrain(adj).is_owned_by(me) {
                    labels[adj] = depth;
                    next.push(adj);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        std::mem::swap(&mut frontier, &mut next);
        next.clear();
    }

    labels
}
