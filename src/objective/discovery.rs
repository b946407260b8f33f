//! Board scans that turn opportunities into new objectives.

use crate::board::{Board, PlayerIndex, Terrain, manhattan};
use crate::objective::{Conquest, ObjectiveQueue};
use crate::router::flood;

/// Tiles an army leaving the general can be routed onto this tick.
///
/// Owned tiles connected to the general count, as does every tile next to
/// one of them within the flood ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reach(Vec<bool>);

impl Reach {
    /// Flood outward from `general` over tiles owned by `me`.
    #[must_use]
    pub fn from_general(board: &Board, me: PlayerIndex, general: usize, ceiling: usize) -> Self {
        let labels = flood(board, general, me, ceiling, None);
        let within = |tile: usize| {
            labels
                .get(tile)
                .copied()
                .flatten()
                .is_some_and(|hops| usize::try_from(hops).is_ok_and(|h| h < ceiling))
        };

        Self(
            (0..board.size())
                .map(|tile| {
                    labels[tile].is_some() || board.neighbors(tile).iter().any(within)
                })
                .collect(),
        )
    }

    /// Whether the general can send an army onto `tile`.
    #[must_use]
    pub fn contains(&self, tile: usize) -> bool {
        self.0.get(tile).copied().unwrap_or(false)
    }
}

/// Find a city or garrisoned neutral tile that only the general can take.
///
/// Looks for a tile next to own territory that the adjacent army cannot
/// beat on its own (`source <= target + 1`) but the general can
/// (`general > target + 1`). Tiles the general cannot reach and tiles
/// already targeted by the queue are skipped. Returns at most one conquest,
/// sourced at the general.
#[must_use]
pub fn find_conquest(
    board: &Board,
    me: PlayerIndex,
    general: usize,
    reach: &Reach,
    queue: &ObjectiveQueue,
) -> Option<Conquest> {
    let general_army = board.army(general);

    board
        .owned_by(me)
        .filter(|&src| board.army(src) > 1)
        .find_map(|src| {
            board.neighbors(src).iter().find(|&adj| {
                let terrain = board.terrain(adj);
                let garrison = board.army(adj);
                let prize =
                    board.is_city(adj) || (terrain == Terrain::Empty && garrison != 0);
                prize
                    && terrain.is_passable()
                    && !terrain.is_owned_by(me)
                    && general_army > garrison + 1
                    && board.army(src) <= garrison + 1
                    && reach.contains(adj)
                    && !queue.targets(adj)
            })
        })
        .map(|target| Conquest::new(general, target))
}

/// Find a frontier tile worth a dedicated push once the general is strong.
///
/// Only fires when the general holds more than `explore_army` and no
/// exploration is outstanding. Picks the unclaimed tile within reach of the
/// general that lies farthest from it, preferring swamps. The conquest
/// waits for `explore_army` and sends half the general's army.
#[must_use]
pub fn find_exploration(
    board: &Board,
    _me: PlayerIndex,
    general: usize,
    explore_army: u32,
    reach: &Reach,
    queue: &ObjectiveQueue,
) -> Option<Conquest> {
    if board.army(general) <= explore_army || queue.exploration().is_some() {
        return None;
    }

    (0..board.size())
        .filter(|&tile| {
            board.terrain(tile) == Terrain::Empty
                && !board.is_city(tile)
                && reach.contains(tile)
                && !queue.targets(tile)
        })
        .max_by_key(|&tile| {
            (
                board.is_swamp(tile),
                manhattan(general, tile, board.width()),
                std::cmp::Reverse(tile),
            )
        })
        .map(|target| {
            Conquest::new(general, target)
                .with_min_army(explore_army)
                .with_half_army()
        })
}
