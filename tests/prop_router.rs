//! Property-based tests for the router.
//!
//! Random ownership masks on a 5x5 grid are checked against a plain BFS.
//! Run with: cargo test --release prop_router

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;

use proptest::prelude::*;

use vanguard::board::neighbors;
use vanguard::router::{Move, Step, plan};
use vanguard::{Board, Command, Terrain};

const SIDE: usize = 5;
const CEILING: usize = 256;

fn board_from_mask(mask: u32) -> Board {
    (0..SIDE * SIDE)
        .filter(|t| mask & (1 << t) != 0)
        .fold(Board::blank(SIDE, SIDE).unwrap(), |b, t| {
            b.with_tile(t, Terrain::Owned(0), 3)
        })
}

/// Hop distance from `source` to `target` when every intermediate tile is
/// owned by player 0.
fn bfs_distance(board: &Board, source: usize, target: usize) -> Option<usize> {
    let mut dist = vec![None; board.size()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(tile) = queue.pop_front() {
        let d = dist[tile].unwrap();
        if tile == target {
            return Some(d);
        }
        for adj in neighbors(tile, SIDE, SIDE).iter() {
            let enterable = adj == target || board.terrain(adj).is_owned_by(0);
            if enterable && dist[adj].is_none() {
                dist[adj] = Some(d + 1);
                queue.push_back(adj);
            }
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(3000))]

    /// Planned paths are exactly as long as the BFS distance and exist
    /// whenever BFS finds one.
    #[test]
    fn prop_path_length_matches_bfs(
        mask in any::<u32>(),
        source in 0..SIDE * SIDE,
        target in 0..SIDE * SIDE,
    ) {
        prop_assume!(source != target);
        let board = board_from_mask(mask | (1 << source));

        let expected = bfs_distance(&board, source, target);
        let path = plan(&board, source, target, 0, CEILING);
        prop_assert_eq!(path.as_ref().map(|p| p.len() - 1), expected);

        if let Some(path) = path {
            prop_assert_eq!(path[0], source);
            prop_assert_eq!(*path.last().unwrap(), target);
            for pair in path.windows(2) {
                prop_assert!(neighbors(pair[0], SIDE, SIDE).iter().any(|t| t == pair[1]));
            }
            for &tile in &path[..path.len() - 1] {
                prop_assert!(board.terrain(tile).is_owned_by(0));
            }
        }
    }

    /// A move yields exactly one advance per edge, then arrives for good.
    #[test]
    fn prop_move_advances_once_per_edge(
        mask in any::<u32>(),
        source in 0..SIDE * SIDE,
        target in 0..SIDE * SIDE,
    ) {
        prop_assume!(source != target);
        let board = board_from_mask(mask | (1 << source));
        let Some(path) = plan(&board, source, target, 0, CEILING) else {
            return Ok(());
        };

        let mut route = Move::new(source, target);
        for pair in path.windows(2) {
            prop_assert_eq!(
                route.step(&board, 0, CEILING),
                Step::Advance(Command::new(pair[0], pair[1]))
            );
        }
        prop_assert_eq!(route.step(&board, 0, CEILING), Step::Arrived);
        prop_assert_eq!(route.step(&board, 0, CEILING), Step::Arrived);
    }
}

#[test]
fn gap_gives_no_path_until_invalidated() {
    // Column 2 unowned: the two halves cannot reach each other
    let split: u32 = (0..25u32).filter(|t| t % 5 != 2).map(|t| 1u32 << t).sum();
    let board = board_from_mask(split);

    let mut route = Move::new(0, 4);
    assert_eq!(route.step(&board, 0, CEILING), Step::NoPath);
    assert_eq!(route.step(&board, 0, CEILING), Step::NoPath);

    // Bridging the gap is not noticed until the cache is dropped
    let bridged = board.with_tile(2, Terrain::Owned(0), 3);
    assert_eq!(route.step(&bridged, 0, CEILING), Step::NoPath);
    route.invalidate();
    assert_eq!(
        route.step(&bridged, 0, CEILING),
        Step::Advance(Command::new(0, 1))
    );
}

#[test]
fn stale_path_is_followed_after_territory_changes() {
    let board = board_from_mask(0b11111);
    let mut route = Move::new(0, 4);
    assert_eq!(
        route.step(&board, 0, CEILING),
        Step::Advance(Command::new(0, 1))
    );

    // Tile 2 is lost; the cached path still goes through it
    let lost = board.with_tile(2, Terrain::Owned(1), 9);
    assert_eq!(
        route.step(&lost, 0, CEILING),
        Step::Advance(Command::new(1, 2))
    );
    assert_eq!(route.remaining().map(VecDeque::len), Some(3));
}
