//! Greedy frontier expansion.

use rand::seq::SliceRandom;

use crate::board::{Board, PlayerIndex, Terrain};
use crate::objective::{Context, Outcome};
use crate::protocol::Command;

/// Capture an adjacent tile, trying four tiers in order:
///
/// 1. an enemy general the source can overwhelm
/// 2. an enemy or garrisoned tile the source can overwhelm
/// 3. an empty, ungarrisoned tile
/// 4. a swamp, only from swamp tiles or very large armies
///
/// Holds no state between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expand;

impl Expand {
    /// Pick the first capture of the highest tier available.
    pub fn exec(self, ctx: &mut Context<'_>) -> Outcome {
        let board = ctx.board;
        let me = ctx.me;

        let found = first_capture(board, me, |src, adj| {
            board.general_at(adj).is_some_and(|owner| owner != me) && overwhelms(board, src, adj)
        })
        .or_else(|| {
            first_capture(board, me, |src, adj| {
                let terrain = board.terrain(adj);
                terrain.is_visible()
                    && !board.is_swamp(adj)
                    && (terrain.is_enemy_of(me) || board.army(adj) != 0)
                    && overwhelms(board, src, adj)
            })
        })
        .or_else(|| {
            first_capture(board, me, |_, adj| {
                board.terrain(adj) == Terrain::Empty
                    && board.army(adj) == 0
                    && !board.is_swamp(adj)
            })
        })
        .or_else(|| swamp_capture(ctx));

        found.map_or(Outcome::Finished, Outcome::Move)
    }
}

/// Source army beats the target garrison with at least one to spare.
fn overwhelms(board: &Board, src: usize, adj: usize) -> bool {
    board.army(src) > board.army(adj) + 1
}

/// Owned tiles that can send an army, in index order.
fn sources(board: &Board, me: PlayerIndex) -> impl Iterator<Item = usize> + '_ {
    board.owned_by(me).filter(move |&tile| board.army(tile) > 1)
}

/// Whether `adj` is something a move can enter and take.
fn enterable(board: &Board, me: PlayerIndex, adj: usize) -> bool {
    let terrain = board.terrain(adj);
    terrain.is_passable() && !terrain.is_owned_by(me)
}

fn first_capture(
    board: &Board,
    me: PlayerIndex,
    accept: impl Fn(usize, usize) -> bool,
) -> Option<Command> {
    sources(board, me).find_map(|src| {
        board
            .neighbors(src)
            .iter()
            .find(|&adj| enterable(board, me, adj) && accept(src, adj))
            .map(|adj| Command::new(src, adj))
    })
}

fn swamp_capture(ctx: &mut Context<'_>) -> Option<Command> {
    let board = ctx.board;
    let me = ctx.me;

    for src in sources(board, me) {
        if !board.is_swamp(src) && board.army(src) < ctx.config.swamp_army {
            continue;
        }
        let mut adjacent = board.neighbors(src).as_slice().to_vec();
        adjacent.shuffle(ctx.rng);
        if let Some(adj) = adjacent.into_iter().find(|&adj| {
            enterable(board, me, adj) && board.is_swamp(adj) && overwhelms(board, src, adj)
        }) {
            return Some(Command::new(src, adj));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(board: &Board, config: &EngineConfig) -> Outcome {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = Context {
            board,
            me: 0,
            config,
            rng: &mut rng,
        };
        Expand.exec(&mut ctx)
    }

    #[test]
    fn test_prefers_enemy_over_empty() {
        // 3x1: empty | mine(10) | enemy(3)
        let board = Board::blank(3, 1)
            .unwrap()
            .with_tile(1, Terrain::Owned(0), 10)
            .with_tile(2, Terrain::Owned(1), 3);
        assert_eq!(
            run(&board, &EngineConfig::default()),
            Outcome::Move(Command::new(1, 2))
        );

        // Enemy on the left this time, so enumeration order alone cannot pick it
        let board = Board::blank(3, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(1), 3)
            .with_tile(1, Terrain::Owned(0), 10);
        assert_eq!(
            run(&board, &EngineConfig::default()),
            Outcome::Move(Command::new(1, 0))
        );
    }

    #[test]
    fn test_general_outranks_other_captures() {
        // Tile 0 has a cheap enemy tile; tile 4 sits next to the enemy general
        let board = Board::blank(3, 3)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 9)
            .with_tile(1, Terrain::Owned(1), 1)
            .with_tile(4, Terrain::Owned(0), 9)
            .with_tile(7, Terrain::Owned(1), 5)
            .with_generals(&[0, 7]);
        assert_eq!(
            run(&board, &EngineConfig::default()),
            Outcome::Move(Command::new(4, 7))
        );
    }

    #[test]
    fn test_skips_unbeatable_enemy() {
        // Enemy too strong, fall through to the empty tile
        let board = Board::blank(3, 1)
            .unwrap()
            .with_tile(0, Terrain::Empty, 0)
            .with_tile(1, Terrain::Owned(0), 5)
            .with_tile(2, Terrain::Owned(1), 4);
        assert_eq!(
            run(&board, &EngineConfig::default()),
            Outcome::Move(Command::new(1, 0))
        );
    }

    #[test]
    fn test_never_enters_mountain() {
        let board = Board::blank(2, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 50)
            .with_tile(1, Terrain::Mountain, 0);
        assert_eq!(run(&board, &EngineConfig::default()), Outcome::Finished);
    }

    #[test]
    fn test_single_army_cannot_move() {
        let board = Board::blank(2, 1).unwrap().with_tile(0, Terrain::Owned(0), 1);
        assert_eq!(run(&board, &EngineConfig::default()), Outcome::Finished);
    }

    #[test]
    fn test_swamp_needs_large_army() {
        let small = Board::blank(2, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 10)
            .with_swamps([1]);
        assert_eq!(run(&small, &EngineConfig::default()), Outcome::Finished);

        let large = Board::blank(2, 1)
            .unwrap()
            .with_tile(0, Terrain::Owned(0), 60)
            .with_swamps([1]);
        assert_eq!(
            run(&large, &EngineConfig::default()),
            Outcome::Move(Command::new(0, 1))
        );
    }

    #[test]
    fn test_swamp_to_swamp() {
        let board = Board::blank(3, 1)
            .unwrap()
            .with_tile(1, Terrain::Owned(0), 4)
            .with_swamps([0, 1, 2]);
        let Outcome::Move(command) = run(&board, &EngineConfig::default()) else {
            panic!("expected a swamp move");
        };
        assert_eq!(command.from, 1);
        assert!(command.to == 0 || command.to == 2);
    }
}
