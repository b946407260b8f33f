//! Deterministic map generation for arena matches.

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::arena::{ArenaConfig, ArenaError, World};
use crate::board::{Terrain, manhattan, neighbors};

/// Army a general starts with.
const START_ARMY: u32 = 1;

/// Garrison range of neutral cities.
const CITY_GARRISON: std::ops::RangeInclusive<u32> = 40..=50;

/// Generate a world for `config.players` players.
///
/// Mountains are scattered first, then generals are spread out by
/// farthest-point placement, then neutral cities and swamps fill the
/// remaining empty tiles. Tiles around each general are kept clear.
///
/// # Errors
///
/// Returns [`ArenaError::Crowded`] if the map has too few open tiles for
/// the generals, cities and swamps requested.
pub fn generate(seed: u64, config: &ArenaConfig) -> Result<World, ArenaError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (width, height) = (config.width, config.height);
    let mut world = World::new(width, height);

    for tile in 0..world.size() {
        if rng.gen_range(0..100) < u32::from(config.mountain_percent) {
            world.set_tile(tile, Terrain::Mountain, 0);
        }
    }

    let open: Vec<usize> = (0..world.size())
        .filter(|&t| world.terrain(t) == Terrain::Empty)
        .collect();
    let generals = place_generals(&open, config.players, width, &mut rng)?;
    for &tile in &generals {
        world.add_general(tile, START_ARMY);
        for adj in neighbors(tile, width, height).iter() {
            if world.terrain(adj) == Terrain::Mountain {
                world.set_tile(adj, Terrain::Empty, 0);
            }
        }
    }

    let reserved = |tile: usize| {
        generals
            .iter()
            .any(|&g| g == tile || manhattan(g, tile, width) <= 1)
    };
    let mut free: Vec<usize> = (0..world.size())
        .filter(|&t| world.terrain(t) == Terrain::Empty && !reserved(t))
        .collect();
    let wanted = config.cities + config.swamps;
    if free.len() < wanted {
        return Err(ArenaError::Crowded {
            needed: wanted,
            available: free.len(),
        });
    }
    free.shuffle(&mut rng);

    let (cities, rest) = free.split_at(config.cities);
    for &tile in cities {
        world.set_tile(tile, Terrain::Empty, rng.gen_range(CITY_GARRISON));
        world.add_city(tile);
    }
    for &tile in &rest[..config.swamps] {
        world.add_swamp(tile);
    }

    Ok(world)
}

/// Pick a random first tile, then repeatedly the open tile farthest from
/// every general placed so far.
fn place_generals(
    open: &[usize],
    players: usize,
    width: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<usize>, ArenaError> {
    if open.len() < players {
        return Err(ArenaError::Crowded {
            needed: players,
            available: open.len(),
        });
    }

    let mut placed = Vec::with_capacity(players);
    if let Some(&first) = open.choose(rng) {
        placed.push(first);
    }
    while placed.len() < players {
        let next = open
            .iter()
            .copied()
            .filter(|t| !placed.contains(t))
            .max_by_key(|&t| {
                let spread = placed
                    .iter()
                    .map(|&g| manhattan(g, t, width))
                    .min()
                    .unwrap_or(0);
                (spread, std::cmp::Reverse(t))
            });
        match next {
            Some(tile) => placed.push(tile),
            None => break,
        }
    }

    Ok(placed)
}
