//! Per-tick board snapshot.

use std::collections::BTreeSet;

use crate::board::{Neighbors, PlayerIndex, Terrain, neighbors};
use crate::error::BoardError;

/// Immutable view of the visible board for one tick.
///
/// Built from the flat map sequence `[width, height, armies.., terrain..]`
/// plus the city, general and swamp channels. Objectives only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    armies: Vec<u32>,
    terrain: Vec<Terrain>,
    cities: BTreeSet<usize>,
    generals: Vec<Option<usize>>,
    swamps: BTreeSet<usize>,
    turn: u32,
}

impl Board {
    /// Parse a flat map sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the header is missing, the dimensions are
    /// not positive, the length disagrees with the dimensions, or a tile
    /// carries an unknown terrain code or a negative army.
    pub fn from_flat(map: &[i32], turn: u32) -> Result<Self, BoardError> {
        let [width, height] = match map {
            [w, h, ..] => [*w, *h],
            _ => return Err(BoardError::MissingHeader { len: map.len() }),
        };
        let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(BoardError::BadDimensions { width, height });
        };
        if w == 0 || h == 0 {
            return Err(BoardError::BadDimensions { width, height });
        }

        let size = w * h;
        let expected = 2 + 2 * size;
        if map.len() != expected {
            return Err(BoardError::Truncated {
                expected,
                actual: map.len(),
            });
        }

        let armies = map[2..2 + size]
            .iter()
            .enumerate()
            .map(|(tile, &army)| {
                u32::try_from(army).map_err(|_| BoardError::NegativeArmy { tile, army })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let terrain = map[2 + size..]
            .iter()
            .enumerate()
            .map(|(tile, &code)| {
                Terrain::from_code(code).ok_or(BoardError::UnknownTerrain { tile, code })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            width: w,
            height: h,
            armies,
            terrain,
            cities: BTreeSet::new(),
            generals: Vec::new(),
            swamps: BTreeSet::new(),
            turn,
        })
    }

    /// An all-empty board with no armies.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BadDimensions`] if either dimension is zero.
    pub fn blank(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::BadDimensions {
                width: i32::try_from(width).unwrap_or(i32::MAX),
                height: i32::try_from(height).unwrap_or(i32::MAX),
            });
        }
        let size = width * height;
        Ok(Self {
            width,
            height,
            armies: vec![0; size],
            terrain: vec![Terrain::Empty; size],
            cities: BTreeSet::new(),
            generals: Vec::new(),
            swamps: BTreeSet::new(),
            turn: 0,
        })
    }

    /// Set one tile. Out-of-range tiles are ignored.
    #[must_use]
    pub fn with_tile(mut self, tile: usize, terrain: Terrain, army: u32) -> Self {
        if tile < self.size() {
            self.terrain[tile] = terrain;
            self.armies[tile] = army;
        }
        self
    }

    /// Attach the known city set. Out-of-range indices are dropped.
    #[must_use]
    pub fn with_cities(mut self, cities: impl IntoIterator<Item = usize>) -> Self {
        let size = self.size();
        self.cities = cities.into_iter().filter(|&c| c < size).collect();
        self
    }

    /// Attach the wire generals array (`-1` for undiscovered).
    #[must_use]
    pub fn with_generals(mut self, generals: &[i32]) -> Self {
        let size = self.size();
        self.generals = generals
            .iter()
            .map(|&g| usize::try_from(g).ok().filter(|&g| g < size))
            .collect();
        self
    }

    /// Attach the swamp set. Out-of-range indices are dropped.
    #[must_use]
    pub fn with_swamps(mut self, swamps: impl IntoIterator<Item = usize>) -> Self {
        let size = self.size();
        self.swamps = swamps.into_iter().filter(|&s| s < size).collect();
        self
    }

    /// Set the turn counter.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.width * self.height
    }

    /// Turn this snapshot describes.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Terrain of a tile. Tiles outside the board read as mountains.
    #[must_use]
    #[inline]
    pub fn terrain(&self, tile: usize) -> Terrain {
        self.terrain.get(tile).copied().unwrap_or(Terrain::Mountain)
    }

    /// Army on a tile, zero outside the board.
    #[must_use]
    #[inline]
    pub fn army(&self, tile: usize) -> u32 {
        self.armies.get(tile).copied().unwrap_or(0)
    }

    /// Raw army counts in row-major order.
    #[must_use]
    pub fn armies(&self) -> &[u32] {
        &self.armies
    }

    /// Whether the tile is a known city.
    #[must_use]
    pub fn is_city(&self, tile: usize) -> bool {
        self.cities.contains(&tile)
    }

    /// Known cities.
    #[must_use]
    pub const fn cities(&self) -> &BTreeSet<usize> {
        &self.cities
    }

    /// Whether the tile is a swamp.
    #[must_use]
    pub fn is_swamp(&self, tile: usize) -> bool {
        self.swamps.contains(&tile)
    }

    /// Swamp tiles.
    #[must_use]
    pub const fn swamps(&self) -> &BTreeSet<usize> {
        &self.swamps
    }

    /// Location of a player's general, if discovered.
    #[must_use]
    pub fn general_of(&self, player: PlayerIndex) -> Option<usize> {
        self.generals.get(player).copied().flatten()
    }

    /// Player whose general stands on `tile`, if any.
    #[must_use]
    pub fn general_at(&self, tile: usize) -> Option<PlayerIndex> {
        self.generals.iter().position(|&g| g == Some(tile))
    }

    /// Orthogonal neighbours of a tile (right, left, up, down).
    #[must_use]
    #[inline]
    pub fn neighbors(&self, tile: usize) -> Neighbors {
        neighbors(tile, self.width, self.height)
    }

    /// Tiles owned by `player`, in index order.
    pub fn owned_by(&self, player: PlayerIndex) -> impl Iterator<Item = usize> + '_ {
        self.terrain
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_owned_by(player))
            .map(|(tile, _)| tile)
    }

    /// Flatten back to the wire layout.
    #[must_use]
    pub fn to_flat(&self) -> Vec<i32> {
        let mut flat = Vec::with_capacity(2 + 2 * self.size());
        flat.push(i32::try_from(self.width).unwrap_or(i32::MAX));
        flat.push(i32::try_from(self.height).unwrap_or(i32::MAX));
        flat.extend(
            self.armies
                .iter()
                .map(|&a| i32::try_from(a).unwrap_or(i32::MAX)),
        );
        flat.extend(self.terrain.iter().map(|t| t.code()));
        flat
    }
}
