//! Authoritative match state and the rules that advance it.

use std::collections::BTreeSet;

use crate::board::{PlayerIndex, Terrain, neighbors};
use crate::protocol::Command;

/// Turns between the land bonus that grows every owned tile.
pub const LAND_BONUS_PERIOD: u32 = 25;

/// What one player can see: the wire sequences a server would send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Flat map `[width, height, armies.., terrain..]` with fog applied.
    pub map: Vec<i32>,
    /// Visible city tiles, ascending.
    pub cities: Vec<i32>,
    /// Visible general tile per player, `-1` otherwise.
    pub generals: Vec<i32>,
}

/// Full, unfogged state of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: usize,
    height: usize,
    armies: Vec<u32>,
    terrain: Vec<Terrain>,
    cities: BTreeSet<usize>,
    swamps: BTreeSet<usize>,
    generals: Vec<Option<usize>>,
    turn: u32,
}

impl World {
    /// An empty world with no players.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            armies: vec![0; size],
            terrain: vec![Terrain::Empty; size],
            cities: BTreeSet::new(),
            swamps: BTreeSet::new(),
            generals: Vec::new(),
            turn: 0,
        }
    }

    /// Overwrite one tile. Out-of-range tiles are ignored.
    pub fn set_tile(&mut self, tile: usize, terrain: Terrain, army: u32) {
        if tile < self.size() {
            self.terrain[tile] = terrain;
            self.armies[tile] = army;
        }
    }

    /// Mark a tile as a city.
    pub fn add_city(&mut self, tile: usize) {
        if tile < self.size() {
            self.cities.insert(tile);
        }
    }

    /// Mark a tile as a swamp.
    pub fn add_swamp(&mut self, tile: usize) {
        if tile < self.size() {
            self.swamps.insert(tile);
        }
    }

    /// Seat a new player with its general on `tile` and return its index.
    pub fn add_general(&mut self, tile: usize, army: u32) -> PlayerIndex {
        let player = self.generals.len();
        self.set_tile(tile, Terrain::Owned(player), army);
        self.generals.push(Some(tile));
        player
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

    /// Turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Number of seated players, alive or not.
    #[must_use]
    pub fn players(&self) -> usize {
        self.generals.len()
    }

    /// Terrain of `tile`; mountain when out of range.
    #[must_use]
    pub fn terrain(&self, tile: usize) -> Terrain {
        self.terrain.get(tile).copied().unwrap_or(Terrain::Mountain)
    }

    /// Army on `tile`; zero when out of range.
    #[must_use]
    pub fn army(&self, tile: usize) -> u32 {
        self.armies.get(tile).copied().unwrap_or(0)
    }

    /// City tiles.
    #[must_use]
    pub const fn cities(&self) -> &BTreeSet<usize> {
        &self.cities
    }

    /// Swamp tiles.
    #[must_use]
    pub const fn swamps(&self) -> &BTreeSet<usize> {
        &self.swamps
    }

    /// General tile of `player` while it is alive.
    #[must_use]
    pub fn general_of(&self, player: PlayerIndex) -> Option<usize> {
        self.generals.get(player).copied().flatten()
    }

    /// Whether `player` still holds its general.
    #[must_use]
    pub fn is_alive(&self, player: PlayerIndex) -> bool {
        self.general_of(player).is_some()
    }

    /// Players still in the match.
    pub fn alive(&self) -> impl Iterator<Item = PlayerIndex> + '_ {
        (0..self.players()).filter(|&p| self.is_alive(p))
    }

    /// Tiles owned by `player`.
    #[must_use]
    pub fn land(&self, player: PlayerIndex) -> usize {
        self.terrain
            .iter()
            .filter(|t| t.is_owned_by(player))
            .count()
    }

    /// Total army of `player`.
    #[must_use]
    pub fn total_army(&self, player: PlayerIndex) -> u64 {
        self.terrain
            .iter()
            .zip(&self.armies)
            .filter(|(t, _)| t.is_owned_by(player))
            .map(|(_, &a)| u64::from(a))
            .sum()
    }

    /// Execute one command for `player`.
    ///
    /// Returns `false` and changes nothing if the command is not legal: the
    /// source must be owned by `player`, the target adjacent and passable,
    /// and at least one unit must move.
    pub fn apply(&mut self, player: PlayerIndex, command: Command) -> bool {
        let Command { from, to, half } = command;
        if !self.is_alive(player) || from >= self.size() || to >= self.size() {
            return false;
        }
        if !self.terrain[from].is_owned_by(player)
            || !self.terrain[to].is_passable()
            || !neighbors(from, self.width, self.height)
                .iter()
                .any(|adj| adj == to)
        {
            return false;
        }

        let available = self.armies[from];
        let moving = if half {
            available / 2
        } else {
            available.saturating_sub(1)
        };
        if moving == 0 {
            return false;
        }
        self.armies[from] -= moving;

        let defender = self.terrain[to];
        if defender.is_owned_by(player) {
            self.armies[to] += moving;
            return true;
        }

        let garrison = self.armies[to];
        if moving > garrison {
            self.armies[to] = moving - garrison;
            self.terrain[to] = Terrain::Owned(player);
            if let Terrain::Owned(loser) = defender
                && self.general_of(loser) == Some(to)
            {
                self.eliminate(loser, player);
            }
        } else {
            self.armies[to] = garrison - moving;
        }
        true
    }

    /// Hand every tile of `loser` to `winner` at half strength. The fallen
    /// general becomes a city.
    fn eliminate(&mut self, loser: PlayerIndex, winner: PlayerIndex) {
        if let Some(general) = self.generals.get_mut(loser).and_then(Option::take) {
            self.cities.insert(general);
        }
        for (terrain, army) in self.terrain.iter_mut().zip(&mut self.armies) {
            if terrain.is_owned_by(loser) {
                *terrain = Terrain::Owned(winner);
                *army = army.div_ceil(2);
            }
        }
        tracing::debug!(turn = self.turn, loser, winner, "player eliminated");
    }

    /// End the turn: grow generals and owned cities, pay the periodic land
    /// bonus, and drain owned swamps.
    pub fn advance(&mut self) {
        self.turn += 1;
        let bonus = self.turn % LAND_BONUS_PERIOD == 0;

        for tile in 0..self.size() {
            let Terrain::Owned(_) = self.terrain[tile] else {
                continue;
            };
            let producer = self.cities.contains(&tile) || self.generals.contains(&Some(tile));
            if producer {
                self.armies[tile] += 1;
            }
            if bonus {
                self.armies[tile] += 1;
            }
            if self.swamps.contains(&tile) {
                self.armies[tile] = self.armies[tile].saturating_sub(1);
                if self.armies[tile] == 0 {
                    self.terrain[tile] = Terrain::Empty;
                }
            }
        }
    }

    /// Tiles `player` can see: its own land and the eight tiles around it.
    #[must_use]
    pub fn visibility(&self, player: PlayerIndex) -> Vec<bool> {
        let mut seen = vec![false; self.size()];
        for tile in (0..self.size()).filter(|&t| self.terrain[t].is_owned_by(player)) {
            let (x, y) = (tile % self.width, tile / self.width);
            for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                    seen[ny * self.width + nx] = true;
                }
            }
        }
        seen
    }

    /// The board as `player` sees it.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn view(&self, player: PlayerIndex) -> View {
        let seen = self.visibility(player);
        let size = self.size();

        let mut map = Vec::with_capacity(2 + 2 * size);
        map.push(self.width as i32);
        map.push(self.height as i32);
        map.extend((0..size).map(|t| if seen[t] { self.armies[t] as i32 } else { 0 }));
        map.extend((0..size).map(|t| {
            if seen[t] {
                self.terrain[t].code()
            } else if self.terrain[t] == Terrain::Mountain || self.cities.contains(&t) {
                Terrain::FOG_OBSTACLE
            } else {
                Terrain::FOG
            }
        }));

        let cities = self
            .cities
            .iter()
            .filter(|&&c| seen[c])
            .map(|&c| c as i32)
            .collect();
        let generals = self
            .generals
            .iter()
            .map(|g| g.filter(|&g| seen[g]).map_or(-1, |g| g as i32))
            .collect();

        View {
            map,
            cities,
            generals,
        }
    }
}
