//! Terrain codes as sent on the wire.

/// Index of a player in the generals array.
pub type PlayerIndex = usize;

/// Classification of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    /// Unclaimed, passable tile.
    Empty,
    /// Impassable tile.
    Mountain,
    /// Tile hidden by fog of war.
    Fog,
    /// Hidden tile known to block movement (mountain or city under fog).
    FogObstacle,
    /// Tile owned by the given player.
    Owned(PlayerIndex),
}

impl Terrain {
    /// Wire code for [`Terrain::Empty`].
    pub const EMPTY: i32 = -1;
    /// Wire code for [`Terrain::Mountain`].
    pub const MOUNTAIN: i32 = -2;
    /// Wire code for [`Terrain::Fog`].
    pub const FOG: i32 = -3;
    /// Wire code for [`Terrain::FogObstacle`].
    pub const FOG_OBSTACLE: i32 = -4;

    /// Decode a wire code. Returns `None` for unknown negative codes.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::EMPTY => Some(Self::Empty),
            Self::MOUNTAIN => Some(Self::Mountain),
            Self::FOG => Some(Self::Fog),
            Self::FOG_OBSTACLE => Some(Self::FogObstacle),
            owner => usize::try_from(owner).ok().map(Self::Owned),
        }
    }

    /// Encode back to the wire code.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn code(self) -> i32 {
        match self {
            Self::Empty => Self::EMPTY,
            Self::Mountain => Self::MOUNTAIN,
            Self::Fog => Self::FOG,
            Self::FogObstacle => Self::FOG_OBSTACLE,
            Self::Owned(player) => player as i32,
        }
    }

    /// Whether the tile belongs to `player`.
    #[must_use]
    #[inline]
    pub const fn is_owned_by(self, player: PlayerIndex) -> bool {
        matches!(self, Self::Owned(owner) if owner == player)
    }

    /// Whether the tile belongs to any player other than `player`.
    #[must_use]
    pub const fn is_enemy_of(self, player: PlayerIndex) -> bool {
        matches!(self, Self::Owned(owner) if owner != player)
    }

    /// Whether armies can ever enter this tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Mountain | Self::FogObstacle)
    }

    /// Whether the tile is currently visible.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Fog | Self::FogObstacle)
    }
}
