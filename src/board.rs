//! Board model for the decision engine.
//!
//! Wraps the decoded flat map sequence in a typed, read-only view:
//! - Grid dimensions and 4-neighbour adjacency
//! - Terrain classification per tile (empty, mountain, fog, owned)
//! - Army counts, cities, generals and swamps

mod grid;
mod snapshot;
mod terrain;

pub use grid::{Neighbors, manhattan, neighbors};
pub use snapshot::Board;
pub use terrain::{PlayerIndex, Terrain};
