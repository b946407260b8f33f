//! Error types for decoding, board construction and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// A diff stream that cannot be applied to the running sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A copy or replace count was negative.
    #[error("negative run length {count} at diff offset {offset}")]
    NegativeCount {
        /// Offset of the count field in the diff.
        offset: usize,
        /// The offending value.
        count: i32,
    },
    /// A copy run reaches past the end of the previous sequence.
    #[error("copy of {count} at output {position} overruns previous sequence of {available}")]
    CopyOverrun {
        /// Output length when the run started.
        position: usize,
        /// Requested run length.
        count: usize,
        /// Length of the previous sequence.
        available: usize,
    },
    /// A replace run reaches past the end of the diff itself.
    #[error("replace of {count} at diff offset {offset} overruns diff of {available}")]
    ReplaceOverrun {
        /// Offset of the count field in the diff.
        offset: usize,
        /// Requested run length.
        count: usize,
        /// Length of the diff.
        available: usize,
    },
}

/// A decoded map sequence that does not describe a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The sequence is too short to hold its own header.
    #[error("map sequence of {len} entries has no dimension header")]
    MissingHeader {
        /// Length of the sequence.
        len: usize,
    },
    /// Width or height is not a positive number.
    #[error("invalid board dimensions {width}x{height}")]
    BadDimensions {
        /// Declared width.
        width: i32,
        /// Declared height.
        height: i32,
    },
    /// The sequence length disagrees with its dimensions.
    #[error("map sequence has {actual} entries, expected {expected}")]
    Truncated {
        /// Entries required by the header.
        expected: usize,
        /// Entries present.
        actual: usize,
    },
    /// A terrain code outside the known set.
    #[error("unknown terrain code {code} at tile {tile}")]
    UnknownTerrain {
        /// Tile index.
        tile: usize,
        /// Raw code.
        code: i32,
    },
    /// A negative army count.
    #[error("negative army {army} at tile {tile}")]
    NegativeArmy {
        /// Tile index.
        tile: usize,
        /// Raw count.
        army: i32,
    },
}

/// Failure of a single tick. The session keeps its previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TickError {
    /// The map diff could not be applied.
    #[error("map diff: {0}")]
    MapDiff(#[source] DecodeError),
    /// The cities diff could not be applied.
    #[error("cities diff: {0}")]
    CitiesDiff(#[source] DecodeError),
    /// The patched map is not a valid board.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The generals array has no entry for the acting player.
    #[error("no general entry for player {0}")]
    UnknownGeneral(usize),
}

/// Invalid or unreadable engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The JSON did not parse.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for tick processing.
pub type TickResult<T> = Result<T, TickError>;
