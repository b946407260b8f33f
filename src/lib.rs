// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Vanguard: an objective-driven decision engine for fog-of-war territory
//! games played on a tile grid (generals.io rules).
//!
//! Each tick the engine receives run-length diffs of the visible board,
//! rebuilds the full state, and emits at most one troop movement.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Session (tick coordinator)        │
//! ├─────────────────────────────────────┤
//! │   Engine: discovery, priority,      │
//! │   objectives (Expand/Collect/...)   │
//! ├─────────────────────────────────────┤
//! │   Router        │   Board model     │
//! ├─────────────────────────────────────┤
//! │   Diff decoder                      │
//! └─────────────────────────────────────┘
//! ```
//!
//! The [`arena`] module plays engines against each other offline.

pub mod arena;
pub mod board;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod events;
pub mod objective;
pub mod protocol;
pub mod router;
pub mod session;

pub use board::{Board, PlayerIndex, Terrain};
pub use config::EngineConfig;
pub use error::{BoardError, ConfigError, DecodeError, TickError, TickResult};
pub use events::{EngineEvent, EventSink, TracingSink};
pub use protocol::{Command, TickEvent};
pub use session::Session;
