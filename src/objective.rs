//! Objectives: standing goals evaluated once per tick.
//!
//! Each objective is one case of [`Objective`] and shares a single contract:
//! given the current board, produce a move, ask to be kept for later, or
//! report that it has nothing left to do.
//!
//! - [`Expand`]: greedy capture of adjacent tiles, stateless
//! - [`Collect`]: funnel the largest idle army toward a fixed tile
//! - [`Conquest`]: drive an army from a source to a contested target
//! - [`Move`]: the bare routed move the other two build on

mod collect;
mod conquest;
mod discovery;
mod expand;
mod queue;

use std::fmt;

use rand_chacha::ChaCha8Rng;

use crate::board::{Board, PlayerIndex};
use crate::config::EngineConfig;
use crate::protocol::Command;
use crate::router::{Move, Step};

pub use collect::Collect;
pub use conquest::Conquest;
pub use discovery::{Reach, find_conquest, find_exploration};
pub use expand::Expand;
pub use queue::{ObjectiveId, ObjectiveQueue, Slot, TailKind};

/// What an objective did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Issue this command and end the tick.
    Move(Command),
    /// Nothing to do yet; keep the objective.
    Wait,
    /// Done, either achieved or impossible; discard the objective.
    Finished,
}

/// Everything an objective may read while executing.
#[derive(Debug)]
pub struct Context<'a> {
    /// Board for the current tick.
    pub board: &'a Board,
    /// The acting player.
    pub me: PlayerIndex,
    /// Engine thresholds.
    pub config: &'a EngineConfig,
    /// Session RNG for tie-break shuffles.
    pub rng: &'a mut ChaCha8Rng,
}

/// A standing goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    /// Capture whatever is adjacent and cheap.
    Expand(Expand),
    /// Gather armies on a tile.
    Collect(Collect),
    /// Take a specific tile.
    Conquest(Conquest),
    /// Follow a routed path.
    Move(Move),
}

impl Objective {
    /// Run one evaluation.
    pub fn exec(&mut self, ctx: &mut Context<'_>) -> Outcome {
        match self {
            Self::Expand(expand) => expand.exec(ctx),
            Self::Collect(collect) => collect.exec(ctx),
            Self::Conquest(conquest) => conquest.exec(ctx),
            Self::Move(route) => match route.step(ctx.board, ctx.me, ctx.config.flood_ceiling) {
                Step::Advance(command) => Outcome::Move(command),
                Step::Arrived | Step::NoPath => Outcome::Finished,
            },
        }
    }

    /// Tile this objective is trying to reach, if it has one.
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        match self {
            Self::Expand(_) => None,
            Self::Collect(collect) => Some(collect.target()),
            Self::Conquest(conquest) => Some(conquest.target()),
            Self::Move(route) => Some(route.target()),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expand(_) => write!(f, "Expand"),
            Self::Collect(collect) => write!(f, "Collect({})", collect.target()),
            Self::Conquest(conquest) => {
                write!(f, "Conquest({} -> {})", conquest.source(), conquest.target())
            }
            Self::Move(route) => write!(f, "Move({} -> {})", route.source(), route.target()),
        }
    }
}

impl From<Expand> for Objective {
    fn from(expand: Expand) -> Self {
        Self::Expand(expand)
    }
}

impl From<Collect> for Objective {
    fn from(collect: Collect) -> Self {
        Self::Collect(collect)
    }
}

impl From<Conquest> for Objective {
    fn from(conquest: Conquest) -> Self {
        Self::Conquest(conquest)
    }
}

impl From<Move> for Objective {
    fn from(route: Move) -> Self {
        Self::Move(route)
    }
}
