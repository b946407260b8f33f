//! Taking a specific tile.

use crate::objective::{Context, Outcome};
use crate::protocol::Command;
use crate::router::{Move, Step};

/// Drive an army from `source` to `target` until the target is ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conquest {
    source: usize,
    target: usize,
    min_army: Option<u32>,
    half_army: bool,
    launched: bool,
    route: Move,
}

impl Conquest {
    /// Conquer `target` with the army on `source`.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            min_army: None,
            half_army: false,
            launched: false,
            route: Move::new(source, target),
        }
    }

    /// Hold the first step until `source` has at least `min_army` and
    /// outnumbers the target garrison.
    #[must_use]
    pub fn with_min_army(mut self, min_army: u32) -> Self {
        self.min_army = Some(min_army);
        self
    }

    /// Send only half of the source army on the first step, when half is
    /// still enough to take the target.
    #[must_use]
    pub fn with_half_army(mut self) -> Self {
        self.half_army = true;
        self
    }

    /// Tile the army starts from.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Tile to conquer.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Whether the first step has been issued.
    #[must_use]
    pub const fn is_launched(&self) -> bool {
        self.launched
    }

    /// Issue the next step toward the target.
    pub fn exec(&mut self, ctx: &mut Context<'_>) -> Outcome {
        let board = ctx.board;
        if board.terrain(self.target).is_owned_by(ctx.me) {
            return Outcome::Finished;
        }

        let garrison = board.army(self.target);
        let source_army = board.army(self.source);
        let held = !self.launched
            && self
                .min_army
                .is_some_and(|min| source_army < min || source_army <= garrison + 1);
        if held {
            return Outcome::Wait;
        }

        match self.route.step(board, ctx.me, ctx.config.flood_ceiling) {
            Step::Advance(command) => {
                let command = if !self.launched && self.half_army && source_army / 2 > garrison + 1
                {
                    Command::half(command.from, command.to)
                } else {
                    command
                };
                self.launched = true;
                Outcome::Move(command)
            }
            Step::Arrived | Step::NoPath => Outcome::Finished,
        }
    }
}
