//! Gathering idle armies onto a single tile.

use crate::objective::{Context, Outcome};
use crate::router::{Move, Step};

/// Route the largest idle army toward `target`, usually the own general.
///
/// The route is planned once and followed to the end before a new source
/// is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collect {
    target: usize,
    route: Option<Move>,
}

impl Collect {
    /// Collect onto `target`.
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self {
            target,
            route: None,
        }
    }

    /// Tile armies are gathered on.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Route currently being followed.
    #[must_use]
    pub const fn route(&self) -> Option<&Move> {
        self.route.as_ref()
    }

    /// Advance the current route or start a new one.
    pub fn exec(&mut self, ctx: &mut Context<'_>) -> Outcome {
        let ceiling = ctx.config.flood_ceiling;

        if let Some(route) = &mut self.route {
            return match route.step(ctx.board, ctx.me, ceiling) {
                Step::Advance(command) => Outcome::Move(command),
                Step::Arrived | Step::NoPath => {
                    self.route = None;
                    Outcome::Finished
                }
            };
        }

        let board = ctx.board;
        let mut candidates: Vec<usize> = board
            .owned_by(ctx.me)
            .filter(|&tile| tile != self.target && board.army(tile) > 1)
            .collect();
        // Largest army first, lower index on ties
        candidates.sort_by(|&a, &b| board.army(b).cmp(&board.army(a)).then(a.cmp(&b)));

        for source in candidates.into_iter().take(ctx.config.collect_attempts) {
            let mut route = Move::new(source, self.target);
            if let Step::Advance(command) = route.step(board, ctx.me, ceiling) {
                self.route = Some(route);
                return Outcome::Move(command);
            }
        }

        Outcome::Finished
    }
}
