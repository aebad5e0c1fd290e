use std::sync::Arc;

use crate::limit::Limit;

/// Who is expected to act right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// A dealing stage is open; the caller must invoke `deal_hole` or
    /// `deal_board`.
    Nature,
    /// Seat `usize` has a decision.
    Player(usize),
    /// Terminal: no further action is possible.
    None,
}

/// Whether this dealing stage's hole cards are dealt face up. The actual
/// card count is derived from `hole_target` minus how many a seat already
/// holds, so it's never duplicated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleDeal {
    pub exposed: bool,
}

/// One step of the precomputed per-variant pipeline. Stages never mutate
/// each other; the `Game` orchestrator is what walks the list, asks each
/// stage whether it's skippable, and calls its hooks.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Deal hole cards to some/all seats and/or community cards.
    Dealing {
        /// How many hole cards each seat should have *after* this stage,
        /// cumulatively, and whether this stage's hole cards are exposed.
        /// `None` means this stage deals no hole cards to that seat.
        hole: Option<HoleDeal>,
        /// How many board cards this stage deals.
        board_count: usize,
        /// Cumulative board card target after this stage (used for the
        /// skip rule).
        board_target: usize,
        /// Cumulative per-seat hole card target after this stage.
        hole_target: usize,
    },
    /// One betting round.
    Betting {
        limit: Arc<dyn Limit>,
    },
    /// The reveal-or-muck phase.
    Showdown,
}

impl Stage {
    #[must_use]
    pub fn is_betting(&self) -> bool {
        matches!(self, Stage::Betting { .. })
    }

    #[must_use]
    pub fn is_dealing(&self) -> bool {
        matches!(self, Stage::Dealing { .. })
    }

    #[must_use]
    pub fn is_showdown(&self) -> bool {
        matches!(self, Stage::Showdown)
    }
}
