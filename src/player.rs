use crate::core::HoleCard;

/// One seat at the table. The engine owns a `Vec<Player>` indexed by seat
/// number 0..N-1; every reference to "the actor" elsewhere in the crate is
/// that index, never a pointer into this vector.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    /// Chips still behind, not yet committed to any bet.
    pub stack: u32,
    /// Chips committed to the current betting round, not yet swept to a pot
    /// layer. Reset to zero when the round closes.
    pub bet: u32,
    /// Cumulative chips committed across the whole hand. Used for side-pot
    /// math; never decreases except for the uncalled-chip refund when a
    /// betting stage closes.
    pub committed: u32,
    /// Hole cards dealt so far, in deal order.
    pub hole_cards: Vec<HoleCard>,
    /// Folded. A mucked player is permanently out of contention for every
    /// pot layer and can take no further action.
    pub mucked: bool,
    /// Cards revealed at showdown.
    pub shown: bool,
}

impl Player {
    #[must_use]
    pub fn new(starting_stack: u32) -> Self {
        Self {
            stack: starting_stack,
            bet: 0,
            committed: 0,
            hole_cards: Vec::new(),
            mucked: false,
            shown: false,
        }
    }

    /// Not mucked, has chips behind. Doesn't by itself decide whether the
    /// player still has a live decision this round (that also depends on
    /// whether anyone could still raise behind them); see
    /// `Game::relevant_seats`/`Game::relevant_count` for the full rule.
    #[must_use]
    pub fn has_stack(&self) -> bool {
        !self.mucked && self.stack > 0
    }

    /// Total chips this seat has contributed across the hand, folded or
    /// not, which is what the pot resolver partitions into layers.
    #[must_use]
    pub fn total_committed(&self) -> u32 {
        self.committed
    }

    /// Move `amount` chips from `stack` into the current round's `bet` and
    /// the hand's cumulative `committed`. Caller is responsible for capping
    /// `amount` at the stack first; this never goes negative because the
    /// engine only ever calls it with an already-validated amount.
    pub fn commit(&mut self, amount: u32) {
        debug_assert!(amount <= self.stack, "commit amount exceeds stack");
        self.stack -= amount;
        self.bet += amount;
        self.committed += amount;
    }

    /// Move `amount` chips from `stack` straight into `committed`, bypassing
    /// `bet`. Antes are locked into the pot before the first betting round
    /// opens; they must count for side-pot math without being mistaken for
    /// a live wager a later `check_call`/`bet_raise` would compare against.
    pub fn post_ante(&mut self, amount: u32) {
        debug_assert!(amount <= self.stack, "ante amount exceeds stack");
        self.stack -= amount;
        self.committed += amount;
    }

    /// Called when a betting stage closes: bets are swept into the pot
    /// layers and the per-round counter resets.
    pub fn close_round(&mut self) {
        self.bet = 0;
    }

    /// Refund `amount` from `committed` back to `stack`, the uncalled tail
    /// of an over-shove nobody could call.
    pub fn refund(&mut self, amount: u32) {
        debug_assert!(amount <= self.committed, "refund exceeds committed");
        self.committed -= amount;
        self.stack += amount;
    }

    pub fn award(&mut self, amount: u32) {
        self.stack += amount;
    }
}
