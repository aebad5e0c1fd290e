use crate::player::Player;

/// The legal target-total-bet range the actor can choose from, expressed as
/// the *total* bet for the round (what `bet_raise` takes), not a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetRange {
    pub min_amount: u32,
    pub max_amount: u32,
    /// `true` when only `min_amount` and `max_amount` themselves are legal
    /// (every integer in between is rejected) rather than the full
    /// `[min_amount, max_amount]` range.
    pub lazy: bool,
}

impl BetRange {
    #[must_use]
    pub fn contains(&self, amount: u32) -> bool {
        if self.lazy {
            amount == self.min_amount || amount == self.max_amount
        } else {
            amount >= self.min_amount && amount <= self.max_amount
        }
    }
}

/// Bet-sizing policy for a betting stage, injected at game construction.
/// Given the actor, the rest of the table, and the round's current
/// `max_delta` (the size of the last raise, used as the minimum legal raise
/// size), compute the legal `[min_amount, max_amount]`.
pub trait Limit: std::fmt::Debug {
    fn bet_range(&self, actor: &Player, players: &[Player], pot: u32, max_delta: u32) -> BetRange;
}

fn max_bet(players: &[Player]) -> u32 {
    players.iter().map(|p| p.bet).max().unwrap_or(0)
}

fn min_amount(actor: &Player, players: &[Player], max_delta: u32) -> u32 {
    let shove = actor.bet + actor.stack;
    (max_bet(players) + max_delta).min(shove)
}

/// No-limit: any size up to an all-in shove is legal. `legal_actions`
/// advertises the full `[min, max]` range.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLimit;

impl Limit for NoLimit {
    fn bet_range(&self, actor: &Player, players: &[Player], _pot: u32, max_delta: u32) -> BetRange {
        let shove = actor.bet + actor.stack;
        BetRange {
            min_amount: min_amount(actor, players, max_delta).min(shove),
            max_amount: shove,
            lazy: false,
        }
    }
}

/// Same legal range as [`NoLimit`], but callers are told only the two
/// endpoints are legal (`min_amount`/`max_amount`) rather than every integer
/// between them, for engines that want to advertise a coarser action space
/// (e.g. a bot that only ever shoves or min-raises).
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyNoLimit;

impl Limit for LazyNoLimit {
    fn bet_range(&self, actor: &Player, players: &[Player], _pot: u32, max_delta: u32) -> BetRange {
        let shove = actor.bet + actor.stack;
        BetRange {
            min_amount: min_amount(actor, players, max_delta).min(shove),
            max_amount: shove,
            lazy: true,
        }
    }
}

/// Pot-limit: the largest legal raise is call-then-raise-by-the-pot. The
/// pot size used is the pot accumulated from prior rounds plus every
/// player's current-round bet, since those are chips that would be swept
/// into the pot the instant the actor calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PotLimit;

impl Limit for PotLimit {
    fn bet_range(&self, actor: &Player, players: &[Player], pot: u32, max_delta: u32) -> BetRange {
        let bet = max_bet(players);
        let shove = actor.bet + actor.stack;
        let sum_of_bets: u32 = players.iter().map(|p| p.bet).sum();
        let call_amount = bet.saturating_sub(actor.bet);
        let pot_after_call = pot + sum_of_bets + call_amount;
        let max_amount = (bet + pot_after_call).min(shove);
        BetRange {
            min_amount: min_amount(actor, players, max_delta).min(max_amount).min(shove),
            max_amount,
            lazy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(bets: &[u32], stacks: &[u32]) -> Vec<Player> {
        bets.iter()
            .zip(stacks)
            .map(|(&bet, &stack)| {
                let mut p = Player::new(stack + bet);
                p.commit(bet);
                p
            })
            .collect()
    }

    #[test]
    fn no_limit_max_is_shove() {
        let players = players(&[10, 20], &[90, 180]);
        let range = NoLimit.bet_range(&players[1], &players, 0, 20);
        assert_eq!(200, range.max_amount);
        assert!(!range.lazy);
    }

    #[test]
    fn no_limit_min_matches_last_raise_size() {
        let players = players(&[10, 20], &[990, 980]);
        // max_delta 20 (the big blind): min raise target = 20 (bet) + 20 = 40.
        let range = NoLimit.bet_range(&players[0], &players, 30, 20);
        assert_eq!(40, range.min_amount);
    }

    #[test]
    fn no_limit_min_is_capped_by_actors_all_in() {
        let players = players(&[10, 20], &[5, 980]);
        // Actor 0 only has 15 total (10 bet + 5 stack), far under the 40 target.
        let range = NoLimit.bet_range(&players[0], &players, 30, 20);
        assert_eq!(15, range.min_amount);
        assert_eq!(15, range.max_amount);
    }

    #[test]
    fn lazy_no_limit_only_advertises_endpoints() {
        let players = players(&[10, 20], &[90, 180]);
        let range = LazyNoLimit.bet_range(&players[1], &players, 0, 20);
        assert!(range.lazy);
        assert!(range.contains(range.min_amount));
        assert!(range.contains(range.max_amount));
        if range.min_amount + 1 < range.max_amount {
            assert!(!range.contains(range.min_amount + 1));
        }
    }

    #[test]
    fn pot_limit_max_is_call_then_pot_sized_raise() {
        // Pot so far 10, bets on the table 10 (bb) + 0, actor to act facing
        // the big blind with a full stack.
        let mut players = players(&[0, 10], &[990, 990]);
        players[0].stack = 990;
        let range = PotLimit.bet_range(&players[0], &players, 10, 10);
        // call_amount = 10, pot_after_call = 10 + 10 + 10 = 30, max = 10 + 30 = 40.
        assert_eq!(40, range.max_amount);
    }

    #[test]
    fn pot_limit_max_never_exceeds_shove() {
        let players = players(&[0, 10], &[5, 990]);
        let range = PotLimit.bet_range(&players[0], &players, 10, 10);
        assert_eq!(5, range.max_amount);
    }

    #[test]
    fn bet_range_contains_is_inclusive_for_non_lazy() {
        let range = BetRange {
            min_amount: 10,
            max_amount: 20,
            lazy: false,
        };
        assert!(range.contains(10));
        assert!(range.contains(15));
        assert!(range.contains(20));
        assert!(!range.contains(9));
        assert!(!range.contains(21));
    }
}
