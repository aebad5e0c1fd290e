use crate::core::Card;
use crate::limit::BetRange;

/// One verb the caller can invoke against [`crate::game::Game`]. Every
/// variant corresponds 1:1 with a method on `Game`; this enum exists so the
/// token-stream parser and `legal_actions()` have a uniform value to
/// produce/describe instead of the caller needing to pattern-match on
/// which method to call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Fold,
    CheckCall,
    BetRaise(u32),
    Showdown(bool),
    DealHole(usize, Vec<Card>),
    DealBoard(Vec<Card>),
}

/// A kind of action the current actor could legally take right now, with
/// whatever parameters bound it (a bet's legal range, how many cards a
/// `DealHole`/`DealBoard` call needs).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegalAction {
    Fold,
    CheckCall,
    BetRaise(BetRange),
    Showdown,
    DealHole { player: usize, count: usize },
    DealBoard { count: usize },
}
