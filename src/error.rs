use thiserror::Error;

use crate::stage::ActorKind;

/// Every way a call into [`crate::game::Game`] can fail. Reported
/// synchronously on the call that triggers it; the engine never mutates
/// state before returning an error, so a caller that gets `Err` can retry
/// with a different argument against the same state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid construction parameter: {0}")]
    InvalidParameter(String),

    #[error("the game has already reached a terminal state")]
    Terminal,

    #[error("it is not seat {expected:?}'s turn, actor is {actual:?}")]
    OutOfTurn {
        expected: Option<usize>,
        actual: ActorKind,
    },

    #[error("wrong actor kind for this action: expected {expected:?}, actor is {actual:?}")]
    WrongActorKind { expected: ActorKind, actual: ActorKind },

    #[error("action is not legal right now: {0}")]
    IrrelevantAction(String),

    #[error("amount {got} is outside the legal range [{min}, {max}]")]
    InvalidAmount { min: u32, max: u32, got: u32 },

    #[error("invalid cards for this deal: {0}")]
    InvalidCards(String),
}
