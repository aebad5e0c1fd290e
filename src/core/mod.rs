//! Card primitives, deck sources, and hand ranking. Everything here is a
//! leaf the rest of the engine is built on top of; none of it knows about
//! betting, stages, or players.

mod card;
pub use self::card::{Card, HoleCard, Suit, Value};

mod error;
pub use self::error::CardParseError;

mod deck;
pub use self::deck::{Deck, PredeterminedDeck, StdDeck};

mod rank;
pub use self::rank::{
    best_of, best_of_omaha, rank_five, HandEvaluator, OmahaEvaluator, Rank, StandardEvaluator,
    STRAIGHTS,
};
