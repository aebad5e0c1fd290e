use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::card::{Card, Suit, Value};

/// A source of cards the game draws from.
///
/// The engine owns exactly one `Deck` for the life of a hand and never
/// returns cards to it; everything the state machine needs is `draw` and
/// `remaining`. Swapping the implementation (a shuffled 52/36 card deck, a
/// deck pinned to a fixed order for a scenario test, a deck wired to some
/// other card source) never touches the state machine.
pub trait Deck: fmt::Debug {
    /// Remove and return up to `n` cards. Returns fewer than `n` only when
    /// the deck itself has fewer than `n` cards left; callers treat a short
    /// draw as a card-count error.
    fn draw(&mut self, n: usize) -> Vec<Card>;

    /// How many cards are left to draw.
    fn remaining(&self) -> usize;

    /// Whether `card` is still in the deck, without removing it. Used to
    /// validate an explicitly named card (a scenario fixture naming exact
    /// hole/board cards) before it's taken.
    fn contains(&self, card: Card) -> bool;

    /// Remove one specific card, wherever it sits in the deck. Returns
    /// `false` (and leaves the deck untouched) if the card isn't present.
    fn take(&mut self, card: Card) -> bool;
}

/// A standard shuffled deck, either the full 52 cards or, for short-deck
/// variants, the 36 cards ranked six and above.
#[derive(Clone)]
pub struct StdDeck {
    cards: Vec<Card>,
}

impl StdDeck {
    /// Build and shuffle a full 52 card deck using the given RNG.
    #[must_use]
    pub fn new_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::build(Value::values().into_iter(), rng)
    }

    /// Build and shuffle a short deck (6 through Ace, 36 cards) using the
    /// given RNG.
    #[must_use]
    pub fn new_short_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let short_values = Value::values().into_iter().filter(|v| *v >= Value::Six);
        Self::build(short_values, rng)
    }

    fn build<R: Rng + ?Sized>(values: impl Iterator<Item = Value>, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = values
            .flat_map(|value| Suit::suits().into_iter().map(move |suit| Card { value, suit }))
            .collect();
        cards.shuffle(rng);
        Self { cards }
    }
}

impl fmt::Debug for StdDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdDeck")
            .field("remaining", &self.cards.len())
            .finish()
    }
}

impl Deck for StdDeck {
    fn draw(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        self.cards.split_off(self.cards.len() - take)
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    fn take(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }
}

/// A deck that yields cards in a caller-specified order, used to pin down
/// scenario tests that name exact hole and board cards and for deterministic
/// replay.
#[derive(Debug, Clone)]
pub struct PredeterminedDeck {
    cards: VecDeque<Card>,
}

impl PredeterminedDeck {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }
}

impl Deck for PredeterminedDeck {
    fn draw(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.cards.pop_front()).collect()
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    fn take(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }
}
