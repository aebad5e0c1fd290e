//! A variant-agnostic poker game engine: a reusable kernel that drives a
//! seat-based, turn-based betting game from forced bets through dealing,
//! betting rounds, showdown, and pot distribution.
//!
//! The engine exposes a deterministic state machine ([`game::Game`]) that
//! external callers drive by invoking discrete actions; every call either
//! fully applies or fails atomically, leaving state unchanged. Three
//! variants ship out of the box: [`game::Game::nlhe_with_rng`] (No-Limit
//! Hold'em), [`game::Game::plo_with_rng`] (Pot-Limit Omaha), and
//! [`game::Game::short_deck_with_rng`] (No-Limit Short-Deck Hold'em), each
//! wiring together a [`core::Deck`], a [`core::HandEvaluator`], and a
//! [`limit::Limit`].

pub mod action;
pub mod core;
pub mod error;
pub mod game;
pub mod limit;
pub mod parser;
pub mod player;
pub mod pot;
pub mod stage;
pub mod view;

pub use action::{Action, LegalAction};
pub use error::GameError;
pub use game::Game;
pub use player::Player;
pub use stage::{ActorKind, Stage};
