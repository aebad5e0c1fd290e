//! A token-stream convenience parser: a compact, whitespace-separated
//! notation for driving a [`crate::game::Game`] without writing out verb
//! calls by hand. Handy for scenario fixtures and REPLs; the engine itself
//! never calls into this module.
//!
//! Grammar, one token (or token pair) per action:
//! - `f`, fold
//! - `c` / `cc`, check or call
//! - `b<n>` / `br <n>`, bet or raise to total `n`
//! - `s [0|1]`, showdown; `1` forces a show, `0` or omitted allows a muck
//! - `dp <i> <cards>` / `dh <i> <cards>`, deal hole cards to seat `i`
//! - `db <cards>`, deal board cards
//!
//! `<cards>` is a run of two-character rank+suit tokens concatenated with no
//! separator, e.g. `AcAsKc` for a three-card flop.

use std::iter::Peekable;
use std::str::SplitWhitespace;

use thiserror::Error;

use crate::action::Action;
use crate::core::{Card, CardParseError};
use crate::error::GameError;
use crate::game::Game;
use crate::stage::ActorKind;

/// Failure while turning a token stream into [`Action`]s. Distinct from
/// [`GameError`] because a malformed token is a syntax problem the caller
/// made, not a rule the game state rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
    #[error("token {0} expects an argument that wasn't supplied")]
    MissingArgument(&'static str),
    #[error("{0} is not a valid bet amount")]
    InvalidAmount(String),
    #[error("{0} is not a valid seat index")]
    InvalidSeat(String),
    #[error(transparent)]
    Card(#[from] CardParseError),
}

/// Either half of driving a game from a token stream: the token itself
/// could fail to parse, or it could parse fine and still be illegal against
/// the game's current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Parse a whitespace-separated token stream into a sequence of [`Action`]s.
/// Does not touch a [`Game`]; see [`Game::apply_tokens`] to parse and apply
/// in one step.
pub fn parse_tokens(input: &str) -> Result<Vec<Action>, ParseError> {
    let mut tokens = input.split_whitespace().peekable();
    let mut actions = Vec::new();
    while let Some(tok) = tokens.next() {
        actions.push(parse_one(tok, &mut tokens)?);
    }
    Ok(actions)
}

fn parse_one(tok: &str, tokens: &mut Peekable<SplitWhitespace>) -> Result<Action, ParseError> {
    match tok {
        "f" => Ok(Action::Fold),
        "c" | "cc" => Ok(Action::CheckCall),
        "s" => {
            let force = matches!(tokens.peek(), Some(&"1"));
            if matches!(tokens.peek(), Some(&"0") | Some(&"1")) {
                tokens.next();
            }
            Ok(Action::Showdown(force))
        }
        "br" => {
            let amount_tok = tokens.next().ok_or(ParseError::MissingArgument("br"))?;
            Ok(Action::BetRaise(parse_amount(amount_tok)?))
        }
        "db" => {
            let cards_tok = tokens.next().ok_or(ParseError::MissingArgument("db"))?;
            Ok(Action::DealBoard(parse_cards(cards_tok)?))
        }
        "dp" | "dh" => {
            let seat_tok = tokens.next().ok_or(ParseError::MissingArgument("dp/dh seat"))?;
            let seat = parse_seat(seat_tok)?;
            let cards_tok = tokens.next().ok_or(ParseError::MissingArgument("dp/dh cards"))?;
            Ok(Action::DealHole(seat, parse_cards(cards_tok)?))
        }
        _ => {
            if let Some(amount_str) = tok.strip_prefix('b') {
                Ok(Action::BetRaise(parse_amount(amount_str)?))
            } else {
                Err(ParseError::UnrecognizedToken(tok.to_string()))
            }
        }
    }
}

fn parse_amount(s: &str) -> Result<u32, ParseError> {
    s.parse().map_err(|_| ParseError::InvalidAmount(s.to_string()))
}

fn parse_seat(s: &str) -> Result<usize, ParseError> {
    s.parse().map_err(|_| ParseError::InvalidSeat(s.to_string()))
}

/// Split a concatenated run of two-character rank+suit tokens (`"AcAsKc"`)
/// into individual [`Card`]s.
fn parse_cards(s: &str) -> Result<Vec<Card>, ParseError> {
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(2)
        .map(|chunk| {
            let pair: String = chunk.iter().collect();
            Card::try_from(pair.as_str()).map_err(ParseError::from)
        })
        .collect()
}

impl Game {
    /// Parse `input` as a token stream and apply each action in order,
    /// resolving `Fold`/`CheckCall`/`BetRaise`/`Showdown` against whoever
    /// [`Game::actor`] says is currently up, since the notation never names
    /// a seat for those verbs, only for the nature deals. Stops and
    /// returns an error on the first token that fails to parse or apply;
    /// actions already applied before the failing token remain in effect.
    pub fn apply_tokens(&mut self, input: &str) -> Result<(), TokenError> {
        for action in parse_tokens(input)? {
            self.apply(action)?;
        }
        Ok(())
    }

    /// Apply one already-parsed [`Action`], resolving the acting seat from
    /// [`Game::actor`] for the four verbs that don't carry one explicitly.
    pub fn apply(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Fold => self.fold(self.current_player_seat()?),
            Action::CheckCall => self.check_call(self.current_player_seat()?),
            Action::BetRaise(amount) => self.bet_raise(self.current_player_seat()?, amount),
            Action::Showdown(force) => self.showdown(self.current_player_seat()?, force),
            Action::DealHole(seat, cards) => self.deal_hole(seat, cards),
            Action::DealBoard(cards) => self.deal_board(cards),
        }
    }

    fn current_player_seat(&self) -> Result<usize, GameError> {
        match self.actor() {
            ActorKind::Player(seat) => Ok(seat),
            actual => Err(GameError::WrongActorKind {
                expected: ActorKind::Player(0),
                actual,
            }),
        }
    }
}
