//! An information-set projection: a pure function from a [`Game`] plus an
//! observer's seat to a snapshot that elides other seats' face-down hole
//! cards. Not used by the state machine itself; every collaborator that
//! needs a private-vs-public split (a UI, a bot, a network handler) builds
//! one of these instead of reaching into `Game` directly.

use crate::core::Card;
use crate::game::Game;
use crate::stage::ActorKind;

/// One seat as seen by `observer_seat`: the observer sees their own hole
/// cards outright; every other seat's unexposed cards collapse to a count
/// so the observer can't infer anything beyond "this many cards, hidden".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub stack: u32,
    pub bet: u32,
    pub committed: u32,
    pub mucked: bool,
    pub shown: bool,
    /// `Some(cards)` when every one of this seat's hole cards is visible to
    /// the observer: either it's the observer's own seat, or the cards were
    /// dealt exposed, or the seat has shown at showdown. `None` means at
    /// least one card stays hidden; `hidden_count` says how many.
    pub hole_cards: Option<Vec<Card>>,
    pub hidden_count: usize,
}

/// The full-table snapshot one observer is entitled to see.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    pub observer_seat: usize,
    pub pot: u32,
    pub board: Vec<Card>,
    pub button: usize,
    pub actor: ActorKind,
    pub terminal: bool,
    pub players: Vec<PlayerView>,
}

/// Project `game` into what seat `observer_seat` is allowed to see.
#[must_use]
pub fn view(game: &Game, observer_seat: usize) -> GameView {
    let players = game
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let fully_visible = seat == observer_seat || p.shown || p.hole_cards.iter().all(|hc| hc.exposed);
            let hole_cards = fully_visible.then(|| p.hole_cards.iter().map(|hc| hc.card).collect());
            let hidden_count = if fully_visible { 0 } else { p.hole_cards.len() };
            PlayerView {
                stack: p.stack,
                bet: p.bet,
                committed: p.committed,
                mucked: p.mucked,
                shown: p.shown,
                hole_cards,
                hidden_count,
            }
        })
        .collect();

    GameView {
        observer_seat,
        pot: game.pot(),
        board: game.board().to_vec(),
        button: game.button(),
        actor: game.actor(),
        terminal: game.is_terminal(),
        players,
    }
}
