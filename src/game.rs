use std::sync::Arc;

use rand::Rng;

use crate::action::LegalAction;
use crate::core::{Card, Deck, HandEvaluator, HoleCard, OmahaEvaluator, Rank, StandardEvaluator, StdDeck};
use crate::error::GameError;
use crate::limit::Limit;
use crate::player::Player;
use crate::pot::{self, PotLayer};
use crate::stage::{ActorKind, HoleDeal, Stage};

/// The orchestrator: a seat-indexed table of [`Player`]s walking a
/// precomputed [`Stage`] pipeline. `Game` owns every piece of mutable state
/// for one hand; it is rebuilt, not reset, between hands.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    stages: Vec<Stage>,
    stage_idx: usize,
    opened_for: Option<usize>,
    board: Vec<Card>,
    deck: Box<dyn Deck>,
    evaluator: Arc<dyn HandEvaluator>,
    button_idx: usize,
    /// The minimum legal raise increment a betting stage opens with: the
    /// big blind, or the smaller blind on a heads-up table, or the ante when
    /// there are no blinds at all.
    betting_unit: u32,
    to_act: Option<usize>,
    aggressor: Option<usize>,
    last_aggressor: Option<usize>,
    max_delta: u32,
    showdown_opener_seat: Option<usize>,
    pot_layers: Option<Vec<PotLayer>>,
    terminal: bool,
}

impl Game {
    /// No-limit hold'em: two private cards, a five card board, `StandardEvaluator`.
    pub fn nlhe_with_rng<R: Rng + ?Sized>(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let deck = Box::new(StdDeck::new_with_rng(rng));
        Self::nlhe_with_deck(ante, blinds, stacks, deck)
    }

    /// Same as [`Self::nlhe_with_rng`] but with an injected deck, for
    /// scenario tests that need to pin down exact hole and board cards.
    pub fn nlhe_with_deck(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        deck: Box<dyn Deck>,
    ) -> Result<Self, GameError> {
        Self::new(
            ante,
            blinds,
            stacks,
            deck,
            Arc::new(StandardEvaluator),
            Arc::new(crate::limit::NoLimit),
            2,
            holdem_stages,
        )
    }

    /// Pot-limit Omaha: four private cards, exactly two of which must be
    /// used at showdown, `OmahaEvaluator`.
    pub fn plo_with_rng<R: Rng + ?Sized>(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let deck = Box::new(StdDeck::new_with_rng(rng));
        Self::plo_with_deck(ante, blinds, stacks, deck)
    }

    pub fn plo_with_deck(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        deck: Box<dyn Deck>,
    ) -> Result<Self, GameError> {
        Self::new(
            ante,
            blinds,
            stacks,
            deck,
            Arc::new(OmahaEvaluator),
            Arc::new(crate::limit::PotLimit),
            4,
            holdem_stages,
        )
    }

    /// No-limit short-deck hold'em: 6-through-Ace 36 card deck, otherwise
    /// identical in shape to NLHE. Short-deck tables are commonly played
    /// with antes instead of blinds; `blinds` may be empty.
    pub fn short_deck_with_rng<R: Rng + ?Sized>(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let deck = Box::new(StdDeck::new_short_with_rng(rng));
        Self::short_deck_with_deck(ante, blinds, stacks, deck)
    }

    pub fn short_deck_with_deck(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        deck: Box<dyn Deck>,
    ) -> Result<Self, GameError> {
        Self::new(
            ante,
            blinds,
            stacks,
            deck,
            Arc::new(StandardEvaluator),
            Arc::new(crate::limit::NoLimit),
            2,
            holdem_stages,
        )
    }

    fn new(
        ante: u32,
        blinds: Vec<u32>,
        stacks: Vec<u32>,
        deck: Box<dyn Deck>,
        evaluator: Arc<dyn HandEvaluator>,
        limit: Arc<dyn Limit>,
        hole_target: usize,
        stage_builder: fn(Arc<dyn Limit>, usize) -> Vec<Stage>,
    ) -> Result<Self, GameError> {
        if stacks.len() < 2 {
            return Err(GameError::InvalidParameter("a game needs at least two seats".into()));
        }
        if blinds.len() > stacks.len() {
            return Err(GameError::InvalidParameter("more blinds than seats".into()));
        }
        if blinds.windows(2).any(|w| w[0] > w[1]) {
            return Err(GameError::InvalidParameter("blinds must be non-decreasing".into()));
        }

        let mut players: Vec<Player> = stacks.iter().map(|&s| Player::new(s)).collect();
        let button_idx = players.len() - 1;

        for p in &mut players {
            let amount = ante.min(p.stack);
            p.post_ante(amount);
        }

        let blind_seats: Vec<usize> = if players.len() == 2 {
            vec![button_idx, 0]
        } else {
            (0..blinds.len()).collect()
        };
        for (&seat, &blind) in blind_seats.iter().zip(blinds.iter()) {
            let amount = blind.min(players[seat].stack);
            players[seat].commit(amount);
        }

        let betting_unit = blinds.iter().copied().max().unwrap_or(ante);
        let stages = stage_builder(limit, hole_target);

        let mut game = Self {
            players,
            stages,
            stage_idx: 0,
            opened_for: None,
            board: Vec::new(),
            deck,
            evaluator,
            button_idx,
            betting_unit,
            to_act: None,
            aggressor: None,
            last_aggressor: None,
            max_delta: 0,
            showdown_opener_seat: None,
            pot_layers: None,
            terminal: false,
        };
        game.advance();
        Ok(game)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    #[must_use]
    pub fn pot(&self) -> u32 {
        self.players.iter().map(|p| p.committed).sum()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[must_use]
    pub fn button(&self) -> usize {
        self.button_idx
    }

    #[must_use]
    pub fn actor(&self) -> ActorKind {
        if self.terminal || self.stage_idx >= self.stages.len() {
            return ActorKind::None;
        }
        match &self.stages[self.stage_idx] {
            Stage::Dealing { .. } => ActorKind::Nature,
            Stage::Betting { .. } | Stage::Showdown => {
                self.to_act.map_or(ActorKind::None, ActorKind::Player)
            }
        }
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<LegalAction> {
        if self.terminal || self.stage_idx >= self.stages.len() {
            return Vec::new();
        }
        match &self.stages[self.stage_idx] {
            Stage::Dealing { hole, board_count, board_target, hole_target } => {
                let mut actions = Vec::new();
                if hole.is_some() {
                    for (i, p) in self.players.iter().enumerate() {
                        let needed = hole_target.saturating_sub(p.hole_cards.len());
                        if needed > 0 {
                            actions.push(LegalAction::DealHole { player: i, count: needed });
                        }
                    }
                }
                if *board_count > 0 {
                    let needed = board_target.saturating_sub(self.board.len());
                    if needed > 0 {
                        actions.push(LegalAction::DealBoard { count: needed });
                    }
                }
                actions
            }
            Stage::Betting { limit } => {
                let Some(seat) = self.to_act else { return Vec::new() };
                let mut actions = vec![LegalAction::CheckCall];
                let max_bet = self.max_bet();
                if self.players[seat].bet < max_bet {
                    actions.push(LegalAction::Fold);
                }
                let shove = self.players[seat].bet + self.players[seat].stack;
                if self.relevant_count() >= 2 && max_bet < shove {
                    let range = limit.bet_range(&self.players[seat], &self.players, self.pot_before_round(), self.max_delta);
                    actions.push(LegalAction::BetRaise(range));
                }
                actions
            }
            Stage::Showdown => {
                if self.to_act.is_some() {
                    vec![LegalAction::Showdown]
                } else {
                    Vec::new()
                }
            }
        }
    }

    // -- player actions -----------------------------------------------

    #[cfg_attr(feature = "trace", tracing::instrument(skip(self), level = "debug"))]
    pub fn fold(&mut self, seat: usize) -> Result<(), GameError> {
        self.require_live()?;
        if !self.current_stage().is_betting() {
            return Err(GameError::WrongActorKind { expected: ActorKind::Player(seat), actual: self.actor() });
        }
        let to_act = self.to_act.expect("a betting stage always has an actor while current");
        if to_act != seat {
            return Err(GameError::OutOfTurn { expected: Some(to_act), actual: ActorKind::Player(seat) });
        }
        let max_bet = self.max_bet();
        if self.players[seat].bet >= max_bet {
            return Err(GameError::IrrelevantAction("checking is free here, folding is not legal".into()));
        }
        self.players[seat].mucked = true;
        self.advance_betting(seat, None);
        self.advance();
        Ok(())
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip(self), level = "debug"))]
    pub fn check_call(&mut self, seat: usize) -> Result<(), GameError> {
        self.require_live()?;
        if !self.current_stage().is_betting() {
            return Err(GameError::WrongActorKind { expected: ActorKind::Player(seat), actual: self.actor() });
        }
        let to_act = self.to_act.expect("a betting stage always has an actor while current");
        if to_act != seat {
            return Err(GameError::OutOfTurn { expected: Some(to_act), actual: ActorKind::Player(seat) });
        }
        let max_bet = self.max_bet();
        let target = max_bet.min(self.players[seat].bet + self.players[seat].stack);
        let delta = target - self.players[seat].bet;
        self.players[seat].commit(delta);
        self.advance_betting(seat, None);
        self.advance();
        Ok(())
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip(self), level = "debug"))]
    pub fn bet_raise(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        self.require_live()?;
        let limit = match &self.stages[self.stage_idx] {
            Stage::Betting { limit } => limit.clone(),
            _ => return Err(GameError::WrongActorKind { expected: ActorKind::Player(seat), actual: self.actor() }),
        };
        let to_act = self.to_act.expect("a betting stage always has an actor while current");
        if to_act != seat {
            return Err(GameError::OutOfTurn { expected: Some(to_act), actual: ActorKind::Player(seat) });
        }
        let max_bet = self.max_bet();
        let shove = self.players[seat].bet + self.players[seat].stack;
        if self.relevant_count() < 2 || max_bet >= shove {
            return Err(GameError::IrrelevantAction("no further raise is possible".into()));
        }
        let range = limit.bet_range(&self.players[seat], &self.players, self.pot_before_round(), self.max_delta);
        if !range.contains(amount) {
            return Err(GameError::InvalidAmount { min: range.min_amount, max: range.max_amount, got: amount });
        }
        let delta = amount - self.players[seat].bet;
        self.players[seat].commit(delta);
        let new_max_bet = self.max_bet();
        self.max_delta = self.max_delta.max(new_max_bet.saturating_sub(max_bet));
        self.advance_betting(seat, Some(seat));
        self.advance();
        Ok(())
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip(self), level = "debug"))]
    pub fn showdown(&mut self, seat: usize, force: bool) -> Result<(), GameError> {
        self.require_live()?;
        if !self.current_stage().is_showdown() {
            return Err(GameError::WrongActorKind { expected: ActorKind::Player(seat), actual: self.actor() });
        }
        let to_act = self
            .to_act
            .ok_or_else(|| GameError::IrrelevantAction("no seat has a showdown decision left".into()))?;
        if to_act != seat {
            return Err(GameError::OutOfTurn { expected: Some(to_act), actual: ActorKind::Player(seat) });
        }
        let rank = self.hand_rank(seat);
        let beats_every_shown_hand = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != seat && p.shown)
            .all(|(i, _)| rank > self.hand_rank(i));
        if force || beats_every_shown_hand {
            self.players[seat].shown = true;
        } else {
            self.players[seat].mucked = true;
        }
        self.advance_showdown(seat);
        self.advance();
        Ok(())
    }

    pub fn deal_hole(&mut self, player: usize, cards: Vec<Card>) -> Result<(), GameError> {
        self.require_live()?;
        let (hole, hole_target) = match &self.stages[self.stage_idx] {
            Stage::Dealing { hole, hole_target, .. } => (*hole, *hole_target),
            _ => return Err(GameError::WrongActorKind { expected: ActorKind::Nature, actual: self.actor() }),
        };
        let Some(hole_spec) = hole else {
            return Err(GameError::IrrelevantAction("this dealing stage deals no hole cards".into()));
        };
        if player >= self.players.len() {
            return Err(GameError::InvalidCards(format!("no such player: {player}")));
        }
        let needed = hole_target.saturating_sub(self.players[player].hole_cards.len());
        if cards.len() != needed {
            return Err(GameError::InvalidCards(format!("expected {needed} cards, got {}", cards.len())));
        }
        self.reserve_from_deck(&cards)?;
        for card in cards {
            self.players[player].hole_cards.push(HoleCard::new(card, hole_spec.exposed));
        }
        self.advance();
        Ok(())
    }

    pub fn deal_board(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        self.require_live()?;
        let (board_count, board_target) = match &self.stages[self.stage_idx] {
            Stage::Dealing { board_count, board_target, .. } => (*board_count, *board_target),
            _ => return Err(GameError::WrongActorKind { expected: ActorKind::Nature, actual: self.actor() }),
        };
        if board_count == 0 {
            return Err(GameError::IrrelevantAction("this dealing stage deals no board cards".into()));
        }
        let needed = board_target.saturating_sub(self.board.len());
        if cards.len() != needed {
            return Err(GameError::InvalidCards(format!("expected {needed} cards, got {}", cards.len())));
        }
        self.reserve_from_deck(&cards)?;
        self.board.extend(cards);
        self.advance();
        Ok(())
    }

    fn reserve_from_deck(&mut self, cards: &[Card]) -> Result<(), GameError> {
        let mut seen = std::collections::HashSet::with_capacity(cards.len());
        for &c in cards {
            if !seen.insert(c) {
                return Err(GameError::InvalidCards(format!("card named twice: {c}")));
            }
            if !self.deck.contains(c) {
                return Err(GameError::InvalidCards(format!("card not in deck: {c}")));
            }
        }
        for &c in cards {
            self.deck.take(c);
        }
        Ok(())
    }

    fn hand_rank(&self, seat: usize) -> Rank {
        let hole: Vec<Card> = self.players[seat].hole_cards.iter().map(|hc| hc.card).collect();
        self.evaluator.best_hand(&hole, &self.board)
    }

    // -- internal plumbing ----------------------------------------------

    fn require_live(&self) -> Result<(), GameError> {
        if self.terminal {
            Err(GameError::Terminal)
        } else {
            Ok(())
        }
    }

    fn current_stage(&self) -> &Stage {
        &self.stages[self.stage_idx]
    }

    fn max_bet(&self) -> u32 {
        self.players.iter().map(|p| p.bet).max().unwrap_or(0)
    }

    /// Pot accumulated from closed rounds only, excluding everyone's
    /// current-round bets. `PotLimit` separately adds the live bets back in,
    /// so passing the grand total here would double-count them.
    fn pot_before_round(&self) -> u32 {
        self.players.iter().map(|p| p.committed - p.bet).sum()
    }

    fn relevant_seats(&self) -> Vec<usize> {
        (0..self.players.len()).filter(|&i| self.players[i].has_stack()).collect()
    }

    fn relevant_count(&self) -> usize {
        self.relevant_seats().len()
    }

    /// Not-mucked seats, all-in or not. Distinct from [`Self::relevant_count`]
    /// (which only counts seats with chips behind): a hand decided purely by
    /// folds closes the instant one seat remains here, but two non-mucked
    /// seats with one of them all-in still owes the other a call/fold on the
    /// live bet before the round can close.
    fn live_count(&self) -> usize {
        self.players.iter().filter(|p| !p.mucked).count()
    }

    fn stage_skippable(&self, idx: usize) -> bool {
        match &self.stages[idx] {
            Stage::Dealing { hole, board_count: _, board_target, hole_target } => {
                let board_done = self.board.len() >= *board_target;
                let hole_done = hole.is_none()
                    || self.players.iter().all(|p| p.hole_cards.len() >= *hole_target);
                board_done && hole_done
            }
            Stage::Betting { .. } => self.relevant_count() <= 1,
            Stage::Showdown => self.players.iter().filter(|p| !p.mucked).all(|p| p.shown),
        }
    }

    /// Walk forward, opening the next non-skippable stage (or resolving
    /// the pot once every stage is behind us). Called after every action.
    fn advance(&mut self) {
        loop {
            if self.stage_idx >= self.stages.len() {
                if !self.terminal {
                    self.resolve();
                }
                return;
            }
            if self.stage_skippable(self.stage_idx) {
                if matches!(self.stages[self.stage_idx], Stage::Betting { .. }) {
                    // A betting stage that never opens (everyone left is
                    // already all-in from antes/blinds or an earlier round)
                    // still owes players the same bet-to-pot sweep a normal
                    // close does, or `bet` counters from forced bets posted
                    // before this stage was ever reached would survive to
                    // the terminal state.
                    self.sweep_round();
                }
                self.stage_idx += 1;
                self.opened_for = None;
                continue;
            }
            self.ensure_opened(self.stage_idx);
            return;
        }
    }

    fn ensure_opened(&mut self, idx: usize) {
        if self.opened_for == Some(idx) {
            return;
        }
        let stage = self.stages[idx].clone();
        match stage {
            Stage::Dealing { .. } => {}
            Stage::Betting { .. } => {
                let seat = self.betting_opener();
                self.to_act = Some(seat);
                self.aggressor = Some(seat);
                self.max_delta = self.betting_unit;
            }
            Stage::Showdown => {
                self.pot_layers = Some(pot::build_layers(&self.players));
                match self.showdown_opener() {
                    Some(seat) => {
                        self.to_act = Some(seat);
                        self.showdown_opener_seat = Some(seat);
                    }
                    None => self.to_act = None,
                }
            }
        }
        self.opened_for = Some(idx);
    }

    /// The opener is whoever has the lowest current-round bet (if anyone
    /// has bet, e.g. posted a blind), otherwise the first relevant seat
    /// left of the button.
    fn betting_opener(&self) -> usize {
        let relevant = self.relevant_seats();
        if self.players.iter().any(|p| p.bet > 0) {
            relevant
                .into_iter()
                .min_by_key(|&i| (self.players[i].bet, i))
                .expect("betting stage only opens with at least one relevant seat")
        } else {
            let n = self.players.len();
            (1..=n)
                .map(|offset| (self.button_idx + offset) % n)
                .find(|i| self.players[*i].has_stack())
                .expect("betting stage only opens with at least one relevant seat")
        }
    }

    /// The most recent betting stage's aggressor shows first, if still
    /// unmucked; otherwise the first unmucked seat in order.
    fn showdown_opener(&self) -> Option<usize> {
        if let Some(seat) = self.last_aggressor {
            if !self.players[seat].mucked {
                return Some(seat);
            }
        }
        (0..self.players.len()).find(|&i| !self.players[i].mucked)
    }

    fn advance_betting(&mut self, acted_seat: usize, new_aggressor: Option<usize>) {
        if let Some(a) = new_aggressor {
            self.aggressor = Some(a);
        }
        if self.live_count() <= 1 {
            self.close_betting_stage();
            return;
        }
        let n = self.players.len();
        let aggressor = self.aggressor.expect("betting stage always has an aggressor");
        let mut i = acted_seat;
        loop {
            i = (i + 1) % n;
            if i == aggressor {
                self.close_betting_stage();
                return;
            }
            if self.players[i].has_stack() {
                self.to_act = Some(i);
                return;
            }
            if i == acted_seat {
                self.close_betting_stage();
                return;
            }
        }
    }

    /// Refund any amount committed above the second-highest commitment (an
    /// uncalled raise nobody could match), then zero every `bet` counter.
    /// Shared by a round that closes after real action and by a round that
    /// never opens because everyone left is already all-in.
    fn sweep_round(&mut self) -> u32 {
        let mut committed: Vec<u32> = self.players.iter().filter(|p| !p.mucked).map(|p| p.committed).collect();
        committed.sort_unstable_by(|a, b| b.cmp(a));
        let requirement = committed.get(1).copied().unwrap_or_else(|| committed.first().copied().unwrap_or(0));
        for p in &mut self.players {
            if !p.mucked && p.committed > requirement {
                let refund = p.committed - requirement;
                p.refund(refund);
            }
        }
        for p in &mut self.players {
            p.close_round();
        }
        requirement
    }

    /// Sweep the round's bets and reset the per-round actor bookkeeping.
    fn close_betting_stage(&mut self) {
        let requirement = self.sweep_round();
        self.last_aggressor = self.aggressor;
        self.aggressor = None;
        self.max_delta = 0;
        self.to_act = None;
        self.stage_idx += 1;
        self.opened_for = None;
        #[cfg(feature = "trace")]
        tracing::debug!(stage_idx = self.stage_idx, requirement, "betting stage closed");
    }

    fn advance_showdown(&mut self, acted_seat: usize) {
        let n = self.players.len();
        let opener = self.showdown_opener_seat;
        let mut i = acted_seat;
        loop {
            i = (i + 1) % n;
            if Some(i) == opener {
                self.to_act = None;
                return;
            }
            if !self.players[i].mucked && !self.players[i].shown {
                self.to_act = Some(i);
                return;
            }
            if i == acted_seat {
                self.to_act = None;
                return;
            }
        }
    }

    fn resolve(&mut self) {
        let layers = self
            .pot_layers
            .clone()
            .unwrap_or_else(|| pot::build_layers(&self.players));
        for layer in &layers {
            if layer.contestants.is_empty() {
                continue;
            }
            let best = layer.contestants.iter().map(|&s| self.hand_rank(s)).max().expect("non-empty contestants");
            let winners: Vec<usize> = layer
                .contestants
                .iter()
                .copied()
                .filter(|&s| self.hand_rank(s) == best)
                .collect();
            #[cfg(feature = "trace")]
            tracing::debug!(amount = layer.amount, ?winners, "pot layer awarded");
            for (seat, amount) in pot::split_with_odd_chip(layer.amount, &winners, self.players.len(), self.button_idx) {
                self.players[seat].award(amount);
            }
        }
        #[cfg(feature = "trace")]
        tracing::debug!("hand resolved");
        self.terminal = true;
    }
}

fn holdem_stages(limit: Arc<dyn Limit>, hole_target: usize) -> Vec<Stage> {
    vec![
        Stage::Dealing {
            hole: Some(HoleDeal { exposed: false }),
            board_count: 0,
            board_target: 0,
            hole_target,
        },
        Stage::Betting { limit: limit.clone() },
        Stage::Dealing { hole: None, board_count: 3, board_target: 3, hole_target },
        Stage::Betting { limit: limit.clone() },
        Stage::Dealing { hole: None, board_count: 1, board_target: 4, hole_target },
        Stage::Betting { limit: limit.clone() },
        Stage::Dealing { hole: None, board_count: 1, board_target: 5, hole_target },
        Stage::Betting { limit },
        Stage::Showdown,
    ]
}
