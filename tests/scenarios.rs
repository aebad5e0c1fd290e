//! End-to-end hand scenarios: starting stacks, hole/board cards, a
//! token-stream betting line, and the expected final stacks. Each test
//! builds a full 52 card deck so every named card is available to
//! [`poker_engine::game::Game::deal_hole`] / `deal_board` regardless of draw
//! order (cards are taken by value, not by position), then drives the hand
//! exactly the way an external caller would.

use poker_engine::core::{Card, Deck, PredeterminedDeck, Suit, Value};
use poker_engine::game::Game;
use poker_engine::stage::ActorKind;

fn full_deck() -> Box<dyn Deck> {
    let cards: Vec<Card> = Value::values()
        .into_iter()
        .flat_map(|v| Suit::suits().into_iter().map(move |s| Card { value: v, suit: s }))
        .collect();
    Box::new(PredeterminedDeck::new(cards))
}

fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| Card::try_from(*t).unwrap()).collect()
}

/// Force-show whoever is up at a showdown stage until the hand is terminal.
/// Forcing is safe here: pot contestants are fixed at showdown-open time
/// (from who folded during betting), so whether a seat later shows or mucks
/// a losing hand at the table never changes who the pot layers were built
/// for.
fn force_through_showdown(game: &mut Game) {
    while let ActorKind::Player(seat) = game.actor() {
        game.showdown(seat, true).unwrap();
    }
}

fn total_stack(game: &Game) -> u32 {
    game.players().iter().map(|p| p.stack).sum()
}

/// Heads-up, both all-in preflop. Seat 1's hole cards (pocket aces) make
/// quad aces against seat 0's quad queens once the board pairs both hole
/// hands.
#[test]
fn heads_up_preflop_allin_quads_over_quads() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 100], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["Qd", "Qh"])).unwrap();
    game.deal_hole(1, cards(&["Ah", "Ad"])).unwrap();

    game.apply_tokens("b6 b199 c").unwrap();

    game.deal_board(cards(&["Ac", "As", "Kc"])).unwrap();
    game.deal_board(cards(&["Qs"])).unwrap();
    game.deal_board(cards(&["Qc"])).unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    assert_eq!(100, game.players()[0].stack);
    assert_eq!(200, game.players()[1].stack);
}

/// A flop raise gets folded to, ending the hand before the turn. The sole
/// remaining seat wins the whole pot regardless of hand strength, so the
/// turn/river cards dealt to reach the mandatory dealing stages are
/// arbitrary.
#[test]
fn flop_raise_folded_to_awards_the_whole_pot() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 100], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["Qd", "Qh"])).unwrap();
    game.deal_hole(1, cards(&["Ah", "Ad"])).unwrap();

    game.apply_tokens("b4 c").unwrap();

    game.deal_board(cards(&["Ac", "As", "Kc"])).unwrap();
    game.apply_tokens("b6 f").unwrap();

    // Seat 1 folded; the remaining dealing stages still have to run before
    // showdown even though no further betting decision is possible.
    assert_eq!(ActorKind::Nature, game.actor());
    game.deal_board(cards(&["Td"])).unwrap();
    game.deal_board(cards(&["3h"])).unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    assert_eq!(205, game.players()[0].stack);
    assert_eq!(95, game.players()[1].stack);
}

/// Four-handed, one fold, two all-ins of different sizes. Exercises
/// side-pot math: seat 1 calls all-in for less than seat 0 and seat 3, so
/// the main pot is contested by all three but the overage only by the two
/// who covered it.
#[test]
fn three_way_allin_builds_a_side_pot() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 100, 300, 200], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["Ks", "Kd"])).unwrap();
    game.deal_hole(1, cards(&["As", "Ad"])).unwrap();
    game.deal_hole(2, cards(&["2h", "2d"])).unwrap();
    game.deal_hole(3, cards(&["7c", "8d"])).unwrap();

    // Seat 2 (first to act, left of the big blind) folds; seat 3 shoves for
    // 199 more, seat 0 calls in full, seat 1 calls all-in for less.
    game.apply_tokens("f b199 c c").unwrap();

    assert_eq!(ActorKind::Nature, game.actor());
    game.deal_board(cards(&["3c", "4h", "9s"])).unwrap();
    game.deal_board(cards(&["Jc"])).unwrap();
    game.deal_board(cards(&["6d"])).unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    assert_eq!(200, game.players()[0].stack);
    assert_eq!(301, game.players()[1].stack);
    assert_eq!(299, game.players()[2].stack);
    assert_eq!(0, game.players()[3].stack);
}

/// Four-handed, every seat shoves preflop and the best hand scoops the
/// entire pot outright (no side pot, since everyone ends up committed for
/// the same amount).
#[test]
fn four_way_allin_scoop() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![100, 100, 100, 100], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["5h", "6d"])).unwrap();
    game.deal_hole(1, cards(&["As", "Ad"])).unwrap();
    game.deal_hole(2, cards(&["Qh", "Qd"])).unwrap();
    game.deal_hole(3, cards(&["7c", "8d"])).unwrap();

    game.apply_tokens("b99 c c c").unwrap();

    assert_eq!(ActorKind::Nature, game.actor());
    game.deal_board(cards(&["3c", "4d", "9h"])).unwrap();
    game.deal_board(cards(&["Jc"])).unwrap();
    game.deal_board(cards(&["Ks"])).unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    assert_eq!(0, game.players()[0].stack);
    assert_eq!(400, game.players()[1].stack);
    assert_eq!(0, game.players()[2].stack);
    assert_eq!(0, game.players()[3].stack);
}

/// Stacks small enough that antes and blinds alone put every seat but the
/// big stack all-in, so every betting stage skips (the driver never calls a
/// betting verb) and the hand is decided purely by forced bets plus the
/// showdown. Builds two layers on top of the main pot from the three
/// distinct commitment levels.
#[test]
fn blinds_only_hand_builds_a_three_way_side_pot_with_no_voluntary_action() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![2, 50, 1], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["As", "Ad"])).unwrap();
    game.deal_hole(1, cards(&["Ks", "Kd"])).unwrap();
    game.deal_hole(2, cards(&["3h", "5d"])).unwrap();

    // Seat 0 and seat 2 are already all-in from ante+blind; seat 1 is the
    // only relevant player left, so every betting stage this hand is
    // skippable and the driver never supplies a betting token.
    assert_eq!(ActorKind::Nature, game.actor());
    game.deal_board(cards(&["2c", "7d", "9h"])).unwrap();
    game.deal_board(cards(&["Jc"])).unwrap();
    game.deal_board(cards(&["4s"])).unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    assert_eq!(5, game.players()[0].stack);
    assert_eq!(48, game.players()[1].stack);
    assert_eq!(0, game.players()[2].stack);
}

/// A check-down to showdown: nobody ever bet-raises, so the whole hand is
/// dealing and check/call only. Checks the structural properties a
/// check-down must have: conservation, and the pot going entirely to the
/// best hand since nobody is ever short-stacked here.
#[test]
fn checked_down_hand_awards_the_whole_pot_to_the_best_hand() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 200], full_deck()).unwrap();
    let starting_total = total_stack(&game);

    game.deal_hole(0, cards(&["Ah", "Ad"])).unwrap();
    game.deal_hole(1, cards(&["2c", "7d"])).unwrap();

    game.apply_tokens("cc cc").unwrap();
    game.deal_board(cards(&["2h", "3h", "4h"])).unwrap();
    game.apply_tokens("cc cc").unwrap();
    game.deal_board(cards(&["9s"])).unwrap();
    game.apply_tokens("cc cc").unwrap();
    game.deal_board(cards(&["Ks"])).unwrap();
    game.apply_tokens("cc cc").unwrap();

    force_through_showdown(&mut game);

    assert!(game.is_terminal());
    assert_eq!(starting_total, total_stack(&game));
    // Seat 0's pair of aces beats seat 1's seven-high; the whole pot (both
    // antes, both blinds, nothing more since nobody raised) goes to seat 0.
    assert!(game.players()[0].stack > 200);
    assert!(game.players()[1].stack < 200);
}

/// The "at-most-one-actor" and "monotone committed" invariants, exercised
/// across a full hand rather than a single state.
#[test]
fn committed_never_decreases_and_exactly_one_actor_is_ever_live() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 100], full_deck()).unwrap();
    let mut last_committed: Vec<u32> = game.players().iter().map(|p| p.committed).collect();

    let check_actor_and_committed = |game: &Game, last_committed: &mut Vec<u32>| {
        let actor_count = match game.actor() {
            ActorKind::None => 0,
            _ => 1,
        };
        assert!(actor_count <= 1);
        for (i, p) in game.players().iter().enumerate() {
            assert!(p.committed >= last_committed[i]);
            last_committed[i] = p.committed;
        }
    };

    game.deal_hole(0, cards(&["Qd", "Qh"])).unwrap();
    check_actor_and_committed(&game, &mut last_committed);
    game.deal_hole(1, cards(&["Ah", "Ad"])).unwrap();
    check_actor_and_committed(&game, &mut last_committed);

    game.apply_tokens("b6 b199 c").unwrap();
    check_actor_and_committed(&game, &mut last_committed);

    game.deal_board(cards(&["Ac", "As", "Kc"])).unwrap();
    game.deal_board(cards(&["Qs"])).unwrap();
    game.deal_board(cards(&["Qc"])).unwrap();
    check_actor_and_committed(&game, &mut last_committed);

    force_through_showdown(&mut game);
    assert!(game.is_terminal());
    assert_eq!(ActorKind::None, game.actor());
}

/// Fold idempotence: once mucked, a seat is out of turn for every
/// subsequent action and their committed chips are never refunded.
#[test]
fn folded_seat_cannot_act_again_and_keeps_no_refund() {
    let mut game = Game::nlhe_with_deck(1, vec![1, 2], vec![200, 100, 300], full_deck()).unwrap();

    game.deal_hole(0, cards(&["2c", "3d"])).unwrap();
    game.deal_hole(1, cards(&["4h", "5s"])).unwrap();
    game.deal_hole(2, cards(&["6c", "7d"])).unwrap();

    game.fold(0).unwrap();
    let committed_at_fold = game.players()[0].committed;

    assert!(matches!(game.fold(0), Err(poker_engine::error::GameError::OutOfTurn { .. })));
    assert!(matches!(
        game.check_call(0),
        Err(poker_engine::error::GameError::OutOfTurn { .. })
    ));

    game.check_call(1).unwrap();
    game.fold(2).unwrap();

    assert_eq!(committed_at_fold, game.players()[0].committed);
}
