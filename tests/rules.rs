use spitebot::action::{CardSource, PlayerMove};
use spitebot::card::{self, Card, HAND_SIZE, Rank, Suit};
use spitebot::{GameBuilder, GameError, GameStatus, InvalidMove};

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Hearts)
}

/// Assembles an injectable deck from segments given in draw order. Cards are
/// dealt by popping from the deck's end: player 0's pay-off first, then its
/// hand, then player 1's pay-off and hand. A pile's top is the last card of
/// its draw-order segment; the stock's top is the last card of `stock`.
fn build_deck(
    p0_pay_off: &[Card],
    p0_hand: &[Card],
    p1_pay_off: &[Card],
    p1_hand: &[Card],
    stock: &[Card],
) -> Vec<Card> {
    assert_eq!(p0_pay_off.len(), p1_pay_off.len());
    assert_eq!(p0_hand.len(), HAND_SIZE);
    assert_eq!(p1_hand.len(), HAND_SIZE);
    let mut deck = Vec::new();
    deck.extend_from_slice(stock);
    deck.extend(p1_hand.iter().rev());
    deck.extend(p1_pay_off.iter().rev());
    deck.extend(p0_hand.iter().rev());
    deck.extend(p0_pay_off.iter().rev());
    deck
}

fn filler_hand() -> [Card; HAND_SIZE] {
    [c(Rank::Nine); HAND_SIZE]
}

#[test]
fn initial_setup_deals_standard_shapes() -> Result<(), GameError> {
    let deck = card::full_deck(2, false);
    let deck_len = deck.len();
    let game = GameBuilder::new().with_deck(deck).build()?;
    for player in 0..2 {
        assert_eq!(game.pay_off_len(player), 20);
        assert_eq!(game.hand_len(player), HAND_SIZE);
        for pile in 0..4 {
            assert!(game.discard_pile(player, pile).is_empty());
        }
    }
    for stack in 0..4 {
        assert!(game.center_stack(stack).is_empty());
    }
    assert_eq!(game.stock_len(), deck_len - 2 * (20 + HAND_SIZE));
    assert!(matches!(game.status(), GameStatus::Ongoing));

    // The view hides the opponent's hand entirely.
    let view = game.view();
    assert_eq!(view.player(false).hand.len(), HAND_SIZE);
    assert!(view.player(true).hand.is_empty());
    assert_eq!(view.player(true).pay_off_len, 20);
    Ok(())
}

#[test]
fn higher_pay_off_top_opens_the_game() -> Result<(), GameError> {
    let deck = build_deck(
        &[c(Rank::Nine)],
        &filler_hand(),
        &[c(Rank::Four)],
        &filler_hand(),
        &[],
    );
    let game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 0);

    let deck = build_deck(
        &[c(Rank::Four)],
        &filler_hand(),
        &[c(Rank::Nine)],
        &filler_hand(),
        &[],
    );
    let game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 1);

    // Equal tops fall to player 1, matching the strict-greater rule.
    let deck = build_deck(
        &[c(Rank::Four)],
        &filler_hand(),
        &[c(Rank::Four)],
        &filler_hand(),
        &[],
    );
    let game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 1);
    Ok(())
}

#[test]
fn center_stack_accepts_ranks_in_strict_order() -> Result<(), GameError> {
    let hand = [
        c(Rank::Ace),
        c(Rank::Two),
        c(Rank::Three),
        c(Rank::Four),
        c(Rank::Five),
    ];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &[c(Rank::Ten); 6],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 0);

    assert!(game.can_place_card_in_center(0, c(Rank::Ace)));
    assert!(!game.can_place_card_in_center(0, c(Rank::Two)));
    game.apply_move(PlayerMove::to_center(c(Rank::Ace), CardSource::Hand, 0))?;
    assert!(game.can_place_card_in_center(0, c(Rank::Two)));
    assert!(!game.can_place_card_in_center(0, c(Rank::Three)));
    assert!(!game.can_place_card_in_center(0, c(Rank::Ace)));

    let err = game
        .apply_move(PlayerMove::to_center(c(Rank::Three), CardSource::Hand, 0))
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidMove(InvalidMove::IllegalCenterPlacement { .. })
    ));
    Ok(())
}

#[test]
fn wild_high_plays_anywhere_but_never_discards() -> Result<(), GameError> {
    let hand = [
        c(Rank::Ace),
        c(Rank::Two),
        c(Rank::King),
        c(Rank::Four),
        c(Rank::Five),
    ];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &[c(Rank::Ten); 6],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;

    // Legal on an empty stack and on any height.
    assert!(game.can_place_card_in_center(0, c(Rank::King)));
    game.apply_move(PlayerMove::to_center(c(Rank::Ace), CardSource::Hand, 0))?;
    game.apply_move(PlayerMove::to_center(c(Rank::Two), CardSource::Hand, 0))?;
    assert!(game.can_place_card_in_center(0, c(Rank::King)));
    // The king stands in for the three; the four continues on top of it.
    game.apply_move(PlayerMove::to_center(c(Rank::King), CardSource::Hand, 0))?;
    assert!(game.can_place_card_in_center(0, c(Rank::Four)));
    game.apply_move(PlayerMove::to_center(c(Rank::Four), CardSource::Hand, 0))?;

    let hand = [
        c(Rank::King),
        c(Rank::Two),
        c(Rank::Three),
        c(Rank::Four),
        c(Rank::Five),
    ];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &[c(Rank::Ten); 6],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    let err = game
        .apply_move(PlayerMove::to_discard(c(Rank::King), 0))
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidMove(InvalidMove::DiscardedWildHigh(_))
    ));
    Ok(())
}

#[test]
fn emptied_hand_refills_from_the_stock() -> Result<(), GameError> {
    let hand = [
        c(Rank::Ace),
        c(Rank::Two),
        c(Rank::Three),
        c(Rank::Four),
        c(Rank::Five),
    ];
    // Stock top must supply the refill; the last five stock cards arrive in
    // pop order.
    let stock = [c(Rank::Ten), c(Rank::Ten), c(Rank::Ten), c(Rank::Ten), c(Rank::Ten)];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &stock,
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    let stock_before = game.stock_len();
    for rank in [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five] {
        game.apply_move(PlayerMove::to_center(c(rank), CardSource::Hand, 0))?;
    }
    assert_eq!(game.hand_len(0), HAND_SIZE);
    assert_eq!(game.stock_len(), stock_before - HAND_SIZE);
    Ok(())
}

#[test]
fn discard_hands_the_turn_over_and_refills() -> Result<(), GameError> {
    let p0_hand = [
        c(Rank::Ace),
        c(Rank::Two),
        c(Rank::Seven),
        c(Rank::Eight),
        c(Rank::Nine),
    ];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &p0_hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &[c(Rank::Ten); 8],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 0);

    game.apply_move(PlayerMove::to_center(c(Rank::Ace), CardSource::Hand, 0))?;
    game.apply_move(PlayerMove::to_center(c(Rank::Two), CardSource::Hand, 0))?;
    game.apply_move(PlayerMove::to_discard(c(Rank::Seven), 1))?;
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.discard_pile(0, 1), &[c(Rank::Seven)]);
    // Player 0 ended the turn holding two cards; its refill waits for its
    // own next turn start.
    assert_eq!(game.hand_len(0), 2);

    game.apply_move(PlayerMove::to_discard(c(Rank::Nine), 0))?;
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.hand_len(0), HAND_SIZE);
    Ok(())
}

#[test]
fn completed_center_stack_recycles_into_the_stock() -> Result<(), GameError> {
    let p0_hand = [
        c(Rank::Ace),
        c(Rank::Two),
        c(Rank::Three),
        c(Rank::Four),
        c(Rank::Five),
    ];
    // Two refills worth of playable cards, then the jack and queen finish
    // the stack. Pop order means the refill segments are listed top-last.
    let stock = [
        c(Rank::King),
        c(Rank::King),
        c(Rank::King),
        c(Rank::Queen),
        c(Rank::Jack),
        c(Rank::Ten),
        c(Rank::Nine),
        c(Rank::Eight),
        c(Rank::Seven),
        c(Rank::Six),
    ];
    let deck = build_deck(
        &[c(Rank::Queen)],
        &p0_hand,
        &[c(Rank::Two)],
        &filler_hand(),
        &stock,
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;

    for rank in [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five] {
        game.apply_move(PlayerMove::to_center(c(rank), CardSource::Hand, 0))?;
    }
    // Refill delivered 6..10 (pop order reverses the stock tail).
    for rank in [Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten] {
        game.apply_move(PlayerMove::to_center(c(rank), CardSource::Hand, 0))?;
    }
    let stock_before = game.stock_len();
    game.apply_move(PlayerMove::to_center(c(Rank::Jack), CardSource::Hand, 0))?;
    assert_eq!(game.center_stack(0).len(), 11);
    game.apply_move(PlayerMove::to_center(c(Rank::Queen), CardSource::Hand, 0))?;
    // Twelve cards went back under the stock.
    assert_eq!(game.center_stack(0).len(), 0);
    assert_eq!(game.stock_len(), stock_before + 12);
    Ok(())
}

#[test]
fn emptying_the_pay_off_wins_the_game() -> Result<(), GameError> {
    let deck = build_deck(
        &[c(Rank::King)],
        &filler_hand(),
        &[c(Rank::Two)],
        &filler_hand(),
        &[c(Rank::Ten); 4],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    assert_eq!(game.current_player(), 0);
    game.apply_move(PlayerMove::to_center(c(Rank::King), CardSource::PayOff, 0))?;
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(0));
    assert!(matches!(
        game.status(),
        GameStatus::Finished { winner: 0 }
    ));
    let err = game
        .apply_move(PlayerMove::to_discard(c(Rank::Nine), 0))
        .unwrap_err();
    assert!(matches!(err, GameError::GameOver));
    Ok(())
}

#[test]
fn missing_source_card_is_rejected() -> Result<(), GameError> {
    let deck = build_deck(
        &[c(Rank::Queen)],
        &filler_hand(),
        &[c(Rank::Two)],
        &filler_hand(),
        &[],
    );
    let mut game = GameBuilder::new()
        .with_pay_off_size(1)
        .with_deck(deck)
        .build()?;
    let err = game
        .apply_move(PlayerMove::to_discard(c(Rank::Three), 0))
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidMove(InvalidMove::CardNotAtSource { .. })
    ));
    Ok(())
}

#[test]
fn undersized_deck_is_rejected() {
    let err = GameBuilder::new()
        .with_deck(vec![c(Rank::Ace); 10])
        .build()
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidConfiguration(_)));
}

#[test]
fn jokers_enter_the_deck_on_request() {
    assert_eq!(card::full_deck(2, true).len(), 108);
    assert!(
        card::full_deck(2, true)
            .iter()
            .any(|card| card.rank == Rank::Joker)
    );
    assert!(
        card::full_deck(2, false)
            .iter()
            .all(|card| card.rank != Rank::Joker)
    );
}
