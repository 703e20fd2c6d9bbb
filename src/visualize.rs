use std::fmt::Write;

use crate::action::{CardSource, CardTarget, PlayerMove};
use crate::card::{Card, STACK_COUNT};
use crate::state::{BoardView, SideView};

/// Plain-text rendering of a board snapshot, from the acting side's
/// perspective.
pub fn render_view(view: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Center stacks:");
    for (idx, &height) in view.center.iter().enumerate() {
        let next = match height {
            0 => String::from("A (empty)"),
            h => format!("{}", h + 1),
        };
        let _ = writeln!(out, "  [{idx}] height {height}, needs {next}");
    }
    render_side(&mut out, "You", view.player(false), true);
    render_side(&mut out, "Opponent", view.player(true), false);
    out
}

fn render_side(out: &mut String, label: &str, side: &SideView, show_hand: bool) {
    let pay_off = side
        .pay_off_top
        .map(format_card)
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "{label}: pay-off {pay_off} ({} left)",
        side.pay_off_len
    );
    let mut discard_parts = Vec::with_capacity(STACK_COUNT);
    for idx in 0..STACK_COUNT {
        let top = side
            .discard_top(idx)
            .map(format_card)
            .unwrap_or_else(|| String::from("--"));
        discard_parts.push(format!("{idx}:{top} ({})", side.discard_piles[idx].len()));
    }
    let _ = writeln!(out, "  Discards: {}", discard_parts.join("  "));
    if show_hand {
        if side.hand.is_empty() {
            let _ = writeln!(out, "  Hand: (empty)");
        } else {
            let entries: Vec<String> = side
                .hand
                .iter()
                .enumerate()
                .map(|(idx, card)| format!("{idx}:{}", format_card(*card)))
                .collect();
            let _ = writeln!(out, "  Hand: {}", entries.join("  "));
        }
    }
}

/// Human-readable one-line description of a move.
pub fn describe_move(view: &BoardView, mv: &PlayerMove) -> String {
    let card = format_card(mv.card);
    let source = match mv.source {
        CardSource::Hand => String::from("hand"),
        CardSource::PayOff => String::from("pay-off pile"),
        CardSource::Discard(pile) => format!("discard pile {pile}"),
    };
    match mv.target {
        CardTarget::Center(stack) => {
            let needs = view.center.get(stack).map(|h| h + 1).unwrap_or(0);
            format!("Play {card} from {source} to center stack {stack} (needs {needs})")
        }
        CardTarget::Discard(pile) => format!("Discard {card} to pile {pile}"),
    }
}

fn format_card(card: Card) -> String {
    card.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::state::SideView;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let acting = SideView {
            hand: vec![Card::new(Rank::Ace, Suit::Spades)],
            pay_off_top: Some(Card::new(Rank::Five, Suit::Hearts)),
            pay_off_len: 20,
            ..SideView::default()
        };
        let view = BoardView::new(acting, SideView::default(), [0; STACK_COUNT]);
        let text = render_view(&view);
        assert!(text.contains("Center stacks:"));
        assert!(text.contains("Hand: 0:A\u{2660}"));
        assert!(text.contains("pay-off 5\u{2665} (20 left)"));

        let mv = PlayerMove::to_center(Card::new(Rank::Ace, Suit::Spades), CardSource::Hand, 1);
        let desc = describe_move(&view, &mv);
        assert!(desc.contains("center stack 1"));
        let discard = PlayerMove::to_discard(Card::new(Rank::Ace, Suit::Spades), 2);
        assert!(describe_move(&view, &discard).contains("Discard"));
    }
}
