//! SAYC bidding decisions: given a hand, the auction so far and the seat to
//! act, pick the next call and explain it.
//!
//! Named conventions are consulted first, then the natural rules in
//! `rules/sayc.yaml`, then a default Pass. Two overlays run last: slam
//! exploration and the forcing-obligation check.

pub mod config;
pub mod context;
pub mod conventions;
pub mod error;
pub mod features;
pub mod forcing;
pub mod history;
pub mod orchestrator;
pub mod point_ranges;
pub mod policies;
pub mod rules;
pub mod session;

pub use config::{EngineConfig, ExplanationLevel};
pub use conventions::{Convention, ConventionId, ConventionMetadata, Proposal};
pub use error::{EngineError, Result, SchemaError};
pub use forcing::{ForcingLevel, ForcingState};
pub use history::BidRecord;
pub use orchestrator::{BidDecision, BiddingEngine, DecisionMetadata, DecisionSource};
pub use policies::Policy;
pub use rules::RuleBook;
pub use session::DealSession;

use once_cell::sync::Lazy;
use serde_json::Value;
use types::{Auction, Hand, Position};

static DEFAULT_ENGINE: Lazy<BiddingEngine> = Lazy::new(BiddingEngine::default);

/// The dealer for which `seat` is next to act after `len` calls.
fn implied_dealer(seat: Position, len: usize) -> Position {
    seat.advance((4 - len % 4) % 4)
}

/// One-shot entry point for callers holding loosely-typed history.
///
/// History entries are call strings or `{"bid": ...}` objects; unreadable
/// ones are taken as Pass and listed in `metadata.normalized_entries`.
/// Without a dealer, the one consistent with `seat` acting next is assumed.
pub fn get_next_bid(
    hand: &Hand,
    history: &[Value],
    seat: Position,
    dealer: Option<Position>,
    level: Option<ExplanationLevel>,
) -> Result<BidDecision> {
    let normalized = history::normalize(history);
    let dealer = dealer.unwrap_or_else(|| implied_dealer(seat, normalized.calls.len()));
    let auction = Auction::from_calls(dealer, normalized.calls);

    let engine = &*DEFAULT_ENGINE;
    let forcing = ForcingState::replay(&auction, seat.partnership());
    let level = level.unwrap_or(engine.config().explanation_level);
    let mut decision = engine.decide_with(hand, &auction, seat, forcing, level)?;
    decision.metadata.normalized_entries = normalized.replaced;
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dealer_is_implied_by_history_length() {
        assert_eq!(implied_dealer(Position::South, 0), Position::South);
        assert_eq!(implied_dealer(Position::South, 2), Position::North);
        assert_eq!(implied_dealer(Position::West, 5), Position::South);
    }

    #[test]
    fn one_shot_call_reports_replaced_entries() {
        let hand = Hand::parse("Q32.432.K32.K432");
        let history = [json!("1N"), json!({"bid": "P"}), json!(7)];
        // The unreadable third entry becomes a Pass, so West is to act.
        let decision = get_next_bid(&hand, &history, Position::West, None, None).unwrap();
        assert_eq!(decision.metadata.normalized_entries, [2]);
        let err = get_next_bid(&hand, &history, Position::West, Some(Position::East), None).unwrap_err();
        assert!(matches!(err, EngineError::OutOfTurn { .. }));
    }

    #[test]
    fn empty_history_opens() {
        let hand = Hand::parse("AK2.Q32.KJ32.K32");
        let decision =
            get_next_bid(&hand, &[], Position::North, None, Some(ExplanationLevel::Simple)).unwrap();
        assert_eq!(decision.call.render(), "1N");
        assert_eq!(decision.explanation, "1NT opening");
    }
}
