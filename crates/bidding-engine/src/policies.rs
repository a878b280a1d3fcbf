//! Safety-net overlays applied after the call has been chosen.
//!
//! An overlay can only replace the chosen call with another legal call, and
//! running it again on its own output changes nothing.

use crate::conventions::{ConventionId, Situation};
use crate::forcing::{ForcingLevel, ForcingState};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use types::{Call, Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    SlamExploration,
    ForcingObligation,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::SlamExploration, Policy::ForcingObligation];

    pub fn name(self) -> &'static str {
        match self {
            Policy::SlamExploration => "slam_exploration",
            Policy::ForcingObligation => "forcing_obligation",
        }
    }

    fn redirect(self, call: Call, s: &Situation, forcing: &ForcingState) -> Option<Redirect> {
        match self {
            Policy::SlamExploration => slam_exploration(call, s),
            Policy::ForcingObligation => forcing_obligation(call, s, forcing),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A replacement call proposed by an overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub policy: Policy,
    pub call: Call,
    pub explanation: String,
    pub forcing: ForcingLevel,
    /// Convention the replacement call belongs to.
    pub convention: Option<ConventionId>,
}

/// Run every overlay in order over `call`. Returns the last redirect, if any
/// overlay fired.
pub fn apply(call: Call, s: &Situation, forcing: &ForcingState) -> Option<Redirect> {
    let mut current = call;
    let mut last = None;
    for policy in Policy::ALL {
        if let Some(redirect) = policy.redirect(current, s, forcing) {
            debug!(
                policy = policy.name(),
                from = %current,
                to = %redirect.call,
                "overlay redirected the call"
            );
            current = redirect.call;
            last = Some(redirect);
        }
    }
    last
}

fn ace_ask() -> Call {
    Call::bid(4, Strain::NoTrump)
}

fn slam_exploration(call: Call, s: &Situation) -> Option<Redirect> {
    let game_calls = [
        Call::bid(3, Strain::NoTrump),
        Call::suit_bid(4, Suit::Hearts),
        Call::suit_bid(4, Suit::Spades),
    ];
    if !game_calls.contains(&call) || !s.is_enabled(ConventionId::Blackwood) {
        return None;
    }
    let thresholds = &s.config.slam;
    let features = s.features;
    let combined = s.context.combined_estimate;
    let strong_enough = combined >= thresholds.min_combined
        && features.hcp >= thresholds.min_own_hcp
        && s.context.partner_min_hcp >= thresholds.min_partner_shown;
    let seat = s.seat();
    let asked = s
        .auction()
        .iter()
        .any(|(p, c)| seat.partnership().contains(p) && c == ace_ask());
    if !strong_enough || asked || !s.is_legal(ace_ask()) {
        return None;
    }
    Some(Redirect {
        policy: Policy::SlamExploration,
        call: ace_ask(),
        explanation: format!(
            "Slam exploration: about {combined} combined HCP, asking for aces instead of {call}"
        ),
        forcing: ForcingLevel::ForcingOneRound,
        convention: Some(ConventionId::Blackwood),
    })
}

/// Whether a game force still binds: no game bid by the partnership yet and
/// the last bid is ours.
fn below_game(s: &Situation) -> bool {
    let partnership = s.seat().partnership();
    if s.auction().game_reached_by(partnership) {
        return false;
    }
    match s.auction().last_bid() {
        Some((p, _)) => partnership.contains(p),
        None => true,
    }
}

fn forcing_obligation(call: Call, s: &Situation, forcing: &ForcingState) -> Option<Redirect> {
    if !call.is_pass() {
        return None;
    }
    let seat = s.seat();
    let rho_passed = s.auction().last_call_by(seat.rho()).map_or(true, |c| c.is_pass());
    let bound = match forcing.level {
        ForcingLevel::GameForce => below_game(s),
        ForcingLevel::ForcingOneRound => forcing.binds(seat) && rho_passed,
        ForcingLevel::NonForcing => false,
    };
    if !bound {
        return None;
    }

    let features = s.features;
    let hand = s.hand;
    let partner_suit = features
        .partner_last_suit
        .filter(|&x| hand.length(x) >= 3)
        .and_then(|x| s.cheapest(x).map(|c| (c, format!("support for {}", x.name()))));
    let notrump = || {
        hand.is_balanced()
            .then(|| s.cheapest(Strain::NoTrump))
            .flatten()
            .map(|c| (c, "balanced".to_string()))
    };
    let own = || {
        let suit = hand.longest_suit();
        s.cheapest(suit).map(|c| (c, format!("longest suit {}", suit.name())))
    };
    let (replacement, reason) = partner_suit.or_else(notrump).or_else(own)?;

    Some(Redirect {
        policy: Policy::ForcingObligation,
        call: replacement,
        explanation: format!("Partner's call is {}: cannot pass, {reason}", forcing.level),
        forcing: ForcingLevel::NonForcing,
        convention: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::context::infer;
    use crate::features::extract;
    use types::{Auction, Hand, Partnership, Position};

    fn run(hand: &str, calls: &str, call: &str, forcing: ForcingState) -> Option<Redirect> {
        let config = EngineConfig::default();
        let hand = Hand::parse(hand);
        let auction = Auction::bidding(Position::North, calls);
        let seat = auction.current_player();
        let features = extract(&hand, &auction, seat);
        let context = infer(&auction, &features);
        let features = features.with_context(&context);
        let situation = Situation {
            hand: &hand,
            features: &features,
            context: &context,
            config: &config,
        };
        let call: Call = call.parse().unwrap();
        apply(call, &situation, &forcing)
    }

    #[test]
    fn strong_responder_explores_slam() {
        // 18 HCP opposite a 15-17 notrump.
        let redirect = run("AK2.KQ2.Q32.KJ32", "1N P", "3N", ForcingState::default()).unwrap();
        assert_eq!(redirect.policy, Policy::SlamExploration);
        assert_eq!(redirect.call.render(), "4N");
        assert_eq!(redirect.convention, Some(ConventionId::Blackwood));
    }

    #[test]
    fn no_slam_try_with_less() {
        assert!(run("AK2.Q32.QJ2.KJ32", "1N P", "3N", ForcingState::default()).is_none());
        // Other calls are left alone.
        assert!(run("AK2.KQ2.Q32.KJ32", "1N P", "2N", ForcingState::default()).is_none());
    }

    #[test]
    fn redirect_is_idempotent() {
        let redirect = run("AK2.KQ2.Q32.KJ32", "1N P", "3N", ForcingState::default()).unwrap();
        let again = run("AK2.KQ2.Q32.KJ32", "1N P", &redirect.call.render(), ForcingState::default());
        assert!(again.is_none());
    }

    #[test]
    fn forced_opener_does_not_pass() {
        let auction = Auction::bidding(Position::North, "1C P 1H P");
        let forcing = ForcingState::replay(&auction, Position::North.partnership());
        let redirect = run("AQ32.K32.432.K32", "1C P 1H P", "P", forcing).unwrap();
        assert_eq!(redirect.policy, Policy::ForcingObligation);
        assert_eq!(redirect.call.render(), "2H");
    }

    #[test]
    fn pass_is_fine_when_nothing_is_forcing() {
        let auction = Auction::bidding(Position::North, "1C P 1N P");
        let forcing = ForcingState::replay(&auction, Position::North.partnership());
        assert!(run("AQ32.K32.432.K32", "1C P 1N P", "P", forcing).is_none());
    }

    #[test]
    fn game_force_holds_until_game_is_bid() {
        let calls = "2C P 2D P 2H P";
        let forcing = ForcingState::replay(&Auction::bidding(Position::North, calls), Partnership::NS);
        let redirect = run("432.Q432.432.432", calls, "P", forcing).unwrap();
        assert_eq!(redirect.policy, Policy::ForcingObligation);
    }

    #[test]
    fn game_force_is_spent_once_game_was_bid() {
        // Opener moved on from 3NT; responder may stop.
        let calls = "2C P 2D P 2N P 3N P 4D P";
        let forcing = ForcingState::replay(&Auction::bidding(Position::North, calls), Partnership::NS);
        assert!(forcing.is_game_forcing());
        assert!(run("432.Q432.432.432", calls, "P", forcing).is_none());
    }
}
