use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Strain, Suit};

/// 2♣ over partner's 1NT asking for a four-card major.
pub struct Stayman;

fn bid(level: u8, suit: Suit) -> Call {
    Call::suit_bid(level, suit)
}

impl Stayman {
    fn ask(&self, s: &Situation) -> Option<Proposal> {
        let hand = s.hand;
        let four_card_major = Suit::MAJORS.iter().any(|&m| hand.length(m) == 4);
        let five_card_major = Suit::MAJORS.iter().any(|&m| hand.length(m) >= 5);
        if hand.hcp() < s.config.stayman.ask_min_hcp || !four_card_major || five_card_major {
            return None;
        }
        Some(
            Proposal::new(bid(2, Suit::Clubs), "Stayman: asking for a four-card major")
                .forcing(ForcingLevel::ForcingOneRound)
                .artificial(),
        )
    }

    fn reply(&self, s: &Situation) -> Proposal {
        let hand = s.hand;
        if hand.length(Suit::Hearts) >= 4 {
            Proposal::new(bid(2, Suit::Hearts), "Stayman reply: four hearts")
        } else if hand.length(Suit::Spades) >= 4 {
            Proposal::new(bid(2, Suit::Spades), "Stayman reply: four spades, not four hearts")
        } else {
            Proposal::new(bid(2, Suit::Diamonds), "Stayman reply: no four-card major").artificial()
        }
    }

    /// Responder's second call, by HCP against the configured thresholds.
    fn responder_rebid(&self, s: &Situation, reply: Call) -> Proposal {
        let hcp = s.hand.hcp();
        let thresholds = &s.config.stayman;
        let fit = reply.suit().filter(|&m| m.is_major() && s.hand.length(m) >= 4);

        match fit {
            Some(major) if hcp >= thresholds.game_min_hcp => {
                Proposal::new(bid(4, major), format!("Game in the {} fit: {hcp} HCP", major.name()))
            }
            Some(major) if hcp >= thresholds.invite_min_hcp => Proposal::new(
                bid(3, major),
                format!("Invitational raise in {}: {hcp} HCP", major.name()),
            ),
            Some(_) => Proposal::new(Call::Pass, format!("Stop in the fit: {hcp} HCP")),
            None if hcp >= thresholds.game_min_hcp => Proposal::new(
                Call::bid(3, Strain::NoTrump),
                format!("No major fit, game in notrump: {hcp} HCP"),
            ),
            None if hcp >= thresholds.invite_min_hcp => Proposal::new(
                Call::bid(2, Strain::NoTrump),
                format!("No major fit, invite with 2NT: {hcp} HCP"),
            ),
            None => Proposal::new(Call::Pass, format!("No major fit, pass: {hcp} HCP")),
        }
    }

    /// Opener places the contract after responder's rebid.
    fn placement(&self, s: &Situation, reply: Call, rebid: Call) -> Option<Proposal> {
        let maximum = s.hand.hcp() >= 16;
        let hearts_shown = reply == bid(2, Suit::Hearts);
        let four_spades = s.hand.length(Suit::Spades) >= 4;
        let rendered = rebid.render();

        let (call, text) = match rendered.as_str() {
            // Responder asked for a major, so a 2NT or 3NT without hearts
            // promises spades.
            "2N" if hearts_shown && four_spades && maximum => (bid(4, Suit::Spades), "spade fit, maximum"),
            "2N" if hearts_shown && four_spades => (bid(3, Suit::Spades), "spade fit, minimum"),
            "2N" if maximum => (Call::bid(3, Strain::NoTrump), "accept the invitation"),
            "2N" => (Call::Pass, "decline the invitation"),
            "3N" if hearts_shown && four_spades => (bid(4, Suit::Spades), "spade fit found"),
            "3N" => (Call::Pass, "game reached"),
            "3H" | "3S" if maximum => (
                bid(4, rebid.suit()?),
                "accept the major-suit invitation",
            ),
            "3H" | "3S" => (Call::Pass, "decline the major-suit invitation"),
            "4H" | "4S" => (Call::Pass, "game reached"),
            _ => return None,
        };
        Some(Proposal::new(call, format!("Stayman: {text}")))
    }
}

impl Convention for Stayman {
    fn id(&self) -> ConventionId {
        ConventionId::Stayman
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        let rendered = seq.rendered();
        let calls: Vec<&str> = rendered.iter().map(String::as_str).collect();
        match calls.as_slice() {
            ["1N"] => self.ask(s),
            ["1N", "2C"] => Some(self.reply(s)),
            ["1N", "2C", "2D" | "2H" | "2S"] => Some(self.responder_rebid(s, seq.calls[2])),
            ["1N", "2C", "2D" | "2H" | "2S", _] => self.placement(s, seq.calls[2], seq.calls[3]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, StaymanConfig};
    use crate::conventions::testing::{call_for, propose_with};
    use types::Position;

    /// Responder with four spades, three hearts and `hcp` points.
    fn responder(hcp: u8) -> &'static str {
        match hcp {
            7 => "Q32.432.K32.Q432",
            8 => "Q32.432.K32.K432",
            9 => "K32.432.K32.K432",
            10 => "A32.432.K32.K432",
            _ => unreachable!(),
        }
    }

    #[test]
    fn asks_with_a_four_card_major_and_values() {
        assert_eq!(call_for(&Stayman, responder(9), "1N P").as_deref(), Some("2C"));
        // Too weak to ask.
        assert_eq!(call_for(&Stayman, responder(7), "1N P"), None);
        // Five-card major goes through a transfer instead.
        assert_eq!(call_for(&Stayman, "32.K32.432.AKJ32", "1N P"), None);
        // Interference switches Stayman off.
        assert_eq!(call_for(&Stayman, responder(9), "1N 2D"), None);
    }

    #[test]
    fn opener_replies() {
        assert_eq!(call_for(&Stayman, "AQ2.KJ2.AQ32.K32", "1N P 2C P").as_deref(), Some("2H"));
        assert_eq!(call_for(&Stayman, "AQ2.KJ2.K32.AQ32", "1N P 2C P").as_deref(), Some("2S"));
        assert_eq!(call_for(&Stayman, "AQ32.KJ2.K32.AQ2", "1N P 2C P").as_deref(), Some("2D"));
    }

    #[test]
    fn responder_rebid_boundaries_after_2d() {
        let history = "1N P 2C P 2D P";
        assert_eq!(call_for(&Stayman, responder(7), history).as_deref(), Some("P"));
        assert_eq!(call_for(&Stayman, responder(8), history).as_deref(), Some("2N"));
        assert_eq!(call_for(&Stayman, responder(9), history).as_deref(), Some("2N"));
        assert_eq!(call_for(&Stayman, responder(10), history).as_deref(), Some("3N"));
    }

    #[test]
    fn raised_invite_threshold_moves_the_boundary() {
        let config = EngineConfig {
            stayman: StaymanConfig {
                invite_min_hcp: 9,
                ..StaymanConfig::default()
            },
            ..EngineConfig::default()
        };
        let history = "1N P 2C P 2D P";
        let call = |hcp| {
            propose_with(&Stayman, &config, responder(hcp), Position::North, history)
                .map(|p| p.call.render())
        };
        assert_eq!(call(8).as_deref(), Some("P"));
        assert_eq!(call(9).as_deref(), Some("2N"));
    }

    #[test]
    fn responder_raises_a_found_fit() {
        let history = "1N P 2C P 2S P";
        assert_eq!(call_for(&Stayman, responder(7), history).as_deref(), Some("P"));
        assert_eq!(call_for(&Stayman, responder(9), history).as_deref(), Some("3S"));
        assert_eq!(call_for(&Stayman, responder(10), history).as_deref(), Some("4S"));
    }

    #[test]
    fn opener_places_the_contract() {
        let minimum = "K32.KJ2.Q32.AQ32";
        let maximum = "K32.KJ2.K32.AQ32";
        assert_eq!(call_for(&Stayman, minimum, "1N P 2C P 2S P 3S P").as_deref(), Some("P"));
        assert_eq!(call_for(&Stayman, maximum, "1N P 2C P 2S P 3S P").as_deref(), Some("4S"));
        assert_eq!(call_for(&Stayman, maximum, "1N P 2C P 2D P 2N P").as_deref(), Some("3N"));
        assert_eq!(call_for(&Stayman, minimum, "1N P 2C P 2D P 2N P").as_deref(), Some("P"));
    }

    #[test]
    fn opener_finds_the_second_major() {
        // Opener showed hearts but also holds four spades.
        let both_majors = "Q2.KJ2.AQ32.AK32";
        assert_eq!(
            call_for(&Stayman, both_majors, "1N P 2C P 2H P 3N P").as_deref(),
            Some("4S")
        );
    }
}
