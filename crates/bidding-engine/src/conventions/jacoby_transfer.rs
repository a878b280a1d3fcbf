use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Strain, Suit};

/// 2♦ and 2♥ over 1NT, showing five or more cards in the next suit up.
pub struct JacobyTransfer;

const INVITE_MIN_HCP: u8 = 8;
const GAME_MIN_HCP: u8 = 10;
const SUPER_ACCEPT_MIN_HCP: u8 = 17;

fn target(transfer: Call) -> Option<Suit> {
    match transfer.render().as_str() {
        "2D" => Some(Suit::Hearts),
        "2H" => Some(Suit::Spades),
        _ => None,
    }
}

impl JacobyTransfer {
    fn transfer(&self, s: &Situation) -> Option<Proposal> {
        let hand = s.hand;
        let (hearts, spades) = (hand.length(Suit::Hearts), hand.length(Suit::Spades));
        let major = match (hearts >= 5, spades >= 5) {
            (_, true) if spades >= hearts => Suit::Spades,
            (true, _) => Suit::Hearts,
            _ => return None,
        };
        let relay = match major {
            Suit::Spades => Suit::Hearts,
            _ => Suit::Diamonds,
        };
        let call = Call::suit_bid(2, relay);
        Some(
            Proposal::new(call, format!("Jacoby transfer: five or more {}", major.name()))
                .forcing(ForcingLevel::ForcingOneRound)
                .artificial(),
        )
    }

    fn complete(&self, s: &Situation, major: Suit) -> Proposal {
        let super_accept =
            s.hand.length(major) >= 4 && s.hand.hcp() >= SUPER_ACCEPT_MIN_HCP;
        if super_accept {
            Proposal::new(
                Call::suit_bid(3, major),
                format!("Super-accept: four {} and a maximum", major.name()),
            )
        } else {
            Proposal::new(
                Call::suit_bid(2, major),
                format!("Complete the transfer to {}", major.name()),
            )
            .artificial()
        }
    }

    fn responder_rebid(&self, s: &Situation, major: Suit, completion: Call) -> Proposal {
        let hcp = s.hand.hcp();
        let length = s.hand.length(major);
        let name = major.name();
        if completion.level() == Some(3) {
            return if hcp >= 7 {
                Proposal::new(Call::suit_bid(4, major), "Game after the super-accept")
            } else {
                Proposal::new(Call::Pass, "Too weak even opposite a super-accept")
            };
        }
        match (length >= 6, hcp) {
            (true, h) if h >= GAME_MIN_HCP => Proposal::new(
                Call::suit_bid(4, major),
                format!("Game with six or more {name}: {hcp} HCP"),
            ),
            (true, h) if h >= INVITE_MIN_HCP => Proposal::new(
                Call::suit_bid(3, major),
                format!("Invite with six or more {name}: {hcp} HCP"),
            ),
            (false, h) if h >= GAME_MIN_HCP => Proposal::new(
                Call::bid(3, Strain::NoTrump),
                format!("Choice of games with five {name}: {hcp} HCP"),
            ),
            (false, h) if h >= INVITE_MIN_HCP => Proposal::new(
                Call::bid(2, Strain::NoTrump),
                format!("Invite with five {name}: {hcp} HCP"),
            ),
            _ => Proposal::new(Call::Pass, format!("Sign off in {name}: {hcp} HCP")).signoff(),
        }
    }

    fn placement(&self, s: &Situation, major: Suit, rebid: Call) -> Option<Proposal> {
        let maximum = s.hand.hcp() >= 16;
        let fit = s.hand.length(major) >= 3;
        let (call, text) = match rebid.render().as_str() {
            "2N" if fit && maximum => (Call::suit_bid(4, major), "fit and maximum"),
            "2N" if fit => (Call::suit_bid(3, major), "fit, minimum"),
            "2N" if maximum => (Call::bid(3, Strain::NoTrump), "no fit, maximum"),
            "2N" => (Call::Pass, "no fit, minimum"),
            "3N" if fit => (Call::suit_bid(4, major), "choose the major game"),
            "3N" => (Call::Pass, "choose notrump"),
            "3H" | "3S" if maximum => (Call::suit_bid(4, major), "accept the invitation"),
            "3H" | "3S" => (Call::Pass, "decline the invitation"),
            "4H" | "4S" => (Call::Pass, "game reached"),
            _ => return None,
        };
        Some(Proposal::new(call, format!("Transfer: {text}")))
    }
}

impl Convention for JacobyTransfer {
    fn id(&self) -> ConventionId {
        ConventionId::JacobyTransfer
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        let rendered = seq.rendered();
        let calls: Vec<&str> = rendered.iter().map(String::as_str).collect();
        match calls.as_slice() {
            ["1N"] => self.transfer(s),
            ["1N", "2D" | "2H"] => Some(self.complete(s, target(seq.calls[1])?)),
            ["1N", "2D", "2H" | "3H"] | ["1N", "2H", "2S" | "3S"] => {
                Some(self.responder_rebid(s, target(seq.calls[1])?, seq.calls[2]))
            }
            ["1N", "2D", "2H", _] | ["1N", "2H", "2S", _] => {
                self.placement(s, target(seq.calls[1])?, seq.calls[3])
            }
            _ => None,
        }
    }
}
