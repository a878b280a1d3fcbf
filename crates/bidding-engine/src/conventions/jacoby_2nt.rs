use super::{shortest_of, Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Strain, Suit};

/// 2NT over 1♥/1♠: four-card support and an opening hand, game forcing.
pub struct Jacoby2Nt;

const MIN_HCP: u8 = 13;

fn jacoby() -> Call {
    Call::bid(2, Strain::NoTrump)
}

/// HCP opener promised with each rebid.
fn shown_by(rebid: Call, major: Suit) -> u8 {
    if rebid == Call::suit_bid(3, major) {
        18
    } else if rebid == Call::bid(3, Strain::NoTrump) {
        15
    } else {
        12
    }
}

impl Jacoby2Nt {
    fn ask(&self, s: &Situation, major: Suit) -> Option<Proposal> {
        let hand = s.hand;
        if hand.length(major) < 4 || hand.hcp() < MIN_HCP {
            return None;
        }
        Some(
            Proposal::new(
                jacoby(),
                format!("Jacoby 2NT: four-card {} support, game forcing", major.name()),
            )
            .forcing(ForcingLevel::GameForce)
            .artificial(),
        )
    }

    fn opener_rebid(&self, s: &Situation, major: Suit) -> Proposal {
        let hand = s.hand;
        let hcp = hand.hcp();
        let short = shortest_of(hand, Suit::ALL.into_iter().filter(|&x| x != major))
            .filter(|&x| hand.length(x) <= 1);
        match short {
            Some(suit) => Proposal::new(
                Call::suit_bid(3, suit),
                format!("Jacoby 2NT reply: shortness in {}", suit.name()),
            )
            .artificial(),
            None if hcp >= 18 => Proposal::new(
                Call::suit_bid(3, major),
                format!("Jacoby 2NT reply: no shortness, {hcp} HCP"),
            ),
            None if hcp >= 15 => Proposal::new(
                Call::bid(3, Strain::NoTrump),
                format!("Jacoby 2NT reply: medium hand, {hcp} HCP"),
            ),
            None => Proposal::new(
                Call::suit_bid(4, major),
                format!("Jacoby 2NT reply: minimum, {hcp} HCP"),
            )
            .signoff(),
        }
    }

    fn responder_continuation(&self, s: &Situation, major: Suit, rebid: Call) -> Proposal {
        if rebid == Call::suit_bid(4, major) {
            return Proposal::new(Call::Pass, "Jacoby 2NT: opener signed off");
        }
        let estimate = s.hand.hcp() + shown_by(rebid, major);
        if estimate >= s.config.slam.min_combined && s.is_enabled(ConventionId::Blackwood) {
            Proposal::new(
                Call::bid(4, Strain::NoTrump),
                format!("Slam try after Jacoby 2NT: about {estimate} combined HCP"),
            )
            .forcing(ForcingLevel::ForcingOneRound)
            .artificial()
        } else {
            Proposal::new(
                Call::suit_bid(4, major),
                format!("Game after Jacoby 2NT: about {estimate} combined HCP"),
            )
            .signoff()
        }
    }
}

impl Convention for Jacoby2Nt {
    fn id(&self) -> ConventionId {
        ConventionId::Jacoby2Nt
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        let opening = *seq.calls.first()?;
        let major = opening
            .suit()
            .filter(|m| m.is_major() && opening.level() == Some(1))?;
        if seq.calls.len() > 1 && seq.calls[1] != jacoby() {
            return None;
        }
        match seq.calls.as_slice() {
            [_] => self.ask(s, major),
            [_, _] => Some(self.opener_rebid(s, major)),
            [_, _, rebid] => Some(self.responder_continuation(s, major, *rebid)),
            [_, _, _, last] if *last == Call::suit_bid(4, major) => {
                Some(Proposal::new(Call::Pass, "Jacoby 2NT: game reached"))
            }
            _ => None,
        }
    }
}
