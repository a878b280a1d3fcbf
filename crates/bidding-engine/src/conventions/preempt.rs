use super::{Convention, ConventionId, Proposal, Situation};
use types::{Call, Strain, Suit};

/// Weak twos and three- and four-level openings, with responder's raises.
pub struct Preempt;

const MIN_HCP: u8 = 5;
const MAX_HCP: u8 = 10;

/// At least two of the top five honors.
fn good_suit(s: &Situation, suit: Suit) -> bool {
    s.hand.top_honors(suit, 5) >= 2
}

impl Preempt {
    fn open(&self, s: &Situation) -> Option<Proposal> {
        let features = s.features;
        let hcp = features.hcp;
        if features.seat_number == 4
            || features.rule_of_20()
            || !(MIN_HCP..=MAX_HCP).contains(&hcp)
        {
            return None;
        }
        let suit = features.longest_suit;
        let length = features.length(suit);
        if !good_suit(s, suit) {
            return None;
        }
        let (level, kind) = match length {
            6 if suit != Suit::Clubs => (2, "Weak two"),
            7 => (3, "Three-level preempt"),
            l if l >= 8 => (4, "Four-level preempt"),
            _ => return None,
        };
        Some(Proposal::new(
            Call::suit_bid(level, suit),
            format!("{kind}: {length} {}, {hcp} HCP", suit.name()),
        ))
    }

    fn respond(&self, s: &Situation, opening: Call) -> Option<Proposal> {
        let suit = opening.suit()?;
        let level = opening.level()?;
        let hand = s.hand;
        let hcp = hand.hcp();
        let support = hand.length(suit);

        if suit.is_major() {
            let game = Call::suit_bid(4, suit);
            let raise = match level {
                2 if support >= 3 && (hcp >= 16 || (support >= 4 && hcp <= 10)) => game,
                2 if support >= 3 => Call::suit_bid(3, suit),
                3 if support >= 2 && hcp >= 14 => game,
                _ => return None,
            };
            return Some(Proposal::new(
                s.legal(raise)?,
                format!("Raise partner's preempt in {}: {support} trumps, {hcp} HCP", suit.name()),
            ));
        }

        let side_stopped = Suit::ALL
            .into_iter()
            .filter(|&x| x != suit)
            .all(|x| hand.has_stopper(x));
        if hcp >= 16 && side_stopped {
            let call = s.legal(Call::bid(3, Strain::NoTrump))?;
            return Some(Proposal::new(call, "3NT opposite the minor preempt: side suits stopped"));
        }
        if support >= 3 {
            return Some(Proposal::new(
                s.cheapest(suit)?,
                format!("Preemptive raise in {}", suit.name()),
            ));
        }
        None
    }
}

fn is_preempt(call: Call) -> bool {
    match (call.level(), call.strain()) {
        (Some(2), Some(strain)) => strain != Strain::Clubs && strain != Strain::NoTrump,
        (Some(3..=4), Some(strain)) => strain != Strain::NoTrump,
        _ => false,
    }
}

impl Convention for Preempt {
    fn id(&self) -> ConventionId {
        ConventionId::Preempt
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        if s.auction().opening_bid().is_none() {
            return self.open(s);
        }
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        let opening = *seq.calls.first()?;
        if !is_preempt(opening) {
            return None;
        }
        match seq.calls.as_slice() {
            [_] => self.respond(s, opening),
            // Responder's raise or 3NT places the contract.
            [_, response] if response.suit() == opening.suit() || response.strain() == Some(Strain::NoTrump) => {
                Some(Proposal::new(Call::Pass, "Partner placed the contract"))
            }
            _ => None,
        }
    }
}
