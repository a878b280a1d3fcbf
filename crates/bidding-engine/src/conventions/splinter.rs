use super::{shortest_of, Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Rank, Strain, Suit};

/// Double jump in a new suit over 1♥/1♠: four-card support, game values
/// and a singleton or void in the suit bid.
pub struct Splinter;

const MIN_HCP: u8 = 13;
const MAX_HCP: u8 = 16;

/// Level of the splinter in `short` over an opening of one `major`.
fn splinter_level(major: Suit, short: Suit) -> u8 {
    if short > major {
        3
    } else {
        4
    }
}

fn one_major(call: Call) -> Option<Suit> {
    call.suit()
        .filter(|s| s.is_major() && call.level() == Some(1))
}

fn splinter_suit(major: Suit, call: Call) -> Option<Suit> {
    let suit = call.suit().filter(|&s| s != major)?;
    (call.level() == Some(splinter_level(major, suit))).then_some(suit)
}

impl Splinter {
    fn splinter(&self, s: &Situation, major: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let hcp = hand.hcp();
        if hand.length(major) < 4 || !(MIN_HCP..=MAX_HCP).contains(&hcp) {
            return None;
        }
        let short = shortest_of(hand, Suit::ALL.into_iter().filter(|&x| x != major))?;
        if hand.length(short) > 1 {
            return None;
        }
        Some(
            Proposal::new(
                Call::suit_bid(splinter_level(major, short), short),
                format!(
                    "Splinter: {} support, shortness in {}",
                    major.name(),
                    short.name()
                ),
            )
            .forcing(ForcingLevel::GameForce)
            .artificial(),
        )
    }

    fn opener_rebid(&self, s: &Situation, major: Suit, short: Suit) -> Proposal {
        let hand = s.hand;
        let wasted = [Rank::King, Rank::Queen, Rank::Jack]
            .iter()
            .any(|&r| hand.has(short, r));
        let ask = Call::bid(4, Strain::NoTrump);
        if hand.hcp() >= 16 && !wasted && s.is_enabled(ConventionId::Blackwood) {
            Proposal::new(ask, "Slam interest opposite the splinter: asking for aces")
                .forcing(ForcingLevel::ForcingOneRound)
                .artificial()
        } else {
            let reason = if wasted {
                format!("honors wasted in {}", short.name())
            } else {
                "no slam interest".to_string()
            };
            Proposal::new(Call::suit_bid(4, major), format!("Splinter signoff: {reason}"))
                .signoff()
        }
    }
}

impl Convention for Splinter {
    fn id(&self) -> ConventionId {
        ConventionId::Splinter
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        let major = one_major(*seq.calls.first()?)?;
        match seq.calls.as_slice() {
            [_] => self.splinter(s, major),
            [_, response] => {
                let short = splinter_suit(major, *response)?;
                Some(self.opener_rebid(s, major, short))
            }
            [_, response, rebid] if *rebid == Call::suit_bid(4, major) => {
                splinter_suit(major, *response)?;
                Some(Proposal::new(Call::Pass, "Splinter: game reached"))
            }
            _ => None,
        }
    }
}
