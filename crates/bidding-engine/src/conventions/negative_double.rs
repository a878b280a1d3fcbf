use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Position, Strain, Suit};

/// Responder's double of an overcall of partner's one-of-a-suit opening,
/// showing the unbid suits.
pub struct NegativeDouble;

/// Highest overcall the double applies to.
fn ceiling() -> Call {
    Call::suit_bid(2, Suit::Spades)
}

/// Opening and overcall suits when the auction so far is exactly
/// partner's one-suit opening and a suit overcall by `seat`'s right.
fn opening_and_overcall(calls: &[(Position, Call)], seat: Position) -> Option<(Suit, Call)> {
    let [(opener, opening), (overcaller, overcall)] = calls else {
        return None;
    };
    let opened = opening.suit().filter(|_| opening.level() == Some(1))?;
    let valid = *opener == seat.partner()
        && *overcaller == seat.rho()
        && overcall.suit().is_some()
        && !overcall.outranks(&ceiling());
    valid.then_some((opened, *overcall))
}

fn unbid(opened: Suit, overcalled: Suit) -> impl Iterator<Item = Suit> {
    Suit::ALL
        .into_iter()
        .filter(move |&s| s != opened && s != overcalled)
}

fn from_opening(s: &Situation) -> Vec<(Position, Call)> {
    s.auction()
        .iter()
        .skip_while(|(_, c)| !c.is_bid())
        .collect()
}

impl NegativeDouble {
    fn double(&self, s: &Situation, opened: Suit, overcall: Call) -> Option<Proposal> {
        let hand = s.hand;
        let overcalled = overcall.suit()?;
        let min_hcp = if overcall.level() == Some(1) { 6 } else { 8 };
        if hand.hcp() < min_hcp {
            return None;
        }
        let majors: Vec<Suit> = unbid(opened, overcalled).filter(|s| s.is_major()).collect();
        // A five-card major that fits at the one level is bid naturally.
        let natural = majors.iter().any(|&m| {
            hand.length(m) >= 5 && s.cheapest(m).and_then(|c| c.level()) == Some(1)
        });
        if natural {
            return None;
        }
        let shown: Vec<Suit> = if majors.is_empty() {
            unbid(opened, overcalled).collect()
        } else {
            majors
        };
        if shown.iter().any(|&x| hand.length(x) < 4) {
            return None;
        }
        let names: Vec<&str> = shown.iter().map(|x| x.name()).collect();
        Some(
            Proposal::new(
                Call::Double,
                format!("Negative double: four or more {}", names.join(" and ")),
            )
            .forcing(ForcingLevel::ForcingOneRound)
            .artificial(),
        )
    }

    fn opener_rebid(&self, s: &Situation, opened: Suit, overcalled: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let hcp = hand.hcp();

        let major = unbid(opened, overcalled)
            .filter(|m| m.is_major() && hand.length(*m) >= 4)
            .max_by_key(|&m| (hand.length(m), m));
        if let Some(major) = major {
            let cheapest = s.cheapest(major)?;
            let call = if hcp >= 17 {
                cheapest
                    .level()
                    .and_then(|l| s.legal(Call::suit_bid(l + 1, major)))
                    .unwrap_or(cheapest)
            } else {
                cheapest
            };
            return Some(Proposal::new(
                call,
                format!("Opener shows four {} after the negative double", major.name()),
            ));
        }
        if hand.has_stopper(overcalled) && hand.is_balanced() {
            return Some(Proposal::new(
                s.cheapest(Strain::NoTrump)?,
                format!("Balanced with a {} stopper", overcalled.name()),
            ));
        }
        if hand.length(opened) >= 6 {
            return Some(Proposal::new(
                s.cheapest(opened)?,
                format!("Rebid six or more {}", opened.name()),
            ));
        }
        let minor = unbid(opened, overcalled)
            .filter(|m| m.is_minor() && hand.length(*m) >= 4)
            .max_by_key(|&m| (hand.length(m), m));
        let (suit, text) = match minor {
            Some(minor) => (minor, format!("Four or more {}", minor.name())),
            None => (opened, format!("Nothing better than {}", opened.name())),
        };
        Some(Proposal::new(s.cheapest(suit)?, text))
    }
}

impl Convention for NegativeDouble {
    fn id(&self) -> ConventionId {
        ConventionId::NegativeDouble
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let calls = from_opening(s);
        let seat = s.seat();
        match calls.as_slice() {
            [_, _] => {
                let (opened, overcall) = opening_and_overcall(&calls, seat)?;
                self.double(s, opened, overcall)
            }
            // Opener, after partner's double and a pass on the right.
            [first, second, (doubler, Call::Double), (_, Call::Pass)] => {
                if *doubler != seat.partner() {
                    return None;
                }
                let (opened, overcall) = opening_and_overcall(&[*first, *second], *doubler)?;
                self.opener_rebid(s, opened, overcall.suit()?)
            }
            _ => None,
        }
    }
}
