use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Position, Strain, Suit};

/// Direct cuebid of the opening suit showing a two-suiter: both majors over
/// a minor, the other major and a minor over a major.
pub struct Michaels;

fn in_range(hcp: u8) -> bool {
    (8..=12).contains(&hcp) || hcp >= 16
}

fn minor_ask() -> Call {
    Call::bid(2, Strain::NoTrump)
}

/// The opening suit if the auction starts with an opponent's one-suit
/// opening directly followed by `cuebidder`'s cuebid of it.
fn cuebid_of(calls: &[(Position, Call)], cuebidder: Position) -> Option<Suit> {
    let [(opener, opening), (bidder, cuebid), ..] = calls else {
        return None;
    };
    let suit = opening.suit().filter(|_| opening.level() == Some(1))?;
    let valid = *opener == cuebidder.rho()
        && *bidder == cuebidder
        && *cuebid == Call::suit_bid(2, suit);
    valid.then_some(suit)
}

impl Michaels {
    fn cuebid(&self, s: &Situation, opened: Suit) -> Option<Proposal> {
        let hand = s.hand;
        if !in_range(hand.hcp()) {
            return None;
        }
        let shows = if opened.is_minor() {
            Suit::MAJORS.iter().all(|&m| hand.length(m) >= 5)
        } else {
            hand.length(opened.sibling()) >= 5
                && Suit::MINORS.iter().any(|&m| hand.length(m) >= 5)
        };
        if !shows {
            return None;
        }
        let text = if opened.is_minor() {
            "Michaels: five-five in the majors".to_string()
        } else {
            format!("Michaels: five {} and a five-card minor", opened.sibling().name())
        };
        Some(
            Proposal::new(Call::suit_bid(2, opened), text)
                .forcing(ForcingLevel::ForcingOneRound)
                .artificial(),
        )
    }

    fn advance(&self, s: &Situation, opened: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let hcp = hand.hcp();
        let major = if opened.is_minor() {
            let (h, sp) = (hand.length(Suit::Hearts), hand.length(Suit::Spades));
            if sp > h {
                Suit::Spades
            } else {
                Suit::Hearts
            }
        } else {
            opened.sibling()
        };
        let support = hand.length(major);

        if opened.is_major() && support < 3 {
            return Some(
                Proposal::new(minor_ask(), "Asking for partner's minor")
                    .forcing(ForcingLevel::ForcingOneRound)
                    .artificial(),
            );
        }
        let cheapest = s.cheapest(major)?;
        let call = if hcp >= 13 && support >= 4 {
            s.legal(Call::suit_bid(4, major)).unwrap_or(cheapest)
        } else if hcp >= 10 {
            cheapest
                .level()
                .and_then(|l| s.legal(Call::suit_bid(l + 1, major)))
                .unwrap_or(cheapest)
        } else {
            cheapest
        };
        Some(Proposal::new(
            call,
            format!("Choosing {} opposite Michaels: {hcp} HCP", major.name()),
        ))
    }

    fn show_minor(&self, s: &Situation) -> Option<Proposal> {
        let hand = s.hand;
        let minor = if hand.length(Suit::Clubs) > hand.length(Suit::Diamonds) {
            Suit::Clubs
        } else {
            Suit::Diamonds
        };
        Some(Proposal::new(
            s.legal(Call::suit_bid(3, minor))?,
            format!("Michaels: the minor is {}", minor.name()),
        ))
    }
}

impl Convention for Michaels {
    fn id(&self) -> ConventionId {
        ConventionId::Michaels
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seat = s.seat();
        let calls: Vec<(Position, Call)> = s
            .auction()
            .iter()
            .skip_while(|(_, c)| !c.is_bid())
            .collect();
        match calls.as_slice() {
            [(opener, opening)] if *opener == seat.rho() => {
                let suit = opening.suit().filter(|_| opening.level() == Some(1))?;
                self.cuebid(s, suit)
            }
            [_, _, (_, Call::Pass)] => self.advance(s, cuebid_of(&calls, seat.partner())?),
            [_, _, (_, Call::Pass), (_, ask), (_, Call::Pass)] if *ask == minor_ask() => {
                let opened = cuebid_of(&calls, seat)?;
                if opened.is_minor() {
                    return None;
                }
                self.show_minor(s)
            }
            _ => None,
        }
    }
}
