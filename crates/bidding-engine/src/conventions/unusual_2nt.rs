use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Position, Strain, Suit};

/// Jump to 2NT over an opponent's one-suit opening, showing five-five in
/// the two lowest unbid suits.
pub struct Unusual2Nt;

const MIN_HCP: u8 = 8;

fn two_notrump() -> Call {
    Call::bid(2, Strain::NoTrump)
}

/// The two lowest suits other than `opened`.
fn shown_suits(opened: Suit) -> [Suit; 2] {
    let mut lowest = Suit::ALL.into_iter().filter(|&s| s != opened);
    match (lowest.next(), lowest.next()) {
        (Some(a), Some(b)) => [a, b],
        _ => [Suit::Clubs, Suit::Diamonds],
    }
}

fn one_suit_opening(call: Call) -> Option<Suit> {
    call.suit().filter(|_| call.level() == Some(1))
}

impl Unusual2Nt {
    fn jump(&self, s: &Situation, opened: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let suits = shown_suits(opened);
        if hand.hcp() < MIN_HCP || suits.iter().any(|&x| hand.length(x) < 5) {
            return None;
        }
        Some(
            Proposal::new(
                two_notrump(),
                format!(
                    "Unusual 2NT: five-five in {} and {}",
                    suits[0].name(),
                    suits[1].name()
                ),
            )
            .forcing(ForcingLevel::ForcingOneRound)
            .artificial(),
        )
    }

    fn advance(&self, s: &Situation, opened: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let suits = shown_suits(opened);
        let game_major = suits
            .iter()
            .copied()
            .find(|&x| x.is_major() && hand.length(x) >= 4)
            .filter(|_| hand.hcp() >= 12);
        if let Some(major) = game_major {
            let call = s.legal(Call::suit_bid(4, major))?;
            return Some(Proposal::new(
                call,
                format!("Game in {} opposite the two-suiter", major.name()),
            ));
        }
        let choice = suits.into_iter().max_by_key(|&x| (hand.length(x), x))?;
        Some(Proposal::new(
            s.cheapest(choice)?,
            format!("Preference for {}", choice.name()),
        ))
    }
}

impl Convention for Unusual2Nt {
    fn id(&self) -> ConventionId {
        ConventionId::Unusual2Nt
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
                self.jump(s, one_suit_opening(*opening)?)
            }
            [(opener, opening), (bidder, jump), (_, Call::Pass)]
                if *opener == seat.lho() && *bidder == seat.partner() && *jump == two_notrump() =>
            {
                self.advance(s, one_suit_opening(*opening)?)
            }
            _ => None,
        }
    }
}
