use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Strain, Suit};

/// Responder bids the last unbid suit after three suits have been shown,
/// asking opener to describe further.
pub struct FourthSuitForcing;

const MIN_HCP: u8 = 12;

/// The three distinct suits of an `A - B - C` start, opening at the one level.
fn three_suits(calls: &[Call]) -> Option<[Suit; 3]> {
    let [a, b, c] = calls else {
        return None;
    };
    if a.level() != Some(1) {
        return None;
    }
    let suits = [a.suit()?, b.suit()?, c.suit()?];
    let distinct = suits[0] != suits[1] && suits[1] != suits[2] && suits[0] != suits[2];
    distinct.then_some(suits)
}

fn fourth(suits: &[Suit; 3]) -> Option<Suit> {
    Suit::ALL.into_iter().find(|s| !suits.contains(s))
}

impl FourthSuitForcing {
    fn ask(&self, s: &Situation, [a, b, c]: [Suit; 3]) -> Option<Proposal> {
        let hand = s.hand;
        let d = fourth(&[a, b, c])?;
        let natural_notrump = hand.has_stopper(d) && hand.is_balanced();
        let has_fit = hand.length(a) >= 3 || hand.length(c) >= 4;
        if hand.hcp() < MIN_HCP || natural_notrump || has_fit || hand.length(b) >= 6 {
            return None;
        }
        let call = s.cheapest(d).filter(|c| c.level() <= Some(3))?;
        Some(
            Proposal::new(
                call,
                format!("Fourth suit forcing: asking for a {} stopper or more shape", d.name()),
            )
            .forcing(ForcingLevel::ForcingOneRound)
            .artificial(),
        )
    }

    fn answer(&self, s: &Situation, [a, b, c]: [Suit; 3], d: Suit) -> Option<Proposal> {
        let hand = s.hand;
        let (strain, text): (Strain, String) = if hand.has_stopper(d) {
            (Strain::NoTrump, format!("stopper in {}", d.name()))
        } else if hand.length(b) >= 3 {
            (b.into(), format!("three-card support for {}", b.name()))
        } else if hand.length(a) >= 6 {
            (a.into(), format!("six or more {}", a.name()))
        } else if hand.length(c) >= 5 {
            (c.into(), format!("five or more {}", c.name()))
        } else {
            (a.into(), format!("nothing more to show, back to {}", a.name()))
        };
        let call = s.cheapest(strain)?;
        Some(Proposal::new(call, format!("Reply to fourth suit: {text}")))
    }
}

impl Convention for FourthSuitForcing {
    fn id(&self) -> ConventionId {
        ConventionId::FourthSuitForcing
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seq = s.uncontested()?;
        if !seq.next_is(s.seat()) {
            return None;
        }
        match seq.calls.len() {
            3 => self.ask(s, three_suits(&seq.calls)?),
            4 => {
                let suits = three_suits(&seq.calls[..3])?;
                let d = fourth(&suits)?;
                if seq.calls[3].suit() != Some(d) {
                    return None;
                }
                self.answer(s, suits, d)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::testing::call_for;

    const RESPONDER: &str = "32.432.AKJ32.AQ2";

    #[test]
    fn responder_bids_the_fourth_suit() {
        assert_eq!(call_for(&FourthSuitForcing, RESPONDER, "1C P 1H P 1S P").as_deref(), Some("2D"));
    }

    #[test]
    fn stays_natural_with_a_stopper_or_a_fit() {
        // Balanced with diamonds held: bid notrump instead.
        assert_eq!(call_for(&FourthSuitForcing, "32.AQ2.KJ432.K32", "1C P 1H P 1S P"), None);
        // Four spades: raise.
        assert_eq!(call_for(&FourthSuitForcing, "2.432.AKJ32.AQ32", "1C P 1H P 1S P"), None);
        // Too weak.
        assert_eq!(call_for(&FourthSuitForcing, "32.432.KJ432.AQ2", "1C P 1H P 1S P"), None);
    }

    #[test]
    fn opener_answers() {
        let history = "1C P 1H P 1S P 2D P";
        assert_eq!(call_for(&FourthSuitForcing, "AQ432.K32.2.KQ32", history).as_deref(), Some("2N"));
        assert_eq!(call_for(&FourthSuitForcing, "AQ432.2.K32.KQ32", history).as_deref(), Some("2H"));
        assert_eq!(call_for(&FourthSuitForcing, "AQ5432.2.K2.KQ32", history).as_deref(), Some("3C"));
    }
}
