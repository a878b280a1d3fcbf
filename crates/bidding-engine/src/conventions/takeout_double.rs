use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Call, Position, Strain, Suit};

/// Double of an opponent's suit bid asking partner to pick one of the
/// unbid suits.
pub struct TakeoutDouble;

const MIN_HCP: u8 = 12;

impl TakeoutDouble {
    fn double(&self, s: &Situation) -> Option<Proposal> {
        let hand = s.hand;
        let features = s.features;
        let (bidder, last) = s.auction().last_action()?;
        let doubled = last.suit()?;
        if bidder != s.seat().rho() || last.level() > Some(3) || hand.hcp() < MIN_HCP {
            return None;
        }
        let theirs = &features.opponent_suits;
        let short_in_theirs = theirs.iter().all(|&x| hand.length(x) <= 2);
        let support_elsewhere = Suit::ALL
            .into_iter()
            .filter(|x| !theirs.contains(x))
            .all(|x| hand.length(x) >= 3);
        if !short_in_theirs || !support_elsewhere {
            return None;
        }
        Some(
            Proposal::new(
                Call::Double,
                format!("Takeout double of {}: support for the other suits", doubled.name()),
            )
            .forcing(ForcingLevel::ForcingOneRound)
            .artificial(),
        )
    }

    fn advance(&self, s: &Situation) -> Option<Proposal> {
        let hand = s.hand;
        let hcp = hand.hcp();
        let theirs = &s.features.opponent_suits;
        let stopped = theirs.iter().all(|&x| hand.has_stopper(x));

        let unbid: Vec<Suit> = Suit::ALL
            .into_iter()
            .filter(|x| !theirs.contains(x))
            .collect();
        let major = unbid
            .iter()
            .copied()
            .filter(|m| m.is_major() && hand.length(*m) >= 4)
            .max_by_key(|&m| (hand.length(m), m));
        let best = major.or_else(|| unbid.iter().copied().max_by_key(|&x| (hand.length(x), x)))?;
        let cheapest = s.cheapest(best)?;

        let one_notrump = s
            .cheapest(Strain::NoTrump)
            .filter(|c| c.level() == Some(1));
        if let Some(call) = one_notrump {
            if hand.is_balanced() && stopped && (6..=10).contains(&hcp) {
                return Some(Proposal::new(call, "Balanced with their suit stopped"));
            }
        }

        let proposal = match hcp {
            0..=8 => Proposal::new(cheapest, format!("Answer in {}: {hcp} HCP", best.name())),
            9..=11 => {
                let jump = cheapest
                    .level()
                    .and_then(|l| s.legal(Call::suit_bid(l + 1, best)))
                    .unwrap_or(cheapest);
                Proposal::new(jump, format!("Jump in {}: {hcp} HCP", best.name()))
            }
            _ => {
                if let Some(game) = major.and_then(|m| s.legal(Call::suit_bid(4, m))) {
                    Proposal::new(game, format!("Game in the major: {hcp} HCP"))
                } else if let Some(nt) = s.legal(Call::bid(3, Strain::NoTrump)).filter(|_| stopped) {
                    Proposal::new(nt, format!("Game in notrump: {hcp} HCP"))
                } else {
                    let cue = s.features.opponent_suit.and_then(|x| s.cheapest(x))?;
                    Proposal::new(cue, format!("Cuebid: game values, {hcp} HCP"))
                        .forcing(ForcingLevel::ForcingOneRound)
                        .artificial()
                }
            }
        };
        Some(proposal)
    }
}

impl Convention for TakeoutDouble {
    fn id(&self) -> ConventionId {
        ConventionId::TakeoutDouble
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let seat = s.seat();
        let auction = s.auction();
        let ours_acted = |who: Position| auction.calls_by(who).any(|c| !c.is_pass());
        if auction.opener().is_some_and(|o| !o.is_opponent_of(seat)) {
            return None;
        }

        let recent: Vec<(Position, Call)> = auction.iter().rev().take(3).collect();
        match recent.as_slice() {
            // Partner doubled a suit bid and RHO passed.
            [(_, Call::Pass), (doubler, Call::Double), (_, doubled)]
                if *doubler == seat.partner() && doubled.suit().is_some() && !ours_acted(seat) =>
            {
                self.advance(s)
            }
            _ if !ours_acted(seat) && !ours_acted(seat.partner()) => self.double(s),
            _ => None,
        }
    }
}
