//! What the auction so far has shown about each player's strength.
//!
//! Rebuilt from the whole history on every turn. Each call is classified
//! into a [`BidKind`], whose range narrows what we know about the caller.

use crate::features::FeatureSnapshot;
use crate::point_ranges::{BidKind, HcpRange};
use serde::Serialize;
use types::{Auction, Call, Position, Strain};

/// One call that told us something.
#[derive(Debug, Clone, Serialize)]
pub struct ShownCall {
    pub position: Position,
    pub call: Call,
    pub kind: BidKind,
    pub range: HcpRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuctionContext {
    pub opener_hcp_range: Option<HcpRange>,
    pub responder_hcp_range: Option<HcpRange>,
    pub overcaller_hcp_range: Option<HcpRange>,
    pub advancer_hcp_range: Option<HcpRange>,
    pub partner_min_hcp: u8,
    pub partner_max_hcp: u8,
    /// Own HCP plus partner's inferred minimum. An estimate only: it ignores
    /// distribution and any upgrades partner may have made.
    pub combined_estimate: u8,
    pub shown: Vec<ShownCall>,
}

impl AuctionContext {
    pub fn partner_range(&self) -> HcpRange {
        HcpRange::new(self.partner_min_hcp, self.partner_max_hcp)
    }
}

/// Classify the call made at `index`, judged by the auction before it.
pub fn classify_call(auction: &Auction, index: usize) -> Option<BidKind> {
    let before = auction.prefix(index);
    let call = auction.calls[index];
    let me = auction.position_at(index);

    let Some((opener, opening)) = before.opening_bid() else {
        return classify_opening(call);
    };

    if opener == me {
        return classify_opener_rebid(&before, me, opening, call);
    }
    if opener == me.partner() {
        let responded = before
            .iter()
            .skip_while(|(_, c)| !c.is_bid())
            .skip(1)
            .any(|(p, _)| p == me);
        return if responded {
            classify_responder_rebid(&before, opening, call)
        } else {
            classify_response(&before, opening, call)
        };
    }
    let side_acted = before
        .iter()
        .any(|(p, c)| p.partnership() == me.partnership() && !c.is_pass());
    if side_acted {
        None
    } else {
        classify_overcall(&before, opening, call)
    }
}

fn classify_opening(call: Call) -> Option<BidKind> {
    let kind = match call {
        Call::Pass => BidKind::OpeningPass,
        Call::Bid {
            level: 1,
            strain: Strain::NoTrump,
        } => BidKind::OpeningOneNotrump,
        Call::Bid { level: 1, .. } => BidKind::OpeningOneSuit,
        Call::Bid {
            level: 2,
            strain: Strain::Clubs,
        } => BidKind::OpeningStrongTwoClubs,
        Call::Bid {
            level: 2,
            strain: Strain::NoTrump,
        } => BidKind::OpeningTwoNotrump,
        Call::Bid { level: 2, .. } => BidKind::OpeningWeakTwo,
        Call::Bid {
            level: 3..=4,
            strain,
        } if strain != Strain::NoTrump => BidKind::OpeningPreempt,
        _ => return None,
    };
    Some(kind)
}

fn classify_opener_rebid(
    before: &Auction,
    me: Position,
    opening: Call,
    call: Call,
) -> Option<BidKind> {
    let opening_strain = opening.strain()?;
    let one_suit_opening = opening.level() == Some(1) && opening_strain != Strain::NoTrump;
    if !one_suit_opening || before.bids_by(me).len() != 1 || !call.is_bid() {
        return None;
    }
    let partner_suit = before
        .bids_by(me.partner())
        .first()
        .and_then(|c| c.suit());
    let jump = before.is_jump(call);
    let kind = match call.strain()? {
        Strain::NoTrump if call.level() == Some(1) => BidKind::RebidOneNotrump,
        Strain::NoTrump if call.level() == Some(2) && jump => BidKind::RebidJumpTwoNotrump,
        Strain::NoTrump => return None,
        strain if strain.to_suit() == partner_suit => {
            if jump {
                BidKind::RebidJumpRaise
            } else {
                BidKind::RebidSingleRaise
            }
        }
        strain if strain == opening_strain && jump => BidKind::RebidJumpOwnSuit,
        strain if call.level() == Some(2) && !jump && strain > opening_strain => {
            BidKind::RebidReverse
        }
        _ => return None,
    };
    Some(kind)
}

fn classify_response(before: &Auction, opening: Call, call: Call) -> Option<BidKind> {
    let rho_acted = before
        .last_call_by(before.current_player().rho())
        .is_some_and(|c| !c.is_pass());
    if opening == Call::bid(1, Strain::NoTrump) {
        if rho_acted {
            return None;
        }
        let kind = match call.render().as_str() {
            "2C" => BidKind::ResponseStayman,
            "2D" | "2H" => BidKind::ResponseTransfer,
            "2N" => BidKind::ResponseNotrumpInvite,
            "3N" => BidKind::ResponseNotrumpGame,
            _ => return None,
        };
        return Some(kind);
    }
    let opening_suit = opening.suit().filter(|_| opening.level() == Some(1))?;
    let kind = match call {
        Call::Pass if !rho_acted => BidKind::ResponsePass,
        Call::Double if rho_acted => BidKind::NegativeDouble,
        Call::Bid { level, strain } => match strain.to_suit() {
            None => match level {
                1 => BidKind::ResponseOneNotrump,
                2 if opening_suit.is_major() && !rho_acted => BidKind::ResponseJacoby2Nt,
                2 => BidKind::ResponseTwoNotrump,
                3 => BidKind::ResponseThreeNotrump,
                _ => return None,
            },
            Some(suit) if suit == opening_suit => match level {
                2 => BidKind::ResponseSingleRaise,
                3 => BidKind::ResponseLimitRaise,
                4 if suit.is_major() => BidKind::ResponseGameRaise,
                _ => return None,
            },
            Some(_) => {
                let cheapest = before.minimum_bid_in(strain)?.level()?;
                match level.checked_sub(cheapest) {
                    Some(0) if level == 1 => BidKind::ResponseNewSuitOneLevel,
                    Some(0) => BidKind::ResponseNewSuitTwoLevel,
                    Some(1) => BidKind::ResponseJumpShift,
                    Some(2) if opening_suit.is_major() => BidKind::ResponseSplinter,
                    _ => return None,
                }
            }
        },
        _ => return None,
    };
    Some(kind)
}

fn classify_responder_rebid(before: &Auction, opening: Call, call: Call) -> Option<BidKind> {
    let one_suit_opening = opening.level() == Some(1) && opening.suit().is_some();
    let non_jump_2nt = call == Call::bid(2, Strain::NoTrump) && !before.is_jump(call);
    (one_suit_opening && non_jump_2nt).then_some(BidKind::ResponderRebidTwoNotrump)
}

fn classify_overcall(before: &Auction, opening: Call, call: Call) -> Option<BidKind> {
    let last_bid = before.last_bid()?.1;
    let kind = match call {
        Call::Double if last_bid.suit().is_some() && last_bid.level() <= Some(3) => {
            BidKind::TakeoutDouble
        }
        Call::Bid { level, strain } => {
            let cheapest = before.minimum_bid_in(strain)?.level()?;
            match strain.to_suit() {
                None if level == 1 => BidKind::OvercallOneNotrump,
                None if level == 2 && last_bid.level() == Some(1) => BidKind::Unusual2Nt,
                None => return None,
                Some(suit)
                    if Some(suit) == opening.suit()
                        && level == 2
                        && opening.level() == Some(1)
                        && last_bid == opening =>
                {
                    BidKind::MichaelsCuebid
                }
                Some(suit) if Some(suit) == last_bid.suit() => return None,
                Some(_) if level > cheapest => BidKind::WeakJumpOvercall,
                Some(_) if level == 1 => BidKind::OvercallOneLevel,
                Some(_) if level == 2 => BidKind::OvercallTwoLevel,
                Some(_) => return None,
            }
        }
        _ => return None,
    };
    Some(kind)
}

/// Replay the auction and narrow every seat's range.
pub fn infer(auction: &Auction, features: &FeatureSnapshot) -> AuctionContext {
    let mut ranges: [Option<HcpRange>; 4] = [None; 4];
    let mut shown = Vec::new();

    for (index, (position, call)) in auction.iter().enumerate() {
        let Some(kind) = classify_call(auction, index) else {
            continue;
        };
        let range = kind.hcp();
        let slot = &mut ranges[position.idx()];
        // Contradictory information: trust the latest call.
        let merged = match *slot {
            Some(known) => known.intersect(&range).unwrap_or(range),
            None => range,
        };
        *slot = Some(merged);
        shown.push(ShownCall {
            position,
            call,
            kind,
            range,
        });
    }

    let range_of = |p: Position| ranges[p.idx()];
    let opener = auction.opener();
    let overcaller = opener.and_then(|o| {
        auction
            .iter()
            .skip_while(|(_, c)| !c.is_bid())
            .find(|(p, c)| p.is_opponent_of(o) && !c.is_pass())
            .map(|(p, _)| p)
    });

    let partner = range_of(features.seat.partner()).unwrap_or(HcpRange::UNKNOWN);

    AuctionContext {
        opener_hcp_range: opener.and_then(range_of),
        responder_hcp_range: opener.and_then(|o| range_of(o.partner())),
        overcaller_hcp_range: overcaller.and_then(range_of),
        advancer_hcp_range: overcaller.and_then(|o| range_of(o.partner())),
        partner_min_hcp: partner.min,
        partner_max_hcp: partner.max,
        combined_estimate: features.hcp.saturating_add(partner.min),
        shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use types::Hand;

    fn context(hand: &str, dealer: Position, calls: &str) -> AuctionContext {
        let auction = Auction::bidding(dealer, calls);
        let seat = auction.current_player();
        let features = extract(&Hand::parse(hand), &auction, seat);
        infer(&auction, &features)
    }

    fn kinds(dealer: Position, calls: &str) -> Vec<Option<BidKind>> {
        let auction = Auction::bidding(dealer, calls);
        (0..auction.len()).map(|i| classify_call(&auction, i)).collect()
    }

    #[test]
    fn one_notrump_opening_sets_partner_range() {
        let ctx = context("AQ2.K32.Q32.K432", Position::North, "1N P");
        assert_eq!(ctx.partner_min_hcp, 15);
        assert_eq!(ctx.partner_max_hcp, 17);
        assert_eq!(ctx.combined_estimate, 14 + 15);
        assert_eq!(ctx.opener_hcp_range, Some(HcpRange::new(15, 17)));
    }

    #[test]
    fn opener_rebid_narrows_opening_range() {
        let ctx = context("AQ2.K32.Q32.K432", Position::North, "1C P 1S P 1N P");
        assert_eq!(ctx.partner_range(), HcpRange::new(12, 14));
        assert_eq!(ctx.responder_hcp_range, Some(HcpRange::new(6, 37)));
    }

    #[test]
    fn earlier_pass_caps_strength() {
        // South passed in first seat, then bid a new suit.
        let ctx = context("AQ2.K32.Q32.K432", Position::South, "P P 1H P 1S P");
        assert_eq!(ctx.partner_range(), HcpRange::new(6, 11));
    }

    #[test]
    fn contradiction_keeps_latest() {
        // South passed as dealer, then jump shifted: 0-11 and 19+ do not overlap.
        let auction = Auction::bidding(Position::South, "P P 1H P 2S");
        let features = extract(&Hand::parse("AQ2.K32.Q32.K432"), &auction, Position::West);
        let ctx = infer(&auction, &features);
        let south = ctx
            .shown
            .iter()
            .filter(|s| s.position == Position::South)
            .count();
        assert_eq!(south, 2);
        assert_eq!(ctx.responder_hcp_range, Some(HcpRange::new(19, 37)));
    }

    #[test]
    fn classification_of_responses() {
        use BidKind::*;
        assert_eq!(
            kinds(Position::North, "1S P 2S P"),
            vec![Some(OpeningOneSuit), None, Some(ResponseSingleRaise), None]
        );
        assert_eq!(kinds(Position::North, "1S P 3S")[2], Some(ResponseLimitRaise));
        assert_eq!(kinds(Position::North, "1S P 2N")[2], Some(ResponseJacoby2Nt));
        assert_eq!(kinds(Position::North, "1D P 2N")[2], Some(ResponseTwoNotrump));
        assert_eq!(kinds(Position::North, "1S P 4D")[2], Some(ResponseSplinter));
        assert_eq!(kinds(Position::North, "1S P 3H")[2], Some(ResponseJumpShift));
        assert_eq!(kinds(Position::North, "1S P 2H")[2], Some(ResponseNewSuitTwoLevel));
        assert_eq!(kinds(Position::North, "1S P P")[2], Some(ResponsePass));
        assert_eq!(kinds(Position::North, "1C 1S X")[2], Some(NegativeDouble));
        assert_eq!(kinds(Position::North, "1N P 2C")[2], Some(ResponseStayman));
        assert_eq!(kinds(Position::North, "1N P 2H")[2], Some(ResponseTransfer));
    }

    #[test]
    fn classification_of_competition() {
        use BidKind::*;
        assert_eq!(kinds(Position::North, "1H 1S")[1], Some(OvercallOneLevel));
        assert_eq!(kinds(Position::North, "1H 2C")[1], Some(OvercallTwoLevel));
        assert_eq!(kinds(Position::North, "1H 2S")[1], Some(WeakJumpOvercall));
        assert_eq!(kinds(Position::North, "1H 1N")[1], Some(OvercallOneNotrump));
        assert_eq!(kinds(Position::North, "1H X")[1], Some(TakeoutDouble));
        assert_eq!(kinds(Position::North, "1H 2H")[1], Some(MichaelsCuebid));
        assert_eq!(kinds(Position::North, "1H 2N")[1], Some(Unusual2Nt));
        assert_eq!(kinds(Position::North, "2S P")[0], Some(OpeningWeakTwo));
        assert_eq!(kinds(Position::North, "2C P")[0], Some(OpeningStrongTwoClubs));
    }

    #[test]
    fn classification_of_opener_rebids() {
        use BidKind::*;
        assert_eq!(kinds(Position::North, "1D P 1S P 2S")[4], Some(RebidSingleRaise));
        assert_eq!(kinds(Position::North, "1D P 1S P 3S")[4], Some(RebidJumpRaise));
        assert_eq!(kinds(Position::North, "1D P 1S P 3D")[4], Some(RebidJumpOwnSuit));
        assert_eq!(kinds(Position::North, "1D P 1S P 2H")[4], Some(RebidReverse));
        assert_eq!(kinds(Position::North, "1D P 1S P 2N")[4], Some(RebidJumpTwoNotrump));
        assert_eq!(kinds(Position::North, "1D P 1S P 2C")[4], None);
    }
}
