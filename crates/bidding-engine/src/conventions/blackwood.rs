use super::{Convention, ConventionId, Proposal, Situation};
use crate::forcing::ForcingLevel;
use types::{Auction, Call, Position, Strain, Suit};

const ACE_ASK: Call = Call::Bid {
    level: 4,
    strain: Strain::NoTrump,
};
const KING_ASK: Call = Call::Bid {
    level: 5,
    strain: Strain::NoTrump,
};

/// 4NT ace ask with step replies, then an optional 5NT king ask.
pub struct Blackwood;

/// Step reply for `count` aces (or kings) at `level`: clubs shows 0 or 4,
/// diamonds 1, hearts 2, spades 3.
pub fn ace_reply(count: u8, level: u8) -> Call {
    let strain = match count % 4 {
        0 => Strain::Clubs,
        1 => Strain::Diamonds,
        2 => Strain::Hearts,
        _ => Strain::Spades,
    };
    Call::Bid { level, strain }
}

/// Count shown by a step reply. Clubs is 0 or 4; the asker knows which
/// from their own holding.
fn decode_reply(reply: Call, level: u8, own: u8) -> Option<u8> {
    let Call::Bid { level: l, strain } = reply else {
        return None;
    };
    if l != level {
        return None;
    }
    match strain {
        Strain::Clubs if own == 0 => Some(4),
        Strain::Clubs => Some(0),
        Strain::Diamonds => Some(1),
        Strain::Hearts => Some(2),
        Strain::Spades => Some(3),
        Strain::NoTrump => None,
    }
}

fn describe(count: u8, what: &str) -> String {
    match count % 4 {
        0 => format!("0 or 4 {what}"),
        1 => format!("1 {}", what.trim_end_matches('s')),
        n => format!("{n} {what}"),
    }
}

/// Index of our partnership's latest 4NT that asks for aces: a 4NT by a
/// side that had already bid.
fn last_ace_ask(auction: &Auction, seat: Position) -> Option<usize> {
    let ours = |p: Position| p == seat || p == seat.partner();
    let mut side_has_bid = false;
    let mut ask = None;
    for (index, (position, call)) in auction.iter().enumerate() {
        if !ours(position) {
            continue;
        }
        if call == ACE_ASK && side_has_bid {
            ask = Some(index);
        }
        side_has_bid |= call.is_bid();
    }
    ask
}

/// Trump suit for the signoff, judged from our calls before the ask:
/// the latest major both of us bid, else a minor both bid, else a major
/// either bid, else notrump.
pub fn select_trump(auction: &Auction, ask_index: usize, seat: Position) -> Strain {
    let mut bidders: [(bool, bool); 4] = [(false, false); 4];
    let mut latest: [Option<usize>; 4] = [None; 4];
    for (index, (position, call)) in auction.iter().enumerate().take(ask_index) {
        let Some(suit) = call.suit() else {
            continue;
        };
        if position == seat {
            bidders[suit.idx()].0 = true;
        } else if position == seat.partner() {
            bidders[suit.idx()].1 = true;
        } else {
            continue;
        }
        latest[suit.idx()] = Some(index);
    }

    let pick = |suits: &[Suit], both: bool| -> Option<Suit> {
        suits
            .iter()
            .copied()
            .filter(|s| {
                let (me, partner) = bidders[s.idx()];
                if both {
                    me && partner
                } else {
                    me || partner
                }
            })
            .max_by_key(|s| latest[s.idx()])
    };

    pick(&Suit::MAJORS, true)
        .or_else(|| pick(&Suit::MINORS, true))
        .or_else(|| pick(&Suit::MAJORS, false))
        .map_or(Strain::NoTrump, Strain::from)
}

/// Whether 5NT still asks for kings: a suit contract where the ace reply
/// left room to sign off at the five level. Otherwise 5NT is a signoff.
fn king_ask_available(trump: Strain, reply: Call) -> bool {
    trump != Strain::NoTrump && !reply.outranks(&Call::bid(5, trump))
}

impl Blackwood {
    fn reply(&self, count: u8, level: u8, what: &str) -> Proposal {
        Proposal::new(
            ace_reply(count, level),
            format!("Blackwood reply: {}", describe(count, what)),
        )
        .artificial()
    }

    fn accept(&self) -> Proposal {
        Proposal::new(Call::Pass, "Blackwood: partner has placed the contract").signoff()
    }

    /// Asker's decision once the ace count is known.
    fn after_aces(&self, s: &Situation, reply: Call, trump: Strain) -> Option<Proposal> {
        let mine = s.hand.aces();
        let total = mine + decode_reply(reply, 5, mine)?;
        let combined = s.features.combined_estimate.unwrap_or(s.features.hcp);
        let grand = combined >= s.config.slam.grand_combined;
        let room = king_ask_available(trump, reply);

        let (call, text) = match (trump, total) {
            (Strain::NoTrump, 0..=2) => (KING_ASK, "two aces missing, stop in 5NT".to_string()),
            (Strain::NoTrump, 3) => (Call::bid(6, trump), "one ace missing, small slam".into()),
            (Strain::NoTrump, _) if grand => (Call::bid(7, trump), "all aces, grand slam".into()),
            (Strain::NoTrump, _) => (Call::bid(6, trump), "all aces, small slam".into()),
            (_, 0..=2) if reply.strain() == Some(trump) => {
                (Call::Pass, "two aces missing, play here".into())
            }
            (_, 0..=2) if room => (
                s.cheapest(trump)?,
                "two aces missing, sign off".to_string(),
            ),
            (_, 0..=2) => (KING_ASK, "two aces missing, stop in 5NT".into()),
            (_, 3) => (Call::bid(6, trump), "one ace missing, small slam".into()),
            (_, _) if grand => (Call::bid(7, trump), "all aces, grand slam".into()),
            (_, _) if !room => (Call::bid(6, trump), "all aces, small slam".into()),
            (_, _) => {
                return Some(
                    Proposal::new(KING_ASK, "Blackwood: all aces held, asking for kings")
                        .forcing(ForcingLevel::ForcingOneRound)
                        .artificial(),
                )
            }
        };
        Some(Proposal::new(call, format!("Blackwood signoff: {text}")).signoff())
    }

    /// Asker's decision once the king count is known.
    fn after_kings(&self, s: &Situation, reply: Call, trump: Strain) -> Option<Proposal> {
        let mine = s.hand.kings();
        let total = mine + decode_reply(reply, 6, mine)?;
        let call = if total >= 3 {
            Call::bid(7, trump)
        } else if reply.strain() == Some(trump) {
            Call::Pass
        } else {
            s.legal(Call::bid(6, trump))
                .or_else(|| s.legal(Call::bid(6, Strain::NoTrump)))
                .unwrap_or(Call::Pass)
        };
        let text = format!("Blackwood signoff: {total} kings between us");
        Some(Proposal::new(call, text).signoff())
    }
}

impl Convention for Blackwood {
    fn id(&self) -> ConventionId {
        ConventionId::Blackwood
    }

    fn propose(&self, s: &Situation) -> Option<Proposal> {
        let auction = s.auction();
        let seat = s.seat();
        let ask = last_ace_ask(auction, seat)?;
        let asker = auction.position_at(ask);

        let mut after = Vec::new();
        for (position, call) in auction.iter().skip(ask + 1) {
            if position.is_opponent_of(seat) {
                if !call.is_pass() {
                    return None;
                }
            } else {
                after.push(call);
            }
        }
        let trump = select_trump(auction, ask, seat);

        if asker == seat {
            match after.as_slice() {
                [reply] => self.after_aces(s, *reply, trump),
                [aces, ask_kings, reply]
                    if *ask_kings == KING_ASK && king_ask_available(trump, *aces) =>
                {
                    self.after_kings(s, *reply, trump)
                }
                _ => None,
            }
        } else {
            match after.as_slice() {
                [] => Some(self.reply(s.hand.aces(), 5, "aces")),
                [aces, next] if *next == KING_ASK && king_ask_available(trump, *aces) => {
                    Some(self.reply(s.hand.kings(), 6, "kings"))
                }
                [_, _] | [_, _, _, _] => Some(self.accept()),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::testing::{call_for, propose_with};
    use crate::config::EngineConfig;

    // Two aces: clubs and diamonds.
    const OPENER: &str = "A2.A32.K32.KQ432";

    #[test]
    fn reply_steps() {
        assert_eq!(ace_reply(0, 5).render(), "5C");
        assert_eq!(ace_reply(4, 5).render(), "5C");
        assert_eq!(ace_reply(1, 5).render(), "5D");
        assert_eq!(ace_reply(2, 5).render(), "5H");
        assert_eq!(ace_reply(3, 5).render(), "5S");
        assert_eq!(ace_reply(2, 6).render(), "6H");
    }

    #[test]
    fn clubs_reply_resolved_by_own_aces() {
        let five_clubs = Call::bid(5, Strain::Clubs);
        assert_eq!(decode_reply(five_clubs, 5, 0), Some(4));
        assert_eq!(decode_reply(five_clubs, 5, 2), Some(0));
        assert_eq!(decode_reply(Call::bid(6, Strain::Clubs), 5, 2), None);
    }

    #[test]
    fn responder_shows_aces() {
        assert_eq!(call_for(&Blackwood, OPENER, "1S P 4N P").as_deref(), Some("5H"));
    }

    #[test]
    fn fresh_4nt_without_prior_bidding_is_not_an_ask() {
        // 4NT as an opening bid is not Blackwood.
        assert_eq!(call_for(&Blackwood, OPENER, "4N P"), None);
        assert_eq!(call_for(&Blackwood, OPENER, "1S P 2S P"), None);
    }

    #[test]
    fn asker_signs_off_by_total() {
        // South asked; North showed two aces with 5H.
        let history = "1S P 4N P 5H P";
        // No aces: two missing, sign off in 5S.
        let none = "KQ2.KQ2.KQ2.QJ32";
        assert_eq!(call_for(&Blackwood, none, history).as_deref(), Some("5S"));
        // One ace: small slam.
        let one = "KQ2.KQ2.AQ2.QJ32";
        assert_eq!(call_for(&Blackwood, one, history).as_deref(), Some("6S"));
        // Two aces: all four held, ask for kings unless the grand is certain.
        let two = "KQ2.KQ2.AQ2.AJ32";
        assert_eq!(call_for(&Blackwood, two, history).as_deref(), Some("5N"));
    }

    #[test]
    fn one_ace_between_us_stops_in_game() {
        // No aces here, partner shows one.
        let none = "KQ2.KQ2.KQ2.KQJ3";
        assert_eq!(call_for(&Blackwood, none, "1S P 4N P 5D P").as_deref(), Some("5S"));
    }

    #[test]
    fn minor_suit_signoff_stays_below_slam() {
        // Diamonds agreed, the 5H reply is already past 5D.
        let north = "KQ2.KQJ32.KQ2.KQ";
        let history = "1D P 3D P 4N P 5H P";
        assert_eq!(call_for(&Blackwood, north, history).as_deref(), Some("5N"));
        // Partner reads 5NT as the end, not a king ask.
        let south = "A32.A432.432.K32";
        let after = "1D P 3D P 4N P 5H P 5N P";
        assert_eq!(call_for(&Blackwood, south, after).as_deref(), Some("P"));
    }

    #[test]
    fn signoff_carries_bypass_markers() {
        let p = propose_with(
            &Blackwood,
            &EngineConfig::default(),
            "KQ2.KQ2.AQ2.QJ32",
            Position::North,
            "1S P 4N P 5H P",
        )
        .unwrap();
        assert!(p.bypass_hcp);
        assert!(p.bypass_suit_length);
    }

    #[test]
    fn king_ask_and_reply() {
        // North has kings of hearts and spades.
        assert_eq!(
            call_for(&Blackwood, OPENER, "1S P 4N P 5H P 5N P").as_deref(),
            Some("6H")
        );
        // North accepts a signoff.
        assert_eq!(call_for(&Blackwood, OPENER, "1S P 4N P 5H P 6S P").as_deref(), Some("P"));
    }

    #[test]
    fn notrump_auction_stops_in_5nt() {
        // 1NT opener, responder asks: no agreed suit.
        let history = "1N P 4N P 5D P";
        let hand = "KQ2.KQ2.KQ32.QJ2";
        assert_eq!(call_for(&Blackwood, hand, history).as_deref(), Some("5N"));
        // Opener passes the 5NT signoff instead of showing kings.
        assert_eq!(
            call_for(&Blackwood, "A32.KQ2.KJ32.K32", "1N P 4N P 5D P 5N P").as_deref(),
            Some("P")
        );
    }

    #[test]
    fn trump_selection() {
        let auction = Auction::bidding(Position::North, "1H P 1S P 3S P 4N P");
        assert_eq!(select_trump(&auction, 6, Position::South), Strain::Spades);
        // Agreed minor beats an unsupported major.
        let auction = Auction::bidding(Position::North, "1H P 2D P 3D P 4N P");
        assert_eq!(select_trump(&auction, 6, Position::South), Strain::Diamonds);
        // A major bid by one partner.
        let auction = Auction::bidding(Position::North, "1C P 1H P 2N P 4N P");
        assert_eq!(select_trump(&auction, 6, Position::South), Strain::Hearts);
        // Nothing but notrump.
        let auction = Auction::bidding(Position::North, "1N P 4N P");
        assert_eq!(select_trump(&auction, 2, Position::South), Strain::NoTrump);
        // The ask and replies are ignored.
        let auction = Auction::bidding(Position::North, "1S P 3S P 4N P 5H P");
        assert_eq!(select_trump(&auction, 4, Position::South), Strain::Spades);
    }

    #[test]
    fn interference_ends_the_sequence() {
        assert_eq!(call_for(&Blackwood, OPENER, "1S P 4N 5C"), None);
    }
}
