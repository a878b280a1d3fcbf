//! Per-turn projection of hand and auction into named facts.
//!
//! Extraction is pure: the same hand, auction and seat always produce the
//! same snapshot. Rules look facts up by name through [`FeatureSnapshot::get`];
//! Rust code reads the typed fields directly.

use crate::context::AuctionContext;
use serde::Serialize;
use std::fmt;
use types::{Auction, Call, Hand, Position, Shape, Strain, Suit};

/// Which turn of the auction this is, from the bidder's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Opening,
    Response,
    OpenerRebid,
    ResponderRebid,
    Overcall,
    Advance,
    Balancing,
    OvercallerRebid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn text(value: Option<impl fmt::Display>) -> Self {
        FeatureValue::Text(value.map(|v| v.to_string()).unwrap_or_default())
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(v) => write!(f, "{v}"),
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Every name [`FeatureSnapshot::get`] answers. Rule data is validated
/// against this list at load time.
pub const FEATURE_NAMES: &[&str] = &[
    "hcp",
    "total_points",
    "support_points",
    "quick_tricks",
    "spades",
    "hearts",
    "diamonds",
    "clubs",
    "shape",
    "is_balanced",
    "is_semi_balanced",
    "longest_suit",
    "longest_suit_length",
    "longest_major",
    "longest_major_length",
    "better_minor",
    "aces",
    "kings",
    "seat_number",
    "is_opening",
    "is_response",
    "is_opener_rebid",
    "is_responder_rebid",
    "is_overcall",
    "is_advancer",
    "is_balancing",
    "is_overcaller_rebid",
    "opening_bid",
    "partner_first_bid",
    "partner_last_bid",
    "my_first_bid",
    "my_last_bid",
    "my_bid_count",
    "rho_last_call",
    "last_bid",
    "partner_suit",
    "partner_last_suit",
    "support_for_partner",
    "support_for_partner_last_suit",
    "partner_raised_my_suit",
    "partner_passed_hand",
    "game_reached",
    "my_suit",
    "my_suit_length",
    "second_suit",
    "second_suit_length",
    "second_suit_is_reverse",
    "opponent_suit",
    "opponent_suit_length",
    "longest_suit_is_opponents",
    "opponents_have_bid",
    "interference",
    "all_opponent_suits_stopped",
    "stopper_in_opponent_suit",
    "has_4_card_major",
    "has_5_card_major",
    "rule_of_20",
    "rule_of_15",
    "new_suit_one_level",
    "new_suit_two_level",
    "cheapest_level_longest_suit",
    "jump_level_longest_suit",
    "cheapest_level_partner_suit",
    "jump_level_partner_suit",
    "cheapest_level_partner_last_suit",
    "cheapest_level_my_suit",
    "jump_level_my_suit",
    "cheapest_level_second_suit",
    "cheapest_level_notrump",
    "partner_min_hcp",
    "partner_max_hcp",
    "combined_estimate",
];

/// Snapshot of one bidder's situation. Never mutated after extraction
/// except to attach inferences with [`FeatureSnapshot::with_context`].
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSnapshot {
    pub seat: Position,
    #[serde(skip)]
    pub auction: Auction,
    pub role: Role,
    pub is_balancing: bool,

    pub hcp: u8,
    pub total_points: u8,
    pub quick_tricks: f32,
    pub lengths: [u8; 4],
    pub shape: Shape,
    pub longest_suit: Suit,
    pub longest_major: Suit,
    pub better_minor: Suit,
    pub aces: u8,
    pub kings: u8,
    pub stoppers: [bool; 4],
    pub seat_number: u8,

    pub opening_bid: Option<Call>,
    pub partner_first_bid: Option<Call>,
    pub partner_last_bid: Option<Call>,
    pub my_first_bid: Option<Call>,
    pub my_last_bid: Option<Call>,
    pub my_bid_count: u8,
    pub rho_last_call: Option<Call>,
    pub last_bid: Option<Call>,

    pub partner_suit: Option<Suit>,
    pub partner_last_suit: Option<Suit>,
    pub my_suit: Option<Suit>,
    pub second_suit: Option<Suit>,
    pub opponent_suit: Option<Suit>,
    pub opponent_suits: Vec<Suit>,
    pub opponents_have_bid: bool,
    pub interference: bool,
    pub partner_passed_hand: bool,
    pub new_suit_one_level: Option<Suit>,
    pub new_suit_two_level: Option<Suit>,

    pub partner_min_hcp: Option<u8>,
    pub partner_max_hcp: Option<u8>,
    pub combined_estimate: Option<u8>,
}

/// Strong 2♣ says nothing about clubs.
fn natural_suit(call: &Call, is_opening: bool) -> Option<Suit> {
    match call {
        Call::Bid {
            level: 2,
            strain: Strain::Clubs,
        } if is_opening => None,
        _ => call.suit(),
    }
}

/// Decide the bidder's role from who has called what so far.
pub fn classify(auction: &Auction, seat: Position) -> (Role, bool) {
    let trailing = auction.trailing_passes();
    let Some(opener) = auction.opener() else {
        let fourth_after_passes = auction.len() == 3 && trailing == 3;
        return (Role::Opening, fourth_after_passes);
    };
    let partner = seat.partner();
    if opener == seat {
        return (Role::OpenerRebid, false);
    }
    if opener == partner {
        let opening_index = auction
            .iter()
            .position(|(_, c)| c.is_bid())
            .unwrap_or_default();
        let i_called_since = auction
            .iter()
            .skip(opening_index + 1)
            .any(|(p, _)| p == seat);
        let role = if i_called_since {
            Role::ResponderRebid
        } else {
            Role::Response
        };
        return (role, false);
    }
    if auction.player_has_acted(seat) {
        return (Role::OvercallerRebid, false);
    }
    if auction.player_has_acted(partner) {
        return (Role::Advance, false);
    }
    let last_action_by_opponent = auction
        .last_action()
        .is_some_and(|(p, _)| p.is_opponent_of(seat));
    if trailing == 2 && last_action_by_opponent {
        (Role::Balancing, true)
    } else {
        (Role::Overcall, false)
    }
}

/// Pick a suit of at least four cards among `candidates`: the longest, with
/// ties going up the line for four-card suits and to the higher suit for
/// five-card or longer suits.
fn pick_new_suit(
    hand: &Hand,
    candidates: impl Iterator<Item = Suit>,
    min_len: impl Fn(Suit) -> u8,
) -> Option<Suit> {
    let eligible: Vec<Suit> = candidates
        .filter(|&s| hand.length(s) >= min_len(s))
        .collect();
    let longest = eligible.iter().map(|&s| hand.length(s)).max()?;
    let tied = eligible.into_iter().filter(|&s| hand.length(s) == longest);
    if longest >= 5 {
        tied.max()
    } else {
        tied.min()
    }
}

pub fn extract(hand: &Hand, auction: &Auction, seat: Position) -> FeatureSnapshot {
    let (role, is_balancing) = classify(auction, seat);
    let partner = seat.partner();
    let opening_position = auction.opener();

    let opening_index = auction.iter().position(|(_, c)| c.is_bid());
    let natural_bids = |who: Position| -> Vec<Suit> {
        auction
            .iter()
            .enumerate()
            .filter(|(_, (p, c))| *p == who && c.is_bid())
            .filter_map(|(i, (_, c))| natural_suit(&c, Some(i) == opening_index))
            .collect()
    };
    let partner_suits = natural_bids(partner);
    let my_suits = natural_bids(seat);

    let partner_bids = auction.bids_by(partner);
    let my_bids = auction.bids_by(seat);

    let mut opponent_suits: Vec<Suit> = Vec::new();
    for (p, call) in auction.iter() {
        if let Some(suit) = call.suit() {
            if p.is_opponent_of(seat) && !opponent_suits.contains(&suit) {
                opponent_suits.push(suit);
            }
        }
    }
    let opponent_suit = auction
        .iter()
        .rev()
        .find(|(p, c)| p.is_opponent_of(seat) && c.suit().is_some())
        .and_then(|(_, c)| c.suit());

    let lengths = Suit::ALL.map(|s| hand.length(s));
    let partner_suit = partner_suits.first().copied();
    let my_suit = my_suits.first().copied();

    let unavailable =
        |s: Suit| Some(s) == partner_suit || opponent_suits.contains(&s) || my_suits.contains(&s);
    let level_of = |s: Suit| auction.minimum_bid_in(s.into()).and_then(|c| c.level());
    let new_suit_one_level = pick_new_suit(
        hand,
        Suit::ALL.into_iter().filter(|&s| !unavailable(s) && level_of(s) == Some(1)),
        |_| 4,
    );
    let new_suit_two_level = pick_new_suit(
        hand,
        Suit::ALL.into_iter().filter(|&s| !unavailable(s) && level_of(s) == Some(2)),
        |s| if s == Suit::Hearts { 5 } else { 4 },
    );

    let second_suit = {
        let anchor = my_suit.unwrap_or_else(|| hand.longest_suit());
        Suit::ALL
            .into_iter()
            .filter(|&s| s != anchor && hand.length(s) >= 4 && !opponent_suits.contains(&s))
            .max_by_key(|&s| (hand.length(s), s))
    };

    let better_minor = {
        let (c, d) = (hand.length(Suit::Clubs), hand.length(Suit::Diamonds));
        if d > c || (d == c && d >= 4) {
            Suit::Diamonds
        } else {
            Suit::Clubs
        }
    };

    let partner_passed_hand = {
        auction
            .iter()
            .enumerate()
            .any(|(i, (p, c))| {
                p == partner && c.is_pass() && opening_index.map_or(true, |b| i < b)
            })
    };

    let interference = opening_position.is_some_and(|o| o == partner)
        && auction
            .iter()
            .any(|(p, c)| p.is_opponent_of(seat) && !c.is_pass());

    FeatureSnapshot {
        seat,
        auction: auction.clone(),
        role,
        is_balancing,
        hcp: hand.hcp(),
        total_points: hand.total_points(),
        quick_tricks: hand.quick_tricks(),
        lengths,
        shape: hand.shape(),
        longest_suit: hand.longest_suit(),
        longest_major: hand.longest_major(),
        better_minor,
        aces: hand.aces(),
        kings: hand.kings(),
        stoppers: Suit::ALL.map(|s| hand.has_stopper(s)),
        seat_number: (auction.dealer.distance_to(seat) + 1) as u8,
        opening_bid: auction.opening_bid().map(|(_, c)| c),
        partner_first_bid: partner_bids.first().copied(),
        partner_last_bid: partner_bids.last().copied(),
        my_first_bid: my_bids.first().copied(),
        my_last_bid: my_bids.last().copied(),
        my_bid_count: my_bids.len() as u8,
        rho_last_call: auction.last_call_by(seat.rho()),
        last_bid: auction.last_bid().map(|(_, c)| c),
        partner_suit,
        partner_last_suit: partner_suits.last().copied(),
        my_suit,
        second_suit,
        opponent_suit,
        opponents_have_bid: !opponent_suits.is_empty(),
        opponent_suits,
        interference,
        partner_passed_hand,
        new_suit_one_level,
        new_suit_two_level,
        partner_min_hcp: None,
        partner_max_hcp: None,
        combined_estimate: None,
    }
}

impl FeatureSnapshot {
    /// Attach what the auction has told us about partner.
    pub fn with_context(mut self, context: &AuctionContext) -> Self {
        self.partner_min_hcp = Some(context.partner_min_hcp);
        self.partner_max_hcp = Some(context.partner_max_hcp);
        self.combined_estimate = Some(context.combined_estimate);
        self
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.lengths[suit.idx()]
    }

    pub fn has_stopper(&self, suit: Suit) -> bool {
        self.stoppers[suit.idx()]
    }

    pub fn is_balanced(&self) -> bool {
        self.shape == Shape::Balanced
    }

    pub fn is_semi_balanced(&self) -> bool {
        self.shape == Shape::SemiBalanced
    }

    pub fn support_for(&self, suit: Option<Suit>) -> u8 {
        suit.map_or(0, |s| self.length(s))
    }

    pub fn support_points(&self) -> u8 {
        match self.partner_suit {
            Some(trump) if self.length(trump) >= 3 => {
                let shortness: u8 = Suit::ALL
                    .iter()
                    .filter(|&&s| s != trump)
                    .map(|&s| match self.length(s) {
                        0 => 5,
                        1 => 3,
                        2 => 1,
                        _ => 0,
                    })
                    .sum();
                self.hcp + shortness
            }
            _ => self.total_points,
        }
    }

    pub fn all_opponent_suits_stopped(&self) -> bool {
        self.opponent_suits.iter().all(|&s| self.has_stopper(s))
    }

    /// Cheapest level at which `strain` can be bid now, 0 when it cannot.
    pub fn cheapest_level(&self, strain: Option<Strain>) -> u8 {
        strain
            .and_then(|s| self.auction.minimum_bid_in(s))
            .and_then(|c| c.level())
            .unwrap_or(0)
    }

    /// One level above the cheapest, 0 when that is off the ladder.
    pub fn jump_level(&self, strain: Option<Strain>) -> u8 {
        match self.cheapest_level(strain) {
            0 | 7 => 0,
            level => level + 1,
        }
    }

    fn suit_level(&self, suit: Option<Suit>) -> u8 {
        self.cheapest_level(suit.map(Strain::from))
    }

    fn suit_jump(&self, suit: Option<Suit>) -> u8 {
        self.jump_level(suit.map(Strain::from))
    }

    pub fn rule_of_20(&self) -> bool {
        let mut sorted = self.lengths;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        self.hcp + sorted[0] + sorted[1] >= 20
    }

    pub fn rule_of_15(&self) -> bool {
        self.hcp + self.length(Suit::Spades) >= 15
    }

    /// Opener bidding a second suit at the two level above the first one.
    pub fn second_suit_is_reverse(&self) -> bool {
        match (self.my_suit, self.second_suit) {
            (Some(first), Some(second)) => second > first && self.suit_level(Some(second)) == 2,
            _ => false,
        }
    }

    pub fn partner_raised_my_suit(&self) -> bool {
        self.my_suit.is_some() && self.partner_last_bid.and_then(|c| c.suit()) == self.my_suit
    }

    pub fn is_opening(&self) -> bool {
        self.role == Role::Opening
    }

    /// Look a fact up by name. Unknown names give `None`; absent facts give
    /// an empty string or zero.
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        use FeatureValue::{Bool, Float, Int, Text};
        let int = |v: u8| Int(v as i64);
        let value = match name {
            "hcp" => int(self.hcp),
            "total_points" => int(self.total_points),
            "support_points" => int(self.support_points()),
            "quick_tricks" => Float(self.quick_tricks as f64),
            "spades" => int(self.length(Suit::Spades)),
            "hearts" => int(self.length(Suit::Hearts)),
            "diamonds" => int(self.length(Suit::Diamonds)),
            "clubs" => int(self.length(Suit::Clubs)),
            "shape" => Text(self.shape.name().to_string()),
            "is_balanced" => Bool(self.is_balanced()),
            "is_semi_balanced" => Bool(self.is_semi_balanced()),
            "longest_suit" => Text(self.longest_suit.to_string()),
            "longest_suit_length" => int(self.length(self.longest_suit)),
            "longest_major" => Text(self.longest_major.to_string()),
            "longest_major_length" => int(self.length(self.longest_major)),
            "better_minor" => Text(self.better_minor.to_string()),
            "aces" => int(self.aces),
            "kings" => int(self.kings),
            "seat_number" => int(self.seat_number),
            "is_opening" => Bool(self.role == Role::Opening),
            "is_response" => Bool(self.role == Role::Response),
            "is_opener_rebid" => Bool(self.role == Role::OpenerRebid),
            "is_responder_rebid" => Bool(self.role == Role::ResponderRebid),
            "is_overcall" => Bool(self.role == Role::Overcall),
            "is_advancer" => Bool(self.role == Role::Advance),
            "is_balancing" => Bool(self.is_balancing),
            "is_overcaller_rebid" => Bool(self.role == Role::OvercallerRebid),
            "opening_bid" => FeatureValue::text(self.opening_bid),
            "partner_first_bid" => FeatureValue::text(self.partner_first_bid),
            "partner_last_bid" => FeatureValue::text(self.partner_last_bid),
            "my_first_bid" => FeatureValue::text(self.my_first_bid),
            "my_last_bid" => FeatureValue::text(self.my_last_bid),
            "my_bid_count" => int(self.my_bid_count),
            "rho_last_call" => FeatureValue::text(self.rho_last_call),
            "last_bid" => FeatureValue::text(self.last_bid),
            "partner_suit" => FeatureValue::text(self.partner_suit),
            "partner_last_suit" => FeatureValue::text(self.partner_last_suit),
            "support_for_partner" => int(self.support_for(self.partner_suit)),
            "support_for_partner_last_suit" => int(self.support_for(self.partner_last_suit)),
            "partner_raised_my_suit" => Bool(self.partner_raised_my_suit()),
            "partner_passed_hand" => Bool(self.partner_passed_hand),
            "game_reached" => Bool(self.auction.game_reached_by(self.seat.partnership())),
            "my_suit" => FeatureValue::text(self.my_suit),
            "my_suit_length" => int(self.support_for(self.my_suit)),
            "second_suit" => FeatureValue::text(self.second_suit),
            "second_suit_length" => int(self.support_for(self.second_suit)),
            "second_suit_is_reverse" => Bool(self.second_suit_is_reverse()),
            "opponent_suit" => FeatureValue::text(self.opponent_suit),
            "opponent_suit_length" => int(self.support_for(self.opponent_suit)),
            "longest_suit_is_opponents" => Bool(self.opponent_suits.contains(&self.longest_suit)),
            "opponents_have_bid" => Bool(self.opponents_have_bid),
            "interference" => Bool(self.interference),
            "all_opponent_suits_stopped" => Bool(self.all_opponent_suits_stopped()),
            "stopper_in_opponent_suit" => {
                Bool(self.opponent_suit.is_some_and(|s| self.has_stopper(s)))
            }
            "has_4_card_major" => Bool(Suit::MAJORS.iter().any(|&s| self.length(s) >= 4)),
            "has_5_card_major" => Bool(Suit::MAJORS.iter().any(|&s| self.length(s) >= 5)),
            "rule_of_20" => Bool(self.rule_of_20()),
            "rule_of_15" => Bool(self.rule_of_15()),
            "new_suit_one_level" => FeatureValue::text(self.new_suit_one_level),
            "new_suit_two_level" => FeatureValue::text(self.new_suit_two_level),
            "cheapest_level_longest_suit" => int(self.suit_level(Some(self.longest_suit))),
            "jump_level_longest_suit" => int(self.suit_jump(Some(self.longest_suit))),
            "cheapest_level_partner_suit" => int(self.suit_level(self.partner_suit)),
            "jump_level_partner_suit" => int(self.suit_jump(self.partner_suit)),
            "cheapest_level_partner_last_suit" => int(self.suit_level(self.partner_last_suit)),
            "cheapest_level_my_suit" => int(self.suit_level(self.my_suit)),
            "jump_level_my_suit" => int(self.suit_jump(self.my_suit)),
            "cheapest_level_second_suit" => int(self.suit_level(self.second_suit)),
            "cheapest_level_notrump" => int(self.cheapest_level(Some(Strain::NoTrump))),
            "partner_min_hcp" => int(self.partner_min_hcp.unwrap_or(0)),
            "partner_max_hcp" => int(self.partner_max_hcp.unwrap_or(0)),
            "combined_estimate" => int(self.combined_estimate.unwrap_or(self.hcp)),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(hand: &str, dealer: Position, calls: &str) -> FeatureSnapshot {
        let auction = Auction::bidding(dealer, calls);
        let seat = auction.current_player();
        extract(&Hand::parse(hand), &auction, seat)
    }

    #[test]
    fn every_listed_name_resolves() {
        let f = snapshot("AK2.Q32.KJ32.Q32", Position::North, "1S P");
        for name in FEATURE_NAMES {
            assert!(f.get(name).is_some(), "{name} not answered");
        }
        assert_eq!(f.get("no_such_feature"), None);
    }

    #[test]
    fn empty_history_is_an_opening() {
        let f = snapshot("AK2.Q32.KJ32.Q32", Position::North, "");
        assert_eq!(f.role, Role::Opening);
        assert_eq!(f.get("is_opening"), Some(FeatureValue::Bool(true)));
        assert_eq!(f.get("seat_number"), Some(FeatureValue::Int(1)));
        assert_eq!(f.get("opening_bid"), Some(FeatureValue::Text(String::new())));
        assert_eq!(f.get("cheapest_level_partner_suit"), Some(FeatureValue::Int(0)));
    }

    #[test]
    fn roles_follow_the_auction() {
        let hand = "AK2.Q32.KJ32.Q32";
        assert_eq!(snapshot(hand, Position::North, "1H P").role, Role::Response);
        assert_eq!(snapshot(hand, Position::North, "1H P 1S P").role, Role::OpenerRebid);
        assert_eq!(snapshot(hand, Position::North, "1H P 1S P 2H P").role, Role::ResponderRebid);
        assert_eq!(snapshot(hand, Position::North, "1H 1S").role, Role::Response);
        assert_eq!(snapshot(hand, Position::North, "1H").role, Role::Overcall);
        assert_eq!(snapshot(hand, Position::North, "1H 1S P").role, Role::Advance);
        assert_eq!(snapshot(hand, Position::North, "1H X P").role, Role::Advance);
        assert_eq!(snapshot(hand, Position::North, "1H 1S 2H 2S P").role, Role::OvercallerRebid);
    }

    #[test]
    fn balancing_seats() {
        let hand = "AK2.Q32.KJ32.Q32";
        let f = snapshot(hand, Position::North, "1H P P");
        assert_eq!(f.role, Role::Balancing);
        assert!(f.is_balancing);
        let f = snapshot(hand, Position::North, "P P P");
        assert_eq!(f.role, Role::Opening);
        assert!(f.is_balancing);
        assert_eq!(f.seat_number, 4);
        let f = snapshot(hand, Position::North, "1H P 2H P P");
        assert_eq!(f.role, Role::Balancing);
        // East already overcalled, so this is not a balancing seat.
        let f = snapshot(hand, Position::North, "1H 1S 2H P P");
        assert_eq!(f.role, Role::OvercallerRebid);
        assert!(!f.is_balancing);
    }

    #[test]
    fn partner_and_opponent_suits() {
        // North 1H, East 1S, South to act.
        let f = snapshot("A2.K32.Q432.K432", Position::North, "1H 1S");
        assert_eq!(f.partner_suit, Some(Suit::Hearts));
        assert_eq!(f.opponent_suit, Some(Suit::Spades));
        assert!(f.interference);
        assert!(f.opponents_have_bid);
        assert_eq!(f.get("support_for_partner"), Some(FeatureValue::Int(4)));
        assert_eq!(f.get("cheapest_level_partner_suit"), Some(FeatureValue::Int(2)));
        assert_eq!(f.get("jump_level_partner_suit"), Some(FeatureValue::Int(3)));
        assert!(f.all_opponent_suits_stopped());
    }

    #[test]
    fn strong_two_clubs_is_not_a_suit() {
        let f = snapshot("432.432.5432.432", Position::North, "2C P");
        assert_eq!(f.partner_suit, None);
        assert_eq!(f.partner_first_bid, Some(Call::suit_bid(2, Suit::Clubs)));
    }

    #[test]
    fn new_suit_choices() {
        // Four-four goes up the line; five-five bids the higher suit.
        let f = snapshot("32.432.AQ32.KJ32", Position::North, "1C P");
        assert_eq!(f.new_suit_one_level, Some(Suit::Hearts));
        let f = snapshot("2.32.AQ432.KJ432", Position::North, "1C P");
        assert_eq!(f.new_suit_one_level, Some(Suit::Spades));
        // Over 1S, a four-card heart suit is not enough at the two level.
        let f = snapshot("AQ32.32.KJ32.432", Position::North, "1S P");
        assert_eq!(f.new_suit_one_level, None);
        assert_eq!(f.new_suit_two_level, Some(Suit::Clubs));
    }

    #[test]
    fn better_minor_and_rules_of_twenty_and_fifteen() {
        let f = snapshot("AK32.Q432.K32.Q2", Position::North, "");
        assert_eq!(f.better_minor, Suit::Diamonds);
        let f = snapshot("AK2.Q32.K32.Q432", Position::North, "");
        assert_eq!(f.better_minor, Suit::Clubs);
        // 10 HCP with 5-5 meets the rule of 20.
        let f = snapshot("2.32.AQ432.KJ432", Position::North, "");
        assert!(f.rule_of_20());
        // Fourth seat: 11 HCP plus four spades is exactly 15.
        let f = snapshot("AK2.Q32.432.Q432", Position::North, "P P P");
        assert!(f.rule_of_15());
    }

    #[test]
    fn reverse_detection() {
        // Opened 1D, holds four hearts: 2H would be a reverse.
        let f = snapshot("2.AKJ32.AQ32.432", Position::North, "1D P 1S P");
        assert_eq!(f.my_suit, Some(Suit::Diamonds));
        assert_eq!(f.second_suit, Some(Suit::Hearts));
        assert!(f.second_suit_is_reverse());
    }

    #[test]
    fn passed_hand_partner() {
        let f = snapshot("AK2.Q32.KJ32.Q32", Position::North, "P P P 1S");
        assert!(f.partner_passed_hand);
        let f = snapshot("AK2.Q32.KJ32.Q32", Position::North, "1S P");
        assert!(!f.partner_passed_hand);
    }
}
