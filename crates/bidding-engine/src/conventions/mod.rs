//! Named conventions, each behind the [`Convention`] interface.
//!
//! Multi-round conventions keep no state between turns: every turn they
//! re-read the auction to find out where in their sequence they are.

mod blackwood;
mod fourth_suit;
mod jacoby_2nt;
mod jacoby_transfer;
mod michaels;
mod negative_double;
mod preempt;
mod registry;
mod splinter;
mod stayman;
mod takeout_double;
mod unusual_2nt;

pub use blackwood::{ace_reply, select_trump, Blackwood};
pub use fourth_suit::FourthSuitForcing;
pub use jacoby_2nt::Jacoby2Nt;
pub use jacoby_transfer::JacobyTransfer;
pub use michaels::Michaels;
pub use negative_double::NegativeDouble;
pub use preempt::Preempt;
pub use registry::{registry, METADATA};
pub use splinter::Splinter;
pub use stayman::Stayman;
pub use takeout_double::TakeoutDouble;
pub use unusual_2nt::Unusual2Nt;

use crate::config::EngineConfig;
use crate::context::AuctionContext;
use crate::features::FeatureSnapshot;
use crate::forcing::ForcingLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Auction, Call, Hand, Position, Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionId {
    Blackwood,
    JacobyTransfer,
    Stayman,
    Splinter,
    #[serde(rename = "jacoby_2nt")]
    Jacoby2Nt,
    FourthSuitForcing,
    NegativeDouble,
    Michaels,
    #[serde(rename = "unusual_2nt")]
    Unusual2Nt,
    TakeoutDouble,
    Preempt,
}

impl ConventionId {
    pub const ALL: [ConventionId; 11] = [
        ConventionId::Blackwood,
        ConventionId::JacobyTransfer,
        ConventionId::Stayman,
        ConventionId::Splinter,
        ConventionId::Jacoby2Nt,
        ConventionId::FourthSuitForcing,
        ConventionId::NegativeDouble,
        ConventionId::Michaels,
        ConventionId::Unusual2Nt,
        ConventionId::TakeoutDouble,
        ConventionId::Preempt,
    ];

    pub fn metadata(self) -> &'static ConventionMetadata {
        &METADATA[self as usize]
    }

    pub fn convention(self) -> &'static dyn Convention {
        match self {
            ConventionId::Blackwood => &Blackwood,
            ConventionId::JacobyTransfer => &JacobyTransfer,
            ConventionId::Stayman => &Stayman,
            ConventionId::Splinter => &Splinter,
            ConventionId::Jacoby2Nt => &Jacoby2Nt,
            ConventionId::FourthSuitForcing => &FourthSuitForcing,
            ConventionId::NegativeDouble => &NegativeDouble,
            ConventionId::Michaels => &Michaels,
            ConventionId::Unusual2Nt => &Unusual2Nt,
            ConventionId::TakeoutDouble => &TakeoutDouble,
            ConventionId::Preempt => &Preempt,
        }
    }
}

impl fmt::Display for ConventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metadata().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionLevel {
    Essential,
    Intermediate,
    Advanced,
}

#[derive(Debug, Serialize)]
pub struct ConventionMetadata {
    pub id: ConventionId,
    pub name: &'static str,
    pub level: ConventionLevel,
    /// Higher is consulted first.
    pub priority: u8,
    pub category: &'static str,
    pub prerequisites: &'static [ConventionId],
    /// The predicate that decides when the convention speaks.
    pub applicability: &'static str,
}

/// Everything a convention may look at for one decision.
#[derive(Clone, Copy)]
pub struct Situation<'a> {
    pub hand: &'a Hand,
    pub features: &'a FeatureSnapshot,
    pub context: &'a AuctionContext,
    pub config: &'a EngineConfig,
}

impl<'a> Situation<'a> {
    pub fn auction(&self) -> &'a Auction {
        &self.features.auction
    }

    pub fn seat(&self) -> Position {
        self.features.seat
    }

    pub fn is_legal(&self, call: Call) -> bool {
        self.auction().is_legal(call)
    }

    /// Cheapest legal bid in `strain`, if any.
    pub fn cheapest(&self, strain: impl Into<Strain>) -> Option<Call> {
        self.auction().minimum_bid_in(strain.into())
    }

    /// `call` if it is legal now.
    pub fn legal(&self, call: Call) -> Option<Call> {
        self.is_legal(call).then_some(call)
    }

    /// The bidding of our partnership, provided we opened and the
    /// opponents have only passed.
    pub fn uncontested(&self) -> Option<Sequence> {
        Sequence::uncontested(self.auction(), self.seat())
    }

    pub fn is_enabled(&self, id: ConventionId) -> bool {
        self.config.is_enabled(id)
    }
}

/// What a convention wants to call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    pub call: Call,
    pub explanation: String,
    pub forcing: ForcingLevel,
    /// Placement calls that ignore the usual point-count promises.
    pub bypass_hcp: bool,
    /// Artificial or placement calls that say nothing about suit length.
    pub bypass_suit_length: bool,
}

impl Proposal {
    pub fn new(call: Call, explanation: impl Into<String>) -> Self {
        Self {
            call,
            explanation: explanation.into(),
            forcing: ForcingLevel::NonForcing,
            bypass_hcp: false,
            bypass_suit_length: false,
        }
    }

    pub fn forcing(mut self, level: ForcingLevel) -> Self {
        self.forcing = level;
        self
    }

    pub fn artificial(mut self) -> Self {
        self.bypass_suit_length = true;
        self
    }

    pub fn signoff(mut self) -> Self {
        self.bypass_hcp = true;
        self.bypass_suit_length = true;
        self
    }
}

pub trait Convention: Sync {
    fn id(&self) -> ConventionId;

    /// The call this convention would make, or `None` when it has nothing
    /// to say at this turn.
    fn propose(&self, situation: &Situation) -> Option<Proposal>;

    fn metadata(&self) -> &'static ConventionMetadata {
        self.id().metadata()
    }

    fn is_applicable(&self, situation: &Situation) -> bool {
        situation.is_enabled(self.id()) && self.propose(situation).is_some()
    }

    /// Total over the applicable domain: falls back to Pass.
    fn propose_bid(&self, situation: &Situation) -> Proposal {
        self.propose(situation).unwrap_or_else(|| {
            Proposal::new(
                Call::Pass,
                format!("{}: no continuation", self.metadata().name),
            )
        })
    }
}

/// Our partnership's calls from the opening on, when the opponents have
/// done nothing but pass since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub opener: Position,
    pub calls: Vec<Call>,
}

impl Sequence {
    pub fn uncontested(auction: &Auction, seat: Position) -> Option<Self> {
        let (opener, _) = auction.opening_bid()?;
        if !seat.partnership().contains(opener) {
            return None;
        }
        let mut calls = Vec::new();
        for (position, call) in auction.iter().skip_while(|(_, c)| !c.is_bid()) {
            if position.is_opponent_of(seat) {
                if !call.is_pass() {
                    return None;
                }
            } else {
                calls.push(call);
            }
        }
        Some(Self { opener, calls })
    }

    /// Calls rendered as `1N`, `2C`, ... for slice matching.
    pub fn rendered(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.render()).collect()
    }

    /// True when `seat` is the next of the partnership to call.
    pub fn next_is(&self, seat: Position) -> bool {
        let opener_next = self.calls.len() % 2 == 0;
        (seat == self.opener) == opener_next
    }
}

/// The suit in which `hand` is shortest among `suits`, voids first, ties to
/// the lower suit.
pub(crate) fn shortest_of(hand: &Hand, suits: impl Iterator<Item = Suit>) -> Option<Suit> {
    suits.min_by_key(|&s| (hand.length(s), s))
}
