//! HCP promised by each kind of call, kept in one table.

use crate::forcing::ForcingLevel;
use serde::Serialize;
use std::fmt;

/// Point thresholds shared by rules, conventions and policies.
pub struct PointRanges;

impl PointRanges {
    pub const GAME_THRESHOLD: u8 = 25;
    pub const SLAM_THRESHOLD: u8 = 33;
    pub const GRAND_SLAM_THRESHOLD: u8 = 37;
    pub const MAX_HCP: u8 = 37;
}

/// Inclusive HCP interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HcpRange {
    pub min: u8,
    pub max: u8,
}

impl HcpRange {
    pub const UNKNOWN: HcpRange = HcpRange {
        min: 0,
        max: PointRanges::MAX_HCP,
    };

    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, hcp: u8) -> bool {
        (self.min..=self.max).contains(&hcp)
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    pub fn intersect(&self, other: &HcpRange) -> Option<HcpRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(HcpRange { min, max })
    }
}

impl fmt::Display for HcpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max >= PointRanges::MAX_HCP {
            write!(f, "{}+", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BidKind {
    OpeningOneSuit,
    OpeningOneNotrump,
    OpeningTwoNotrump,
    OpeningStrongTwoClubs,
    OpeningWeakTwo,
    OpeningPreempt,
    OpeningPass,
    ResponseNewSuitOneLevel,
    ResponseOneNotrump,
    ResponseSingleRaise,
    ResponseLimitRaise,
    ResponseGameRaise,
    ResponseNewSuitTwoLevel,
    ResponseJumpShift,
    ResponseTwoNotrump,
    ResponseThreeNotrump,
    ResponseJacoby2Nt,
    ResponseSplinter,
    ResponseStayman,
    ResponseTransfer,
    ResponseNotrumpInvite,
    ResponseNotrumpGame,
    ResponsePass,
    NegativeDouble,
    OvercallOneLevel,
    OvercallTwoLevel,
    WeakJumpOvercall,
    OvercallOneNotrump,
    TakeoutDouble,
    MichaelsCuebid,
    Unusual2Nt,
    RebidOneNotrump,
    RebidJumpTwoNotrump,
    RebidSingleRaise,
    RebidJumpRaise,
    RebidJumpOwnSuit,
    RebidReverse,
    ResponderRebidTwoNotrump,
}

/// HCP shown by each kind of call. Every [`BidKind`] has exactly one row.
pub const HCP_TABLE: &[(BidKind, HcpRange)] = &[
    (BidKind::OpeningOneSuit, HcpRange::new(12, 21)),
    (BidKind::OpeningOneNotrump, HcpRange::new(15, 17)),
    (BidKind::OpeningTwoNotrump, HcpRange::new(20, 21)),
    (BidKind::OpeningStrongTwoClubs, HcpRange::new(22, 37)),
    (BidKind::OpeningWeakTwo, HcpRange::new(5, 11)),
    (BidKind::OpeningPreempt, HcpRange::new(5, 10)),
    (BidKind::OpeningPass, HcpRange::new(0, 11)),
    (BidKind::ResponseNewSuitOneLevel, HcpRange::new(6, 37)),
    (BidKind::ResponseOneNotrump, HcpRange::new(6, 10)),
    (BidKind::ResponseSingleRaise, HcpRange::new(6, 10)),
    (BidKind::ResponseLimitRaise, HcpRange::new(10, 12)),
    (BidKind::ResponseGameRaise, HcpRange::new(5, 9)),
    (BidKind::ResponseNewSuitTwoLevel, HcpRange::new(10, 37)),
    (BidKind::ResponseJumpShift, HcpRange::new(19, 37)),
    (BidKind::ResponseTwoNotrump, HcpRange::new(13, 15)),
    (BidKind::ResponseThreeNotrump, HcpRange::new(16, 18)),
    (BidKind::ResponseJacoby2Nt, HcpRange::new(13, 37)),
    (BidKind::ResponseSplinter, HcpRange::new(13, 16)),
    (BidKind::ResponseStayman, HcpRange::new(8, 37)),
    (BidKind::ResponseTransfer, HcpRange::new(0, 37)),
    (BidKind::ResponseNotrumpInvite, HcpRange::new(8, 9)),
    (BidKind::ResponseNotrumpGame, HcpRange::new(10, 15)),
    (BidKind::ResponsePass, HcpRange::new(0, 5)),
    (BidKind::NegativeDouble, HcpRange::new(6, 37)),
    (BidKind::OvercallOneLevel, HcpRange::new(8, 16)),
    (BidKind::OvercallTwoLevel, HcpRange::new(11, 16)),
    (BidKind::WeakJumpOvercall, HcpRange::new(5, 10)),
    (BidKind::OvercallOneNotrump, HcpRange::new(15, 18)),
    (BidKind::TakeoutDouble, HcpRange::new(12, 37)),
    (BidKind::MichaelsCuebid, HcpRange::new(8, 37)),
    (BidKind::Unusual2Nt, HcpRange::new(8, 37)),
    (BidKind::RebidOneNotrump, HcpRange::new(12, 14)),
    (BidKind::RebidJumpTwoNotrump, HcpRange::new(18, 19)),
    (BidKind::RebidSingleRaise, HcpRange::new(12, 15)),
    (BidKind::RebidJumpRaise, HcpRange::new(16, 18)),
    (BidKind::RebidJumpOwnSuit, HcpRange::new(16, 18)),
    (BidKind::RebidReverse, HcpRange::new(17, 21)),
    (BidKind::ResponderRebidTwoNotrump, HcpRange::new(11, 12)),
];

impl BidKind {
    pub const ALL: [BidKind; 38] = [
        BidKind::OpeningOneSuit,
        BidKind::OpeningOneNotrump,
        BidKind::OpeningTwoNotrump,
        BidKind::OpeningStrongTwoClubs,
        BidKind::OpeningWeakTwo,
        BidKind::OpeningPreempt,
        BidKind::OpeningPass,
        BidKind::ResponseNewSuitOneLevel,
        BidKind::ResponseOneNotrump,
        BidKind::ResponseSingleRaise,
        BidKind::ResponseLimitRaise,
        BidKind::ResponseGameRaise,
        BidKind::ResponseNewSuitTwoLevel,
        BidKind::ResponseJumpShift,
        BidKind::ResponseTwoNotrump,
        BidKind::ResponseThreeNotrump,
        BidKind::ResponseJacoby2Nt,
        BidKind::ResponseSplinter,
        BidKind::ResponseStayman,
        BidKind::ResponseTransfer,
        BidKind::ResponseNotrumpInvite,
        BidKind::ResponseNotrumpGame,
        BidKind::ResponsePass,
        BidKind::NegativeDouble,
        BidKind::OvercallOneLevel,
        BidKind::OvercallTwoLevel,
        BidKind::WeakJumpOvercall,
        BidKind::OvercallOneNotrump,
        BidKind::TakeoutDouble,
        BidKind::MichaelsCuebid,
        BidKind::Unusual2Nt,
        BidKind::RebidOneNotrump,
        BidKind::RebidJumpTwoNotrump,
        BidKind::RebidSingleRaise,
        BidKind::RebidJumpRaise,
        BidKind::RebidJumpOwnSuit,
        BidKind::RebidReverse,
        BidKind::ResponderRebidTwoNotrump,
    ];

    /// How far the call obliges partner to keep bidding.
    pub fn forcing(self) -> ForcingLevel {
        use BidKind::*;
        match self {
            OpeningStrongTwoClubs | ResponseJumpShift | ResponseJacoby2Nt | ResponseSplinter => {
                ForcingLevel::GameForce
            }
            ResponseNewSuitOneLevel
            | ResponseNewSuitTwoLevel
            | ResponseStayman
            | ResponseTransfer
            | NegativeDouble
            | TakeoutDouble
            | MichaelsCuebid
            | Unusual2Nt
            | RebidReverse => ForcingLevel::ForcingOneRound,
            _ => ForcingLevel::NonForcing,
        }
    }

    pub fn hcp(self) -> HcpRange {
        HCP_TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, range)| *range)
            .unwrap_or(HcpRange::UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_exactly_one_row() {
        for kind in BidKind::ALL {
            let rows = HCP_TABLE.iter().filter(|(k, _)| *k == kind).count();
            assert_eq!(rows, 1, "{kind:?} has {rows} rows");
        }
        assert_eq!(HCP_TABLE.len(), BidKind::ALL.len());
    }

    #[test]
    fn ranges_are_well_formed() {
        for (kind, range) in HCP_TABLE {
            assert!(range.min <= range.max, "{kind:?}");
            assert!(range.max <= PointRanges::MAX_HCP, "{kind:?}");
        }
    }

    #[test]
    fn notrump_structure() {
        assert_eq!(BidKind::OpeningOneNotrump.hcp(), HcpRange::new(15, 17));
        assert_eq!(BidKind::OpeningTwoNotrump.hcp(), HcpRange::new(20, 21));
        assert_eq!(BidKind::ResponseNotrumpInvite.hcp(), HcpRange::new(8, 9));
        assert_eq!(BidKind::RebidOneNotrump.hcp(), HcpRange::new(12, 14));
    }

    #[test]
    fn forcing_tags() {
        assert_eq!(BidKind::ResponseJacoby2Nt.forcing(), ForcingLevel::GameForce);
        assert_eq!(BidKind::ResponseNewSuitOneLevel.forcing(), ForcingLevel::ForcingOneRound);
        assert_eq!(BidKind::ResponseSingleRaise.forcing(), ForcingLevel::NonForcing);
    }

    #[test]
    fn intersection() {
        let opening = BidKind::OpeningOneSuit.hcp();
        let rebid = BidKind::RebidOneNotrump.hcp();
        assert_eq!(opening.intersect(&rebid), Some(HcpRange::new(12, 14)));
        assert_eq!(HcpRange::new(0, 5).intersect(&HcpRange::new(6, 9)), None);
        assert!(HcpRange::new(6, 9).contains(9));
        assert_eq!(HcpRange::new(22, 37).to_string(), "22+");
        assert_eq!(HcpRange::new(8, 9).to_string(), "8-9");
    }
}
