//! Forcing obligations carried between turns of one deal.

use crate::context::classify_call;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Auction, Partnership, Position};

/// How strongly a call obliges partner to keep bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForcingLevel {
    #[default]
    NonForcing,
    ForcingOneRound,
    GameForce,
}

impl fmt::Display for ForcingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ForcingLevel::NonForcing => "non-forcing",
            ForcingLevel::ForcingOneRound => "forcing one round",
            ForcingLevel::GameForce => "game forcing",
        };
        write!(f, "{text}")
    }
}

/// One partnership's forcing state within a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ForcingState {
    pub level: ForcingLevel,
    /// Who made the call that set the current level.
    pub set_by: Option<Position>,
}

impl ForcingState {
    /// Account for a call by a member of this partnership.
    ///
    /// Game force never lapses. A one-round force is consumed by the next
    /// call from either partner unless that call re-asserts it.
    pub fn record(&mut self, position: Position, tag: ForcingLevel) {
        if self.level == ForcingLevel::GameForce {
            return;
        }
        match tag {
            ForcingLevel::GameForce | ForcingLevel::ForcingOneRound => {
                self.level = tag;
                self.set_by = Some(position);
            }
            ForcingLevel::NonForcing => {
                self.level = ForcingLevel::NonForcing;
                self.set_by = None;
            }
        }
    }

    /// Rebuild a partnership's state from an auction whose calls were not
    /// tracked as they were made, reading each call's usual meaning.
    pub fn replay(auction: &Auction, partnership: Partnership) -> Self {
        let mut state = ForcingState::default();
        for (index, (position, _)) in auction.iter().enumerate() {
            if !partnership.contains(position) {
                continue;
            }
            let tag = classify_call(auction, index)
                .map(|kind| kind.forcing())
                .unwrap_or_default();
            state.record(position, tag);
        }
        state
    }

    pub fn is_game_forcing(&self) -> bool {
        self.level == ForcingLevel::GameForce
    }

    /// True when `position` is under an obligation created by its partner.
    pub fn binds(&self, position: Position) -> bool {
        match self.level {
            ForcingLevel::GameForce => true,
            ForcingLevel::ForcingOneRound => self.set_by == Some(position.partner()),
            ForcingLevel::NonForcing => false,
        }
    }
}
