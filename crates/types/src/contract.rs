use crate::board::Position;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

/// The last bid of an auction with its declarer: the partner of that side
/// who first named the strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    pub fn is_game(&self) -> bool {
        self.level >= self.strain.game_level()
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }
}

/// `4S by N`, `3NX by E`.
impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doubled = match self.double_status {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        };
        write!(f, "{}{}{doubled} by {}", self.level, self.strain, self.declarer)
    }
}
