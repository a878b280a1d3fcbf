use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{0}' as a call")]
pub struct ParseCallError(pub String);

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn suit_bid(level: u8, suit: Suit) -> Self {
        Call::Bid {
            level,
            strain: suit.into(),
        }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Suit of a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(Strain::to_suit)
    }

    /// Position of a bid on the 35-step ladder (1C = 0, 7N = 34).
    pub fn step(&self) -> Option<u8> {
        match self {
            Call::Bid { level, strain } => Some((level - 1) * 5 + strain.idx() as u8),
            _ => None,
        }
    }

    /// Bids strictly above `other` on the ladder.
    pub fn outranks(&self, other: &Call) -> bool {
        match (self.step(), other.step()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }

    /// Human text with suit symbols, e.g. "1♠", "3NT", "Pass".
    pub fn pretty(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "Double".to_string(),
            Call::Redouble => "Redouble".to_string(),
            Call::Bid { level, strain } => match strain.to_suit() {
                Some(suit) => format!("{}{}", level, suit.symbol()),
                None => format!("{level}NT"),
            },
        }
    }
}

impl FromStr for Call {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let err = || ParseCallError(s.to_string());
        match upper.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = upper.chars();
        let level = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(err)? as u8;
        if !(1..=7).contains(&level) {
            return Err(err());
        }
        let strain = match chars.as_str() {
            "NT" => Strain::NoTrump,
            rest if rest.chars().count() == 1 => {
                rest.chars().next().and_then(Strain::from_char).ok_or_else(err)?
            }
            _ => return Err(err()),
        };
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_spellings() {
        assert_eq!("p".parse::<Call>(), Ok(Call::Pass));
        assert_eq!("Dbl".parse::<Call>(), Ok(Call::Double));
        assert_eq!("XX".parse::<Call>(), Ok(Call::Redouble));
        assert_eq!("1NT".parse::<Call>(), Ok(Call::bid(1, Strain::NoTrump)));
        assert_eq!("3n".parse::<Call>(), Ok(Call::bid(3, Strain::NoTrump)));
        assert_eq!("4s".parse::<Call>(), Ok(Call::suit_bid(4, Suit::Spades)));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "8C", "0S", "1Z", "1SX", "banana"] {
            assert!(bad.parse::<Call>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn ladder_order() {
        let one_spade = Call::suit_bid(1, Suit::Spades);
        let one_nt = Call::bid(1, Strain::NoTrump);
        let two_clubs = Call::suit_bid(2, Suit::Clubs);
        assert!(one_nt.outranks(&one_spade));
        assert!(two_clubs.outranks(&one_nt));
        assert!(!Call::Pass.outranks(&one_spade));
        assert_eq!(Call::bid(7, Strain::NoTrump).step(), Some(34));
    }

    #[test]
    fn renders() {
        assert_eq!(Call::bid(3, Strain::NoTrump).render(), "3N");
        assert_eq!(Call::bid(3, Strain::NoTrump).pretty(), "3NT");
        assert_eq!(Call::suit_bid(2, Suit::Hearts).pretty(), "2♥");
        assert_eq!(Call::Double.to_string(), "X");
    }
}
