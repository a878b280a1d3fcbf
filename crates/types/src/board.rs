use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    /// Next seat clockwise.
    pub fn next(self) -> Self {
        self.advance(1)
    }

    /// The seat `steps` turns after this one.
    pub fn advance(self, steps: usize) -> Self {
        Position::ALL[(self.idx() + steps) % 4]
    }

    /// Number of turns from `self` until `other` acts (0..=3).
    pub fn distance_to(self, other: Position) -> usize {
        (other.idx() + 4 - self.idx()) % 4
    }

    pub fn partner(self) -> Self {
        self.advance(2)
    }

    /// Left-hand opponent, who calls after us.
    pub fn lho(self) -> Self {
        self.advance(1)
    }

    /// Right-hand opponent, who called just before us.
    pub fn rho(self) -> Self {
        self.advance(3)
    }

    pub fn is_opponent_of(self, other: Position) -> bool {
        self.partnership() != other.partnership()
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Accepts "N" or "North" in any case.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let full = Position::ALL
            .into_iter()
            .find(|p| format!("{p:?}").eq_ignore_ascii_case(s));
        let mut chars = s.chars();
        let short = match (chars.next(), chars.next()) {
            (Some(c), None) => Position::from_char(c),
            _ => None,
        };
        full.or(short).ok_or_else(|| format!("unknown seat '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_rotate_clockwise() {
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::West.next(), Position::North);
        assert_eq!(Position::South.rho(), Position::East);
        assert_eq!(Position::South.lho(), Position::West);
        assert_eq!(Position::East.partner(), Position::West);
        assert_eq!(Position::West.distance_to(Position::North), 1);
        assert_eq!(Position::North.distance_to(Position::West), 3);
    }

    #[test]
    fn partnerships() {
        assert_eq!(Position::South.partnership(), Partnership::NS);
        assert!(Partnership::EW.contains(Position::West));
        assert!(Position::North.is_opponent_of(Position::East));
        assert!(!Position::North.is_opponent_of(Position::South));
        assert_eq!(Partnership::NS.opponent(), Partnership::EW);
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("n".parse::<Position>(), Ok(Position::North));
        assert_eq!("West".parse::<Position>(), Ok(Position::West));
        assert!("Q".parse::<Position>().is_err());
    }
}
