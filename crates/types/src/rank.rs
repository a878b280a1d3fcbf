use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// Descending order, the way hands are written.
    pub const DESCENDING: [Rank; 13] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ];

    /// Milton Work count.
    pub fn hcp(self) -> u8 {
        match self {
            Rank::Ace => 4,
            Rank::King => 3,
            Rank::Queen => 2,
            Rank::Jack => 1,
            _ => 0,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            spot => char::from_digit(spot as u32, 10).unwrap_or('?'),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Rank::Ace),
            'K' => Some(Rank::King),
            'Q' => Some(Rank::Queen),
            'J' => Some(Rank::Jack),
            'T' | '0' => Some(Rank::Ten),
            d => {
                let value = d.to_digit(10)?;
                Self::DESCENDING
                    .iter()
                    .copied()
                    .find(|rank| *rank as u32 == value && value >= 2)
            }
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_honors_and_spots() {
        assert_eq!(Rank::from_char('a'), Some(Rank::Ace));
        assert_eq!(Rank::from_char('T'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('0'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('7'), Some(Rank::Seven));
        assert_eq!(Rank::from_char('1'), None);
        assert_eq!(Rank::from_char('Z'), None);
    }

    #[test]
    fn renders_spots_as_digits() {
        assert_eq!(Rank::Nine.to_string(), "9");
        assert_eq!(Rank::Ten.to_string(), "T");
    }

    #[test]
    fn honor_points() {
        let total: u8 = Rank::DESCENDING.iter().map(|r| r.hcp()).sum();
        assert_eq!(total, 10);
    }
}
