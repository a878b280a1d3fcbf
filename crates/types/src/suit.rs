use serde::{Deserialize, Serialize};
use std::fmt;

/// The four suits, declared in ascending bridge rank so the derived
/// ordering matches the auction ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
    pub const MAJORS: [Suit; 2] = [Suit::Spades, Suit::Hearts];
    pub const MINORS: [Suit; 2] = [Suit::Diamonds, Suit::Clubs];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub fn is_major(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Spades)
    }

    pub fn is_minor(self) -> bool {
        !self.is_major()
    }

    /// The other suit of the same kind (hearts <-> spades, clubs <-> diamonds).
    pub fn sibling(self) -> Suit {
        match self {
            Suit::Clubs => Suit::Diamonds,
            Suit::Diamonds => Suit::Clubs,
            Suit::Hearts => Suit::Spades,
            Suit::Spades => Suit::Hearts,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
