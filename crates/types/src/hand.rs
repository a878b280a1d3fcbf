// cspell:ignore AKQJT AKQJ
use crate::card::Card;
use crate::io::hand_parser::{self, HandParseError};
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// No singleton or void, at most one doubleton (4-3-3-3, 4-4-3-2, 5-3-3-2).
    Balanced,
    /// No void and either one singleton or two doubletons, longest suit at most six.
    SemiBalanced,
    Unbalanced,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Balanced => "balanced",
            Shape::SemiBalanced => "semi_balanced",
            Shape::Unbalanced => "unbalanced",
        }
    }
}

/// Suit lengths, indexed by `Suit::idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distribution([u8; 4]);

impl Distribution {
    pub fn length(&self, suit: Suit) -> u8 {
        self.0[suit.idx()]
    }

    /// Lengths from longest to shortest, e.g. `[5, 4, 3, 1]`.
    pub fn pattern(&self) -> [u8; 4] {
        let mut lengths = self.0;
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a dotted hand "Clubs.Diamonds.Hearts.Spades".
    /// Panics on invalid input; use `str::parse` for untrusted data.
    pub fn parse(s: &str) -> Self {
        hand_parser::parse_dotted(s).expect("invalid hand")
    }

    /// A dealt hand holds exactly thirteen cards.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == 13
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.rank.hcp()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn has(&self, suit: Suit, rank: Rank) -> bool {
        self.cards.contains(&Card::new(suit, rank))
    }

    pub fn distribution(&self) -> Distribution {
        let mut lengths = [0u8; 4];
        for card in &self.cards {
            lengths[card.suit.idx()] += 1;
        }
        Distribution(lengths)
    }

    pub fn shape(&self) -> Shape {
        let pattern = self.distribution().pattern();
        let doubletons = pattern.iter().filter(|&&l| l == 2).count();
        let singletons = pattern.iter().filter(|&&l| l == 1).count();
        let voids = pattern.iter().filter(|&&l| l == 0).count();

        if singletons == 0 && voids == 0 && doubletons <= 1 {
            Shape::Balanced
        } else if pattern[0] <= 6 && voids == 0 && (singletons == 1 || doubletons == 2) {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.shape() == Shape::Balanced
    }

    pub fn is_semi_balanced(&self) -> bool {
        self.shape() == Shape::SemiBalanced
    }

    /// HCP plus one point for every card beyond four in a suit.
    pub fn total_points(&self) -> u8 {
        let length_points: u8 = Suit::ALL
            .iter()
            .map(|&s| self.length(s).saturating_sub(4))
            .sum();
        self.hcp() + length_points
    }

    /// Dummy points when raising `trump`: HCP plus 5/3/1 for void/singleton/doubleton.
    pub fn support_points(&self, trump: Suit) -> u8 {
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
        self.hcp() + shortness
    }

    /// AK = 2, AQ = 1.5, A = 1, KQ = 1, Kx = 0.5 per suit.
    pub fn quick_tricks(&self) -> f32 {
        Suit::ALL
            .iter()
            .map(|&suit| {
                let ace = self.has(suit, Rank::Ace);
                let king = self.has(suit, Rank::King);
                let queen = self.has(suit, Rank::Queen);
                match (ace, king, queen) {
                    (true, true, _) => 2.0,
                    (true, false, true) => 1.5,
                    (true, false, false) => 1.0,
                    (false, true, true) => 1.0,
                    (false, true, false) if self.length(suit) >= 2 => 0.5,
                    _ => 0.0,
                }
            })
            .sum()
    }

    /// Number of stopping honors held: A, K with one guard, Q with two, J with three.
    pub fn stopper_count(&self, suit: Suit) -> u8 {
        let length = self.length(suit);
        [
            (Rank::Ace, 1),
            (Rank::King, 2),
            (Rank::Queen, 3),
            (Rank::Jack, 4),
        ]
        .iter()
        .filter(|(rank, min_len)| self.has(suit, *rank) && length >= *min_len)
        .count() as u8
    }

    pub fn has_stopper(&self, suit: Suit) -> bool {
        self.stopper_count(suit) > 0
    }

    pub fn aces(&self) -> u8 {
        self.count_rank(Rank::Ace)
    }

    pub fn kings(&self) -> u8 {
        self.count_rank(Rank::King)
    }

    fn count_rank(&self, rank: Rank) -> u8 {
        self.cards.iter().filter(|c| c.rank == rank).count() as u8
    }

    /// Longest suit; ties go to the higher-ranking suit.
    pub fn longest_suit(&self) -> Suit {
        Suit::ALL
            .into_iter()
            .rev()
            .max_by_key(|&s| (self.length(s), s))
            .unwrap_or(Suit::Spades)
    }

    /// Longer major; spades on a tie.
    pub fn longest_major(&self) -> Suit {
        if self.length(Suit::Hearts) > self.length(Suit::Spades) {
            Suit::Hearts
        } else {
            Suit::Spades
        }
    }

    /// Count how many of the top N honors (A, K, Q, J, T) the hand holds in a suit.
    pub fn top_honors(&self, suit: Suit, n: u8) -> u8 {
        Rank::DESCENDING
            .iter()
            .take(n.min(5) as usize)
            .filter(|&&rank| self.has(suit, rank))
            .count() as u8
    }

    /// Cards of one suit, highest first.
    pub fn holding(&self, suit: Suit) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = self
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks
    }
}

impl FromStr for Hand {
    type Err = HandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hand_parser::parse_dotted(s)
    }
}

/// Renders in the same dotted order `Hand::parse` reads.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suits: Vec<String> = Suit::ALL
            .iter()
            .map(|&s| self.holding(s).iter().map(|r| r.to_char()).collect())
            .collect();
        write!(f, "{}", suits.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_high_card_points() {
        let hand = Hand::parse("J.Q.K.A2");
        assert_eq!(hand.hcp(), 10);
        assert_eq!(hand.aces(), 1);
        assert_eq!(hand.kings(), 1);
    }

    #[test]
    fn shape_classification() {
        assert_eq!(Hand::parse("432.432.432.AKQJ").shape(), Shape::Balanced);
        assert_eq!(Hand::parse("32.432.AKQJ.AKQJ").shape(), Shape::Balanced);
        assert_eq!(Hand::parse("32.432.432.AKQJT").shape(), Shape::Balanced);
        assert_eq!(Hand::parse("32.32.AKQJ.AKQJT").shape(), Shape::SemiBalanced);
        assert_eq!(Hand::parse("2.432.AKQJ.AKQJT").shape(), Shape::SemiBalanced);
        assert_eq!(Hand::parse(".5432.AKQJ.AKQJT").shape(), Shape::Unbalanced);
        assert_eq!(Hand::parse("2.32.432.AKQJT98").shape(), Shape::Unbalanced);
    }

    #[test]
    fn longest_suit_prefers_higher_rank_on_ties() {
        let hand = Hand::parse("2.32.AKQJT.AKQJT");
        assert_eq!(hand.longest_suit(), Suit::Spades);
        let hand = Hand::parse("AKQJT.AKQJT.32.2");
        assert_eq!(hand.longest_suit(), Suit::Diamonds);
        assert_eq!(hand.longest_major(), Suit::Hearts);
    }

    #[test]
    fn quick_tricks_table() {
        // AK, AQ, A, KQ
        let hand = Hand::parse("KQ2.A32.AQ2.AK32");
        assert_eq!(hand.quick_tricks(), 5.5);
        // Kx counts half, bare K nothing
        let hand = Hand::parse("K.K2.5432.5432");
        assert_eq!(hand.quick_tricks(), 0.5);
    }

    #[test]
    fn stoppers_need_guards() {
        let hand = Hand::parse("A.K.Q2.J432");
        assert!(hand.has_stopper(Suit::Clubs));
        assert!(!hand.has_stopper(Suit::Diamonds));
        assert!(!hand.has_stopper(Suit::Hearts));
        assert!(hand.has_stopper(Suit::Spades));
        assert_eq!(Hand::parse("...AKQJ").stopper_count(Suit::Spades), 4);
    }

    #[test]
    fn points_with_length_and_shortness() {
        let hand = Hand::parse("2.432.AKQJ.AKQJT");
        assert_eq!(hand.hcp(), 20);
        assert_eq!(hand.total_points(), 21);
        assert_eq!(hand.support_points(Suit::Spades), 23);
    }

    #[test]
    fn top_honors_counts() {
        let hand = Hand::parse("..KJT42.");
        assert_eq!(hand.top_honors(Suit::Hearts, 3), 1);
        assert_eq!(hand.top_honors(Suit::Hearts, 5), 3);
        assert_eq!(hand.top_honors(Suit::Spades, 5), 0);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let hand = Hand::parse("T9.AKQ.J8765.432");
        assert_eq!(hand.to_string(), "T9.AKQ.J8765.432");
        assert!(hand.is_complete());
        assert!("AK.Q".parse::<Hand>().is_err());
    }
}
