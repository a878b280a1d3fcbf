use crate::card::Card;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandParseError {
    #[error("expected 4 dot-separated suits, found {0}")]
    SuitCount(usize),
    #[error("unknown card '{ch}' in {suit}")]
    UnknownRank { suit: Suit, ch: char },
    #[error("duplicate card {0}")]
    Duplicate(Card),
}

/// Parses the dotted form "Clubs.Diamonds.Hearts.Spades", lowest suit first.
///
/// An empty segment is a void. No card count check is made here; callers that
/// need a full deal check `Hand::is_complete`.
pub fn parse_dotted(s: &str) -> Result<Hand, HandParseError> {
    let segments: Vec<&str> = s.trim().split('.').collect();
    if segments.len() != 4 {
        return Err(HandParseError::SuitCount(segments.len()));
    }
    let mut cards = Vec::with_capacity(13);
    for (suit, segment) in Suit::ALL.into_iter().zip(segments) {
        for ch in segment.chars().filter(|c| !c.is_whitespace()) {
            let rank = Rank::from_char(ch).ok_or(HandParseError::UnknownRank { suit, ch })?;
            let card = Card::new(suit, rank);
            if cards.contains(&card) {
                return Err(HandParseError::Duplicate(card));
            }
            cards.push(card);
        }
    }
    Ok(Hand::new(cards))
}
