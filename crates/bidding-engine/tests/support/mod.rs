#![allow(dead_code)]

use bidding_engine::{BidDecision, BiddingEngine, EngineConfig};
use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing_subscriber::EnvFilter;
use types::{Auction, Card, Hand, Position, Rank, Suit};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Route engine logs to the test writer. `TEST_LOG` overrides `RUST_LOG`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Decide for whoever acts after `calls`, North dealing.
pub fn decide_with(config: EngineConfig, hand: &str, calls: &str) -> BidDecision {
    init_logging();
    let auction = Auction::bidding(Position::North, calls);
    let seat = auction.current_player();
    BiddingEngine::new(config)
        .decide(&Hand::parse(hand), &auction, seat)
        .unwrap()
}

pub fn decide(hand: &str, calls: &str) -> BidDecision {
    decide_with(EngineConfig::default(), hand, calls)
}

/// Four random hands, North first.
pub fn deal(rng: &mut impl Rng) -> [Hand; 4] {
    let mut deck: Vec<Card> = Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::DESCENDING.into_iter().map(move |rank| Card::new(suit, rank)))
        .collect();
    deck.shuffle(rng);
    let mut chunks = deck.chunks(13).map(|c| Hand::new(c.to_vec()));
    [(); 4].map(|_| chunks.next().unwrap_or_else(|| Hand::new(Vec::new())))
}
