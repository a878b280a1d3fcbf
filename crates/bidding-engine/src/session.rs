//! Per-deal state: the auction so far and each partnership's forcing state.

use crate::context::classify_call;
use crate::error::Result;
use crate::forcing::{ForcingLevel, ForcingState};
use crate::history::BidRecord;
use crate::orchestrator::{BidDecision, BiddingEngine};
use tracing::debug;
use types::{Auction, Call, Hand, Partnership, Position};

/// One deal's auction driven through a shared [`BiddingEngine`].
///
/// The engine itself never changes; everything that evolves while the deal
/// is bid lives here, so sessions for different deals never interfere.
#[derive(Debug, Clone)]
pub struct DealSession<'e> {
    engine: &'e BiddingEngine,
    auction: Auction,
    forcing: [ForcingState; 2],
    records: Vec<BidRecord>,
}

impl<'e> DealSession<'e> {
    pub fn new(engine: &'e BiddingEngine, dealer: Position) -> Self {
        Self {
            engine,
            auction: Auction::new(dealer),
            forcing: [ForcingState::default(); 2],
            records: Vec::new(),
        }
    }

    /// Start over with a fresh auction.
    pub fn new_deal(&mut self, dealer: Position) {
        debug!(dealer = %dealer, "new deal");
        self.auction = Auction::new(dealer);
        self.forcing = [ForcingState::default(); 2];
        self.records.clear();
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn forcing(&self, partnership: Partnership) -> ForcingState {
        self.forcing[partnership.idx()]
    }

    /// Calls so far with their explanations.
    pub fn records(&self) -> &[BidRecord] {
        &self.records
    }

    pub fn current_player(&self) -> Position {
        self.auction.current_player()
    }

    pub fn is_finished(&self) -> bool {
        self.auction.is_finished()
    }

    /// The engine's call for whoever is to act, without committing it.
    pub fn suggest(&self, hand: &Hand) -> Result<BidDecision> {
        let seat = self.auction.current_player();
        let forcing = self.forcing(seat.partnership());
        let level = self.engine.config().explanation_level;
        self.engine.decide_with(hand, &self.auction, seat, forcing, level)
    }

    /// Decide for whoever is to act and commit the call.
    pub fn bid(&mut self, hand: &Hand) -> Result<BidDecision> {
        let decision = self.suggest(hand)?;
        self.commit(decision.call, decision.metadata.forcing, &decision.explanation)?;
        Ok(decision)
    }

    /// Commit a call chosen elsewhere, tagging it with its usual forcing
    /// meaning.
    pub fn record(&mut self, call: Call) -> Result<()> {
        let mut next = self.auction.clone();
        next.try_add(call)?;
        let tag = classify_call(&next, next.len() - 1)
            .map(|kind| kind.forcing())
            .unwrap_or_default();
        self.commit(call, tag, "")
    }

    fn commit(&mut self, call: Call, tag: ForcingLevel, explanation: &str) -> Result<()> {
        let seat = self.auction.current_player();
        self.auction.try_add(call)?;
        self.records.push(BidRecord::new(call, seat, explanation));
        let state = &mut self.forcing[seat.partnership().idx()];
        state.record(seat, tag);
        debug!(seat = %seat, call = %call, forcing = %state.level, "call committed");
        Ok(())
    }
}
