use crate::board::{Partnership, Position};
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("the auction is already over")]
    Finished,
    #[error("{call} is not legal after {history}")]
    Illegal { call: Call, history: String },
}

/// Calls in the order made, starting with the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Position,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    pub fn from_calls(dealer: Position, calls: Vec<Call>) -> Self {
        Self { dealer, calls }
    }

    /// Every call with the seat that made it.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Position, Call)> + '_ {
        let dealer = self.dealer;
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (dealer.advance(i), *call))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Seat that made the call at `index`.
    pub fn position_at(&self, index: usize) -> Position {
        self.dealer.advance(index)
    }

    /// Append without a legality check. Use for histories that are already
    /// known to be well formed.
    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    /// Append a call, rejecting it if the rules of bidding forbid it.
    pub fn try_add(&mut self, call: Call) -> Result<(), AuctionError> {
        if self.is_finished() {
            return Err(AuctionError::Finished);
        }
        if !self.is_legal(call) {
            return Err(AuctionError::Illegal {
                call,
                history: self.to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }

    /// Parse and add a single call like "1C", "P" or "X".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bid(&mut self, s: &str) {
        self.add_call(s.parse().expect("invalid call"));
    }

    /// Parse and add space-separated calls like "P 1C P".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bids(&mut self, s: &str) {
        for token in s.split_whitespace() {
            self.bid(token);
        }
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bidding(dealer: Position, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        auction.bids(calls);
        auction
    }

    /// The first `len` calls.
    pub fn prefix(&self, len: usize) -> Auction {
        Auction {
            dealer: self.dealer,
            calls: self.calls[..len.min(self.calls.len())].to_vec(),
        }
    }

    pub fn current_player(&self) -> Position {
        self.dealer.advance(self.calls.len())
    }

    /// Three passes after a bid, or four passes from the start.
    pub fn is_finished(&self) -> bool {
        let n = self.calls.len();
        if n < 4 {
            return false;
        }
        if !self.calls.iter().any(Call::is_bid) {
            return true;
        }
        self.calls[n - 3..].iter().all(Call::is_pass)
    }

    pub fn opener(&self) -> Option<Position> {
        self.iter().find(|(_, call)| call.is_bid()).map(|(p, _)| p)
    }

    pub fn opening_bid(&self) -> Option<(Position, Call)> {
        self.iter().find(|(_, call)| call.is_bid())
    }

    /// The last contract bid and who made it.
    pub fn last_bid(&self) -> Option<(Position, Call)> {
        self.iter().rev().find(|(_, call)| call.is_bid())
    }

    /// The last call that was not a pass.
    pub fn last_action(&self) -> Option<(Position, Call)> {
        self.iter().rev().find(|(_, call)| !call.is_pass())
    }

    pub fn calls_by(&self, position: Position) -> impl Iterator<Item = Call> + '_ {
        self.iter()
            .filter(move |(p, _)| *p == position)
            .map(|(_, call)| call)
    }

    pub fn bids_by(&self, position: Position) -> Vec<Call> {
        self.calls_by(position).filter(Call::is_bid).collect()
    }

    pub fn last_call_by(&self, position: Position) -> Option<Call> {
        self.calls_by(position).last()
    }

    /// Index of the last call made by `position`.
    pub fn last_call_index_for_position(&self, position: Position) -> Option<usize> {
        let first = self.dealer.distance_to(position);
        if self.calls.len() <= first {
            return None;
        }
        Some(first + 4 * ((self.calls.len() - first - 1) / 4))
    }

    /// True if the player has made any non-pass call.
    pub fn player_has_acted(&self, player: Position) -> bool {
        self.calls_by(player).any(|c| !c.is_pass())
    }

    pub fn partnership_has_bid(&self, partnership: Partnership) -> bool {
        self.iter()
            .any(|(p, call)| p.partnership() == partnership && call.is_bid())
    }

    /// Whether the partnership has bid a game (or more) at any point.
    pub fn game_reached_by(&self, partnership: Partnership) -> bool {
        self.iter().any(|(p, call)| {
            p.partnership() == partnership
                && matches!(call, Call::Bid { level, strain } if level >= strain.game_level())
        })
    }

    /// Passes at the end of the auction.
    pub fn trailing_passes(&self) -> usize {
        self.calls.iter().rev().take_while(|c| c.is_pass()).count()
    }

    pub fn is_legal(&self, call: Call) -> bool {
        if self.is_finished() {
            return false;
        }
        let me = self.current_player();
        match call {
            Call::Pass => true,
            Call::Bid { level, .. } => {
                (1..=7).contains(&level)
                    && self
                        .last_bid()
                        .map_or(true, |(_, last)| call.outranks(&last))
            }
            Call::Double => matches!(
                self.last_action(),
                Some((p, Call::Bid { .. })) if p.is_opponent_of(me)
            ),
            Call::Redouble => matches!(
                self.last_action(),
                Some((p, Call::Double)) if p.is_opponent_of(me)
            ),
        }
    }

    /// Every call that may legally be made next, Pass first, then bids
    /// up the ladder, then Double and Redouble.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut calls = vec![Call::Pass];
        for level in 1..=7u8 {
            for strain in Strain::ALL {
                let bid = Call::Bid { level, strain };
                if self.is_legal(bid) {
                    calls.push(bid);
                }
            }
        }
        calls.extend(
            [Call::Double, Call::Redouble]
                .into_iter()
                .filter(|c| self.is_legal(*c)),
        );
        calls
    }

    /// Cheapest legal bid in `strain`, if any.
    pub fn minimum_bid_in(&self, strain: Strain) -> Option<Call> {
        if self.is_finished() {
            return None;
        }
        let level = match self.last_bid().and_then(|(_, c)| c.strain().zip(c.level())) {
            None => 1,
            Some((last_strain, last_level)) if strain > last_strain => last_level,
            Some((_, last_level)) => last_level + 1,
        };
        (level <= 7).then_some(Call::Bid { level, strain })
    }

    /// Whether `call` is a bid one level higher than necessary.
    pub fn is_jump(&self, call: Call) -> bool {
        match (call.strain(), call.level()) {
            (Some(strain), Some(level)) => self
                .minimum_bid_in(strain)
                .and_then(|c| c.level())
                .is_some_and(|min| level > min),
            _ => false,
        }
    }

    pub fn current_contract(&self) -> Option<Contract> {
        let mut first_in_strain: [[Option<Position>; 5]; 2] = [[None; 5]; 2];
        let mut contract: Option<Contract> = None;
        for (position, call) in self.iter() {
            match call {
                Call::Bid { level, strain } => {
                    let slot = &mut first_in_strain[position.partnership().idx()][strain.idx()];
                    let declarer = *slot.get_or_insert(position);
                    contract = Some(Contract {
                        level,
                        strain,
                        double_status: DoubleStatus::Undoubled,
                        declarer,
                    });
                }
                Call::Double => {
                    if let Some(c) = contract.as_mut() {
                        c.double_status = DoubleStatus::Doubled;
                    }
                }
                Call::Redouble => {
                    if let Some(c) = contract.as_mut() {
                        c.double_status = DoubleStatus::Redoubled;
                    }
                }
                Call::Pass => {}
            }
        }
        contract
    }

    pub fn final_contract(&self) -> Option<Contract> {
        if self.is_finished() {
            self.current_contract()
        } else {
            None
        }
    }

    /// Checks every call against the calls before it.
    pub fn is_valid(&self) -> bool {
        let mut replay = Auction::new(self.dealer);
        self.calls.iter().all(|call| replay.try_add(*call).is_ok())
    }
}

impl std::fmt::Display for Auction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.calls.is_empty() {
            return write!(f, "-");
        }
        let rendered: Vec<String> = self.calls.iter().map(|c| c.render()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}
