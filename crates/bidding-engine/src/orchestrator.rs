//! One decision: conventions, then rule data, then a default Pass, with the
//! safety-net overlays applied to whichever call came out.

use crate::config::{EngineConfig, ExplanationLevel};
use crate::context::{infer, AuctionContext};
use crate::conventions::{registry, ConventionId, Proposal, Situation};
use crate::error::{EngineError, Result};
use crate::features::{extract, FeatureSnapshot};
use crate::forcing::{ForcingLevel, ForcingState};
use crate::policies::{self, Policy};
use crate::rules::{Category, RuleBook};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, error, warn};
use types::{Auction, Call, Hand, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Convention,
    Rule,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionMetadata {
    pub source: DecisionSource,
    pub convention: Option<ConventionId>,
    pub rule: Option<String>,
    /// Forcing tag of the call as made.
    pub forcing: ForcingLevel,
    /// The partnership's forcing level once the call is recorded.
    pub forcing_after: ForcingLevel,
    pub overridden_by: Option<Policy>,
    /// The call chosen before an overlay replaced it.
    pub original_call: Option<Call>,
    pub bypass_hcp: bool,
    pub bypass_suit_length: bool,
    pub combined_estimate: u8,
    /// History entries that could not be read and were taken as Pass.
    pub normalized_entries: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidDecision {
    pub call: Call,
    pub explanation: String,
    pub metadata: DecisionMetadata,
}

/// The first stage's answer before overlays.
struct Choice {
    call: Call,
    explanation: String,
    source: DecisionSource,
    convention: Option<ConventionId>,
    rule: Option<String>,
    forcing: ForcingLevel,
    bypass_hcp: bool,
    bypass_suit_length: bool,
}

impl Choice {
    fn from_proposal(id: ConventionId, proposal: Proposal) -> Self {
        Self {
            call: proposal.call,
            explanation: proposal.explanation,
            source: DecisionSource::Convention,
            convention: Some(id),
            rule: None,
            forcing: proposal.forcing,
            bypass_hcp: proposal.bypass_hcp,
            bypass_suit_length: proposal.bypass_suit_length,
        }
    }
}

/// Immutable decision engine. Share one across threads; keep per-deal state
/// in a [`DealSession`](crate::DealSession).
#[derive(Debug, Clone)]
pub struct BiddingEngine {
    config: EngineConfig,
    rules: Cow<'static, RuleBook>,
}

impl Default for BiddingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl BiddingEngine {
    /// Engine with the embedded SAYC rules.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rules: Cow::Borrowed(RuleBook::sayc()),
        }
    }

    /// Engine with replacement rule data.
    pub fn with_rules(config: EngineConfig, rules: RuleBook) -> Self {
        Self {
            config,
            rules: Cow::Owned(rules),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Decide the call for `seat`, reading forcing obligations from the
    /// auction itself.
    pub fn decide(&self, hand: &Hand, auction: &Auction, seat: Position) -> Result<BidDecision> {
        let forcing = ForcingState::replay(auction, seat.partnership());
        self.decide_with(hand, auction, seat, forcing, self.config.explanation_level)
    }

    /// Decide with an explicitly tracked forcing state and explanation level.
    pub fn decide_with(
        &self,
        hand: &Hand,
        auction: &Auction,
        seat: Position,
        forcing: ForcingState,
        level: ExplanationLevel,
    ) -> Result<BidDecision> {
        if auction.is_finished() {
            return Err(EngineError::AuctionComplete);
        }
        let expected = auction.current_player();
        if seat != expected {
            return Err(EngineError::OutOfTurn {
                expected,
                requested: seat,
            });
        }

        let features = extract(hand, auction, seat);
        let context = infer(auction, &features);
        let features = features.with_context(&context);
        let situation = Situation {
            hand,
            features: &features,
            context: &context,
            config: &self.config,
        };
        debug!(
            seat = %seat,
            role = ?features.role,
            hcp = features.hcp,
            history = %auction,
            "deciding"
        );

        let choice = self
            .from_conventions(&situation)
            .or_else(|| self.from_rules(&situation))
            .unwrap_or_else(|| {
                warn!(
                    seat = %seat,
                    role = ?features.role,
                    history = %auction,
                    "coverage gap: nothing matched, passing"
                );
                Choice {
                    call: Call::Pass,
                    explanation: "Indeterminate: no agreed meaning fits this hand, passing".to_string(),
                    source: DecisionSource::Default,
                    convention: None,
                    rule: None,
                    forcing: ForcingLevel::NonForcing,
                    bypass_hcp: false,
                    bypass_suit_length: false,
                }
            });

        let redirect = policies::apply(choice.call, &situation, &forcing);
        let (call, text, tag) = match &redirect {
            Some(r) => (r.call, r.explanation.clone(), r.forcing),
            None => (choice.call, choice.explanation.clone(), choice.forcing),
        };

        let mut after = forcing;
        after.record(seat, tag);

        // Markers describe the call actually made, so a redirect replaces them.
        let (convention, bypass_hcp, bypass_suit_length) = match &redirect {
            Some(r) => (r.convention, false, false),
            None => (choice.convention, choice.bypass_hcp, choice.bypass_suit_length),
        };
        let metadata = DecisionMetadata {
            source: choice.source,
            convention,
            rule: choice.rule.clone(),
            forcing: tag,
            forcing_after: after.level,
            overridden_by: redirect.as_ref().map(|r| r.policy),
            original_call: redirect.as_ref().map(|_| choice.call),
            bypass_hcp,
            bypass_suit_length,
            combined_estimate: context.combined_estimate,
            normalized_entries: Vec::new(),
        };
        let explanation = explain(level, &text, &metadata, &features, &context);
        debug!(call = %call, source = ?metadata.source, "decided");
        Ok(BidDecision {
            call,
            explanation,
            metadata,
        })
    }

    fn from_conventions(&self, s: &Situation) -> Option<Choice> {
        for convention in registry() {
            let id = convention.id();
            if !s.is_enabled(id) || !convention.is_applicable(s) {
                continue;
            }
            let proposal = convention.propose_bid(s);
            if s.is_legal(proposal.call) {
                debug!(convention = %id, call = %proposal.call, "convention applies");
                return Some(Choice::from_proposal(id, proposal));
            }
            error!(
                convention = %id,
                call = %proposal.call,
                history = %s.auction(),
                "convention proposed an illegal call"
            );
        }
        None
    }

    fn from_rules(&self, s: &Situation) -> Option<Choice> {
        let features = s.features;
        for &category in Category::for_role(features.role) {
            for rule in self.rules.candidates(category, features) {
                let Some(call) = rule.render_bid(features).filter(|c| s.is_legal(*c)) else {
                    debug!(rule = %rule.id, "rule matched but its bid is not available");
                    continue;
                };
                debug!(category = %category, rule = %rule.id, call = %call, "rule applies");
                return Some(Choice {
                    call,
                    explanation: rule.render_explanation(features),
                    source: DecisionSource::Rule,
                    convention: None,
                    rule: Some(rule.id.clone()),
                    forcing: rule.forcing,
                    bypass_hcp: false,
                    bypass_suit_length: false,
                });
            }
        }
        None
    }
}

/// Shape the explanation for the requested level. The call never depends
/// on this.
fn explain(
    level: ExplanationLevel,
    text: &str,
    metadata: &DecisionMetadata,
    features: &FeatureSnapshot,
    context: &AuctionContext,
) -> String {
    match level {
        ExplanationLevel::Simple => text.split(':').next().unwrap_or(text).trim().to_string(),
        ExplanationLevel::Detailed => text.to_string(),
        ExplanationLevel::Expert => {
            let mut out = format!(
                "{text} [{} HCP, {}, partner {}, combined {}, {}]",
                features.hcp,
                features.shape.name(),
                context.partner_range(),
                context.combined_estimate,
                metadata.forcing_after,
            );
            if let (Some(policy), Some(original)) = (metadata.overridden_by, metadata.original_call) {
                out.push_str(&format!(" ({policy} replaced {original})"));
            }
            out
        }
        ExplanationLevel::ConventionOnly => match metadata.convention {
            Some(id) => id.metadata().name.to_string(),
            None => "Natural bid".to_string(),
        },
    }
}
