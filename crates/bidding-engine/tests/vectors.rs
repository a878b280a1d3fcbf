mod support;

use bidding_engine::BiddingEngine;
use std::collections::BTreeMap;
use std::fs;
use types::{Auction, Hand, Position};

type Suites = BTreeMap<String, Vec<Vec<String>>>;

#[test]
fn sayc_vectors() {
    support::init_logging();
    let content = fs::read_to_string("tests/vectors/sayc.yaml").expect("Failed to read test vectors");
    let suites: Suites = serde_yaml::from_str(&content).expect("Failed to parse YAML");
    let engine = BiddingEngine::default();

    let mut failures = Vec::new();
    let mut count = 0;
    for (suite, cases) in &suites {
        for case in cases {
            let [hand, expected, history] = case.as_slice() else {
                panic!("{suite}: malformed case {case:?}");
            };
            let auction = Auction::bidding(Position::North, history);
            let seat = auction.current_player();
            let decision = engine
                .decide(&Hand::parse(hand), &auction, seat)
                .unwrap_or_else(|e| panic!("{suite}: {hand} after '{history}': {e}"));
            count += 1;
            if decision.call.render() != *expected {
                failures.push(format!(
                    "{suite}: {hand} after '{history}': expected {expected}, got {} ({})",
                    decision.call, decision.explanation
                ));
            }
        }
    }
    assert!(count > 0);
    assert!(failures.is_empty(), "{} of {count} failed:\n{}", failures.len(), failures.join("\n"));
}
