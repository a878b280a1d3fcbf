use bidding_engine::BidDecision;
use rand::seq::SliceRandom;
use rand::Rng;
use types::{Card, Hand, ParseCallError, Position, Rank, Suit};

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
        .into_iter()
        .map(|suit| {
            let cards: String = hand.holding(suit).iter().map(|r| r.to_char()).collect();
            format!(
                "{}: {}",
                suit.to_char(),
                if cards.is_empty() { "-" } else { &cards }
            )
        })
        .collect()
}

/// Compass diagram of the four hands, North first.
pub fn format_hands_table(hands: &[Hand; 4]) -> String {
    let [n, e, s, w] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ]
    .map(|p| get_hand_suits(&hands[p.idx()]));
    let indent = "        ";

    let mut lines = vec![format!("{indent}North")];
    lines.extend(n.iter().map(|x| format!("{indent}{x}")));
    lines.push(String::new());
    lines.push(format!("{:<20} East", "West"));
    lines.extend(w.iter().zip(&e).map(|(w, e)| format!("{w:<20} {e}")));
    lines.push(String::new());
    lines.push(format!("{indent}South"));
    lines.extend(s.iter().map(|x| format!("{indent}{x}")));
    lines.push(String::new());
    lines.join("\n")
}

/// Calls separated by spaces or commas.
pub fn parse_calls(s: &str) -> Result<Vec<types::Call>, ParseCallError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Four random hands, North first.
pub fn random_deal(rng: &mut impl Rng) -> [Hand; 4] {
    let mut deck: Vec<Card> = Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::DESCENDING.into_iter().map(move |rank| Card::new(suit, rank)))
        .collect();
    deck.shuffle(rng);
    let mut hands = [(); 4].map(|_| Hand::default());
    for (i, chunk) in deck.chunks(13).enumerate() {
        hands[i] = Hand::new(chunk.to_vec());
    }
    hands
}

fn source_label(decision: &BidDecision) -> String {
    let meta = &decision.metadata;
    let mut label = match (&meta.convention, &meta.rule) {
        (Some(id), _) => id.to_string(),
        (None, Some(rule)) => rule.clone(),
        (None, None) => "default".to_string(),
    };
    if let Some(policy) = meta.overridden_by {
        label = format!("{label} > {policy}");
    }
    label
}

pub fn format_row(idx: usize, pos: Position, decision: &BidDecision) -> String {
    format!(
        "{:<3} | {:<3} | {:<5} | {:<32} | {}",
        idx,
        pos.to_char(),
        decision.call.render(),
        source_label(decision),
        decision.explanation
    )
}

pub fn format_table_header() -> String {
    format!(
        "{:<3} | {:<3} | {:<5} | {:<32} | Explanation\n{:-<3}-+-{:-<3}-+-{:-<5}-+-{:-<32}-+---------------------------\n",
        "Idx", "Pos", "Call", "Source", "", "", "", ""
    )
}

/// Everything the engine recorded about one decision.
pub fn format_detail(decision: &BidDecision) -> String {
    let meta = &decision.metadata;
    let mut lines = vec![
        format!("Call:        {}", decision.call.render()),
        format!("Explanation: {}", decision.explanation),
        format!("Source:      {}", source_label(decision)),
        format!("Forcing:     {} (partnership now {})", meta.forcing, meta.forcing_after),
        format!("Combined:    ~{} HCP", meta.combined_estimate),
    ];
    if let Some(original) = meta.original_call {
        lines.push(format!("Replaced:    {}", original.render()));
    }
    if meta.bypass_hcp || meta.bypass_suit_length {
        lines.push(format!(
            "Bypass:      hcp={} suit_length={}",
            meta.bypass_hcp, meta.bypass_suit_length
        ));
    }
    if !meta.normalized_entries.is_empty() {
        lines.push(format!("Unreadable history entries: {:?}", meta.normalized_entries));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn suits_print_spades_first() {
        let suits = get_hand_suits(&Hand::parse("AK2.Q32.KJ32."));
        assert_eq!(suits[0], "S: -");
        assert_eq!(suits[1], "H: KJ32");
        assert_eq!(suits[3], "C: AK2");
    }

    #[test]
    fn calls_accept_commas_and_spaces() {
        let calls = parse_calls("1N, P 2C").unwrap();
        assert_eq!(calls.len(), 3);
        assert!(parse_calls("1N 9Z").is_err());
        assert!(parse_calls("").unwrap().is_empty());
    }

    #[test]
    fn deals_are_complete() {
        let mut rng = StdRng::seed_from_u64(3);
        let hands = random_deal(&mut rng);
        assert!(hands.iter().all(Hand::is_complete));
        let table = format_hands_table(&hands);
        assert!(table.contains("North") && table.contains("South"));
    }
}
