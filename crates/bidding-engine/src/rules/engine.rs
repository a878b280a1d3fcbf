use super::schema::{Category, Condition, Rule, RuleFile, SCHEMA_VERSION};
use super::template;
use crate::error::SchemaError;
use crate::features::{FeatureSnapshot, FEATURE_NAMES};
use once_cell::sync::Lazy;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::trace;
use types::Call;

static SAYC: Lazy<RuleBook> = Lazy::new(|| {
    RuleBook::from_yaml_str(include_str!("sayc.yaml")).expect("embedded SAYC rules are valid")
});

/// Validated rules, grouped by category and sorted by descending priority.
/// Rules of equal priority keep their declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    categories: HashMap<Category, Vec<Rule>>,
}

impl RuleBook {
    /// The natural SAYC rules shipped with the crate.
    pub fn sayc() -> &'static RuleBook {
        &SAYC
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        let file: RuleFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    pub fn from_file(file: RuleFile) -> Result<Self, SchemaError> {
        if file.version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion {
                found: file.version,
                expected: SCHEMA_VERSION,
            });
        }

        let mut seen = HashSet::new();
        let mut categories = HashMap::new();
        for (name, mut rules) in file.categories {
            let category: Category = name.parse().map_err(SchemaError::UnknownCategory)?;
            for rule in &rules {
                if !seen.insert(rule.id.clone()) {
                    return Err(SchemaError::DuplicateRuleId(rule.id.clone()));
                }
                validate_rule(rule)?;
            }
            rules.sort_by_key(|r| Reverse(r.priority));
            categories.insert(category, rules);
        }
        Ok(Self { categories })
    }

    pub fn rules(&self, category: Category) -> &[Rule] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every rule in `category` whose condition holds, best first.
    pub fn candidates<'a>(
        &'a self,
        category: Category,
        features: &'a FeatureSnapshot,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules(category)
            .iter()
            .filter(move |rule| rule.matches(features))
    }

    /// Highest-priority rule in `category` whose condition holds.
    pub fn match_rule<'a>(
        &'a self,
        category: Category,
        features: &'a FeatureSnapshot,
    ) -> Option<&'a Rule> {
        let rule = self.candidates(category, features).next();
        trace!(%category, rule = rule.map(|r| r.id.as_str()), "rule lookup");
        rule
    }
}

impl Rule {
    pub fn matches(&self, features: &FeatureSnapshot) -> bool {
        self.when.as_ref().map_or(true, |c| c.eval(features))
    }

    /// The call this rule makes for `features`; `None` when a placeholder
    /// renders to something that is not a call (e.g. no partner suit yet).
    pub fn render_bid(&self, features: &FeatureSnapshot) -> Option<Call> {
        template::render(&self.bid, features).parse().ok()
    }

    pub fn render_explanation(&self, features: &FeatureSnapshot) -> String {
        template::render(&self.explanation, features)
    }
}

fn validate_rule(rule: &Rule) -> Result<(), SchemaError> {
    let known = |name: &str| FEATURE_NAMES.contains(&name);

    if let Some(condition) = &rule.when {
        validate_condition(rule, condition)?;
        if let Some(feature) = condition.features().into_iter().find(|f| !known(*f)) {
            return Err(SchemaError::UnknownFeature {
                rule: rule.id.clone(),
                feature: feature.to_string(),
            });
        }
    }

    for text in [&rule.bid, &rule.explanation] {
        if let Some(placeholder) = template::placeholders(text).into_iter().find(|p| !known(*p)) {
            return Err(SchemaError::UnknownPlaceholder {
                rule: rule.id.clone(),
                placeholder: placeholder.to_string(),
            });
        }
    }

    if !template::has_placeholders(&rule.bid) && rule.bid.parse::<Call>().is_err() {
        return Err(SchemaError::InvalidBid {
            rule: rule.id.clone(),
            bid: rule.bid.clone(),
        });
    }
    Ok(())
}

fn validate_condition(rule: &Rule, condition: &Condition) -> Result<(), SchemaError> {
    match condition {
        Condition::And { all } if all.is_empty() => Err(SchemaError::EmptyGroup {
            rule: rule.id.clone(),
            node: "And",
        }),
        Condition::Or { any } if any.is_empty() => Err(SchemaError::EmptyGroup {
            rule: rule.id.clone(),
            node: "Or",
        }),
        Condition::And { all: children } | Condition::Or { any: children } => children
            .iter()
            .try_for_each(|child| validate_condition(rule, child)),
        Condition::Not { condition } => validate_condition(rule, condition),
        Condition::Range {
            feature,
            min: None,
            max: None,
        } => Err(SchemaError::UnboundedRange {
            rule: rule.id.clone(),
            feature: feature.clone(),
        }),
        Condition::Range { .. } | Condition::Equals { .. } | Condition::SetMembership { .. } => {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use types::{Auction, Hand, Position};

    fn opening_features(hand: &str) -> FeatureSnapshot {
        extract(&Hand::parse(hand), &Auction::new(Position::North), Position::North)
    }

    fn book(rules: &str) -> Result<RuleBook, SchemaError> {
        RuleBook::from_yaml_str(&format!("version: 1\ncategories:\n  openings:\n{rules}"))
    }

    #[test]
    fn embedded_rules_load() {
        let book = RuleBook::sayc();
        for category in Category::ALL {
            assert!(!book.rules(category).is_empty(), "{category} has no rules");
        }
    }

    #[test]
    fn every_category_ends_in_a_catch_all() {
        // Doubles are always consulted ahead of another category.
        for category in Category::ALL.into_iter().filter(|&c| c != Category::Doubles) {
            let rules = RuleBook::sayc().rules(category);
            let last = rules.last().expect("category has rules");
            assert!(last.when.is_none(), "{category} ends with {}", last.id);
        }
    }

    #[test]
    fn priority_then_declaration_order() {
        let book = book(
            "
    - { id: low, bid: P, priority: 1 }
    - { id: first, bid: 1C, priority: 5 }
    - { id: second, bid: 1D, priority: 5 }
",
        )
        .unwrap();
        let ids: Vec<&str> = book
            .rules(Category::Openings)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["first", "second", "low"]);

        let f = opening_features("AK2.Q32.KJ32.Q32");
        assert_eq!(book.match_rule(Category::Openings, &f).unwrap().id, "first");
        assert_eq!(book.candidates(Category::Openings, &f).count(), 3);
        assert!(book.match_rule(Category::Responses, &f).is_none());
    }

    #[test]
    fn conditions_select_rules() {
        let book = book(
            "
    - id: strong
      bid: 2C
      priority: 10
      when: { type: Range, feature: hcp, min: 22 }
    - id: balanced
      bid: 1N
      priority: 5
      explanation: '{hcp} HCP'
      when:
        type: And
        all:
          - { type: Range, feature: hcp, min: 15, max: 17 }
          - { type: Equals, feature: is_balanced, value: true }
    - { id: pass, bid: P }
",
        )
        .unwrap();
        let f = opening_features("AK2.Q32.KJ32.K32");
        let rule = book.match_rule(Category::Openings, &f).unwrap();
        assert_eq!(rule.id, "balanced");
        assert_eq!(rule.render_bid(&f), Some(Call::bid(1, types::Strain::NoTrump)));
        assert_eq!(rule.render_explanation(&f), "16 HCP");

        let f = opening_features("32.432.5432.5432");
        assert_eq!(book.match_rule(Category::Openings, &f).unwrap().id, "pass");
    }

    #[test]
    fn placeholder_bids_render_from_features() {
        let book = book("    - { id: major, bid: '1{longest_major}' }\n").unwrap();
        let f = opening_features("2.32.AQ432.KJ432");
        let rule = book.match_rule(Category::Openings, &f).unwrap();
        assert_eq!(rule.render_bid(&f), Some(Call::suit_bid(1, types::Suit::Spades)));
    }

    #[test]
    fn absent_placeholder_value_is_not_a_call() {
        let book = book("    - { id: raise, bid: '{cheapest_level_partner_suit}{partner_suit}' }\n")
            .unwrap();
        let f = opening_features("2.32.AQ432.KJ432");
        assert_eq!(book.rules(Category::Openings)[0].render_bid(&f), None);
    }

    #[test]
    fn rejects_bad_data() {
        let wrong_version = RuleBook::from_yaml_str("version: 2\ncategories: {}");
        assert!(matches!(
            wrong_version,
            Err(SchemaError::UnsupportedVersion { found: 2, .. })
        ));
        let unknown_category = RuleBook::from_yaml_str("version: 1\ncategories:\n  slams: []");
        assert!(matches!(unknown_category, Err(SchemaError::UnknownCategory(c)) if c == "slams"));
        assert!(matches!(
            book("    - { id: a, bid: P }\n    - { id: a, bid: P }\n"),
            Err(SchemaError::DuplicateRuleId(_))
        ));
        assert!(matches!(
            book("    - { id: a, bid: P, when: { type: Equals, feature: vulnerability, value: none } }\n"),
            Err(SchemaError::UnknownFeature { .. })
        ));
        assert!(matches!(
            book("    - { id: a, bid: '1{favourite_suit}' }\n"),
            Err(SchemaError::UnknownPlaceholder { .. })
        ));
        assert!(matches!(
            book("    - { id: a, bid: 8C }\n"),
            Err(SchemaError::InvalidBid { .. })
        ));
        assert!(matches!(
            book("    - { id: a, bid: P, when: { type: Or, any: [] } }\n"),
            Err(SchemaError::EmptyGroup { node: "Or", .. })
        ));
        assert!(matches!(
            book("    - { id: a, bid: P, when: { type: Not, condition: { type: Range, feature: hcp } } }\n"),
            Err(SchemaError::UnboundedRange { .. })
        ));
    }
}
