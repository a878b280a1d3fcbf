use crate::features::{FeatureSnapshot, FeatureValue, Role};
use crate::forcing::ForcingLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

/// Rule file as written on disk.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleFile {
    pub version: u32,
    pub categories: BTreeMap<String, Vec<Rule>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    /// Call to make, possibly with `{feature}` placeholders, e.g. `"1{longest_major}"`.
    pub bid: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub forcing: ForcingLevel,
    #[serde(default)]
    pub explanation: String,
    /// No condition means the rule always applies.
    #[serde(default)]
    pub when: Option<Condition>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Condition {
    Equals {
        feature: String,
        value: ConditionValue,
    },
    /// Inclusive on both ends; a missing bound is open.
    Range {
        feature: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    SetMembership {
        feature: String,
        values: Vec<ConditionValue>,
    },
    And {
        all: Vec<Condition>,
    },
    Or {
        any: Vec<Condition>,
    },
    Not {
        condition: Box<Condition>,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConditionValue {
    fn matches(&self, actual: &FeatureValue) -> bool {
        match (self, actual) {
            (ConditionValue::Bool(a), FeatureValue::Bool(b)) => a == b,
            (ConditionValue::Text(a), FeatureValue::Text(b)) => a == b,
            (ConditionValue::Int(a), _) => actual.as_f64() == Some(*a as f64),
            (ConditionValue::Float(a), _) => actual.as_f64() == Some(*a),
            _ => false,
        }
    }
}

impl Condition {
    /// Evaluate against a snapshot. Unknown features never match.
    pub fn eval(&self, features: &FeatureSnapshot) -> bool {
        match self {
            Condition::Equals { feature, value } => features
                .get(feature)
                .is_some_and(|actual| value.matches(&actual)),
            Condition::Range { feature, min, max } => features
                .get(feature)
                .and_then(|actual| actual.as_f64())
                .is_some_and(|v| min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)),
            Condition::SetMembership { feature, values } => features
                .get(feature)
                .is_some_and(|actual| values.iter().any(|v| v.matches(&actual))),
            Condition::And { all } => all.iter().all(|c| c.eval(features)),
            Condition::Or { any } => any.iter().any(|c| c.eval(features)),
            Condition::Not { condition } => !condition.eval(features),
        }
    }

    /// Every feature name the tree refers to.
    pub fn features(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_features(&mut names);
        names
    }

    fn collect_features<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Condition::Equals { feature, .. }
            | Condition::Range { feature, .. }
            | Condition::SetMembership { feature, .. } => names.push(feature.as_str()),
            Condition::And { all: children } | Condition::Or { any: children } => {
                for child in children {
                    child.collect_features(names);
                }
            }
            Condition::Not { condition } => condition.collect_features(names),
        }
    }
}

/// Rule groups, one per kind of turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Openings,
    Responses,
    Rebids,
    Overcalls,
    Advances,
    Doubles,
    ResponderRebids,
    Balancing,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Openings,
        Category::Responses,
        Category::Rebids,
        Category::Overcalls,
        Category::Advances,
        Category::Doubles,
        Category::ResponderRebids,
        Category::Balancing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Openings => "openings",
            Category::Responses => "responses",
            Category::Rebids => "rebids",
            Category::Overcalls => "overcalls",
            Category::Advances => "advances",
            Category::Doubles => "doubles",
            Category::ResponderRebids => "responder_rebids",
            Category::Balancing => "balancing",
        }
    }

    /// Categories to consult, in order, for a bidder in `role`.
    pub fn for_role(role: Role) -> &'static [Category] {
        match role {
            Role::Opening => &[Category::Openings],
            Role::Response => &[Category::Responses],
            Role::OpenerRebid => &[Category::Rebids],
            Role::ResponderRebid => &[Category::ResponderRebids],
            Role::Overcall => &[Category::Doubles, Category::Overcalls],
            Role::Balancing => &[Category::Doubles, Category::Balancing],
            Role::Advance | Role::OvercallerRebid => &[Category::Advances],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_nested_condition() {
        let yaml = "
type: And
all:
  - { type: Range, feature: hcp, min: 15, max: 17 }
  - type: Not
    condition: { type: Equals, feature: has_5_card_major, value: true }
  - { type: SetMembership, feature: longest_suit, values: [H, S] }
";
        let c: Condition = serde_yaml::from_str(yaml).expect("Failed to parse");
        let Condition::And { all } = &c else {
            panic!("Wrong variant");
        };
        assert_eq!(all.len(), 3);
        assert_eq!(
            all[0],
            Condition::Range {
                feature: "hcp".into(),
                min: Some(15.0),
                max: Some(17.0)
            }
        );
        assert_eq!(c.features(), vec!["hcp", "has_5_card_major", "longest_suit"]);
    }

    #[test]
    fn deserialize_rule_with_defaults() {
        let yaml = "
id: pass
bid: P
";
        let r: Rule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(r.priority, 0);
        assert_eq!(r.forcing, ForcingLevel::NonForcing);
        assert!(r.when.is_none());
    }

    #[test]
    fn untagged_values_keep_their_type() {
        let values: Vec<ConditionValue> = serde_yaml::from_str("[true, 4, 1.5, S]").unwrap();
        assert_eq!(
            values,
            vec![
                ConditionValue::Bool(true),
                ConditionValue::Int(4),
                ConditionValue::Float(1.5),
                ConditionValue::Text("S".into()),
            ]
        );
    }

    #[test]
    fn numeric_values_compare_across_int_and_float() {
        assert!(ConditionValue::Int(2).matches(&FeatureValue::Float(2.0)));
        assert!(ConditionValue::Float(4.0).matches(&FeatureValue::Int(4)));
        assert!(!ConditionValue::Text("4".into()).matches(&FeatureValue::Int(4)));
        assert!(!ConditionValue::Bool(true).matches(&FeatureValue::Int(1)));
    }

    #[test]
    fn category_routing() {
        assert_eq!(
            Category::for_role(Role::Overcall),
            &[Category::Doubles, Category::Overcalls]
        );
        assert_eq!("responder_rebids".parse(), Ok(Category::ResponderRebids));
        assert!("openers".parse::<Category>().is_err());
    }
}
