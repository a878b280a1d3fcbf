//! `{feature}` placeholders in bids and explanations.

use crate::features::FeatureSnapshot;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn has_placeholders(template: &str) -> bool {
    PLACEHOLDER.is_match(template)
}

/// Substitute feature values. Unknown names render as nothing.
pub fn render(template: &str, features: &FeatureSnapshot) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            features
                .get(&caps[1])
                .map(|value| value.to_string())
                .unwrap_or_default()
        })
        .into_owned()
}
