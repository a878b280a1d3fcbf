//! Declarative natural-bidding rules: schema, loader and matcher.

mod engine;
pub mod schema;
pub mod template;

pub use engine::RuleBook;
pub use schema::{Category, Condition, ConditionValue, Rule, RuleFile, SCHEMA_VERSION};
