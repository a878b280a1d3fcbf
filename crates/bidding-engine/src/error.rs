use std::path::PathBuf;
use thiserror::Error;
use types::{AuctionError, Position};

/// Problems with the embedded or user-supplied rule data, found at load time.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("rule data version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("rule id '{0}' is used more than once")]
    DuplicateRuleId(String),
    #[error("rule '{rule}' refers to unknown feature '{feature}'")]
    UnknownFeature { rule: String, feature: String },
    #[error("rule '{rule}' uses unknown placeholder '{{{placeholder}}}'")]
    UnknownPlaceholder { rule: String, placeholder: String },
    #[error("rule '{rule}' has bid '{bid}' that is not a call")]
    InvalidBid { rule: String, bid: String },
    #[error("rule '{rule}' has an empty {node} node")]
    EmptyGroup { rule: String, node: &'static str },
    #[error("rule '{rule}' has a range on '{feature}' with no bounds")]
    UnboundedRange { rule: String, feature: String },
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the auction is already complete")]
    AuctionComplete,
    #[error("it is {expected}'s turn, not {requested}'s")]
    OutOfTurn {
        expected: Position,
        requested: Position,
    },
    #[error(transparent)]
    Auction(#[from] AuctionError),
    #[error("invalid rule data: {0}")]
    Schema(#[from] SchemaError),
    #[error("invalid configuration: {message}")]
    Config { message: String },
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
