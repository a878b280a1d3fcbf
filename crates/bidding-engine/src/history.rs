//! Turning loosely-typed auction history into calls.
//!
//! Entries are strings (`"1N"`) or objects with a `bid` field
//! (`{"bid": "1N", "explanation": "..."}`). Anything else becomes a Pass and
//! its index is reported back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use types::{Call, Position};

/// One call as shown to callers, in the shape `normalize` reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    pub bid: String,
    pub position: Position,
    #[serde(default)]
    pub explanation: String,
}

impl BidRecord {
    pub fn new(call: Call, position: Position, explanation: impl Into<String>) -> Self {
        Self {
            bid: call.render(),
            position,
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedHistory {
    pub calls: Vec<Call>,
    /// Indices of entries that were replaced by Pass.
    pub replaced: Vec<usize>,
}

fn parse_entry(entry: &Value) -> Option<Call> {
    let text = match entry {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("bid")?.as_str()?,
        _ => return None,
    };
    text.parse().ok()
}

pub fn normalize(entries: &[Value]) -> NormalizedHistory {
    let mut history = NormalizedHistory::default();
    for (index, entry) in entries.iter().enumerate() {
        let call = parse_entry(entry).unwrap_or_else(|| {
            warn!(index, %entry, "unreadable history entry, treating it as Pass");
            history.replaced.push(index);
            Call::Pass
        });
        history.calls.push(call);
    }
    history
}
