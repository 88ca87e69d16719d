//! Action traces as reported by a node for an executed transaction

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::models::transaction::PermissionLevel;

/// Action carried by a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceAction {
    pub account: String,
    pub name: String,
    #[serde(default)]
    pub authorization: Vec<PermissionLevel>,
    /// Payload as the node rendered it: an object when the node decoded it,
    /// otherwise a hex string
    #[serde(default)]
    pub data: Value,
    /// Payload hex, when the node includes it
    #[serde(default)]
    pub hex_data: Option<String>,
}

/// Execution trace of one action and the inline actions it triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTrace {
    #[serde(default)]
    pub action_ordinal: Option<u32>,
    #[serde(default)]
    pub receipt: Option<Value>,
    pub act: TraceAction,
    #[serde(default)]
    pub inline_traces: Vec<ActionTrace>,
}

/// Flatten traces into execution order: each trace precedes the inline
/// traces it spawned (pre-order).
pub fn flatten_traces(traces: &[ActionTrace]) -> Vec<&ActionTrace> {
    fn visit<'a>(trace: &'a ActionTrace, out: &mut Vec<&'a ActionTrace>) {
        out.push(trace);
        for inline in &trace.inline_traces {
            visit(inline, out);
        }
    }

    let mut out = Vec::new();
    for trace in traces {
        visit(trace, &mut out);
    }
    out
}
