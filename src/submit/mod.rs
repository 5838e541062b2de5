//! The submission boundary.
//!
//! When a chain is handed off for persistence or execution, each node is
//! flattened to its wire shape: editor-only fields (`id`, schemas, the
//! minimized flag) are stripped, positions become 1-based, and embedded
//! back-reference tokens are serialized verbatim.

use crate::chain::Chain;
use crate::error::SubmitError;
use serde::{Deserialize, Serialize};

/// One node flattened for the execution backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    /// 1-based position in chain order.
    pub position: usize,
}

/// Flattens a chain into its submission payload.
///
/// An empty node name is a field-level validation failure: names are the
/// reference targets of the executed workflow and are never auto-generated
/// at this boundary.
pub fn flatten(chain: &Chain) -> Result<Vec<SubmitNode>, SubmitError> {
    let mut payload = Vec::with_capacity(chain.len());
    for (index, node) in chain.nodes.iter().enumerate() {
        let position = index + 1;
        if node.name.is_empty() {
            return Err(SubmitError::EmptyName { position });
        }
        let parameters = node
            .parameters
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        payload.push(SubmitNode {
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            parameters,
            position,
        });
    }
    Ok(payload)
}

/// Restores chain order from a submission payload: the inverse of the
/// ordering `flatten` encodes into `position`.
pub fn chain_order(mut nodes: Vec<SubmitNode>) -> Vec<SubmitNode> {
    nodes.sort_by_key(|node| node.position);
    nodes
}
