use crate::reference::ParamValue;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Stable, opaque node identity. Assigned once at creation and never
/// reused, so list diffing and drag correlation can track a node across
/// renames and reorders.
pub type NodeId = u64;

/// Declared shape of a template parameter, taken from the catalog schema.
///
/// Only `Array` participates in editor behavior: collection-shaped inputs
/// are seeded with a back-reference to the predecessor when a node is
/// inserted. The remaining kinds are carried for form rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Array,
    String,
    Number,
    Boolean,
    Object,
    Other,
}

impl ParamKind {
    /// Maps a catalog `type` string to a kind. Unknown strings map to
    /// `Other`, which is never auto-populated.
    pub fn from_declared(declared: &str) -> Self {
        match declared {
            "array" => ParamKind::Array,
            "string" => ParamKind::String,
            "number" | "integer" => ParamKind::Number,
            "boolean" => ParamKind::Boolean,
            "object" => ParamKind::Object,
            _ => ParamKind::Other,
        }
    }

    /// Whether a parameter of this kind receives a predecessor reference at
    /// insert time.
    pub fn is_collection(self) -> bool {
        matches!(self, ParamKind::Array)
    }
}

/// One pipeline step in the chain.
///
/// `id`, `node_type`, and `schema` are frozen at creation. `name` and
/// `parameters` are rewritten by the consistency pass; `previous_node` is a
/// cached derivation of chain order and is never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub node_type: String,
    pub parameters: AHashMap<String, ParamValue>,
    pub schema: AHashMap<String, ParamKind>,
    /// Name of the node immediately before this one, or empty for the head.
    pub previous_node: String,
    /// UI display flag, carried through every operation unchanged.
    pub minimized: bool,
}
