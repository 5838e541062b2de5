use crate::catalog::NodeTemplate;
use crate::error::EditError;
use crate::naming::generate_unique_name;
use crate::reference::{DEFAULT_OUTPUT_PATH, ParamValue};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::{Node, NodeId};

/// The ordered sequence of nodes making up one pipeline draft.
///
/// The chain carries its own id counter so identities survive snapshots and
/// are never reused. Structural operations keep name uniqueness at all
/// times; linkage and back-reference consistency are restored by
/// [`normalize`](super::normalize::normalize) after every edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub nodes: Vec<Node>,
    next_id: NodeId,
}

/// A back-reference whose target name no longer exists in the chain.
///
/// Removal does not cascade into referrers, so a reference can outlive its
/// target. These are surfaced as warnings, never rewritten automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub position: usize,
    pub parameter: String,
    pub target: String,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// The set of names currently in use.
    pub fn names(&self) -> AHashSet<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// Inserts a node built from `template` at `at` (append when `None`).
    ///
    /// The node's name is made unique against the current chain, template
    /// defaults are cloned in, and every collection-shaped parameter is
    /// seeded with a reference to the node before the insertion point, when
    /// one exists. Returns the new node's id.
    pub fn insert(
        &mut self,
        template: &NodeTemplate,
        at: Option<usize>,
    ) -> Result<NodeId, EditError> {
        let index = at.unwrap_or(self.nodes.len());
        if index > self.nodes.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            });
        }

        let name = generate_unique_name(&template.name, &self.names());
        let predecessor = index
            .checked_sub(1)
            .map(|i| self.nodes[i].name.clone())
            .unwrap_or_default();

        let mut parameters = template.defaults.clone();
        if !predecessor.is_empty() {
            for (key, kind) in &template.schema {
                if kind.is_collection() {
                    parameters.insert(
                        key.clone(),
                        ParamValue::reference(&predecessor, DEFAULT_OUTPUT_PATH),
                    );
                }
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            index,
            Node {
                id,
                name,
                node_type: template.node_type.clone(),
                parameters,
                schema: template.schema.clone(),
                previous_node: predecessor,
                minimized: false,
            },
        );
        Ok(id)
    }

    /// Removes and returns the node at `index`.
    ///
    /// References held by other nodes against the removed name are left in
    /// place; see [`Chain::dangling_references`].
    pub fn remove(&mut self, index: usize) -> Result<Node, EditError> {
        if index >= self.nodes.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            });
        }
        Ok(self.nodes.remove(index))
    }

    /// Splices the node at `from` out and reinserts it at `to`, preserving
    /// every field. Linkage and references are left to the next settle.
    pub fn move_node(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return Err(EditError::InvalidMove {
                from,
                to,
                len: self.nodes.len(),
            });
        }
        let node = self.nodes.remove(from);
        self.nodes.insert(to, node);
        Ok(())
    }

    /// Renames the node at `index` to `new_name`, silently resolving a
    /// collision with another node's name by counting up. Renaming a node
    /// to its own current name is a no-op. Returns the name actually
    /// assigned.
    ///
    /// An empty `new_name` is accepted here and only rejected at
    /// submission time.
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<&str, EditError> {
        if index >= self.nodes.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            });
        }

        let mut taken = self.names();
        taken.remove(&self.nodes[index].name);
        self.nodes[index].name = generate_unique_name(new_name, &taken);
        Ok(&self.nodes[index].name)
    }

    /// Finds references whose target name no longer exists in the chain.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let names = self.names();
        let mut dangling = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            for (key, value) in &node.parameters {
                if let ParamValue::Reference { node: target, .. } = value {
                    if !names.contains(target) {
                        dangling.push(DanglingReference {
                            position: index + 1,
                            parameter: key.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }
        dangling
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.previous_node.is_empty() {
                writeln!(f, "{}. {} ({})", index + 1, node.name, node.node_type)?;
            } else {
                writeln!(
                    f,
                    "{}. {} ({}) <- {}",
                    index + 1,
                    node.name,
                    node.node_type,
                    node.previous_node
                )?;
            }
        }
        Ok(())
    }
}
