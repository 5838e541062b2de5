//! The consistency pass run after every structural edit.
//!
//! Structural operations only keep names unique; everything else derived
//! from chain order is restored here. The pass is deterministic and
//! idempotent: normalizing an already-normalized chain changes nothing.

use crate::naming::name_root;
use crate::reference::rewrite_references;
use ahash::AHashMap;
use itertools::Itertools;

use super::model::Chain;

/// Restores the chain invariants: linkage, predecessor references, and
/// canonical numbering.
///
/// Passes run in order: linkage before references (the rewrite targets the
/// freshly derived predecessor), numbering last (it needs the pre-canonical
/// names only for grouping). Numbering can rename predecessors, so linkage
/// and references are derived once more afterwards; no wider propagation of
/// renames into reference tokens takes place.
pub fn normalize(chain: &mut Chain) {
    relink(chain);
    rewrite_backrefs(chain);
    renumber(chain);
    relink(chain);
    rewrite_backrefs(chain);
}

/// Points every node's `previous_node` at the name of the node before it.
fn relink(chain: &mut Chain) {
    for index in 0..chain.nodes.len() {
        chain.nodes[index].previous_node = if index == 0 {
            String::new()
        } else {
            chain.nodes[index - 1].name.clone()
        };
    }
}

/// Repoints every back-reference at the holder's current predecessor.
/// The head node is skipped: it has no predecessor to rewrite against.
fn rewrite_backrefs(chain: &mut Chain) {
    for index in 1..chain.nodes.len() {
        let previous = chain.nodes[index].previous_node.clone();
        rewrite_references(&mut chain.nodes[index].parameters, &previous);
    }
}

/// Reassigns disambiguating numeric suffixes per name root.
///
/// A root held by exactly one node collapses to the bare root; a root held
/// by N nodes gets suffixes `1..=N` in chain order. Names already carrying
/// their expected suffix are left untouched to minimize churn.
fn renumber(chain: &mut Chain) {
    let counts = chain
        .nodes
        .iter()
        .map(|n| name_root(&n.name).0.to_string())
        .counts();

    let mut assigned: AHashMap<String, usize> = AHashMap::new();
    for node in &mut chain.nodes {
        let root = name_root(&node.name).0.to_string();
        if counts[&root] == 1 {
            if node.name != root {
                node.name = root;
            }
        } else {
            let position = assigned.entry(root.clone()).or_insert(0);
            *position += 1;
            let expected = format!("{}{}", root, position);
            if node.name != expected {
                node.name = expected;
            }
        }
    }
}
