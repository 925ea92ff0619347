//! Orphan detection.
//!
//! An orphan has no backlink to another node and no other node links to it. Direction does not
//! matter, and a node's reference to itself does not count. `is_connected` only means "no
//! orphans": two disjoint clusters that are each internally linked still report connected.

use std::collections::{BTreeMap, BTreeSet};

use crate::properties::RoamNode;

pub fn compute_orphans(nodes: &BTreeMap<String, RoamNode>) -> BTreeSet<String> {
    let referenced: BTreeSet<&str> = nodes
        .values()
        .flat_map(|node| node.external_backlinks())
        .map(String::as_str)
        .collect();

    nodes
        .values()
        .filter(|node| {
            node.external_backlinks().next().is_none() && !referenced.contains(node.id.as_str())
        })
        .map(|node| node.id.clone())
        .collect()
}

/// Single-node form of [compute_orphans].
pub fn is_orphan(node: &RoamNode, nodes: &BTreeMap<String, RoamNode>) -> bool {
    node.external_backlinks().next().is_none()
        && !nodes
            .values()
            .filter(|other| other.id != node.id)
            .any(|other| other.backlinks.contains(&node.id))
}
