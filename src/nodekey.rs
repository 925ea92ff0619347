//! Classifies the user-facing identifiers accepted by lookups. A node is uniquely keyed by its
//! ID, and non-uniquely by its title.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{codec::GraphDiagnostic, properties::RoamNode};

/// What a lookup string refers to in a given collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// A key of the node index
    Id,
    /// The title of at least one node
    Title,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: IdentifierKind,
    /// Set when the identifier is a title shared by several nodes.
    pub diagnostic: Option<GraphDiagnostic>,
}

/// Classify `identifier` against `nodes`. IDs win over titles, so a title that happens to equal
/// some node's ID never resolves as an ambiguous title.
pub fn resolve(
    identifier: &str,
    nodes: &BTreeMap<String, RoamNode>,
    duplicate_titles: &[String],
) -> Resolution {
    if nodes.contains_key(identifier) {
        return Resolution {
            kind: IdentifierKind::Id,
            diagnostic: None,
        };
    }
    if nodes.values().any(|node| node.title == identifier) {
        let diagnostic = duplicate_titles
            .iter()
            .any(|title| title == identifier)
            .then(|| GraphDiagnostic::AmbiguousTitle(identifier.to_string()));
        if let Some(diag) = &diagnostic {
            diag.emit();
        }
        return Resolution {
            kind: IdentifierKind::Title,
            diagnostic,
        };
    }
    Resolution {
        kind: IdentifierKind::Unresolved,
        diagnostic: None,
    }
}
