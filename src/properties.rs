//! Node and link types for an org-roam collection.
//!
//! A [RoamNode] is one atomic note known to the record source. It is uniquely keyed by its
//! org `:ID:`; titles are human-facing and may repeat across the collection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

/// The reference kind org-roam uses for links between nodes.
pub const ID_LINK_KIND: &str = "id";

/// A reference as delivered by the record source, before classification into backlinks and
/// miscellaneous links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RawLink {
    /// Declared reference kind (`id`, `file`, `https`, ...)
    pub kind: String,
    pub target: String,
}

impl RawLink {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> RawLink {
        RawLink {
            kind: kind.into(),
            target: target.into(),
        }
    }

    /// A node-to-node reference.
    pub fn id(target: impl Into<String>) -> RawLink {
        RawLink::new(ID_LINK_KIND, target)
    }

    pub fn is_id(&self) -> bool {
        self.kind == ID_LINK_KIND
    }
}

/// Bare strings are node references.
impl From<&str> for RawLink {
    fn from(target: &str) -> RawLink {
        RawLink::id(target)
    }
}

impl From<String> for RawLink {
    fn from(target: String) -> RawLink {
        RawLink::id(target)
    }
}

/// A reference to something that is not a node in the collection: a file, a URL, or an `id`
/// link whose target is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrgLink {
    pub kind: String,
    pub content: String,
    pub desc: Option<String>,
}

impl From<RawLink> for OrgLink {
    fn from(raw: RawLink) -> OrgLink {
        OrgLink {
            kind: raw.kind,
            content: raw.target,
            desc: None,
        }
    }
}

impl From<&OrgLink> for RawLink {
    fn from(link: &OrgLink) -> RawLink {
        RawLink::new(link.kind.clone(), link.content.clone())
    }
}

impl Display for OrgLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.desc {
            Some(desc) => write!(f, "[[{}:{}][{}]]", self.kind, self.content, desc),
            None => write!(f, "[[{}:{}]]", self.kind, self.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoamNode {
    pub id: String,
    pub title: String,
    /// Path of the document containing this node
    pub location: String,
    pub tags: BTreeSet<String>,
    /// IDs of nodes referenced in this node's body, in body order with repeats. Every entry
    /// is a node of the owning collection. May contain the node's own id.
    pub backlinks: Vec<String>,
    pub misc_links: Vec<OrgLink>,
}

impl RoamNode {
    /// True if any of the node's tags is in `tags`.
    pub fn has_tag<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter().any(|tag| self.tags.contains(tag))
    }

    /// True if any of the node's tags matches (from its start) any of `patterns`.
    pub fn has_regex_tag(&self, patterns: &[Regex]) -> bool {
        self.tags.iter().any(|tag| {
            patterns
                .iter()
                .any(|rx| rx.find(tag).is_some_and(|m| m.start() == 0))
        })
    }

    /// Whether this node references `other`. Undirected also accepts a reference from `other`
    /// back to this node.
    pub fn links_to(&self, other: &RoamNode, directed: bool) -> bool {
        let forward = self.backlinks.iter().any(|id| id == &other.id);
        if directed {
            forward
        } else {
            forward || other.backlinks.iter().any(|id| id == &self.id)
        }
    }

    /// Backlinks that point at a node other than this one.
    pub fn external_backlinks(&self) -> impl Iterator<Item = &String> {
        self.backlinks.iter().filter(move |id| *id != &self.id)
    }
}

impl Display for RoamNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.title, self.id)
    }
}
