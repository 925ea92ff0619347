//! Splits a node's raw reference list into backlinks and miscellaneous links.

use std::collections::BTreeSet;

use crate::properties::{OrgLink, RawLink};

/// Result of classifying one node's references against the known id set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// `id` references whose target is a known node, in input order. Self references and
    /// repeats are preserved.
    pub backlinks: Vec<String>,
    /// Everything else, with its declared kind. Includes `id` references to unknown nodes.
    pub misc_links: Vec<OrgLink>,
}

pub fn classify_links<'a, I>(raw: I, known_ids: &BTreeSet<String>) -> ClassifiedLinks
where
    I: IntoIterator<Item = &'a RawLink>,
{
    let mut classified = ClassifiedLinks::default();
    for link in raw {
        if link.is_id() && known_ids.contains(&link.target) {
            classified.backlinks.push(link.target.clone());
        } else {
            classified.misc_links.push(OrgLink::from(link.clone()));
        }
    }
    classified
}
