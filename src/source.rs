//! The record source boundary.
//!
//! A [RecordSource] yields one [RoamRecords] snapshot: parallel attribute vectors, one entry per
//! node, ordered by id ascending. [crate::roamgraph::RoamGraph] is always built from such a
//! snapshot, both when first loaded and when a filter re-runs construction on a reduced set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    properties::{RawLink, RoamNode},
    RoamError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoamRecords {
    pub ids: Vec<String>,
    pub titles: Vec<String>,
    pub locations: Vec<String>,
    /// One set per id, empty for untagged nodes
    pub tags: Vec<BTreeSet<String>>,
    /// One list per id, in order of appearance in the node body
    pub links: Vec<Vec<RawLink>>,
}

impl RoamRecords {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append one record. Convenient for building fixtures by hand.
    pub fn push<T, L>(
        &mut self,
        id: &str,
        title: &str,
        location: &str,
        tags: T,
        links: L,
    ) -> &mut Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<RawLink>,
    {
        self.ids.push(id.to_string());
        self.titles.push(title.to_string());
        self.locations.push(location.to_string());
        self.tags.push(tags.into_iter().map(Into::into).collect());
        self.links.push(links.into_iter().map(Into::into).collect());
        self
    }

    /// Records describing `nodes` as they currently stand: each node's backlinks followed by its
    /// miscellaneous links become its raw references.
    pub fn from_nodes<'a, I>(nodes: I) -> RoamRecords
    where
        I: IntoIterator<Item = &'a RoamNode>,
    {
        let mut records = RoamRecords::default();
        for node in nodes {
            records.push(
                &node.id,
                &node.title,
                &node.location,
                node.tags.iter().cloned(),
                node.backlinks
                    .iter()
                    .map(|id| RawLink::id(id.clone()))
                    .chain(node.misc_links.iter().map(RawLink::from)),
            );
        }
        records
    }

    /// Panics if the attribute vectors are not parallel. A mismatch means the source is broken,
    /// not that the data is unusual.
    pub fn assert_parallel(&self) {
        let n = self.ids.len();
        assert_eq!(self.titles.len(), n, "titles not parallel to ids");
        assert_eq!(self.locations.len(), n, "locations not parallel to ids");
        assert_eq!(self.tags.len(), n, "tags not parallel to ids");
        assert_eq!(self.links.len(), n, "links not parallel to ids");
    }
}

pub trait RecordSource: Sync {
    /// Load every record the source knows about, ordered by id ascending.
    fn load_records(
        &self,
    ) -> impl std::future::Future<Output = Result<RoamRecords, RoamError>> + Send;
}

impl RecordSource for RoamRecords {
    fn load_records(
        &self,
    ) -> impl std::future::Future<Output = Result<RoamRecords, RoamError>> + Send {
        let records = self.clone();
        async move { Ok(records) }
    }
}
