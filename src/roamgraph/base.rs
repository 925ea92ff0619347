//! RoamGraph: the node index of an org-roam collection and everything derived from it.
//!
//! The node index (`BTreeMap<id, RoamNode>`, ascending id order) is the single source of truth.
//! Duplicate titles, the id/title map, the link graph and the orphan set are recomputed from it
//! whenever a new index is built. Nothing mutates an index in place: filtering builds a new
//! [RoamGraph] from a reduced record set.

use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::{
    codec::{
        classify_links, diagnostic::duplicate_titles, latex_snippets, source_blocks, BodyReader,
        GraphDiagnostic,
    },
    nodekey::{resolve, IdentifierKind},
    paths::basename,
    properties::{OrgLink, RoamNode},
    source::{RecordSource, RoamRecords},
    RoamError,
};

use super::{
    graph::{GraphExport, LinkGraph},
    orphans::compute_orphans,
};

#[derive(Debug, Clone, Default)]
pub struct RoamGraph {
    /// Where the records came from, if known
    source_path: Option<String>,
    nodes: BTreeMap<String, RoamNode>,
    duplicate_titles: Vec<String>,
    id_title_map: BTreeMap<String, String>,
    graph: LinkGraph,
    orphans: BTreeSet<String>,
    diagnostics: Vec<GraphDiagnostic>,
}

impl From<RoamRecords> for RoamGraph {
    fn from(records: RoamRecords) -> Self {
        RoamGraph::from_records(records)
    }
}

/// Derived state is a function of the node index, so two collections are equal when their
/// indices are.
impl PartialEq for RoamGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl fmt::Display for RoamGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nodes, edges) = self.size();
        write!(
            f,
            "RoamGraph({} nodes, {} edges, {} orphans)",
            nodes,
            edges,
            self.orphans.len()
        )
    }
}

impl RoamGraph {
    /// Build a collection from a record snapshot.
    ///
    /// Panics if the record vectors are not parallel.
    pub fn from_records(records: RoamRecords) -> RoamGraph {
        RoamGraph::build(records, None)
    }

    /// Load all records from `source` and build a collection from them.
    pub async fn load<S: RecordSource>(source: &S) -> Result<RoamGraph, RoamError> {
        let records = source.load_records().await?;
        Ok(RoamGraph::from_records(records))
    }

    /// Load the collection stored in the org-roam database at `db_path`.
    #[cfg(feature = "service")]
    pub async fn open(db_path: &str) -> Result<RoamGraph, RoamError> {
        let source = crate::db::SqliteRecordSource::open(db_path)?;
        let records = source.load_records().await?;
        Ok(RoamGraph::build(
            records,
            Some(source.path().to_string_lossy().to_string()),
        ))
    }

    fn build(records: RoamRecords, source_path: Option<String>) -> RoamGraph {
        records.assert_parallel();
        let known_ids: BTreeSet<String> = records.ids.iter().cloned().collect();

        let mut nodes = BTreeMap::new();
        let rows = records
            .ids
            .into_iter()
            .zip(records.titles)
            .zip(records.locations)
            .zip(records.tags)
            .zip(records.links);
        for ((((id, title), location), tags), raw_links) in rows {
            if nodes.contains_key(&id) {
                tracing::warn!(
                    "[RoamGraph::build] Duplicate record for id {}, keeping the first",
                    id
                );
                continue;
            }
            let classified = classify_links(&raw_links, &known_ids);
            nodes.insert(
                id.clone(),
                RoamNode {
                    id,
                    title,
                    location,
                    tags,
                    backlinks: classified.backlinks,
                    misc_links: classified.misc_links,
                },
            );
        }

        let duplicate_titles = duplicate_titles(nodes.values().map(|n| n.title.as_str()));
        let mut diagnostics = Vec::new();
        if !duplicate_titles.is_empty() {
            let diag = GraphDiagnostic::DuplicateTitles(duplicate_titles.clone());
            diag.emit();
            diagnostics.push(diag);
        }

        let id_title_map = nodes
            .values()
            .map(|n| (n.id.clone(), n.title.clone()))
            .collect();
        let graph = LinkGraph::build(&nodes);
        let orphans = compute_orphans(&nodes);

        let built = RoamGraph {
            source_path,
            nodes,
            duplicate_titles,
            id_title_map,
            graph,
            orphans,
            diagnostics,
        };
        tracing::debug!("[RoamGraph::build] {}", built);
        built
    }

    /// Resolve `identifier` once and return the node it designates. Titles resolve to the first
    /// matching node in index order.
    fn lookup(&self, identifier: &str) -> Result<&RoamNode, RoamError> {
        let resolution = resolve(identifier, &self.nodes, &self.duplicate_titles);
        match resolution.kind {
            IdentifierKind::Id => self
                .nodes
                .get(identifier)
                .ok_or_else(|| RoamError::unresolved(identifier)),
            IdentifierKind::Title => self
                .nodes
                .values()
                .find(|node| node.title == identifier)
                .ok_or_else(|| RoamError::unresolved(identifier)),
            IdentifierKind::Unresolved => Err(RoamError::unresolved(identifier)),
        }
    }

    /// The node designated by `identifier` (an ID or a title).
    pub fn node(&self, identifier: &str) -> Result<&RoamNode, RoamError> {
        self.lookup(identifier)
    }

    pub fn node_title(&self, identifier: &str) -> Result<&str, RoamError> {
        Ok(self.lookup(identifier)?.title.as_str())
    }

    pub fn node_id(&self, identifier: &str) -> Result<&str, RoamError> {
        Ok(self.lookup(identifier)?.id.as_str())
    }

    /// IDs of the nodes `identifier` references. By org-roam convention this usually includes
    /// the node's own ID.
    pub fn node_links(&self, identifier: &str) -> Result<&[String], RoamError> {
        Ok(self.lookup(identifier)?.backlinks.as_slice())
    }

    pub fn all_tags(&self) -> BTreeSet<String> {
        self.nodes
            .values()
            .flat_map(|node| node.tags.iter().cloned())
            .collect()
    }

    /// A new collection restricted by tag. A node matches if any of its tags is in `tags`.
    /// With `exclude`, matching nodes are removed; otherwise only matching nodes are kept.
    ///
    /// Surviving nodes keep their full tag sets. Backlinks to removed nodes are pruned.
    pub fn filter_tags<I, S>(&self, tags: I, exclude: bool) -> RoamGraph
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        self.filter_nodes(|node| node.has_tag(&tags), exclude)
    }

    /// As [RoamGraph::filter_tags], matching tags against `patterns` instead of exact values.
    pub fn filter_tag_patterns(&self, patterns: &[Regex], exclude: bool) -> RoamGraph {
        self.filter_nodes(|node| node.has_regex_tag(patterns), exclude)
    }

    /// A new collection without this collection's orphans.
    pub fn remove_orphans(&self) -> RoamGraph {
        self.filter_nodes(|node| self.orphans.contains(&node.id), true)
    }

    fn filter_nodes<F>(&self, matches: F, exclude: bool) -> RoamGraph
    where
        F: Fn(&RoamNode) -> bool,
    {
        let (kept, removed): (Vec<&RoamNode>, Vec<&RoamNode>) = self
            .nodes
            .values()
            .partition(|node| matches(*node) != exclude);
        tracing::debug!(
            "[RoamGraph::filter] keeping {} nodes, removing {}",
            kept.len(),
            removed.len()
        );
        RoamGraph::build(RoamRecords::from_nodes(kept), self.source_path.clone())
    }

    /// `(node_count, edge_count)`
    pub fn size(&self) -> (usize, usize) {
        self.graph.size()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn node_index(&self) -> &BTreeMap<String, RoamNode> {
        &self.nodes
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoamNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.nodes.values().map(|n| n.title.as_str()).collect()
    }

    /// Node locations in index order, optionally reduced to their file names.
    pub fn locations(&self, base: bool) -> Vec<String> {
        self.nodes
            .values()
            .map(|n| {
                if base {
                    basename(&n.location)
                } else {
                    n.location.clone()
                }
            })
            .collect()
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn orphans(&self) -> &BTreeSet<String> {
        &self.orphans
    }

    /// True when the collection has no orphans. This does not check that the link graph forms a
    /// single component.
    pub fn is_connected(&self) -> bool {
        self.orphans.is_empty()
    }

    pub fn duplicate_titles(&self) -> &[String] {
        &self.duplicate_titles
    }

    pub fn has_duplicate_titles(&self) -> bool {
        !self.duplicate_titles.is_empty()
    }

    /// Advisories raised while building this collection.
    pub fn diagnostics(&self) -> &[GraphDiagnostic] {
        &self.diagnostics
    }

    pub fn id_title_map(&self) -> &BTreeMap<String, String> {
        &self.id_title_map
    }

    /// Synonym for [RoamGraph::id_title_map].
    pub fn title_index(&self) -> &BTreeMap<String, String> {
        &self.id_title_map
    }

    pub fn backlink_index(&self) -> BTreeMap<String, Vec<String>> {
        self.nodes
            .iter()
            .map(|(id, n)| (id.clone(), n.backlinks.clone()))
            .collect()
    }

    pub fn misc_link_index(&self) -> BTreeMap<String, Vec<OrgLink>> {
        self.nodes
            .iter()
            .map(|(id, n)| (id.clone(), n.misc_links.clone()))
            .collect()
    }

    pub fn tag_index(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.nodes
            .iter()
            .map(|(id, n)| (id.clone(), n.tags.clone()))
            .collect()
    }

    pub fn location_index(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|(id, n)| (id.clone(), n.location.clone()))
            .collect()
    }

    pub fn export(&self) -> GraphExport {
        GraphExport::new(&self.nodes, &self.graph)
    }

    /// Body text of the node designated by `identifier`.
    pub fn get_body<R: BodyReader>(
        &self,
        reader: &R,
        identifier: &str,
    ) -> Result<String, RoamError> {
        let node = self.lookup(identifier)?;
        reader.body_text(&node.location, &node.id)
    }

    pub fn get_latex_snippets<R: BodyReader>(
        &self,
        reader: &R,
        identifier: &str,
    ) -> Result<Vec<String>, RoamError> {
        Ok(latex_snippets(&self.get_body(reader, identifier)?))
    }

    pub fn get_src_blocks<R: BodyReader>(
        &self,
        reader: &R,
        identifier: &str,
    ) -> Result<Vec<(String, String)>, RoamError> {
        Ok(source_blocks(&self.get_body(reader, identifier)?))
    }

    /// Body text of every node. Fails on the first node whose body cannot be read.
    pub fn body_index<R: BodyReader>(
        &self,
        reader: &R,
    ) -> Result<BTreeMap<String, String>, RoamError> {
        self.nodes
            .values()
            .map(|n| Ok((n.id.clone(), reader.body_text(&n.location, &n.id)?)))
            .collect()
    }

    pub fn math_snippet_index<R: BodyReader>(
        &self,
        reader: &R,
    ) -> Result<BTreeMap<String, Vec<String>>, RoamError> {
        Ok(self
            .body_index(reader)?
            .into_iter()
            .map(|(id, body)| (id, latex_snippets(&body)))
            .collect())
    }

    pub fn src_block_index<R: BodyReader>(
        &self,
        reader: &R,
    ) -> Result<BTreeMap<String, Vec<(String, String)>>, RoamError> {
        Ok(self
            .body_index(reader)?
            .into_iter()
            .map(|(id, body)| (id, source_blocks(&body)))
            .collect())
    }
}
