//! # roam-graph
//!
//! Builds a queryable knowledge graph from an [org-roam](https://www.orgroam.com/) note
//! collection.
//!
//! ## Overview
//!
//! org-roam keeps an index of every note ("node") in a SQLite database: its ID, title, file,
//! tags and the links in its body. roam-graph reads that index into a [`roamgraph::RoamGraph`]:
//! a node index keyed by ID, plus everything derived from it.
//!
//! - **Link classification**: `id:` links between known nodes become backlinks and graph edges.
//!   Everything else (web links, file links, links to deleted nodes) is kept on the node as a
//!   miscellaneous link.
//! - **Directed multigraph**: one edge per backlink, so repeated references and self references
//!   are preserved.
//! - **Orphans**: nodes with no link to or from any other node.
//! - **Duplicate titles**: reported as advisories, never rejected.
//! - **Filtering**: by tag, by tag pattern, or by orphan status. Filtering always returns a new,
//!   consistent collection.
//! - **Content**: node bodies read from the org files, with LaTeX snippet and source block
//!   extraction.
//!
//! ## Architecture
//!
//! - **[`source`]**: the record snapshot a collection is built from, and the [`source::RecordSource`]
//!   trait
//! - **[`db`]**: the org-roam SQLite record source (feature `service`)
//! - **[`roamgraph`]**: the collection itself, its link graph and orphan detection
//! - **[`properties`]**: node and link types
//! - **[`nodekey`]**: resolving an identifier to a node ID or title
//! - **[`codec`]**: link classification, diagnostics, org body reading and snippet extraction
//! - **[`config`]**: TOML settings for the `roam` CLI
//!
//! ## Quick Start
//!
//! With the `service` feature, `RoamGraph::open("~/.emacs.d/org-roam.db").await` loads the
//! collection straight from the org-roam database. Collections can also be built from records
//! assembled by hand:
//!
//! ```rust
//! use roam_graph::{properties::RawLink, roamgraph::RoamGraph, source::RoamRecords};
//!
//! let mut records = RoamRecords::default();
//! records
//!     .push("n1", "Calculus", "/notes/calc.org", ["lecture"], [RawLink::id("n1"), RawLink::id("n2")])
//!     .push("n2", "Limits", "/notes/limits.org", Vec::<String>::new(), [RawLink::id("n2")]);
//! let collection = RoamGraph::from_records(records);
//! assert_eq!(collection.size(), (2, 3));
//!
//! // Drop course notes and anything left disconnected
//! let notes = collection.filter_tags(["lecture"], true).remove_orphans();
//! assert!(notes.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - **`service`**: the SQLite record source ([`db::SqliteRecordSource`])
//! - **`bin`**: the `roam` command-line tool (implies `service`)

pub mod codec;
pub mod config;
#[cfg(feature = "service")]
pub mod db;
pub mod error;
pub mod nodekey;
pub mod paths;
pub mod properties;
pub mod roamgraph;
pub mod source;

pub use error::*;
