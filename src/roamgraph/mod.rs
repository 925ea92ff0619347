//! RoamGraph module: the org-roam collection and its derived views.
//!
//! # Module Organization
//!
//! - [`graph`]: directed multigraph view (LinkGraph) and its JSON export form
//! - [`orphans`]: orphan detection over a node index
//! - [`base`]: RoamGraph construction, lookups and tag filtering
//!
//! ```rust
//! use roam_graph::{roamgraph::RoamGraph, source::RoamRecords};
//!
//! let mut records = RoamRecords::default();
//! records
//!     .push("n1", "Alpha", "alpha.org", ["math"], ["n1", "n2"])
//!     .push("n2", "Beta", "beta.org", ["lecture"], ["n2"]);
//! let collection = RoamGraph::from_records(records);
//! assert_eq!(collection.size(), (2, 3));
//! assert!(collection.is_connected());
//!
//! let math_only = collection.filter_tags(["lecture"], true);
//! assert_eq!(math_only.node_links("Alpha").unwrap(), ["n1"]);
//! ```

mod base;
pub mod graph;
pub mod orphans;

#[cfg(test)]
mod tests;

pub use base::RoamGraph;
pub use graph::{ExportNode, GraphExport, LinkGraph};
pub use orphans::{compute_orphans, is_orphan};
