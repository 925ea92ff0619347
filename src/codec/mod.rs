//! # Codec Module
//!
//! Everything that interprets raw note content:
//!
//! - [`links`]: classifies a node's raw references into backlinks and miscellaneous links
//! - [`org`]: the [`BodyReader`] boundary and the default on-disk org reader
//! - [`extract`]: LaTeX snippet and source block extraction from body text
//! - [`diagnostic`]: advisory diagnostics (duplicate titles)
//!
//! Codecs are pure functions over strings, except [`OrgFileReader`] which reads the note's
//! file on every call. Nothing here caches body text.

pub mod diagnostic;
pub mod extract;
pub mod links;
pub mod org;

pub use diagnostic::GraphDiagnostic;
pub use extract::{latex_snippets, source_blocks};
pub use links::{classify_links, ClassifiedLinks};
pub use org::{BodyReader, OrgFileReader};
