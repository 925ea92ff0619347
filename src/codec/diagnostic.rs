//! Advisory diagnostics produced while building or querying a collection.
//!
//! Duplicate titles never fail an operation. They are attached to the result as a
//! [GraphDiagnostic] and logged, and callers decide whether to surface them.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphDiagnostic {
    /// The collection contains repeated titles (second and later occurrences, in index order).
    /// Matching nodes by title is non-exhaustive.
    DuplicateTitles(Vec<String>),
    /// A lookup used a title that several nodes share. The first node in index order was used.
    AmbiguousTitle(String),
}

impl GraphDiagnostic {
    /// Log the advisory at warn level.
    pub fn emit(&self) {
        tracing::warn!("{}", self);
    }
}

impl Display for GraphDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphDiagnostic::DuplicateTitles(titles) => write!(
                f,
                "Collection contains duplicate titles ({}). Matching nodes by title will be non-exhaustive.",
                titles.join(", ")
            ),
            GraphDiagnostic::AmbiguousTitle(title) => write!(
                f,
                "Title '{title}' is duplicated. This may not be the node you want."
            ),
        }
    }
}

/// Titles that occur more than once, one entry per repeat occurrence, in order of appearance.
pub fn duplicate_titles<'a, I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::BTreeSet::new();
    titles
        .into_iter()
        .filter(|title| !seen.insert(*title))
        .map(str::to_string)
        .collect()
}
