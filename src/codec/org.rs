//! Body text access for org-roam nodes.
//!
//! An org-roam node is either a whole file (the `:ID:` lives in the property drawer at the top
//! of the file) or a heading (the `:ID:` lives in the drawer directly under the heading). A
//! node's body is its own section text plus the text of every descendant section, without
//! heading lines or property drawers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::read_to_string;

use crate::{paths::expand_home, RoamError};

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*+)\s").expect("heading pattern is valid"));
static PROPERTY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*:ID:\s+(\S+)\s*$").expect("id property pattern is valid"));
static PLANNING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(SCHEDULED|DEADLINE|CLOSED):").expect("planning pattern is valid")
});

/// Source of note body text, keyed by document location and node id.
pub trait BodyReader {
    /// Full body text of node `id` inside the document at `location`. Fails with
    /// [RoamError::NotFound] if the document does not contain the node.
    fn body_text(&self, location: &str, id: &str) -> Result<String, RoamError>;
}

/// Reads bodies straight from the org files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgFileReader;

impl BodyReader for OrgFileReader {
    fn body_text(&self, location: &str, id: &str) -> Result<String, RoamError> {
        let path = expand_home(location);
        tracing::debug!("Reading body of {} from {:?}", id, path);
        let text = read_to_string(&path)?;
        org_body(&text, id)
            .ok_or_else(|| RoamError::NotFound(format!("No node with ID {id} in {location}")))
    }
}

#[derive(Debug)]
struct Section<'a> {
    /// 0 for the text before the first heading
    level: usize,
    id: Option<String>,
    body: Vec<&'a str>,
}

fn sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = vec![Section {
        level: 0,
        id: None,
        body: vec![],
    }];
    let mut in_drawer = false;
    let mut drawer_allowed = true;

    for line in text.lines() {
        if let Some(caps) = HEADING.captures(line) {
            sections.push(Section {
                level: caps[1].len(),
                id: None,
                body: vec![],
            });
            in_drawer = false;
            drawer_allowed = true;
            continue;
        }
        let Some(current) = sections.last_mut() else {
            continue;
        };
        let trimmed = line.trim();
        if in_drawer {
            if trimmed.eq_ignore_ascii_case(":END:") {
                in_drawer = false;
                drawer_allowed = false;
            } else if let Some(caps) = PROPERTY_ID.captures(line) {
                current.id.get_or_insert_with(|| caps[1].to_string());
            }
            continue;
        }
        if drawer_allowed {
            if trimmed.eq_ignore_ascii_case(":PROPERTIES:") {
                in_drawer = true;
                continue;
            }
            if !trimmed.is_empty() && !PLANNING.is_match(trimmed) {
                drawer_allowed = false;
            }
        }
        current.body.push(line);
    }
    sections
}

/// Body of node `id` within org document `text`, or `None` if no section carries that id.
pub fn org_body(text: &str, id: &str) -> Option<String> {
    let sections = sections(text);
    let start = sections.iter().position(|s| s.id.as_deref() == Some(id))?;
    let level = sections[start].level;
    let end = sections[start + 1..]
        .iter()
        .position(|s| s.level <= level)
        .map(|offset| start + 1 + offset)
        .unwrap_or(sections.len());

    Some(
        sections[start..end]
            .iter()
            .map(|s| s.body.join("\n"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
