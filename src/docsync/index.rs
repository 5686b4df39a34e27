//! # Display Indexes
//!
//! Entry IDs are UUIDs, which nobody wants to type. Listings therefore number
//! every entry (`1`, `2`, ...) in the order the tree is shown, and commands
//! accept those numbers alongside IDs:
//!
//! - `3`: the third listed entry
//! - `2-4`: a range, expanded to `2 3 4` against the current listing
//! - `6f1c`: an ID or an unambiguous ID prefix (at least four characters)
//!
//! Indexes are only stable as long as the manifest does not change, so they
//! are recomputed from the store on every command.

use crate::model::Document;
use crate::tree::EntryTree;
use std::fmt;
use std::str::FromStr;

/// Shortest ID prefix accepted as a selector.
pub const MIN_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(DisplayIndex(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// A user input that picks an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySelector {
    Index(DisplayIndex),
    /// Inclusive; only expanded once the listing is known.
    Range(DisplayIndex, DisplayIndex),
    Id(String),
}

impl fmt::Display for EntrySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySelector::Index(idx) => write!(f, "{}", idx),
            EntrySelector::Range(start, end) => write!(f, "{}-{}", start, end),
            EntrySelector::Id(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayEntry {
    pub document: Document,
    pub index: DisplayIndex,
    pub depth: usize,
    /// Not reachable from the root.
    pub detached: bool,
}

/// Numbers entries in tree order: reachable entries depth-first, then the
/// detached ones.
pub fn index_entries(documents: &[Document]) -> Vec<DisplayEntry> {
    let tree = EntryTree::build(documents);
    let reachable = tree.walk().into_iter().map(|(depth, doc)| (depth, doc, false));
    let detached = tree.detached().iter().map(|doc| (0, *doc, true));

    reachable
        .chain(detached)
        .enumerate()
        .map(|(i, (depth, doc, detached))| DisplayEntry {
            document: doc.clone(),
            index: DisplayIndex(i + 1),
            depth,
            detached,
        })
        .collect()
}

/// Parses `"3"` or `"2-4"`.
///
/// Start must be <= end. Whether the indexes exist is checked at resolution.
pub fn parse_index_or_range(s: &str) -> Result<EntrySelector, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            if start == end {
                return Ok(EntrySelector::Index(start));
            }
            return Ok(EntrySelector::Range(start, end));
        }
    }

    DisplayIndex::from_str(s).map(EntrySelector::Index)
}

/// Interprets one user input: an index or range if it parses as one, an ID
/// (or ID prefix) otherwise.
pub fn parse_selector(s: &str) -> EntrySelector {
    parse_index_or_range(s).unwrap_or_else(|_| EntrySelector::Id(s.to_string()))
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<EntrySelector> {
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}
