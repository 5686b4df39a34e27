use crate::error::{DocsyncError, Result};
use crate::index::{index_entries, DisplayEntry, DisplayIndex, EntrySelector, MIN_PREFIX_LEN};
use crate::model::ROOT_PARENT;
use crate::store::DataStore;

pub fn indexed_entries<S: DataStore>(store: &S) -> Result<Vec<DisplayEntry>> {
    let documents = store.list_documents()?;
    Ok(index_entries(&documents))
}

fn find_entry<'e>(
    indexed: &'e [DisplayEntry],
    selector: &EntrySelector,
) -> Result<&'e DisplayEntry> {
    match selector {
        EntrySelector::Index(idx) => indexed
            .iter()
            .find(|e| &e.index == idx)
            .ok_or_else(|| DocsyncError::Api(format!("Index {} not found", idx))),
        EntrySelector::Range(start, end) => Err(DocsyncError::Api(format!(
            "Expected a single entry, got range {}-{}",
            start, end
        ))),
        EntrySelector::Id(id) => {
            if let Some(exact) = indexed.iter().find(|e| &e.document.id == id) {
                return Ok(exact);
            }
            if id.len() < MIN_PREFIX_LEN {
                return Err(DocsyncError::EntryNotFound(id.clone()));
            }

            let mut matches = indexed.iter().filter(|e| e.document.id.starts_with(id.as_str()));
            match (matches.next(), matches.next()) {
                (Some(only), None) => Ok(only),
                (Some(_), Some(_)) => Err(DocsyncError::Api(format!(
                    "ID prefix {} matches more than one entry",
                    id
                ))),
                (None, _) => Err(DocsyncError::EntryNotFound(id.clone())),
            }
        }
    }
}

/// Entries covered by an inclusive range. Indexes are contiguous from 1, so a
/// range is valid exactly when its end is listed.
fn range_entries<'e>(
    indexed: &'e [DisplayEntry],
    start: DisplayIndex,
    end: DisplayIndex,
) -> Result<&'e [DisplayEntry]> {
    if end.0 > indexed.len() {
        return Err(DocsyncError::Api(format!("Index {} not found", end)));
    }
    Ok(&indexed[start.0.saturating_sub(1)..end.0])
}

/// Resolves selectors against the current listing, keeping input order and
/// dropping repeats.
pub fn resolve_selectors<S: DataStore>(
    store: &S,
    selectors: &[EntrySelector],
) -> Result<Vec<DisplayEntry>> {
    let indexed = indexed_entries(store)?;
    let mut resolved: Vec<DisplayEntry> = Vec::with_capacity(selectors.len());

    for selector in selectors {
        let found = match selector {
            EntrySelector::Range(start, end) => range_entries(&indexed, *start, *end)?,
            single => std::slice::from_ref(find_entry(&indexed, single)?),
        };
        for entry in found {
            if !resolved.iter().any(|e| e.document.id == entry.document.id) {
                resolved.push(entry.clone());
            }
        }
    }

    Ok(resolved)
}

/// The parent ID for a new entry: the root when no selector is given,
/// otherwise the selected entry, which must be a folder.
pub fn resolve_parent<S: DataStore>(store: &S, parent: Option<&EntrySelector>) -> Result<String> {
    let Some(selector) = parent else {
        return Ok(ROOT_PARENT.to_string());
    };

    let indexed = indexed_entries(store)?;
    let entry = find_entry(&indexed, selector)?;
    if !entry.document.is_collection() {
        return Err(DocsyncError::Api(format!(
            "{} is not a folder",
            entry.document.visible_name
        )));
    }
    Ok(entry.document.id.clone())
}
