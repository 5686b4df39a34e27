use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocsyncError, Result};
use crate::index::EntrySelector;
use crate::store::DataStore;
use crate::tree::EntryTree;

use super::helpers::resolve_selectors;

/// Removes the selected entries and emits one `DeleteDocument` per removed
/// entry, carrying the version the client last saw.
///
/// Folders with content need `recursive`; their contents go first, deepest
/// entries before their parents. Every selection is checked before anything
/// is removed.
pub fn run<S: DataStore>(
    store: &mut S,
    selectors: &[EntrySelector],
    recursive: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let documents = store.list_documents()?;
    let tree = EntryTree::build(&documents);

    let mut doomed: Vec<String> = Vec::new();
    for entry in &resolved {
        let below = tree.descendants(&entry.document.id);
        if !below.is_empty() && !recursive {
            return Err(DocsyncError::Api(format!(
                "Folder {} is not empty ({} entries), use --recursive",
                entry.document.visible_name,
                below.len()
            )));
        }
        for id in below
            .iter()
            .rev()
            .map(|d| d.id.as_str())
            .chain(std::iter::once(entry.document.id.as_str()))
        {
            if !doomed.iter().any(|d| d == id) {
                doomed.push(id.to_string());
            }
        }
    }

    let mut result = CmdResult::default();
    for id in doomed {
        let removed = store.remove_document(&id)?;
        tracing::debug!(id = %removed.id, version = removed.version, "entry deleted");
        result.add_payload("DeleteDocument", &removed.to_delete_document())?;
        result.add_message(CmdMessage::success(format!(
            "Deleted: {}",
            removed.visible_name
        )));
        result.affected.push(removed);
    }
    Ok(result)
}
