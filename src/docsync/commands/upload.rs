use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocsyncError, Result};
use crate::identity::{Clock, IdGenerator};
use crate::index::EntrySelector;
use crate::model::{EntryFactory, EntryType};
use crate::store::DataStore;
use crate::tree::EntryTree;

use super::helpers::resolve_parent;

/// What to announce to the server.
#[derive(Debug, Clone)]
pub struct UploadSpec<'a> {
    /// Reuse this ID (re-upload); a fresh one is minted when `None`.
    pub id: Option<&'a str>,
    pub entry_type: EntryType,
    pub parent: Option<&'a EntrySelector>,
    pub name: &'a str,
}

/// Builds the upload request and metadata for an entry and records it locally.
///
/// A first upload is version 1. Re-uploading a known ID announces the next
/// version after the stored one and keeps the reader state (page, bookmark).
pub fn run<S: DataStore, C: Clock, G: IdGenerator>(
    store: &mut S,
    factory: &EntryFactory<C, G>,
    spec: UploadSpec<'_>,
) -> Result<CmdResult> {
    let parent_id = resolve_parent(store, spec.parent)?;
    let mut request =
        factory.create_upload_document_request(spec.id.unwrap_or_default(), spec.entry_type);
    let mut meta =
        factory.create_upload_document_meta(&request.id, spec.entry_type, parent_id, spec.name);

    let previous = match store.get_document(&request.id) {
        Ok(doc) => Some(doc),
        Err(DocsyncError::EntryNotFound(_)) => None,
        Err(e) => return Err(e),
    };

    if let Some(previous) = &previous {
        if previous.entry_type != spec.entry_type {
            return Err(DocsyncError::Api(format!(
                "{} is a {}, cannot upload it as a {}",
                previous.id, previous.entry_type, spec.entry_type
            )));
        }
        check_not_own_ancestor(store, &request.id, &meta.parent)?;

        let next = previous.version + 1;
        request = request.with_version(next);
        meta.version = next;
    }

    // to_document always stamps version 1; carry the real one over
    let mut doc = meta.to_document();
    doc.version = meta.version;
    if let Some(previous) = &previous {
        doc.current_page = previous.current_page;
        doc.bookmarked = previous.bookmarked;
    }
    store.save_document(&doc)?;
    tracing::debug!(id = %doc.id, version = doc.version, "upload staged");

    let mut result = CmdResult::default();
    result.add_payload("UploadDocumentRequest", &request)?;
    result.add_payload("MetadataDocument", &meta)?;
    result.add_message(CmdMessage::success(format!(
        "Upload staged: {} (version {})",
        spec.name, doc.version
    )));
    result.affected.push(doc);
    Ok(result)
}

fn check_not_own_ancestor<S: DataStore>(store: &S, id: &str, new_parent: &str) -> Result<()> {
    if new_parent == id {
        return Err(DocsyncError::Api(format!("{} cannot be its own parent", id)));
    }
    let documents = store.list_documents()?;
    let tree = EntryTree::build(&documents);
    if tree.descendants(id).iter().any(|d| d.id == new_parent) {
        return Err(DocsyncError::Api(format!(
            "{} cannot be moved into one of its own folders",
            id
        )));
    }
    Ok(())
}
