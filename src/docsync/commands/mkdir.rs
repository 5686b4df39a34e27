use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::identity::{Clock, IdGenerator};
use crate::index::EntrySelector;
use crate::model::EntryFactory;
use crate::store::DataStore;

use super::helpers::resolve_parent;

pub fn run<S: DataStore, C: Clock, G: IdGenerator>(
    store: &mut S,
    factory: &EntryFactory<C, G>,
    parent: Option<&EntrySelector>,
    name: &str,
) -> Result<CmdResult> {
    let parent_id = resolve_parent(store, parent)?;
    let meta = factory.create_dir_document(parent_id, name);
    let doc = meta.to_document();
    store.save_document(&doc)?;
    tracing::debug!(id = %doc.id, parent = %doc.parent, "folder created");

    let mut result = CmdResult::default();
    result.add_payload("MetadataDocument", &meta)?;
    result.add_message(CmdMessage::success(format!("Folder created: {}", name)));
    result.affected.push(doc);
    Ok(result)
}
