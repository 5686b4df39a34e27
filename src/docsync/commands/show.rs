use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::format::format_path;
use crate::identity::{Clock, IdGenerator};
use crate::index::EntrySelector;
use crate::model::EntryFactory;
use crate::store::DataStore;
use crate::tree::EntryTree;

use super::helpers::resolve_selectors;

/// Emits each selected entry as a `Document` and as the `MetadataDocument`
/// that would be sent to list or recreate it.
pub fn run<S: DataStore, C: Clock, G: IdGenerator>(
    store: &S,
    factory: &EntryFactory<C, G>,
    selectors: &[EntrySelector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let documents = store.list_documents()?;
    let tree = EntryTree::build(&documents);

    let mut result = CmdResult::default();
    for entry in resolved {
        let doc = &entry.document;
        let location = match tree.path_of(&doc.id) {
            Some(path) => format_path(&path),
            None => format!("(detached, parent {})", doc.parent),
        };
        result.add_message(CmdMessage::info(format!("{}: {}", entry.index, location)));
        result.add_payload("Document", doc)?;
        result.add_payload("MetadataDocument", &factory.to_meta_document(doc))?;
        result.listed.push(entry);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::fixtures::{instant, FixedClock, SequentialIds};
    use crate::index::DisplayIndex;
    use crate::store::memory::fixtures::StoreFixture;

    fn factory() -> EntryFactory<FixedClock, SequentialIds> {
        EntryFactory::new(
            FixedClock(instant("2030-01-01T00:00:00Z")),
            SequentialIds::new("unused"),
        )
    }

    #[test]
    fn shows_document_and_refreshed_metadata() {
        let store = StoreFixture::new()
            .with_folder("n", "", "Notebooks")
            .with_file("p", "n", "Paper")
            .with_version("p", 6)
            .store;

        let result = run(&store, &factory(), &[EntrySelector::Index(DisplayIndex(2))]).unwrap();

        let doc = result.payloads_of("Document")[0];
        assert_eq!(doc["ID"], "p");
        assert_eq!(doc["Version"], 6);
        assert_eq!(doc["ModifiedClient"], "2024-05-01T12:00:00.000000000Z");

        let meta = result.payloads_of("MetadataDocument")[0];
        assert_eq!(meta["Version"], 6);
        assert_eq!(meta["ModifiedClient"], "2030-01-01T00:00:00.000000000Z");

        assert_eq!(result.messages[0].content, "2: Notebooks > Paper");
    }

    #[test]
    fn detached_entries_name_their_parent() {
        let store = StoreFixture::new().with_file("o", "gone", "Orphan").store;
        let result = run(&store, &factory(), &[EntrySelector::Id("o".to_string())]).unwrap();
        assert_eq!(result.messages[0].content, "1: (detached, parent gone)");
    }
}
