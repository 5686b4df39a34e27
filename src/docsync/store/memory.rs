use super::DataStore;
use crate::error::{DocsyncError, Result};
use crate::model::Document;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: HashMap<String, Document>,
    generation: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_document(&mut self, doc: &Document) -> Result<()> {
        self.documents.insert(doc.id.clone(), doc.clone());
        Ok(())
    }

    fn get_document(&self, id: &str) -> Result<Document> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| DocsyncError::EntryNotFound(id.to_string()))
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.values().cloned().collect())
    }

    fn remove_document(&mut self, id: &str) -> Result<Document> {
        self.documents
            .remove(id)
            .ok_or_else(|| DocsyncError::EntryNotFound(id.to_string()))
    }

    fn generation(&self) -> Result<i64> {
        Ok(self.generation)
    }

    fn set_generation(&mut self, generation: i64) -> Result<()> {
        self.generation = generation;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{EntryType, MetadataDocument};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entry(
            mut self,
            id: &str,
            parent: &str,
            name: &str,
            entry_type: EntryType,
        ) -> Self {
            let doc = MetadataDocument {
                id: id.to_string(),
                parent: parent.to_string(),
                visible_name: name.to_string(),
                entry_type,
                version: 1,
                modified_client: "2024-05-01T12:00:00.000000000Z".to_string(),
            }
            .to_document();
            self.store.save_document(&doc).unwrap();
            self
        }

        pub fn with_folder(self, id: &str, parent: &str, name: &str) -> Self {
            self.with_entry(id, parent, name, EntryType::Collection)
        }

        pub fn with_file(self, id: &str, parent: &str, name: &str) -> Self {
            self.with_entry(id, parent, name, EntryType::Document)
        }

        pub fn with_version(mut self, id: &str, version: i64) -> Self {
            let mut doc = self.store.get_document(id).unwrap();
            doc.version = version;
            self.store.save_document(&doc).unwrap();
            self
        }
    }
}
