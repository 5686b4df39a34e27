//! # Storage Layer
//!
//! The client keeps a local manifest of every entry it knows about, as last
//! seen by (or announced to) the server. The [`DataStore`] trait abstracts
//! that manifest so the command layer works the same against disk and memory.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Everything lives in a single `manifest.json`
//!   - Documents keyed by ID in a sorted map, so diffs of the file stay readable
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Storage Format
//!
//! ```text
//! <home>/
//! ├── manifest.json       # {"generation": 12, "documents": {"<id>": {Document}}}
//! └── config.json         # Client configuration
//! ```
//!
//! Documents are stored in their wire shape, so the manifest can be fed back
//! to the server without conversion.
//!
//! The store does not check parent references. That is the command layer's
//! job, since it is the one deciding what an operation is allowed to do.

use crate::error::Result;
use crate::model::Document;

pub mod fs;
pub mod memory;

pub trait DataStore {
    /// Insert or replace a document, keyed by its ID
    fn save_document(&mut self, doc: &Document) -> Result<()>;

    /// Get a document by ID
    fn get_document(&self, id: &str) -> Result<Document>;

    /// All stored documents, in no particular order
    fn list_documents(&self) -> Result<Vec<Document>>;

    /// Remove a document, returning what was stored
    fn remove_document(&mut self, id: &str) -> Result<Document>;

    /// Last sync generation recorded for the root
    fn generation(&self) -> Result<i64>;

    fn set_generation(&mut self, generation: i64) -> Result<()>;

    fn contains(&self, id: &str) -> Result<bool> {
        match self.get_document(id) {
            Ok(_) => Ok(true),
            Err(crate::error::DocsyncError::EntryNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
