//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw strings → [`EntrySelector`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints and holds no business logic.
//!
//! `DocsyncApi<S, C, G>` is generic over the storage backend and over the
//! clock and ID source handed to the [`EntryFactory`], so tests can run the
//! whole stack against `InMemoryStore` with deterministic IDs and timestamps.

use crate::commands;
use crate::config::DocsyncConfig;
use crate::error::Result;
use crate::identity::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::index::{parse_selector, parse_selectors, EntrySelector};
use crate::model::{EntryFactory, EntryType};
use crate::store::DataStore;
use std::path::{Path, PathBuf};

pub struct DocsyncApi<S: DataStore, C: Clock = SystemClock, G: IdGenerator = UuidGenerator> {
    store: S,
    factory: EntryFactory<C, G>,
    home: PathBuf,
}

impl<S: DataStore> DocsyncApi<S> {
    pub fn new(store: S, home: PathBuf) -> Self {
        Self::with_factory(store, EntryFactory::system(), home)
    }
}

impl<S: DataStore, C: Clock, G: IdGenerator> DocsyncApi<S, C, G> {
    pub fn with_factory(store: S, factory: EntryFactory<C, G>, home: PathBuf) -> Self {
        Self {
            store,
            factory,
            home,
        }
    }

    pub fn mkdir(&mut self, name: &str, parent: Option<&str>) -> Result<CmdResult> {
        let parent = parse_parent(parent)?;
        commands::mkdir::run(&mut self.store, &self.factory, parent.as_ref(), name)
    }

    pub fn upload(
        &mut self,
        name: &str,
        id: Option<&str>,
        entry_type: EntryType,
        parent: Option<&str>,
    ) -> Result<CmdResult> {
        let parent = parse_parent(parent)?;
        let spec = commands::upload::UploadSpec {
            id,
            entry_type,
            parent: parent.as_ref(),
            name,
        };
        commands::upload::run(&mut self.store, &self.factory, spec)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn show<I: AsRef<str>>(&self, inputs: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::show::run(&self.store, &self.factory, &selectors)
    }

    pub fn delete<I: AsRef<str>>(&mut self, inputs: &[I], recursive: bool) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::delete::run(&mut self.store, &selectors, recursive)
    }

    pub fn blob_request(
        &self,
        transfer: Transfer,
        relative_path: &str,
        parent_path: Option<&str>,
        initial: bool,
    ) -> Result<CmdResult> {
        commands::blob::document(transfer, relative_path, parent_path, initial)
    }

    pub fn blob_root_request(
        &self,
        transfer: Transfer,
        relative_path: &str,
        initial: bool,
    ) -> Result<CmdResult> {
        let config = DocsyncConfig::load(&self.home)?;
        commands::blob::root(&self.store, &config, transfer, relative_path, initial)
    }

    pub fn sync_complete(&mut self, generation: Option<i64>) -> Result<CmdResult> {
        commands::sync::run(&mut self.store, generation)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.home, action)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.home)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

/// A parent must name exactly one entry, so ranges are refused.
fn parse_parent(input: Option<&str>) -> Result<Option<EntrySelector>> {
    let Some(input) = input else {
        return Ok(None);
    };
    match parse_selector(input) {
        EntrySelector::Range(..) => Err(crate::error::DocsyncError::Api(format!(
            "Parent must be a single entry, got {}",
            input
        ))),
        selector => Ok(Some(selector)),
    }
}

pub use commands::blob::Transfer;
pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, Payload};
