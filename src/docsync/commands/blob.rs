use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocsyncConfig;
use crate::error::Result;
use crate::store::DataStore;
use crate::wire::{BlobRootStorageRequest, BlobStorageRequest, METHOD_GET, METHOD_PUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Download,
    Upload,
}

impl Transfer {
    pub fn method(&self) -> &'static str {
        match self {
            Transfer::Download => METHOD_GET,
            Transfer::Upload => METHOD_PUT,
        }
    }
}

/// Slot request for one document blob.
pub fn document(
    transfer: Transfer,
    relative_path: &str,
    parent_path: Option<&str>,
    initial: bool,
) -> Result<CmdResult> {
    let request = BlobStorageRequest {
        method: transfer.method().to_string(),
        initial,
        relative_path: relative_path.to_string(),
        parent_path: parent_path.filter(|p| !p.is_empty()).map(str::to_string),
    };

    let mut result = CmdResult::default();
    result.add_payload("BlobStorageRequest", &request)?;
    Ok(result)
}

/// Slot request for the root manifest at the last recorded generation.
pub fn root<S: DataStore>(
    store: &S,
    config: &DocsyncConfig,
    transfer: Transfer,
    relative_path: &str,
    initial: bool,
) -> Result<CmdResult> {
    let generation = store.generation()?;
    let request = BlobRootStorageRequest {
        method: transfer.method().to_string(),
        initial,
        relative_path: relative_path.to_string(),
        root_schema: config.root_schema.clone(),
        generation,
    };

    let mut result = CmdResult::default();
    result.add_payload("BlobRootStorageRequest", &request)?;
    if initial && generation != 0 {
        result.add_message(CmdMessage::warning(format!(
            "Initial sync requested but generation {} is already recorded",
            generation
        )));
    }
    Ok(result)
}
