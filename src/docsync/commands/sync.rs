use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocsyncError, Result};
use crate::store::DataStore;
use crate::wire::SyncCompletedRequest;

/// Closes a sync cycle. A new `generation` from the server is recorded first;
/// generations only move forward.
pub fn run<S: DataStore>(store: &mut S, generation: Option<i64>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let current = store.generation()?;

    let generation = match generation {
        Some(next) if next < current => {
            return Err(DocsyncError::Api(format!(
                "Generation {} is older than the recorded {}",
                next, current
            )));
        }
        Some(next) => {
            if next != current {
                store.set_generation(next)?;
                tracing::debug!(from = current, to = next, "generation recorded");
                result.add_message(CmdMessage::success(format!(
                    "Generation recorded: {}",
                    next
                )));
            }
            next
        }
        None => current,
    };

    result.add_payload("SyncCompletedRequest", &SyncCompletedRequest { generation })?;
    Ok(result)
}
