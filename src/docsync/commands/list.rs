use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::indexed_entries;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let entries = indexed_entries(store)?;
    let detached = entries.iter().filter(|e| e.detached).count();

    let mut result = CmdResult::default().with_listed(entries);
    if detached > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} entries are not reachable from the root",
            detached
        )));
    }
    Ok(result)
}
