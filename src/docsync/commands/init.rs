use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocsyncConfig;
use crate::error::Result;
use std::fs;
use std::path::Path;

pub fn run(home: &Path) -> Result<CmdResult> {
    fs::create_dir_all(home)?;
    let mut result = CmdResult::default();

    if DocsyncConfig::exists(home) {
        result.add_message(CmdMessage::info(format!(
            "Already initialized at {}",
            home.display()
        )));
        return Ok(result);
    }

    DocsyncConfig::default().save(home)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized docsync home at {}",
        home.display()
    )));
    Ok(result)
}
