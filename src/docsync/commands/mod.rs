//! # Command Layer
//!
//! One module per operation. Each `run` takes the store (and, when it mints
//! entries, an [`EntryFactory`](crate::model::EntryFactory)), does the work and
//! returns a [`CmdResult`]. Commands never print: messages and wire payloads go
//! into the result for the caller to render.

use crate::config::DocsyncConfig;
use crate::error::Result;
use crate::index::DisplayEntry;
use crate::model::Document;
use serde::Serialize;

pub mod blob;
pub mod config;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod list;
pub mod mkdir;
pub mod show;
pub mod sync;
pub mod upload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A protocol structure ready to be sent, tagged with its type name.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub kind: &'static str,
    pub body: serde_json::Value,
}

impl Payload {
    pub fn of<T: Serialize>(kind: &'static str, value: &T) -> Result<Self> {
        Ok(Self {
            kind,
            body: serde_json::to_value(value)?,
        })
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<Document>,
    pub listed: Vec<DisplayEntry>,
    pub payloads: Vec<Payload>,
    pub config: Option<DocsyncConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_payload<T: Serialize>(&mut self, kind: &'static str, value: &T) -> Result<()> {
        self.payloads.push(Payload::of(kind, value)?);
        Ok(())
    }

    pub fn with_listed(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.listed = entries;
        self
    }

    pub fn with_config(mut self, config: DocsyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn payloads_of(&self, kind: &str) -> Vec<&serde_json::Value> {
        self.payloads
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| &p.body)
            .collect()
    }
}
