//! Blob storage envelopes.
//!
//! These are the payloads exchanged with the blob backend to obtain signed
//! URLs, plus the end-of-sync marker. Unlike the entry shapes in
//! [`crate::model`], they use snake_case wire names, and several fields are
//! left out of the JSON entirely when unset.

use crate::error::Result;
use crate::identity::{parse_timestamp, Clock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const METHOD_GET: &str = "GET";
pub const METHOD_PUT: &str = "PUT";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Unset and empty are the same thing on the wire.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Slot request for the root manifest of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRootStorageRequest {
    #[serde(rename = "http_method")]
    pub method: String,
    #[serde(rename = "initial_sync", default, skip_serializing_if = "is_false")]
    pub initial: bool,
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub root_schema: Option<String>,
    pub generation: i64,
}

/// Slot request for a single document blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobStorageRequest {
    #[serde(rename = "http_method")]
    pub method: String,
    #[serde(rename = "initial_sync", default, skip_serializing_if = "is_false")]
    pub initial: bool,
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub parent_path: Option<String>,
}

impl BlobStorageRequest {
    pub fn download(relative_path: impl Into<String>) -> Self {
        Self {
            method: METHOD_GET.to_string(),
            initial: false,
            relative_path: relative_path.into(),
            parent_path: None,
        }
    }

    pub fn upload(relative_path: impl Into<String>) -> Self {
        Self {
            method: METHOD_PUT.to_string(),
            ..Self::download(relative_path)
        }
    }

    pub fn with_parent(mut self, parent_path: impl Into<String>) -> Self {
        self.parent_path = Some(parent_path.into());
        self
    }

    pub fn initial_sync(mut self) -> Self {
        self.initial = true;
        self
    }
}

/// Where and how to perform a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobStorageResponse {
    pub expires: String,
    pub method: String,
    pub relative_path: String,
    pub url: String,
    /// `None` when the backend set no limit. The wire name is kept exactly as
    /// the backend spells it.
    #[serde(
        rename = "maxuploadsize_bytes",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "zero_as_none"
    )]
    pub max_upload_size_bytes: Option<i64>,
}

/// The backend sends `0` for "no limit".
fn zero_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|bytes| *bytes != 0))
}

impl BlobStorageResponse {
    pub fn expires_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.expires)
    }

    /// Whether the signed URL is past its expiry according to `clock`.
    pub fn is_expired<C: Clock + ?Sized>(&self, clock: &C) -> Result<bool> {
        Ok(self.expires_at()? <= clock.now())
    }

    /// Whether a blob of `size` bytes fits the backend's limit.
    pub fn accepts(&self, size: u64) -> bool {
        match self.max_upload_size_bytes {
            Some(limit) if limit > 0 => size <= limit as u64,
            _ => true,
        }
    }
}

/// Marks the end of a sync cycle at `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCompletedRequest {
    pub generation: i64,
}
