//! # Entry Model
//!
//! The value types exchanged with the sync server, plus the constructors that
//! mint new entries and the converters that reshape an entry for each protocol
//! phase.
//!
//! ## Shapes
//!
//! - [`Document`]: the full server-side view of an entry (listing, upload ack)
//! - [`MetadataDocument`]: the minimal shape used to create and list entries
//! - [`DeleteDocument`]: `{ID, Version}`, so the server can spot a stale delete
//! - [`UploadDocumentRequest`] / [`UploadDocumentResponse`]: upload negotiation
//!
//! All of them serialize with the protocol's field names verbatim (`ID`,
//! `VisibleName`, `BlobURLGet`, ...) and always emit every field.
//!
//! ## Conversion Rules
//!
//! The converters are deliberately asymmetric:
//!
//! - [`MetadataDocument::to_document`] always stamps `Version = 1`.
//! - [`Document::to_meta_document`] keeps the version but re-stamps
//!   `ModifiedClient` with the current time.
//! - [`Document::to_delete_document`] keeps only `ID` and `Version`.
//!
//! Nothing here validates field contents. Empty names, unknown parents and odd
//! versions flow through untouched; checking them is up to whoever stores or
//! transmits the entry.

use crate::error::{DocsyncError, Result};
use crate::identity::{format_timestamp, Clock, IdGenerator, SystemClock, UuidGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const COLLECTION_TYPE: &str = "CollectionType";
pub const DOCUMENT_TYPE: &str = "DocumentType";

/// Parent value that marks an entry as living at the root.
pub const ROOT_PARENT: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// A folder.
    #[serde(rename = "CollectionType")]
    Collection,
    /// A file.
    #[serde(rename = "DocumentType")]
    Document,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Collection => COLLECTION_TYPE,
            EntryType::Document => DOCUMENT_TYPE,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = DocsyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            COLLECTION_TYPE => Ok(EntryType::Collection),
            DOCUMENT_TYPE => Ok(EntryType::Document),
            other => Err(DocsyncError::UnknownEntryType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "BlobURLGet", default)]
    pub blob_url_get: String,
    #[serde(rename = "BlobURLGetExpires", default)]
    pub blob_url_get_expires: String,
    #[serde(default)]
    pub modified_client: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub visible_name: String,
    #[serde(default)]
    pub current_page: i64,
    #[serde(default)]
    pub bookmarked: bool,
    #[serde(default)]
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataDocument {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub visible_name: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub modified_client: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteDocument {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadDocumentRequest {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub version: i64,
}

impl UploadDocumentRequest {
    /// Overrides the version stamped by the constructor, for uploads of an
    /// entry the server already knows about.
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UploadDocumentResponse {
    #[serde(rename = "ID")]
    pub id: String,
    pub version: i64,
    pub message: String,
    pub success: bool,
    #[serde(rename = "BlobURLPut")]
    pub blob_url_put: String,
    #[serde(rename = "BlobURLPutExpires")]
    pub blob_url_put_expires: String,
}

impl Document {
    pub fn is_collection(&self) -> bool {
        self.entry_type == EntryType::Collection
    }

    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }

    /// Projects to the metadata shape, re-stamping `ModifiedClient` with the
    /// system clock.
    pub fn to_meta_document(&self) -> MetadataDocument {
        self.to_meta_document_with(&SystemClock)
    }

    /// Projects to the metadata shape, re-stamping `ModifiedClient` from `clock`.
    /// The source timestamp is discarded: the conversion itself counts as a
    /// modification.
    pub fn to_meta_document_with<C: Clock + ?Sized>(&self, clock: &C) -> MetadataDocument {
        MetadataDocument {
            id: self.id.clone(),
            parent: self.parent.clone(),
            visible_name: self.visible_name.clone(),
            entry_type: self.entry_type,
            version: self.version,
            modified_client: format_timestamp(clock.now()),
        }
    }

    pub fn to_delete_document(&self) -> DeleteDocument {
        DeleteDocument {
            id: self.id.clone(),
            version: self.version,
        }
    }
}

impl MetadataDocument {
    /// Projects to the full document shape. The version is always 1,
    /// whatever the source carried; result fields are left at their zero
    /// values.
    pub fn to_document(&self) -> Document {
        Document {
            id: self.id.clone(),
            version: 1,
            message: String::new(),
            success: false,
            blob_url_get: String::new(),
            blob_url_get_expires: String::new(),
            modified_client: self.modified_client.clone(),
            entry_type: self.entry_type,
            visible_name: self.visible_name.clone(),
            current_page: 0,
            bookmarked: false,
            parent: self.parent.clone(),
        }
    }
}

/// Mints new entries using an injected clock and ID source.
#[derive(Debug, Clone, Default)]
pub struct EntryFactory<C = SystemClock, G = UuidGenerator> {
    clock: C,
    ids: G,
}

impl EntryFactory {
    pub fn system() -> Self {
        Self::default()
    }
}

impl<C: Clock, G: IdGenerator> EntryFactory<C, G> {
    pub fn new(clock: C, ids: G) -> Self {
        Self { clock, ids }
    }

    fn mint_id(&self) -> String {
        let id = self.ids.new_id();
        tracing::trace!(%id, "minted entry id");
        id
    }

    fn stamp(&self) -> String {
        format_timestamp(self.clock.now())
    }

    /// A new folder under `parent` (empty for root), at version 1.
    pub fn create_dir_document(
        &self,
        parent: impl Into<String>,
        name: impl Into<String>,
    ) -> MetadataDocument {
        MetadataDocument {
            id: self.mint_id(),
            parent: parent.into(),
            visible_name: name.into(),
            entry_type: EntryType::Collection,
            version: 1,
            modified_client: self.stamp(),
        }
    }

    /// Upload announcement for `id`, or for a fresh ID when `id` is empty.
    ///
    /// The version is always 1. Re-uploads of a known entry must bump it with
    /// [`UploadDocumentRequest::with_version`].
    pub fn create_upload_document_request(
        &self,
        id: &str,
        entry_type: EntryType,
    ) -> UploadDocumentRequest {
        let id = if id.is_empty() {
            self.mint_id()
        } else {
            id.to_string()
        };

        UploadDocumentRequest {
            id,
            entry_type,
            version: 1,
        }
    }

    /// Metadata for an entry whose ID the caller already owns.
    pub fn create_upload_document_meta(
        &self,
        id: impl Into<String>,
        entry_type: EntryType,
        parent: impl Into<String>,
        name: impl Into<String>,
    ) -> MetadataDocument {
        MetadataDocument {
            id: id.into(),
            parent: parent.into(),
            visible_name: name.into(),
            entry_type,
            version: 1,
            modified_client: self.stamp(),
        }
    }

    pub fn to_meta_document(&self, doc: &Document) -> MetadataDocument {
        doc.to_meta_document_with(&self.clock)
    }
}

pub fn create_dir_document(parent: impl Into<String>, name: impl Into<String>) -> MetadataDocument {
    EntryFactory::system().create_dir_document(parent, name)
}

pub fn create_upload_document_request(id: &str, entry_type: EntryType) -> UploadDocumentRequest {
    EntryFactory::system().create_upload_document_request(id, entry_type)
}

pub fn create_upload_document_meta(
    id: impl Into<String>,
    entry_type: EntryType,
    parent: impl Into<String>,
    name: impl Into<String>,
) -> MetadataDocument {
    EntryFactory::system().create_upload_document_meta(id, entry_type, parent, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::fixtures::{instant, FixedClock, SequentialIds, SteppingClock};
    use chrono::TimeDelta;
    use serde_json::json;
    use uuid::Uuid;

    fn fixed_factory() -> EntryFactory<FixedClock, SequentialIds> {
        EntryFactory::new(
            FixedClock(instant("2024-05-01T12:00:00Z")),
            SequentialIds::new("entry"),
        )
    }

    fn sample_document(id: &str, version: i64) -> Document {
        Document {
            id: id.to_string(),
            version,
            message: "ok".to_string(),
            success: true,
            blob_url_get: "https://blob.example/get".to_string(),
            blob_url_get_expires: "2024-05-01T13:00:00Z".to_string(),
            modified_client: "2024-05-01T12:00:00.000000000Z".to_string(),
            entry_type: EntryType::Document,
            visible_name: "Paper".to_string(),
            current_page: 4,
            bookmarked: true,
            parent: "folder".to_string(),
        }
    }

    #[test]
    fn dir_document_is_a_fresh_collection() {
        let meta = create_dir_document("", "Notebooks");
        assert_eq!(meta.entry_type, EntryType::Collection);
        assert_eq!(meta.version, 1);
        assert_eq!(meta.parent, "");
        assert_eq!(meta.visible_name, "Notebooks");
        assert!(Uuid::parse_str(&meta.id).is_ok());
    }

    #[test]
    fn dir_document_uses_injected_capabilities() {
        let factory = fixed_factory();
        let meta = factory.create_dir_document("parent-id", "");
        assert_eq!(meta.id, "entry-1");
        assert_eq!(meta.parent, "parent-id");
        assert_eq!(meta.visible_name, "");
        assert_eq!(meta.modified_client, "2024-05-01T12:00:00.000000000Z");
    }

    #[test]
    fn upload_request_generates_id_when_missing() {
        let request = create_upload_document_request("", EntryType::Document);
        assert!(!request.id.is_empty());
        assert!(Uuid::parse_str(&request.id).is_ok());
        assert_eq!(request.version, 1);
    }

    #[test]
    fn upload_request_keeps_supplied_id() {
        let first = create_upload_document_request("abc", EntryType::Document);
        let second = create_upload_document_request("abc", EntryType::Collection);
        assert_eq!(first.id, "abc");
        assert_eq!(second.id, "abc");
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 1);
    }

    #[test]
    fn upload_request_version_can_be_overridden() {
        let request = create_upload_document_request("abc", EntryType::Document).with_version(4);
        assert_eq!(request.version, 4);
    }

    #[test]
    fn upload_meta_never_generates_ids() {
        let factory = fixed_factory();
        let meta = factory.create_upload_document_meta("", EntryType::Document, "p", "n");
        assert_eq!(meta.id, "");
        assert_eq!(meta.version, 1);
        assert_eq!(meta.modified_client, "2024-05-01T12:00:00.000000000Z");
    }

    #[test]
    fn to_document_preserves_identity_fields() {
        let meta = fixed_factory().create_upload_document_meta(
            "m1",
            EntryType::Document,
            "folder",
            "Report",
        );
        let doc = meta.to_document();
        assert_eq!(doc.id, meta.id);
        assert_eq!(doc.parent, meta.parent);
        assert_eq!(doc.visible_name, meta.visible_name);
        assert_eq!(doc.entry_type, meta.entry_type);
        assert_eq!(doc.modified_client, meta.modified_client);
        assert!(!doc.success);
        assert_eq!(doc.current_page, 0);
    }

    #[test]
    fn to_document_resets_version_to_one() {
        let mut meta = create_dir_document("", "Old");
        meta.version = 5;
        assert_eq!(meta.to_document().version, 1);
    }

    #[test]
    fn to_meta_document_refreshes_timestamp() {
        let clock = SteppingClock::new(instant("2024-05-01T12:00:00Z"), TimeDelta::milliseconds(1));
        let factory = EntryFactory::new(clock, SequentialIds::new("entry"));

        let doc = factory
            .create_upload_document_meta("d1", EntryType::Document, "", "Paper")
            .to_document();
        let meta = factory.to_meta_document(&doc);

        assert_ne!(meta.modified_client, doc.modified_client);
        assert!(meta.modified_client > doc.modified_client);
    }

    #[test]
    fn to_meta_document_keeps_version() {
        let doc = sample_document("d1", 7);
        let meta = doc.to_meta_document_with(&FixedClock(instant("2030-01-01T00:00:00Z")));
        assert_eq!(meta.version, 7);
        assert_eq!(meta.id, "d1");
        assert_eq!(meta.parent, "folder");
        assert_eq!(meta.modified_client, "2030-01-01T00:00:00.000000000Z");
    }

    #[test]
    fn to_delete_document_carries_id_and_version() {
        let doc = sample_document("x", 3);
        assert_eq!(
            doc.to_delete_document(),
            DeleteDocument {
                id: "x".to_string(),
                version: 3
            }
        );
    }

    #[test]
    fn delete_document_serializes_only_identity() {
        let json = serde_json::to_value(sample_document("x", 3).to_delete_document()).unwrap();
        assert_eq!(json, json!({"ID": "x", "Version": 3}));
    }

    #[test]
    fn document_uses_protocol_field_names() {
        let json = serde_json::to_value(sample_document("d1", 2)).unwrap();
        assert_eq!(
            json,
            json!({
                "ID": "d1",
                "Version": 2,
                "Message": "ok",
                "Success": true,
                "BlobURLGet": "https://blob.example/get",
                "BlobURLGetExpires": "2024-05-01T13:00:00Z",
                "ModifiedClient": "2024-05-01T12:00:00.000000000Z",
                "Type": "DocumentType",
                "VisibleName": "Paper",
                "CurrentPage": 4,
                "Bookmarked": true,
                "Parent": "folder"
            })
        );
    }

    #[test]
    fn document_decoding_fills_missing_fields() {
        let doc: Document =
            serde_json::from_str(r#"{"ID":"a","Type":"CollectionType","VisibleName":"Inbox"}"#)
                .unwrap();
        assert_eq!(doc.id, "a");
        assert!(doc.is_collection());
        assert!(doc.is_root());
        assert_eq!(doc.version, 0);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: std::result::Result<MetadataDocument, _> =
            serde_json::from_str(r#"{"ID":"a","Type":"FolderType"}"#);
        assert!(result.is_err());

        let missing: std::result::Result<Document, _> = serde_json::from_str(r#"{"ID":"a"}"#);
        assert!(missing.is_err());

        assert!(matches!(
            "Folder".parse::<EntryType>(),
            Err(DocsyncError::UnknownEntryType(_))
        ));
    }

    #[test]
    fn entry_type_round_trips_through_strings() {
        assert_eq!(
            COLLECTION_TYPE.parse::<EntryType>().unwrap(),
            EntryType::Collection
        );
        assert_eq!(EntryType::Document.to_string(), DOCUMENT_TYPE);
    }

    #[test]
    fn upload_response_decodes_put_url() {
        let response: UploadDocumentResponse = serde_json::from_str(
            r#"{"ID":"u1","Version":2,"Success":true,"BlobURLPut":"https://blob/put","BlobURLPutExpires":"2024-05-01T13:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(response.id, "u1");
        assert_eq!(response.version, 2);
        assert!(response.success);
        assert_eq!(response.message, "");
        assert_eq!(response.blob_url_put, "https://blob/put");
    }

    #[test]
    fn folder_then_delete_scenario() {
        let folder = create_dir_document("", "Notebooks");
        assert_eq!(folder.entry_type.as_str(), "CollectionType");
        assert_eq!(folder.parent, "");
        assert_eq!(folder.version, 1);

        let mut doc = folder.to_document();
        doc.id = "x".to_string();
        doc.version = 3;
        let delete = doc.to_delete_document();
        assert_eq!(delete.id, "x");
        assert_eq!(delete.version, 3);
    }
}
