use super::DataStore;
use crate::error::{DocsyncError, Result};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    #[serde(default)]
    generation: i64,
    #[serde(default)]
    documents: BTreeMap<String, Document>,
}

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DocsyncError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Manifest> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let content = fs::read_to_string(&path).map_err(DocsyncError::Io)?;
        serde_json::from_str(&content).map_err(|e| {
            DocsyncError::Store(format!("Corrupt manifest at {}: {}", path.display(), e))
        })
    }

    fn save(&self, manifest: &Manifest) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(manifest).map_err(DocsyncError::Serialization)?;
        fs::write(self.manifest_path(), content).map_err(DocsyncError::Io)?;
        tracing::debug!(
            path = %self.manifest_path().display(),
            documents = manifest.documents.len(),
            "manifest written"
        );
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save_document(&mut self, doc: &Document) -> Result<()> {
        let mut manifest = self.load()?;
        manifest.documents.insert(doc.id.clone(), doc.clone());
        self.save(&manifest)
    }

    fn get_document(&self, id: &str) -> Result<Document> {
        let manifest = self.load()?;
        manifest
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| DocsyncError::EntryNotFound(id.to_string()))
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        let manifest = self.load()?;
        Ok(manifest.documents.into_values().collect())
    }

    fn remove_document(&mut self, id: &str) -> Result<Document> {
        let mut manifest = self.load()?;
        let removed = manifest
            .documents
            .remove(id)
            .ok_or_else(|| DocsyncError::EntryNotFound(id.to_string()))?;
        self.save(&manifest)?;
        Ok(removed)
    }

    fn generation(&self) -> Result<i64> {
        Ok(self.load()?.generation)
    }

    fn set_generation(&mut self, generation: i64) -> Result<()> {
        let mut manifest = self.load()?;
        manifest.generation = generation;
        self.save(&manifest)
    }
}
