//! Persistence of recipes and custom ingredients
//!
//! Stores are plain CRUD adapters. There is no locking or merging, the last
//! document saved with an id wins.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::model::{Ingredient, Recipe};

/// Something that can be saved in a [`Store`]
pub trait Document: Clone + Serialize + DeserializeOwned {
    /// Unique id in the store
    fn id(&self) -> &str;

    /// Called right before saving. `is_new` is true if there was no
    /// document with the same id.
    fn stamp(&mut self, now: DateTime<Utc>, is_new: bool) {
        let _ = (now, is_new);
    }
}

impl Document for Recipe {
    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&mut self, now: DateTime<Utc>, is_new: bool) {
        if is_new {
            self.created_at = now;
        }
        self.updated_at = now;
    }
}

impl Document for Ingredient {
    fn id(&self) -> &str {
        &self.id
    }
}

/// CRUD access to documents of one kind
pub trait Store<T: Document> {
    fn get(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// All the documents, in insertion order
    fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert or replace a document, returns it as stored
    fn save(&mut self, document: T) -> Result<T, StoreError>;

    /// Remove a document, returns if it existed
    fn delete(&mut self, id: &str) -> Result<bool, StoreError>;
}

/// Errors of the [`Store`] implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error accessing store file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store file '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Store that keeps everything in memory
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    documents: IndexMap<String, T>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            documents: IndexMap::new(),
        }
    }
}

impl<T: Document> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<T: Document> Store<T> for MemoryStore<T> {
    fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.documents.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.documents.values().cloned().collect())
    }

    fn save(&mut self, document: T) -> Result<T, StoreError> {
        Ok(insert(&mut self.documents, document))
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let existed = self.documents.shift_remove(id).is_some();
        tracing::debug!(%id, existed, "document deleted");
        Ok(existed)
    }
}

fn insert<T: Document>(documents: &mut IndexMap<String, T>, mut document: T) -> T {
    let is_new = !documents.contains_key(document.id());
    document.stamp(Utc::now(), is_new);
    tracing::debug!(id = document.id(), is_new, "document saved");
    documents.insert(document.id().to_string(), document.clone());
    document
}

/// Store backed by a JSON file
///
/// The file holds a JSON array with every document. It is read once when
/// the store is opened and written again after every change.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    documents: IndexMap<String, T>,
}

impl<T: Document> JsonFileStore<T> {
    /// Open a store file
    ///
    /// A missing file is an empty store, it is created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let documents = match fs::read(&path) {
            Ok(bytes) => {
                let list: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })?;
                list.into_iter()
                    .map(|d| (d.id().to_string(), d))
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => IndexMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), documents = documents.len(), "store opened");
        Ok(Self { path, documents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let tmp = self.path.with_extension("json.tmp");
        let file = File::create(&tmp).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let documents: Vec<&T> = self.documents.values().collect();
        serde_json::to_writer_pretty(&mut writer, &documents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        tracing::trace!(path = %self.path.display(), documents = documents.len(), "store file written");
        Ok(())
    }
}

impl<T: Document> Store<T> for JsonFileStore<T> {
    fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.documents.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.documents.values().cloned().collect())
    }

    fn save(&mut self, document: T) -> Result<T, StoreError> {
        let saved = insert(&mut self.documents, document);
        self.write()?;
        Ok(saved)
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.documents.shift_remove(id).is_none() {
            return Ok(false);
        }
        tracing::debug!(%id, "document deleted");
        self.write()?;
        Ok(true)
    }
}
