//! Gateway traits for the external document store and object storage.
//!
//! Everything the catalog persists goes through these two traits. Futures are
//! boxed so the traits stay object safe and can be shared as
//! `Arc<dyn DocumentStore>` in the API state.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Top-level fields of a document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A document as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Sort on a top-level field. Documents missing the field sort first when
/// ascending and last when descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }
}

/// Collection based document CRUD.
///
/// Collections are plain strings such as `topics` or
/// `comments/<subCategory>/topicComments`.
pub trait DocumentStore: Send + Sync {
    /// Cheap round trip used by readiness checks.
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>>;

    /// All documents of a collection. Without `order_by` documents come back
    /// in insertion order.
    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
        order_by: Option<OrderBy>,
    ) -> BoxFuture<'a, StoreResult<Vec<Document>>>;

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>>;

    /// Insert a document and return its new id.
    fn add_document<'a>(
        &'a self,
        collection: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<String>>;

    /// Create or replace the document at `id`.
    fn set_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>>;

    /// Merge `fields` into the top level of an existing document.
    fn update_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>>;

    fn delete_document<'a>(&'a self, collection: &'a str, id: &'a str)
    -> BoxFuture<'a, StoreResult<()>>;
}

/// A stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Full path inside the bucket, e.g. `files/Plants/leaf.png`
    pub path: String,
    /// Last path segment
    pub name: String,
}

impl ObjectHandle {
    pub fn new(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            name,
        }
    }
}

/// File storage addressed by slash separated paths.
pub trait ObjectStore: Send + Sync {
    /// Files directly under `prefix`, sorted by name. An unknown prefix is
    /// simply empty.
    fn list_objects<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, StoreResult<Vec<ObjectHandle>>>;

    fn resolve_download_url<'a>(&'a self, handle: &'a ObjectHandle)
    -> BoxFuture<'a, StoreResult<String>>;

    fn put_object<'a>(
        &'a self,
        path: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, StoreResult<ObjectHandle>>;
}

/// Reject empty, absolute and `..` paths.
pub fn validate_object_path(path: &str) -> StoreResult<()> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\'));

    if invalid {
        return Err(crate::error::StoreError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Percent-encode each segment of an object path for use in a URL.
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
