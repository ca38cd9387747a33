//! In-memory backends, used by tests and `STORE_BACKEND=memory`.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    store::{
        BoxFuture, Direction, Document, DocumentStore, Fields, ObjectHandle, ObjectStore, OrderBy,
        encode_object_path, validate_object_path,
    },
};

#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    // Each collection keeps insertion order
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Order two optional JSON values; missing and null sort lowest.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
        order_by: Option<OrderBy>,
    ) -> BoxFuture<'a, StoreResult<Vec<Document>>> {
        Box::pin(async move {
            let collections = self.collections.read().await;
            let mut documents = collections.get(collection).cloned().unwrap_or_default();

            if let Some(order) = order_by {
                documents.sort_by(|a, b| {
                    let ordering =
                        compare_values(a.fields.get(&order.field), b.fields.get(&order.field));
                    match order.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                });
            }

            Ok(documents)
        })
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>> {
        Box::pin(async move {
            let collections = self.collections.read().await;
            Ok(collections
                .get(collection)
                .and_then(|docs| docs.iter().find(|doc| doc.id == id))
                .cloned())
        })
    }

    fn add_document<'a>(
        &'a self,
        collection: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<String>> {
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();
            let mut collections = self.collections.write().await;
            collections
                .entry(collection.to_string())
                .or_default()
                .push(Document {
                    id: id.clone(),
                    fields,
                });
            Ok(id)
        })
    }

    fn set_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let docs = collections.entry(collection.to_string()).or_default();
            match docs.iter_mut().find(|doc| doc.id == id) {
                Some(doc) => doc.fields = fields,
                None => docs.push(Document {
                    id: id.to_string(),
                    fields,
                }),
            }
            Ok(())
        })
    }

    fn update_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let doc = collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
                .ok_or_else(|| StoreError::not_found(collection, id))?;

            doc.fields.extend(fields);
            Ok(())
        })
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let docs = collections
                .get_mut(collection)
                .ok_or_else(|| StoreError::not_found(collection, id))?;

            let before = docs.len();
            docs.retain(|doc| doc.id != id);
            if docs.len() == before {
                return Err(StoreError::not_found(collection, id));
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    base_url: String,
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Arc::default(),
        }
    }

    /// Stored bytes at `path`, if any.
    pub async fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(path).cloned()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn list_objects<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, StoreResult<Vec<ObjectHandle>>> {
        Box::pin(async move {
            let prefix = prefix.trim_end_matches('/');
            validate_object_path(prefix)?;
            let dir = format!("{prefix}/");

            let objects = self.objects.read().await;
            // BTreeMap keys are sorted, so names come out sorted too
            Ok(objects
                .keys()
                .filter(|path| {
                    path.strip_prefix(&dir)
                        .is_some_and(|rest| !rest.contains('/'))
                })
                .map(|path| ObjectHandle::new(path))
                .collect())
        })
    }

    fn resolve_download_url<'a>(
        &'a self,
        handle: &'a ObjectHandle,
    ) -> BoxFuture<'a, StoreResult<String>> {
        Box::pin(async move {
            validate_object_path(&handle.path)?;
            Ok(format!("{}/{}", self.base_url, encode_object_path(&handle.path)))
        })
    }

    fn put_object<'a>(
        &'a self,
        path: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, StoreResult<ObjectHandle>> {
        Box::pin(async move {
            validate_object_path(path)?;
            self.objects.write().await.insert(path.to_string(), bytes);
            Ok(ObjectHandle::new(path))
        })
    }
}
