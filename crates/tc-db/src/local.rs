//! Object storage on the local filesystem.
//!
//! Objects live under a root directory and are published by the HTTP layer
//! under `public_base_url`.

use std::{io::ErrorKind, path::PathBuf};

use crate::{
    error::StoreResult,
    store::{BoxFuture, ObjectHandle, ObjectStore, encode_object_path, validate_object_path},
};

#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        validate_object_path(path)?;
        Ok(path.split('/').fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }
}

impl ObjectStore for LocalObjectStore {
    fn list_objects<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, StoreResult<Vec<ObjectHandle>>> {
        Box::pin(async move {
            let prefix = prefix.trim_end_matches('/');
            let dir = self.resolve(prefix)?;

            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(e.into()),
            };

            let mut handles = Vec::new();
            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_file() {
                    continue;
                }
                // Names that are not valid UTF-8 cannot be addressed by path
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                handles.push(ObjectHandle::new(&format!("{prefix}/{name}")));
            }

            handles.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(handles)
        })
    }

    fn resolve_download_url<'a>(
        &'a self,
        handle: &'a ObjectHandle,
    ) -> BoxFuture<'a, StoreResult<String>> {
        Box::pin(async move {
            validate_object_path(&handle.path)?;
            Ok(format!(
                "{}/{}",
                self.public_base_url,
                encode_object_path(&handle.path)
            ))
        })
    }

    fn put_object<'a>(
        &'a self,
        path: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, StoreResult<ObjectHandle>> {
        Box::pin(async move {
            let target = self.resolve(path)?;
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let size = bytes.len();
            tokio::fs::write(&target, bytes).await?;

            tracing::debug!(path, size, "Stored object");
            Ok(ObjectHandle::new(path))
        })
    }
}
