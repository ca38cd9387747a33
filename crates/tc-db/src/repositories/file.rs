use crate::{error::StoreResult, models::StoredFile, store::ObjectStore};

use super::files_prefix;

/// Files uploaded for a subcategory, with their download URLs
pub async fn list_for_sub_category(
    objects: &dyn ObjectStore,
    sub_category: &str,
) -> StoreResult<Vec<StoredFile>> {
    let handles = objects.list_objects(&files_prefix(sub_category)).await?;

    let mut files = Vec::with_capacity(handles.len());
    for handle in &handles {
        files.push(StoredFile {
            url: objects.resolve_download_url(handle).await?,
            name: handle.name.clone(),
        });
    }
    Ok(files)
}
