use crate::{
    error::StoreResult,
    models::{Draft, to_fields},
    store::DocumentStore,
};

use super::DRAFTS;

/// The admin form keeps a single draft
pub const DRAFT_ID: &str = "user_draft";

pub async fn load(store: &dyn DocumentStore) -> StoreResult<Option<Draft>> {
    store
        .get_document(DRAFTS, DRAFT_ID)
        .await?
        .map(|doc| serde_json::from_value(serde_json::Value::Object(doc.fields)))
        .transpose()
        .map_err(Into::into)
}

/// Replace the stored draft
pub async fn save(store: &dyn DocumentStore, draft: &Draft) -> StoreResult<()> {
    store.set_document(DRAFTS, DRAFT_ID, to_fields(draft)?).await
}
