use crate::{
    error::StoreResult,
    models::{NewTopic, Topic, TopicUpdate, to_fields},
    store::{DocumentStore, OrderBy},
};

use super::TOPICS;

/// All topics, oldest first. Unreadable timestamps count as the epoch.
pub async fn list_ordered(store: &dyn DocumentStore) -> StoreResult<Vec<Topic>> {
    let mut topics = store
        .list_documents(TOPICS, Some(OrderBy::asc("timestamp")))
        .await?
        .into_iter()
        .map(Topic::from_document)
        .collect::<StoreResult<Vec<_>>>()?;

    topics.sort_by_key(|topic| topic.timestamp);
    Ok(topics)
}

/// Topics filed under `sub_category` in any class, oldest first
pub async fn list_by_sub_category(
    store: &dyn DocumentStore,
    sub_category: &str,
) -> StoreResult<Vec<Topic>> {
    let mut topics = list_ordered(store).await?;
    topics.retain(|topic| topic.sub_category == sub_category);
    Ok(topics)
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> StoreResult<Option<Topic>> {
    store
        .get_document(TOPICS, id)
        .await?
        .map(Topic::from_document)
        .transpose()
}

/// Insert a topic and return its id
pub async fn create(store: &dyn DocumentStore, topic: &NewTopic) -> StoreResult<String> {
    store.add_document(TOPICS, to_fields(topic)?).await
}

pub async fn update(store: &dyn DocumentStore, id: &str, update: &TopicUpdate) -> StoreResult<()> {
    store.update_document(TOPICS, id, to_fields(update)?).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<()> {
    store.delete_document(TOPICS, id).await
}
